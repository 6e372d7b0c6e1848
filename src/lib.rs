//! Forecasting and equity-intervention engine for salary populations.
//!
//! This crate turns an in-memory employee population snapshot into
//! multi-year salary projections, identifies employees below the median for
//! their peer group, evaluates budget-constrained remediation strategies
//! for pay gaps, and allocates intervention budgets across managers under
//! organisational policy constraints.
//!
//! The engine is a synchronous, in-memory library: it consumes employee
//! records and configuration, and exposes structured result records that
//! serialize cleanly for downstream report and dashboard tooling. It
//! defines no CLI, file format, or wire protocol of its own.

#![warn(missing_docs)]

pub mod config;
pub mod convergence;
pub mod error;
pub mod forecasting;
pub mod intervention;
pub mod models;
pub mod policy;
pub mod progression;
