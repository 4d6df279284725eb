//! Core types, errors, and configuration for the content-split tool.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - Error types for precondition and configuration failures
//! - [`MigrationConfig`], the tunable constants of a migration
//! - Domain types ([`MigrationPlan`], [`GitIdentity`])

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod path;
pub mod types;

pub use config::MigrationConfig;
pub use error::{ConfigError, PlanError};
pub use types::{GitIdentity, MigrationPlan};
