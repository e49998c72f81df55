//! Reassert - CLI tool for migrating test suites from TUnit to xUnit
//! assertion syntax.
//!
//! This library provides the core functionality for reassert, including:
//! - The pass/rule catalog driving the TUnit to xUnit conversion
//! - Candidate file discovery with glob filtering and an exclusion set
//! - Batch processing with per-file outcomes and a continue-on-error policy
//! - Configuration file parsing and lookup
//!
//! # Example
//!
//! ```
//! use reassert_cli::rules::{apply_passes, default_passes};
//!
//! let passes = default_passes().unwrap();
//! let converted = apply_passes(&passes, "await Assert.That(flag).IsTrue();");
//! assert_eq!(converted, "Assert.True(flag);");
//! ```

pub mod batch;
pub mod config;
pub mod diff;
pub mod error;
pub mod rules;

pub use error::{ReassertError, Result};
