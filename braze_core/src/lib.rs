//! # braze_core - Brazing and Welding Equation Resolver
//!
//! `braze_core` is the computational heart of Brazeguide, a quick-reference for
//! sheet-metal brazing and welding work. Its centrepiece is a symbolic resolver:
//! give it a catalog equation and values for every variable but one, and it
//! solves for the remaining one.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: Solutions, catalog entries and errors all serialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Physically Valid**: Roots outside a variable's domain are discarded
//!
//! ## Quick Start
//!
//! ```rust
//! use braze_core::equations::{bind, solve};
//!
//! let solution = solve("shear-stress", &bind(&[("stress", 30000.0), ("area", 0.5)])).unwrap();
//! assert_eq!(solution.unknown, "force");
//! assert!((solution.value - 15000.0).abs() < 1e-9);
//!
//! // Serialize to JSON for scripting
//! let json = serde_json::to_string_pretty(&solution).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`equations`] - Equation catalog, expression trees and the resolver
//! - [`reference`] - Static guidance tables grouped into pages
//! - [`documents`] - Reference PDF status and downloads
//! - [`pdf_tables`] - Table and footnote recovery from local PDFs
//! - [`settings`] - JSON settings with defaults
//! - [`errors`] - Structured error types
//! - [`file_io`] - Atomic file writes

pub mod documents;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod pdf_tables;
pub mod reference;
pub mod settings;

// Re-export commonly used types at crate root for convenience
pub use equations::{solve, solve_for, Bindings, Equation, Solution};
pub use errors::{GuideError, GuideResult};
pub use settings::GuideSettings;
