//! # Config Crate
//!
//! Centralized configuration constants for the fusion neutronics pipeline.
//! Tolerances, meshing defaults, naming conventions and artifact file names
//! are defined here so that every stage (geometry export, model assembly,
//! engine driver, result extraction) agrees on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{material_tag, statepoint_file_name, DEFAULT_BATCHES};
//!
//! assert_eq!(material_tag("grey_part"), "mat_grey_part");
//! assert_eq!(statepoint_file_name(DEFAULT_BATCHES), "statepoint.500.json");
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: the driver and the extractor derive the
//!   result file name from the same function
//! - **No Hidden State**: plain constants and pure helper functions only

pub mod constants;
