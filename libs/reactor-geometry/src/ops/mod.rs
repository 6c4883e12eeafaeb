//! # Geometry Operations
//!
//! - [`extrude`]: profile → closed surface
//! - [`boolean`]: surface difference for cuts

pub mod boolean;
pub mod extrude;
