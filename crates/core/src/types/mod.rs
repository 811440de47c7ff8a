//! Core types for Millboard.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod quantity;
pub mod status;

pub use id::*;
pub use quantity::{Lenient, parse_date};
pub use status::*;
