//! Millboard Core - Shared types library.
//!
//! This crate provides common types used across all Millboard components:
//! - `engine` - Fibre requirement and stock allocation engine
//! - `cli` - Command-line tools for inspecting snapshots
//!
//! # Architecture
//!
//! The core crate contains only types and parsing helpers - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, order statuses, usage bands, and lenient
//!   quantity parsing

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
