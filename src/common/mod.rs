//! Common types and utilities shared across the crate.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants and derived occupancy bounds
//! - Error types
//! - The `Key` type indexed by the tree

pub mod config;
pub mod error;
mod key;

pub use error::{Error, Result};
pub use key::Key;
