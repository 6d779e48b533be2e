//! Infrastructure Adapters
//!
//! Concrete implementations of the domain ports.

pub mod content;
pub mod json;
