//! Pandakeeper Bot
//!
//! Runtime wiring and infrastructure adapters for the panda adoption
//! ledger: JSON file persistence, bundled daily post content, and the
//! process entrypoint in `main.rs`.

pub mod adapters;
pub mod settings;
