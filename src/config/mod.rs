//! Run Configuration Module
//!
//! Provides the batch run configuration loaded from TOML files, with CLI
//! flags layered on top by the binary.
//!
//! ## Loading Order
//!
//! 1. `LAS_WINDOW_CONFIG` environment variable (path to TOML file)
//! 2. `las_window.toml` in the current working directory
//! 3. Built-in defaults
//!
//! The loaded config is passed explicitly to the batch driver; nothing here is
//! process-global.

mod run_config;
pub mod validation;

pub use run_config::*;
