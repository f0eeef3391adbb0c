//! CLI command implementations.
//!
//! - [`config`] - Configuration file management (path, show, init)
//! - [`simulate`] - Synthetic session with scripted traffic

pub mod config;
pub mod simulate;
