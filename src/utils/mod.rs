//! Utility modules for ssl-chain
//!
//! This module contains error types, progress indicators, and other utilities.

pub mod error;
pub mod progress;

pub use error::{ChainError, ConfigError, Result, ToolkitError};
