//! Custom error types for ssl-chain
//!
//! This module defines domain-specific error types using `thiserror` for
//! the failure modes of chain discovery, configuration loading and persistence.

use thiserror::Error;

/// Top-level error type for the ssl-chain application
#[derive(Error, Debug)]
pub enum ToolkitError {
    #[error("{0}")]
    Chain(#[from] ChainError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Chain discovery errors
///
/// Every variant is terminal for the request that raised it; nothing is
/// retried automatically.
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Network error: {reason}")]
    Network { reason: String },

    #[error("Could not find AIA on the certificate for {host}, possible decryption taking place upstream?")]
    InterceptionSuspected { host: String },

    #[error("Could not retrieve issuer certificate from {uri}: {reason}")]
    ChainResolution { uri: String, reason: String },

    #[error("Root store error: {message}")]
    RootStore { message: String },

    #[error("Root CA not found for authority key identifier {aki}")]
    RootNotFound { aki: String },

    #[error("Failed to parse certificate: {message}")]
    Certificate { message: String },

    #[error("Failed to download root bundle from {url}: {message}")]
    BundleDownload { url: String, message: String },

    #[error("Invalid target: {target}")]
    InvalidTarget { target: String },

    #[error("Failed to write chain file {path}: {message}")]
    Write { path: String, message: String },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias using ToolkitError
pub type Result<T> = std::result::Result<T, ToolkitError>;
