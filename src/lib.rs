//! ssl-chain library
//!
//! Fetches the certificate a TLS server presents and rebuilds its trust chain
//! up to a root:
//! - Leaf capture over a TLS handshake
//! - AIA, AKI and SKI extension reading
//! - Issuer resolution via AIA downloads or a curated root CA bundle
//! - PEM persistence of the discovered chain
//!
//! # Usage
//!
//! ```rust,ignore
//! use ssl_chain::{run_chain, ChainRequest, Settings};
//!
//! #[tokio::main]
//! async fn main() {
//!     let request = ChainRequest::new("example.com:443", "certs").unwrap();
//!     let report = run_chain(&request, &Settings::default()).await.unwrap();
//!     for file in report.files {
//!         println!("{}", file.display());
//!     }
//! }
//! ```

pub mod chain;
pub mod checks;
pub mod cli;
pub mod config;
pub mod models;
pub mod report;
pub mod runner;
pub mod utils;

// Re-export commonly used types
pub use chain::{ChainWalker, RootCAStore, RootSource};
pub use cli::Cli;
pub use config::Settings;
pub use models::{Certificate, CertificateChain, ChainReport};
pub use runner::{run_chain, ChainRequest};
pub use utils::{ChainError, Result, ToolkitError};
