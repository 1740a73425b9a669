//! Certificate chain discovery
//!
//! - `walker`: bounded issuer walk from a leaf to its root
//! - `root_store`: curated root CA bundle loader
//! - `fetch`: HTTP retrieval of AIA issuers and the root bundle

pub mod fetch;
pub mod root_store;
pub mod walker;

pub use fetch::{fetch_root_bundle, HttpFetcher, HttpResponse, IssuerFetcher};
pub use root_store::{RootCAStore, RootEntry};
pub use walker::{ChainWalker, RootSource, DEFAULT_MAX_DEPTH};
