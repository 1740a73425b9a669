//! Data models for ssl-chain
//!
//! This module contains the data structures shared by the connector, the chain
//! walker and persistence.

pub mod certificate;
pub mod chain;

pub use certificate::{format_key_id, Certificate, CertificateSource, CertificateSummary};
pub use chain::{CertificateChain, ChainMember, ChainReport};
