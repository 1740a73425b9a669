//! Network and certificate checks
//!
//! - `ssl`: TLS handshake and leaf certificate capture
//! - `certificate`: X.509 parsing and AIA/AKI/SKI extension reading

pub mod certificate;
pub mod ssl;

pub use certificate::{
    authority_info_access, authority_key_identifier, parse_certificate, subject_key_identifier,
};
pub use ssl::{LeafConnector, LeafSource};
