//! Certificate information types

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

/// A parsed X.509 certificate with the fields that matter for chain discovery
///
/// Immutable once parsed. Two certificates are related through their key
/// identifiers only; the names are kept for logging and file naming.
#[derive(Debug, Clone)]
pub struct Certificate {
    subject: String,
    issuer: String,
    der: Vec<u8>,
    ca_issuers: Vec<String>,
    authority_key_id: Option<Vec<u8>>,
    subject_key_id: Option<Vec<u8>>,
}

impl Certificate {
    pub(crate) fn new(
        subject: String,
        issuer: String,
        der: Vec<u8>,
        ca_issuers: Vec<String>,
        authority_key_id: Option<Vec<u8>>,
        subject_key_id: Option<Vec<u8>>,
    ) -> Self {
        Self {
            subject,
            issuer,
            der,
            ca_issuers,
            authority_key_id,
            subject_key_id,
        }
    }

    /// Parse a DER-encoded certificate
    pub fn from_der(der: &[u8]) -> Result<Self, crate::utils::ChainError> {
        crate::checks::certificate::parse_certificate(der)
    }

    /// Parse the first CERTIFICATE block of a PEM document
    pub fn from_pem(pem_text: &str) -> Result<Self, crate::utils::ChainError> {
        let block = ::pem::parse(pem_text).map_err(|e| crate::utils::ChainError::Certificate {
            message: format!("Failed to parse PEM: {}", e),
        })?;
        Self::from_der(block.contents())
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Raw DER encoding as received
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// caIssuers URIs from the Authority Information Access extension, in order
    pub fn authority_info_access(&self) -> &[String] {
        &self.ca_issuers
    }

    pub fn authority_key_identifier(&self) -> Option<&[u8]> {
        self.authority_key_id.as_deref()
    }

    pub fn subject_key_identifier(&self) -> Option<&[u8]> {
        self.subject_key_id.as_deref()
    }

    /// SHA-256 over the DER encoding, colon-separated hex
    pub fn fingerprint_sha256(&self) -> String {
        format_key_id(&Sha256::digest(&self.der))
    }
}

impl fmt::Display for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.subject)
    }
}

/// Render a key identifier as colon-separated uppercase hex
pub fn format_key_id(key_id: &[u8]) -> String {
    key_id
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(":")
}

/// Where a chain member was obtained from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CertificateSource {
    /// Presented by the peer during the TLS handshake
    Handshake,
    /// Downloaded from an AIA caIssuers URI
    Aia { uri: String },
    /// Matched in the local root CA bundle
    RootStore,
}

impl fmt::Display for CertificateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CertificateSource::Handshake => write!(f, "TLS handshake"),
            CertificateSource::Aia { uri } => write!(f, "AIA ({})", uri),
            CertificateSource::RootStore => write!(f, "Root store"),
        }
    }
}

/// Summary of a chain member for reports
#[derive(Debug, Clone, Serialize)]
pub struct CertificateSummary {
    pub depth: usize,
    pub subject: String,
    pub issuer: String,
    pub authority_key_identifier: Option<String>,
    pub subject_key_identifier: Option<String>,
    pub fingerprint_sha256: String,
    pub source: CertificateSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_key_id() {
        assert_eq!(format_key_id(&[0x0a, 0xff, 0x10]), "0A:FF:10");
        assert_eq!(format_key_id(&[]), "");
    }

    #[test]
    fn test_source_display() {
        let source = CertificateSource::Aia {
            uri: "http://ca.example/int.der".to_string(),
        };
        assert_eq!(source.to_string(), "AIA (http://ca.example/int.der)");
        assert_eq!(CertificateSource::RootStore.to_string(), "Root store");
    }
}
