//! Certificate parsing and extension reading
//!
//! Decodes X.509 certificates using x509-parser and pulls out the three
//! extensions the chain walker relies on: Authority Information Access,
//! Authority Key Identifier and Subject Key Identifier.

use crate::models::Certificate;
use crate::utils::ChainError;
use x509_parser::prelude::*;

/// id-ad-caIssuers access method
const OID_AD_CA_ISSUERS: &str = "1.3.6.1.5.5.7.48.2";

/// Parse a single DER-encoded certificate
pub fn parse_certificate(der: &[u8]) -> Result<Certificate, ChainError> {
    let (_, cert) = X509Certificate::from_der(der).map_err(|e| ChainError::Certificate {
        message: format!("{:?}", e),
    })?;

    Ok(Certificate::new(
        cert.subject().to_string(),
        cert.issuer().to_string(),
        der.to_vec(),
        authority_info_access(&cert),
        authority_key_identifier(&cert),
        subject_key_identifier(&cert),
    ))
}

/// caIssuers URIs from the AIA extension, in the order they are listed
///
/// OCSP responders and any other access methods are ignored. A missing
/// extension yields an empty list.
pub fn authority_info_access(cert: &X509Certificate) -> Vec<String> {
    let mut uris = Vec::new();

    for ext in cert.extensions() {
        if let ParsedExtension::AuthorityInfoAccess(aia) = ext.parsed_extension() {
            for desc in &aia.accessdescs {
                if desc.access_method.to_id_string() != OID_AD_CA_ISSUERS {
                    continue;
                }
                if let GeneralName::URI(uri) = &desc.access_location {
                    uris.push(uri.to_string());
                }
            }
        }
    }

    uris
}

/// Key identifier of the issuing key, if the AKI extension carries one
pub fn authority_key_identifier(cert: &X509Certificate) -> Option<Vec<u8>> {
    for ext in cert.extensions() {
        if let ParsedExtension::AuthorityKeyIdentifier(aki) = ext.parsed_extension() {
            return aki.key_identifier.as_ref().map(|id| id.0.to_vec());
        }
    }
    None
}

/// Key identifier of this certificate's own public key
pub fn subject_key_identifier(cert: &X509Certificate) -> Option<Vec<u8>> {
    for ext in cert.extensions() {
        if let ParsedExtension::SubjectKeyIdentifier(ski) = ext.parsed_extension() {
            return Some(ski.0.to_vec());
        }
    }
    None
}
