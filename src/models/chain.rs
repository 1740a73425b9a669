//! Certificate chain types

use super::certificate::{format_key_id, Certificate, CertificateSource, CertificateSummary};
use serde::Serialize;
use std::path::PathBuf;

/// A certificate together with how it joined the chain
#[derive(Debug, Clone)]
pub struct ChainMember {
    pub certificate: Certificate,
    pub source: CertificateSource,
}

/// Ordered chain from the leaf (index 0) towards the root
///
/// Append-only: members are never reordered or deduplicated.
#[derive(Debug, Clone)]
pub struct CertificateChain {
    members: Vec<ChainMember>,
}

impl CertificateChain {
    /// Start a chain from the certificate presented in the handshake
    pub fn new(leaf: Certificate) -> Self {
        Self {
            members: vec![ChainMember {
                certificate: leaf,
                source: CertificateSource::Handshake,
            }],
        }
    }

    pub fn push(&mut self, certificate: Certificate, source: CertificateSource) {
        self.members.push(ChainMember {
            certificate,
            source,
        });
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false; a chain holds at least its leaf
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn leaf(&self) -> &Certificate {
        &self.members[0].certificate
    }

    /// The most authoritative certificate reached so far
    pub fn last(&self) -> &Certificate {
        &self.members[self.members.len() - 1].certificate
    }

    pub fn members(&self) -> &[ChainMember] {
        &self.members
    }

    pub fn certificates(&self) -> impl Iterator<Item = &Certificate> {
        self.members.iter().map(|m| &m.certificate)
    }

    pub fn summaries(&self) -> Vec<CertificateSummary> {
        self.members
            .iter()
            .enumerate()
            .map(|(index, member)| CertificateSummary {
                depth: index + 1,
                subject: member.certificate.subject().to_string(),
                issuer: member.certificate.issuer().to_string(),
                authority_key_identifier: member
                    .certificate
                    .authority_key_identifier()
                    .map(format_key_id),
                subject_key_identifier: member
                    .certificate
                    .subject_key_identifier()
                    .map(format_key_id),
                fingerprint_sha256: member.certificate.fingerprint_sha256(),
                source: member.source.clone(),
            })
            .collect()
    }
}

/// Result of a chain request handed back to the caller
#[derive(Debug, Clone, Serialize)]
pub struct ChainReport {
    pub host: String,
    pub port: u16,
    pub certificates: Vec<CertificateSummary>,
    /// Every chain artifact present in the output directory after the write
    pub files: Vec<PathBuf>,
}
