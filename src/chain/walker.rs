//! Issuer chain walking
//!
//! Starting from a leaf, each step follows the Authority Key Identifier of the
//! last certificate to its issuer. Issuers are downloaded from the AIA
//! caIssuers URI when the certificate lists one, otherwise the local root
//! bundle is searched for a certificate whose SKI matches.

use crate::chain::fetch::IssuerFetcher;
use crate::chain::root_store::RootCAStore;
use crate::models::{format_key_id, Certificate, CertificateChain, CertificateSource};
use crate::utils::ChainError;
use std::path::PathBuf;

/// Default bound on the number of certificates in a chain
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// Where the walker loads trust anchors from when AIA is missing
#[derive(Debug, Clone)]
pub enum RootSource {
    /// Bundle file, read each time it is needed
    File(PathBuf),
    /// Bundle text held in memory
    Text(String),
}

impl RootSource {
    fn load(&self) -> Result<RootCAStore, ChainError> {
        match self {
            RootSource::File(path) => RootCAStore::load(path),
            RootSource::Text(text) => RootCAStore::from_text(text),
        }
    }
}

/// Walks from a leaf to its root
///
/// Holds no state between walks, so one walker may serve concurrent requests.
pub struct ChainWalker<F> {
    fetcher: F,
    roots: RootSource,
    max_depth: usize,
}

impl<F: IssuerFetcher> ChainWalker<F> {
    pub fn new(fetcher: F, roots: RootSource) -> Self {
        Self {
            fetcher,
            roots,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Resolve issuers until a certificate without AKI, a root-store match,
    /// or the depth bound is reached
    ///
    /// Depth counts chain positions from 1 (the leaf). Reaching the bound
    /// truncates the chain without an error.
    pub async fn walk(&self, leaf: Certificate) -> Result<CertificateChain, ChainError> {
        let mut chain = CertificateChain::new(leaf);

        loop {
            let depth = chain.len();
            let current = chain.last();

            let aki = current.authority_key_identifier().map(<[u8]>::to_vec);
            tracing::info!(
                "Depth: {} - AKI: {} - SKI: {}",
                depth,
                aki.as_deref().map(format_key_id).unwrap_or_else(|| "None".to_string()),
                current
                    .subject_key_identifier()
                    .map(format_key_id)
                    .unwrap_or_else(|| "None".to_string()),
            );

            let Some(aki) = aki else {
                tracing::debug!("{} has no AKI, chain complete", current.subject());
                break;
            };

            if depth + 1 > self.max_depth {
                tracing::debug!("Maximum depth {} reached, truncating chain", self.max_depth);
                break;
            }

            let ca_issuers = current.authority_info_access().to_vec();
            if ca_issuers.is_empty() {
                tracing::warn!("Certificate didn't have AIA.");
                let root = self.resolve_from_root_store(&aki)?;
                chain.push(root, CertificateSource::RootStore);
                break;
            }

            let (uri, issuer) = self.resolve_from_aia(&ca_issuers).await?;
            tracing::info!("Fetched issuer {} from {}", issuer.subject(), uri);
            chain.push(issuer, CertificateSource::Aia { uri });
        }

        Ok(chain)
    }

    /// Download the issuer named by the first caIssuers URI
    ///
    /// A failure on that URI fails the walk; later URIs and the root bundle are
    /// not consulted.
    async fn resolve_from_aia(
        &self,
        ca_issuers: &[String],
    ) -> Result<(String, Certificate), ChainError> {
        let uri = &ca_issuers[0];
        let resolution_error = |reason: String| {
            tracing::warn!("Could not retrieve certificate from {}: {}", uri, reason);
            ChainError::ChainResolution {
                uri: uri.clone(),
                reason,
            }
        };

        let response = self.fetcher.get(uri).await.map_err(resolution_error)?;
        if response.status != 200 {
            return Err(resolution_error(format!("HTTP status code {}", response.status)));
        }

        let issuer = decode_issuer(&response.body).map_err(|e| resolution_error(e.to_string()))?;
        Ok((uri.clone(), issuer))
    }

    fn resolve_from_root_store(&self, aki: &[u8]) -> Result<Certificate, ChainError> {
        let store = self.roots.load()?;

        match store.find_by_subject_key_id(aki) {
            Some(entry) => {
                tracing::info!("Root CA Found - {}", entry.name);
                Ok(entry.certificate.clone())
            }
            None => {
                tracing::error!("Root CA NOT found.");
                Err(ChainError::RootNotFound {
                    aki: format_key_id(aki),
                })
            }
        }
    }
}

/// AIA responses are DER per RFC 5280, but some servers answer with PEM
fn decode_issuer(body: &[u8]) -> Result<Certificate, ChainError> {
    if body.starts_with(b"-----BEGIN") {
        let text = std::str::from_utf8(body).map_err(|e| ChainError::Certificate {
            message: e.to_string(),
        })?;
        Certificate::from_pem(text)
    } else {
        Certificate::from_der(body)
    }
}
