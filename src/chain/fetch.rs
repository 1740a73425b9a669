//! HTTP retrieval for issuer certificates and the root CA bundle

use crate::utils::ChainError;
use std::future::Future;
use std::path::Path;
use std::time::Duration;

/// Status and body of an HTTP GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn ok(body: Vec<u8>) -> Self {
        Self { status: 200, body }
    }

    pub fn not_found() -> Self {
        Self {
            status: 404,
            body: Vec::new(),
        }
    }
}

/// Retrieves the body behind an AIA caIssuers URI
///
/// Transport failures are reported as `Err(reason)`; any HTTP status,
/// including errors, comes back as a response.
pub trait IssuerFetcher {
    fn get(&self, uri: &str) -> impl Future<Output = Result<HttpResponse, String>> + Send;
}

impl<T: IssuerFetcher + ?Sized> IssuerFetcher for &T {
    fn get(&self, uri: &str) -> impl Future<Output = Result<HttpResponse, String>> + Send {
        (**self).get(uri)
    }
}

/// reqwest-backed fetcher used outside of tests
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, ChainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ssl-chain/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ChainError::Network {
                reason: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }
}

impl IssuerFetcher for HttpFetcher {
    async fn get(&self, uri: &str) -> Result<HttpResponse, String> {
        let response = self.client.get(uri).send().await.map_err(|e| e.to_string())?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| e.to_string())?;
        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

/// Download the root CA bundle and write it verbatim to `destination`
pub async fn fetch_root_bundle<F: IssuerFetcher>(
    fetcher: &F,
    url: &str,
    destination: &Path,
) -> Result<(), ChainError> {
    tracing::info!("Downloading {} to {}", url, destination.display());

    let response = fetcher
        .get(url)
        .await
        .map_err(|message| ChainError::BundleDownload {
            url: url.to_string(),
            message,
        })?;

    if response.status != 200 {
        tracing::error!(
            "Error downloading {}. HTTP status code: {}",
            url,
            response.status
        );
        return Err(ChainError::BundleDownload {
            url: url.to_string(),
            message: format!("HTTP status code {}", response.status),
        });
    }

    tokio::fs::write(destination, &response.body)
        .await
        .map_err(|e| ChainError::Write {
            path: destination.display().to_string(),
            message: e.to_string(),
        })?;

    tracing::info!("Downloaded {} to {}", url, destination.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticFetcher(HttpResponse);

    impl IssuerFetcher for StaticFetcher {
        async fn get(&self, _uri: &str) -> Result<HttpResponse, String> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_bundle_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("cacert.pem");
        let fetcher = StaticFetcher(HttpResponse::ok(b"bundle body\n".to_vec()));

        fetch_root_bundle(&fetcher, "https://example.test/cacert.pem", &dest)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&dest).unwrap(), b"bundle body\n");
    }

    #[tokio::test]
    async fn test_bundle_non_200_fails() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("cacert.pem");
        let fetcher = StaticFetcher(HttpResponse::not_found());

        let result = fetch_root_bundle(&fetcher, "https://example.test/cacert.pem", &dest).await;

        assert!(matches!(result, Err(ChainError::BundleDownload { .. })));
        assert!(!dest.exists());
    }
}
