//! Chain request orchestration
//!
//! Sequences the connector, the chain walker and persistence for one request.
//! Frontends (CLI, GUI workers) drive it through [`run_chain`].

use crate::chain::{fetch_root_bundle, ChainWalker, HttpFetcher, IssuerFetcher, RootSource};
use crate::checks::{LeafConnector, LeafSource};
use crate::config::Settings;
use crate::models::{Certificate, ChainReport};
use crate::report::{purge_chain_files, write_chain};
use crate::utils::ChainError;
use std::path::PathBuf;

/// Port used when the target carries none
pub const DEFAULT_PORT: u16 = 443;

/// A validated chain request
#[derive(Debug, Clone)]
pub struct ChainRequest {
    pub host: String,
    pub port: u16,
    pub output_dir: PathBuf,
    /// Remove existing chain files and the bundle before anything else
    pub purge_existing: bool,
    /// Download a fresh root bundle before walking
    pub fetch_bundle: bool,
}

impl ChainRequest {
    /// Build a request from a `host` or `host:port` target
    pub fn new(target: &str, output_dir: impl Into<PathBuf>) -> Result<Self, ChainError> {
        let (host, port) = Self::parse_target(target)?;
        Ok(Self {
            host,
            port,
            output_dir: output_dir.into(),
            purge_existing: false,
            fetch_bundle: false,
        })
    }

    pub fn purge_existing(mut self, purge: bool) -> Self {
        self.purge_existing = purge;
        self
    }

    pub fn fetch_bundle(mut self, fetch: bool) -> Self {
        self.fetch_bundle = fetch;
        self
    }

    /// Split `host[:port]`, defaulting the port to 443
    pub fn parse_target(target: &str) -> Result<(String, u16), ChainError> {
        let invalid = || ChainError::InvalidTarget {
            target: target.to_string(),
        };

        let target = target.trim();
        let (host, port) = match target.split_once(':') {
            Some((host, port)) => (host, port.parse::<u16>().map_err(|_| invalid())?),
            None => (target, DEFAULT_PORT),
        };

        if host.is_empty() || port == 0 {
            return Err(invalid());
        }

        Ok((host.to_string(), port))
    }
}

/// Run a chain request end to end with the network-backed fetcher
pub async fn run_chain(request: &ChainRequest, settings: &Settings) -> Result<ChainReport, ChainError> {
    let fetcher = HttpFetcher::new(settings.chain.fetch_timeout())?;
    let connector = LeafConnector::new(settings.connect.clone());
    run_chain_with(request, settings, &connector, fetcher).await
}

/// Run a chain request with the given leaf source and issuer fetcher
///
/// Steps run strictly in order: purge, bundle download, leaf fetch, walk,
/// write. A failure stops the run at that step.
pub async fn run_chain_with<L: LeafSource, F: IssuerFetcher>(
    request: &ChainRequest,
    settings: &Settings,
    leaf_source: &L,
    fetcher: F,
) -> Result<ChainReport, ChainError> {
    if request.purge_existing {
        purge_chain_files(&request.output_dir)?;
    }

    if request.fetch_bundle {
        fetch_root_bundle(&fetcher, &settings.chain.bundle_url, &settings.chain.bundle_path).await?;
    }

    let leaf = leaf_source
        .fetch_leaf_certificate(&request.host, request.port)
        .await?;

    walk_and_write(request, settings, fetcher, leaf).await
}

/// Walk from an already fetched leaf and persist the chain
///
/// Purging and bundle download are left to the caller.
pub async fn walk_and_write<F: IssuerFetcher>(
    request: &ChainRequest,
    settings: &Settings,
    fetcher: F,
    leaf: Certificate,
) -> Result<ChainReport, ChainError> {
    if settings.chain.require_leaf_aia && leaf.authority_info_access().is_empty() {
        return Err(ChainError::InterceptionSuspected {
            host: request.host.clone(),
        });
    }

    let walker = ChainWalker::new(fetcher, RootSource::File(settings.chain.bundle_path.clone()))
        .with_max_depth(settings.chain.max_depth);
    let chain = walker.walk(leaf).await?;

    let files = write_chain(&chain, &request.output_dir, false)?;
    tracing::info!("Certificate chain downloaded and saved.");

    Ok(ChainReport {
        host: request.host.clone(),
        port: request.port,
        certificates: chain.summaries(),
        files,
    })
}
