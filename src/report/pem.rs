//! PEM export and chain file persistence
//!
//! Exports certificate chains in PEM format and writes them to the output
//! directory as a single `.crt` artifact named after the trust anchor.

use crate::models::{Certificate, CertificateChain};
use crate::utils::ChainError;
use base64::Engine;
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File suffix of chain artifacts
pub const CHAIN_FILE_SUFFIX: &str = ".crt";

/// Bundle file removed together with chain artifacts on purge
pub const BUNDLE_FILE_NAME: &str = "cacert.pem";

/// PEM exporter for certificates
pub struct PemExporter;

impl PemExporter {
    /// Export a single certificate to PEM format
    pub fn export_certificate(cert: &Certificate) -> String {
        Self::encode_der(cert.der())
    }

    fn encode_der(der: &[u8]) -> String {
        let b64 = base64::engine::general_purpose::STANDARD.encode(der);
        let mut pem = String::from("-----BEGIN CERTIFICATE-----\n");
        for chunk in b64.as_bytes().chunks(64) {
            pem.push_str(std::str::from_utf8(chunk).unwrap_or(""));
            pem.push('\n');
        }
        pem.push_str("-----END CERTIFICATE-----\n");
        pem
    }
}

/// Turn a subject name into a file-name friendly token
///
/// `/`-separated parts are trimmed, `=`, `.`, spaces and commas become `_`,
/// and the parts are joined with `_`.
pub fn normalize_subject(subject: &str) -> String {
    subject
        .split('/')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.replace(['=', '.', ' ', ','], "_"))
        .collect::<Vec<_>>()
        .join("_")
}

/// File name of the artifact for a chain, derived from its last member
pub fn chain_file_name(chain: &CertificateChain) -> String {
    let name = normalize_subject(chain.last().subject());
    if name.is_empty() {
        format!("chain{}", CHAIN_FILE_SUFFIX)
    } else {
        format!("{}{}", name, CHAIN_FILE_SUFFIX)
    }
}

fn is_chain_artifact(file_name: &str) -> bool {
    file_name.ends_with(CHAIN_FILE_SUFFIX)
}

/// Delete chain artifacts and the bundle file from `output_dir`
///
/// A missing directory counts as already clean.
pub fn purge_chain_files(output_dir: &Path) -> Result<Vec<PathBuf>, ChainError> {
    let mut removed = Vec::new();
    if !output_dir.is_dir() {
        return Ok(removed);
    }

    tracing::info!("Removing certificate files from {}", output_dir.display());
    for entry in std::fs::read_dir(output_dir).map_err(|e| write_error(output_dir, e))? {
        let entry = entry.map_err(|e| write_error(output_dir, e))?;
        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy().to_string();
        if path.is_file() && (is_chain_artifact(&file_name) || file_name == BUNDLE_FILE_NAME) {
            std::fs::remove_file(&path).map_err(|e| write_error(&path, e))?;
            tracing::info!("Removed {}", file_name);
            removed.push(path);
        }
    }

    Ok(removed)
}

/// All chain artifacts currently in `output_dir`, sorted by path
pub fn list_chain_files(output_dir: &Path) -> Result<Vec<PathBuf>, ChainError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(output_dir).map_err(|e| write_error(output_dir, e))? {
        let entry = entry.map_err(|e| write_error(output_dir, e))?;
        let path = entry.path();
        if path.is_file() && is_chain_artifact(&entry.file_name().to_string_lossy()) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Append the chain to its artifact in `output_dir`
///
/// Certificates already present in the artifact (same DER) are not written
/// again, so reruns into a shared directory do not accumulate duplicates.
/// Returns every chain artifact in the directory after the write.
pub fn write_chain(
    chain: &CertificateChain,
    output_dir: &Path,
    purge_existing: bool,
) -> Result<Vec<PathBuf>, ChainError> {
    if purge_existing {
        purge_chain_files(output_dir)?;
    }

    std::fs::create_dir_all(output_dir).map_err(|e| write_error(output_dir, e))?;

    let path = output_dir.join(chain_file_name(chain));
    let mut present = existing_certificates(&path);

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| write_error(&path, e))?;

    for cert in chain.certificates() {
        if !present.insert(cert.der().to_vec()) {
            tracing::debug!("{} already in {}, skipping", cert.subject(), path.display());
            continue;
        }
        file.write_all(PemExporter::export_certificate(cert).as_bytes())
            .map_err(|e| write_error(&path, e))?;
    }

    tracing::info!("Certificate chain saved to {}", path.display());
    list_chain_files(output_dir)
}

/// DER of every CERTIFICATE block already in `path`; empty if unreadable
fn existing_certificates(path: &Path) -> HashSet<Vec<u8>> {
    let Ok(data) = std::fs::read(path) else {
        return HashSet::new();
    };
    ::pem::parse_many(data)
        .map(|blocks| {
            blocks
                .into_iter()
                .filter(|p| p.tag() == "CERTIFICATE")
                .map(|p| p.into_contents())
                .collect()
        })
        .unwrap_or_default()
}

fn write_error(path: &Path, e: std::io::Error) -> ChainError {
    ChainError::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
