//! Root CA bundle loading
//!
//! Reads the curated bundle format published at curl.se: each root is a
//! human-readable name, a line of `=` characters, then a PEM block.
//!
//! ```text
//! ISRG Root X1
//! ============
//! -----BEGIN CERTIFICATE-----
//! ...
//! -----END CERTIFICATE-----
//! ```

use crate::models::Certificate;
use crate::utils::ChainError;
use std::path::Path;

const SECTION_MARKER: &str = "=====";
const END_CERTIFICATE: &str = "-----END CERTIFICATE-----";

/// A trust anchor loaded from the bundle
#[derive(Debug, Clone)]
pub struct RootEntry {
    /// Issuer name of the parsed certificate
    pub name: String,
    pub certificate: Certificate,
}

/// Trust anchors keyed by issuer name, kept in bundle order
#[derive(Debug, Clone, Default)]
pub struct RootCAStore {
    entries: Vec<RootEntry>,
}

impl RootCAStore {
    /// Load the bundle from a file
    pub fn load(bundle_path: &Path) -> Result<Self, ChainError> {
        let text = std::fs::read_to_string(bundle_path).map_err(|e| ChainError::RootStore {
            message: format!("Cannot read {}: {}", bundle_path.display(), e),
        })?;
        Self::from_text(&text)
    }

    /// Parse bundle text already held in memory
    pub fn from_text(text: &str) -> Result<Self, ChainError> {
        let mut store = RootCAStore::default();
        let lines: Vec<&str> = text.lines().collect();
        let mut index = 0;

        while index < lines.len() {
            if !lines[index].starts_with(SECTION_MARKER) {
                index += 1;
                continue;
            }

            let label = if index > 0 { lines[index - 1].trim() } else { "" };
            index += 1;

            let mut block = String::new();
            let mut closed = false;
            while index < lines.len() {
                let line = lines[index];
                block.push_str(line);
                block.push('\n');
                index += 1;
                if line.starts_with(END_CERTIFICATE) {
                    closed = true;
                    break;
                }
            }

            if !closed {
                return Err(ChainError::RootStore {
                    message: format!("Section '{}' has no END CERTIFICATE marker", label),
                });
            }

            let certificate = Certificate::from_pem(&block).map_err(|e| ChainError::RootStore {
                message: format!("Section '{}': {}", label, e),
            })?;
            tracing::trace!("Loaded root section '{}'", label);
            store.insert(certificate.issuer().to_string(), certificate);
        }

        if store.is_empty() {
            return Err(ChainError::RootStore {
                message: "No root CA sections found in bundle".to_string(),
            });
        }

        tracing::info!("Number of Root CAs loaded: {}", store.len());
        Ok(store)
    }

    /// Insert or replace the entry for `name`, keeping its original position
    fn insert(&mut self, name: String, certificate: Certificate) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => existing.certificate = certificate,
            None => self.entries.push(RootEntry { name, certificate }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Certificate> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.certificate)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RootEntry> {
        self.entries.iter()
    }

    /// First entry, in bundle order, whose SKI equals `key_id` byte for byte
    ///
    /// Entries without an SKI are skipped.
    pub fn find_by_subject_key_id(&self, key_id: &[u8]) -> Option<&RootEntry> {
        self.entries.iter().find(|entry| {
            match entry.certificate.subject_key_identifier() {
                Some(ski) => ski == key_id,
                None => {
                    tracing::info!("Root CA {} didn't have a SKI. Skipping...", entry.name);
                    false
                }
            }
        })
    }
}
