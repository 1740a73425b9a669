//! Chain persistence
//!
//! Writes discovered chains to disk as PEM.

pub mod pem;

pub use pem::{
    chain_file_name, list_chain_files, normalize_subject, purge_chain_files, write_chain,
    PemExporter, BUNDLE_FILE_NAME, CHAIN_FILE_SUFFIX,
};
