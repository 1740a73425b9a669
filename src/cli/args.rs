//! CLI argument definitions using clap

use crate::runner::ChainRequest;
use crate::utils::ChainError;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ssl-chain")]
#[command(author = "Russ McKendrick")]
#[command(version)]
#[command(about = "Download a host's TLS certificate chain and save it as PEM files", long_about = None)]
pub struct Cli {
    /// Host to connect to, optionally host:port
    #[arg(value_name = "HOST", default_value = "www.google.com")]
    pub host: String,

    /// Output directory for the certificate chain files
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Remove existing chain files (*.crt, cacert.pem) from the output directory first
    #[arg(long)]
    pub rm_ca_files: bool,

    /// Download cacert.pem to help find the root CA
    #[arg(long)]
    pub get_ca_cert_pem: bool,

    /// Maximum number of certificates in the chain
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Fail when the leaf has no AIA extension (possible TLS interception)
    #[arg(long)]
    pub require_aia: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,

    /// Settings file (defaults to config/default.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the chain report as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Build the chain request described by the arguments
    pub fn to_request(&self) -> Result<ChainRequest, ChainError> {
        Ok(ChainRequest::new(&self.host, self.output_dir.clone())?
            .purge_existing(self.rm_ca_files)
            .fetch_bundle(self.get_ca_cert_pem))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}
