//! ssl-chain - download a TLS certificate chain as PEM files

use clap::Parser;
use console::style;
use ssl_chain::config::load_settings;
use ssl_chain::utils::progress::{create_spinner, print_note, print_written};
use ssl_chain::{run_chain, Cli, Result};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Install the ring crypto provider for rustls
    let _ = rustls::crypto::ring::default_provider().install_default();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level.to_string())),
        )
        .with_target(false)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(max_depth) = cli.max_depth {
        settings.chain.max_depth = max_depth;
    }
    if cli.require_aia {
        settings.chain.require_leaf_aia = true;
    }

    let request = cli.to_request()?;

    let spinner = (!cli.json).then(|| {
        create_spinner(&format!(
            "Walking certificate chain for {}:{}...",
            request.host, request.port
        ))
    });
    let result = run_chain(&request, &settings).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let report = result?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).map_err(std::io::Error::other)?;
        println!("{}", json);
        return Ok(());
    }

    for cert in &report.certificates {
        print_note(&format!("[{}] {} ({})", cert.depth, cert.subject, cert.source));
    }
    for file in &report.files {
        print_written(&file.display().to_string());
    }

    Ok(())
}
