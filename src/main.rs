use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use songslike::{server, Config};

#[derive(Parser)]
#[command(name = "songslike")]
#[command(about = "Search Spotify tracks and find songs like them")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Address to bind (or set HOST env var)
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Port to listen on (or set PORT env var)
    #[arg(long, env = "PORT")]
    port: Option<u16>,
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn warn_missing_credentials(missing: &[String]) {
    println!("\n{}", "=".repeat(60));
    println!("{}", "WARNING: Spotify credentials not found!".yellow().bold());
    println!("Set these variables in the environment or a .env file:");
    for item in missing {
        println!("  - {}", item);
    }
    println!("Search and recommendations will fail until they are set.");
    println!("{}\n", "=".repeat(60));
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let missing = config.get_missing_config();
    if !missing.is_empty() {
        warn_missing_credentials(&missing);
    }

    println!(
        "{}",
        format!("SongsLike starting on http://{}", config.bind_addr()).cyan()
    );

    server::serve(&config).await.context("Server failed")?;

    Ok(())
}
