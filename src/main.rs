use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use omi_wizard::app::App;
use omi_wizard::config::Config;
use omi_wizard::logging;
use omi_wizard::request::{
    form::is_numeric, http_client, load_catalog, post_request, EnvelopeRenderer, OdfPath,
    ReadRequest,
};
use omi_wizard::ui::install_panic_hook;

#[derive(Parser)]
#[command(name = "omi-wizard")]
#[command(about = "Step-by-step O-MI read request builder")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the read request for the given objects
    Preview {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Post the read request and print the node's response
    Send {
        #[command(flatten)]
        request: RequestArgs,

        /// O-MI node endpoint (default: request.endpoint from config)
        #[arg(short, long)]
        endpoint: Option<String>,
    },

    /// List the configured object catalog
    Catalog,
}

#[derive(clap::Args)]
struct RequestArgs {
    /// Object path to read, e.g. Objects/House/Temperature (repeatable)
    #[arg(short = 'o', long = "object", required = true)]
    objects: Vec<String>,

    /// Time to live in seconds (default: request.default_ttl from config)
    #[arg(long)]
    ttl: Option<String>,

    /// Subscription interval in seconds
    #[arg(long)]
    interval: Option<String>,
}

impl RequestArgs {
    fn into_read_request(self, config: &Config) -> Result<ReadRequest> {
        let ttl = self.ttl.unwrap_or_else(|| config.request.default_ttl.clone());
        if !is_numeric(&ttl) {
            bail!("TTL must be numeric, got '{ttl}'");
        }
        if let Some(interval) = &self.interval {
            if !is_numeric(interval) {
                bail!("Interval must be numeric, got '{interval}'");
            }
        }

        let paths = self
            .objects
            .iter()
            .map(|object| {
                object
                    .parse::<OdfPath>()
                    .with_context(|| format!("Invalid object path '{object}'"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ReadRequest {
            ttl,
            interval: self.interval,
            paths,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    // No subcommand means the interactive wizard
    let is_tui_mode = cli.command.is_none();

    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Preview { request }) => {
            cmd_preview(&config, request)?;
        }
        Some(Commands::Send { request, endpoint }) => {
            cmd_send(&config, request, endpoint).await?;
        }
        Some(Commands::Catalog) => {
            cmd_catalog(&config)?;
        }
        None => {
            run_tui(config, logging_handle.log_file_path).await?;
        }
    }

    Ok(())
}

async fn run_tui(config: Config, log_file_path: Option<PathBuf>) -> Result<()> {
    let objects = load_catalog(&config.catalog)?;
    install_panic_hook();

    let mut app = App::new(config, objects)?;
    let result = app.run().await;

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if let Ok(metadata) = log_path.metadata() {
            if metadata.len() > 0 {
                eprintln!("Session log: {}", log_path.display());
            }
        }
    }

    result
}

fn cmd_preview(config: &Config, args: RequestArgs) -> Result<()> {
    let request = args.into_read_request(config)?;
    let xml = EnvelopeRenderer::new()?.render(&request)?;
    println!("{xml}");
    Ok(())
}

async fn cmd_send(config: &Config, args: RequestArgs, endpoint: Option<String>) -> Result<()> {
    let request = args.into_read_request(config)?;
    let xml = EnvelopeRenderer::new()?.render(&request)?;
    let endpoint = endpoint.unwrap_or_else(|| config.request.endpoint.clone());

    tracing::info!(endpoint = %endpoint, objects = request.paths.len(), "Sending request");
    let client = http_client(&config.request)?;
    let response = post_request(&client, &endpoint, xml)
        .await
        .with_context(|| format!("Failed to send request to {endpoint}"))?;

    println!("HTTP {}", response.status);
    println!("{}", response.body);

    if !(200..300).contains(&response.status) {
        bail!("Node answered with HTTP {}", response.status);
    }
    Ok(())
}

fn cmd_catalog(config: &Config) -> Result<()> {
    let objects = load_catalog(&config.catalog)?;

    if objects.is_empty() {
        println!("Catalog is empty");
        println!("Add paths under [catalog] in {}", Config::local_config_path().display());
        return Ok(());
    }

    println!("Object catalog ({} paths)", objects.len());
    println!("{}", "─".repeat(60));
    for object in &objects {
        println!("{object}");
    }

    Ok(())
}
