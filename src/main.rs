use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use truthverify::config::Config;
use truthverify::error::GeoError;
use truthverify::gemini::client::GeminiClient;
use truthverify::geo::{Coordinates, FixedLocation, Geolocation, IpLocation, LocationProvider, LocationStatus};
use truthverify::mcp::server::{McpContext, McpServer};
use truthverify::progress::{self, ProgressStepper, StepStatus};
use truthverify::render::{render_page, render_summary};
use truthverify::verifier::{Mode, Verification, Verifier};
use truthverify::web::{WebContext, WebServer};

#[derive(Parser)]
#[command(name = "truthverify", version, about = "Fact-check claims and articles with a search-grounded model")]
struct Cli {
    /// Path to config.json (default: ./config.json, then the user config directory)
    #[arg(long, global = true, default_value = "")]
    config: String,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Verify a statement
    Claim {
        /// The claim to verify (multiple words are joined)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        #[command(flatten)]
        opts: VerifyOpts,
    },
    /// Extract and verify the key claims of an article
    Url {
        /// Article URL
        url: String,
        #[command(flatten)]
        opts: VerifyOpts,
    },
    /// Serve the browser front-end
    Serve {
        /// Listen address (default: listen_addr from the config)
        #[arg(long)]
        addr: Option<String>,
    },
    /// Run as an MCP server on stdio
    Mcp,
}

#[derive(Args)]
struct VerifyOpts {
    /// Latitude for location-dependent claims
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude for location-dependent claims
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lng: Option<f64>,

    /// Look up the current location (config coordinates, else by IP)
    #[arg(long)]
    geo: bool,

    /// Where to write the HTML report (default: report_path from the config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip the HTML report
    #[arg(long)]
    no_report: bool,

    /// Print the raw verification as JSON instead of the summary
    #[arg(long)]
    json: bool,

    /// Hide the progress steps
    #[arg(long)]
    no_progress: bool,
}

fn init_logging(verbose: bool, default_level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Interactive commands keep the terminal quiet unless asked
    let default_level = match cli.command {
        Command::Claim { .. } | Command::Url { .. } => "warn",
        Command::Serve { .. } | Command::Mcp => "info",
    };
    init_logging(cli.verbose, default_level);

    // 1. Load config
    let config = Config::load(&cli.config)?;
    config.validate().context("invalid configuration")?;
    let config = Arc::new(config);

    // 2. Init model client
    let client = GeminiClient::from_config(&config)?;
    let verifier = Arc::new(Verifier::new(client));

    // 3. Dispatch
    match cli.command {
        Command::Claim { text, opts } => {
            run_verify(&config, &verifier, Mode::Text, &text.join(" "), &opts).await
        }
        Command::Url { url, opts } => run_verify(&config, &verifier, Mode::Url, &url, &opts).await,
        Command::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| config.listen_addr.clone());
            let server = WebServer::new(WebContext { verifier, config });
            server.start(&addr).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Mcp => {
            info!("Starting truthverify MCP Server...");
            let server = McpServer::new(McpContext { verifier, config });
            server.start().await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_verify(
    config: &Config,
    verifier: &Verifier<GeminiClient>,
    mode: Mode,
    input: &str,
    opts: &VerifyOpts,
) -> Result<ExitCode> {
    let geo = resolve_location(config, opts).await;
    if geo.status() != LocationStatus::Idle {
        eprintln!("Geo-location: {}", geo.message());
    }

    let work = verifier.verify_with_geo(mode, input, &geo);
    let result = if opts.no_progress {
        work.await
    } else {
        with_progress(work, Duration::from_millis(config.progress_interval_ms)).await
    };

    let verification = match result {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };

    if opts.json {
        let json = serde_json::to_string_pretty(&verification).context("failed to serialize result")?;
        println!("{json}");
    } else {
        print!("{}", render_summary(&verification));
    }

    if !opts.no_report {
        write_report(config, opts, &verification)?;
    }

    Ok(ExitCode::SUCCESS)
}

fn write_report(config: &Config, opts: &VerifyOpts, verification: &Verification) -> Result<()> {
    let path = opts
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.report_path));
    std::fs::write(&path, render_page(verification))
        .with_context(|| format!("failed to write report: {}", path.display()))?;
    eprintln!("Report written to {}", path.display());
    Ok(())
}

// ── Geolocation ──────────────────────────────────────────────────────

async fn enable_with<P: LocationProvider>(geo: &mut Geolocation, provider: Result<P, GeoError>) {
    match provider {
        Ok(p) => geo.enable(&p).await,
        Err(e) => {
            geo.begin();
            geo.resolve(Err(e));
        }
    }
}

/// Flags win over the config; `--geo` or `geo.enabled` uses the config
/// coordinates when set, else an IP lookup.
async fn resolve_location(config: &Config, opts: &VerifyOpts) -> Geolocation {
    let mut geo = Geolocation::new();

    if let Some((lat, lng)) = opts.lat.zip(opts.lng) {
        enable_with(&mut geo, Coordinates::new(lat, lng).map(FixedLocation)).await;
    } else if opts.geo || config.geo.enabled {
        match config.fixed_location() {
            Some((lat, lng)) => {
                enable_with(&mut geo, Coordinates::new(lat, lng).map(FixedLocation)).await;
            }
            None => {
                debug!("Looking up location via {}", config.geo.lookup_url);
                enable_with(&mut geo, IpLocation::new(config.geo.lookup_url.as_str())).await;
            }
        }
    }

    geo
}

// ── Progress ─────────────────────────────────────────────────────────

/// An error paints the final state at once; success reveals the remaining
/// steps on the timer.
async fn with_progress<F, T, E>(work: F, interval: Duration) -> Result<T, E>
where
    F: std::future::Future<Output = Result<T, E>>,
{
    let mut stepper = ProgressStepper::default();
    let pb = ProgressBar::new(stepper.len() as u64);
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} [{pos}/{len}] {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(Duration::from_millis(120));

    let mut reported = 0;
    let output = progress::drive_result(&mut stepper, interval, work, |s| {
        for (i, (step, status)) in s.iter().enumerate().skip(reported) {
            if status != StepStatus::Completed {
                break;
            }
            pb.println(format!("  ✔ {}", step.title));
            reported = i + 1;
        }
        pb.set_position(s.current() as u64);
        if let Some(step) = s.active_step() {
            pb.set_message(format!("{}: {}", step.title, step.description));
        }
    })
    .await;

    pb.finish_and_clear();
    output
}
