//! eurenew CLI binary.
//!
//! Serves the renewables leaderboard dashboard and prints or exports
//! leaderboards from the command line.

mod config;
mod server;

use clap::{Parser, Subcommand};
use config::{FormatArg, SourceArgs, parse_sector};
use eurenew::output::{ExportFormat, Exporter, LeaderboardTable};
use eurenew::{EnergySector, ReportService, SectorReport};
use indicatif::{ProgressBar, ProgressStyle};
use server::AppState;
use std::net::SocketAddr;
use std::process;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "eurenew")]
#[command(about = "European renewable energy: top 10 tracker", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the interactive dashboard
    Serve {
        /// Address to listen on
        #[arg(long, env = "BIND_ADDRESS", default_value = "127.0.0.1:8501")]
        bind: SocketAddr,
    },

    /// Print the leaderboard of a sector
    Show {
        /// Sector display name or nrg_bal code
        #[arg(long, value_parser = parse_sector, default_value = "Overall Share")]
        sector: EnergySector,

        /// Print a Markdown table instead of plain text
        #[arg(long)]
        markdown: bool,
    },

    /// Write the leaderboard (or the full sector table) to stdout
    Export {
        /// Sector display name or nrg_bal code
        #[arg(long, value_parser = parse_sector, default_value = "Overall Share")]
        sector: EnergySector,

        /// Output format
        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,

        /// Export every row of the sector instead of the ranking
        #[arg(long)]
        raw: bool,
    },

    /// List the reported sectors
    Sectors,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Commands::Serve { .. } => "eurenew=info,tower_http=info",
        _ => "eurenew=warn",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Serve { bind } => {
            let service = ReportService::new(cli.source.build()?);
            server::serve(bind, AppState::new(service)).await?;
        }
        Commands::Show { sector, markdown } => {
            let report = fetch_report(&cli.source, sector).await?;
            let table = LeaderboardTable::from_report(&report);
            if markdown {
                print!("{}", table.to_markdown());
            } else {
                print!("{}", table);
            }
        }
        Commands::Export {
            sector,
            format,
            raw,
        } => {
            let service = ReportService::new(cli.source.build()?);
            let report = service.report(sector).await?;
            let format = ExportFormat::from(format);
            let mut stdout = std::io::stdout().lock();

            if raw {
                report.raw.export_to_writer(&mut stdout, format)?;
            } else {
                LeaderboardTable::from_report(&report).export_to_writer(&mut stdout, format)?;
            }
        }
        Commands::Sectors => list_sectors(),
    }

    Ok(())
}

/// Run the pipeline for one sector behind a spinner.
async fn fetch_report(
    source: &SourceArgs,
    sector: EnergySector,
) -> Result<SectorReport, Box<dyn std::error::Error>> {
    let service = ReportService::new(source.build()?);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Fetching data for all countries...");

    let result = service.report(sector).await;
    pb.finish_and_clear();

    Ok(result?)
}

fn list_sectors() {
    println!("{:<14} Sector", "nrg_bal");
    println!("{}", "-".repeat(34));
    for sector in EnergySector::all() {
        println!("{:<14} {}", sector.code(), sector.name());
    }
}
