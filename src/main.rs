use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tripweaver::config::{LoggingConfig, TripWeaverConfig};
use tripweaver::normalize::{RecordKind, normalize_response};
use tripweaver::{GeminiClient, TripPlanner, TripRequest, web};

#[derive(Debug, Parser)]
#[command(
    name = "tripweaver",
    version,
    arg_required_else_help = true,
    about = "Clean up and normalize travel-planning model responses"
)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Command {
    /// Normalize a raw model response into canonical records
    Normalize {
        /// hotels, itinerary, budget, packing, shopping or flights
        kind: RecordKind,
        /// Model response file; stdin when omitted
        file: Option<PathBuf>,
    },
    /// Generate a whole trip from a JSON trip request
    Plan {
        /// Trip request file; stdin when omitted
        file: Option<PathBuf>,
    },
    /// Ask the travel assistant a question about a destination
    Ask {
        destination: String,
        question: String,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn init_logging(logging: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tripweaver={level},tower_http={level}")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read stdin")?;
            Ok(raw)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = TripWeaverConfig::load_from_path(cli.config.clone())?;
    init_logging(&config.logging, cli.verbose);

    match cli.command {
        Command::Normalize { kind, file } => {
            let raw = read_input(file.as_ref())?;
            let records = normalize_response(&raw, kind);
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Command::Plan { file } => plan(&config, file.as_ref()).await?,
        Command::Ask {
            destination,
            question,
        } => {
            let planner = TripPlanner::new(GeminiClient::new(&config.model)?);
            let answer = planner
                .ask(&destination, &question)
                .await
                .context("Failed to answer question")?;
            println!("{answer}");
        }
        Command::Serve { port } => {
            web::run(port.unwrap_or(config.server.port)).await?;
        }
    }
    Ok(())
}

async fn plan(config: &TripWeaverConfig, file: Option<&PathBuf>) -> Result<()> {
    let mut request: TripRequest =
        serde_json::from_str(&read_input(file)?).context("Failed to parse trip request")?;
    if request.no_of_days == 0 {
        request.no_of_days = config.defaults.no_of_days;
    }

    let planner = TripPlanner::new(GeminiClient::new(&config.model)?);
    let trip = planner.plan(&request).await.context("Failed to generate trip")?;

    let budget_total = trip
        .budget
        .as_ref()
        .map(|budget| budget.format_total(&config.defaults.currency));
    let output = serde_json::json!({
        "trip": trip,
        "budgetTotal": budget_total,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
