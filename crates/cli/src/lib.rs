pub mod commands;
pub mod telemetry;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use freightscope_core::config::{AppConfig, LoadOptions};

#[derive(Debug, Parser)]
#[command(
    name = "freightscope",
    about = "Freightscope shipment analytics CLI",
    long_about = "Turn normalized shipment records into an analytics report: \
                  distributions, geographic concentration, and warehouse cost simulation.",
    after_help = "Examples:\n  freightscope analyze --input shipments.json\n  freightscope zone --from 10001 --to 90001\n  freightscope config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Build an analytics report from a JSON array of normalized shipment records")]
    Analyze {
        #[arg(long, help = "Path to the shipment records JSON file")]
        input: PathBuf,
        #[arg(long, help = "Write the report JSON to this path instead of stdout")]
        output: Option<PathBuf>,
        #[arg(long, help = "Origin zip used to derive zones for records that arrive without one")]
        origin_zip: Option<String>,
    },
    #[command(about = "Estimate the shipping zone between two postal codes")]
    Zone {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    #[command(about = "Estimate transit days for a shipping method and zone")]
    Transit {
        #[arg(long)]
        method: String,
        #[arg(long)]
        zone: u8,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution"
    )]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    // Logging is best-effort here: a broken config still gets a usable CLI,
    // and the config command reports the underlying problem.
    let logging = AppConfig::load(LoadOptions::default())
        .map(|config| config.logging)
        .unwrap_or_else(|_| AppConfig::default().logging);
    telemetry::init(&logging);

    let result = match cli.command {
        Command::Analyze { input, output, origin_zip } => {
            commands::analyze::run(&input, output.as_deref(), origin_zip)
        }
        Command::Zone { from, to } => commands::CommandResult::raw(commands::zone::run(&from, &to)),
        Command::Transit { method, zone } => {
            commands::CommandResult::raw(commands::transit::run(&method, zone))
        }
        Command::Config => commands::CommandResult::raw(commands::config::run()),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
