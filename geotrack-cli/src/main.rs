//! GeoTrack CLI - Command-line interface
//!
//! Replays recorded coordinate samples through the track recorder, computes
//! distances between coordinates and manages the configuration file.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::distance::DistanceArgs;
use commands::record::RecordArgs;

#[derive(Parser)]
#[command(name = "geotrack")]
#[command(version = geotrack::VERSION)]
#[command(about = "Record simplified GPS tracks from coordinate streams", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay samples through the recorder and print the recorded track
    Record(RecordArgs),

    /// Distance in meters between two coordinates
    Distance(DistanceArgs),

    /// View and modify configuration (~/.geotrack/config.ini)
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Record(args) => commands::record::run(args),
        Commands::Distance(args) => commands::distance::run(args),
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
