//! logbridge CLI - Drive a logger bridge from the command line
//!
//! Commands:
//! - `logbridge replay` - Feed a script of request envelopes through a bridge
//! - `logbridge get-log-level` - Print the global log level
//! - `logbridge set-log-level` - Change the global log level via the test command

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

mod session;

use session::{Session, load_config};

#[derive(Parser)]
#[command(name = "logbridge")]
#[command(author, version, about = "Drive a logbridge logger bridge", long_about = None)]
struct Cli {
    /// Path to a TOML bridge config
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay newline-delimited request envelopes and print the JSON output
    Replay {
        /// Script file, one JSON envelope per line
        script: PathBuf,
    },

    /// Print the global log level
    GetLogLevel,

    /// Set the global log level (only honored while extension tests run)
    SetLogLevel {
        /// Level name, e.g. debug or warning
        name: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    logbridge::init_logging(config.initial_level());

    let session = Session::new(config);
    match cli.command {
        Commands::Replay { script } => replay(session, &script).await?,
        Commands::GetLogLevel => println!("{}", session.get_log_level()?),
        Commands::SetLogLevel { name } => println!("{}", session.set_log_level(&name)?),
    }

    Ok(())
}

async fn replay(mut session: Session, script: &Path) -> Result<()> {
    let text = std::fs::read_to_string(script)
        .with_context(|| format!("Failed to read script: {}", script.display()))?;
    for line in session.replay(&text).await? {
        println!("{line}");
    }
    Ok(())
}
