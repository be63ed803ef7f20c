//! Command-line interface for dugout
//!
//! Clap-based command tree: one subcommand per recording action, each
//! implemented as an Args struct plus a Command struct in `commands/`.
//! `Cli::execute` initializes logging, loads the store config and session,
//! and dispatches.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

pub mod commands;

use crate::config::{StoreConfig, StoreKind};
use crate::data_paths::{DataPaths, DEFAULT_DATA_DIR};
use crate::logging::{self, LoggingConfig};
use crate::store::RecordStore;
use crate::tracker::{SessionStorage, Tracker};

use commands::atbat::{AtBatArgs, AtBatCommand};
use commands::game::{GameArgs, GameCommand};
use commands::lineup::{LineupArgs, LineupCommand};
use commands::pitch::{PitchArgs, PitchCommand};
use commands::runner::{RunnerArgs, RunnerCommand};
use commands::summary::{SummaryArgs, SummaryCommand};
use commands::version::{VersionArgs, VersionCommand};

#[derive(Parser)]
#[command(name = "dugout")]
#[command(version)]
#[command(about = "CLI baseball game tracker: pitches, counts, at-bats, runner events", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory path (default: ./data)
    #[arg(long, global = true, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Record store backend override
    #[arg(long, global = true, value_enum)]
    pub store: Option<StoreKind>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create, list, and select games
    Game(GameArgs),

    /// Manage the lineup and the pitcher list
    Lineup(LineupArgs),

    /// Start and finish at-bats
    Atbat(AtBatArgs),

    /// Record, undo, and list pitches
    Pitch(PitchArgs),

    /// Record runner events against the last pitch
    Runner(RunnerArgs),

    /// Show the running session summary
    Summary(SummaryArgs),

    /// Show version information
    Version(VersionArgs),
}

/// Everything a command needs: the store and the data directory.
pub struct CommandContext {
    pub store: Arc<dyn RecordStore>,
    pub data_paths: DataPaths,
}

impl CommandContext {
    /// Load the persisted session and pair it with the store.
    pub async fn tracker(&self) -> Result<Tracker> {
        let session = SessionStorage::new(&self.data_paths).load().await?;
        Ok(Tracker::new(self.store.clone(), session))
    }

    /// Persist the (possibly mutated) session.
    pub async fn save_session(&self, tracker: &Tracker) -> Result<()> {
        SessionStorage::new(&self.data_paths)
            .save(&tracker.session)
            .await
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let data_paths = DataPaths::new(&self.data_dir);
        data_paths.ensure_directories()?;

        logging::init_logging(LoggingConfig::new(data_paths.clone(), self.verbose))?;

        let config = StoreConfig::load(&data_paths)?;
        let store = config.build_store(self.store, &data_paths).await?;
        let ctx = CommandContext { store, data_paths };

        match self.command {
            Commands::Game(args) => GameCommand::new(args).execute(&ctx).await,
            Commands::Lineup(args) => LineupCommand::new(args).execute(&ctx).await,
            Commands::Atbat(args) => AtBatCommand::new(args).execute(&ctx).await,
            Commands::Pitch(args) => PitchCommand::new(args).execute(&ctx).await,
            Commands::Runner(args) => RunnerCommand::new(args).execute(&ctx).await,
            Commands::Summary(args) => SummaryCommand::new(args).execute(&ctx).await,
            Commands::Version(args) => VersionCommand::new(args).execute(&ctx).await,
        }
    }
}
