//! Runner command: record a runner movement against the last pitch

use anyhow::Result;
use clap::{Args, Subcommand};
use owo_colors::OwoColorize;

use crate::cli::CommandContext;
use crate::tracker::types::RunnerEventType;
use crate::tracker::RunnerEventInput;

#[derive(Args, Clone)]
pub struct RunnerArgs {
    #[command(subcommand)]
    pub action: RunnerAction,
}

#[derive(Subcommand, Clone)]
pub enum RunnerAction {
    /// Record a runner event attached to the most recent pitch
    Record {
        /// Runner name (must be a known player)
        #[arg(long)]
        runner: String,

        /// Base the runner started from (1-4)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
        start_base: u8,

        /// Base the runner ended on (1-4, omit for none)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
        end_base: Option<u8>,

        /// What happened
        #[arg(long, value_enum)]
        event: RunnerEventType,

        /// Whether an out was recorded on the play
        #[arg(long)]
        out: bool,
    },
}

pub struct RunnerCommand {
    args: RunnerArgs,
}

impl RunnerCommand {
    pub fn new(args: RunnerArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match &self.args.action {
            RunnerAction::Record {
                runner,
                start_base,
                end_base,
                event,
                out,
            } => {
                let mut tracker = ctx.tracker().await?;
                tracker
                    .record_runner_event(RunnerEventInput {
                        runner: runner.clone(),
                        start_base: *start_base,
                        end_base: *end_base,
                        event_type: *event,
                        out_recorded: *out,
                    })
                    .await?;
                ctx.save_session(&tracker).await?;

                let arrow_end = end_base
                    .map(|b| b.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{} runner event: {runner} {event} | {start_base}→{arrow_end} | Out={out}",
                    "Saved".green().bold()
                );
            }
        }
        Ok(())
    }
}
