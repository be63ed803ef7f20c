//! At-bat commands: start a plate appearance, finish it with a result

use anyhow::Result;
use clap::{Args, Subcommand};
use owo_colors::OwoColorize;

use crate::cli::CommandContext;
use crate::tracker::types::PlayResult;
use crate::tracker::AtBatOutcome;

#[derive(Args, Clone)]
pub struct AtBatArgs {
    #[command(subcommand)]
    pub action: AtBatAction,
}

#[derive(Subcommand, Clone)]
pub enum AtBatAction {
    /// Start an at-bat; resets the count to 0-0
    Start {
        /// Batter name (must be in the lineup)
        #[arg(long)]
        batter: String,

        /// Pitcher name (must be in the pitcher list)
        #[arg(long)]
        pitcher: String,

        /// Inning number
        #[arg(long, default_value_t = 1)]
        inning: u8,

        /// Whether this batter leads off the inning
        #[arg(long)]
        lead_off: Option<bool>,
    },

    /// Finish the active at-bat with its play result and run totals
    Finish {
        /// Play result
        #[arg(long, value_enum)]
        result: Option<PlayResult>,

        /// Whether the lead-off runner reached base
        #[arg(long)]
        lead_off_on: Option<bool>,

        /// Runs scored on the play
        #[arg(long, default_value_t = 0)]
        runs: i64,

        /// Earned runs charged
        #[arg(long, default_value_t = 0)]
        earned: i64,
    },
}

pub struct AtBatCommand {
    args: AtBatArgs,
}

impl AtBatCommand {
    pub fn new(args: AtBatArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match &self.args.action {
            AtBatAction::Start {
                batter,
                pitcher,
                inning,
                lead_off,
            } => {
                let mut tracker = ctx.tracker().await?;
                let atbat_id = tracker
                    .start_at_bat(batter, pitcher, *inning, *lead_off)
                    .await?;
                ctx.save_session(&tracker).await?;
                println!(
                    "{} at-bat #{atbat_id}: {batter} vs {pitcher}, inning {inning}. Count 0-0.",
                    "Started".green().bold()
                );
            }
            AtBatAction::Finish {
                result,
                lead_off_on,
                runs,
                earned,
            } => {
                let mut tracker = ctx.tracker().await?;
                tracker
                    .finish_at_bat(AtBatOutcome {
                        play_result: *result,
                        lead_off_on: *lead_off_on,
                        runs_scored: *runs,
                        earned_runs: *earned,
                    })
                    .await?;
                ctx.save_session(&tracker).await?;

                let result_text = result
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "no result".to_string());
                println!(
                    "{} at-bat: {result_text} | Runs {runs} ER {earned}",
                    "Finished".green().bold()
                );
            }
        }
        Ok(())
    }
}
