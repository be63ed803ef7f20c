//! Summary command: the running session event log

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;

use crate::cli::CommandContext;

/// Newest-first display cap, matching the original tracker's summary panel.
const SUMMARY_LINES: usize = 50;

#[derive(Args, Clone)]
pub struct SummaryArgs {}

pub struct SummaryCommand {
    _args: SummaryArgs,
}

impl SummaryCommand {
    pub fn new(args: SummaryArgs) -> Self {
        Self { _args: args }
    }

    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let tracker = ctx.tracker().await?;
        let session = &tracker.session;

        if session.event_log.is_empty() {
            println!("No events yet. Record pitches or runner events to see them here.");
        } else {
            println!("{}", "Running summary (this session):".bold());
            for line in session.event_log.iter().take(SUMMARY_LINES) {
                println!("• {line}");
            }
        }

        println!();
        let game = session
            .selected_game_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        let atbat = session
            .current_atbat_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "Game {} | AtBat {} | Count {}",
            game.cyan(),
            atbat.cyan(),
            session.count.to_string().cyan()
        );
        Ok(())
    }
}
