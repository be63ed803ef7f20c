//! Lineup commands: hitters in batting order, the pitcher list

use anyhow::Result;
use clap::{Args, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use owo_colors::OwoColorize;

use crate::cli::CommandContext;
use crate::tracker::types::{BatSide, Handedness};

#[derive(Args, Clone)]
pub struct LineupArgs {
    #[command(subcommand)]
    pub action: LineupAction,
}

#[derive(Subcommand, Clone)]
pub enum LineupAction {
    /// Add a hitter to the next lineup slot
    AddHitter {
        /// Hitter name
        name: String,

        /// Batting side
        #[arg(long, value_enum, default_value = "right")]
        bats: BatSide,
    },

    /// Add a pitcher
    AddPitcher {
        /// Pitcher name
        name: String,

        /// Throwing arm
        #[arg(long, value_enum, default_value = "right")]
        throws: Handedness,
    },

    /// Remove the hitter at a batting-order slot
    RemoveHitter {
        /// Batting order number
        order: u8,
    },

    /// Remove a pitcher by name
    RemovePitcher {
        name: String,
    },

    /// Show the lineup and pitcher list
    Show,
}

pub struct LineupCommand {
    args: LineupArgs,
}

impl LineupCommand {
    pub fn new(args: LineupArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match &self.args.action {
            LineupAction::AddHitter { name, bats } => {
                let mut tracker = ctx.tracker().await?;
                let suggestions = tracker.player_suggestions(name).await?;
                let order = tracker.add_hitter(name, *bats).await?;
                ctx.save_session(&tracker).await?;
                println!("{} {name} as #{order} ({bats})", "Added".green().bold());
                if !suggestions.is_empty() {
                    println!("Existing players: {}", suggestions.join(", ").dimmed());
                }
            }
            LineupAction::AddPitcher { name, throws } => {
                let mut tracker = ctx.tracker().await?;
                let suggestions = tracker.player_suggestions(name).await?;
                tracker.add_pitcher(name, *throws).await?;
                ctx.save_session(&tracker).await?;
                println!("{} pitcher {name} ({throws})", "Added".green().bold());
                if !suggestions.is_empty() {
                    println!("Existing players: {}", suggestions.join(", ").dimmed());
                }
            }
            LineupAction::RemoveHitter { order } => {
                let mut tracker = ctx.tracker().await?;
                let removed = tracker.remove_hitter(*order)?;
                ctx.save_session(&tracker).await?;
                println!("{} {} from slot {}", "Removed".yellow(), removed.name, order);
            }
            LineupAction::RemovePitcher { name } => {
                let mut tracker = ctx.tracker().await?;
                let removed = tracker.remove_pitcher(name)?;
                ctx.save_session(&tracker).await?;
                println!("{} pitcher {}", "Removed".yellow(), removed.name);
            }
            LineupAction::Show => {
                let tracker = ctx.tracker().await?;
                if tracker.session.lineup.is_empty() && tracker.session.pitchers.is_empty() {
                    println!("Lineup is empty. Add players with `dugout lineup add-hitter`.");
                    return Ok(());
                }

                if !tracker.session.lineup.is_empty() {
                    let mut table = Table::new();
                    table
                        .load_preset(UTF8_FULL)
                        .set_header(vec!["Order", "Hitter", "Bats"]);
                    for slot in &tracker.session.lineup {
                        table.add_row(vec![
                            slot.order.to_string(),
                            slot.name.clone(),
                            slot.bats.to_string(),
                        ]);
                    }
                    println!("{table}");
                }

                if !tracker.session.pitchers.is_empty() {
                    let mut table = Table::new();
                    table
                        .load_preset(UTF8_FULL)
                        .set_header(vec!["Pitcher", "Throws"]);
                    for slot in &tracker.session.pitchers {
                        table.add_row(vec![slot.name.clone(), slot.throws.to_string()]);
                    }
                    println!("{table}");
                }
            }
        }
        Ok(())
    }
}
