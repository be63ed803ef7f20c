//! Pitch commands: record with automatic count/WEL bookkeeping, undo, list

use anyhow::Result;
use clap::{Args, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use owo_colors::OwoColorize;

use crate::cli::CommandContext;
use crate::tracker::types::{HitDirection, PitchCall, PitchType, TaggedHit};
use crate::tracker::PitchInput;

#[derive(Args, Clone)]
pub struct PitchArgs {
    #[command(subcommand)]
    pub action: PitchAction,
}

#[derive(Subcommand, Clone)]
pub enum PitchAction {
    /// Record a pitch against the active at-bat
    Record {
        /// Pitch type
        #[arg(long, value_enum)]
        pitch_type: PitchType,

        /// Pitch call
        #[arg(long, value_enum)]
        called: PitchCall,

        /// Velocity in mph
        #[arg(long)]
        velocity: Option<f64>,

        /// Strike-zone cell (1-14)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=14))]
        zone: Option<u8>,

        /// Contact classification
        #[arg(long, value_enum)]
        tagged: Option<TaggedHit>,

        /// Field location of the batted ball
        #[arg(long, value_enum)]
        direction: Option<HitDirection>,

        /// Free-form notes (KPI column)
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete the last recorded pitch and restore the previous count
    Undo,

    /// List the pitches of the active at-bat
    List,
}

pub struct PitchCommand {
    args: PitchArgs,
}

impl PitchCommand {
    pub fn new(args: PitchArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match &self.args.action {
            PitchAction::Record {
                pitch_type,
                called,
                velocity,
                zone,
                tagged,
                direction,
                notes,
            } => {
                let mut tracker = ctx.tracker().await?;
                let recorded = tracker
                    .record_pitch(PitchInput {
                        pitch_type: *pitch_type,
                        called: *called,
                        velocity: *velocity,
                        zone: *zone,
                        tagged_hit: *tagged,
                        hit_direction: *direction,
                        notes: notes.clone(),
                    })
                    .await?;
                ctx.save_session(&tracker).await?;

                let label = recorded
                    .label
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{} pitch {} (#{} of at-bat): {pitch_type} — {called}",
                    "Saved".green().bold(),
                    recorded.numbers.pitch_no,
                    recorded.numbers.pitch_of_ab
                );
                println!("Count {} | WEL {label}", recorded.count.bold());
            }
            PitchAction::Undo => {
                let mut tracker = ctx.tracker().await?;
                let restored = tracker.undo_last_pitch().await?;
                ctx.save_session(&tracker).await?;
                println!("{} Count back to {restored}.", "Undone.".yellow().bold());
            }
            PitchAction::List => {
                let tracker = ctx.tracker().await?;
                let pitches = tracker.list_current_pitches().await?;
                if pitches.is_empty() {
                    println!("No pitches recorded for this at-bat yet.");
                    return Ok(());
                }

                let mut table = Table::new();
                table.load_preset(UTF8_FULL).set_header(vec![
                    "No", "Of AB", "Type", "Called", "Vel", "Zone", "Count", "WEL",
                ]);
                for p in &pitches {
                    table.add_row(vec![
                        p.pitch_no.to_string(),
                        p.pitch_of_ab.to_string(),
                        p.pitch_type.to_string(),
                        p.pitch_called.to_string(),
                        p.velocity.map(|v| v.to_string()).unwrap_or_default(),
                        p.zone.map(|z| z.to_string()).unwrap_or_default(),
                        format!("{}-{}", p.balls, p.strikes),
                        p.wel.map(|w| w.to_string()).unwrap_or_default(),
                    ]);
                }
                println!("{table}");
            }
        }
        Ok(())
    }
}
