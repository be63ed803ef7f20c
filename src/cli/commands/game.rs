//! Game commands: create, list, select

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use owo_colors::OwoColorize;

use crate::cli::CommandContext;

#[derive(Args, Clone)]
pub struct GameArgs {
    #[command(subcommand)]
    pub action: GameAction,
}

#[derive(Subcommand, Clone)]
pub enum GameAction {
    /// Create a new game
    Create {
        /// Home team name
        #[arg(long)]
        home: String,

        /// Away team name
        #[arg(long)]
        away: String,

        /// Game date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List games, newest first
    List,

    /// Select the game to record against
    Select {
        /// Game id from `game list`
        game_id: i64,
    },
}

pub struct GameCommand {
    args: GameArgs,
}

impl GameCommand {
    pub fn new(args: GameArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match &self.args.action {
            GameAction::Create { home, away, date } => {
                let date = match date {
                    Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                        .context("Date must be YYYY-MM-DD")?,
                    None => Utc::now().date_naive(),
                };

                let tracker = ctx.tracker().await?;
                let game_id = tracker.create_game(home, away, date).await?;
                println!(
                    "{} Game #{game_id}: {home} vs {away} on {date}",
                    "Created".green().bold()
                );
                println!("Select it with: dugout game select {game_id}");
            }
            GameAction::List => {
                let tracker = ctx.tracker().await?;
                let games = tracker.list_games().await?;
                if games.is_empty() {
                    println!("No games yet. Create one with `dugout game create`.");
                    return Ok(());
                }

                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL)
                    .set_header(vec!["ID", "Date", "Home", "Away"]);
                for game in &games {
                    table.add_row(vec![
                        game.game_id.to_string(),
                        game.game_date.to_string(),
                        game.home_team.clone(),
                        game.away_team.clone(),
                    ]);
                }
                println!("{table}");
            }
            GameAction::Select { game_id } => {
                let mut tracker = ctx.tracker().await?;
                let game = tracker.select_game(*game_id).await?;
                ctx.save_session(&tracker).await?;
                println!(
                    "{} game: {} - {} vs {}",
                    "Selected".green().bold(),
                    game.game_date,
                    game.home_team,
                    game.away_team
                );
            }
        }
        Ok(())
    }
}
