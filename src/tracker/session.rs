//! Explicit session state and its on-disk persistence
//!
//! One CLI invocation is one action, so everything the original kept in
//! ambient per-tab state (selected game, lineup, live count, undo stack,
//! event log) is an explicit object serialized between invocations.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

use super::count::Count;
use super::types::{BatSide, Handedness};
use crate::data_paths::DataPaths;

/// A batter in the lineup, in batting order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineupSlot {
    pub name: String,
    pub bats: BatSide,
    pub order: u8,
    pub player_id: i64,
}

/// A pitcher available for at-bats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitcherSlot {
    pub name: String,
    pub throws: Handedness,
    pub player_id: i64,
}

/// Session state carried across invocations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackerSession {
    pub selected_game_id: Option<i64>,
    pub lineup: Vec<LineupSlot>,
    pub pitchers: Vec<PitcherSlot>,
    pub current_atbat_id: Option<i64>,
    pub count: Count,
    /// Ids of pitches recorded in this at-bat, oldest first. Undo pops from
    /// the back.
    pub pitch_history: Vec<i64>,
    pub last_pitch_summary: Option<String>,
    pub last_saved_pitch_id: Option<i64>,
    /// Newest-first human-readable log of recorded events.
    pub event_log: Vec<String>,
}

impl TrackerSession {
    pub fn log_event(&mut self, line: String) {
        self.event_log.insert(0, line);
    }

    /// Enter a new at-bat: fresh count, empty undo stack.
    pub fn begin_at_bat(&mut self, atbat_id: i64) {
        self.current_atbat_id = Some(atbat_id);
        self.count = Count::default();
        self.pitch_history.clear();
        self.last_pitch_summary = None;
        self.last_saved_pitch_id = None;
    }

    /// Leave the current at-bat, clearing all per-at-bat state.
    pub fn reset_at_bat(&mut self) {
        self.current_atbat_id = None;
        self.count = Count::default();
        self.pitch_history.clear();
        self.last_pitch_summary = None;
        self.last_saved_pitch_id = None;
    }
}

/// Loads and saves the session file under the data directory.
pub struct SessionStorage {
    path: PathBuf,
}

impl SessionStorage {
    pub fn new(data_paths: &DataPaths) -> Self {
        Self {
            path: data_paths.session_file(),
        }
    }

    /// Load the session, or a fresh one when no file exists yet.
    pub async fn load(&self) -> Result<TrackerSession> {
        if !self.path.exists() {
            debug!("No session file found, starting fresh");
            return Ok(TrackerSession::default());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .context("Failed to read session file")?;
        let session: TrackerSession =
            serde_json::from_str(&content).context("Failed to parse session file")?;
        debug!(
            game = ?session.selected_game_id,
            atbat = ?session.current_atbat_id,
            "Loaded session"
        );
        Ok(session)
    }

    /// Save the session via a temp file and rename.
    pub async fn save(&self, session: &TrackerSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("Failed to create session directory")?;
        }

        let json = serde_json::to_string_pretty(session).context("Failed to serialize session")?;
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, json)
            .await
            .context("Failed to write temporary session file")?;
        fs::rename(&temp_path, &self.path)
            .await
            .context("Failed to rename session file")?;

        debug!(path = %self.path.display(), "Saved session");
        Ok(())
    }
}
