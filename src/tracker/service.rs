//! Tracker operations: every command the CLI exposes ends up here
//!
//! `Tracker` pairs a record store with the loaded session and implements the
//! recording flow: players and games, lineup management, at-bats, pitch
//! recording with automatic count/WEL bookkeeping, undo, and runner events.
//! Failures are per-operation; the session survives a failed write and the
//! next operation proceeds normally.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

use super::count::{Count, CountLabel};
use super::sequence::{self, PitchNumbers};
use super::session::{LineupSlot, PitcherSlot, TrackerSession};
use super::types::*;
use crate::store::{
    from_row, row_i64, tables, to_row, Filter, Order, Query, RecordStore, StoreError,
};

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("no game selected; run `dugout game select` first")]
    NoGameSelected,

    #[error("no active at-bat; start one with `dugout atbat start`")]
    NoActiveAtBat,

    #[error("no pitch recorded yet to attach runner events to")]
    NoPitchForRunner,

    #[error("no pitch to undo")]
    NothingToUndo,

    #[error("unknown game: {0}")]
    UnknownGame(i64),

    #[error("unknown player: {0}")]
    UnknownPlayer(String),

    #[error("{0} is already in the lineup")]
    DuplicateHitter(String),

    #[error("pitcher {0} is already added")]
    DuplicatePitcher(String),

    #[error("no lineup slot at order {0}")]
    UnknownLineupSlot(u8),

    #[error("pitch not recorded: {0}")]
    PitchNotRecorded(#[source] StoreError),

    #[error("undo failed, pitch was not removed: {0}")]
    NotUndone(#[source] StoreError),

    #[error("pitch removed but the count could not be re-read: {0}")]
    UndoIncomplete(#[source] StoreError),

    #[error("at-bat not updated: {0}")]
    AtBatNotUpdated(#[source] StoreError),

    #[error("runner event not recorded: {0}")]
    RunnerEventNotRecorded(#[source] StoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Operator-supplied details of one pitch.
#[derive(Debug, Clone)]
pub struct PitchInput {
    pub pitch_type: PitchType,
    pub called: PitchCall,
    pub velocity: Option<f64>,
    pub zone: Option<u8>,
    pub tagged_hit: Option<TaggedHit>,
    pub hit_direction: Option<HitDirection>,
    pub notes: Option<String>,
}

/// What came out of recording a pitch.
#[derive(Debug, Clone)]
pub struct RecordedPitch {
    pub pitch_id: i64,
    pub numbers: PitchNumbers,
    pub count: Count,
    pub label: Option<CountLabel>,
}

/// Closing details of an at-bat.
#[derive(Debug, Clone)]
pub struct AtBatOutcome {
    pub play_result: Option<PlayResult>,
    pub lead_off_on: Option<bool>,
    pub runs_scored: i64,
    pub earned_runs: i64,
}

/// Runner movement attached to the most recent pitch.
#[derive(Debug, Clone)]
pub struct RunnerEventInput {
    pub runner: String,
    pub start_base: u8,
    pub end_base: Option<u8>,
    pub event_type: RunnerEventType,
    pub out_recorded: bool,
}

#[derive(serde::Serialize)]
struct AtBatPatch {
    #[serde(rename = "RunsScored")]
    runs_scored: i64,
    #[serde(rename = "EarnedRuns")]
    earned_runs: i64,
    #[serde(rename = "PlayResult", skip_serializing_if = "Option::is_none")]
    play_result: Option<PlayResult>,
    #[serde(rename = "LeadOffOn", skip_serializing_if = "Option::is_none")]
    lead_off_on: Option<bool>,
}

pub struct Tracker {
    store: Arc<dyn RecordStore>,
    pub session: TrackerSession,
}

impl Tracker {
    pub fn new(store: Arc<dyn RecordStore>, session: TrackerSession) -> Self {
        Self { store, session }
    }

    /// Return the PlayerID for a name, creating the player if missing.
    pub async fn ensure_player(
        &self,
        name: &str,
        team: Option<String>,
        throws: Option<Handedness>,
        bats: Option<BatSide>,
    ) -> Result<i64, TrackerError> {
        let existing = self
            .store
            .select(
                tables::PLAYERS,
                Query::new().filter(Filter::eq("Name", name)),
            )
            .await?;
        if let Some(row) = existing.first() {
            return Ok(row_i64(row, tables::PLAYERS, "PlayerID")?);
        }

        let created = self
            .store
            .insert(
                tables::PLAYERS,
                to_row(&NewPlayer {
                    name: name.to_string(),
                    team,
                    throws,
                    bats,
                })?,
            )
            .await?;
        let player_id = row_i64(&created, tables::PLAYERS, "PlayerID")?;
        info!(name, player_id, "Created player");
        Ok(player_id)
    }

    /// Existing player names containing `partial` (case-insensitive), capped
    /// at five. Used to hint during lineup entry.
    pub async fn player_suggestions(&self, partial: &str) -> Result<Vec<String>, TrackerError> {
        let needle = partial.to_lowercase();
        let rows = self.store.select(tables::PLAYERS, Query::new()).await?;
        let mut names: Vec<String> = rows
            .iter()
            .filter_map(|r| r.get("Name").and_then(|v| v.as_str()))
            .filter(|n| n.to_lowercase().contains(&needle))
            .map(str::to_string)
            .collect();
        names.truncate(5);
        Ok(names)
    }

    pub async fn create_game(
        &self,
        home: &str,
        away: &str,
        date: NaiveDate,
    ) -> Result<i64, TrackerError> {
        let created = self
            .store
            .insert(
                tables::GAMES,
                to_row(&NewGame {
                    home_team: home.to_string(),
                    away_team: away.to_string(),
                    game_date: date,
                })?,
            )
            .await?;
        let game_id = row_i64(&created, tables::GAMES, "GameID")?;
        info!(game_id, home, away, "Created game");
        Ok(game_id)
    }

    /// All games, newest first.
    pub async fn list_games(&self) -> Result<Vec<Game>, TrackerError> {
        let rows = self
            .store
            .select(
                tables::GAMES,
                Query::new().order_by(Order::desc("GameDate")),
            )
            .await?;
        rows.into_iter()
            .map(|r| from_row(r).map_err(TrackerError::from))
            .collect()
    }

    pub async fn select_game(&mut self, game_id: i64) -> Result<Game, TrackerError> {
        let rows = self
            .store
            .select(
                tables::GAMES,
                Query::new().filter(Filter::eq("GameID", game_id)).limit(1),
            )
            .await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or(TrackerError::UnknownGame(game_id))?;
        let game: Game = from_row(row)?;
        self.session.selected_game_id = Some(game.game_id);
        Ok(game)
    }

    /// Add a hitter to the lineup; the batting order is the next open slot.
    pub async fn add_hitter(&mut self, name: &str, bats: BatSide) -> Result<u8, TrackerError> {
        if self
            .session
            .lineup
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name))
        {
            return Err(TrackerError::DuplicateHitter(name.to_string()));
        }

        let player_id = self.ensure_player(name, None, None, Some(bats)).await?;
        let order = self.session.lineup.len() as u8 + 1;
        self.session.lineup.push(LineupSlot {
            name: name.to_string(),
            bats,
            order,
            player_id,
        });
        Ok(order)
    }

    pub async fn add_pitcher(&mut self, name: &str, throws: Handedness) -> Result<(), TrackerError> {
        if self
            .session
            .pitchers
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name))
        {
            return Err(TrackerError::DuplicatePitcher(name.to_string()));
        }

        let player_id = self.ensure_player(name, None, Some(throws), None).await?;
        self.session.pitchers.push(PitcherSlot {
            name: name.to_string(),
            throws,
            player_id,
        });
        Ok(())
    }

    pub fn remove_hitter(&mut self, order: u8) -> Result<LineupSlot, TrackerError> {
        let idx = self
            .session
            .lineup
            .iter()
            .position(|p| p.order == order)
            .ok_or(TrackerError::UnknownLineupSlot(order))?;
        Ok(self.session.lineup.remove(idx))
    }

    pub fn remove_pitcher(&mut self, name: &str) -> Result<PitcherSlot, TrackerError> {
        let idx = self
            .session
            .pitchers
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| TrackerError::UnknownPlayer(name.to_string()))?;
        Ok(self.session.pitchers.remove(idx))
    }

    /// Start an at-bat for a lineup batter against a known pitcher. Resets
    /// the count to 0-0 and clears the undo stack.
    pub async fn start_at_bat(
        &mut self,
        batter: &str,
        pitcher: &str,
        inning: u8,
        lead_off: Option<bool>,
    ) -> Result<i64, TrackerError> {
        let game_id = self
            .session
            .selected_game_id
            .ok_or(TrackerError::NoGameSelected)?;
        let batter_slot = self
            .session
            .lineup
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(batter))
            .ok_or_else(|| TrackerError::UnknownPlayer(batter.to_string()))?
            .clone();
        let pitcher_slot = self
            .session
            .pitchers
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(pitcher))
            .ok_or_else(|| TrackerError::UnknownPlayer(pitcher.to_string()))?
            .clone();

        let created = self
            .store
            .insert(
                tables::AT_BATS,
                to_row(&NewAtBat {
                    game_id,
                    batter_id: batter_slot.player_id,
                    pitcher_id: pitcher_slot.player_id,
                    inning,
                    runs_scored: 0,
                    earned_runs: 0,
                    batter_order: Some(batter_slot.order),
                    lead_off,
                })?,
            )
            .await?;
        let atbat_id = row_i64(&created, tables::AT_BATS, "AtBatID")?;

        self.session.begin_at_bat(atbat_id);
        info!(atbat_id, batter, pitcher, inning, "Started at-bat");
        Ok(atbat_id)
    }

    /// Record one pitch: allocate sequence numbers, advance the count,
    /// attach the WEL label, persist, and push onto the undo stack.
    ///
    /// The transition is applied to a local copy first; a store failure
    /// leaves the session count unchanged.
    pub async fn record_pitch(&mut self, input: PitchInput) -> Result<RecordedPitch, TrackerError> {
        let atbat_id = self
            .session
            .current_atbat_id
            .ok_or(TrackerError::NoActiveAtBat)?;

        let numbers = sequence::next_pitch_numbers(self.store.as_ref(), atbat_id).await?;
        let next = self.session.count.apply(input.called);
        let label = next.label();

        let created = self
            .store
            .insert(
                tables::PITCHES,
                to_row(&NewPitch {
                    atbat_id,
                    pitch_no: numbers.pitch_no,
                    pitch_of_ab: numbers.pitch_of_ab,
                    pitch_type: input.pitch_type,
                    velocity: input.velocity,
                    zone: input.zone,
                    pitch_called: input.called,
                    wel: label,
                    balls: next.balls,
                    strikes: next.strikes,
                    tagged_hit: input.tagged_hit,
                    hit_direction: input.hit_direction,
                    kpi: input.notes.clone(),
                })?,
            )
            .await
            .map_err(TrackerError::PitchNotRecorded)?;
        let pitch_id = row_i64(&created, tables::PITCHES, "PitchID")?;

        self.session.count = next;
        self.session.pitch_history.push(pitch_id);
        self.session.last_saved_pitch_id = Some(pitch_id);
        self.session.last_pitch_summary = Some(match input.velocity {
            Some(vel) => format!("{} {vel} — {} ({next})", input.pitch_type, input.called),
            None => format!("{} — {} ({next})", input.pitch_type, input.called),
        });
        self.session.log_event(format!(
            "Pitch {}: {} — {}  |  {next}",
            numbers.pitch_no, input.pitch_type, input.called
        ));

        info!(pitch_id, pitch_no = numbers.pitch_no, count = %next, "Recorded pitch");
        Ok(RecordedPitch {
            pitch_id,
            numbers,
            count: next,
            label,
        })
    }

    /// Delete the most recently recorded pitch and restore the count from
    /// the latest remaining pitch of the at-bat (0-0 when none remain).
    ///
    /// Compensating action, not a rollback: when the delete lands but the
    /// read-back fails, the stored history and the session count can
    /// diverge, and that is surfaced as `UndoIncomplete` for the operator.
    pub async fn undo_last_pitch(&mut self) -> Result<Count, TrackerError> {
        let atbat_id = self
            .session
            .current_atbat_id
            .ok_or(TrackerError::NoActiveAtBat)?;
        let pitch_id = self
            .session
            .pitch_history
            .pop()
            .ok_or(TrackerError::NothingToUndo)?;

        if let Err(e) = self
            .store
            .delete(tables::PITCHES, &[Filter::eq("PitchID", pitch_id)])
            .await
        {
            // Nothing was removed; keep the id on the stack
            self.session.pitch_history.push(pitch_id);
            return Err(TrackerError::NotUndone(e));
        }

        let rows = match self
            .store
            .select(
                tables::PITCHES,
                Query::new()
                    .filter(Filter::eq("AtBatID", atbat_id))
                    .order_by(Order::desc("PitchOfAB"))
                    .limit(1),
            )
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!(pitch_id, "Pitch deleted but count re-read failed");
                return Err(TrackerError::UndoIncomplete(e));
            }
        };

        let restored = match rows.first() {
            Some(row) => Count::new(
                row.get("Balls").and_then(|v| v.as_u64()).unwrap_or(0) as u8,
                row.get("Strikes").and_then(|v| v.as_u64()).unwrap_or(0) as u8,
            ),
            None => Count::default(),
        };

        self.session.count = restored;
        self.session.last_pitch_summary = None;
        self.session.last_saved_pitch_id = self.session.pitch_history.last().copied();
        info!(pitch_id, count = %restored, "Undid last pitch");
        Ok(restored)
    }

    /// Close out the current at-bat with its play result and run totals.
    pub async fn finish_at_bat(&mut self, outcome: AtBatOutcome) -> Result<(), TrackerError> {
        let atbat_id = self
            .session
            .current_atbat_id
            .ok_or(TrackerError::NoActiveAtBat)?;

        let updated = self
            .store
            .update(
                tables::AT_BATS,
                &[Filter::eq("AtBatID", atbat_id)],
                to_row(&AtBatPatch {
                    runs_scored: outcome.runs_scored,
                    earned_runs: outcome.earned_runs,
                    play_result: outcome.play_result,
                    lead_off_on: outcome.lead_off_on,
                })?,
            )
            .await
            .map_err(TrackerError::AtBatNotUpdated)?;
        if updated.is_empty() {
            return Err(TrackerError::AtBatNotUpdated(StoreError::EmptyUpdate(
                tables::AT_BATS.to_string(),
            )));
        }

        let result_text = outcome
            .play_result
            .map(|r| r.to_string())
            .unwrap_or_else(|| "Result".to_string());
        self.session.log_event(format!(
            "AtBat finished: {result_text} | Runs {} ER {}",
            outcome.runs_scored, outcome.earned_runs
        ));
        self.session.reset_at_bat();
        info!(atbat_id, "Finished at-bat");
        Ok(())
    }

    /// Attach a runner movement to the most recently saved pitch.
    pub async fn record_runner_event(
        &mut self,
        input: RunnerEventInput,
    ) -> Result<i64, TrackerError> {
        let pitch_id = self
            .session
            .last_saved_pitch_id
            .or_else(|| self.session.pitch_history.last().copied())
            .ok_or(TrackerError::NoPitchForRunner)?;

        let rows = self
            .store
            .select(
                tables::PLAYERS,
                Query::new().filter(Filter::eq("Name", input.runner.as_str())),
            )
            .await?;
        let runner_row = rows
            .first()
            .ok_or_else(|| TrackerError::UnknownPlayer(input.runner.clone()))?;
        let runner_id = row_i64(runner_row, tables::PLAYERS, "PlayerID")?;

        let created = self
            .store
            .insert(
                tables::RUNNER_EVENTS,
                to_row(&NewRunnerEvent {
                    pitch_id,
                    runner_id,
                    start_base: input.start_base,
                    end_base: input.end_base,
                    event_type: input.event_type,
                    out_recorded: input.out_recorded,
                })?,
            )
            .await
            .map_err(TrackerError::RunnerEventNotRecorded)?;
        let event_id = row_i64(&created, tables::RUNNER_EVENTS, "RunnerEventID")?;

        let arrow_end = input
            .end_base
            .map(|b| b.to_string())
            .unwrap_or_else(|| "-".to_string());
        self.session.log_event(format!(
            "Runner {}: {} | {}→{} | Out={}",
            input.runner, input.event_type, input.start_base, arrow_end, input.out_recorded
        ));
        info!(event_id, pitch_id, runner = %input.runner, "Recorded runner event");
        Ok(event_id)
    }

    /// Pitches of the current at-bat in recorded order.
    pub async fn list_current_pitches(&self) -> Result<Vec<Pitch>, TrackerError> {
        let atbat_id = self
            .session
            .current_atbat_id
            .ok_or(TrackerError::NoActiveAtBat)?;
        let rows = self
            .store
            .select(
                tables::PITCHES,
                Query::new()
                    .filter(Filter::eq("AtBatID", atbat_id))
                    .order_by(Order::asc("PitchOfAB")),
            )
            .await?;
        rows.into_iter()
            .map(|r| from_row(r).map_err(TrackerError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, Row};
    use async_trait::async_trait;
    use chrono::NaiveDate;

    fn input(pitch_type: PitchType, called: PitchCall) -> PitchInput {
        PitchInput {
            pitch_type,
            called,
            velocity: None,
            zone: None,
            tagged_hit: None,
            hit_direction: None,
            notes: None,
        }
    }

    async fn tracker_with_at_bat() -> Tracker {
        let store = Arc::new(MemoryStore::new());
        let mut tracker = Tracker::new(store, TrackerSession::default());
        let date = NaiveDate::from_ymd_opt(2024, 5, 11).unwrap();
        let game_id = tracker.create_game("Hawks", "Owls", date).await.unwrap();
        tracker.select_game(game_id).await.unwrap();
        tracker.add_hitter("Sato", BatSide::Left).await.unwrap();
        tracker
            .add_pitcher("Ruiz", Handedness::Right)
            .await
            .unwrap();
        tracker
            .start_at_bat("Sato", "Ruiz", 1, None)
            .await
            .unwrap();
        tracker
    }

    #[tokio::test]
    async fn test_record_pitch_walkthrough() {
        let mut tracker = tracker_with_at_bat().await;

        let p1 = tracker
            .record_pitch(input(PitchType::Fastball, PitchCall::BallCalled))
            .await
            .unwrap();
        assert_eq!(p1.count, Count::new(1, 0));
        assert_eq!(p1.label, Some(CountLabel::Early));
        assert_eq!(p1.numbers.pitch_no, 1);
        assert_eq!(p1.numbers.pitch_of_ab, 1);

        let p2 = tracker
            .record_pitch(input(PitchType::Slider, PitchCall::StrikeSwingMiss))
            .await
            .unwrap();
        assert_eq!(p2.count, Count::new(1, 1));
        assert_eq!(p2.label, Some(CountLabel::Early));

        let p3 = tracker
            .record_pitch(input(PitchType::Fastball, PitchCall::StrikeCalled))
            .await
            .unwrap();
        assert_eq!(p3.count, Count::new(1, 2));
        assert_eq!(p3.label, Some(CountLabel::Win));

        let p4 = tracker
            .record_pitch(input(PitchType::Cutter, PitchCall::FoulBall))
            .await
            .unwrap();
        assert_eq!(p4.count, Count::new(1, 2));
        assert_eq!(p4.label, Some(CountLabel::Win));
        assert_eq!(p4.numbers.pitch_no, 4);
        assert_eq!(p4.numbers.pitch_of_ab, 4);

        // Each stored pitch carries its post-transition count snapshot
        let pitches = tracker.list_current_pitches().await.unwrap();
        assert_eq!(pitches.len(), 4);
        assert_eq!(pitches[0].balls, 1);
        assert_eq!(pitches[0].strikes, 0);
        assert_eq!(pitches[3].wel, Some(CountLabel::Win));

        assert_eq!(tracker.session.event_log.len(), 4);
        assert!(tracker.session.event_log[0].starts_with("Pitch 4:"));
    }

    #[tokio::test]
    async fn test_record_pitch_requires_at_bat() {
        let store = Arc::new(MemoryStore::new());
        let mut tracker = Tracker::new(store, TrackerSession::default());
        let err = tracker
            .record_pitch(input(PitchType::Fastball, PitchCall::BallCalled))
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::NoActiveAtBat));
    }

    #[tokio::test]
    async fn test_undo_restores_previous_count() {
        let mut tracker = tracker_with_at_bat().await;
        tracker
            .record_pitch(input(PitchType::Fastball, PitchCall::BallCalled))
            .await
            .unwrap();
        tracker
            .record_pitch(input(PitchType::Slider, PitchCall::StrikeCalled))
            .await
            .unwrap();
        assert_eq!(tracker.session.count, Count::new(1, 1));

        let restored = tracker.undo_last_pitch().await.unwrap();
        assert_eq!(restored, Count::new(1, 0));
        assert_eq!(tracker.session.count, Count::new(1, 0));

        let restored = tracker.undo_last_pitch().await.unwrap();
        assert_eq!(restored, Count::default());

        let err = tracker.undo_last_pitch().await.unwrap_err();
        assert!(matches!(err, TrackerError::NothingToUndo));

        let pitches = tracker.list_current_pitches().await.unwrap();
        assert!(pitches.is_empty());
    }

    #[tokio::test]
    async fn test_ensure_player_reuses_existing() {
        let store = Arc::new(MemoryStore::new());
        let tracker = Tracker::new(store, TrackerSession::default());
        let first = tracker
            .ensure_player("Sato", None, None, Some(BatSide::Left))
            .await
            .unwrap();
        let second = tracker.ensure_player("Sato", None, None, None).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_duplicate_lineup_entries_rejected() {
        let store = Arc::new(MemoryStore::new());
        let mut tracker = Tracker::new(store, TrackerSession::default());
        tracker.add_hitter("Sato", BatSide::Left).await.unwrap();
        let err = tracker.add_hitter("sato", BatSide::Right).await.unwrap_err();
        assert!(matches!(err, TrackerError::DuplicateHitter(_)));

        tracker
            .add_pitcher("Ruiz", Handedness::Right)
            .await
            .unwrap();
        let err = tracker
            .add_pitcher("RUIZ", Handedness::Left)
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::DuplicatePitcher(_)));
    }

    #[tokio::test]
    async fn test_player_suggestions_capped() {
        let store = Arc::new(MemoryStore::new());
        let tracker = Tracker::new(store, TrackerSession::default());
        for i in 0..7 {
            tracker
                .ensure_player(&format!("Tanaka {i}"), None, None, None)
                .await
                .unwrap();
        }
        let names = tracker.player_suggestions("tanaka").await.unwrap();
        assert_eq!(names.len(), 5);
        assert!(tracker.player_suggestions("xyz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_finish_at_bat_updates_and_clears() {
        let mut tracker = tracker_with_at_bat().await;
        let atbat_id = tracker.session.current_atbat_id.unwrap();
        tracker
            .record_pitch(input(PitchType::Fastball, PitchCall::InPlay))
            .await
            .unwrap();

        tracker
            .finish_at_bat(AtBatOutcome {
                play_result: Some(PlayResult::Double),
                lead_off_on: Some(true),
                runs_scored: 1,
                earned_runs: 1,
            })
            .await
            .unwrap();

        assert!(tracker.session.current_atbat_id.is_none());
        assert_eq!(tracker.session.count, Count::default());
        assert!(tracker.session.event_log[0].starts_with("AtBat finished: 2B"));

        let rows = tracker
            .store
            .select(
                tables::AT_BATS,
                Query::new().filter(Filter::eq("AtBatID", atbat_id)),
            )
            .await
            .unwrap();
        let atbat: AtBat = from_row(rows.into_iter().next().unwrap()).unwrap();
        assert_eq!(atbat.play_result, Some(PlayResult::Double));
        assert_eq!(atbat.runs_scored, 1);
        assert_eq!(atbat.lead_off_on, Some(true));
    }

    #[tokio::test]
    async fn test_runner_event_attaches_to_last_pitch() {
        let mut tracker = tracker_with_at_bat().await;
        tracker
            .ensure_player("Mori", None, None, None)
            .await
            .unwrap();

        let err = tracker
            .record_runner_event(RunnerEventInput {
                runner: "Mori".to_string(),
                start_base: 1,
                end_base: Some(2),
                event_type: RunnerEventType::StolenBase,
                out_recorded: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::NoPitchForRunner));

        let pitch = tracker
            .record_pitch(input(PitchType::Fastball, PitchCall::BallCalled))
            .await
            .unwrap();
        tracker
            .record_runner_event(RunnerEventInput {
                runner: "Mori".to_string(),
                start_base: 1,
                end_base: Some(2),
                event_type: RunnerEventType::StolenBase,
                out_recorded: false,
            })
            .await
            .unwrap();

        let rows = tracker
            .store
            .select(tables::RUNNER_EVENTS, Query::new())
            .await
            .unwrap();
        let event: RunnerEvent = from_row(rows.into_iter().next().unwrap()).unwrap();
        assert_eq!(event.pitch_id, pitch.pitch_id);
        assert_eq!(event.event_type, RunnerEventType::StolenBase);
        assert!(tracker.session.event_log[0].contains("Runner Mori: Stolen Base"));
    }

    /// Store that fails every write, for the not-recorded paths.
    struct FailingStore;

    #[async_trait]
    impl RecordStore for FailingStore {
        async fn insert(&self, table: &str, _row: Row) -> Result<Row, StoreError> {
            Err(StoreError::EmptyInsert(table.to_string()))
        }
        async fn select(&self, _table: &str, _query: Query) -> Result<Vec<Row>, StoreError> {
            Ok(Vec::new())
        }
        async fn update(
            &self,
            table: &str,
            _filters: &[Filter],
            _patch: Row,
        ) -> Result<Vec<Row>, StoreError> {
            Err(StoreError::EmptyUpdate(table.to_string()))
        }
        async fn delete(&self, table: &str, _filters: &[Filter]) -> Result<(), StoreError> {
            Err(StoreError::UnknownTable(table.to_string()))
        }
    }

    #[tokio::test]
    async fn test_failed_write_leaves_count_unchanged() {
        let mut session = TrackerSession::default();
        session.begin_at_bat(1);
        session.count = Count::new(1, 1);
        let mut tracker = Tracker::new(Arc::new(FailingStore), session);

        let err = tracker
            .record_pitch(input(PitchType::Fastball, PitchCall::BallCalled))
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::PitchNotRecorded(_)));
        assert_eq!(tracker.session.count, Count::new(1, 1));
        assert!(tracker.session.pitch_history.is_empty());
    }

    #[tokio::test]
    async fn test_failed_undo_keeps_stack() {
        let mut session = TrackerSession::default();
        session.begin_at_bat(1);
        session.pitch_history.push(42);
        let mut tracker = Tracker::new(Arc::new(FailingStore), session);

        let err = tracker.undo_last_pitch().await.unwrap_err();
        assert!(matches!(err, TrackerError::NotUndone(_)));
        assert_eq!(tracker.session.pitch_history, vec![42]);
    }

    /// Store whose deletes land but whose reads fail, for the divergence
    /// path: pitch removed, count re-read impossible.
    struct ReadFailingStore;

    #[async_trait]
    impl RecordStore for ReadFailingStore {
        async fn insert(&self, table: &str, _row: Row) -> Result<Row, StoreError> {
            Err(StoreError::EmptyInsert(table.to_string()))
        }
        async fn select(&self, table: &str, _query: Query) -> Result<Vec<Row>, StoreError> {
            Err(StoreError::UnknownTable(table.to_string()))
        }
        async fn update(
            &self,
            table: &str,
            _filters: &[Filter],
            _patch: Row,
        ) -> Result<Vec<Row>, StoreError> {
            Err(StoreError::EmptyUpdate(table.to_string()))
        }
        async fn delete(&self, _table: &str, _filters: &[Filter]) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_undo_surfaces_divergence_when_reread_fails() {
        let mut session = TrackerSession::default();
        session.begin_at_bat(1);
        session.count = Count::new(1, 1);
        session.pitch_history.push(42);
        let mut tracker = Tracker::new(Arc::new(ReadFailingStore), session);

        let err = tracker.undo_last_pitch().await.unwrap_err();
        assert!(matches!(err, TrackerError::UndoIncomplete(_)));
        // The pitch is gone from the store; the session count is left as-is
        // for the operator to resolve
        assert_eq!(tracker.session.count, Count::new(1, 1));
        assert!(tracker.session.pitch_history.is_empty());
    }
}
