//! Domain records and enumerations for the tracker schema
//!
//! Column names and enum wire strings match the hosted store's tables
//! (Players, Games, AtBats, Pitches, RunnerEvents) exactly, so rows round-trip
//! between the typed layer and the dynamic store without mapping tables.
//! `New*` structs are insert payloads; the unprefixed structs are read-backs
//! with server-assigned ids.

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::count::CountLabel;

/// Outcome call for a single pitch. Drives the count transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum PitchCall {
    #[serde(rename = "Strike Called")]
    StrikeCalled,
    #[serde(rename = "Strike Swing Miss")]
    StrikeSwingMiss,
    #[serde(rename = "Ball Called")]
    BallCalled,
    #[serde(rename = "Foul Ball")]
    FoulBall,
    #[serde(rename = "In Play")]
    InPlay,
}

impl fmt::Display for PitchCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PitchCall::StrikeCalled => "Strike Called",
            PitchCall::StrikeSwingMiss => "Strike Swing Miss",
            PitchCall::BallCalled => "Ball Called",
            PitchCall::FoulBall => "Foul Ball",
            PitchCall::InPlay => "In Play",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum PitchType {
    Fastball,
    Slider,
    Curveball,
    Changeup,
    Cutter,
}

impl fmt::Display for PitchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PitchType::Fastball => "Fastball",
            PitchType::Slider => "Slider",
            PitchType::Curveball => "Curveball",
            PitchType::Changeup => "Changeup",
            PitchType::Cutter => "Cutter",
        };
        write!(f, "{s}")
    }
}

/// Contact classification for a ball put in play or fouled off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum TaggedHit {
    Bunt,
    Flyball,
    Groundball,
    Linedrive,
}

/// Field location of a batted ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum HitDirection {
    #[serde(rename = "3-4 Hole")]
    #[value(name = "3-4-hole")]
    ThreeFourHole,
    #[serde(rename = "5-6 Hole")]
    #[value(name = "5-6-hole")]
    FiveSixHole,
    Catcher,
    #[serde(rename = "Center Field")]
    CenterField,
    #[serde(rename = "First Base")]
    FirstBase,
    #[serde(rename = "Left Center")]
    LeftCenter,
    #[serde(rename = "Left Field")]
    LeftField,
    Middle,
    Pitcher,
    #[serde(rename = "Right Center")]
    RightCenter,
    #[serde(rename = "Right Field")]
    RightField,
    #[serde(rename = "Second Base")]
    SecondBase,
    #[serde(rename = "Short Stop")]
    ShortStop,
    #[serde(rename = "Third Base")]
    ThirdBase,
}

/// Recorded result of a finished at-bat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum PlayResult {
    #[serde(rename = "1B")]
    #[value(name = "1b")]
    Single,
    #[serde(rename = "2B")]
    #[value(name = "2b")]
    Double,
    #[serde(rename = "3B")]
    #[value(name = "3b")]
    Triple,
    #[serde(rename = "HR")]
    #[value(name = "hr")]
    HomeRun,
    Walk,
    #[serde(rename = "Intentional Walk")]
    IntentionalWalk,
    #[serde(rename = "Strikeout Looking")]
    StrikeoutLooking,
    #[serde(rename = "Strikeout Swinging")]
    StrikeoutSwinging,
    #[serde(rename = "HitByPitch")]
    HitByPitch,
    #[serde(rename = "GroundOut")]
    GroundOut,
    #[serde(rename = "FlyOut")]
    FlyOut,
    #[serde(rename = "Error")]
    ReachedOnError,
    #[serde(rename = "FC")]
    #[value(name = "fc")]
    FieldersChoice,
    #[serde(rename = "SAC")]
    #[value(name = "sac")]
    Sacrifice,
    #[serde(rename = "SACFly")]
    #[value(name = "sac-fly")]
    SacrificeFly,
}

impl fmt::Display for PlayResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlayResult::Single => "1B",
            PlayResult::Double => "2B",
            PlayResult::Triple => "3B",
            PlayResult::HomeRun => "HR",
            PlayResult::Walk => "Walk",
            PlayResult::IntentionalWalk => "Intentional Walk",
            PlayResult::StrikeoutLooking => "Strikeout Looking",
            PlayResult::StrikeoutSwinging => "Strikeout Swinging",
            PlayResult::HitByPitch => "HitByPitch",
            PlayResult::GroundOut => "GroundOut",
            PlayResult::FlyOut => "FlyOut",
            PlayResult::ReachedOnError => "Error",
            PlayResult::FieldersChoice => "FC",
            PlayResult::Sacrifice => "SAC",
            PlayResult::SacrificeFly => "SACFly",
        };
        write!(f, "{s}")
    }
}

/// What a runner did on (or around) a pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum RunnerEventType {
    #[serde(rename = "Stolen Base")]
    StolenBase,
    #[serde(rename = "Caught Stealing")]
    CaughtStealing,
    Pickoff,
    #[serde(rename = "Out on Play")]
    OutOnPlay,
    #[serde(rename = "Advanced on Hit")]
    AdvancedOnHit,
    Other,
}

impl fmt::Display for RunnerEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunnerEventType::StolenBase => "Stolen Base",
            RunnerEventType::CaughtStealing => "Caught Stealing",
            RunnerEventType::Pickoff => "Pickoff",
            RunnerEventType::OutOnPlay => "Out on Play",
            RunnerEventType::AdvancedOnHit => "Advanced on Hit",
            RunnerEventType::Other => "Other",
        };
        write!(f, "{s}")
    }
}

/// Pitching arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Handedness {
    Right,
    Left,
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handedness::Right => write!(f, "Right"),
            Handedness::Left => write!(f, "Left"),
        }
    }
}

/// Batting side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum BatSide {
    Right,
    Left,
    Switch,
}

impl fmt::Display for BatSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatSide::Right => write!(f, "Right"),
            BatSide::Left => write!(f, "Left"),
            BatSide::Switch => write!(f, "Switch"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    #[serde(rename = "PlayerID")]
    pub player_id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Team", default)]
    pub team: Option<String>,
    #[serde(rename = "Throws", default)]
    pub throws: Option<Handedness>,
    #[serde(rename = "Bats", default)]
    pub bats: Option<BatSide>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPlayer {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Team", skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(rename = "Throws", skip_serializing_if = "Option::is_none")]
    pub throws: Option<Handedness>,
    #[serde(rename = "Bats", skip_serializing_if = "Option::is_none")]
    pub bats: Option<BatSide>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    #[serde(rename = "GameID")]
    pub game_id: i64,
    #[serde(rename = "GameDate")]
    pub game_date: NaiveDate,
    #[serde(rename = "HomeTeam")]
    pub home_team: String,
    #[serde(rename = "AwayTeam")]
    pub away_team: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewGame {
    #[serde(rename = "HomeTeam")]
    pub home_team: String,
    #[serde(rename = "AwayTeam")]
    pub away_team: String,
    #[serde(rename = "GameDate")]
    pub game_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtBat {
    #[serde(rename = "AtBatID")]
    pub atbat_id: i64,
    #[serde(rename = "GameID")]
    pub game_id: i64,
    #[serde(rename = "BatterID")]
    pub batter_id: i64,
    #[serde(rename = "PitcherID")]
    pub pitcher_id: i64,
    #[serde(rename = "Inning")]
    pub inning: u8,
    #[serde(rename = "BatterOrder", default)]
    pub batter_order: Option<u8>,
    #[serde(rename = "LeadOff", default)]
    pub lead_off: Option<bool>,
    #[serde(rename = "PlayResult", default)]
    pub play_result: Option<PlayResult>,
    #[serde(rename = "LeadOffOn", default)]
    pub lead_off_on: Option<bool>,
    #[serde(rename = "RunsScored", default)]
    pub runs_scored: i64,
    #[serde(rename = "EarnedRuns", default)]
    pub earned_runs: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAtBat {
    #[serde(rename = "GameID")]
    pub game_id: i64,
    #[serde(rename = "BatterID")]
    pub batter_id: i64,
    #[serde(rename = "PitcherID")]
    pub pitcher_id: i64,
    #[serde(rename = "Inning")]
    pub inning: u8,
    #[serde(rename = "RunsScored")]
    pub runs_scored: i64,
    #[serde(rename = "EarnedRuns")]
    pub earned_runs: i64,
    #[serde(rename = "BatterOrder", skip_serializing_if = "Option::is_none")]
    pub batter_order: Option<u8>,
    #[serde(rename = "LeadOff", skip_serializing_if = "Option::is_none")]
    pub lead_off: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pitch {
    #[serde(rename = "PitchID")]
    pub pitch_id: i64,
    #[serde(rename = "AtBatID")]
    pub atbat_id: i64,
    #[serde(rename = "PitchNo")]
    pub pitch_no: i64,
    #[serde(rename = "PitchOfAB")]
    pub pitch_of_ab: i64,
    #[serde(rename = "PitchType")]
    pub pitch_type: PitchType,
    #[serde(rename = "Velocity", default)]
    pub velocity: Option<f64>,
    #[serde(rename = "Zone", default)]
    pub zone: Option<u8>,
    #[serde(rename = "PitchCalled")]
    pub pitch_called: PitchCall,
    #[serde(rename = "WEL", default)]
    pub wel: Option<CountLabel>,
    #[serde(rename = "Balls")]
    pub balls: u8,
    #[serde(rename = "Strikes")]
    pub strikes: u8,
    #[serde(rename = "TaggedHit", default)]
    pub tagged_hit: Option<TaggedHit>,
    #[serde(rename = "HitDirection", default)]
    pub hit_direction: Option<HitDirection>,
    #[serde(rename = "KPI", default)]
    pub kpi: Option<String>,
}

/// Insert payload for a pitch. Optional columns are written as explicit
/// nulls so every pitch row has the full column set.
#[derive(Debug, Clone, Serialize)]
pub struct NewPitch {
    #[serde(rename = "AtBatID")]
    pub atbat_id: i64,
    #[serde(rename = "PitchNo")]
    pub pitch_no: i64,
    #[serde(rename = "PitchOfAB")]
    pub pitch_of_ab: i64,
    #[serde(rename = "PitchType")]
    pub pitch_type: PitchType,
    #[serde(rename = "Velocity")]
    pub velocity: Option<f64>,
    #[serde(rename = "Zone")]
    pub zone: Option<u8>,
    #[serde(rename = "PitchCalled")]
    pub pitch_called: PitchCall,
    #[serde(rename = "WEL")]
    pub wel: Option<CountLabel>,
    #[serde(rename = "Balls")]
    pub balls: u8,
    #[serde(rename = "Strikes")]
    pub strikes: u8,
    #[serde(rename = "TaggedHit")]
    pub tagged_hit: Option<TaggedHit>,
    #[serde(rename = "HitDirection")]
    pub hit_direction: Option<HitDirection>,
    #[serde(rename = "KPI")]
    pub kpi: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerEvent {
    #[serde(rename = "RunnerEventID")]
    pub runner_event_id: i64,
    #[serde(rename = "PitchID")]
    pub pitch_id: i64,
    #[serde(rename = "RunnerID")]
    pub runner_id: i64,
    #[serde(rename = "StartBase")]
    pub start_base: u8,
    #[serde(rename = "EndBase", default)]
    pub end_base: Option<u8>,
    #[serde(rename = "EventType")]
    pub event_type: RunnerEventType,
    #[serde(rename = "OutRecorded")]
    pub out_recorded: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewRunnerEvent {
    #[serde(rename = "PitchID")]
    pub pitch_id: i64,
    #[serde(rename = "RunnerID")]
    pub runner_id: i64,
    #[serde(rename = "StartBase")]
    pub start_base: u8,
    #[serde(rename = "EndBase")]
    pub end_base: Option<u8>,
    #[serde(rename = "EventType")]
    pub event_type: RunnerEventType,
    #[serde(rename = "OutRecorded")]
    pub out_recorded: bool,
}
