//! Ball/strike count state machine and the WEL count classification
//!
//! The count is never persisted on its own; every recorded pitch carries a
//! snapshot of the post-transition count plus its WEL label.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::PitchCall;

pub const MAX_BALLS: u8 = 4;
pub const MAX_STRIKES: u8 = 3;

/// Balls/strikes state of the current plate appearance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Count {
    pub balls: u8,
    pub strikes: u8,
}

impl Count {
    pub fn new(balls: u8, strikes: u8) -> Self {
        Self { balls, strikes }
    }

    /// Apply a pitch call to the count. Total: both axes saturate at their
    /// maximum, so any in-domain input yields an in-domain output.
    ///
    /// A foul never produces strike three. An in-play ball is booked the
    /// same way: a strike below two strikes, otherwise no change. Ending
    /// the at-bat is a separate action and not the count's business.
    pub fn apply(self, call: PitchCall) -> Count {
        match call {
            PitchCall::BallCalled => Count {
                balls: (self.balls + 1).min(MAX_BALLS),
                ..self
            },
            PitchCall::StrikeCalled | PitchCall::StrikeSwingMiss => Count {
                strikes: (self.strikes + 1).min(MAX_STRIKES),
                ..self
            },
            PitchCall::FoulBall | PitchCall::InPlay => {
                if self.strikes < 2 {
                    Count {
                        strikes: self.strikes + 1,
                        ..self
                    }
                } else {
                    self
                }
            }
        }
    }

    /// WEL leverage label for this count. Exact-match table only:
    /// early counts, pitcher-advantage ("win") counts, hitter-advantage
    /// ("lose") counts; everything else is unlabeled.
    pub fn label(self) -> Option<CountLabel> {
        match (self.balls, self.strikes) {
            (0, 0) | (0, 1) | (1, 0) | (1, 1) => Some(CountLabel::Early),
            (0, 2) | (1, 2) => Some(CountLabel::Win),
            (2, 0) | (2, 1) => Some(CountLabel::Lose),
            _ => None,
        }
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.balls, self.strikes)
    }
}

/// Coach-defined three-way count tag. Stored as "E"/"W"/"L".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountLabel {
    #[serde(rename = "E")]
    Early,
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Lose,
}

impl fmt::Display for CountLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountLabel::Early => write!(f, "E"),
            CountLabel::Win => write!(f, "W"),
            CountLabel::Lose => write!(f, "L"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_CALLS: [PitchCall; 5] = [
        PitchCall::StrikeCalled,
        PitchCall::StrikeSwingMiss,
        PitchCall::BallCalled,
        PitchCall::FoulBall,
        PitchCall::InPlay,
    ];

    #[test]
    fn test_transition_never_leaves_domain() {
        for balls in 0..=MAX_BALLS {
            for strikes in 0..=MAX_STRIKES {
                for call in ALL_CALLS {
                    let next = Count::new(balls, strikes).apply(call);
                    assert!(next.balls <= MAX_BALLS, "{balls}-{strikes} + {call:?}");
                    assert!(next.strikes <= MAX_STRIKES, "{balls}-{strikes} + {call:?}");
                }
            }
        }
    }

    #[test]
    fn test_ball_saturates_at_four() {
        assert_eq!(Count::new(3, 1).apply(PitchCall::BallCalled), Count::new(4, 1));
        assert_eq!(Count::new(4, 1).apply(PitchCall::BallCalled), Count::new(4, 1));
    }

    #[test]
    fn test_strike_increments_and_saturates() {
        assert_eq!(
            Count::new(2, 1).apply(PitchCall::StrikeCalled),
            Count::new(2, 2)
        );
        assert_eq!(
            Count::new(2, 1).apply(PitchCall::StrikeSwingMiss),
            Count::new(2, 2)
        );
        assert_eq!(
            Count::new(1, 3).apply(PitchCall::StrikeCalled),
            Count::new(1, 3)
        );
    }

    #[test]
    fn test_foul_never_makes_strike_three() {
        assert_eq!(Count::new(2, 1).apply(PitchCall::FoulBall), Count::new(2, 2));
        assert_eq!(Count::new(1, 2).apply(PitchCall::FoulBall), Count::new(1, 2));
    }

    #[test]
    fn test_in_play_booked_like_foul() {
        assert_eq!(Count::new(0, 0).apply(PitchCall::InPlay), Count::new(0, 1));
        assert_eq!(Count::new(0, 2).apply(PitchCall::InPlay), Count::new(0, 2));
    }

    #[test]
    fn test_wel_table() {
        assert_eq!(Count::new(0, 0).label(), Some(CountLabel::Early));
        assert_eq!(Count::new(0, 1).label(), Some(CountLabel::Early));
        assert_eq!(Count::new(1, 0).label(), Some(CountLabel::Early));
        assert_eq!(Count::new(1, 1).label(), Some(CountLabel::Early));
        assert_eq!(Count::new(0, 2).label(), Some(CountLabel::Win));
        assert_eq!(Count::new(1, 2).label(), Some(CountLabel::Win));
        assert_eq!(Count::new(2, 0).label(), Some(CountLabel::Lose));
        assert_eq!(Count::new(2, 1).label(), Some(CountLabel::Lose));
        assert_eq!(Count::new(2, 2).label(), None);
        assert_eq!(Count::new(3, 0).label(), None);
        assert_eq!(Count::new(4, 2).label(), None);
    }

    #[test]
    fn test_label_serializes_to_letter() {
        assert_eq!(
            serde_json::to_value(CountLabel::Win).unwrap(),
            serde_json::json!("W")
        );
    }

    #[test]
    fn test_full_at_bat_walkthrough() {
        let c = Count::default();
        let c = c.apply(PitchCall::BallCalled);
        assert_eq!((c, c.label()), (Count::new(1, 0), Some(CountLabel::Early)));
        let c = c.apply(PitchCall::StrikeSwingMiss);
        assert_eq!((c, c.label()), (Count::new(1, 1), Some(CountLabel::Early)));
        let c = c.apply(PitchCall::StrikeCalled);
        assert_eq!((c, c.label()), (Count::new(1, 2), Some(CountLabel::Win)));
        let c = c.apply(PitchCall::FoulBall);
        assert_eq!((c, c.label()), (Count::new(1, 2), Some(CountLabel::Win)));
    }
}
