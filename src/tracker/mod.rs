//! Game-event tracking: the count state machine, sequence allocation,
//! session state, and the operations the CLI drives.

pub mod count;
pub mod sequence;
pub mod service;
pub mod session;
pub mod types;

pub use count::{Count, CountLabel};
pub use sequence::PitchNumbers;
pub use service::{
    AtBatOutcome, PitchInput, RecordedPitch, RunnerEventInput, Tracker, TrackerError,
};
pub use session::{SessionStorage, TrackerSession};
