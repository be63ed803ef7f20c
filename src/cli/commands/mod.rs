//! Command implementations, one module per subcommand

pub mod atbat;
pub mod game;
pub mod lineup;
pub mod pitch;
pub mod runner;
pub mod summary;
pub mod version;
