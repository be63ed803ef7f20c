//! Version command for displaying dugout version information

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;

use crate::cli::CommandContext;

#[derive(Args, Clone)]
pub struct VersionArgs {}

pub struct VersionCommand {
    _args: VersionArgs,
}

impl VersionCommand {
    pub fn new(args: VersionArgs) -> Self {
        Self { _args: args }
    }

    pub async fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        const VERSION: &str = env!("CARGO_PKG_VERSION");
        const PKG_NAME: &str = env!("CARGO_PKG_NAME");
        const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

        println!("{} v{}", PKG_NAME.bright_blue().bold(), VERSION.bright_green());
        if !PKG_DESCRIPTION.is_empty() {
            println!("{}", PKG_DESCRIPTION);
        }

        println!();
        println!(
            "Profile: {}",
            if cfg!(debug_assertions) { "debug" } else { "release" }
        );
        Ok(())
    }
}
