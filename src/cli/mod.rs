mod commands;
pub mod exit_codes;
pub mod output;

pub use commands::{error_code, Cli};

use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    commands::execute(cli)
}
