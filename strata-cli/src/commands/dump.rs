//! Command to print the whole merged configuration.

use crate::error::CliError;
use crate::utils::{load_configuration, render_value, GlobalOptions};
use clap::Args;
use strata::ConfigAccess;

/// Print the whole merged configuration.
#[derive(Args)]
pub struct DumpCommand {}

impl DumpCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        println!("{}", render_value(config.all(), global.format)?);
        Ok(())
    }
}
