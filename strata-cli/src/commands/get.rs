//! Command to print the value stored at a dotted key.

use crate::error::CliError;
use crate::utils::{load_configuration, parse_default, render_value, GlobalOptions};
use clap::Args;
use strata::ConfigAccess;

/// Print the value stored at a dotted key.
#[derive(Args)]
pub struct GetCommand {
    /// Dotted key, e.g. `database.primary.port`
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Value printed when the key is absent (JSON, or a plain string)
    #[arg(long, value_name = "VALUE")]
    pub default: Option<String>,
}

impl GetCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.key.is_empty() {
            return Err(CliError::InvalidArguments("key must not be empty".into()));
        }

        let config = load_configuration(global)?;

        let value = match self.default.as_deref() {
            Some(raw) => config.get_or(&self.key, parse_default(raw))?,
            None => config.get(&self.key)?,
        };

        println!("{}", render_value(&value, global.format)?);
        Ok(())
    }
}
