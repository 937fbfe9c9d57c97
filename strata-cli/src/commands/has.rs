//! Command to check whether a dotted key is present.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;
use strata::ConfigAccess;

/// Exit successfully if a dotted key is present.
#[derive(Args)]
pub struct HasCommand {
    /// Dotted key to check
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Invert the check (fail if the key is present)
    #[arg(long)]
    pub not: bool,
}

impl HasCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.key.is_empty() {
            return Err(CliError::InvalidArguments("key must not be empty".into()));
        }

        let config = load_configuration(global)?;
        let present = config.has(&self.key);

        if present != self.not {
            return Ok(());
        }

        let msg = if self.not {
            format!("Key '{}' is present", self.key)
        } else {
            format!("Key '{}' is not present", self.key)
        };
        Err(CliError::SemanticFailure(msg))
    }
}
