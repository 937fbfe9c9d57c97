//! Command to print every leaf of the merged configuration as a dotted key.
//!
//! Each line is `key = value` with the value as compact JSON, in the order
//! the keys were merged.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;
use strata::{keypath, ConfigAccess};

/// Print every leaf as a dotted key.
#[derive(Args)]
pub struct FlattenCommand {
    /// Prefix prepended to every key
    #[arg(long, value_name = "PREFIX", default_value = "")]
    pub prefix: String,
}

impl FlattenCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;

        for (key, value) in keypath::dot(config.all(), &self.prefix) {
            println!("{key} = {value}");
        }
        Ok(())
    }
}
