//! Command to list the supported file extensions.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use strata::ConfigLoader;

/// List the supported file extensions, in resolution order.
#[derive(Args)]
pub struct ExtensionsCommand {}

impl ExtensionsCommand {
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let loader = ConfigLoader::new();
        for extension in loader.supported_extensions() {
            println!("{extension}");
        }
        Ok(())
    }
}
