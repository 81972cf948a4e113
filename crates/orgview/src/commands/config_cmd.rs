//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let settings = config::resolve_settings(global)?;
            let shown = config::redacted(&settings);
            // No table form for settings; YAML reads closest to the file.
            let out = output::render(global.output, &shown, |s| {
                serde_yaml::to_string(s).unwrap_or_default()
            })?;
            output::print_output(&out)
        }
        ConfigCommand::Path => {
            let path = config::effective_path(global);
            output::print_output(&path.display().to_string())
        }
    }
}
