//! CLI command handling module
//!
//! Handles logging setup and the non-resolving subcommands.

mod commands;
mod logging;
mod version;

pub use commands::{ConfigSubcommand, handle_config_command};
pub use logging::init_logging;
pub use version::display_version;
