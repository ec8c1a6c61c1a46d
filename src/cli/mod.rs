pub mod commands;
pub mod context;
pub mod help;
pub mod output;
pub mod registry;
mod shell;

pub use context::{CliMode, CommandError, CommandResult, ShellContext, CLIPBOARD_FILE_ENV};
pub use shell::{run_cli, SCRIPT_ENV};
