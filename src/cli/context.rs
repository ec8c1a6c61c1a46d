//! Shared runtime state for the shell plus dispatch and error reporting.

use std::{
    env,
    io::{self, Write},
    path::PathBuf,
};

use apg_config::{resolve_base_dir, AppConfig, ConfigManager};
use apg_domain::{FieldKey, FIELD_CATALOG};
use apg_storage_json::{JsonFileStore, PersistenceAdapter, StorageKeys};
use strsim::levenshtein;

use crate::{
    clipboard::{Clipboard, FileClipboard, UnsupportedClipboard, COPY_FAILURE},
    errors::{AppError, CliError},
    session::Session,
};

use super::{commands, output, registry::CommandRegistry};

/// When set, `copy` writes the prompt to this file.
pub const CLIPBOARD_FILE_ENV: &str = "APG_CLIPBOARD_FILE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    App(#[from] AppError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::App(inner) => CliError::Core(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub session: Session<JsonFileStore>,
    pub config: AppConfig,
    pub config_manager: ConfigManager,
    pub clipboard: Box<dyn Clipboard>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager =
            ConfigManager::with_base_dir(resolve_base_dir()).map_err(AppError::from)?;
        let config = config_manager.load().map_err(AppError::from)?;
        output::set_color_enabled(config.ui_color_enabled);

        let store = JsonFileStore::new(config_manager.data_dir(&config)).map_err(AppError::from)?;
        let keys = StorageKeys {
            form: config.form_storage_key.clone(),
            sources: config.sources_storage_key.clone(),
        };
        let session = Session::open(
            PersistenceAdapter::with_keys(store, keys),
            config.default_sources.clone(),
        );

        let clipboard: Box<dyn Clipboard> = match env::var_os(CLIPBOARD_FILE_ENV) {
            Some(path) if !path.is_empty() => Box::new(FileClipboard::new(PathBuf::from(path))),
            _ => Box::new(UnsupportedClipboard),
        };

        let context = Self {
            mode,
            registry: CommandRegistry::with_entries(commands::all_definitions()),
            session,
            config,
            config_manager,
            clipboard,
            last_command: None,
            running: true,
        };
        context.report_restore();
        Ok(context)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        format!("apg [step {}]> ", self.session.progress().current().number())
    }

    fn report_restore(&self) {
        let summary = self.session.restore_summary();
        for note in &summary.migrations {
            output::info(format!("Migration: {}", note));
        }
        if summary.form_restored {
            match summary.saved_at {
                Some(saved_at) => output::info(format!(
                    "Form data restored from {}.",
                    saved_at
                        .with_timezone(&chrono::Local)
                        .format("%Y-%m-%d %H:%M")
                )),
                None => output::info("Form data restored."),
            }
        }
        if !summary.restored_sources.is_empty() {
            output::info(format!(
                "Restored {} additional source(s).",
                summary.restored_sources.len()
            ));
        }
    }

    pub(crate) fn confirm_exit(&mut self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        print!("Exit shell? [y/N] ");
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        let confirmed = matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes");
        if confirmed {
            self.running = false;
            output::info("Exiting shell.");
        }
        Ok(confirmed)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = closest(self.registry.names(), input) {
            output::info(format!("Suggestion: `{}`?", best));
        }
    }

    /// Resolves a field by external name, suggesting the nearest one on a
    /// miss.
    pub(crate) fn field(&self, name: &str) -> Result<FieldKey, CommandError> {
        FieldKey::from_name(name).ok_or_else(|| {
            let names = FIELD_CATALOG.iter().map(|spec| spec.key.name());
            let message = match closest(names, name) {
                Some(best) => format!("unknown field `{}` (did you mean `{}`?)", name, best),
                None => format!("unknown field `{}`; try `fields`", name),
            };
            CommandError::InvalidArguments(message)
        })
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(&message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::App(AppError::Validation(failure)) => {
                let field = self.session.focus_field(&failure);
                output::error(failure);
                output::hint(format!(
                    "Fill in `{}` in {}.",
                    field, failure.focus_target
                ));
                Ok(())
            }
            CommandError::App(AppError::Clipboard(_)) => {
                output::warning(COPY_FAILURE);
                Ok(())
            }
            CommandError::Io(err) if self.mode == CliMode::Script => Err(err.into()),
            other => {
                output::error(other);
                Ok(())
            }
        }
    }
}

fn closest<'a>(candidates: impl Iterator<Item = &'a str>, input: &str) -> Option<&'a str> {
    let needle = input.to_lowercase();
    candidates
        .map(|name| (levenshtein(&name.to_lowercase(), &needle), name))
        .filter(|(distance, _)| *distance <= 3)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name)
}
