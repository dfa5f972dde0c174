//! Shell state, dispatch, and error reporting.

use std::{env, io, sync::Arc};

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::{
    cli::{
        commands, io as cli_io,
        observer::ShellObserver,
        output::{self, OutputPreferences},
        registry::{CommandEntry, CommandRegistry},
    },
    config::{Config, ConfigManager},
    core::{Clock, FixedClock, SystemClock, Tracker},
    errors::TrackerError,
    storage::LedgerStore,
    utils::paths,
};

/// Pins the shell's calendar to a `YYYY-MM-DD` date instead of the system clock.
pub const TODAY_OVERRIDE_ENV: &str = "BUDGET_TRACKER_TODAY";

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

/// Fatal shell errors that end the session.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] TrackerError),
    #[error("Readline error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Per-command failures; reported and the shell keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] TrackerError),
    #[error("Prompt failed: {0}")]
    Prompt(String),
    #[error("Exit requested")]
    ExitRequested,
}

impl From<dialoguer::Error> for CommandError {
    fn from(err: dialoguer::Error) -> Self {
        CommandError::Prompt(err.to_string())
    }
}

pub type CommandResult = Result<(), CommandError>;

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub tracker: Tracker,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Opens the tracker under the application data directory and runs the
    /// month rollover check.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let base = paths::app_data_dir();
        let config = ConfigManager::with_base_dir(base.clone())?.load()?;
        output::set_preferences(OutputPreferences {
            color_enabled: config.ui_color_enabled && mode == CliMode::Interactive,
        });

        let store = LedgerStore::in_dir(paths::store_dir_in(&base), clock_from_env()?)?;
        let mut tracker = Tracker::new(store);
        tracker.subscribe(Box::new(ShellObserver));
        tracker.startup()?;

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        Ok(Self {
            mode,
            registry,
            tracker,
            config,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
        })
    }

    pub fn prompt(&self) -> String {
        let month = self.tracker.ledger().current_month.unwrap_or_default();
        format!("budget [{month}]> ")
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn dispatch(&mut self, command: &str, raw: &str, args: &[&str]) -> LoopControl {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(raw);
            return LoopControl::Continue;
        };
        match handler(self, args) {
            Ok(()) => LoopControl::Continue,
            Err(CommandError::ExitRequested) => LoopControl::Exit,
            Err(err) => {
                self.report_error(err);
                LoopControl::Continue
            }
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!("Unknown command `{}`.", input));
        if let Some(best) = self.registry.suggest(input) {
            output::info(format!("Suggestion: `{}`?", best));
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help <command>` for usage details.");
            }
            other => output::error(other),
        }
    }

    /// Asks before a destructive action. Script mode and a disabled
    /// `confirm_destructive` setting both answer yes.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script || !self.config.confirm_destructive {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true)
    }

    /// Teardown: re-persist whatever is stored so nothing is lost on exit.
    pub(crate) fn finish(&self) -> Result<(), CliError> {
        self.tracker.shutdown()?;
        Ok(())
    }
}

fn clock_from_env() -> Result<Arc<dyn Clock>, CliError> {
    match env::var(TODAY_OVERRIDE_ENV) {
        Ok(raw) => {
            let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|err| {
                TrackerError::Config(format!("{TODAY_OVERRIDE_ENV}=`{raw}`: {err}"))
            })?;
            Ok(Arc::new(FixedClock::new(date)))
        }
        Err(_) => Ok(Arc::new(SystemClock)),
    }
}
