use std::path::PathBuf;

use dialoguer::{theme::ColorfulTheme, Confirm};
use tracing::{info, warn};

use expense_config::{Config, ConfigManager};
use expense_core::{rate_for, Clock, CoreError, LedgerStore, LedgerView, ViewService};
use expense_domain::{CurrencyRate, CurrencyTable, FilterCriteria};
use expense_storage_json::JsonLedgerStorage;

use crate::cli::commands;
use crate::cli::core::{CliError, CliMode, CommandError, LoopControl};
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::render;
use crate::cli::shell::parse_command_line;
use crate::cli::system_clock::SystemClock;
use crate::utils::paths::PathResolver;

/// Session state shared by every command handler.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: LedgerStore,
    pub criteria: FilterCriteria,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub currencies: CurrencyTable,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::open(mode, PathResolver::base_dir(), Box::new(SystemClock))
    }

    /// Opens the config and ledger under `home`, then carries recurring expenses into the
    /// current month.
    pub fn open(mode: CliMode, home: PathBuf, clock: Box<dyn Clock>) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(home.clone())?;
        let config = config_manager.load().unwrap_or_else(|err| {
            warn!("ignoring unreadable config, using defaults: {err}");
            Config::default()
        });
        output::set_color_enabled(config.ui_color_enabled && mode == CliMode::Interactive);

        let storage =
            JsonLedgerStorage::with_key(config.resolve_data_dir(&home), &config.storage_key)?;
        info!(path = %storage.slot_path().display(), "opening ledger");
        let store = LedgerStore::load(Box::new(storage), clock);
        if let Some(reason) = store.load_error() {
            output::warning(format!(
                "Could not read the saved expenses ({reason}); starting with an empty ledger."
            ));
        }

        let mut context = Self {
            mode,
            registry: CommandRegistry::with_entries(commands::all_definitions()),
            store,
            criteria: FilterCriteria::any(),
            config,
            config_manager,
            currencies: CurrencyTable::standard(),
            theme: ColorfulTheme::default(),
            running: true,
        };
        context.apply_startup_rollover();
        Ok(context)
    }

    fn apply_startup_rollover(&mut self) {
        let today = self.store.today();
        match self.store.apply_monthly_rollover(today) {
            Ok(0) => {}
            Ok(count) => {
                info!(count, "recurring expenses rolled over");
                output::info(format!(
                    "Carried {count} recurring expense(s) into {}.",
                    today.format("%B %Y")
                ));
            }
            Err(err) => output::error(save_failure(&err)),
        }
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        if self.criteria.is_unrestricted() {
            "expenses> ".into()
        } else {
            "expenses (filtered)> ".into()
        }
    }

    /// Current view over the ledger with the active filters and budget.
    pub fn view(&self) -> LedgerView {
        ViewService::derive_view(self.store.records(), &self.criteria, self.config.budget_limit)
    }

    /// Rate for the configured display currency, falling back to the base currency.
    pub fn display_rate(&self) -> CurrencyRate {
        rate_for(&self.currencies, &self.config.display_currency).unwrap_or_else(|err| {
            warn!("{err}; showing amounts in the base currency");
            CurrencyRate::parity()
        })
    }

    pub fn save_config(&self) -> Result<(), CommandError> {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    /// Totals line printed after every change to the ledger or the view.
    pub fn render_status(&self) {
        render::print_status(&self.view(), &self.display_rate(), self.config.budget_limit);
    }

    /// Asks before destructive actions. Script mode never prompts.
    pub fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()?;
        Ok(confirmed)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()?;
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

    /// Tokenizes and runs one shell line.
    pub fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };

        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

        let control = self.dispatch(&command, raw, &args)?;
        if control == LoopControl::Exit {
            self.running = false;
        }
        Ok(control)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        if let Some(best) = self.registry.suggest(input) {
            output::hint(format!("Did you mean `{best}`?"));
        }
    }

    pub fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Core(CoreError::Validation(message)) => {
                output::error(format!("Invalid expense: {message}"));
            }
            CommandError::Core(CoreError::IndexOutOfRange { index, len }) => {
                output::error(format!(
                    "No expense #{} (the ledger holds {len}).",
                    index + 1
                ));
            }
            CommandError::Core(err @ (CoreError::Storage(_) | CoreError::Io(_))) => {
                output::error(save_failure(&err));
                self.render_status();
            }
            other => output::error(other),
        }
        Ok(())
    }
}

/// Persistence failures leave the in-memory change in place; only the write is reported.
fn save_failure(err: &CoreError) -> String {
    match err {
        CoreError::Storage(message) => format!("Could not save: {message}"),
        other => format!("Could not save: {other}"),
    }
}
