use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use serde::Serialize;

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::conditions::{
    self, evaluate_condition, evaluate_rule, Condition, EvalError, EvalOptions, MatchMode,
    Operand, Operator, Subject,
};
use crate::config::{self, Application, Config, Rule};
use crate::dispatch::{Dispatch, Dispatcher};
use crate::launcher::{self, DryRunLauncher, LaunchRequest, Launcher, OpenLauncher};
use crate::store::{ConfigStore, Store, StoreError};

use super::exit_codes;
use super::output::{self, AppData, OutputMode, RuleData, TestData};

#[derive(Parser)]
#[command(name = "bdisp")]
#[command(about = "Open URLs in the browser picked by your rules")]
#[command(version)]
pub struct Cli {
    /// Path to config file (overrides BDISP_CONFIG env var and default location)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (auto-enabled when stdout is piped)
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Force text output even when stdout is piped
    #[arg(long, global = true, conflicts_with = "json")]
    pub no_json: bool,

    /// Suppress all output on success (errors still go to stderr)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log rule evaluation to stderr (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open a URL with the application chosen by the rules
    Open {
        /// URL to open, or "-" to read it from stdin
        url: String,

        /// Print the launch command instead of running it
        #[arg(long)]
        dry_run: bool,
    },

    /// Open a file with the default application
    OpenFile {
        /// File to open
        path: PathBuf,

        /// Print the launch command instead of running it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show which rule would handle a URL without opening it
    Test {
        /// URL to test, or "-" to read it from stdin
        url: String,

        /// Only evaluate these rules (name or id, repeatable)
        #[arg(short, long = "rule", action = clap::ArgAction::Append)]
        rules: Vec<String>,

        /// Include inactive rules (named rules are always evaluated)
        #[arg(short, long)]
        all: bool,

        /// Show the parsed URL and the result of every condition
        #[arg(short, long)]
        explain: bool,
    },

    /// List operands and the operators each one supports
    Operands,

    /// Manage rules
    Rules {
        #[command(subcommand)]
        command: RulesCommands,
    },

    /// Manage applications
    Apps {
        #[command(subcommand)]
        command: AppsCommands,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum RulesCommands {
    /// List rules in evaluation order
    List {
        /// Output one name per line (ideal for piping to fzf/xargs)
        #[arg(long)]
        names: bool,

        /// Custom output format using {field} placeholders (e.g., "{name} -> {application}")
        #[arg(long, conflicts_with = "names")]
        format: Option<String>,
    },

    /// Show a rule with its conditions
    Show {
        /// Rule name or id
        rule: String,
    },

    /// Activate a rule
    Enable {
        /// Rule name or id
        rule: String,
    },

    /// Deactivate a rule
    Disable {
        /// Rule name or id
        rule: String,
    },

    /// Delete a rule
    Remove {
        /// Rule name or id
        rule: String,
    },

    /// Append a rule
    Add {
        /// Rule name (must be unique)
        #[arg(long)]
        name: String,

        /// Application name or id
        #[arg(long)]
        app: String,

        /// Match when any condition holds instead of all of them
        #[arg(long)]
        any: bool,

        /// Condition as "<operand> <operator> <text>", e.g. "host is github.com"
        #[arg(short, long = "condition", required = true, action = clap::ArgAction::Append)]
        conditions: Vec<String>,

        /// Open a new instance of the application
        #[arg(long)]
        new_instance: bool,

        /// Do not bring the application to the foreground
        #[arg(long)]
        background: bool,

        /// Open without restoring previous windows
        #[arg(long)]
        fresh: bool,

        /// Address the application by executable instead of bundle id
        #[arg(long)]
        use_executable: bool,

        /// Arguments passed to the application, e.g. '-P "Work"'
        #[arg(long, allow_hyphen_values = true)]
        args: Option<String>,

        /// Create the rule inactive
        #[arg(long)]
        inactive: bool,
    },
}

#[derive(Subcommand)]
pub enum AppsCommands {
    /// List applications
    List {
        /// Output one name per line
        #[arg(long)]
        names: bool,
    },

    /// Make an application the default
    Default {
        /// Application name or id
        app: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Show config file path
    Path,
    /// Set a configuration value
    Set {
        /// Key, e.g. settings.use_default
        key: String,
        value: String,
    },
    /// Reset configuration to defaults
    Reset,
    /// Print an example configuration
    Default,
    /// Check the configuration file for problems
    Verify,
}

#[derive(Serialize)]
struct ListResponse<T: Serialize> {
    items: Vec<T>,
}

#[derive(Serialize)]
struct ConditionData {
    operand: String,
    operator: String,
    text: String,
    is_active: bool,
}

#[derive(Serialize)]
struct RuleDetail {
    id: String,
    name: String,
    is_active: bool,
    operator: String,
    application: String,
    conditions: Vec<ConditionData>,
    launch: String,
}

#[derive(Serialize)]
struct VerifyData {
    path: String,
    valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

/// resolve a URL argument, reading from stdin if "-" is passed
fn resolve_target(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read URL from stdin")?;
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("empty URL from stdin"));
    }
    Ok(trimmed.to_string())
}

/// parse "<operand> <operator> <text>" into a condition
fn parse_condition_arg(arg: &str) -> Result<Condition> {
    let invalid = || {
        anyhow!(
            "invalid condition '{}': expected \"<operand> <operator> <text>\"",
            arg
        )
    };

    let arg = arg.trim();
    let (operand, rest) = arg.split_once(char::is_whitespace).ok_or_else(invalid)?;
    let (operator, text) = rest
        .trim_start()
        .split_once(char::is_whitespace)
        .ok_or_else(invalid)?;
    let text = text.trim();
    if text.is_empty() {
        return Err(invalid());
    }

    let operand = Operand::parse(operand).ok_or_else(|| {
        let names: Vec<&str> = Operand::ACTIVE.iter().map(|o| o.as_str()).collect();
        anyhow!("unknown operand '{}'{}", operand, hint(operand, &names))
    })?;
    if !operand.is_active() {
        return Err(anyhow!("operand '{}' is not supported", operand));
    }

    let operator = Operator::parse(operator).ok_or_else(|| {
        let names: Vec<&str> = Operator::ALL.iter().map(|o| o.as_str()).collect();
        anyhow!("unknown operator '{}'{}", operator, hint(operator, &names))
    })?;
    if !operand.supports(operator) {
        let names: Vec<&str> = operand
            .supported_operators()
            .iter()
            .map(|o| o.as_str())
            .collect();
        return Err(anyhow!(
            "operand '{}' does not support '{}' (supported: {})",
            operand,
            operator,
            names.join(", ")
        ));
    }

    Ok(Condition::new(operand, operator, text))
}

fn hint(input: &str, candidates: &[&str]) -> String {
    match config::did_you_mean(input, candidates.iter().copied()) {
        Some(s) => format!(", did you mean '{}'?", s),
        None => String::new(),
    }
}

/// find a rule by id or name, printing suggestions when it doesn't exist
fn lookup_rule(store: &ConfigStore, query: &str, mode: OutputMode) -> Result<Rule> {
    if let Some(rule) = store.rule(query)? {
        return Ok(rule);
    }

    let rules = store.rules()?;
    let suggestions: Vec<String> =
        config::did_you_mean(query, rules.iter().map(|r| r.name.as_str()))
            .map(|s| vec![s.to_string()])
            .unwrap_or_default();

    if mode.is_json() {
        output::print_json_error_with_suggestions(
            exit_codes::RULE_NOT_FOUND,
            &format!("rule '{}' not found", query),
            suggestions,
        );
        std::process::exit(exit_codes::RULE_NOT_FOUND);
    }

    if let Some(s) = suggestions.first() {
        eprintln!("Did you mean '{}'?", s);
    }
    Err(StoreError::RuleNotFound(query.to_string()).into())
}

/// find an application by id or (case-insensitive) name
fn lookup_app(store: &ConfigStore, query: &str, mode: OutputMode) -> Result<Application> {
    if let Some(app) = store.application(query)? {
        return Ok(app);
    }

    let apps = store.applications()?;
    if let Some(app) = apps.iter().find(|a| {
        a.name.eq_ignore_ascii_case(query) || a.label().eq_ignore_ascii_case(query)
    }) {
        return Ok(app.clone());
    }

    let suggestions: Vec<String> =
        config::did_you_mean(query, apps.iter().map(|a| a.name.as_str()))
            .map(|s| vec![s.to_string()])
            .unwrap_or_default();

    if mode.is_json() {
        output::print_json_error_with_suggestions(
            exit_codes::APP_NOT_FOUND,
            &format!("application '{}' not found", query),
            suggestions,
        );
        std::process::exit(exit_codes::APP_NOT_FOUND);
    }

    if let Some(s) = suggestions.first() {
        eprintln!("Did you mean '{}'?", s);
    }
    Err(StoreError::ApplicationNotFound(query.to_string()).into())
}

/// map an error to the exit code scripts see
pub fn error_code(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<StoreError>() {
        return match e {
            StoreError::RuleNotFound(_) => exit_codes::RULE_NOT_FOUND,
            StoreError::ApplicationNotFound(_) => exit_codes::APP_NOT_FOUND,
            StoreError::InvalidRule { .. } | StoreError::ApplicationInUse { .. } => {
                exit_codes::INVALID_RULE
            }
        };
    }
    if err.downcast_ref::<EvalError>().is_some() {
        return exit_codes::CONFIG_ERROR;
    }
    if err.downcast_ref::<CliUsageError>().is_some() {
        return exit_codes::INVALID_ARGS;
    }
    exit_codes::ERROR
}

/// bad arguments that clap could not catch
#[derive(Debug, thiserror::Error)]
#[error("{0:#}")]
struct CliUsageError(anyhow::Error);

fn usage(err: anyhow::Error) -> anyhow::Error {
    CliUsageError(err).into()
}

fn print_dispatch(dispatch: &Dispatch, dry_run: bool, mode: OutputMode) {
    match mode {
        OutputMode::Json => output::print_json(dispatch),
        OutputMode::Quiet => {}
        _ => match dispatch {
            Dispatch::Prompt { target, reason } => {
                eprintln!("Not opening {}: {}", target, reason);
            }
            _ => {
                if dry_run {
                    if let Some(request) = dispatch.request() {
                        println!("{}", request.command_line());
                    }
                }
            }
        },
    }
}

fn open_with<L: Launcher>(
    dispatcher: &Dispatcher<ConfigStore, L>,
    target: &str,
    is_file: bool,
    dry_run: bool,
    mode: OutputMode,
) -> Result<()> {
    let dispatch = if is_file {
        dispatcher.open_file(target)?
    } else {
        dispatcher.open_url(target)?
    };

    print_dispatch(&dispatch, dry_run, mode);

    if matches!(dispatch, Dispatch::Prompt { .. }) {
        std::process::exit(exit_codes::NO_MATCH);
    }
    Ok(())
}

fn open(
    config_path: Option<&Path>,
    target: &str,
    is_file: bool,
    dry_run: bool,
    mode: OutputMode,
) -> Result<()> {
    let store = ConfigStore::open(config_path)?;
    if dry_run {
        let dispatcher = Dispatcher::new(store, DryRunLauncher::new());
        open_with(&dispatcher, target, is_file, true, mode)
    } else {
        let dispatcher = Dispatcher::new(store, OpenLauncher);
        open_with(&dispatcher, target, is_file, false, mode)
    }
}

fn mark(ok: bool) -> &'static str {
    if ok {
        "✓"
    } else {
        "✗"
    }
}

fn print_subject(subject: &Subject) {
    println!("URL: {}", subject.url);
    for operand in [Operand::Host, Operand::Scheme, Operand::Path, Operand::Port] {
        println!("  {:<8}{}", operand, subject.get(operand).unwrap_or("-"));
    }
    println!();
}

/// print every rule with the outcome of each of its conditions
fn explain(rules: &[Rule], subject: &Subject, opts: &EvalOptions) {
    for rule in rules {
        let result = match evaluate_rule(rule, subject, opts) {
            Ok(matched) => mark(matched).to_string(),
            Err(e) => format!("! {}", e),
        };
        println!("{} {} ({})", result, rule.name, rule.operator);

        for condition in &rule.conditions {
            if opts.skip_inactive_conditions && !condition.is_active {
                println!("    - {}", condition);
                continue;
            }
            let result = match evaluate_condition(condition, subject, opts) {
                Ok(matched) => mark(matched).to_string(),
                Err(e) => format!("! {}", e),
            };
            println!("    {} {}", result, condition);
        }
    }
    println!();
}

fn test_url(
    config_path: Option<&Path>,
    url: &str,
    names: &[String],
    all: bool,
    show_details: bool,
    mode: OutputMode,
) -> Result<()> {
    let store = ConfigStore::open(config_path)?;

    // named rules are evaluated whether active or not, in stored order
    let rules = if !names.is_empty() {
        let mut wanted = Vec::new();
        for name in names {
            wanted.push(lookup_rule(&store, name, mode)?.id);
        }
        let mut rules = store.rules()?;
        rules.retain(|r| wanted.contains(&r.id));
        rules
    } else if all {
        store.rules()?
    } else {
        store.active_rules()?
    };

    let apps = store.applications()?;
    let dispatcher = Dispatcher::new(store, DryRunLauncher::new());
    let subject = Subject::parse(url);

    if show_details && !mode.is_json() && !mode.is_quiet() {
        print_subject(&subject);
        explain(&rules, &subject, &dispatcher.options()?);
    }

    let matched = dispatcher.test_url(url, &rules)?;

    match mode {
        OutputMode::Json => {
            output::print_json(&TestData {
                url: url.to_string(),
                subject: show_details.then_some(subject),
                matched: matched.as_ref().map(|m| RuleData::new(&m.rule, &apps)),
            });
        }
        OutputMode::Quiet => {}
        _ => match &matched {
            Some(m) => println!(
                "{} -> {} (rule '{}')",
                url,
                m.application.label(),
                m.rule.name
            ),
            None => eprintln!("No rule matched {}", url),
        },
    }

    if matched.is_none() {
        std::process::exit(exit_codes::NO_MATCH);
    }
    Ok(())
}

fn rules_command(
    config_path: Option<&Path>,
    command: RulesCommands,
    flags: Flags,
) -> Result<()> {
    let mut store = ConfigStore::open(config_path)?;
    let cli_mode = flags.mode();

    match command {
        RulesCommands::List { names, format } => {
            let mode = flags.list_mode(names, format.is_some());
            let apps = store.applications()?;
            let items: Vec<RuleData> = store
                .rules()?
                .iter()
                .map(|r| RuleData::new(r, &apps))
                .collect();

            match mode {
                OutputMode::Names => {
                    for item in &items {
                        println!("{}", item.name);
                    }
                }
                OutputMode::Format => {
                    let fmt = format.as_deref().unwrap_or_default();
                    for item in &items {
                        println!("{}", output::format_template(fmt, item));
                    }
                }
                OutputMode::Json => output::print_json(&ListResponse { items }),
                OutputMode::Quiet => {}
                OutputMode::Text => {
                    if items.is_empty() {
                        println!("No rules configured");
                    }
                    for (i, item) in items.iter().enumerate() {
                        let state = if item.is_active { "" } else { " (inactive)" };
                        println!(
                            "{:>3}. {} [{}] -> {}{}",
                            i + 1,
                            item.name,
                            item.operator,
                            item.application,
                            state
                        );
                    }
                }
            }
            Ok(())
        }

        RulesCommands::Show { rule } => {
            let rule = lookup_rule(&store, &rule, cli_mode)?;
            let apps = store.applications()?;
            let summary = RuleData::new(&rule, &apps);
            let launch = match store.application(&rule.application)? {
                Some(app) => LaunchRequest::for_rule(&rule, &app, "<url>")?
                    .command_line(),
                None => String::new(),
            };

            match cli_mode {
                OutputMode::Json => {
                    let conditions = rule
                        .conditions
                        .iter()
                        .map(|c| ConditionData {
                            operand: c.operand.clone(),
                            operator: c.operator.clone(),
                            text: c.text.clone(),
                            is_active: c.is_active,
                        })
                        .collect();
                    output::print_json(&RuleDetail {
                        id: summary.id,
                        name: summary.name,
                        is_active: summary.is_active,
                        operator: summary.operator,
                        application: summary.application,
                        conditions,
                        launch,
                    });
                }
                OutputMode::Quiet => {}
                _ => {
                    let state = if rule.is_active { "active" } else { "inactive" };
                    println!("{} ({})", rule.name, state);
                    println!("  id:          {}", rule.id);
                    println!("  application: {}", summary.application);
                    println!("  match:       {}", rule.operator);
                    if !launch.is_empty() {
                        println!("  launch:      {}", launch);
                    }
                    println!("  conditions:");
                    for condition in &rule.conditions {
                        println!("    - {}", condition);
                    }
                }
            }
            Ok(())
        }

        RulesCommands::Enable { rule } => set_rule_active(&mut store, &rule, true, cli_mode),
        RulesCommands::Disable { rule } => set_rule_active(&mut store, &rule, false, cli_mode),

        RulesCommands::Remove { rule } => {
            let rule = lookup_rule(&store, &rule, cli_mode)?;
            let data = RuleData::new(&rule, &store.applications()?);
            store.delete_rule(&rule.id)?;
            match cli_mode {
                OutputMode::Json => output::print_json(&data),
                OutputMode::Quiet => {}
                _ => println!("Removed rule '{}'", rule.name),
            }
            Ok(())
        }

        RulesCommands::Add {
            name,
            app,
            any,
            conditions,
            new_instance,
            background,
            fresh,
            use_executable,
            args,
            inactive,
        } => {
            let app = lookup_app(&store, &app, cli_mode)?;
            let conditions = conditions
                .iter()
                .map(|c| parse_condition_arg(c))
                .collect::<Result<Vec<_>>>()
                .map_err(usage)?;

            let mode = if any { MatchMode::Any } else { MatchMode::All };
            let mut rule = Rule::new(name, app.id.clone(), mode, conditions);
            rule.is_active = !inactive;
            rule.open_new_instance = new_instance;
            rule.open_not_foreground = background;
            rule.open_fresh = fresh;
            rule.use_app_executable = use_executable;
            rule.open_args = args.unwrap_or_default();

            // reject arguments that can't be split before saving them
            launcher::split_args(&rule.open_args).map_err(usage)?;

            let rule = store.create_rule(rule)?;
            match cli_mode {
                OutputMode::Json => {
                    output::print_json(&RuleData::new(&rule, &store.applications()?))
                }
                OutputMode::Quiet => {}
                _ => println!(
                    "Added rule '{}' ({}) -> {}",
                    rule.name,
                    rule.id,
                    app.label()
                ),
            }
            Ok(())
        }
    }
}

fn set_rule_active(
    store: &mut ConfigStore,
    query: &str,
    active: bool,
    mode: OutputMode,
) -> Result<()> {
    let rule = lookup_rule(store, query, mode)?;
    let rule = store.set_rule_active(&rule.id, active)?;

    match mode {
        OutputMode::Json => {
            output::print_json(&RuleData::new(&rule, &store.applications()?))
        }
        OutputMode::Quiet => {}
        _ => {
            let state = if active { "Enabled" } else { "Disabled" };
            println!("{} rule '{}'", state, rule.name);
        }
    }
    Ok(())
}

fn apps_command(config_path: Option<&Path>, command: AppsCommands, flags: Flags) -> Result<()> {
    let mut store = ConfigStore::open(config_path)?;
    let cli_mode = flags.mode();

    match command {
        AppsCommands::List { names } => {
            let items: Vec<AppData> = store.applications()?.iter().map(AppData::from).collect();

            match flags.list_mode(names, false) {
                OutputMode::Names => {
                    for item in &items {
                        println!("{}", item.name);
                    }
                }
                OutputMode::Json => output::print_json(&ListResponse { items }),
                OutputMode::Quiet => {}
                _ => {
                    if items.is_empty() {
                        println!("No applications configured");
                    }
                    for item in &items {
                        let default = if item.is_default { " (default)" } else { "" };
                        println!("{} [{}] {}{}", item.name, item.id, item.identifier, default);
                    }
                }
            }
            Ok(())
        }

        AppsCommands::Default { app } => {
            let app = lookup_app(&store, &app, cli_mode)?;
            store.set_default_application(&app.id)?;
            match cli_mode {
                OutputMode::Json => output::print_json(&AppData::from(&app)),
                OutputMode::Quiet => {}
                _ => println!("Default application: {}", app.label()),
            }
            Ok(())
        }
    }
}

fn config_command(
    config_path: Option<&Path>,
    command: ConfigCommands,
    flags: Flags,
) -> Result<()> {
    let mode = flags.mode();

    match command {
        ConfigCommands::Show => {
            let config = config::load(config_path)?;
            let json =
                serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
            println!("{}", json);
            Ok(())
        }
        ConfigCommands::Path => {
            let path = config::get_config_path(config_path)?;
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Set { key, value } => {
            let mut config = config::load(config_path)?;
            config::set_value(&mut config, &key, &value).map_err(usage)?;
            config::save(&config, config_path)?;
            if !mode.is_quiet() {
                println!("Set {} = {}", key, value);
            }
            Ok(())
        }
        ConfigCommands::Reset => {
            let config = Config::default();
            config::save(&config, config_path)?;
            if !mode.is_quiet() {
                println!("Configuration reset to defaults");
            }
            Ok(())
        }
        ConfigCommands::Default => {
            let config = config::default_with_examples();
            let json =
                serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
            println!("{}", json);
            Ok(())
        }
        ConfigCommands::Verify => {
            let path = config::get_config_path(config_path)?;
            let report = config::verify(&path)?;

            match mode {
                OutputMode::Json => output::print_json(&VerifyData {
                    path: path.display().to_string(),
                    valid: report.is_ok(),
                    errors: report.errors.clone(),
                    warnings: report.warnings.clone(),
                }),
                OutputMode::Quiet => {}
                _ => {
                    if report.is_ok() {
                        println!("✓ Configuration is valid: {}", path.display());
                    } else {
                        println!(
                            "✗ Configuration has {} error(s): {}",
                            report.errors.len(),
                            path.display()
                        );
                        println!();
                        for error in &report.errors {
                            println!("  - {}", error);
                        }
                    }
                    if !report.warnings.is_empty() {
                        println!();
                        for warning in &report.warnings {
                            println!("  warning: {}", warning);
                        }
                    }
                }
            }

            if report.is_ok() {
                Ok(())
            } else {
                Err(anyhow!("configuration validation failed"))
            }
        }
    }
}

fn print_operands(mode: OutputMode) {
    let items = conditions::operand_table();
    match mode {
        OutputMode::Json => output::print_json(&ListResponse { items }),
        OutputMode::Quiet => {}
        _ => {
            for item in &items {
                println!("{:<8}{}", item.operand, item.operators.join(", "));
            }
        }
    }
}

/// global output flags, kept after the command is moved out of `Cli`
#[derive(Clone, Copy)]
struct Flags {
    json: bool,
    no_json: bool,
    quiet: bool,
}

impl Flags {
    fn mode(&self) -> OutputMode {
        self.list_mode(false, false)
    }

    fn list_mode(&self, names: bool, format: bool) -> OutputMode {
        OutputMode::from_flags(self.json, self.no_json, self.quiet, names, format)
    }
}

pub fn execute(cli: Cli) -> Result<()> {
    let flags = Flags {
        json: cli.json,
        no_json: cli.no_json,
        quiet: cli.quiet,
    };
    let config_path = cli.config.as_deref();
    let output_mode = flags.mode();

    match cli.command {
        Commands::Open { url, dry_run } => {
            let url = resolve_target(&url)?;
            open(config_path, &url, false, dry_run, output_mode)
        }

        Commands::OpenFile { path, dry_run } => {
            let path = if path.is_absolute() {
                path
            } else {
                std::env::current_dir()
                    .context("failed to resolve current directory")?
                    .join(path)
            };
            open(
                config_path,
                &path.to_string_lossy(),
                true,
                dry_run,
                output_mode,
            )
        }

        Commands::Test {
            url,
            rules,
            all,
            explain,
        } => {
            let url = resolve_target(&url)?;
            test_url(config_path, &url, &rules, all, explain, output_mode)
        }

        Commands::Operands => {
            print_operands(output_mode);
            Ok(())
        }

        Commands::Rules { command } => rules_command(config_path, command, flags),
        Commands::Apps { command } => apps_command(config_path, command, flags),
        Commands::Config { command } => config_command(config_path, command, flags),

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "bdisp", &mut std::io::stdout());
            Ok(())
        }
    }
}
