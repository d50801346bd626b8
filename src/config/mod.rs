mod schema;

pub use schema::{Application, Config, Rule, Settings};

use anyhow::{anyhow, Context, Result};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use strsim::levenshtein;

use crate::conditions::{CompiledOperator, Condition, MatchMode, Operand, Operator};

const CONFIG_ENV_VAR: &str = "BDISP_CONFIG";

/// resolve the config file: explicit override, then `BDISP_CONFIG`, then
/// `~/.bdisp/config.json`
pub fn get_config_path(path_override: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = path_override {
        return Ok(path.to_path_buf());
    }

    if let Ok(path) = env::var(CONFIG_ENV_VAR) {
        return Ok(PathBuf::from(shellexpand::tilde(path.trim()).to_string()));
    }

    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
    Ok(home.join(".bdisp").join("config.json"))
}

/// load the config, writing defaults when the file does not exist yet
pub fn load(path_override: Option<&Path>) -> Result<Config> {
    let path = get_config_path(path_override)?;

    if !path.exists() {
        let config = Config::default();
        save(&config, path_override)?;
        log::info!("created default config at {}", path.display());
        return Ok(config);
    }

    read(&path)
}

fn read(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    // json5 accepts plain JSON plus comments and trailing commas
    let config: Config = json5::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

pub fn save(config: &Config, path_override: Option<&Path>) -> Result<()> {
    let path = get_config_path(path_override)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(&path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    Ok(())
}

/// problems found in a config; warnings do not stop evaluation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Verification {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Verification {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// verify the configuration file at `path`
pub fn verify(path: &Path) -> Result<Verification> {
    if !path.exists() {
        return Err(anyhow!("config file not found: {}", path.display()));
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: Config = match json5::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            return Err(anyhow!("invalid JSON: {}", e));
        }
    };

    Ok(verify_config(&config))
}

pub fn verify_config(config: &Config) -> Verification {
    let mut report = Verification::default();

    let mut app_ids = HashSet::new();
    for (i, app) in config.applications.iter().enumerate() {
        let prefix = format!("applications[{}]", i);
        if app.id.is_empty() {
            report.errors.push(format!("{}: missing id", prefix));
        } else if !app_ids.insert(app.id.as_str()) {
            report
                .errors
                .push(format!("{}: duplicate id '{}'", prefix, app.id));
        }
        if app.identifier.is_empty() {
            report
                .errors
                .push(format!("{}: '{}' has no bundle identifier", prefix, app.name));
        }
    }

    let defaults = config.applications.iter().filter(|a| a.is_default).count();
    if defaults > 1 {
        report.errors.push(format!(
            "applications: {} applications are marked as default, expected one",
            defaults
        ));
    } else if defaults == 0 && !config.applications.is_empty() {
        report
            .warnings
            .push("applications: no default application".to_string());
    } else if let Some(app) = config
        .applications
        .iter()
        .find(|a| a.is_default && !a.is_active)
    {
        report.warnings.push(format!(
            "applications: default application '{}' is inactive and won't be used",
            app.name
        ));
    }

    let mut names = HashSet::new();
    for (i, rule) in config.rules.iter().enumerate() {
        let prefix = format!("rules[{}]", i);

        if rule.name.trim().is_empty() {
            report.errors.push(format!("{}: missing name", prefix));
        } else if !names.insert(rule.name.as_str()) {
            report
                .errors
                .push(format!("{}: duplicate rule name '{}'", prefix, rule.name));
        }

        if rule.conditions.is_empty() {
            report
                .errors
                .push(format!("{}: rule '{}' has no conditions", prefix, rule.name));
        }

        if !config.applications.iter().any(|a| a.id == rule.application) {
            report.errors.push(format!(
                "{}: unknown application '{}'",
                prefix, rule.application
            ));
        }

        for (j, condition) in rule.conditions.iter().enumerate() {
            let prefix = format!("{}.conditions[{}]", prefix, j);
            verify_condition(condition, &prefix, &config.settings, &mut report);
        }
    }

    report
}

fn verify_condition(
    condition: &Condition,
    prefix: &str,
    settings: &Settings,
    report: &mut Verification,
) {
    let operand = condition.parsed_operand();
    let operator = condition.parsed_operator();

    if operand.is_none() {
        let ids: Vec<&str> = Operand::ACTIVE.iter().map(Operand::as_str).collect();
        report.errors.push(unknown(prefix, "operand", &condition.operand, &ids));
    }
    if operator.is_none() {
        let ids: Vec<&str> = Operator::ALL.iter().map(Operator::as_str).collect();
        report
            .errors
            .push(unknown(prefix, "operator", &condition.operator, &ids));
    }

    let (Some(operand), Some(operator)) = (operand, operator) else {
        return;
    };

    if let Err(e) = CompiledOperator::new(operator, &condition.text, settings.strict_literals) {
        report.errors.push(format!("{}: {}", prefix, e));
    }

    if !operand.is_active() {
        report.warnings.push(format!(
            "{}: operand '{}' is reserved and never matches",
            prefix, operand
        ));
    } else if !operand.supports(operator) {
        report.warnings.push(format!(
            "{}: operator '{}' is not offered for operand '{}'",
            prefix, operator, operand
        ));
    }
}

fn unknown(prefix: &str, kind: &str, value: &str, valid: &[&str]) -> String {
    match did_you_mean(value, valid.iter().copied()) {
        Some(s) => format!(
            "{}: unknown {} '{}' (did you mean '{}'?)",
            prefix, kind, value, s
        ),
        None => format!(
            "{}: unknown {} '{}': valid values are {}",
            prefix,
            kind,
            value,
            valid.join(", ")
        ),
    }
}

/// closest candidate within edit distance 2, ignoring case
pub fn did_you_mean<'a>(
    input: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    let input = input.to_lowercase();
    candidates
        .into_iter()
        .map(|c| (c, levenshtein(&input, &c.to_lowercase())))
        .filter(|(_, distance)| *distance <= 2)
        .min_by_key(|(_, distance)| *distance)
        .map(|(c, _)| c)
}

pub fn set_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["settings", "enabled"] => {
            config.settings.enabled = parse_bool(value)?;
        }
        ["settings", "use_default"] => {
            config.settings.use_default = parse_bool(value)?;
        }
        ["settings", "skip_inactive_conditions"] => {
            config.settings.skip_inactive_conditions = parse_bool(value)?;
        }
        ["settings", "strict_literals"] => {
            config.settings.strict_literals = parse_bool(value)?;
        }
        _ => {
            return Err(anyhow!(
                "Unknown config key: {}. Valid keys: settings.enabled, settings.use_default, settings.skip_inactive_conditions, settings.strict_literals",
                key
            ));
        }
    }

    Ok(())
}

/// generates a default config with example applications and rules
pub fn default_with_examples() -> Config {
    let app = |id: &str, name: &str, identifier: &str, is_default: bool| {
        let mut app = Application::new(name, identifier);
        app.id = id.to_string();
        app.is_default = is_default;
        app
    };

    let host = |op: Operator, text: &str| Condition::new(Operand::Host, op, text);

    let mut work = Rule::new(
        "Integrations",
        "Cat1TxlqAgair0BQ",
        MatchMode::Any,
        vec![
            host(Operator::Contains, "salesforce.com"),
            host(Operator::Contains, "developerforce.com"),
            host(Operator::Contains, "service-now.com"),
            host(Operator::Is, "my.okta.com"),
            host(Operator::Is, "console.aws.amazon.com"),
        ],
    );
    work.id = "c0GunX7bGVp6azrw".into();

    let mut github = Rule::new(
        "andriyko Github",
        "REIbACm6FRbU1SHH",
        MatchMode::All,
        vec![
            host(Operator::Is, "github.com"),
            Condition::new(Operand::Path, Operator::StartsWith, "/andriyko"),
        ],
    );
    github.id = "cxrzMcPAACGvGXtH".into();

    let mut social = Rule::new(
        "Social",
        "AcWgWPZbo7SPP5lY",
        MatchMode::Any,
        vec![
            host(Operator::Is, "facebook.com"),
            host(Operator::Is, "instagram.com"),
            host(Operator::Is, "linkedin.com"),
            host(Operator::Is, "reddit.com"),
        ],
    );
    social.id = "S4H1HASJ8FB41WwQ".into();
    social.open_new_instance = true;
    social.open_args = "-P \"SocialNetworking\"".into();

    let port = |text: &str| Condition::new(Operand::Port, Operator::Is, text);
    let mut local = Rule::new(
        "Local Dev",
        "XlJxf2AIAGFdtZ2J",
        MatchMode::Any,
        vec![port("15672"), port("5555"), port("5601"), port("6543")],
    );
    local.id = "oeJGcxq5zvGAuskW".into();
    local.is_active = false;

    let mut chrome = app("XlJxf2AIAGFdtZ2J", "Chrome", "com.google.Chrome", false);
    chrome.display_name = "Google Chrome".into();
    chrome.executable = "Google Chrome".into();
    chrome.path = "/Applications/Google Chrome.app".into();

    let mut firefox = app("AcWgWPZbo7SPP5lY", "Firefox", "org.mozilla.firefox", false);
    firefox.executable = "firefox".into();

    Config {
        applications: vec![
            app("Cat1TxlqAgair0BQ", "Safari", "com.apple.Safari", true),
            app("REIbACm6FRbU1SHH", "Opera", "com.operasoftware.Opera", false),
            firefox,
            chrome,
        ],
        rules: vec![work, github, social, local],
        settings: Settings::default(),
    }
}

pub fn parse_bool(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(anyhow!(
            "Invalid boolean value: {}. Use true/false, yes/no, 1/0, or on/off",
            value
        )),
    }
}
