//! data access for applications, rules and preferences
//!
//! the dispatcher only talks to the [`Store`] trait. [`ConfigStore`] keeps
//! the records in the config file (or only in memory when built from a
//! [`Config`] value).

use anyhow::Result;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::{self, Application, Config, Rule, Settings};

const ID_LEN: usize = 16;

/// record-level failures callers may want to tell apart
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("rule not found: {0}")]
    RuleNotFound(String),

    #[error("application not found: {0}")]
    ApplicationNotFound(String),

    #[error("invalid rule '{name}': {reason}")]
    InvalidRule { name: String, reason: String },

    #[error("application '{name}' is used by rule '{rule}'")]
    ApplicationInUse { name: String, rule: String },
}

/// create/read/update/delete over the three record kinds
pub trait Store {
    fn applications(&self) -> Result<Vec<Application>>;
    fn application(&self, id: &str) -> Result<Option<Application>>;
    fn create_application(&mut self, app: Application) -> Result<Application>;
    fn update_application(&mut self, app: Application) -> Result<Application>;
    fn delete_application(&mut self, id: &str) -> Result<()>;
    /// mark `id` as the only default application
    fn set_default_application(&mut self, id: &str) -> Result<()>;

    /// the default application, unless it has been deactivated
    fn default_application(&self) -> Result<Option<Application>> {
        Ok(self
            .applications()?
            .into_iter()
            .find(|a| a.is_default && a.is_active))
    }

    /// all rules in evaluation order
    fn rules(&self) -> Result<Vec<Rule>>;
    /// look a rule up by id, falling back to its name
    fn rule(&self, id_or_name: &str) -> Result<Option<Rule>>;
    fn create_rule(&mut self, rule: Rule) -> Result<Rule>;
    fn update_rule(&mut self, rule: Rule) -> Result<Rule>;
    fn delete_rule(&mut self, id: &str) -> Result<()>;

    /// active rules in evaluation order
    fn active_rules(&self) -> Result<Vec<Rule>> {
        Ok(self.rules()?.into_iter().filter(|r| r.is_active).collect())
    }

    fn set_rule_active(&mut self, id_or_name: &str, active: bool) -> Result<Rule> {
        let mut rule = self
            .rule(id_or_name)?
            .ok_or_else(|| StoreError::RuleNotFound(id_or_name.to_string()))?;
        rule.is_active = active;
        self.update_rule(rule)
    }

    fn preferences(&self) -> Result<Settings>;
    fn set_preference(&mut self, key: &str, value: &str) -> Result<Settings>;
}

/// store backed by the config document
#[derive(Debug, Clone)]
pub struct ConfigStore {
    config: Config,
    path: Option<PathBuf>,
}

impl ConfigStore {
    /// load from the resolved config path; mutations are written back
    pub fn open(path_override: Option<&Path>) -> Result<Self> {
        let path = config::get_config_path(path_override)?;
        let config = config::load(Some(&path))?;
        Ok(Self {
            config,
            path: Some(path),
        })
    }

    /// keep records in memory only
    pub fn in_memory(config: Config) -> Self {
        Self { config, path: None }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn persist(&self) -> Result<()> {
        if let Some(path) = &self.path {
            config::save(&self.config, Some(path))?;
        }
        Ok(())
    }

    fn rule_index(&self, id: &str) -> Option<usize> {
        self.config.rules.iter().position(|r| r.id == id)
    }

    fn app_index(&self, id: &str) -> Option<usize> {
        self.config.applications.iter().position(|a| a.id == id)
    }

    fn validate_rule(&self, rule: &Rule) -> Result<()> {
        let invalid = |reason: String| StoreError::InvalidRule {
            name: rule.name.clone(),
            reason,
        };

        if rule.name.trim().is_empty() {
            return Err(invalid("name is required".into()).into());
        }
        if rule.conditions.is_empty() {
            return Err(invalid("at least one condition is required".into()).into());
        }
        if let Some(other) = self
            .config
            .rules
            .iter()
            .find(|r| r.name == rule.name && r.id != rule.id)
        {
            return Err(invalid(format!("name already used by rule {}", other.id)).into());
        }
        if self.app_index(&rule.application).is_none() {
            return Err(StoreError::ApplicationNotFound(rule.application.clone()).into());
        }
        for condition in &rule.conditions {
            if condition.parsed_operand().is_none() {
                return Err(invalid(format!("unknown operand '{}'", condition.operand)).into());
            }
            if condition.parsed_operator().is_none() {
                return Err(invalid(format!("unknown operator '{}'", condition.operator)).into());
            }
        }
        Ok(())
    }
}

impl Store for ConfigStore {
    fn applications(&self) -> Result<Vec<Application>> {
        Ok(self.config.applications.clone())
    }

    fn application(&self, id: &str) -> Result<Option<Application>> {
        Ok(self.app_index(id).map(|i| self.config.applications[i].clone()))
    }

    fn create_application(&mut self, mut app: Application) -> Result<Application> {
        if app.id.is_empty() {
            app.id = generate_id();
        }
        if app.is_default {
            for other in &mut self.config.applications {
                other.is_default = false;
            }
        }
        self.config.applications.push(app.clone());
        self.persist()?;
        log::info!("added application {}", app.name);
        Ok(app)
    }

    fn update_application(&mut self, app: Application) -> Result<Application> {
        let index = self
            .app_index(&app.id)
            .ok_or_else(|| StoreError::ApplicationNotFound(app.id.clone()))?;
        if app.is_default {
            for other in &mut self.config.applications {
                other.is_default = false;
            }
        }
        self.config.applications[index] = app.clone();
        self.persist()?;
        Ok(app)
    }

    fn delete_application(&mut self, id: &str) -> Result<()> {
        let index = self
            .app_index(id)
            .ok_or_else(|| StoreError::ApplicationNotFound(id.to_string()))?;
        if let Some(rule) = self.config.rules.iter().find(|r| r.application == id) {
            return Err(StoreError::ApplicationInUse {
                name: self.config.applications[index].name.clone(),
                rule: rule.name.clone(),
            }
            .into());
        }
        let app = self.config.applications.remove(index);
        self.persist()?;
        log::info!("removed application {}", app.name);
        Ok(())
    }

    fn set_default_application(&mut self, id: &str) -> Result<()> {
        if self.app_index(id).is_none() {
            return Err(StoreError::ApplicationNotFound(id.to_string()).into());
        }
        for app in &mut self.config.applications {
            app.is_default = app.id == id;
        }
        self.persist()
    }

    fn rules(&self) -> Result<Vec<Rule>> {
        Ok(self.config.rules.clone())
    }

    fn rule(&self, id_or_name: &str) -> Result<Option<Rule>> {
        let rule = self
            .config
            .rules
            .iter()
            .find(|r| r.id == id_or_name)
            .or_else(|| self.config.rules.iter().find(|r| r.name == id_or_name));
        Ok(rule.cloned())
    }

    fn create_rule(&mut self, mut rule: Rule) -> Result<Rule> {
        if rule.id.is_empty() {
            rule.id = generate_id();
        }
        self.validate_rule(&rule)?;
        self.config.rules.push(rule.clone());
        self.persist()?;
        log::info!("added rule {}", rule.name);
        Ok(rule)
    }

    fn update_rule(&mut self, rule: Rule) -> Result<Rule> {
        let index = self
            .rule_index(&rule.id)
            .ok_or_else(|| StoreError::RuleNotFound(rule.id.clone()))?;
        self.validate_rule(&rule)?;
        self.config.rules[index] = rule.clone();
        self.persist()?;
        Ok(rule)
    }

    fn delete_rule(&mut self, id: &str) -> Result<()> {
        let index = self
            .rule_index(id)
            .ok_or_else(|| StoreError::RuleNotFound(id.to_string()))?;
        let rule = self.config.rules.remove(index);
        self.persist()?;
        log::info!("removed rule {}", rule.name);
        Ok(())
    }

    fn preferences(&self) -> Result<Settings> {
        Ok(self.config.settings.clone())
    }

    fn set_preference(&mut self, key: &str, value: &str) -> Result<Settings> {
        let key = if key.starts_with("settings.") {
            key.to_string()
        } else {
            format!("settings.{}", key)
        };
        config::set_value(&mut self.config, &key, value)?;
        self.persist()?;
        Ok(self.config.settings.clone())
    }
}

/// random alphanumeric record id
pub fn generate_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LEN)
        .map(char::from)
        .collect()
}
