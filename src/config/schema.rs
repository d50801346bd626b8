use serde::{Deserialize, Serialize};

use crate::conditions::{Condition, MatchMode};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub applications: Vec<Application>,
    /// evaluation order: first match wins
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub settings: Settings,
}

/// a browser (or any app) URLs can be handed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub path: String,
    /// executable name inside the bundle, used with `open -a`
    #[serde(default)]
    pub executable: String,
    /// bundle identifier, used with `open -b`
    pub identifier: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Application {
    pub fn new(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: String::new(),
            display_name: name.clone(),
            executable: name.clone(),
            path: format!("/Applications/{}.app", name),
            name,
            identifier: identifier.into(),
            is_default: false,
            is_active: true,
        }
    }

    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
}

/// route matching URLs to an application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub operator: MatchMode,
    pub conditions: Vec<Condition>,
    /// id of the target application
    pub application: String,
    #[serde(default)]
    pub open_new_instance: bool,
    #[serde(default)]
    pub open_not_foreground: bool,
    #[serde(default)]
    pub open_fresh: bool,
    #[serde(default)]
    pub use_app_executable: bool,
    #[serde(default)]
    pub open_args: String,
}

impl Rule {
    /// create an active rule with default launch options
    pub fn new(
        name: impl Into<String>,
        application: impl Into<String>,
        operator: MatchMode,
        conditions: Vec<Condition>,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            is_active: true,
            operator,
            conditions,
            application: application.into(),
            open_new_instance: false,
            open_not_foreground: false,
            open_fresh: false,
            use_app_executable: false,
            open_args: String::new(),
        }
    }
}

/// preferences that steer dispatching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// when off, every URL goes to the picker
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// open unmatched URLs with the default application instead of the picker
    #[serde(default = "default_true")]
    pub use_default: bool,
    /// leave inactive conditions out of rule evaluation
    #[serde(default = "default_true")]
    pub skip_inactive_conditions: bool,
    /// compare starts_with/ends_with literals verbatim
    #[serde(default)]
    pub strict_literals: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            use_default: true,
            skip_inactive_conditions: true,
            strict_literals: false,
        }
    }
}
