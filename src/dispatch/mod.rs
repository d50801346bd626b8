//! per-process dispatch context
//!
//! owns the store and the launcher and decides, for each opened URL or
//! file, which application receives it.

use anyhow::Result;
use serde::Serialize;
use std::fmt;

use crate::conditions::{evaluate_rules, EvalOptions};
use crate::config::{Application, Rule};
use crate::launcher::{LaunchRequest, Launcher};
use crate::store::{Store, StoreError};

/// a matched rule with its application resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleMatch {
    pub rule: Rule,
    pub application: Application,
}

/// why a target is left to the user instead of opened directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptReason {
    /// dispatching is switched off
    Disabled,
    /// no rule matched and falling back to the default is off
    NoMatch,
    /// a fallback was wanted but no default application is configured
    NoDefault,
}

impl fmt::Display for PromptReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptReason::Disabled => write!(f, "dispatching is disabled"),
            PromptReason::NoMatch => write!(f, "no rule matched"),
            PromptReason::NoDefault => write!(f, "no default application configured"),
        }
    }
}

/// what happens to an opened target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Dispatch {
    Rule {
        #[serde(rename = "match")]
        matched: RuleMatch,
        request: LaunchRequest,
    },
    Default {
        application: Application,
        request: LaunchRequest,
    },
    Prompt {
        target: String,
        reason: PromptReason,
    },
}

impl Dispatch {
    pub fn request(&self) -> Option<&LaunchRequest> {
        match self {
            Dispatch::Rule { request, .. } | Dispatch::Default { request, .. } => Some(request),
            Dispatch::Prompt { .. } => None,
        }
    }
}

pub struct Dispatcher<S, L> {
    store: S,
    launcher: L,
}

impl<S: Store, L: Launcher> Dispatcher<S, L> {
    pub fn new(store: S, launcher: L) -> Self {
        Self { store, launcher }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// evaluation options from the stored preferences
    pub fn options(&self) -> Result<EvalOptions> {
        Ok(EvalOptions::from_settings(&self.store.preferences()?))
    }

    /// first active rule matching `url`
    pub fn match_url(&self, url: &str) -> Result<Option<RuleMatch>> {
        let rules = self.store.active_rules()?;
        self.test_url(url, &rules)
    }

    /// evaluate `url` against an explicit rule list without launching
    pub fn test_url(&self, url: &str, rules: &[Rule]) -> Result<Option<RuleMatch>> {
        let opts = self.options()?;
        let Some(rule) = evaluate_rules(rules, url, &opts)? else {
            return Ok(None);
        };
        let application = self.resolve_application(&rule.application)?;
        Ok(Some(RuleMatch {
            rule: rule.clone(),
            application,
        }))
    }

    /// decide what opening `url` should do
    pub fn resolve_url(&self, url: &str) -> Result<Dispatch> {
        let settings = self.store.preferences()?;
        if !settings.enabled {
            return Ok(prompt(url, PromptReason::Disabled));
        }

        if let Some(matched) = self.match_url(url)? {
            if matched.application.is_active {
                let request = LaunchRequest::for_rule(&matched.rule, &matched.application, url)?;
                return Ok(Dispatch::Rule { matched, request });
            }
            log::warn!(
                "[open-url] rule '{}' matched but {} is inactive",
                matched.rule.name,
                matched.application.label()
            );
        }

        if !settings.use_default {
            return Ok(prompt(url, PromptReason::NoMatch));
        }

        self.resolve_default(url)
    }

    /// files skip the rules and go to the default application
    pub fn resolve_file(&self, path: &str) -> Result<Dispatch> {
        self.resolve_default(path)
    }

    pub fn open_url(&self, url: &str) -> Result<Dispatch> {
        let dispatch = self.resolve_url(url)?;
        self.launch(&dispatch)?;
        Ok(dispatch)
    }

    pub fn open_file(&self, path: &str) -> Result<Dispatch> {
        let dispatch = self.resolve_file(path)?;
        self.launch(&dispatch)?;
        Ok(dispatch)
    }

    fn launch(&self, dispatch: &Dispatch) -> Result<()> {
        match dispatch {
            Dispatch::Rule { matched, request } => {
                log::info!(
                    "[open-url] rule '{}' -> {}",
                    matched.rule.name,
                    matched.application.label()
                );
                self.launcher.launch(request)
            }
            Dispatch::Default {
                application,
                request,
            } => {
                log::info!("[open-url] default -> {}", application.label());
                self.launcher.launch(request)
            }
            Dispatch::Prompt { target, reason } => {
                log::info!("[open-url] {}: leaving {} to the user", reason, target);
                Ok(())
            }
        }
    }

    fn resolve_default(&self, target: &str) -> Result<Dispatch> {
        match self.store.default_application()? {
            Some(application) => {
                let request = LaunchRequest::for_application(&application, target)?;
                Ok(Dispatch::Default {
                    application,
                    request,
                })
            }
            None => {
                log::warn!("[open-url] no default application to open {}", target);
                Ok(prompt(target, PromptReason::NoDefault))
            }
        }
    }

    fn resolve_application(&self, id: &str) -> Result<Application> {
        self.store
            .application(id)?
            .ok_or_else(|| StoreError::ApplicationNotFound(id.to_string()).into())
    }
}

fn prompt(target: &str, reason: PromptReason) -> Dispatch {
    Dispatch::Prompt {
        target: target.to_string(),
        reason,
    }
}
