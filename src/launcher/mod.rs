//! hands a URL or file to an application
//!
//! a [`LaunchRequest`] is plain data built from a matched rule or the
//! default application; a [`Launcher`] turns it into a process.

use anyhow::{anyhow, bail, Result};
use serde::Serialize;
use std::cell::RefCell;

use crate::config::{Application, Rule};

const OPEN: &str = "open";

/// how the target application is addressed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum AppRef {
    /// `open -b <bundle identifier>`
    BundleId(String),
    /// `open -a <executable>`
    Executable(String),
}

/// everything needed to open one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchRequest {
    pub target: String,
    pub app: AppRef,
    pub new_instance: bool,
    pub background: bool,
    pub fresh: bool,
    /// passed to the application after `--args`
    pub args: Vec<String>,
}

impl LaunchRequest {
    /// open `target` the way `rule` asks
    pub fn for_rule(rule: &Rule, app: &Application, target: &str) -> Result<Self> {
        let app_ref = if rule.use_app_executable {
            if app.executable.is_empty() {
                bail!("application '{}' has no executable", app.name);
            }
            AppRef::Executable(app.executable.clone())
        } else {
            bundle_ref(app)?
        };

        Ok(Self {
            target: target.to_string(),
            app: app_ref,
            new_instance: rule.open_new_instance,
            background: rule.open_not_foreground,
            fresh: rule.open_fresh,
            args: split_args(&rule.open_args)?,
        })
    }

    /// open `target` with `app` and no extra options
    pub fn for_application(app: &Application, target: &str) -> Result<Self> {
        Ok(Self {
            target: target.to_string(),
            app: bundle_ref(app)?,
            new_instance: false,
            background: false,
            fresh: false,
            args: Vec::new(),
        })
    }

    pub fn program(&self) -> &'static str {
        OPEN
    }

    /// arguments for the `open` command
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::new();

        match &self.app {
            AppRef::BundleId(id) => {
                args.push("-b".to_string());
                args.push(id.clone());
            }
            AppRef::Executable(exe) => {
                args.push("-a".to_string());
                args.push(exe.clone());
            }
        }

        if self.new_instance {
            args.push("-n".to_string());
        }
        if self.background {
            args.push("-g".to_string());
        }
        if self.fresh {
            args.push("-F".to_string());
        }

        args.push(self.target.clone());

        if !self.args.is_empty() {
            args.push("--args".to_string());
            args.extend(self.args.iter().cloned());
        }

        args
    }

    /// the command as it would be typed in a shell
    pub fn command_line(&self) -> String {
        std::iter::once(OPEN.to_string())
            .chain(self.args().iter().map(|a| shell_quote(a)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn bundle_ref(app: &Application) -> Result<AppRef> {
    if app.identifier.is_empty() {
        bail!("application '{}' has no bundle identifier", app.name);
    }
    Ok(AppRef::BundleId(app.identifier.clone()))
}

fn shell_quote(s: &str) -> String {
    let plain = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));
    if plain {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

/// split launch arguments shell-style
///
/// whitespace separates words; single quotes are literal; double quotes
/// (including typographic ones) group words and honor backslash escapes.
pub fn split_args(s: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_word {
                    args.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => current.push(c),
                        None => return Err(anyhow!("unterminated quote in arguments: {}", s)),
                    }
                }
            }
            '"' | '\u{201c}' | '\u{201d}' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') | Some('\u{201c}') | Some('\u{201d}') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped) => current.push(escaped),
                            None => {
                                return Err(anyhow!("unterminated quote in arguments: {}", s))
                            }
                        },
                        Some(c) => current.push(c),
                        None => return Err(anyhow!("unterminated quote in arguments: {}", s)),
                    }
                }
            }
            '\\' => {
                in_word = true;
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }

    if in_word {
        args.push(current);
    }

    Ok(args)
}

/// something that can carry out a launch request
pub trait Launcher {
    fn launch(&self, request: &LaunchRequest) -> Result<()>;
}

/// launches through the macOS `open` command
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenLauncher;

#[cfg(target_os = "macos")]
impl Launcher for OpenLauncher {
    fn launch(&self, request: &LaunchRequest) -> Result<()> {
        use std::process::Command;

        log::debug!("running: {}", request.command_line());

        let status = Command::new(request.program())
            .args(request.args())
            .status()?;

        if !status.success() {
            return Err(anyhow!(
                "Failed to open {} ({})",
                request.target,
                request.command_line()
            ));
        }

        Ok(())
    }
}

#[cfg(not(target_os = "macos"))]
impl Launcher for OpenLauncher {
    fn launch(&self, _request: &LaunchRequest) -> Result<()> {
        Err(anyhow!("Launch is only supported on macOS"))
    }
}

/// records requests instead of launching anything
#[derive(Debug, Default)]
pub struct DryRunLauncher {
    requests: RefCell<Vec<LaunchRequest>>,
}

impl DryRunLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<LaunchRequest> {
        self.requests.borrow().clone()
    }
}

impl Launcher for DryRunLauncher {
    fn launch(&self, request: &LaunchRequest) -> Result<()> {
        log::info!("dry run: {}", request.command_line());
        self.requests.borrow_mut().push(request.clone());
        Ok(())
    }
}
