// integration tests for the config command

use crate::common::*;
use std::fs;
use std::process::Command;

#[test]
fn test_config_path_uses_override() {
    let config = TestConfig::examples();
    let output = run_text(&config.path, &["config", "path"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), config.path.to_str().unwrap());
}

#[test]
fn test_config_path_uses_env_var() {
    let config = TestConfig::examples();
    let output = Command::new(bdisp_binary_path())
        .args(["--no-json", "config", "path"])
        .env("BDISP_CONFIG", &config.path)
        .output()
        .expect("Failed to run bdisp");

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), config.path.to_str().unwrap());
}

#[test]
fn test_config_env_var_is_used_for_rules() {
    let config = TestConfig::examples();
    let output = Command::new(bdisp_binary_path())
        .args(["rules", "list", "--names"])
        .env("BDISP_CONFIG", &config.path)
        .output()
        .expect("Failed to run bdisp");

    assert!(output.status.success());
    assert_eq!(stdout(&output).lines().count(), 4);
}

#[test]
fn test_missing_config_is_created() {
    let config = TestConfig::missing();
    assert!(!config.path.exists());

    let output = run_text(&config.path, &["config", "show"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(config.path.exists());

    let saved = config.load();
    assert!(saved.rules.is_empty());
    assert!(saved.settings.enabled);
    assert!(saved.settings.use_default);
}

#[test]
fn test_config_set_persists() {
    let config = TestConfig::examples();
    let output = run_text(
        &config.path,
        &["config", "set", "settings.strict_literals", "yes"],
    );

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "Set settings.strict_literals = yes");
    assert!(config.load().settings.strict_literals);
}

#[test]
fn test_config_set_invalid() {
    let config = TestConfig::examples();

    let output = run_text(&config.path, &["config", "set", "settings.fuzzy", "true"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("Unknown config key"));

    let output = run_text(&config.path, &["config", "set", "settings.enabled", "maybe"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("Invalid boolean value"));
}

#[test]
fn test_config_reset() {
    let config = TestConfig::examples();
    let output = run_text(&config.path, &["config", "reset"]);

    assert!(output.status.success());
    let saved = config.load();
    assert!(saved.rules.is_empty());
    assert!(saved.applications.is_empty());
}

#[test]
fn test_config_default_prints_examples() {
    let config = TestConfig::missing();
    let output = run_text(&config.path, &["config", "default"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["rules"].as_array().unwrap().len(), 4);
    assert_eq!(json["applications"][0]["identifier"], "com.apple.Safari");
    // printing the example doesn't write it
    assert!(!config.path.exists());
}

#[test]
fn test_config_verify_valid() {
    let config = TestConfig::examples();
    let output = run_text(&config.path, &["config", "verify"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("✓ Configuration is valid"));
}

#[test]
fn test_config_verify_reports_errors() {
    let mut cfg = browser_dispatcher::config::default_with_examples();
    cfg.rules[0].conditions[0].operator = "starts".into();
    cfg.rules[1].application = "nope".into();
    let config = TestConfig::with(&cfg);

    let output = run_text(&config.path, &["config", "verify"]);
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("✗ Configuration has 2 error(s)"));
    assert!(out.contains("rules[0].conditions[0]: unknown operator 'starts'"));
    assert!(out.contains("rules[1]: unknown application 'nope'"));
}

#[test]
fn test_config_verify_json() {
    let config = TestConfig::examples();
    let (output, json) = run_json(&config.path, &["config", "verify"]);

    assert!(output.status.success());
    assert_eq!(json["result"]["valid"], true);
    assert!(json["result"]["errors"].as_array().unwrap().is_empty());
}

#[test]
fn test_config_verify_invalid_json() {
    let config = TestConfig::raw("{ rules: [");
    let output = run_text(&config.path, &["config", "verify"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("invalid JSON"));
}

#[test]
fn test_config_accepts_comments() {
    let cfg = browser_dispatcher::config::default_with_examples();
    let json = serde_json::to_string_pretty(&cfg).unwrap();
    let content = format!("// browser rules\n{}", json);
    let config = TestConfig::raw(&content);

    let output = run_bdisp(&config.path, &["rules", "list", "--names"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).lines().next(), Some("Integrations"));

    // the file is left untouched by read-only commands
    assert_eq!(fs::read_to_string(&config.path).unwrap(), content);
}
