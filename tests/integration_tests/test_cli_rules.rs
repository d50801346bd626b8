// integration tests for the rules command

use crate::common::*;

#[test]
fn test_rules_list_names_in_order() {
    let config = TestConfig::examples();
    let output = run_bdisp(&config.path, &["rules", "list", "--names"]);

    assert!(output.status.success());
    let names: Vec<String> = stdout(&output).lines().map(String::from).collect();
    assert_eq!(
        names,
        ["Integrations", "andriyko Github", "Social", "Local Dev"]
    );
}

#[test]
fn test_rules_list_format() {
    let config = TestConfig::examples();
    let output = run_bdisp(
        &config.path,
        &["rules", "list", "--format", "{name}|{application}|{is_active}"],
    );

    assert!(output.status.success());
    let lines: Vec<String> = stdout(&output).lines().map(String::from).collect();
    assert_eq!(lines[2], "Social|Firefox|true");
    assert_eq!(lines[3], "Local Dev|Google Chrome|false");
}

#[test]
fn test_rules_list_json() {
    let config = TestConfig::examples();
    let (output, json) = run_json(&config.path, &["rules", "list"]);

    assert!(output.status.success());
    let items = json["result"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[1]["id"], "cxrzMcPAACGvGXtH");
    assert_eq!(items[1]["operator"], "all");
    assert_eq!(items[1]["conditions"], 2);
}

#[test]
fn test_rules_list_text() {
    let config = TestConfig::examples();
    let output = run_text(&config.path, &["rules", "list"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("  1. Integrations [any] -> Safari"));
    assert!(out.contains("  4. Local Dev [any] -> Google Chrome (inactive)"));
}

#[test]
fn test_rules_show_json() {
    let config = TestConfig::examples();
    let (output, json) = run_json(&config.path, &["rules", "show", "andriyko Github"]);

    assert!(output.status.success());
    let result = &json["result"];
    assert_eq!(result["application"], "Opera");
    assert_eq!(result["conditions"][1]["operand"], "path");
    assert_eq!(result["conditions"][1]["operator"], "starts_with");
    assert_eq!(result["conditions"][1]["text"], "/andriyko");
    assert_eq!(result["launch"], "open -b com.operasoftware.Opera '<url>'");
}

#[test]
fn test_rules_show_text() {
    let config = TestConfig::examples();
    let output = run_text(&config.path, &["rules", "show", "S4H1HASJ8FB41WwQ"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("Social (active)"));
    assert!(out.contains("- host is \"reddit.com\""));
    assert!(out.contains("--args -P SocialNetworking"));
}

#[test]
fn test_rules_enable_disable_persist() {
    let config = TestConfig::examples();

    let output = run_text(&config.path, &["rules", "enable", "Local Dev"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Enabled rule 'Local Dev'"));
    assert!(config.load().rules[3].is_active);

    let output = run_text(&config.path, &["test", "http://localhost:5601/"]);
    assert!(output.status.success());

    let output = run_text(&config.path, &["rules", "disable", "Local Dev"]);
    assert!(output.status.success());
    assert!(!config.load().rules[3].is_active);
}

#[test]
fn test_rules_add_appends_and_matches() {
    let config = TestConfig::examples();
    let output = run_text(
        &config.path,
        &[
            "rules",
            "add",
            "--name",
            "Work",
            "--app",
            "google chrome",
            "--any",
            "-c",
            "host ends_with .atlassian.net",
            "-c",
            "host is jira.example.com",
            "--background",
            "--args",
            "--profile-directory=\"Profile 2\"",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Added rule 'Work'"));

    let saved = config.load();
    let rule = saved.rules.last().unwrap();
    assert_eq!(rule.name, "Work");
    assert_eq!(rule.id.len(), 16);
    assert_eq!(rule.application, "XlJxf2AIAGFdtZ2J");
    assert_eq!(rule.conditions.len(), 2);
    assert!(rule.open_not_foreground);

    let output = run_text(
        &config.path,
        &["open", "--dry-run", "https://acme.atlassian.net/browse/OPS-1"],
    );
    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        "open -b com.google.Chrome -g https://acme.atlassian.net/browse/OPS-1 --args '--profile-directory=Profile 2'"
    );
}

#[test]
fn test_rules_add_duplicate_name() {
    let config = TestConfig::examples();
    let output = run_text(
        &config.path,
        &["rules", "add", "--name", "Social", "--app", "Safari", "-c", "host is x.com"],
    );

    assert_eq!(output.status.code(), Some(8));
    assert_eq!(config.load().rules.len(), 4);
}

#[test]
fn test_rules_add_unknown_app() {
    let config = TestConfig::examples();
    let output = run_text(
        &config.path,
        &["rules", "add", "--name", "X", "--app", "Safary", "-c", "host is x.com"],
    );

    assert_eq!(output.status.code(), Some(7));
    assert!(stderr(&output).contains("Did you mean 'Safari'?"));
}

#[test]
fn test_rules_add_bad_condition() {
    let config = TestConfig::examples();
    let output = run_text(
        &config.path,
        &["rules", "add", "--name", "X", "--app", "Safari", "-c", "host matches x.com"],
    );

    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("unknown operator 'matches'"));
}

#[test]
fn test_rules_remove() {
    let config = TestConfig::examples();
    let output = run_text(&config.path, &["rules", "remove", "Integrations"]);

    assert!(output.status.success());
    let saved = config.load();
    assert_eq!(saved.rules.len(), 3);
    assert_eq!(saved.rules[0].name, "andriyko Github");
}

#[test]
fn test_rules_not_found() {
    let config = TestConfig::examples();
    let output = run_text(&config.path, &["rules", "show", "Integration"]);

    assert_eq!(output.status.code(), Some(6));
    assert!(stderr(&output).contains("Did you mean 'Integrations'?"));
    assert!(stderr(&output).contains("rule not found: Integration"));
}
