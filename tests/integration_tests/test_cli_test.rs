// integration tests for the test command

use crate::common::*;
use browser_dispatcher::conditions::{Condition, MatchMode, Operand, Operator};
use browser_dispatcher::config::{self, Rule};
use std::io::Write;
use std::process::{Command, Stdio};

#[test]
fn test_matching_rule_json() {
    let config = TestConfig::examples();
    let (output, json) = run_json(&config.path, &["test", "https://github.com/andriyko/dotfiles"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(json["jsonrpc"], "2.0");
    assert_eq!(json["result"]["url"], "https://github.com/andriyko/dotfiles");
    assert_eq!(json["result"]["match"]["name"], "andriyko Github");
    assert_eq!(json["result"]["match"]["application"], "Opera");
    assert!(json["result"].get("subject").is_none());
}

#[test]
fn test_matching_rule_text() {
    let config = TestConfig::examples();
    let output = run_text(&config.path, &["test", "https://my.okta.com/app"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        "https://my.okta.com/app -> Safari (rule 'Integrations')"
    );
}

#[test]
fn test_no_match_exit_code() {
    let config = TestConfig::examples();
    let (output, json) = run_json(&config.path, &["test", "https://github.com/someoneelse"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(json["result"]["match"].is_null());
}

#[test]
fn test_no_match_text() {
    let config = TestConfig::examples();
    let output = run_text(&config.path, &["test", "not a url"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("No rule matched not a url"));
}

#[test]
fn test_inactive_rules_need_all_flag() {
    let config = TestConfig::examples();

    let output = run_text(&config.path, &["test", "http://localhost:5601/app/kibana"]);
    assert_eq!(output.status.code(), Some(2));

    let (output, json) = run_json(
        &config.path,
        &["test", "--all", "http://localhost:5601/app/kibana"],
    );
    assert!(output.status.success());
    assert_eq!(json["result"]["match"]["name"], "Local Dev");
    assert_eq!(json["result"]["match"]["application"], "Google Chrome");
}

#[test]
fn test_rule_subset() {
    let config = TestConfig::examples();

    let output = run_text(
        &config.path,
        &["test", "--rule", "Social", "https://github.com/andriyko"],
    );
    assert_eq!(output.status.code(), Some(2));

    let output = run_text(
        &config.path,
        &[
            "test",
            "--rule",
            "Social",
            "--rule",
            "cxrzMcPAACGvGXtH",
            "https://github.com/andriyko",
        ],
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains("andriyko Github"));
}

#[test]
fn test_unknown_rule_suggests_name() {
    let config = TestConfig::examples();
    let (output, json) = run_json(
        &config.path,
        &["test", "--rule", "Socail", "https://reddit.com/"],
    );

    assert_eq!(output.status.code(), Some(6));
    assert_eq!(json["error"]["code"], -32006);
    assert_eq!(json["error"]["data"]["suggestions"][0], "Social");
}

#[test]
fn test_explain_text() {
    let config = TestConfig::examples();
    let output = run_text(
        &config.path,
        &["test", "--explain", "https://github.com:443/andriyko"],
    );

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("host    github.com"));
    assert!(out.contains("port    443"));
    assert!(out.contains("✓ andriyko Github (all)"));
    assert!(out.contains("✓ path starts_with \"/andriyko\""));
    assert!(out.contains("✗ Integrations (any)"));
}

#[test]
fn test_explain_json_includes_subject() {
    let config = TestConfig::examples();
    let (output, json) = run_json(
        &config.path,
        &["test", "--explain", "https://Google.com:443/search?q=rust"],
    );

    assert_eq!(output.status.code(), Some(2));
    let subject = &json["result"]["subject"];
    assert_eq!(subject["host"], "google.com");
    assert_eq!(subject["scheme"], "https:");
    assert_eq!(subject["path"], "/search");
    assert_eq!(subject["port"], "443");
}

#[test]
fn test_explicit_default_port_matches() {
    let mut cfg = config::default_with_examples();
    cfg.rules.push(Rule::new(
        "TLS",
        "XlJxf2AIAGFdtZ2J",
        MatchMode::All,
        vec![Condition::new(Operand::Port, Operator::Is, "443")],
    ));
    let config = TestConfig::with(&cfg);

    let (output, json) = run_json(&config.path, &["test", "https://example.com:443/"]);
    assert!(output.status.success());
    assert_eq!(json["result"]["match"]["name"], "TLS");

    // no explicit port, no match
    let output = run_text(&config.path, &["test", "https://example.com/"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_pattern_is_config_error() {
    let mut cfg = config::default_with_examples();
    cfg.rules.insert(
        0,
        Rule::new(
            "Broken",
            "Cat1TxlqAgair0BQ",
            MatchMode::All,
            vec![Condition::new(Operand::Url, Operator::Regex, "(oops")],
        ),
    );
    let config = TestConfig::with(&cfg);

    let output = run_text(&config.path, &["test", "https://reddit.com/"]);
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("invalid pattern"));

    let (output, json) = run_json(&config.path, &["test", "https://reddit.com/"]);
    assert_eq!(output.status.code(), Some(5));
    assert_eq!(json["error"]["code"], -32005);
}

#[test]
fn test_url_from_stdin() {
    let config = TestConfig::examples();
    let mut child = Command::new(bdisp_binary_path())
        .args(["--config", config.path.to_str().unwrap(), "--no-json", "test", "-"])
        .env_remove("BDISP_CONFIG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to run bdisp");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"https://www.linkedin.com/feed\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    // "www.linkedin.com" is not "linkedin.com"
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("https://www.linkedin.com/feed"));
}
