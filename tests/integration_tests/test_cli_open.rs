// integration tests for open and open-file (always with --dry-run)

use crate::common::*;

#[test]
fn test_open_matching_rule_prints_command() {
    let config = TestConfig::examples();
    let output = run_text(&config.path, &["open", "--dry-run", "https://reddit.com/r/rust"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output).trim(),
        "open -b org.mozilla.firefox -n https://reddit.com/r/rust --args -P SocialNetworking"
    );
}

#[test]
fn test_open_falls_back_to_default() {
    let config = TestConfig::examples();
    let output = run_text(&config.path, &["open", "--dry-run", "https://example.com/"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        "open -b com.apple.Safari https://example.com/"
    );
}

#[test]
fn test_open_json_outcome() {
    let config = TestConfig::examples();
    let (output, json) = run_json(&config.path, &["open", "--dry-run", "https://github.com/andriyko"]);

    assert!(output.status.success());
    let result = &json["result"];
    assert_eq!(result["outcome"], "rule");
    assert_eq!(result["match"]["rule"]["name"], "andriyko Github");
    assert_eq!(result["match"]["application"]["identifier"], "com.operasoftware.Opera");
    assert_eq!(result["request"]["app"]["by"], "bundle_id");
    assert_eq!(result["request"]["app"]["value"], "com.operasoftware.Opera");

    let (_, json) = run_json(&config.path, &["open", "--dry-run", "https://example.com/"]);
    assert_eq!(json["result"]["outcome"], "default");
    assert_eq!(json["result"]["application"]["name"], "Safari");
}

#[test]
fn test_open_without_fallback_prompts() {
    let config = TestConfig::examples();
    let output = run_text(&config.path, &["config", "set", "settings.use_default", "false"]);
    assert!(output.status.success());

    let output = run_text(&config.path, &["open", "--dry-run", "https://example.com/"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Not opening https://example.com/: no rule matched"));

    let (output, json) = run_json(&config.path, &["open", "--dry-run", "https://example.com/"]);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(json["result"]["outcome"], "prompt");
    assert_eq!(json["result"]["reason"], "no_match");
}

#[test]
fn test_open_disabled_prompts() {
    let config = TestConfig::examples();
    run_text(&config.path, &["config", "set", "settings.enabled", "off"]);

    let output = run_text(&config.path, &["open", "--dry-run", "https://github.com/andriyko"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("dispatching is disabled"));
}

#[test]
fn test_open_file_uses_default_app() {
    let config = TestConfig::examples();
    let output = run_text(
        &config.path,
        &["open-file", "--dry-run", "/tmp/reddit.com.html"],
    );

    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        "open -b com.apple.Safari /tmp/reddit.com.html"
    );
}

#[test]
fn test_open_quiet_prints_nothing() {
    let config = TestConfig::examples();
    let output = run_bdisp(&config.path, &["-q", "open", "--dry-run", "https://reddit.com/"]);

    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
}
