// integration tests for the apps command

use crate::common::*;

#[test]
fn test_apps_list_json() {
    let config = TestConfig::examples();
    let (output, json) = run_json(&config.path, &["apps", "list"]);

    assert!(output.status.success());
    let items = json["result"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["name"], "Safari");
    assert_eq!(items[0]["is_default"], true);
    assert_eq!(items[3]["name"], "Google Chrome");
}

#[test]
fn test_apps_list_text_marks_default() {
    let config = TestConfig::examples();
    let output = run_text(&config.path, &["apps", "list"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Safari [Cat1TxlqAgair0BQ] com.apple.Safari (default)"));
}

#[test]
fn test_apps_default_changes_fallback() {
    let config = TestConfig::examples();
    let output = run_text(&config.path, &["apps", "default", "firefox"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Default application: Firefox"));

    let saved = config.load();
    let defaults: Vec<&str> = saved
        .applications
        .iter()
        .filter(|a| a.is_default)
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(defaults, ["Firefox"]);

    let output = run_text(&config.path, &["open", "--dry-run", "https://example.com/"]);
    assert_eq!(
        stdout(&output).trim(),
        "open -b org.mozilla.firefox https://example.com/"
    );
}

#[test]
fn test_apps_default_unknown() {
    let config = TestConfig::examples();
    let (output, json) = run_json(&config.path, &["apps", "default", "Operaa"]);

    assert_eq!(output.status.code(), Some(7));
    assert_eq!(json["error"]["code"], -32007);
    assert_eq!(json["error"]["data"]["suggestions"][0], "Opera");
}
