use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn sheetloc_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("sheetloc"))
}

fn write_project(root: &Path) {
    let sheet = r#"{
  "worksheets": [
    {
      "title": "Main",
      "rows": [
        ["Identifier iOS", "Identifier Android", "en", "de", "Comment"],
        ["greeting", "greeting", "Hello", "Hallo", "Start screen"],
        [null, "apples", "one|%d apple\nother|%d apples", "one|%d Apfel\nother|%d Äpfel"],
        [null, "weekdays", "[\"Mon\",\"Tue\"]", "[\"Mo\",\"Di\"]"],
        ["ios_only", null, "Only iOS", "Nur iOS"]
      ]
    }
  ]
}"#;
    fs::write(root.join("sheet.json"), sheet).unwrap();
    fs::write(
        root.join("localize.toml"),
        "sheet = \"sheet.json\"\nlanguage_titles = [\"en\", \"de\"]\nlocalization_path = \"res\"\n",
    )
    .unwrap();
}

fn run(root: &Path, args: &[&str]) -> Output {
    let config = root.join("localize.toml");
    sheetloc_cmd()
        .arg("--config")
        .arg(&config)
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_localize_writes_strings_xml() {
    let temp_dir = TempDir::new().unwrap();
    write_project(temp_dir.path());

    let out = run(temp_dir.path(), &["localize"]);
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let english = fs::read_to_string(temp_dir.path().join("res/values/strings.xml")).unwrap();
    assert!(english.contains("<string name=\"greeting\"><![CDATA[Hello]]></string>"));
    let german = fs::read_to_string(temp_dir.path().join("res/values-de/strings.xml")).unwrap();
    assert!(german.contains("<item quantity=\"other\"><![CDATA[%d Äpfel]]></item>"));
    assert!(!german.contains("ios_only"));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("values-de"));
}

#[test]
fn test_check_passes_after_localize() {
    let temp_dir = TempDir::new().unwrap();
    write_project(temp_dir.path());

    assert!(run(temp_dir.path(), &["localize"]).status.success());
    let out = run(temp_dir.path(), &["check"]);
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    assert!(String::from_utf8_lossy(&out.stdout).contains("up-to-date"));
}

#[test]
fn test_check_fails_with_diff_on_drift() {
    let temp_dir = TempDir::new().unwrap();
    write_project(temp_dir.path());

    assert!(run(temp_dir.path(), &["localize"]).status.success());
    let path = temp_dir.path().join("res/values-de/strings.xml");
    let edited = fs::read_to_string(&path).unwrap().replace("Hallo", "Servus");
    fs::write(&path, edited).unwrap();

    let out = run(temp_dir.path(), &["check"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("localizations are not up-to-date"));
    assert!(stderr.contains("(remote)"));
    assert!(stderr.contains("-    <string name=\"greeting\"><![CDATA[Hallo]]></string>"));
    assert!(stderr.contains("+    <string name=\"greeting\"><![CDATA[Servus]]></string>"));
}

#[test]
fn test_show_json_lists_classified_values() {
    let temp_dir = TempDir::new().unwrap();
    write_project(temp_dir.path());

    let out = run(temp_dir.path(), &["show", "--language", "de", "--json"]);
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let values: Value = serde_json::from_slice(&out.stdout).unwrap();
    let values = values.as_array().unwrap();
    let kinds: Vec<_> = values.iter().map(|v| v["kind"].as_str().unwrap()).collect();
    assert_eq!(kinds, vec!["plain", "plural", "array"]);
    assert_eq!(values[0]["identifier"], "greeting");
    assert_eq!(values[0]["comment"], "Start screen");
}

#[test]
fn test_show_ios_platform() {
    let temp_dir = TempDir::new().unwrap();
    write_project(temp_dir.path());

    let out = run(temp_dir.path(), &["show", "-l", "en", "--platform", "ios"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("greeting = Hello"));
    assert!(stdout.contains("ios_only = Only iOS"));
    assert!(!stdout.contains("apples"));
}

#[test]
fn test_missing_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let out = run(temp_dir.path(), &["localize"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("localize.toml"));
}

#[test]
fn test_unknown_language_column_fails_without_output() {
    let temp_dir = TempDir::new().unwrap();
    write_project(temp_dir.path());
    fs::write(
        temp_dir.path().join("localize.toml"),
        "sheet = \"sheet.json\"\nlanguage_titles = [\"en\", \"fr\"]\nlocalization_path = \"res\"\n",
    )
    .unwrap();

    let out = run(temp_dir.path(), &["localize"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("fr"), "stderr: {}", stderr);
    assert!(!temp_dir.path().join("res").exists());
}
