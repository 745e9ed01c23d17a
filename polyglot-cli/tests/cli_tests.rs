use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn polyglot_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("polyglot"))
}

fn run(dir: &Path, args: &[&str]) -> Output {
    polyglot_cmd()
        .current_dir(dir)
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Creates project `app` with en (default) and de, exporting below `out/`.
fn create_app(dir: &Path) {
    let output = run(
        dir,
        &[
            "new",
            "app",
            "--locales",
            "en,de",
            "--android-output",
            "out/android",
            "--ios-output",
            "out/ios",
        ],
    );
    assert_success(&output);
    let project = dir.join("projects/app");
    fs::write(project.join("strings.en.properties"), "hello=Hi\nbye=Bye\n").unwrap();
    fs::write(project.join("strings.de.properties"), "hello=Hallo\n").unwrap();
    fs::write(
        project.join("plurals.en.properties"),
        "songs.one=%d song\nsongs.other=%d songs\n",
    )
    .unwrap();
}

#[test]
fn test_new_writes_project_settings() {
    let tmp = TempDir::new().unwrap();
    create_app(tmp.path());

    let settings = fs::read_to_string(tmp.path().join("projects/app/project.properties")).unwrap();
    assert!(settings.starts_with("# Project settings for app\n"));
    assert!(settings.contains("defaultLocale=en\n"));
    assert!(settings.contains("locales=en,de\n"));
    assert!(settings.contains("androidOutputUrl=out/android\n"));

    // A second `new` must not overwrite the project.
    let output = run(tmp.path(), &["new", "app"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));
}

#[test]
fn test_generate_android_and_ios() {
    let tmp = TempDir::new().unwrap();
    create_app(tmp.path());

    let output = run(tmp.path(), &["generate", "app"]);
    assert_success(&output);

    let en = fs::read_to_string(tmp.path().join("out/android/values/strings.xml")).unwrap();
    let de = fs::read_to_string(tmp.path().join("out/android/values-de/strings.xml")).unwrap();
    assert!(en.contains(r#"<string name="hello">Hi</string>"#));
    assert!(en.contains(r#"<item quantity="other">%1$d songs</item>"#));
    assert!(de.contains(r#"<string name="hello">Hallo</string>"#));
    assert!(!de.contains("bye"));

    let strings =
        fs::read_to_string(tmp.path().join("out/ios/de.lproj/Localizable.strings")).unwrap();
    assert!(strings.contains(r#""hello" = "Hallo";"#));
    assert!(tmp.path().join("out/ios/en.lproj/Localizable.stringsdict").exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generated 6 file(s), 0 failure(s)"));
}

#[test]
fn test_generate_single_platform() {
    let tmp = TempDir::new().unwrap();
    create_app(tmp.path());

    let output = run(tmp.path(), &["generate", "app", "--platform", "ios"]);
    assert_success(&output);
    assert!(tmp.path().join("out/ios/en.lproj/Localizable.strings").exists());
    assert!(!tmp.path().join("out/android").exists());
}

#[test]
fn test_generate_failure_exits_non_zero() {
    let tmp = TempDir::new().unwrap();
    create_app(tmp.path());
    fs::create_dir_all(tmp.path().join("out")).unwrap();
    fs::write(tmp.path().join("out/android"), "not a folder").unwrap();

    let output = run(tmp.path(), &["generate", "app", "--platform", "android"]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generated 0 file(s), 2 failure(s)"));
}

#[test]
fn test_stats_json() {
    let tmp = TempDir::new().unwrap();
    create_app(tmp.path());

    let output = run(tmp.path(), &["stats", "app", "--json"]);
    assert_success(&output);

    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["summary"]["locales"], 2);
    assert_eq!(v["summary"]["unique_ids"], 3);
    let locales = v["locales"].as_array().unwrap();
    assert_eq!(locales[0]["locale"], "en");
    assert_eq!(locales[0]["completion_percent"], 100.0);
    assert_eq!(locales[1]["locale"], "de");
    assert_eq!(locales[1]["translated"], 1);
    assert_eq!(locales[1]["total"], 3);
}

#[test]
fn test_view_filters() {
    let tmp = TempDir::new().unwrap();
    create_app(tmp.path());

    let output = run(tmp.path(), &["view", "app", "--lang", "de", "--type", "strings"]);
    assert_success(&output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== strings (2) ==="));
    assert!(stdout.contains("de: Hallo"));
    assert!(stdout.contains("de: <missing>"));
    assert!(!stdout.contains("=== plurals"));

    let output = run(tmp.path(), &["view", "app", "--lang", "fr"]);
    assert!(!output.status.success());
}

#[test]
fn test_missing_project_fails() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["generate", "nope"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}

#[test]
fn test_malformed_records_are_logged_not_fatal() {
    let tmp = TempDir::new().unwrap();
    create_app(tmp.path());
    fs::write(
        tmp.path().join("projects/app/arrays.en.properties"),
        "menu.0=File\nmenu.first=Broken\n",
    )
    .unwrap();

    let output = run(tmp.path(), &["generate", "app", "--platform", "android"]);
    assert_success(&output);
    assert!(String::from_utf8_lossy(&output.stderr).contains("skipping record"));
    let en = fs::read_to_string(tmp.path().join("out/android/values/strings.xml")).unwrap();
    assert!(en.contains("<item>File</item>"));
}
