//! Runs the `scenario-lint` binary against scripts in temporary directories.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const CLEAN: &str = "@<|\nlabel('ch1')\n|>\n<|\nshow('bg', 'room')\n|>\nAlice::“Hello.”\n@<||>\n";
const UNQUOTED: &str = "@<|label('ch1')|>\nBob::Hello.\n@<||>\n";

fn scenario_lint(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_scenario-lint"))
        .args(args)
        .current_dir(dir)
        .env("SCENARIO_LINT_CONFIG_DIR", dir.join("no-global"))
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn clean_script_exits_zero() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("ch1.txt"), CLEAN).unwrap();

    let output = scenario_lint(tmp.path(), &["check", ".", "--format", "compact"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "");
}

#[test]
fn violations_without_fail_on_exit_zero() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("ch1.txt"), UNQUOTED).unwrap();

    let output = scenario_lint(tmp.path(), &["check", ".", "--format", "compact"]);
    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("ch1.txt:2:1: warning [SL203] dialogue missing closing quotation mark"));
    assert!(out.contains("ch1.txt:2:1: warning [SL205] half width punctuation"));
}

#[test]
fn fail_on_sets_exit_status() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("ch1.txt"), UNQUOTED).unwrap();
    fs::write(
        tmp.path().join("scenario-lint.toml"),
        "fail_on = \"warning\"\n",
    )
    .unwrap();

    let output = scenario_lint(tmp.path(), &["check", ".", "--format", "compact"]);
    assert_eq!(output.status.code(), Some(1));

    let output = scenario_lint(
        tmp.path(),
        &["check", ".", "--format", "compact", "--rules", "SL206"],
    );
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn project_config_above_the_script_applies() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join(".git")).unwrap();
    fs::write(tmp.path().join("scenario-lint.toml"), "fail_on = \"warning\"\n").unwrap();
    let chapter = tmp.path().join("scenes/ch1");
    fs::create_dir_all(&chapter).unwrap();
    fs::write(chapter.join("ch1.txt"), UNQUOTED).unwrap();

    let output = scenario_lint(&chapter, &["check", "ch1.txt", "--format", "compact"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn structural_error_exits_two() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("ch1.txt"), "@<|label('ch1')|>\nNo tail.\n").unwrap();
    fs::write(tmp.path().join("ch2.txt"), UNQUOTED).unwrap();

    let output = scenario_lint(tmp.path(), &["check", ".", "--format", "compact"]);
    assert_eq!(output.status.code(), Some(2));
    let out = stdout(&output);
    assert!(out.contains("ch1.txt:1:1: error [parse] chapter 'ch1' opened at line 1 has no tail directive"));
    // The other file is still linted
    assert!(out.contains("ch2.txt:2:1"));
}

#[test]
fn template_lists_scripts_in_order() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("b.txt"), UNQUOTED).unwrap();
    fs::write(tmp.path().join("a.txt"), UNQUOTED).unwrap();
    fs::write(tmp.path().join("skipped.txt"), UNQUOTED).unwrap();
    fs::write(
        tmp.path().join("template.tpl"),
        "# chapters\n@include b.txt\n@include a.txt\n",
    )
    .unwrap();

    let output = scenario_lint(
        tmp.path(),
        &["check", ".", "--format", "compact", "--rules", "SL205", "--template", "template.tpl"],
    );
    assert_eq!(
        stdout(&output),
        "b.txt:2:1: warning [SL205] half width punctuation\n\
         a.txt:2:1: warning [SL205] half width punctuation\n"
    );
}

#[test]
fn dump_round_trips() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("ch1.txt"), CLEAN).unwrap();

    let output = scenario_lint(tmp.path(), &["dump", "ch1.txt"]);
    assert_eq!(output.status.code(), Some(0));
    fs::write(tmp.path().join("dumped.txt"), stdout(&output)).unwrap();

    let again = scenario_lint(tmp.path(), &["dump", "dumped.txt"]);
    assert_eq!(stdout(&again), stdout(&output));

    let dialogue = scenario_lint(tmp.path(), &["dump", "--no-code", "ch1.txt"]);
    assert_eq!(stdout(&dialogue), "ch1\n\nAlice：“Hello.”\n\n");
}

#[test]
fn list_resources_as_json() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("ch1.txt"),
        "@<|label('ch1')|>\n<|\nshow(bg, 'room')\nplay(bgm, 'theme')\n|>\nText\n@<||>\n",
    )
    .unwrap();

    let output = scenario_lint(tmp.path(), &["list-resources", "--json", "ch1.txt"]);
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["backgrounds"], serde_json::json!(["room"]));
    assert_eq!(value["bgm"], serde_json::json!(["theme"]));
}
