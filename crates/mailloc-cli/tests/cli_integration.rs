use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::{fs, path::PathBuf, process::Command};
use tempfile::TempDir;

fn workspace_root() -> PathBuf {
    // crates/mailloc-cli -> <workspace root>
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

fn fixture(name: &str) -> String {
    workspace_root()
        .join("test")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

/// Runs inside a scratch directory so a stray mailloc.toml or logs/ never
/// leaks between tests.
fn bin_cmd(scratch: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mailloc-cli").unwrap();
    cmd.current_dir(scratch.path())
        .env("MAILLOC_LOG_DIR", scratch.path().join("logs"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let assert = cmd.assert().success();
    String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}

#[test]
fn help_lists_commands() {
    let tmp = TempDir::new().unwrap();
    bin_cmd(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("preview"))
        .stdout(predicate::str::contains("input-template"))
        .stdout(predicate::str::contains("resolve"));
}

#[test]
fn build_writes_template_to_stdout() {
    let tmp = TempDir::new().unwrap();
    let out = stdout_of(bin_cmd(&tmp).args(["build", &fixture("legacy.csv")]));

    assert!(out.contains("{%- capture headline -%}"));
    assert!(out.contains("{%- when \"ar\" -%}مرحبا بعودتك"));
    assert!(out.contains("{%- when \"pt-br\" -%}"));
    assert!(out.contains("{%- when \"es-419\" -%}"));
    assert!(out.contains("<!DOCTYPE html>"));
    assert!(out.contains("known_locales"));
    assert!(!out.contains("klingon"));

    let resolver = out.find("known_locales").unwrap();
    let doc = out.find("<!DOCTYPE html>").unwrap();
    let capture = out.find("{%- capture headline -%}").unwrap();
    assert!(resolver < capture && capture < doc);
}

#[test]
fn build_is_deterministic() {
    let tmp = TempDir::new().unwrap();
    let a = stdout_of(bin_cmd(&tmp).args(["build", &fixture("legacy.csv")]));
    let b = stdout_of(bin_cmd(&tmp).args(["build", &fixture("legacy.csv")]));
    assert_eq!(a, b);
}

#[test]
fn build_to_file_with_json_report() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out").join("email.liquid");
    bin_cmd(&tmp)
        .args([
            "--quiet",
            "build",
            &fixture("legacy.csv"),
            "--out",
            out.to_str().unwrap(),
            "--report",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("\"dialect\": \"legacy\""))
        .stderr(predicate::str::contains("\"schema_version\": 1"))
        .stderr(predicate::str::contains("unknown_locale_column"));

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("{%- capture subject_line -%}"));
}

#[test]
fn text_report_mentions_skipped_column() {
    let tmp = TempDir::new().unwrap();
    bin_cmd(&tmp)
        .args(["build", &fixture("legacy.csv")])
        .assert()
        .success()
        .stderr(predicate::str::contains("klingon"))
        .stderr(predicate::str::contains("dispatch block(s)"));
}

#[test]
fn status_lines_come_from_the_message_bundle() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("email.liquid");
    let assert = bin_cmd(&tmp)
        .args(["build", &fixture("legacy.csv"), "--out", out.to_str().unwrap()])
        .assert()
        .success();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("✔ "), "{stderr}");
    assert!(stderr.contains("locale(s) [legacy] -> "), "{stderr}");
    assert!(stderr.contains("email.liquid"), "{stderr}");
    assert!(!stderr.contains('\u{2068}') && !stderr.contains('\u{2069}'));

    bin_cmd(&tmp)
        .args(["schema", "--out-dir", tmp.path().join("s").to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("3 schema(s) written to"));
}

#[test]
fn malformed_table_fails() {
    let tmp = TempDir::new().unwrap();
    bin_cmd(&tmp)
        .args(["build", &fixture("malformed.csv")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed table"));
}

#[test]
fn missing_table_fails() {
    let tmp = TempDir::new().unwrap();
    bin_cmd(&tmp)
        .args(["build", "does/not/exist.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn en_only_table_collapses_to_default() {
    let tmp = TempDir::new().unwrap();
    let out = stdout_of(bin_cmd(&tmp).args(["build", &fixture("en_only.csv")]));
    assert!(out.contains("    {%- when \"en\" -%}Good news\n    {%- else -%}Good news"));
    assert!(!out.contains("{%- when \"ar\" -%}"));
}

#[test]
fn include_locales_adds_default_and_falls_back() {
    let tmp = TempDir::new().unwrap();
    let out = stdout_of(bin_cmd(&tmp).args([
        "build",
        &fixture("legacy.csv"),
        "--include-locales",
        "fr,ar",
    ]));
    assert!(out.contains("{%- when \"en\" -%}Welcome back"));
    assert!(out.contains("{%- when \"fr\" -%}Welcome back"));
    assert!(out.contains("{%- when \"ar\" -%}مرحبا بعودتك"));
    assert!(!out.contains("{%- when \"pt-br\" -%}"));
}

#[test]
fn preset_and_include_list_conflict() {
    let tmp = TempDir::new().unwrap();
    bin_cmd(&tmp)
        .args([
            "build",
            &fixture("legacy.csv"),
            "--include-locales",
            "fr",
            "--locale-preset",
            "global",
        ])
        .assert()
        .failure();
}

#[test]
fn module_dialect_is_remapped() {
    let tmp = TempDir::new().unwrap();
    bin_cmd(&tmp)
        .args(["--quiet", "build", &fixture("module.csv"), "--report", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("{%- capture usp_title -%}"))
        .stdout(predicate::str::contains("Warum Leute wechseln"))
        .stderr(predicate::str::contains("\"dialect\": \"module\""));
}

#[test]
fn preview_renders_rtl_html() {
    let tmp = TempDir::new().unwrap();
    let html = stdout_of(bin_cmd(&tmp).args([
        "preview",
        &fixture("legacy.csv"),
        "--locale",
        "ar",
    ]));
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("dir=\"rtl\""));
    assert!(html.contains("مرحبا بعودتك"));
    assert!(!html.contains("{{"));
    assert!(!html.contains("{%"));
}

#[test]
fn preview_rejects_unknown_locale() {
    let tmp = TempDir::new().unwrap();
    bin_cmd(&tmp)
        .args(["preview", &fixture("legacy.csv"), "--locale", "tlh"])
        .assert()
        .failure();
}

#[test]
fn input_template_lists_module_rows() {
    let tmp = TempDir::new().unwrap();
    let out = stdout_of(bin_cmd(&tmp).args([
        "input-template",
        "--modules",
        "hero_module,app_download_module",
        "--include-locales",
        "de",
    ]));
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("Key,Module,module_index,en,de"));
    assert!(out.contains(",hero_module,1,"));
    assert!(out.contains(",app_download_module,2,"));
}

#[test]
fn input_template_warns_on_unknown_module() {
    let tmp = TempDir::new().unwrap();
    bin_cmd(&tmp)
        .args(["input-template", "--modules", "hero_module,banner_module"])
        .assert()
        .success()
        .stderr(predicate::str::contains("banner_module"));
    bin_cmd(&tmp)
        .args(["input-template", "--modules", "banner_module"])
        .assert()
        .failure();
}

#[test]
fn resolve_prefers_country_override() {
    let tmp = TempDir::new().unwrap();
    bin_cmd(&tmp)
        .args(["resolve", "--lang", "pt-BR", "--country", "BR"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("pt-br\tltr"));
}

#[test]
fn resolve_maps_legacy_hebrew_to_rtl() {
    let tmp = TempDir::new().unwrap();
    bin_cmd(&tmp)
        .args(["resolve", "--lang", "iw", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"locale\": \"he\""))
        .stdout(predicate::str::contains("\"direction\": \"rtl\""))
        .stdout(predicate::str::contains("\"align\": \"right\""));
}

#[test]
fn resolve_unknown_language_uses_default() {
    let tmp = TempDir::new().unwrap();
    bin_cmd(&tmp)
        .args(["resolve", "--lang", "xx"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("en\t"))
        .stdout(predicate::str::contains("(default)"));
}

#[test]
fn locales_marks_default_and_rtl() {
    let tmp = TempDir::new().unwrap();
    let out = stdout_of(bin_cmd(&tmp).arg("locales"));
    let first = out.lines().next().unwrap();
    assert_eq!(first, "en\tdefault");
    assert!(out.lines().any(|l| l == "ar\trtl"));
    assert!(out.lines().any(|l| l == "he\trtl"));
}

#[test]
fn schema_dumps_report_schemas() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("schemas");
    bin_cmd(&tmp)
        .args(["schema", "--out-dir", dir.to_str().unwrap()])
        .assert()
        .success();
    for name in [
        "build_summary.schema.json",
        "resolution_report.schema.json",
        "locale_info.schema.json",
    ] {
        let text = fs::read_to_string(dir.join(name)).unwrap();
        assert!(text.contains("\"$schema\""), "{name}");
    }
}

#[test]
fn config_file_in_working_dir_is_applied() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("mailloc.toml"),
        "[build]\nshow_footer = false\nlocale_preset = \"en-only\"\n",
    )
    .unwrap();
    let out = stdout_of(bin_cmd(&tmp).args(["build", &fixture("legacy.csv")]));
    assert!(out.contains("{%- assign show_footer = \"FALSE\" -%}"));
    assert!(!out.contains("{%- when \"ar\" -%}"));
}
