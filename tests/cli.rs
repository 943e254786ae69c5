use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SAMPLE_LOG: &str = "[
    {'type': 'task', 'payload': {'name': 'build', 'query': 'compile'}},
    {'type': 'task_result', 'status': 'ok', 'artifact': <Path '/tmp/out'>},
]
";

fn write_input(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("run.log");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn json_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, SAMPLE_LOG);

    let mut cmd = cargo_bin_cmd!("litlog");
    cmd.arg("json").arg("--input").arg(&input);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""artifact": "<Path '/tmp/out'>""#))
        .stdout(predicate::str::starts_with("[\n  {\n    \"type\": \"task\""));
}

#[test]
fn json_to_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, SAMPLE_LOG);
    let output = dir.path().join("run.json");

    let mut cmd = cargo_bin_cmd!("litlog");
    cmd.arg("json")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output);
    cmd.assert().success().stdout(predicate::str::is_empty());

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written[1]["status"], "ok");
    assert_eq!(written[0]["payload"]["name"], "build");
}

#[test]
fn html_report() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, SAMPLE_LOG);
    let output = dir.path().join("run.html");

    let mut cmd = cargo_bin_cmd!("litlog");
    cmd.arg("html")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output);
    cmd.assert().success();

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(">1. build</summary>"));
    assert!(html.contains("&lt;Path &#39;/tmp/out&#39;&gt;"));
}

#[test]
fn generate_is_an_alias_of_tokens() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "[1]");

    for command in ["tokens", "generate"] {
        let mut cmd = cargo_bin_cmd!("litlog");
        cmd.arg(command).arg("--input").arg(&input);
        cmd.assert()
            .success()
            .stdout(predicate::str::starts_with(
                r#"{"type":"OP","string":"[","start":[1,0],"end":[1,1]}"#,
            ))
            .stdout(predicate::str::ends_with(
                "{\"type\":\"ENDMARKER\",\"string\":\"\",\"start\":[2,0],\"end\":[2,0]}\n",
            ));
    }
}

#[test]
fn config_file_changes_json_indent() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "[{'a': 1}]");
    let config = dir.path().join("litlog.toml");
    fs::write(&config, "[json]\nindent = 4\n").unwrap();

    let mut cmd = cargo_bin_cmd!("litlog");
    cmd.arg("--config")
        .arg(&config)
        .arg("json")
        .arg("--input")
        .arg(&input);
    cmd.assert()
        .success()
        .stdout(predicate::eq("[\n    {\n        \"a\": 1\n    }\n]"));
}

#[test]
fn environment_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "[{'a': 1}]");
    let config = dir.path().join("litlog.toml");
    fs::write(&config, "[json]\nindent = 4\n").unwrap();

    let mut cmd = cargo_bin_cmd!("litlog");
    cmd.env("LITLOG_JSON__INDENT", "1")
        .arg("json")
        .arg("--config")
        .arg(&config)
        .arg("--input")
        .arg(&input);
    cmd.assert()
        .success()
        .stdout(predicate::eq("[\n {\n  \"a\": 1\n }\n]"));
}

#[test]
fn working_directory_config_is_layered_under_explicit_config() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "[{'a': 1}]");
    fs::write(
        dir.path().join("litlog.toml"),
        "[json]\nindent = 4\n[report]\ntitle = \"Local\"\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("litlog");
    cmd.current_dir(dir.path()).arg("json").arg("--input").arg(&input);
    cmd.assert()
        .success()
        .stdout(predicate::eq("[\n    {\n        \"a\": 1\n    }\n]"));

    let explicit = dir.path().join("explicit.toml");
    fs::write(&explicit, "[json]\nindent = 1\n").unwrap();
    let mut cmd = cargo_bin_cmd!("litlog");
    cmd.current_dir(dir.path())
        .arg("html")
        .arg("--config")
        .arg(&explicit)
        .arg("--input")
        .arg(&input);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("<title>Local</title>"));
}

#[test]
fn max_depth_flag_limits_nesting() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "[[[1]]]");

    let mut cmd = cargo_bin_cmd!("litlog");
    cmd.arg("json").arg("--max-depth").arg("2").arg("--input").arg(&input);
    cmd.assert().failure().code(1).stderr(predicate::str::contains(
        "Error: Nesting too deep. At most 2 levels are allowed, got `[`(LSQB) at 1:2-1:3",
    ));

    let mut cmd = cargo_bin_cmd!("litlog");
    cmd.arg("json").arg("--max-depth").arg("3").arg("--input").arg(&input);
    cmd.assert().success();
}

#[test]
fn deeply_nested_input_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        &format!("{}{}", "[".repeat(50_000), "]".repeat(50_000)),
    );

    let mut cmd = cargo_bin_cmd!("litlog");
    cmd.arg("json").arg("--input").arg(&input);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Nesting too deep"));
}

#[test]
fn parse_error_exits_with_diagnostic() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "[1, 2");

    let mut cmd = cargo_bin_cmd!("litlog");
    cmd.arg("json").arg("--input").arg(&input);
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error: Unexpected end of input at 2:0"));
}

#[test]
fn missing_input_file_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.log");

    let mut cmd = cargo_bin_cmd!("litlog");
    cmd.arg("html").arg("--input").arg(&missing);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: ").and(predicate::str::contains("absent.log")));
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "[]");

    let mut cmd = cargo_bin_cmd!("litlog");
    cmd.arg("json")
        .arg("--input")
        .arg(&input)
        .arg("--config")
        .arg(dir.path().join("nope.toml"));
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Configuration error"));
}

#[test]
fn list_formats() {
    let mut cmd = cargo_bin_cmd!("litlog");
    cmd.arg("list-formats");
    cmd.assert().success().stdout(
        predicate::str::contains("json")
            .and(predicate::str::contains("html"))
            .and(predicate::str::contains("tokens")),
    );
}

#[test]
fn subcommand_is_required() {
    let mut cmd = cargo_bin_cmd!("litlog");
    cmd.assert().failure();
}
