// CLI integration tests for the helper subcommands.
use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::{Value, json};

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_assertion");
    Command::new(exe)
}

fn parse_json(value: &str) -> Value {
    serde_json::from_str(value).expect("valid json")
}

fn stdout_json(output: &std::process::Output) -> Value {
    parse_json(std::str::from_utf8(&output.stdout).expect("utf8"))
}

fn stderr_error(output: &std::process::Output) -> Value {
    let text = String::from_utf8_lossy(&output.stderr);
    let line = text
        .lines()
        .find(|line| line.starts_with("{\"error\""))
        .expect("error json line");
    parse_json(line)
}

const RESOURCES: &str = r#"[
  {"ID": "logs", "Type": "aws_s3_bucket", "Properties": {"acl": "private"}, "Filename": "main.tf", "LineNumber": 4},
  {"ID": "admin", "Type": "aws_iam_role"},
  {"ID": "assets", "Type": "aws_s3_bucket"}
]"#;

#[test]
fn quote_and_unquote_flow() {
    let quote = cmd().args(["quote", "private"]).output().expect("quote");
    assert!(quote.status.success());
    let quoted = stdout_json(&quote)["quoted"]
        .as_str()
        .expect("quoted")
        .to_string();
    assert_eq!(quoted, "\"private\"");

    let unquote = cmd().args(["unquote", &quoted]).output().expect("unquote");
    assert!(unquote.status.success());
    assert_eq!(stdout_json(&unquote), json!({ "unquoted": "private" }));
}

#[test]
fn unbalanced_quote_exit_code() {
    let unquote = cmd().args(["unquote", "\"open"]).output().expect("unquote");
    assert_eq!(unquote.status.code().unwrap(), 4);
    let err = stderr_error(&unquote);
    assert_eq!(err["error"]["kind"], "InvalidInput");
}

#[test]
fn quote_accepts_leading_hyphen() {
    let quote = cmd().args(["quote", "-x"]).output().expect("quote");
    assert!(quote.status.success());
    assert_eq!(stdout_json(&quote), json!({ "quoted": "\"-x\"" }));
}

#[test]
fn presence_reports_classification() {
    let presence = cmd().args(["presence", "null"]).output().expect("presence");
    assert!(presence.status.success());
    let value = stdout_json(&presence);
    assert_eq!(value["presence"], "null");
    assert_eq!(value["absent"], true);
    assert_eq!(value["present"], false);
    assert_eq!(value["not_null"], false);
    assert_eq!(value["empty"], true);

    let presence = cmd()
        .args(["presence", "[\"a\"]"])
        .output()
        .expect("presence");
    let value = stdout_json(&presence);
    assert_eq!(value["presence"], "populated");
    assert_eq!(value["present"], true);
}

#[test]
fn intersect_lenient_and_strict() {
    let hit = cmd()
        .args(["intersect", r#"["a","b"]"#, r#"["b","c"]"#])
        .output()
        .expect("intersect");
    assert!(hit.status.success());
    assert_eq!(stdout_json(&hit), json!({ "intersect": true }));

    let lenient = cmd()
        .args(["intersect", "not json", r#"["a"]"#])
        .output()
        .expect("intersect");
    assert!(lenient.status.success());
    assert_eq!(stdout_json(&lenient), json!({ "intersect": false }));

    let strict = cmd()
        .args(["intersect", "--strict", "not json", r#"["a"]"#])
        .output()
        .expect("intersect");
    assert_eq!(strict.status.code().unwrap(), 6);
    let err = stderr_error(&strict);
    assert_eq!(err["error"]["kind"], "Parse");
    assert!(
        err["error"]["hint"]
            .as_str()
            .unwrap()
            .contains("context: left")
    );
}

#[test]
fn files_partitions_by_base_name() {
    let files = cmd()
        .args([
            "files",
            "--pattern",
            "*.tf",
            "-p",
            "*.tfvars",
            "modules/vpc/main.tf",
            "prod.tfvars",
            "tf/README.md",
        ])
        .output()
        .expect("files");
    assert!(files.status.success());
    assert_eq!(
        stdout_json(&files),
        json!({
            "included": ["modules/vpc/main.tf", "prod.tfvars"],
            "excluded": ["tf/README.md"],
        })
    );
}

#[test]
fn files_shell_negation_escape_and_star_runs() {
    let files = cmd()
        .args([
            "files",
            "-p",
            "[^m]ain.go",
            "-p",
            r"\*.md",
            "-p",
            "**.tf",
            "cmd/main.go",
            "cmd/xain.go",
            "docs/*.md",
            "docs/README.md",
            "vpc.tf",
        ])
        .output()
        .expect("files");
    assert!(files.status.success());
    assert_eq!(
        stdout_json(&files),
        json!({
            "included": ["cmd/xain.go", "docs/*.md", "vpc.tf"],
            "excluded": ["cmd/main.go", "docs/README.md"],
        })
    );
}

#[test]
fn files_bad_pattern_exit_code() {
    let files = cmd()
        .args(["files", "--pattern", "[", "main.tf"])
        .output()
        .expect("files");
    assert_eq!(files.status.code().unwrap(), 5);
    assert_eq!(stderr_error(&files)["error"]["kind"], "Pattern");
}

#[test]
fn filter_reads_file_and_keeps_order() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("resources.json");
    std::fs::write(&path, RESOURCES).expect("write");

    let filter = cmd()
        .args([
            "filter",
            "--type",
            "aws_s3_bucket",
            path.to_str().unwrap(),
        ])
        .output()
        .expect("filter");
    assert!(filter.status.success());
    let text = std::str::from_utf8(&filter.stdout).expect("utf8");
    assert!(text.starts_with("[\n  {\n    \"ID\": \"logs\""));
    let value = parse_json(text);
    let ids: Vec<&str> = value
        .as_array()
        .expect("array")
        .iter()
        .map(|r| r["ID"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["logs", "assets"]);
    assert_eq!(value[0]["Properties"]["acl"], "private");
    assert_eq!(value[0]["LineNumber"], 4);
}

#[test]
fn filter_wildcard_from_stdin() {
    let mut child = cmd()
        .args(["filter", "--type", "*"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(RESOURCES.as_bytes())
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait");
    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value.as_array().expect("array").len(), 3);
    assert_eq!(value[1]["ID"], "admin");
}

#[test]
fn filter_missing_file_exit_code() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("missing.json");
    let filter = cmd()
        .args(["filter", "--type", "x", path.to_str().unwrap()])
        .output()
        .expect("filter");
    assert_eq!(filter.status.code().unwrap(), 3);
    let err = stderr_error(&filter);
    assert_eq!(err["error"]["kind"], "NotFound");
    assert!(err["error"]["path"].as_str().unwrap().ends_with("missing.json"));
}

#[test]
fn filter_invalid_document_exit_code() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("resources.json");
    std::fs::write(&path, "[{\"ID\": \"no-type\"}]").expect("write");
    let filter = cmd()
        .args(["filter", "--type", "x", path.to_str().unwrap()])
        .output()
        .expect("filter");
    assert_eq!(filter.status.code().unwrap(), 6);
    let err = stderr_error(&filter);
    assert_eq!(err["error"]["kind"], "Parse");
    assert!(
        err["error"]["message"]
            .as_str()
            .unwrap()
            .contains("missing field `Type`")
    );
}

#[test]
fn usage_exit_code() {
    let files = cmd()
        .args(["files", "--pattern", "*.tf"])
        .output()
        .expect("files");
    assert_eq!(files.status.code().unwrap(), 2);
    assert_eq!(stderr_error(&files)["error"]["kind"], "Usage");
}

#[test]
fn version_emits_name() {
    let version = cmd().arg("version").output().expect("version");
    assert!(version.status.success());
    assert_eq!(stdout_json(&version)["name"], "assertion");
}
