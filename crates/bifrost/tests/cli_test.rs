//! Integration tests for the `bifrost` CLI binary.
//!
//! Argument parsing, help output, shell completions and error handling run
//! without a service; the rest talk to a wiremock signup backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `bifrost` binary with env isolation.
///
/// Clears all `BIFROST_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn bifrost_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("bifrost");
    cmd.env("HOME", "/tmp/bifrost-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/bifrost-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("BIFROST_PROFILE")
        .env_remove("BIFROST_API_URL")
        .env_remove("BIFROST_OUTPUT")
        .env_remove("BIFROST_TIMEOUT")
        .env_remove("BIFROST_VARIANT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

async fn signup_backend() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/sites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Oak Park" },
            { "id": 2, "name": "Harbour View" },
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/units"))
        .and(query_param("site_id", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["A101", "A102"])))
        .mount(&server)
        .await;

    server
}

/// A complete individual-layout signup, ready for `--no-input`.
fn submit_args<'a>(uri: &'a str, email: &'a str) -> Vec<&'a str> {
    vec![
        "--api-url",
        uri,
        "--variant",
        "individual",
        "submit",
        "--no-input",
        "--first-name",
        "Zanele",
        "--last-name",
        "Khumalo",
        "--email",
        email,
        "--phone",
        "0845556666",
        "--site",
        "2",
        "--unit",
        "A101",
        "--package",
        "100/100Mbps - R950",
        "--activation",
        "asap",
    ]
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = bifrost_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    bifrost_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("fibre")
            .and(predicate::str::contains("sites"))
            .and(predicate::str::contains("units"))
            .and(predicate::str::contains("packages"))
            .and(predicate::str::contains("submit")),
    );
}

#[test]
fn test_version_flag() {
    bifrost_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bifrost"));
}

#[test]
fn test_submit_help_lists_form_flags() {
    bifrost_cmd().args(["submit", "--help"]).assert().success().stdout(
        predicate::str::contains("--first-name")
            .and(predicate::str::contains("--unit"))
            .and(predicate::str::contains("--activation"))
            .and(predicate::str::contains("--no-input")),
    );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    bifrost_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    bifrost_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    // `config show` renders the default config when no file exists.
    bifrost_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_profile"));
}

#[test]
fn test_config_path() {
    bifrost_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_profile_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join("bifrost");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        r#"
[profiles.default]
api_url = "http://127.0.0.1:9"
packages = ["Basic 10/10", "Pro 500/500"]
"#,
    )
    .unwrap();

    bifrost_cmd()
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["packages", "-o", "plain"])
        .assert()
        .success()
        .stdout("Basic 10/10\nPro 500/500\n");
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = bifrost_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_sites_without_service_configured() {
    bifrost_cmd()
        .arg("sites")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("config init"));
}

#[test]
fn test_invalid_output_format() {
    let output = bifrost_cmd()
        .args(["--output", "invalid", "sites"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_unreachable_service() {
    bifrost_cmd()
        .args(["--api-url", "http://127.0.0.1:9", "--timeout", "2", "sites"])
        .assert()
        .code(7);
}

// ── Reference data ──────────────────────────────────────────────────

#[test]
fn test_packages_hidden_for_site_one() {
    bifrost_cmd()
        .args(["--api-url", "http://127.0.0.1:9", "packages", "--site", "1", "-o", "plain"])
        .assert()
        .success()
        .stdout("50/50Mbps - R750\n100/100Mbps - R950\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sites_json() {
    let server = signup_backend().await;

    let uri = server.uri();
    let output = bifrost_cmd()
        .args(["--api-url", uri.as_str(), "-o", "json-compact", "sites"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let sites: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        sites,
        json!([{ "id": 1, "name": "Oak Park" }, { "id": 2, "name": "Harbour View" }])
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_units_plain() {
    let server = signup_backend().await;

    let uri = server.uri();
    bifrost_cmd()
        .args(["--api-url", uri.as_str(), "-o", "plain", "units", "--site", "2"])
        .assert()
        .success()
        .stdout("A101\nA102\n");
}

// ── Submission ──────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_submit_success() {
    let server = signup_backend().await;
    Mock::given(method("POST"))
        .and(path("/api/signup"))
        .and(body_partial_json(json!({
            "first_name": "Zanele",
            "site_id": "2",
            "site_name": "Harbour View",
            "unit_number": "A101",
            "package": "100/100Mbps - R950",
            "activation_type": "ASAP",
            "activation_date": null,
            "company": "",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "message": "Signup received",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    bifrost_cmd()
        .args(submit_args(&uri, "zanele@example.co.za"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Signup received"))
        .stderr(
            predicate::str::contains("Activation will occur within 24 hours")
                .and(predicate::str::contains("Signup submitted successfully")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_submit_invalid_email_never_posts() {
    let server = signup_backend().await;
    Mock::given(method("POST"))
        .and(path("/api/signup"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let uri = server.uri();
    bifrost_cmd()
        .args(submit_args(&uri, "not-an-email"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("valid email"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_submit_incomplete_form() {
    let server = signup_backend().await;
    Mock::given(method("POST"))
        .and(path("/api/signup"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let uri = server.uri();
    let args: Vec<&str> = submit_args(&uri, "zanele@example.co.za")
        .into_iter()
        .filter(|a| *a != "--phone" && *a != "0845556666")
        .collect();

    bifrost_cmd()
        .args(args)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("phone is required"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_submit_rejected_shows_server_message() {
    let server = signup_backend().await;
    Mock::given(method("POST"))
        .and(path("/api/signup"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "Missing required fields",
            "fields": ["signup_type"],
        })))
        .mount(&server)
        .await;

    let uri = server.uri();
    bifrost_cmd()
        .args(submit_args(&uri, "zanele@example.co.za"))
        .assert()
        .code(6)
        .stderr(
            predicate::str::contains("Missing required fields")
                .and(predicate::str::contains("signup_type")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_submit_failure_without_body_uses_generic_message() {
    let server = signup_backend().await;
    Mock::given(method("POST"))
        .and(path("/api/signup"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let uri = server.uri();
    bifrost_cmd()
        .args(submit_args(&uri, "zanele@example.co.za"))
        .assert()
        .code(6)
        .stderr(predicate::str::contains("Something went wrong. Please try again."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_submit_rate_limited() {
    let server = signup_backend().await;
    Mock::given(method("POST"))
        .and(path("/api/signup"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({ "error": "Rate limit exceeded" })),
        )
        .mount(&server)
        .await;

    let uri = server.uri();
    bifrost_cmd()
        .args(submit_args(&uri, "zanele@example.co.za"))
        .assert()
        .code(9)
        .stderr(predicate::str::contains("Rate limit exceeded"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_submit_unknown_site() {
    let server = signup_backend().await;

    let uri = server.uri();
    let args: Vec<&str> = submit_args(&uri, "zanele@example.co.za")
        .into_iter()
        .map(|a| if a == "2" { "42" } else { a })
        .collect();

    bifrost_cmd()
        .args(args)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("42"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_submit_company_layout_scheduled() {
    let server = signup_backend().await;
    Mock::given(method("POST"))
        .and(path("/api/signup"))
        .and(body_partial_json(json!({
            "signup_type": "company",
            "company_name": "Khumalo Logistics",
            "unit_number": ["A101", "A102"],
            "activation_type": "Scheduled",
            "activation_date": "2099-05-01",
            "website": "",
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    bifrost_cmd()
        .args([
            "--api-url",
            uri.as_str(),
            "submit",
            "--no-input",
            "--first-name",
            "Zanele",
            "--last-name",
            "Khumalo",
            "--email",
            "ops@khumalo.example",
            "--phone",
            "0845556666",
            "--signup-type",
            "company",
            "--company-name",
            "Khumalo Logistics",
            "--site",
            "2",
            "--unit",
            "A101",
            "--unit",
            "A102",
            "--package",
            "50/50Mbps - R750",
            "--activation",
            "scheduled",
            "--date",
            "2099-05-01",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Activation will take place on 2099-05-01, subject to debit-order approval.",
        ));
}
