use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;

const VALID: [&str; 11] = [
    "--first-name",
    "Jane",
    "--last-name",
    "Doe",
    "--email",
    "jane@acme.com",
    "--company",
    "Acme Corp",
    "--needs",
    "rpa",
    "--consent",
];

fn run(home: &Path, args: &[&str]) -> Output {
    cargo_bin_cmd!("consult")
        .env("XDG_CONFIG_HOME", home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run command")
}

fn run_ok(home: &Path, args: &[&str]) -> String {
    let output = run(home, args);
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_json(home: &Path, args: &[&str]) -> Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let stdout = run_ok(home, &full);
    serde_json::from_str(&stdout).expect("parse json")
}

#[test]
fn needs_lists_all_eight_codes() {
    let temp = TempDir::new().expect("temp dir");
    let needs = run_json(temp.path(), &["needs"]);
    let items = needs.as_array().expect("array");
    assert_eq!(items.len(), 8);
    assert_eq!(items[0]["code"], "rpa");
    assert_eq!(items[7]["code"], "other");
}

#[test]
fn draft_prints_subject_and_placeholders() {
    let temp = TempDir::new().expect("temp dir");
    let mut args = vec!["draft"];
    args.extend_from_slice(&VALID);
    let stdout = run_ok(temp.path(), &args);

    assert!(stdout.contains("To: info@landisventures.com"));
    assert!(stdout.contains("Subject: Consultation Request from Jane Doe - Acme Corp\n"));
    assert!(stdout.contains("Phone: Not provided"));
    assert!(stdout.contains("No additional message"));
}

#[test]
fn draft_json_includes_mailto() {
    let temp = TempDir::new().expect("temp dir");
    let mut args = vec!["draft"];
    args.extend_from_slice(&VALID);
    args.extend_from_slice(&["--phone", "555-0100", "--message", "Hello there"]);
    let report = run_json(temp.path(), &args);

    assert_eq!(
        report["draft"]["subject"],
        "Consultation Request from Jane Doe - Acme Corp"
    );
    assert_eq!(report["request"]["automationNeeds"], "rpa");
    assert_eq!(report["request"]["phone"], "555-0100");
    let mailto = report["mailto"].as_str().expect("mailto");
    assert!(mailto.starts_with("mailto:info@landisventures.com?subject=Consultation%20Request"));
    assert!(mailto.contains("Hello%20there"));
}

#[test]
fn submit_print_emits_mailto_and_notice() {
    let temp = TempDir::new().expect("temp dir");
    let mut args = vec!["submit", "--print"];
    args.extend_from_slice(&VALID);
    let stdout = run_ok(temp.path(), &args);

    let mut lines = stdout.lines();
    let first = lines.next().expect("mailto line");
    assert!(first.starts_with("mailto:info@landisventures.com?subject="));
    assert!(stdout.contains("Request Prepared: Your email client will open"));
}

#[test]
fn submit_json_reports_submitted_state() {
    let temp = TempDir::new().expect("temp dir");
    let mut args = vec!["submit", "--print"];
    args.extend_from_slice(&VALID);
    let report = run_json(temp.path(), &args);

    assert_eq!(report["state"], "submitted");
    assert_eq!(report["draft"]["recipient"], "info@landisventures.com");
}

#[test]
fn submit_reports_every_missing_field() {
    let temp = TempDir::new().expect("temp dir");
    let output = run(temp.path(), &["submit", "--print", "--first-name", "Jane"]);

    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(!stderr.contains("First name is required"));
    assert!(stderr.contains("Last name is required"));
    assert!(stderr.contains("Please enter a valid email address"));
    assert!(stderr.contains("Company name is required"));
    assert!(stderr.contains("Please select your automation needs"));
    assert!(stderr.contains("You must agree to receive communications"));
}

#[test]
fn submit_rejects_unknown_need_and_missing_consent() {
    let temp = TempDir::new().expect("temp dir");
    let args: Vec<&str> = VALID
        .iter()
        .copied()
        .map(|arg| if arg == "rpa" { "foo" } else { arg })
        .filter(|arg| *arg != "--consent")
        .collect();
    let mut full = vec!["--json", "submit", "--print"];
    full.extend_from_slice(&args);
    let output = run(temp.path(), &full);

    assert_eq!(output.status.code(), Some(3));
    let report: Value = serde_json::from_slice(&output.stdout).expect("json");
    let fields: Vec<&str> = report["errors"]
        .as_array()
        .expect("errors")
        .iter()
        .map(|item| item["field"].as_str().expect("field"))
        .collect();
    assert_eq!(fields, vec!["automationNeeds", "consent"]);
}

#[test]
fn config_overrides_recipient_and_site_name() {
    let temp = TempDir::new().expect("temp dir");
    let config_path = temp.path().join("custom.toml");
    fs::write(
        &config_path,
        "recipient = \"hello@example.com\"\nsite_name = \"Example Consulting\"\n",
    )
    .expect("write config");

    let mut args = vec!["--config", config_path.to_str().expect("path"), "draft"];
    args.extend_from_slice(&VALID);
    let stdout = run_ok(temp.path(), &args);

    assert!(stdout.contains("To: hello@example.com"));
    assert!(stdout.contains("submitted through the Example Consulting website."));
}

#[test]
fn missing_explicit_config_is_invalid_input() {
    let temp = TempDir::new().expect("temp dir");
    let missing = temp.path().join("nope.toml");
    let output = run(
        temp.path(),
        &["--config", missing.to_str().expect("path"), "needs"],
    );
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn draft_writes_eml_file() {
    let temp = TempDir::new().expect("temp dir");
    let eml = temp.path().join("request.eml");
    let mut args = vec!["draft", "--eml", eml.to_str().expect("path")];
    args.extend_from_slice(&VALID);
    run_ok(temp.path(), &args);

    let written = fs::read_to_string(&eml).expect("eml");
    assert!(written.contains("To: info@landisventures.com"));
    assert!(written.contains("New Consultation Request:"));
}

#[test]
fn help_describes_every_subcommand() {
    let temp = TempDir::new().expect("temp dir");
    let stdout = run_ok(temp.path(), &["--help"]);
    for line in [
        "Validate the request and hand it to the mail client",
        "Validate the request and print the email draft",
        "List the values accepted by --needs",
        "Generate shell completions",
        "Launch the interactive form",
    ] {
        assert!(stdout.contains(line), "missing {line:?} in {stdout}");
    }
}
