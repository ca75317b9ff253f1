// End-to-end tests for `bkm run` / `bkm validate`.
//
// These enforce the shell contract: exit codes, stderr summary, and the
// --json stdout contract (exactly one JSON value, nothing else).

use std::path::Path;
use std::process::{Command, Output};

fn bkm() -> Command {
    Command::new(env!("CARGO_BIN_EXE_bkm"))
}

fn write(path: &Path, content: &str) {
    std::fs::write(path, content).unwrap();
}

fn run_pair(dir: &Path, vendor: &str, internal: &str, extra: &[&str]) -> Output {
    let vendor_path = dir.join("vendor.csv");
    let internal_path = dir.join("internal.csv");
    write(&vendor_path, vendor);
    write(&internal_path, internal);

    bkm()
        .arg("run")
        .args(["--vendor", vendor_path.to_str().unwrap()])
        .args(["--internal", internal_path.to_str().unwrap()])
        .args(extra)
        .output()
        .unwrap()
}

#[test]
fn all_matched_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_pair(
        dir.path(),
        "Invoice #,Amount\nINV-001,100.00\nINV-002,50.00\n",
        "Voucher Ref,Total\n1,100.00\n2,50.00\n",
        &[],
    );
    assert_eq!(out.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("2 matched"), "summary on stderr: {stderr}");
}

#[test]
fn exceptions_exit_one() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_pair(
        dir.path(),
        "Invoice,Amount\n1,100.00\n",
        "Invoice,Amount\n1,90.00\n",
        &[],
    );
    assert_eq!(out.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("1 amount mismatches"), "stderr: {stderr}");
}

#[test]
fn json_stdout_is_a_single_value() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_pair(
        dir.path(),
        "Invoice,Amount\n1,100.00\n2,50.00\n",
        "Invoice,Amount\n1,100.00\n",
        &["--json"],
    );
    // Exceptions exist, but the JSON contract holds regardless of exit code
    assert_eq!(out.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&out.stdout);
    let value: serde_json::Value = serde_json::from_str(stdout.trim())
        .unwrap_or_else(|e| panic!("stdout must be valid JSON: {e}\n{stdout}"));

    assert_eq!(value["summary"]["total_rows"], 2);
    assert_eq!(value["summary"]["matched"], 1);
    assert_eq!(value["summary"]["missing_in_books"], 1);
    assert_eq!(value["rows"][0]["status"], "matched");
}

#[test]
fn schema_failure_exits_six_and_names_the_side() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_pair(
        dir.path(),
        "Invoice,Amount\n1,100.00\n",
        "Date,Memo\nx,y\n",
        &[],
    );
    assert_eq!(out.status.code(), Some(6));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("internal file"), "stderr: {stderr}");
    assert!(stderr.contains("hint:"), "schema errors come with a hint: {stderr}");
}

#[test]
fn signed_books_config_applies() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("recon.toml");
    write(&config_path, "[sides.internal]\nsign = \"absolute\"\n");

    let out = run_pair(
        dir.path(),
        "Invoice,Amount\nINV-001,$100.00\n",
        "Invoice,Amount\n1,-100.00\n",
        &["--config", config_path.to_str().unwrap()],
    );
    assert_eq!(out.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&out.stderr));
}

#[test]
fn bad_config_exits_five() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("recon.toml");
    write(&config_path, "[suggestion]\nthreshold = 250\n");

    let out = run_pair(
        dir.path(),
        "Invoice,Amount\n1,1.00\n",
        "Invoice,Amount\n1,1.00\n",
        &["--config", config_path.to_str().unwrap()],
    );
    assert_eq!(out.status.code(), Some(5));
}

#[test]
fn export_writes_a_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let export_path = dir.path().join("report.xlsx");

    let out = run_pair(
        dir.path(),
        "Invoice,Amount\n1,100.00\n",
        "Invoice,Amount\n1,100.00\n",
        &["--export", export_path.to_str().unwrap()],
    );
    assert_eq!(out.status.code(), Some(0));

    let bytes = std::fs::read(&export_path).unwrap();
    // XLSX is a zip container
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn unparseable_amounts_warn_but_do_not_abort() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_pair(
        dir.path(),
        "Invoice,Amount\n1,not-a-number\n",
        "Invoice,Amount\n1,0.00\n",
        &[],
    );
    // The malformed cell became 0.00 and matched
    assert_eq!(out.status.code(), Some(0));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("warning: 1 amount cell(s)"), "stderr: {stderr}");
}

#[test]
fn validate_accepts_good_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("recon.toml");
    write(&config_path, "name = \"March close\"\n[tolerance]\namount_minor = 0\n");

    let out = bkm()
        .args(["validate", config_path.to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stderr).contains("valid: 'March close'"));
}

#[test]
fn validate_rejects_bad_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("recon.toml");
    write(&config_path, "[schema]\namount_keywords = []\n");

    let out = bkm()
        .args(["validate", config_path.to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(5));
}

#[test]
fn unknown_parse_template_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("x.pdf");
    write(&pdf, "%PDF-1.4");

    let out = bkm()
        .args(["parse", "statement-pdf", "--template", "nope", "--file"])
        .arg(&pdf)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Unknown template"));
}
