use assert_cmd::Command;
use regex::Regex;
use tempfile::TempDir;

fn keyspace() -> Command {
    Command::cargo_bin("keyspace").expect("binary not built")
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("failed to run keyspace");
    assert!(
        output.status.success(),
        "keyspace failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn row_value(stdout: &str, method: &str) -> Option<String> {
    let re = Regex::new(&format!(
        r"(?m)^\|\s*{}\s*\|[^|\n]*\|[^|\n]*\|\s*([0-9,]+)\s*\|",
        regex::escape(method)
    ))
    .unwrap();
    re.captures(stdout).map(|c| c[1].to_string())
}

#[test]
fn test_count_runs_every_cheap_engine() {
    let stdout = stdout_of(keyspace().args(["count", "-n", "3", "-d", "2", "-m", "1"]));

    assert_eq!(row_value(&stdout, "matrix").as_deref(), Some("8"));
    assert_eq!(row_value(&stdout, "state-space").as_deref(), Some("0"));
    assert_eq!(row_value(&stdout, "brute").as_deref(), Some("0"));
    assert_eq!(row_value(&stdout, "prefix").as_deref(), Some("0"));
}

#[test]
fn test_count_single_method_groups_digits() {
    let stdout = stdout_of(keyspace().args([
        "count", "-n", "10", "-d", "6", "-m", "4", "--method", "state-space",
    ]));

    assert_eq!(
        row_value(&stdout, "state-space").as_deref(),
        Some("30,336,792")
    );
    assert!(row_value(&stdout, "matrix").is_none());
}

#[test]
fn test_preset_file_with_override() {
    let dir = TempDir::new().unwrap();
    let preset = dir.path().join("preset.json");
    std::fs::write(&preset, r#"{ "positions": 6, "depths": 4, "macs": 0 }"#).unwrap();

    let stdout = stdout_of(keyspace().args([
        "count",
        "--params",
        preset.to_str().unwrap(),
        "-m",
        "2",
        "--method",
        "prefix",
    ]));

    assert_eq!(row_value(&stdout, "prefix").as_deref(), Some("1,554"));
}

#[test]
fn test_json_report() {
    let stdout = stdout_of(keyspace().args([
        "count", "-n", "4", "-d", "2", "-m", "1", "--json", "--method", "brute",
    ]));

    let start = stdout.find('{').expect("no JSON in output");
    let json: serde_json::Value = serde_json::from_str(stdout[start..].trim()).unwrap();
    assert_eq!(json["params"]["positions"], 4);
    assert_eq!(json["results"][0]["method"], "brute");
    assert_eq!(json["results"][0]["keys"], "6");
}

#[test]
fn test_samples_are_printed() {
    let stdout = stdout_of(keyspace().args([
        "count",
        "-n",
        "6",
        "-d",
        "3",
        "-m",
        "1",
        "--sample-size",
        "4",
        "--method",
        "state-space",
    ]));

    assert!(stdout.contains("Samples:"));
    let sample_rows = Regex::new(r"(?m)^\|\s*[1-4]\s*\|\s*(\d ){5}\d\s*\|").unwrap();
    assert_eq!(sample_rows.find_iter(&stdout).count(), 4);
}

#[test]
fn test_prefix_count_and_samples_share_one_search() {
    let output = keyspace()
        .args([
            "count",
            "-n",
            "6",
            "-d",
            "3",
            "-m",
            "1",
            "--sample-size",
            "3",
            "--method",
            "prefix",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(row_value(&stdout, "prefix").as_deref(), Some("96"));
    let sample_rows = Regex::new(r"(?m)^\|\s*[1-3]\s*\|\s*(\d ){5}\d\s*\|").unwrap();
    assert_eq!(sample_rows.find_iter(&stdout).count(), 3);
    assert_eq!(
        stderr.matches("Prefix search (").count(),
        1,
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_empty_alphabet_fails() {
    let output = keyspace()
        .args(["count", "-n", "3", "-d", "0"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let all = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(all.contains("depths must be at least 1"), "output: {}", all);
}

#[test]
fn test_verify_writes_csv() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("sweep.csv");

    let stdout = stdout_of(keyspace().args([
        "verify",
        "--max-positions",
        "4",
        "--max-depths",
        "3",
        "--output",
        csv_path.to_str().unwrap(),
    ]));

    assert!(stdout.contains("30 parameter sets checked, 0 inconsistent"));
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("positions,depths,macs,"));
    assert_eq!(csv.lines().count(), 31);
}
