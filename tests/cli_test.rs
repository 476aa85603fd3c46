use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn run_command(args: &[&str], test_dir: &str) -> (Option<i32>, String, String) {
    // Use cargo run which will build if needed
    // Set QA_DIR in the environment for the subprocess
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--"])
        .args(args)
        .env("QA_DIR", test_dir)
        .env_remove("RUST_LOG")
        .current_dir(env::current_dir().unwrap())
        .output()
        .expect("Failed to execute command");

    let code = output.status.code();
    let stdout = String::from_utf8(output.stdout).unwrap_or_default();
    let stderr = String::from_utf8(output.stderr).unwrap_or_default();

    // Filter out cargo compilation messages from stderr
    let filtered_stderr: String = stderr
        .lines()
        .filter(|line| {
            !line.contains("Compiling")
                && !line.contains("Finished")
                && !line.contains("warning:")
                && !line.contains("note:")
        })
        .collect::<Vec<_>>()
        .join("\n");

    (code, stdout, filtered_stderr)
}

fn setup_test_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

const GZ: &str = "3a2a22fadee88bfc3ffd389af8875607d3cf3d22b62d02cc0747edec36aadfa0";
const BZ2: &str = "b123ac066844fc1bd1e4271eb6aa1bf81df1ea433b118144aa538613a052b98c";
const XZ: &str = "5b69c2f4c2c0c9cd4220c82b15f9b870e595350dabf2b46d0c218bc694af491e";

fn write_table(test_dir: &str) {
    let table = format!(
        r#"
[versions."7.4.27"]
active = false

[versions."7.4.27".release]
type = "RC"
number = 0
date = "02 Dec 2021"
baseurl = "https://downloads.php.net/~derick/"

[versions."8.0.21"]
active = true

[versions."8.0.21".release]
type = "RC"
number = 1
date = "26 Jun 2022"

[versions."8.1.8"]
active = true

[versions."8.1.8".release]
type = "RC"
number = 1
date = "23 Jun 2022"
baseurl = "https://downloads.php.net/~ramsey/"

[versions."8.1.8".release.checksums.sha256]
bz2 = "{}"
gz = "{}"
xz = "{}"

[versions."8.3.0"]
active = true

[versions."8.3.0".release]
type = "RC"
number = 0
"#,
        BZ2, GZ, XZ
    );
    fs::write(format!("{}/qa-releases.toml", test_dir), table).unwrap();
}

#[test]
fn test_init_creates_table() {
    let temp_dir = setup_test_dir();
    let test_dir = temp_dir.path().to_str().unwrap();

    let (code, stdout, stderr) = run_command(&["init", "8.4.0"], test_dir);

    assert_eq!(code, Some(0), "Init should succeed. stderr: {}", stderr);
    assert!(
        stdout.contains("Initialized"),
        "Expected 'Initialized' in output: {}",
        stdout
    );

    let table_path = format!("{}/qa-releases.toml", test_dir);
    assert!(Path::new(&table_path).exists(), "Table file should be created");

    let content = fs::read_to_string(&table_path).unwrap();
    assert!(content.contains("8.4.0"));
    assert!(content.contains("[settings]"));
    assert!(content.contains("active = false"));
}

#[test]
fn test_init_skips_if_exists() {
    let temp_dir = setup_test_dir();
    let test_dir = temp_dir.path().to_str().unwrap();
    write_table(test_dir);

    let (code, stdout, _) = run_command(&["init"], test_dir);

    assert_eq!(code, Some(0));
    assert!(
        stdout.contains("Skipping initialization"),
        "Expected skip notice in output: {}",
        stdout
    );

    let content = fs::read_to_string(format!("{}/qa-releases.toml", test_dir)).unwrap();
    assert!(content.contains("8.1.8"), "Existing table must be left untouched");
}

#[test]
fn test_reported_lists_dev_and_release_versions() {
    let temp_dir = setup_test_dir();
    let test_dir = temp_dir.path().to_str().unwrap();
    write_table(test_dir);

    let (code, stdout, stderr) = run_command(&["reported"], test_dir);

    assert_eq!(code, Some(0), "stderr: {}", stderr);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec!["8.0.21-dev", "8.0.21RC1", "8.1.8-dev", "8.1.8RC1", "8.3.0-dev"]
    );
}

#[test]
fn test_reported_json() {
    let temp_dir = setup_test_dir();
    let test_dir = temp_dir.path().to_str().unwrap();
    write_table(test_dir);

    let (code, stdout, _) = run_command(&["reported", "--json"], test_dir);

    assert_eq!(code, Some(0));
    let parsed: Vec<String> = serde_json::from_str(&stdout).expect("reported --json is a JSON array");
    assert!(parsed.contains(&"8.1.8RC1".to_string()));
    assert!(!parsed.iter().any(|v| v.starts_with("7.4.27")));
}

#[test]
fn test_accepts_known_and_unknown_versions() {
    let temp_dir = setup_test_dir();
    let test_dir = temp_dir.path().to_str().unwrap();
    write_table(test_dir);

    let (code, stdout, _) = run_command(&["accepts", "8.1.8RC1"], test_dir);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("is accepted"), "{}", stdout);

    let (code, _, stderr) = run_command(&["accepts", "7.4.27-dev"], test_dir);
    assert_eq!(code, Some(1), "Inactive versions must be rejected");
    assert!(stderr.contains("is not accepted"), "{}", stderr);

    let (code, _, _) = run_command(&["accepts", "8.3.0RC0"], test_dir);
    assert_eq!(code, Some(1), "Release number 0 has no pre-release identifier");
}

#[test]
fn test_accepts_without_table_is_distinct_from_rejection() {
    let temp_dir = setup_test_dir();
    let test_dir = temp_dir.path().to_str().unwrap();

    let (code, stdout, stderr) = run_command(&["accepts", "8.1.8-dev"], test_dir);

    assert_eq!(code, Some(2), "Unusable table must not look like a rejection");
    assert!(stdout.is_empty(), "{}", stdout);
    assert!(stderr.contains("qarel init"), "{}", stderr);
}

#[test]
fn test_accepts_with_invalid_table_exits_2() {
    let temp_dir = setup_test_dir();
    let test_dir = temp_dir.path().to_str().unwrap();
    fs::write(
        format!("{}/qa-releases.toml", test_dir),
        "[versions.\"8.1.8\"]\nactive = true\n\n[versions.\"8.1.8\".release]\nnumber = -1\n",
    )
    .unwrap();

    let (code, _, stderr) = run_command(&["accepts", "8.1.8-dev"], test_dir);

    assert_eq!(code, Some(2));
    assert!(stderr.contains("invalid release table"), "{}", stderr);
}

#[test]
fn test_reported_empty_keeps_stdout_clean() {
    let temp_dir = setup_test_dir();
    let test_dir = temp_dir.path().to_str().unwrap();
    fs::write(
        format!("{}/qa-releases.toml", test_dir),
        "[versions.\"7.3.26\"]\nactive = false\n",
    )
    .unwrap();

    let (code, stdout, stderr) = run_command(&["reported"], test_dir);

    assert_eq!(code, Some(0), "stderr: {}", stderr);
    assert!(stdout.is_empty(), "Notices must not reach piped output: {}", stdout);
    assert!(stderr.contains("No active versions"), "{}", stderr);
}

#[test]
fn test_releases_lists_enabled_only() {
    let temp_dir = setup_test_dir();
    let test_dir = temp_dir.path().to_str().unwrap();
    write_table(test_dir);

    let (code, stdout, stderr) = run_command(&["releases"], test_dir);

    assert_eq!(code, Some(0), "stderr: {}", stderr);
    assert!(stdout.contains("8.1.8RC1 (23 Jun 2022)"), "{}", stdout);
    assert!(stdout.contains("https://downloads.php.net/~ramsey/php-8.1.8RC1.tar.gz"));
    assert!(stdout.contains("https://downloads.php.net/~ramsey/php-8.1.8RC1.tar.xz"));
    assert!(stdout.contains(GZ));
    assert!(!stdout.contains("8.0.21RC1"), "Disabled records are not offered");
}

#[test]
fn test_releases_all_marks_disabled() {
    let temp_dir = setup_test_dir();
    let test_dir = temp_dir.path().to_str().unwrap();
    write_table(test_dir);

    let (code, _, stderr) = run_command(&["releases", "--all"], test_dir);

    assert_eq!(code, Some(0));
    assert!(
        stderr.contains("8.0.21RC1 (8.0.21) disabled"),
        "Expected disabled notice: {}",
        stderr
    );
}

#[test]
fn test_releases_json_excludes_dev_only_versions() {
    let temp_dir = setup_test_dir();
    let test_dir = temp_dir.path().to_str().unwrap();
    write_table(test_dir);

    let (code, stdout, _) = run_command(&["releases", "--all", "--json"], test_dir);

    assert_eq!(code, Some(0));
    assert!(stdout.contains("\"8.1.8\""));
    assert!(stdout.contains("\"8.0.21\""));
    assert!(stdout.contains("\"enabled\": false"));
    assert!(!stdout.contains("\"8.3.0\""), "Release number 0 is not indexed");
}

#[test]
fn test_export_document() {
    let temp_dir = setup_test_dir();
    let test_dir = temp_dir.path().to_str().unwrap();
    write_table(test_dir);

    let (code, stdout, _) = run_command(&["export"], test_dir);

    assert_eq!(code, Some(0));
    assert!(stdout.contains("\"dev_version\": \"8.3.0-dev\""));
    assert!(stdout.contains("\"reported\""));
    assert!(stdout.contains("\"releases\""));
    assert!(!stdout.contains("7.4.27"), "Inactive versions are not exported");
}

#[test]
fn test_export_is_deterministic() {
    let temp_dir = setup_test_dir();
    let test_dir = temp_dir.path().to_str().unwrap();
    write_table(test_dir);

    let (_, first, _) = run_command(&["export"], test_dir);
    let (_, second, _) = run_command(&["export"], test_dir);

    assert_eq!(first, second);
}

#[test]
fn test_commands_fail_without_table() {
    let temp_dir = setup_test_dir();
    let test_dir = temp_dir.path().to_str().unwrap();

    let (code, stdout, stderr) = run_command(&["reported"], test_dir);

    assert_ne!(code, Some(0));
    assert!(stdout.is_empty(), "No partial output expected: {}", stdout);
    assert!(stderr.contains("qarel init"), "{}", stderr);
}

#[test]
fn test_invalid_release_number_aborts() {
    let temp_dir = setup_test_dir();
    let test_dir = temp_dir.path().to_str().unwrap();
    fs::write(
        format!("{}/qa-releases.toml", test_dir),
        r#"
[versions."8.1.8"]
active = true

[versions."8.1.8".release]
type = "RC"
number = "one"
"#,
    )
    .unwrap();

    let (code, stdout, stderr) = run_command(&["releases"], test_dir);

    assert_ne!(code, Some(0));
    assert!(stdout.is_empty(), "No partial output expected: {}", stdout);
    assert!(stderr.contains("invalid release table"), "{}", stderr);
}

#[test]
fn test_table_flag_reads_json() {
    let temp_dir = setup_test_dir();
    let test_dir = temp_dir.path().to_str().unwrap();
    let json_path = format!("{}/releases.json", test_dir);
    fs::write(
        &json_path,
        r#"{"versions": {"8.2.0": {"active": true, "release": {"type": "alpha", "number": 1}}}}"#,
    )
    .unwrap();

    let (code, stdout, _) = run_command(&["--table", &json_path, "reported"], test_dir);

    assert_eq!(code, Some(0));
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["8.2.0-dev", "8.2.0alpha1"]);
}

#[test]
fn test_check_healthy_table() {
    let temp_dir = setup_test_dir();
    let test_dir = temp_dir.path().to_str().unwrap();
    write_table(test_dir);
    // Drop the entry that has no base URL so nothing warns
    let path = format!("{}/qa-releases.toml", test_dir);
    let content = fs::read_to_string(&path)
        .unwrap()
        .replace("[versions.\"8.0.21\"]\nactive = true", "[versions.\"8.0.21\"]\nactive = false");
    fs::write(&path, content).unwrap();

    let (code, stdout, _) = run_command(&["check", "--json"], test_dir);

    assert_eq!(code, Some(0), "{}", stdout);
    assert!(stdout.contains("\"schema_version\": 1"));
    assert!(stdout.contains("\"status\": \"healthy\""));
}

#[test]
fn test_check_reports_drift() {
    let temp_dir = setup_test_dir();
    let test_dir = temp_dir.path().to_str().unwrap();
    write_table(test_dir);

    let (code, stdout, _) = run_command(&["check"], test_dir);

    assert_eq!(code, Some(1), "{}", stdout);
    assert!(stdout.contains("no base URL"), "{}", stdout);
}

#[test]
fn test_check_fails_without_table() {
    let temp_dir = setup_test_dir();
    let test_dir = temp_dir.path().to_str().unwrap();

    let (code, stdout, _) = run_command(&["check", "--json"], test_dir);

    assert_eq!(code, Some(2));
    assert!(stdout.contains("\"status\": \"failure\""));
}
