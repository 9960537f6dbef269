//! Exit behaviour of the `repo-crawl` binary.

use std::process::Command;

#[test]
fn bad_api_url_prints_one_line_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_repo-crawl"))
        .args(["LTLA", "libscran", "master", "--api-url", "mailto:someone@example.com"])
        .env_remove("GITHUB_TOKEN")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("✗ invalid API base URL"), "stderr was {:?}", stderr);
    assert!(!stderr.contains("Error:"));
}

#[test]
fn missing_local_repository_prints_one_line_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");

    let output = Command::new(env!("CARGO_BIN_EXE_repo-crawl"))
        .args(["local", "demo", "HEAD", "--local"])
        .arg(&missing)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("✗ failed to open repository"), "stderr was {:?}", stderr);
}
