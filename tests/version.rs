//! Integration test: the binary reports its name and version

use std::process::Command;

#[test]
fn version_flag_prints_name_and_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_foldlog"))
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        format!("foldlog {}", env!("CARGO_PKG_VERSION")),
        "unexpected --version output: {stdout}"
    );
}

#[test]
fn unknown_theme_is_rejected_before_writing() {
    let dir = std::env::temp_dir().join(format!("foldlog-version-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let html = dir.join("never.html");

    let output = Command::new(env!("CARGO_BIN_EXE_foldlog"))
        .arg("--theme")
        .arg("neon")
        .arg("--html")
        .arg(&html)
        .env("FOLDLOG_CONFIG", dir.join("missing.toml"))
        .env("XDG_STATE_HOME", &dir)
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("neon"));
    assert!(!html.exists());
    std::fs::remove_dir_all(dir).ok();
}
