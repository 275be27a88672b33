//! CLI arg parsing tests for gazetop_publisher
use std::process::Command;

#[test]
fn test_help_lists_flags() {
    let out = Command::new(env!("CARGO_BIN_EXE_gazetop_publisher"))
        .arg("--help")
        .output()
        .expect("run publisher --help");
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stderr);
    for flag in ["--broker", "--port", "--topic", "--rate", "-r"] {
        assert!(text.contains(flag), "help missing {flag}\n{text}");
    }
}

#[test]
fn test_zero_rate_is_rejected() {
    let out = assert_cmd::Command::cargo_bin("gazetop_publisher")
        .unwrap()
        .args(["--rate", "0"])
        .output()
        .expect("run publisher");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("rate must be at least 1 second"));
}
