//! CLI integration tests for coffee-cache

use std::path::PathBuf;
use std::process::Command;

/// Get the path to the built binary
fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_coffee-cache"))
}

mod cli_behavior {
    use super::*;

    #[test]
    fn test_help_flag() {
        let output = Command::new(binary_path())
            .arg("--help")
            .output()
            .expect("Failed to run binary");

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Compile CoffeeScript"));
        assert!(stdout.contains("inline"));
        assert!(stdout.contains("compile"));
        assert!(stdout.contains("bundle"));
        assert!(stdout.contains("clear-cache"));
    }

    #[test]
    fn test_version_flag() {
        let output = Command::new(binary_path())
            .arg("--version")
            .output()
            .expect("Failed to run binary");

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("coffee-cache"));
    }

    #[test]
    fn test_missing_subcommand() {
        let output = Command::new(binary_path())
            .output()
            .expect("Failed to run binary");

        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Usage") || stderr.contains("subcommand"));
    }

    #[test]
    fn test_zero_threads_rejected() {
        let output = Command::new(binary_path())
            .args(["-j", "0", "compile", "a.coffee"])
            .output()
            .expect("Failed to run binary");

        assert_eq!(output.status.code(), Some(2));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Invalid configuration"));
    }

    #[test]
    fn test_missing_compiler_is_error() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("app.coffee"), "x = 1").unwrap();

        let output = Command::new(binary_path())
            .args(["--executable", "/nonexistent/coffee", "--static-root"])
            .arg(temp.path())
            .args(["compile", "app.coffee"])
            .output()
            .expect("Failed to run binary");

        assert_eq!(output.status.code(), Some(2));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Failed to run compiler"));
    }
}
