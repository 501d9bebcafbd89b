use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{anyhow, Result};
use tempfile::TempDir;

// Points the binary at a port nothing listens on: every read fails fast and
// the dashboard must fall back instead of crashing.
const UNREACHABLE_BACKEND: &str = "http://127.0.0.1:1";

fn run_with_commands(commands: &str) -> Result<std::process::Output> {
    let binary_path = env!("CARGO_BIN_EXE_transaction-dashboard");

    let mut child = Command::new(binary_path)
        .env("API_URL", UNREACHABLE_BACKEND)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    child.stdin.as_mut()
        .ok_or_else(|| anyhow!("Child stdin was not piped"))?
        .write_all(commands.as_bytes())?;

    Ok(child.wait_with_output()?)
}

#[test]
fn test_cli_renders_fallbacks_when_backend_is_unreachable() -> Result<()> {
    let output = run_with_commands("show\nquit\n")?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Balance: 0"));
    assert!(stdout.contains("Failed transactions: none"));

    Ok(())
}

#[test]
fn test_cli_surfaces_validation_error_for_non_csv_file() -> Result<()> {
    let directory = TempDir::new()?;
    let path = directory.path().join("report.txt");
    std::fs::write(&path, b"not,a,csv,upload")?;

    let commands = format!("open\nchoose {}\nshow\nquit\n", path.display());
    let output = run_with_commands(&commands)?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("-- Upload Transaction --"));
    assert!(stdout.contains("! Please upload a CSV file"));
    assert!(stdout.contains("Upload Transaction (disabled)"));

    Ok(())
}

#[test]
fn test_cli_escape_closes_the_dialog() -> Result<()> {
    let output = run_with_commands("open\nesc\nquit\n")?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let renders: Vec<&str> = stdout.split("Balance: 0").collect();

    // Renders: initial, after `open` (dialog visible), after `esc` (gone).
    assert_eq!(renders.len(), 4);
    assert!(renders[2].contains("-- Upload Transaction --"));
    assert!(!renders[3].contains("-- Upload Transaction --"));

    Ok(())
}
