use std::{
    fmt::Debug,
    io,
    process::{Command, Stdio},
    thread,
    time::{Duration, Instant},
};

use miette::{ensure, IntoDiagnostic, Result, WrapErr};

use crate::log;

pub fn exec<S: AsRef<str> + Debug>(args: &[S]) -> Result<()> {
    ensure!(!args.is_empty(), "no command provided to exec");

    log!("Running": "{args:?}");

    let status = Command::new(args[0].as_ref())
        .args(args[1..].iter().map(|s| s.as_ref()))
        .status()
        .into_diagnostic()
        .wrap_err("exec failed")?;
    ensure!(status.success(), "command returned non-successful status");

    Ok(())
}

/// Runs a command with both output streams discarded.
pub fn silent<S: AsRef<str> + Debug>(args: &[S]) -> Result<()> {
    ensure!(!args.is_empty(), "no command provided to exec");

    log!("Running" ("silently"): "{args:?}");

    let status = Command::new(args[0].as_ref())
        .args(args[1..].iter().map(|s| s.as_ref()))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .into_diagnostic()
        .wrap_err("exec failed")?;
    ensure!(status.success(), "command returned non-successful status");

    Ok(())
}

pub fn capturing_stdout<S: AsRef<str> + Debug>(args: &[S]) -> Result<String> {
    ensure!(!args.is_empty(), "no command provided to exec");

    log!("Running" ("with capture"): "{args:?}");

    let out = Command::new(args[0].as_ref())
        .args(args[1..].iter().map(|s| s.as_ref()))
        .output()
        .into_diagnostic()
        .wrap_err("exec failed")?;
    ensure!(
        out.status.success(),
        "command returned non-successful status"
    );

    Ok(String::from_utf8_lossy(&out.stdout).to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Success,
    Failure,
    TimedOut,
}

/// Runs a command with all streams discarded, killing it if it does not
/// finish within `timeout`.
pub fn silent_with_timeout<S: AsRef<str> + Debug>(
    args: &[S],
    timeout: Duration,
) -> io::Result<Completion> {
    assert!(!args.is_empty());

    log!("Checking": "{args:?}");

    let mut child = Command::new(args[0].as_ref())
        .args(args[1..].iter().map(|s| s.as_ref()))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(if status.success() {
                Completion::Success
            } else {
                Completion::Failure
            });
        }

        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(Completion::TimedOut);
        }

        thread::sleep(Duration::from_millis(50));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capturing_stdout_returns_output() {
        let out = capturing_stdout(&["echo", "hello"]).unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[test]
    fn exec_fails_on_nonzero_status() {
        assert!(silent(&["false"]).is_err());
    }

    #[test]
    fn timeout_kills_slow_commands() {
        let outcome = silent_with_timeout(&["sleep", "5"], Duration::from_millis(200)).unwrap();
        assert_eq!(outcome, Completion::TimedOut);
    }

    #[test]
    fn timeout_reports_fast_commands() {
        let outcome = silent_with_timeout(&["true"], Duration::from_secs(5)).unwrap();
        assert_eq!(outcome, Completion::Success);
    }

    #[test]
    fn missing_binary_is_an_io_error() {
        let err = silent_with_timeout(&["idebox-no-such-binary"], Duration::from_secs(1));
        assert_eq!(err.unwrap_err().kind(), io::ErrorKind::NotFound);
    }
}
