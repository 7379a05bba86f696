use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::time::{Duration, Instant};

/// Timeout for local git queries
pub const GIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for `gh` calls, which go over the network
pub const GH_TIMEOUT: Duration = Duration::from_secs(10);

/// Run `program args..` in `cwd` and return its trimmed stdout.
///
/// Returns `None` if the program is missing, exits non-zero, or has not
/// finished within `timeout`. A child still running at the deadline is
/// killed. Output is abandoned when a background grandchild keeps the pipe
/// open past the deadline.
pub fn run(program: &str, args: &[&str], cwd: &Path, timeout: Duration) -> Option<String> {
    let deadline = Instant::now() + timeout;
    let mut child = match Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            log::debug!("could not spawn {}: {}", program, e);
            return None;
        }
    };

    // Drain stdout on a thread so a chatty child can't block on a full pipe
    let mut stdout = child.stdout.take()?;
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let mut buf = String::new();
        let _ = stdout.read_to_string(&mut buf);
        let _ = tx.send(buf);
    });

    let status = wait_until(&mut child, deadline, program, args)?;
    let output = match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(output) => output,
        Err(_) => {
            log::warn!("{} {:?} left its output open past {:?}", program, args, timeout);
            return None;
        }
    };
    if !status.success() {
        log::debug!("{} {:?} exited with {}", program, args, status);
        return None;
    }
    Some(output.trim().to_string())
}

/// Start a program whose output is not wanted, such as a browser opener.
/// True when it exits successfully within `timeout`.
pub fn launch(program: &str, args: &[&str], cwd: &Path, timeout: Duration) -> bool {
    let mut child = match Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            log::debug!("could not spawn {}: {}", program, e);
            return false;
        }
    };
    wait_until(&mut child, Instant::now() + timeout, program, args)
        .is_some_and(|status| status.success())
}

/// Poll `child` until it exits, killing it at `deadline`
fn wait_until(
    child: &mut Child,
    deadline: Instant,
    program: &str,
    args: &[&str],
) -> Option<ExitStatus> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Some(status),
            Ok(None) if Instant::now() < deadline => {
                std::thread::sleep(Duration::from_millis(10));
            }
            Ok(None) => {
                log::warn!("{} {:?} timed out", program, args);
                let _ = child.kill();
                let _ = child.wait();
                return None;
            }
            Err(e) => {
                log::debug!("waiting on {} failed: {}", program, e);
                return None;
            }
        }
    }
}

/// Run a command to completion, discarding output. True on success.
pub fn run_status(program: &str, args: &[&str]) -> bool {
    match Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(status) => status.success(),
        Err(e) => {
            log::debug!("could not run {}: {}", program, e);
            false
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_run_captures_stdout() {
        let out = run("sh", &["-c", "echo '  hello  '"], Path::new("."), GIT_TIMEOUT);
        assert_eq!(out.as_deref(), Some("hello"));
    }

    #[test]
    fn test_run_failure_is_none() {
        assert!(run("sh", &["-c", "exit 3"], Path::new("."), GIT_TIMEOUT).is_none());
    }

    #[test]
    fn test_run_missing_program_is_none() {
        assert!(run("hangar-no-such-binary", &[], Path::new("."), GIT_TIMEOUT).is_none());
    }

    #[test]
    fn test_run_timeout_kills_child() {
        let start = Instant::now();
        let out = run("sh", &["-c", "sleep 5"], Path::new("."), Duration::from_millis(100));
        assert!(out.is_none());
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_run_does_not_wait_for_background_grandchild() {
        let start = Instant::now();
        let out = run(
            "sh",
            &["-c", "sleep 3 & echo hi"],
            Path::new("."),
            Duration::from_millis(200),
        );
        assert!(out.is_none());
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_launch_ignores_background_grandchild() {
        let start = Instant::now();
        assert!(launch(
            "sh",
            &["-c", "sleep 3 & echo hi"],
            Path::new("."),
            Duration::from_secs(2),
        ));
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_launch_failures() {
        assert!(!launch("sh", &["-c", "exit 1"], Path::new("."), GIT_TIMEOUT));
        assert!(!launch("hangar-no-such-binary", &[], Path::new("."), GIT_TIMEOUT));
        assert!(!launch("sh", &["-c", "sleep 5"], Path::new("."), Duration::from_millis(100)));
    }

    #[test]
    fn test_run_status() {
        assert!(run_status("sh", &["-c", "true"]));
        assert!(!run_status("sh", &["-c", "false"]));
        assert!(!run_status("hangar-no-such-binary", &[]));
    }
}
