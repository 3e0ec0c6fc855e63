//! Running external commands with a deadline.

use std::ffi::OsStr;
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// How a command run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Exited with status 0
    Success(String),
    /// Exited with a non-zero status
    Failed { code: Option<i32>, stderr: String },
    /// Still running at the deadline; the process was killed
    TimedOut,
    /// Could not be started
    SpawnError(String),
}

fn drain<R: Read + Send + 'static>(reader: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut r) = reader {
            let _ = r.read_to_end(&mut buf);
        }
        buf
    })
}

fn wait_until(child: &mut Child, deadline: Instant) -> Option<ExitStatus> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Some(status),
            Ok(None) if Instant::now() >= deadline => return None,
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => {
                log::debug!("waiting for child failed: {e}");
                return None;
            }
        }
    }
}

/// Runs `program args...`, waiting at most `timeout`.
///
/// Stdout and stderr are read on helper threads so a child writing a lot of
/// output cannot block on a full pipe. Output is decoded lossily as UTF-8.
pub fn run_with_timeout<S: AsRef<OsStr>>(
    program: impl AsRef<OsStr>,
    args: &[S],
    timeout: Duration,
) -> CommandOutcome {
    let mut child = match Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => return CommandOutcome::SpawnError(e.to_string()),
    };

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let Some(status) = wait_until(&mut child, Instant::now() + timeout) else {
        let _ = child.kill();
        let _ = child.wait();
        return CommandOutcome::TimedOut;
    };

    let stdout = stdout.join().unwrap_or_default();
    let stderr = stderr.join().unwrap_or_default();

    if status.success() {
        CommandOutcome::Success(String::from_utf8_lossy(&stdout).into_owned())
    } else {
        CommandOutcome::Failed {
            code: status.code(),
            stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
        }
    }
}
