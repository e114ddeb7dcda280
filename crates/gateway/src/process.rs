//! Spawning a candidate and waiting for it, optionally with a deadline.

use crate::FailureReason;
use std::ffi::OsString;
use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Output of a process that exited successfully.
#[derive(Debug)]
pub(crate) struct Captured {
    pub stdout: String,
}

/// Runs `program` with `args`, stdin closed and stdout/stderr captured.
///
/// With a `timeout` the child is polled until the deadline and killed when it
/// passes; without one this blocks until the child exits. The deadline also
/// covers collecting the output, since a background process started by the
/// child can hold its pipes open after the child has exited.
pub(crate) fn run(
    program: &str,
    args: &[OsString],
    timeout: Option<Duration>,
) -> Result<Captured, FailureReason> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                FailureReason::NotFound
            } else {
                FailureReason::Spawn(e.to_string())
            }
        })?;

    let deadline = timeout.map(|limit| (Instant::now() + limit, limit));

    // Drain both pipes on their own threads so a chatty child cannot fill a pipe
    // buffer and stall while we wait on it.
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = match deadline {
        Some((at, limit)) => wait_with_deadline(&mut child, at, limit)?,
        None => child.wait().map_err(|e| FailureReason::Io(e.to_string()))?,
    };

    let stdout = collect(&stdout, deadline)?;
    let stderr = collect(&stderr, deadline)?;

    if status.success() {
        Ok(Captured { stdout })
    } else {
        Err(FailureReason::Exit {
            code: status.code(),
            stderr: stderr.trim().to_string(),
        })
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            // A read error just truncates the captured text.
            let _ = pipe.read_to_end(&mut buf);
        }
        // The receiver is gone when collection already timed out.
        let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
    });
    rx
}

/// Waits for a drained pipe. A pipe still open at the deadline is a timeout;
/// its reader thread is left to finish on its own.
fn collect(
    pipe: &Receiver<String>,
    deadline: Option<(Instant, Duration)>,
) -> Result<String, FailureReason> {
    let Some((at, limit)) = deadline else {
        return Ok(pipe.recv().unwrap_or_default());
    };
    match pipe.recv_timeout(at.saturating_duration_since(Instant::now())) {
        Ok(text) => Ok(text),
        Err(RecvTimeoutError::Timeout) => Err(FailureReason::TimedOut(limit)),
        Err(RecvTimeoutError::Disconnected) => Ok(String::new()),
    }
}

fn wait_with_deadline(
    child: &mut Child,
    deadline: Instant,
    limit: Duration,
) -> Result<ExitStatus, FailureReason> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) if Instant::now() >= deadline => {
                if let Err(e) = child.kill() {
                    // InvalidInput means the child exited between the poll and the kill.
                    if e.kind() != io::ErrorKind::InvalidInput {
                        return Err(FailureReason::Io(e.to_string()));
                    }
                }
                let _ = child.wait();
                return Err(FailureReason::TimedOut(limit));
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => return Err(FailureReason::Io(e.to_string())),
        }
    }
}
