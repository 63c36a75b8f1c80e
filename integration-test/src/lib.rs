//! Test driver for getopt integration tests.
//!
//! Spawns `getopt-test` with:
//! - stdout: a pipe, one line per scan result
//! - stderr: a pipe, diagnostics and tracing output
//!
//! Both pipes are drained by background threads so a chatty child never
//! blocks on a full pipe.

use std::io::Read;
use std::process::{Child, ChildStderr, ChildStdout, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;

/// A running getopt-test process.
pub struct TestSession {
    child: Child,
    /// Captured stdout, populated by background thread.
    stdout_capture: Arc<Mutex<Vec<u8>>>,
    /// Captured stderr, populated by background thread.
    stderr_capture: Arc<Mutex<Vec<u8>>>,
    stdout_thread: thread::JoinHandle<()>,
    stderr_thread: thread::JoinHandle<()>,
}

/// Copy everything from `pipe` into `capture` until EOF.
fn drain<R: Read + Send + 'static>(mut pipe: R, capture: Arc<Mutex<Vec<u8>>>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut buf = [0u8; 4096];
        loop {
            match pipe.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    capture
                        .lock()
                        .unwrap_or_else(|e| e.into_inner())
                        .extend_from_slice(&buf[..n]);
                }
                Err(e) => {
                    eprintln!("drain error: {e}");
                    break;
                }
            }
        }
    })
}

impl TestSession {
    /// Spawn getopt-test with the given arguments.
    ///
    /// `binary` is the path to the getopt-test binary.
    /// `args` are the command-line arguments.
    /// `env` are additional environment variables to set. `POSIXLY_CORRECT`
    /// and `GETOPT_LOG` are cleared first so the caller's shell does not leak
    /// into the test.
    pub fn spawn(
        binary: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> std::io::Result<TestSession> {
        let mut cmd = Command::new(binary);
        cmd.args(args);
        cmd.env_remove("POSIXLY_CORRECT");
        cmd.env_remove("GETOPT_LOG");
        for (k, v) in env {
            cmd.env(k, v);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let mut child = cmd.spawn()?;

        let stdout_capture = Arc::new(Mutex::new(Vec::new()));
        let stderr_capture = Arc::new(Mutex::new(Vec::new()));
        let stdout: ChildStdout = child.stdout.take().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "child stdout not piped")
        })?;
        let stderr: ChildStderr = child.stderr.take().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "child stderr not piped")
        })?;
        let stdout_thread = drain(stdout, Arc::clone(&stdout_capture));
        let stderr_thread = drain(stderr, Arc::clone(&stderr_capture));

        Ok(TestSession {
            child,
            stdout_capture,
            stderr_capture,
            stdout_thread,
            stderr_thread,
        })
    }

    /// Wait for the child to exit and assert the exit code.
    pub fn wait_exit(mut self, expected_code: i32) -> SessionOutput {
        let status = self.child.wait().expect("failed to wait for child");
        let code = status.code().unwrap_or(-1);

        let _ = self.stdout_thread.join();
        let _ = self.stderr_thread.join();

        let stdout = String::from_utf8_lossy(&self.stdout_capture.lock().unwrap()).to_string();
        let stderr = String::from_utf8_lossy(&self.stderr_capture.lock().unwrap()).to_string();

        assert_eq!(
            code, expected_code,
            "expected exit code {expected_code}, got {code}\nstdout:\n{stdout}\nstderr:\n{stderr}"
        );

        SessionOutput { stdout, stderr }
    }
}

/// Output captured from a completed session.
pub struct SessionOutput {
    pub stdout: String,
    pub stderr: String,
}

impl SessionOutput {
    /// Scan result lines, without the trailing `optind`/`argv` summary.
    pub fn results(&self) -> Vec<&str> {
        self.stdout
            .lines()
            .filter(|l| !l.starts_with("optind ") && !l.starts_with("argv") && !l.starts_with("flag "))
            .collect()
    }

    /// Final cursor printed by the runner.
    pub fn optind(&self) -> usize {
        self.summary("optind ")
            .and_then(|v| v.parse().ok())
            .expect("no optind line in output")
    }

    /// Final vector (program name dropped) printed by the runner.
    pub fn argv(&self) -> Vec<&str> {
        self.summary("argv")
            .map(|v| v.split_whitespace().collect())
            .expect("no argv line in output")
    }

    /// Value of a `flag NAME=VALUE` line.
    pub fn flag(&self, name: &str) -> Option<i32> {
        let prefix = format!("flag {name}=");
        self.stdout
            .lines()
            .find_map(|l| l.strip_prefix(prefix.as_str()))
            .and_then(|v| v.parse().ok())
    }

    fn summary(&self, key: &str) -> Option<&str> {
        self.stdout.lines().find_map(|l| l.strip_prefix(key))
    }
}
