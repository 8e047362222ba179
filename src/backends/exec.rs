use crate::error::{Result, SunpkgError};
use crate::ui;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs the native package tools.
///
/// Implementations return the combined stdout and stderr text. With
/// `fail_on_nonzero` set, a nonzero exit becomes
/// [`SunpkgError::SystemCommandFailed`] carrying that text; otherwise the
/// text is returned regardless of the exit status so callers can inspect
/// `ERROR:` lines themselves.
pub trait CommandRunner: Send + Sync {
    fn execute(&self, program: &Path, args: &[String], fail_on_nonzero: bool) -> Result<String>;
}

/// Runs commands on the local system with a timeout.
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl CommandRunner for SystemRunner {
    fn execute(&self, program: &Path, args: &[String], fail_on_nonzero: bool) -> Result<String> {
        let display = display_command(program, args);
        let tool = tool_name(program);
        ui::debug(&format!("Executing {}", display));

        let failed = |reason: String| SunpkgError::SystemCommandFailed {
            command: display.clone(),
            reason,
        };

        // pkginfo error phrasing is matched literally
        let mut child = Command::new(program)
            .args(args)
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| failed(format!("cannot start {}: {}", tool, e)))?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = self.wait(&mut child, &tool).map_err(failed)?;
        let text = combine_output(
            &stdout.join().unwrap_or_default(),
            &stderr.join().unwrap_or_default(),
        );

        if fail_on_nonzero && !status.success() {
            let detail = text.trim();
            let status = describe_status(status);
            return Err(failed(if detail.is_empty() {
                status
            } else {
                format!("{}: {}", status, detail)
            }));
        }

        Ok(text)
    }
}

impl SystemRunner {
    /// Poll until the tool exits; kill it once the timeout has passed.
    fn wait(&self, child: &mut Child, tool: &str) -> std::result::Result<ExitStatus, String> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(status) = child
                .try_wait()
                .map_err(|e| format!("lost track of {}: {}", tool, e))?
            {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(format!(
                    "{} timed out after {:?} and was killed",
                    tool, self.timeout
                ));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Render an invocation for messages.
pub fn display_command(program: &Path, args: &[String]) -> String {
    std::iter::once(program.display().to_string())
        .chain(args.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// stdout followed by stderr, without introducing a blank line between them.
fn combine_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(stdout).into_owned();
    let err = String::from_utf8_lossy(stderr);
    if !err.is_empty() {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&err);
    }
    text
}

fn tool_name(program: &Path) -> String {
    program
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.display().to_string())
}

fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Read a pipe to the end on its own thread; a chatty `pkgadd` must never
/// stall on a full pipe while we wait for it.
fn drain<R>(pipe: Option<R>) -> JoinHandle<Vec<u8>>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

#[cfg(test)]
pub(crate) mod testing;
