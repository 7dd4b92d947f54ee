use crate::render;
use axum::extract::Form;
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

/// Wall-clock bound on a whole invocation, including shell startup.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

/// Exit code reported when the gateway itself failed (timeout or launch
/// error) rather than the process exiting on its own.
pub const FAILURE_EXIT_CODE: i32 = -1;

/// Outcome of one execution request. Every failure mode of the gateway is
/// folded into this value; callers never see an error.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// The string as submitted, not normalized
    pub command: String,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandResult {
    fn failure(command: &str, stderr: String) -> Self {
        CommandResult {
            command: command.to_string(),
            stdout: String::new(),
            stderr,
            exit_code: FAILURE_EXIT_CODE,
        }
    }
}

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    // Own process group, so a timeout can take down the whole tree
    cmd.process_group(0);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

#[cfg(unix)]
fn kill_process_tree(pid: u32) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;
    let _ = killpg(Pid::from_raw(pid as i32), Signal::SIGKILL);
}

/// Kill the child's whole group and reap it, so nothing is left running
/// or zombied after the gateway gives up on it.
async fn terminate(child: &mut tokio::process::Child) {
    #[cfg(unix)]
    if let Some(pid) = child.id() {
        kill_process_tree(pid);
    }
    #[cfg(not(unix))]
    let _ = child.start_kill();
    let _ = child.wait().await;
}

/// Run `command` through the host shell with the fixed 10 second bound.
/// The string is handed to the shell verbatim: pipes, redirects and
/// chaining all mean what the shell says they mean.
pub async fn run_command(command: &str) -> CommandResult {
    run_command_with_timeout(command, COMMAND_TIMEOUT).await
}

pub async fn run_command_with_timeout(command: &str, limit: Duration) -> CommandResult {
    let mut cmd = shell_command(command);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => return CommandResult::failure(command, e.to_string()),
    };

    let mut stdout_pipe = child.stdout.take().expect("stdout piped");
    let mut stderr_pipe = child.stderr.take().expect("stderr piped");
    let stdout_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        let _ = stdout_pipe.read_to_end(&mut buf).await;
        buf
    });
    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        let _ = stderr_pipe.read_to_end(&mut buf).await;
        buf
    });

    match timeout(limit, child.wait()).await {
        Ok(Ok(status)) => {
            let stdout = stdout_task.await.unwrap_or_default();
            let stderr = stderr_task.await.unwrap_or_default();
            CommandResult {
                command: command.to_string(),
                stdout: String::from_utf8_lossy(&stdout).to_string(),
                stderr: String::from_utf8_lossy(&stderr).to_string(),
                exit_code: exit_code_of(&status),
            }
        }
        Ok(Err(e)) => {
            // wait() failing does not mean the child died; take it down
            // the same way a timeout would
            terminate(&mut child).await;
            stdout_task.abort();
            stderr_task.abort();
            CommandResult::failure(command, e.to_string())
        }
        Err(_) => {
            terminate(&mut child).await;
            stdout_task.abort();
            stderr_task.abort();
            CommandResult::failure(
                command,
                format!("command timed out after {} seconds", limit.as_secs()),
            )
        }
    }
}

#[cfg(unix)]
fn exit_code_of(status: &std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|s| 128 + s))
        .unwrap_or(FAILURE_EXIT_CODE)
}

#[cfg(not(unix))]
fn exit_code_of(status: &std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(FAILURE_EXIT_CODE)
}

#[derive(Deserialize)]
pub struct ExecForm {
    command: Option<String>,
}

pub async fn exec_page() -> Response {
    render::command_page(None).into_response()
}

pub async fn execute_command(Form(form): Form<ExecForm>) -> Response {
    let command = match form.command.as_deref() {
        Some(c) if !c.is_empty() => c,
        // Empty submission is a no-op back to the idle form, not an error
        _ => return Redirect::to("/exec").into_response(),
    };
    let result = run_command(command).await;
    render::command_page(Some(&result)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_stdout_and_exit_code() {
        let result = run_command("echo hello").await;
        assert_eq!(result.command, "echo hello");
        assert_eq!(result.stdout, "hello\n");
        assert_eq!(result.stderr, "");
        assert_eq!(result.exit_code, 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_stderr_and_nonzero_exit() {
        let result = run_command("echo oops >&2; exit 3").await;
        assert_eq!(result.stdout, "");
        assert_eq!(result.stderr, "oops\n");
        assert_eq!(result.exit_code, 3);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn shell_semantics_are_preserved() {
        // Pipes go through untouched: the gateway does no tokenization
        let result = run_command("printf 'a\\nb\\n' | wc -l").await;
        assert_eq!(result.stdout.trim(), "2");
        assert_eq!(result.exit_code, 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn timeout_kills_and_reports_sentinel() {
        let started = Instant::now();
        let result = run_command_with_timeout("sleep 30", Duration::from_secs(1)).await;
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(result.exit_code, FAILURE_EXIT_CODE);
        assert_eq!(result.stdout, "");
        assert!(result.stderr.contains("timed out"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn timeout_takes_down_child_processes_too() {
        let marker = format!("/tmp/mamba-exec-test-{}", std::process::id());
        let cmd = format!("(sleep 2 && touch {}) & sleep 30", marker);
        let _ = run_command_with_timeout(&cmd, Duration::from_secs(1)).await;

        // The background subprocess died with the group, so the marker
        // never appears
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(!std::path::Path::new(&marker).exists());
        let _ = std::fs::remove_file(&marker);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn terminate_kills_and_reaps_the_child() {
        let mut cmd = shell_command("sleep 30");
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        let mut child = cmd.spawn().unwrap();

        terminate(&mut child).await;

        // Already reaped: try_wait reports an exit status immediately
        let status = child.try_wait().unwrap();
        assert!(status.is_some());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn missing_binary_folds_into_the_result() {
        let result = run_command("definitely-not-a-real-binary-xyz").await;
        // The shell launches fine and reports the failure itself
        assert_ne!(result.exit_code, 0);
        assert!(!result.stderr.is_empty());
    }
}
