//! Running a single script to completion
//!
//! Execution is synchronous: spawn, collect both output streams, wait. There
//! is no timeout, so a script that never exits keeps its worker busy forever.

use std::process::{Command, Stdio};
use std::time::Instant;

use tracing::instrument;

use crate::task::{ExecutionResult, ExtraArgs, ScriptTask, TaskStatus};

/// Runs one task and reports how it ended
///
/// Implementations must always return a result, including when the task
/// cannot be started. The worker pool relies on this to post exactly one
/// result per claimed task.
pub trait TaskExecutor: Send + Sync {
    fn execute(&self, task: &ScriptTask, args: &ExtraArgs) -> ExecutionResult;
}

/// Executes each task as a child process
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl TaskExecutor for ProcessExecutor {
    #[instrument(skip_all, fields(script = %task))]
    fn execute(&self, task: &ScriptTask, args: &ExtraArgs) -> ExecutionResult {
        let start = Instant::now();

        let output = Command::new(task.path())
            .args(args.as_slice())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        let result = match output {
            Ok(output) => {
                let mut merged = output.stdout;
                merged.extend_from_slice(&output.stderr);
                ExecutionResult::new(
                    task.clone(),
                    TaskStatus::from_exit_status(output.status),
                    merged,
                )
            }
            Err(e) => {
                tracing::warn!("Failed to launch {}: {}", task, e);
                ExecutionResult::launch_failed(task.clone(), e)
            }
        };

        let result = result.with_duration(start.elapsed());
        tracing::debug!(
            status = %result.status,
            output_bytes = result.output.len(),
            elapsed_ms = result.duration.as_millis() as u64,
            "Script finished"
        );
        result
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_script(dir: &Path, name: &str, body: &str) -> ScriptTask {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        ScriptTask::new(path)
    }

    #[test]
    fn test_captures_stdout_then_stderr() {
        let dir = TempDir::new().unwrap();
        let task = write_script(dir.path(), "both.sh", "echo out\necho err >&2");

        let result = ProcessExecutor::new().execute(&task, &ExtraArgs::default());

        assert_eq!(result.status, TaskStatus::Exited(0));
        assert_eq!(String::from_utf8(result.output).unwrap(), "out\nerr\n");
    }

    #[test]
    fn test_passes_extra_args() {
        let dir = TempDir::new().unwrap();
        let task = write_script(dir.path(), "args.sh", "echo \"$@\"");
        let args = ExtraArgs::new(vec!["--fatal-warnings".to_string(), "x y".to_string()]);

        let result = ProcessExecutor::new().execute(&task, &args);

        assert_eq!(
            String::from_utf8(result.output).unwrap(),
            "--fatal-warnings x y\n"
        );
    }

    #[test]
    fn test_non_zero_exit() {
        let dir = TempDir::new().unwrap();
        let task = write_script(dir.path(), "fail.sh", "exit 2");

        let result = ProcessExecutor::new().execute(&task, &ExtraArgs::default());

        assert_eq!(result.status, TaskStatus::Exited(2));
        assert!(!result.is_success());
    }

    #[test]
    fn test_stdin_is_closed() {
        let dir = TempDir::new().unwrap();
        let task = write_script(dir.path(), "stdin.sh", "cat; echo done");

        let result = ProcessExecutor::new().execute(&task, &ExtraArgs::default());

        assert_eq!(String::from_utf8(result.output).unwrap(), "done\n");
    }

    #[test]
    fn test_missing_script_is_launch_failure() {
        let dir = TempDir::new().unwrap();
        let task = ScriptTask::new(dir.path().join("does-not-exist.sh"));

        let result = ProcessExecutor::new().execute(&task, &ExtraArgs::default());

        assert_eq!(result.status, TaskStatus::LaunchFailed);
        assert!(!result.output.is_empty());
    }

    #[test]
    fn test_non_executable_is_launch_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.sh");
        fs::write(&path, "#!/bin/sh\necho hi\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let result = ProcessExecutor::new().execute(&ScriptTask::new(path), &ExtraArgs::default());

        assert_eq!(result.status, TaskStatus::LaunchFailed);
    }
}
