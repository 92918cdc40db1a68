//! Script tasks, passthrough arguments and execution results

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::status::TaskStatus;

/// One analysis script slated for execution
///
/// Equality and ordering compare the raw path text, so `/src/a-c.sh` sorts
/// before `/src/a/b.sh` in the failure report.
#[derive(Debug, Clone)]
pub struct ScriptTask(PathBuf);

impl ScriptTask {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl PartialEq for ScriptTask {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_os_str() == other.0.as_os_str()
    }
}

impl Eq for ScriptTask {}

impl Hash for ScriptTask {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.as_os_str().hash(state);
    }
}

impl PartialOrd for ScriptTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScriptTask {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.as_os_str().cmp(other.0.as_os_str())
    }
}

impl From<PathBuf> for ScriptTask {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl From<&str> for ScriptTask {
    fn from(path: &str) -> Self {
        Self(PathBuf::from(path))
    }
}

impl fmt::Display for ScriptTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Arguments forwarded verbatim to every script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraArgs(Vec<String>);

impl ExtraArgs {
    pub fn new(args: Vec<String>) -> Self {
        Self(args)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for ExtraArgs {
    fn from(args: Vec<String>) -> Self {
        Self(args)
    }
}

/// Outcome of running one task, posted by a worker to the aggregator
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub task: ScriptTask,
    pub status: TaskStatus,
    /// stdout followed by stderr
    pub output: Vec<u8>,
    pub duration: Duration,
}

impl ExecutionResult {
    pub fn new(task: ScriptTask, status: TaskStatus, output: Vec<u8>) -> Self {
        Self {
            task,
            status,
            output,
            duration: Duration::ZERO,
        }
    }

    /// Result for a script that could not be started
    pub fn launch_failed(task: ScriptTask, reason: impl fmt::Display) -> Self {
        let output = format!("Failed to launch {}: {}\n", task, reason).into_bytes();
        Self::new(task, TaskStatus::LaunchFailed, output)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_sort_by_path() {
        let mut tasks = vec![
            ScriptTask::from("/src/c.sh"),
            ScriptTask::from("/src/a.sh"),
            ScriptTask::from("/src/b.sh"),
        ];
        tasks.sort();
        let names: Vec<String> = tasks.iter().map(|t| t.to_string()).collect();
        assert_eq!(names, vec!["/src/a.sh", "/src/b.sh", "/src/c.sh"]);
    }

    #[test]
    fn test_launch_failed_result() {
        let result = ExecutionResult::launch_failed(
            ScriptTask::from("/missing.sh"),
            "No such file or directory",
        );
        assert_eq!(result.status, TaskStatus::LaunchFailed);
        assert!(!result.is_success());
        let text = String::from_utf8(result.output).unwrap();
        assert!(text.contains("/missing.sh"));
        assert!(text.contains("No such file or directory"));
    }
}
