//! Exit status of a single script execution

use std::fmt;

/// Integer reported for a script that never started.
pub const LAUNCH_FAILED_CODE: i32 = -1;

/// How a script execution ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// The process ran and exited with this code
    Exited(i32),
    /// The process was terminated by this signal
    Signaled(i32),
    /// The process could not be started at all
    LaunchFailed,
}

impl TaskStatus {
    /// Only a clean zero exit counts as success
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Exited(0))
    }

    /// Integer form, following the shell convention of `128 + signal`
    pub fn code(&self) -> i32 {
        match self {
            Self::Exited(code) => *code,
            Self::Signaled(signal) => 128 + signal,
            Self::LaunchFailed => LAUNCH_FAILED_CODE,
        }
    }

    /// Convert a finished child's status
    pub fn from_exit_status(status: std::process::ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self::Exited(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self::Signaled(signal);
            }
        }

        // No code and no signal; treat it like a failed launch.
        Self::LaunchFailed
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exited(code) => write!(f, "exit code {}", code),
            Self::Signaled(signal) => write!(f, "signal {}", signal),
            Self::LaunchFailed => write!(f, "launch failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_is_exit_zero_only() {
        assert!(TaskStatus::Exited(0).is_success());
        assert!(!TaskStatus::Exited(2).is_success());
        assert!(!TaskStatus::Signaled(9).is_success());
        assert!(!TaskStatus::LaunchFailed.is_success());
    }

    #[test]
    fn test_codes() {
        assert_eq!(TaskStatus::Exited(3).code(), 3);
        assert_eq!(TaskStatus::Signaled(15).code(), 143);
        assert_eq!(TaskStatus::LaunchFailed.code(), LAUNCH_FAILED_CODE);
        assert_ne!(TaskStatus::LaunchFailed.code(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(TaskStatus::Exited(1).to_string(), "exit code 1");
        assert_eq!(TaskStatus::LaunchFailed.to_string(), "launch failed");
    }
}
