//! Where build descriptions come from

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::description::{TargetDescription, parse_description};
use crate::error::{FanoutError, FanoutResult};

/// Subtree pattern that matches every target
pub const DEFAULT_TREE: &str = "*";

/// Produces the build description to enumerate scripts from
pub trait TargetSource {
    fn describe(&self) -> FanoutResult<TargetDescription>;
}

/// Runs `gn desc <out> <tree> --format=json` from the source root
#[derive(Debug, Clone)]
pub struct GnDescribe {
    gn: String,
    root: PathBuf,
    out_dir: PathBuf,
    tree: String,
}

impl GnDescribe {
    pub fn new(
        gn: impl Into<String>,
        root: impl Into<PathBuf>,
        out_dir: impl Into<PathBuf>,
        tree: impl Into<String>,
    ) -> Self {
        Self {
            gn: gn.into(),
            root: root.into(),
            out_dir: out_dir.into(),
            tree: tree.into(),
        }
    }

    fn command_line(&self) -> String {
        format!(
            "{} desc {} {} --format=json",
            self.gn,
            self.out_dir.display(),
            self.tree
        )
    }
}

impl TargetSource for GnDescribe {
    fn describe(&self) -> FanoutResult<TargetDescription> {
        tracing::debug!(
            root = %self.root.display(),
            "Describing build: {}",
            self.command_line()
        );

        let output = Command::new(&self.gn)
            .arg("desc")
            .arg(&self.out_dir)
            .arg(&self.tree)
            .arg("--format=json")
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                FanoutError::enumeration_with_context(
                    format!("Failed to run '{}': {}", self.gn, e),
                    self.command_line(),
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FanoutError::enumeration_with_context(
                format!(
                    "'{}' exited with {}: {}",
                    self.gn,
                    output.status,
                    stderr.trim()
                ),
                self.command_line(),
            ));
        }

        parse_description(&output.stdout)
    }
}

/// Reads a description previously saved from `gn desc --format=json`
#[derive(Debug, Clone)]
pub struct DescriptionFile {
    path: PathBuf,
}

impl DescriptionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TargetSource for DescriptionFile {
    fn describe(&self) -> FanoutResult<TargetDescription> {
        tracing::debug!("Reading build description from {}", self.path.display());
        let bytes = std::fs::read(&self.path).map_err(|e| {
            FanoutError::io_with_path(
                format!("Failed to read build description: {}", e),
                self.path.display().to_string(),
            )
        })?;
        parse_description(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_description_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("desc.json");
        fs::write(&path, r#"{"//a:b": {"type": "action"}}"#).unwrap();

        let description = DescriptionFile::new(&path).describe().unwrap();
        assert!(description.contains_key("//a:b"));
    }

    #[test]
    fn test_missing_description_file() {
        let dir = TempDir::new().unwrap();
        let err = DescriptionFile::new(dir.path().join("missing.json"))
            .describe()
            .unwrap_err();
        assert_eq!(err.error_code(), "FANOUT_IO");
    }

    #[test]
    fn test_missing_gn_binary() {
        let dir = TempDir::new().unwrap();
        let source = GnDescribe::new(
            dir.path().join("no-such-gn").display().to_string(),
            dir.path(),
            "out/debug",
            DEFAULT_TREE,
        );
        let err = source.describe().unwrap_err();
        assert_eq!(err.error_code(), "FANOUT_ENUMERATION");
        assert!(err.context().unwrap().contains("desc out/debug *"));
    }

    #[cfg(unix)]
    #[test]
    fn test_gn_invocation_and_failure() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let gn = dir.path().join("fake-gn");
        fs::write(
            &gn,
            "#!/bin/sh\n\
             if [ \"$3\" = \"//broken/*\" ]; then echo 'unknown label' >&2; exit 1; fi\n\
             echo \"{\\\"$2 $3 $4\\\": {}}\"\n",
        )
        .unwrap();
        fs::set_permissions(&gn, fs::Permissions::from_mode(0o755)).unwrap();
        let gn = gn.display().to_string();

        let description = GnDescribe::new(&gn, dir.path(), "out/x64", "//apps/*")
            .describe()
            .unwrap();
        assert!(description.contains_key("out/x64 //apps/* --format=json"));

        let err = GnDescribe::new(&gn, dir.path(), "out/x64", "//broken/*")
            .describe()
            .unwrap_err();
        assert!(err.to_string().contains("unknown label"));
    }
}
