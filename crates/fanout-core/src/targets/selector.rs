//! Picks the runnable analysis scripts out of a build description

use std::path::{Path, PathBuf};

use super::description::{TargetDescription, TargetProperties};
use crate::task::ScriptTask;

/// Target type of runnable script targets
pub const ACTION_TYPE: &str = "action";

/// Prefix marking a path as relative to the source root
pub const ROOT_MARKER: &str = "//";

/// Decides which targets are scripts and where their executables live
#[derive(Debug, Clone)]
pub struct ScriptSelector {
    generator: String,
    root: PathBuf,
}

impl ScriptSelector {
    pub fn new(generator: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            generator: generator.into(),
            root: root.into(),
        }
    }

    /// Scripts for every matching target, in target name order
    pub fn select(&self, description: &TargetDescription) -> Vec<ScriptTask> {
        description
            .iter()
            .filter_map(|(name, properties)| {
                let script = self.script_for(properties);
                if script.is_none() {
                    tracing::trace!(target_name = %name, "Skipping target");
                }
                script
            })
            .collect()
    }

    /// The executable for one target, if it is a runnable script
    ///
    /// The target must be an action generated by the configured generator
    /// and declare at least one output; the first output is the script.
    pub fn script_for(&self, properties: &TargetProperties) -> Option<ScriptTask> {
        if properties.kind.as_deref() != Some(ACTION_TYPE) {
            return None;
        }
        if properties.script.as_deref() != Some(self.generator.as_str()) {
            return None;
        }
        let output = properties.outputs.first()?;
        Some(ScriptTask::new(self.resolve(output)))
    }

    /// `//`-prefixed and relative paths are joined onto the root
    fn resolve(&self, output: &str) -> PathBuf {
        match output.strip_prefix(ROOT_MARKER) {
            Some(relative) => self.root.join(relative),
            None if Path::new(output).is_absolute() => PathBuf::from(output),
            None => self.root.join(output),
        }
    }
}
