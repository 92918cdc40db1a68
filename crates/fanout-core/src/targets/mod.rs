//! Target enumeration: turning a build description into script tasks
//!
//! A [`TargetSource`] produces the raw description (a map of target name to
//! properties) and a [`ScriptSelector`] picks out the targets that are
//! runnable analysis scripts.

mod description;
mod selector;
mod source;

pub use description::{TargetDescription, TargetProperties, parse_description};
pub use selector::{ACTION_TYPE, ROOT_MARKER, ScriptSelector};
pub use source::{DEFAULT_TREE, DescriptionFile, GnDescribe, TargetSource};

use crate::error::FanoutResult;
use crate::task::ScriptTask;

/// Describe the build and select its runnable scripts, in target name order
pub fn enumerate_scripts(
    source: &dyn TargetSource,
    selector: &ScriptSelector,
) -> FanoutResult<Vec<ScriptTask>> {
    let description = source.describe()?;
    let scripts = selector.select(&description);
    tracing::info!(
        targets = description.len(),
        scripts = scripts.len(),
        "Enumerated analysis scripts"
    );
    Ok(scripts)
}
