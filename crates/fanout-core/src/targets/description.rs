//! Build description data as emitted by `gn desc --format=json`

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{FanoutError, FanoutResult};

/// Target name to properties; ordered so enumeration is deterministic
pub type TargetDescription = BTreeMap<String, TargetProperties>;

/// The subset of target properties needed to find runnable scripts
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TargetProperties {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub script: Option<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
}

/// Parse a JSON description
pub fn parse_description(json: &[u8]) -> FanoutResult<TargetDescription> {
    serde_json::from_slice(json).map_err(|e| {
        FanoutError::enumeration_with_context(
            format!("Malformed build description: {}", e),
            "expected an object of target name to properties",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_unknown_properties() {
        let json = br#"{
            "//apps/foo:analysis": {
                "type": "action",
                "script": "//build/dart/gen_analyzer_invocation.py",
                "outputs": ["//out/debug/gen/apps/foo/analysis.sh"],
                "deps": ["//apps/foo:lib"],
                "toolchain": "//build/toolchain:host"
            },
            "//apps/foo:lib": { "type": "group" }
        }"#;

        let description = parse_description(json).unwrap();

        assert_eq!(description.len(), 2);
        let analysis = &description["//apps/foo:analysis"];
        assert_eq!(analysis.kind.as_deref(), Some("action"));
        assert_eq!(analysis.outputs.len(), 1);
        assert!(description["//apps/foo:lib"].outputs.is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_data() {
        let err = parse_description(b"[1, 2, 3]").unwrap_err();
        assert_eq!(err.error_code(), "FANOUT_ENUMERATION");

        let err = parse_description(br#"{"//a": {"outputs": "not-a-list"}}"#).unwrap_err();
        assert_eq!(err.error_code(), "FANOUT_ENUMERATION");
    }
}
