//! Filtering options applied while a snapshot is parsed.

use crate::errors::ConfigError;
use crate::frame::Frame;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Controls which resolved frames survive parsing.
///
/// The default keeps every frame. All matching is case-insensitive substring
/// containment, so entries like `"microsoft"` or `".cargo"` cover whole
/// families of noise frames.
///
/// Deserializable from JSON with every field optional, for loading filter
/// profiles from config files:
///
/// ```json
/// {
///     "skip_frames_without_line_number": true,
///     "skip_frames_containing": ["testhost", "nunit"]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrubOptions {
    /// Drop frames that carry no line number. Frames from sources compiled
    /// without debug information lack one, so this usually reduces a trace to
    /// the caller's own code.
    #[serde(default)]
    pub skip_frames_without_line_number: bool,

    /// Deny-list: drop a frame when any entry occurs in its file path,
    /// namespace, type name, or method name.
    #[serde(default)]
    pub skip_frames_containing: HashSet<String>,

    /// Allow-list: when non-empty, keep only frames whose namespace contains
    /// at least one entry. Applied after the deny-list.
    #[serde(default)]
    pub show_only_frames_with_namespace: HashSet<String>,
}

impl ScrubOptions {
    /// Load options from a JSON file, treating absent fields as defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub(crate) fn has_allow_list(&self) -> bool {
        !self.show_only_frames_with_namespace.is_empty()
    }

    /// True when any deny-list entry matches one of the frame's searchable
    /// fields.
    pub(crate) fn is_denied(&self, frame: &Frame) -> bool {
        if self.skip_frames_containing.is_empty() {
            return false;
        }
        if let Some(path) = &frame.file_path {
            if self.deny_matches(path) {
                return true;
            }
        }
        if let Some(containing) = &frame.containing_type {
            if let Some(namespace) = &containing.namespace {
                if self.deny_matches(namespace) {
                    return true;
                }
            }
            if self.deny_matches(&containing.name) {
                return true;
            }
        }
        self.deny_matches(&frame.method_name)
    }

    /// True when the allow-list admits the frame's namespace. Frames without
    /// a namespace are never admitted; only call when an allow-list exists.
    pub(crate) fn is_allowed(&self, frame: &Frame) -> bool {
        let Some(namespace) = frame
            .containing_type
            .as_ref()
            .and_then(|containing| containing.namespace.as_deref())
        else {
            return false;
        };
        if namespace.is_empty() {
            return false;
        }
        let namespace = namespace.to_lowercase();
        self.show_only_frames_with_namespace
            .iter()
            .any(|entry| namespace.contains(&entry.to_lowercase()))
    }

    fn deny_matches(&self, field: &str) -> bool {
        let field = field.to_lowercase();
        self.skip_frames_containing
            .iter()
            .any(|entry| field.contains(&entry.to_lowercase()))
    }
}
