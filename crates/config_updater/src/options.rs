//! Options controlling how a proposed configuration is applied.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;

/// How the proposed values are combined with the existing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// The proposed value replaces the existing configuration wholesale.
    Replace,
    /// Mappings merge recursively and sequences concatenate.
    Deep,
    /// Top-level keys of the proposed value overwrite existing keys as-is.
    Shallow,
}

/// Options for computing an updated configuration.
///
/// Every field has a default, so a partial TOML or JSON table deserializes
/// into a complete set of options.
///
/// # Examples
///
/// ```rust
/// use config_updater::{MergePolicy, UpdateOptions};
///
/// let options: UpdateOptions = serde_json::from_str(r#"{"deep_merge": false}"#)?;
/// assert_eq!(options.merge_policy(), MergePolicy::Shallow);
/// assert_eq!(options.default_content.as_deref(), Some(""));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateOptions {
    /// Use the proposed value verbatim and discard the existing one.
    pub replace_config: bool,

    /// When not replacing, merge nested mappings instead of overwriting
    /// top-level keys.
    pub deep_merge: bool,

    /// Skip the update computation when the proposed values are already
    /// present.
    pub check: bool,

    /// Text used in place of a missing file. `None` makes a missing file an
    /// error.
    pub default_content: Option<String>,
}

impl UpdateOptions {
    /// Returns the merge policy selected by these options.
    pub fn merge_policy(&self) -> MergePolicy {
        if self.replace_config {
            MergePolicy::Replace
        } else if self.deep_merge {
            MergePolicy::Deep
        } else {
            MergePolicy::Shallow
        }
    }

    /// Returns a copy with `check` set.
    pub fn with_check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            replace_config: false,
            deep_merge: true,
            check: false,
            default_content: Some(String::new()),
        }
    }
}
