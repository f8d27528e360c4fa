//! Assembly of the proposed values passed to the update commands.
//!
//! Sources are applied in order, each deep-merged over the previous ones:
//! the `--json` object, the `--from` file, then every `--set` pair.

use std::path::Path;
use std::sync::Arc;

use config_updater::{
    deep_merge, ConfigLoader, FormatRegistry, LocalFileSystem, StructuredValue,
};
use serde_json::Map;
use tracing::debug;

use crate::errors::Error;

#[cfg(test)]
#[path = "proposal_tests.rs"]
mod tests;

/// Splits a `KEY=VALUE` argument at the first `=`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no `=` found in `{}`", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Interprets a `--set` value as a JSON scalar, falling back to plain text.
pub fn parse_scalar(text: &str) -> StructuredValue {
    match serde_json::from_str::<StructuredValue>(text) {
        Ok(value) if !value.is_array() && !value.is_object() => value,
        _ => StructuredValue::String(text.to_string()),
    }
}

/// Stores `value` at the dotted `key` path, creating intermediate mappings.
///
/// An existing non-mapping value on the path is replaced by a mapping.
pub fn set_path(
    target: &mut Map<String, StructuredValue>,
    key: &str,
    value: StructuredValue,
) -> Result<(), Error> {
    let segments: Vec<&str> = key.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(Error::InvalidArguments(format!(
            "invalid key path `{}`",
            key
        )));
    }

    let Some((last, parents)) = segments.split_last() else {
        return Err(Error::InvalidArguments("empty key path".to_string()));
    };

    let mut current = target;
    for segment in parents {
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| StructuredValue::Object(Map::new()));
        if !entry.is_object() {
            *entry = StructuredValue::Object(Map::new());
        }
        let StructuredValue::Object(map) = entry else {
            return Err(Error::InvalidArguments(format!("invalid key path `{}`", key)));
        };
        current = map;
    }
    current.insert(last.to_string(), value);
    Ok(())
}

/// Builds the proposed configuration from the command-line sources.
///
/// # Errors
///
/// * `Error::InvalidArguments` - no source was given, `--json` is not a JSON
///   object, or a `--set` key path is malformed
/// * `Error::Update` - the `--from` file could not be loaded
pub async fn build_proposal(
    json: Option<&str>,
    from: Option<&Path>,
    file_type: Option<&str>,
    sets: &[(String, String)],
) -> Result<StructuredValue, Error> {
    if json.is_none() && from.is_none() && sets.is_empty() {
        return Err(Error::InvalidArguments(
            "provide proposed values with --json, --from or --set".to_string(),
        ));
    }

    let mut proposal = StructuredValue::Object(Map::new());

    if let Some(text) = json {
        let value: StructuredValue = serde_json::from_str(text)
            .map_err(|e| Error::InvalidArguments(format!("--json is not valid JSON: {}", e)))?;
        if !value.is_object() {
            return Err(Error::InvalidArguments(
                "--json must be a JSON object".to_string(),
            ));
        }
        proposal = deep_merge(&proposal, &value);
    }

    if let Some(path) = from {
        let loader = ConfigLoader::new(
            Arc::new(FormatRegistry::new()),
            Arc::new(LocalFileSystem),
        );
        let loaded = loader.load(path, file_type, None).await?;
        debug!(path = %path.display(), format = loaded.handler.name(), "Loaded proposal file");
        proposal = deep_merge(&proposal, &loaded.value);
    }

    if !sets.is_empty() {
        let mut overrides = Map::new();
        for (key, value) in sets {
            set_path(&mut overrides, key, parse_scalar(value))?;
        }
        proposal = deep_merge(&proposal, &StructuredValue::Object(overrides));
    }

    Ok(proposal)
}
