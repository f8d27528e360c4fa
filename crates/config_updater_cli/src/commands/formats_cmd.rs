//! Listing of the supported configuration formats.

use config_updater::FormatRegistry;
use tracing::instrument;

use crate::errors::Error;

#[cfg(test)]
#[path = "formats_cmd_tests.rs"]
mod tests;

/// Renders the registered handlers as a table, or as JSON when `json` is set.
#[instrument(skip(registry))]
pub fn render(registry: &FormatRegistry, json: bool) -> Result<String, Error> {
    let descriptors = registry.descriptors();
    if json {
        return serde_json::to_string_pretty(&descriptors)
            .map(|text| text + "\n")
            .map_err(|e| Error::Output(e.to_string()));
    }

    let mut output = format!("{:<12}{}\n", "FORMAT", "EXTENSIONS");
    for descriptor in descriptors {
        output.push_str(&format!(
            "{:<12}{}\n",
            descriptor.name,
            descriptor.extensions.join(", ")
        ));
    }
    Ok(output)
}
