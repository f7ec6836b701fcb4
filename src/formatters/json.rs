use anyhow::Result;
use serde_json::json;
use std::fs;
use std::path::Path;

use crate::core::DependencyIndex;

/// JSON rendering of both mappings, keeping insertion order.
pub struct JsonFormatter {
    pretty: bool,
    with_stats: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self {
            pretty: true,
            with_stats: false,
        }
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    pub fn with_stats(mut self, with_stats: bool) -> Self {
        self.with_stats = with_stats;
        self
    }

    pub fn format_to_file(&self, index: &DependencyIndex, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.format(index)?)?;
        Ok(())
    }

    pub fn format(&self, index: &DependencyIndex) -> Result<String> {
        let mut output = json!({
            "forward": index.forward(),
            "reverse": index.reverse(),
        });
        if self.with_stats {
            output["stats"] = serde_json::to_value(index.stats())?;
        }

        let mut rendered = if self.pretty {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };
        rendered.push('\n');
        Ok(rendered)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}
