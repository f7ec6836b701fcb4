use anyhow::Result;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::core::{DependencyIndex, DependencyMap};

pub const FORWARD_HEADER: &str = "Forward Dependencies (Proxy --> KVMs):";
pub const REVERSE_HEADER: &str = "Reverse Dependencies (KVM --> Proxies):";

/// Plain-text report: one `name: a, b` line per entry, forward section first.
pub struct TextReportFormatter;

impl TextReportFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_to_file(&self, index: &DependencyIndex, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.format(index)?)?;
        Ok(())
    }

    pub fn format(&self, index: &DependencyIndex) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "{FORWARD_HEADER}")?;
        write_section(&mut out, index.forward())?;
        writeln!(out)?;
        writeln!(out, "{REVERSE_HEADER}")?;
        write_section(&mut out, index.reverse())?;
        Ok(out)
    }
}

impl Default for TextReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_section(out: &mut String, map: &DependencyMap) -> std::fmt::Result {
    for (name, refs) in map {
        writeln!(out, "{}: {}", name, refs.join(", "))?;
    }
    Ok(())
}
