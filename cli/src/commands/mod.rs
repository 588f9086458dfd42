pub mod config;
pub mod expression;
pub mod generate;
pub mod list;

use anyhow::{Context, Result};
use reportgen_definition::{parse_definition_file, ReportDefinition};

/// Load a report definition, attaching the path to any failure.
pub(crate) fn load_definition(path: &str) -> Result<ReportDefinition> {
    parse_definition_file(path)
        .with_context(|| format!("Failed to load report definition: {}", path))
}
