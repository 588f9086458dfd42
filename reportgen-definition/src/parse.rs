//! Report definition parsing utilities

use crate::error::DefinitionError;
use crate::types::ReportDefinition;
use std::fs;
use std::path::Path;

pub fn parse_definition_file<P: AsRef<Path>>(path: P) -> Result<ReportDefinition, DefinitionError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| DefinitionError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("Read report definition {} ({} bytes)", path.display(), content.len());
    parse_definition_content(&content)
}

pub fn parse_definition_content(content: &str) -> Result<ReportDefinition, DefinitionError> {
    Ok(serde_json::from_str(content)?)
}
