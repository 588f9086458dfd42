//! Error types for loading report definitions

use reportgen_generator::GeneratorError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DefinitionError {
    #[error("Failed to read report definition {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse report definition JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate expression id {id} in unit '{unit}'")]
    DuplicateExpressionId { unit: String, id: u32 },

    #[error("Duplicate unit '{name}' in report definition")]
    DuplicateUnit { name: String },

    #[error("Sub-dataset #{index} has no name")]
    UnnamedSubDataset { index: usize },

    #[error("{}", unknown_unit_message(.name, .suggestion, .available))]
    UnknownUnit {
        name: String,
        suggestion: Option<String>,
        available: Vec<String>,
    },

    #[error("Invalid unit '{unit}': {source}")]
    Generator {
        unit: String,
        #[source]
        source: GeneratorError,
    },
}

fn unknown_unit_message(name: &str, suggestion: &Option<String>, available: &[String]) -> String {
    let mut message = format!("Unknown unit '{}'", name);
    if let Some(candidate) = suggestion {
        message.push_str(&format!(". Did you mean: {}?", candidate));
    } else if !available.is_empty() {
        message.push_str(&format!(". Available: {}", available.join(", ")));
    }
    message
}
