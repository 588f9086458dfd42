//! Error types for evaluator generation

use crate::ast::SymbolKind;
use thiserror::Error;

/// Fatal generation failures. No partial script is ever returned alongside one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("{}", missing_symbol_message(.kind, .name, .expression_id, .suggestion))]
    MissingSymbol {
        kind: SymbolKind,
        name: String,
        expression_id: Option<u32>,
        suggestion: Option<String>,
    },

    #[error("Unrecognized expression chunk kind '{kind}'")]
    UnrecognizedChunkKind { kind: String },

    #[error("Duplicate {kind} '{name}'")]
    DuplicateSymbol { kind: SymbolKind, name: String },
}

impl GeneratorError {
    /// Attach the id of the expression being compiled, if not already set.
    pub(crate) fn in_expression(self, id: u32) -> Self {
        match self {
            GeneratorError::MissingSymbol {
                kind,
                name,
                expression_id: None,
                suggestion,
            } => GeneratorError::MissingSymbol {
                kind,
                name,
                expression_id: Some(id),
                suggestion,
            },
            other => other,
        }
    }
}

fn missing_symbol_message(
    kind: &SymbolKind,
    name: &str,
    expression_id: &Option<u32>,
    suggestion: &Option<String>,
) -> String {
    let mut message = format!("Unknown {} '{}'", kind, name);
    if let Some(id) = expression_id {
        message.push_str(&format!(" referenced by expression {}", id));
    }
    if let Some(candidate) = suggestion {
        message.push_str(&format!(". Did you mean: {}?", candidate));
    }
    message
}
