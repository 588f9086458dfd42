//! Compiles expression chunks into script source for a given phase.

use crate::ast::{Expression, ExpressionChunk, GenerationContext, SymbolTable};
use crate::error::GeneratorError;
use crate::literal::{mangle_identifier, string_literal};
use crate::phase::EvaluationPhase;

/// Emitted in place of an expression with no chunks.
pub const NULL_LITERAL: &str = "null";

/// An expression's source text for one phase, paired with its declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledExpression {
    pub id: u32,
    pub phase: EvaluationPhase,
    pub result_type: String,
    pub source: String,
}

impl CompiledExpression {
    /// `(ResultType)(source)`. The declared type is trusted, never checked.
    pub fn cast_source(&self) -> String {
        format!("({})({})", self.result_type, self.source)
    }
}

pub struct ChunkCompiler<'a> {
    parameters: &'a SymbolTable,
    fields: &'a SymbolTable,
    variables: &'a SymbolTable,
}

impl<'a> ChunkCompiler<'a> {
    pub fn new(context: &'a GenerationContext) -> Self {
        Self {
            parameters: &context.parameters,
            fields: &context.fields,
            variables: &context.variables,
        }
    }

    pub fn compile(
        &self,
        chunks: &[ExpressionChunk],
        phase: EvaluationPhase,
    ) -> Result<String, GeneratorError> {
        let mut source = String::new();

        for chunk in chunks {
            match chunk {
                ExpressionChunk::Text(text) => source.push_str(text),
                ExpressionChunk::ParameterRef(name) => {
                    source.push_str(&holder_value(self.parameters, name, "getValue")?);
                }
                ExpressionChunk::FieldRef(name) => {
                    source.push_str(&holder_value(self.fields, name, &phase.field_getter())?);
                }
                ExpressionChunk::VariableRef(name) => {
                    source.push_str(&holder_value(
                        self.variables,
                        name,
                        &phase.variable_getter(),
                    )?);
                }
                ExpressionChunk::ResourceRef(key) => {
                    source.push_str("super.evaluator.str(");
                    source.push_str(&string_literal(key));
                    source.push(')');
                }
            }
        }

        if source.is_empty() {
            source.push_str(NULL_LITERAL);
        }

        Ok(source)
    }

    pub fn compile_expression(
        &self,
        expression: &Expression,
        phase: EvaluationPhase,
    ) -> Result<CompiledExpression, GeneratorError> {
        let source = self
            .compile(&expression.chunks, phase)
            .map_err(|e| e.in_expression(expression.id))?;

        tracing::trace!(
            "Compiled expression {} ({}): {}",
            expression.id,
            phase,
            source
        );

        Ok(CompiledExpression {
            id: expression.id,
            phase,
            result_type: expression.result_type.clone(),
            source,
        })
    }
}

/// `((ValueType)super.<holder>.<getter>())`
fn holder_value(
    table: &SymbolTable,
    name: &str,
    getter: &str,
) -> Result<String, GeneratorError> {
    let symbol = table.resolve(name)?;
    Ok(format!(
        "(({}){}.{}())",
        symbol.value_type,
        holder_reference(symbol.kind.holder_prefix(), name),
        getter
    ))
}

pub(crate) fn holder_name(prefix: &str, name: &str) -> String {
    format!("{}{}", prefix, mangle_identifier(name))
}

pub(crate) fn holder_reference(prefix: &str, name: &str) -> String {
    format!("super.{}", holder_name(prefix, name))
}
