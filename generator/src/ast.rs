//! Data model consumed by the generator: symbol tables, expressions and the
//! per-unit generation context.

use crate::error::GeneratorError;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use strsim::levenshtein;

const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Which table a symbol lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Parameter,
    Field,
    Variable,
}

impl SymbolKind {
    pub const ALL: [SymbolKind; 3] = [
        SymbolKind::Parameter,
        SymbolKind::Field,
        SymbolKind::Variable,
    ];

    /// Prefix of the holder variable declared for a symbol of this kind.
    pub fn holder_prefix(&self) -> &'static str {
        match self {
            SymbolKind::Parameter => "parameter_",
            SymbolKind::Field => "field_",
            SymbolKind::Variable => "variable_",
        }
    }

    /// Runtime type of the holder variable.
    pub fn holder_type(&self) -> &'static str {
        match self {
            SymbolKind::Parameter => "JRFillParameter",
            SymbolKind::Field => "JRFillField",
            SymbolKind::Variable => "JRFillVariable",
        }
    }

    /// Name of the init argument carrying the name -> instance map for this kind.
    pub fn init_map_name(&self) -> &'static str {
        match self {
            SymbolKind::Parameter => "parsm",
            SymbolKind::Field => "fldsm",
            SymbolKind::Variable => "varsm",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Parameter => write!(f, "parameter"),
            SymbolKind::Field => write!(f, "field"),
            SymbolKind::Variable => write!(f, "variable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub value_type: String,
}

/// Insertion-ordered table of uniquely named symbols of a single kind.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    kind: SymbolKind,
    symbols: Vec<Symbol>,
    index: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new(kind: SymbolKind) -> Self {
        Self {
            kind,
            symbols: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a table from `(name, value_type)` pairs, keeping their order.
    pub fn from_pairs<I, N, T>(kind: SymbolKind, pairs: I) -> Result<Self, GeneratorError>
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: Into<String>,
    {
        let mut table = Self::new(kind);
        for (name, value_type) in pairs {
            table.insert(name, value_type)?;
        }
        Ok(table)
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value_type: impl Into<String>,
    ) -> Result<(), GeneratorError> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(GeneratorError::DuplicateSymbol {
                kind: self.kind,
                name,
            });
        }

        self.index.insert(name.clone(), self.symbols.len());
        self.symbols.push(Symbol {
            name,
            kind: self.kind,
            value_type: value_type.into(),
        });
        Ok(())
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.index.get(name).map(|&i| &self.symbols[i])
    }

    /// Look up `name`, failing with a [`GeneratorError::MissingSymbol`] that
    /// carries the closest known name when there is one.
    pub fn resolve(&self, name: &str) -> Result<&Symbol, GeneratorError> {
        self.get(name).ok_or_else(|| GeneratorError::MissingSymbol {
            kind: self.kind,
            name: name.to_string(),
            expression_id: None,
            suggestion: self.closest_name(name),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    fn closest_name(&self, name: &str) -> Option<String> {
        let name_lower = name.to_lowercase();
        self.symbols
            .iter()
            .filter_map(|symbol| {
                let candidate_lower = symbol.name.to_lowercase();
                let distance = if candidate_lower == name_lower {
                    0
                } else if candidate_lower.contains(&name_lower)
                    || name_lower.contains(&candidate_lower)
                {
                    1
                } else {
                    levenshtein(name, &symbol.name)
                };
                (distance <= MAX_SUGGESTION_DISTANCE).then_some((distance, &symbol.name))
            })
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, candidate)| candidate.clone())
    }
}

impl Serialize for SymbolTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.symbols.serialize(serializer)
    }
}

/// One atomic piece of an expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text")]
pub enum ExpressionChunk {
    #[serde(rename = "text")]
    Text(String),
    #[serde(rename = "parameter")]
    ParameterRef(String),
    #[serde(rename = "field")]
    FieldRef(String),
    #[serde(rename = "variable")]
    VariableRef(String),
    #[serde(rename = "resource")]
    ResourceRef(String),
}

impl ExpressionChunk {
    /// Build a chunk from its textual tag. A missing text is read as empty.
    pub fn from_kind(kind: &str, text: Option<String>) -> Result<Self, GeneratorError> {
        let text = text.unwrap_or_default();
        match kind {
            "text" => Ok(ExpressionChunk::Text(text)),
            "parameter" => Ok(ExpressionChunk::ParameterRef(text)),
            "field" => Ok(ExpressionChunk::FieldRef(text)),
            "variable" => Ok(ExpressionChunk::VariableRef(text)),
            "resource" => Ok(ExpressionChunk::ResourceRef(text)),
            other => Err(GeneratorError::UnrecognizedChunkKind {
                kind: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expression {
    pub id: u32,
    pub result_type: String,
    pub chunks: Vec<ExpressionChunk>,
}

impl Expression {
    pub fn new(id: u32, result_type: impl Into<String>, chunks: Vec<ExpressionChunk>) -> Self {
        Self {
            id,
            result_type: result_type.into(),
            chunks,
        }
    }
}

/// Everything needed to generate one evaluator unit.
///
/// Expression ids are expected to be unique across `expressions`; the
/// generator does not check this.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationContext {
    pub unit_name: String,
    pub imports: Vec<String>,
    pub parameters: SymbolTable,
    pub fields: SymbolTable,
    pub variables: SymbolTable,
    pub expressions: Vec<Expression>,
    /// Old and Estimated dispatch methods are emitted without cases when set.
    pub single_phase: bool,
}

impl GenerationContext {
    pub fn new(unit_name: impl Into<String>) -> Self {
        Self {
            unit_name: unit_name.into(),
            imports: Vec::new(),
            parameters: SymbolTable::new(SymbolKind::Parameter),
            fields: SymbolTable::new(SymbolKind::Field),
            variables: SymbolTable::new(SymbolKind::Variable),
            expressions: Vec::new(),
            single_phase: false,
        }
    }

    /// Context for a report dataset: all three phases are evaluated.
    pub fn for_dataset(
        unit_name: impl Into<String>,
        parameters: SymbolTable,
        fields: SymbolTable,
        variables: SymbolTable,
        expressions: Vec<Expression>,
    ) -> Self {
        Self::new(unit_name)
            .with_parameters(parameters)
            .with_fields(fields)
            .with_variables(variables)
            .with_expressions(expressions)
    }

    /// Context for a crosstab: no fields, only current-phase evaluation.
    pub fn for_crosstab(
        unit_name: impl Into<String>,
        parameters: SymbolTable,
        variables: SymbolTable,
        expressions: Vec<Expression>,
    ) -> Self {
        Self::new(unit_name)
            .with_parameters(parameters)
            .with_variables(variables)
            .with_expressions(expressions)
            .with_single_phase(true)
    }

    pub fn with_imports(mut self, imports: Vec<String>) -> Self {
        self.imports = imports;
        self
    }

    pub fn with_parameters(mut self, parameters: SymbolTable) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_fields(mut self, fields: SymbolTable) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_variables(mut self, variables: SymbolTable) -> Self {
        self.variables = variables;
        self
    }

    pub fn with_expressions(mut self, expressions: Vec<Expression>) -> Self {
        self.expressions = expressions;
        self
    }

    pub fn with_single_phase(mut self, single_phase: bool) -> Self {
        self.single_phase = single_phase;
        self
    }

    pub fn table(&self, kind: SymbolKind) -> &SymbolTable {
        match kind {
            SymbolKind::Parameter => &self.parameters,
            SymbolKind::Field => &self.fields,
            SymbolKind::Variable => &self.variables,
        }
    }

    /// Tables in declaration order: parameters, fields, variables.
    pub fn tables(&self) -> [&SymbolTable; 3] {
        [&self.parameters, &self.fields, &self.variables]
    }

    pub fn symbol_count(&self) -> usize {
        self.tables().iter().map(|t| t.len()).sum()
    }

    pub fn expression(&self, id: u32) -> Option<&Expression> {
        self.expressions.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_table_keeps_insertion_order() {
        let table = SymbolTable::from_pairs(
            SymbolKind::Field,
            [("zeta", "java.lang.String"), ("alpha", "java.lang.Integer")],
        )
        .expect("unique names");

        let names: Vec<_> = table.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(table.get("alpha").map(|s| s.kind), Some(SymbolKind::Field));
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        let err = SymbolTable::from_pairs(
            SymbolKind::Parameter,
            [("p", "java.lang.String"), ("p", "java.lang.Integer")],
        )
        .unwrap_err();

        assert_eq!(
            err,
            GeneratorError::DuplicateSymbol {
                kind: SymbolKind::Parameter,
                name: "p".to_string()
            }
        );
    }

    #[test]
    fn test_same_name_allowed_across_tables() {
        let params = SymbolTable::from_pairs(SymbolKind::Parameter, [("x", "A")]).unwrap();
        let fields = SymbolTable::from_pairs(SymbolKind::Field, [("x", "B")]).unwrap();
        let ctx = GenerationContext::new("Unit")
            .with_parameters(params)
            .with_fields(fields);
        assert_eq!(ctx.symbol_count(), 2);
    }

    #[test]
    fn test_resolve_suggests_close_name() {
        let table =
            SymbolTable::from_pairs(SymbolKind::Variable, [("PAGE_NUMBER", "java.lang.Integer")])
                .unwrap();

        match table.resolve("PAGE_NUMBR") {
            Err(GeneratorError::MissingSymbol { suggestion, .. }) => {
                assert_eq!(suggestion.as_deref(), Some("PAGE_NUMBER"));
            }
            other => panic!("expected MissingSymbol, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_without_candidates() {
        let table = SymbolTable::new(SymbolKind::Field);
        match table.resolve("anything") {
            Err(GeneratorError::MissingSymbol {
                suggestion, kind, ..
            }) => {
                assert_eq!(kind, SymbolKind::Field);
                assert!(suggestion.is_none());
            }
            other => panic!("expected MissingSymbol, got {:?}", other),
        }
    }

    #[test]
    fn test_chunk_from_kind() {
        assert_eq!(
            ExpressionChunk::from_kind("field", Some("x".to_string())).unwrap(),
            ExpressionChunk::FieldRef("x".to_string())
        );
        assert_eq!(
            ExpressionChunk::from_kind("text", None).unwrap(),
            ExpressionChunk::Text(String::new())
        );
        assert_eq!(
            ExpressionChunk::from_kind("macro", None).unwrap_err(),
            GeneratorError::UnrecognizedChunkKind {
                kind: "macro".to_string()
            }
        );
    }

    #[test]
    fn test_crosstab_context_is_single_phase_without_fields() {
        let ctx = GenerationContext::for_crosstab(
            "Report_CROSSTAB0",
            SymbolTable::new(SymbolKind::Parameter),
            SymbolTable::new(SymbolKind::Variable),
            vec![],
        );
        assert!(ctx.single_phase);
        assert!(ctx.fields.is_empty());
    }

    #[test]
    fn test_context_serializes_tables_as_lists() {
        let params =
            SymbolTable::from_pairs(SymbolKind::Parameter, [("p1", "java.lang.String")]).unwrap();
        let ctx = GenerationContext::new("Unit").with_parameters(params);
        let json = serde_json::to_value(&ctx).unwrap();

        assert_eq!(json["unitName"], "Unit");
        assert_eq!(json["parameters"][0]["name"], "p1");
        assert_eq!(json["parameters"][0]["kind"], "parameter");
        assert_eq!(json["singlePhase"], false);
    }
}
