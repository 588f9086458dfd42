//! Splitting a report definition into compilation units.

use crate::error::DefinitionError;
use crate::types::{
    CrosstabDefinition, DatasetDefinition, ExpressionDefinition, ReportDefinition,
    SymbolDefinition,
};
use reportgen_generator::{
    Expression, ExpressionChunk, GenerationContext, GeneratorError, SymbolKind, SymbolTable,
};
use std::collections::HashSet;
use std::fmt;
use strsim::levenshtein;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    MainDataset,
    SubDataset,
    Crosstab,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::MainDataset => write!(f, "main dataset"),
            UnitKind::SubDataset => write!(f, "sub-dataset"),
            UnitKind::Crosstab => write!(f, "crosstab"),
        }
    }
}

/// One evaluator to generate, with its context fully resolved.
#[derive(Debug, Clone)]
pub struct CompilationUnit {
    pub kind: UnitKind,
    pub context: GenerationContext,
}

impl CompilationUnit {
    pub fn name(&self) -> &str {
        &self.context.unit_name
    }
}

pub fn dataset_unit_name(report_name: &str, dataset_name: Option<&str>) -> String {
    match dataset_name {
        None => report_name.to_string(),
        Some(dataset) => format!("{}_{}", report_name, dataset),
    }
}

pub fn crosstab_unit_name(report_name: &str, crosstab_id: u32) -> String {
    format!("{}_CROSSTAB{}", report_name, crosstab_id)
}

impl ReportDefinition {
    /// All units of the report: main dataset, then sub-datasets, then crosstabs.
    pub fn units(&self) -> Result<Vec<CompilationUnit>, DefinitionError> {
        self.check_unit_names()?;
        let mut units = Vec::with_capacity(1 + self.sub_datasets.len() + self.crosstabs.len());

        units.push(self.dataset_unit(
            &self.main_dataset,
            dataset_unit_name(&self.name, None),
            UnitKind::MainDataset,
        )?);
        for dataset in &self.sub_datasets {
            units.push(self.dataset_unit(
                dataset,
                dataset_unit_name(&self.name, Some(&dataset.name)),
                UnitKind::SubDataset,
            )?);
        }
        for crosstab in &self.crosstabs {
            units.push(self.crosstab_unit(crosstab)?);
        }

        tracing::debug!("Report '{}' has {} unit(s)", self.name, units.len());
        Ok(units)
    }

    pub fn unit_names(&self) -> Vec<String> {
        std::iter::once(dataset_unit_name(&self.name, None))
            .chain(
                self.sub_datasets
                    .iter()
                    .map(|d| dataset_unit_name(&self.name, Some(&d.name))),
            )
            .chain(
                self.crosstabs
                    .iter()
                    .map(|c| crosstab_unit_name(&self.name, c.id)),
            )
            .collect()
    }

    /// Extract a single unit by name.
    pub fn unit(&self, name: &str) -> Result<CompilationUnit, DefinitionError> {
        self.check_unit_names()?;
        if name == dataset_unit_name(&self.name, None) {
            return self.dataset_unit(&self.main_dataset, name.to_string(), UnitKind::MainDataset);
        }
        if let Some(dataset) = self
            .sub_datasets
            .iter()
            .find(|d| dataset_unit_name(&self.name, Some(&d.name)) == name)
        {
            return self.dataset_unit(dataset, name.to_string(), UnitKind::SubDataset);
        }
        if let Some(crosstab) = self
            .crosstabs
            .iter()
            .find(|c| crosstab_unit_name(&self.name, c.id) == name)
        {
            return self.crosstab_unit(crosstab);
        }

        let available = self.unit_names();
        let suggestion = available
            .iter()
            .map(|candidate| (levenshtein(name, candidate), candidate))
            .filter(|(distance, _)| *distance <= 3)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, candidate)| candidate.clone());

        Err(DefinitionError::UnknownUnit {
            name: name.to_string(),
            suggestion,
            available,
        })
    }

    /// Every unit becomes its own script, so names must not collide.
    fn check_unit_names(&self) -> Result<(), DefinitionError> {
        if let Some(index) = self.sub_datasets.iter().position(|d| d.name.is_empty()) {
            return Err(DefinitionError::UnnamedSubDataset { index });
        }

        let mut seen = HashSet::new();
        for name in self.unit_names() {
            if seen.contains(&name) {
                return Err(DefinitionError::DuplicateUnit { name });
            }
            seen.insert(name);
        }
        Ok(())
    }

    fn dataset_unit(
        &self,
        dataset: &DatasetDefinition,
        unit_name: String,
        kind: UnitKind,
    ) -> Result<CompilationUnit, DefinitionError> {
        let wrap = |source| DefinitionError::Generator {
            unit: unit_name.clone(),
            source,
        };

        let parameters = symbol_table(SymbolKind::Parameter, &dataset.parameters).map_err(wrap)?;
        let fields = symbol_table(SymbolKind::Field, &dataset.fields).map_err(wrap)?;
        let variables = symbol_table(SymbolKind::Variable, &dataset.variables).map_err(wrap)?;
        let expressions = collect_expressions(&unit_name, &dataset.expressions)?;

        let context =
            GenerationContext::for_dataset(unit_name, parameters, fields, variables, expressions)
                .with_imports(self.imports.clone());

        Ok(CompilationUnit { kind, context })
    }

    fn crosstab_unit(
        &self,
        crosstab: &CrosstabDefinition,
    ) -> Result<CompilationUnit, DefinitionError> {
        let unit_name = crosstab_unit_name(&self.name, crosstab.id);
        let wrap = |source| DefinitionError::Generator {
            unit: unit_name.clone(),
            source,
        };

        let parameters =
            symbol_table(SymbolKind::Parameter, &crosstab.parameters).map_err(wrap)?;
        let variables = symbol_table(SymbolKind::Variable, &crosstab.variables).map_err(wrap)?;
        let expressions = collect_expressions(&unit_name, &crosstab.expressions)?;

        let context = GenerationContext::for_crosstab(unit_name, parameters, variables, expressions)
            .with_imports(self.imports.clone());

        Ok(CompilationUnit {
            kind: UnitKind::Crosstab,
            context,
        })
    }
}

fn symbol_table(
    kind: SymbolKind,
    symbols: &[SymbolDefinition],
) -> Result<SymbolTable, GeneratorError> {
    SymbolTable::from_pairs(
        kind,
        symbols
            .iter()
            .map(|s| (s.name.as_str(), s.value_class.as_str())),
    )
}

/// Convert expression definitions, giving each expression without an id the
/// lowest id not yet taken.
fn collect_expressions(
    unit_name: &str,
    definitions: &[ExpressionDefinition],
) -> Result<Vec<Expression>, DefinitionError> {
    let mut used = HashSet::new();
    for id in definitions.iter().filter_map(|d| d.id) {
        if !used.insert(id) {
            return Err(DefinitionError::DuplicateExpressionId {
                unit: unit_name.to_string(),
                id,
            });
        }
    }

    let mut next_id = 0u32;
    let mut expressions = Vec::with_capacity(definitions.len());

    for definition in definitions {
        let id = match definition.id {
            Some(id) => id,
            None => {
                while used.contains(&next_id) {
                    next_id += 1;
                }
                used.insert(next_id);
                next_id
            }
        };

        let chunks = definition
            .chunks
            .iter()
            .map(|c| ExpressionChunk::from_kind(&c.kind, c.text.clone()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| DefinitionError::Generator {
                unit: unit_name.to_string(),
                source,
            })?;

        expressions.push(Expression::new(id, definition.value_class.clone(), chunks));
    }

    Ok(expressions)
}
