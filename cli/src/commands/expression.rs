use anyhow::{Context, Result};
use reportgen_generator::{ChunkCompiler, EvaluationPhase};
use serde_json::json;

use super::load_definition;

pub fn show(
    definition_path: &str,
    unit_name: &str,
    id: u32,
    phase: EvaluationPhase,
    json: bool,
) -> Result<()> {
    let report = load_definition(definition_path)?;
    let unit = report.unit(unit_name)?;

    let expression = unit.context.expression(id).with_context(|| {
        format!(
            "Unit '{}' has no expression with id {}",
            unit.name(),
            id
        )
    })?;

    if unit.context.single_phase && phase != EvaluationPhase::Current {
        tracing::warn!(
            "Unit '{}' only evaluates the current phase; {} is never dispatched",
            unit.name(),
            phase.method_name()
        );
    }

    let compiled = ChunkCompiler::new(&unit.context).compile_expression(expression, phase)?;

    if json {
        let value = json!({
            "unit": unit.name(),
            "id": compiled.id,
            "phase": compiled.phase,
            "resultType": compiled.result_type,
            "source": compiled.source,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", compiled.cast_source());
    }

    Ok(())
}
