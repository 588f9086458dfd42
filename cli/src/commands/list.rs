use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use super::load_definition;
use crate::ui;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UnitSummary {
    name: String,
    kind: String,
    parameters: usize,
    fields: usize,
    variables: usize,
    expressions: usize,
    single_phase: bool,
}

pub fn list(definition_path: &str, json: bool) -> Result<()> {
    let report = load_definition(definition_path)?;
    let units = report.units()?;

    let summaries: Vec<UnitSummary> = units
        .iter()
        .map(|unit| UnitSummary {
            name: unit.name().to_string(),
            kind: unit.kind.to_string(),
            parameters: unit.context.parameters.len(),
            fields: unit.context.fields.len(),
            variables: unit.context.variables.len(),
            expressions: unit.context.expressions.len(),
            single_phase: unit.context.single_phase,
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    ui::print_section(&format!("Report {}", report.name));
    for (unit, summary) in units.iter().zip(&summaries) {
        println!(
            "  {} {} ({})",
            ui::symbols::BULLET.dimmed(),
            summary.name.green().bold(),
            ui::format_unit_kind(unit.kind)
        );
        println!(
            "    {}, {}, {}",
            ui::pluralize(summary.parameters, "parameter"),
            ui::pluralize(summary.fields, "field"),
            ui::pluralize(summary.variables, "variable")
        );
        println!(
            "    {}{}",
            ui::pluralize(summary.expressions, "expression"),
            if summary.single_phase {
                " (current phase only)".dimmed().to_string()
            } else {
                String::new()
            }
        );
    }
    println!();
    println!(
        "Use {} to generate scripts",
        format!("rgen generate {}", definition_path).cyan()
    );

    Ok(())
}
