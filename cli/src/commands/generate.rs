use anyhow::{Context, Result};
use colored::Colorize;
use reportgen_definition::CompilationUnit;
use reportgen_generator::{write_script_to_file, BeanShellConfig, BeanShellGenerator};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use super::load_definition;
use crate::config::{ReportgenConfig, ResolvedSettings};
use crate::ui;

pub struct GenerateOptions {
    pub unit: Option<String>,
    pub output: Option<String>,
    pub stdout: bool,
    pub timestamp: bool,
    pub json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedUnit {
    unit: String,
    path: Option<PathBuf>,
    bytes: usize,
}

pub fn generate(config_path: &str, definition_path: &str, options: GenerateOptions) -> Result<()> {
    let config = ReportgenConfig::load_optional(config_path)?;
    let settings =
        ResolvedSettings::resolve(config.as_ref(), config_path, options.output.as_deref());

    let report = load_definition(definition_path)?;
    let units = match &options.unit {
        Some(name) => vec![report.unit(name)?],
        None => report.units()?,
    };

    let quiet = options.stdout || options.json;
    if !quiet {
        ui::print_step(&format!(
            "Generating {} for report '{}'...",
            ui::pluralize(units.len(), "unit"),
            report.name
        ));
    }

    let generator_config = BeanShellConfig {
        banner: settings.banner.clone(),
        generated_at: (options.timestamp && settings.timestamp).then(banner_timestamp),
    };

    if !options.stdout {
        fs::create_dir_all(&settings.output_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                settings.output_dir.display()
            )
        })?;
    }

    let mut generated = Vec::with_capacity(units.len());
    for unit in units {
        let unit = with_extra_imports(unit, &settings.imports);
        let output = BeanShellGenerator::new(&unit.context)
            .with_config(generator_config.clone())
            .compile()
            .with_context(|| format!("Failed to generate unit '{}'", unit.name()))?;
        let script = output.full_script();

        if options.stdout {
            print!("{}", script);
            generated.push(GeneratedUnit {
                unit: output.unit_name.clone(),
                path: None,
                bytes: script.len(),
            });
            continue;
        }

        let path = settings.script_path(&output.unit_name)?;
        write_script_to_file(&output, &path)
            .with_context(|| format!("Failed to write script to {}", path.display()))?;

        if !quiet {
            ui::print_success(&format!("{} ({})", unit.name().bold(), ui::format_unit_kind(unit.kind)));
            ui::print_info(&path.display().to_string());
        }
        generated.push(GeneratedUnit {
            unit: output.unit_name.clone(),
            path: Some(path),
            bytes: script.len(),
        });
    }

    if options.json && !options.stdout {
        println!("{}", serde_json::to_string_pretty(&generated)?);
    } else if !quiet {
        println!();
        ui::print_success(&format!(
            "Generated {} into {}",
            ui::pluralize(generated.len(), "script"),
            settings.output_dir.display()
        ));
    }

    Ok(())
}

/// Config imports go after the report's own, skipping ones already present.
fn with_extra_imports(mut unit: CompilationUnit, extra: &[String]) -> CompilationUnit {
    for import in extra {
        if !unit.context.imports.contains(import) {
            unit.context.imports.push(import.clone());
        }
    }
    unit
}

fn banner_timestamp() -> String {
    chrono::Local::now().format("%-m/%-d/%y %-I:%M %p").to_string()
}
