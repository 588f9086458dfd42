use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

use crate::config::ReportgenConfig;
use crate::ui;

pub fn init(config_path: &str, name: Option<String>) -> Result<()> {
    let path = Path::new(config_path);

    if path.exists() {
        anyhow::bail!(
            "Configuration file already exists: {}\nUse a different path or remove the existing file.",
            path.display()
        );
    }

    ui::print_step("Initializing ReportGen project...");

    let project_name = name.unwrap_or_else(default_project_name);
    let config = ReportgenConfig::new(project_name);
    config.validate()?;

    let config_toml = toml::to_string_pretty(&config)?;
    fs::write(path, &config_toml)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    ui::print_success(&format!("Created {}", path.display()));
    println!();
    println!("{}", "Next steps:".bold());
    println!(
        "  {} to list the units of a report",
        "rgen list <report.json>".cyan()
    );
    println!(
        "  {} to generate evaluator scripts",
        "rgen generate <report.json>".cyan()
    );

    Ok(())
}

fn default_project_name() -> String {
    std::env::current_dir()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_else(|| "my-reports".to_string())
}

pub fn validate(config_path: &str) -> Result<()> {
    ui::print_step("Validating configuration...");

    let config = ReportgenConfig::load(config_path)
        .context("Failed to load configuration. Run `rgen init` to create a configuration file.")?;

    ui::print_success("Configuration is valid!");
    println!();
    println!("  Project: {}", config.project.name.bold());

    let output = config.output();
    println!("  Output: {} (*.{})", output.dir, output.extension);

    let generator = config.generator();
    println!("  Banner: {}", generator.banner);
    println!(
        "  Timestamp: {}",
        if generator.timestamp { "yes" } else { "no" }
    );

    if generator.imports.is_empty() {
        println!("  {} No extra imports", ui::symbols::BULLET.dimmed());
    } else {
        println!(
            "  {} Extra imports ({}):",
            ui::symbols::BULLET.dimmed(),
            generator.imports.len()
        );
        for import in &generator.imports {
            println!("    {}", import);
        }
    }

    if config.output.is_none() {
        println!();
        ui::print_warning("No [output] section, scripts go to ./generated");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reportgen.toml");
        let path_str = path.to_str().unwrap();

        init(path_str, Some("invoices".to_string())).unwrap();
        let config = ReportgenConfig::load(&path).unwrap();
        assert_eq!(config.project.name, "invoices");

        assert!(init(path_str, None).is_err());
    }

    #[test]
    fn test_validate_missing_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(validate(path.to_str().unwrap()).is_err());
    }
}
