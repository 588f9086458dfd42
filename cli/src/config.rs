use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure for reportgen.toml
/// The file is optional; every command falls back to defaults without it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportgenConfig {
    pub project: ProjectConfig,

    #[serde(default)]
    pub output: Option<OutputConfig>,

    #[serde(default)]
    pub generator: Option<GeneratorSection>,
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,

    /// File extension of generated scripts, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            extension: default_extension(),
        }
    }
}

fn default_output_dir() -> String {
    "./generated".to_string()
}

fn default_extension() -> String {
    "bsh".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorSection {
    #[serde(default = "default_banner")]
    pub banner: String,

    /// Stamp the generation time into the script banner (default: true)
    #[serde(default = "default_timestamp")]
    pub timestamp: bool,

    /// Imports appended after the report's own imports
    #[serde(default)]
    pub imports: Vec<String>,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            banner: default_banner(),
            timestamp: default_timestamp(),
            imports: Vec::new(),
        }
    }
}

fn default_banner() -> String {
    "ReportGen".to_string()
}

fn default_timestamp() -> bool {
    true
}

impl ReportgenConfig {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project: ProjectConfig {
                name: project_name.into(),
            },
            output: Some(OutputConfig::default()),
            generator: Some(GeneratorSection::default()),
        }
    }

    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: ReportgenConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Try to load config, returning None if file doesn't exist
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No configuration at {}, using defaults", path.display());
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.project.name.is_empty() {
            anyhow::bail!("Project name cannot be empty");
        }

        if let Some(output) = &self.output {
            if output.extension.is_empty() {
                anyhow::bail!("Output extension cannot be empty");
            }
            if output.extension.starts_with('.') {
                anyhow::bail!(
                    "Output extension should not start with '.': {}",
                    output.extension
                );
            }
        }

        if let Some(generator) = &self.generator {
            let mut seen = HashSet::new();
            for import in &generator.imports {
                if !seen.insert(import) {
                    anyhow::bail!("Duplicate import: {}", import);
                }
            }
        }

        Ok(())
    }

    pub fn output(&self) -> OutputConfig {
        self.output.clone().unwrap_or_default()
    }

    pub fn generator(&self) -> GeneratorSection {
        self.generator.clone().unwrap_or_default()
    }
}

/// Settings resolved from an optional config plus command-line overrides.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub output_dir: PathBuf,
    pub extension: String,
    pub banner: String,
    pub timestamp: bool,
    pub imports: Vec<String>,
}

impl ResolvedSettings {
    /// Relative output directories resolve against the config file's directory.
    pub fn resolve(
        config: Option<&ReportgenConfig>,
        config_path: &str,
        output_override: Option<&str>,
    ) -> Self {
        let output = config.map(|c| c.output()).unwrap_or_default();
        let generator = config.map(|c| c.generator()).unwrap_or_default();

        let output_dir = match output_override {
            Some(dir) => PathBuf::from(dir),
            None => {
                let raw = PathBuf::from(&output.dir);
                if raw.is_relative() && config.is_some() {
                    Path::new(config_path)
                        .parent()
                        .unwrap_or(Path::new("."))
                        .join(raw)
                } else {
                    raw
                }
            }
        };

        Self {
            output_dir,
            extension: output.extension,
            banner: generator.banner,
            timestamp: generator.timestamp,
            imports: generator.imports,
        }
    }

    /// Unit names come from the report definition and must stay a single
    /// file name inside the output directory.
    pub fn script_path(&self, unit_name: &str) -> Result<PathBuf> {
        if unit_name.is_empty()
            || unit_name == "."
            || unit_name == ".."
            || unit_name.contains(|c: char| c == '/' || c == '\\')
        {
            anyhow::bail!("Unit name '{}' cannot be used as a file name", unit_name);
        }
        Ok(self
            .output_dir
            .join(format!("{}.{}", unit_name, self.extension)))
    }
}
