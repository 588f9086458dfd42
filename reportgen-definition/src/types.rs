//! Serde model of a JSON report definition.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDefinition {
    pub name: String,
    /// Extra imports added to every unit of the report.
    #[serde(default)]
    pub imports: Vec<String>,
    pub main_dataset: DatasetDefinition,
    #[serde(default)]
    pub sub_datasets: Vec<DatasetDefinition>,
    #[serde(default)]
    pub crosstabs: Vec<CrosstabDefinition>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetDefinition {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<SymbolDefinition>,
    #[serde(default)]
    pub fields: Vec<SymbolDefinition>,
    #[serde(default)]
    pub variables: Vec<SymbolDefinition>,
    #[serde(default)]
    pub expressions: Vec<ExpressionDefinition>,
}

/// Crosstabs have no fields of their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosstabDefinition {
    pub id: u32,
    #[serde(default)]
    pub parameters: Vec<SymbolDefinition>,
    #[serde(default)]
    pub variables: Vec<SymbolDefinition>,
    #[serde(default)]
    pub expressions: Vec<ExpressionDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolDefinition {
    pub name: String,
    #[serde(default = "default_value_class")]
    pub value_class: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionDefinition {
    /// Assigned during unit extraction when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default = "default_value_class")]
    pub value_class: String,
    #[serde(default)]
    pub chunks: Vec<ChunkDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkDefinition {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

fn default_value_class() -> String {
    "java.lang.Object".to_string()
}
