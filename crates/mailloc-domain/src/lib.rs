use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WarningEntry {
    pub kind: String,
    pub message: String,
    pub key: Option<String>,
    pub line: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BuildSummary {
    pub schema_version: u32,
    pub source: String,
    pub dialect: String,
    pub data_rows: usize,
    /// Locale columns matched in the header, table order.
    pub columns: Vec<String>,
    /// Locales that received a `when` clause, registry order.
    pub locales: Vec<String>,
    pub dispatch_blocks: usize,
    pub structural_keys: usize,
    /// Module rows whose key had no remap rule.
    pub passthrough_keys: usize,
    pub theme: String,
    pub bytes: usize,
    pub warnings: Vec<WarningEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResolutionReport {
    pub schema_version: u32,
    pub lang: String,
    pub country: Option<String>,
    pub locale: String,
    pub direction: String,
    pub align: String,
    pub headline_align: String,
    /// Which rule decided: `compound_marker`, `country_override`, `language` or `default`.
    pub step: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LocaleInfo {
    pub code: String,
    pub default: bool,
    pub rtl: bool,
}
