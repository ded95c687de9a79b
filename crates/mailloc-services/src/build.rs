use std::path::Path;

use mailloc_core::TranslationTable;
use mailloc_domain::{BuildSummary, WarningEntry, SCHEMA_VERSION};
use mailloc_import_csv::{IngestReport, IngestWarning, Ingestor};
use mailloc_locales::LocaleSelection;
use mailloc_remap::DuplicatePolicy;
use mailloc_template::{
    AssembleOptions, Assembler, Artifact, BuildFlags, Links, RenderAttributes, Theme,
};

use crate::{Catalog, Result};

#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub selection: LocaleSelection,
    pub flags: BuildFlags,
    pub duplicates: DuplicatePolicy,
    pub attributes: RenderAttributes,
    pub links: Links,
    pub theme: Theme,
}

/// Everything a build produced; the table is kept for previews.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub artifact: Artifact,
    pub table: TranslationTable,
    pub report: IngestReport,
}

/// Read the table at `path` and assemble the template.
pub fn compile(catalog: &Catalog, path: &Path, opts: &BuildOptions) -> Result<Compiled> {
    let ingested = Ingestor::new(&catalog.registry, &catalog.schema, &catalog.remap)
        .with_duplicates(opts.duplicates)
        .read_path(path)?;
    let locales = opts
        .selection
        .resolve(&catalog.registry, ingested.table.columns());
    tracing::debug!(event = "locales_selected", count = locales.len(), selection = ?opts.selection);

    let assemble = AssembleOptions {
        locales,
        flags: opts.flags,
        attributes: opts.attributes.clone(),
        links: opts.links.clone(),
        theme: opts.theme.clone(),
    };
    let artifact = Assembler::new(&catalog.registry, &catalog.rules, &catalog.schema)
        .assemble(&ingested.table, &assemble);
    Ok(Compiled {
        artifact,
        table: ingested.table,
        report: ingested.report,
    })
}

fn warning_entry(w: &IngestWarning) -> WarningEntry {
    match w {
        IngestWarning::UnknownLocaleColumn { column, header } => WarningEntry {
            kind: "unknown_locale_column".into(),
            message: format!("column {} header `{header}` matches no locale; dropped", column + 1),
            key: None,
            line: Some(1),
        },
        IngestWarning::RepeatedLocaleColumn {
            column,
            header,
            locale,
        } => WarningEntry {
            kind: "repeated_locale_column".into(),
            message: format!(
                "column {} header `{header}` repeats locale {locale}; dropped",
                column + 1
            ),
            key: None,
            line: Some(1),
        },
        IngestWarning::DuplicateKey {
            key,
            first_line,
            line,
            kept_line,
            locales,
        } => WarningEntry {
            kind: "duplicate_key".into(),
            message: format!(
                "lines {first_line} and {line} both set {} for `{key}`; kept line {kept_line}",
                locales
                    .iter()
                    .map(|l| l.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            key: Some(key.clone()),
            line: Some(*line),
        },
        IngestWarning::IgnoredKey { key, line } => WarningEntry {
            kind: "ignored_key".into(),
            message: format!("`{key}` is not a template key; ignored"),
            key: Some(key.clone()),
            line: Some(*line),
        },
    }
}

/// Machine-readable report of a build.
pub fn summarize(source: &Path, compiled: &Compiled, theme: &str) -> BuildSummary {
    let report = &compiled.report;
    BuildSummary {
        schema_version: SCHEMA_VERSION,
        source: source.display().to_string(),
        dialect: match report.dialect {
            mailloc_import_csv::Dialect::Legacy => "legacy".into(),
            mailloc_import_csv::Dialect::Module => "module".into(),
        },
        data_rows: report.data_rows,
        columns: report.columns.iter().map(|l| l.to_string()).collect(),
        locales: compiled.artifact.locales.iter().map(|l| l.to_string()).collect(),
        dispatch_blocks: compiled.artifact.blocks.len(),
        structural_keys: compiled.artifact.structural.len(),
        passthrough_keys: report.passthrough_keys,
        theme: theme.to_string(),
        bytes: compiled.artifact.text.len(),
        warnings: report.warnings.iter().map(warning_entry).collect(),
    }
}
