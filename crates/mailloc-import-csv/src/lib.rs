//! Reads a translations table and compiles it into a [`TranslationTable`].
//!
//! Two header dialects are understood (see [`Dialect`]). Locale columns are
//! matched against the [`LocaleRegistry`]; columns that match nothing are
//! dropped with a warning. In the module dialect, keys go through
//! [`RemapRules`] before they are stored.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use mailloc_core::{ContentSchema, KeyKind, Locale, TranslationTable};
use mailloc_locales::LocaleRegistry;
use mailloc_remap::{DuplicatePolicy, RemapRules, RemapSource};
use serde::Serialize;
use thiserror::Error;

mod rows;

pub use rows::{
    detect_dialect, normalize_key, Dialect, LegacyRow, ModuleRow, TableRow, MODULE_INDEX_LABEL,
    MODULE_LABEL,
};

#[derive(Debug, Error)]
pub enum TableError {
    #[error("malformed table: {reason} (received {rows} row(s), {columns} header column(s))")]
    Malformed {
        rows: usize,
        columns: usize,
        reason: &'static str,
    },
    #[error("table file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid delimited text: {0}")]
    Csv(#[from] csv::Error),
}

/// Non-fatal findings; the build always continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IngestWarning {
    /// A locale column header that matches no registry entry.
    UnknownLocaleColumn { column: usize, header: String },
    /// A second column for a locale that already has one.
    RepeatedLocaleColumn {
        column: usize,
        header: String,
        locale: Locale,
    },
    /// Two rows resolved to the same key and wrote the same locales.
    DuplicateKey {
        key: String,
        first_line: usize,
        line: usize,
        kept_line: usize,
        locales: Vec<Locale>,
    },
    /// A key the content schema does not know.
    IgnoredKey { key: String, line: usize },
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub dialect: Dialect,
    pub data_rows: usize,
    pub columns: Vec<Locale>,
    /// Module rows whose key had no remap rule and was used as-is.
    pub passthrough_keys: usize,
    pub warnings: Vec<IngestWarning>,
}

#[derive(Debug, Clone)]
pub struct Ingested {
    pub table: TranslationTable,
    pub report: IngestReport,
}

/// Pick the delimiter: `.tsv` is tab-separated, otherwise whichever of tab
/// or comma is more frequent in the header line.
pub fn sniff_delimiter(path: Option<&Path>, text: &str) -> u8 {
    if let Some(ext) = path.and_then(|p| p.extension()).and_then(|e| e.to_str()) {
        if ext.eq_ignore_ascii_case("tsv") {
            return b'\t';
        }
    }
    let header = text.lines().next().unwrap_or_default();
    let tabs = header.matches('\t').count();
    let commas = header.matches(',').count();
    if tabs > commas {
        b'\t'
    } else {
        b','
    }
}

/// Split delimited text into trimmed-of-BOM records. Blank lines are skipped.
pub fn read_records(text: &str, delimiter: u8) -> Result<Vec<Vec<String>>, TableError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        out.push(rec.iter().map(str::to_string).collect());
    }
    Ok(out)
}

/// One ingestion pass. Holds only borrowed, read-only rule data, so separate
/// builds can run side by side.
#[derive(Debug, Clone, Copy)]
pub struct Ingestor<'a> {
    registry: &'a LocaleRegistry,
    schema: &'a ContentSchema,
    remap: &'a RemapRules,
    duplicates: DuplicatePolicy,
}

impl<'a> Ingestor<'a> {
    pub fn new(
        registry: &'a LocaleRegistry,
        schema: &'a ContentSchema,
        remap: &'a RemapRules,
    ) -> Self {
        Self {
            registry,
            schema,
            remap,
            duplicates: DuplicatePolicy::default(),
        }
    }

    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn read_path(&self, path: &Path) -> Result<Ingested, TableError> {
        if !path.exists() {
            return Err(TableError::NotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(event = "ingest_start", path = %path.display(), bytes = text.len());
        let delimiter = sniff_delimiter(Some(path), &text);
        self.read_str(&text, delimiter)
    }

    pub fn read<R: Read>(&self, mut reader: R, delimiter: u8) -> Result<Ingested, TableError> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|source| TableError::Io {
                path: PathBuf::from("<reader>"),
                source,
            })?;
        self.read_str(&text, delimiter)
    }

    pub fn read_str(&self, text: &str, delimiter: u8) -> Result<Ingested, TableError> {
        let records = read_records(text, delimiter)?;
        self.ingest_records(records)
    }

    pub fn ingest_records(&self, records: Vec<Vec<String>>) -> Result<Ingested, TableError> {
        let total = records.len();
        let mut iter = records.into_iter();
        let header = iter.next().unwrap_or_default();
        if header.iter().all(|h| h.trim().is_empty()) {
            return Err(TableError::Malformed {
                rows: total,
                columns: header.len(),
                reason: "header row is missing or empty",
            });
        }
        let data: Vec<(usize, Vec<String>)> = iter
            .enumerate()
            .map(|(i, r)| (i + 2, r))
            .filter(|(_, r)| r.iter().any(|c| !c.trim().is_empty()))
            .collect();
        if data.is_empty() {
            return Err(TableError::Malformed {
                rows: total,
                columns: header.len(),
                reason: "no data rows",
            });
        }

        let dialect = detect_dialect(&header);
        tracing::debug!(event = "dialect_detected", dialect = ?dialect, columns = header.len());

        let mut warnings = Vec::new();
        let column_map = self.resolve_columns(&header, dialect, &mut warnings);
        let present: Vec<Locale> = column_map.iter().map(|(_, l)| l.clone()).collect();
        let columns = self.registry.sort(&present);

        let rows = parse_rows(&data, dialect, &column_map);
        let data_rows = rows.len();
        let mut acc = Accumulator::new(self.duplicates);
        let mut passthrough_keys = 0usize;

        for row in &rows {
            let key = match row {
                TableRow::Legacy(r) => r.key.clone(),
                TableRow::Module(r) => {
                    let mapped = self.remap.remap(&r.module, &r.raw_key);
                    if mapped.source == RemapSource::Passthrough {
                        passthrough_keys += 1;
                        tracing::debug!(
                            event = "remap_passthrough",
                            module = %r.module,
                            module_index = %r.module_index,
                            key = %r.raw_key,
                            line = r.line
                        );
                    }
                    mapped.key
                }
            };
            match self.schema.kind(&key) {
                Some(KeyKind::Translatable) => {
                    acc.put_translation(&key, row.line(), row.values(), &mut warnings)
                }
                Some(KeyKind::Structural) => {
                    let default = self.registry.default_locale();
                    if let Some(v) = row.value(default) {
                        acc.put_structure(&key, row.line(), default, v, &mut warnings);
                    }
                }
                None => {
                    tracing::debug!(event = "key_ignored", key = %key, line = row.line());
                    warnings.push(IngestWarning::IgnoredKey {
                        key,
                        line: row.line(),
                    });
                }
            }
        }

        let table = TranslationTable::new(
            self.registry.default_locale().clone(),
            columns.clone(),
            acc.translations,
            acc.structure,
        );
        tracing::info!(
            event = "ingest_done",
            dialect = ?dialect,
            rows = data_rows,
            locales = columns.len(),
            warnings = warnings.len()
        );
        Ok(Ingested {
            table,
            report: IngestReport {
                dialect,
                data_rows,
                columns,
                passthrough_keys,
                warnings,
            },
        })
    }

    /// `(column index, locale)` for every header that names a known locale.
    fn resolve_columns(
        &self,
        header: &[String],
        dialect: Dialect,
        warnings: &mut Vec<IngestWarning>,
    ) -> Vec<(usize, Locale)> {
        let mut out: Vec<(usize, Locale)> = Vec::new();
        for (column, h) in header.iter().enumerate().skip(dialect.locale_start()) {
            if h.trim().is_empty() {
                continue;
            }
            match self.registry.match_header(h.trim()) {
                Some(loc) if out.iter().any(|(_, l)| l == loc) => {
                    tracing::warn!(event = "locale_column_repeated", column, header = %h, locale = %loc);
                    warnings.push(IngestWarning::RepeatedLocaleColumn {
                        column,
                        header: h.clone(),
                        locale: loc.clone(),
                    });
                }
                Some(loc) => out.push((column, loc.clone())),
                None => {
                    tracing::warn!(event = "locale_column_unknown", column, header = %h);
                    warnings.push(IngestWarning::UnknownLocaleColumn {
                        column,
                        header: h.clone(),
                    });
                }
            }
        }
        out
    }
}

/// `data` pairs each record with its 1-based record number, header included.
fn parse_rows(
    data: &[(usize, Vec<String>)],
    dialect: Dialect,
    columns: &[(usize, Locale)],
) -> Vec<TableRow> {
    let mut out = Vec::with_capacity(data.len());
    for (line, row) in data {
        let line = *line;
        let key = normalize_key(&cell(row, 0));
        if key.is_empty() {
            continue;
        }
        let values: Vec<(Locale, String)> = columns
            .iter()
            .map(|(col, loc)| (loc.clone(), cell(row, *col)))
            .filter(|(_, v)| !v.is_empty())
            .collect();
        out.push(match dialect {
            Dialect::Legacy => TableRow::Legacy(LegacyRow { line, key, values }),
            Dialect::Module => TableRow::Module(ModuleRow {
                line,
                module: normalize_key(&cell(row, 1)),
                module_index: cell(row, 2),
                raw_key: key,
                values,
            }),
        });
    }
    out
}

fn cell(row: &[String], i: usize) -> String {
    row.get(i).map(|c| c.trim()).unwrap_or_default().to_string()
}

/// Collects cell values and applies the duplicate policy per `(key, locale)`.
struct Accumulator {
    policy: DuplicatePolicy,
    translations: BTreeMap<String, BTreeMap<Locale, String>>,
    structure: BTreeMap<String, String>,
    written_by: HashMap<(String, Locale), usize>,
}

impl Accumulator {
    fn new(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            translations: BTreeMap::new(),
            structure: BTreeMap::new(),
            written_by: HashMap::new(),
        }
    }

    fn put_translation(
        &mut self,
        key: &str,
        line: usize,
        values: &[(Locale, String)],
        warnings: &mut Vec<IngestWarning>,
    ) {
        let mut clashes: Vec<(Locale, usize)> = Vec::new();
        let slot = self.translations.entry(key.to_string()).or_default();
        for (loc, v) in values {
            let id = (key.to_string(), loc.clone());
            match self.written_by.get(&id).copied() {
                Some(prev) => {
                    clashes.push((loc.clone(), prev));
                    if self.policy == DuplicatePolicy::Last {
                        slot.insert(loc.clone(), v.clone());
                        self.written_by.insert(id, line);
                    }
                }
                None => {
                    slot.insert(loc.clone(), v.clone());
                    self.written_by.insert(id, line);
                }
            }
        }
        if let Some(first_line) = clashes.iter().map(|(_, l)| *l).min() {
            self.warn_duplicate(key, first_line, line, clashes, warnings);
        }
    }

    fn put_structure(
        &mut self,
        key: &str,
        line: usize,
        default: &Locale,
        value: &str,
        warnings: &mut Vec<IngestWarning>,
    ) {
        let id = (key.to_string(), default.clone());
        match self.written_by.get(&id).copied() {
            Some(prev) => {
                if self.policy == DuplicatePolicy::Last {
                    self.structure.insert(key.to_string(), value.to_string());
                    self.written_by.insert(id, line);
                }
                self.warn_duplicate(key, prev, line, vec![(default.clone(), prev)], warnings);
            }
            None => {
                self.structure.insert(key.to_string(), value.to_string());
                self.written_by.insert(id, line);
            }
        }
    }

    fn warn_duplicate(
        &self,
        key: &str,
        first_line: usize,
        line: usize,
        clashes: Vec<(Locale, usize)>,
        warnings: &mut Vec<IngestWarning>,
    ) {
        let kept_line = match self.policy {
            DuplicatePolicy::Last => line,
            DuplicatePolicy::First => first_line,
        };
        let locales: Vec<Locale> = clashes.into_iter().map(|(l, _)| l).collect();
        tracing::warn!(
            event = "duplicate_key",
            key = %key,
            first_line,
            line,
            kept_line,
            locales = locales.len()
        );
        warnings.push(IngestWarning::DuplicateKey {
            key: key.to_string(),
            first_line,
            line,
            kept_line,
            locales,
        });
    }
}
