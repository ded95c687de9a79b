use mailloc_core::Locale;
use serde::Serialize;

/// Header shape of a translations table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// `Key, <locale>...`
    Legacy,
    /// `Key, Module, module_index, <locale>...`
    Module,
}

impl Dialect {
    /// Index of the first locale column.
    pub fn locale_start(self) -> usize {
        match self {
            Dialect::Legacy => 1,
            Dialect::Module => 3,
        }
    }
}

pub const MODULE_LABEL: &str = "module";
pub const MODULE_INDEX_LABEL: &str = "module_index";

/// Module dialect when the 2nd and 3rd headers are the group and index
/// labels (case and spacing ignored). Data rows play no part.
pub fn detect_dialect<S: AsRef<str>>(headers: &[S]) -> Dialect {
    let label = |i: usize| headers.get(i).map(|h| normalize_key(h.as_ref()));
    if label(1).as_deref() == Some(MODULE_LABEL) && label(2).as_deref() == Some(MODULE_INDEX_LABEL)
    {
        Dialect::Module
    } else {
        Dialect::Legacy
    }
}

/// Trim, lowercase and drop whitespace: `" Image 1_URL"` → `"image1_url"`.
pub fn normalize_key(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyRow {
    /// 1-based line in the source table, header included.
    pub line: usize,
    pub key: String,
    pub values: Vec<(Locale, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRow {
    pub line: usize,
    pub module: String,
    /// Editor grouping only; carried for provenance.
    pub module_index: String,
    pub raw_key: String,
    pub values: Vec<(Locale, String)>,
}

/// One data row, tagged by the dialect that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    Legacy(LegacyRow),
    Module(ModuleRow),
}

impl TableRow {
    pub fn line(&self) -> usize {
        match self {
            TableRow::Legacy(r) => r.line,
            TableRow::Module(r) => r.line,
        }
    }

    pub fn values(&self) -> &[(Locale, String)] {
        match self {
            TableRow::Legacy(r) => &r.values,
            TableRow::Module(r) => &r.values,
        }
    }

    pub fn value(&self, locale: &Locale) -> Option<&str> {
        self.values()
            .iter()
            .find(|(l, _)| l == locale)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_headers_are_detected_regardless_of_case() {
        assert_eq!(detect_dialect(&["Key", "Module", "module_index", "en"]), Dialect::Module);
        assert_eq!(detect_dialect(&["key", " MODULE ", "Module Index", "en"]), Dialect::Legacy);
        assert_eq!(detect_dialect(&["key", "module", "module _index"]), Dialect::Module);
    }

    #[test]
    fn anything_else_is_legacy() {
        assert_eq!(detect_dialect(&["Key", "en", "ar"]), Dialect::Legacy);
        assert_eq!(detect_dialect(&["Key", "Module"]), Dialect::Legacy);
        assert_eq!(detect_dialect(&["Key", "module_index", "module"]), Dialect::Legacy);
        assert_eq!(detect_dialect::<&str>(&[]), Dialect::Legacy);
    }

    #[test]
    fn keys_are_squashed() {
        assert_eq!(normalize_key(" Image 1_URL "), "image1_url");
        assert_eq!(normalize_key("Subject_Line"), "subject_line");
    }
}
