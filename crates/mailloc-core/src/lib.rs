use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

mod schema;

pub use schema::{ContentSchema, KeyKind};

/// Workspace-wide result alias.
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Identifier of a language/region variant, e.g. `en`, `pt-br`, `es-419`.
///
/// Locales are compared by their exact string value; any normalisation of
/// free-form input happens before a `Locale` is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Locale {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Locale {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Compiled translations for one source table.
///
/// Only non-empty cells are stored. Reads that need the default-locale
/// fallback go through [`TranslationTable::effective`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationTable {
    default_locale: Locale,
    columns: Vec<Locale>,
    translations: BTreeMap<String, BTreeMap<Locale, String>>,
    structure: BTreeMap<String, String>,
}

impl TranslationTable {
    pub fn new(
        default_locale: Locale,
        columns: Vec<Locale>,
        translations: BTreeMap<String, BTreeMap<Locale, String>>,
        structure: BTreeMap<String, String>,
    ) -> Self {
        let translations = translations
            .into_iter()
            .map(|(key, values)| {
                let values: BTreeMap<Locale, String> = values
                    .into_iter()
                    .filter(|(_, v)| !v.trim().is_empty())
                    .collect();
                (key, values)
            })
            .collect();
        let structure = structure
            .into_iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .collect();
        Self {
            default_locale,
            columns,
            translations,
            structure,
        }
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Locales that had a matching column in the source table, in registry order.
    pub fn columns(&self) -> &[Locale] {
        &self.columns
    }

    /// Raw cell value, without fallback.
    pub fn translation(&self, key: &str, locale: &Locale) -> Option<&str> {
        self.translations
            .get(key)
            .and_then(|values| values.get(locale))
            .map(String::as_str)
    }

    pub fn default_value(&self, key: &str) -> Option<&str> {
        self.translation(key, &self.default_locale)
    }

    /// Value a recipient in `locale` sees: the locale's own cell, else the
    /// default locale's cell, else nothing.
    pub fn effective(&self, key: &str, locale: &Locale) -> Option<&str> {
        self.translation(key, locale)
            .or_else(|| self.default_value(key))
    }

    pub fn structure(&self, key: &str) -> Option<&str> {
        self.structure.get(key).map(String::as_str)
    }

    pub fn has_translation(&self, key: &str) -> bool {
        self.translations
            .get(key)
            .map(|values| !values.is_empty())
            .unwrap_or(false)
    }

    pub fn has_structure(&self, key: &str) -> bool {
        self.structure.contains_key(key)
    }

    pub fn translatable_keys(&self) -> impl Iterator<Item = &str> {
        self.translations
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(k, _)| k.as_str())
    }

    pub fn structural_keys(&self) -> impl Iterator<Item = &str> {
        self.structure.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.translatable_keys().next().is_none() && self.structure.is_empty()
    }
}

/// Per-key locale dispatch, in registry order, plus the value of the final
/// `else` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleDispatchBlock {
    pub key: String,
    pub entries: Vec<(Locale, String)>,
    pub default: String,
}

impl LocaleDispatchBlock {
    /// Build the block for `key` over `locales`.
    ///
    /// Locales with neither an own value nor a default-locale value are
    /// omitted; render time then falls through to `default`.
    pub fn build(key: &str, table: &TranslationTable, locales: &[Locale]) -> Self {
        let entries = locales
            .iter()
            .filter_map(|loc| {
                table
                    .effective(key, loc)
                    .map(|v| (loc.clone(), v.trim().to_string()))
            })
            .collect();
        let default = table
            .default_value(key)
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        Self {
            key: key.to_string(),
            entries,
            default,
        }
    }

    pub fn value_for(&self, locale: &Locale) -> &str {
        self.entries
            .iter()
            .find(|(loc, _)| loc == locale)
            .map(|(_, v)| v.as_str())
            .unwrap_or(&self.default)
    }
}
