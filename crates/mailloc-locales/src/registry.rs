use mailloc_core::Locale;
use thiserror::Error;

/// Catalog order; also the expected column order of legacy tables.
pub const STANDARD_LOCALES: &[&str] = &[
    "en", "ar", "zh-cn", "zh-tw", "zh-hk", "hr", "cs", "da", "nl", "en-gb", "fil", "fi", "fr",
    "fr-ca", "de", "el", "he", "hu", "id", "it", "ja", "ko", "ms", "no", "pl", "pt", "pt-br",
    "ro", "ru", "es", "es-419", "sv", "th", "tr", "uk", "vi",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("locale registry must contain at least one locale")]
    Empty,
    #[error("locale `{0}` is listed more than once")]
    Duplicate(String),
}

/// Ordered, duplicate-free list of supported locales. The first entry is the
/// default locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleRegistry {
    locales: Vec<Locale>,
}

impl Default for LocaleRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl LocaleRegistry {
    pub fn standard() -> Self {
        Self {
            locales: STANDARD_LOCALES.iter().map(|c| Locale::new(*c)).collect(),
        }
    }

    pub fn new<I, S>(codes: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut locales: Vec<Locale> = Vec::new();
        for code in codes {
            let loc = Locale::new(code);
            if locales.contains(&loc) {
                return Err(RegistryError::Duplicate(loc.to_string()));
            }
            locales.push(loc);
        }
        if locales.is_empty() {
            return Err(RegistryError::Empty);
        }
        Ok(Self { locales })
    }

    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    pub fn default_locale(&self) -> &Locale {
        &self.locales[0]
    }

    pub fn get(&self, code: &str) -> Option<&Locale> {
        self.locales.iter().find(|l| l.as_str() == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn position(&self, locale: &Locale) -> Option<usize> {
        self.locales.iter().position(|l| l == locale)
    }

    /// Match a table column header: exact value first, then the normalised
    /// form (`PT_BR`, `pt br` and `pt-br` all match `pt-br`).
    pub fn match_header(&self, header: &str) -> Option<&Locale> {
        if let Some(loc) = self.get(header) {
            return Some(loc);
        }
        let wanted = normalize_header(header);
        if wanted.is_empty() {
            return None;
        }
        self.locales
            .iter()
            .find(|l| normalize_header(l.as_str()) == wanted)
    }

    /// Reorder `locales` by catalog position, dropping unknown and repeated entries.
    pub fn sort(&self, locales: &[Locale]) -> Vec<Locale> {
        self.locales
            .iter()
            .filter(|l| locales.contains(l))
            .cloned()
            .collect()
    }
}

/// Lowercase, trim, drop inner spaces and unify `_` to `-`.
pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == '_' { '-' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_starts_with_default() {
        let reg = LocaleRegistry::standard();
        assert_eq!(reg.default_locale().as_str(), "en");
        assert_eq!(reg.locales().len(), STANDARD_LOCALES.len());
    }

    #[test]
    fn rejects_duplicates_and_empty() {
        assert_eq!(
            LocaleRegistry::new(["en", "fr", "en"]).unwrap_err(),
            RegistryError::Duplicate("en".into())
        );
        assert_eq!(
            LocaleRegistry::new(Vec::<String>::new()).unwrap_err(),
            RegistryError::Empty
        );
    }

    #[test]
    fn header_matching_is_exact_then_normalised() {
        let reg = LocaleRegistry::standard();
        assert_eq!(reg.match_header("pt-br").map(|l| l.as_str()), Some("pt-br"));
        assert_eq!(reg.match_header("PT_BR").map(|l| l.as_str()), Some("pt-br"));
        assert_eq!(reg.match_header(" zh CN ").map(|l| l.as_str()), None);
        assert_eq!(reg.match_header(" zh-CN ").map(|l| l.as_str()), Some("zh-cn"));
        assert_eq!(reg.match_header("ES_419").map(|l| l.as_str()), Some("es-419"));
        assert_eq!(reg.match_header("klingon"), None);
        assert_eq!(reg.match_header("   "), None);
    }

    #[test]
    fn sort_uses_catalog_order() {
        let reg = LocaleRegistry::standard();
        let input = vec![Locale::new("vi"), Locale::new("en"), Locale::new("xx"), Locale::new("ar")];
        let sorted: Vec<_> = reg.sort(&input).into_iter().map(|l| l.to_string()).collect();
        assert_eq!(sorted, vec!["en", "ar", "vi"]);
    }
}
