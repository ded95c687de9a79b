use std::str::FromStr;

use mailloc_core::Locale;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::LocaleRegistry;

/// Named subsets of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocalePreset {
    EnOnly,
    Top5,
    Global,
}

#[derive(Debug, Error)]
#[error("unknown locale preset `{0}` (expected en-only, top-5 or global)")]
pub struct UnknownPreset(pub String);

impl FromStr for LocalePreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "en-only" => Ok(LocalePreset::EnOnly),
            "top-5" | "top5" => Ok(LocalePreset::Top5),
            "global" => Ok(LocalePreset::Global),
            _ => Err(UnknownPreset(s.to_string())),
        }
    }
}

impl LocalePreset {
    fn codes(self, registry: &LocaleRegistry) -> Vec<Locale> {
        match self {
            LocalePreset::EnOnly => vec![registry.default_locale().clone()],
            LocalePreset::Top5 => ["en", "es", "fr", "ja", "ar", "pt-br"]
                .iter()
                .map(|c| Locale::new(*c))
                .collect(),
            LocalePreset::Global => registry.locales().to_vec(),
        }
    }
}

/// Which locales get a dispatch branch in the emitted template.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LocaleSelection {
    /// Locales that appear as columns in the source table.
    #[default]
    Present,
    Preset(LocalePreset),
    /// Explicit codes; the default locale is always included.
    Explicit(Vec<String>),
}

impl LocaleSelection {
    /// Parse a comma-separated list such as `en,es, fr`.
    pub fn from_list(list: &str) -> Self {
        LocaleSelection::Explicit(
            list.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Resolve to a non-empty list in catalog order.
    pub fn resolve(&self, registry: &LocaleRegistry, present: &[Locale]) -> Vec<Locale> {
        let picked: Vec<Locale> = match self {
            LocaleSelection::Present => present.to_vec(),
            LocaleSelection::Preset(p) => p.codes(registry),
            LocaleSelection::Explicit(codes) => {
                let mut out = vec![registry.default_locale().clone()];
                for code in codes {
                    match registry.match_header(code) {
                        Some(loc) => out.push(loc.clone()),
                        None => {
                            tracing::warn!(event = "locale_selection_unknown", code = %code)
                        }
                    }
                }
                out
            }
        };
        let sorted = registry.sort(&picked);
        if sorted.is_empty() {
            vec![registry.default_locale().clone()]
        } else {
            sorted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(v: Vec<Locale>) -> Vec<String> {
        v.into_iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn presets_parse_loosely() {
        assert_eq!("en_only".parse::<LocalePreset>().unwrap(), LocalePreset::EnOnly);
        assert_eq!("TOP_5".parse::<LocalePreset>().unwrap(), LocalePreset::Top5);
        assert!("everything".parse::<LocalePreset>().is_err());
    }

    #[test]
    fn explicit_list_adds_default_and_drops_unknown() {
        let reg = LocaleRegistry::standard();
        let sel = LocaleSelection::from_list("fr, xx ,es,fr");
        assert_eq!(codes(sel.resolve(&reg, &[])), vec!["en", "fr", "es"]);
    }

    #[test]
    fn top5_is_in_catalog_order() {
        let reg = LocaleRegistry::standard();
        let sel = LocaleSelection::Preset(LocalePreset::Top5);
        assert_eq!(
            codes(sel.resolve(&reg, &[])),
            vec!["en", "ar", "fr", "ja", "pt-br", "es"]
        );
    }

    #[test]
    fn present_without_columns_is_default_only() {
        let reg = LocaleRegistry::standard();
        assert_eq!(codes(LocaleSelection::Present.resolve(&reg, &[])), vec!["en"]);
    }
}
