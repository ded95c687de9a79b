//! Rewrites `(module, raw key)` pairs of module-dialect tables into the
//! canonical keys the template assembler understands.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod rules;

pub use rules::{layout, ModuleLayout, MODULE_LAYOUTS, STANDARD_RULES};

/// How a canonical key was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemapSource {
    Rule,
    /// No rule matched; the raw key is used unchanged.
    Passthrough,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Remapped {
    pub key: String,
    pub source: RemapSource,
}

/// Immutable `(module, raw key) -> canonical key` lookup.
#[derive(Debug, Clone)]
pub struct RemapRules {
    rules: Vec<(String, String, String)>,
}

impl Default for RemapRules {
    fn default() -> Self {
        Self::standard()
    }
}

impl RemapRules {
    pub fn standard() -> Self {
        Self::new(STANDARD_RULES.iter().map(|(m, k, c)| (*m, *k, *c)))
    }

    pub fn new<'s>(rules: impl IntoIterator<Item = (&'s str, &'s str, &'s str)>) -> Self {
        Self {
            rules: rules
                .into_iter()
                .map(|(m, k, c)| (m.to_string(), k.to_string(), c.to_string()))
                .collect(),
        }
    }

    /// Exact rule first, then a rule whose raw key matches once underscores are
    /// ignored (`image1url` finds `image_1_url`), else pass through.
    pub fn remap(&self, module: &str, raw_key: &str) -> Remapped {
        if let Some(key) = self.lookup(module, |k| k == raw_key) {
            return Remapped {
                key,
                source: RemapSource::Rule,
            };
        }
        let squashed = squash(raw_key);
        if let Some(key) = self.lookup(module, |k| squash(k) == squashed) {
            return Remapped {
                key,
                source: RemapSource::Rule,
            };
        }
        Remapped {
            key: raw_key.to_string(),
            source: RemapSource::Passthrough,
        }
    }

    fn lookup(&self, module: &str, matches: impl Fn(&str) -> bool) -> Option<String> {
        self.rules
            .iter()
            .find(|(m, k, _)| m == module && matches(k.as_str()))
            .map(|(_, _, c)| c.clone())
    }

    /// Module names in first-seen order.
    pub fn modules(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for (m, _, _) in &self.rules {
            if !out.contains(&m.as_str()) {
                out.push(m);
            }
        }
        out
    }

    pub fn is_known_module(&self, module: &str) -> bool {
        self.rules.iter().any(|(m, _, _)| m == module)
    }
}

fn squash(key: &str) -> String {
    key.chars().filter(|c| *c != '_').collect()
}

/// What to keep when two rows resolve to the same canonical key and locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// The later row overwrites the earlier one.
    #[default]
    Last,
    /// The first row with a value is kept.
    First,
}

#[derive(Debug, Error)]
#[error("unknown duplicate policy `{0}` (expected last or first)")]
pub struct UnknownPolicy(pub String);

impl FromStr for DuplicatePolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "last" | "last-write-wins" => Ok(DuplicatePolicy::Last),
            "first" | "first-write-wins" => Ok(DuplicatePolicy::First),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renames_within_module() {
        let r = RemapRules::standard();
        let out = r.remap("hero_module_two_column", "subheadline");
        assert_eq!(out.key, "secondary_headline");
        assert_eq!(out.source, RemapSource::Rule);
        assert_eq!(r.remap("app_download_module", "headline").key, "app_download_title");
        assert_eq!(r.remap("disclaimer_module", "terms_desc").key, "terms_desc_text");
    }

    #[test]
    fn same_raw_key_differs_by_module() {
        let r = RemapRules::standard();
        assert_eq!(r.remap("icon_left_text_right_module", "title").key, "usp_title");
        assert_eq!(r.remap("text_left_image_right_module", "title").key, "usp_feature_title");
        assert_eq!(r.remap("alternating_text_image_module", "title").key, "usp_ui_title");
    }

    #[test]
    fn alternative_hero_layouts_share_slots() {
        let r = RemapRules::standard();
        assert_eq!(r.remap("hero_module", "subject_line").key, "subject_line");
        assert_eq!(r.remap("hero_module_two_column", "subject_line").key, "subject_line");
        assert_eq!(r.remap("hero_module_two_column", "hero_image_url").key, "image_url");
        assert_eq!(r.remap("app_download_module", "color").key, "app_download_colour");
    }

    #[test]
    fn underscore_insensitive_retry() {
        let r = RemapRules::standard();
        assert_eq!(r.remap("hero_module_two_column", "image1url").key, "hero_two_col_image_1_url");
        assert_eq!(r.remap("app_download_module", "feature1").key, "app_download_feature_1");
    }

    #[test]
    fn unmapped_pairs_pass_through_stably() {
        let r = RemapRules::standard();
        let a = r.remap("future_module", "new_slot");
        let b = r.remap("future_module", "new_slot");
        assert_eq!(a, b);
        assert_eq!(a.key, "new_slot");
        assert_eq!(a.source, RemapSource::Passthrough);
    }

    #[test]
    fn remap_is_idempotent_for_every_rule() {
        let r = RemapRules::standard();
        for (m, k, c) in STANDARD_RULES {
            assert_eq!(r.remap(m, k).key, *c);
            assert_eq!(r.remap(m, k), r.remap(m, k));
        }
    }

    #[test]
    fn module_order_is_first_seen() {
        let r = RemapRules::standard();
        let mods = r.modules();
        assert_eq!(mods.first(), Some(&"hero_module"));
        assert!(r.is_known_module("disclaimer_module"));
        assert!(!r.is_known_module("footer_module"));
    }

    #[test]
    fn every_layout_row_is_covered_by_a_rule() {
        let r = RemapRules::standard();
        for l in MODULE_LAYOUTS {
            for (raw, _) in l.rows {
                assert_eq!(r.remap(l.module, raw).source, RemapSource::Rule, "{}/{}", l.module, raw);
            }
        }
    }

    #[test]
    fn policy_parses() {
        assert_eq!("LAST".parse::<DuplicatePolicy>().unwrap(), DuplicatePolicy::Last);
        assert_eq!("first".parse::<DuplicatePolicy>().unwrap(), DuplicatePolicy::First);
        assert!("random".parse::<DuplicatePolicy>().is_err());
    }
}
