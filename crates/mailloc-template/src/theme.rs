//! Theme tokens: opaque Liquid text injected into the artifact, plus the
//! token values the preview needs.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

pub const BUILTIN_THEME: &str = "default";

const BUILTIN_TEXT: &str = r##"{%- comment -%} theme: default {%- endcomment -%}
{%- assign token_font_stack = "Helvetica, Arial, sans-serif" -%}
{%- assign token_brand_name = "Example" -%}
{%- assign token_logo_url = "https://example.com/assets/logo.png" -%}
{%- assign token_brand_c600 = "#5b2bb5" -%}
{%- assign token_neutral_c050 = "#fcf7f5" -%}
{%- assign token_neutral_c900 = "#180c06" -%}
{%- assign token_accent = token_brand_c600 -%}
{%- assign token_cta_bg = token_brand_c600 -%}
{%- assign token_bg_page = "#ffffff" -%}
{%- assign token_text_primary = token_neutral_c900 -%}
{%- assign token_text_body = "#3b3431" -%}
{%- assign token_text_muted = "#615a56" -%}
{%- assign token_text_on_brand = "#ffffff" -%}
{%- assign token_radius_module = "16px" -%}
{%- assign token_space_300 = "12px" -%}
{%- assign token_space_400 = "16px" -%}
{%- assign token_space_500 = "20px" -%}
{%- assign token_space_600 = "24px" -%}
{%- assign token_space_700 = "28px" -%}
{%- assign token_space_800 = "32px" -%}
{%- assign token_space_900 = "40px" -%}"##;

fn assign_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"assign\s+(token_\w+)\s*=\s*(?:"([^"]*)"|(token_\w+))"#).unwrap())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub text: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Theme {
    pub fn builtin() -> Self {
        Self {
            name: BUILTIN_THEME.to_string(),
            text: BUILTIN_TEXT.to_string(),
        }
    }

    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// `token_* -> value` from the theme's assigns.
    ///
    /// A token assigned from another token takes that token's value; chains
    /// are followed up to three levels. Unresolvable references stay as the
    /// referenced name.
    pub fn tokens(&self) -> BTreeMap<String, String> {
        let mut tokens = BTreeMap::new();
        for caps in assign_re().captures_iter(&self.text) {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            tokens.insert(caps[1].to_string(), value);
        }
        for _ in 0..3 {
            let snapshot = tokens.clone();
            for value in tokens.values_mut() {
                if value.starts_with("token_") {
                    if let Some(target) = snapshot.get(value.as_str()) {
                        *value = target.clone();
                    }
                }
            }
        }
        tokens
    }
}
