//! Static HTML rendering of an artifact for one fixed locale.
//!
//! This is a reduced evaluation: the resolver is skipped in favour of the
//! caller's locale, dispatch blocks collapse to that locale's value and only
//! the flat conditionals the layout emits are evaluated.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use mailloc_core::{ContentSchema, Locale, TranslationTable};
use mailloc_locales::ResolverRules;
use regex::{Captures, Regex};
use tracing::debug;

use crate::blocks::{self, link_var, Links};
use crate::escape::{link_value, structural_markup};
use crate::layout::DOCUMENT_START;
use crate::theme::Theme;
use crate::BuildFlags;

fn conditional_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)\{%-?\s*if\s+(\w+)\s*(==|!=)\s*("TRUE"|blank)\s*-?%\}(.*?)\{%-?\s*endif\s*-?%\}"#).unwrap()
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\{%.*?%\}").unwrap())
}

fn output_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{\s*(\w+)\s*(?:\|\s*strip\s*)?\}\}").unwrap())
}

pub struct PreviewInput<'a> {
    pub artifact: &'a str,
    pub table: &'a TranslationTable,
    pub schema: &'a ContentSchema,
    pub rules: &'a ResolverRules,
    pub locale: &'a Locale,
    pub flags: &'a BuildFlags,
    pub links: &'a Links,
    pub theme: &'a Theme,
}

struct Values<'a> {
    input: &'a PreviewInput<'a>,
    vars: BTreeMap<String, String>,
}

impl<'a> Values<'a> {
    fn build(input: &'a PreviewInput<'a>) -> Self {
        let mut vars = input.theme.tokens();
        let table = input.table;
        for key in input.schema.translatable() {
            if let Some(v) = table.effective(key, input.locale) {
                vars.insert(key.to_string(), v.trim().to_string());
            }
        }
        for (key, text) in blocks::TERMS_DEFAULTS {
            vars.entry(key.to_string()).or_insert_with(|| text.to_string());
        }
        for key in input.schema.structural() {
            if let Some(v) = table.structure(key) {
                vars.insert(key.to_string(), structural_markup(key, v));
            }
        }
        for (name, url) in input.links.iter() {
            let url = if url.contains("{{") { "#" } else { url };
            vars.insert(link_var(name), link_value(url));
        }

        let direction = input.rules.direction(input.locale.as_str());
        vars.insert("locale_key".into(), input.locale.to_string());
        vars.insert("dir".into(), direction.as_str().into());
        vars.insert("align".into(), direction.align().into());
        vars.insert("headline_align".into(), direction.headline_align().into());

        let deeplink = vars.get("link_app_download_page").cloned().unwrap_or_default();
        vars.entry("app_deeplink_url".into()).or_insert(deeplink);
        let preset = blocks::preset_colour_token(input.flags.colour_preset);
        let background = vars
            .get("app_download_colour")
            .or_else(|| vars.get(preset))
            .cloned()
            .unwrap_or_default();
        let tokens = input.theme.tokens();
        let text_colour = blocks::app_download_text_colour(&background, &tokens)
            .unwrap_or_default()
            .to_string();
        vars.insert("app_download_colour".into(), background);
        vars.insert("app_download_text_colour".into(), text_colour);

        let muted = vars.get("token_text_muted").cloned().unwrap_or_default();
        let anchor = |link: &str, label: &str| {
            blocks::terms_anchor(
                vars.get(link).map(String::as_str).unwrap_or("#"),
                vars.get(label).map(String::as_str).unwrap_or_default(),
                &muted,
            )
        };
        let terms = anchor("link_terms_of_use", "terms_label");
        let privacy = anchor("link_privacy_policy", "privacy_label");
        let desc = vars
            .get("terms_desc_text")
            .map(|d| d.replace("{terms}", &terms).replace("{privacyPolicy}", &privacy))
            .unwrap_or_default();
        vars.insert("terms_desc_html".into(), desc);

        Self { input, vars }
    }

    fn keep(&self, var: &str, op: &str, rhs: &str) -> bool {
        let flags = self.input.flags;
        match (op, rhs) {
            ("==", "\"TRUE\"") => match var {
                "show_header_logo" => flags.show_header_logo,
                "show_footer" => flags.show_footer,
                "show_terms" => flags.show_terms,
                _ => false,
            },
            ("!=", "blank") => self.vars.get(var).is_some_and(|v| !v.trim().is_empty()),
            _ => false,
        }
    }
}

/// Render `input.artifact` as static HTML for `input.locale`.
pub fn render_preview(input: &PreviewInput<'_>) -> String {
    let values = Values::build(input);
    let body = match input.artifact.find(DOCUMENT_START) {
        Some(at) => &input.artifact[at..],
        None => input.artifact,
    };
    let evaluated = conditional_re().replace_all(body, |caps: &Captures| {
        if values.keep(&caps[1], &caps[2], &caps[3]) {
            caps[4].to_string()
        } else {
            String::new()
        }
    });
    let stripped = tag_re().replace_all(&evaluated, "");
    let html = output_re()
        .replace_all(&stripped, |caps: &Captures| {
            values.vars.get(&caps[1]).cloned().unwrap_or_default()
        })
        .into_owned();
    debug!(event = "preview_rendered", locale = %input.locale, bytes = html.len());
    html
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use mailloc_core::{ContentSchema, Locale, TranslationTable};
    use mailloc_locales::ResolverRules;

    use super::*;
    use crate::layout;

    fn table() -> TranslationTable {
        let en = Locale::new("en");
        let ar = Locale::new("ar");
        let mut translations = BTreeMap::new();
        translations.insert(
            "headline".to_string(),
            BTreeMap::from([(en.clone(), "Hello".to_string()), (ar.clone(), "مرحبا".to_string())]),
        );
        translations.insert(
            "body_1".to_string(),
            BTreeMap::from([(en.clone(), "50% {% off %}".to_string())]),
        );
        translations.insert(
            "usp_title".to_string(),
            BTreeMap::from([(en.clone(), "Why us".to_string())]),
        );
        let structure = BTreeMap::from([("image_url".to_string(), "example.com/hero.png".to_string())]);
        TranslationTable::new(en.clone(), vec![en, ar], translations, structure)
    }

    fn render(locale: &str, flags: BuildFlags) -> String {
        let t = table();
        let doc = format!("{{%- assign x = 1 -%}}\n{}", layout::document(&t));
        let locale = Locale::new(locale);
        render_preview(&PreviewInput {
            artifact: &doc,
            table: &t,
            schema: &ContentSchema::standard(),
            rules: &ResolverRules::standard(),
            locale: &locale,
            flags: &flags,
            links: &Links::default(),
            theme: &Theme::builtin(),
        })
    }

    #[test]
    fn substitutes_locale_values_with_fallback() {
        let html = render("ar", BuildFlags::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(">مرحبا</h1>"));
        assert!(html.contains("50% {% off %}"));
        assert!(html.contains("dir=\"rtl\""));
        assert!(html.contains("text-align:right"));
        assert!(html.contains("src=\"https://example.com/hero.png\""));
    }

    #[test]
    fn no_liquid_survives() {
        let html = render("en", BuildFlags::default());
        assert!(!html.contains("{{"));
        assert!(!html.contains("{%-"));
        assert!(html.contains("Why us"));
        assert!(html.contains("This booking is covered by our <a href=\"https://example.com/terms-of-use\""));
    }

    #[test]
    fn disabled_sections_are_removed() {
        let on = render("en", BuildFlags::default());
        assert!(on.contains("Instagram"));
        let off = render(
            "en",
            BuildFlags {
                show_footer: false,
                show_terms: false,
                ..BuildFlags::default()
            },
        );
        assert!(!off.contains("Instagram"));
        assert!(!off.contains("Terms and Privacy Policy"));
    }
}
