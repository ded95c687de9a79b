//! Injected Liquid blocks that are not driven by the translation table:
//! build flags, static links, app download colours and terms defaults.

use std::collections::BTreeMap;

use crate::escape::{link_value, liquid_string};
use crate::{BuildFlags, ColourPreset};

const DEFAULT_LINKS: &[(&str, &str)] = &[
    ("app_download_page", "https://example.com/app"),
    ("homepage", "https://example.com"),
    ("terms_of_use", "https://example.com/terms-of-use"),
    ("privacy_policy", "https://example.com/privacy-policy"),
    ("booking_page", "https://example.com/bookings"),
    ("notification_preferences", "https://example.com/preferences"),
    ("notification_preferences_unsubscribe", "https://example.com/preferences/unsubscribe"),
    ("instagram", "https://www.instagram.com/example"),
    ("facebook", "https://www.facebook.com/example"),
    ("linkedin", "https://www.linkedin.com/company/example/"),
];

/// Fallback copy for the terms section when the table leaves it blank.
pub const TERMS_DEFAULTS: &[(&str, &str)] = &[
    ("terms_title", "Terms and Privacy Policy"),
    ("terms_label", "Terms"),
    ("privacy_label", "Privacy Policy"),
    ("terms_desc_text", "This booking is covered by our {terms} and {privacyPolicy}."),
];

/// Named static links, emitted as `link_<name>` assigns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Links(BTreeMap<String, String>);

impl Default for Links {
    fn default() -> Self {
        Self(
            DEFAULT_LINKS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl Links {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Later entries replace earlier ones with the same name.
    pub fn merge<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in entries {
            self.0.insert(k.into(), v.into());
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Liquid variable a link is exposed as.
pub fn link_var(name: &str) -> String {
    format!("link_{}", name.replace(['.', '-'], "_"))
}

fn flag(v: bool) -> &'static str {
    if v {
        "TRUE"
    } else {
        "FALSE"
    }
}

pub fn config_block(flags: &BuildFlags) -> String {
    [
        format!("{{%- assign show_header_logo = \"{}\" -%}}", flag(flags.show_header_logo)),
        format!("{{%- assign show_footer = \"{}\" -%}}", flag(flags.show_footer)),
        format!("{{%- assign show_terms = \"{}\" -%}}", flag(flags.show_terms)),
        format!(
            "{{%- assign app_download_colour_toggle = \"{}\" -%}}",
            flags.colour_preset.as_liquid()
        ),
        "{%- assign app_download_colour_preset = app_download_colour_preset | default: app_download_colour_toggle | upcase | strip -%}".to_string(),
    ]
    .join("\n")
}

pub fn links_block(links: &Links) -> String {
    let mut lines: Vec<String> = links
        .iter()
        .map(|(name, url)| format!("{{%- assign {} = {} -%}}", link_var(name), liquid_string(&link_value(url))))
        .collect();
    lines.push("{%- assign app_deeplink_url = app_deeplink_url | default: link_app_download_page -%}".to_string());
    lines.join("\n")
}

/// Background for the app download card, from an explicit colour or the
/// preset, and a text colour that stays readable on it.
pub fn app_download_settings() -> String {
    r##"{%- assign _preset_colour = token_neutral_c050 -%}
{%- if app_download_colour_preset == "DARK" -%}{%- assign _preset_colour = token_brand_c600 -%}{%- endif -%}
{%- assign app_download_colour = app_download_colour | default: _preset_colour | downcase | replace: " ", "" -%}
{%- assign app_download_text_colour = token_text_on_brand -%}
{%- if app_download_colour == token_neutral_c050 or app_download_colour == "#ffffff" -%}{%- assign app_download_text_colour = token_text_primary -%}{%- endif -%}"##
        .to_string()
}

/// Text colour the settings block picks for a resolved background.
pub fn app_download_text_colour<'a>(
    background: &str,
    tokens: &'a BTreeMap<String, String>,
) -> Option<&'a str> {
    let light = tokens.get("token_neutral_c050").map(|c| c.to_lowercase());
    let bg = background.to_lowercase().replace(' ', "");
    let key = if Some(&bg) == light.as_ref() || bg == "#ffffff" {
        "token_text_primary"
    } else {
        "token_text_on_brand"
    };
    tokens.get(key).map(String::as_str)
}

pub fn preset_colour_token(preset: ColourPreset) -> &'static str {
    match preset {
        ColourPreset::Light => "token_neutral_c050",
        ColourPreset::Dark => "token_brand_c600",
    }
}

/// Captures applied only when the table left the terms copy blank, then the
/// description with `{terms}` / `{privacyPolicy}` replaced by links.
pub fn terms_block() -> String {
    let mut lines: Vec<String> = TERMS_DEFAULTS
        .iter()
        .map(|(key, text)| {
            format!("{{%- if {key} == blank -%}}{{%- capture {key} -%}}{text}{{%- endcapture -%}}{{%- endif -%}}")
        })
        .collect();
    lines.push(format!(
        "{{%- capture terms_link_html -%}}{}{{%- endcapture -%}}",
        terms_anchor("{{ link_terms_of_use }}", "{{ terms_label | strip }}", "{{ token_text_muted }}")
    ));
    lines.push(format!(
        "{{%- capture privacy_link_html -%}}{}{{%- endcapture -%}}",
        terms_anchor("{{ link_privacy_policy }}", "{{ privacy_label | strip }}", "{{ token_text_muted }}")
    ));
    lines.push("{%- assign terms_desc_html = terms_desc_text | strip | replace: \"{terms}\", terms_link_html | replace: \"{privacyPolicy}\", privacy_link_html -%}".to_string());
    lines.join("\n")
}

pub(crate) fn terms_anchor(href: &str, label: &str, colour: &str) -> String {
    format!(
        "<a href=\"{href}\" target=\"_blank\" style=\"color:{colour};text-decoration:underline;\">{label}</a>"
    )
}

pub fn terms_default(key: &str) -> &'static str {
    TERMS_DEFAULTS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_flags_are_upper_case_strings() {
        let flags = BuildFlags {
            show_footer: false,
            colour_preset: ColourPreset::Dark,
            ..BuildFlags::default()
        };
        let block = config_block(&flags);
        assert!(block.contains("{%- assign show_header_logo = \"TRUE\" -%}"));
        assert!(block.contains("{%- assign show_footer = \"FALSE\" -%}"));
        assert!(block.contains("{%- assign app_download_colour_toggle = \"DARK\" -%}"));
    }

    #[test]
    fn links_merge_over_defaults_in_name_order() {
        let links = Links::default().merge([("homepage", "https://brand.test"), ("help-center", "https://brand.test/help")]);
        let block = links_block(&links);
        assert!(block.contains("{%- assign link_homepage = \"https://brand.test\" -%}"));
        assert!(block.contains("{%- assign link_help_center = \"https://brand.test/help\" -%}"));
        let app = block.find("link_app_download_page =").unwrap();
        let home = block.find("link_homepage =").unwrap();
        assert!(app < home);
        assert!(block.ends_with("default: link_app_download_page -%}"));
    }

    #[test]
    fn app_download_settings_keep_hex_literals_whole() {
        let block = app_download_settings();
        assert!(block.starts_with("{%- assign _preset_colour = token_neutral_c050 -%}"));
        assert!(block.contains("app_download_colour == \"#ffffff\""));
        assert!(block.ends_with("{%- endif -%}"));
        assert_eq!(block.lines().count(), 5);
    }

    #[test]
    fn quotes_in_links_cannot_break_the_assign() {
        let links = Links::empty().merge([("promo", r#"https://brand.test/?q="spring""#)]);
        let block = links_block(&links);
        assert!(block.starts_with("{%- assign link_promo = \"https://brand.test/?q=%22spring%22\" -%}"));
    }

    #[test]
    fn terms_defaults_only_fill_blanks() {
        let block = terms_block();
        assert!(block.starts_with("{%- if terms_title == blank -%}{%- capture terms_title -%}Terms and Privacy Policy"));
        assert!(block.contains("replace: \"{privacyPolicy}\", privacy_link_html"));
        assert_eq!(terms_default("terms_label"), "Terms");
        assert_eq!(terms_default("headline"), "");
    }

    #[test]
    fn text_colour_follows_background() {
        let tokens: BTreeMap<String, String> = [
            ("token_neutral_c050", "#fcf7f5"),
            ("token_text_primary", "#111"),
            ("token_text_on_brand", "#fff"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(app_download_text_colour("#FCF7F5", &tokens), Some("#111"));
        assert_eq!(app_download_text_colour("#5b2bb5", &tokens), Some("#fff"));
    }
}
