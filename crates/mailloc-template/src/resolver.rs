//! Emits the recipient locale resolution as Liquid.
//!
//! The emitted chain follows the same tables and the same order as
//! [`mailloc_locales::LocaleResolver`]: compound markers, then country
//! overrides, then the base language, then the default locale.

use mailloc_locales::{LocaleRegistry, ResolverRules, TAG_SEPARATORS};
use serde::{Deserialize, Serialize};

use crate::dispatch::LOCALE_VAR;
use crate::escape::liquid_string;

/// Render-time attribute paths the resolver reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderAttributes {
    pub language: String,
    /// Tried in order; the first non-blank one is the country.
    pub countries: Vec<String>,
}

impl Default for RenderAttributes {
    fn default() -> Self {
        Self {
            language: "customer.language".to_string(),
            countries: vec![
                "customer.country_code".to_string(),
                "customer.country".to_string(),
                "customer.cio_iso_country".to_string(),
            ],
        }
    }
}

/// Each `--` to `-` pass halves a separator run, so runs of up to
/// 2^COLLAPSE_PASSES separators end as a single hyphen.
const COLLAPSE_PASSES: usize = 6;

fn assign(var: &str, expr: &str) -> String {
    format!("{{%- assign {var} = {expr} -%}}")
}

fn list(items: &[&str]) -> String {
    format!("{} | split: \",\"", liquid_string(&items.join(",")))
}

pub fn render_resolver(
    registry: &LocaleRegistry,
    rules: &ResolverRules,
    attrs: &RenderAttributes,
) -> String {
    let default = registry.default_locale().as_str();
    let known: Vec<&str> = registry.locales().iter().map(|l| l.as_str()).collect();
    let mut out: Vec<String> = Vec::new();

    let mut lang = format!(
        "{} | default: {} | strip | downcase",
        attrs.language,
        liquid_string(default)
    );
    for sep in TAG_SEPARATORS {
        lang.push_str(&format!(" | replace: {}, \"-\"", liquid_string(&sep.to_string())));
    }
    for _ in 0..COLLAPSE_PASSES {
        lang.push_str(" | replace: \"--\", \"-\"");
    }
    out.push(assign("lang", &lang));
    out.push(assign("lang_head", "lang | slice: 0"));
    out.push(format!(
        "{{%- if lang_head == \"-\" -%}}{}{{%- endif -%}}",
        assign("lang", "lang | remove_first: \"-\"")
    ));
    out.push(format!(
        "{{%- if lang == \"\" -%}}{}{{%- endif -%}}",
        assign("lang", &liquid_string(default))
    ));
    out.push(assign("lang_end", "lang | size | minus: 1"));
    out.push(assign("lang_tail", "lang | slice: lang_end"));
    out.push(format!(
        "{{%- if lang_tail == \"-\" -%}}{}{{%- endif -%}}",
        assign("lang", "lang | slice: 0, lang_end")
    ));
    out.push(assign("lang_parts", "lang | split: \"-\""));
    out.push(assign("lang_primary", "lang_parts | first"));
    out.push(assign("lang_region", "\"\""));
    out.push(format!(
        "{{%- if lang_parts.size > 1 -%}}{}{{%- if lang_last.size == 2 -%}}{}{{%- endif -%}}{{%- endif -%}}",
        assign("lang_last", "lang_parts | last"),
        assign("lang_region", "lang_last | upcase")
    ));
    out.push(assign("known_locales", &list(&known)));

    // base language: alias, else a supported primary subtag, else 2-letter prefix
    out.push("{%- case lang_primary -%}".to_string());
    for (from, to) in &rules.aliases {
        out.push(format!(
            "  {{%- when {} -%}}{}",
            liquid_string(from),
            assign("lang_base", &liquid_string(to))
        ));
    }
    out.push(format!(
        "  {{%- else -%}}{{%- if known_locales contains lang_primary -%}}{}{{%- else -%}}{}{{%- endif -%}}",
        assign("lang_base", "lang_primary"),
        assign("lang_base", "lang | slice: 0, 2")
    ));
    out.push("{%- endcase -%}".to_string());

    let mut country_expr = String::new();
    for attr in &attrs.countries {
        if country_expr.is_empty() {
            country_expr.push_str(attr);
        } else {
            country_expr.push_str(&format!(" | default: {attr}"));
        }
    }
    if country_expr.is_empty() {
        country_expr.push_str("\"\"");
    } else {
        country_expr.push_str(" | default: \"\"");
    }
    out.push(assign(
        "country",
        &format!("{country_expr} | strip | upcase | slice: 0, 2"),
    ));
    out.push(format!(
        "{{%- if country == \"\" -%}}{}{{%- endif -%}}",
        assign("country", "lang_region")
    ));

    let overrides: Vec<_> = rules
        .country_overrides
        .iter()
        .filter(|o| registry.contains(o.locale))
        .collect();
    for (i, o) in overrides.iter().enumerate() {
        out.push(assign(&format!("override_{i}_countries"), &list(o.countries)));
    }

    let mut branches: Vec<(String, String)> = Vec::new();
    for (marker, code) in &rules.compound_markers {
        if registry.contains(code) {
            branches.push((format!("lang contains {}", liquid_string(marker)), liquid_string(code)));
        }
    }
    for (i, o) in overrides.iter().enumerate() {
        branches.push((
            format!(
                "lang_base == {} and override_{i}_countries contains country",
                liquid_string(o.language)
            ),
            liquid_string(o.locale),
        ));
    }
    branches.push(("known_locales contains lang_base".to_string(), "lang_base".to_string()));

    for (i, (cond, value)) in branches.iter().enumerate() {
        let tag = if i == 0 { "if" } else { "elsif" };
        out.push(format!("{{%- {tag} {cond} -%}}{}", assign(LOCALE_VAR, value)));
    }
    out.push(format!("{{%- else -%}}{}", assign(LOCALE_VAR, &liquid_string(default))));
    out.push("{%- endif -%}".to_string());

    out.push(assign("rtl_locales", &list(&rules.rtl)));
    out.push(assign("dir", "\"ltr\""));
    out.push(assign("align", "\"left\""));
    out.push(assign("headline_align", "\"center\""));
    out.push(format!(
        "{{%- if rtl_locales contains {LOCALE_VAR} -%}}{}{}{}{{%- endif -%}}",
        assign("dir", "\"rtl\""),
        assign("align", "\"right\""),
        assign("headline_align", "\"right\"")
    ));
    out.join("\n")
}
