//! Assembles the multi-locale Liquid template.
//!
//! The artifact is, in order: a header comment, the emitted locale
//! resolver, links, theme tokens, build flags, app download colours, one
//! capture per translatable key, one capture per structural key, terms
//! defaults and finally the HTML document.

use std::str::FromStr;

use mailloc_core::{ContentSchema, Locale, LocaleDispatchBlock, TranslationTable};
use mailloc_locales::{LocaleRegistry, ResolverRules};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub mod blocks;
pub mod dispatch;
pub mod escape;
pub mod layout;
pub mod preview;
pub mod resolver;
pub mod theme;

pub use blocks::Links;
pub use dispatch::LOCALE_VAR;
pub use preview::{render_preview, PreviewInput};
pub use resolver::RenderAttributes;
pub use theme::{Theme, BUILTIN_THEME};

const HEADER: &str = "{%- comment -%}\nMulti-locale email generated by mailloc. Edit the translations table and rebuild instead of editing this file.\n{%- endcomment -%}";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown colour preset '{0}' (expected light or dark)")]
pub struct UnknownColourPreset(pub String);

/// Background preset of the app download card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColourPreset {
    #[default]
    Light,
    Dark,
}

impl ColourPreset {
    pub fn as_liquid(self) -> &'static str {
        match self {
            ColourPreset::Light => "LIGHT",
            ColourPreset::Dark => "DARK",
        }
    }
}

impl FromStr for ColourPreset {
    type Err = UnknownColourPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ColourPreset::Light),
            "dark" => Ok(ColourPreset::Dark),
            _ => Err(UnknownColourPreset(s.to_string())),
        }
    }
}

/// Toggles for optional sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildFlags {
    pub show_header_logo: bool,
    pub show_footer: bool,
    pub show_terms: bool,
    pub colour_preset: ColourPreset,
}

impl Default for BuildFlags {
    fn default() -> Self {
        Self {
            show_header_logo: true,
            show_footer: true,
            show_terms: true,
            colour_preset: ColourPreset::Light,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AssembleOptions {
    /// Locales that get a `when` clause. Empty means the default locale only.
    pub locales: Vec<Locale>,
    pub flags: BuildFlags,
    pub attributes: RenderAttributes,
    pub links: Links,
    pub theme: Theme,
}

/// A compiled template plus what went into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub text: String,
    pub blocks: Vec<LocaleDispatchBlock>,
    pub structural: Vec<(String, String)>,
    pub locales: Vec<Locale>,
}

impl Artifact {
    /// What the dispatch block for `key` yields when the resolver picks
    /// `locale`; `None` when no block was emitted for `key`.
    pub fn dispatch(&self, key: &str, locale: &Locale) -> Option<&str> {
        self.blocks
            .iter()
            .find(|b| b.key == key)
            .map(|b| b.value_for(locale))
    }
}

pub struct Assembler<'a> {
    registry: &'a LocaleRegistry,
    rules: &'a ResolverRules,
    schema: &'a ContentSchema,
}

impl<'a> Assembler<'a> {
    pub fn new(registry: &'a LocaleRegistry, rules: &'a ResolverRules, schema: &'a ContentSchema) -> Self {
        Self {
            registry,
            rules,
            schema,
        }
    }

    pub fn assemble(&self, table: &TranslationTable, opts: &AssembleOptions) -> Artifact {
        let mut locales = self.registry.sort(&opts.locales);
        if locales.is_empty() {
            locales.push(self.registry.default_locale().clone());
        }

        let dispatched = dispatch::dispatch_blocks(self.schema, table, &locales);
        let structural = dispatch::structural_values(self.schema, table);

        let mut parts = vec![
            HEADER.to_string(),
            resolver::render_resolver(self.registry, self.rules, &opts.attributes),
            blocks::links_block(&opts.links),
            opts.theme.text.trim_end().to_string(),
            blocks::config_block(&opts.flags),
            blocks::app_download_settings(),
        ];
        parts.extend(dispatched.iter().map(dispatch::render_dispatch));
        parts.extend(
            structural
                .iter()
                .map(|(key, value)| dispatch::render_structural(key, &escape::structural_markup(key, value))),
        );
        parts.push(blocks::terms_block());
        parts.push(layout::document(table));

        let mut text = parts.join("\n");
        text.push('\n');

        info!(
            event = "artifact_assembled",
            blocks = dispatched.len(),
            structural = structural.len(),
            locales = locales.len(),
            theme = %opts.theme.name,
            bytes = text.len()
        );
        Artifact {
            text,
            blocks: dispatched,
            structural,
            locales,
        }
    }
}
