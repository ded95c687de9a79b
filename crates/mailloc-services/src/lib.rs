//! High-level orchestration over the mailloc crates.
//! Thin on purpose: one entry point per CLI command.

use mailloc_core::ContentSchema;
use mailloc_locales::{LocaleRegistry, ResolverRules};
use mailloc_remap::RemapRules;

pub use mailloc_core::Result;

mod assets;
mod build;
mod inspect;
mod preview;
mod schema;
mod sheet;

pub use assets::{load_links, load_theme, parse_links, DEFAULT_THEMES_DIR};
pub use build::{compile, summarize, BuildOptions, Compiled};
pub use inspect::{locale_infos, resolve};
pub use preview::preview;
pub use schema::write_schemas;
pub use sheet::input_template;

/// The read-only data every command works against, built once and passed
/// down explicitly.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub registry: LocaleRegistry,
    pub rules: ResolverRules,
    pub schema: ContentSchema,
    pub remap: RemapRules,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog {
    pub fn standard() -> Self {
        Self {
            registry: LocaleRegistry::standard(),
            rules: ResolverRules::standard(),
            schema: ContentSchema::standard(),
            remap: RemapRules::standard(),
        }
    }
}
