//! Supported locales and the rules that map a recipient's language/country
//! attributes onto one of them.
//!
//! [`LocaleRegistry`] is used at compile time to interpret table columns and
//! to order dispatch branches. [`ResolverRules`] holds the declarative tables
//! (aliases, compound markers, country overrides, RTL set) that are both
//! evaluated here by [`LocaleResolver`] and written into the emitted template.

mod registry;
mod resolver;
mod selection;

pub use registry::{normalize_header, LocaleRegistry, RegistryError, STANDARD_LOCALES};
pub use resolver::{
    normalize_tag, CountryOverride, Direction, LocaleResolver, Resolution, ResolutionStep,
    ResolverRules, TAG_SEPARATORS,
};
pub use selection::{LocalePreset, LocaleSelection, UnknownPreset};
