use mailloc_core::Locale;
use serde::Serialize;

use crate::LocaleRegistry;

/// Text direction chosen for the resolved locale, together with the
/// alignment values the layout reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }

    /// Horizontal alignment of body text.
    pub fn align(self) -> &'static str {
        match self {
            Direction::Ltr => "left",
            Direction::Rtl => "right",
        }
    }

    pub fn headline_align(self) -> &'static str {
        match self {
            Direction::Ltr => "center",
            Direction::Rtl => "right",
        }
    }
}

/// Language-only codes that resolve to a regional locale when the recipient's
/// country is in `countries`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountryOverride {
    pub language: &'static str,
    pub countries: &'static [&'static str],
    pub locale: &'static str,
}

const ALIASES: &[(&str, &str)] = &[("iw", "he"), ("tl", "fil"), ("nb", "no"), ("nn", "no")];

// Checked in order with substring matching, so longer markers come first.
const COMPOUND_MARKERS: &[(&str, &str)] = &[
    ("zh-hant-hk", "zh-hk"),
    ("zh-hk", "zh-hk"),
    ("zh-tw", "zh-tw"),
    ("zh-hant", "zh-tw"),
    ("zh-cn", "zh-cn"),
    ("zh-sg", "zh-cn"),
    ("zh-hans", "zh-cn"),
    ("fr-ca", "fr-ca"),
    ("pt-br", "pt-br"),
    ("pt-pt", "pt"),
    ("es-419", "es-419"),
    ("en-gb", "en-gb"),
];

const LATIN_AMERICA: &[&str] = &[
    "MX", "AR", "CO", "CL", "PE", "VE", "EC", "GT", "HN", "SV", "NI", "PA", "PR", "DO", "CR",
    "BO", "PY", "UY", "CU",
];

const COUNTRY_OVERRIDES: &[CountryOverride] = &[
    CountryOverride {
        language: "pt",
        countries: &["BR"],
        locale: "pt-br",
    },
    CountryOverride {
        language: "es",
        countries: LATIN_AMERICA,
        locale: "es-419",
    },
    CountryOverride {
        language: "en",
        countries: &["GB"],
        locale: "en-gb",
    },
    CountryOverride {
        language: "fr",
        countries: &["CA"],
        locale: "fr-ca",
    },
];

const RTL_LOCALES: &[&str] = &["ar", "he"];

/// Declarative tables driving recipient locale resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolverRules {
    pub aliases: Vec<(&'static str, &'static str)>,
    pub compound_markers: Vec<(&'static str, &'static str)>,
    pub country_overrides: Vec<CountryOverride>,
    pub rtl: Vec<&'static str>,
}

impl Default for ResolverRules {
    fn default() -> Self {
        Self::standard()
    }
}

impl ResolverRules {
    pub fn standard() -> Self {
        Self {
            aliases: ALIASES.to_vec(),
            compound_markers: COMPOUND_MARKERS.to_vec(),
            country_overrides: COUNTRY_OVERRIDES.to_vec(),
            rtl: RTL_LOCALES.to_vec(),
        }
    }

    pub fn alias(&self, language: &str) -> Option<&'static str> {
        self.aliases
            .iter()
            .find(|(from, _)| *from == language)
            .map(|(_, to)| *to)
    }

    pub fn direction(&self, locale: &str) -> Direction {
        if self.rtl.contains(&locale) {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }
}

/// Which rule produced a [`Resolution`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ResolutionStep {
    CompoundMarker { marker: String },
    CountryOverride { country: String },
    Language { language: String },
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub locale: Locale,
    pub direction: Direction,
    pub step: ResolutionStep,
}

/// In-process evaluation of the resolution algorithm embedded into the
/// emitted template. Both must agree for every input.
#[derive(Debug, Clone, Copy)]
pub struct LocaleResolver<'a> {
    registry: &'a LocaleRegistry,
    rules: &'a ResolverRules,
}

impl<'a> LocaleResolver<'a> {
    pub fn new(registry: &'a LocaleRegistry, rules: &'a ResolverRules) -> Self {
        Self { registry, rules }
    }

    /// Never fails: unusable input ends at the default locale, left-to-right.
    pub fn resolve(&self, language: &str, country: Option<&str>) -> Resolution {
        let mut tag = normalize_tag(language);
        if tag.is_empty() {
            tag = self.registry.default_locale().to_string();
        }
        let base = self.base_language(&tag);
        let country = normalize_country(country).or_else(|| region_subtag(&tag));

        let (code, step) = if let Some((marker, code)) = self.compound_marker(&tag) {
            (
                code,
                ResolutionStep::CompoundMarker {
                    marker: marker.to_string(),
                },
            )
        } else if let Some((cc, code)) = country
            .as_deref()
            .and_then(|cc| self.country_override(&base, cc).map(|code| (cc, code)))
        {
            (
                code.to_string(),
                ResolutionStep::CountryOverride {
                    country: cc.to_string(),
                },
            )
        } else if self.registry.contains(&base) {
            (
                base.clone(),
                ResolutionStep::Language {
                    language: base.clone(),
                },
            )
        } else {
            (
                self.registry.default_locale().to_string(),
                ResolutionStep::Default,
            )
        };

        tracing::trace!(event = "locale_resolved", input = language, locale = %code, step = ?step);
        let direction = self.rules.direction(&code);
        Resolution {
            locale: Locale::new(code),
            direction,
            step,
        }
    }

    /// Alias of the primary subtag, else the primary subtag when it is itself
    /// a supported locale (`fil`), else the two-letter prefix.
    fn base_language(&self, tag: &str) -> String {
        let primary = tag.split('-').next().unwrap_or_default();
        if let Some(alias) = self.rules.alias(primary) {
            return alias.to_string();
        }
        if self.registry.contains(primary) {
            return primary.to_string();
        }
        tag.chars().take(2).collect()
    }

    fn compound_marker(&self, tag: &str) -> Option<(&'static str, String)> {
        self.rules
            .compound_markers
            .iter()
            .filter(|(_, code)| self.registry.contains(code))
            .find(|(marker, _)| tag.contains(marker))
            .map(|(marker, code)| (*marker, code.to_string()))
    }

    fn country_override(&self, base: &str, country: &str) -> Option<&'static str> {
        self.rules
            .country_overrides
            .iter()
            .filter(|o| self.registry.contains(o.locale))
            .find(|o| o.language == base && o.countries.contains(&country))
            .map(|o| o.locale)
    }
}

/// Characters inside a language tag that count as a subtag separator.
pub const TAG_SEPARATORS: [char; 3] = ['_', ' ', '\t'];

/// Lowercase, trim, unify [`TAG_SEPARATORS`] to `-`, collapse repeats and
/// drop edge hyphens.
pub fn normalize_tag(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        let c = if TAG_SEPARATORS.contains(&c) { '-' } else { c };
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }
    out.trim_matches('-').to_string()
}

fn normalize_country(raw: Option<&str>) -> Option<String> {
    let cc: String = raw?.trim().to_uppercase().chars().take(2).collect();
    (!cc.is_empty()).then_some(cc)
}

/// Two-letter region subtag at the end of a tag, used only when no explicit
/// country is known (`es-mx` → `MX`).
fn region_subtag(tag: &str) -> Option<String> {
    let mut parts = tag.split('-');
    parts.next()?;
    let last = parts.last()?;
    (last.len() == 2 && last.chars().all(|c| c.is_ascii_alphabetic()))
        .then(|| last.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(lang: &str, country: &str) -> Resolution {
        let reg = LocaleRegistry::standard();
        let rules = ResolverRules::standard();
        let country = (!country.is_empty()).then_some(country);
        LocaleResolver::new(&reg, &rules).resolve(lang, country)
    }

    #[test]
    fn brazilian_portuguese_by_tag() {
        let r = resolve("pt-BR", "BR");
        assert_eq!(r.locale, "pt-br");
        assert_eq!(r.direction, Direction::Ltr);
    }

    #[test]
    fn european_portuguese_stays_base() {
        assert_eq!(resolve("pt", "PT").locale, "pt");
        assert_eq!(resolve("pt-PT", "BR").locale, "pt");
        assert_eq!(resolve("pt", "").locale, "pt");
    }

    #[test]
    fn country_disambiguates_language_only_tags() {
        assert_eq!(resolve("es", "MX").locale, "es-419");
        assert_eq!(resolve("es", "ES").locale, "es");
        assert_eq!(resolve("pt", "br").locale, "pt-br");
        assert_eq!(resolve("en", "GB").locale, "en-gb");
        assert_eq!(resolve("en", "US").locale, "en");
        assert_eq!(resolve("fr", "CA").locale, "fr-ca");
        assert_eq!(resolve("fr", "BE").locale, "fr");
    }

    #[test]
    fn region_subtag_acts_as_country_when_none_given() {
        assert_eq!(resolve("es-MX", "").locale, "es-419");
        assert_eq!(resolve("es_AR", "").locale, "es-419");
        assert_eq!(resolve("es-ES", "").locale, "es");
        assert_eq!(resolve("en-US", "").locale, "en");
        // explicit country wins over the tag's region
        assert_eq!(resolve("es-MX", "ES").locale, "es");
    }

    #[test]
    fn aliases_apply_before_prefix() {
        let r = resolve("iw", "");
        assert_eq!(r.locale, "he");
        assert_eq!(r.direction, Direction::Rtl);
        assert_eq!(resolve("tl", "").locale, "fil");
        assert_eq!(resolve("fil-PH", "").locale, "fil");
        assert_eq!(resolve("nb-NO", "").locale, "no");
        assert_eq!(resolve("nn", "").locale, "no");
    }

    #[test]
    fn unknown_and_blank_fall_back_to_default() {
        let r = resolve("xx-yy", "");
        assert_eq!(r.locale, "en");
        assert_eq!(r.direction, Direction::Ltr);
        assert_eq!(r.step, ResolutionStep::Default);
        assert_eq!(resolve("", "").locale, "en");
        assert_eq!(resolve("   ", "ZZ").locale, "en");
    }

    #[test]
    fn compound_marker_beats_prefix() {
        assert_eq!(resolve("zh-Hant-HK", "").locale, "zh-hk");
        assert_eq!(resolve("zh-Hant", "").locale, "zh-tw");
        assert_eq!(resolve("zh_Hans_SG", "").locale, "zh-cn");
        assert_eq!(resolve("en-GB", "US").locale, "en-gb");
        assert_eq!(resolve("es-419", "").locale, "es-419");
    }

    #[test]
    fn bare_chinese_has_no_locale_of_its_own() {
        // `zh` is not in the catalog, so only compound markers can select Chinese.
        assert_eq!(resolve("zh", "").locale, "en");
    }

    #[test]
    fn arabic_is_right_to_left() {
        let r = resolve("ar-EG", "EG");
        assert_eq!(r.locale, "ar");
        assert_eq!(r.direction, Direction::Rtl);
        assert_eq!(r.direction.align(), "right");
        assert_eq!(r.direction.headline_align(), "right");
    }

    #[test]
    fn resolution_is_idempotent() {
        for (lang, cc) in [("pt-BR", "BR"), ("xx", ""), ("iw", "IL"), ("es", "MX")] {
            assert_eq!(resolve(lang, cc), resolve(lang, cc));
        }
    }

    #[test]
    fn tag_normalisation() {
        assert_eq!(normalize_tag("  zh__Hant  HK "), "zh-hant-hk");
        assert_eq!(normalize_tag("-EN-"), "en");
        assert_eq!(normalize_tag("zh - HK"), "zh-hk");
        assert_eq!(normalize_tag("zh___hk"), "zh-hk");
        assert_eq!(normalize_tag("pt\tBR"), "pt-br");
    }

    #[test]
    fn markers_for_locales_outside_the_registry_are_skipped() {
        let reg = LocaleRegistry::new(["en", "pt"]).unwrap();
        let rules = ResolverRules::standard();
        let r = LocaleResolver::new(&reg, &rules).resolve("pt-BR", Some("BR"));
        assert_eq!(r.locale, "pt");
    }
}
