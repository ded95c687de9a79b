use mailloc_domain::{LocaleInfo, ResolutionReport, SCHEMA_VERSION};
use mailloc_locales::{Direction, LocaleResolver, ResolutionStep};

use crate::Catalog;

/// What the emitted resolver would pick for these render-time attributes.
pub fn resolve(catalog: &Catalog, lang: &str, country: Option<&str>) -> ResolutionReport {
    let resolution = LocaleResolver::new(&catalog.registry, &catalog.rules).resolve(lang, country);
    let step = match &resolution.step {
        ResolutionStep::CompoundMarker { .. } => "compound_marker",
        ResolutionStep::CountryOverride { .. } => "country_override",
        ResolutionStep::Language { .. } => "language",
        ResolutionStep::Default => "default",
    };
    tracing::debug!(event = "resolved", lang = lang, country = ?country, locale = %resolution.locale, step = step);
    ResolutionReport {
        schema_version: SCHEMA_VERSION,
        lang: lang.to_string(),
        country: country.map(str::to_string),
        locale: resolution.locale.to_string(),
        direction: resolution.direction.as_str().to_string(),
        align: resolution.direction.align().to_string(),
        headline_align: resolution.direction.headline_align().to_string(),
        step: step.to_string(),
    }
}

pub fn locale_infos(catalog: &Catalog) -> Vec<LocaleInfo> {
    let default = catalog.registry.default_locale();
    catalog
        .registry
        .locales()
        .iter()
        .map(|l| LocaleInfo {
            code: l.to_string(),
            default: l == default,
            rtl: catalog.rules.direction(l.as_str()) == Direction::Rtl,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_carries_step_and_layout() {
        let catalog = Catalog::standard();
        let r = resolve(&catalog, "iw", None);
        assert_eq!(r.locale, "he");
        assert_eq!(r.direction, "rtl");
        assert_eq!(r.align, "right");

        let r = resolve(&catalog, "es", Some("MX"));
        assert_eq!(r.locale, "es-419");
        assert_eq!(r.step, "country_override");

        assert_eq!(resolve(&catalog, "xx-yy", None).step, "default");
    }

    #[test]
    fn locale_list_marks_default_and_rtl() {
        let infos = locale_infos(&Catalog::standard());
        assert!(infos[0].default && infos[0].code == "en");
        assert_eq!(infos.iter().filter(|i| i.default).count(), 1);
        let rtl: Vec<&str> = infos.iter().filter(|i| i.rtl).map(|i| i.code.as_str()).collect();
        assert_eq!(rtl, vec!["ar", "he"]);
    }
}
