use std::path::{Path, PathBuf};

use color_eyre::eyre::Result;
use mailloc_config::{BuildCfg, MailLocConfig};
use mailloc_remap::DuplicatePolicy;
use mailloc_services::{BuildOptions, Catalog};
use mailloc_template::{BuildFlags, ColourPreset, RenderAttributes};

use crate::{Format, TemplateArgs};

/// Merge flags, mailloc.toml and defaults into build options.
pub(crate) fn build_options(args: &TemplateArgs, cfg: &MailLocConfig) -> Result<BuildOptions> {
    let build = cfg.build.clone().unwrap_or_default();
    let BuildCfg {
        theme,
        colour_preset,
        locale_preset,
        show_header_logo,
        show_footer,
        show_terms,
        duplicates,
        themes_dir,
        links_file,
    } = build;

    let selection = super::locale_selection(
        args.locale_preset.as_deref(),
        args.include_locales.as_deref(),
        locale_preset.as_deref(),
    )?;

    let defaults = BuildFlags::default();
    let colour_preset = match args.colour_preset.as_deref().or(colour_preset.as_deref()) {
        Some(p) => p.parse::<ColourPreset>()?,
        None => defaults.colour_preset,
    };
    let flags = BuildFlags {
        show_header_logo: args.show_header_logo.or(show_header_logo).unwrap_or(defaults.show_header_logo),
        show_footer: args.show_footer.or(show_footer).unwrap_or(defaults.show_footer),
        show_terms: args.show_terms.or(show_terms).unwrap_or(defaults.show_terms),
        colour_preset,
    };

    let duplicates = match args.duplicates.as_deref().or(duplicates.as_deref()) {
        Some(d) => d.parse::<DuplicatePolicy>()?,
        None => DuplicatePolicy::default(),
    };

    let themes_dir = args.themes_dir.clone().or_else(|| themes_dir.map(PathBuf::from));
    let theme = mailloc_services::load_theme(
        themes_dir.as_deref(),
        args.theme.as_deref().or(theme.as_deref()),
    )?;
    let links_file = args.links.clone().or_else(|| links_file.map(PathBuf::from));
    let links = mailloc_services::load_links(links_file.as_deref())?;

    let mut attributes = RenderAttributes::default();
    if let Some(render) = &cfg.render {
        if let Some(lang) = &render.language_attr {
            attributes.language = lang.clone();
        }
        if let Some(countries) = &render.country_attrs {
            attributes.countries = countries.clone();
        }
    }

    Ok(BuildOptions {
        selection,
        flags,
        duplicates,
        attributes,
        links,
        theme,
    })
}

pub fn run_build(
    table: PathBuf,
    out: Option<PathBuf>,
    template: TemplateArgs,
    report: Format,
    use_color: bool,
) -> Result<()> {
    let cfg = mailloc_config::load_config()?;
    let opts = build_options(&template, &cfg)?;
    let catalog = Catalog::standard();
    let compiled = mailloc_services::compile(&catalog, &table, &opts)?;
    super::write_output(out.as_deref(), &compiled.artifact.text)?;

    let summary = mailloc_services::summarize(&table, &compiled, &opts.theme.name);
    match report {
        Format::Json => eprintln!("{}", serde_json::to_string_pretty(&summary)?),
        Format::Text => {
            for w in &summary.warnings {
                crate::ui_warn!(
                    use_color,
                    "build-warning",
                    kind = w.kind.as_str(),
                    message = w.message.as_str()
                );
            }
            let target = out
                .as_deref()
                .map(Path::display)
                .map(|d| d.to_string())
                .unwrap_or_else(|| "stdout".to_string());
            crate::ui_ok!(
                use_color,
                "build-done",
                blocks = summary.dispatch_blocks,
                structural = summary.structural_keys,
                locales = summary.locales.len(),
                dialect = summary.dialect.as_str(),
                target = target
            );
        }
    }
    Ok(())
}
