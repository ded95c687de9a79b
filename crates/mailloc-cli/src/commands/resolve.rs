use color_eyre::eyre::Result;
use mailloc_services::Catalog;

use crate::Format;

pub fn run_resolve(lang: String, country: Option<String>, format: Format) -> Result<()> {
    let report = mailloc_services::resolve(&Catalog::standard(), &lang, country.as_deref());
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Text => println!(
            "{}\t{}\talign={}\theadline_align={}\t({})",
            report.locale, report.direction, report.align, report.headline_align, report.step
        ),
    }
    Ok(())
}

pub fn run_locales(format: Format, use_color: bool) -> Result<()> {
    let infos = mailloc_services::locale_infos(&Catalog::standard());
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&infos)?),
        Format::Text => {
            for info in infos {
                let mut marks = Vec::new();
                if info.default {
                    marks.push("default");
                }
                if info.rtl {
                    marks.push("rtl");
                }
                let code = if use_color {
                    use owo_colors::OwoColorize;
                    format!("{}", info.code.green())
                } else {
                    info.code.clone()
                };
                if marks.is_empty() {
                    println!("{code}");
                } else {
                    println!("{code}\t{}", marks.join(","));
                }
            }
        }
    }
    Ok(())
}
