use std::io::Write;

use color_eyre::eyre::Result;
use mailloc_core::Locale;
use mailloc_remap::layout;
use tracing::warn;

/// What [`write_input_template`] put into the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSheet {
    pub rows: usize,
    /// Module names with no known layout; left out of the sheet.
    pub skipped: Vec<String>,
}

/// Write an empty module-dialect sheet for `modules`.
///
/// Header is `Key, Module, module_index, <locales...>`. Each module gets one
/// index (first occurrence order, starting at 1) and its layout's rows, with
/// the example text in the first locale column.
pub fn write_input_template<W: Write>(
    writer: W,
    modules: &[&str],
    locales: &[Locale],
) -> Result<TemplateSheet> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["Key", "Module", "module_index"];
    header.extend(locales.iter().map(Locale::as_str));
    wtr.write_record(&header)?;

    let mut sheet = TemplateSheet::default();
    let mut seen: Vec<&str> = Vec::new();
    for module in modules {
        let Some(layout) = layout(module) else {
            warn!(event = "input_template_unknown_module", module = %module);
            sheet.skipped.push(module.to_string());
            continue;
        };
        if seen.contains(&layout.module) {
            continue;
        }
        seen.push(layout.module);
        let index = seen.len().to_string();
        for (key, example) in layout.rows {
            let mut record = vec![*key, layout.module, index.as_str()];
            for i in 0..locales.len() {
                record.push(if i == 0 { *example } else { "" });
            }
            wtr.write_record(&record)?;
            sheet.rows += 1;
        }
    }

    wtr.flush()?;
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(modules: &[&str], locales: &[&str]) -> (String, TemplateSheet) {
        let locales: Vec<Locale> = locales.iter().map(|l| Locale::new(*l)).collect();
        let mut buf = Vec::new();
        let sheet = write_input_template(&mut buf, modules, &locales).unwrap();
        (String::from_utf8(buf).unwrap(), sheet)
    }

    #[test]
    fn header_then_module_rows() {
        let (out, sheet) = render(&["hero_module"], &["en", "de"]);
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("Key,Module,module_index,en,de"));
        let first = lines.next().unwrap();
        assert!(first.contains(",hero_module,1,"));
        assert!(first.ends_with(','));
        assert_eq!(sheet.rows, out.lines().count() - 1);
        assert!(sheet.skipped.is_empty());
    }

    #[test]
    fn indices_follow_first_occurrence_and_unknowns_are_skipped() {
        let (out, sheet) = render(&["app_download_module", "nope", "hero_module", "hero_module"], &["en"]);
        assert!(out.contains(",app_download_module,1,"));
        assert!(out.contains(",hero_module,2,"));
        assert_eq!(sheet.skipped, vec!["nope".to_string()]);
    }
}
