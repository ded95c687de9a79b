use std::path::PathBuf;

use color_eyre::eyre::{eyre, Result};
use mailloc_services::Catalog;

pub fn run_input_template(
    modules: String,
    locale_preset: Option<String>,
    include_locales: Option<String>,
    out: Option<PathBuf>,
    use_color: bool,
) -> Result<()> {
    let modules: Vec<&str> = modules
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .collect();
    if modules.is_empty() {
        return Err(eyre!("--modules needs at least one module name"));
    }
    let selection =
        super::locale_selection(locale_preset.as_deref(), include_locales.as_deref(), None)?;

    let catalog = Catalog::standard();
    let mut buf = Vec::new();
    let sheet = mailloc_services::input_template(&catalog, &mut buf, &modules, &selection)?;
    for skipped in &sheet.skipped {
        let known = mailloc_remap::MODULE_LAYOUTS
            .iter()
            .map(|l| l.module)
            .collect::<Vec<_>>()
            .join(", ");
        crate::ui_warn!(
            use_color,
            "input-template-unknown-module",
            module = skipped.as_str(),
            known = known
        );
    }
    if sheet.rows == 0 {
        return Err(eyre!("no known modules in `{}`", modules.join(",")));
    }
    super::write_output(out.as_deref(), &String::from_utf8(buf)?)?;
    if let Some(path) = &out {
        crate::ui_ok!(
            use_color,
            "input-template-done",
            rows = sheet.rows,
            path = path.display().to_string()
        );
    }
    Ok(())
}
