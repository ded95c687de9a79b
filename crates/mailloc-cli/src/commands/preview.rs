use std::path::PathBuf;

use color_eyre::eyre::Result;
use mailloc_services::Catalog;

use crate::TemplateArgs;

pub fn run_preview(
    table: PathBuf,
    locale: String,
    out: Option<PathBuf>,
    template: TemplateArgs,
    use_color: bool,
) -> Result<()> {
    let cfg = mailloc_config::load_config()?;
    let opts = super::build::build_options(&template, &cfg)?;
    let html = mailloc_services::preview(&Catalog::standard(), &table, &locale, &opts)?;
    super::write_output(out.as_deref(), &html)?;
    if let Some(path) = &out {
        crate::ui_ok!(
            use_color,
            "preview-done",
            locale = locale.as_str(),
            path = path.display().to_string()
        );
    }
    Ok(())
}
