use std::path::PathBuf;

use color_eyre::eyre::Result;

pub fn run_schema(out_dir: PathBuf, use_color: bool) -> Result<()> {
    let written = mailloc_services::write_schemas(&out_dir)?;
    crate::ui_ok!(
        use_color,
        "schema-done",
        count = written.len(),
        dir = out_dir.display().to_string()
    );
    Ok(())
}
