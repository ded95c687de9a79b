pub mod build;
pub mod input_template;
pub mod preview;
pub mod resolve;
pub mod schema;

use std::io::Write;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use mailloc_locales::{LocalePreset, LocaleSelection};

/// Write command output to `out`, or to stdout.
pub(crate) fn write_output(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, text).wrap_err_with(|| format!("failed to write {}", path.display()))
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(text.as_bytes())?;
            lock.flush()?;
            Ok(())
        }
    }
}

/// `--include-locales` beats `--locale-preset`, which beats the configured
/// preset. Nothing set means the table's own columns.
pub(crate) fn locale_selection(
    preset: Option<&str>,
    include: Option<&str>,
    configured: Option<&str>,
) -> Result<LocaleSelection> {
    if let Some(list) = include {
        return Ok(LocaleSelection::from_list(list));
    }
    match preset.or(configured) {
        Some(p) => Ok(LocaleSelection::Preset(p.parse::<LocalePreset>()?)),
        None => Ok(LocaleSelection::Present),
    }
}
