use std::path::{Path, PathBuf};

use color_eyre::eyre::{eyre, WrapErr};
use mailloc_template::{Links, Theme, BUILTIN_THEME};
use serde_json::Value;

use crate::Result;

pub const DEFAULT_THEMES_DIR: &str = "themes";

/// `<themes_dir>/<name>.liquid`, or the built-in theme.
///
/// The built-in theme is used when no name is given, or for `default` when
/// the directory has no file overriding it.
pub fn load_theme(themes_dir: Option<&Path>, name: Option<&str>) -> Result<Theme> {
    let dir = themes_dir.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(DEFAULT_THEMES_DIR));
    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(Theme::builtin());
    };
    let path = dir.join(format!("{name}.liquid"));
    if !path.exists() {
        if name == BUILTIN_THEME {
            return Ok(Theme::builtin());
        }
        return Err(eyre!("theme `{name}` not found (looked for {})", path.display()));
    }
    let text = std::fs::read_to_string(&path)
        .wrap_err_with(|| format!("failed to read theme {}", path.display()))?;
    tracing::debug!(event = "theme_loaded", name = name, path = %path.display());
    Ok(Theme::new(name, text))
}

/// Built-in links, overridden by the JSON file when one is given.
pub fn load_links(path: Option<&Path>) -> Result<Links> {
    let Some(path) = path else {
        return Ok(Links::default());
    };
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read links file {}", path.display()))?;
    parse_links(&text).wrap_err_with(|| format!("invalid links file {}", path.display()))
}

/// Accepts `{name: url}` or `{"links": {name: url | {"url": url}}}`.
/// Non-string entries are skipped.
pub fn parse_links(text: &str) -> Result<Links> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(root) = value else {
        return Err(eyre!("expected a JSON object"));
    };
    let entries = match root.get("links").and_then(Value::as_object).cloned() {
        Some(nested) => nested,
        None => root,
    };
    let mut pairs = Vec::new();
    for (name, v) in entries {
        let url = match v {
            Value::String(s) => Some(s),
            Value::Object(obj) => obj.get("url").and_then(Value::as_str).map(str::to_string),
            _ => None,
        };
        match url {
            Some(url) => pairs.push((name, url)),
            None => tracing::warn!(event = "link_skipped", name = %name),
        }
    }
    Ok(Links::default().merge(pairs))
}
