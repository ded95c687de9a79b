use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const CONFIG_FILE: &str = "mailloc.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MailLocConfig {
    pub build: Option<BuildCfg>,
    pub render: Option<RenderCfg>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildCfg {
    pub theme: Option<String>,
    pub colour_preset: Option<String>,
    pub locale_preset: Option<String>,
    pub show_header_logo: Option<bool>,
    pub show_footer: Option<bool>,
    pub show_terms: Option<bool>,
    pub duplicates: Option<String>,
    pub themes_dir: Option<String>,
    pub links_file: Option<String>,
}

/// Render-time attribute paths the emitted resolver reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderCfg {
    pub language_attr: Option<String>,
    pub country_attrs: Option<Vec<String>>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Config files in search order: `./mailloc.toml`, then
/// `<config dir>/mailloc/mailloc.toml`.
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(CONFIG_FILE));
    }
    if let Some(base) = dirs::config_dir() {
        paths.push(base.join("mailloc").join(CONFIG_FILE));
    }
    paths
}

pub fn load_config() -> Result<MailLocConfig, ConfigError> {
    load_from(&search_paths())
}

/// Merge every existing file in `paths`; earlier files win field by field.
pub fn load_from(paths: &[PathBuf]) -> Result<MailLocConfig, ConfigError> {
    let mut merged = MailLocConfig::default();
    for path in paths {
        if let Some(cfg) = read_one(path)? {
            tracing::debug!(event = "config_loaded", path = %path.display());
            merged = merge(merged, cfg);
        }
    }
    Ok(merged)
}

fn read_one(path: &Path) -> Result<Option<MailLocConfig>, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    toml::from_str::<MailLocConfig>(&text)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

fn merge(mut a: MailLocConfig, b: MailLocConfig) -> MailLocConfig {
    a.build = merge_opt(a.build, b.build, merge_build);
    a.render = merge_opt(a.render, b.render, merge_render);
    a
}

fn merge_opt<T>(a: Option<T>, b: Option<T>, f: fn(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f(a, b)),
        (None, Some(b)) => Some(b),
        (Some(a), None) => Some(a),
        (None, None) => None,
    }
}

fn merge_build(mut a: BuildCfg, b: BuildCfg) -> BuildCfg {
    if a.theme.is_none() {
        a.theme = b.theme;
    }
    if a.colour_preset.is_none() {
        a.colour_preset = b.colour_preset;
    }
    if a.locale_preset.is_none() {
        a.locale_preset = b.locale_preset;
    }
    if a.show_header_logo.is_none() {
        a.show_header_logo = b.show_header_logo;
    }
    if a.show_footer.is_none() {
        a.show_footer = b.show_footer;
    }
    if a.show_terms.is_none() {
        a.show_terms = b.show_terms;
    }
    if a.duplicates.is_none() {
        a.duplicates = b.duplicates;
    }
    if a.themes_dir.is_none() {
        a.themes_dir = b.themes_dir;
    }
    if a.links_file.is_none() {
        a.links_file = b.links_file;
    }
    a
}

fn merge_render(mut a: RenderCfg, b: RenderCfg) -> RenderCfg {
    if a.language_attr.is_none() {
        a.language_attr = b.language_attr;
    }
    if a.country_attrs.is_none() {
        a.country_attrs = b.country_attrs;
    }
    a
}
