use std::path::Path;

use color_eyre::eyre::eyre;
use mailloc_template::{render_preview, PreviewInput};

use crate::build::{compile, BuildOptions};
use crate::{Catalog, Result};

/// Build the table at `path` and render it as static HTML for `locale`.
pub fn preview(catalog: &Catalog, path: &Path, locale: &str, opts: &BuildOptions) -> Result<String> {
    let locale = catalog
        .registry
        .match_header(locale)
        .cloned()
        .ok_or_else(|| eyre!("unknown locale `{locale}`; run `mailloc-cli locales` for the list"))?;
    let compiled = compile(catalog, path, opts)?;
    Ok(render_preview(&PreviewInput {
        artifact: &compiled.artifact.text,
        table: &compiled.table,
        schema: &catalog.schema,
        rules: &catalog.rules,
        locale: &locale,
        flags: &opts.flags,
        links: &opts.links,
        theme: &opts.theme,
    }))
}
