use std::io::Write;

use mailloc_core::Locale;
use mailloc_export_csv::{write_input_template, TemplateSheet};
use mailloc_locales::LocaleSelection;

use crate::{Catalog, Result};

/// Blank module-dialect sheet for `modules`. Without a selection only the
/// default locale gets a column.
pub fn input_template<W: Write>(
    catalog: &Catalog,
    writer: W,
    modules: &[&str],
    selection: &LocaleSelection,
) -> Result<TemplateSheet> {
    let locales: Vec<Locale> = selection.resolve(&catalog.registry, &[]);
    write_input_template(writer, modules, &locales)
}
