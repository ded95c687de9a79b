use mailloc_core::{ContentSchema, Locale, LocaleDispatchBlock, TranslationTable};

use crate::escape::escape_liquid;

/// Variable the emitted resolver assigns and every dispatch block switches on.
pub const LOCALE_VAR: &str = "locale_key";

/// One block per translatable schema key present in `table`, schema order.
pub fn dispatch_blocks(
    schema: &ContentSchema,
    table: &TranslationTable,
    locales: &[Locale],
) -> Vec<LocaleDispatchBlock> {
    schema
        .translatable()
        .iter()
        .filter(|key| table.has_translation(key))
        .map(|key| LocaleDispatchBlock::build(key, table, locales))
        .collect()
}

/// `(key, value)` for every structural schema key present in `table`.
pub fn structural_values(schema: &ContentSchema, table: &TranslationTable) -> Vec<(String, String)> {
    schema
        .structural()
        .iter()
        .filter_map(|key| table.structure(key).map(|v| (key.to_string(), v.trim().to_string())))
        .collect()
}

pub fn render_dispatch(block: &LocaleDispatchBlock) -> String {
    let mut lines = Vec::with_capacity(block.entries.len() + 5);
    lines.push(format!("{{%- capture {} -%}}", block.key));
    lines.push(format!("  {{%- case {LOCALE_VAR} -%}}"));
    for (loc, value) in &block.entries {
        lines.push(format!(
            "    {{%- when \"{}\" -%}}{}",
            loc,
            escape_liquid(value)
        ));
    }
    lines.push(format!("    {{%- else -%}}{}", escape_liquid(&block.default)));
    lines.push("  {%- endcase -%}".to_string());
    lines.push("{%- endcapture -%}".to_string());
    lines.join("\n")
}

/// A structural key is a single substitution point shared by all locales.
pub fn render_structural(key: &str, value: &str) -> String {
    format!(
        "{{%- capture {key} -%}}{}{{%- endcapture -%}}",
        escape_liquid(value)
    )
}
