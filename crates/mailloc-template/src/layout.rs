//! The HTML body of the email. Sections are chosen at build time from the
//! keys the table provides; optional modules are also guarded at render time
//! by their anchor key so blank content collapses.
//!
//! Conditionals here are never nested: the preview evaluates them with a
//! flat pattern.

use mailloc_core::TranslationTable;

/// Marker the preview cuts the preamble at.
pub const DOCUMENT_START: &str = "<!DOCTYPE html>";

const TWO_COL_ANCHOR: &str = "hero_two_col_body_1_h2";

const FONT: &str = "font-family:{{ token_font_stack }};direction:{{ dir }};unicode-bidi:plaintext;";

struct UspVariant {
    title: &'static str,
    prefix: &'static str,
    image_suffix: &'static str,
    class: &'static str,
    placeholder: &'static str,
    /// Rows whose image sits before the text.
    image_first: &'static [usize],
}

const USP_VARIANTS: &[UspVariant] = &[
    UspVariant {
        title: "usp_title",
        prefix: "usp",
        image_suffix: "icon_url",
        class: "email-usp-module",
        placeholder: "https://placehold.co/80x80",
        image_first: &[1, 2, 3],
    },
    UspVariant {
        title: "usp_feature_title",
        prefix: "usp_feature",
        image_suffix: "image_url",
        class: "email-usp-feature-module",
        placeholder: "https://placehold.co/280x200",
        image_first: &[],
    },
    UspVariant {
        title: "usp_ui_title",
        prefix: "usp_ui",
        image_suffix: "image_url",
        class: "email-alternating-module",
        placeholder: "https://placehold.co/280x200",
        image_first: &[2],
    },
];

fn var(key: &str) -> String {
    format!("{{{{ {key} | strip }}}}")
}

/// `{{ key }}` when the table carries the structural value, else `fallback`.
fn structural_or(table: &TranslationTable, key: &str, fallback: &str) -> String {
    if table.has_structure(key) {
        format!("{{{{ {key} }}}}")
    } else {
        fallback.to_string()
    }
}

fn guarded(anchor: &str, body: String) -> String {
    format!("{{%- if {anchor} != blank -%}}\n{body}\n{{%- endif -%}}")
}

fn header_logo() -> String {
    format!(
        "{{%- if show_header_logo == \"TRUE\" -%}}\n<tr><td align=\"center\" style=\"padding:{{{{ token_space_600 }}}} 0;\"><a href=\"{{{{ link_homepage }}}}\" target=\"_blank\"><img src=\"{{{{ token_logo_url }}}}\" alt=\"{{{{ token_brand_name }}}}\" height=\"32\" style=\"display:block;height:32px;border:0;\" /></a></td></tr>\n{{%- endif -%}}"
    )
}

fn headline_rows(table: &TranslationTable) -> Option<String> {
    let keys = ["headline", "headline_2", "secondary_headline"];
    if !keys.iter().any(|k| table.has_translation(k)) {
        return None;
    }
    let mut parts = vec!["<tr>".to_string()];
    if table.has_translation(TWO_COL_ANCHOR) {
        // two-column hero: secondary headline sits above a larger headline
        parts.push("  <td style=\"padding:{{ token_space_300 }} 0 {{ token_space_500 }};text-align:center;direction:{{ dir }};\">".to_string());
        if table.has_translation("secondary_headline") {
            parts.push(format!("    <p style=\"margin:0;font-size:30px;line-height:120%;font-weight:700;color:{{{{ token_neutral_c900 }}}};{FONT}\">{}</p>", var("secondary_headline")));
        }
        if table.has_translation("headline") {
            parts.push(format!("    <h1 style=\"margin:{{{{ token_space_300 }}}} 0 0;font-size:48px;line-height:120%;font-weight:700;color:{{{{ token_accent }}}};text-align:center;{FONT}\">{}</h1>", var("headline")));
        }
    } else {
        parts.push("  <td style=\"padding:{{ token_space_300 }} 0 {{ token_space_500 }};text-align:{{ headline_align }};direction:{{ dir }};\">".to_string());
        if table.has_translation("headline") {
            parts.push(format!("    <h1 style=\"margin:0;font-size:32px;line-height:38px;font-weight:600;color:{{{{ token_accent }}}};{FONT}\">{}</h1>", var("headline")));
        }
        if table.has_translation("headline_2") {
            parts.push(format!("    <p style=\"margin:{{{{ token_space_500 }}}} 0 0;font-size:22px;line-height:28px;font-weight:600;color:{{{{ token_accent }}}};{FONT}\">{}</p>", var("headline_2")));
        }
        if table.has_translation("secondary_headline") {
            parts.push(format!("    <p style=\"margin:{{{{ token_space_500 }}}} 0 0;font-size:16px;line-height:22px;color:{{{{ token_text_primary }}}};{FONT}\">{}</p>", var("secondary_headline")));
        }
    }
    parts.push("  </td>".to_string());
    parts.push("</tr>".to_string());
    Some(parts.join("\n"))
}

fn image_row(table: &TranslationTable) -> Option<String> {
    if !table.has_structure("image_url") {
        return None;
    }
    let img = |src: &str| {
        format!("<img src=\"{src}\" width=\"728\" alt=\"\" style=\"display:block;width:100%;max-width:728px;height:auto;border:0;\" />")
    };
    let wrap = |inner: String| {
        if table.has_structure("image_deeplink") {
            format!("<a href=\"{{{{ image_deeplink }}}}\" target=\"_blank\" style=\"display:block;border:0;\">{inner}</a>")
        } else {
            inner
        }
    };
    let cell = if table.has_structure("image_url_mobile") {
        format!(
            "<span class=\"email-img-desktop\">{}</span><span class=\"email-img-mobile\">{}</span>",
            wrap(img("{{ image_url }}")),
            wrap(img("{{ image_url_mobile }}"))
        )
    } else {
        wrap(img("{{ image_url }}"))
    };
    Some(format!("<tr><td style=\"padding:0;\">{cell}</td></tr>"))
}

fn body_rows(table: &TranslationTable) -> Option<String> {
    if table.has_translation(TWO_COL_ANCHOR) {
        return None;
    }
    let mut parts = Vec::new();
    let bodies: Vec<&str> = ["body_1", "body_2"]
        .into_iter()
        .filter(|k| table.has_translation(k))
        .collect();
    if !bodies.is_empty() {
        parts.push("<tr>".to_string());
        parts.push("  <td style=\"padding:{{ token_space_700 }} 0 0;direction:{{ dir }};text-align:{{ align }};\">".to_string());
        for key in bodies {
            parts.push(format!("    <p style=\"margin:0 0 {{{{ token_space_600 }}}} 0;font-size:16px;line-height:24px;color:{{{{ token_text_body }}}};{FONT}\">{}</p>", var(key)));
        }
        parts.push("  </td>".to_string());
        parts.push("</tr>".to_string());
    }
    if table.has_translation("cta_text") && table.has_structure("cta_link") {
        parts.push(format!(
            "<tr><td align=\"center\" style=\"padding:0 0 {{{{ token_space_600 }}}};\"><a href=\"{{{{ cta_link }}}}\" target=\"_blank\" data-cio-tag=\"{}\" style=\"display:block;background:{{{{ token_cta_bg }}}};color:{{{{ token_text_on_brand }}}};text-align:center;font-weight:600;font-size:16px;line-height:20px;padding:{{{{ token_space_400 }}}} 0;border-radius:8px;text-decoration:none;font-family:{{{{ token_font_stack }}}};\">{}</a></td></tr>",
            structural_or(table, "cta_alias", "hero-cta"),
            var("cta_text")
        ));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

fn text_cell(heading: &str, copy: &str, padding: &str) -> String {
    format!(
        "<td width=\"50%\" valign=\"middle\" style=\"padding:{padding};vertical-align:middle;\"><h2 style=\"margin:0 0 12px 0;font-size:16px;line-height:24px;font-weight:700;color:{{{{ token_text_primary }}}};text-align:{{{{ align }}}};{FONT}\">{}</h2><p style=\"margin:0;font-size:16px;line-height:24px;color:{{{{ token_text_primary }}}};text-align:{{{{ align }}}};{FONT}\">{}</p></td>",
        var(heading),
        var(copy)
    )
}

fn image_cell(src: &str, width: u32, padding: &str) -> String {
    format!(
        "<td width=\"50%\" valign=\"middle\" align=\"center\" style=\"padding:{padding};vertical-align:middle;\"><img src=\"{src}\" alt=\"\" width=\"{width}\" style=\"display:block;max-width:100%;height:auto;\" /></td>"
    )
}

fn two_column_hero(table: &TranslationTable) -> Option<String> {
    if !table.has_translation(TWO_COL_ANCHOR) {
        return None;
    }
    let mut rows = Vec::new();
    for i in 1..=4 {
        let heading = format!("hero_two_col_body_{i}_h2");
        if !table.has_translation(&heading) {
            continue;
        }
        let copy = format!("hero_two_col_body_{i}_copy");
        let image_key = format!("hero_two_col_image_{i}_url");
        let text = text_cell(&heading, &copy, "0 20px 32px 0");
        let image = if table.has_structure(&image_key) {
            image_cell(&format!("{{{{ {image_key} }}}}"), 260, "0 0 32px 20px")
        } else {
            "<td width=\"50%\"></td>".to_string()
        };
        // odd blocks put the text first, even blocks the image
        let row = if i % 2 == 1 {
            format!("<tr class=\"email-feature-row\">{text}{image}</tr>")
        } else {
            format!("<tr class=\"email-feature-row\">{image}{text}</tr>")
        };
        rows.push(row);
    }
    if table.has_translation("hero_two_col_cta_text") {
        rows.push(format!(
            "<tr><td colspan=\"2\" style=\"padding:{{{{ token_space_600 }}}} 0 0;\"><a href=\"{}\" target=\"_blank\" data-cio-tag=\"{}\" style=\"display:block;background:{{{{ token_cta_bg }}}};color:{{{{ token_text_on_brand }}}};text-align:center;font-weight:600;font-size:16px;line-height:20px;padding:{{{{ token_space_400 }}}} 0;border-radius:8px;text-decoration:none;font-family:{{{{ token_font_stack }}}};\">{}</a></td></tr>",
            structural_or(table, "cta_link", "#"),
            structural_or(table, "cta_alias", "hero-two-col-cta"),
            var("hero_two_col_cta_text")
        ));
    }
    let body = format!(
        "<tr><td style=\"padding:0;\">\n<table role=\"presentation\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" class=\"email-feature-module\" style=\"width:100%;margin-top:{{{{ token_space_900 }}}};border-collapse:collapse;\">\n{}\n</table>\n</td></tr>",
        rows.join("\n")
    );
    Some(guarded(TWO_COL_ANCHOR, body))
}

fn usp_section(table: &TranslationTable, v: &UspVariant) -> Option<String> {
    if !table.has_translation(v.title) {
        return None;
    }
    let mut rows = vec![format!(
        "<tr><td colspan=\"2\" align=\"center\" style=\"padding:0 0 {{{{ token_space_600 }}}} 0;\"><p style=\"margin:0;font-size:24px;line-height:32px;font-weight:700;color:{{{{ token_accent }}}};text-align:center;{FONT}\">{}</p></td></tr>",
        var(v.title)
    )];
    for i in 1..=3 {
        let heading = format!("{}_{i}_heading", v.prefix);
        if !table.has_translation(&heading) {
            continue;
        }
        let copy = format!("{}_{i}_copy", v.prefix);
        let image_key = format!("{}_{i}_{}", v.prefix, v.image_suffix);
        let src = structural_or(table, &image_key, v.placeholder);
        let width = if v.image_suffix == "icon_url" { 80 } else { 280 };
        let text = text_cell(&heading, &copy, "0 0 32px 0");
        let image = image_cell(&src, width, "0 20px 32px 0");
        let row = if v.image_first.contains(&i) {
            format!("<tr>{image}{text}</tr>")
        } else {
            format!("<tr>{text}{image}</tr>")
        };
        rows.push(row);
    }
    let body = format!(
        "<tr><td style=\"padding:0;\">\n<table role=\"presentation\" width=\"600\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" class=\"{}\" style=\"width:600px;max-width:100%;margin-top:{{{{ token_space_600 }}}};background-color:{{{{ token_neutral_c050 }}}};padding:{{{{ token_space_800 }}}};border-radius:{{{{ token_radius_module }}}};\">\n{}\n</table>\n</td></tr>",
        v.class,
        rows.join("\n")
    );
    Some(guarded(v.title, body))
}

fn app_download(table: &TranslationTable) -> Option<String> {
    if !table.has_translation("app_download_title") {
        return None;
    }
    let features: Vec<String> = (1..=3)
        .map(|i| format!("app_download_feature_{i}"))
        .filter(|k| table.has_translation(k))
        .map(|k| format!("<li style=\"margin:0 0 4px 0;{FONT}\">{}</li>", var(&k)))
        .collect();
    let list = if features.is_empty() {
        String::new()
    } else {
        format!(
            "<ul style=\"margin:0 0 {{{{ token_space_400 }}}} 0;padding-left:20px;color:{{{{ app_download_text_colour }}}};\">{}</ul>",
            features.concat()
        )
    };
    let store = |label: &str, rating: String| {
        format!(
            "<td width=\"50%\" valign=\"middle\" style=\"padding:0;\"><a href=\"{{{{ app_deeplink_url }}}}\" target=\"_blank\" style=\"color:{{{{ app_download_text_colour }}}};font-weight:600;text-decoration:none;font-family:{{{{ token_font_stack }}}};\">{label}</a><p style=\"margin:2px 0 0 0;font-size:12px;line-height:16px;color:{{{{ app_download_text_colour }}}};{FONT}\">{rating}</p></td>"
        )
    };
    let body = format!(
        "<tr><td style=\"padding:0;\">\n<table role=\"presentation\" width=\"588\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" class=\"email-app-card\" style=\"width:588px;max-width:100%;margin:{{{{ token_space_600 }}}} auto;background-color:{{{{ app_download_colour }}}};padding:{{{{ token_space_600 }}}};border-radius:{{{{ token_radius_module }}}};\">\n<tr><td colspan=\"2\"><a href=\"{{{{ app_deeplink_url }}}}\" target=\"_blank\" style=\"text-decoration:none;\"><p style=\"margin:0 0 {{{{ token_space_400 }}}} 0;font-size:20px;line-height:28px;font-weight:600;color:{{{{ app_download_text_colour }}}};{FONT}\">{}</p></a>{list}</td></tr>\n<tr>{}{}</tr>\n</table>\n</td></tr>",
        var("app_download_title"),
        store("App Store", structural_or(table, "app_store_rating", "4.9/5")),
        store("Google Play", structural_or(table, "google_play_rating", "4.6/5")),
    );
    Some(guarded("app_download_title", body))
}

fn terms() -> String {
    format!(
        "{{%- if show_terms == \"TRUE\" -%}}\n<tr><td style=\"padding:{{{{ token_space_600 }}}} 0;text-align:{{{{ align }}}};\"><p style=\"margin:0 0 8px 0;font-size:14px;line-height:20px;font-weight:600;color:{{{{ token_text_primary }}}};{FONT}\">{}</p><p style=\"margin:0;font-size:12px;line-height:18px;color:{{{{ token_text_muted }}}};{FONT}\">{{{{ terms_desc_html }}}}</p></td></tr>\n{{%- endif -%}}",
        var("terms_title")
    )
}

fn footer() -> String {
    let social = ["instagram", "facebook", "linkedin"]
        .iter()
        .map(|name| {
            let label = match *name {
                "instagram" => "Instagram",
                "facebook" => "Facebook",
                _ => "LinkedIn",
            };
            format!("<a href=\"{{{{ link_{name} }}}}\" target=\"_blank\" style=\"color:{{{{ token_text_muted }}}};margin:0 8px;\">{label}</a>")
        })
        .collect::<Vec<_>>()
        .concat();
    format!(
        "{{%- if show_footer == \"TRUE\" -%}}\n<tr><td align=\"center\" style=\"padding:{{{{ token_space_800 }}}} 0;font-size:12px;line-height:18px;font-family:{{{{ token_font_stack }}}};\"><p style=\"margin:0 0 8px 0;\">{social}</p><p style=\"margin:0;\"><a href=\"{{{{ link_homepage }}}}\" target=\"_blank\" style=\"color:{{{{ token_text_muted }}}};\">{{{{ token_brand_name }}}}</a> &middot; <a href=\"{{{{ link_notification_preferences }}}}\" target=\"_blank\" style=\"color:{{{{ token_text_muted }}}};\">&#9881;</a></p></td></tr>\n{{%- endif -%}}"
    )
}

/// Section markup in render order.
pub fn sections(table: &TranslationTable) -> Vec<String> {
    let mut out = vec![header_logo()];
    out.extend(headline_rows(table));
    out.extend(image_row(table));
    out.extend(body_rows(table));
    out.extend(two_column_hero(table));
    for variant in USP_VARIANTS {
        out.extend(usp_section(table, variant));
    }
    out.extend(app_download(table));
    out.push(terms());
    out.push(footer());
    out
}

/// The HTML document from `<!DOCTYPE html>` to the end.
pub fn document(table: &TranslationTable) -> String {
    let mut parts = vec![
        DOCUMENT_START.to_string(),
        "<html lang=\"{{ locale_key }}\" dir=\"{{ dir }}\">".to_string(),
        "<head>".to_string(),
        "<meta charset=\"utf-8\" />".to_string(),
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />".to_string(),
        format!("<title>{}</title>", var("subject_line")),
        "<style>.email-img-mobile{display:none;}@media (max-width:600px){.email-img-desktop{display:none !important;}.email-img-mobile{display:block !important;}.email-feature-row td{display:block;width:100% !important;}}</style>".to_string(),
        "</head>".to_string(),
        "<body style=\"margin:0;padding:0;background-color:{{ token_bg_page }};\">".to_string(),
        format!("<div style=\"display:none;max-height:0;overflow:hidden;\">{}</div>", var("preheader")),
        "<table role=\"presentation\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" style=\"background-color:{{ token_bg_page }};\"><tr><td align=\"center\">".to_string(),
        "<table role=\"presentation\" width=\"600\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" class=\"email-container\" dir=\"{{ dir }}\" style=\"width:600px;max-width:100%;\">".to_string(),
    ];
    parts.extend(sections(table));
    parts.push("</table>".to_string());
    parts.push("</td></tr></table>".to_string());
    parts.push("</body>".to_string());
    parts.push("</html>".to_string());
    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use mailloc_core::{Locale, TranslationTable};

    use super::*;

    fn table(keys: &[&str], structure: &[(&str, &str)]) -> TranslationTable {
        let en = Locale::new("en");
        let translations = keys
            .iter()
            .map(|k| (k.to_string(), BTreeMap::from([(en.clone(), format!("{k} text"))])))
            .collect();
        let structure = structure
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        TranslationTable::new(en.clone(), vec![en], translations, structure)
    }

    #[test]
    fn simple_hero_renders_body_and_cta() {
        let t = table(&["headline", "body_1", "cta_text"], &[("cta_link", "example.com")]);
        let doc = document(&t);
        assert!(doc.starts_with(DOCUMENT_START));
        assert!(doc.contains("{{ headline | strip }}"));
        assert!(doc.contains("{{ body_1 | strip }}"));
        assert!(doc.contains("href=\"{{ cta_link }}\""));
        assert!(doc.contains("data-cio-tag=\"hero-cta\""));
        assert!(!doc.contains("headline_2"));
    }

    #[test]
    fn cta_needs_a_link() {
        let t = table(&["cta_text"], &[]);
        assert!(!document(&t).contains("{{ cta_text | strip }}"));
    }

    #[test]
    fn two_column_hero_replaces_body_rows() {
        let t = table(
            &["headline", "secondary_headline", "body_1", "hero_two_col_body_1_h2", "hero_two_col_body_1_copy"],
            &[("hero_two_col_image_1_url", "example.com/1.png")],
        );
        let doc = document(&t);
        assert!(!doc.contains("{{ body_1 | strip }}"));
        assert!(doc.contains("{%- if hero_two_col_body_1_h2 != blank -%}"));
        assert!(doc.contains("{{ hero_two_col_image_1_url }}"));
        let sh = doc.find("{{ secondary_headline | strip }}").unwrap();
        let h = doc.find("{{ headline | strip }}").unwrap();
        assert!(sh < h);
    }

    #[test]
    fn mobile_image_variant() {
        let t = table(&[], &[("image_url", "a.png"), ("image_url_mobile", "b.png")]);
        let doc = document(&t);
        assert!(doc.contains("email-img-desktop"));
        assert!(doc.contains("{{ image_url_mobile }}"));
    }

    #[test]
    fn optional_modules_follow_their_anchor() {
        let none = document(&table(&["headline"], &[]));
        assert!(!none.contains("usp_title"));
        assert!(!none.contains("app_download_title"));

        let t = table(&["usp_title", "usp_1_heading", "usp_1_copy", "app_download_title"], &[]);
        let doc = document(&t);
        assert!(doc.contains("{%- if usp_title != blank -%}"));
        assert!(doc.contains("https://placehold.co/80x80"));
        assert!(doc.contains("{%- if app_download_title != blank -%}"));
        assert!(doc.contains(">4.9/5<"));
    }

    #[test]
    fn conditionals_are_not_nested() {
        let t = table(
            &["headline", "usp_title", "usp_1_heading", "usp_ui_title", "usp_ui_2_heading", "app_download_title"],
            &[("image_url", "a.png")],
        );
        let doc = document(&t);
        let mut depth = 0i32;
        for piece in doc.split("{%-").skip(1) {
            let tag = piece.trim_start();
            if tag.starts_with("if ") {
                depth += 1;
                assert_eq!(depth, 1);
            } else if tag.starts_with("endif") {
                depth -= 1;
            }
        }
        assert_eq!(depth, 0);
    }
}
