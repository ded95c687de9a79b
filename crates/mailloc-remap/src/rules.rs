//! Static rule data. Several modules may target the same canonical key when
//! they are alternative layouts for the same slot (both hero variants fill
//! `subject_line`).

/// `(module, raw key, canonical key)`.
pub const STANDARD_RULES: &[(&str, &str, &str)] = &[
    ("hero_module", "subject_line", "subject_line"),
    ("hero_module", "preheader", "preheader"),
    ("hero_module", "headline", "headline"),
    ("hero_module", "body_1", "body_1"),
    ("hero_module", "body_2", "body_2"),
    ("hero_module", "cta_text", "cta_text"),
    ("hero_module", "image_url", "image_url"),
    ("hero_module", "image_url_mobile", "image_url_mobile"),
    ("hero_module", "image_deeplink", "image_deeplink"),
    ("hero_module", "cta_link", "cta_link"),
    ("hero_module", "cta_alias", "cta_alias"),
    ("hero_module_two_column", "subject_line", "subject_line"),
    ("hero_module_two_column", "preheader", "preheader"),
    ("hero_module_two_column", "headline", "headline"),
    ("hero_module_two_column", "subheadline", "secondary_headline"),
    ("hero_module_two_column", "body_1_h2", "hero_two_col_body_1_h2"),
    ("hero_module_two_column", "body_1_copy", "hero_two_col_body_1_copy"),
    ("hero_module_two_column", "image_1_url", "hero_two_col_image_1_url"),
    ("hero_module_two_column", "body_2_h2", "hero_two_col_body_2_h2"),
    ("hero_module_two_column", "body_2_copy", "hero_two_col_body_2_copy"),
    ("hero_module_two_column", "image_2_url", "hero_two_col_image_2_url"),
    ("hero_module_two_column", "body_3_h2", "hero_two_col_body_3_h2"),
    ("hero_module_two_column", "body_3_copy", "hero_two_col_body_3_copy"),
    ("hero_module_two_column", "image_3_url", "hero_two_col_image_3_url"),
    ("hero_module_two_column", "body_4_h2", "hero_two_col_body_4_h2"),
    ("hero_module_two_column", "body_4_copy", "hero_two_col_body_4_copy"),
    ("hero_module_two_column", "image_4_url", "hero_two_col_image_4_url"),
    ("hero_module_two_column", "cta_text", "hero_two_col_cta_text"),
    ("hero_module_two_column", "hero_image_url", "image_url"),
    ("hero_module_two_column", "image_deeplink", "image_deeplink"),
    ("hero_module_two_column", "cta_link", "cta_link"),
    ("hero_module_two_column", "cta_alias", "cta_alias"),
    ("app_download_module", "headline", "app_download_title"),
    ("app_download_module", "feature_1", "app_download_feature_1"),
    ("app_download_module", "feature_2", "app_download_feature_2"),
    ("app_download_module", "feature_3", "app_download_feature_3"),
    ("app_download_module", "colour", "app_download_colour"),
    ("app_download_module", "color", "app_download_colour"),
    ("disclaimer_module", "terms_title", "terms_title"),
    ("disclaimer_module", "terms_desc", "terms_desc_text"),
    ("disclaimer_module", "terms_desc_text", "terms_desc_text"),
    ("disclaimer_module", "terms_label", "terms_label"),
    ("disclaimer_module", "privacy_label", "privacy_label"),
    ("icon_left_text_right_module", "title", "usp_title"),
    ("icon_left_text_right_module", "usp_1_heading", "usp_1_heading"),
    ("icon_left_text_right_module", "usp_1_copy", "usp_1_copy"),
    ("icon_left_text_right_module", "usp_1_icon_url", "usp_1_icon_url"),
    ("icon_left_text_right_module", "usp_2_heading", "usp_2_heading"),
    ("icon_left_text_right_module", "usp_2_copy", "usp_2_copy"),
    ("icon_left_text_right_module", "usp_2_icon_url", "usp_2_icon_url"),
    ("icon_left_text_right_module", "usp_3_heading", "usp_3_heading"),
    ("icon_left_text_right_module", "usp_3_copy", "usp_3_copy"),
    ("icon_left_text_right_module", "usp_3_icon_url", "usp_3_icon_url"),
    ("text_left_image_right_module", "title", "usp_feature_title"),
    ("text_left_image_right_module", "usp_feature_1_heading", "usp_feature_1_heading"),
    ("text_left_image_right_module", "usp_feature_1_copy", "usp_feature_1_copy"),
    ("text_left_image_right_module", "usp_feature_1_image_url", "usp_feature_1_image_url"),
    ("text_left_image_right_module", "usp_feature_2_heading", "usp_feature_2_heading"),
    ("text_left_image_right_module", "usp_feature_2_copy", "usp_feature_2_copy"),
    ("text_left_image_right_module", "usp_feature_2_image_url", "usp_feature_2_image_url"),
    ("text_left_image_right_module", "usp_feature_3_heading", "usp_feature_3_heading"),
    ("text_left_image_right_module", "usp_feature_3_copy", "usp_feature_3_copy"),
    ("text_left_image_right_module", "usp_feature_3_image_url", "usp_feature_3_image_url"),
    ("alternating_text_image_module", "title", "usp_ui_title"),
    ("alternating_text_image_module", "usp_ui_1_heading", "usp_ui_1_heading"),
    ("alternating_text_image_module", "usp_ui_1_copy", "usp_ui_1_copy"),
    ("alternating_text_image_module", "usp_ui_1_image_url", "usp_ui_1_image_url"),
    ("alternating_text_image_module", "usp_ui_2_heading", "usp_ui_2_heading"),
    ("alternating_text_image_module", "usp_ui_2_copy", "usp_ui_2_copy"),
    ("alternating_text_image_module", "usp_ui_2_image_url", "usp_ui_2_image_url"),
    ("alternating_text_image_module", "usp_ui_3_heading", "usp_ui_3_heading"),
    ("alternating_text_image_module", "usp_ui_3_copy", "usp_ui_3_copy"),
    ("alternating_text_image_module", "usp_ui_3_image_url", "usp_ui_3_image_url"),
];

/// Rows an editor sees for one module in a blank input sheet:
/// `(raw key, example default-locale value)`.
#[derive(Debug, Clone, Copy)]
pub struct ModuleLayout {
    pub module: &'static str,
    pub rows: &'static [(&'static str, &'static str)],
}

pub const MODULE_LAYOUTS: &[ModuleLayout] = &[
    ModuleLayout {
        module: "hero_module",
        rows: &[
            ("subject_line", ""),
            ("preheader", ""),
            ("headline", ""),
            ("body_1", ""),
            ("body_2", ""),
            ("cta_text", ""),
            ("image_url", ""),
            ("image_url_mobile", ""),
            ("image_deeplink", ""),
            ("cta_link", ""),
            ("cta_alias", "hero-cta"),
        ],
    },
    ModuleLayout {
        module: "hero_module_two_column",
        rows: &[
            ("subject_line", ""),
            ("preheader", ""),
            ("headline", ""),
            ("subheadline", ""),
            ("body_1_h2", ""),
            ("body_1_copy", ""),
            ("image_1_url", ""),
            ("body_2_h2", ""),
            ("body_2_copy", ""),
            ("image_2_url", ""),
            ("body_3_h2", ""),
            ("body_3_copy", ""),
            ("image_3_url", ""),
            ("body_4_h2", ""),
            ("body_4_copy", ""),
            ("image_4_url", ""),
            ("cta_text", ""),
            ("hero_image_url", ""),
            ("image_deeplink", ""),
            ("cta_link", ""),
            ("cta_alias", "hero-cta"),
        ],
    },
    ModuleLayout {
        module: "app_download_module",
        rows: &[
            ("headline", ""),
            ("feature_1", ""),
            ("feature_2", ""),
            ("feature_3", ""),
            ("colour", "#fcf7f5"),
        ],
    },
    ModuleLayout {
        module: "disclaimer_module",
        rows: &[
            ("terms_title", ""),
            ("terms_desc", ""),
            ("terms_label", ""),
            ("privacy_label", ""),
        ],
    },
    ModuleLayout {
        module: "icon_left_text_right_module",
        rows: &[
            ("title", "Why travellers book with us"),
            ("usp_1_heading", "Compare prices across many sites"),
            ("usp_1_copy", "See the full picture upfront."),
            ("usp_1_icon_url", ""),
            ("usp_2_heading", "Know when to book"),
            ("usp_2_copy", "Price insights show you the right moment."),
            ("usp_2_icon_url", ""),
            ("usp_3_heading", "Stay ahead of price changes"),
            ("usp_3_copy", "We track prices so you do not have to."),
            ("usp_3_icon_url", ""),
        ],
    },
    ModuleLayout {
        module: "text_left_image_right_module",
        rows: &[
            ("title", "Why travellers book with us"),
            ("usp_feature_1_heading", "Compare prices across many sites"),
            ("usp_feature_1_copy", "See the full picture upfront."),
            ("usp_feature_1_image_url", ""),
            ("usp_feature_2_heading", "Know when to book"),
            ("usp_feature_2_copy", "Price insights show you the right moment."),
            ("usp_feature_2_image_url", ""),
            ("usp_feature_3_heading", "Stay ahead of price changes"),
            ("usp_feature_3_copy", "We track prices so you do not have to."),
            ("usp_feature_3_image_url", ""),
        ],
    },
    ModuleLayout {
        module: "alternating_text_image_module",
        rows: &[
            ("title", "Why travellers book with us"),
            ("usp_ui_1_heading", "Compare prices across many sites"),
            ("usp_ui_1_copy", "See the full picture upfront."),
            ("usp_ui_1_image_url", ""),
            ("usp_ui_2_heading", "Know when to book"),
            ("usp_ui_2_copy", "Price insights show you the right moment."),
            ("usp_ui_2_image_url", ""),
            ("usp_ui_3_heading", "Stay ahead of price changes"),
            ("usp_ui_3_copy", "We track prices so you do not have to."),
            ("usp_ui_3_image_url", ""),
        ],
    },
];

pub fn layout(module: &str) -> Option<&'static ModuleLayout> {
    MODULE_LAYOUTS.iter().find(|l| l.module == module)
}
