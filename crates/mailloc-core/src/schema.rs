//! The fixed content schema: which keys the template knows about and
//! whether they vary by locale.

use serde::Serialize;

const TRANSLATABLE_KEYS: &[&str] = &[
    "subject_line",
    "preheader",
    "headline",
    "headline_2",
    "secondary_headline",
    "body_1",
    "body_2",
    "cta_text",
    "app_download_title",
    "app_download_feature_1",
    "app_download_feature_2",
    "app_download_feature_3",
    "hero_two_col_body_1_h2",
    "hero_two_col_body_1_copy",
    "hero_two_col_body_2_h2",
    "hero_two_col_body_2_copy",
    "hero_two_col_body_3_h2",
    "hero_two_col_body_3_copy",
    "hero_two_col_body_4_h2",
    "hero_two_col_body_4_copy",
    "hero_two_col_cta_text",
    "terms_title",
    "terms_desc_text",
    "terms_label",
    "privacy_label",
    "usp_title",
    "usp_1_heading",
    "usp_1_copy",
    "usp_2_heading",
    "usp_2_copy",
    "usp_3_heading",
    "usp_3_copy",
    "usp_feature_title",
    "usp_feature_1_heading",
    "usp_feature_1_copy",
    "usp_feature_2_heading",
    "usp_feature_2_copy",
    "usp_feature_3_heading",
    "usp_feature_3_copy",
    "usp_ui_title",
    "usp_ui_1_heading",
    "usp_ui_1_copy",
    "usp_ui_2_heading",
    "usp_ui_2_copy",
    "usp_ui_3_heading",
    "usp_ui_3_copy",
];

const STRUCTURAL_KEYS: &[&str] = &[
    "image_url",
    "image_url_mobile",
    "image_deeplink",
    "cta_link",
    "cta_alias",
    "app_store_rating",
    "google_play_rating",
    "app_download_colour",
    "hero_two_col_image_1_url",
    "hero_two_col_image_2_url",
    "hero_two_col_image_3_url",
    "hero_two_col_image_4_url",
    "usp_1_icon_url",
    "usp_2_icon_url",
    "usp_3_icon_url",
    "usp_feature_1_image_url",
    "usp_feature_2_image_url",
    "usp_feature_3_image_url",
    "usp_ui_1_image_url",
    "usp_ui_2_image_url",
    "usp_ui_3_image_url",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyKind {
    /// One value per locale, falling back to the default locale.
    Translatable,
    /// One value shared by every locale (URLs, colours, aliases).
    Structural,
}

/// Ordered key lists of the single supported email layout.
#[derive(Debug, Clone, Copy)]
pub struct ContentSchema {
    translatable: &'static [&'static str],
    structural: &'static [&'static str],
}

impl Default for ContentSchema {
    fn default() -> Self {
        Self::standard()
    }
}

impl ContentSchema {
    pub const fn standard() -> Self {
        Self {
            translatable: TRANSLATABLE_KEYS,
            structural: STRUCTURAL_KEYS,
        }
    }

    pub fn translatable(&self) -> &'static [&'static str] {
        self.translatable
    }

    pub fn structural(&self) -> &'static [&'static str] {
        self.structural
    }

    /// `None` for keys the template does not know; those are ignored.
    pub fn kind(&self, key: &str) -> Option<KeyKind> {
        if self.translatable.contains(&key) {
            Some(KeyKind::Translatable)
        } else if self.structural.contains(&key) {
            Some(KeyKind::Structural)
        } else {
            None
        }
    }
}
