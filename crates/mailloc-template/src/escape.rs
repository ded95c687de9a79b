/// Keep cell text from opening Liquid tags inside a capture.
pub fn escape_liquid(s: &str) -> String {
    s.replace("{%", "{{ '{%' }}").replace("%}", "{{ '%}' }}")
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Prefix `https://` when a URL has no scheme. Blank stays blank.
pub fn normalise_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        String::new()
    } else if url.contains("://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

fn is_url_key(key: &str) -> bool {
    key.ends_with("_url") || key.ends_with("_link") || key.ends_with("_deeplink")
}

/// The markup-ready form of a structural value: URLs gain a scheme, then
/// everything is HTML-escaped for use inside attributes.
pub fn structural_markup(key: &str, value: &str) -> String {
    if is_url_key(key) {
        html_escape(&normalise_url(value))
    } else {
        html_escape(value.trim())
    }
}

/// Quote a value for a Liquid `assign`. Liquid literals have no escape
/// sequences, so the delimiter is whichever quote the value lacks. A value
/// holding both kinds is double-quoted with `"` entity-encoded.
pub fn liquid_string(s: &str) -> String {
    if !s.contains('"') {
        format!("\"{s}\"")
    } else if !s.contains('\'') {
        format!("'{s}'")
    } else {
        format!("\"{}\"", s.replace('"', "&quot;"))
    }
}

/// A link as it lands in an `href`: trimmed, with `"` percent-encoded.
pub fn link_value(url: &str) -> String {
    url.trim().replace('"', "%22")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn liquid_tags_are_neutralised() {
        assert_eq!(escape_liquid("50% {% off %}"), "50% {{ '{%' }} off {{ '%}' }}");
        assert_eq!(escape_liquid("{{ name }}"), "{{ name }}");
    }

    #[test]
    fn urls_get_a_scheme() {
        assert_eq!(normalise_url(" example.com/a "), "https://example.com/a");
        assert_eq!(normalise_url("http://x"), "http://x");
        assert_eq!(normalise_url("  "), "");
    }

    #[test]
    fn structural_urls_are_normalised_before_escaping() {
        assert_eq!(structural_markup("cta_link", "example.com/?a=1&b=2"), "https://example.com/?a=1&amp;b=2");
        assert_eq!(structural_markup("cta_alias", " hero-cta "), "hero-cta");
        assert_eq!(structural_markup("app_download_colour", "#FFF"), "#FFF");
    }

    #[test]
    fn html_escaping() {
        assert_eq!(html_escape(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }

    #[test]
    fn liquid_strings_pick_the_missing_quote() {
        assert_eq!(liquid_string(r"C:\tmp"), r#""C:\tmp""#);
        assert_eq!(liquid_string(r#"say "hi""#), r#"'say "hi"'"#);
        assert_eq!(liquid_string(r#"it's "x""#), "\"it's &quot;x&quot;\"");
        assert_eq!(liquid_string("it's"), "\"it's\"");
    }

    #[test]
    fn link_quotes_are_percent_encoded() {
        assert_eq!(link_value(r#" https://x.test/?q="a" "#), "https://x.test/?q=%22a%22");
    }
}
