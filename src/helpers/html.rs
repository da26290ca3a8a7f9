//! HTML helper functions

/// Escape text for HTML content and quoted attributes
///
/// Unlike Tera's default escaper this leaves `/` alone, so URLs stay
/// readable in the generated markup.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
