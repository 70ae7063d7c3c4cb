//! Common utilities for formatters.

/// Escape special XML characters.
///
/// Also used for HTML attribute and text content in the export form.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
