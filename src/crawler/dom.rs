//! Small DOM query helpers shared by the link collector and extractor

use scraper::{ElementRef, Selector};

/// Collapses every run of whitespace to a single space and trims the ends
///
/// Unicode whitespace counts, so non-breaking spaces in price labels
/// ("12,90\u{a0}€") normalize the same way as ordinary spaces.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible text of an element, whitespace-normalized
pub fn element_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<String>())
}

/// What to read from the element a field selector matches
#[derive(Debug, Clone, Copy)]
pub enum Accessor<'a> {
    /// Whitespace-normalized text content
    Text,
    /// An attribute value, trimmed but otherwise verbatim
    Attr(&'a str),
}

/// Reads one optional field from the first element under `scope` matching `selector`
///
/// Returns the empty string when nothing matches or the attribute is absent,
/// so a field missing from one item never affects the rest of the record.
pub fn extract_optional(scope: ElementRef<'_>, selector: &Selector, accessor: Accessor<'_>) -> String {
    scope
        .select(selector)
        .next()
        .and_then(|element| match accessor {
            Accessor::Text => Some(element_text(element)),
            Accessor::Attr(name) => element.value().attr(name).map(|v| v.trim().to_string()),
        })
        .unwrap_or_default()
}
