//! Plain-text helpers for question content.

/// Decode HTML character references (`&quot;`, `&#039;`, `&iquest;`, ...).
///
/// Covers the full HTML named-entity set plus decimal and hex references.
/// Anything that is not a known reference is kept verbatim.
#[must_use]
pub fn decode_html_entities(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}
