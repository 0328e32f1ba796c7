//! Entity normalization applied before extraction and templating.
//!
//! Rendered pages frequently carry escaped entities (`&amp;`, `&#8217;`, ...)
//! in their text nodes. Fragment matching is plain substring matching over the
//! document, so the document is normalized once up front and every later stage
//! (extraction, templating, reconstruction) operates on the same decoded
//! string. Reconstruction performs literal substitution only; re-escaping
//! translated values is the caller's concern.

use regex::Regex;
use std::sync::OnceLock;

/// Named entities handled without a full entity table.
///
/// `&amp;` must be decoded last so that double-escaped sequences like
/// `&amp;lt;` do not collapse twice.
const NAMED_ENTITIES: [(&str, &str); 5] = [
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&apos;", "'"),
    ("&nbsp;", "\u{a0}"),
];

fn numeric_entity_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"&#(x[0-9a-fA-F]{1,6}|[0-9]{1,7});").unwrap())
}

/// Decode common HTML character references in a document.
///
/// Handles the named entities for markup delimiters and quotes, the
/// non-breaking space, and decimal/hexadecimal numeric references. Unknown
/// named entities are left untouched.
///
/// # Example
///
/// ```rust
/// use traducto_core::normalize::decode_entities;
///
/// assert_eq!(decode_entities("Fish &amp; Chips"), "Fish & Chips");
/// assert_eq!(decode_entities("&#82;ust &#x2764;"), "Rust \u{2764}");
/// ```
pub fn decode_entities(html: &str) -> String {
    let mut out = numeric_entity_regex()
        .replace_all(html, |caps: &regex::Captures| {
            let body = &caps[1];
            let parsed = if let Some(hex) = body.strip_prefix('x') {
                u32::from_str_radix(hex, 16)
            } else {
                body.parse::<u32>()
            };

            match parsed.ok().and_then(char::from_u32) {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned();

    for (entity, replacement) in NAMED_ENTITIES {
        if out.contains(entity) {
            out = out.replace(entity, replacement);
        }
    }

    if out.contains("&amp;") {
        out = out.replace("&amp;", "&");
    }

    out
}
