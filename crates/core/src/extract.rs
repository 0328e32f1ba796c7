//! Text fragment extraction.
//!
//! The extractor works on a lexical view of the document rather than a parsed
//! DOM: a *text segment* is a maximal run of non-`<`/`>` characters sitting
//! strictly between the `>` that closes one tag and the `<` that opens the
//! next. Tag names, attributes, and malformed runs never qualify. The segment
//! list is the positional index the templater substitutes into, so occurrences
//! are addressed by segment instead of re-scanning the document after every
//! replacement.
//!
//! # Example
//!
//! ```rust
//! use traducto_core::extract::extract_fragments;
//!
//! let html = "<p>Kubo</p><p>Kubo Education</p>";
//! let fragments = extract_fragments(html).unwrap();
//!
//! assert_eq!(fragments[0].text, "Kubo");
//! assert_eq!(fragments[1].text, "Kubo Education");
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Result, TraductoError};

/// A distinct, deduplicated unit of translatable text.
///
/// `index` is stable, 0-based, and assigned in document order of first
/// appearance. `text` is trimmed; internal whitespace is preserved. Identical
/// text appearing in several places is one fragment with several occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Stable extraction-time index, used to address the placeholder token.
    pub index: usize,
    /// Trimmed text content.
    pub text: String,
}

/// One lexical segment of an HTML document.
///
/// Concatenating the segments of [`segment_html`] in order reproduces the
/// input byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Tags, attributes, comments, and any run that is not valid tag text.
    Markup(String),
    /// A nonempty run between a `>` and the next `<`.
    Text(String),
}

/// Split a document into alternating markup and text segments.
///
/// A text segment must be immediately preceded by `>` and immediately
/// followed by `<`; a run cut short by a stray `>` or by end of input stays
/// markup. This mirrors pattern-based extraction over raw markup: no DOM is
/// built and malformed nesting is never an error.
pub fn segment_html(html: &str) -> Vec<Segment> {
    let bytes = html.as_bytes();
    let len = bytes.len();
    let mut segments = Vec::new();
    let mut markup_start = 0usize;
    let mut i = 0usize;

    while i < len {
        if bytes[i] != b'>' {
            i += 1;
            continue;
        }

        let run_start = i + 1;
        let mut j = run_start;
        while j < len && bytes[j] != b'<' && bytes[j] != b'>' {
            j += 1;
        }

        if j < len && bytes[j] == b'<' && j > run_start {
            if markup_start < run_start {
                segments.push(Segment::Markup(html[markup_start..run_start].to_string()));
            }
            segments.push(Segment::Text(html[run_start..j].to_string()));
            markup_start = j;
            i = j;
        } else if j < len && bytes[j] == b'>' {
            // re-examine the terminator as the opener of the next candidate
            i = j;
        } else {
            i = j.max(i + 1);
        }
    }

    if markup_start < len {
        segments.push(Segment::Markup(html[markup_start..].to_string()));
    }

    segments
}

/// Extract the ordered list of distinct translatable fragments.
///
/// Text segments are trimmed, fragments of one character or less are dropped,
/// and duplicates (by trimmed equality) collapse into the entry created at
/// their first occurrence.
///
/// # Errors
///
/// Returns [`TraductoError::EmptyDocument`] when the input is blank. Malformed
/// HTML is never an error.
pub fn extract_fragments(html: &str) -> Result<Vec<Fragment>> {
    if html.trim().is_empty() {
        return Err(TraductoError::EmptyDocument);
    }

    let mut fragments: Vec<Fragment> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for segment in segment_html(html) {
        let Segment::Text(text) = segment else {
            continue;
        };

        let trimmed = text.trim();
        if trimmed.chars().count() <= 1 {
            continue;
        }

        if !seen.contains_key(trimmed) {
            let index = fragments.len();
            seen.insert(trimmed.to_string(), index);
            fragments.push(Fragment { index, text: trimmed.to_string() });
        }
    }

    Ok(fragments)
}
