//! Placeholder templating.
//!
//! Turns a document plus its extracted fragment list into a reusable
//! template: every fragment occurrence is replaced with an index-addressed
//! `{{ s<idx> }}` token while markup is carried through untouched.
//!
//! Substitution runs longest-fragment-first so a short fragment that is a
//! substring of a longer one ("Kubo" inside "Kubo Education") can never steal
//! a piece of the longer fragment's occurrence. Replacement happens inside
//! the lexical segment structure from [`crate::extract`]: markup segments and
//! already-placed placeholders are separate pieces that later matches cannot
//! reach, so placeholder tokens are collision-proof by construction.
//!
//! # Example
//!
//! ```rust
//! use traducto_core::extract::extract_fragments;
//! use traducto_core::template::build_template;
//!
//! let html = "<p>Kubo</p><p>Kubo Education</p>";
//! let fragments = extract_fragments(html).unwrap();
//! let template = build_template(html, &fragments).unwrap();
//!
//! assert_eq!(template, "<p>{{ s0 }}</p><p>{{ s1 }}</p>");
//! ```

use serde::{Deserialize, Serialize};

use crate::extract::{Fragment, Segment, segment_html};
use crate::{Result, TraductoError};

/// The single content-insertion marker a layout document must contain.
pub const CONTENT_SLOT: &str = "{{ content }}";

/// The template document and its original-language companion.
///
/// Both carry the same surrounding layout; they differ only in whether
/// fragment occurrences are placeholders or the untouched source text. The
/// original is the human-reference render and the fallback document for the
/// source language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSet {
    /// Document with every fragment occurrence replaced by its placeholder.
    pub template: String,
    /// Document with the source text left in place.
    pub original: String,
}

/// Format the placeholder token for a fragment index.
///
/// ```rust
/// assert_eq!(traducto_core::template::placeholder(7), "{{ s7 }}");
/// ```
pub fn placeholder(index: usize) -> String {
    format!("{{{{ s{} }}}}", index)
}

/// A resolved slice of a text segment during substitution.
enum Piece {
    Literal(String),
    Placeholder(usize),
}

enum Part {
    Markup(String),
    Text(Vec<Piece>),
}

/// Replace every occurrence of `text` in the literal pieces, left to right.
/// Returns how many placeholders were placed.
fn place_in_pieces(pieces: &mut Vec<Piece>, text: &str, index: usize) -> usize {
    let mut placed = 0;
    let mut out = Vec::with_capacity(pieces.len());

    for piece in std::mem::take(pieces) {
        let Piece::Literal(lit) = piece else {
            out.push(piece);
            continue;
        };

        let mut rest = lit.as_str();
        while let Some(pos) = rest.find(text) {
            if pos > 0 {
                out.push(Piece::Literal(rest[..pos].to_string()));
            }
            out.push(Piece::Placeholder(index));
            placed += 1;
            rest = &rest[pos + text.len()..];
        }
        if !rest.is_empty() {
            out.push(Piece::Literal(rest.to_string()));
        }
    }

    *pieces = out;
    placed
}

/// Build the placeholder template for a document.
///
/// `fragments` is normally the output of
/// [`extract_fragments`](crate::extract::extract_fragments) for the same
/// document, but any ordered list of unique trimmed strings works; indices
/// address the placeholder tokens.
///
/// Every text-node occurrence of every fragment is resolved in this single
/// run. A fragment duplicated across N text nodes yields N placeholders
/// sharing one index.
///
/// # Errors
///
/// Returns [`TraductoError::UnresolvedFragment`] when a fragment has no
/// remaining occurrence in any literal text position — substitution must
/// never silently skip or mis-place a placeholder.
pub fn build_template(html: &str, fragments: &[Fragment]) -> Result<String> {
    let mut parts: Vec<Part> = segment_html(html)
        .into_iter()
        .map(|segment| match segment {
            Segment::Markup(m) => Part::Markup(m),
            Segment::Text(t) => Part::Text(vec![Piece::Literal(t)]),
        })
        .collect();

    // Longest first; ties broken by index so the result is deterministic.
    let mut order: Vec<&Fragment> = fragments.iter().collect();
    order.sort_by_key(|f| (std::cmp::Reverse(f.text.chars().count()), f.index));

    for fragment in order {
        let mut placed = 0;
        for part in parts.iter_mut() {
            if let Part::Text(pieces) = part {
                placed += place_in_pieces(pieces, &fragment.text, fragment.index);
            }
        }

        if placed == 0 {
            return Err(TraductoError::UnresolvedFragment { text: fragment.text.clone() });
        }
    }

    let mut rendered = String::with_capacity(html.len());
    for part in parts {
        match part {
            Part::Markup(m) => rendered.push_str(&m),
            Part::Text(pieces) => {
                for piece in pieces {
                    match piece {
                        Piece::Literal(lit) => rendered.push_str(&lit),
                        Piece::Placeholder(index) => rendered.push_str(&placeholder(index)),
                    }
                }
            }
        }
    }

    Ok(rendered)
}

/// Insert rendered content into a layout document.
///
/// The layout must contain exactly one `{{ content }}` marker; one literal
/// substitution is performed.
///
/// # Errors
///
/// Returns [`TraductoError::MissingContentSlot`] when the marker is absent.
pub fn apply_layout(layout: &str, content: &str) -> Result<String> {
    if !layout.contains(CONTENT_SLOT) {
        return Err(TraductoError::MissingContentSlot);
    }

    Ok(layout.replacen(CONTENT_SLOT, content, 1))
}

/// Produce the template document and the original-language snapshot.
///
/// Both documents come from the same replacement plan and share the layout
/// wrapper; see [`TemplateSet`].
pub fn build_documents(html: &str, fragments: &[Fragment], layout: &str) -> Result<TemplateSet> {
    let template = build_template(html, fragments)?;

    Ok(TemplateSet { template: apply_layout(layout, &template)?, original: apply_layout(layout, html)? })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_fragments;

    fn fragment(index: usize, text: &str) -> Fragment {
        Fragment { index, text: text.to_string() }
    }

    #[test]
    fn test_simple_template() {
        let html = "<h1>Title</h1><p>Body text</p>";
        let fragments = extract_fragments(html).unwrap();
        let template = build_template(html, &fragments).unwrap();

        assert_eq!(template, "<h1>{{ s0 }}</h1><p>{{ s1 }}</p>");
    }

    #[test]
    fn test_surrounding_whitespace_preserved() {
        let html = "<p>\n  Kubo Education \n</p>";
        let fragments = extract_fragments(html).unwrap();
        let template = build_template(html, &fragments).unwrap();

        assert_eq!(template, "<p>\n  {{ s0 }} \n</p>");
    }

    #[test]
    fn test_longest_first_substring_fragments() {
        let html = "<p>Kubo</p><p>Kubo Education</p>";
        let fragments = extract_fragments(html).unwrap();
        let template = build_template(html, &fragments).unwrap();

        assert_eq!(template, "<p>{{ s0 }}</p><p>{{ s1 }}</p>");
    }

    #[test]
    fn test_shorter_fragment_outside_longer_still_placed() {
        let html = "<p>Kubo Education</p><span>Kubo</span><div>Kubo</div>";
        let fragments = extract_fragments(html).unwrap();
        let template = build_template(html, &fragments).unwrap();

        assert_eq!(template, "<p>{{ s0 }}</p><span>{{ s1 }}</span><div>{{ s1 }}</div>");
    }

    #[test]
    fn test_duplicate_occurrences_all_resolved() {
        let html = "<p>Same</p><div>Same</div><span>Same</span>";
        let fragments = extract_fragments(html).unwrap();
        assert_eq!(fragments.len(), 1);

        let template = build_template(html, &fragments).unwrap();
        assert_eq!(template, "<p>{{ s0 }}</p><div>{{ s0 }}</div><span>{{ s0 }}</span>");
    }

    #[test]
    fn test_attribute_text_untouched() {
        let html = r#"<a href="https://kubo.example" title="Kubo Education">Kubo Education</a>"#;
        let fragments = extract_fragments(html).unwrap();
        let template = build_template(html, &fragments).unwrap();

        assert_eq!(
            template,
            r#"<a href="https://kubo.example" title="Kubo Education">{{ s0 }}</a>"#
        );
    }

    #[test]
    fn test_unresolved_fragment_is_error() {
        let html = "<p>Present</p>";
        let fragments = vec![fragment(0, "Present"), fragment(1, "Missing")];
        let result = build_template(html, &fragments);

        match result {
            Err(TraductoError::UnresolvedFragment { text }) => assert_eq!(text, "Missing"),
            other => panic!("expected UnresolvedFragment, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_placeholder_token_never_corrupted() {
        // "s0" would match inside "{{ s0 }}" if substitution re-scanned the
        // rendered string; the piece structure makes that impossible
        let html = "<p>long fragment s0</p><p>s0</p>";
        let fragments = extract_fragments(html).unwrap();
        let template = build_template(html, &fragments).unwrap();

        assert_eq!(template, "<p>{{ s0 }}</p><p>{{ s1 }}</p>");
    }

    #[test]
    fn test_determinism() {
        let html = "<p>Alpha</p><p>Beta</p><p>Alpha Beta</p>";
        let fragments = extract_fragments(html).unwrap();
        let a = build_template(html, &fragments).unwrap();
        let b = build_template(html, &fragments).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_apply_layout() {
        let layout = "<html><body>{{ content }}</body></html>";
        let result = apply_layout(layout, "<p>Hello</p>").unwrap();
        assert_eq!(result, "<html><body><p>Hello</p></body></html>");
    }

    #[test]
    fn test_apply_layout_missing_slot() {
        let result = apply_layout("<html><body></body></html>", "<p>Hi</p>");
        assert!(matches!(result, Err(TraductoError::MissingContentSlot)));
    }

    #[test]
    fn test_build_documents() {
        let html = "<p>Hello world</p>";
        let layout = "<main>{{ content }}</main>";
        let fragments = extract_fragments(html).unwrap();
        let set = build_documents(html, &fragments, layout).unwrap();

        assert_eq!(set.template, "<main><p>{{ s0 }}</p></main>");
        assert_eq!(set.original, "<main><p>Hello world</p></main>");
    }
}
