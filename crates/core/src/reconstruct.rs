//! Document reconstruction from a template and translated values.
//!
//! The mirror image of templating, with the opposite contract: templating is
//! strict (an unplaceable fragment aborts the run), reconstruction is lenient
//! (a placeholder with no value renders as the empty string). Substitution is
//! literal; entity escaping of translated text is the caller's concern.
//!
//! # Example
//!
//! ```rust
//! use traducto_core::reconstruct::reconstruct;
//!
//! let template = "<p>{{ s0 }}</p><p>{{ s1 }}</p>";
//! let values = vec!["Bonjour".to_string(), "Monde".to_string()];
//!
//! assert_eq!(reconstruct(template, &values), "<p>Bonjour</p><p>Monde</p>");
//! ```

use regex::Regex;
use std::sync::OnceLock;

use crate::matrix::TranslationMatrix;

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{\s*s(\d+)\s*\}\}").unwrap())
}

/// Substitute every `{{ s<idx> }}` token with `values[idx]`.
///
/// Markup around the placeholders is preserved exactly. An index past the end
/// of `values` (or an index too large to parse) substitutes the empty string
/// rather than failing: reconstruction must always produce a document.
pub fn reconstruct(template: &str, values: &[String]) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &regex::Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|idx| values.get(idx))
                .cloned()
                .unwrap_or_default()
        })
        .into_owned()
}

/// Render the document for one target language.
///
/// Returns `None` when the language is not a column of the matrix.
pub fn reconstruct_language(template: &str, matrix: &TranslationMatrix, lang: &str) -> Option<String> {
    let values = matrix.column(lang)?;
    Some(reconstruct(template, &values))
}

/// Render one finished document per configured language.
///
/// Passes over the template are independent and read-only, so callers may
/// fan these out; the sequential order here matches the matrix column order.
pub fn reconstruct_all(template: &str, matrix: &TranslationMatrix) -> Vec<(String, String)> {
    matrix
        .languages()
        .iter()
        .map(|lang| {
            let values = matrix.column(lang).unwrap_or_default();
            (lang.clone(), reconstruct(template, &values))
        })
        .collect()
}
