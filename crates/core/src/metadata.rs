//! Document-level metadata handled as additional translatable rows.
//!
//! Title, description, and keywords do not appear as inline text nodes, so
//! they travel outside the positional fragment list, keyed by name. When a
//! page declares no keywords, a fallback derives them from the document text
//! so the keywords row is never silently empty for keyword-bearing pages.

use crate::Document;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Row key for the document title.
pub const META_TITLE: &str = "title";
/// Row key for the meta description.
pub const META_DESCRIPTION: &str = "meta-description";
/// Row key for the meta keywords.
pub const META_KEYWORDS: &str = "meta-keywords";

/// The fixed mapping of document-level translatable metadata.
///
/// Values are plain strings; an empty string means the document did not carry
/// the field (empty fields are skipped during matrix fills).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaFields {
    pub title: String,
    pub description: String,
    /// Comma-joined keyword list.
    pub keywords: String,
}

impl MetaFields {
    /// The fixed row-key set, in row order.
    pub const KEYS: [&'static str; 3] = [META_TITLE, META_DESCRIPTION, META_KEYWORDS];

    /// Look up a field by its row key.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            META_TITLE => Some(&self.title),
            META_DESCRIPTION => Some(&self.description),
            META_KEYWORDS => Some(&self.keywords),
            _ => None,
        }
    }

    /// (key, value) pairs in row order.
    pub fn entries(&self) -> [(&'static str, &str); 3] {
        [
            (META_TITLE, self.title.as_str()),
            (META_DESCRIPTION, self.description.as_str()),
            (META_KEYWORDS, self.keywords.as_str()),
        ]
    }
}

impl Document {
    /// Extract title with priority fallback:
    /// 1. JSON-LD `headline`
    /// 2. Open Graph `og:title`
    /// 3. Twitter `twitter:title`
    /// 4. Meta `title`
    /// 5. `<title>` element
    /// 6. First `<h1>` element
    pub fn extract_title(&self) -> Option<String> {
        if let Some(json_ld) = self.extract_json_ld()
            && let Some(headline) = json_ld.get("headline")
            && let Some(value) = headline.as_str()
        {
            return Some(value.to_string());
        }

        if let Some(title) = self.get_meta_content("og:title") {
            return Some(title);
        }

        if let Some(title) = self.get_meta_content("twitter:title") {
            return Some(title);
        }

        if let Some(title) = self.get_meta_content("title") {
            return Some(title);
        }

        if let Some(title) = self.title() {
            let title = title.trim();
            if !title.is_empty() {
                return Some(title.to_string());
            }
        }

        if let Ok(elements) = self.select("h1")
            && let Some(first) = elements.first()
        {
            let text = first.text();
            let text = text.trim();
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }

        None
    }

    /// Extract description with priority fallback:
    /// 1. JSON-LD `description`
    /// 2. Open Graph `og:description`
    /// 3. Meta `description`
    pub fn extract_description(&self) -> Option<String> {
        if let Some(json_ld) = self.extract_json_ld()
            && let Some(desc) = json_ld.get("description")
            && let Some(value) = desc.as_str()
        {
            return Some(value.to_string());
        }

        if let Some(desc) = self.get_meta_content("og:description") {
            return Some(desc);
        }

        self.get_meta_content("description")
    }

    /// Extract declared keywords from `meta[name="keywords"]`.
    ///
    /// Returns the raw comma-separated value; no fallback is applied here.
    pub fn extract_declared_keywords(&self) -> Option<String> {
        self.get_meta_content("keywords").filter(|k| !k.trim().is_empty())
    }

    /// Extract the full meta-field mapping.
    ///
    /// When the document declares no keywords, the keywords row is populated
    /// from [`derive_keywords`] over the document text.
    pub fn extract_meta_fields(&self) -> MetaFields {
        let keywords = match self.extract_declared_keywords() {
            Some(declared) => declared,
            None => derive_keywords(&self.text_content(), 10).join(","),
        };

        MetaFields {
            title: self.extract_title().unwrap_or_default(),
            description: self.extract_description().unwrap_or_default(),
            keywords,
        }
    }

    /// Get meta tag content by name or property attribute
    fn get_meta_content(&self, attr: &str) -> Option<String> {
        let selector = format!("meta[name=\"{}\"]", attr);
        if let Ok(elements) = self.select(&selector)
            && let Some(el) = elements.first()
            && let Some(content) = el.attr("content")
        {
            return Some(content.to_string());
        }

        let selector = format!("meta[property=\"{}\"]", attr);
        if let Ok(elements) = self.select(&selector)
            && let Some(el) = elements.first()
            && let Some(content) = el.attr("content")
        {
            return Some(content.to_string());
        }

        None
    }

    /// Extract and parse JSON-LD from script tags
    fn extract_json_ld(&self) -> Option<serde_json::Value> {
        if let Ok(elements) = self.select("script[type=\"application/ld+json\"]") {
            for el in elements.iter() {
                let text = el.text();
                let json_str = text.trim();
                if let Ok(value) = serde_json::from_str::<serde_json::Value>(json_str) {
                    return Some(value);
                }
            }
        }
        None
    }
}

/// Words too common to be useful keywords.
const STOP_WORDS: &[&str] = &[
    "about", "after", "also", "been", "before", "being", "between", "both", "from", "have", "here", "into", "more",
    "most", "only", "other", "over", "same", "some", "such", "than", "that", "their", "them", "then", "there", "these",
    "they", "this", "those", "under", "very", "were", "what", "when", "where", "which", "while", "will", "with",
    "would", "your",
];

/// Derive up to `max` keywords from text by term frequency.
///
/// Words are lowercased, short words and stop words are dropped, and the
/// result is ordered by descending frequency with first appearance breaking
/// ties, so the output is deterministic for a fixed input.
pub fn derive_keywords(text: &str, max: usize) -> Vec<String> {
    let word_regex = Regex::new(r"\b[\w'-]+\b").unwrap();

    let mut order: Vec<String> = Vec::new();
    let mut counts: std::collections::HashMap<String, usize> = std::collections::HashMap::new();

    for m in word_regex.find_iter(text) {
        let word = m.as_str().to_lowercase();
        if word.chars().count() <= 3 || STOP_WORDS.contains(&word.as_str()) || word.chars().all(|c| c.is_numeric()) {
            continue;
        }
        if !counts.contains_key(&word) {
            order.push(word.clone());
        }
        *counts.entry(word).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> = order
        .into_iter()
        .enumerate()
        .map(|(first_seen, word)| {
            let count = counts[&word];
            (word, count, first_seen)
        })
        .collect();
    ranked.sort_by_key(|(_, count, first_seen)| (std::cmp::Reverse(*count), *first_seen));

    ranked.into_iter().take(max).map(|(word, _, _)| word).collect()
}
