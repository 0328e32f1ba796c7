//! The localization-preparation pipeline.
//!
//! This module ties the stages together: normalization, fragment extraction,
//! metadata extraction, and templating. The main entry point is [`prepare`],
//! with [`fetch_and_prepare`] as the one-step convenience when the `fetch`
//! feature is enabled.
//!
//! Every transformation in here is pure and deterministic: preparing the
//! same HTML twice yields identical fragments and identical documents, so
//! re-running after a failure downstream is always safe.
//!
//! # Example
//!
//! ```rust
//! use traducto_core::pipeline::{PipelineConfig, prepare};
//!
//! let html = "<html><head><title>Demo</title></head>\
//!             <body><p>Hello world</p></body></html>";
//! let config = PipelineConfig::builder()
//!     .source_lang("EN")
//!     .target_langs(["FR", "NL"])
//!     .build();
//!
//! let prepared = prepare(html, &config).unwrap();
//! assert_eq!(prepared.fragments.len(), 2);
//! assert!(prepared.template.contains("{{ s1 }}"));
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extract::{Fragment, extract_fragments};
use crate::metadata::MetaFields;
use crate::normalize::decode_entities;
use crate::parse::Document;
use crate::template::build_documents;
use crate::{Result, TraductoError};

/// Minimal built-in layout used when the caller supplies none.
pub const DEFAULT_LAYOUT: &str = "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n</head>\n<body>\n{{ content }}\n</body>\n</html>\n";

/// Configuration for a preparation run.
///
/// # Example
///
/// ```rust
/// use traducto_core::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .source_lang("EN")
///     .target_langs(["FR", "NL"])
///     .build();
/// assert_eq!(config.target_langs, vec!["FR", "NL"]);
/// ```
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Language of the source document (default: "EN").
    pub source_lang: String,

    /// Ordered target languages; this becomes the matrix column set.
    pub target_langs: Vec<String>,

    /// Layout document with a single `{{ content }}` slot.
    pub layout: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_lang: "EN".to_string(),
            target_langs: vec!["FR".to_string(), "NL".to_string()],
            layout: DEFAULT_LAYOUT.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Creates a new builder for PipelineConfig.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::new()
    }
}

/// Builder for [`PipelineConfig`].
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn new() -> Self {
        Self { config: PipelineConfig::default() }
    }

    /// Set the source language code.
    pub fn source_lang(mut self, lang: impl Into<String>) -> Self {
        self.config.source_lang = lang.into();
        self
    }

    /// Set the ordered target languages.
    pub fn target_langs<I, S>(mut self, langs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.target_langs = langs.into_iter().map(Into::into).collect();
        self
    }

    /// Use a custom layout document.
    pub fn layout(mut self, layout: impl Into<String>) -> Self {
        self.config.layout = layout.into();
        self
    }

    pub fn build(self) -> PipelineConfig {
        self.config
    }
}

impl Default for PipelineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The immutable product of one preparation run.
///
/// Everything downstream (matrix fill, reconstruction) reads from this;
/// nothing writes back into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreparedDocument {
    /// Ordered, deduplicated translatable fragments.
    pub fragments: Vec<Fragment>,
    /// Document-level translatable metadata.
    pub meta: MetaFields,
    /// Layout-wrapped template with placeholders.
    pub template: String,
    /// Layout-wrapped original-language snapshot.
    pub original: String,
}

/// Run the preparation pipeline over an HTML document.
///
/// Stages: blank check, entity normalization, fragment extraction, metadata
/// extraction (with keyword fallback), placeholder templating, layout wrap.
///
/// # Errors
///
/// [`TraductoError::EmptyDocument`] for blank input,
/// [`TraductoError::UnresolvedFragment`] when templating cannot bind a
/// fragment, [`TraductoError::MissingContentSlot`] for a slotless layout.
pub fn prepare(html: &str, config: &PipelineConfig) -> Result<PreparedDocument> {
    if html.trim().is_empty() {
        return Err(TraductoError::EmptyDocument);
    }

    let normalized = decode_entities(html);

    let fragments = extract_fragments(&normalized)?;
    debug!(count = fragments.len(), "extracted fragments");

    let doc = Document::parse(&normalized)?;
    let meta = doc.extract_meta_fields();

    let documents = build_documents(&normalized, &fragments, &config.layout)?;

    Ok(PreparedDocument { fragments, meta, template: documents.template, original: documents.original })
}

/// Fetch a source page and run the preparation pipeline on it.
#[cfg(feature = "fetch")]
pub async fn fetch_and_prepare(
    url: &str,
    config: &PipelineConfig,
    fetch_config: &crate::fetch::FetchConfig,
) -> Result<PreparedDocument> {
    let html = crate::fetch::fetch_url(url, fetch_config).await?;
    prepare(&html, config)
}
