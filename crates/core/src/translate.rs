//! Translation providers and the matrix fill protocol.
//!
//! The [`Translator`] trait abstracts over machine-translation backends so
//! the fill protocol is not coupled to any provider. [`fill_matrix`] walks
//! the Cartesian product of rows and target languages and isolates failure
//! per cell: a provider error degrades that one cell to an empty value and
//! the batch continues.
//!
//! # Example
//!
//! ```no_run
//! use traducto_core::translate::{DeepLTranslator, Translator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = DeepLTranslator::from_env()?;
//!     let result = provider.translate("Hello, world!", "EN", "FR").await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use tracing::warn;

use crate::extract::Fragment;
use crate::matrix::TranslationMatrix;
use crate::metadata::MetaFields;
use crate::{Result, TraductoError};

/// Generic trait for translation providers.
///
/// Methods are async because real providers are network-bound; deterministic
/// implementations like [`PseudoTranslator`] simply resolve immediately.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate one string from the source to the target language.
    ///
    /// Language codes follow whatever convention the provider expects;
    /// the pipeline passes them through untouched.
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String>;
}

/// Fill a matrix by calling the provider once per (row, language) cell.
///
/// Fragment rows first, then meta rows. Meta rows whose source value is empty
/// are skipped entirely — empty strings are never sent to the provider. A
/// failed call is logged as a warning and leaves the cell empty; the fill
/// always completes.
pub async fn fill_matrix(
    matrix: &mut TranslationMatrix,
    fragments: &[Fragment],
    meta: &MetaFields,
    source_lang: &str,
    translator: &dyn Translator,
) {
    let languages: Vec<String> = matrix.languages().to_vec();

    for fragment in fragments {
        for lang in &languages {
            match translator.translate(&fragment.text, source_lang, lang).await {
                Ok(translated) => {
                    matrix.set(fragment.index, lang, translated);
                }
                Err(e) => {
                    warn!(
                        row = fragment.index,
                        lang = lang.as_str(),
                        error = %e,
                        "translation cell failed, leaving empty"
                    );
                }
            }
        }
    }

    for (key, value) in meta.entries() {
        if value.is_empty() {
            continue;
        }
        for lang in &languages {
            match translator.translate(value, source_lang, lang).await {
                Ok(translated) => {
                    matrix.set_meta(key, lang, translated);
                }
                Err(e) => {
                    warn!(row = key, lang = lang.as_str(), error = %e, "translation cell failed, leaving empty");
                }
            }
        }
    }
}

/// Deterministic offline provider for tests and dry runs.
///
/// Tags the input with the target language so output is distinguishable per
/// column without any network access.
#[derive(Debug, Clone, Default)]
pub struct PseudoTranslator;

#[async_trait]
impl Translator for PseudoTranslator {
    async fn translate(&self, text: &str, _source_lang: &str, target_lang: &str) -> Result<String> {
        if text.is_empty() {
            return Err(TraductoError::TranslationFailed("empty input".to_string()));
        }
        Ok(format!("[{}] {}", target_lang, text))
    }
}

/// DeepL REST API provider.
///
/// Loads the API key from the `DEEPL_API_KEY` environment variable (or takes
/// it explicitly). Only available with the `fetch` feature.
#[cfg(feature = "fetch")]
pub struct DeepLTranslator {
    api_key: String,
    client: reqwest::Client,
    base_url: String,
}

#[cfg(feature = "fetch")]
impl DeepLTranslator {
    /// Create a provider with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns [`TraductoError::TranslationFailed`] when the key is empty.
    pub fn new(api_key: String) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(TraductoError::TranslationFailed("API key cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self { api_key, client, base_url: "https://api-free.deepl.com/v2/translate".to_string() })
    }

    /// Create a provider from the `DEEPL_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("DEEPL_API_KEY")
            .map_err(|_| TraductoError::TranslationFailed("DEEPL_API_KEY environment variable not set".to_string()))?;

        Self::new(api_key)
    }

    /// Override the endpoint, e.g. for the paid-tier host or a test server.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[cfg(feature = "fetch")]
#[async_trait]
impl Translator for DeepLTranslator {
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Err(TraductoError::TranslationFailed("empty input".to_string()));
        }

        let body = serde_json::json!({
            "text": [text],
            "source_lang": source_lang.to_uppercase(),
            "target_lang": target_lang.to_uppercase(),
        });

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TraductoError::TranslationFailed(format!(
                "provider returned HTTP {}",
                response.status()
            )));
        }

        let payload: serde_json::Value = response.json().await?;
        payload
            .get("translations")
            .and_then(|t| t.get(0))
            .and_then(|t| t.get("text"))
            .and_then(|t| t.as_str())
            .map(|t| t.to_string())
            .ok_or_else(|| TraductoError::TranslationFailed("malformed provider response".to_string()))
    }
}
