pub mod error;
pub mod extract;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod matrix;
pub mod metadata;
pub mod normalize;
pub mod parse;
pub mod pipeline;
pub mod reconstruct;
pub mod template;
pub mod translate;

pub use error::{Result, TraductoError};
pub use extract::{Fragment, Segment, extract_fragments, segment_html};
#[cfg(feature = "fetch")]
pub use fetch::{FetchConfig, fetch_file, fetch_stdin, fetch_url};
pub use matrix::TranslationMatrix;
pub use metadata::{META_DESCRIPTION, META_KEYWORDS, META_TITLE, MetaFields, derive_keywords};
pub use normalize::decode_entities;
pub use parse::Document;
pub use pipeline::{DEFAULT_LAYOUT, PipelineConfig, PipelineConfigBuilder, PreparedDocument, prepare};
#[cfg(feature = "fetch")]
pub use pipeline::fetch_and_prepare;
pub use reconstruct::{reconstruct, reconstruct_all, reconstruct_language};
pub use template::{CONTENT_SLOT, TemplateSet, apply_layout, build_documents, build_template, placeholder};
#[cfg(feature = "fetch")]
pub use translate::DeepLTranslator;
pub use translate::{PseudoTranslator, Translator, fill_matrix};
