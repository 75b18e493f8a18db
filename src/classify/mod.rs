//! LLM-backed importance rating of deduplicated articles.
//!
//! The network client lives behind [`CompletionBackend`]; this module owns
//! provider fallback, answer parsing and the two-stage screening and rating
//! flow. Provider state is an explicit [`ProviderRotation`] value threaded
//! through each call.

mod backend;
mod error;
mod pipeline;
mod response;
mod rotation;

pub use backend::{complete_with_fallback, CompletionBackend, RetryPolicy};
pub use error::{ClassifyError, CompletionError};
pub use pipeline::{
    classify_items, ClassificationOutcome, ClassifiedItem, ClassifyOptions, Tier,
    CRITICAL_THRESHOLD, FALLBACK_SCORE, MIN_DESCRIPTION_CHARS, NEEDS_REVIEW_KEYWORD,
    SCREENING_CUTOFF,
};
pub use response::{parse_score_response, ScoreResponse, MAX_KEYWORDS, MAX_SCORE, MIN_SCORE};
pub use rotation::{Provider, ProviderRotation, DEFAULT_PROVIDERS};
