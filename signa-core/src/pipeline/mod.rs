//! Sentence to animation-token pipeline.
//!
//! One request runs left to right through:
//! 1. **Normalize**: lowercase the raw text
//! 2. **Tag**: split into words and tag each one (capability)
//! 3. **Classify**: count tag categories and pick the dominant tense
//! 4. **Filter**: drop stopwords, lemmatize the rest by tag
//! 5. **Annotate**: prepend at most one tense marker
//! 6. **Resolve**: map words to clips, spelling out the ones without a clip
//!
//! Threading:
//! - [`Pipeline`] owns a reusable normalization buffer and counters and is
//!   driven through `&mut self`. Build one per thread.

mod annotate;
mod api;
pub mod assets;
mod filter;
mod resolver;
mod stats;
mod tense;
mod types;

pub use annotate::{annotate, select_marker};
pub use assets::{AssetLookup, CacheStats, CachedLookup, DirectoryAssets, MemoryAssets};
pub use filter::filter_words;
pub use resolver::{AnimationResolver, Resolved};
pub use stats::PipelineMetrics;
pub use tense::{classify, TenseScores};
pub use types::{Pipeline, PipelineOptions, Translation, DEFAULT_LANGUAGE};
