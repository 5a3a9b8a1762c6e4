//! Pipeline types and options.

use signa_types::{
    AnimationToken, TenseCategory, TenseMarker, DEFAULT_ASSET_EXTENSION, MAX_INPUT_LENGTH,
};

use crate::analyzer::{Capabilities, Normalizer};
use crate::pipeline::assets::AssetLookup;
use crate::pipeline::stats::PipelineMetrics;
use crate::pipeline::tense::TenseScores;

/// Default stopword language.
pub const DEFAULT_LANGUAGE: &str = "english";

/// Per-pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Stopword language requested from the capabilities.
    pub language: String,
    /// Asset file extension, without the dot.
    pub extension: String,
    /// Maximum raw input size in bytes.
    pub max_input_length: usize,
    /// Reject input containing control characters other than whitespace.
    pub reject_control_chars: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            extension: DEFAULT_ASSET_EXTENSION.to_string(),
            max_input_length: MAX_INPUT_LENGTH,
            reject_control_chars: false,
        }
    }
}

/// Result of translating one sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Animation tokens in playback order.
    pub tokens: Vec<AnimationToken>,
    /// The normalized sentence.
    pub text: String,
    /// Dominant tense.
    pub tense: TenseCategory,
    /// Tag counts behind `tense`.
    pub scores: TenseScores,
    /// Marker prepended to the words, if any.
    pub marker: Option<TenseMarker>,
}

impl Translation {
    /// Clip names for every token, in playback order.
    pub fn clip_names(&self, extension: &str) -> Vec<String> {
        self.tokens.iter().map(|t| t.clip_name(extension)).collect()
    }
}

/// Sentence to animation-token pipeline.
///
/// Owns a reusable normalization buffer and counters, so processing takes
/// `&mut self`. Not meant to be shared across threads; build one per worker.
pub struct Pipeline<L> {
    pub(crate) capabilities: Capabilities,
    pub(crate) lookup: L,
    pub(crate) normalizer: Normalizer,
    pub(crate) options: PipelineOptions,
    pub(crate) norm_buf: String,
    pub(crate) metrics: PipelineMetrics,
}

impl<L: AssetLookup> Pipeline<L> {
    /// Creates a pipeline with default options.
    pub fn new(capabilities: Capabilities, lookup: L) -> Self {
        Self::with_options(capabilities, lookup, PipelineOptions::default())
    }

    /// Creates a pipeline with custom options.
    pub fn with_options(capabilities: Capabilities, lookup: L, options: PipelineOptions) -> Self {
        Self {
            capabilities,
            lookup,
            normalizer: Normalizer::new(),
            options,
            norm_buf: String::with_capacity(256),
            metrics: PipelineMetrics::default(),
        }
    }

    /// Current options.
    #[inline(always)]
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// The asset lookup.
    #[inline(always)]
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Counters since creation or the last reset.
    #[inline(always)]
    #[must_use]
    pub fn metrics(&self) -> PipelineMetrics {
        self.metrics
    }

    /// Zeroes the counters.
    pub fn reset_metrics(&mut self) {
        self.metrics = PipelineMetrics::default();
    }
}

impl<L> core::fmt::Debug for Pipeline<L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pipeline")
            .field("options", &self.options)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}
