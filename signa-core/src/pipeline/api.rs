//! Public API for translating sentences.

use signa_types::InputError;
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::pipeline::annotate::annotate;
use crate::pipeline::assets::AssetLookup;
use crate::pipeline::filter::filter_words;
use crate::pipeline::resolver::{AnimationResolver, Resolved};
use crate::pipeline::tense::classify;
use crate::pipeline::types::{Pipeline, Translation};

/// Checks if input contains invalid control characters (other than whitespace).
fn contains_invalid_controls(input: &str) -> bool {
    input
        .bytes()
        .any(|b| matches!(b, 0x00..=0x08 | 0x0B | 0x0C | 0x0E..=0x1F | 0x7F))
}

impl<L: AssetLookup> Pipeline<L> {
    /// Translates one sentence into animation tokens.
    ///
    /// # Errors
    ///
    /// Returns `Error::Input` if the text exceeds the configured maximum, or
    /// contains control characters while `reject_control_chars` is set.
    /// Returns `Error::CapabilityUnavailable` if the stopword language is not
    /// loaded, and `Error::Lookup` if an asset lookup fails. Nothing is
    /// returned for a failed request.
    #[inline(never)]
    pub fn process(&mut self, raw: &str) -> Result<Translation> {
        match self.run(raw) {
            Ok((translation, resolved)) => {
                self.metrics.sentences_processed += 1;
                self.metrics.tokens_emitted += translation.tokens.len() as u64;
                self.metrics.clip_words += resolved.clip_words as u64;
                self.metrics.spelled_words += resolved.spelled_words as u64;
                if translation.marker.is_some() {
                    self.metrics.markers_inserted += 1;
                }
                Ok(translation)
            }
            Err(e) => {
                self.metrics.failed_requests += 1;
                Err(e)
            }
        }
    }

    /// Translates an optional field, as read from a form or request body.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Missing` for `None`; otherwise as [`Pipeline::process`].
    pub fn process_field(&mut self, field: Option<&str>) -> Result<Translation> {
        match field {
            Some(raw) => self.process(raw),
            None => {
                self.metrics.failed_requests += 1;
                Err(InputError::Missing.into())
            }
        }
    }

    /// Translates several sentences, stopping at the first failure.
    pub fn process_batch(&mut self, sentences: &[&str]) -> Result<Vec<Translation>> {
        sentences.iter().map(|s| self.process(s)).collect()
    }

    fn run(&mut self, raw: &str) -> Result<(Translation, Resolved)> {
        let max_size = self.options.max_input_length;
        if raw.len() > max_size {
            return Err(InputError::TooLarge {
                size: raw.len(),
                max_size,
            }
            .into());
        }

        if self.options.reject_control_chars && contains_invalid_controls(raw) {
            return Err(InputError::InvalidInput {
                reason: "control characters (0x00-0x1F excluding whitespace) are not allowed",
            }
            .into());
        }

        let stopwords = self
            .capabilities
            .stopwords
            .stopwords(&self.options.language)
            .ok_or_else(|| {
                Error::CapabilityUnavailable(format!(
                    "stopwords for language {:?} are not loaded",
                    self.options.language
                ))
            })?;

        self.norm_buf.clear();
        self.normalizer.normalize_into(raw, &mut self.norm_buf);

        let tokens = self.capabilities.tagger.tag(&self.norm_buf);
        trace!(tokens = tokens.len(), "tagged");

        let (tense, scores) = classify(&tokens);
        trace!(%tense, %scores, "classified");

        let words = filter_words(&tokens, stopwords, self.capabilities.lemmatizer.as_ref());
        let (words, marker) = annotate(words, tense, &scores);
        trace!(?words, "annotated");

        let resolver = AnimationResolver::with_extension(&self.lookup, &self.options.extension);
        let mut resolved = resolver.resolve(&words).inspect_err(|e| {
            warn!(asset = %e.asset, error = %e.source, "asset lookup failed");
        })?;

        debug!(
            %tense,
            marker = marker.map(|m| m.as_str()),
            words = words.len(),
            tokens = resolved.tokens.len(),
            spelled = resolved.spelled_words,
            "sentence translated"
        );

        let translation = Translation {
            tokens: core::mem::take(&mut resolved.tokens),
            text: self.norm_buf.clone(),
            tense,
            scores,
            marker,
        };
        Ok((translation, resolved))
    }
}
