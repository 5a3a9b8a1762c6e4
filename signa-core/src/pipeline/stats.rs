//! Operational counters.

/// Counters accumulated by a [`Pipeline`](crate::pipeline::Pipeline).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineMetrics {
    /// Sentences translated successfully.
    pub sentences_processed: u64,
    /// Animation tokens emitted.
    pub tokens_emitted: u64,
    /// Words that played as a single clip.
    pub clip_words: u64,
    /// Words finger-spelled letter by letter.
    pub spelled_words: u64,
    /// Tense markers prepended.
    pub markers_inserted: u64,
    /// Requests rejected or aborted.
    pub failed_requests: u64,
}

impl PipelineMetrics {
    /// Share of words that had a clip, in `0.0..=1.0`; `None` before any word.
    pub fn clip_ratio(&self) -> Option<f64> {
        let words = self.clip_words + self.spelled_words;
        (words > 0).then(|| self.clip_words as f64 / words as f64)
    }
}

impl core::fmt::Display for PipelineMetrics {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} sentences, {} tokens, {} clips, {} spelled, {} markers",
            self.sentences_processed,
            self.tokens_emitted,
            self.clip_words,
            self.spelled_words,
            self.markers_inserted
        )?;

        if self.failed_requests > 0 {
            write!(f, ", {} failed", self.failed_requests)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_ratio() {
        assert_eq!(PipelineMetrics::default().clip_ratio(), None);
        let m = PipelineMetrics {
            clip_words: 3,
            spelled_words: 1,
            ..Default::default()
        };
        assert_eq!(m.clip_ratio(), Some(0.75));
    }

    #[test]
    fn display_mentions_failures_only_when_present() {
        let mut m = PipelineMetrics {
            sentences_processed: 2,
            tokens_emitted: 7,
            ..Default::default()
        };
        assert_eq!(
            m.to_string(),
            "2 sentences, 7 tokens, 0 clips, 0 spelled, 0 markers"
        );
        m.failed_requests = 1;
        assert!(m.to_string().ends_with(", 1 failed"));
    }
}
