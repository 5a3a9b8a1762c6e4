//! Tense classification.

use core::fmt;

use signa_types::TenseCategory;

use crate::analyzer::Token;

/// Per-category tag counts for one sentence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TenseScores {
    /// `MD` tokens.
    pub future: u32,
    /// `VBP`, `VBZ` and `VBG` tokens.
    pub present: u32,
    /// `VBD` and `VBN` tokens.
    pub past: u32,
    /// `VBG` tokens.
    pub present_continuous: u32,
}

impl TenseScores {
    /// Counts tag categories over `tokens`.
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let mut scores = Self::default();
        for token in tokens {
            for &category in token.tag.tense_contributions() {
                *scores.get_mut(category) += 1;
            }
        }
        scores
    }

    /// Count for one category.
    #[inline]
    pub const fn get(&self, category: TenseCategory) -> u32 {
        match category {
            TenseCategory::Future => self.future,
            TenseCategory::Present => self.present,
            TenseCategory::Past => self.past,
            TenseCategory::PresentContinuous => self.present_continuous,
        }
    }

    #[inline]
    fn get_mut(&mut self, category: TenseCategory) -> &mut u32 {
        match category {
            TenseCategory::Future => &mut self.future,
            TenseCategory::Present => &mut self.present,
            TenseCategory::Past => &mut self.past,
            TenseCategory::PresentContinuous => &mut self.present_continuous,
        }
    }

    /// Category with the highest count; the first of [`TenseCategory::ALL`]
    /// reaching the maximum wins, so all-zero scores give `Future`.
    pub fn dominant(&self) -> TenseCategory {
        let mut best = TenseCategory::ALL[0];
        for category in TenseCategory::ALL {
            if self.get(category) > self.get(best) {
                best = category;
            }
        }
        best
    }
}

impl fmt::Display for TenseScores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "future={} present={} past={} present_continuous={}",
            self.future, self.present, self.past, self.present_continuous
        )
    }
}

/// Counts tags and picks the dominant tense.
pub fn classify(tokens: &[Token]) -> (TenseCategory, TenseScores) {
    let scores = TenseScores::from_tokens(tokens);
    (scores.dominant(), scores)
}
