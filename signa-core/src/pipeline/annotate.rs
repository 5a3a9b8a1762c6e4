//! Tense annotation: prepends at most one marker word.

use signa_types::{TenseCategory, TenseMarker};

use crate::pipeline::tense::TenseScores;

/// Picks the marker for a sentence, if any.
///
/// Rules are checked in order and the first match wins:
/// 1. dominant past with a past count → `Before`
/// 2. dominant future with a future count → `Will`, unless `Will` is already
///    one of the words
/// 3. dominant present with a present-continuous count → `Now`
pub fn select_marker(
    words: &[String],
    tense: TenseCategory,
    scores: &TenseScores,
) -> Option<TenseMarker> {
    match tense {
        TenseCategory::Past if scores.past >= 1 => Some(TenseMarker::Before),
        TenseCategory::Future if scores.future >= 1 => {
            let marker = TenseMarker::Will;
            (!words.iter().any(|w| w == marker.as_str())).then_some(marker)
        }
        TenseCategory::Present if scores.present_continuous >= 1 => Some(TenseMarker::Now),
        _ => None,
    }
}

/// Returns `words` with the selected marker prepended, and the marker.
pub fn annotate(
    mut words: Vec<String>,
    tense: TenseCategory,
    scores: &TenseScores,
) -> (Vec<String>, Option<TenseMarker>) {
    let marker = select_marker(&words, tense, scores);
    if let Some(marker) = marker {
        words.insert(0, marker.as_str().to_string());
    }
    (words, marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| w.to_string()).collect()
    }

    fn scores(future: u32, present: u32, past: u32, present_continuous: u32) -> TenseScores {
        TenseScores {
            future,
            present,
            past,
            present_continuous,
        }
    }

    #[test]
    fn past_prepends_before() {
        let (out, marker) = annotate(words(&["go", "home"]), TenseCategory::Past, &scores(0, 0, 1, 0));
        assert_eq!(out, ["Before", "go", "home"]);
        assert_eq!(marker, Some(TenseMarker::Before));
    }

    #[test]
    fn future_prepends_will() {
        let (out, marker) =
            annotate(words(&["go", "home"]), TenseCategory::Future, &scores(1, 0, 0, 0));
        assert_eq!(out, ["Will", "go", "home"]);
        assert_eq!(marker, Some(TenseMarker::Will));
    }

    #[test]
    fn will_not_duplicated() {
        let (out, marker) =
            annotate(words(&["go", "Will"]), TenseCategory::Future, &scores(1, 0, 0, 0));
        assert_eq!(out, ["go", "Will"]);
        assert_eq!(marker, None);
    }

    #[test]
    fn lowercase_will_does_not_block_marker() {
        let (out, _) = annotate(words(&["will"]), TenseCategory::Future, &scores(1, 0, 0, 0));
        assert_eq!(out, ["Will", "will"]);
    }

    #[test]
    fn continuous_prepends_now() {
        let (out, marker) =
            annotate(words(&["eat"]), TenseCategory::Present, &scores(0, 2, 0, 1));
        assert_eq!(out, ["Now", "eat"]);
        assert_eq!(marker, Some(TenseMarker::Now));
    }

    #[test]
    fn simple_present_has_no_marker() {
        let (out, marker) = annotate(words(&["eat"]), TenseCategory::Present, &scores(0, 1, 0, 0));
        assert_eq!(out, ["eat"]);
        assert_eq!(marker, None);
    }

    #[test]
    fn default_future_without_modal_has_no_marker() {
        let (out, marker) =
            annotate(words(&["home"]), TenseCategory::Future, &TenseScores::default());
        assert_eq!(out, ["home"]);
        assert_eq!(marker, None);
    }

    #[test]
    fn marker_on_empty_word_list() {
        let (out, _) = annotate(Vec::new(), TenseCategory::Past, &scores(0, 0, 2, 0));
        assert_eq!(out, ["Before"]);
    }

    #[test]
    fn present_continuous_dominant_has_no_marker() {
        let (out, marker) = annotate(
            words(&["eat"]),
            TenseCategory::PresentContinuous,
            &scores(0, 0, 0, 3),
        );
        assert_eq!(out, ["eat"]);
        assert_eq!(marker, None);
    }
}
