//! Dictionary-validated lemmatizer.
//!
//! [`MorphyLemmatizer`] reduces a word to its base form the way WordNet's
//! morphological processor does:
//!
//! 1. If the word is an irregular inflection in the [`ExceptionTable`], its listed
//!    base forms are the candidates (plus the word itself if it is a base form).
//! 2. Otherwise suffix detachment rules for the word class are applied; only
//!    results that are known base forms in the [`Lexicon`] survive. If none do,
//!    the rules are applied again to the previous round's results.
//! 3. The shortest surviving candidate wins. With no candidate the word is
//!    returned unchanged.
//!
//! Unknown words therefore pass through untouched instead of being mangled by a
//! blind suffix stripper.

use std::borrow::Cow;
use std::sync::Arc;

use smallvec::SmallVec;

use signa_types::LemmaMode;

use crate::analyzer::lexicon::{ExceptionTable, Lexicon};

const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

const ADJECTIVE_RULES: &[(&str, &str)] = &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")];

type Forms = SmallVec<[String; 4]>;

/// Reduces a word to its base form given a grammatical hint.
pub trait Lemmatizer {
    /// Returns the lemma of `word`, borrowing it when unchanged.
    fn lemmatize<'w>(&self, word: &'w str, mode: LemmaMode) -> Cow<'w, str>;
}

/// WordNet-style lemmatizer backed by a lexicon and an exception table.
#[derive(Debug, Clone)]
pub struct MorphyLemmatizer {
    lexicon: Arc<Lexicon>,
    exceptions: Arc<ExceptionTable>,
}

impl MorphyLemmatizer {
    /// Creates a lemmatizer over shared resource tables.
    pub fn new(lexicon: Arc<Lexicon>, exceptions: Arc<ExceptionTable>) -> Self {
        Self {
            lexicon,
            exceptions,
        }
    }

    /// Adds base forms to the vocabulary, e.g. the names of available clips.
    ///
    /// Clones the shared lexicon on first use if other owners still hold it.
    pub fn extend_vocabulary<'a, I>(&mut self, words: I, mode: LemmaMode)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let lexicon = Arc::make_mut(&mut self.lexicon);
        for word in words {
            lexicon.add_base_form(word, mode);
        }
    }

    fn rules(mode: LemmaMode) -> &'static [(&'static str, &'static str)] {
        match mode {
            LemmaMode::Verb => VERB_RULES,
            LemmaMode::Adjective => ADJECTIVE_RULES,
            LemmaMode::Default => NOUN_RULES,
        }
    }

    fn apply_rules(forms: &[String], mode: LemmaMode) -> Forms {
        let mut out = Forms::new();
        for form in forms {
            for &(suffix, replacement) in Self::rules(mode) {
                if let Some(stem) = form.strip_suffix(suffix) {
                    let mut derived = String::with_capacity(stem.len() + replacement.len());
                    derived.push_str(stem);
                    derived.push_str(replacement);
                    out.push(derived);
                }
            }
        }
        out
    }

    fn keep_known(&self, forms: impl IntoIterator<Item = String>, mode: LemmaMode) -> Forms {
        let mut out = Forms::new();
        for form in forms {
            if !form.is_empty() && self.lexicon.is_base_form(&form, mode) && !out.contains(&form) {
                out.push(form);
            }
        }
        out
    }

    fn candidates(&self, word: &str, mode: LemmaMode) -> Forms {
        if let Some(bases) = self.exceptions.bases(word, mode) {
            let mut out = Forms::new();
            if self.lexicon.is_base_form(word, mode) {
                out.push(word.to_string());
            }
            for base in bases {
                if !out.contains(base) {
                    out.push(base.clone());
                }
            }
            return out;
        }

        let original = [word.to_string()];
        let mut forms = Self::apply_rules(&original, mode);
        let found = self.keep_known(original.iter().cloned().chain(forms.iter().cloned()), mode);
        if !found.is_empty() {
            return found;
        }

        while !forms.is_empty() {
            forms = Self::apply_rules(&forms, mode);
            let found = self.keep_known(forms.iter().cloned(), mode);
            if !found.is_empty() {
                return found;
            }
        }

        Forms::new()
    }
}

impl Lemmatizer for MorphyLemmatizer {
    fn lemmatize<'w>(&self, word: &'w str, mode: LemmaMode) -> Cow<'w, str> {
        let candidates = self.candidates(word, mode);

        // min_by_key keeps the first of equally short candidates
        match candidates.into_iter().min_by_key(|c| c.len()) {
            Some(lemma) if lemma != word => Cow::Owned(lemma),
            _ => Cow::Borrowed(word),
        }
    }
}

impl<T: Lemmatizer + ?Sized> Lemmatizer for Arc<T> {
    fn lemmatize<'w>(&self, word: &'w str, mode: LemmaMode) -> Cow<'w, str> {
        (**self).lemmatize(word, mode)
    }
}
