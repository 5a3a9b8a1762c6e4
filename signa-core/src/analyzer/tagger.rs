//! Part-of-speech tagging.
//!
//! [`Tagger`] is the capability the pipeline consumes. [`LexiconTagger`] is the
//! built-in implementation: it tokenizes with [`Tokenizer`], assigns each word an
//! initial tag (lexicon, then shape and suffix heuristics), and then runs one
//! left-to-right pass of contextual rules that fix the common verb ambiguities
//! the tense classifier cares about (`will go`, `i eat`, `has gone`).

use std::sync::Arc;

use signa_types::{LemmaMode, PosTag};

use crate::analyzer::lexicon::Lexicon;
use crate::analyzer::tokenizer::Tokenizer;

const HAVE_FORMS: [&str; 5] = ["have", "has", "had", "having", "'ve"];
const BE_FORMS: [&str; 10] = [
    "be", "am", "is", "are", "was", "were", "been", "being", "'re", "'m",
];

/// A word with its part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The word as it appears in the normalized sentence.
    pub word: String,
    /// Its tag.
    pub tag: PosTag,
}

impl Token {
    /// Creates a token.
    pub fn new(word: impl Into<String>, tag: PosTag) -> Self {
        Self {
            word: word.into(),
            tag,
        }
    }
}

/// Splits text into words and tags each one.
pub trait Tagger {
    /// Tags `text`, returning tokens in sentence order.
    fn tag(&self, text: &str) -> Vec<Token>;
}

impl<T: Tagger + ?Sized> Tagger for Arc<T> {
    fn tag(&self, text: &str) -> Vec<Token> {
        (**self).tag(text)
    }
}

/// Lexicon-driven heuristic tagger emitting Penn Treebank tags.
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    tokenizer: Tokenizer,
    lexicon: Arc<Lexicon>,
}

impl LexiconTagger {
    /// Creates a tagger over a shared lexicon.
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            lexicon,
        }
    }

    /// Tags pre-split words.
    pub fn tag_words(&self, words: &[&str]) -> Vec<PosTag> {
        let mut tags: Vec<PosTag> = words.iter().map(|w| self.initial_tag(w)).collect();
        for i in 0..words.len() {
            tags[i] = self.contextual_tag(words, &tags, i);
        }
        tags
    }

    fn initial_tag(&self, word: &str) -> PosTag {
        if let Some(tag) = punctuation_tag(word) {
            return tag;
        }
        if is_number(word) {
            return PosTag::CD;
        }
        if let Some(tag) = self.lexicon.default_tag(word) {
            return tag;
        }
        self.suffix_tag(word)
    }

    fn suffix_tag(&self, word: &str) -> PosTag {
        let len = word.chars().count();

        if len > 4 && word.ends_with("ing") {
            return PosTag::VBG;
        }
        if len > 3 && word.ends_with("ed") {
            return PosTag::VBD;
        }
        if len > 3 && word.ends_with("ly") {
            return PosTag::RB;
        }
        if len > 4 && word.ends_with("est") {
            return PosTag::JJS;
        }
        const ADJECTIVE_SUFFIXES: [&str; 8] =
            ["ous", "ful", "able", "ible", "ive", "less", "ic", "al"];
        if len > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            return PosTag::JJ;
        }
        if len > 3 && word.ends_with('s') && !word.ends_with("ss") {
            return if self.has_stem(word, LemmaMode::Verb) {
                PosTag::VBZ
            } else {
                PosTag::NNS
            };
        }
        PosTag::NN
    }

    /// `eats` → `eat`, `watches` → `watch`, `studies` → `study`.
    fn has_stem(&self, word: &str, mode: LemmaMode) -> bool {
        let known = |stem: &str| self.lexicon.is_base_form(stem, mode);

        if let Some(stem) = word.strip_suffix("ies") {
            if known(&format!("{}y", stem)) {
                return true;
            }
        }
        if let Some(stem) = word.strip_suffix("es") {
            if known(stem) {
                return true;
            }
        }
        word.strip_suffix('s').is_some_and(known)
    }

    fn contextual_tag(&self, words: &[&str], tags: &[PosTag], i: usize) -> PosTag {
        let word = words[i];
        let tag = tags[i];
        let prev = previous_non_adverb(tags, i);
        let is_verb = self.lexicon.is_base_form(word, LemmaMode::Verb);

        // "the work", "my help"
        if matches!(tag, PosTag::VB | PosTag::VBP)
            && prev.is_some_and(|(_, p)| {
                matches!(
                    p,
                    PosTag::DT | PosTag::PRPS | PosTag::JJ | PosTag::JJR | PosTag::JJS | PosTag::CD
                )
            })
            && self.lexicon.has_tag(word, PosTag::NN)
        {
            return PosTag::NN;
        }

        // "will go", "to eat", "can't stop"
        if is_verb
            && tag != PosTag::MD
            && prev.is_some_and(|(_, p)| matches!(p, PosTag::MD | PosTag::TO))
        {
            return PosTag::VB;
        }

        // "i eat", "people like"
        if tag == PosTag::VB
            && prev.is_some_and(|(_, p)| {
                matches!(
                    p,
                    PosTag::PRP | PosTag::NN | PosTag::NNS | PosTag::NNP | PosTag::NNPS | PosTag::WP
                )
            })
        {
            return PosTag::VBP;
        }

        // "the plays", "three smiles"
        if tag == PosTag::VBZ
            && self.lexicon.default_tag(word).is_none()
            && prev.is_some_and(|(_, p)| {
                matches!(
                    p,
                    PosTag::DT | PosTag::PRPS | PosTag::JJ | PosTag::JJR | PosTag::JJS | PosTag::CD
                )
            })
            && self.has_stem(word, LemmaMode::Default)
        {
            return PosTag::NNS;
        }

        // "has gone", "was taken", "have walked"
        if tag == PosTag::VBD {
            let after_auxiliary = prev.is_some_and(|(j, _)| {
                HAVE_FORMS.contains(&words[j]) || BE_FORMS.contains(&words[j])
            });
            let has_participle =
                self.lexicon.has_tag(word, PosTag::VBN) || self.lexicon.default_tag(word).is_none();
            if after_auxiliary && has_participle {
                return PosTag::VBN;
            }
        }

        // "john's book"
        if word == "'s" {
            let after_noun = prev.is_some_and(|(_, p)| p.is_noun());
            let before_nominal = tags
                .get(i + 1)
                .is_some_and(|n| n.is_noun() || n.is_adjective());
            if after_noun && before_nominal {
                return PosTag::POS;
            }
            return PosTag::VBZ;
        }

        tag
    }
}

impl Tagger for LexiconTagger {
    fn tag(&self, text: &str) -> Vec<Token> {
        let words = self.tokenizer.words(text);
        let tags = self.tag_words(&words);
        words
            .into_iter()
            .zip(tags)
            .map(|(word, tag)| Token::new(word, tag))
            .collect()
    }
}

fn previous_non_adverb(tags: &[PosTag], i: usize) -> Option<(usize, PosTag)> {
    tags[..i]
        .iter()
        .enumerate()
        .rev()
        .find(|(_, t)| !matches!(t, PosTag::RB))
        .map(|(j, &t)| (j, t))
}

fn punctuation_tag(word: &str) -> Option<PosTag> {
    if word.is_empty() || !word.chars().all(|c| c.is_ascii_punctuation()) {
        return None;
    }
    let tag = match word {
        "." | "?" | "!" => PosTag::Period,
        "," => PosTag::Comma,
        ":" | ";" | "-" | "--" => PosTag::Colon,
        "(" | "[" | "{" => PosTag::LParen,
        ")" | "]" | "}" => PosTag::RParen,
        "`" | "``" => PosTag::OpeningQuote,
        "\"" | "'" | "''" => PosTag::ClosingQuote,
        "#" => PosTag::NumberSign,
        "$" => PosTag::Currency,
        w if w.bytes().all(|b| b == b'.') => PosTag::Colon,
        _ => PosTag::SYM,
    };
    Some(tag)
}

fn is_number(word: &str) -> bool {
    word.bytes().any(|b| b.is_ascii_digit())
        && word
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b',' | b'.'))
}
