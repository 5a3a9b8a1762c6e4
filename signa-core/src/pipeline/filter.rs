//! Lexical filter: stopword removal and tag-driven lemmatization.

use crate::analyzer::{Lemmatizer, StopwordSet, Token};

/// Drops stopwords and lemmatizes the remaining words, keeping sentence order.
///
/// The lemmatization mode comes from [`signa_types::PosTag::lemma_mode`]; tags
/// the table does not name use the default (noun) mode.
pub fn filter_words<L>(tokens: &[Token], stopwords: &StopwordSet, lemmatizer: &L) -> Vec<String>
where
    L: Lemmatizer + ?Sized,
{
    tokens
        .iter()
        .filter(|token| !stopwords.contains(&token.word))
        .map(|token| {
            lemmatizer
                .lemmatize(&token.word, token.tag.lemma_mode())
                .into_owned()
        })
        .collect()
}
