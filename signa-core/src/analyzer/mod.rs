//! Text analysis capabilities.
//!
//! This module provides the language-processing stages the pipeline runs on:
//! - **Normalizer**: Lowercases raw text
//! - **Tokenizer**: Splits a sentence into Penn Treebank style word tokens
//! - **Tagger**: Assigns each token a part-of-speech tag
//! - **Stopwords**: Per-language stopword sets
//! - **Lemmatizer**: Reduces inflected words to their base form
//! - **Resources**: Explicit bootstrap of the tables the above run on

pub mod lemmatizer;
pub mod lexicon;
pub mod normalizer;
pub mod resources;
pub mod stopwords;
pub mod tagger;
pub mod tokenizer;

pub use lemmatizer::{Lemmatizer, MorphyLemmatizer};
pub use lexicon::{ExceptionTable, Lexicon};
pub use normalizer::Normalizer;
pub use resources::{Capabilities, ResourceBundle, Resources};
pub use stopwords::{StopwordCatalog, StopwordSet, StopwordSource};
pub use tagger::{LexiconTagger, Tagger, Token};
pub use tokenizer::Tokenizer;
