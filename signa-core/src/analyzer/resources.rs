//! Resource bootstrap for the analyzer capabilities.
//!
//! Nothing is loaded implicitly. The startup layer calls
//! [`Resources::ensure_ready`] once; later calls return the cached bundle. Until
//! then [`Resources::capabilities`] fails with `CapabilityUnavailable`.
//!
//! Resources come from files embedded in the crate, or from an override
//! directory laid out as:
//!
//! ```text
//! <dir>/lexicon.tsv
//! <dir>/exceptions.tsv
//! <dir>/stopwords/<language>.txt
//! ```
//!
//! Each file present in the directory replaces its embedded counterpart; missing
//! files keep the embedded default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use smallvec::SmallVec;
use tracing::{debug, info};

use signa_types::LemmaMode;

use crate::analyzer::lemmatizer::{Lemmatizer, MorphyLemmatizer};
use crate::analyzer::lexicon::{ExceptionTable, Lexicon};
use crate::analyzer::stopwords::{StopwordCatalog, StopwordSet, StopwordSource};
use crate::analyzer::tagger::{LexiconTagger, Tagger};
use crate::error::{Error, Result};

const EMBEDDED_LEXICON: &str = include_str!("../../data/lexicon.tsv");
const EMBEDDED_EXCEPTIONS: &str = include_str!("../../data/exceptions.tsv");
const EMBEDDED_ENGLISH_STOPWORDS: &str = include_str!("../../data/stopwords/english.txt");

const LEXICON_FILE: &str = "lexicon.tsv";
const EXCEPTIONS_FILE: &str = "exceptions.tsv";
const STOPWORDS_DIR: &str = "stopwords";

/// Iterates the data lines of a resource file as `(line_number, fields)`.
///
/// Blank lines and `#` comments are skipped; fields are whitespace separated.
pub(crate) fn data_lines(source: &str) -> impl Iterator<Item = (usize, SmallVec<[&str; 3]>)> {
    source.lines().enumerate().filter_map(|(i, raw)| {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        Some((i + 1, line.split_whitespace().collect()))
    })
}

/// The three capabilities the pipeline runs on.
pub struct Capabilities {
    /// Tokenizer + tagger.
    pub tagger: Box<dyn Tagger>,
    /// Stopword lists.
    pub stopwords: Box<dyn StopwordSource>,
    /// Lemmatizer.
    pub lemmatizer: Box<dyn Lemmatizer>,
}

impl Capabilities {
    /// Bundles capability implementations.
    pub fn new(
        tagger: impl Tagger + 'static,
        stopwords: impl StopwordSource + 'static,
        lemmatizer: impl Lemmatizer + 'static,
    ) -> Self {
        Self {
            tagger: Box::new(tagger),
            stopwords: Box::new(stopwords),
            lemmatizer: Box::new(lemmatizer),
        }
    }
}

impl core::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Capabilities").finish_non_exhaustive()
    }
}

/// Parsed resource tables.
#[derive(Debug, Clone)]
pub struct ResourceBundle {
    /// Tagger lexicon and lemmatizer vocabulary.
    pub lexicon: Arc<Lexicon>,
    /// Irregular inflections.
    pub exceptions: Arc<ExceptionTable>,
    /// Stopword sets by language.
    pub stopwords: Arc<StopwordCatalog>,
}

impl ResourceBundle {
    /// Parses the resources embedded in the crate.
    ///
    /// # Errors
    ///
    /// Returns `Error::Resource` if an embedded file is malformed.
    pub fn embedded() -> Result<Self> {
        let mut stopwords = StopwordCatalog::new();
        stopwords.insert(
            "english",
            StopwordSet::parse(EMBEDDED_ENGLISH_STOPWORDS, "stopwords/english.txt")?,
        );
        Ok(Self {
            lexicon: Arc::new(Lexicon::parse(EMBEDDED_LEXICON, LEXICON_FILE)?),
            exceptions: Arc::new(ExceptionTable::parse(EMBEDDED_EXCEPTIONS, EXCEPTIONS_FILE)?),
            stopwords: Arc::new(stopwords),
        })
    }

    /// Loads resources from `dir`, falling back to embedded files for anything
    /// the directory does not provide.
    ///
    /// # Errors
    ///
    /// `CapabilityUnavailable` if `dir` is not a directory, `Io` if a file exists
    /// but cannot be read, `Resource` if a file is malformed.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::CapabilityUnavailable(format!(
                "resource directory {} does not exist",
                dir.display()
            )));
        }

        let mut bundle = Self::embedded()?;

        if let Some(source) = read_optional(&dir.join(LEXICON_FILE))? {
            bundle.lexicon = Arc::new(Lexicon::parse(&source, LEXICON_FILE)?);
            debug!(dir = %dir.display(), "lexicon overridden");
        }
        if let Some(source) = read_optional(&dir.join(EXCEPTIONS_FILE))? {
            bundle.exceptions = Arc::new(ExceptionTable::parse(&source, EXCEPTIONS_FILE)?);
            debug!(dir = %dir.display(), "exception table overridden");
        }

        let stop_dir = dir.join(STOPWORDS_DIR);
        if stop_dir.is_dir() {
            let catalog = Arc::make_mut(&mut bundle.stopwords);
            let entries = fs::read_dir(&stop_dir).map_err(|source| Error::Io {
                path: stop_dir.clone(),
                source,
            })?;
            for entry in entries {
                let path = entry
                    .map_err(|source| Error::Io {
                        path: stop_dir.clone(),
                        source,
                    })?
                    .path();
                if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                    continue;
                }
                let Some(language) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                let source = fs::read_to_string(&path).map_err(|source| Error::Io {
                    path: path.clone(),
                    source,
                })?;
                let file = format!("{}/{}.txt", STOPWORDS_DIR, language);
                catalog.insert(language, StopwordSet::parse(&source, &file)?);
                debug!(language, "stopwords loaded");
            }
        }

        Ok(bundle)
    }

    /// Builds the default capabilities over these tables.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities_with_vocabulary(core::iter::empty())
    }

    /// Builds capabilities whose lemmatizer also accepts `words` as base
    /// forms, typically the stems of the available clips.
    ///
    /// Only lowercase words of two or more characters that the lexicon does
    /// not know yet are added, in every word class. Letter and marker clips
    /// and the classes of known words are left alone. The tagger keeps the
    /// plain lexicon.
    pub fn capabilities_with_vocabulary<'a>(
        &self,
        words: impl IntoIterator<Item = &'a str>,
    ) -> Capabilities {
        let added: Vec<&str> = words
            .into_iter()
            .filter(|w| self.is_new_vocabulary(w))
            .collect();

        let mut lemmatizer = MorphyLemmatizer::new(self.lexicon.clone(), self.exceptions.clone());
        if !added.is_empty() {
            for mode in [LemmaMode::Default, LemmaMode::Verb, LemmaMode::Adjective] {
                lemmatizer.extend_vocabulary(added.iter().copied(), mode);
            }
            debug!(words = added.len(), "lemmatizer vocabulary extended");
        }

        Capabilities::new(
            LexiconTagger::new(self.lexicon.clone()),
            self.stopwords.clone(),
            lemmatizer,
        )
    }

    fn is_new_vocabulary(&self, word: &str) -> bool {
        word.chars().nth(1).is_some()
            && !word.chars().any(char::is_uppercase)
            && self.lexicon.default_tag(word).is_none()
            && [LemmaMode::Default, LemmaMode::Verb, LemmaMode::Adjective]
                .into_iter()
                .all(|mode| !self.lexicon.is_base_form(word, mode))
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(source) => Ok(Some(source)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Explicit, idempotent bootstrap of the analyzer resources.
#[derive(Debug, Default)]
pub struct Resources {
    dir: Option<PathBuf>,
    bundle: Option<ResourceBundle>,
}

impl Resources {
    /// Resources from the embedded files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resources from `dir`, with embedded fallbacks.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            bundle: None,
        }
    }

    /// Loads resources on first call; later calls return the cached bundle.
    ///
    /// A failed load leaves the resources not ready, so the call can be retried.
    pub fn ensure_ready(&mut self) -> Result<&ResourceBundle> {
        if self.bundle.is_none() {
            let bundle = match &self.dir {
                Some(dir) => ResourceBundle::load_dir(dir)?,
                None => ResourceBundle::embedded()?,
            };
            info!(
                lexicon = bundle.lexicon.len(),
                exceptions = bundle.exceptions.len(),
                languages = ?bundle.stopwords.languages(),
                "analyzer resources ready"
            );
            self.bundle = Some(bundle);
        }

        self.bundle
            .as_ref()
            .ok_or_else(|| Error::CapabilityUnavailable("resources not loaded".to_string()))
    }

    /// Returns `true` once [`Resources::ensure_ready`] has succeeded.
    pub fn is_ready(&self) -> bool {
        self.bundle.is_some()
    }

    /// The loaded bundle, if ready.
    pub fn bundle(&self) -> Option<&ResourceBundle> {
        self.bundle.as_ref()
    }

    /// Builds the default capabilities.
    ///
    /// # Errors
    ///
    /// `CapabilityUnavailable` if [`Resources::ensure_ready`] has not succeeded.
    pub fn capabilities(&self) -> Result<Capabilities> {
        self.ready_bundle().map(ResourceBundle::capabilities)
    }

    /// Builds capabilities with `words` added to the lemmatizer vocabulary.
    /// See [`ResourceBundle::capabilities_with_vocabulary`].
    ///
    /// # Errors
    ///
    /// `CapabilityUnavailable` if [`Resources::ensure_ready`] has not succeeded.
    pub fn capabilities_with_vocabulary<'a>(
        &self,
        words: impl IntoIterator<Item = &'a str>,
    ) -> Result<Capabilities> {
        self.ready_bundle()
            .map(|bundle| bundle.capabilities_with_vocabulary(words))
    }

    fn ready_bundle(&self) -> Result<&ResourceBundle> {
        self.bundle().ok_or_else(|| {
            Error::CapabilityUnavailable(
                "analyzer resources not initialized; call ensure_ready() at startup".to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signa_types::PosTag;

    #[test]
    fn embedded_resources_parse() {
        let bundle = ResourceBundle::embedded().expect("embedded resources parse");
        assert!(bundle.lexicon.len() > 300);
        assert!(!bundle.exceptions.is_empty());
        let english = bundle.stopwords.stopwords("english").expect("english loaded");
        assert_eq!(english.len(), 179);
        assert!(english.contains("he"));
        assert!(english.contains("will"));
        assert!(!english.contains("n't"));
    }

    #[test]
    fn data_lines_skip_comments_and_blanks() {
        let lines: Vec<_> = data_lines("# head\n\n  go\tVB  \n#x\nhome NN\n").collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0, 3);
        assert_eq!(lines[0].1.as_slice(), ["go", "VB"]);
        assert_eq!(lines[1].0, 5);
    }

    #[test]
    fn capabilities_require_bootstrap() {
        let resources = Resources::new();
        assert!(!resources.is_ready());
        assert!(matches!(
            resources.capabilities(),
            Err(Error::CapabilityUnavailable(_))
        ));
    }

    #[test]
    fn ensure_ready_is_idempotent() {
        let mut resources = Resources::new();
        let first = resources.ensure_ready().expect("ready").lexicon.clone();
        let second = resources.ensure_ready().expect("ready").lexicon.clone();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(resources.is_ready());
        assert!(resources.capabilities().is_ok());
    }

    #[test]
    fn clip_stems_extend_lemmatizer_only() {
        let bundle = ResourceBundle::embedded().expect("embedded resources parse");
        assert!(bundle.lexicon.default_tag("wombat").is_none());

        let plain = bundle.capabilities();
        assert_eq!(plain.lemmatizer.lemmatize("wombats", LemmaMode::Default), "wombats");

        let caps = bundle.capabilities_with_vocabulary(["wombat", "zorb", "Before", "x"]);
        assert_eq!(caps.lemmatizer.lemmatize("wombats", LemmaMode::Default), "wombat");
        assert_eq!(caps.lemmatizer.lemmatize("zorbing", LemmaMode::Verb), "zorb");
        // single letters and capitalized marker clips are not vocabulary
        assert_eq!(caps.lemmatizer.lemmatize("xs", LemmaMode::Default), "xs");
        assert_eq!(caps.lemmatizer.lemmatize("befores", LemmaMode::Default), "befores");

        // the tagger lexicon stays untouched
        assert!(caps.tagger.tag("wombat").iter().all(|t| t.tag == PosTag::NN));
        assert!(!bundle.lexicon.is_base_form("wombat", LemmaMode::Default));
    }

    #[test]
    fn known_words_keep_their_class() {
        let bundle = ResourceBundle::embedded().expect("embedded resources parse");
        // "go" is only a verb; a clip named after it must not make "gos" a plural
        let caps = bundle.capabilities_with_vocabulary(["go"]);
        assert_eq!(caps.lemmatizer.lemmatize("gos", LemmaMode::Default), "gos");
    }

    #[test]
    fn vocabulary_requires_bootstrap() {
        let mut resources = Resources::new();
        assert!(resources.bundle().is_none());
        assert!(matches!(
            resources.capabilities_with_vocabulary(["wombat"]),
            Err(Error::CapabilityUnavailable(_))
        ));
        resources.ensure_ready().expect("ready");
        assert!(resources.bundle().is_some());
        let caps = resources.capabilities_with_vocabulary(["wombat"]).expect("ready");
        assert_eq!(caps.lemmatizer.lemmatize("wombats", LemmaMode::Default), "wombat");
    }

    #[test]
    fn missing_dir_is_unavailable() {
        let mut resources = Resources::with_dir("/nonexistent/signa/resources");
        assert!(matches!(
            resources.ensure_ready(),
            Err(Error::CapabilityUnavailable(_))
        ));
        assert!(!resources.is_ready());
    }

    #[test]
    fn dir_overrides_and_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(LEXICON_FILE), "zorb\tVB\n").unwrap();
        fs::create_dir(dir.path().join(STOPWORDS_DIR)).unwrap();
        fs::write(dir.path().join("stopwords/pirate.txt"), "arr\nye\n").unwrap();

        let bundle = ResourceBundle::load_dir(dir.path()).expect("loads");
        assert_eq!(bundle.lexicon.len(), 1);
        assert!(bundle.lexicon.is_base_form("zorb", LemmaMode::Verb));
        // exceptions were not overridden
        assert!(!bundle.exceptions.is_empty());
        assert!(bundle.stopwords.stopwords("pirate").is_some_and(|s| s.contains("arr")));
        assert!(bundle.stopwords.stopwords("english").is_some());
    }

    #[test]
    fn malformed_override_reports_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(EXCEPTIONS_FILE), "v\twent\n").unwrap();

        match ResourceBundle::load_dir(dir.path()) {
            Err(Error::Resource { file, line, .. }) => {
                assert_eq!(file, EXCEPTIONS_FILE);
                assert_eq!(line, 1);
            }
            other => panic!("Expected Resource error, got {:?}", other),
        }
    }
}
