//! Animation resolution: whole-word clips with letter fallback.

use signa_types::{AnimationToken, DEFAULT_ASSET_EXTENSION};
use tracing::trace;

use crate::error::LookupError;
use crate::pipeline::assets::AssetLookup;

/// Output of [`AnimationResolver::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolved {
    /// Tokens in word order.
    pub tokens: Vec<AnimationToken>,
    /// Words that had a clip.
    pub clip_words: usize,
    /// Words decomposed into letters.
    pub spelled_words: usize,
}

/// Maps words to animation tokens through an [`AssetLookup`].
pub struct AnimationResolver<'a, L: ?Sized> {
    lookup: &'a L,
    extension: &'a str,
}

impl<'a, L: AssetLookup + ?Sized> AnimationResolver<'a, L> {
    /// Resolver using the default `mp4` extension.
    pub fn new(lookup: &'a L) -> Self {
        Self::with_extension(lookup, DEFAULT_ASSET_EXTENSION)
    }

    /// Resolver using `extension` (without the dot).
    pub fn with_extension(lookup: &'a L, extension: &'a str) -> Self {
        Self { lookup, extension }
    }

    /// Emits `Word(w)` when `w.<ext>` exists, otherwise one `Letter` per
    /// character of `w`.
    ///
    /// # Errors
    ///
    /// The first `LookupError` aborts resolution; no partial output is returned.
    pub fn resolve(&self, words: &[String]) -> Result<Resolved, LookupError> {
        let mut out = Resolved {
            tokens: Vec::with_capacity(words.len()),
            ..Resolved::default()
        };
        let mut name = String::new();

        for word in words {
            name.clear();
            name.push_str(word);
            name.push('.');
            name.push_str(self.extension);

            if self.lookup.exists(&name)? {
                out.tokens.push(AnimationToken::Word(word.clone()));
                out.clip_words += 1;
            } else {
                trace!(word = %word, "no clip, spelling");
                out.tokens.extend(word.chars().map(AnimationToken::Letter));
                out.spelled_words += 1;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::assets::MemoryAssets;
    use std::io;

    fn words(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| w.to_string()).collect()
    }

    fn render(tokens: &[AnimationToken]) -> Vec<String> {
        tokens.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn existing_word_is_one_token() {
        let assets = MemoryAssets::from_iter(["home.mp4"]);
        let out = AnimationResolver::new(&assets).resolve(&words(&["home"])).unwrap();
        assert_eq!(out.tokens, [AnimationToken::Word("home".into())]);
        assert_eq!((out.clip_words, out.spelled_words), (1, 0));
    }

    #[test]
    fn missing_word_is_spelled() {
        let assets = MemoryAssets::new();
        let out = AnimationResolver::new(&assets).resolve(&words(&["xyzzy"])).unwrap();
        assert_eq!(render(&out.tokens), ["x", "y", "z", "z", "y"]);
        assert!(out.tokens.iter().all(AnimationToken::is_letter));
        assert_eq!(out.spelled_words, 1);
    }

    #[test]
    fn mixed_sentence_keeps_order() {
        let assets = MemoryAssets::from_iter(["Will.mp4", "home.mp4"]);
        let out = AnimationResolver::new(&assets)
            .resolve(&words(&["Will", "go", "home"]))
            .unwrap();
        assert_eq!(render(&out.tokens), ["Will", "g", "o", "home"]);
    }

    #[test]
    fn custom_extension() {
        let assets = MemoryAssets::from_iter(["go.webm"]);
        let out = AnimationResolver::with_extension(&assets, "webm")
            .resolve(&words(&["go"]))
            .unwrap();
        assert_eq!(out.tokens, [AnimationToken::Word("go".into())]);
    }

    #[test]
    fn multibyte_letters() {
        let out = AnimationResolver::new(&MemoryAssets::new())
            .resolve(&words(&["café"]))
            .unwrap();
        assert_eq!(out.tokens.last(), Some(&AnimationToken::Letter('é')));
        assert_eq!(out.tokens.len(), 4);
    }

    #[test]
    fn empty_words() {
        let out = AnimationResolver::new(&MemoryAssets::new()).resolve(&[]).unwrap();
        assert!(out.tokens.is_empty());
    }

    struct Broken;

    impl AssetLookup for Broken {
        fn exists(&self, asset_name: &str) -> Result<bool, LookupError> {
            Err(LookupError::new(
                asset_name,
                io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            ))
        }
    }

    #[test]
    fn lookup_failure_aborts() {
        let err = AnimationResolver::new(&Broken)
            .resolve(&words(&["home", "go"]))
            .unwrap_err();
        assert_eq!(err.asset, "home.mp4");
    }
}
