//! Streaming Word Tokenizer Module
//!
//! This module splits a sentence into the word tokens the tagger expects. It's the
//! first stage after normalization, and it follows the Penn Treebank conventions the
//! tag-set was defined on: punctuation becomes its own token, and clitics are split
//! from the word they attach to.
//!
//! ## What It Does
//!
//! Given input like `"she doesn't like the rain, really."`, it emits:
//!
//! ```ignore
//! ("she", 0) ("does", 1) ("n't", 2) ("like", 3) ("the", 4)
//! ("rain", 5) (",", 6) ("really", 7) (".", 8)
//! ```
//!
//! ## Rules
//!
//! - Whitespace (any Unicode whitespace) separates chunks
//! - Opening brackets and quotes at the start of a chunk are split off one by one
//! - Closing punctuation at the end of a chunk is split off; a run of periods stays
//!   together as one token (`"..."`)
//! - `n't` is split from its host (`"can't"` → `"ca"`, `"n't"`)
//! - `'s`, `'ll`, `'re`, `'ve`, `'m` and `'d` are split from their host
//!
//! ## Zero Allocation
//!
//! Tokens are slices of the input passed to a callback, never copies.
//!
//! ```rust
//! use signa_core::analyzer::Tokenizer;
//!
//! let mut words = Vec::new();
//! Tokenizer::new().tokenize("he'll go home.", |word, _pos| words.push(word));
//! assert_eq!(words, ["he", "'ll", "go", "home", "."]);
//! ```

use memchr::memrchr;

const CLITICS: [&str; 6] = ["s", "ll", "re", "ve", "m", "d"];

#[inline(always)]
const fn is_opening(c: char) -> bool {
    matches!(c, '"' | '(' | '[' | '{' | '<' | '`')
}

#[inline(always)]
const fn is_closing(c: char) -> bool {
    matches!(
        c,
        '.' | ',' | '!' | '?' | ';' | ':' | ')' | ']' | '}' | '>' | '"' | '\''
    )
}

/// Streaming word tokenizer.
///
/// Stateless and `Copy`; one instance can tokenize any number of sentences.
#[derive(Debug, Default, Copy, Clone)]
pub struct Tokenizer;

impl Tokenizer {
    /// Creates a new tokenizer.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Tokenizes `text` and emits `(word, position)` for every token, left to right.
    ///
    /// Position is `u32`. After emitting a token at position `u32::MAX`,
    /// further emissions stop (overflow protection).
    pub fn tokenize<'n, F>(&self, text: &'n str, mut emit: F)
    where
        F: FnMut(&'n str, u32),
    {
        let mut pos = 0u32;
        let mut done = false;
        let mut push = |word: &'n str| {
            if done || word.is_empty() {
                return;
            }
            emit(word, pos);
            if pos == u32::MAX {
                done = true;
            } else {
                pos += 1;
            }
        };

        for chunk in text.split_whitespace() {
            let mut rest = chunk;

            while let Some(c) = rest.chars().next() {
                if !is_opening(c) {
                    break;
                }
                let (head, tail) = rest.split_at(c.len_utf8());
                push(head);
                rest = tail;
            }

            let core_len = rest.trim_end_matches(is_closing).len();
            let (core, tail) = rest.split_at(core_len);

            split_clitic(core, &mut push);
            split_punctuation(tail, &mut push);
        }
    }

    /// Collects all tokens of `text` into a vector.
    pub fn words<'n>(&self, text: &'n str) -> Vec<&'n str> {
        let mut out = Vec::new();
        self.tokenize(text, |word, _| out.push(word));
        out
    }
}

fn split_clitic<'n>(core: &'n str, push: &mut impl FnMut(&'n str)) {
    let bytes = core.as_bytes();

    if bytes.len() > 3 && bytes[bytes.len() - 3..].eq_ignore_ascii_case(b"n't") {
        let (head, tail) = core.split_at(core.len() - 3);
        push(head);
        push(tail);
        return;
    }

    if let Some(at) = memrchr(b'\'', bytes) {
        let suffix = &core[at + 1..];
        if at > 0 && CLITICS.iter().any(|c| c.eq_ignore_ascii_case(suffix)) {
            let (head, tail) = core.split_at(at);
            push(head);
            push(tail);
            return;
        }
    }

    push(core);
}

fn split_punctuation<'n>(tail: &'n str, push: &mut impl FnMut(&'n str)) {
    let mut start = 0usize;
    let mut chars = tail.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let mut end = i + c.len_utf8();
        if c == '.' {
            while let Some(&(j, '.')) = chars.peek() {
                end = j + 1;
                chars.next();
            }
        }
        push(&tail[start..end]);
        start = end;
    }
}
