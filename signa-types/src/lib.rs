//! Core types shared across the Signa pipeline.
//!
//! This crate holds the value types that flow between the analyzer and the
//! pipeline stages. Keeping them separate ensures:
//!
//! - **No dependencies**: embedders can name tags and tokens without pulling
//!   in the analyzer's resource tables
//! - **One tag table**: every stage that branches on a part-of-speech tag goes
//!   through [`PosTag`], never through string comparisons
//! - **Clean boundaries**: the core crate depends on this one, never the reverse

#![warn(missing_docs)]

use core::fmt;

/// Default maximum accepted input length in bytes.
pub const MAX_INPUT_LENGTH: usize = 65535;

/// Default file extension of animation clips.
pub const DEFAULT_ASSET_EXTENSION: &str = "mp4";

/// Penn Treebank part-of-speech tag.
///
/// Tags the enum does not name parse to [`PosTag::Other`], which every table
/// below treats as "no special handling".
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `.`
    Period,
    /// `''`
    ClosingQuote,
    /// ``` `` ```
    OpeningQuote,
    /// `#`
    NumberSign,
    /// `$`
    Currency,
    /// Conjunction, coordinating
    CC,
    /// Cardinal number
    CD,
    /// Determiner
    DT,
    /// Existential there
    EX,
    /// Foreign word
    FW,
    /// Conjunction, subordinating or preposition
    IN,
    /// Adjective
    JJ,
    /// Adjective, comparative
    JJR,
    /// Adjective, superlative
    JJS,
    /// List marker
    LS,
    /// Modal
    MD,
    /// Noun, singular or mass
    NN,
    /// Noun, plural
    NNS,
    /// Noun, proper singular
    NNP,
    /// Noun, proper plural
    NNPS,
    /// Predeterminer
    PDT,
    /// Possessive ending
    POS,
    /// Pronoun, personal
    PRP,
    /// Pronoun, possessive (`PRP$`)
    PRPS,
    /// Adverb
    RB,
    /// Adverb, comparative
    RBR,
    /// Adverb, superlative
    RBS,
    /// Adverb, particle
    RP,
    /// Symbol
    SYM,
    /// Infinitival to
    TO,
    /// Interjection
    UH,
    /// Verb, base form
    VB,
    /// Verb, past tense
    VBD,
    /// Verb, gerund or present participle
    VBG,
    /// Verb, past participle
    VBN,
    /// Verb, non-3rd person singular present
    VBP,
    /// Verb, 3rd person singular present
    VBZ,
    /// Wh-determiner
    WDT,
    /// Wh-pronoun, personal
    WP,
    /// Wh-pronoun, possessive (`WP$`)
    WPS,
    /// Wh-adverb
    WRB,
    /// Any tag not listed above
    Other,
}

impl PosTag {
    /// Parses a Penn Treebank tag code. Unknown codes map to [`PosTag::Other`].
    pub fn parse(code: &str) -> Self {
        match code {
            "(" => PosTag::LParen,
            ")" => PosTag::RParen,
            "," => PosTag::Comma,
            ":" => PosTag::Colon,
            "." => PosTag::Period,
            "''" => PosTag::ClosingQuote,
            "``" => PosTag::OpeningQuote,
            "#" => PosTag::NumberSign,
            "$" => PosTag::Currency,
            "CC" => PosTag::CC,
            "CD" => PosTag::CD,
            "DT" => PosTag::DT,
            "EX" => PosTag::EX,
            "FW" => PosTag::FW,
            "IN" => PosTag::IN,
            "JJ" => PosTag::JJ,
            "JJR" => PosTag::JJR,
            "JJS" => PosTag::JJS,
            "LS" => PosTag::LS,
            "MD" => PosTag::MD,
            "NN" => PosTag::NN,
            "NNS" => PosTag::NNS,
            "NNP" => PosTag::NNP,
            "NNPS" => PosTag::NNPS,
            "PDT" => PosTag::PDT,
            "POS" => PosTag::POS,
            "PRP" => PosTag::PRP,
            "PRP$" => PosTag::PRPS,
            "RB" => PosTag::RB,
            "RBR" => PosTag::RBR,
            "RBS" => PosTag::RBS,
            "RP" => PosTag::RP,
            "SYM" => PosTag::SYM,
            "TO" => PosTag::TO,
            "UH" => PosTag::UH,
            "VB" => PosTag::VB,
            "VBD" => PosTag::VBD,
            "VBG" => PosTag::VBG,
            "VBN" => PosTag::VBN,
            "VBP" => PosTag::VBP,
            "VBZ" => PosTag::VBZ,
            "WDT" => PosTag::WDT,
            "WP" => PosTag::WP,
            "WP$" => PosTag::WPS,
            "WRB" => PosTag::WRB,
            _ => PosTag::Other,
        }
    }

    /// Returns the Penn Treebank code. [`PosTag::Other`] renders as `X`.
    pub const fn as_str(self) -> &'static str {
        match self {
            PosTag::LParen => "(",
            PosTag::RParen => ")",
            PosTag::Comma => ",",
            PosTag::Colon => ":",
            PosTag::Period => ".",
            PosTag::ClosingQuote => "''",
            PosTag::OpeningQuote => "``",
            PosTag::NumberSign => "#",
            PosTag::Currency => "$",
            PosTag::CC => "CC",
            PosTag::CD => "CD",
            PosTag::DT => "DT",
            PosTag::EX => "EX",
            PosTag::FW => "FW",
            PosTag::IN => "IN",
            PosTag::JJ => "JJ",
            PosTag::JJR => "JJR",
            PosTag::JJS => "JJS",
            PosTag::LS => "LS",
            PosTag::MD => "MD",
            PosTag::NN => "NN",
            PosTag::NNS => "NNS",
            PosTag::NNP => "NNP",
            PosTag::NNPS => "NNPS",
            PosTag::PDT => "PDT",
            PosTag::POS => "POS",
            PosTag::PRP => "PRP",
            PosTag::PRPS => "PRP$",
            PosTag::RB => "RB",
            PosTag::RBR => "RBR",
            PosTag::RBS => "RBS",
            PosTag::RP => "RP",
            PosTag::SYM => "SYM",
            PosTag::TO => "TO",
            PosTag::UH => "UH",
            PosTag::VB => "VB",
            PosTag::VBD => "VBD",
            PosTag::VBG => "VBG",
            PosTag::VBN => "VBN",
            PosTag::VBP => "VBP",
            PosTag::VBZ => "VBZ",
            PosTag::WDT => "WDT",
            PosTag::WP => "WP",
            PosTag::WPS => "WP$",
            PosTag::WRB => "WRB",
            PosTag::Other => "X",
        }
    }

    /// Lemmatization mode used by the lexical filter for this tag.
    ///
    /// `NN` maps to [`LemmaMode::Verb`] together with the inflected verb tags;
    /// base-form verbs (`VB`, `VBP`) and plural nouns use the default mode.
    #[inline]
    pub const fn lemma_mode(self) -> LemmaMode {
        match self {
            PosTag::VBG | PosTag::VBD | PosTag::VBZ | PosTag::VBN | PosTag::NN => LemmaMode::Verb,
            PosTag::JJ | PosTag::JJR | PosTag::JJS | PosTag::RBR | PosTag::RBS => {
                LemmaMode::Adjective
            }
            _ => LemmaMode::Default,
        }
    }

    /// Tense categories a token with this tag counts towards.
    ///
    /// `VBG` counts towards both present and present continuous.
    #[inline]
    pub const fn tense_contributions(self) -> &'static [TenseCategory] {
        match self {
            PosTag::MD => &[TenseCategory::Future],
            PosTag::VBP | PosTag::VBZ => &[TenseCategory::Present],
            PosTag::VBG => &[TenseCategory::Present, TenseCategory::PresentContinuous],
            PosTag::VBD | PosTag::VBN => &[TenseCategory::Past],
            _ => &[],
        }
    }

    /// Returns `true` for any noun tag.
    #[inline]
    pub const fn is_noun(self) -> bool {
        matches!(self, PosTag::NN | PosTag::NNS | PosTag::NNP | PosTag::NNPS)
    }

    /// Returns `true` for any adjective tag.
    #[inline]
    pub const fn is_adjective(self) -> bool {
        matches!(self, PosTag::JJ | PosTag::JJR | PosTag::JJS)
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grammatical hint handed to a lemmatizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LemmaMode {
    /// Treat the word as a verb.
    Verb,
    /// Treat the word as an adjective.
    Adjective,
    /// Default mode (noun).
    Default,
}

impl LemmaMode {
    /// Single-letter word class code (`v`, `a`, `n`) used by resource files.
    pub const fn class_code(self) -> char {
        match self {
            LemmaMode::Verb => 'v',
            LemmaMode::Adjective => 'a',
            LemmaMode::Default => 'n',
        }
    }

    /// Parses a class code from a resource file.
    pub fn from_class_code(code: &str) -> Option<Self> {
        match code {
            "v" => Some(LemmaMode::Verb),
            "a" => Some(LemmaMode::Adjective),
            "n" => Some(LemmaMode::Default),
            _ => None,
        }
    }
}

/// Tense category inferred for a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TenseCategory {
    /// Modal present (`will`, `shall`, ...).
    Future,
    /// Present-tense verb forms.
    Present,
    /// Past tense or past participle.
    Past,
    /// Gerund / present participle.
    PresentContinuous,
}

impl TenseCategory {
    /// All categories in tie-break order: the first one reaching the maximum
    /// count wins.
    pub const ALL: [TenseCategory; 4] = [
        TenseCategory::Future,
        TenseCategory::Present,
        TenseCategory::Past,
        TenseCategory::PresentContinuous,
    ];

    /// Returns the category name.
    pub const fn as_str(self) -> &'static str {
        match self {
            TenseCategory::Future => "future",
            TenseCategory::Present => "present",
            TenseCategory::Past => "past",
            TenseCategory::PresentContinuous => "present_continuous",
        }
    }
}

impl fmt::Display for TenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synthetic word prepended to a sentence to sign its tense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TenseMarker {
    /// Past tense.
    Before,
    /// Future tense.
    Will,
    /// Present continuous.
    Now,
}

impl TenseMarker {
    /// Returns the marker word exactly as it is inserted into the word list.
    pub const fn as_str(self) -> &'static str {
        match self {
            TenseMarker::Before => "Before",
            TenseMarker::Will => "Will",
            TenseMarker::Now => "Now",
        }
    }
}

impl fmt::Display for TenseMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final unit of pipeline output.
///
/// A word with an animation clip plays as one clip; a word without one is
/// finger-spelled, one [`AnimationToken::Letter`] per character.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnimationToken {
    /// A word whose clip exists.
    Word(String),
    /// A single character of a finger-spelled word.
    Letter(char),
}

impl AnimationToken {
    /// Returns `true` if this token is a finger-spelled letter.
    #[inline]
    pub const fn is_letter(&self) -> bool {
        matches!(self, AnimationToken::Letter(_))
    }

    /// Name of the clip that plays this token, e.g. `home.mp4`.
    pub fn clip_name(&self, extension: &str) -> String {
        format!("{}.{}", self, extension)
    }
}

impl fmt::Display for AnimationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimationToken::Word(word) => f.write_str(word),
            AnimationToken::Letter(c) => write!(f, "{}", c),
        }
    }
}

/// Errors raised when raw input is rejected before the pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// No text was supplied.
    Missing,
    /// Input exceeds the configured maximum size.
    TooLarge {
        /// The actual size of the input in bytes.
        size: usize,
        /// The maximum allowed size in bytes.
        max_size: usize,
    },
    /// Input contains characters the pipeline refuses.
    InvalidInput {
        /// Description of the invalid content.
        reason: &'static str,
    },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Missing => write!(f, "no input text supplied"),
            InputError::TooLarge { size, max_size } => {
                write!(
                    f,
                    "input too large: {} bytes (max: {} bytes)",
                    size, max_size
                )
            }
            InputError::InvalidInput { reason } => {
                write!(f, "input contains invalid text: {}", reason)
            }
        }
    }
}

impl core::error::Error for InputError {}
