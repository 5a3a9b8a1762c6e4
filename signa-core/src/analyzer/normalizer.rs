use std::str;

#[rustfmt::skip]
const LOWERCASE_TABLE: [u8; 128] = [
    0x00,0x01,0x02,0x03,0x04,0x05,0x06,0x07,0x08,0x09,0x0a,0x0b,0x0c,0x0d,0x0e,0x0f,
    0x10,0x11,0x12,0x13,0x14,0x15,0x16,0x17,0x18,0x19,0x1a,0x1b,0x1c,0x1d,0x1e,0x1f,
    0x20,0x21,0x22,0x23,0x24,0x25,0x26,0x27,0x28,0x29,0x2a,0x2b,0x2c,0x2d,0x2e,0x2f,
    0x30,0x31,0x32,0x33,0x34,0x35,0x36,0x37,0x38,0x39,0x3a,0x3b,0x3c,0x3d,0x3e,0x3f,
    0x40,0x61,0x62,0x63,0x64,0x65,0x66,0x67,0x68,0x69,0x6a,0x6b,0x6c,0x6d,0x6e,0x6f,
    0x70,0x71,0x72,0x73,0x74,0x75,0x76,0x77,0x78,0x79,0x7a,0x5b,0x5c,0x5d,0x5e,0x5f,
    0x60,0x61,0x62,0x63,0x64,0x65,0x66,0x67,0x68,0x69,0x6a,0x6b,0x6c,0x6d,0x6e,0x6f,
    0x70,0x71,0x72,0x73,0x74,0x75,0x76,0x77,0x78,0x79,0x7a,0x7b,0x7c,0x7d,0x7e,0x7f,
];

/// Sentence normalizer.
///
/// Lowercases text and does nothing else: whitespace, punctuation and
/// diacritics pass through untouched so the tokenizer sees the sentence as
/// the user typed it.
///
/// # Performance
///
/// Pure-ASCII input goes through a byte lookup table. Anything else falls
/// back to [`str::to_lowercase`], which handles multi-char expansions and
/// the final-sigma rule.
///
/// # Examples
///
/// ```
/// use signa_core::analyzer::Normalizer;
///
/// let normalizer = Normalizer::new();
/// assert_eq!(normalizer.normalize("He Will GO home"), "he will go home");
/// assert_eq!(normalizer.normalize("ÉCOLE"), "école");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Normalizer;

impl Normalizer {
    /// Creates a new normalizer.
    pub const fn new() -> Self {
        Self
    }

    /// Normalizes text into an existing String buffer.
    ///
    /// Clears the buffer before writing and reuses its capacity.
    #[inline]
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();

        if !input.is_ascii() {
            out.push_str(&input.to_lowercase());
            return;
        }

        out.reserve(input.len());
        for &b in input.as_bytes() {
            out.push(LOWERCASE_TABLE[b as usize] as char);
        }
    }

    /// Normalizes text and returns a new String.
    #[inline]
    pub fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(input: &str) -> String {
        Normalizer::new().normalize(input)
    }

    #[test]
    fn ascii_basic_lowercase() {
        assert_eq!(norm("HELLO"), "hello");
        assert_eq!(norm("He Will Go Home"), "he will go home");
    }

    #[test]
    fn ascii_full_alphabet() {
        assert_eq!(
            norm("ABCDEFGHIJKLMNOPQRSTUVWXYZ"),
            "abcdefghijklmnopqrstuvwxyz"
        );
    }

    #[test]
    fn punctuation_and_whitespace_unchanged() {
        assert_eq!(norm("  Don't   STOP!\n"), "  don't   stop!\n");
        assert_eq!(norm("1,2;3"), "1,2;3");
    }

    #[test]
    fn empty_input() {
        assert_eq!(norm(""), "");
    }

    #[test]
    fn unicode_lowercase() {
        assert_eq!(norm("ÀÉÎÕÜ"), "àéîõü");
        assert_eq!(norm("Straße"), "straße");
    }

    #[test]
    fn final_sigma() {
        assert!(norm("ΟΔΟΣ").ends_with('\u{03C2}'));
    }

    #[test]
    fn expanding_lowercase_does_not_panic() {
        assert_eq!(norm("İ").chars().count(), 2);
    }

    #[test]
    fn normalize_into_reuses_capacity() {
        let normalizer = Normalizer::new();
        let mut buf = String::with_capacity(64);
        let cap = buf.capacity();

        normalizer.normalize_into("SHE WENT HOME", &mut buf);
        assert_eq!(buf, "she went home");
        assert_eq!(buf.capacity(), cap);

        normalizer.normalize_into("Hi", &mut buf);
        assert_eq!(buf, "hi");
    }

    #[test]
    fn idempotent() {
        let inputs = ["Hello World", "ÀB Çd", "MiXeD 123 ünïcödé", "", "ΣΊΣΥΦΟΣ"];
        for input in inputs {
            let once = norm(input);
            assert_eq!(norm(&once), once, "not idempotent for {:?}", input);
        }
    }
}
