// Copyright (c) 2026 glyphfall contributors

use rand::{
    distr::{Distribution, Uniform},
    rngs::StdRng,
};

const LATIN: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

// Half-width katakana (single terminal cell wide, unlike U+30A0..).
const KATAKANA_FIRST: u32 = 0xFF66;
const KATAKANA_LAST: u32 = 0xFF9D;

/// The full rain alphabet: Latin letters and digits followed by the
/// katakana syllabary. Order is fixed so seeded runs are reproducible.
pub fn build_alphabet(ascii_only: bool) -> Vec<char> {
    let mut out: Vec<char> = LATIN.chars().collect();
    if !ascii_only {
        out.extend((KATAKANA_FIRST..=KATAKANA_LAST).filter_map(char::from_u32));
    }
    out
}

/// Uniform random glyph supplier over a sequence built once at construction.
pub struct GlyphSource {
    chars: Vec<char>,
    pick: Uniform<usize>,
}

impl GlyphSource {
    pub fn new(ascii_only: bool) -> Self {
        let chars = build_alphabet(ascii_only);
        let pick = Uniform::new(0, chars.len()).expect("valid range");
        Self { chars, pick }
    }

    pub fn next(&self, rng: &mut StdRng) -> char {
        self.chars[self.pick.sample(rng)]
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn alphabet_is_latin_digits_then_katakana() {
        let chars = build_alphabet(false);
        assert_eq!(chars.len(), 36 + 56);
        assert_eq!(chars[0], 'A');
        assert_eq!(chars[26], '0');
        assert_eq!(chars[36], char::from_u32(KATAKANA_FIRST).unwrap());
        assert_eq!(*chars.last().unwrap(), char::from_u32(KATAKANA_LAST).unwrap());
    }

    #[test]
    fn ascii_only_alphabet_has_no_katakana() {
        let chars = build_alphabet(true);
        assert_eq!(chars.len(), 36);
        assert!(chars.iter().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn next_only_yields_alphabet_glyphs() {
        let alphabet = build_alphabet(false);
        let source = GlyphSource::new(false);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            assert!(alphabet.contains(&source.next(&mut rng)));
        }
    }

    #[test]
    fn identical_seeds_yield_identical_glyph_sequences() {
        let source = GlyphSource::new(false);
        let mut a = StdRng::seed_from_u64(0xC0FFEE);
        let mut b = StdRng::seed_from_u64(0xC0FFEE);
        let seq_a: Vec<char> = (0..100).map(|_| source.next(&mut a)).collect();
        let seq_b: Vec<char> = (0..100).map(|_| source.next(&mut b)).collect();
        assert_eq!(seq_a, seq_b);
    }
}
