//! Procedural system names built from a per-map digraph table.
//!
//! Every map draws its own table of consonant/vowel fragment pairs, so the
//! names within one subsector share a phonetic flavor.

use rand::Rng;

/// Marks a fragment that contributes nothing once the name is cleaned up.
const BLANK: &str = ".";

const CONSONANTS: [&str; 40] = [
    "b", "c", "d", "f", "g", "h", "j", "k", "l", "m",
    "n", "p", "q", "r", "s", "t", "v", "w", "x", "y",
    "z", BLANK, "sc", "ng", "ch", "gh", "ph", "rh", "sh", "th",
    "wh", "zh", "ck", "nk", "rk", "sk", "wk", "st", "tr", "br",
];

// Vowels repeat so a blank nucleus stays rare.
const VOWELS: [&str; 16] = [
    "a", "e", "i", "o", "u",
    "a", "e", "i", "o", "u",
    "a", "e", "i", "o", "u",
    BLANK,
];

/// Ordered consonant/vowel fragments; pairs start at even indices.
#[derive(Clone, Debug)]
pub struct DigraphTable {
    fragments: Vec<&'static str>,
}

impl DigraphTable {
    /// Draw a fresh table of 10-30 fragment pairs.
    pub fn build(rng: &mut impl Rng) -> Self {
        let pairs = rng.gen_range(10..=30);
        let mut fragments = Vec::with_capacity(pairs * 2);
        for _ in 0..pairs {
            fragments.push(CONSONANTS[rng.gen_range(0..CONSONANTS.len())]);
            fragments.push(VOWELS[rng.gen_range(0..VOWELS.len())]);
        }
        Self { fragments }
    }

    pub fn fragments(&self) -> &[&'static str] {
        &self.fragments
    }

    pub fn pair_count(&self) -> usize {
        self.fragments.len() / 2
    }

    /// Generate a capitalized pseudo-word from random pairs of the table.
    pub fn generate_name(&self, rng: &mut impl Rng) -> String {
        let target = rng.gen_range(3..6);
        let mut raw = String::new();
        // Length is checked before blanks are stripped, so every pass grows `raw`
        while raw.len() < target {
            let i = 2 * rng.gen_range(0..self.pair_count());
            raw.push_str(self.fragments[i]);
            raw.push_str(self.fragments[i + 1]);
        }
        capitalize(&raw.replace(BLANK, ""))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
