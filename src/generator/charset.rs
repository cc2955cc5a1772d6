//! Character classes and alphabet construction

use std::fmt;

use serde::{Deserialize, Serialize};

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
/// All 32 printable ASCII punctuation characters
pub const SYMBOLS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";
/// Characters that are easily confused with one another
pub const AMBIGUOUS: &str = "0O1lI";
/// Preset for the "exclude similar characters" option
pub const SIMILAR: &str = "il1Lo0O";

/// A class of characters a random password may draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    Lowercase,
    Uppercase,
    Digit,
    Symbol,
    Ambiguous,
}

impl CharacterClass {
    /// Every class, in canonical order
    pub const ALL: [CharacterClass; 5] = [
        CharacterClass::Lowercase,
        CharacterClass::Uppercase,
        CharacterClass::Digit,
        CharacterClass::Symbol,
        CharacterClass::Ambiguous,
    ];

    /// The fixed alphabet for this class
    pub fn alphabet(self) -> &'static str {
        match self {
            CharacterClass::Lowercase => LOWERCASE,
            CharacterClass::Uppercase => UPPERCASE,
            CharacterClass::Digit => DIGITS,
            CharacterClass::Symbol => SYMBOLS,
            CharacterClass::Ambiguous => AMBIGUOUS,
        }
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            CharacterClass::Lowercase => "lowercase",
            CharacterClass::Uppercase => "uppercase",
            CharacterClass::Digit => "numbers",
            CharacterClass::Symbol => "symbols",
            CharacterClass::Ambiguous => "ambiguous",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolves a set of character classes into concrete alphabets.
///
/// Classes are de-duplicated while keeping the caller's order. Excluded
/// characters are removed from both the per-class alphabets and the union.
#[derive(Debug, Clone, Default)]
pub struct CharacterSetBuilder {
    classes: Vec<CharacterClass>,
    exclude: Vec<char>,
}

impl CharacterSetBuilder {
    /// Create a builder for the given classes
    pub fn new(classes: &[CharacterClass]) -> Self {
        let mut unique = Vec::with_capacity(classes.len());
        for class in classes {
            if !unique.contains(class) {
                unique.push(*class);
            }
        }
        Self {
            classes: unique,
            exclude: Vec::new(),
        }
    }

    /// Add characters to the exclusion set
    pub fn exclude(mut self, chars: &str) -> Self {
        for ch in chars.chars() {
            if !self.exclude.contains(&ch) {
                self.exclude.push(ch);
            }
        }
        self
    }

    /// Exclude visually similar characters (`il1Lo0O`)
    pub fn exclude_similar(self) -> Self {
        self.exclude(SIMILAR)
    }

    /// The de-duplicated classes
    pub fn classes(&self) -> &[CharacterClass] {
        &self.classes
    }

    /// The exclusion set as a string
    pub fn excluded(&self) -> String {
        self.exclude.iter().collect()
    }

    fn filtered(&self, class: CharacterClass) -> Vec<u8> {
        class
            .alphabet()
            .bytes()
            .filter(|b| !self.exclude.contains(&(*b as char)))
            .collect()
    }

    /// One alphabet per class, skipping classes emptied by exclusions
    pub fn per_class(&self) -> Vec<(CharacterClass, Vec<u8>)> {
        self.classes
            .iter()
            .map(|class| (*class, self.filtered(*class)))
            .filter(|(_, alphabet)| !alphabet.is_empty())
            .collect()
    }

    /// Classes whose alphabet became empty after exclusions
    pub fn emptied_classes(&self) -> Vec<CharacterClass> {
        self.classes
            .iter()
            .copied()
            .filter(|class| self.filtered(*class).is_empty())
            .collect()
    }

    /// The union of all selected alphabets without duplicates
    pub fn union(&self) -> Vec<u8> {
        let mut seen = [false; 128];
        let mut result = Vec::new();
        for class in &self.classes {
            for b in self.filtered(*class) {
                if !seen[b as usize] {
                    seen[b as usize] = true;
                    result.push(b);
                }
            }
        }
        result
    }

    /// Size of the union alphabet
    pub fn size(&self) -> usize {
        self.union().len()
    }
}
