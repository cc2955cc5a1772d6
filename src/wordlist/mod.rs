//! Wordlists for passphrase generation
//!
//! A [`Wordlist`] is immutable once built and cheap to clone; every clone
//! shares the same backing slice, so one loaded list can feed any number of
//! generators without copying or mutation.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Index;
use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::error::{ForgeError, Result};

/// Built-in list, one word per line
const EMBEDDED_WORDS: &str = include_str!("words.txt");

/// Shared, read-only list of words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wordlist {
    words: Arc<[String]>,
}

impl Wordlist {
    /// Build a list from arbitrary words.
    ///
    /// Words are trimmed; blanks and duplicates are dropped, first occurrence wins.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = std::collections::HashSet::new();
        let mut list = Vec::new();
        for word in words {
            let word = word.as_ref().trim();
            if !word.is_empty() && seen.insert(word.to_string()) {
                list.push(word.to_string());
            }
        }
        Self { words: list.into() }
    }

    /// The built-in list shipped with the crate
    pub fn embedded() -> Self {
        Self::from_words(EMBEDDED_WORDS.lines())
    }

    /// Parse a list from a reader.
    ///
    /// Accepts the EFF dice format (`11111<TAB>abacus`) as well as one word per
    /// line. Empty lines and lines starting with `#` are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut words = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(word) = parse_line(line) {
                words.push(word.to_string());
            }
        }

        let list = Self::from_words(words);
        if list.is_empty() {
            return Err(ForgeError::InvalidConfig("wordlist is empty or invalid".to_string()));
        }
        Ok(list)
    }

    /// Load a list from a local file
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let list = Self::from_reader(BufReader::new(file))?;
        debug!("Loaded wordlist with {} words from {}", list.len(), path.display());
        Ok(list)
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl Index<usize> for Wordlist {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.words[index]
    }
}

impl Default for Wordlist {
    fn default() -> Self {
        Self::embedded()
    }
}

/// Extract the word from a single non-comment line
fn parse_line(line: &str) -> Option<&str> {
    let mut fields = line.split_whitespace();
    let first = fields.next()?;
    if first.chars().all(|c| c.is_ascii_digit()) {
        // EFF format: dice roll, then the word
        fields.next()
    } else {
        Some(first)
    }
}
