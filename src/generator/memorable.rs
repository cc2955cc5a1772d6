//! Word-based passphrases

use log::debug;
use zeroize::Zeroizing;

use super::{GeneratorConfig, log2};
use crate::error::{ForgeError, Result};
use crate::random::{CancelToken, OsRandom, RandomSource};
use crate::wordlist::Wordlist;
use crate::{MEMORABLE_MAX_WORDS, MEMORABLE_MIN_WORDS, MIN_WORDLIST_SIZE};

/// Default word separator
pub const DEFAULT_SEPARATOR: &str = "-";

/// Generates passphrases by drawing words uniformly, with replacement,
/// from an injected wordlist.
#[derive(Debug, Clone)]
pub struct MemorableGenerator {
    word_count: usize,
    separator: String,
    capitalize: bool,
    wordlist: Wordlist,
}

impl MemorableGenerator {
    /// Create a generator; an empty separator falls back to `-`
    pub fn new(word_count: usize, separator: &str, wordlist: Wordlist) -> Self {
        let separator = if separator.is_empty() { DEFAULT_SEPARATOR } else { separator };
        Self {
            word_count,
            separator: separator.to_string(),
            capitalize: false,
            wordlist,
        }
    }

    /// Build from a shared generator config
    pub fn from_config(config: &GeneratorConfig, wordlist: Wordlist) -> Self {
        Self::new(config.word_count, &config.separator, wordlist).with_capitalize(config.capitalize)
    }

    /// Upper-case the first letter of every word
    pub fn with_capitalize(mut self, capitalize: bool) -> Self {
        self.capitalize = capitalize;
        self
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn wordlist(&self) -> &Wordlist {
        &self.wordlist
    }

    /// Check word count bounds and wordlist size
    pub fn validate(&self) -> Result<()> {
        if self.word_count < MEMORABLE_MIN_WORDS {
            return Err(ForgeError::InvalidConfig("word count must be positive".to_string()));
        }
        if self.word_count > MEMORABLE_MAX_WORDS {
            return Err(ForgeError::InvalidConfig(format!(
                "word count too high (max {})",
                MEMORABLE_MAX_WORDS
            )));
        }
        if self.wordlist.is_empty() {
            return Err(ForgeError::InvalidConfig("wordlist cannot be empty".to_string()));
        }
        if self.wordlist.len() < MIN_WORDLIST_SIZE {
            return Err(ForgeError::InvalidConfig(format!(
                "wordlist too small for secure generation (min {} words)",
                MIN_WORDLIST_SIZE
            )));
        }
        Ok(())
    }

    /// `word_count * log2(wordlist size)`
    pub fn estimate_entropy(&self) -> f64 {
        self.word_count as f64 * log2(self.wordlist.len() as f64)
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        "Memorable Passphrase"
    }

    /// Generate using the OS random source
    pub fn generate(&self) -> Result<String> {
        self.generate_with(&OsRandom, &CancelToken::new())
    }

    /// Generate using `source`, checking `cancel` between draws
    pub fn generate_with(&self, source: &dyn RandomSource, cancel: &CancelToken) -> Result<String> {
        self.validate()?;

        // Reserve up front so growth never leaves an unzeroed copy behind.
        let longest = self.wordlist.iter().map(str::len).max().unwrap_or(0);
        let capacity = self.word_count * (longest * 2 + self.separator.len());
        let mut phrase = Zeroizing::new(String::with_capacity(capacity));
        for i in 0..self.word_count {
            cancel.check()?;
            let word = &self.wordlist[source.uniform(self.wordlist.len())?];
            if i > 0 {
                phrase.push_str(&self.separator);
            }
            if self.capitalize {
                push_capitalized(&mut phrase, word);
            } else {
                phrase.push_str(word);
            }
        }

        debug!("Generated passphrase with {} words", self.word_count);
        Ok(phrase.as_str().to_owned())
    }

    /// e.g. `words=4, separator=-`
    pub fn settings_summary(&self) -> String {
        let mut summary = format!("words={}, separator={}", self.word_count, self.separator);
        if self.capitalize {
            summary.push_str(", capitalized");
        }
        summary
    }
}

fn push_capitalized(out: &mut String, word: &str) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::testing::FailingSource;

    fn small_list(n: usize) -> Wordlist {
        Wordlist::from_words((0..n).map(|i| format!("word{}", i)))
    }

    #[test]
    fn test_four_words_scenario() {
        let generator = MemorableGenerator::new(4, "-", Wordlist::embedded());
        let phrase = generator.generate().unwrap();
        let parts: Vec<&str> = phrase.split('-').collect();
        assert_eq!(parts.len(), 4);
        let list = Wordlist::embedded();
        assert!(parts.iter().all(|p| list.iter().any(|w| w == *p)));
    }

    #[test]
    fn test_custom_separator() {
        let generator = MemorableGenerator::new(6, " ", small_list(100));
        let phrase = generator.generate().unwrap();
        assert_eq!(phrase.split(' ').count(), 6);
    }

    #[test]
    fn test_empty_separator_defaults() {
        let generator = MemorableGenerator::new(3, "", small_list(100));
        assert_eq!(generator.separator(), "-");
        assert_eq!(generator.generate().unwrap().split('-').count(), 3);
    }

    #[test]
    fn test_capitalize() {
        let generator = MemorableGenerator::new(5, ".", Wordlist::embedded()).with_capitalize(true);
        let phrase = generator.generate().unwrap();
        for word in phrase.split('.') {
            assert!(word.chars().next().unwrap().is_uppercase());
        }
    }

    #[test]
    fn test_wordlist_too_small() {
        let result = MemorableGenerator::new(4, "-", small_list(99)).generate();
        assert!(matches!(result, Err(ForgeError::InvalidConfig(_))));

        let result = MemorableGenerator::new(4, "-", Wordlist::from_words(Vec::<String>::new())).validate();
        assert!(matches!(result, Err(ForgeError::InvalidConfig(_))));
    }

    #[test]
    fn test_word_count_bounds() {
        assert!(MemorableGenerator::new(0, "-", small_list(100)).validate().is_err());
        assert!(MemorableGenerator::new(21, "-", small_list(100)).validate().is_err());
        assert!(MemorableGenerator::new(20, "-", small_list(100)).validate().is_ok());
        assert!(MemorableGenerator::new(1, "-", small_list(100)).validate().is_ok());
    }

    #[test]
    fn test_entropy() {
        let generator = MemorableGenerator::new(4, "-", small_list(128));
        assert!((generator.estimate_entropy() - 28.0).abs() < 1e-9);

        let e3 = MemorableGenerator::new(3, "-", small_list(1024)).estimate_entropy();
        let e6 = MemorableGenerator::new(6, "-", small_list(1024)).estimate_entropy();
        assert!((e6 - 2.0 * e3).abs() < 1e-9);
    }

    #[test]
    fn test_random_failure_propagates() {
        let generator = MemorableGenerator::new(4, "-", small_list(100));
        let result = generator.generate_with(&FailingSource, &CancelToken::new());
        assert!(matches!(result, Err(ForgeError::RandomnessFailure(_))));
    }

    #[test]
    fn test_cancelled() {
        let token = CancelToken::new();
        token.cancel();
        let generator = MemorableGenerator::new(4, "-", small_list(100));
        assert!(matches!(generator.generate_with(&OsRandom, &token), Err(ForgeError::Cancelled)));
    }

    #[test]
    fn test_wordlist_not_mutated() {
        let list = small_list(100);
        let before = list.words().to_vec();
        let generator = MemorableGenerator::new(20, "-", list.clone());
        generator.generate().unwrap();
        assert_eq!(list.words(), before.as_slice());
    }

    #[test]
    fn test_settings_summary() {
        let generator = MemorableGenerator::new(4, "_", small_list(100)).with_capitalize(true);
        assert_eq!(generator.settings_summary(), "words=4, separator=_, capitalized");
    }
}
