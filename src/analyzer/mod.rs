//! Password strength analysis
//!
//! [`SecurityAnalyzer::analyze`] is total: it accepts any string, including
//! the empty string and non-ASCII input, and always returns a
//! [`SecurityAnalysis`] with a non-negative entropy.
//!
//! The entropy here is an estimate over the concrete string (charset size
//! capped by the distinct characters present, then penalised for repetition
//! and patterns). It is deliberately independent from the generators'
//! `estimate_entropy`, which describes the configuration instead.

pub mod crack_time;
mod lists;
pub mod patterns;

pub use lists::{COMMON_PASSWORDS, COMMON_WORDS};

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::generator::charset::AMBIGUOUS;
use patterns::{has_common_substitutions, has_keyboard_pattern, has_repeated_pattern, has_sequential_chars};

/// Decimal digits (Unicode `Nd`)
static DECIMAL_DIGIT: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\p{Nd}").ok());

/// Punctuation or symbols (Unicode `P` and `S`)
static PUNCT_OR_SYMBOL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[\p{P}\p{S}]").ok());

/// Minimum length recommended in feedback
pub const RECOMMENDED_LENGTH: usize = 12;

/// Passwords shorter than this are downgraded one tier
pub const SHORT_PASSWORD_LENGTH: usize = 8;

/// Theoretical class sizes used for the charset estimate
const LOWER_SIZE: usize = 26;
const UPPER_SIZE: usize = 26;
const DIGIT_SIZE: usize = 10;
const SYMBOL_SIZE: usize = 32;

/// Ordered strength tiers, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StrengthLevel {
    VeryWeak,
    Weak,
    Fair,
    Good,
    Strong,
    VeryStrong,
}

impl StrengthLevel {
    /// Tier for an entropy value in bits
    pub fn from_entropy(entropy: f64) -> Self {
        if entropy >= 80.0 {
            StrengthLevel::VeryStrong
        } else if entropy >= 60.0 {
            StrengthLevel::Strong
        } else if entropy >= 45.0 {
            StrengthLevel::Good
        } else if entropy >= 30.0 {
            StrengthLevel::Fair
        } else if entropy >= 20.0 {
            StrengthLevel::Weak
        } else {
            StrengthLevel::VeryWeak
        }
    }

    /// One tier lower, never below `VeryWeak`
    pub fn downgrade(self) -> Self {
        match self {
            StrengthLevel::VeryWeak | StrengthLevel::Weak => StrengthLevel::VeryWeak,
            StrengthLevel::Fair => StrengthLevel::Weak,
            StrengthLevel::Good => StrengthLevel::Fair,
            StrengthLevel::Strong => StrengthLevel::Good,
            StrengthLevel::VeryStrong => StrengthLevel::Strong,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StrengthLevel::VeryWeak => "Very Weak",
            StrengthLevel::Weak => "Weak",
            StrengthLevel::Fair => "Fair",
            StrengthLevel::Good => "Good",
            StrengthLevel::Strong => "Strong",
            StrengthLevel::VeryStrong => "Very Strong",
        }
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of analysing one password. Transient; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityAnalysis {
    pub entropy: f64,
    pub level: StrengthLevel,
    pub crack_time: String,
    pub charset_size: usize,
    pub has_lowercase: bool,
    pub has_uppercase: bool,
    pub has_digits: bool,
    pub has_symbols: bool,
    pub has_ambiguous: bool,
    pub common_words: Vec<String>,
    pub is_compromised: bool,
    pub feedback: Vec<String>,
}

/// Which weak patterns were found
#[derive(Debug, Clone, Copy, Default)]
struct PatternFlags {
    sequential: bool,
    keyboard: bool,
    substitutions: bool,
    repeated: bool,
}

impl PatternFlags {
    fn detect(password: &str, lower: &str) -> Self {
        let lower_chars: Vec<char> = lower.chars().collect();
        Self {
            sequential: has_sequential_chars(&lower_chars),
            keyboard: has_keyboard_pattern(lower),
            substitutions: has_common_substitutions(password),
            repeated: has_repeated_pattern(&lower_chars),
        }
    }

    /// Multiplicative penalty; each pattern reduces it independently
    fn penalty(self) -> f64 {
        let mut penalty = 1.0;
        if self.sequential {
            penalty *= 0.7;
        }
        if self.keyboard {
            penalty *= 0.6;
        }
        if self.substitutions {
            penalty *= 0.8;
        }
        if self.repeated {
            penalty *= 0.5;
        }
        penalty
    }
}

/// Scores passwords against entropy, pattern and breach heuristics
#[derive(Debug, Clone)]
pub struct SecurityAnalyzer {
    common_passwords: HashSet<String>,
    common_words: Vec<String>,
}

impl Default for SecurityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SecurityAnalyzer {
    /// Analyzer with the built-in lists
    pub fn new() -> Self {
        Self {
            common_passwords: COMMON_PASSWORDS.iter().map(|p| p.to_lowercase()).collect(),
            common_words: COMMON_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Add more known-compromised passwords
    pub fn with_common_passwords<I, S>(mut self, passwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.common_passwords
            .extend(passwords.into_iter().map(|p| p.as_ref().to_lowercase()));
        self
    }

    /// Add more dictionary words to flag
    pub fn with_common_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let word = word.as_ref().to_lowercase();
            if !self.common_words.contains(&word) {
                self.common_words.push(word);
            }
        }
        self
    }

    /// Analyse a password. Never fails.
    ///
    /// # Arguments
    ///
    /// * `password` - Any string, including empty and non-ASCII input
    ///
    /// # Returns
    ///
    /// Entropy estimate, strength tier, crack-time bucket, the character
    /// classes present, embedded dictionary words, the breach-list verdict
    /// and ordered feedback.
    pub fn analyze(&self, password: &str) -> SecurityAnalysis {
        let lower = password.to_lowercase();
        let length = password.chars().count();

        let has_lowercase = password.chars().any(char::is_lowercase);
        let has_uppercase = password.chars().any(char::is_uppercase);
        let has_digits = has_decimal_digit(password);
        let has_symbols = has_punct_or_symbol(password);
        let has_ambiguous = password.chars().any(|c| AMBIGUOUS.contains(c));

        let charset_size = charset_size(password, has_lowercase, has_uppercase, has_digits, has_symbols);
        let patterns = PatternFlags::detect(password, &lower);
        let entropy = entropy(password, length, charset_size, patterns);

        let is_compromised = self.is_compromised(password);
        let level = classify(entropy, length, is_compromised);

        let mut analysis = SecurityAnalysis {
            entropy,
            level,
            crack_time: crack_time::estimate(entropy),
            charset_size,
            has_lowercase,
            has_uppercase,
            has_digits,
            has_symbols,
            has_ambiguous,
            common_words: self.find_common_words(&lower),
            is_compromised,
            feedback: Vec::new(),
        };
        analysis.feedback = feedback(length, &analysis, patterns);
        analysis
    }

    /// Case-insensitive exact match against the breach list
    pub fn is_compromised(&self, password: &str) -> bool {
        self.common_passwords.contains(&password.to_lowercase())
    }

    fn find_common_words(&self, lower: &str) -> Vec<String> {
        self.common_words
            .iter()
            .filter(|w| w.chars().count() >= 3 && lower.contains(w.as_str()))
            .cloned()
            .collect()
    }
}

/// Analyse with the default analyzer
pub fn analyze_password(password: &str) -> SecurityAnalysis {
    SecurityAnalyzer::new().analyze(password)
}

/// Check a password against a simple policy and list the violations
pub fn validate_password_strength(password: &str, min_length: usize, require_mixed: bool) -> Vec<String> {
    let mut issues = Vec::new();

    if password.chars().count() < min_length {
        issues.push(format!("Password must be at least {} characters long", min_length));
    }

    if require_mixed {
        let analysis = analyze_password(password);
        if !analysis.has_lowercase {
            issues.push("Password must contain lowercase letters".to_string());
        }
        if !analysis.has_uppercase {
            issues.push("Password must contain uppercase letters".to_string());
        }
        if !analysis.has_digits {
            issues.push("Password must contain numbers".to_string());
        }
        if !analysis.has_symbols {
            issues.push("Password must contain symbols".to_string());
        }
    }

    issues
}

/// Entropy tier, one tier lower for short passwords above `Weak`,
/// forced to `VeryWeak` when compromised
fn classify(entropy: f64, length: usize, compromised: bool) -> StrengthLevel {
    if compromised {
        return StrengthLevel::VeryWeak;
    }
    let level = StrengthLevel::from_entropy(entropy);
    if length < SHORT_PASSWORD_LENGTH && level > StrengthLevel::Weak {
        level.downgrade()
    } else {
        level
    }
}

fn has_decimal_digit(password: &str) -> bool {
    match DECIMAL_DIGIT.as_ref() {
        Some(re) => re.is_match(password),
        None => password.chars().any(|c| c.is_ascii_digit()),
    }
}

/// Marks, format characters and other numerics are not symbols
fn has_punct_or_symbol(password: &str) -> bool {
    match PUNCT_OR_SYMBOL.as_ref() {
        Some(re) => re.is_match(password),
        None => password.chars().any(|c| c.is_ascii_punctuation()),
    }
}

/// Theoretical size of the present classes, capped at the distinct characters used
fn charset_size(password: &str, lower: bool, upper: bool, digits: bool, symbols: bool) -> usize {
    let mut size = 0;
    if lower {
        size += LOWER_SIZE;
    }
    if upper {
        size += UPPER_SIZE;
    }
    if digits {
        size += DIGIT_SIZE;
    }
    if symbols {
        size += SYMBOL_SIZE;
    }

    let distinct = password.chars().collect::<HashSet<_>>().len();
    size.min(distinct)
}

fn entropy(password: &str, length: usize, charset_size: usize, patterns: PatternFlags) -> f64 {
    if length == 0 || charset_size == 0 {
        return 0.0;
    }

    let base = length as f64 * crate::generator::log2(charset_size as f64);
    let adjusted = base * repetition_penalty(password, length) * patterns.penalty();
    adjusted.max(base * 0.1).max(0.0)
}

/// `1 - 0.5 * repeats / length`, floored at 0.3
fn repetition_penalty(password: &str, length: usize) -> f64 {
    if length == 0 {
        return 1.0;
    }

    let mut counts: HashMap<char, usize> = HashMap::new();
    for c in password.chars() {
        *counts.entry(c).or_insert(0) += 1;
    }
    let repeats: usize = counts.values().map(|n| n - 1).sum();

    (1.0 - (repeats as f64 / length as f64) * 0.5).max(0.3)
}

fn feedback(length: usize, analysis: &SecurityAnalysis, patterns: PatternFlags) -> Vec<String> {
    let mut feedback = Vec::new();

    if length < RECOMMENDED_LENGTH {
        feedback.push(format!("Use at least {} characters for better security", RECOMMENDED_LENGTH));
    }
    if !analysis.has_lowercase {
        feedback.push("Add lowercase letters".to_string());
    }
    if !analysis.has_uppercase {
        feedback.push("Add uppercase letters".to_string());
    }
    if !analysis.has_digits {
        feedback.push("Add numbers".to_string());
    }
    if !analysis.has_symbols {
        feedback.push("Add symbols (!@#$%^&*)".to_string());
    }
    if !analysis.common_words.is_empty() {
        feedback.push("Avoid dictionary words".to_string());
    }
    if analysis.is_compromised {
        feedback.push("This password has been found in data breaches".to_string());
    }
    if patterns.sequential {
        feedback.push("Avoid sequential characters (abc, 123)".to_string());
    }
    if patterns.keyboard {
        feedback.push("Avoid keyboard patterns (qwerty, asdf)".to_string());
    }
    if patterns.substitutions {
        feedback.push("Predictable substitutions (@ for a, 0 for o) add little strength".to_string());
    }
    if patterns.repeated {
        feedback.push("Avoid repeated patterns (abcabc, 1212)".to_string());
    }
    if analysis.level <= StrengthLevel::Fair {
        feedback.push("Consider using a passphrase with multiple words".to_string());
    }

    feedback
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password() {
        let analysis = analyze_password("");
        assert_eq!(analysis.entropy, 0.0);
        assert_eq!(analysis.level, StrengthLevel::VeryWeak);
        assert_eq!(analysis.crack_time, "Instantly");
        assert_eq!(analysis.charset_size, 0);
        assert!(!analysis.feedback.is_empty());
        assert!(!analysis.is_compromised);
    }

    #[test]
    fn test_single_character() {
        let analysis = analyze_password("a");
        assert_eq!(analysis.charset_size, 1);
        assert_eq!(analysis.entropy, 0.0);
        assert_eq!(analysis.level, StrengthLevel::VeryWeak);
    }

    #[test]
    fn test_compromised_password() {
        let analysis = analyze_password("password");
        assert!(analysis.is_compromised);
        assert_eq!(analysis.level, StrengthLevel::VeryWeak);
        assert!(analysis.common_words.contains(&"password".to_string()));
        assert!(analysis.feedback.iter().any(|f| f.contains("data breaches")));
    }

    #[test]
    fn test_compromised_case_insensitive() {
        let analyzer = SecurityAnalyzer::new();
        assert!(analyzer.is_compromised("PassWord"));
        assert!(analyzer.is_compromised("D1LAKISS"));
        assert!(analyzer.is_compromised("gizli"));
        assert!(!analyzer.is_compromised("password!"));
    }

    #[test]
    fn test_custom_compromised_list() {
        let analyzer = SecurityAnalyzer::new().with_common_passwords(["Hunter2"]);
        let analysis = analyzer.analyze("hunter2");
        assert!(analysis.is_compromised);
        assert_eq!(analysis.level, StrengthLevel::VeryWeak);
    }

    #[test]
    fn test_class_detection() {
        let analysis = analyze_password("aB3$");
        assert!(analysis.has_lowercase);
        assert!(analysis.has_uppercase);
        assert!(analysis.has_digits);
        assert!(analysis.has_symbols);
        assert!(!analysis.has_ambiguous);

        assert!(analyze_password("O0").has_ambiguous);
    }

    #[test]
    fn test_charset_capped_by_distinct_chars() {
        let analysis = analyze_password("aaaaaaaaaaaaaaaa");
        assert_eq!(analysis.charset_size, 1);
        assert_eq!(analysis.entropy, 0.0);

        let analysis = analyze_password("abababababab");
        assert_eq!(analysis.charset_size, 2);
    }

    #[test]
    fn test_full_charset() {
        use crate::generator::charset::{DIGITS, LOWERCASE, SYMBOLS, UPPERCASE};
        let all = format!("{}{}{}{}", LOWERCASE, UPPERCASE, DIGITS, SYMBOLS);
        assert_eq!(analyze_password(&all).charset_size, 94);
        // Mixed classes but only 24 distinct characters
        assert_eq!(analyze_password("Tr0ub4dor&3xK!9zQmW#vL2pY").charset_size, 24);
    }

    #[test]
    fn test_strong_random_password() {
        let analysis = analyze_password("k9#VqZ!xRm@yLp$Wz%&NbTgH");
        assert!(analysis.entropy >= 80.0, "entropy {}", analysis.entropy);
        assert_eq!(analysis.level, StrengthLevel::VeryStrong);
        assert_eq!(analysis.crack_time, "Centuries");
        assert!(!analysis.feedback.iter().any(|f| f.contains("passphrase")));
    }

    #[test]
    fn test_substitutions_penalised() {
        let analysis = analyze_password("k9#Vq2!xRm@7Lp$Wz4&N");
        assert!(analysis.entropy < 80.0);
        assert_eq!(analysis.level, StrengthLevel::Strong);
    }

    #[test]
    fn test_short_password_downgraded() {
        assert_eq!(classify(50.0, 7, false), StrengthLevel::Fair);
        assert_eq!(classify(50.0, 8, false), StrengthLevel::Good);
        assert_eq!(classify(25.0, 5, false), StrengthLevel::Weak);
        assert_eq!(classify(90.0, 20, true), StrengthLevel::VeryWeak);
        assert_eq!(analyze_password("k9#Vq!x").level, StrengthLevel::VeryWeak);
    }

    #[test]
    fn test_patterns_reduce_entropy() {
        let plain = analyze_password("mqzvtrkwpj");
        let sequential = analyze_password("mqzvtabcpj");
        assert!(sequential.entropy < plain.entropy);
        assert!(sequential.feedback.iter().any(|f| f.contains("sequential")));
    }

    #[test]
    fn test_keyboard_feedback() {
        let analysis = analyze_password("Zqwerty!9");
        assert!(analysis.feedback.iter().any(|f| f.contains("keyboard")));
    }

    #[test]
    fn test_entropy_floor() {
        let analysis = analyze_password("abcabcabcabc");
        let base = 12.0 * 3f64.log2();
        assert!(analysis.entropy >= base * 0.1 - 1e-9);
        assert!(analysis.entropy < base);
    }

    #[test]
    fn test_non_ascii_input() {
        for input in ["пароль", "密码密码", "ü", "🔐🔑🗝️", " ", "\u{0}\u{1}", "ÄÖÜ123"] {
            let analysis = analyze_password(input);
            assert!(analysis.entropy >= 0.0);
            assert!(analysis.entropy.is_finite());
            assert!(!analysis.crack_time.is_empty());
        }
        assert!(analyze_password("пароль").has_lowercase);
        assert!(analyze_password("🔐").has_symbols);
    }

    #[test]
    fn test_unicode_class_detection() {
        // Nd digits only; superscripts and fractions are other numerics
        assert!(analyze_password("٣").has_digits);
        assert!(!analyze_password("²").has_digits);
        assert!(!analyze_password("½").has_digits);
        assert!(!analyze_password("Ⅻ").has_digits);

        // punctuation and symbols, but not marks or format characters
        assert!(analyze_password("€").has_symbols);
        assert!(analyze_password("«").has_symbols);
        assert!(!analyze_password("\u{200d}").has_symbols);
        assert!(!analyze_password("e\u{301}").has_symbols);
        assert!(!analyze_password("\u{fe0f}").has_symbols);
        assert!(!analyze_password("²").has_symbols);
    }

    #[test]
    fn test_feedback_order() {
        let analysis = analyze_password("abc");
        assert_eq!(analysis.feedback[0], "Use at least 12 characters for better security");
        assert_eq!(analysis.feedback[1], "Add uppercase letters");
        assert_eq!(
            analysis.feedback.last().unwrap(),
            "Consider using a passphrase with multiple words"
        );
    }

    #[test]
    fn test_common_words_found() {
        let analysis = analyze_password("MyHouseParty99");
        assert!(analysis.common_words.contains(&"house".to_string()));
        assert!(analysis.common_words.contains(&"party".to_string()));
        assert!(analysis.feedback.iter().any(|f| f == "Avoid dictionary words"));
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(StrengthLevel::from_entropy(80.0), StrengthLevel::VeryStrong);
        assert_eq!(StrengthLevel::from_entropy(79.9), StrengthLevel::Strong);
        assert_eq!(StrengthLevel::from_entropy(45.0), StrengthLevel::Good);
        assert_eq!(StrengthLevel::from_entropy(30.0), StrengthLevel::Fair);
        assert_eq!(StrengthLevel::from_entropy(20.0), StrengthLevel::Weak);
        assert_eq!(StrengthLevel::from_entropy(19.9), StrengthLevel::VeryWeak);
        assert!(StrengthLevel::VeryWeak < StrengthLevel::VeryStrong);
        assert_eq!(StrengthLevel::Good.to_string(), "Good");
        assert_eq!(StrengthLevel::VeryWeak.downgrade(), StrengthLevel::VeryWeak);
    }

    #[test]
    fn test_validate_password_strength() {
        assert!(validate_password_strength("Abcdef1!xyz", 8, true).is_empty());

        let issues = validate_password_strength("abc", 8, true);
        assert_eq!(issues.len(), 4);
        assert!(issues[0].contains("at least 8"));

        assert!(validate_password_strength("abcdefgh", 8, false).is_empty());
    }

    #[test]
    fn test_passphrase_analysis() {
        let analysis = analyze_password("correct-horse-battery-staple");
        assert!(analysis.has_symbols);
        assert!(analysis.level >= StrengthLevel::Fair);
        assert!(analysis.feedback.iter().any(|f| f.contains("repeated patterns")));
    }
}
