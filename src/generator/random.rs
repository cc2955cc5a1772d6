//! Fixed-length random passwords with guaranteed class coverage

use log::{debug, warn};
use zeroize::Zeroizing;

use super::charset::{CharacterClass, CharacterSetBuilder};
use super::{GeneratorConfig, log2, shuffle};
use crate::error::{ForgeError, Result};
use crate::random::{CancelToken, OsRandom, RandomSource};
use crate::{RANDOM_MAX_LENGTH, RANDOM_MIN_LENGTH};

/// Generates random passwords over a set of character classes.
///
/// Every non-empty selected class is represented at least once. Classes whose
/// alphabet is emptied by exclusions are skipped (and logged), so they carry
/// no such guarantee.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    length: usize,
    charset: CharacterSetBuilder,
}

impl RandomGenerator {
    /// Create a generator for `length` characters drawn from `classes`
    pub fn new(length: usize, classes: &[CharacterClass]) -> Self {
        Self {
            length,
            charset: CharacterSetBuilder::new(classes),
        }
    }

    /// Build from a shared generator config
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.length, &config.classes).with_exclusions(&config.exclude)
    }

    /// Never emit any of `chars`
    pub fn with_exclusions(mut self, chars: &str) -> Self {
        self.charset = self.charset.exclude(chars);
        self
    }

    /// Never emit visually similar characters
    pub fn exclude_similar(mut self) -> Self {
        self.charset = self.charset.exclude_similar();
        self
    }

    /// Password length in characters
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn charset(&self) -> &CharacterSetBuilder {
        &self.charset
    }

    /// Check length bounds and class selection
    pub fn validate(&self) -> Result<()> {
        if self.length < RANDOM_MIN_LENGTH {
            return Err(ForgeError::InvalidConfig("password length must be positive".to_string()));
        }
        if self.length > RANDOM_MAX_LENGTH {
            return Err(ForgeError::InvalidConfig(format!(
                "password length too long (max {})",
                RANDOM_MAX_LENGTH
            )));
        }
        if self.charset.classes().is_empty() {
            return Err(ForgeError::InvalidConfig(
                "at least one character class must be specified".to_string(),
            ));
        }
        Ok(())
    }

    /// `length * log2(alphabet size)`.
    ///
    /// An upper bound: it ignores the reduction caused by forcing one
    /// character per class.
    pub fn estimate_entropy(&self) -> f64 {
        self.length as f64 * log2(self.charset.size() as f64)
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        "Random Password"
    }

    /// Generate using the OS random source
    pub fn generate(&self) -> Result<String> {
        self.generate_with(&OsRandom, &CancelToken::new())
    }

    /// Generate using `source`, checking `cancel` between draws
    pub fn generate_with(&self, source: &dyn RandomSource, cancel: &CancelToken) -> Result<String> {
        self.validate()?;

        let per_class = self.charset.per_class();
        if per_class.is_empty() {
            return Err(ForgeError::InvalidConfig(
                "exclusions remove every selectable character".to_string(),
            ));
        }
        for class in self.charset.emptied_classes() {
            warn!("Character class '{}' is empty after exclusions and will not be guaranteed", class);
        }
        if self.length < per_class.len() {
            return Err(ForgeError::InvalidConfig(format!(
                "password length {} is shorter than the {} required character classes",
                self.length,
                per_class.len()
            )));
        }
        let union = self.charset.union();

        let mut buffer = Zeroizing::new(vec![0u8; self.length]);

        for (slot, (_, alphabet)) in buffer.iter_mut().zip(per_class.iter()) {
            cancel.check()?;
            *slot = alphabet[source.uniform(alphabet.len())?];
        }

        for slot in buffer.iter_mut().skip(per_class.len()) {
            cancel.check()?;
            *slot = union[source.uniform(union.len())?];
        }

        shuffle(&mut buffer, source, cancel)?;

        let password: String = buffer.iter().map(|&b| b as char).collect();
        debug!("Generated random password of length {}", self.length);
        Ok(password)
    }

    /// e.g. `length=16, classes=lowercase+uppercase+numbers`
    pub fn settings_summary(&self) -> String {
        let classes: Vec<&str> = self.charset.classes().iter().map(|c| c.name()).collect();
        let mut summary = format!("length={}, classes={}", self.length, classes.join("+"));
        let excluded = self.charset.excluded();
        if !excluded.is_empty() {
            summary.push_str(&format!(", exclude={}", excluded));
        }
        summary
    }
}
