//! Numeric PIN codes

use log::debug;
use zeroize::Zeroizing;

use super::{GeneratorConfig, log2};
use crate::error::{ForgeError, Result};
use crate::random::{CancelToken, OsRandom, RandomSource};
use crate::{PIN_MAX_LENGTH, PIN_MIN_LENGTH};

/// Generates PINs of uniformly drawn decimal digits
#[derive(Debug, Clone)]
pub struct PinGenerator {
    length: usize,
}

impl PinGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    /// Build from a shared generator config
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.length)
    }

    /// Number of digits
    pub fn length(&self) -> usize {
        self.length
    }

    /// Change the number of digits; checked on the next generate
    pub fn set_length(&mut self, length: usize) {
        self.length = length;
    }

    /// Check the length is within 1..=50
    pub fn validate(&self) -> Result<()> {
        if self.length < PIN_MIN_LENGTH {
            return Err(ForgeError::InvalidConfig("PIN length must be positive".to_string()));
        }
        if self.length > PIN_MAX_LENGTH {
            return Err(ForgeError::InvalidConfig(format!(
                "PIN length too long (max {})",
                PIN_MAX_LENGTH
            )));
        }
        Ok(())
    }

    /// `length * log2(10)`
    pub fn estimate_entropy(&self) -> f64 {
        self.length as f64 * log2(10.0)
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        "Numeric PIN"
    }

    /// Generate using the OS random source
    pub fn generate(&self) -> Result<String> {
        self.generate_with(&OsRandom, &CancelToken::new())
    }

    /// Generate using `source`, checking `cancel` between draws
    pub fn generate_with(&self, source: &dyn RandomSource, cancel: &CancelToken) -> Result<String> {
        self.validate()?;

        let mut digits = Zeroizing::new(vec![0u8; self.length]);
        for slot in digits.iter_mut() {
            cancel.check()?;
            *slot = b'0' + source.uniform(10)? as u8;
        }

        let pin: String = digits.iter().map(|&b| b as char).collect();
        debug!("Generated PIN of length {}", self.length);
        Ok(pin)
    }

    /// Generate and group the digits, e.g. `1234-5678`
    pub fn generate_formatted(&self, separator: &str, group_size: usize) -> Result<String> {
        self.generate_formatted_with(separator, group_size, &OsRandom, &CancelToken::new())
    }

    pub fn generate_formatted_with(
        &self,
        separator: &str,
        group_size: usize,
        source: &dyn RandomSource,
        cancel: &CancelToken,
    ) -> Result<String> {
        let pin = Zeroizing::new(self.generate_with(source, cancel)?);
        Ok(format_pin(&pin, separator, group_size))
    }

    /// e.g. `length=6`
    pub fn settings_summary(&self) -> String {
        format!("length={}", self.length)
    }
}

/// Insert `separator` before every `group_size`-th digit.
///
/// Returns the PIN unchanged when the separator is empty, the group size is
/// zero, or the group would span the whole PIN.
pub fn format_pin(pin: &str, separator: &str, group_size: usize) -> String {
    let len = pin.chars().count();
    if separator.is_empty() || group_size == 0 || group_size >= len {
        return pin.to_string();
    }

    let mut formatted = String::with_capacity(len + separator.len() * (len / group_size));
    for (i, digit) in pin.chars().enumerate() {
        if i > 0 && i % group_size == 0 {
            formatted.push_str(separator);
        }
        formatted.push(digit);
    }
    formatted
}
