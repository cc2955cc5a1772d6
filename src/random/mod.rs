//! Cryptographic randomness and cancellation
//!
//! Every random draw in the crate goes through a [`RandomSource`]. The
//! production source is [`OsRandom`], which reads the operating system CSPRNG
//! and reports read failures instead of falling back to a weaker generator.

mod cancel;
mod source;
#[cfg(test)]
pub(crate) mod testing;

pub use cancel::CancelToken;
pub use source::{OsRandom, RandomSource};
