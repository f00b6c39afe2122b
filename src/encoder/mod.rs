//! Deduplicating append encoder.
//!
//! Turns a sequence of byte-string values into a buffer holding each distinct
//! value once plus one buffer offset per input value.

pub mod append;
pub mod key;

pub use append::{encode, AppendEncoder, EncodeError, EncodeStats, Encoded};
pub use key::{ByAddress, ByContent, KeyScheme};
