//! Error types for the codec library.

use std::io;
use thiserror::Error;

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors that can occur while compressing or decompressing.
///
/// All of these are terminal to the current encode/decode call; nothing is
/// retried and partially written output is the caller's to discard.
#[derive(Debug, Error)]
pub enum CodecError {
  /// I/O error on the underlying stream.
  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  /// The input is not a valid PGM image or container header.
  #[error("malformed input: {0}")]
  MalformedInput(String),

  /// Integer outside the range the variable-length code can represent.
  #[error("value {0} outside the range 0..=32767")]
  OutOfRange(i64),

  /// The adaptive coder's event table cannot grow any further.
  #[error("event table full ({0} distinct symbols)")]
  AlphabetExhausted(usize),

  /// Internal invariant broken, typically by a corrupt stream.
  #[error("invariant violation: {0}")]
  Invariant(&'static str),
}
