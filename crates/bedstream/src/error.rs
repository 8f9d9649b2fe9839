//! Stream decoding errors.

use thiserror::Error;

/// Errors raised while reading from a [`Stream`](crate::Stream).
///
/// Every error is raised at the point of detection and never retried.
/// A failed raw read leaves the cursor where it was; a failed compound
/// decode may not.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BinaryError {
    /// A length field decoded from the wire cannot be used as a read
    /// length on this target.
    #[error("invalid read length: {len}")]
    InvalidLength { len: u64 },

    /// Fewer bytes remain than the read requires. Signals a truncated
    /// or malformed message.
    #[error("not enough bytes left in buffer: need {needed}, have {remaining}")]
    InsufficientData { needed: usize, remaining: usize },

    /// A varint ran past the maximum group count for its width.
    /// Signals a malformed or adversarial encoding.
    #[error("varint did not terminate within {max_bytes} bytes")]
    VarIntTooLong { max_bytes: usize },
}
