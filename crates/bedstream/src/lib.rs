//! Cursor-based binary stream for the Minecraft Bedrock wire format.
//!
//! A [`Stream`] wraps a growable byte buffer with a read cursor and
//! provides the codecs the Bedrock protocol is built from:
//! - fixed-width integers and floats in both byte orders,
//! - variable-length integers (plain LEB128 and ZigZag-signed),
//! - compound values ([`Uuid`], [`ItemStack`]) via the [`WireEncode`] /
//!   [`WireDecode`] traits.
//!
//! Reads consume from the cursor; writes always append to the tail.
//! The crate does no I/O — a higher protocol layer supplies and drains
//! the buffers.

pub mod error;
pub mod item_stack;
pub mod stream;
pub mod types;

pub use error::BinaryError;
pub use item_stack::ItemStack;
pub use stream::Stream;
pub use types::Uuid;

/// Encode a value onto a stream. Writes append to the buffer tail and
/// cannot fail.
pub trait WireEncode {
    fn wire_encode(&self, stream: &mut Stream);
}

/// Decode a value from a stream at its current read offset.
///
/// A failed decode may leave the offset mid-value; callers should
/// discard or [`Stream::reset`] the stream rather than resume.
pub trait WireDecode: Sized {
    fn wire_decode(stream: &mut Stream) -> Result<Self, BinaryError>;
}
