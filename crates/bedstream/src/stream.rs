//! The binary stream: a byte buffer with a read cursor.
//!
//! Reads consume from the cursor and fail with a typed
//! [`BinaryError`] when the buffer runs short; a failed raw read never
//! moves the cursor. Writes always append to the buffer tail and cannot
//! fail. The cursor tracks the read position only.

use bytes::{BufMut, BytesMut};

use crate::error::BinaryError;

/// Maximum encoded size of a 32-bit varint.
const VARINT32_MAX_BYTES: usize = 5;
/// Maximum encoded size of a 64-bit varint.
const VARINT64_MAX_BYTES: usize = 10;

/// Cursor-based encoder/decoder over a mutable byte buffer.
///
/// Method naming follows the Bedrock convention: no prefix is
/// big-endian, an `l` prefix is little-endian (`get_int` vs `get_lint`).
#[derive(Debug, Clone, Default)]
pub struct Stream {
    buffer: BytesMut,
    offset: usize,
}

impl Stream {
    /// New empty stream, for writing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stream pre-loaded with `buffer`, cursor at the start, for reading.
    pub fn from_buffer(buffer: Vec<u8>) -> Self {
        Self {
            buffer: BytesMut::from(&buffer[..]),
            offset: 0,
        }
    }

    // -----------------------------------------------------------------
    // Cursor
    // -----------------------------------------------------------------

    /// Move the read cursor back to the start of the buffer.
    pub fn rewind(&mut self) {
        self.offset = 0;
    }

    /// Clear the buffer and reset the cursor.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.offset = 0;
    }

    /// Current read cursor position.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Set the read cursor directly.
    ///
    /// Not bounds-checked; an out-of-range offset surfaces as
    /// [`BinaryError::InsufficientData`] on the next read.
    pub fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
    }

    /// The full backing buffer, independent of the cursor.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Replace the backing buffer and cursor.
    ///
    /// Like [`set_offset`](Self::set_offset), the offset is not
    /// bounds-checked here.
    pub fn set_buffer(&mut self, buffer: Vec<u8>, offset: usize) {
        self.buffer = BytesMut::from(&buffer[..]);
        self.offset = offset;
    }

    /// Consume the stream and take the buffer, e.g. to hand a finished
    /// write to the transport layer.
    pub fn into_buffer(self) -> Vec<u8> {
        self.buffer.to_vec()
    }

    /// Whether the cursor is at or past the end of the buffer.
    pub fn eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }

    /// Read the next `len` bytes and advance the cursor.
    ///
    /// `len == 0` always succeeds with an empty slice and no state
    /// change. On [`BinaryError::InsufficientData`] the cursor is left
    /// where it was.
    pub fn get(&mut self, len: usize) -> Result<&[u8], BinaryError> {
        if len == 0 {
            return Ok(&[]);
        }
        let remaining = self.buffer.len().saturating_sub(self.offset);
        if remaining < len {
            return Err(BinaryError::InsufficientData {
                needed: len,
                remaining,
            });
        }
        let start = self.offset;
        self.offset += len;
        Ok(&self.buffer[start..start + len])
    }

    /// Read everything from the cursor to the end of the buffer and
    /// advance the cursor to the end.
    ///
    /// Unlike `get(0)`, this fails with
    /// [`BinaryError::InsufficientData`] when zero bytes remain.
    pub fn get_remaining(&mut self) -> Result<&[u8], BinaryError> {
        if self.offset >= self.buffer.len() {
            return Err(BinaryError::InsufficientData {
                needed: 1,
                remaining: 0,
            });
        }
        let start = self.offset;
        self.offset = self.buffer.len();
        Ok(&self.buffer[start..])
    }

    /// Append raw bytes to the end of the buffer. The read cursor is
    /// unaffected.
    pub fn put(&mut self, bytes: &[u8]) {
        self.buffer.put_slice(bytes);
    }

    /// Fixed-width read: exactly `N` bytes, copied out.
    fn get_array<const N: usize>(&mut self) -> Result<[u8; N], BinaryError> {
        let remaining = self.buffer.len().saturating_sub(self.offset);
        if remaining < N {
            return Err(BinaryError::InsufficientData {
                needed: N,
                remaining,
            });
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buffer[self.offset..self.offset + N]);
        self.offset += N;
        Ok(out)
    }

    // -----------------------------------------------------------------
    // Fixed-width primitives
    // -----------------------------------------------------------------

    /// Read one byte as a bool: `0x00` is false, anything else is true.
    pub fn get_bool(&mut self) -> Result<bool, BinaryError> {
        Ok(self.get_array::<1>()?[0] != 0x00)
    }

    /// Write a bool as `0x01` / `0x00`.
    pub fn put_bool(&mut self, v: bool) {
        self.buffer.put_u8(u8::from(v));
    }

    pub fn get_byte(&mut self) -> Result<u8, BinaryError> {
        Ok(self.get_array::<1>()?[0])
    }

    pub fn put_byte(&mut self, v: u8) {
        self.buffer.put_u8(v);
    }

    /// Unsigned 16-bit, big-endian.
    pub fn get_short(&mut self) -> Result<u16, BinaryError> {
        Ok(u16::from_be_bytes(self.get_array()?))
    }

    /// Signed 16-bit, big-endian (same two bytes as [`get_short`](Self::get_short)).
    pub fn get_signed_short(&mut self) -> Result<i16, BinaryError> {
        Ok(i16::from_be_bytes(self.get_array()?))
    }

    pub fn put_short(&mut self, v: u16) {
        self.buffer.put_u16(v);
    }

    pub fn put_signed_short(&mut self, v: i16) {
        self.buffer.put_i16(v);
    }

    /// Unsigned 16-bit, little-endian.
    pub fn get_lshort(&mut self) -> Result<u16, BinaryError> {
        Ok(u16::from_le_bytes(self.get_array()?))
    }

    /// Signed 16-bit, little-endian.
    pub fn get_signed_lshort(&mut self) -> Result<i16, BinaryError> {
        Ok(i16::from_le_bytes(self.get_array()?))
    }

    pub fn put_lshort(&mut self, v: u16) {
        self.buffer.put_u16_le(v);
    }

    pub fn put_signed_lshort(&mut self, v: i16) {
        self.buffer.put_i16_le(v);
    }

    /// Unsigned 24-bit ("triad"), big-endian.
    pub fn get_triad(&mut self) -> Result<u32, BinaryError> {
        let b = self.get_array::<3>()?;
        Ok(u32::from_be_bytes([0, b[0], b[1], b[2]]))
    }

    /// Write the low 24 bits of `v`, big-endian.
    pub fn put_triad(&mut self, v: u32) {
        self.buffer.put_uint(u64::from(v), 3);
    }

    /// Unsigned 24-bit ("triad"), little-endian.
    pub fn get_ltriad(&mut self) -> Result<u32, BinaryError> {
        let b = self.get_array::<3>()?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], 0]))
    }

    /// Write the low 24 bits of `v`, little-endian.
    pub fn put_ltriad(&mut self, v: u32) {
        self.buffer.put_uint_le(u64::from(v), 3);
    }

    /// Signed 32-bit, big-endian.
    pub fn get_int(&mut self) -> Result<i32, BinaryError> {
        Ok(i32::from_be_bytes(self.get_array()?))
    }

    pub fn put_int(&mut self, v: i32) {
        self.buffer.put_i32(v);
    }

    /// Signed 32-bit, little-endian.
    pub fn get_lint(&mut self) -> Result<i32, BinaryError> {
        Ok(i32::from_le_bytes(self.get_array()?))
    }

    pub fn put_lint(&mut self, v: i32) {
        self.buffer.put_i32_le(v);
    }

    /// IEEE-754 single, big-endian.
    pub fn get_float(&mut self) -> Result<f32, BinaryError> {
        Ok(f32::from_be_bytes(self.get_array()?))
    }

    /// Big-endian float rounded to `accuracy` decimal places, for
    /// display-stable deserialization.
    pub fn get_rounded_float(&mut self, accuracy: u32) -> Result<f32, BinaryError> {
        Ok(round_to(self.get_float()?, accuracy))
    }

    pub fn put_float(&mut self, v: f32) {
        self.buffer.put_f32(v);
    }

    /// IEEE-754 single, little-endian.
    pub fn get_lfloat(&mut self) -> Result<f32, BinaryError> {
        Ok(f32::from_le_bytes(self.get_array()?))
    }

    /// Little-endian float rounded to `accuracy` decimal places.
    pub fn get_rounded_lfloat(&mut self, accuracy: u32) -> Result<f32, BinaryError> {
        Ok(round_to(self.get_lfloat()?, accuracy))
    }

    pub fn put_lfloat(&mut self, v: f32) {
        self.buffer.put_f32_le(v);
    }

    /// IEEE-754 double, big-endian.
    pub fn get_double(&mut self) -> Result<f64, BinaryError> {
        Ok(f64::from_be_bytes(self.get_array()?))
    }

    pub fn put_double(&mut self, v: f64) {
        self.buffer.put_f64(v);
    }

    /// IEEE-754 double, little-endian.
    pub fn get_ldouble(&mut self) -> Result<f64, BinaryError> {
        Ok(f64::from_le_bytes(self.get_array()?))
    }

    pub fn put_ldouble(&mut self, v: f64) {
        self.buffer.put_f64_le(v);
    }

    /// Signed 64-bit, big-endian.
    pub fn get_long(&mut self) -> Result<i64, BinaryError> {
        Ok(i64::from_be_bytes(self.get_array()?))
    }

    pub fn put_long(&mut self, v: i64) {
        self.buffer.put_i64(v);
    }

    /// Signed 64-bit, little-endian.
    pub fn get_llong(&mut self) -> Result<i64, BinaryError> {
        Ok(i64::from_le_bytes(self.get_array()?))
    }

    pub fn put_llong(&mut self, v: i64) {
        self.buffer.put_i64_le(v);
    }

    // -----------------------------------------------------------------
    // Varints (LEB128, continuation bit high, LSB group first)
    // -----------------------------------------------------------------

    /// Read a 32-bit unsigned varint (plain LEB128, no ZigZag).
    pub fn get_unsigned_var_int(&mut self) -> Result<u32, BinaryError> {
        let mut result: u32 = 0;
        let mut shift = 0;
        for _ in 0..VARINT32_MAX_BYTES {
            let byte = self.get_byte()?;
            result |= u32::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                return Ok(result);
            }
            shift += 7;
        }
        Err(BinaryError::VarIntTooLong {
            max_bytes: VARINT32_MAX_BYTES,
        })
    }

    /// Write a 32-bit unsigned varint.
    pub fn put_unsigned_var_int(&mut self, v: u32) {
        let mut value = v;
        loop {
            if value & !0x7F == 0 {
                self.buffer.put_u8(value as u8);
                return;
            }
            self.buffer.put_u8((value & 0x7F | 0x80) as u8);
            value >>= 7;
        }
    }

    /// Read a 32-bit signed varint (ZigZag + LEB128).
    pub fn get_var_int(&mut self) -> Result<i32, BinaryError> {
        Ok(zigzag_decode_32(self.get_unsigned_var_int()?))
    }

    /// Write a 32-bit signed varint (ZigZag + LEB128).
    pub fn put_var_int(&mut self, v: i32) {
        self.put_unsigned_var_int(zigzag_encode_32(v));
    }

    /// Read a 64-bit unsigned varint (plain LEB128, no ZigZag).
    pub fn get_unsigned_var_long(&mut self) -> Result<u64, BinaryError> {
        let mut result: u64 = 0;
        let mut shift = 0;
        for _ in 0..VARINT64_MAX_BYTES {
            let byte = self.get_byte()?;
            result |= u64::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                return Ok(result);
            }
            shift += 7;
        }
        Err(BinaryError::VarIntTooLong {
            max_bytes: VARINT64_MAX_BYTES,
        })
    }

    /// Write a 64-bit unsigned varint.
    pub fn put_unsigned_var_long(&mut self, v: u64) {
        let mut value = v;
        loop {
            if value & !0x7F == 0 {
                self.buffer.put_u8(value as u8);
                return;
            }
            self.buffer.put_u8((value & 0x7F | 0x80) as u8);
            value >>= 7;
        }
    }

    /// Read a 64-bit signed varint (ZigZag + LEB128).
    pub fn get_var_long(&mut self) -> Result<i64, BinaryError> {
        Ok(zigzag_decode_64(self.get_unsigned_var_long()?))
    }

    /// Write a 64-bit signed varint (ZigZag + LEB128).
    pub fn put_var_long(&mut self, v: i64) {
        self.put_unsigned_var_long(zigzag_encode_64(v));
    }

    // -----------------------------------------------------------------
    // Length-prefixed byte strings
    // -----------------------------------------------------------------

    /// Read a byte string prefixed by an unsigned varint length.
    ///
    /// UTF-8 by protocol convention, but opaque here; no validation.
    pub fn get_string(&mut self) -> Result<Vec<u8>, BinaryError> {
        let len = self.get_unsigned_var_int()?;
        let len = usize::try_from(len).map_err(|_| BinaryError::InvalidLength {
            len: u64::from(len),
        })?;
        Ok(self.get(len)?.to_vec())
    }

    /// Write a byte string prefixed by an unsigned varint length.
    pub fn put_string(&mut self, v: &[u8]) {
        self.put_unsigned_var_int(v.len() as u32);
        self.put(v);
    }
}

impl From<Vec<u8>> for Stream {
    fn from(buffer: Vec<u8>) -> Self {
        Self::from_buffer(buffer)
    }
}

// ---------------------------------------------------------------------
// ZigZag and rounding helpers
// ---------------------------------------------------------------------

#[inline]
fn zigzag_encode_32(v: i32) -> u32 {
    ((v << 1) ^ (v >> 31)) as u32
}

#[inline]
fn zigzag_decode_32(v: u32) -> i32 {
    (v >> 1) as i32 ^ -((v & 1) as i32)
}

#[inline]
fn zigzag_encode_64(v: i64) -> u64 {
    ((v << 1) ^ (v >> 63)) as u64
}

#[inline]
fn zigzag_decode_64(v: u64) -> i64 {
    (v >> 1) as i64 ^ -((v & 1) as i64)
}

#[inline]
fn round_to(v: f32, accuracy: u32) -> f32 {
    let factor = 10f32.powi(accuracy as i32);
    (v * factor).round() / factor
}

// =====================================================================
// Tests
// =====================================================================
