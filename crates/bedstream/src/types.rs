//! Compound value types carried by the stream.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BinaryError;
use crate::stream::Stream;
use crate::{WireDecode, WireEncode};

/// 128-bit UUID as four 32-bit words.
///
/// This crate only preserves the byte layout; the words carry no
/// version or variant semantics here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Uuid {
    pub part0: u32,
    pub part1: u32,
    pub part2: u32,
    pub part3: u32,
}

impl Uuid {
    pub const ZERO: Self = Self {
        part0: 0,
        part1: 0,
        part2: 0,
        part3: 0,
    };

    pub fn new(part0: u32, part1: u32, part2: u32, part3: u32) -> Self {
        Self {
            part0,
            part1,
            part2,
            part3,
        }
    }
}

/// On the wire a UUID is two little-endian u64 halves, which the peer
/// implementation splits into u32 words in the fixed order
/// `part1, part0, part3, part2`. The interleave must be preserved
/// byte-for-byte for compatibility.
impl WireEncode for Uuid {
    fn wire_encode(&self, stream: &mut Stream) {
        stream.put_lint(self.part1 as i32);
        stream.put_lint(self.part0 as i32);
        stream.put_lint(self.part3 as i32);
        stream.put_lint(self.part2 as i32);
    }
}

impl WireDecode for Uuid {
    fn wire_decode(stream: &mut Stream) -> Result<Self, BinaryError> {
        let part1 = stream.get_lint()? as u32;
        let part0 = stream.get_lint()? as u32;
        let part3 = stream.get_lint()? as u32;
        let part2 = stream.get_lint()? as u32;
        Ok(Self {
            part0,
            part1,
            part2,
            part3,
        })
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = {
            let mut b = [0u8; 16];
            b[..4].copy_from_slice(&self.part0.to_be_bytes());
            b[4..8].copy_from_slice(&self.part1.to_be_bytes());
            b[8..12].copy_from_slice(&self.part2.to_be_bytes());
            b[12..].copy_from_slice(&self.part3.to_be_bytes());
            b
        };
        write!(
            f,
            "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            bytes[0], bytes[1], bytes[2], bytes[3],
            bytes[4], bytes[5],
            bytes[6], bytes[7],
            bytes[8], bytes[9],
            bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_roundtrip() {
        let u = Uuid::new(0xDEAD_BEEF, 0x0123_4567, 0x89AB_CDEF, 0xFFFF_0000);
        let mut s = Stream::new();
        u.wire_encode(&mut s);
        assert_eq!(s.buffer().len(), 16);
        assert_eq!(Uuid::wire_decode(&mut s).unwrap(), u);
        assert!(s.eof());
    }

    #[test]
    fn uuid_word_interleave() {
        // parts (1, 2, 3, 4) must hit the wire as LE words in the
        // order part1, part0, part3, part2.
        let u = Uuid::new(1, 2, 3, 4);
        let mut s = Stream::new();
        u.wire_encode(&mut s);
        assert_eq!(
            s.buffer(),
            &[
                2, 0, 0, 0, //
                1, 0, 0, 0, //
                4, 0, 0, 0, //
                3, 0, 0, 0,
            ]
        );
        assert_eq!(Uuid::wire_decode(&mut s).unwrap(), Uuid::new(1, 2, 3, 4));
    }

    #[test]
    fn uuid_truncated() {
        let mut s = Stream::from_buffer(vec![0; 10]);
        assert!(Uuid::wire_decode(&mut s).is_err());
    }

    #[test]
    fn uuid_display() {
        let u = Uuid::new(0x00112233, 0x44556677, 0x8899AABB, 0xCCDDEEFF);
        assert_eq!(u.to_string(), "00112233-4455-6677-8899-aabbccddeeff");
    }
}
