//! Inventory item ("slot") wire format.
//!
//! The serialized-data blob (an NBT compound on the real protocol) is
//! carried as opaque bytes; parsing it is out of scope here.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::BinaryError;
use crate::stream::Stream;
use crate::{WireDecode, WireEncode};

/// Damage value meaning "any damage/metadata".
const ANY_DAMAGE: i32 = -1;
/// On-wire stand-in for [`ANY_DAMAGE`] inside the aux value.
const ANY_DAMAGE_WIRE: i32 = 0x7fff;

/// A single inventory item stack.
///
/// `id == 0` is the empty-slot sentinel; every other field is
/// irrelevant when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item id. 0 = empty slot.
    pub id: i32,
    /// Damage/metadata value. -1 means "any".
    pub damage: i32,
    /// Stack size.
    pub count: u8,
    /// Opaque serialized-data blob (NBT compound on the real protocol).
    pub nbt: Vec<u8>,
    /// Blocks this item may be placed on (adventure mode). Never
    /// emitted on encode and always empty after decode; see the codec
    /// notes below.
    pub can_place_on: Vec<String>,
    /// Blocks this item may destroy (adventure mode). Same caveat as
    /// `can_place_on`.
    pub can_destroy: Vec<String>,
}

impl ItemStack {
    /// An empty slot.
    pub fn empty() -> Self {
        Self {
            id: 0,
            damage: 0,
            count: 0,
            nbt: Vec::new(),
            can_place_on: Vec::new(),
            can_destroy: Vec::new(),
        }
    }

    /// An item with no serialized-data blob.
    pub fn new(id: i32, damage: i32, count: u8) -> Self {
        Self {
            id,
            damage,
            count,
            nbt: Vec::new(),
            can_place_on: Vec::new(),
            can_destroy: Vec::new(),
        }
    }

    /// An item carrying an opaque serialized-data blob.
    pub fn new_with_nbt(id: i32, damage: i32, count: u8, nbt: Vec<u8>) -> Self {
        Self {
            id,
            damage,
            count,
            nbt,
            can_place_on: Vec::new(),
            can_destroy: Vec::new(),
        }
    }

    /// Whether this slot is empty.
    pub fn is_empty(&self) -> bool {
        self.id == 0
    }
}

/// Encode as a slot.
///
/// Wire format:
/// ```text
/// VarInt(id)            — zigzag, 0 = empty, stop here
/// VarInt(aux)           — ((damage & 0x7fff) << 8) | count
/// u16_le(blob_len) + blob bytes
/// VarInt(0)             — CanPlaceOn entry count (unsupported upstream)
/// VarInt(0)             — CanDestroy entry count (unsupported upstream)
/// ```
/// The tag-list counts are always written as zero, even when the value
/// carries tags; the peer implementation does the same.
impl WireEncode for ItemStack {
    fn wire_encode(&self, stream: &mut Stream) {
        if self.id == 0 {
            stream.put_var_int(0);
            return;
        }

        stream.put_var_int(self.id);
        let aux = ((self.damage & ANY_DAMAGE_WIRE) << 8) | i32::from(self.count);
        stream.put_var_int(aux);

        stream.put_lshort(self.nbt.len() as u16);
        stream.put(&self.nbt);

        stream.put_var_int(0); // CanPlaceOn entry count
        stream.put_var_int(0); // CanDestroy entry count
    }
}

/// Decode a slot.
///
/// `id <= 0` yields the empty sentinel without consuming anything
/// further. Non-empty tag lists on the wire are consumed to keep the
/// cursor aligned, then discarded.
impl WireDecode for ItemStack {
    fn wire_decode(stream: &mut Stream) -> Result<Self, BinaryError> {
        let id = stream.get_var_int()?;
        if id <= 0 {
            return Ok(Self::empty());
        }

        let aux = stream.get_var_int()?;
        let mut damage = aux >> 8;
        if damage == ANY_DAMAGE_WIRE {
            damage = ANY_DAMAGE;
        }
        let count = (aux & 0xff) as u8;

        let nbt_len = stream.get_lshort()?;
        let nbt = if nbt_len > 0 {
            stream.get(usize::from(nbt_len))?.to_vec()
        } else {
            Vec::new()
        };

        let can_place_on = stream.get_var_int()?;
        if can_place_on > 0 {
            for _ in 0..can_place_on {
                stream.get_string()?;
            }
            trace!(count = can_place_on, "discarded CanPlaceOn tags");
        }

        let can_destroy = stream.get_var_int()?;
        if can_destroy > 0 {
            for _ in 0..can_destroy {
                stream.get_string()?;
            }
            trace!(count = can_destroy, "discarded CanDestroy tags");
        }

        Ok(Self::new_with_nbt(id, damage, count, nbt))
    }
}
