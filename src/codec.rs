//! # Locus Codec - Message Orchestration
//!
//! ## Purpose
//!
//! Top-level codec tying the pipeline together: scan → structural
//! validation → field resolution → value coercion → field store on the way
//! in, and field store → typed entries → generator on the way out. One
//! codec instance owns one [`FieldStore`] and is intended to live as long
//! as the session it serves.
//!
//! ## Concurrency
//!
//! Single-threaded and synchronous: both directions run to completion with
//! no suspension points and no I/O. Nothing is shared between instances, so
//! no internal locking; concurrent calls into one instance must be
//! serialized by the caller (one codec per connection is the expected
//! shape).

use crate::constants::{BEACON_POSITION_FIELDS, MAX_BEACONS};
use crate::error::{CodecError, CodecResult};
use crate::field::{FieldId, FieldValue};
use crate::generator::{generate_object, JsonEntry};
use crate::scanner::TokenArray;
use crate::store::{FieldScalar, FieldStore};
use tracing::trace;

/// Stateful codec for locus state messages.
///
/// Encapsulates knowledge of the locus JSON format for device/controller
/// message exchange: [`deserialize`](Self::deserialize) applies a received
/// message to the field store, [`serialize`](Self::serialize) dumps the
/// currently-set fields back into message text, and the typed accessors
/// expose individual fields to the rest of the firmware.
#[derive(Debug, Clone, Default)]
pub struct LocusCodec {
    store: FieldStore,
}

impl LocusCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set every field back to unset.
    ///
    /// Call between independent messages when fields from the previous
    /// cycle must not leak into the next one.
    pub fn reset(&mut self) {
        self.store.reset();
    }

    /// Update the field store from a JSON message, if it is valid.
    ///
    /// The input is a UTF-8/ASCII buffer holding exactly one flat JSON
    /// object whose keys are schema field names and whose values are
    /// boolean or base-10 integer literals. A shorter-than-maximum object
    /// is fine; absent fields keep whatever value they had.
    ///
    /// Pairs are applied strictly in message order and the first failure is
    /// terminal: an unknown key or unparsable value stops iteration with
    /// [`CodecError::Syntax`] and later pairs are never applied. Fields
    /// written before the failing pair remain applied - there is no
    /// rollback. Callers that need atomicity must snapshot or reset the
    /// codec around this call.
    pub fn deserialize(&mut self, input: &[u8]) -> CodecResult<()> {
        let mut tokens = TokenArray::new();
        tokens.scan_update(input)?;

        for (key, value) in tokens.kv_pairs() {
            self.apply_pair(key.bytes(input), value.bytes(input))?;
        }

        Ok(())
    }

    /// Resolve one key/value pair and write it into the store
    fn apply_pair(&mut self, key: &[u8], raw_value: &[u8]) -> CodecResult<()> {
        let Some(id) = FieldId::from_wire_name(key) else {
            trace!(key = ?core::str::from_utf8(key).unwrap_or("<non-utf8>"), "unknown field name");
            return Err(CodecError::Syntax);
        };

        let value = FieldValue::parse(id.kind(), raw_value)?;
        trace!(field = ?id, ?value, "field applied");
        self.store.set(id, value);
        Ok(())
    }

    /// Dump the state in string form into `out`, returning the byte count.
    ///
    /// Emits one key/value entry for every currently-set field in ascending
    /// [`FieldId`] order; unset fields are omitted entirely rather than
    /// rendered as `null`. An output buffer too small for the complete
    /// message is [`CodecError::SmallBuffer`].
    pub fn serialize(&self, out: &mut [u8]) -> CodecResult<usize> {
        let mut entries = [JsonEntry {
            name: "",
            value: FieldValue::Unset,
        }; FieldId::COUNT];
        let mut filled = 0;

        for id in FieldId::all() {
            let value = self.store.get(id);
            if value.is_set() {
                entries[filled] = JsonEntry {
                    name: id.wire_name(),
                    value,
                };
                filled += 1;
            }
        }

        generate_object(out, &entries[..filled])
    }

    /// Unconditionally set one field
    pub fn set_field<T: Into<FieldValue>>(&mut self, id: FieldId, value: T) {
        self.store.set(id, value.into());
    }

    /// Whether the field currently stores a value
    pub fn is_field_set(&self, id: FieldId) -> bool {
        self.store.is_set(id)
    }

    /// Typed read of one field; `None` when unset or set with the other
    /// scalar type
    pub fn try_get<T: FieldScalar>(&self, id: FieldId) -> Option<T> {
        trace!(field = ?id, name = id.wire_name(), "field lookup");
        self.store.try_get(id)
    }

    /// Activity flag of beacon `beacon` (zero-based).
    ///
    /// Indices outside `0..4` are [`CodecError::FieldIdBoundaries`]; a
    /// valid index whose flag was never received is
    /// [`CodecError::UninitializedField`].
    pub fn try_is_beacon_active(&self, beacon: usize) -> CodecResult<bool> {
        if beacon >= MAX_BEACONS {
            trace!(beacon, "beacon index outside boundaries");
            return Err(CodecError::FieldIdBoundaries);
        }

        let id = FieldId::try_from(FieldId::Beacon1Active as u8 + beacon as u8)
            .map_err(|_| CodecError::FieldIdBoundaries)?;
        self.store
            .try_get_bounded(id, FieldId::Beacon1Active, FieldId::Beacon4Active)
    }

    /// State-request flag, failing when the field was never received
    pub fn try_is_request_state(&self) -> CodecResult<bool> {
        self.store.try_get_bounded(
            FieldId::RequestState,
            FieldId::RequestState,
            FieldId::RequestState,
        )
    }

    /// State-set flag, failing when the field was never received
    pub fn try_is_set_state(&self) -> CodecResult<bool> {
        self.store
            .try_get_bounded(FieldId::SetState, FieldId::SetState, FieldId::SetState)
    }

    /// Receiver identifier, failing when the field was never received
    pub fn try_receiver_id(&self) -> CodecResult<i32> {
        self.store
            .try_get_bounded(FieldId::ReceiverId, FieldId::ReceiverId, FieldId::ReceiverId)
    }

    /// State-request flag, `false` when unset
    pub fn is_request_state(&self) -> bool {
        self.try_get(FieldId::RequestState).unwrap_or(false)
    }

    /// State-set flag, `false` when unset
    pub fn is_set_state(&self) -> bool {
        self.try_get(FieldId::SetState).unwrap_or(false)
    }

    /// ESP32 flashing-mode reboot flag, `false` when unset
    pub fn is_esp32_flashing_mode(&self) -> bool {
        self.try_get(FieldId::RebootEsp32FlashingMode)
            .unwrap_or(false)
    }

    /// Initialize the beacon position fields from an array.
    ///
    /// Layout: coordinate step 1, beacon step 3, i.e.
    /// `[b1x, b1y, b1z, b2x, ...]`.
    pub fn set_positions_from_slice(&mut self, positions: &[i32; BEACON_POSITION_FIELDS]) {
        let base = FieldId::Beacon1PositionX as u8;
        for (offset, &position) in positions.iter().enumerate() {
            if let Ok(id) = FieldId::try_from(base + offset as u8) {
                self.store.set(id, FieldValue::Integer(position));
            }
        }
    }

    /// Copy currently-set beacon position fields into `positions`, leaving
    /// entries for unset fields untouched. Same layout as
    /// [`set_positions_from_slice`](Self::set_positions_from_slice).
    pub fn copy_positions_if_set(&self, positions: &mut [i32; BEACON_POSITION_FIELDS]) {
        let base = FieldId::Beacon1PositionX as u8;
        for (offset, slot) in positions.iter_mut().enumerate() {
            if let Ok(id) = FieldId::try_from(base + offset as u8) {
                if let Some(value) = self.store.try_get::<i32>(id) {
                    *slot = value;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_applies_listed_fields_only() {
        let mut codec = LocusCodec::new();
        codec
            .deserialize(br#"{"is1Active": true, "positionX": 42}"#)
            .unwrap();

        assert_eq!(codec.try_get::<bool>(FieldId::Beacon1Active), Some(true));
        assert_eq!(codec.try_get::<i32>(FieldId::PositionX), Some(42));

        for id in FieldId::all() {
            if id != FieldId::Beacon1Active && id != FieldId::PositionX {
                assert!(!codec.is_field_set(id), "{:?} should stay unset", id);
            }
        }
    }

    #[test]
    fn test_deserialize_unknown_field_is_syntax() {
        let mut codec = LocusCodec::new();
        assert_eq!(
            codec.deserialize(br#"{"unknownField": 1}"#),
            Err(CodecError::Syntax)
        );
    }

    #[test]
    fn test_deserialize_bad_literal_is_syntax() {
        let mut codec = LocusCodec::new();
        assert_eq!(
            codec.deserialize(br#"{"is1Active": tru}"#),
            Err(CodecError::Syntax)
        );
    }

    #[test]
    fn test_deserialize_type_mismatch_is_syntax() {
        let mut codec = LocusCodec::new();
        // Integer literal on a boolean field.
        assert_eq!(
            codec.deserialize(br#"{"is1Active": 1}"#),
            Err(CodecError::Syntax)
        );
        // Boolean literal on an integer field.
        assert_eq!(
            codec.deserialize(br#"{"positionX": true}"#),
            Err(CodecError::Syntax)
        );
    }

    #[test]
    fn test_serialize_empty_state_is_empty_object() {
        let codec = LocusCodec::new();
        let mut out = [0u8; 16];
        let written = codec.serialize(&mut out).unwrap();
        assert_eq!(&out[..written], b"{}");
    }

    #[test]
    fn test_serialize_small_buffer() {
        let mut codec = LocusCodec::new();
        codec.set_field(FieldId::ReceiverId, 1234);
        let mut out = [0u8; 8];
        assert_eq!(codec.serialize(&mut out), Err(CodecError::SmallBuffer));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut codec = LocusCodec::new();
        codec.deserialize(br#"{"is2Active": true}"#).unwrap();
        codec.reset();

        let mut out = [0u8; 16];
        let written = codec.serialize(&mut out).unwrap();
        assert_eq!(&out[..written], b"{}");
    }

    #[test]
    fn test_beacon_accessor_boundaries() {
        let mut codec = LocusCodec::new();
        codec.deserialize(br#"{"is2Active": true}"#).unwrap();

        assert_eq!(codec.try_is_beacon_active(1), Ok(true));
        assert_eq!(
            codec.try_is_beacon_active(0),
            Err(CodecError::UninitializedField)
        );
        assert_eq!(
            codec.try_is_beacon_active(4),
            Err(CodecError::FieldIdBoundaries)
        );
        assert_eq!(
            codec.try_is_beacon_active(usize::MAX),
            Err(CodecError::FieldIdBoundaries)
        );
    }

    #[test]
    fn test_mode_flag_accessors_default_false() {
        let mut codec = LocusCodec::new();
        assert!(!codec.is_request_state());
        assert!(!codec.is_set_state());
        assert!(!codec.is_esp32_flashing_mode());
        assert_eq!(
            codec.try_is_request_state(),
            Err(CodecError::UninitializedField)
        );

        codec
            .deserialize(br#"{"isRequestState": true, "isEsp32Flash": true}"#)
            .unwrap();
        assert!(codec.is_request_state());
        assert!(codec.is_esp32_flashing_mode());
        assert_eq!(codec.try_is_request_state(), Ok(true));
        assert_eq!(codec.try_is_set_state(), Err(CodecError::UninitializedField));
    }

    #[test]
    fn test_position_block_helpers() {
        let mut codec = LocusCodec::new();
        let positions = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        codec.set_positions_from_slice(&positions);

        assert_eq!(codec.try_get::<i32>(FieldId::Beacon1PositionX), Some(1));
        assert_eq!(codec.try_get::<i32>(FieldId::Beacon2PositionX), Some(4));
        assert_eq!(codec.try_get::<i32>(FieldId::Beacon4PositionZ), Some(12));

        let mut copied = [0i32; 12];
        codec.copy_positions_if_set(&mut copied);
        assert_eq!(copied, positions);
    }

    #[test]
    fn test_copy_positions_leaves_unset_slots_alone() {
        let mut codec = LocusCodec::new();
        codec.set_field(FieldId::Beacon3PositionY, 77);

        let mut positions = [-1i32; 12];
        codec.copy_positions_if_set(&mut positions);

        // Beacon 3 Y sits at offset 7 in the block layout.
        let mut expected = [-1i32; 12];
        expected[7] = 77;
        assert_eq!(positions, expected);
    }

    #[test]
    fn test_receiver_id_accessor() {
        let mut codec = LocusCodec::new();
        assert_eq!(codec.try_receiver_id(), Err(CodecError::UninitializedField));
        codec.deserialize(br#"{"receiverId": 12}"#).unwrap();
        assert_eq!(codec.try_receiver_id(), Ok(12));
    }
}
