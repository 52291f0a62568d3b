//! # Field Registry - Locus State Schema
//!
//! ## Purpose
//!
//! Central source of truth for the fixed locus field schema: the closed
//! [`FieldId`] enumeration, each field's wire name and value kind, and the
//! coercion from raw JSON value bytes into a typed [`FieldValue`]. The
//! schema is fixed at build time and is the contract surface a deployment
//! must keep in sync between the device and the controller.
//!
//! ## Integration Points
//!
//! - **Deserialization**: key tokens resolve through [`FieldId::from_wire_name`],
//!   value tokens coerce through [`FieldValue::parse`]
//! - **Serialization**: the generator takes names from [`FieldId::wire_name`]
//!   and shapes from the stored [`FieldValue`]
//! - **Field store**: `FieldId` doubles as the slot index everywhere
//!
//! There is no parser dispatch table: [`FieldId::kind`] yields the field's
//! [`FieldKind`] tag and a single coercion routine branches on it, which
//! keeps O(1) dispatch while making an id/kind mismatch unrepresentable.

use crate::error::{CodecError, CodecResult};
use num_enum::TryFromPrimitive;

/// Stable identifier for every scalar slot in the locus state schema.
///
/// Discriminants are stable wire-adjacent values: they index the field
/// store, order serialized output, and must not be reassigned once a
/// deployment ships.
///
/// ## Field groups
/// - **Beacon activity (0-3)**: `is<N>Active` boolean flags
/// - **Beacon positions (4-15)**: `position<N>{x,y,z}` integer coordinates
/// - **Mode flags (16-17, 22)**: state request/set and ESP32 flashing mode
/// - **Receiver (18-21)**: own position and receiver identifier
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TryFromPrimitive)]
pub enum FieldId {
    /// Beacon 1 activity flag (`is1Active`)
    Beacon1Active = 0,
    /// Beacon 2 activity flag (`is2Active`)
    Beacon2Active = 1,
    /// Beacon 3 activity flag (`is3Active`)
    Beacon3Active = 2,
    /// Beacon 4 activity flag (`is4Active`)
    Beacon4Active = 3,

    // Beacon position block. Layout is coordinate-minor: x, y, z per
    // beacon, beacons ascending. The position helpers rely on this order.
    Beacon1PositionX = 4,
    Beacon1PositionY = 5,
    Beacon1PositionZ = 6,
    Beacon2PositionX = 7,
    Beacon2PositionY = 8,
    Beacon2PositionZ = 9,
    Beacon3PositionX = 10,
    Beacon3PositionY = 11,
    Beacon3PositionZ = 12,
    Beacon4PositionX = 13,
    Beacon4PositionY = 14,
    Beacon4PositionZ = 15,

    /// Controller asks the device to report its state (`isRequestState`)
    RequestState = 16,
    /// Message carries state the device should apply (`isSetState`)
    SetState = 17,

    /// Receiver position (`positionX`)
    PositionX = 18,
    /// Receiver position (`positionY`)
    PositionY = 19,
    /// Receiver position (`positionZ`)
    PositionZ = 20,
    /// Receiver identifier (`receiverId`)
    ReceiverId = 21,

    /// Reboot the ESP32 into flashing mode (`isEsp32Flash`)
    RebootEsp32FlashingMode = 22,
}

impl FieldId {
    /// Number of fields in the schema
    pub const COUNT: usize = 23;

    /// Canonical wire name of this field, as it appears as a JSON key
    pub fn wire_name(&self) -> &'static str {
        match *self {
            FieldId::Beacon1Active => "is1Active",
            FieldId::Beacon2Active => "is2Active",
            FieldId::Beacon3Active => "is3Active",
            FieldId::Beacon4Active => "is4Active",
            FieldId::Beacon1PositionX => "position1x",
            FieldId::Beacon1PositionY => "position1y",
            FieldId::Beacon1PositionZ => "position1z",
            FieldId::Beacon2PositionX => "position2x",
            FieldId::Beacon2PositionY => "position2y",
            FieldId::Beacon2PositionZ => "position2z",
            FieldId::Beacon3PositionX => "position3x",
            FieldId::Beacon3PositionY => "position3y",
            FieldId::Beacon3PositionZ => "position3z",
            FieldId::Beacon4PositionX => "position4x",
            FieldId::Beacon4PositionY => "position4y",
            FieldId::Beacon4PositionZ => "position4z",
            FieldId::RequestState => "isRequestState",
            FieldId::SetState => "isSetState",
            FieldId::PositionX => "positionX",
            FieldId::PositionY => "positionY",
            FieldId::PositionZ => "positionZ",
            FieldId::ReceiverId => "receiverId",
            FieldId::RebootEsp32FlashingMode => "isEsp32Flash",
        }
    }

    /// Value kind this field is declared with
    pub fn kind(&self) -> FieldKind {
        match *self {
            FieldId::Beacon1Active
            | FieldId::Beacon2Active
            | FieldId::Beacon3Active
            | FieldId::Beacon4Active
            | FieldId::RequestState
            | FieldId::SetState
            | FieldId::RebootEsp32FlashingMode => FieldKind::Boolean,
            _ => FieldKind::Integer,
        }
    }

    /// Resolve a wire name to its field identifier.
    ///
    /// Exact byte-for-byte match against the schema table; `None` means
    /// "unknown field", which the codec treats as a syntax-class error
    /// rather than silently ignoring the pair.
    pub fn from_wire_name(name: &[u8]) -> Option<FieldId> {
        FieldId::all().find(|id| id.wire_name().as_bytes() == name)
    }

    /// All field identifiers in ascending (serialization) order
    pub fn all() -> impl Iterator<Item = FieldId> {
        (0..FieldId::COUNT as u8).filter_map(|raw| FieldId::try_from(raw).ok())
    }
}

/// Value kind a field is statically bound to.
///
/// The schema supports exactly the two scalar JSON primitive shapes;
/// strings, floats and nesting are rejected during coercion or earlier
/// during structural validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// JSON `true` / `false` literal
    Boolean,
    /// Base-10 signed integer literal
    Integer,
}

/// Current value of one field slot.
///
/// `Unset` is the default state and is distinct from `Boolean(false)` and
/// `Integer(0)`; unset slots are omitted from serialized output entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldValue {
    /// Slot holds no value (never set, or cleared by a reset)
    #[default]
    Unset,
    Boolean(bool),
    Integer(i32),
}

impl FieldValue {
    /// Whether the slot currently stores a value
    pub fn is_set(&self) -> bool {
        !matches!(self, FieldValue::Unset)
    }

    /// Kind of the stored value, if any
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            FieldValue::Unset => None,
            FieldValue::Boolean(_) => Some(FieldKind::Boolean),
            FieldValue::Integer(_) => Some(FieldKind::Integer),
        }
    }

    /// Coerce raw JSON value bytes into a typed value of the given kind.
    ///
    /// Booleans accept exactly the literals `true` and `false`; truncated
    /// (`tru`) or extended (`truely`) spellings fail. Integers are strict
    /// base-10 `i32` with an optional leading sign; empty digit runs,
    /// embedded junk, floats and out-of-range magnitudes all fail. Any
    /// failure is [`CodecError::Syntax`].
    pub fn parse(kind: FieldKind, raw: &[u8]) -> CodecResult<FieldValue> {
        match kind {
            FieldKind::Boolean => match raw {
                b"true" => Ok(FieldValue::Boolean(true)),
                b"false" => Ok(FieldValue::Boolean(false)),
                _ => Err(CodecError::Syntax),
            },
            FieldKind::Integer => core::str::from_utf8(raw)
                .ok()
                .and_then(|text| text.parse::<i32>().ok())
                .map(FieldValue::Integer)
                .ok_or(CodecError::Syntax),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value)
    }
}
