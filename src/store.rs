//! # Field Store - Locus State Slots
//!
//! ## Purpose
//!
//! The in-memory state the codec reads and writes: one fixed slot per
//! [`FieldId`], holding the field's current [`FieldValue`] or `Unset`. The
//! store is owned by the codec instance, never resizes, and is mutated only
//! by deserialization, reset, and the explicit setters.
//!
//! Typed reads go through the [`FieldScalar`] trait so `bool` and `i32`
//! access shares one implementation; a type mismatch reads the same as an
//! unset slot ("not present") rather than panicking or reinterpreting.

use crate::error::{CodecError, CodecResult};
use crate::field::{FieldId, FieldValue};
use tracing::trace;

/// Scalar types storable in a field slot.
///
/// Implemented for `bool` and `i32` only; the schema has no other value
/// kinds.
pub trait FieldScalar: Copy {
    /// Extract a scalar of this type from a slot value, if the slot holds
    /// exactly this type.
    fn from_value(value: FieldValue) -> Option<Self>;
}

impl FieldScalar for bool {
    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Boolean(flag) => Some(flag),
            _ => None,
        }
    }
}

impl FieldScalar for i32 {
    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Integer(number) => Some(number),
            _ => None,
        }
    }
}

/// Fixed-length container of field slots, indexed by [`FieldId`].
///
/// Length is always exactly [`FieldId::COUNT`]; identifiers are valid
/// indices by construction, so slot access never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldStore {
    slots: [FieldValue; FieldId::COUNT],
}

impl FieldStore {
    /// Create a store with every slot unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Set every slot back to unset.
    ///
    /// Used to clear per-cycle state between independent messages.
    pub fn reset(&mut self) {
        self.slots = [FieldValue::Unset; FieldId::COUNT];
    }

    /// Unconditionally overwrite a slot
    pub fn set(&mut self, id: FieldId, value: FieldValue) {
        self.slots[id as usize] = value;
    }

    /// Current value of a slot
    pub fn get(&self, id: FieldId) -> FieldValue {
        self.slots[id as usize]
    }

    /// Whether a slot currently stores a value
    pub fn is_set(&self, id: FieldId) -> bool {
        self.slots[id as usize].is_set()
    }

    /// Typed read of a slot.
    ///
    /// Returns `None` both for an unset slot and for a slot holding the
    /// other scalar type; [`get`](Self::get) distinguishes the two.
    pub fn try_get<T: FieldScalar>(&self, id: FieldId) -> Option<T> {
        T::from_value(self.slots[id as usize])
    }

    /// Range-checked typed read used by the convenience field groups.
    ///
    /// An identifier outside `[lo, hi]` is a boundary violation; an in-range
    /// slot that is unset (or holds the other type) is an uninitialized
    /// field. The two failures are deliberately distinct error codes.
    pub fn try_get_bounded<T: FieldScalar>(
        &self,
        id: FieldId,
        lo: FieldId,
        hi: FieldId,
    ) -> CodecResult<T> {
        if id < lo || id > hi {
            trace!(field = ?id, ?lo, ?hi, "field id outside declared boundaries");
            return Err(CodecError::FieldIdBoundaries);
        }

        self.try_get(id).ok_or(CodecError::UninitializedField)
    }
}
