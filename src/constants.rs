//! Protocol constants for the locus state message format
//!
//! These ceilings define the only resource limits the codec enforces
//! internally. They must stay in sync between the device and the controller:
//! a controller that sends more key/value pairs than `MAX_SCAN_TOKENS` can
//! represent will always be answered with a small-buffer error.

use crate::field::FieldId;

/// Token array capacity for a single scan.
///
/// One object marker plus a key and a value token per field. A well-formed
/// message never needs more; anything longer is rejected as
/// [`CodecError::SmallBuffer`](crate::CodecError::SmallBuffer) rather than
/// scanned into unbounded memory.
pub const MAX_SCAN_TOKENS: usize = 1 + FieldId::COUNT * 2;

/// Number of positioning beacons addressed by the `is<N>Active` and
/// `position<N>{x,y,z}` field groups.
pub const MAX_BEACONS: usize = 4;

/// Number of beacon position fields (`MAX_BEACONS` beacons, three
/// coordinates each), the length of the slices accepted by the position
/// block helpers on [`LocusCodec`](crate::LocusCodec).
pub const BEACON_POSITION_FIELDS: usize = MAX_BEACONS * 3;
