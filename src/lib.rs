//! # Locus Codec - Device-State JSON Message Engine
//!
//! ## Purpose
//!
//! Schema-bound codec converting a fixed set of named device-state fields
//! (beacon activity flags, beacon and receiver positions, mode flags) to
//! and from small JSON text messages, for state exchange between a
//! resource-constrained positioning device and its controller over a
//! byte-oriented channel.
//!
//! ## Architecture Role
//!
//! ```text
//! Transport → [locus-codec] → Firmware Logic
//!     ↑             ↓              ↓
//! Raw Bytes    Scan/Validate   Typed Fields
//! Framing      Coerce/Store    Beacon State
//! Sessions     Generate        Mode Flags
//! ```
//!
//! Transport, framing and session management are external collaborators:
//! both directions work on caller-owned, already-resident byte buffers.
//!
//! ## What This Crate Contains
//! - [`LocusCodec`]: deserialize/serialize orchestration plus typed field
//!   accessors
//! - [`FieldId`] registry: the fixed 23-field schema (wire names, value
//!   kinds) shared by device and controller
//! - Bounded JSON [`scanner`] and [`generator`]: tokenization, structural
//!   validation and text production with fixed memory ceilings
//! - [`CodecError`]: the closed failure taxonomy every operation returns
//!
//! ## What This Crate Does NOT Contain
//! - Network or serial transport, message framing, retransmission
//! - Nested JSON, string or float fields, dynamically-sized schemas
//! - Allocation: deserialize and serialize never touch the heap
//!
//! ## Resource Profile
//!
//! - **Token ceiling**: [`constants::MAX_SCAN_TOKENS`] tokens per scan, on
//!   the stack; longer messages fail with
//!   [`CodecError::SmallBuffer`]
//! - **Output**: written directly into the caller's buffer, byte count
//!   returned
//! - **Concurrency**: instances are independent; a single instance is not
//!   reentrant and must be driven from one thread of control

pub mod codec;
pub mod constants;
pub mod error;
pub mod field;
pub mod generator;
pub mod scanner;
pub mod store;

// Re-export key types for convenience
pub use codec::LocusCodec;
pub use constants::{BEACON_POSITION_FIELDS, MAX_BEACONS, MAX_SCAN_TOKENS};
pub use error::{CodecError, CodecResult};
pub use field::{FieldId, FieldKind, FieldValue};
pub use generator::{generate_object, JsonEntry};
pub use scanner::{ScanError, Scanner, Token, TokenArray, TokenKind};
pub use store::{FieldScalar, FieldStore};
