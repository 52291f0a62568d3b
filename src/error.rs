//! Codec-level errors for locus state message processing
//!
//! Every fallible operation in this crate returns one of these values
//! directly; there is no out-of-band or process-wide error state. The
//! taxonomy is closed: callers can match exhaustively and decide whether to
//! drop the message, request a retransmission, or surface the error upstream.

use thiserror::Error;

/// Errors produced while scanning, validating, applying, or generating a
/// locus state message.
///
/// The first three variants classify message-level failures; the last two
/// are semantic errors reported by the typed field accessors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// Malformed JSON text, a message shape other than one flat object of
    /// string/primitive pairs, an unknown field name, or a value that does
    /// not parse as the field's declared kind.
    #[error("JSON syntax error")]
    Syntax,

    /// A capacity ceiling was hit: the input produced more tokens than the
    /// bounded token array holds, or the caller-supplied output buffer is
    /// too small for the generated message.
    #[error("small buffer: token or output capacity exceeded")]
    SmallBuffer,

    /// Reserved for collaborator failures with no mapped cause. Should not
    /// occur.
    #[error("unknown codec error")]
    Unknown,

    /// An accessor was called with a field identifier outside its declared
    /// valid sub-range.
    #[error("field identifier out of declared boundaries")]
    FieldIdBoundaries,

    /// An accessor was called on a field slot that does not currently store
    /// a value.
    #[error("uninitialized field")]
    UninitializedField,
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;
