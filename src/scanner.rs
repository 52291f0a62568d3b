//! # JSON Scanner - Bounded Message Tokenization
//!
//! ## Purpose
//!
//! Single-pass tokenizer for locus state messages plus the structural
//! validation that gates deserialization. [`Scanner`] walks a caller-owned
//! byte buffer once and classifies byte ranges into object, array, string
//! and primitive tokens; [`TokenArray`] holds the bounded result and checks
//! it against the only supported message shape before any field is applied.
//!
//! ## Integration Points
//!
//! - **Input**: raw message bytes from the transport layer, not required to
//!   be null-terminated
//! - **Output**: [`Token`] byte ranges resolved lazily against the same
//!   input buffer - no copies, no allocation
//! - **Capacity**: token storage is fixed at [`MAX_SCAN_TOKENS`]; longer
//!   messages fail with a distinct capacity error rather than growing
//!
//! ## Error Split
//!
//! [`ScanError`] keeps malformed bytes, truncated input, and exhausted
//! token capacity apart. The codec maps the first two to
//! [`CodecError::Syntax`] and the last to [`CodecError::SmallBuffer`].
//!
//! The scanner itself is shape-agnostic: nesting tokenizes fine and is only
//! rejected afterwards by [`TokenArray::is_structurally_valid`]. Value
//! spelling (`true` vs `tru`, digits vs junk) is the coercion layer's
//! concern.

use crate::constants::MAX_SCAN_TOKENS;
use crate::error::{CodecError, CodecResult};
use thiserror::Error;

/// Sentinel end offset for a container token whose closing bracket has not
/// been seen yet. Never visible after a successful scan.
const UNCLOSED: usize = usize::MAX;

/// Scanner-level failures, kept distinct so the codec can map capacity
/// exhaustion differently from bad input.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    /// Invalid byte where a token was expected, a bad string escape, or an
    /// unmatched closing bracket
    #[error("invalid character in JSON input")]
    Invalid,

    /// Input ended inside a string or an unclosed object/array; the message
    /// is incomplete rather than malformed
    #[error("incomplete JSON input")]
    Partial,

    /// More tokens than the supplied token storage can hold
    #[error("not enough token storage for JSON input")]
    NoMemory,
}

/// Classification of a scanned token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenKind {
    /// Never-written token slot
    #[default]
    Undefined,
    Object,
    Array,
    String,
    Primitive,
}

/// One scanned token: a classified byte range into the source buffer.
///
/// Tokens do not own the bytes they reference; they are only meaningful
/// while the buffer passed to [`Scanner::scan`] is still live, and are
/// never stored past the deserialize call that produced them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    /// The token's bytes within the buffer it was scanned from.
    ///
    /// For string tokens the range excludes the surrounding quotes.
    pub fn bytes<'a>(&self, source: &'a [u8]) -> &'a [u8] {
        &source[self.start..self.end]
    }
}

/// Single-pass JSON tokenizer state: current scan position and the
/// enclosing (superior) token, retained across the scan loop. One scan per
/// scanner instance; the codec creates a fresh one per deserialize call.
#[derive(Debug, Default)]
pub struct Scanner {
    pos: usize,
    tok_next: usize,
    tok_super: Option<usize>,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `input` into `tokens`, returning the number of tokens filled.
    ///
    /// Single forward pass, no backtracking: container tokens stay open
    /// until their closing bracket arrives, and any container still open at
    /// end of input makes the whole scan [`ScanError::Partial`].
    pub fn scan(&mut self, input: &[u8], tokens: &mut [Token]) -> Result<usize, ScanError> {
        while self.pos < input.len() {
            let byte = input[self.pos];
            match byte {
                b'{' | b'[' => {
                    let kind = if byte == b'{' {
                        TokenKind::Object
                    } else {
                        TokenKind::Array
                    };
                    let index = self.alloc_token(tokens)?;
                    tokens[index] = Token {
                        kind,
                        start: self.pos,
                        end: UNCLOSED,
                    };
                    self.tok_super = Some(index);
                }
                b'}' | b']' => {
                    let kind = if byte == b'}' {
                        TokenKind::Object
                    } else {
                        TokenKind::Array
                    };
                    match self.innermost_open(tokens, self.tok_next) {
                        // Closing bracket with no open container.
                        None => return Err(ScanError::Invalid),
                        Some(index) => {
                            if tokens[index].kind != kind {
                                return Err(ScanError::Invalid);
                            }
                            tokens[index].end = self.pos + 1;
                            self.tok_super = self.innermost_open(tokens, index);
                        }
                    }
                }
                b'"' => self.scan_string(input, tokens)?,
                b'\t' | b'\r' | b'\n' | b' ' => {}
                b':' => self.tok_super = self.tok_next.checked_sub(1),
                b',' => {
                    if let Some(sup) = self.tok_super {
                        if !matches!(tokens[sup].kind, TokenKind::Object | TokenKind::Array) {
                            self.tok_super = self.innermost_open(tokens, self.tok_next);
                        }
                    }
                }
                _ => self.scan_primitive(input, tokens)?,
            }
            self.pos += 1;
        }

        if tokens[..self.tok_next].iter().any(|t| t.end == UNCLOSED) {
            return Err(ScanError::Partial);
        }

        Ok(self.tok_next)
    }

    /// Index of the innermost still-open container below `upper`
    fn innermost_open(&self, tokens: &[Token], upper: usize) -> Option<usize> {
        (0..upper).rev().find(|&i| tokens[i].end == UNCLOSED)
    }

    fn alloc_token(&mut self, tokens: &[Token]) -> Result<usize, ScanError> {
        if self.tok_next >= tokens.len() {
            return Err(ScanError::NoMemory);
        }
        let index = self.tok_next;
        self.tok_next += 1;
        Ok(index)
    }

    /// Scan a quoted string starting at the current position (an opening
    /// quote). The emitted token range excludes the quotes.
    fn scan_string(&mut self, input: &[u8], tokens: &mut [Token]) -> Result<(), ScanError> {
        let start = self.pos;
        self.pos += 1;

        while self.pos < input.len() {
            match input[self.pos] {
                b'"' => {
                    let index = self.alloc_token(tokens).map_err(|error| {
                        self.pos = start;
                        error
                    })?;
                    tokens[index] = Token {
                        kind: TokenKind::String,
                        start: start + 1,
                        end: self.pos,
                    };
                    return Ok(());
                }
                b'\\' if self.pos + 1 < input.len() => {
                    self.pos += 1;
                    match input[self.pos] {
                        b'"' | b'/' | b'\\' | b'b' | b'f' | b'r' | b'n' | b't' => {}
                        b'u' => {
                            for _ in 0..4 {
                                self.pos += 1;
                                if self.pos >= input.len() {
                                    self.pos = start;
                                    return Err(ScanError::Partial);
                                }
                                if !input[self.pos].is_ascii_hexdigit() {
                                    self.pos = start;
                                    return Err(ScanError::Invalid);
                                }
                            }
                        }
                        _ => {
                            self.pos = start;
                            return Err(ScanError::Invalid);
                        }
                    }
                }
                _ => {}
            }
            self.pos += 1;
        }

        // Ran out of input before the closing quote.
        self.pos = start;
        Err(ScanError::Partial)
    }

    /// Scan an unquoted primitive (number, `true`, `false`, `null`) up to
    /// the next structural delimiter. Spelling is not checked here.
    fn scan_primitive(&mut self, input: &[u8], tokens: &mut [Token]) -> Result<(), ScanError> {
        let start = self.pos;

        while self.pos < input.len() {
            match input[self.pos] {
                b'\t' | b'\r' | b'\n' | b' ' | b',' | b']' | b'}' | b':' => break,
                byte if !(0x20..0x7f).contains(&byte) => {
                    self.pos = start;
                    return Err(ScanError::Invalid);
                }
                _ => self.pos += 1,
            }
        }

        let index = self.alloc_token(tokens).map_err(|error| {
            self.pos = start;
            error
        })?;
        tokens[index] = Token {
            kind: TokenKind::Primitive,
            start,
            end: self.pos,
        };
        // Leave the delimiter for the main loop to dispatch.
        self.pos -= 1;
        Ok(())
    }
}

/// Fixed-capacity token storage for one deserialize cycle.
///
/// Capacity is [`MAX_SCAN_TOKENS`]: an object marker plus a key and a value
/// token per schema field. The filled count is `None` until a scan ran, a
/// sentinel state distinct from "scanned with zero tokens".
#[derive(Debug)]
pub struct TokenArray {
    tokens: [Token; MAX_SCAN_TOKENS],
    parsed: Option<usize>,
}

impl Default for TokenArray {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenArray {
    pub fn new() -> Self {
        Self {
            tokens: [Token::default(); MAX_SCAN_TOKENS],
            parsed: None,
        }
    }

    /// Scan `input` into this array and validate the message shape.
    ///
    /// Scanner errors map onto the codec taxonomy (`Invalid`/`Partial` are
    /// syntax-class, `NoMemory` is a capacity failure), and a scan that
    /// succeeds but produces anything other than a flat object of
    /// string/primitive pairs is rejected as syntax before any field can be
    /// written.
    pub fn scan_update(&mut self, input: &[u8]) -> CodecResult<()> {
        let mut scanner = Scanner::new();
        match scanner.scan(input, &mut self.tokens) {
            Ok(count) => {
                self.parsed = Some(count);
                if self.is_structurally_valid() {
                    Ok(())
                } else {
                    Err(CodecError::Syntax)
                }
            }
            Err(ScanError::Invalid) | Err(ScanError::Partial) => Err(CodecError::Syntax),
            Err(ScanError::NoMemory) => Err(CodecError::SmallBuffer),
        }
    }

    /// Whether the scanned tokens form the one supported shape:
    ///
    /// ```text
    /// {
    ///   STRING KEY: PRIMITIVE (int or bool),
    ///   ...
    /// }
    /// ```
    ///
    /// Purely structural - token zero must be an object and the rest must
    /// come in (string, primitive) pairs. Values are not interpreted here.
    pub fn is_structurally_valid(&self) -> bool {
        let Some(count) = self.parsed else {
            return false;
        };

        if count < 1 || count % 2 == 0 {
            return false;
        }

        if self.tokens[0].kind != TokenKind::Object {
            return false;
        }

        self.tokens[1..count]
            .chunks_exact(2)
            .all(|pair| pair[0].kind == TokenKind::String && pair[1].kind == TokenKind::Primitive)
    }

    /// Iterate the scanned tokens as (key, value) pairs, skipping the
    /// object marker. Meaningful only after a structurally valid scan;
    /// yields nothing for an unscanned array.
    pub fn kv_pairs(&self) -> impl Iterator<Item = (&Token, &Token)> {
        let body: &[Token] = match self.parsed {
            Some(count) if count >= 1 => &self.tokens[1..count],
            _ => &[],
        };
        body.chunks_exact(2).map(|pair| (&pair[0], &pair[1]))
    }
}
