//! # Byte Codec
//!
//! Deterministic encoding primitives for the NEM wire format. Every field on
//! the wire is either a little-endian fixed-width integer or a byte sequence
//! preceded by a 4-byte little-endian length.
//!
//! The codec never truncates: an integer that does not fit its declared width
//! is a [`CodecError::FieldOverflow`]. A silently truncated field would shift
//! every following byte and the node would reject the transaction (or worse,
//! read a different one).
//!
//! [`ByteWriter`] and [`ByteReader`] wrap the `bytes` crate's buffers so the
//! serializer and the parser read as a flat list of field operations.

mod hex_string;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use thiserror::Error;

use crate::config::WORD_WIDTH;

pub use self::hex_string::{hex_to_array, hex_to_bytes, is_valid_hex, to_hex};

/// Errors raised while encoding or decoding wire fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("malformed hex: {reason}")]
    MalformedHex { reason: &'static str },

    #[error("value {value} does not fit in a {width}-byte field")]
    FieldOverflow { value: u64, width: usize },

    #[error("expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEnd { needed: usize, remaining: usize },
}

/// Encodes `value` as exactly `width` little-endian bytes.
///
/// Values narrower than the field are zero-padded on the high end. Values
/// wider than the field fail with [`CodecError::FieldOverflow`].
///
/// ```
/// use nem_protocol::codec::encode_le;
///
/// assert_eq!(encode_le(0x0101, 4).unwrap(), vec![0x01, 0x01, 0x00, 0x00]);
/// assert!(encode_le(256, 1).is_err());
/// ```
pub fn encode_le(value: u64, width: usize) -> Result<Vec<u8>, CodecError> {
    let bytes = value.to_le_bytes();
    let significant = width.min(bytes.len());
    if bytes[significant..].iter().any(|&b| b != 0) {
        return Err(CodecError::FieldOverflow { value, width });
    }
    let mut out = Vec::with_capacity(width);
    out.extend_from_slice(&bytes[..significant]);
    out.resize(width, 0);
    Ok(out)
}

/// Decodes a little-endian integer of any width up to 8 significant bytes.
///
/// Extra high bytes are accepted only when they are zero.
pub fn decode_le(bytes: &[u8]) -> Result<u64, CodecError> {
    let significant = bytes.len().min(8);
    if bytes[significant..].iter().any(|&b| b != 0) {
        return Err(CodecError::FieldOverflow {
            value: u64::MAX,
            width: 8,
        });
    }
    Ok(bytes[..significant]
        .iter()
        .rev()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
}

// ---------------------------------------------------------------------------
// ByteWriter
// ---------------------------------------------------------------------------

/// Append-only buffer for building a wire message field by field.
///
/// Order of calls is order on the wire; nothing is ever reordered.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buf: BytesMut,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Appends a 4-byte little-endian word.
    pub fn put_u32(&mut self, value: u32) -> &mut Self {
        self.buf.put_u32_le(value);
        self
    }

    /// Appends an 8-byte little-endian word.
    pub fn put_u64(&mut self, value: u64) -> &mut Self {
        self.buf.put_u64_le(value);
        self
    }

    /// Appends `value` as a `width`-byte little-endian field, rejecting
    /// values that do not fit.
    pub fn put_uint(&mut self, value: u64, width: usize) -> Result<&mut Self, CodecError> {
        let encoded = encode_le(value, width)?;
        self.buf.put_slice(&encoded);
        Ok(self)
    }

    /// Appends a 4-byte length prefix.
    pub fn put_len(&mut self, len: usize) -> Result<&mut Self, CodecError> {
        self.put_uint(len as u64, WORD_WIDTH)
    }

    /// Appends raw bytes verbatim.
    pub fn put_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.put_slice(bytes);
        self
    }

    /// Appends `bytes` preceded by its 4-byte length.
    pub fn put_prefixed(&mut self, bytes: &[u8]) -> Result<&mut Self, CodecError> {
        self.put_len(bytes.len())?;
        Ok(self.put_bytes(bytes))
    }

    /// Decodes `hex` and appends the raw bytes.
    pub fn put_hex(&mut self, hex: &str) -> Result<&mut Self, CodecError> {
        let bytes = hex_to_bytes(hex)?;
        Ok(self.put_bytes(&bytes))
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf.to_vec()
    }

    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }
}

// ---------------------------------------------------------------------------
// ByteReader
// ---------------------------------------------------------------------------

/// Cursor over a wire message. Every read checks the remaining length first,
/// so truncated input is an error rather than a panic.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    fn ensure(&self, needed: usize) -> Result<(), CodecError> {
        if self.buf.remaining() < needed {
            return Err(CodecError::UnexpectedEnd {
                needed,
                remaining: self.buf.remaining(),
            });
        }
        Ok(())
    }

    pub fn get_u32(&mut self) -> Result<u32, CodecError> {
        self.ensure(4)?;
        Ok(self.buf.get_u32_le())
    }

    pub fn get_u64(&mut self) -> Result<u64, CodecError> {
        self.ensure(8)?;
        Ok(self.buf.get_u64_le())
    }

    /// Reads a 4-byte length prefix.
    pub fn get_len(&mut self) -> Result<usize, CodecError> {
        Ok(self.get_u32()? as usize)
    }

    /// Borrows the next `n` bytes and advances past them.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        self.ensure(n)?;
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        Ok(head)
    }

    /// Reads a 4-byte length and then that many bytes.
    pub fn get_prefixed(&mut self) -> Result<&'a [u8], CodecError> {
        let len = self.get_len()?;
        self.take(len)
    }

    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
