//! Hex string validation and conversion.
//!
//! Everything that enters the core as hex (public keys, private keys, message
//! payloads) goes through [`hex_to_bytes`], which validates with
//! [`is_valid_hex`] before decoding. Everything that leaves the core as hex is
//! rendered by [`to_hex`] in lowercase.

use super::CodecError;

/// Returns `true` iff `s` is well-formed hexadecimal: only `0-9a-fA-F` and an
/// even number of characters. The empty string is valid.
///
/// # Example
///
/// ```
/// use nem_protocol::codec::is_valid_hex;
///
/// assert!(is_valid_hex(""));
/// assert!(is_valid_hex("0F"));
/// assert!(!is_valid_hex("0fa"));
/// assert!(!is_valid_hex("0g"));
/// ```
pub fn is_valid_hex(s: &str) -> bool {
    s.len() % 2 == 0 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Decodes a hex string into raw bytes, most significant nibble first.
///
/// Fails with [`CodecError::MalformedHex`] before any decoding happens if
/// the input has odd length or a non-hex character.
pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>, CodecError> {
    if s.len() % 2 != 0 {
        return Err(CodecError::MalformedHex {
            reason: "odd number of characters",
        });
    }
    if !is_valid_hex(s) {
        return Err(CodecError::MalformedHex {
            reason: "invalid hex character",
        });
    }
    hex::decode(s).map_err(|_| CodecError::MalformedHex {
        reason: "invalid hex character",
    })
}

/// Decodes a hex string that must describe exactly `N` bytes.
pub fn hex_to_array<const N: usize>(s: &str) -> Result<[u8; N], CodecError> {
    let bytes = hex_to_bytes(s)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| CodecError::LengthMismatch {
            expected: N,
            actual: bytes.len(),
        })
}

/// Renders bytes as lowercase hex, two characters per byte, no separators.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
