//! # Fee Calculation
//!
//! The network charges two independent fee components for a transfer: one
//! for the amount moved and one for the attached message. Each function here
//! computes exactly one component, in whole XEM. Adding them up (and scaling
//! the sum to micro-XEM with [`xem_to_micro`]) is the caller's job.
//!
//! Underpaying by a single micro-unit makes the node reject the transaction,
//! so the boundaries below are exact: `20 000` is the first amount that pays
//! more than the minimum and `250 000` is the first that pays the maximum.

use crate::config::{
    FEE_AMOUNT_STEP, FEE_LOWER_THRESHOLD, FEE_UPPER_THRESHOLD, MAX_AMOUNT_FEE,
    MESSAGE_FEE_CHUNK, MICRO_XEM_PER_XEM, MIN_AMOUNT_FEE,
};

/// Fee component for transferring `amount` whole XEM.
///
/// - `amount < 20 000` pays 1
/// - `amount >= 250 000` pays 25
/// - otherwise `floor(amount / 10 000)`
///
/// Amounts that are not comparable (NaN) or negative pay the minimum.
///
/// ```
/// use nem_protocol::fee::fee_by_amount;
///
/// assert_eq!(fee_by_amount(19_999.0), 1);
/// assert_eq!(fee_by_amount(20_000.0), 2);
/// assert_eq!(fee_by_amount(249_999.0), 24);
/// assert_eq!(fee_by_amount(250_000.0), 25);
/// ```
pub fn fee_by_amount(amount: f64) -> u64 {
    if amount.is_nan() || amount < FEE_LOWER_THRESHOLD {
        MIN_AMOUNT_FEE
    } else if amount >= FEE_UPPER_THRESHOLD {
        MAX_AMOUNT_FEE
    } else {
        (amount / FEE_AMOUNT_STEP).floor() as u64
    }
}

/// Fee component for attaching `payload` as a message: nothing for an empty
/// payload, otherwise one XEM per started 32-byte chunk.
///
/// The payload is measured as it will appear on the wire, so for an encrypted
/// message pass the packed `salt || iv || ciphertext` bytes.
pub fn fee_by_message(payload: &[u8]) -> u64 {
    fee_by_message_len(payload.len())
}

/// [`fee_by_message`] for a payload of `len` bytes that has not been built
/// yet.
pub fn fee_by_message_len(len: usize) -> u64 {
    len.div_ceil(MESSAGE_FEE_CHUNK) as u64
}

/// Converts a whole-XEM fee to the micro-XEM value carried on the wire.
pub fn xem_to_micro(whole_xem: u64) -> u64 {
    whole_xem.saturating_mul(MICRO_XEM_PER_XEM)
}

/// Converts a micro-XEM amount to (fractional) whole XEM, the unit
/// [`fee_by_amount`] works in.
pub fn micro_to_xem(micro: u64) -> f64 {
    micro as f64 / MICRO_XEM_PER_XEM as f64
}
