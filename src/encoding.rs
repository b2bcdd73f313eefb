//! Nibble to line-symbol encoding for LightwaveRF frames.
//!
//! LightwaveRF sends every 4-bit nibble as one 8-bit line symbol. Each symbol
//! carries exactly six `1` bits and never two consecutive `0` bits, so the
//! receiver always sees a carrier pulse within a short window.
//!
//! ## Functions
//!
//! - [`encode_nibble`]: maps the low nibble of a byte to its line symbol
//! - [`decode_symbol`]: reverse lookup, `None` for bytes that are not symbols
//! - [`encode_buffer`]: encodes a nibble slice into a symbol slice

use crate::consts::MSG_LEN;

/// The 16 LightwaveRF line symbols, indexed by nibble value.
pub static SYMBOLS: [u8; 16] = [
    0xF6, 0xEE, 0xED, 0xEB, 0xDE, 0xDD, 0xDB, 0xBE, 0xBD, 0xBB, 0xB7, 0x7E, 0x7D, 0x7B, 0x77, 0x6F,
];

/// Encodes the low nibble of `nibble` into its line symbol.
///
/// The upper four bits are ignored, so every input maps to a valid symbol.
#[inline]
pub fn encode_nibble(nibble: u8) -> u8 {
    SYMBOLS[(nibble & 0x0F) as usize]
}

/// Returns the nibble a line symbol encodes, or `None` if `symbol` is not in the table.
pub fn decode_symbol(symbol: u8) -> Option<u8> {
    SYMBOLS
        .iter()
        .position(|&s| s == symbol)
        .map(|nibble| nibble as u8)
}

/// Encodes each nibble of `input` into `output`.
///
/// # Returns
/// The number of symbols written, which is the shorter of the two lengths.
pub fn encode_buffer(input: &[u8], output: &mut [u8]) -> usize {
    let mut i = 0;
    for (out, &nibble) in output.iter_mut().zip(input) {
        *out = encode_nibble(nibble);
        i += 1;
    }
    i
}

/// Encodes a full frame worth of nibbles.
pub fn encode_frame(nibbles: &[u8; MSG_LEN]) -> [u8; MSG_LEN] {
    let mut frame = [0u8; MSG_LEN];
    let _ = encode_buffer(nibbles, &mut frame);
    frame
}
