//! Character encoding for the alphanumeric display font decoder
//!
//! The display's on-chip font ROM is addressed by a 7-bit character code,
//! but the board routes the shift register outputs to the ROM address pins
//! in reverse order, with the two highest lines crossed. The pattern
//! produced here is what must be shifted out (LSB first) so the ROM sees
//! the unmodified character code.

/// Mask applied to incoming character codes
pub const CHAR_MASK: u8 = 0x7F;

/// Number of pattern bits shifted out per character
pub const PATTERN_BITS: u8 = 7;

/// Encode a character code into its wire pattern
///
/// Codes above 127 are masked down to 7 bits.
pub const fn encode(code: u8) -> u8 {
    let code = code & CHAR_MASK;

    // Mirror the 7-bit code
    let mut reversed = 0u8;
    let mut bit = 0;
    while bit < PATTERN_BITS {
        if code & (1 << bit) != 0 {
            reversed |= 1 << (PATTERN_BITS - 1 - bit);
        }
        bit += 1;
    }

    // Cross the two lowest pattern bits (the code's two highest bits)
    let low = reversed & 0b01;
    let next = (reversed >> 1) & 0b01;
    (reversed & !0b11) | (low << 1) | next
}

/// Encode a `char`, masking anything outside ASCII down to 7 bits
#[allow(clippy::cast_possible_truncation)]
pub const fn encode_char(ch: char) -> u8 {
    encode((ch as u32 & CHAR_MASK as u32) as u8)
}
