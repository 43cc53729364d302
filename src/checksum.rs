use crate::hw_def::CRC_DIVISOR;

/// Check the checksum the HTU21D sends after every measurement word.
///
/// The word and its checksum are lined up in a 24-bit row and divided by the polynomial
/// x^8 + x^5 + x^4 + 1 one data bit at a time, most significant first.  The word is intact when
/// nothing remains of the row.
pub fn is_crc_valid(value: u16, crc: u8) -> bool {
    let mut row = (value as u32) << 8 | crc as u32;
    let mut divisor = CRC_DIVISOR;

    for bit in 0..16 {
        if row & (1 << (23 - bit)) != 0 {
            row ^= divisor;
        }
        divisor >>= 1;
    }

    row == 0
}
