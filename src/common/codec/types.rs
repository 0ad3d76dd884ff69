use crate::common::error::{QRError, QRResult};

// Alphanumeric mode
//------------------------------------------------------------------------------

pub const ALPHANUMERIC_MODE: u8 = 0b0010;

pub const MODE_BITS: usize = 4;

/// Char count indicator length of alphanumeric mode for versions 1 to 9
pub const CHAR_CNT_BITS: usize = 9;

/// Value of a character in the 45 symbol alphabet. Lowercase letters map to
/// their uppercase value.
pub fn alphanumeric_digit(ch: char) -> QRResult<u8> {
    let up = ch.to_ascii_uppercase();
    match up {
        '0'..='9' => Ok(up as u8 - b'0'),
        'A'..='Z' => Ok(up as u8 - b'A' + 10),
        ' ' => Ok(36),
        '$' => Ok(37),
        '%' => Ok(38),
        '*' => Ok(39),
        '+' => Ok(40),
        '-' => Ok(41),
        '.' => Ok(42),
        '/' => Ok(43),
        ':' => Ok(44),
        _ => Err(QRError::UnsupportedCharacter(ch)),
    }
}

/// Validates and converts text to alphanumeric digits
pub fn to_alphanumeric(text: &str) -> QRResult<Vec<u8>> {
    if text.is_empty() {
        return Err(QRError::EmptyData);
    }
    text.chars().map(alphanumeric_digit).collect()
}

/// Bit length of mode, char count & data of `len` alphanumeric chars
pub fn encoded_len(len: usize) -> usize {
    MODE_BITS + CHAR_CNT_BITS + 11 * (len / 2) + 6 * (len % 2)
}
