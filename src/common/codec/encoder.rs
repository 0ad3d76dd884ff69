use tracing::debug;

use super::types::{encoded_len, to_alphanumeric, ALPHANUMERIC_MODE, CHAR_CNT_BITS, MODE_BITS};
use crate::common::{
    bit_utils::BitStream,
    error::{QRError, QRResult},
    metadata::{ECLevel, Version},
};

// Encoder
//------------------------------------------------------------------------------

/// Encodes text in alphanumeric mode and pads it to the exact data capacity
/// of the version & ec level.
pub fn encode(text: &str, ver: Version, ecl: ECLevel) -> QRResult<BitStream> {
    let digits = to_alphanumeric(text)?;
    let bcap = ver.data_bit_capacity(ecl);
    let sz = encoded_len(digits.len());
    if sz > bcap {
        return Err(QRError::CapacityExceeded(digits.len()));
    }

    let mut bs = BitStream::new(bcap);
    push_segment(&digits, &mut bs);
    push_terminator(&mut bs);
    pad_remaining_capacity(&mut bs);

    debug!(chars = digits.len(), bits = sz, capacity = bcap, "Encoded alphanumeric segment");
    Ok(bs)
}

pub fn push_segment(digits: &[u8], out: &mut BitStream) {
    push_header(digits.len(), out);
    for chunk in digits.chunks(2) {
        match *chunk {
            [a, b] => out.push_bits(a as u16 * 45 + b as u16, 11),
            [a] => out.push_bits(a, 6),
            _ => unreachable!("Chunks of 2 are never empty"),
        }
    }
}

fn push_header(char_cnt: usize, out: &mut BitStream) {
    debug_assert!(
        char_cnt < (1 << CHAR_CNT_BITS),
        "Char count exceeds bit length: Char count {char_cnt}, Char count bits {CHAR_CNT_BITS}"
    );
    out.push_bits(ALPHANUMERIC_MODE, MODE_BITS);
    out.push_bits(char_cnt as u16, CHAR_CNT_BITS);
}

// Writer
//------------------------------------------------------------------------------

pub fn push_terminator(out: &mut BitStream) {
    let term_len = std::cmp::min(4, out.remaining());
    out.push_bits(0u8, term_len);
}

pub fn pad_remaining_capacity(out: &mut BitStream) {
    push_padding_bits(out);
    push_padding_codewords(out);
}

fn push_padding_bits(out: &mut BitStream) {
    let offset = out.len() & 7;
    if offset > 0 {
        out.push_bits(0u8, 8 - offset);
    }
}

fn push_padding_codewords(out: &mut BitStream) {
    debug_assert!(out.len() & 7 == 0, "Bit offset should be zero before padding codewords");

    let remain_byte_capacity = out.remaining() >> 3;
    PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
        out.push_bits(pc, 8);
    });
}

static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];

#[cfg(test)]
mod encoder_tests {
    use test_case::test_case;

    use super::{encode, pad_remaining_capacity, push_segment, push_terminator};
    use crate::common::{
        bit_utils::BitStream,
        codec::types::{encoded_len, to_alphanumeric},
        error::QRError,
        metadata::{ECLevel, Version},
    };

    #[test]
    fn test_push_segment() {
        // Worked example of ISO/IEC 18004 7.4.4
        let mut bs = BitStream::new(64);
        push_segment(&to_alphanumeric("AC-42").unwrap(), &mut bs);
        let mut exp = BitStream::new(64);
        exp.push_bits(0b0010u8, 4);
        exp.push_bits(0b000000101u16, 9);
        exp.push_bits(0b00111001110u16, 11);
        exp.push_bits(0b11100111001u16, 11);
        exp.push_bits(0b000010u8, 6);
        assert_eq!(bs.len(), 41);
        assert_eq!(bs.data(), exp.data());
    }

    #[test]
    fn test_hello_world_codewords() {
        let ver = Version::new(2).unwrap();
        let mut bs = BitStream::new(ver.data_bit_capacity(ECLevel::Q));
        push_segment(&to_alphanumeric("HELLO WORLD").unwrap(), &mut bs);
        push_terminator(&mut bs);
        pad_remaining_capacity(&mut bs);
        assert_eq!(
            &bs.data()[..13],
            &[0x20, 0x5B, 0x0B, 0x78, 0xD1, 0x72, 0xDC, 0x4D, 0x43, 0x40, 0xEC, 0x11, 0xEC]
        );
        assert_eq!(bs.data().len(), 22);
    }

    #[test]
    fn test_short_terminator() {
        let mut bs = BitStream::new(16);
        bs.push_bits(0b1111111111111u16, 13);
        push_terminator(&mut bs);
        assert_eq!(bs.len(), 16);
        pad_remaining_capacity(&mut bs);
        assert_eq!(bs.data(), [0xFF, 0xF8]);
    }

    #[test]
    fn test_pad_codewords_alternate() {
        let mut bs = BitStream::new(48);
        bs.push_bits(0b101u8, 3);
        push_terminator(&mut bs);
        pad_remaining_capacity(&mut bs);
        assert_eq!(bs.data(), [0b10100000, 0xEC, 0x11, 0xEC, 0x11, 0xEC]);
    }

    #[test_case("A", 2, ECLevel::H)]
    #[test_case("HELLO", 2, ECLevel::L)]
    #[test_case("TEST123", 3, ECLevel::M)]
    #[test_case("1234567890ABCDEFGHIJ", 2, ECLevel::H)]
    #[test_case("THE QUICK BROWN FOX $%*+-./:", 4, ECLevel::Q)]
    fn test_encode_fills_capacity(text: &str, v: u8, ecl: ECLevel) {
        let ver = Version::new(v).unwrap();
        let bs = encode(text, ver, ecl).unwrap();
        assert_eq!(bs.len(), ver.data_bit_capacity(ecl));
        assert_eq!(bs.len() % 8, 0);
    }

    #[test]
    fn test_encode_exact_capacity() {
        for ver in Version::all() {
            for ecl in ECLevel::DESCENDING {
                let n = ver.alphanumeric_capacity(ecl);
                let text = "Z".repeat(n);
                let bs = encode(&text, ver, ecl).unwrap();
                assert_eq!(bs.len(), ver.data_bit_capacity(ecl));
                let err = encode(&"Z".repeat(n + 1), ver, ecl).unwrap_err();
                assert_eq!(err, QRError::CapacityExceeded(n + 1));
            }
        }
    }

    #[test]
    fn test_encode_rejects_unsupported() {
        let ver = Version::new(2).unwrap();
        assert_eq!(encode("a@b", ver, ECLevel::L).unwrap_err(), QRError::UnsupportedCharacter('@'));
    }

    #[test]
    fn test_encoded_len_matches_stream() {
        for n in [1, 2, 3, 10, 47] {
            let mut bs = BitStream::new(2048);
            push_segment(&vec![44; n], &mut bs);
            assert_eq!(bs.len(), encoded_len(n));
        }
    }
}

#[cfg(test)]
mod encoder_proptests {
    use prop::string::string_regex;
    use proptest::prelude::*;

    use super::{encode, push_segment};
    use crate::common::{
        bit_utils::BitStream,
        codec::types::{encoded_len, to_alphanumeric},
        metadata::{ECLevel, Version},
    };

    fn text_strategy() -> BoxedStrategy<String> {
        string_regex(r"[0-9A-Za-z $%*+\-./:]{1,195}").unwrap().boxed()
    }

    proptest! {
        #[test]
        fn proptest_encoded_len(text in text_strategy()) {
            let mut seg = BitStream::new(2048);
            push_segment(&to_alphanumeric(&text).unwrap(), &mut seg);
            let sz = encoded_len(text.chars().count());
            prop_assert_eq!(seg.len(), sz);

            let ver = Version::MAX;
            let full = encode(&text, ver, ECLevel::L).unwrap();
            prop_assert_eq!(full.len(), ver.data_bit_capacity(ECLevel::L));
            prop_assert_eq!(&full.data()[..sz >> 3], &seg.data()[..sz >> 3]);
        }
    }
}
