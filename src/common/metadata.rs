use std::ops::Deref;

use super::error::{QRError, QRResult};
use super::mask::MaskPattern;

// Version
//------------------------------------------------------------------------------

/// QR version. Only versions 2 to 6 are supported: they share a 9 bit
/// alphanumeric count field, a single alignment pattern and no version info.
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    pub const MIN: Version = Version(2);
    pub const MAX: Version = Version(6);

    pub fn new(version: u8) -> QRResult<Self> {
        match version {
            2..=6 => Ok(Self(version)),
            _ => Err(QRError::InvalidVersion(version)),
        }
    }

    pub fn all() -> impl Iterator<Item = Version> {
        (Self::MIN.0..=Self::MAX.0).map(Version)
    }

    /// Width of the symbol, excluding the quiet zone
    pub const fn width(self) -> usize {
        self.0 as usize * 4 + 17
    }

    /// Width of the grid, including the quiet zone on both sides
    pub const fn padded_width(self) -> usize {
        self.width() + 2 * QUIET_ZONE
    }

    /// Row & column of the center of the single alignment pattern
    pub const fn alignment_pattern(self) -> i16 {
        self.width() as i16 - 7
    }

    fn index(self) -> usize {
        self.0 as usize - Self::MIN.0 as usize
    }

    pub fn alphanumeric_capacity(self, ecl: ECLevel) -> usize {
        ALPHANUMERIC_CAPACITY[self.index()][ecl as usize]
    }

    pub fn data_codewords(self, ecl: ECLevel) -> usize {
        let (b1_sz, b1_cnt, b2_sz, b2_cnt) = self.data_codewords_per_block(ecl);
        b1_sz * b1_cnt + b2_sz * b2_cnt
    }

    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        self.data_codewords(ecl) << 3
    }

    pub fn total_codewords(self) -> usize {
        TOTAL_CODEWORDS[self.index()]
    }

    pub fn ecc_per_block(self, ecl: ECLevel) -> usize {
        ECC_PER_BLOCK[self.index()][ecl as usize]
    }

    /// (Group 1 block size, group 1 block count, group 2 block size, group 2 block count)
    pub fn data_codewords_per_block(self, ecl: ECLevel) -> (usize, usize, usize, usize) {
        DATA_CODEWORDS_PER_BLOCK[self.index()][ecl as usize]
    }

    pub const fn remainder_bits(self) -> usize {
        7
    }
}

impl Deref for Version {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    /// Levels from the most to the least error tolerant
    pub const DESCENDING: [ECLevel; 4] = [ECLevel::H, ECLevel::Q, ECLevel::M, ECLevel::L];

    /// 2 bit indicator stored in the format info
    pub const fn format_bits(self) -> u32 {
        match self {
            Self::L => 0b01,
            Self::M => 0b00,
            Self::Q => 0b11,
            Self::H => 0b10,
        }
    }
}

// Format information
//------------------------------------------------------------------------------

/// BCH code of the 5 bit format data: (ecl bits << 3 | mask) << 10 | remainder,
/// xored with the format mask.
pub fn format_info(ecl: ECLevel, mask: MaskPattern) -> u32 {
    let data = ecl.format_bits() << 3 | *mask as u32;
    let mut rem = data << FORMAT_ERROR_BIT_LEN;
    for z in (FORMAT_ERROR_BIT_LEN..FORMAT_INFO_BIT_LEN).rev() {
        if (rem >> z) & 1 == 1 {
            rem ^= FORMAT_GENERATOR << (z - FORMAT_ERROR_BIT_LEN);
        }
    }
    ((data << FORMAT_ERROR_BIT_LEN) | rem) ^ FORMAT_MASK
}

/// Recovers ec level & mask from a possibly corrupted format info. Up to 3 bit
/// errors are corrected by picking the nearest valid codeword.
pub fn decode_format_info(info: u32) -> Option<(ECLevel, MaskPattern)> {
    let dist = |ecl, mask| (format_info(ecl, mask) ^ info).count_ones();
    ECLevel::DESCENDING
        .into_iter()
        .flat_map(|ecl| (0..8).map(move |m| (ecl, MaskPattern::new(m))))
        .min_by_key(|&(ecl, mask)| dist(ecl, mask))
        .filter(|&(ecl, mask)| dist(ecl, mask) <= FORMAT_ERROR_CAPACITY)
}


// Capacity tables
//------------------------------------------------------------------------------

pub const QUIET_ZONE: usize = 4;

pub const FORMAT_INFO_BIT_LEN: usize = 15;

pub const FORMAT_ERROR_BIT_LEN: usize = 10;

pub const FORMAT_ERROR_CAPACITY: u32 = 3;

pub const FORMAT_GENERATOR: u32 = 0b10100110111;

pub const FORMAT_MASK: u32 = 0b101010000010010;

// Bit 14 first. Negative coords wrap around the symbol width.
pub static FORMAT_INFO_COORDS_QR_MAIN: [(i16, i16); 15] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

pub static FORMAT_INFO_COORDS_QR_SIDE: [(i16, i16); 15] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];

pub static DARK_MODULE_COORD: (i16, i16) = (-8, 8);

static ALPHANUMERIC_CAPACITY: [[usize; 4]; 5] = [
    [47, 38, 29, 20],
    [77, 61, 47, 35],
    [114, 90, 67, 50],
    [154, 122, 87, 64],
    [195, 154, 108, 84],
];

static TOTAL_CODEWORDS: [usize; 5] = [44, 70, 100, 134, 172];

static ECC_PER_BLOCK: [[usize; 4]; 5] =
    [[10, 16, 22, 28], [15, 26, 18, 22], [20, 18, 26, 16], [26, 24, 18, 22], [18, 16, 24, 28]];

static DATA_CODEWORDS_PER_BLOCK: [[(usize, usize, usize, usize); 4]; 5] = [
    [(34, 1, 0, 0), (28, 1, 0, 0), (22, 1, 0, 0), (16, 1, 0, 0)],
    [(55, 1, 0, 0), (44, 1, 0, 0), (17, 2, 0, 0), (13, 2, 0, 0)],
    [(80, 1, 0, 0), (32, 2, 0, 0), (24, 2, 0, 0), (9, 4, 0, 0)],
    [(108, 1, 0, 0), (43, 2, 0, 0), (15, 2, 16, 2), (11, 2, 12, 2)],
    [(68, 2, 0, 0), (27, 4, 0, 0), (19, 4, 0, 0), (15, 4, 0, 0)],
];
