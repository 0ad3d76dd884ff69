use std::ops::Not;

use super::symbol::Symbol;
use crate::common::{
    bit_utils::BitStream,
    error::{QRError, QRResult},
    iter::EncRegionIter,
    mask::MaskPattern,
    metadata::*,
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Light,
    Dark,
    // Function or format module whose final colour isn't drawn yet
    Reserved,
}

impl From<bool> for Module {
    fn from(dark: bool) -> Self {
        if dark {
            Module::Dark
        } else {
            Module::Light
        }
    }
}

impl Not for Module {
    type Output = Module;
    fn not(self) -> Self::Output {
        match self {
            Module::Light => Module::Dark,
            Module::Dark => Module::Light,
            Module::Reserved => Module::Reserved,
        }
    }
}

/// Turns the colour a fixed pattern wants at a module into what gets drawn
type Pen = fn(bool) -> Module;

fn reserve(_: bool) -> Module {
    Module::Reserved
}

/// Symbol under construction. The grid includes the quiet zone but every
/// accessor works in symbol coordinates, negative ones wrapping around the
/// symbol width.
#[derive(Debug, Clone)]
pub struct QR {
    grid: Vec<Module>,
    ver: Version,
    ecl: ECLevel,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub fn new(ver: Version, ecl: ECLevel) -> Self {
        let pw = ver.padded_width();
        Self { grid: vec![Module::Light; pw * pw], ver, ecl }
    }

    /// Symbol width, quiet zone excluded
    pub fn width(&self) -> usize {
        self.ver.width()
    }

    #[cfg(test)]
    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&&m| m == Module::Dark).count()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.width() as i16;
        let mut res = String::with_capacity((w * (w + 1) + 1) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Light => '.',
                    Module::Dark => 'd',
                    Module::Reserved => 'r',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.width() as i16;
        debug_assert!(-w <= r && r < w, "Row out of bounds: {r}");
        debug_assert!(-w <= c && c < w, "Column out of bounds: {c}");

        let r = r.rem_euclid(w) as usize + QUIET_ZONE;
        let c = c.rem_euclid(w) as usize + QUIET_ZONE;
        r * self.ver.padded_width() + c
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn set(&mut self, r: i16, c: i16, module: Module) {
        let index = self.coord_to_index(r, c);
        self.grid[index] = module;
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self, pen: Pen) {
        self.draw_finder_pattern_at(3, 3, pen);
        self.draw_finder_pattern_at(3, -4, pen);
        self.draw_finder_pattern_at(-4, 3, pen);
    }

    // Includes the light separator on the sides facing the symbol
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16, pen: Pen) {
        let (dr_top, dr_bottom): (i16, i16) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_left, dc_right): (i16, i16) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_top..=dr_bottom {
            for j in dc_left..=dc_right {
                let dark = !matches!(i16::max(i.abs(), j.abs()), 4 | 2);
                self.set(r + i, c + j, pen(dark));
            }
        }
    }
}

// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_timing_patterns(&mut self, pen: Pen) {
        let last = self.width() as i16 - 9;
        self.draw_line(6, 8, 6, last, pen);
        self.draw_line(8, 6, last, 6, pen);
    }

    fn draw_line(&mut self, r1: i16, c1: i16, r2: i16, c2: i16, pen: Pen) {
        debug_assert!(r1 == r2 || c1 == c2, "Line is neither vertical nor horizontal");

        if r1 == r2 {
            for j in c1..=c2 {
                self.set(r1, j, pen(j & 1 == 0));
            }
        } else {
            for i in r1..=r2 {
                self.set(i, c1, pen(i & 1 == 0));
            }
        }
    }
}

// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_pattern(&mut self, pen: Pen) {
        let pos = self.ver.alignment_pattern();
        for i in -2..=2 {
            for j in -2..=2 {
                let dark = i16::max(i16::abs(i), i16::abs(j)) != 1;
                self.set(pos + i, pos + j, pen(dark));
            }
        }
    }
}

// All function patterns
//------------------------------------------------------------------------------

impl QR {
    pub fn draw_function_patterns(&mut self, pen: Pen) {
        self.draw_finder_patterns(pen);
        self.draw_timing_patterns(pen);
        self.draw_alignment_pattern(pen);
    }

    /// Marks every module that isn't part of the encoding region, so that data
    /// placement & masking skip them.
    pub fn reserve_function_area(&mut self) {
        self.draw_function_patterns(reserve);
        self.draw_format_info(0, reserve);
    }
}


// Format info
//------------------------------------------------------------------------------

impl QR {
    fn draw_format_info(&mut self, format_info: u32, pen: Pen) {
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, pen, &FORMAT_INFO_COORDS_QR_MAIN);
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, pen, &FORMAT_INFO_COORDS_QR_SIDE);
        let (r, c) = DARK_MODULE_COORD;
        self.set(r, c, pen(true));
    }

    // Most significant bit goes to the first coordinate
    fn draw_number(&mut self, number: u32, bit_len: usize, pen: Pen, coords: &[(i16, i16)]) {
        let mut mask = 1 << (bit_len - 1);
        for &(r, c) in coords {
            self.set(r, c, pen(number & mask != 0));
            mask >>= 1;
        }
    }
}


// Encoding region
//------------------------------------------------------------------------------

impl QR {
    /// Places the codewords along the zigzag, skipping reserved modules. Modules
    /// left over after the payload stay light.
    pub fn draw_payload(&mut self, payload: BitStream) -> QRResult<()> {
        let mut coords = EncRegionIter::new(self.ver);
        for bit in payload {
            let (r, c) = coords
                .by_ref()
                .find(|&(r, c)| self.get(r, c) != Module::Reserved)
                .ok_or(QRError::BitstreamOverflow)?;
            self.set(r, c, Module::from(bit));
        }
        Ok(())
    }

    /// Flips every unreserved module selected by the mask pattern
    pub fn apply_mask(&mut self, mask: MaskPattern) {
        let mask_fn = mask.mask_functions();
        let w = self.width() as i16;
        for r in 0..w {
            for c in 0..w {
                if mask_fn(r, c) {
                    let m = self.get(r, c);
                    self.set(r, c, !m);
                }
            }
        }
    }

    /// Draws the fixed patterns & format info for real and freezes the grid
    pub fn finish(mut self, mask: MaskPattern) -> Symbol {
        self.draw_function_patterns(Module::from);
        self.draw_format_info(format_info(self.ecl, mask), Module::from);
        debug_assert!(!self.grid.contains(&Module::Reserved), "Reserved module left in symbol");

        let grid = self.grid.iter().map(|&m| m == Module::Dark).collect();
        Symbol::new(self.ver, self.ecl, mask, grid)
    }
}

#[cfg(test)]
mod encoding_region_tests {
    use super::{Module, QR};
    use crate::common::{
        bit_utils::BitStream,
        error::QRError,
        iter::EncRegionIter,
        mask::MaskPattern,
        metadata::{ECLevel, Version},
    };

    #[test]
    fn test_draw_payload_order() {
        let ver = Version::MIN;
        let mut qr = QR::new(ver, ECLevel::L);
        qr.reserve_function_area();
        let mut payload = BitStream::new(ver.total_codewords() << 3);
        payload.extend(&[0b1010_0000; 44]);
        qr.draw_payload(payload).unwrap();

        assert_eq!(qr.get(24, 24), Module::Dark);
        assert_eq!(qr.get(24, 23), Module::Light);
        assert_eq!(qr.get(23, 24), Module::Dark);
        assert_eq!(qr.get(23, 23), Module::Light);
        assert_eq!(qr.get(22, 24), Module::Light);
        // Remainder modules
        let tail = EncRegionIter::new(ver)
            .filter(|&(r, c)| qr.get(r, c) != Module::Reserved)
            .skip(44 * 8)
            .collect::<Vec<_>>();
        assert_eq!(tail.len(), 7);
        assert!(tail.iter().all(|&(r, c)| qr.get(r, c) == Module::Light));
        assert_eq!(qr.count_dark_modules(), 44 * 2);
    }

    #[test]
    fn test_draw_payload_overflow() {
        let ver = Version::MIN;
        let mut qr = QR::new(ver, ECLevel::L);
        qr.reserve_function_area();
        let payload = BitStream::from(&[0xFF; 45]);
        assert_eq!(qr.draw_payload(payload), Err(QRError::BitstreamOverflow));
    }

    #[test]
    fn test_apply_mask_skips_reserved() {
        let mut qr = QR::new(Version::MIN, ECLevel::L);
        qr.reserve_function_area();
        qr.apply_mask(MaskPattern::new(1));
        assert_eq!(qr.get(0, 0), Module::Reserved);
        assert_eq!(qr.get(10, 10), Module::Dark);
        assert_eq!(qr.get(11, 10), Module::Light);
        qr.apply_mask(MaskPattern::new(1));
        assert_eq!(qr.count_dark_modules(), 0);
    }

    #[test]
    fn test_finish() {
        let mut qr = QR::new(Version::MIN, ECLevel::H);
        qr.reserve_function_area();
        qr.apply_mask(MaskPattern::new(6));
        let symbol = qr.finish(MaskPattern::new(6));
        assert_eq!(symbol.mask(), MaskPattern::new(6));
        assert_eq!(symbol.ec_level(), ECLevel::H);
        assert_eq!(symbol.width(), 33);
        // Top left finder corner, offset by the quiet zone
        assert!(symbol.get(4, 4));
        assert!(!symbol.get(3, 3));
        assert!(!symbol.get(5, 5));
    }
}
