use crate::common::{
    mask::MaskPattern,
    metadata::{
        decode_format_info, ECLevel, Version, FORMAT_INFO_COORDS_QR_MAIN,
        FORMAT_INFO_COORDS_QR_SIDE, QUIET_ZONE,
    },
};

/// Finished QR symbol: one plane of dark/light modules, quiet zone included.
/// Indexed by (row, column) from the top left corner of the quiet zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    ver: Version,
    ecl: ECLevel,
    mask: MaskPattern,
    w: usize,
    grid: Vec<bool>,
}

impl Symbol {
    pub(crate) fn new(ver: Version, ecl: ECLevel, mask: MaskPattern, grid: Vec<bool>) -> Self {
        let w = ver.padded_width();
        debug_assert_eq!(grid.len(), w * w, "Grid doesn't match version {}", *ver);
        Self { ver, ecl, mask, w, grid }
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    /// Width including the quiet zone
    pub fn width(&self) -> usize {
        self.w
    }

    pub fn get(&self, r: usize, c: usize) -> bool {
        self.grid[r * self.w + c]
    }

    pub fn grid(&self) -> &[bool] {
        &self.grid
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&&d| d).count()
    }
}

// Format info
//------------------------------------------------------------------------------

impl Symbol {
    /// Reads ec level & mask back from the drawn format strips. The main strip
    /// is tried first, the split copy when the main one is beyond repair.
    pub fn read_format_info(&self) -> Option<(ECLevel, MaskPattern)> {
        decode_format_info(self.read_number(&FORMAT_INFO_COORDS_QR_MAIN))
            .or_else(|| decode_format_info(self.read_number(&FORMAT_INFO_COORDS_QR_SIDE)))
    }

    // Coords are in symbol space, negative ones wrapping around the width
    fn read_number(&self, coords: &[(i16, i16)]) -> u32 {
        let sw = (self.w - 2 * QUIET_ZONE) as i16;
        coords.iter().fold(0, |acc, &(r, c)| {
            let r = r.rem_euclid(sw) as usize + QUIET_ZONE;
            let c = c.rem_euclid(sw) as usize + QUIET_ZONE;
            acc << 1 | self.get(r, c) as u32
        })
    }
}
