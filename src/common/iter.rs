use super::metadata::Version;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

/// Zigzag walk over the symbol: column pairs from the right edge leftwards,
/// alternating upward & downward, right module before left module. The
/// vertical timing column is skipped. Function modules are not filtered here.
#[derive(Debug, Clone)]
pub struct EncRegionIter {
    // Right column of the current pair
    right: i16,
    // Steps taken along the current pair
    vert: i16,
    // 0 for the right module, 1 for the left module
    side: i16,
    w: i16,
}

impl EncRegionIter {
    pub const fn new(ver: Version) -> Self {
        let w = ver.width() as i16;
        Self { right: w - 1, vert: 0, side: 0, w }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.right < 1 {
            return None;
        }

        let upward = (self.right + 1) & 2 == 0;
        let r = if upward { self.w - 1 - self.vert } else { self.vert };
        let res = (r, self.right - self.side);

        self.side += 1;
        if self.side == 2 {
            self.side = 0;
            self.vert += 1;
        }
        if self.vert == self.w {
            self.vert = 0;
            self.right -= 2;
            if self.right == VERT_TIMING_COL {
                self.right -= 1;
            }
        }

        Some(res)
    }
}

const VERT_TIMING_COL: i16 = 6;
