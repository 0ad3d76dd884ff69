use std::ops::Deref;

use tracing::trace;

use super::error::{QRError, QRResult};
use crate::builder::{Module, QR};

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> Self {
        debug_assert!(pattern < 8, "Invalid masking pattern: {pattern}");
        Self(pattern)
    }

    pub fn try_new(pattern: u8) -> QRResult<Self> {
        match pattern {
            0..=7 => Ok(Self(pattern)),
            _ => Err(QRError::InvalidMaskPattern(pattern)),
        }
    }

    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(MaskPattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Row & column of the symbol, quiet zone excluded
mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        ((r * c) & 1) + ((r * c) % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        (((r + c) & 1) + ((r * c) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_functions(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Mask pattern out of range: {}", self.0),
        }
    }
}

// Mask selection
//------------------------------------------------------------------------------

/// Tries all 8 masks on a copy of the grid and applies the one with the
/// lowest penalty. Ties go to the smaller pattern number.
pub fn apply_best_mask(qr: &mut QR) -> MaskPattern {
    let mut best = (MaskPattern(0), u32::MAX);
    for mask in MaskPattern::all() {
        let mut trial = qr.clone();
        trial.apply_mask(mask);
        let pen = compute_total_penalty(&trial);
        trace!(mask = *mask, penalty = pen, "Scored mask");
        if pen < best.1 {
            best = (mask, pen);
        }
    }

    let (mask, _) = best;
    qr.apply_mask(mask);
    mask
}

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let lines = lines(qr);
    let run_pen = lines.iter().map(|l| compute_run_penalty(l)).sum::<u32>();
    let fp_pen = lines.iter().map(|l| compute_finder_like_penalty(l)).sum::<u32>();
    let blk_pen = compute_block_penalty(qr);
    let bal_pen = compute_balance_penalty(qr);
    run_pen + blk_pen + fp_pen + bal_pen
}

// Every row followed by every column of the symbol
fn lines(qr: &QR) -> Vec<Vec<Module>> {
    let w = qr.width() as i16;
    let rows = (0..w).map(|r| (0..w).map(|c| qr.get(r, c)).collect());
    let cols = (0..w).map(|c| (0..w).map(|r| qr.get(r, c)).collect());
    rows.chain(cols).collect()
}

// Rule 1: runs of 5 or more. Reserved modules end a run.
fn compute_run_penalty(line: &[Module]) -> u32 {
    let mut pen = 0;
    let mut last = Module::Reserved;
    let mut len = 0;
    for m in line.iter().copied().chain(std::iter::once(Module::Reserved)) {
        if m != Module::Reserved && m == last {
            len += 1;
            continue;
        }
        if len >= 5 {
            pen += len - 2;
        }
        last = m;
        len = if m == Module::Reserved { 0 } else { 1 };
    }
    pen
}

// Rule 2
fn compute_block_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let m = qr.get(r, c);
            if m != Module::Reserved
                && m == qr.get(r + 1, c)
                && m == qr.get(r, c + 1)
                && m == qr.get(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

// Rule 3: 1011101 core with 4 light modules on one side, in either colouring
fn compute_finder_like_penalty(line: &[Module]) -> u32 {
    let hits = line
        .windows(FINDER_LIKE_PATTERN.len())
        .filter(|win| {
            let matches = |inv: bool| {
                win.iter().zip(FINDER_LIKE_PATTERN).all(|(&m, p)| m == Module::from(p ^ inv))
            };
            matches(false) || matches(true)
        })
        .count() as u32;
    hits * 40
}

// Rule 4: dark percentage rounded to the nearest multiple of 5
fn compute_balance_penalty(qr: &QR) -> u32 {
    let w = qr.width() as i16;
    let (mut dark, mut total) = (0u32, 0u32);
    for r in 0..w {
        for c in 0..w {
            match qr.get(r, c) {
                Module::Dark => {
                    dark += 1;
                    total += 1;
                }
                Module::Light => total += 1,
                Module::Reserved => {}
            }
        }
    }
    if total == 0 {
        return 0;
    }
    let pct = (dark * 40 + total) / (2 * total) * 5;
    2 * pct.abs_diff(50)
}

static FINDER_LIKE_PATTERN: [bool; 11] =
    [true, false, true, true, true, false, true, false, false, false, false];
