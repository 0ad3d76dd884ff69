use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::{drawing::draw_filled_rect_mut, rect::Rect};

use crate::builder::{Symbol, TripleCode};

/// Display colour of each triple code cell value. Bit 0 pulls towards yellow,
/// bit 1 towards red & bit 2 towards blue; all three dark is black.
pub static PALETTE: [Rgb<u8>; 8] = [
    Rgb([255, 255, 255]),
    Rgb([255, 255, 0]),
    Rgb([255, 0, 0]),
    Rgb([255, 100, 0]),
    Rgb([0, 0, 255]),
    Rgb([0, 255, 0]),
    Rgb([255, 0, 255]),
    Rgb([0, 0, 0]),
];

// Render
//------------------------------------------------------------------------------

fn cell(r: usize, c: usize, module_sz: u32) -> Rect {
    Rect::at(c as i32 * module_sz as i32, r as i32 * module_sz as i32).of_size(module_sz, module_sz)
}

impl TripleCode {
    /// Paints every cell with its palette colour, `module_sz` pixels a side
    pub fn to_image(&self, module_sz: u32) -> RgbImage {
        debug_assert!(module_sz > 0, "Module size must be positive");

        let sz = self.width() as u32 * module_sz;
        let mut canvas = RgbImage::from_pixel(sz, sz, PALETTE[0]);
        for (r, row) in self.rows().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                if v != 0 {
                    draw_filled_rect_mut(&mut canvas, cell(r, c, module_sz), PALETTE[v as usize]);
                }
            }
        }
        canvas
    }

    /// One digit per cell, one line per row
    pub fn to_str(&self) -> String {
        let mut res = String::with_capacity(self.width() * (self.width() + 1));
        for row in self.rows() {
            res.extend(row.iter().map(|&v| char::from(b'0' + v)));
            res.push('\n');
        }
        res
    }
}

impl Symbol {
    pub fn to_image(&self, module_sz: u32) -> GrayImage {
        debug_assert!(module_sz > 0, "Module size must be positive");

        let w = self.width();
        let sz = w as u32 * module_sz;
        let mut canvas = GrayImage::from_pixel(sz, sz, Luma([255]));
        for r in 0..w {
            for c in 0..w {
                if self.get(r, c) {
                    draw_filled_rect_mut(&mut canvas, cell(r, c, module_sz), Luma([0]));
                }
            }
        }
        canvas
    }

    pub fn to_str(&self) -> String {
        let w = self.width();
        let mut res = String::with_capacity(w * (w + 1) * 3);
        for r in 0..w {
            for c in 0..w {
                res.push(if self.get(r, c) { ' ' } else { '█' });
            }
            res.push('\n');
        }
        res
    }
}
