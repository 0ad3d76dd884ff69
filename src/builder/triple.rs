use tracing::{debug, info};

use super::{build_symbol, Symbol};
use crate::common::{
    capacity::{find_best_ec_level, plan},
    codec::to_alphanumeric,
    error::{QRError, QRResult},
    mask::MaskPattern,
    metadata::{ECLevel, Version},
};

// Triple code
//------------------------------------------------------------------------------

/// Three symbols of one version overlaid into a single grid. Each cell holds
/// `s0 + 2 * s1 + 4 * s2`, so bit `i` of a cell is the module of symbol `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripleCode {
    ver: Version,
    ecls: [ECLevel; 3],
    masks: [MaskPattern; 3],
    w: usize,
    matrix: Vec<u8>,
}

impl TripleCode {
    pub fn overlay(symbols: &[Symbol; 3]) -> QRResult<Self> {
        let [s0, s1, s2] = symbols;
        if symbols.iter().any(|s| s.version() != s0.version() || s.width() != s0.width()) {
            return Err(QRError::GeometryMismatch);
        }

        let matrix = s0
            .grid()
            .iter()
            .zip(s1.grid())
            .zip(s2.grid())
            .map(|((&a, &b), &c)| a as u8 | (b as u8) << 1 | (c as u8) << 2)
            .collect();

        Ok(Self {
            ver: s0.version(),
            ecls: symbols.each_ref().map(|s| s.ec_level()),
            masks: symbols.each_ref().map(|s| s.mask()),
            w: s0.width(),
            matrix,
        })
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn ec_levels(&self) -> [ECLevel; 3] {
        self.ecls
    }

    pub fn masks(&self) -> [MaskPattern; 3] {
        self.masks
    }

    /// Width including the quiet zone
    pub fn width(&self) -> usize {
        self.w
    }

    pub fn get(&self, r: usize, c: usize) -> u8 {
        self.matrix[r * self.w + c]
    }

    /// Row major cells, values 0 to 7
    pub fn matrix(&self) -> &[u8] {
        &self.matrix
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.matrix.chunks_exact(self.w)
    }

    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        self.rows().map(<[u8]>::to_vec).collect()
    }

    /// Recovers the symbol stored in bit `i` of every cell, `None` past the
    /// third plane
    pub fn plane(&self, i: usize) -> Option<Symbol> {
        let (&ecl, &mask) = self.ecls.get(i).zip(self.masks.get(i))?;
        let grid = self.matrix.iter().map(|&v| (v >> i) & 1 == 1).collect();
        Some(Symbol::new(self.ver, ecl, mask, grid))
    }
}

// Triple builder
//------------------------------------------------------------------------------

/// Builds three symbols at a shared version, each at the highest ec level its
/// own payload allows, and overlays them.
pub struct TripleBuilder<'a> {
    texts: [&'a str; 3],
    version: Option<Version>,
}

impl<'a> TripleBuilder<'a> {
    pub fn new(texts: [&'a str; 3]) -> Self {
        Self { texts, version: None }
    }

    pub fn texts(&mut self, texts: [&'a str; 3]) -> &mut Self {
        self.texts = texts;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn build(&self) -> QRResult<TripleCode> {
        // Every payload is validated before any planning or grid work
        let mut lens = [0; 3];
        for (len, text) in lens.iter_mut().zip(self.texts) {
            *len = to_alphanumeric(text)?.len();
        }

        let (ver, ecls) = match self.version {
            Some(v) => {
                let mut ecls = [ECLevel::L; 3];
                for (ecl, &len) in ecls.iter_mut().zip(lens.iter()) {
                    *ecl = find_best_ec_level(len, v)?;
                }
                (v, ecls)
            }
            None => plan(lens)?,
        };
        info!(version = *ver, ec_levels = ?ecls, "Planned triple code");

        let symbols = self.build_symbols(ver, ecls)?;
        let code = TripleCode::overlay(&symbols)?;
        debug!(masks = ?code.masks().map(|m| *m), width = code.width(), "Composed triple code");
        Ok(code)
    }

    #[cfg(not(feature = "parallel"))]
    fn build_symbols(&self, ver: Version, ecls: [ECLevel; 3]) -> QRResult<[Symbol; 3]> {
        let [a, b, c] = [0, 1, 2].map(|i| build_symbol(self.texts[i], ver, ecls[i], None));
        Ok([a?, b?, c?])
    }

    // Symbols share nothing but the version, so they build independently
    #[cfg(feature = "parallel")]
    fn build_symbols(&self, ver: Version, ecls: [ECLevel; 3]) -> QRResult<[Symbol; 3]> {
        let build = |i: usize| build_symbol(self.texts[i], ver, ecls[i], None);
        let (a, (b, c)) = rayon::join(|| build(0), || rayon::join(|| build(1), || build(2)));
        Ok([a?, b?, c?])
    }
}

/// Encodes three texts into one triple code with automatic layout
pub fn compose(a: &str, b: &str, c: &str) -> QRResult<TripleCode> {
    TripleBuilder::new([a, b, c]).build()
}
