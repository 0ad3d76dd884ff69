mod ec;
mod qr;
mod symbol;
mod triple;

pub(crate) use qr::{Module, QR};
pub use symbol::Symbol;
pub use triple::{compose, TripleBuilder, TripleCode};

use tracing::debug;

use crate::common::{
    capacity::{find_best_ec_level, find_min_version},
    codec::{encode, to_alphanumeric},
    error::QRResult,
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};
use ec::add_error_correction;

/// Builds a single symbol. Version, ec level & mask are planned when unset.
pub struct QRBuilder<'a> {
    text: &'a str,
    version: Option<Version>,
    ec_level: Option<ECLevel>,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, version: None, ec_level: None, mask: None }
    }

    pub fn text(&mut self, text: &'a str) -> &mut Self {
        self.text = text;
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

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = Some(ec_level);
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn metadata(&self) -> String {
        let fmt = |v: Option<String>| v.unwrap_or_else(|| "Auto".to_string());
        format!(
            "{{ Version: {}, Ec level: {}, Mask: {} }}",
            fmt(self.version.map(|v| (*v).to_string())),
            fmt(self.ec_level.map(|e| format!("{e:?}"))),
            fmt(self.mask.map(|m| (*m).to_string())),
        )
    }
}

#[cfg(test)]
mod qrbuilder_util_tests {
    use super::QRBuilder;
    use crate::common::{mask::MaskPattern, metadata::ECLevel, metadata::Version};

    #[test]
    fn test_metadata() {
        let mut qr_builder = QRBuilder::new("HELLO");
        assert_eq!(qr_builder.metadata(), "{ Version: Auto, Ec level: Auto, Mask: Auto }");
        qr_builder.version(Version::MAX).ec_level(ECLevel::Q).mask(MaskPattern::new(5));
        assert_eq!(qr_builder.metadata(), "{ Version: 6, Ec level: Q, Mask: 5 }");
        qr_builder.unset_version();
        assert_eq!(qr_builder.metadata(), "{ Version: Auto, Ec level: Q, Mask: 5 }");
    }
}

impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<Symbol> {
        debug!(metadata = %self.metadata(), "Building symbol");

        // Character set & emptiness are checked before any planning
        let len = to_alphanumeric(self.text)?.len();
        let (ver, ecl) = match (self.version, self.ec_level) {
            (Some(v), Some(e)) => (v, e),
            (Some(v), None) => (v, find_best_ec_level(len, v)?),
            // A forced level picks the smallest version holding the text at that level
            (None, Some(e)) => (find_min_version(len, e)?, e),
            (None, None) => {
                let v = find_min_version(len, ECLevel::L)?;
                (v, find_best_ec_level(len, v)?)
            }
        };

        build_symbol(self.text, ver, ecl, self.mask)
    }
}

/// Runs the per symbol pipeline: encode, ecc, fixed patterns, placement, mask
/// & format info.
pub(crate) fn build_symbol(
    text: &str,
    ver: Version,
    ecl: ECLevel,
    mask: Option<MaskPattern>,
) -> QRResult<Symbol> {
    let data = encode(text, ver, ecl)?;
    let payload = add_error_correction(&data, ver, ecl);

    let mut qr = QR::new(ver, ecl);
    qr.reserve_function_area();
    qr.draw_payload(payload)?;

    let mask = match mask {
        Some(m) => {
            qr.apply_mask(m);
            m
        }
        None => apply_best_mask(&mut qr),
    };

    let symbol = qr.finish(mask);
    debug!(
        version = *ver,
        ec_level = ?ecl,
        mask = *mask,
        dark_modules = symbol.count_dark_modules(),
        "Built symbol"
    );
    Ok(symbol)
}
