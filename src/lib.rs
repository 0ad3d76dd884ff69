//! # triqr
//!
//! Encodes three short texts as three standard QR codes and multiplexes them
//! into one 8-colour symbol, so every module carries 3 bits instead of 1.
//!
//! ## Features
//!
//! - **Alphanumeric QR encoding**: versions 2 to 6, built from scratch per ISO/IEC 18004
//! - **Shared layout planning**: one version for all three codes, the strongest EC level each payload allows
//! - **Reed-Solomon error correction**: GF(256) parity with the standard block layout
//! - **Mask selection**: all 8 masks scored with the 4 standard penalty rules
//! - **Triple overlay**: `s0 + 2*s1 + 4*s2` per module, rendered with an 8-colour palette
//!
//! ## Quick Start
//!
//! ```rust
//! use triqr::compose;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let code = compose("HELLO", "WORLD", "TEST123")?;
//! assert!(code.matrix().iter().all(|&v| v < 8));
//!
//! let img = code.to_image(4); // 4x scale factor
//! img.save("triple.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use triqr::{ECLevel, MaskPattern, QRBuilder, TripleBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Shared version - if not provided, the smallest one fitting the longest text
//! let code = TripleBuilder::new(["ONE", "TWO", "THREE"]).version(Version::new(4)?).build()?;
//! assert_eq!(code.ec_levels(), [ECLevel::H; 3]);
//!
//! // A single plain symbol
//! let symbol = QRBuilder::new("AC-42")
//!     .version(Version::new(2)?)   // if not provided, the smallest version that fits
//!     .ec_level(ECLevel::Q)         // if not provided, the highest level that fits
//!     .mask(MaskPattern::try_new(3)?) // if not provided, the lowest penalty mask
//!     .build()?;
//! symbol.to_image(4).save("single.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Reading a triple code
//!
//! Each bit of a cell belongs to one symbol. `TripleCode::plane(i)` splits the
//! overlay back into the `i`-th symbol, which any standard reader decodes.
//!
//! ## Palette
//!
//! | value | colour  | value | colour  |
//! |-------|---------|-------|---------|
//! | 0     | white   | 4     | blue    |
//! | 1     | yellow  | 5     | green   |
//! | 2     | red     | 6     | magenta |
//! | 3     | orange  | 7     | black   |

pub mod builder;
pub(crate) mod common;
pub mod render;

pub use builder::{compose, QRBuilder, Symbol, TripleBuilder, TripleCode};
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{ECLevel, Version};
pub use render::PALETTE;
