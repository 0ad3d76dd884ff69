use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Error)]
pub enum QRError {
    // Input
    #[error("empty data")]
    EmptyData,
    #[error("unsupported character {0:?} in alphanumeric mode")]
    UnsupportedCharacter(char),
    #[error("data of length {0} exceeds the symbol capacity")]
    CapacityExceeded(usize),
    #[error("invalid version {0}, expected 2 to 6")]
    InvalidVersion(u8),
    #[error("invalid masking pattern {0}, expected 0 to 7")]
    InvalidMaskPattern(u8),

    // Internal invariants
    #[error("bitstream overflowed the encoding region")]
    BitstreamOverflow,
    #[error("symbols of the triple code have different widths")]
    GeometryMismatch,
}

impl QRError {
    /// Errors raised by a construction defect rather than by caller input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::BitstreamOverflow | Self::GeometryMismatch)
    }
}

pub type QRResult<T> = Result<T, QRError>;
