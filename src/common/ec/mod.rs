mod galois;

pub(crate) use galois::*;

/// Largest data block of the supported versions (6-L: 68, 5-L: 108)
pub static MAX_BLOCK_SIZE: usize = 108;

/// Largest ec block of the supported versions
pub static MAX_EC_SIZE: usize = 28;
