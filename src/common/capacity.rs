use tracing::debug;

use super::error::{QRError, QRResult};
use super::metadata::{ECLevel, Version};

// Capacity planner
//------------------------------------------------------------------------------

/// Smallest version whose level L capacity holds the longest payload. All
/// symbols of a triple code share it so their grids overlay exactly.
pub fn find_shared_version(lens: &[usize]) -> QRResult<Version> {
    let longest = lens.iter().copied().max().unwrap_or(0);
    find_min_version(longest, ECLevel::L)
}

/// Smallest version holding `len` chars at the given ec level
pub fn find_min_version(len: usize, ecl: ECLevel) -> QRResult<Version> {
    Version::all()
        .find(|v| v.alphanumeric_capacity(ecl) >= len)
        .ok_or(QRError::CapacityExceeded(len))
}

/// Highest ec level at which a payload of `len` chars still fits the version
pub fn find_best_ec_level(len: usize, ver: Version) -> QRResult<ECLevel> {
    ECLevel::DESCENDING
        .into_iter()
        .find(|&ecl| ver.alphanumeric_capacity(ecl) >= len)
        .ok_or(QRError::CapacityExceeded(len))
}

pub fn plan<const N: usize>(lens: [usize; N]) -> QRResult<(Version, [ECLevel; N])> {
    let ver = find_shared_version(&lens)?;
    let mut ecls = [ECLevel::L; N];
    for (ecl, &len) in ecls.iter_mut().zip(lens.iter()) {
        *ecl = find_best_ec_level(len, ver)?;
    }
    debug!(?lens, version = *ver, ?ecls, "Planned capacity");
    Ok((ver, ecls))
}

#[cfg(test)]
mod capacity_tests {
    use test_case::test_case;

    use super::{find_best_ec_level, find_min_version, find_shared_version, plan};
    use crate::common::{
        error::QRError,
        metadata::{ECLevel, Version},
    };

    #[test_case(&[1, 1, 1], 2)]
    #[test_case(&[5, 12, 40], 2)]
    #[test_case(&[47, 0, 0], 2)]
    #[test_case(&[48, 3, 3], 3)]
    #[test_case(&[100, 3, 3], 4)]
    #[test_case(&[154, 155, 3], 6)]
    #[test_case(&[195, 195, 195], 6)]
    fn test_shared_version(lens: &[usize], exp: u8) {
        assert_eq!(find_shared_version(lens), Ok(Version::new(exp).unwrap()));
    }

    #[test]
    fn test_shared_version_overflow() {
        assert_eq!(find_shared_version(&[5, 196, 5]), Err(QRError::CapacityExceeded(196)));
    }

    #[test_case(30, ECLevel::H, 3)]
    #[test_case(35, ECLevel::H, 3)]
    #[test_case(36, ECLevel::H, 4)]
    #[test_case(38, ECLevel::M, 2)]
    #[test_case(84, ECLevel::H, 6)]
    #[test_case(195, ECLevel::L, 6)]
    fn test_min_version(len: usize, ecl: ECLevel, exp: u8) {
        assert_eq!(find_min_version(len, ecl), Ok(Version::new(exp).unwrap()));
    }

    #[test]
    fn test_min_version_overflow() {
        assert_eq!(find_min_version(85, ECLevel::H), Err(QRError::CapacityExceeded(85)));
    }

    #[test_case(20, 2, ECLevel::H)]
    #[test_case(21, 2, ECLevel::Q)]
    #[test_case(38, 2, ECLevel::M)]
    #[test_case(39, 2, ECLevel::L)]
    #[test_case(84, 6, ECLevel::H)]
    #[test_case(109, 6, ECLevel::M)]
    #[test_case(195, 6, ECLevel::L)]
    fn test_best_ec_level(len: usize, v: u8, exp: ECLevel) {
        assert_eq!(find_best_ec_level(len, Version::new(v).unwrap()), Ok(exp));
    }

    #[test]
    fn test_plan() {
        let (ver, ecls) = plan([5, 12, 40]).unwrap();
        assert_eq!(*ver, 2);
        assert_eq!(ecls, [ECLevel::H, ECLevel::H, ECLevel::L]);

        let (ver, ecls) = plan([60, 10, 100]).unwrap();
        assert_eq!(*ver, 4);
        assert_eq!(ecls, [ECLevel::Q, ECLevel::H, ECLevel::L]);
    }
}
