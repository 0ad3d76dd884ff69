use std::ops::Deref;

use tracing::debug;

use crate::common::{
    bit_utils::BitStream,
    ec::{generator_polynomial, G, MAX_BLOCK_SIZE, MAX_EC_SIZE},
    metadata::{ECLevel, Version},
};

// Error correction
//------------------------------------------------------------------------------

/// Splits finished data codewords into blocks, computes their ecc and returns
/// the interleaved data followed by the interleaved ecc, expanded into bits.
pub fn add_error_correction(data: &BitStream, ver: Version, ecl: ECLevel) -> BitStream {
    debug_assert_eq!(
        data.len(),
        ver.data_bit_capacity(ecl),
        "Data must be padded to capacity before computing ecc"
    );

    let (data_blocks, ecc_blocks) = ecc(data.data(), ver, ecl);
    debug!(
        blocks = data_blocks.len(),
        ecc_per_block = ver.ecc_per_block(ecl),
        "Computed error correction codewords"
    );

    let mut payload = BitStream::new(ver.total_codewords() << 3);
    payload.extend(&interleave(&data_blocks));
    payload.extend(&interleave(&ecc_blocks));
    payload
}

// ECC: Error Correction Codeword generator
pub fn ecc(data: &[u8], ver: Version, ecl: ECLevel) -> (Vec<&[u8]>, Vec<Vec<u8>>) {
    let data_blocks = blockify(data, ver, ecl);

    let ecc_count = ver.ecc_per_block(ecl);
    let gen_poly = generator_polynomial(ecc_count);
    let ecc_blocks = data_blocks.iter().map(|b| ecc_per_block(b, &gen_poly)).collect::<Vec<_>>();

    (data_blocks, ecc_blocks)
}

pub fn blockify(data: &[u8], ver: Version, ecl: ECLevel) -> Vec<&[u8]> {
    let (block1_size, block1_count, block2_size, block2_count) = ver.data_codewords_per_block(ecl);

    let total_block1_size = block1_size * block1_count;
    let total_size = total_block1_size + block2_size * block2_count;

    debug_assert!(
        total_size == data.len(),
        "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
        data.len(),
        total_size
    );

    let mut data_blocks = Vec::with_capacity(block1_count + block2_count);
    data_blocks.extend(data[..total_block1_size].chunks(block1_size));
    if block2_size > 0 {
        data_blocks.extend(data[total_block1_size..].chunks(block2_size));
    }
    data_blocks
}

// Performs polynomial long division of the data polynomial by the generator
// polynomial. The coefficients of the remainder are the ecc.
fn ecc_per_block(block: &[u8], gen_poly: &[G]) -> Vec<u8> {
    let len = block.len();
    let ecc_count = gen_poly.len() - 1;
    debug_assert!(len <= MAX_BLOCK_SIZE, "Block too long: {len}");
    debug_assert!(ecc_count <= MAX_EC_SIZE, "Too many ecc: {ecc_count}");

    let mut res = block.to_vec();
    res.resize(len + ecc_count, 0);

    for i in 0..len {
        let lead_coeff = G(res[i]);
        if lead_coeff.0 == 0 {
            continue;
        }
        for (u, &g) in res[i + 1..].iter_mut().zip(gen_poly[1..].iter()) {
            *u ^= (g * lead_coeff).0;
        }
    }

    res.split_off(len)
}

pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    res
}

#[cfg(test)]
mod ec_tests {
    use test_case::test_case;

    use super::{add_error_correction, blockify, ecc, ecc_per_block, interleave};
    use crate::common::{
        bit_utils::BitStream,
        ec::{eval_poly, generator_polynomial, G},
        metadata::{ECLevel, Version},
    };

    #[test]
    fn test_poly_mod_1() {
        let res = ecc_per_block(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11", &generator_polynomial(10));
        assert_eq!(&*res, b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
    }

    #[test]
    fn test_poly_mod_2() {
        let res = ecc_per_block(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec", &generator_polynomial(13));
        assert_eq!(&*res, b"\xa8H\x16R\xd96\x9c\x00.\x0f\xb4z\x10");
    }

    #[test]
    fn test_poly_mod_3() {
        let res = ecc_per_block(b"CUF\x86W&U\xc2w2\x06\x12\x06g&", &generator_polynomial(18));
        assert_eq!(&*res, b"\xd5\xc7\x0b-s\xf7\xf1\xdf\xe5\xf8\x9au\x9aoV\xa1o'");
    }

    #[test]
    fn test_ecc_two_groups() {
        let msg = b"CUF\x86W&U\xc2w2\x06\x12\x06g&\xf6\xf6B\x07v\x86\xf2\x07&V\x16\xc6\xc7\x92\x06\
                    \xb6\xe6\xf7w2\x07v\x86W&R\x06\x86\x972\x07F\xf7vV\xc2\x06\x972\x10\xec\x11\xec\
                    \x11\xec\x11\xec";
        let expected_ec = [
            b"\xd5\xc7\x0b\x2d\x73\xf7\xf1\xdf\xe5\xf8\x9a\x75\x9a\x6f\x56\xa1\x6f\x27",
            b"\x57\xcc\x60\x3c\xca\xb6\x7c\x9d\xc8\x86\x1b\x81\xd1\x11\xa3\xa3\x78\x85",
            b"\x94\x74\xb1\xd4\x4c\x85\x4b\xf2\xee\x4c\xc3\xe6\xbd\x0a\x6c\xf0\xc0\x8d",
            b"\xeb\x9f\x05\xad\x18\x93\x3b\x21\x6a\x28\xff\xac\x52\x02\x83\x20\xb2\xec",
        ];
        let ver = Version::new(5).unwrap();
        let (data, ecc) = ecc(msg, ver, ECLevel::Q);
        assert_eq!(data.iter().map(|b| b.len()).collect::<Vec<_>>(), vec![15, 15, 16, 16]);
        assert_eq!(&*ecc, &expected_ec[..]);
    }

    #[test]
    fn test_ecc_deterministic() {
        let ver = Version::new(4).unwrap();
        let data = (0..ver.data_codewords(ECLevel::H)).map(|i| (i * 37) as u8).collect::<Vec<_>>();
        assert_eq!(ecc(&data, ver, ECLevel::H).1, ecc(&data, ver, ECLevel::H).1);
    }

    #[test]
    fn test_interleave() {
        let blocks = vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9, 0]];
        let interleaved = interleave(&blocks);
        assert_eq!(interleaved, vec![1, 4, 7, 2, 5, 8, 3, 6, 9, 0]);
    }

    #[test_case(2, ECLevel::L)]
    #[test_case(3, ECLevel::Q)]
    #[test_case(4, ECLevel::H)]
    #[test_case(5, ECLevel::Q)]
    #[test_case(6, ECLevel::L)]
    #[test_case(6, ECLevel::M)]
    fn test_codewords_have_zero_syndromes(v: u8, ecl: ECLevel) {
        let ver = Version::new(v).unwrap();
        let data = (0..ver.data_codewords(ecl)).map(|i| (i * 91 + 7) as u8).collect::<Vec<_>>();
        let (data_blocks, ecc_blocks) = ecc(&data, ver, ecl);
        for (d, e) in data_blocks.iter().zip(ecc_blocks.iter()) {
            let codeword = d.iter().chain(e.iter()).copied().collect::<Vec<_>>();
            for i in 0..ver.ecc_per_block(ecl) {
                assert_eq!(eval_poly(codeword.iter(), G::gen_pow(i)), G(0));
            }
        }
    }

    #[test]
    fn test_single_block_appends_parity() {
        let ver = Version::new(2).unwrap();
        let data = (0..ver.data_codewords(ECLevel::M)).map(|i| i as u8).collect::<Vec<_>>();
        let payload = add_error_correction(&BitStream::from(&data), ver, ECLevel::M);
        let (_, ecc) = ecc(&data, ver, ECLevel::M);
        assert_eq!(payload.len(), ver.total_codewords() << 3);
        assert_eq!(&payload.data()[..data.len()], &data[..]);
        assert_eq!(&payload.data()[data.len()..], &ecc[0][..]);
    }

    #[test]
    fn test_blockify() {
        let ver = Version::new(4).unwrap();
        let data = [0u8; 36];
        let blocks = blockify(&data, ver, ECLevel::H);
        assert_eq!(blocks.len(), 4);
        assert!(blocks.iter().all(|b| b.len() == 9));
    }
}
