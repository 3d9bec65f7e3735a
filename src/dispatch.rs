//! Integer-size / version dispatch.
//!
//! A small match-based jump table rather than per-width monomorphized
//! generics: this codec is meant to be linked into a filter plugin, where
//! binary size matters more than the last bit of inlining.

use crate::error::VbzError;
use crate::streamvbyte::{v0, v1};
use crate::zigzag::{delta_zigzag_decode, delta_zigzag_encode};

/// v1-labeled payloads of width 2 and 4 are still encoded/decoded with the
/// v0 worker: empirically, v1's denser key noise hurts downstream Zstd
/// ratios for anything wider than a byte. Only width 1 actually uses v1
/// under `vbz_version = 1`. See DESIGN.md.
fn effective_version(integer_size: u32, vbz_version: u32) -> u32 {
    if integer_size == 1 {
        vbz_version
    } else {
        0
    }
}

/// Read `width`-byte little-endian integers out of `src`, widening each to
/// 32 bits: sign-extend when `signed` (i.e. when the zig-zag flag is on),
/// zero-extend otherwise, regardless of the caller's own signedness intent.
/// See DESIGN.md's "unsigned zig-zag" note.
fn widen(src: &[u8], width: u32, signed: bool) -> Vec<u32> {
    match width {
        1 => src
            .iter()
            .map(|&b| if signed { (b as i8) as i32 as u32 } else { b as u32 })
            .collect(),
        2 => src
            .chunks_exact(2)
            .map(|c| {
                let v = u16::from_le_bytes([c[0], c[1]]);
                if signed {
                    (v as i16) as i32 as u32
                } else {
                    v as u32
                }
            })
            .collect(),
        4 => src
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect(),
        other => unreachable!("unsupported integer_size {other} reached widen()"),
    }
}

/// Inverse of [`widen`]: truncate 32-bit values back to `width`-byte
/// little-endian integers.
fn narrow(values: &[i32], width: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * width as usize);
    match width {
        1 => {
            for &v in values {
                out.push(v as i8 as u8);
            }
        }
        2 => {
            for &v in values {
                out.extend_from_slice(&(v as i16).to_le_bytes());
            }
        }
        4 => {
            for &v in values {
                out.extend_from_slice(&v.to_le_bytes());
            }
        }
        other => unreachable!("unsupported integer_size {other} reached narrow()"),
    }
    out
}

fn streamvbyte_encode(residues: &[u32], version: u32) -> Vec<u8> {
    match version {
        0 => v0::encode(residues),
        1 => v1::encode(residues),
        _ => unreachable!("validated version must be 0 or 1"),
    }
}

fn streamvbyte_decode(compressed: &[u8], n: usize, version: u32) -> Result<Vec<u32>, VbzError> {
    match version {
        0 => v0::decode(compressed, n),
        1 => v1::decode(compressed, n),
        _ => unreachable!("validated version must be 0 or 1"),
    }
}

/// Upper bound on the StreamVByte payload for `source_size` bytes of
/// `integer_size`-wide integers under the given version.
pub fn max_streamvbyte_compressed_size(integer_size: u32, vbz_version: u32, source_size: u32) -> u32 {
    let n = source_size as usize / integer_size.max(1) as usize;
    let version = effective_version(integer_size, vbz_version);
    let bound = match version {
        0 => v0::max_compressed_size(n),
        1 => v1::max_compressed_size(n),
        _ => unreachable!("validated version must be 0 or 1"),
    };
    bound as u32
}

/// `delta-zig-zag + StreamVByte` compression of a raw integer byte buffer.
pub fn compress(
    source: &[u8],
    integer_size: u32,
    perform_delta_zig_zag: bool,
    vbz_version: u32,
) -> Result<Vec<u8>, VbzError> {
    if source.len() % integer_size as usize != 0 {
        log::warn!(
            "input size {} is not a multiple of integer_size {integer_size}",
            source.len()
        );
        return Err(VbzError::InputSize);
    }

    let widened = widen(source, integer_size, perform_delta_zig_zag);
    let residues = if perform_delta_zig_zag {
        let signed: Vec<i32> = widened.into_iter().map(|v| v as i32).collect();
        delta_zigzag_encode(&signed)
    } else {
        widened
    };

    let version = effective_version(integer_size, vbz_version);
    Ok(streamvbyte_encode(&residues, version))
}

/// Inverse of [`compress`]; `destination_size` is the exact expected
/// decompressed byte length.
pub fn decompress(
    source: &[u8],
    destination_size: u32,
    integer_size: u32,
    perform_delta_zig_zag: bool,
    vbz_version: u32,
) -> Result<Vec<u8>, VbzError> {
    if destination_size % integer_size != 0 {
        log::warn!(
            "destination size {destination_size} is not a multiple of integer_size {integer_size}"
        );
        return Err(VbzError::DestinationSize);
    }
    let n = (destination_size / integer_size) as usize;
    let version = effective_version(integer_size, vbz_version);
    let residues = streamvbyte_decode(source, n, version)?;

    let values: Vec<i32> = if perform_delta_zig_zag {
        delta_zigzag_decode(&residues)
    } else {
        residues.into_iter().map(|r| r as i32).collect()
    };

    Ok(narrow(&values, integer_size))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn scenario_two_int32_with_zigzag() {
        let values: [i32; 5] = [5, 4, 3, 2, 1];
        let mut source = Vec::new();
        for v in values {
            source.extend_from_slice(&v.to_le_bytes());
        }
        let compressed = compress(&source, 4, true, 0).unwrap();
        assert_eq!(compressed, vec![0u8, 0, 10, 1, 1, 1, 1]);

        let decompressed = decompress(&compressed, source.len() as u32, 4, true, 0).unwrap();
        assert_eq!(decompressed, source);
    }

    #[test]
    fn scenario_four_unsigned_no_zigzag() {
        let values: [u16; 11] = [0, 1, 4, 9, 16, 25, 36, 49, 64, 81, 100];
        let mut source = Vec::new();
        for v in values {
            source.extend_from_slice(&v.to_le_bytes());
        }
        let compressed = compress(&source, 2, false, 0).unwrap();
        let mut expected = vec![0u8, 0, 0];
        for v in values {
            expected.push(v as u8);
        }
        assert_eq!(compressed, expected);

        let decompressed = decompress(&compressed, source.len() as u32, 2, false, 0).unwrap();
        assert_eq!(decompressed, source);
    }

    #[test]
    fn width_two_stays_on_v0_even_under_version_one() {
        let values: [i16; 4] = [1, -1, 1000, -1000];
        let mut source = Vec::new();
        for v in values {
            source.extend_from_slice(&v.to_le_bytes());
        }
        let v0_bytes = compress(&source, 2, true, 0).unwrap();
        let v1_bytes = compress(&source, 2, true, 1).unwrap();
        assert_eq!(v0_bytes, v1_bytes);
    }

    #[test]
    fn width_one_actually_switches_to_v1() {
        let values: [i8; 4] = [1, -1, 50, -50];
        let source: Vec<u8> = values.iter().map(|&v| v as u8).collect();
        let v0_bytes = compress(&source, 1, true, 0).unwrap();
        let v1_bytes = compress(&source, 1, true, 1).unwrap();
        assert_ne!(v0_bytes, v1_bytes);
    }

    #[test]
    fn non_multiple_length_is_input_size_error() {
        let source = [0u8, 1, 2];
        assert_eq!(compress(&source, 2, false, 0), Err(VbzError::InputSize));
    }

    #[test]
    fn non_multiple_destination_is_destination_size_error() {
        let compressed = compress(&[0u8, 1, 2, 3], 2, false, 0).unwrap();
        assert_eq!(
            decompress(&compressed, 3, 2, false, 0),
            Err(VbzError::DestinationSize)
        );
    }

    proptest::proptest! {
        #[test]
        fn prop_round_trip_i16(
            zigzag in proptest::bool::ANY,
            version in 0u32..2,
            values in proptest::collection::vec(proptest::num::i16::ANY, 0..256),
        ) {
            let mut source = Vec::new();
            for v in &values {
                source.extend_from_slice(&v.to_le_bytes());
            }
            let compressed = compress(&source, 2, zigzag, version).unwrap();
            let decompressed = decompress(&compressed, source.len() as u32, 2, zigzag, version).unwrap();
            proptest::prop_assert_eq!(decompressed, source);
        }
    }
}
