//! StreamVByte v0: classic four-way 2-bit key, one-to-four byte lanes.
//!
//! Each 2-bit code `c` selects a `c + 1` byte little-endian lane — even a
//! zero-valued integer still consumes its full lane (confirmed by the
//! worked byte vectors in the scenario tests below, where residue `0` is
//! stored as a single `0x00` byte under `code = 0`; see DESIGN.md).

use crate::error::VbzError;
use crate::streamvbyte::{key_bytes_len, STREAMVBYTE_PADDING};

/// Smallest `code in 0..=3` such that `value` fits in `code + 1`
/// little-endian bytes.
fn code_for(value: u32) -> u8 {
    if value <= 0xFF {
        0
    } else if value <= 0xFFFF {
        1
    } else if value <= 0xFF_FFFF {
        2
    } else {
        3
    }
}

/// Upper bound on the encoded size for `n` integers: worst case every lane
/// is 4 bytes.
pub fn max_compressed_size(n: usize) -> usize {
    key_bytes_len(n) + 4 * n
}

/// Encode `values` as `keys ++ data`.
pub fn encode(values: &[u32]) -> Vec<u8> {
    let n = values.len();
    let mut keys = vec![0u8; key_bytes_len(n)];
    let mut data = Vec::with_capacity(n);

    for (i, &value) in values.iter().enumerate() {
        let code = code_for(value);
        keys[i / 4] |= code << (2 * (i % 4));
        let nbytes = code as usize + 1;
        data.extend_from_slice(&value.to_le_bytes()[..nbytes]);
    }

    keys.extend(data);
    keys
}

/// Decode `n` integers from a StreamVByte v0 payload.
///
/// Validates that the declared lane lengths plus the key region exactly
/// account for `compressed.len()`, returning
/// [`VbzError::StreamVByteStream`] on any mismatch (truncation or
/// corruption of keys or data).
pub fn decode(compressed: &[u8], n: usize) -> Result<Vec<u32>, VbzError> {
    let key_len = key_bytes_len(n);
    if compressed.len() < key_len {
        return Err(VbzError::StreamVByteStream);
    }
    let (keys, data) = compressed.split_at(key_len);

    let mut expected_data_len = 0usize;
    for i in 0..n {
        let code = (keys[i / 4] >> (2 * (i % 4))) & 0x3;
        expected_data_len += code as usize + 1;
    }
    if key_len + expected_data_len != compressed.len() {
        log::warn!(
            "streamvbyte v0 stream error: keys {key_len} + data {expected_data_len} != {}",
            compressed.len()
        );
        return Err(VbzError::StreamVByteStream);
    }

    // Copy into a padded scratch buffer even though this scalar decoder
    // never reads past `data`; the safe default is to copy.
    let mut padded = vec![0u8; data.len() + STREAMVBYTE_PADDING];
    padded[..data.len()].copy_from_slice(data);

    let mut out = Vec::with_capacity(n);
    let mut cursor = 0usize;
    for i in 0..n {
        let code = (keys[i / 4] >> (2 * (i % 4))) & 0x3;
        let nbytes = code as usize + 1;
        let mut buf = [0u8; 4];
        buf[..nbytes].copy_from_slice(&padded[cursor..cursor + nbytes]);
        out.push(u32::from_le_bytes(buf));
        cursor += nbytes;
    }
    Ok(out)
}
