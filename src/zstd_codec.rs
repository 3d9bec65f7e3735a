//! Thin wrapper around the Zstd entropy coder.

use crate::error::VbzError;

/// Fuzz-harness affordance: cap the probed decompressed size so a
/// malicious frame header can't claim an unbounded allocation. `None`
/// (the default here) removes the cap, which is the right choice for a
/// production build; a fuzz harness can set it through its own test
/// configuration if ever needed.
pub const MAX_PROBED_ZSTD_SIZE: Option<u64> = None;

pub fn compress_bound(src_size: usize) -> usize {
    zstd::zstd_safe::compress_bound(src_size)
}

pub fn compress(src: &[u8], level: i32) -> Result<Vec<u8>, VbzError> {
    zstd::bulk::compress(src, level).map_err(VbzError::from)
}

pub fn decompress(src: &[u8], capacity: usize) -> Result<Vec<u8>, VbzError> {
    zstd::bulk::decompress(src, capacity).map_err(VbzError::from)
}

/// Probe the decompressed content size recorded in a Zstd frame header.
pub fn content_size(src: &[u8]) -> Result<u32, VbzError> {
    match zstd::zstd_safe::get_frame_content_size(src) {
        Ok(Some(size)) => {
            if let Some(cap) = MAX_PROBED_ZSTD_SIZE {
                if size > cap {
                    log::warn!("zstd frame claims {size} bytes, above policy cap {cap}");
                    return Err(VbzError::Zstd);
                }
            }
            u32::try_from(size).map_err(|_| VbzError::Zstd)
        }
        Ok(None) => {
            log::warn!("zstd frame does not declare a content size");
            Err(VbzError::Zstd)
        }
        Err(_) => {
            log::warn!("zstd frame content-size probe failed");
            Err(VbzError::Zstd)
        }
    }
}
