//! Public entry points.
//!
//! The six sentinel-returning functions below are the load-bearing ABI
//! surface: callers linking this codec as a filter plugin check specific
//! `u32` return values, so every one of them returns a plain `u32` rather
//! than a `Result`. Internally they all delegate to [`crate::codec`], which
//! does the real work in `Result<_, VbzError>` form and only gets
//! flattened to a sentinel at this boundary.
//!
//! Alongside that surface, `try_*` wrappers give callers who are not
//! implementing an ABI boundary an idiomatic `Result<Vec<u8>, VbzError>`
//! entry point over the same sized-buffer primitives.

use crate::codec;
use crate::error::VbzError;
use crate::framing;
use crate::options::CompressionOptions;

pub use crate::error::{error_string, is_error};

fn flatten(result: Result<u32, VbzError>) -> u32 {
    result.unwrap_or_else(|e| e.code())
}

/// Upper bound on [`compress_sized`]'s output for `src_size` bytes under
/// `opts` (this already includes the 4-byte frame header, so it is also a
/// safe, if slightly loose, bound for sizing a plain [`compress`] buffer).
pub fn max_compressed_size(src_size: u32, opts: &CompressionOptions) -> u32 {
    flatten(codec::max_compressed_size(src_size, opts))
}

/// Compress `src` into `dst`, returning the number of bytes written or an
/// error sentinel. The caller must already know `src.len()` to decompress
/// (see [`decompress`]); use [`compress_sized`] if that isn't available.
pub fn compress(src: &[u8], dst: &mut [u8], opts: &CompressionOptions) -> u32 {
    flatten(codec::compress(src, dst, opts))
}

/// Inverse of [`compress`]. `dst.len()` must equal the exact original byte
/// count.
pub fn decompress(src: &[u8], dst: &mut [u8], opts: &CompressionOptions) -> u32 {
    flatten(codec::decompress(src, dst, opts))
}

/// Compress `src` into `dst`, prefixing a 4-byte little-endian original-size
/// header so [`decompress_sized`]/[`decompressed_size`] don't need the
/// original length communicated out of band.
pub fn compress_sized(src: &[u8], dst: &mut [u8], opts: &CompressionOptions) -> u32 {
    if dst.len() < framing::HEADER_LEN {
        log::warn!("compress_sized destination is smaller than the frame header");
        return VbzError::DestinationSize.code();
    }
    let (header_dst, body_dst) = dst.split_at_mut(framing::HEADER_LEN);
    match codec::compress(src, body_dst, opts) {
        Ok(n) => {
            header_dst.copy_from_slice(&framing::write_header(src.len() as u32));
            framing::HEADER_LEN as u32 + n
        }
        Err(e) => e.code(),
    }
}

/// Inverse of [`compress_sized`]. `dst` must have capacity for at least the
/// original size recorded in `src`'s header.
pub fn decompress_sized(src: &[u8], dst: &mut [u8], opts: &CompressionOptions) -> u32 {
    if src.len() < framing::HEADER_LEN {
        log::warn!("decompress_sized source is smaller than the frame header");
        return VbzError::InputSize.code();
    }
    let original_size = framing::read_header(src);
    if (dst.len() as u32) < original_size {
        return VbzError::DestinationSize.code();
    }
    let body = &src[framing::HEADER_LEN..];
    flatten(codec::decompress(body, &mut dst[..original_size as usize], opts))
}

/// Read the original byte count out of a [`compress_sized`] frame's header
/// without decompressing the body.
pub fn decompressed_size(src: &[u8], _opts: &CompressionOptions) -> u32 {
    if src.len() < framing::HEADER_LEN {
        log::warn!("decompressed_size source is smaller than the frame header");
        return VbzError::InputSize.code();
    }
    framing::read_header(src)
}

/// `try_*` wrapper over [`compress`]: allocates its own destination buffer.
pub fn try_compress(src: &[u8], opts: &CompressionOptions) -> Result<Vec<u8>, VbzError> {
    opts.validate()?;
    let max_size = codec::max_compressed_size(src.len() as u32, opts)?;
    let mut dst = vec![0u8; max_size as usize];
    let n = codec::compress(src, &mut dst, opts)?;
    dst.truncate(n as usize);
    Ok(dst)
}

/// `try_*` wrapper over [`decompress`]. `original_size` must be known to
/// the caller out of band (it is not recorded in the unsized wire form).
pub fn try_decompress(
    src: &[u8],
    original_size: u32,
    opts: &CompressionOptions,
) -> Result<Vec<u8>, VbzError> {
    let mut dst = vec![0u8; original_size as usize];
    let n = codec::decompress(src, &mut dst, opts)?;
    dst.truncate(n as usize);
    Ok(dst)
}

/// `try_*` wrapper over [`compress_sized`].
pub fn try_compress_sized(src: &[u8], opts: &CompressionOptions) -> Result<Vec<u8>, VbzError> {
    opts.validate()?;
    let body_max = codec::max_compressed_size(src.len() as u32, opts)?;
    let mut body = vec![0u8; body_max as usize];
    let n = codec::compress(src, &mut body, opts)?;
    body.truncate(n as usize);

    let mut out = Vec::with_capacity(framing::HEADER_LEN + body.len());
    out.extend_from_slice(&framing::write_header(src.len() as u32));
    out.extend_from_slice(&body);
    Ok(out)
}

/// `try_*` wrapper over [`decompress_sized`].
pub fn try_decompress_sized(src: &[u8], opts: &CompressionOptions) -> Result<Vec<u8>, VbzError> {
    if src.len() < framing::HEADER_LEN {
        return Err(VbzError::InputSize);
    }
    let original_size = framing::read_header(src);
    let body = &src[framing::HEADER_LEN..];
    let mut dst = vec![0u8; original_size as usize];
    let n = codec::decompress(body, &mut dst, opts)?;
    dst.truncate(n as usize);
    Ok(dst)
}
