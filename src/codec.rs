//! Top-level pipeline orchestration: validates options, runs the
//! StreamVByte and Zstd stages in order, and maps every failure to the
//! matching [`VbzError`].

use crate::dispatch;
use crate::error::VbzError;
use crate::framing;
use crate::options::CompressionOptions;
use crate::zstd_codec;

/// Probe whether an allocation of `cap` bytes is plausible before doing
/// real work, so [`VbzError::OutOfMemory`] has a real caller on the
/// intermediate-buffer allocations below.
fn probe_allocation(cap: usize) -> Result<(), VbzError> {
    let mut probe = Vec::new();
    probe
        .try_reserve_exact(cap)
        .map_err(|_| VbzError::OutOfMemory)
}

/// Upper bound on the output of `compress_sized` for `source_size` bytes
/// under `opts` — the StreamVByte/Zstd body bound plus the 4-byte frame
/// header, since that's the buffer callers actually need to size.
pub fn max_compressed_size(source_size: u32, opts: &CompressionOptions) -> Result<u32, VbzError> {
    opts.validate()?;
    let mut max_size = source_size;
    if opts.streamvbyte_enabled() {
        max_size =
            dispatch::max_streamvbyte_compressed_size(opts.integer_size, opts.vbz_version, max_size);
    }
    if opts.zstd_enabled() {
        max_size = zstd_codec::compress_bound(max_size as usize) as u32;
    }
    Ok(max_size + framing::HEADER_LEN as u32)
}

/// Run the pipeline forward: `src -> [delta+zig-zag -> StreamVByte] ->
/// [Zstd] -> dst`. Returns the number of bytes written to `dst`.
pub fn compress(
    src: &[u8],
    dst: &mut [u8],
    opts: &CompressionOptions,
) -> Result<u32, VbzError> {
    opts.validate()?;

    if !opts.streamvbyte_enabled() && !opts.zstd_enabled() {
        log::trace!("both stages disabled, copying {} bytes verbatim", src.len());
        return copy_into(src, dst);
    }

    let streamvbyte_output = if opts.streamvbyte_enabled() {
        let max_size = dispatch::max_streamvbyte_compressed_size(
            opts.integer_size,
            opts.vbz_version,
            src.len() as u32,
        );
        probe_allocation(max_size as usize)?;
        let encoded = dispatch::compress(
            src,
            opts.integer_size,
            opts.perform_delta_zig_zag,
            opts.vbz_version,
        )?;
        log::trace!("streamvbyte stage: {} -> {} bytes", src.len(), encoded.len());
        Some(encoded)
    } else {
        None
    };
    let current: &[u8] = streamvbyte_output.as_deref().unwrap_or(src);

    if !opts.zstd_enabled() {
        return copy_into(current, dst);
    }

    let compressed = zstd_codec::compress(current, opts.zstd_compression_level as i32)?;
    log::trace!("zstd stage: {} -> {} bytes", current.len(), compressed.len());
    copy_into(&compressed, dst)
}

/// Run the pipeline in reverse: `src -> [Zstd] -> [StreamVByte] -> dst`.
/// `dst.len()` must equal the exact original byte count.
pub fn decompress(
    src: &[u8],
    dst: &mut [u8],
    opts: &CompressionOptions,
) -> Result<u32, VbzError> {
    opts.validate()?;

    if !opts.streamvbyte_enabled() && !opts.zstd_enabled() {
        log::trace!("both stages disabled, copying {} bytes verbatim", src.len());
        return copy_into(src, dst);
    }

    let zstd_output = if opts.zstd_enabled() {
        let expected_size = zstd_codec::content_size(src)?;
        let capacity = if opts.streamvbyte_enabled() {
            expected_size as usize
        } else {
            if (dst.len() as u32) < expected_size {
                return Err(VbzError::DestinationSize);
            }
            expected_size as usize
        };
        probe_allocation(capacity)?;
        let decoded = zstd_codec::decompress(src, capacity)?;
        log::trace!("zstd stage: {} -> {} bytes", src.len(), decoded.len());
        Some(decoded)
    } else {
        None
    };
    let current: &[u8] = zstd_output.as_deref().unwrap_or(src);

    if !opts.streamvbyte_enabled() {
        return copy_into(current, dst);
    }

    let decoded = dispatch::decompress(
        current,
        dst.len() as u32,
        opts.integer_size,
        opts.perform_delta_zig_zag,
        opts.vbz_version,
    )?;
    log::trace!("streamvbyte stage: {} -> {} bytes", current.len(), decoded.len());
    copy_into(&decoded, dst)
}

fn copy_into(source: &[u8], dst: &mut [u8]) -> Result<u32, VbzError> {
    if dst.len() < source.len() {
        log::warn!(
            "destination capacity {} is smaller than required {}",
            dst.len(),
            source.len()
        );
        return Err(VbzError::DestinationSize);
    }
    dst[..source.len()].copy_from_slice(source);
    Ok(source.len() as u32)
}

#[cfg(test)]
mod test {
    use super::*;

    fn opts(zigzag: bool, integer_size: u32, zstd_level: u32, version: u32) -> CompressionOptions {
        CompressionOptions::new(zigzag, integer_size, zstd_level, version)
    }

    #[test]
    fn identity_path_copies_verbatim() {
        let o = opts(false, 0, 0, 0);
        let src = [0x01u8, 0x02, 0x03];
        let mut dst = [0u8; 3];
        let n = compress(&src, &mut dst, &o).unwrap();
        assert_eq!(n, 3);
        assert_eq!(dst, src);
    }

    #[test]
    fn too_small_destination_is_destination_size_error() {
        let o = opts(false, 0, 0, 0);
        let src = [0x01u8, 0x02, 0x03];
        let mut dst: [u8; 0] = [];
        assert_eq!(compress(&src, &mut dst, &o), Err(VbzError::DestinationSize));
    }

    #[test]
    fn round_trip_streamvbyte_only() {
        let o = opts(true, 4, 0, 0);
        let values: [i32; 5] = [5, 4, 3, 2, 1];
        let mut src = Vec::new();
        for v in values {
            src.extend_from_slice(&v.to_le_bytes());
        }
        let max = max_compressed_size(src.len() as u32, &o).unwrap();
        let mut dst = vec![0u8; max as usize];
        let n = compress(&src, &mut dst, &o).unwrap();
        dst.truncate(n as usize);

        let mut out = vec![0u8; src.len()];
        let m = decompress(&dst, &mut out, &o).unwrap();
        assert_eq!(m as usize, src.len());
        assert_eq!(out, src);
    }

    #[test]
    fn round_trip_streamvbyte_and_zstd() {
        let o = opts(true, 4, 3, 0);
        let values: [i32; 5] = [5, 4, 3, 2, 1];
        let mut src = Vec::new();
        for v in values {
            src.extend_from_slice(&v.to_le_bytes());
        }
        let max = max_compressed_size(src.len() as u32, &o).unwrap();
        let mut dst = vec![0u8; max as usize];
        let n = compress(&src, &mut dst, &o).unwrap();
        dst.truncate(n as usize);

        let mut out = vec![0u8; src.len()];
        let m = decompress(&dst, &mut out, &o).unwrap();
        assert_eq!(m as usize, src.len());
        assert_eq!(out, src);
    }

    #[test]
    fn empty_input_round_trips() {
        let o = opts(true, 2, 5, 1);
        let src: [u8; 0] = [];
        let max = max_compressed_size(0, &o).unwrap();
        let mut dst = vec![0u8; max as usize];
        let n = compress(&src, &mut dst, &o).unwrap();
        dst.truncate(n as usize);

        let mut out: [u8; 0] = [];
        let m = decompress(&dst, &mut out, &o).unwrap();
        assert_eq!(m, 0);
    }
}
