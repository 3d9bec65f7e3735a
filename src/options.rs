//! The single configuration record carried alongside every payload.

use crate::error::VbzError;

/// Default [`CompressionOptions::vbz_version`], matching `VBZ_DEFAULT_VERSION`.
pub const DEFAULT_VERSION: u32 = 0;

/// Configuration for one compress/decompress call.
///
/// The same record must be supplied at compression and decompression time:
/// there is no self-describing header, so a mismatched options record will
/// silently produce garbage or a stream error rather than a clean failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionOptions {
    /// Apply the zig-zag delta transform (§4.1) before StreamVByte packing.
    pub perform_delta_zig_zag: bool,
    /// Declared byte width of input integers: one of {0, 1, 2, 4}.
    /// `0` disables the StreamVByte stage entirely.
    pub integer_size: u32,
    /// Zstd compression level to apply; `0` disables the Zstd stage.
    pub zstd_compression_level: u32,
    /// `0` (legacy, all widths use StreamVByte v0) or `1` (1-byte width
    /// uses v1, 2- and 4-byte widths still use v0 — see DESIGN.md).
    pub vbz_version: u32,
}

impl CompressionOptions {
    /// Convenience constructor for the common "fastest" VBZ configuration:
    /// delta+zig-zag on, 16-bit integers, StreamVByte only, no Zstd.
    pub const fn new(
        perform_delta_zig_zag: bool,
        integer_size: u32,
        zstd_compression_level: u32,
        vbz_version: u32,
    ) -> Self {
        Self {
            perform_delta_zig_zag,
            integer_size,
            zstd_compression_level,
            vbz_version,
        }
    }

    /// `integer_size in {0,1,2,4}` and `vbz_version in {0,1}`, else the
    /// matching error.
    pub fn validate(&self) -> Result<(), VbzError> {
        match self.integer_size {
            0 | 1 | 2 | 4 => {}
            other => {
                log::warn!("rejecting unsupported integer_size {other}");
                return Err(VbzError::IntegerSize);
            }
        }
        match self.vbz_version {
            0 | 1 => {}
            other => {
                log::warn!("rejecting unsupported vbz_version {other}");
                return Err(VbzError::Version);
            }
        }
        Ok(())
    }

    pub fn streamvbyte_enabled(&self) -> bool {
        self.integer_size != 0
    }

    pub fn zstd_enabled(&self) -> bool {
        self.zstd_compression_level != 0
    }
}
