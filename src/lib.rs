//! VBZ: a lossless codec for sequences of small integers, combining a
//! delta + zig-zag transform, StreamVByte variable-byte packing, and a
//! Zstd entropy-coding pass.
//!
//! The pipeline is built from independently testable stages:
//!
//! - [`zigzag`] — the delta + zig-zag transform (first stage, optional).
//! - [`streamvbyte`] — the variable-byte packer, in its v0 and v1 forms.
//! - [`dispatch`] — picks the integer width and StreamVByte version per
//!   call and drives the two stages above.
//! - [`zstd_codec`] — the entropy-coding pass (last stage, optional).
//! - [`framing`] — the size-prefixed wire form used by the `*_sized` API.
//! - [`codec`] — wires the stages above into the full forward/reverse
//!   pipeline.
//! - [`api`] — the public entry points: a `u32`-sentinel surface for ABI
//!   callers, plus `Result`-returning convenience wrappers.
//!
//! Configuration ([`CompressionOptions`]) and errors ([`VbzError`]) are
//! shared across every stage; the same options record used to compress a
//! payload must be supplied again to decompress it, since nothing in the
//! wire format is self-describing beyond the size prefix in the `*_sized`
//! forms.

mod api;
mod codec;
mod dispatch;
mod error;
mod framing;
mod options;
mod streamvbyte;
mod zigzag;
mod zstd_codec;

pub use api::{
    compress, compress_sized, decompress, decompress_sized, decompressed_size, error_string,
    is_error, max_compressed_size, try_compress, try_compress_sized, try_decompress,
    try_decompress_sized,
};
pub use error::{
    VbzError, DESTINATION_SIZE_ERROR, FIRST_ERROR, INPUT_SIZE_ERROR, INTEGER_SIZE_ERROR,
    OUT_OF_MEMORY_ERROR, STREAMVBYTE_STREAM_ERROR, VERSION_ERROR, ZSTD_ERROR,
};
pub use options::{CompressionOptions, DEFAULT_VERSION};
