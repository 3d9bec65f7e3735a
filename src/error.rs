//! Error types.
//!
//! The wire-facing API (see [`crate::api`]) returns a flat `u32` sentinel
//! space rather than a `Result`, because callers that link against this
//! codec as a filter plugin check specific numeric return values. Internally
//! every stage returns a `Result<_, VbzError>` and only the public entry
//! points flatten it down to a sentinel via [`VbzError::code`].

/// Reserved sentinel values, one per [`VbzError`] variant.
///
/// These are the two's-complement `u32` representations of small negative
/// numbers. They MUST be preserved bit-for-bit: callers compare against
/// the concrete values, not just `is_error`.
pub const ZSTD_ERROR: u32 = -1i32 as u32;
pub const INPUT_SIZE_ERROR: u32 = -2i32 as u32;
pub const INTEGER_SIZE_ERROR: u32 = -3i32 as u32;
pub const DESTINATION_SIZE_ERROR: u32 = -4i32 as u32;
pub const STREAMVBYTE_STREAM_ERROR: u32 = -5i32 as u32;
pub const VERSION_ERROR: u32 = -6i32 as u32;
pub const OUT_OF_MEMORY_ERROR: u32 = -7i32 as u32;

/// Smallest `u32` among the sentinels above, so that `is_error` recognizes
/// every one of them (see the `FIRST_ERROR` open question in DESIGN.md).
pub const FIRST_ERROR: u32 = OUT_OF_MEMORY_ERROR;

/// Failure modes of the codec pipeline, one per stage that can reject input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VbzError {
    /// The underlying entropy coder rejected the input or reported a
    /// decode/encode failure.
    #[error("zstd error")]
    Zstd,

    /// Source length is not a multiple of `integer_size` on encode, or a
    /// sized-frame body is smaller than the 4-byte header on decode.
    #[error("input size error")]
    InputSize,

    /// `integer_size` is not one of {0, 1, 2, 4}.
    #[error("integer size error")]
    IntegerSize,

    /// Destination capacity is smaller than the guaranteed worst case or
    /// the known exact output size.
    #[error("destination size error")]
    DestinationSize,

    /// Decoded byte length did not match the supplied compressed byte
    /// count: truncated or corrupted keys/data.
    #[error("streamvbyte stream error")]
    StreamVByteStream,

    /// `vbz_version` is not one of {0, 1}.
    #[error("version error")]
    Version,

    /// An intermediate allocation failed.
    #[error("out of memory error")]
    OutOfMemory,
}

impl VbzError {
    /// The sentinel `u32` this error maps to in the public API.
    pub fn code(self) -> u32 {
        match self {
            VbzError::Zstd => ZSTD_ERROR,
            VbzError::InputSize => INPUT_SIZE_ERROR,
            VbzError::IntegerSize => INTEGER_SIZE_ERROR,
            VbzError::DestinationSize => DESTINATION_SIZE_ERROR,
            VbzError::StreamVByteStream => STREAMVBYTE_STREAM_ERROR,
            VbzError::Version => VERSION_ERROR,
            VbzError::OutOfMemory => OUT_OF_MEMORY_ERROR,
        }
    }

    /// Stable human-readable token for a known error code, mirroring
    /// `vbz_error_string`.
    pub fn string_for_code(code: u32) -> &'static str {
        match code {
            ZSTD_ERROR => "VBZ_ZSTD_ERROR",
            INPUT_SIZE_ERROR => "VBZ_STREAMVBYTE_INPUT_SIZE_ERROR",
            INTEGER_SIZE_ERROR => "VBZ_STREAMVBYTE_INTEGER_SIZE_ERROR",
            DESTINATION_SIZE_ERROR => "VBZ_STREAMVBYTE_DESTINATION_SIZE_ERROR",
            STREAMVBYTE_STREAM_ERROR => "VBZ_STREAMVBYTE_STREAM_ERROR",
            VERSION_ERROR => "VBZ_VERSION_ERROR",
            OUT_OF_MEMORY_ERROR => "VBZ_OUT_OF_MEMORY_ERROR",
            _ => "VBZ_UNKNOWN_ERROR",
        }
    }
}

impl From<std::io::Error> for VbzError {
    fn from(err: std::io::Error) -> Self {
        log::warn!("zstd reported an error: {err}");
        VbzError::Zstd
    }
}

/// `is_error(x) <=> x >= FIRST_ERROR`, treating `x` as an unsigned value so
/// that every sentinel (including `OUT_OF_MEMORY_ERROR`) is recognized.
pub fn is_error(result: u32) -> bool {
    result >= FIRST_ERROR
}

/// Stable human-readable token for an error code, or `"VBZ_UNKNOWN_ERROR"`.
pub fn error_string(code: u32) -> &'static str {
    VbzError::string_for_code(code)
}
