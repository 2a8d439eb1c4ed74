use thiserror::Error;

/// Coarse classification of encoder failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or inconsistent dimension arguments, or empty input.
    Config,
    /// Explicit dimensions too small for the padded text.
    Capacity,
    /// A code point does not fit in 16 bits.
    Range,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("cannot encode empty text")]
    EmptyText,

    #[error("height {0} given without a width")]
    HeightWithoutWidth(u32),

    #[error("width {0} is odd; pixel pairs would straddle rows")]
    OddWidth(u32),

    #[error("width must be non-zero")]
    ZeroWidth,

    #[error("a {width}x{height} grid is too large to allocate")]
    TooLarge { width: u32, height: u32 },

    #[error("grid holds {available} pixels but the text needs {needed}")]
    Capacity { needed: u64, available: u64 },

    #[error("code point U+{code_point:X} at index {index} exceeds U+FFFF")]
    CodePointOutOfRange { index: usize, code_point: u32 },
}

impl EncodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EncodeError::EmptyText
            | EncodeError::HeightWithoutWidth(_)
            | EncodeError::OddWidth(_)
            | EncodeError::ZeroWidth
            | EncodeError::TooLarge { .. } => ErrorKind::Config,
            EncodeError::Capacity { .. } => ErrorKind::Capacity,
            EncodeError::CodePointOutOfRange { .. } => ErrorKind::Range,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("buffer length {actual} does not match {width}x{height} grid (expected {expected})")]
    BufferLength {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("grid dimensions {0}x{1} overflow the address space")]
    TooLarge(u32, u32),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("decoded value 0x{value:04X} at index {index} is not a Unicode scalar value")]
    InvalidCodePoint { index: usize, value: u16 },
}
