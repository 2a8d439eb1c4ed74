pub mod error;
pub mod pixel;
pub mod grid;
pub mod layout;
pub mod encode;
pub mod decode;
#[cfg(feature = "serde")]
pub mod config;

pub use decode::{decode, decode_string, decode_string_lossy, decode_with, Decoder, SentinelMode};
pub use encode::{encode, encode_code_points, Encoder};
pub use error::{DecodeError, EncodeError, ErrorKind, GridError};
pub use grid::PixelGrid;
pub use layout::Dimensions;
pub use pixel::Pixel;
