use serde::Deserialize;

use crate::decode::{Decoder, SentinelMode};
use crate::encode::Encoder;
use crate::layout::Dimensions;

/// Serde-driven codec configuration matching the TOML format.
///
/// ```toml
/// [encode]
/// width = 64
///
/// [decode]
/// sentinel = "end-of-text"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodecConfig {
    #[serde(default)]
    pub encode: Dimensions,
    #[serde(default)]
    pub decode: DecodeConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecodeConfig {
    #[serde(default)]
    pub sentinel: SentinelMode,
}

impl CodecConfig {
    /// Parse a TOML config string.
    pub fn from_toml(toml_str: &str) -> Result<CodecConfig, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn encoder(&self) -> Encoder {
        Encoder::new(self.encode)
    }

    pub fn decoder(&self) -> Decoder {
        Decoder::new(self.decode.sentinel)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Parse(String),
}
