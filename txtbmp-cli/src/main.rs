use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use txtbmp::config::CodecConfig;
use txtbmp::decode::{trim_padding, units_to_string, units_to_string_lossy};
use txtbmp::layout::{self, Dimensions};
use txtbmp::{Decoder, Encoder, SentinelMode};

mod adapter;

/// Hide text in the color channels of a BMP/PNG image, and read it back
#[derive(Parser)]
#[command(name = "txtbmp", version)]
struct Cli {
    /// Suppress progress output on stderr
    #[arg(short, long, global = true)]
    quiet: bool,

    /// TOML config file with [encode] and [decode] sections
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a UTF-8 text file into an image
    Encode {
        /// Input text file
        input: PathBuf,
        /// Output image (.bmp or .png)
        #[arg(short, long, default_value = "out.bmp")]
        output: PathBuf,
        #[command(flatten)]
        dims: DimArgs,
    },
    /// Decode an image back into a UTF-8 text file
    Decode {
        /// Input image
        input: PathBuf,
        /// Output text file
        #[arg(short, long, default_value = "decode.txt")]
        output: PathBuf,
        #[command(flatten)]
        decode: DecodeArgs,
        /// Strip up to two trailing pad spaces
        #[arg(long)]
        trim: bool,
    },
    /// Encode, save, reload and decode a text file in one go
    Roundtrip {
        /// Input text file
        #[arg(default_value = "input.txt")]
        input: PathBuf,
        /// Intermediate image (.bmp or .png)
        #[arg(long, default_value = "out.bmp")]
        image: PathBuf,
        /// Decoded text file
        #[arg(short, long, default_value = "decode.txt")]
        output: PathBuf,
        #[command(flatten)]
        dims: DimArgs,
        #[command(flatten)]
        decode: DecodeArgs,
        /// Strip up to two trailing pad spaces
        #[arg(long)]
        trim: bool,
    },
    /// Print image dimensions, capacity and payload size as JSON
    Info {
        /// Input image
        input: PathBuf,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
        #[command(flatten)]
        decode: DecodeArgs,
    },
}

#[derive(clap::Args)]
struct DimArgs {
    /// Image width in pixels (must be even)
    #[arg(long)]
    width: Option<u32>,
    /// Image height in pixels (requires --width)
    #[arg(long)]
    height: Option<u32>,
}

#[derive(clap::Args)]
struct DecodeArgs {
    /// What an all-black pixel pair terminates
    #[arg(long, value_enum)]
    sentinel: Option<SentinelArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SentinelArg {
    /// Skip the rest of the row
    Row,
    /// Stop decoding
    Text,
}

impl From<SentinelArg> for SentinelMode {
    fn from(arg: SentinelArg) -> Self {
        match arg {
            SentinelArg::Row => SentinelMode::EndOfRow,
            SentinelArg::Text => SentinelMode::EndOfText,
        }
    }
}

#[derive(Serialize)]
struct OutputInfo {
    file: String,
    image_width: u32,
    image_height: u32,
    capacity_chars: u64,
    decoded_chars: usize,
    invalid_chars: usize,
}

/// Progress reporting on stderr.
struct Log {
    quiet: bool,
}

impl Log {
    fn info(&self, msg: impl AsRef<str>) {
        if !self.quiet {
            eprintln!("{}", msg.as_ref());
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<CodecConfig> {
    let Some(path) = path else {
        return Ok(CodecConfig::default());
    };
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    CodecConfig::from_toml(&toml_str).with_context(|| format!("parsing {}", path.display()))
}

/// Command-line flags take precedence over the [encode] section, field by field.
fn build_encoder(config: &CodecConfig, args: &DimArgs) -> Encoder {
    Encoder::new(Dimensions {
        width: args.width.or(config.encode.width),
        height: args.height.or(config.encode.height),
    })
}

fn build_decoder(config: &CodecConfig, args: &DecodeArgs) -> Decoder {
    match args.sentinel {
        Some(arg) => Decoder::new(arg.into()),
        None => config.decoder(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log = Log { quiet: cli.quiet };
    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Command::Encode { input, output, dims } => {
            cmd_encode(&log, &build_encoder(&config, dims), input, output)
        }
        Command::Decode {
            input,
            output,
            decode,
            trim,
        } => cmd_decode(&log, &build_decoder(&config, decode), *trim, input, output),
        Command::Roundtrip {
            input,
            image,
            output,
            dims,
            decode,
            trim,
        } => {
            let encoder = build_encoder(&config, dims);
            let decoder = build_decoder(&config, decode);
            cmd_encode(&log, &encoder, input, image)?;
            cmd_decode(&log, &decoder, *trim, image, output)?;
            report_roundtrip(&log, input, output, *trim)
        }
        Command::Info {
            input,
            pretty,
            decode,
        } => cmd_info(&build_decoder(&config, decode), input, *pretty),
    }
}

fn cmd_encode(log: &Log, encoder: &Encoder, input: &Path, output: &Path) -> Result<()> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let grid = encoder
        .encode(&text)
        .with_context(|| format!("encoding {}", input.display()))?;

    log.info(format!(
        "encoded {} chars from {} into {}x{} pixels",
        text.chars().count(),
        input.display(),
        grid.width(),
        grid.height()
    ));

    adapter::save_grid(grid, output)?;
    log.info(format!("wrote {}", output.display()));
    Ok(())
}

fn cmd_decode(log: &Log, decoder: &Decoder, trim: bool, input: &Path, output: &Path) -> Result<()> {
    let grid = adapter::load_grid(input)?;
    log.info(format!(
        "decoding {} ({}x{})",
        input.display(),
        grid.width(),
        grid.height()
    ));

    let units = decoder.decode(&grid);
    let units = if trim { trim_padding(&units) } else { &units[..] };
    let text = match units_to_string(units) {
        Ok(text) => text,
        Err(e) => {
            log.info(format!("warning: {e}; replacing invalid values with U+FFFD"));
            units_to_string_lossy(units)
        }
    };

    std::fs::write(output, &text).with_context(|| format!("writing {}", output.display()))?;
    log.info(format!("wrote {} chars to {}", units.len(), output.display()));
    Ok(())
}

fn report_roundtrip(log: &Log, input: &Path, output: &Path, trimmed: bool) -> Result<()> {
    let original = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let decoded = std::fs::read_to_string(output)
        .with_context(|| format!("reading {}", output.display()))?;

    let mut expected = original.clone();
    for _ in 0..layout::padding_len(original.chars().count()) {
        expected.push(' ');
    }

    if decoded == expected || (trimmed && decoded == original) {
        log.info("roundtrip ok");
        Ok(())
    } else {
        anyhow::bail!(
            "roundtrip mismatch: {} chars in, {} chars out",
            original.chars().count(),
            decoded.chars().count()
        )
    }
}

fn cmd_info(decoder: &Decoder, input: &Path, pretty: bool) -> Result<()> {
    let grid = adapter::load_grid(input)?;
    let units = decoder.decode(&grid);
    let invalid_chars = units
        .iter()
        .filter(|&&u| char::from_u32(u as u32).is_none())
        .count();

    let info = OutputInfo {
        file: input.display().to_string(),
        image_width: grid.width(),
        image_height: grid.height(),
        capacity_chars: layout::capacity_chars(grid.width(), grid.height()),
        decoded_chars: units.len(),
        invalid_chars,
    };

    let json = if pretty {
        serde_json::to_string_pretty(&info)?
    } else {
        serde_json::to_string(&info)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use txtbmp::EncodeError;

    fn config_64x32() -> CodecConfig {
        CodecConfig::from_toml("[encode]\nwidth = 64\nheight = 32\n").unwrap()
    }

    #[test]
    fn height_flag_keeps_config_width() {
        let args = DimArgs { width: None, height: Some(10) };
        let encoder = build_encoder(&config_64x32(), &args);
        assert_eq!(encoder.dimensions, Dimensions::exact(64, 10));
        assert!(encoder.encode("abc").is_ok());
    }

    #[test]
    fn width_flag_keeps_config_height() {
        let args = DimArgs { width: Some(8), height: None };
        let encoder = build_encoder(&config_64x32(), &args);
        assert_eq!(encoder.dimensions, Dimensions::exact(8, 32));
    }

    #[test]
    fn no_flags_use_config() {
        let args = DimArgs { width: None, height: None };
        assert_eq!(build_encoder(&config_64x32(), &args).dimensions, Dimensions::exact(64, 32));
        assert_eq!(
            build_encoder(&CodecConfig::default(), &args).dimensions,
            Dimensions::auto()
        );
    }

    #[test]
    fn height_flag_without_any_width_still_rejected() {
        let args = DimArgs { width: None, height: Some(10) };
        let encoder = build_encoder(&CodecConfig::default(), &args);
        assert_eq!(encoder.encode("abc"), Err(EncodeError::HeightWithoutWidth(10)));
    }

    #[test]
    fn sentinel_flag_overrides_config() {
        let config = CodecConfig::from_toml("[decode]\nsentinel = \"end-of-text\"\n").unwrap();
        assert_eq!(
            build_decoder(&config, &DecodeArgs { sentinel: None }).sentinel,
            SentinelMode::EndOfText
        );
        assert_eq!(
            build_decoder(&config, &DecodeArgs { sentinel: Some(SentinelArg::Row) }).sentinel,
            SentinelMode::EndOfRow
        );
    }
}
