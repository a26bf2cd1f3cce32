//! Inflate command implementation.

use crate::utils::{format_size, read_input, write_output};
use clap::ValueEnum;
use oxifbx_zlib::{ChecksumMode, InflateConfig, inflate_with, zlib_inflate_with};
use std::path::Path;

/// Adler-32 trailer handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChecksumArg {
    /// Never read the trailer
    Ignore,
    /// Check the trailer when present
    Verify,
    /// Require a matching trailer
    Require,
}

impl From<ChecksumArg> for ChecksumMode {
    fn from(arg: ChecksumArg) -> Self {
        match arg {
            ChecksumArg::Ignore => ChecksumMode::Ignore,
            ChecksumArg::Verify => ChecksumMode::VerifyIfPresent,
            ChecksumArg::Require => ChecksumMode::Require,
        }
    }
}

pub fn cmd_inflate(
    input: &Path,
    output: Option<&Path>,
    raw: bool,
    checksum: ChecksumArg,
    max_output: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_input(input)?;

    let mut config = InflateConfig::new().with_checksum(checksum.into());
    if let Some(limit) = max_output {
        config = config.with_max_output(limit);
    }

    let decompressed = if raw {
        inflate_with(&data, &config)?
    } else {
        zlib_inflate_with(&data, &config)?
    };

    write_output(output, &decompressed)?;

    if let Some(path) = output {
        println!(
            "{} -> {} ({} -> {})",
            input.display(),
            path.display(),
            format_size(data.len()),
            format_size(decompressed.len())
        );
    }

    Ok(())
}
