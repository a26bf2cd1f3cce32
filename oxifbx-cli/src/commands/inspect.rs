//! Inspect command implementation.

use crate::utils::{format_size, read_input, saved_percent};
use oxifbx_core::BitReader;
use oxifbx_zlib::{BlockRecord, Inflater, TrailerStatus, ZlibDecoder, ZlibHeader};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// JSON serializable zlib header.
#[derive(Debug, Serialize, Deserialize)]
struct HeaderJson {
    cmf: u8,
    flg: u8,
    window_size: usize,
    level: String,
}

impl HeaderJson {
    fn from_header(header: &ZlibHeader) -> Self {
        Self {
            cmf: header.cmf,
            flg: header.flg,
            window_size: header.window_size(),
            level: header.level().as_str().to_string(),
        }
    }
}

/// JSON serializable block record.
#[derive(Debug, Serialize, Deserialize)]
struct BlockJson {
    kind: String,
    is_final: bool,
    output_start: usize,
    output_len: usize,
    input_bits: u64,
}

impl BlockJson {
    fn from_record(record: &BlockRecord) -> Self {
        Self {
            kind: record.kind.as_str().to_string(),
            is_final: record.is_final,
            output_start: record.output_start,
            output_len: record.output_len,
            input_bits: record.input_bit_end - record.input_bit_start,
        }
    }
}

/// JSON output for stream inspection.
#[derive(Debug, Serialize, Deserialize)]
struct StreamJson {
    input: String,
    format: String,
    input_len: usize,
    output_len: usize,
    consumed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<HeaderJson>,
    blocks: Vec<BlockJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trailer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    adler32: Option<u32>,
}

/// What one stream decode saw, independent of framing.
struct Inspection {
    header: Option<ZlibHeader>,
    blocks: Vec<BlockRecord>,
    trailer: Option<TrailerStatus>,
    output_len: usize,
    consumed: usize,
}

fn inspect_zlib(data: &[u8]) -> Result<Inspection, Box<dyn std::error::Error>> {
    let inflated = ZlibDecoder::default().decode(data)?;
    let report = inflated.report;

    Ok(Inspection {
        header: Some(report.header),
        blocks: report.blocks,
        trailer: Some(report.trailer),
        output_len: inflated.data.len(),
        consumed: report.consumed,
    })
}

fn inspect_raw(data: &[u8]) -> Result<Inspection, Box<dyn std::error::Error>> {
    let mut reader = BitReader::new(data);
    let mut inflater = Inflater::new();
    inflater.inflate(&mut reader)?;
    reader.align_to_byte();

    let (output, blocks) = inflater.into_parts();
    Ok(Inspection {
        header: None,
        blocks,
        trailer: None,
        output_len: output.len(),
        consumed: reader.byte_position(),
    })
}

pub fn cmd_inspect(input: &Path, raw: bool, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_input(input)?;
    let inspection = if raw {
        inspect_raw(&data)?
    } else {
        inspect_zlib(&data)?
    };

    if json {
        let out = StreamJson {
            input: input.display().to_string(),
            format: if raw { "deflate" } else { "zlib" }.to_string(),
            input_len: data.len(),
            output_len: inspection.output_len,
            consumed: inspection.consumed,
            header: inspection.header.as_ref().map(HeaderJson::from_header),
            blocks: inspection.blocks.iter().map(BlockJson::from_record).collect(),
            trailer: inspection.trailer.map(|t| t.as_str().to_string()),
            adler32: match inspection.trailer {
                Some(TrailerStatus::Verified(sum)) => Some(sum),
                _ => None,
            },
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Stream: {} ({})", input.display(), if raw { "deflate" } else { "zlib" });
    println!();

    if let Some(header) = &inspection.header {
        println!("Header:");
        println!("  CMF/FLG: {:#04x} {:#04x}", header.cmf, header.flg);
        println!("  Window: {}", format_size(header.window_size()));
        println!("  Level: {}", header.level().as_str());
        println!();
    }

    println!("Blocks:");
    println!(
        "  {:>4}  {:<8}  {:>5}  {:>10}  {:>10}",
        "#", "Kind", "Final", "Offset", "Bytes"
    );
    for (i, block) in inspection.blocks.iter().enumerate() {
        println!(
            "  {:>4}  {:<8}  {:>5}  {:>10}  {:>10}",
            i,
            block.kind.as_str(),
            if block.is_final { "yes" } else { "" },
            block.output_start,
            block.output_len
        );
    }
    println!();

    if let Some(trailer) = inspection.trailer {
        match trailer {
            TrailerStatus::Verified(sum) => println!("Trailer: verified ({:08x})", sum),
            other => println!("Trailer: {}", other.as_str()),
        }
    }

    println!(
        "Size: {} -> {} ({:.1}% saved)",
        format_size(inspection.consumed),
        format_size(inspection.output_len),
        saved_percent(inspection.consumed, inspection.output_len)
    );
    if inspection.consumed < data.len() {
        println!("Trailing bytes: {}", data.len() - inspection.consumed);
    }

    Ok(())
}
