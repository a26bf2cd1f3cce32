//! Round-trip tests against a reference zlib encoder.

use flate2::Compression;
use flate2::write::{DeflateEncoder, ZlibEncoder};
use oxifbx_zlib::{
    BlockKind, ChecksumMode, InflateConfig, TrailerStatus, ZlibDecoder, raw_inflate,
    zlib_inflate, zlib_inflate_with,
};
use std::io::Write;

fn zlib(data: &[u8], level: u32) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn deflate(data: &[u8], level: u32) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn text_like(size: usize) -> Vec<u8> {
    let text = b"Vertices: *24 { a: 1,1,-1,1,-1,-1,-1,-1,-1,-1,1,-1 } \
                 PolygonVertexIndex: *24 { a: 0,1,2,-4,4,7,6,-6 } ";
    text.iter().copied().cycle().take(size).collect()
}

fn pseudo_random(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut seed: u64 = 0x0123_4567_89AB_CDEF;
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    data
}

/// Little-endian doubles shaped like a vertex buffer.
fn vertex_doubles(count: usize) -> Vec<u8> {
    (0..count)
        .flat_map(|i| ((i % 97) as f64 * 0.125 - 6.0).to_le_bytes())
        .collect()
}

#[test]
fn test_empty_input() {
    for level in [0, 1, 6, 9] {
        let compressed = zlib(b"", level);
        assert_eq!(zlib_inflate(&compressed).unwrap(), b"");
    }
}

#[test]
fn test_single_byte() {
    let compressed = zlib(b"A", 6);
    assert_eq!(zlib_inflate(&compressed).unwrap(), b"A");
}

#[test]
fn test_levels() {
    let inputs = [
        text_like(10_000),
        pseudo_random(10_000),
        vertex_doubles(3_000),
        vec![0u8; 50_000],
    ];

    for input in &inputs {
        for level in [0, 1, 6, 9] {
            let compressed = zlib(input, level);
            let decompressed = zlib_inflate(&compressed).unwrap();
            assert_eq!(&decompressed, input, "level {}", level);
        }
    }
}

#[test]
fn test_stored_blocks_report() {
    // Level 0 emits only stored blocks; 200KB needs several of them.
    let input = pseudo_random(200_000);
    let compressed = zlib(&input, 0);

    let inflated = ZlibDecoder::default().decode(&compressed).unwrap();
    assert_eq!(inflated.data, input);

    let report = inflated.report;
    assert!(report.blocks.len() >= 4);
    assert!(report.blocks.iter().all(|b| b.kind == BlockKind::Stored));
    assert!(report.blocks.last().unwrap().is_final);
    assert!(matches!(report.trailer, TrailerStatus::Verified(_)));
    assert_eq!(report.consumed, compressed.len());

    // Records tile the output in order.
    let mut next = 0;
    for block in &report.blocks {
        assert_eq!(block.output_start, next);
        next += block.output_len;
    }
    assert_eq!(next, input.len());
}

#[test]
fn test_dynamic_blocks_report() {
    let input = text_like(100_000);
    let compressed = zlib(&input, 9);

    let inflated = ZlibDecoder::default().decode(&compressed).unwrap();
    assert_eq!(inflated.data, input);
    assert!(
        inflated
            .report
            .blocks
            .iter()
            .any(|b| b.kind == BlockKind::Dynamic)
    );
    assert!(compressed.len() < input.len() / 10);
}

#[test]
fn test_long_distance_matches() {
    // A random 20KB chunk repeated: matches reach back close to 32KB and
    // span block boundaries.
    let chunk = pseudo_random(20_000);
    let mut input = chunk.clone();
    input.extend_from_slice(&pseudo_random(10_000)[..5_000]);
    input.extend_from_slice(&chunk);
    input.extend_from_slice(&chunk);

    for level in [1, 9] {
        let compressed = zlib(&input, level);
        assert!(compressed.len() < input.len());
        assert_eq!(zlib_inflate(&compressed).unwrap(), input);
    }
}

#[test]
fn test_large_input() {
    let mut input = vertex_doubles(200_000);
    input.extend_from_slice(&pseudo_random(300_000));
    input.extend_from_slice(&text_like(500_000));

    let compressed = zlib(&input, 6);
    let config = InflateConfig::for_expected_len(input.len());
    assert_eq!(zlib_inflate_with(&compressed, &config).unwrap(), input);
}

#[test]
fn test_raw_deflate() {
    let input = text_like(40_000);
    for level in [0, 1, 6, 9] {
        let compressed = deflate(&input, level);
        assert_eq!(raw_inflate(&compressed).unwrap(), input);
    }
}

#[test]
fn test_missing_trailer() {
    let input = text_like(5_000);
    let mut compressed = zlib(&input, 6);
    compressed.truncate(compressed.len() - 4);

    let inflated = ZlibDecoder::default().decode(&compressed).unwrap();
    assert_eq!(inflated.data, input);
    assert_eq!(inflated.report.trailer, TrailerStatus::Absent);

    let strict = InflateConfig::DEFAULT.with_checksum(ChecksumMode::Require);
    assert!(zlib_inflate_with(&compressed, &strict).is_err());
}
