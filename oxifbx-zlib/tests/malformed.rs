//! Damaged and hostile streams.

use flate2::Compression;
use flate2::write::ZlibEncoder;
use oxifbx_core::ErrorKind;
use oxifbx_zlib::{InflateConfig, ZlibHeader, zlib_inflate, zlib_inflate_with};
use std::io::Write;

fn zlib(data: &[u8], level: u32) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn sample() -> Vec<u8> {
    (0..20_000u32)
        .flat_map(|i| ((i * 7 % 1013) as f32 * 0.5).to_le_bytes())
        .collect()
}

#[test]
fn test_header_examples() {
    assert!(ZlibHeader::parse(&[0x78, 0x9C]).is_ok());
    let err = ZlibHeader::parse(&[0x08, 0x00]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Corrupt);
}

#[test]
fn test_truncated_streams() {
    let input = sample();
    let compressed = zlib(&input, 6);

    // Cutting into the deflate data (before the trailer) always fails.
    for cut in [3, 10, compressed.len() / 2, compressed.len() - 6] {
        let err = zlib_inflate(&compressed[..cut]).unwrap_err();
        assert!(
            matches!(err.kind(), ErrorKind::OutOfData | ErrorKind::Corrupt),
            "cut at {}: {}",
            cut,
            err
        );
    }
}

#[test]
fn test_bit_flips_never_yield_wrong_data() {
    let input = sample();
    let compressed = zlib(&input, 9);

    for pos in (2..compressed.len()).step_by(compressed.len() / 64 + 1) {
        for bit in [0, 3, 7] {
            let mut damaged = compressed.clone();
            damaged[pos] ^= 1 << bit;

            if let Ok(output) = zlib_inflate_with(&damaged, &InflateConfig::STRICT) {
                assert_eq!(output, input, "flip at byte {} bit {}", pos, bit);
            }
        }
    }
}

#[test]
fn test_decompression_bomb_capped() {
    let input = vec![0u8; 4 << 20];
    let compressed = zlib(&input, 9);
    assert!(compressed.len() < 64 << 10);

    let config = InflateConfig::DEFAULT.with_max_output(1 << 20);
    let err = zlib_inflate_with(&compressed, &config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LimitExceeded);
}

#[test]
fn test_garbage_after_header() {
    let stream = [0x78, 0x9C, 0xFF, 0xFF, 0xFF, 0xFF];
    assert!(zlib_inflate(&stream).is_err());
}
