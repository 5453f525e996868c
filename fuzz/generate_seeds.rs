#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: i32, height: i32, bits: u16, compression: u32, extra: &[u8], pixels: &[u8]) -> Vec<u8> {
    let data_offset = 54 + extra.len() as u32;
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(data_offset + pixels.len() as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&data_offset.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes()); // info header size
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&bits.to_le_bytes());
    out.extend_from_slice(&compression.to_le_bytes());
    out.extend_from_slice(&[0u8; 20]);
    out.extend_from_slice(extra);
    out.extend_from_slice(pixels);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 24-bit 1x1, bottom-up and top-down
    fs::write(format!("{dir}/bgr24_1x1.bmp"), bmp(1, 1, 24, 0, &[], &[0xff, 0, 0, 0])).unwrap();
    fs::write(format!("{dir}/bgr24_top_down.bmp"), bmp(2, -2, 24, 0, &[], &[7; 16])).unwrap();

    // 1-bit 8x1 with a two-entry palette
    let mono_palette = [0, 0, 0, 0, 255, 255, 255, 0];
    fs::write(format!("{dir}/mono_8x1.bmp"), bmp(8, 1, 1, 0, &mono_palette, &[0xa5, 0, 0, 0])).unwrap();

    // 4-bit 2x2 with a 16-entry palette
    let nibble_palette: Vec<u8> = (0..16u8).flat_map(|i| [i * 16, i, 255 - i, 0]).collect();
    fs::write(format!("{dir}/nibble_2x2.bmp"), bmp(2, 2, 4, 0, &nibble_palette, &[0x12, 0, 0, 0, 0x34, 0, 0, 0])).unwrap();

    // 8-bit 2x2 with a 256-entry palette
    let byte_palette: Vec<u8> = (0..=255u8).flat_map(|i| [i, i, i, 0]).collect();
    fs::write(format!("{dir}/indexed_2x2.bmp"), bmp(2, 2, 8, 0, &byte_palette, &[1, 2, 0, 0, 3, 4, 0, 0])).unwrap();

    // 16-bit 565 bit-fields
    let masks_565: Vec<u8> = [0xf800u32, 0x07e0, 0x001f].iter().flat_map(|m| m.to_le_bytes()).collect();
    fs::write(format!("{dir}/rgb565_2x1.bmp"), bmp(2, 1, 16, 3, &masks_565, &[0x00, 0xf8, 0x1f, 0x00])).unwrap();

    // 32-bit bit-fields
    let masks_888: Vec<u8> = [0x00ff_0000u32, 0x0000_ff00, 0x0000_00ff].iter().flat_map(|m| m.to_le_bytes()).collect();
    fs::write(format!("{dir}/xrgb32_1x1.bmp"), bmp(1, 1, 32, 3, &masks_888, &[1, 2, 3, 4])).unwrap();

    // RLE8 header (rejected)
    fs::write(format!("{dir}/rle8.bmp"), bmp(2, 2, 8, 1, &byte_palette, &[0; 8])).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/bgr24_no_pixels.bmp"), bmp(4, 4, 24, 0, &[], &[])).unwrap();
    fs::write(format!("{dir}/min_height.bmp"), bmp(1, i32::MIN, 24, 0, &[], &[0; 4])).unwrap();

    println!("Generated seed corpus in {dir}/");
}
