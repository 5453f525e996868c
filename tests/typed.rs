//! Typed pixel views over decoded buffers.

#![cfg(feature = "rgb")]

mod common;

use bmpread::{BmpError, DecodeFlags, PixelLayout, decode_reader};
use common::{BmpFixture, tagged_bgr_rows};
use rgb::{RGB8, RGBA8};

fn three_by_two(flags: DecodeFlags) -> bmpread::Image {
    let fixture = BmpFixture::new(3, 2, 24).rows(tagged_bgr_rows(3, 2));
    decode_reader(fixture.reader(), flags | DecodeFlags::ANY_SIZE).unwrap()
}

#[test]
fn packed_rgb_as_pixels() {
    let img = three_by_two(DecodeFlags::BYTE_ALIGN);
    let px: &[RGB8] = img.as_pixels().unwrap();
    assert_eq!(px.len(), 6);
    assert_eq!(px[0], RGB8::new(0x55, 0, 0));
    assert_eq!(px[5], RGB8::new(0x55, 2, 1));
}

#[test]
fn padded_rows_refuse_flat_view() {
    let img = three_by_two(DecodeFlags::empty());
    assert_eq!(img.stride, 12);
    assert!(matches!(
        img.as_pixels::<RGB8>(),
        Err(BmpError::PaddedRows {
            stride: 12,
            bytes_per_pixel: 3
        })
    ));
}

#[test]
fn wrong_pixel_type_is_a_layout_mismatch() {
    let img = three_by_two(DecodeFlags::BYTE_ALIGN);
    assert!(matches!(
        img.as_pixels::<RGBA8>(),
        Err(BmpError::LayoutMismatch {
            expected: PixelLayout::Rgba8,
            actual: PixelLayout::Rgb8,
        })
    ));
}

#[test]
fn rgba_as_pixels_is_never_padded() {
    let img = three_by_two(DecodeFlags::ALPHA);
    assert!(!img.is_padded());
    let px: &[RGBA8] = img.as_pixels().unwrap();
    assert!(px.iter().all(|p| p.a == 255));
}

#[cfg(feature = "imgref")]
mod imgref_views {
    use super::*;

    #[test]
    fn padded_rgb_to_imgvec_drops_padding() {
        let img = three_by_two(DecodeFlags::empty());
        let v = img.to_imgvec::<RGB8>().unwrap();
        assert_eq!((v.width(), v.height()), (3, 2));
        assert_eq!(v.buf().len(), 6);
        assert_eq!(v[(2usize, 1usize)], RGB8::new(0x55, 2, 1));
    }

    #[test]
    fn rgba_imgref_borrows_buffer() {
        let img = three_by_two(DecodeFlags::ALPHA);
        let r = img.as_imgref::<RGBA8>().unwrap();
        assert_eq!((r.width(), r.height(), r.stride()), (3, 2, 3));
        assert_eq!(r[(1usize, 0usize)], RGBA8::new(0x55, 1, 0, 255));
    }

    #[test]
    fn padded_rgb_imgref_needs_whole_pixel_stride() {
        // 3 px * 3 bytes padded to 12: not a multiple of 3.
        let img = three_by_two(DecodeFlags::empty());
        assert!(matches!(
            img.as_imgref::<RGB8>(),
            Err(BmpError::PaddedRows { .. })
        ));

        // 4 px * 3 bytes = 12: no padding needed.
        let fixture = BmpFixture::new(4, 2, 24).rows(tagged_bgr_rows(4, 2));
        let img = decode_reader(fixture.reader(), DecodeFlags::empty()).unwrap();
        let r = img.as_imgref::<RGB8>().unwrap();
        assert_eq!(r.stride(), 4);
    }
}
