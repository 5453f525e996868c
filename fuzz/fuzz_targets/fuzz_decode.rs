#![no_main]
use libfuzzer_sys::fuzz_target;

use bmpread::{DecodeFlags, DecodeRequest, ImageInfo, Limits};

fuzz_target!(|data: &[u8]| {
    // Header-only read must never panic
    let _ = ImageInfo::from_reader(std::io::Cursor::new(data));

    // Cap buffers so huge declared sizes fail fast instead of zero-filling
    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Limits::default()
    };
    for bits in 0..16 {
        let flags = DecodeFlags::from_bits_truncate(bits);
        let _ = DecodeRequest::new(flags)
            .with_limits(&limits)
            .decode(std::io::Cursor::new(data));
    }
});
