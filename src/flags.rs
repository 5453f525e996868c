use bitflags::bitflags;

bitflags! {
    /// Options controlling the shape of the decoded buffer.
    ///
    /// The empty set is the behaviour graphics APIs expect from a texture
    /// loader: bottom-up rows, each padded to 4 bytes, RGB output, and width
    /// and height restricted to powers of two.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DecodeFlags: u32 {
        /// Emit the top scan line first (the default is bottom line first).
        const TOP_DOWN   = 1 << 0;
        /// Pack output rows with no alignment padding.
        const BYTE_ALIGN = 1 << 1;
        /// Allow any width and height, not just powers of two.
        const ANY_SIZE   = 1 << 2;
        /// Emit RGBA instead of RGB. Formats without an alpha source get 255.
        const ALPHA      = 1 << 3;
    }
}
