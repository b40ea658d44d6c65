//! Contains the pixel type used by images.
use bytemuck::{Pod, Zeroable};

/// Count of components (channels) in one pixel.
pub const COMPONENTS: usize = 3;

/// RGB pixel with 8-bit components.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct U8x3(pub [u8; COMPONENTS]);

impl U8x3 {
    #[inline(always)]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Pixel with the same value in all components.
    #[inline(always)]
    pub const fn splat(v: u8) -> Self {
        Self([v; COMPONENTS])
    }

    #[inline(always)]
    pub fn r(&self) -> u8 {
        self.0[0]
    }

    #[inline(always)]
    pub fn g(&self) -> u8 {
        self.0[1]
    }

    #[inline(always)]
    pub fn b(&self) -> u8 {
        self.0[2]
    }
}

impl From<[u8; COMPONENTS]> for U8x3 {
    fn from(components: [u8; COMPONENTS]) -> Self {
        Self(components)
    }
}
