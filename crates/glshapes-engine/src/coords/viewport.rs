use winit::dpi::PhysicalSize;

/// GL viewport rectangle in physical framebuffer pixels.
///
/// GL places the origin at the bottom-left corner of the framebuffer.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Covers the whole framebuffer, origin at `(0, 0)`.
    ///
    /// `size` must be the framebuffer size, not the window size; the two differ
    /// on scaled displays.
    #[inline]
    pub fn full(size: PhysicalSize<u32>) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Extent as the signed integers GL expects, saturating at `i32::MAX`.
    #[inline]
    pub fn gl_extent(self) -> (i32, i32) {
        let w = i32::try_from(self.width).unwrap_or(i32::MAX);
        let h = i32::try_from(self.height).unwrap_or(i32::MAX);
        (w, h)
    }
}
