// Frame buffers - source and destination pixel storage
//
// `IndexedFrame` is what the video chip model produces: one palette
// index per pixel, rows packed back to back.
//
// `PixelBuffer` is what the presentation layer consumes: packed 32-bit
// pixels with a row pitch that may be wider than the visible width.

use crate::palette::PixelFormat;

/// Indexed-color frame as produced by a video chip model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedFrame {
    width: usize,
    height: usize,
    /// Palette indices, `width * height` bytes
    pixels: Vec<u8>,
}

impl IndexedFrame {
    /// Create a frame filled with palette index 0
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Source scanline `y`
    ///
    /// # Panics
    /// Panics if `y` is out of bounds
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        assert!(y < self.height, "Line {} out of bounds", y);
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// Mutable source scanline `y`
    ///
    /// # Panics
    /// Panics if `y` is out of bounds
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        assert!(y < self.height, "Line {} out of bounds", y);
        &mut self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// Set a pixel at the given coordinates
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, index: u8) {
        assert!(x < self.width, "X coordinate {} out of bounds", x);
        assert!(y < self.height, "Y coordinate {} out of bounds", y);

        self.pixels[y * self.width + x] = index;
    }

    /// Get a pixel at the given coordinates
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.width, "X coordinate {} out of bounds", x);
        assert!(y < self.height, "Y coordinate {} out of bounds", y);

        self.pixels[y * self.width + x]
    }

    /// Fill a rectangle, clipped to the frame
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, index: u8) {
        let x_end = (x + width).min(self.width);
        let y_end = (y + height).min(self.height);
        if x >= x_end {
            return;
        }

        for row in y..y_end {
            self.row_mut(row)[x..x_end].fill(index);
        }
    }

    /// Fill the whole frame with one palette index
    pub fn clear(&mut self, index: u8) {
        self.pixels.fill(index);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.pixels
    }

    /// Draw a C64-style test screen
    ///
    /// Light blue border (14), blue screen area (6) and a band of color
    /// bars through every palette entry 0-15. The border lines stay
    /// uniform so they exercise the solid-line path.
    pub fn test_pattern(&mut self) {
        const BORDER: u8 = 14;
        const SCREEN: u8 = 6;

        self.clear(BORDER);

        let left = self.width / 12;
        let top = self.height / 8;
        let screen_w = self.width.saturating_sub(2 * left);
        let screen_h = self.height.saturating_sub(2 * top);
        self.fill_rect(left, top, screen_w, screen_h, SCREEN);

        let bar_w = (screen_w / 16).max(1);
        let bar_top = top + screen_h / 3;
        for color in 0..16u8 {
            let x = left + color as usize * bar_w;
            self.fill_rect(x, bar_top, bar_w, screen_h / 3, color);
        }
    }
}

/// Packed 32-bit destination surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    /// Pixels per row in memory, at least `width`
    pitch: usize,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Create a zeroed buffer with `pitch == width`
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_pitch(width, height, width)
    }

    /// Create a zeroed buffer with rows `pitch` pixels apart
    ///
    /// # Panics
    /// Panics if `pitch < width`
    pub fn with_pitch(width: usize, height: usize, pitch: usize) -> Self {
        assert!(
            pitch >= width,
            "Pitch {} is narrower than width {}",
            pitch,
            width
        );
        Self {
            width,
            height,
            pitch,
            pixels: vec![0; pitch * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// Visible pixels of row `y`
    ///
    /// # Panics
    /// Panics if `y` is out of bounds
    #[inline]
    pub fn row(&self, y: usize) -> &[u32] {
        assert!(y < self.height, "Row {} out of bounds", y);
        let start = y * self.pitch;
        &self.pixels[start..start + self.width]
    }

    /// Whole row `y` including pitch padding
    ///
    /// # Panics
    /// Panics if `y` is out of bounds
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [u32] {
        assert!(y < self.height, "Row {} out of bounds", y);
        let start = y * self.pitch;
        &mut self.pixels[start..start + self.pitch]
    }

    /// Get a pixel at the given coordinates
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u32 {
        assert!(x < self.width, "X coordinate {} out of bounds", x);
        self.row(y)[x]
    }

    /// Fill the whole buffer, padding included
    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Raw storage, `pitch * height` pixels
    pub fn as_slice(&self) -> &[u32] {
        &self.pixels
    }

    /// Mutable raw storage, `pitch * height` pixels
    pub fn as_mut_slice(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Convert the visible area to RGBA bytes
    ///
    /// # Arguments
    /// * `format` - Packing of the stored pixels
    /// * `output` - Output buffer (at least width * height * 4 bytes)
    ///
    /// # Panics
    /// Panics if output buffer is too small
    pub fn to_rgba(&self, format: PixelFormat, output: &mut [u8]) {
        assert!(
            output.len() >= self.width * self.height * 4,
            "Output buffer too small for RGBA conversion"
        );
        if self.width == 0 {
            return;
        }

        let rows = output.chunks_exact_mut(self.width * 4);
        for (y, out) in rows.take(self.height).enumerate() {
            for (rgba, &pixel) in out.chunks_exact_mut(4).zip(self.row(y)) {
                rgba.copy_from_slice(&format.unpack(pixel));
            }
        }
    }
}
