// Color tables - palette index to packed host pixel
//
// A color table resolves every possible source byte (0-255) to a pixel
// value already packed in the destination format, so the scanline
// kernels never do more than one array load per source pixel.
//
// Tables are built from 0xRRGGBB palettes and a `PixelFormat`.

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Number of entries in a color table (one per possible source byte)
pub const TABLE_SIZE: usize = 256;

/// C64 VIC-II palette (16 colors, 0xRRGGBB)
pub const C64_PALETTE: [u32; 16] = [
    0x000000, 0xFFFFFF, 0x68372B, 0x70A4B2, 0x6F3D86, 0x588D43, 0x352879, 0xB8C76F,
    0x6F4F25, 0x433900, 0x9A6759, 0x444444, 0x6C6C6C, 0x9AD284, 0x6C5EB5, 0x959595,
];

/// Names accepted by [`builtin`]
pub const BUILTIN_PALETTES: [&str; 2] = ["c64", "grayscale"];

/// Errors raised while building a color table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// No built-in palette with that name
    UnknownPalette(String),

    /// More entries than a table can hold
    TooManyEntries(usize),
}

impl std::fmt::Display for PaletteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaletteError::UnknownPalette(name) => write!(
                f,
                "Unknown palette: {} (available: {})",
                name,
                BUILTIN_PALETTES.join(", ")
            ),
            PaletteError::TooManyEntries(n) => {
                write!(f, "Palette has {} entries, at most {} allowed", n, TABLE_SIZE)
            }
        }
    }
}

impl std::error::Error for PaletteError {}

/// Layout of a packed 32-bit destination pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    /// 0xRRGGBBAA
    #[default]
    Rgba8888,
    /// 0xAARRGGBB
    Argb8888,
    /// 0xBBGGRRAA
    Bgra8888,
}

impl PixelFormat {
    /// Pack an opaque color
    #[inline]
    pub fn pack(self, r: u8, g: u8, b: u8) -> u32 {
        let (r, g, b) = (r as u32, g as u32, b as u32);
        match self {
            PixelFormat::Rgba8888 => (r << 24) | (g << 16) | (b << 8) | 0xFF,
            PixelFormat::Argb8888 => 0xFF00_0000 | (r << 16) | (g << 8) | b,
            PixelFormat::Bgra8888 => (b << 24) | (g << 16) | (r << 8) | 0xFF,
        }
    }

    /// Pack a 0xRRGGBB color
    #[inline]
    pub fn pack_rgb(self, rgb: u32) -> u32 {
        self.pack((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Split a packed pixel into [R, G, B, A] bytes
    #[inline]
    pub fn unpack(self, pixel: u32) -> [u8; 4] {
        let [b0, b1, b2, b3] = pixel.to_be_bytes();
        match self {
            PixelFormat::Rgba8888 => [b0, b1, b2, b3],
            PixelFormat::Argb8888 => [b1, b2, b3, b0],
            PixelFormat::Bgra8888 => [b2, b1, b0, b3],
        }
    }
}

/// Fully resolved palette: source byte -> packed destination pixel
///
/// Shared read-only by every scanline of a frame. Replace it only
/// between frames (see `FrameRenderer::set_palette`).
#[derive(Clone, PartialEq, Eq)]
pub struct ColorTable {
    entries: [u32; TABLE_SIZE],
}

impl ColorTable {
    /// Create a table with every entry set to `fill`
    pub fn new(fill: u32) -> Self {
        Self {
            entries: [fill; TABLE_SIZE],
        }
    }

    /// Table in which every index resolves to `color`
    ///
    /// Rendering through it is pixel-identical to the solid-line path.
    pub fn uniform(color: u32) -> Self {
        Self::new(color)
    }

    /// Build from already packed entries; missing entries are zero
    pub fn from_entries(entries: &[u32]) -> Result<Self, PaletteError> {
        if entries.len() > TABLE_SIZE {
            return Err(PaletteError::TooManyEntries(entries.len()));
        }

        let mut table = Self::new(0);
        table.entries[..entries.len()].copy_from_slice(entries);
        Ok(table)
    }

    /// Build from a 0xRRGGBB palette; missing entries resolve to black
    ///
    /// # Example
    ///
    /// ```
    /// use scanline_rs::palette::{ColorTable, PixelFormat};
    ///
    /// let table = ColorTable::from_rgb(&[0xFF0000], PixelFormat::Rgba8888).unwrap();
    /// assert_eq!(table[0], 0xFF0000FF);
    /// assert_eq!(table[1], 0x000000FF);
    /// ```
    pub fn from_rgb(palette: &[u32], format: PixelFormat) -> Result<Self, PaletteError> {
        if palette.len() > TABLE_SIZE {
            return Err(PaletteError::TooManyEntries(palette.len()));
        }

        let mut table = Self::new(format.pack(0, 0, 0));
        for (entry, &rgb) in table.entries.iter_mut().zip(palette) {
            *entry = format.pack_rgb(rgb);
        }
        Ok(table)
    }

    /// Resolved pixel for a palette index
    #[inline]
    pub fn get(&self, index: u8) -> u32 {
        self.entries[index as usize]
    }

    /// Replace a single entry
    pub fn set(&mut self, index: u8, color: u32) {
        self.entries[index as usize] = color;
    }

    /// All 256 entries
    #[inline]
    pub fn entries(&self) -> &[u32; TABLE_SIZE] {
        &self.entries
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.entries
    }
}

impl Index<u8> for ColorTable {
    type Output = u32;

    #[inline]
    fn index(&self, index: u8) -> &u32 {
        &self.entries[index as usize]
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::new(0)
    }
}

impl std::fmt::Debug for ColorTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorTable")
            .field("first", &format_args!("{:08X}", self.entries[0]))
            .field("last", &format_args!("{:08X}", self.entries[TABLE_SIZE - 1]))
            .finish()
    }
}

/// Build one of the named palettes in the given format
///
/// The C64 palette repeats every 16 entries, matching the VIC-II which
/// only decodes the low nibble of a color register.
pub fn builtin(name: &str, format: PixelFormat) -> Result<ColorTable, PaletteError> {
    match name.to_ascii_lowercase().as_str() {
        "c64" => {
            let mut table = ColorTable::new(0);
            for (i, entry) in table.entries.iter_mut().enumerate() {
                *entry = format.pack_rgb(C64_PALETTE[i & 0x0F]);
            }
            Ok(table)
        }
        "grayscale" => {
            let mut table = ColorTable::new(0);
            for (i, entry) in table.entries.iter_mut().enumerate() {
                let level = i as u8;
                *entry = format.pack(level, level, level);
            }
            Ok(table)
        }
        _ => Err(PaletteError::UnknownPalette(name.to_string())),
    }
}
