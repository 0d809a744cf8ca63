// Screenshot functionality
//
// Saves the visible area of a rendered pixel buffer as a PNG file.

use crate::framebuffer::PixelBuffer;
use crate::palette::PixelFormat;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Errors that can occur during screenshot operations
#[derive(Debug)]
pub enum ScreenshotError {
    /// I/O error
    Io(io::Error),

    /// PNG encoding error
    PngEncoding(png::EncodingError),
}

impl std::fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenshotError::Io(e) => write!(f, "I/O error: {}", e),
            ScreenshotError::PngEncoding(e) => write!(f, "PNG encoding error: {}", e),
        }
    }
}

impl std::error::Error for ScreenshotError {}

impl From<io::Error> for ScreenshotError {
    fn from(e: io::Error) -> Self {
        ScreenshotError::Io(e)
    }
}

impl From<png::EncodingError> for ScreenshotError {
    fn from(e: png::EncodingError) -> Self {
        ScreenshotError::PngEncoding(e)
    }
}

/// Save a timestamped screenshot into `directory`
///
/// The directory is created if needed; the file is named
/// `screenshot_<YYYYmmdd_HHMMSS>.png`.
///
/// # Returns
///
/// Result containing the path to the saved screenshot or an error
pub fn save_screenshot<P: AsRef<Path>>(
    buffer: &PixelBuffer,
    format: PixelFormat,
    directory: P,
) -> Result<PathBuf, ScreenshotError> {
    let directory = directory.as_ref();
    fs::create_dir_all(directory)?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let file_path = directory.join(format!("screenshot_{}.png", timestamp));

    save_png(buffer, format, &file_path)?;
    info!("Saved screenshot to {}", file_path.display());

    Ok(file_path)
}

/// Save the visible area of `buffer` as an RGBA PNG at `path`
pub fn save_png<P: AsRef<Path>>(
    buffer: &PixelBuffer,
    format: PixelFormat,
    path: P,
) -> Result<(), ScreenshotError> {
    let mut rgba = vec![0u8; buffer.width() * buffer.height() * 4];
    buffer.to_rgba(format, &mut rgba);

    let file = fs::File::create(path)?;
    let w = io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, buffer.width() as u32, buffer.height() as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&rgba)?;

    Ok(())
}
