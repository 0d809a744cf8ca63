// Scanline compositor library
// Converts indexed-color raster lines into packed 32-bit host pixels

// Public modules
pub mod config;
pub mod frame;
pub mod framebuffer;
pub mod palette;
pub mod render;
pub mod screenshot;

// Re-export main types for convenience
pub use config::{ConfigError, RenderConfig, Viewport};
pub use frame::{FrameRenderer, FrameStats};
pub use framebuffer::{IndexedFrame, PixelBuffer};
pub use palette::{ColorTable, PaletteError, PixelFormat};
pub use render::{
    render_solid_line, render_solid_line_2x, render_source_line, render_source_line_2x, EdgeClip,
    LineRenderer, Scale, Window,
};
pub use screenshot::{save_png, save_screenshot, ScreenshotError};
