// Configuration management
//
// Renderer settings persisted as TOML: scale, line doubling, solid-line
// detection, worker threads, visible area and palette.

use crate::palette::{self, PixelFormat};
use crate::render::{EdgeClip, Scale};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{info, warn};

/// Default configuration file path
pub const DEFAULT_CONFIG_FILE: &str = "render_config.toml";

/// Width of a PAL frame including borders
pub const PAL_FRAME_WIDTH: usize = 384;

/// Visible lines of a PAL frame including borders
pub const PAL_FRAME_HEIGHT: usize = 272;

/// Upper bound for `threads`
pub const MAX_THREADS: usize = 256;

/// Errors that can occur while loading or saving configuration
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error
    Io(io::Error),

    /// TOML parse error
    Parse(toml::de::Error),

    /// TOML serialization error
    Serialize(toml::ser::Error),

    /// Settings that cannot be rendered
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {}", e),
            ConfigError::Parse(e) => write!(f, "Config parse error: {}", e),
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

/// Visible area of the source frame (inclusive bounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// First visible source pixel of a line
    pub first_x: usize,
    /// Last visible source pixel of a line
    pub last_x: usize,
    /// First visible source line
    pub first_line: usize,
    /// Last visible source line
    pub last_line: usize,
}

impl Viewport {
    /// Viewport covering a whole `width` x `height` frame
    pub fn full(width: usize, height: usize) -> Self {
        Self {
            first_x: 0,
            last_x: width.saturating_sub(1),
            first_line: 0,
            last_line: height.saturating_sub(1),
        }
    }

    /// Visible pixels per line
    pub fn width(&self) -> usize {
        self.last_x + 1 - self.first_x
    }

    /// Visible lines
    pub fn height(&self) -> usize {
        self.last_line + 1 - self.first_line
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.first_x > self.last_x {
            return Err(ConfigError::Invalid(format!(
                "viewport first_x {} is past last_x {}",
                self.first_x, self.last_x
            )));
        }
        if self.first_line > self.last_line {
            return Err(ConfigError::Invalid(format!(
                "viewport first_line {} is past last_line {}",
                self.first_line, self.last_line
            )));
        }
        Ok(())
    }
}

/// Renderer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Horizontal scale ("1x" or "2x")
    pub scale: Scale,

    /// Repeat every rendered line on the row below it
    pub double_scan: bool,

    /// Use the solid-color path for uniform lines
    pub solid_detection: bool,

    /// Worker threads (0 = one per core, 1 = render on the calling thread)
    pub threads: usize,

    /// Packing of destination pixels
    pub pixel_format: PixelFormat,

    /// Built-in palette name
    pub palette: String,

    /// Half-pixel clipping applied at 2x
    pub edge_clip: EdgeClip,

    /// Visible area of the source frame
    pub viewport: Viewport,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            scale: Scale::X2,
            double_scan: true,
            solid_detection: true,
            threads: 0,
            pixel_format: PixelFormat::Rgba8888,
            palette: "c64".to_string(),
            edge_clip: EdgeClip::NONE,
            viewport: Viewport::full(PAL_FRAME_WIDTH, PAL_FRAME_HEIGHT),
        }
    }
}

impl RenderConfig {
    /// Load configuration from file or create default
    ///
    /// A missing file is created with the default configuration. Any
    /// other error returns the default and leaves the file untouched.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use scanline_rs::config::RenderConfig;
    ///
    /// let config = RenderConfig::load_or_default("render_config.toml");
    /// ```
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                info!("Creating default render config at {}", path.display());
                let config = Self::default();
                // Try to save the default config, but don't fail if we can't
                if let Err(e) = config.save(path) {
                    warn!("Could not write default render config: {}", e);
                }
                config
            }
            Err(e) => {
                warn!("Using default render config ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config: RenderConfig = toml::from_str(&contents)?;
        info!("Loaded render config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check settings that the type system does not
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.viewport.validate()?;

        if self.threads > MAX_THREADS {
            return Err(ConfigError::Invalid(format!(
                "threads {} exceeds {}",
                self.threads, MAX_THREADS
            )));
        }

        palette::builtin(&self.palette, self.pixel_format)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(())
    }
}
