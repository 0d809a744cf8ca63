// Frame renderer - drives the scanline compositor over a whole frame
//
// For every visible source line the renderer picks one of the four
// kernels (solid when the windowed line is a single palette index and
// detection is on, table lookup otherwise) and renders it into its own
// destination row. Rows never overlap, so lines can be handed to
// worker threads freely; the color table is shared read-only.
//
// Palette changes are staged and only applied when the next frame
// starts, never while one is being rendered.

use crate::config::{RenderConfig, Viewport};
use crate::framebuffer::{IndexedFrame, PixelBuffer};
use crate::palette::{self, ColorTable, PaletteError};
use crate::render::{uniform_color, EdgeClip, LineRenderer, Scale, Window};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, trace, warn};

/// Counters for one rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Source lines rendered
    pub lines: usize,
    /// Lines that took the solid-color path
    pub solid_lines: usize,
    /// Destination pixels written
    pub pixels: usize,
}

/// Where scanlines are rendered
#[derive(Debug)]
enum Workers {
    /// On the calling thread
    Inline,
    /// On rayon's global pool
    Global,
    /// On a dedicated pool
    Pool(ThreadPool),
}

/// Everything needed to render one line, shared by all lines of a frame
#[derive(Clone, Copy)]
struct LineJob<'a> {
    colortab: &'a ColorTable,
    scale: Scale,
    clip: EdgeClip,
    window: Window,
    solid_detection: bool,
    double_scan: bool,
    pitch: usize,
    width: usize,
}

impl LineJob<'_> {
    /// Render `src` into `rows` (one row, two with double scan)
    ///
    /// Returns whether the solid path was taken.
    #[inline]
    fn render(&self, src: &[u8], rows: &mut [u32]) -> bool {
        let uniform = if self.solid_detection {
            uniform_color(src, self.window)
        } else {
            None
        };

        let renderer = LineRenderer::select(self.colortab, self.scale, self.clip, uniform);
        renderer.render(rows, src, self.window);

        if self.double_scan {
            let (first, second) = rows.split_at_mut(self.pitch);
            second[..self.width].copy_from_slice(&first[..self.width]);
        }

        renderer.is_solid()
    }
}

/// Renders indexed frames into packed pixel buffers
#[derive(Debug)]
pub struct FrameRenderer {
    scale: Scale,
    clip: EdgeClip,
    double_scan: bool,
    solid_detection: bool,
    viewport: Viewport,

    /// Table used for the current frame
    table: ColorTable,

    /// Table to switch to at the start of the next frame
    pending: Option<ColorTable>,

    workers: Workers,
    frame_count: u64,
}

impl FrameRenderer {
    /// Create a renderer with an explicit color table
    ///
    /// # Panics
    /// Panics if the viewport's first pixel or line lies past its last.
    pub fn new(config: &RenderConfig, table: ColorTable) -> Self {
        let viewport = config.viewport;
        assert!(
            viewport.first_x <= viewport.last_x,
            "viewport first_x {} is past last_x {}",
            viewport.first_x,
            viewport.last_x
        );
        assert!(
            viewport.first_line <= viewport.last_line,
            "viewport first_line {} is past last_line {}",
            viewport.first_line,
            viewport.last_line
        );

        let workers = match config.threads {
            0 => Workers::Global,
            1 => Workers::Inline,
            n => match ThreadPoolBuilder::new()
                .num_threads(n)
                .thread_name(|i| format!("scanline-{}", i))
                .build()
            {
                Ok(pool) => Workers::Pool(pool),
                Err(e) => {
                    warn!("Rendering on the calling thread, worker pool failed: {}", e);
                    Workers::Inline
                }
            },
        };
        debug!(?workers, "Created frame renderer");

        Self {
            scale: config.scale,
            clip: config.edge_clip,
            double_scan: config.double_scan,
            solid_detection: config.solid_detection,
            viewport,
            table,
            pending: None,
            workers,
            frame_count: 0,
        }
    }

    /// Create a renderer using the configured built-in palette
    pub fn from_config(config: &RenderConfig) -> Result<Self, PaletteError> {
        let table = palette::builtin(&config.palette, config.pixel_format)?;
        Ok(Self::new(config, table))
    }

    /// Destination size (width, height) one frame needs
    pub fn output_size(&self) -> (usize, usize) {
        let window = self.window();
        let width = match self.scale {
            Scale::X1 => window.output_width(),
            Scale::X2 => window.output_width_2x(self.clip),
        };
        let rows_per_line = if self.double_scan { 2 } else { 1 };
        (width, self.viewport.height() * rows_per_line)
    }

    /// Allocate a destination buffer of [`output_size`](Self::output_size)
    pub fn create_buffer(&self) -> PixelBuffer {
        let (width, height) = self.output_size();
        PixelBuffer::new(width, height)
    }

    /// Table used by the frame being (or last) rendered
    pub fn palette(&self) -> &ColorTable {
        &self.table
    }

    /// Stage a new color table for the next frame
    ///
    /// Staging twice before a frame keeps only the latest table.
    pub fn set_palette(&mut self, table: ColorTable) {
        self.pending = Some(table);
    }

    pub fn has_pending_palette(&self) -> bool {
        self.pending.is_some()
    }

    /// Frames rendered so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn window(&self) -> Window {
        Window::aligned(self.viewport.first_x, self.viewport.last_x + 1)
    }

    /// Render every visible line of `src` into `dst`
    ///
    /// # Panics
    /// Panics if the viewport does not fit `src` or `dst` is smaller
    /// than [`output_size`](Self::output_size).
    pub fn render_frame(&mut self, src: &IndexedFrame, dst: &mut PixelBuffer) -> FrameStats {
        if let Some(table) = self.pending.take() {
            debug!(frame = self.frame_count, "Applying staged palette");
            self.table = table;
        }

        let viewport = self.viewport;
        assert!(
            viewport.last_x < src.width(),
            "viewport last_x {} is past source width {}",
            viewport.last_x,
            src.width()
        );
        assert!(
            viewport.last_line < src.height(),
            "viewport last_line {} is past source height {}",
            viewport.last_line,
            src.height()
        );

        let (width, height) = self.output_size();
        assert!(
            dst.width() >= width && dst.height() >= height,
            "destination {}x{} is smaller than output {}x{}",
            dst.width(),
            dst.height(),
            width,
            height
        );

        let rows_per_line = if self.double_scan { 2 } else { 1 };
        let pitch = dst.pitch();
        let job = LineJob {
            colortab: &self.table,
            scale: self.scale,
            clip: self.clip,
            window: self.window(),
            solid_detection: self.solid_detection,
            double_scan: self.double_scan,
            pitch,
            width,
        };

        let lines = viewport.height();
        let first_line = viewport.first_line;
        let group = pitch * rows_per_line;
        let rows = &mut dst.as_mut_slice()[..lines * group];

        let solid_lines = match &self.workers {
            // Both edges clipped off a one-pixel viewport
            _ if group == 0 => 0,
            Workers::Inline => rows
                .chunks_mut(group)
                .enumerate()
                .map(|(i, rows)| job.render(src.row(first_line + i), rows))
                .filter(|&solid| solid)
                .count(),
            Workers::Global => render_parallel(&job, src, first_line, rows, group),
            Workers::Pool(pool) => {
                pool.install(|| render_parallel(&job, src, first_line, rows, group))
            }
        };

        self.frame_count += 1;
        let stats = FrameStats {
            lines,
            solid_lines,
            pixels: width * height,
        };
        trace!(frame = self.frame_count, ?stats, "Rendered frame");
        stats
    }
}

/// Render line groups on the current rayon pool, returning solid lines
fn render_parallel(
    job: &LineJob<'_>,
    src: &IndexedFrame,
    first_line: usize,
    rows: &mut [u32],
    group: usize,
) -> usize {
    rows.par_chunks_mut(group)
        .enumerate()
        .map(|(i, rows)| job.render(src.row(first_line + i), rows) as usize)
        .sum()
}
