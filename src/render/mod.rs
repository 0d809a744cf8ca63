// Scanline compositor
//
// Converts one scanline of indexed pixels (one byte per source pixel)
// into packed 32-bit destination pixels. Four kernels cover
// {color table, solid color} x {1x, 2x}:
//
// - `render_source_line`     table lookup, 1x
// - `render_source_line_2x`  table lookup, each pixel doubled
// - `render_solid_line`      single color, 1x
// - `render_solid_line_2x`   single color, doubled
//
// `dst` always starts at the first destination pixel of the line.
// Window and buffer sizes are checked once per call; a bad window is a
// caller bug and panics. The per-pixel loops run on re-sliced views of
// exact length and carry no checks of their own.

pub mod window;

#[cfg(test)]
mod tests;

pub use window::{uniform_color, EdgeClip, Window, BATCH};

use crate::palette::ColorTable;
use serde::{Deserialize, Serialize};

/// Horizontal scale factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Scale {
    #[serde(rename = "1x")]
    X1,
    #[default]
    #[serde(rename = "2x")]
    X2,
}

impl Scale {
    /// Destination pixels per source pixel
    pub fn factor(self) -> usize {
        match self {
            Scale::X1 => 1,
            Scale::X2 => 2,
        }
    }
}

impl std::str::FromStr for Scale {
    type Err = String;

    /// Parse the config spelling ("1x" or "2x")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1x" => Ok(Scale::X1),
            "2x" => Ok(Scale::X2),
            other => Err(format!("Unknown scale: {} (expected 1x or 2x)", other)),
        }
    }
}

/// Destination slice of exactly `len` pixels
#[inline]
fn target(dst: &mut [u32], len: usize) -> &mut [u32] {
    assert!(
        dst.len() >= len,
        "destination holds {} pixels, line needs {}",
        dst.len(),
        len
    );
    &mut dst[..len]
}

/// Render a scanline through a color table at 1x
///
/// Writes `colortab[src[window.start + k]]` to `dst[k]` for every `k` in
/// `0..window.width()`.
///
/// # Panics
/// Panics if the window does not fit `src` or `dst` is too short.
///
/// # Example
///
/// ```
/// use scanline_rs::palette::ColorTable;
/// use scanline_rs::render::{render_source_line, Window};
///
/// let mut colortab = ColorTable::default();
/// colortab.set(5, 0xFF0000FF);
/// colortab.set(9, 0x00FF00FF);
///
/// let mut dst = [0u32; 3];
/// render_source_line(&mut dst, &[5, 5, 9], &colortab, Window::new(0, 3));
/// assert_eq!(dst, [0xFF0000FF, 0xFF0000FF, 0x00FF00FF]);
/// ```
pub fn render_source_line(dst: &mut [u32], src: &[u8], colortab: &ColorTable, window: Window) {
    let src = window.source(src);
    let dst = target(dst, src.len());
    let table = colortab.entries();

    let (src_fast, src_rest) = src.split_at(window.batched());
    let (dst_fast, dst_rest) = dst.split_at_mut(window.batched());

    for (d, s) in dst_fast
        .chunks_exact_mut(BATCH)
        .zip(src_fast.chunks_exact(BATCH))
    {
        d[0] = table[s[0] as usize];
        d[1] = table[s[1] as usize];
        d[2] = table[s[2] as usize];
        d[3] = table[s[3] as usize];
        d[4] = table[s[4] as usize];
        d[5] = table[s[5] as usize];
        d[6] = table[s[6] as usize];
        d[7] = table[s[7] as usize];
    }

    for (d, &s) in dst_rest.iter_mut().zip(src_rest) {
        *d = table[s as usize];
    }
}

/// Render a scanline through a color table, doubling every pixel
///
/// Source pixel `k` lands on destination pixels `2k` and `2k + 1`,
/// shifted left by one when `clip.first` drops the leading half pixel.
/// `clip.last` drops the trailing half pixel. Writes exactly
/// `window.output_width_2x(clip)` pixels.
///
/// # Panics
/// Panics if the window does not fit `src`, `dst` is too short, or the
/// clip asks for more half pixels than the window has.
pub fn render_source_line_2x(
    dst: &mut [u32],
    src: &[u8],
    colortab: &ColorTable,
    window: Window,
    clip: EdgeClip,
) {
    let src = window.source(src);
    let out_width = window.output_width_2x(clip);
    let dst = target(dst, out_width);
    let table = colortab.entries();

    if out_width == 0 {
        return;
    }

    let (src, dst, fast) = if clip.first {
        dst[0] = table[src[0] as usize];
        (&src[1..], &mut dst[1..], window.fast.saturating_sub(1))
    } else {
        (src, dst, window.fast)
    };

    let (src, dst) = if clip.last {
        let (&s, src_rest) = match src.split_last() {
            Some(split) => split,
            None => return,
        };
        let (d, dst_rest) = match dst.split_last_mut() {
            Some(split) => split,
            None => return,
        };
        *d = table[s as usize];
        (src_rest, dst_rest)
    } else {
        (src, dst)
    };

    let batched = {
        let fast = fast.min(src.len());
        fast - fast % BATCH
    };
    let (src_fast, src_rest) = src.split_at(batched);
    let (dst_fast, dst_rest) = dst.split_at_mut(2 * batched);

    for (d, s) in dst_fast
        .chunks_exact_mut(2 * BATCH)
        .zip(src_fast.chunks_exact(BATCH))
    {
        for (pair, &p) in d.chunks_exact_mut(2).zip(s) {
            let color = table[p as usize];
            pair[0] = color;
            pair[1] = color;
        }
    }

    for (pair, &p) in dst_rest.chunks_exact_mut(2).zip(src_rest) {
        let color = table[p as usize];
        pair[0] = color;
        pair[1] = color;
    }
}

/// Fill the window's destination run with one color at 1x
///
/// `src` is only checked against the window; its contents are ignored.
pub fn render_solid_line(dst: &mut [u32], src: &[u8], color: u32, window: Window) {
    let width = window.source(src).len();
    target(dst, width).fill(color);
}

/// Fill the window's destination run with one color at 2x
///
/// Same width accounting as [`render_source_line_2x`].
pub fn render_solid_line_2x(
    dst: &mut [u32],
    src: &[u8],
    color: u32,
    window: Window,
    clip: EdgeClip,
) {
    window.validate(src.len());
    let out_width = window.output_width_2x(clip);
    target(dst, out_width).fill(color);
}

/// One of the four compositor kernels, chosen once per scanline
#[derive(Debug, Clone, Copy)]
pub enum LineRenderer<'a> {
    /// Table lookup, 1x
    Source { colortab: &'a ColorTable },
    /// Table lookup, 2x
    Source2x {
        colortab: &'a ColorTable,
        clip: EdgeClip,
    },
    /// Single color, 1x
    Solid { color: u32 },
    /// Single color, 2x
    Solid2x { color: u32, clip: EdgeClip },
}

impl<'a> LineRenderer<'a> {
    /// Pick the kernel for a scanline
    ///
    /// `uniform` is the palette index shared by the whole window, when
    /// the caller detected one; it selects the solid path with the
    /// color the table would have produced.
    pub fn select(
        colortab: &'a ColorTable,
        scale: Scale,
        clip: EdgeClip,
        uniform: Option<u8>,
    ) -> Self {
        match (scale, uniform) {
            (Scale::X1, None) => LineRenderer::Source { colortab },
            (Scale::X2, None) => LineRenderer::Source2x { colortab, clip },
            (Scale::X1, Some(index)) => LineRenderer::Solid {
                color: colortab[index],
            },
            (Scale::X2, Some(index)) => LineRenderer::Solid2x {
                color: colortab[index],
                clip,
            },
        }
    }

    pub fn is_solid(&self) -> bool {
        matches!(
            self,
            LineRenderer::Solid { .. } | LineRenderer::Solid2x { .. }
        )
    }

    /// Destination pixels this renderer writes for `window`
    pub fn output_width(&self, window: Window) -> usize {
        match *self {
            LineRenderer::Source { .. } | LineRenderer::Solid { .. } => window.output_width(),
            LineRenderer::Source2x { clip, .. } | LineRenderer::Solid2x { clip, .. } => {
                window.output_width_2x(clip)
            }
        }
    }

    /// Render one scanline
    #[inline]
    pub fn render(&self, dst: &mut [u32], src: &[u8], window: Window) {
        match *self {
            LineRenderer::Source { colortab } => render_source_line(dst, src, colortab, window),
            LineRenderer::Source2x { colortab, clip } => {
                render_source_line_2x(dst, src, colortab, window, clip)
            }
            LineRenderer::Solid { color } => render_solid_line(dst, src, color, window),
            LineRenderer::Solid2x { color, clip } => {
                render_solid_line_2x(dst, src, color, window, clip)
            }
        }
    }
}
