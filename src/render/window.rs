// Scanline windows
//
// A window selects the visible part of a source scanline. `end` is
// exclusive: the rendered source range is `start..end`.
//
// `fast` is a batching hint only. The kernels process
// `start..start + fast` in groups of 8 pixels and the rest one by one;
// the output is the same for every legal value.

use serde::{Deserialize, Serialize};

/// Pixels handled per iteration of the batched loops
pub const BATCH: usize = 8;

/// Visible sub-range of a source scanline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    /// First source pixel rendered
    pub start: usize,
    /// Number of pixels from `start` eligible for the batched loop
    pub fast: usize,
    /// One past the last source pixel rendered
    pub end: usize,
}

impl Window {
    /// Window over `start..end` without a batching hint
    pub const fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            fast: 0,
            end,
        }
    }

    /// Window with an explicit batching hint
    pub const fn with_fast(start: usize, fast: usize, end: usize) -> Self {
        Self { start, fast, end }
    }

    /// Whole scanline of `len` pixels
    pub const fn full(len: usize) -> Self {
        Self::aligned(0, len)
    }

    /// Window over `start..end` hinting the largest multiple of 8 pixels
    pub const fn aligned(start: usize, end: usize) -> Self {
        let width = end.saturating_sub(start);
        Self {
            start,
            fast: width - width % BATCH,
            end,
        }
    }

    /// Number of source pixels in the window
    #[inline]
    pub fn width(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Pixels to process in whole batches, counted from `start`
    #[inline]
    pub(crate) fn batched(&self) -> usize {
        self.fast - self.fast % BATCH
    }

    /// Check the window against a source scanline of `src_len` pixels
    ///
    /// # Panics
    /// Panics if `start > end`, `start + fast > end` or `end > src_len`
    #[inline]
    pub fn validate(&self, src_len: usize) {
        assert!(
            self.start <= self.end,
            "window start {} is past window end {}",
            self.start,
            self.end
        );
        assert!(
            self.fast <= self.end - self.start,
            "fast hint {} exceeds window width {}",
            self.fast,
            self.end - self.start
        );
        assert!(
            self.end <= src_len,
            "window end {} is past source line length {}",
            self.end,
            src_len
        );
    }

    /// Validated view of the window's source pixels
    #[inline]
    pub(crate) fn source<'a>(&self, src: &'a [u8]) -> &'a [u8] {
        self.validate(src.len());
        &src[self.start..self.end]
    }

    /// Destination pixels produced at 1x
    #[inline]
    pub fn output_width(&self) -> usize {
        self.width()
    }

    /// Destination pixels produced at 2x with the given edge clipping
    ///
    /// # Panics
    /// Panics if the clip removes more pixels than the window produces
    #[inline]
    pub fn output_width_2x(&self, clip: EdgeClip) -> usize {
        let doubled = 2 * self.width();
        let clipped = clip.count();
        assert!(
            clipped <= doubled,
            "edge clip removes {} pixels from a {} pixel line",
            clipped,
            doubled
        );
        doubled - clipped
    }
}

/// Half-pixel clipping at the edges of a 2x line
///
/// `first` drops the left half of the first doubled pixel, `last` drops
/// the right half of the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EdgeClip {
    pub first: bool,
    pub last: bool,
}

impl EdgeClip {
    /// Emit every pixel pair in full
    pub const NONE: EdgeClip = EdgeClip {
        first: false,
        last: false,
    };

    pub const fn new(first: bool, last: bool) -> Self {
        Self { first, last }
    }

    /// Destination pixels removed by this clip
    #[inline]
    pub fn count(&self) -> usize {
        self.first as usize + self.last as usize
    }
}

/// Palette index shared by every pixel of the window, if there is one
///
/// An empty window has no uniform color.
pub fn uniform_color(src: &[u8], window: Window) -> Option<u8> {
    let line = window.source(src);
    let (&first, rest) = line.split_first()?;
    rest.iter().all(|&p| p == first).then_some(first)
}
