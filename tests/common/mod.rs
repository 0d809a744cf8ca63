// Common test utilities for frame-level integration tests
//
// Builds source frames and reference output independently of the
// frame renderer so its result can be checked pixel by pixel.

#![allow(dead_code)]

use scanline_rs::{ColorTable, IndexedFrame, RenderConfig, Scale, Viewport};

/// Source frame size used by the tests
pub const WIDTH: usize = 48;
pub const HEIGHT: usize = 20;

/// Frame with uniform border lines and noisy content lines
pub fn mixed_frame(seed: u32) -> IndexedFrame {
    let mut frame = IndexedFrame::new(WIDTH, HEIGHT);
    frame.clear(14);

    let mut state = seed.max(1);
    for y in 4..HEIGHT - 4 {
        for x in 0..WIDTH {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            frame.set_pixel(x, y, (state >> 24) as u8);
        }
    }
    frame
}

/// Table where every index resolves to a distinct pixel
pub fn distinct_table() -> ColorTable {
    let mut table = ColorTable::default();
    for i in 0..=255u8 {
        table.set(i, 0xFF00_0000 | (i as u32) << 8 | i as u32);
    }
    table
}

/// Configuration over the whole test frame
pub fn base_config(scale: Scale, threads: usize) -> RenderConfig {
    RenderConfig {
        scale,
        double_scan: false,
        solid_detection: true,
        threads,
        viewport: Viewport::full(WIDTH, HEIGHT),
        ..RenderConfig::default()
    }
}

/// Expected output row for source `line`, computed pixel by pixel
#[allow(clippy::too_many_arguments)]
pub fn reference_row(
    frame: &IndexedFrame,
    table: &ColorTable,
    line: usize,
    first_x: usize,
    last_x: usize,
    scale: Scale,
    clip_first: bool,
    clip_last: bool,
) -> Vec<u32> {
    let mut row = Vec::new();
    for x in first_x..=last_x {
        let color = table[frame.get_pixel(x, line)];
        for _ in 0..scale.factor() {
            row.push(color);
        }
    }
    if scale == Scale::X2 {
        if clip_last {
            row.pop();
        }
        if clip_first {
            row.remove(0);
        }
    }
    row
}
