//! Scanline compositor unit tests
//!
//! Organized by:
//! - kernels: behavior of each of the four kernels and their panics
//! - laws: equivalence, doubling, edge-clip and fast-hint invariance

use super::*;
use crate::palette::ColorTable;

// ========================================
// Test Constants
// ========================================

/// Marker left in destination pixels the kernels must not touch
pub(crate) const UNTOUCHED: u32 = 0xDEAD_BEEF;

pub(crate) const RED: u32 = 0xFF0000FF;
pub(crate) const GREEN: u32 = 0x00FF00FF;
pub(crate) const BLACK: u32 = 0x000000FF;

// ========================================
// Test Helper Functions
// ========================================

/// Table where every index resolves to a distinct, recognizable pixel
pub(crate) fn distinct_table() -> ColorTable {
    let mut table = ColorTable::default();
    for i in 0..=255u8 {
        table.set(i, 0x0100_0000 * i as u32 + 0x0000_1100 + i as u32);
    }
    table
}

/// Table from the worked examples: 5 is red, 9 is green
pub(crate) fn example_table() -> ColorTable {
    let mut table = ColorTable::default();
    table.set(5, RED);
    table.set(9, GREEN);
    table
}

/// Deterministic pseudo-random scanline (xorshift32)
pub(crate) fn noise_line(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.max(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

/// Destination buffer pre-filled with [`UNTOUCHED`]
pub(crate) fn dst_buffer(len: usize) -> Vec<u32> {
    vec![UNTOUCHED; len]
}

mod kernels;
