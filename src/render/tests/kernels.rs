//! Kernel behavior tests
//!
//! Covers the worked examples, window offsets, buffer extents and the
//! precondition panics of each kernel.

use super::*;

// Table-driven 1x
// ========================================

#[test]
fn test_source_line_example() {
    let mut dst = dst_buffer(3);
    render_source_line(&mut dst, &[5, 5, 9], &example_table(), Window::new(0, 3));
    assert_eq!(dst, [RED, RED, GREEN]);
}

#[test]
fn test_source_line_offset_window() {
    let table = distinct_table();
    let src = noise_line(64, 7);
    let window = Window::new(10, 50);

    let mut dst = dst_buffer(40);
    render_source_line(&mut dst, &src, &table, window);

    for k in 0..40 {
        assert_eq!(dst[k], table[src[10 + k]], "pixel {}", k);
    }
}

#[test]
fn test_source_line_leaves_tail_untouched() {
    let src = noise_line(16, 3);
    let mut dst = dst_buffer(20);
    render_source_line(&mut dst, &src, &distinct_table(), Window::new(4, 12));

    assert!(dst[..8].iter().all(|&p| p != UNTOUCHED));
    assert!(dst[8..].iter().all(|&p| p == UNTOUCHED));
}

#[test]
fn test_source_line_empty_window() {
    let mut dst = dst_buffer(4);
    render_source_line(&mut dst, &[1, 2, 3], &distinct_table(), Window::new(2, 2));
    assert!(dst.iter().all(|&p| p == UNTOUCHED));
}

#[test]
fn test_source_line_window_at_source_end() {
    let src = [0, 1, 2, 3, 4];
    let table = distinct_table();
    let mut dst = dst_buffer(2);
    render_source_line(&mut dst, &src, &table, Window::new(3, 5));
    assert_eq!(dst, [table[3], table[4]]);
}

#[test]
#[should_panic(expected = "past source line length")]
fn test_source_line_window_past_source() {
    let mut dst = dst_buffer(8);
    render_source_line(&mut dst, &[0; 4], &distinct_table(), Window::new(0, 5));
}

#[test]
#[should_panic(expected = "destination holds 3 pixels, line needs 4")]
fn test_source_line_short_destination() {
    let mut dst = dst_buffer(3);
    render_source_line(&mut dst, &[0; 4], &distinct_table(), Window::new(0, 4));
}

#[test]
#[should_panic(expected = "fast hint")]
fn test_source_line_fast_hint_too_large() {
    let mut dst = dst_buffer(8);
    render_source_line(
        &mut dst,
        &[0; 8],
        &distinct_table(),
        Window::with_fast(2, 8, 8),
    );
}

// Table-driven 2x
// ========================================

#[test]
fn test_source_line_2x_example() {
    let mut dst = dst_buffer(6);
    render_source_line_2x(
        &mut dst,
        &[5, 5, 9],
        &example_table(),
        Window::new(0, 3),
        EdgeClip::NONE,
    );
    assert_eq!(dst, [RED, RED, RED, RED, GREEN, GREEN]);
}

#[test]
fn test_source_line_2x_clip_first() {
    let mut dst = dst_buffer(6);
    render_source_line_2x(
        &mut dst,
        &[5, 9, 5],
        &example_table(),
        Window::new(0, 3),
        EdgeClip::new(true, false),
    );
    assert_eq!(dst, [RED, GREEN, GREEN, RED, RED, UNTOUCHED]);
}

#[test]
fn test_source_line_2x_clip_last() {
    let mut dst = dst_buffer(6);
    render_source_line_2x(
        &mut dst,
        &[5, 9, 5],
        &example_table(),
        Window::new(0, 3),
        EdgeClip::new(false, true),
    );
    assert_eq!(dst, [RED, RED, GREEN, GREEN, RED, UNTOUCHED]);
}

#[test]
fn test_source_line_2x_clip_both() {
    let mut dst = dst_buffer(6);
    render_source_line_2x(
        &mut dst,
        &[5, 9, 5],
        &example_table(),
        Window::new(0, 3),
        EdgeClip::new(true, true),
    );
    assert_eq!(dst, [RED, GREEN, GREEN, RED, UNTOUCHED, UNTOUCHED]);
}

#[test]
fn test_source_line_2x_single_pixel_clips() {
    let table = example_table();

    let mut dst = dst_buffer(2);
    render_source_line_2x(&mut dst, &[9], &table, Window::new(0, 1), EdgeClip::new(true, false));
    assert_eq!(dst, [GREEN, UNTOUCHED]);

    let mut dst = dst_buffer(2);
    render_source_line_2x(&mut dst, &[9], &table, Window::new(0, 1), EdgeClip::new(false, true));
    assert_eq!(dst, [GREEN, UNTOUCHED]);

    let mut dst = dst_buffer(2);
    render_source_line_2x(&mut dst, &[9], &table, Window::new(0, 1), EdgeClip::new(true, true));
    assert_eq!(dst, [UNTOUCHED, UNTOUCHED]);
}

#[test]
fn test_source_line_2x_long_line() {
    let table = distinct_table();
    let src = noise_line(384, 11);
    let window = Window::aligned(24, 344);

    let mut dst = dst_buffer(640);
    render_source_line_2x(&mut dst, &src, &table, window, EdgeClip::NONE);

    for k in 0..320 {
        let expected = table[src[24 + k]];
        assert_eq!(dst[2 * k], expected, "pixel {}", 2 * k);
        assert_eq!(dst[2 * k + 1], expected, "pixel {}", 2 * k + 1);
    }
}

#[test]
#[should_panic(expected = "destination holds 5 pixels, line needs 6")]
fn test_source_line_2x_short_destination() {
    let mut dst = dst_buffer(5);
    render_source_line_2x(
        &mut dst,
        &[0; 3],
        &distinct_table(),
        Window::new(0, 3),
        EdgeClip::NONE,
    );
}

#[test]
#[should_panic(expected = "edge clip removes")]
fn test_source_line_2x_clip_empty_window() {
    let mut dst = dst_buffer(4);
    render_source_line_2x(
        &mut dst,
        &[0; 3],
        &distinct_table(),
        Window::new(1, 1),
        EdgeClip::new(false, true),
    );
}

// Solid color
// ========================================

#[test]
fn test_solid_line_example() {
    let mut dst = dst_buffer(3);
    render_solid_line(&mut dst, &[5, 5, 9], BLACK, Window::new(0, 3));
    assert_eq!(dst, [BLACK, BLACK, BLACK]);
}

#[test]
fn test_solid_line_ignores_source() {
    for seed in 1..5 {
        let src = noise_line(32, seed);
        let mut dst = dst_buffer(32);
        render_solid_line(&mut dst, &src, BLACK, Window::new(8, 24));
        assert!(dst[..16].iter().all(|&p| p == BLACK));
        assert!(dst[16..].iter().all(|&p| p == UNTOUCHED));
    }
}

#[test]
#[should_panic(expected = "past source line length")]
fn test_solid_line_checks_source_length() {
    let mut dst = dst_buffer(8);
    render_solid_line(&mut dst, &[0; 2], BLACK, Window::new(0, 3));
}

#[test]
fn test_solid_line_2x_clip() {
    let mut dst = dst_buffer(8);
    render_solid_line_2x(
        &mut dst,
        &[1, 2, 3],
        BLACK,
        Window::new(0, 3),
        EdgeClip::new(true, false),
    );
    assert_eq!(dst[..5], [BLACK; 5]);
    assert_eq!(dst[5..], [UNTOUCHED; 3]);
}

#[test]
#[should_panic(expected = "destination holds 5 pixels, line needs 6")]
fn test_solid_line_2x_short_destination() {
    let mut dst = dst_buffer(5);
    render_solid_line_2x(&mut dst, &[0; 3], BLACK, Window::new(0, 3), EdgeClip::NONE);
}

// LineRenderer dispatch
// ========================================

#[test]
fn test_select_variants() {
    let table = example_table();
    let clip = EdgeClip::new(true, false);

    assert!(matches!(
        LineRenderer::select(&table, Scale::X1, clip, None),
        LineRenderer::Source { .. }
    ));
    assert!(matches!(
        LineRenderer::select(&table, Scale::X2, clip, None),
        LineRenderer::Source2x { clip: c, .. } if c == clip
    ));
    assert!(matches!(
        LineRenderer::select(&table, Scale::X1, clip, Some(9)),
        LineRenderer::Solid { color: GREEN }
    ));
    assert!(matches!(
        LineRenderer::select(&table, Scale::X2, clip, Some(5)),
        LineRenderer::Solid2x { color: RED, .. }
    ));
}

#[test]
fn test_renderer_output_width() {
    let table = example_table();
    let window = Window::new(0, 10);
    let clip = EdgeClip::new(true, true);

    assert_eq!(LineRenderer::Source { colortab: &table }.output_width(window), 10);
    assert_eq!(LineRenderer::Solid { color: 0 }.output_width(window), 10);
    assert_eq!(
        LineRenderer::Source2x {
            colortab: &table,
            clip
        }
        .output_width(window),
        18
    );
    assert_eq!(LineRenderer::Solid2x { color: 0, clip }.output_width(window), 18);
}

#[test]
fn test_renderer_dispatch_matches_kernels() {
    let table = distinct_table();
    let src = noise_line(100, 21);
    let window = Window::aligned(5, 95);
    let clip = EdgeClip::new(false, true);

    let mut expected = dst_buffer(200);
    render_source_line_2x(&mut expected, &src, &table, window, clip);

    let mut actual = dst_buffer(200);
    LineRenderer::Source2x {
        colortab: &table,
        clip,
    }
    .render(&mut actual, &src, window);

    assert_eq!(actual, expected);
}

#[test]
fn test_scale_factor() {
    assert_eq!(Scale::X1.factor(), 1);
    assert_eq!(Scale::X2.factor(), 2);
}

#[test]
fn test_scale_from_str() {
    assert_eq!("1x".parse::<Scale>(), Ok(Scale::X1));
    assert_eq!(" 2X ".parse::<Scale>(), Ok(Scale::X2));
    assert!("3x".parse::<Scale>().is_err());
}
