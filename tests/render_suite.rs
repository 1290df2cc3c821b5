use goom_zoom::filter_buffers::Pixel;
use goom_zoom::render::{Frame, HalfBlockRenderer, Renderer, draw_text_panel};

/// Build a solid-color pixel buffer.
fn solid_pixels(w: usize, h: usize, r: u8, g: u8, b: u8) -> Vec<Pixel> {
    vec![[r, g, b, 255]; w * h]
}

/// Build a gradient pixel buffer (varies across x).
fn gradient_pixels(w: usize, h: usize) -> Vec<Pixel> {
    let mut buf = Vec::with_capacity(w * h);
    for _ in 0..h {
        for x in 0..w {
            let t = (x as f32 / w.max(1) as f32 * 255.0) as u8;
            buf.push([t, 128, 255 - t, 255]);
        }
    }
    buf
}

fn make_frame<'a>(cols: u16, visual_rows: u16, pw: usize, ph: usize, pixels: &'a [Pixel]) -> Frame<'a> {
    Frame {
        term_cols: cols,
        term_rows: visual_rows + 1,
        pixel_width: pw,
        pixel_height: ph,
        pixels,
        hud: "Amulet | speed 127",
        hud_rows: 1,
        panel: None,
    }
}

// ── HalfBlock renderer ─────────────────────────────────────────────────────

#[test]
fn halfblock_renders_gradient_frame() {
    let cols = 8u16;
    let rows = 4u16;
    let pw = cols as usize;
    let ph = (rows as usize) * 2;
    let pixels = gradient_pixels(pw, ph);
    let frame = make_frame(cols, rows, pw, ph, &pixels);
    let mut out = Vec::new();
    let mut renderer = HalfBlockRenderer::new();
    renderer.render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains("\x1b[?2026h"), "missing sync-begin");
    assert!(s.contains("\x1b[?2026l"), "missing sync-end");
    assert!(s.contains("\u{2580}"), "missing half-block char");
    assert!(s.contains("38;2;"), "missing FG escape");
    assert!(s.contains("48;2;"), "missing BG escape");
    assert!(s.contains("Amulet | speed 127"), "HUD text missing");
}

#[test]
fn halfblock_name() {
    assert_eq!(HalfBlockRenderer::new().name(), "halfblock");
}

#[test]
fn halfblock_scales_small_frames_to_the_terminal() {
    // A 2x2 picture stretched over 6 columns and 3 rows.
    let pixels = solid_pixels(2, 2, 10, 20, 30);
    let frame = make_frame(6, 3, 2, 2, &pixels);
    let mut out = Vec::new();
    HalfBlockRenderer::new().render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert_eq!(s.matches('\u{2580}').count(), 6 * 3);
    assert!(s.contains("38;2;10;20;30"));
}

#[test]
fn halfblock_skips_zero_size() {
    let pixels = solid_pixels(1, 1, 0, 0, 0);
    let frame = make_frame(0, 0, 0, 0, &pixels);
    let mut out = Vec::new();
    HalfBlockRenderer::new().render(&frame, &mut out).unwrap();
    assert!(out.is_empty(), "expected empty output for zero-size frame");
}

#[test]
fn halfblock_skips_short_pixel_buffer() {
    let pixels = solid_pixels(4, 3, 100, 100, 100);
    let frame = make_frame(4, 2, 4, 4, &pixels);
    let mut out = Vec::new();
    HalfBlockRenderer::new().render(&frame, &mut out).unwrap();
    assert!(out.is_empty(), "expected empty output for a short buffer");
}

// ── Multiple frames (color cache reset) ─────────────────────────────────────

#[test]
fn halfblock_resets_color_cache_each_frame() {
    let mut renderer = HalfBlockRenderer::new();

    let red = solid_pixels(4, 4, 255, 0, 0);
    let mut out1 = Vec::new();
    renderer.render(&make_frame(4, 2, 4, 4, &red), &mut out1).unwrap();
    assert!(String::from_utf8_lossy(&out1).contains("38;2;255;0;0"), "first frame missing red FG");

    // Same colour again: the cache must not suppress the escape on a fresh frame.
    let mut out2 = Vec::new();
    renderer.render(&make_frame(4, 2, 4, 4, &red), &mut out2).unwrap();
    assert!(String::from_utf8_lossy(&out2).contains("38;2;255;0;0"), "second frame missing red FG");
}

// ── Panel ───────────────────────────────────────────────────────────────────

#[test]
fn panel_text_is_drawn_over_the_picture() {
    let pixels = solid_pixels(40, 20, 50, 50, 50);
    let mut frame = make_frame(40, 10, 40, 20, &pixels);
    frame.panel = Some("ZoomVector::filter mode: Amulet\nAfterEffects::Tan: false");
    let mut out = Vec::new();
    HalfBlockRenderer::new().render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains("ZoomVector::filter mode: Amulet"), "panel text missing");
    assert!(s.contains("AfterEffects::Tan"), "second panel line missing");
}

#[test]
fn panel_is_skipped_on_tiny_terminals() {
    let mut out = Vec::new();
    draw_text_panel(&mut out, 6, 2, "hello").unwrap();
    assert!(out.is_empty());
}

#[test]
fn panel_lines_are_clipped_to_the_terminal_width() {
    let mut out = Vec::new();
    draw_text_panel(&mut out, 12, 5, "a very long diagnostics line").unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains("a very l"));
    assert!(!s.contains("a very long"));
}
