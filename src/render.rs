//! Composites the session's UI feedback over a base frame: the persistent
//! canvas, the button panel with its selection highlight, the cursor-size
//! slider, and the draw-mode badge. Text layout stays with the outer
//! renderer; regions expose their labels for it.

use crate::canvas::{Canvas, blend_rect, draw_circle, fill_rect, stroke_rect};
use crate::region::{GRAY, GREEN, Region, WHITE};
use crate::session::Sketchpad;
use crate::types::Color;

const BORDER_THICKNESS: i32 = 2;
/// Cyan outline around the currently selected color button.
const HIGHLIGHT: Color = [0, 255, 255, 255];
const HIGHLIGHT_THICKNESS: i32 = 6;
const BADGE_RADIUS: i32 = 12;
const BADGE_MARGIN: i32 = 30;

/// Draw everything onto `buffer` (RGBA, same dimensions as the session
/// canvas). The buffer is typically the mirrored camera frame; here it can
/// be any backdrop.
pub fn compose(buffer: &mut [u8], width: u32, height: u32, pad: &Sketchpad) {
    overlay_canvas(buffer, width, height, pad.canvas());

    for button in pad.buttons() {
        paint_region(buffer, width, height, &button.region);
        outline(buffer, width, height, &button.region, WHITE, BORDER_THICKNESS);
    }
    paint_region(buffer, width, height, &pad.slider().region);

    let selected = &pad.buttons()[pad.selected_button()].region;
    outline(buffer, width, height, selected, HIGHLIGHT, HIGHLIGHT_THICKNESS);

    paint_slider(buffer, width, height, pad);

    if pad.session().draw_mode {
        let cx = width as i32 - BADGE_MARGIN;
        let cy = height as i32 - BADGE_MARGIN;
        draw_circle(buffer, width, height, (cx, cy), BADGE_RADIUS, GREEN);
    }
}

/// Straight copy of every non-empty canvas pixel; the transparent background
/// lets the base frame show through.
fn overlay_canvas(buffer: &mut [u8], width: u32, height: u32, canvas: &Canvas) {
    if canvas.width() != width || canvas.height() != height {
        log::warn!(
            "canvas {}x{} does not match frame {}x{}, skipping overlay",
            canvas.width(),
            canvas.height(),
            width,
            height
        );
        return;
    }
    let data = canvas.data();
    for (dst, src) in buffer.chunks_exact_mut(4).zip(data.chunks_exact(4)) {
        if src[3] != 0 {
            dst.copy_from_slice(src);
        }
    }
}

/// Weighted fill of the region's rectangle; a transparency of zero leaves
/// the base frame untouched, matching the invisible sketch/slider areas.
fn paint_region(buffer: &mut [u8], width: u32, height: u32, region: &Region) {
    if region.transparency <= 0.0 {
        return;
    }
    blend_rect(
        buffer,
        width,
        height,
        region.origin.x as i32,
        region.origin.y as i32,
        region.width as i32,
        region.height as i32,
        region.color,
        region.transparency,
    );
}

fn outline(
    buffer: &mut [u8],
    width: u32,
    height: u32,
    region: &Region,
    color: Color,
    thickness: i32,
) {
    stroke_rect(
        buffer,
        width,
        height,
        region.origin.x,
        region.origin.y,
        region.width,
        region.height,
        color,
        thickness,
    );
}

fn paint_slider(buffer: &mut [u8], width: u32, height: u32, pad: &Sketchpad) {
    let slider = pad.slider();
    let mid = slider.region.origin.y + slider.region.height / 2.0;

    fill_rect(
        buffer,
        width,
        height,
        slider.track_start() as i32,
        (mid - 1.0) as i32,
        (slider.track_end() - slider.track_start()) as i32,
        3,
        GRAY,
    );

    // Handle circle previews the cursor at its actual size.
    draw_circle(
        buffer,
        width,
        height,
        (pad.slider_x() as i32, mid as i32),
        (pad.session().cursor_size / 2).max(1),
        WHITE,
    );
}

// ── Tests ──────────────────────────────────────────────────
