//! Interactive rectangular regions: the button panel along the top edge and
//! the cursor-size slider. Hit-testing is inclusive on all four edges;
//! activation edge-triggering lives in the session, which owns the previous
//! fingertip positions the trigger compares against.

use crate::types::{Color, Point};

pub const BUTTON_SIZE: f32 = 100.0;

pub const RED: Color = [255, 0, 0, 255];
pub const BLUE: Color = [0, 0, 255, 255];
pub const GREEN: Color = [0, 255, 0, 255];
pub const YELLOW: Color = [255, 255, 0, 255];
pub const PURPLE: Color = [78, 42, 132, 255];
pub const WHITE: Color = [255, 255, 255, 255];
pub const INK: Color = [1, 1, 1, 255];
pub const GRAY: Color = [128, 128, 128, 255];
pub const MAROON: Color = [128, 0, 0, 255];

/// Panel index of the button selected at session start (white).
pub(crate) const DEFAULT_SELECTED: usize = 5;

/// Axis-aligned rectangle with UI feedback attributes. Compared by
/// point-containment only; it owns no canvas pixels beyond its draw call.
#[derive(Clone, Debug)]
pub struct Region {
    pub origin: Point,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    pub label: Option<&'static str>,
    pub transparency: f32,
}

impl Region {
    pub fn new(origin: Point, width: f32, height: f32, color: Color) -> Self {
        Region {
            origin,
            width,
            height,
            color,
            label: None,
            transparency: 0.9,
        }
    }

    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn with_transparency(mut self, transparency: f32) -> Self {
        self.transparency = transparency.clamp(0.0, 1.0);
        self
    }

    /// Inclusive bounds on both axes: a point exactly on an edge is inside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x
            && p.x <= self.origin.x + self.width
            && p.y >= self.origin.y
            && p.y <= self.origin.y + self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonKind {
    /// Selects the region's fill color as the active draw color.
    Palette,
    /// Selects the canvas background color, erasing whatever it touches.
    Eraser,
    /// Resets the canvas buffer; short-circuits the rest of the panel.
    Clear,
    /// Signals session termination to the orchestrator.
    Exit,
}

#[derive(Clone, Debug)]
pub struct Button {
    pub region: Region,
    pub kind: ButtonKind,
}

/// The fixed panel across the top edge: seven palette colors, eraser and
/// clear, and an exit button flushed to the top-right corner.
pub fn button_panel(frame_width: f32) -> Vec<Button> {
    const PALETTE: [Color; 7] = [RED, BLUE, GREEN, YELLOW, PURPLE, WHITE, INK];

    let cell = |col: f32, color: Color| {
        Region::new(Point::new(col, 0.0), BUTTON_SIZE, BUTTON_SIZE, color)
    };

    let mut buttons: Vec<Button> = PALETTE
        .iter()
        .enumerate()
        .map(|(i, &color)| Button {
            region: cell(i as f32 * BUTTON_SIZE, color),
            kind: ButtonKind::Palette,
        })
        .collect();

    buttons.push(Button {
        region: cell(7.0 * BUTTON_SIZE, GRAY).with_label("Eraser"),
        kind: ButtonKind::Eraser,
    });
    buttons.push(Button {
        region: cell(8.0 * BUTTON_SIZE, GRAY).with_label("Clear"),
        kind: ButtonKind::Clear,
    });
    buttons.push(Button {
        region: cell(frame_width - BUTTON_SIZE, MAROON).with_label("Exit"),
        kind: ButtonKind::Exit,
    });

    buttons
}

/// Maps a fingertip column along a horizontal track to a discrete cursor
/// size. The track is quantized into one integer column per size step;
/// the nearest column by absolute difference wins, ties toward the lower
/// index. Positions outside the track clamp to its ends.
#[derive(Clone, Debug)]
pub struct Slider {
    pub region: Region,
    track_min: f32,
    track_max: f32,
    min_size: i32,
    max_size: i32,
}

impl Slider {
    pub fn new(region: Region, track_min: f32, track_max: f32, min_size: i32, max_size: i32) -> Self {
        Slider {
            region,
            track_min,
            track_max,
            min_size,
            max_size,
        }
    }

    pub fn track_start(&self) -> f32 {
        self.track_min
    }

    pub fn track_end(&self) -> f32 {
        self.track_max
    }

    /// Returns the snapped cursor size and the track column of the handle.
    pub fn map(&self, x: f32) -> (i32, f32) {
        let steps = (self.max_size - self.min_size).max(1);
        let span = self.track_max - self.track_min;

        let mut best_size = self.min_size;
        let mut best_col = self.track_min;
        let mut best_diff = f32::INFINITY;
        for i in 0..=steps {
            let col = (self.track_min + span * i as f32 / steps as f32).floor();
            let diff = (col - x).abs();
            if diff < best_diff {
                best_diff = diff;
                best_size = self.min_size + i;
                best_col = col;
            }
        }
        (best_size, best_col)
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_region() -> Region {
        Region::new(Point::new(10.0, 20.0), 100.0, 50.0, WHITE)
    }

    #[test]
    fn containment_is_inclusive_at_edges() {
        let r = unit_region();
        assert!(r.contains(Point::new(10.0, 20.0))); // top-left corner
        assert!(r.contains(Point::new(110.0, 70.0))); // bottom-right corner
        assert!(r.contains(Point::new(10.0, 45.0))); // left edge
        assert!(r.contains(Point::new(60.0, 70.0))); // bottom edge
        assert!(r.contains(Point::new(60.0, 45.0))); // interior
    }

    #[test]
    fn containment_rejects_outside_points() {
        let r = unit_region();
        assert!(!r.contains(Point::new(9.9, 45.0)));
        assert!(!r.contains(Point::new(110.1, 45.0)));
        assert!(!r.contains(Point::new(60.0, 19.9)));
        assert!(!r.contains(Point::new(60.0, 70.1)));
    }

    #[test]
    fn panel_has_ten_buttons_with_exit_at_right_edge() {
        let buttons = button_panel(1280.0);
        assert_eq!(buttons.len(), 10);
        assert_eq!(buttons[DEFAULT_SELECTED].region.color, WHITE);
        assert_eq!(buttons[7].kind, ButtonKind::Eraser);
        assert_eq!(buttons[8].kind, ButtonKind::Clear);
        let exit = &buttons[9];
        assert_eq!(exit.kind, ButtonKind::Exit);
        assert_eq!(exit.region.origin.x, 1280.0 - BUTTON_SIZE);
    }

    fn test_slider() -> Slider {
        // One column per unit: track columns 0..=35 map to sizes 5..=40.
        let region = Region::new(Point::new(0.0, 0.0), 35.0, 10.0, WHITE);
        Slider::new(region, 0.0, 35.0, 5, 40)
    }

    #[test]
    fn slider_snaps_to_exact_columns() {
        let s = test_slider();
        assert_eq!(s.map(0.0), (5, 0.0));
        assert_eq!(s.map(7.0), (12, 7.0));
        assert_eq!(s.map(35.0), (40, 35.0));
    }

    #[test]
    fn slider_ties_break_toward_lower_index() {
        let s = test_slider();
        let (size, col) = s.map(2.5); // equidistant from columns 2 and 3
        assert_eq!(size, 7);
        assert_eq!(col, 2.0);
    }

    #[test]
    fn slider_clamps_beyond_track_ends() {
        let s = test_slider();
        assert_eq!(s.map(-40.0).0, 5);
        assert_eq!(s.map(400.0).0, 40);
    }
}
