//! The mutable drawing session and the per-frame orchestrator.
//!
//! One `Sketchpad` exists per drawing surface. Each video frame makes a
//! single `advance` call that runs the full analyze→mutate sequence to
//! completion: extension classification, the thumb draw-mode toggle, stroke
//! continuity, then button and slider hit-testing. All cross-frame state
//! (toggle bit, previous fingertip slots, canvas, selection) lives here
//! explicitly so a scripted landmark sequence reproduces a live session
//! exactly.

use crate::canvas::{CANVAS_BG, Canvas};
use crate::error::TrackError;
use crate::gesture::{ThumbToggle, classify_extensions};
use crate::region::{
    BUTTON_SIZE, Button, ButtonKind, DEFAULT_SELECTED, Region, Slider, WHITE, button_panel,
};
use crate::types::{Color, ExtensionState, Finger, FrameOutput, HandFrame, LineCommand, Point};

pub const DEFAULT_CURSOR_SIZE: i32 = 5;
pub const MAX_CURSOR_SIZE: i32 = 40;

const SLIDER_WIDTH: f32 = 280.0;
const SLIDER_TRACK_INSET: f32 = 30.0;
/// Horizontal gap between the slider and the exit button.
const SLIDER_RIGHT_MARGIN: f32 = BUTTON_SIZE;

/// Previous fingertip positions, keyed by finger identity rather than loop
/// index so a changing set of extended fingers can never bleed one finger's
/// history into another. The thumb never draws and has no slot.
#[derive(Debug, Default)]
struct PrevTips {
    index: Option<Point>,
    middle: Option<Point>,
    ring: Option<Point>,
    pinky: Option<Point>,
}

impl PrevTips {
    fn get(&self, finger: Finger) -> Option<Point> {
        match finger {
            Finger::Thumb => None,
            Finger::Index => self.index,
            Finger::Middle => self.middle,
            Finger::Ring => self.ring,
            Finger::Pinky => self.pinky,
        }
    }

    fn set(&mut self, finger: Finger, p: Point) {
        match finger {
            Finger::Thumb => {}
            Finger::Index => self.index = Some(p),
            Finger::Middle => self.middle = Some(p),
            Finger::Ring => self.ring = Some(p),
            Finger::Pinky => self.pinky = Some(p),
        }
    }
}

/// The state threading through the frame loop. Destroyed only at session
/// end; the canvas accumulates until an explicit clear.
pub struct DrawingSession {
    pub draw_mode: bool,
    pub color: Color,
    pub cursor_size: i32,
    pub canvas: Canvas,
    prev_tips: PrevTips,
    thumb: ThumbToggle,
}

impl DrawingSession {
    fn new(width: u32, height: u32) -> Self {
        DrawingSession {
            draw_mode: false,
            color: WHITE,
            cursor_size: DEFAULT_CURSOR_SIZE,
            canvas: Canvas::new(width, height),
            prev_tips: PrevTips::default(),
            thumb: ThumbToggle::new(),
        }
    }
}

pub struct Sketchpad {
    buttons: Vec<Button>,
    slider: Slider,
    /// The sketch area below the button row; both stroke endpoints must lie
    /// inside it for a segment to be emitted.
    drawable: Region,
    selected: usize,
    slider_x: f32,
    session: DrawingSession,
}

impl Sketchpad {
    pub fn new(width: u32, height: u32) -> Self {
        let w = width as f32;
        let h = height as f32;

        let slider_origin = Point::new(w - SLIDER_WIDTH - SLIDER_RIGHT_MARGIN, 0.0);
        let slider_region = Region::new(slider_origin, SLIDER_WIDTH, BUTTON_SIZE, WHITE)
            .with_transparency(0.0)
            .with_label("Cursor Size");
        let slider = Slider::new(
            slider_region,
            slider_origin.x + SLIDER_TRACK_INSET,
            slider_origin.x + SLIDER_WIDTH - SLIDER_TRACK_INSET,
            DEFAULT_CURSOR_SIZE,
            MAX_CURSOR_SIZE,
        );
        let slider_x = slider.track_start();

        Sketchpad {
            buttons: button_panel(w),
            slider,
            drawable: Region::new(Point::new(0.0, BUTTON_SIZE), w, h - BUTTON_SIZE, WHITE)
                .with_transparency(0.0),
            selected: DEFAULT_SELECTED,
            slider_x,
            session: DrawingSession::new(width, height),
        }
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    #[cfg(test)]
    pub(crate) fn session_mut(&mut self) -> &mut DrawingSession {
        &mut self.session
    }

    pub fn canvas(&self) -> &Canvas {
        &self.session.canvas
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn slider(&self) -> &Slider {
        &self.slider
    }

    pub fn selected_button(&self) -> usize {
        self.selected
    }

    pub fn slider_x(&self) -> f32 {
        self.slider_x
    }

    /// One complete frame pass. `hands` carries the detector's reports for
    /// this frame; when several hands are present the most recently reported
    /// one wins (policy — handedness and confidence tags are not consulted).
    /// A frame with no usable hand changes no state at all.
    pub fn advance(&mut self, hands: &[HandFrame]) -> Result<FrameOutput, TrackError> {
        let hand = hands.last().filter(|h| !h.landmarks.is_empty());

        let extensions = match hand {
            Some(h) => classify_extensions(&h.landmarks)?,
            None => ExtensionState::default(),
        };

        let mut output = FrameOutput {
            extensions,
            strokes: Vec::new(),
            selected_button: self.selected,
            cursor_size: self.session.cursor_size,
            slider_x: self.slider_x,
            draw_mode: self.session.draw_mode,
            exit: false,
        };

        let Some(hand) = hand else {
            return Ok(output);
        };

        // Draw mode flips exactly once per thumb press.
        if self.session.thumb.update(extensions.is_extended(Finger::Thumb)) {
            self.session.draw_mode = !self.session.draw_mode;
            log::debug!(
                "draw mode {}",
                if self.session.draw_mode { "on" } else { "off" }
            );
        }

        if self.session.draw_mode {
            for finger in Finger::NON_THUMB {
                if !extensions.is_extended(finger) {
                    continue;
                }
                let tip = hand.tip(finger);
                let Some(prev) = self.session.prev_tips.get(finger) else {
                    continue;
                };
                if self.drawable.contains(prev) && self.drawable.contains(tip) {
                    self.session
                        .canvas
                        .stroke(prev, tip, self.session.color, self.session.cursor_size);
                    output.strokes.push(LineCommand {
                        from: prev,
                        to: tip,
                        color: self.session.color,
                        thickness: self.session.cursor_size,
                    });
                }
            }
        }

        // Buttons edge-trigger on the index fingertip entering a region; the
        // previous-position slot is the same one stroke continuity reads, and
        // an empty slot counts as "was outside".
        let index_tip = hand.tip(Finger::Index);
        let prev_index = self.session.prev_tips.get(Finger::Index);
        for i in 0..self.buttons.len() {
            let region = &self.buttons[i].region;
            let entered =
                region.contains(index_tip) && !prev_index.is_some_and(|p| region.contains(p));
            if !entered {
                continue;
            }
            match self.buttons[i].kind {
                ButtonKind::Clear => {
                    self.session.canvas.clear();
                    log::info!("canvas cleared");
                    break; // clear short-circuits the rest of the panel
                }
                ButtonKind::Exit => {
                    output.exit = true;
                    break;
                }
                ButtonKind::Eraser => {
                    self.selected = i;
                    self.session.color = CANVAS_BG;
                }
                ButtonKind::Palette => {
                    self.selected = i;
                    self.session.color = self.buttons[i].region.color;
                }
            }
        }

        if self.slider.region.contains(index_tip) {
            let (size, col) = self.slider.map(index_tip.x);
            self.session.cursor_size = size;
            self.slider_x = col;
        }

        // Every slot refreshes whether or not its finger is extended, so
        // continuity resumes the instant a finger re-extends; leaving the
        // drawable bounds breaks it through the bounds check instead.
        for finger in Finger::NON_THUMB {
            self.session.prev_tips.set(finger, hand.tip(finger));
        }

        output.selected_button = self.selected;
        output.cursor_size = self.session.cursor_size;
        output.slider_x = self.slider_x;
        output.draw_mode = self.session.draw_mode;
        Ok(output)
    }
}

// ── Test helpers ───────────────────────────────────────────

#[cfg(test)]
fn hand_at(wrist: Point, extended: [bool; 5]) -> HandFrame {
    use crate::gesture::synthetic_hand;
    use crate::types::Handedness;

    HandFrame {
        landmarks: synthetic_hand(wrist, extended),
        handedness: Handedness::Right,
        confidence: 0.9,
    }
}

/// Wrist position that puts the synthetic hand's extended index tip at `tip`.
#[cfg(test)]
fn wrist_for_index_tip(tip: Point) -> Point {
    Point::new(tip.x, tip.y + 145.0)
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX_ONLY: [bool; 5] = [false, true, false, false, false];
    const THUMB_ONLY: [bool; 5] = [true, false, false, false, false];
    const NONE: [bool; 5] = [false; 5];

    fn pad() -> Sketchpad {
        Sketchpad::new(1280, 720)
    }

    fn index_frame(tip: Point) -> Vec<HandFrame> {
        vec![hand_at(wrist_for_index_tip(tip), INDEX_ONLY)]
    }

    /// A thumb press far off the left edge of the surface: it drives the
    /// toggle without touching any region or drawable position.
    fn offscreen_thumb_frame() -> Vec<HandFrame> {
        vec![hand_at(Point::new(-300.0, 400.0), THUMB_ONLY)]
    }

    #[test]
    fn thumb_hold_toggles_exactly_once() {
        let mut pad = pad();
        let frame = offscreen_thumb_frame();
        assert!(pad.advance(&frame).unwrap().draw_mode);
        assert!(pad.advance(&frame).unwrap().draw_mode);
        assert!(pad.advance(&frame).unwrap().draw_mode);

        // Release, then press again: toggles back off.
        let released = vec![hand_at(Point::new(-300.0, 400.0), NONE)];
        assert!(pad.advance(&released).unwrap().draw_mode);
        assert!(!pad.advance(&frame).unwrap().draw_mode);
    }

    #[test]
    fn first_index_frame_has_no_prior_and_emits_nothing() {
        let mut pad = pad();
        // Thumb and index together: draw mode turns on this same frame, but
        // the index slot is still empty, so nothing is emitted.
        let both = vec![hand_at(
            wrist_for_index_tip(Point::new(400.0, 400.0)),
            [true, true, false, false, false],
        )];
        let out = pad.advance(&both).unwrap();
        assert!(out.draw_mode);
        assert!(out.strokes.is_empty());

        // Second frame draws from the first frame's recorded tip.
        let out = pad.advance(&index_frame(Point::new(410.0, 410.0))).unwrap();
        assert_eq!(out.strokes.len(), 1);
        assert_eq!(out.strokes[0].from, Point::new(400.0, 400.0));
        assert_eq!(out.strokes[0].to, Point::new(410.0, 410.0));
    }

    #[test]
    fn end_to_end_toggle_then_draw() {
        let mut pad = pad();

        // Frame 1: thumb extended, hand outside the surface → draw mode on.
        let out = pad.advance(&offscreen_thumb_frame()).unwrap();
        assert!(out.draw_mode);
        assert!(out.strokes.is_empty());

        // Frame 2: index at (200,300); the recorded prior position is
        // outside the drawable bounds, so no stroke yet.
        let out = pad.advance(&index_frame(Point::new(200.0, 300.0))).unwrap();
        assert!(out.strokes.is_empty());

        // Frame 3: exactly one segment, (200,300) → (210,310).
        let out = pad.advance(&index_frame(Point::new(210.0, 310.0))).unwrap();
        assert_eq!(out.strokes.len(), 1);
        assert_eq!(out.strokes[0].from, Point::new(200.0, 300.0));
        assert_eq!(out.strokes[0].to, Point::new(210.0, 310.0));
        assert_eq!(out.strokes[0].color, WHITE);
        assert_eq!(out.strokes[0].thickness, DEFAULT_CURSOR_SIZE);
        assert!(!pad.canvas().is_blank());
    }

    #[test]
    fn strokes_require_draw_mode() {
        let mut pad = pad();
        pad.advance(&index_frame(Point::new(200.0, 300.0))).unwrap();
        let out = pad.advance(&index_frame(Point::new(240.0, 340.0))).unwrap();
        assert!(out.strokes.is_empty());
        assert!(pad.canvas().is_blank());
    }

    #[test]
    fn leaving_the_drawable_bounds_breaks_continuity() {
        let mut pad = pad();
        pad.advance(&offscreen_thumb_frame()).unwrap();
        pad.advance(&index_frame(Point::new(200.0, 300.0))).unwrap();

        // Below the bottom edge: no stroke out, and none back in.
        let out = pad.advance(&index_frame(Point::new(200.0, 800.0))).unwrap();
        assert!(out.strokes.is_empty());
        let out = pad.advance(&index_frame(Point::new(200.0, 650.0))).unwrap();
        assert!(out.strokes.is_empty());

        // Continuity resumes from the first in-bounds position.
        let out = pad.advance(&index_frame(Point::new(200.0, 600.0))).unwrap();
        assert_eq!(out.strokes.len(), 1);
        assert_eq!(out.strokes[0].from, Point::new(200.0, 650.0));
    }

    #[test]
    fn retracted_finger_still_updates_its_slot() {
        let mut pad = pad();
        pad.advance(&offscreen_thumb_frame()).unwrap();
        pad.advance(&index_frame(Point::new(300.0, 300.0))).unwrap();

        // Retract the index while the hand keeps moving.
        let retracted = vec![hand_at(Point::new(500.0, 500.0), NONE)];
        let parked_tip = retracted[0].tip(Finger::Index);
        let out = pad.advance(&retracted).unwrap();
        assert!(out.strokes.is_empty());

        // Re-extend: the segment starts where the retracted tip last was,
        // not back at (300,300).
        let out = pad.advance(&index_frame(Point::new(520.0, 520.0))).unwrap();
        assert_eq!(out.strokes.len(), 1);
        assert_eq!(out.strokes[0].from, parked_tip);
    }

    #[test]
    fn two_fingers_draw_two_segments() {
        let mut pad = pad();
        pad.advance(&offscreen_thumb_frame()).unwrap();
        let both = |tip: Point| {
            vec![hand_at(
                wrist_for_index_tip(tip),
                [false, true, true, false, false],
            )]
        };
        pad.advance(&both(Point::new(300.0, 400.0))).unwrap();
        let out = pad.advance(&both(Point::new(320.0, 420.0))).unwrap();
        assert_eq!(out.strokes.len(), 2);
    }

    #[test]
    fn no_hand_frames_change_nothing() {
        let mut pad = pad();
        pad.advance(&offscreen_thumb_frame()).unwrap();
        pad.advance(&index_frame(Point::new(200.0, 300.0))).unwrap();

        // Hand drops out for two frames.
        let out = pad.advance(&[]).unwrap();
        assert!(!out.extensions.any());
        assert!(out.draw_mode);
        pad.advance(&[]).unwrap();

        // The slot survived the gap: the stroke resumes from (200,300).
        let out = pad.advance(&index_frame(Point::new(230.0, 330.0))).unwrap();
        assert_eq!(out.strokes.len(), 1);
        assert_eq!(out.strokes[0].from, Point::new(200.0, 300.0));
    }

    #[test]
    fn thumb_held_across_a_dropout_does_not_retoggle() {
        let mut pad = pad();
        assert!(pad.advance(&offscreen_thumb_frame()).unwrap().draw_mode);
        pad.advance(&[]).unwrap();
        // Still the same press: no fresh rising edge.
        assert!(pad.advance(&offscreen_thumb_frame()).unwrap().draw_mode);
    }

    #[test]
    fn palette_button_fires_once_per_entry() {
        let mut pad = pad();
        pad.advance(&index_frame(Point::new(500.0, 500.0))).unwrap();

        // Enter the green button (third cell).
        let out = pad.advance(&index_frame(Point::new(250.0, 50.0))).unwrap();
        assert_eq!(out.selected_button, 2);
        assert_eq!(pad.session().color, crate::region::GREEN);

        // Hovering inside must not re-fire: poke the color and observe it
        // survive a second in-region frame.
        pad.session.color = [9, 9, 9, 255];
        pad.advance(&index_frame(Point::new(260.0, 60.0))).unwrap();
        assert_eq!(pad.session().color, [9, 9, 9, 255]);

        // Leave and re-enter: fires again.
        pad.advance(&index_frame(Point::new(500.0, 500.0))).unwrap();
        pad.advance(&index_frame(Point::new(250.0, 50.0))).unwrap();
        assert_eq!(pad.session().color, crate::region::GREEN);
    }

    #[test]
    fn clear_resets_canvas_without_touching_draw_mode() {
        let mut pad = pad();
        pad.advance(&offscreen_thumb_frame()).unwrap();
        pad.advance(&index_frame(Point::new(200.0, 300.0))).unwrap();
        pad.advance(&index_frame(Point::new(400.0, 500.0))).unwrap();
        assert!(!pad.canvas().is_blank());

        // Clear button is the ninth cell.
        let out = pad.advance(&index_frame(Point::new(850.0, 50.0))).unwrap();
        assert!(pad.canvas().is_blank());
        assert!(out.draw_mode);
        assert_eq!(out.selected_button, DEFAULT_SELECTED);
    }

    #[test]
    fn eraser_selects_the_background_color() {
        let mut pad = pad();
        pad.advance(&index_frame(Point::new(500.0, 500.0))).unwrap();
        let out = pad.advance(&index_frame(Point::new(750.0, 50.0))).unwrap();
        assert_eq!(out.selected_button, 7);
        assert_eq!(pad.session().color, CANVAS_BG);
    }

    #[test]
    fn exit_button_signals_termination() {
        let mut pad = pad();
        pad.advance(&index_frame(Point::new(500.0, 500.0))).unwrap();
        let out = pad.advance(&index_frame(Point::new(1230.0, 50.0))).unwrap();
        assert!(out.exit);
        assert!(!out.draw_mode); // orthogonal to the draw toggle
    }

    #[test]
    fn slider_adjusts_cursor_size() {
        let mut pad = pad();
        let out = pad.advance(&index_frame(Point::new(1150.0, 50.0))).unwrap();
        assert_eq!(out.cursor_size, MAX_CURSOR_SIZE);
        assert_eq!(out.slider_x, 1150.0);

        let out = pad.advance(&index_frame(Point::new(930.0, 50.0))).unwrap();
        assert_eq!(out.cursor_size, DEFAULT_CURSOR_SIZE);
        assert_eq!(out.slider_x, 930.0);
    }

    #[test]
    fn last_reported_hand_wins() {
        let mut pad = pad();
        pad.advance(&index_frame(Point::new(500.0, 500.0))).unwrap();

        // First hand hovers the red button, but the later report is the one
        // that counts.
        let hands = vec![
            hand_at(wrist_for_index_tip(Point::new(50.0, 50.0)), INDEX_ONLY),
            hand_at(wrist_for_index_tip(Point::new(500.0, 520.0)), INDEX_ONLY),
        ];
        let out = pad.advance(&hands).unwrap();
        assert_eq!(out.selected_button, DEFAULT_SELECTED);
        assert_eq!(pad.session().color, WHITE);
    }

    #[test]
    fn malformed_landmarks_propagate() {
        use crate::types::Handedness;
        let mut pad = pad();
        let bad = vec![HandFrame {
            landmarks: vec![Point::default(); 7],
            handedness: Handedness::Unknown,
            confidence: 0.5,
        }];
        assert!(pad.advance(&bad).is_err());
    }
}
