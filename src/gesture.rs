//! Per-finger extension classification from a 21-point hand landmark set,
//! and the rising-edge thumb toggle that drives draw mode.
//!
//! Non-thumb fingers use a monotonicity-from-wrist heuristic: the tip must
//! sit strictly farther from the wrist than every one of its three chain
//! joints. That misreads a finger curled sideways toward the camera, but
//! bent fingers pointed away from the wrist fail it reliably. The thumb's
//! oblique range of motion defeats that test, so it gets a dual joint-angle
//! window plus a reach-ratio check against the palm width instead.

use crate::error::TrackError;
use crate::types::{ExtensionState, Finger, LANDMARK_COUNT, Point};

/// Joint angles inside this window (degrees, inclusive) count as straight.
const THUMB_ANGLE_MIN_DEG: f32 = 150.0;
const THUMB_ANGLE_MAX_DEG: f32 = 195.0;
/// Thumb tip to index-base distance must reach this multiple of the palm
/// width (wrist to index base) for the thumb to count as extended.
const THUMB_REACH_RATIO: f32 = 1.2;
/// Keeps the angle denominator away from zero for degenerate chains.
const ANGLE_EPS: f32 = 1e-6;

/// Classify all five fingers for one frame.
///
/// An empty slice is the normal "no hand" condition and yields the default
/// all-retracted state. Any other length that is not exactly 21 is a
/// detector contract violation and fails fast.
pub fn classify_extensions(landmarks: &[Point]) -> Result<ExtensionState, TrackError> {
    if landmarks.is_empty() {
        return Ok(ExtensionState::default());
    }
    if landmarks.len() != LANDMARK_COUNT {
        return Err(TrackError::MalformedLandmarks {
            got: landmarks.len(),
        });
    }

    let mut flags = [false; 5];
    for (slot, finger) in Finger::ALL.into_iter().enumerate() {
        flags[slot] = match finger {
            Finger::Thumb => thumb_extended(landmarks),
            _ => finger_extended(landmarks, finger.tip_index()),
        };
    }
    Ok(ExtensionState::new(flags))
}

/// Extended iff the tip is strictly farther from the wrist than each of the
/// three joints preceding it on the finger chain.
fn finger_extended(landmarks: &[Point], tip: usize) -> bool {
    let wrist = landmarks[0];
    let reach = landmarks[tip].distance(wrist);
    (1..=3).all(|back| reach > landmarks[tip - back].distance(wrist))
}

fn thumb_extended(landmarks: &[Point]) -> bool {
    // Angle at the IP joint (tip..ip..mcp) and at the MCP joint (ip..mcp..cmc).
    let ip_angle = joint_angle_deg(landmarks[4], landmarks[3], landmarks[2]);
    let mcp_angle = joint_angle_deg(landmarks[3], landmarks[2], landmarks[1]);

    let reach = landmarks[4].distance(landmarks[17]);
    let palm = landmarks[0].distance(landmarks[5]);

    thumb_angle_ok(ip_angle) && thumb_angle_ok(mcp_angle) && reach_past_palm(reach, palm)
}

fn thumb_angle_ok(angle_deg: f32) -> bool {
    (THUMB_ANGLE_MIN_DEG..=THUMB_ANGLE_MAX_DEG).contains(&angle_deg)
}

/// Compared via the quotient so the ratio boundary is exact; the boundary
/// itself is inclusive.
fn reach_past_palm(reach: f32, palm: f32) -> bool {
    reach / palm >= THUMB_REACH_RATIO
}

/// Angle in degrees at `vertex` between the rays toward `a` and `b`.
/// Degenerate (zero-length) rays stay finite thanks to the epsilon; the
/// resulting angle may then be heuristically wrong, which is acceptable.
fn joint_angle_deg(a: Point, vertex: Point, b: Point) -> f32 {
    let ux = a.x - vertex.x;
    let uy = a.y - vertex.y;
    let vx = b.x - vertex.x;
    let vy = b.y - vertex.y;

    let dot = ux * vx + uy * vy;
    let denom = (ux * ux + uy * uy).sqrt() * (vx * vx + vy * vy).sqrt() + ANGLE_EPS;
    (dot / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

// ── Draw-mode toggle ───────────────────────────────────────

/// Rising-edge detector over the thumb's per-frame extension signal.
/// Holding the thumb extended across frames reports the edge exactly once;
/// releasing and re-extending reports it again.
#[derive(Debug, Default)]
pub struct ThumbToggle {
    was_extended: bool,
}

impl ThumbToggle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current frame's thumb state; returns true only on the
    /// false→true transition.
    pub fn update(&mut self, extended: bool) -> bool {
        let rising = extended && !self.was_extended;
        self.was_extended = extended;
        rising
    }

    /// Back to the session-start state.
    pub fn reset(&mut self) {
        self.was_extended = false;
    }
}

// ── Test helpers ───────────────────────────────────────────

/// Build a full 21-point hand around `wrist` with the requested fingers
/// extended. Geometry is chosen so each classification heuristic passes or
/// fails with a wide margin.
#[cfg(test)]
pub(crate) fn synthetic_hand(wrist: Point, extended: [bool; 5]) -> Vec<Point> {
    let at = |dx: f32, dy: f32| Point::new(wrist.x + dx, wrist.y + dy);
    let mut lm = vec![wrist; LANDMARK_COUNT];

    // Thumb chain toward -x; straight when extended, kinked at the IP joint
    // when retracted.
    lm[1] = at(-30.0, -10.0);
    lm[2] = at(-60.0, -20.0);
    lm[3] = at(-90.0, -30.0);
    lm[4] = if extended[0] {
        at(-120.0, -40.0)
    } else {
        at(-80.0, 0.0)
    };

    // Four finger columns; a retracted tip drops below its own MCP distance.
    for (i, base) in [(1usize, 5usize), (2, 9), (3, 13), (4, 17)] {
        let dx = (i as f32 - 1.0) * 22.0;
        lm[base] = at(dx, -70.0);
        lm[base + 1] = at(dx, -95.0);
        lm[base + 2] = at(dx, -120.0);
        lm[base + 3] = if extended[i] {
            at(dx, -145.0)
        } else {
            at(dx, -60.0)
        };
    }
    lm
}

// ── Tests ──────────────────────────────────────────────────
