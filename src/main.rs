//! Headless demo: replays a scripted gesture session through the full
//! pipeline and saves a snapshot of the composed surface. A live deployment
//! swaps `ScriptedHands` for a real detector behind the same
//! `LandmarkSource` seam.

use std::collections::VecDeque;

use anyhow::{Context, Result};
use crossbeam_channel::bounded;

use gesture_sketchpad::pipeline::{self, LandmarkSource};
use gesture_sketchpad::render;
use gesture_sketchpad::types::LANDMARK_COUNT;
use gesture_sketchpad::{HandFrame, Handedness, Point, Sketchpad};

const WIDTH: u32 = 1280;
const HEIGHT: u32 = 720;

const THUMB_UP: [bool; 5] = [true, false, false, false, false];
const POINTING: [bool; 5] = [false, true, false, false, false];
const FIST: [bool; 5] = [false; 5];

fn main() -> Result<()> {
    env_logger::init();

    let (tx, rx) = bounded(1);
    let stream = pipeline::start_hand_stream(ScriptedHands::demo(), tx);

    let mut pad = Sketchpad::new(WIDTH, HEIGHT);
    let mut frames = 0usize;
    let mut segments = 0usize;
    while let Some(hands) = pipeline::recv_latest(&rx) {
        if let Some(hand) = hands.last() {
            log::trace!(
                "{} hand, confidence {:.2}",
                hand.handedness.label(),
                hand.confidence
            );
        }
        let output = pad.advance(&hands)?;
        frames += 1;
        segments += output.strokes.len();
        if output.exit {
            log::info!("exit region activated after {frames} frames");
            break;
        }
    }
    drop(rx);
    stream.stop();

    // Compose the finished surface over a dark backdrop and keep a snapshot.
    let mut frame = vec![0u8; (WIDTH * HEIGHT * 4) as usize];
    for px in frame.chunks_exact_mut(4) {
        px.copy_from_slice(&[24, 24, 28, 255]);
    }
    render::compose(&mut frame, WIDTH, HEIGHT, &pad);
    let snapshot = image::RgbaImage::from_raw(WIDTH, HEIGHT, frame)
        .context("snapshot buffer has the wrong size")?;
    snapshot.save("sketchpad.png")?;

    log::info!("processed {frames} frames, {segments} stroke segments -> sketchpad.png");
    Ok(())
}

/// Stand-in for the live detector: a fixed gesture script. Every
/// interaction with a region is held for two frames so the drain-to-latest
/// consumer cannot skip past an entry.
struct ScriptedHands {
    frames: VecDeque<Vec<HandFrame>>,
}

impl ScriptedHands {
    fn demo() -> Self {
        let mut frames: VecDeque<Vec<HandFrame>> = VecDeque::new();

        // Warm-up with no hand in view.
        for _ in 0..3 {
            frames.push_back(Vec::new());
        }

        // Thumb press off the left edge toggles draw mode on.
        for _ in 0..2 {
            frames.push_back(vec![hand(Point::new(-300.0, 400.0), THUMB_UP)]);
        }
        frames.push_back(vec![hand(Point::new(-300.0, 400.0), FIST)]);

        // A white sine wave across the sketch area.
        for i in 0..=40 {
            let t = i as f32 / 40.0;
            let x = 160.0 + 800.0 * t;
            let y = 420.0 + (t * std::f32::consts::TAU).sin() * 140.0;
            frames.push_back(vec![hand(wrist_for_tip(x, y), POINTING)]);
        }

        // Grow the cursor on the slider, then pick green.
        for _ in 0..2 {
            frames.push_back(vec![hand(wrist_for_tip(1100.0, 50.0), POINTING)]);
        }
        for _ in 0..2 {
            frames.push_back(vec![hand(wrist_for_tip(250.0, 50.0), POINTING)]);
        }

        // A thicker green diagonal.
        for i in 0..=30 {
            let t = i as f32 / 30.0;
            frames.push_back(vec![hand(
                wrist_for_tip(200.0 + 700.0 * t, 600.0 - 220.0 * t),
                POINTING,
            )]);
        }

        // Curl the hand, then head for the exit button.
        frames.push_back(vec![hand(wrist_for_tip(640.0, 400.0), FIST)]);
        for _ in 0..2 {
            frames.push_back(vec![hand(wrist_for_tip(1230.0, 50.0), POINTING)]);
        }

        ScriptedHands { frames }
    }
}

impl LandmarkSource for ScriptedHands {
    fn next_hands(&mut self) -> Option<Vec<HandFrame>> {
        self.frames.pop_front()
    }
}

/// Wrist position that puts the extended index fingertip at (`x`, `y`).
fn wrist_for_tip(x: f32, y: f32) -> Point {
    Point::new(x, y + 145.0)
}

/// A synthetic but anatomically plausible 21-point hand: four finger
/// columns above the wrist plus a thumb chain toward -x, straight when
/// extended and kinked at the IP joint when curled.
fn hand(wrist: Point, extended: [bool; 5]) -> HandFrame {
    let at = |dx: f32, dy: f32| Point::new(wrist.x + dx, wrist.y + dy);
    let mut landmarks = vec![wrist; LANDMARK_COUNT];

    landmarks[1] = at(-30.0, -10.0);
    landmarks[2] = at(-60.0, -20.0);
    landmarks[3] = at(-90.0, -30.0);
    landmarks[4] = if extended[0] {
        at(-120.0, -40.0)
    } else {
        at(-80.0, 0.0)
    };

    for (i, base) in [(1usize, 5usize), (2, 9), (3, 13), (4, 17)] {
        let dx = (i as f32 - 1.0) * 22.0;
        landmarks[base] = at(dx, -70.0);
        landmarks[base + 1] = at(dx, -95.0);
        landmarks[base + 2] = at(dx, -120.0);
        landmarks[base + 3] = if extended[i] {
            at(dx, -145.0)
        } else {
            at(dx, -60.0)
        };
    }

    HandFrame {
        landmarks,
        handedness: Handedness::Right,
        confidence: 0.9,
    }
}
