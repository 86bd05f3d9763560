//! Gesture-driven interactive sketchpad core.
//!
//! Turns per-frame 21-point hand landmark sets into a coherent drawing
//! session: finger extension classification, a debounced thumb toggle for
//! draw mode, edge-triggered buttons and a cursor-size slider, and stroke
//! continuity across noisy, possibly absent input. The landmark detector,
//! camera and final compositing are external collaborators behind plain
//! data types.

pub mod canvas;
pub mod error;
pub mod gesture;
pub mod pipeline;
pub mod region;
pub mod render;
pub mod session;
pub mod types;

pub use error::TrackError;
pub use session::{DrawingSession, Sketchpad};
pub use types::{
    ExtensionState, Finger, FrameOutput, HandFrame, Handedness, LineCommand, Point,
};
