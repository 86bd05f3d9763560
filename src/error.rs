use thiserror::Error;

/// Contract violations by the landmark detector. An absent hand is a normal
/// per-frame condition and never reaches this type; a landmark set with the
/// wrong point count is a programming error on the detector side and fails
/// fast instead of being partially indexed.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("malformed landmark set: expected 21 points, got {got}")]
    MalformedLandmarks { got: usize },
}
