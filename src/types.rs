//! Shared plain data passed between the detector seam, the gesture core and
//! the renderer.

/// Every landmark set has exactly this many points (MediaPipe hand layout).
pub const LANDMARK_COUNT: usize = 21;

/// RGBA color, straight alpha.
pub type Color = [u8; 4];

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
    Unknown,
}

impl Handedness {
    pub fn label(&self) -> &'static str {
        match self {
            Handedness::Left => "left",
            Handedness::Right => "right",
            Handedness::Unknown => "unknown",
        }
    }
}

/// One hand as reported by the detector for a single frame: 21 ordered
/// landmarks in pixel coordinates, plus tags the core carries but does not
/// act on (selection between hands is last-reported-wins, not
/// confidence-based).
#[derive(Clone, Debug)]
pub struct HandFrame {
    pub landmarks: Vec<Point>,
    pub handedness: Handedness,
    pub confidence: f32,
}

impl HandFrame {
    /// Fingertip position for `finger`. Assumes a well-formed 21-point set;
    /// callers validate through the analyzer first.
    pub fn tip(&self, finger: Finger) -> Point {
        self.landmarks[finger.tip_index()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// The fingers that leave strokes; the thumb only drives the draw toggle.
    pub const NON_THUMB: [Finger; 4] =
        [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    /// Landmark index of this finger's tip.
    pub fn tip_index(self) -> usize {
        match self {
            Finger::Thumb => 4,
            Finger::Index => 8,
            Finger::Middle => 12,
            Finger::Ring => 16,
            Finger::Pinky => 20,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Finger::Thumb => "thumb",
            Finger::Index => "index",
            Finger::Middle => "middle",
            Finger::Ring => "ring",
            Finger::Pinky => "pinky",
        }
    }
}

/// Per-finger extended/retracted classification for one frame. Derived fresh
/// every frame and never persisted; the default (all retracted) doubles as
/// the "no hand" result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtensionState {
    flags: [bool; 5],
}

impl ExtensionState {
    pub fn new(flags: [bool; 5]) -> Self {
        ExtensionState { flags }
    }

    pub fn is_extended(&self, finger: Finger) -> bool {
        self.flags[Self::slot(finger)]
    }

    pub fn any(&self) -> bool {
        self.flags.iter().any(|&f| f)
    }

    pub fn extended(&self) -> impl Iterator<Item = Finger> + '_ {
        Finger::ALL
            .into_iter()
            .filter(move |f| self.flags[Self::slot(*f)])
    }

    fn slot(finger: Finger) -> usize {
        match finger {
            Finger::Thumb => 0,
            Finger::Index => 1,
            Finger::Middle => 2,
            Finger::Ring => 3,
            Finger::Pinky => 4,
        }
    }
}

/// One new stroke segment for the compositing collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineCommand {
    pub from: Point,
    pub to: Point,
    pub color: Color,
    pub thickness: i32,
}

/// Everything the core hands back to the renderer after one frame pass.
#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub extensions: ExtensionState,
    pub strokes: Vec<LineCommand>,
    /// Index into the button panel of the highlighted color button.
    pub selected_button: usize,
    pub cursor_size: i32,
    /// Track column of the slider handle, for visualization.
    pub slider_x: f32,
    pub draw_mode: bool,
    /// Set once the exit region has been activated; the session is done.
    pub exit: bool,
}
