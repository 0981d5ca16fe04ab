//! Hand landmark data model.
//!
//! Models the fixed 21-point hand topology produced by the external
//! pose estimator: the named joint enumeration, validated landmark
//! containers, and the skeleton connection table for renderers.
//! Landmark indices are positional and never reordered.

use serde::{Deserialize, Serialize};

// ── Landmark definitions ───────────────────────────────────

/// The 21 hand landmarks, in the estimator's fixed positional order.
///
/// Each finger carries four joints from base to tip. The thumb chain is
/// named CMC/MCP/IP; the other fingers are MCP/PIP/DIP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandLandmark {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// Total number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

impl HandLandmark {
    /// Convert landmark enum to array index (0-20).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// String representation for logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wrist => "wrist",
            Self::ThumbCmc => "thumb-cmc",
            Self::ThumbMcp => "thumb-mcp",
            Self::ThumbIp => "thumb-ip",
            Self::ThumbTip => "thumb-tip",
            Self::IndexMcp => "index-mcp",
            Self::IndexPip => "index-pip",
            Self::IndexDip => "index-dip",
            Self::IndexTip => "index-tip",
            Self::MiddleMcp => "middle-mcp",
            Self::MiddlePip => "middle-pip",
            Self::MiddleDip => "middle-dip",
            Self::MiddleTip => "middle-tip",
            Self::RingMcp => "ring-mcp",
            Self::RingPip => "ring-pip",
            Self::RingDip => "ring-dip",
            Self::RingTip => "ring-tip",
            Self::PinkyMcp => "pinky-mcp",
            Self::PinkyPip => "pinky-pip",
            Self::PinkyDip => "pinky-dip",
            Self::PinkyTip => "pinky-tip",
        }
    }

    /// Fingertip landmarks for convenience.
    pub fn fingertips() -> [HandLandmark; 5] {
        [
            Self::ThumbTip,
            Self::IndexTip,
            Self::MiddleTip,
            Self::RingTip,
            Self::PinkyTip,
        ]
    }
}

/// All landmarks in positional order, matching `HandLandmark` indices.
pub const LANDMARKS_IN_ORDER: [HandLandmark; LANDMARK_COUNT] = [
    HandLandmark::Wrist,
    HandLandmark::ThumbCmc,
    HandLandmark::ThumbMcp,
    HandLandmark::ThumbIp,
    HandLandmark::ThumbTip,
    HandLandmark::IndexMcp,
    HandLandmark::IndexPip,
    HandLandmark::IndexDip,
    HandLandmark::IndexTip,
    HandLandmark::MiddleMcp,
    HandLandmark::MiddlePip,
    HandLandmark::MiddleDip,
    HandLandmark::MiddleTip,
    HandLandmark::RingMcp,
    HandLandmark::RingPip,
    HandLandmark::RingDip,
    HandLandmark::RingTip,
    HandLandmark::PinkyMcp,
    HandLandmark::PinkyPip,
    HandLandmark::PinkyDip,
    HandLandmark::PinkyTip,
];

/// Skeleton bone connections (landmark pairs) for overlay rendering.
pub const HAND_CONNECTIONS: [(HandLandmark, HandLandmark); 21] = [
    (HandLandmark::Wrist, HandLandmark::ThumbCmc),
    (HandLandmark::ThumbCmc, HandLandmark::ThumbMcp),
    (HandLandmark::ThumbMcp, HandLandmark::ThumbIp),
    (HandLandmark::ThumbIp, HandLandmark::ThumbTip),
    (HandLandmark::Wrist, HandLandmark::IndexMcp),
    (HandLandmark::IndexMcp, HandLandmark::IndexPip),
    (HandLandmark::IndexPip, HandLandmark::IndexDip),
    (HandLandmark::IndexDip, HandLandmark::IndexTip),
    (HandLandmark::IndexMcp, HandLandmark::MiddleMcp),
    (HandLandmark::MiddleMcp, HandLandmark::MiddlePip),
    (HandLandmark::MiddlePip, HandLandmark::MiddleDip),
    (HandLandmark::MiddleDip, HandLandmark::MiddleTip),
    (HandLandmark::MiddleMcp, HandLandmark::RingMcp),
    (HandLandmark::RingMcp, HandLandmark::RingPip),
    (HandLandmark::RingPip, HandLandmark::RingDip),
    (HandLandmark::RingDip, HandLandmark::RingTip),
    (HandLandmark::RingMcp, HandLandmark::PinkyMcp),
    (HandLandmark::Wrist, HandLandmark::PinkyMcp),
    (HandLandmark::PinkyMcp, HandLandmark::PinkyPip),
    (HandLandmark::PinkyPip, HandLandmark::PinkyDip),
    (HandLandmark::PinkyDip, HandLandmark::PinkyTip),
];

// ── Hand enum ──────────────────────────────────────────────

/// Which hand, as reported by the estimator's handedness output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Parse an estimator handedness string to a Hand enum.
///
/// Estimators report "Left"/"Right"; matching is case-insensitive.
pub fn parse_hand(s: &str) -> Option<Hand> {
    match s.to_ascii_lowercase().as_str() {
        "left" => Some(Hand::Left),
        "right" => Some(Hand::Right),
        _ => None,
    }
}

// ── Landmark point ─────────────────────────────────────────

/// A single landmark position.
///
/// `x` and `y` are normalized image-plane coordinates (origin top-left,
/// y increasing downward); `z` is relative depth on an arbitrary scale,
/// more negative meaning closer to the camera.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl LandmarkPoint {
    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

// ── Validation ─────────────────────────────────────────────

/// Rejection reasons for a malformed landmark set.
///
/// The caller is expected to skip the hand rather than classify it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidLandmarks {
    /// The estimator delivered a point count other than 21.
    WrongCount { got: usize },
    /// A coordinate was NaN or infinite.
    NonFinite { landmark: HandLandmark },
}

impl std::fmt::Display for InvalidLandmarks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongCount { got } => {
                write!(f, "expected {LANDMARK_COUNT} landmarks, got {got}")
            }
            Self::NonFinite { landmark } => {
                write!(f, "non-finite coordinate at {}", landmark.as_str())
            }
        }
    }
}

impl std::error::Error for InvalidLandmarks {}

// ── Hand landmarks container ───────────────────────────────

/// A validated set of 21 landmark points for one detected hand.
///
/// Construction checks the fixed point count and coordinate finiteness.
/// Immutable once built; one instance describes one hand in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    points: [LandmarkPoint; LANDMARK_COUNT],
}

impl HandLandmarks {
    /// Validate and adopt a slice of landmark points.
    pub fn from_points(points: &[LandmarkPoint]) -> Result<Self, InvalidLandmarks> {
        let points: [LandmarkPoint; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| InvalidLandmarks::WrongCount { got: points.len() })?;
        for (i, point) in points.iter().enumerate() {
            if !point.is_finite() {
                return Err(InvalidLandmarks::NonFinite {
                    landmark: LANDMARKS_IN_ORDER[i],
                });
            }
        }
        Ok(Self { points })
    }

    /// Position of a named landmark.
    pub fn point(&self, landmark: HandLandmark) -> &LandmarkPoint {
        &self.points[landmark.index()]
    }

    /// All points in positional order.
    pub fn points(&self) -> &[LandmarkPoint; LANDMARK_COUNT] {
        &self.points
    }
}

// ── Tests ──────────────────────────────────────────────────
