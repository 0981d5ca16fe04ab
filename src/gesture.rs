//! Gesture classification from hand landmarks.
//!
//! Derives a per-finger extension state from one hand's 21 landmark
//! points, then maps the extended-finger count to a gesture label.
//! Stateless: every call judges a single frame's landmarks with no
//! history, smoothing, or hysteresis.

use serde::Serialize;
use tracing::debug;

use crate::geometry::distance;
use crate::landmarks::{HandLandmark, HandLandmarks};

// ── Fingers ────────────────────────────────────────────────

/// The five fingers, thumb to pinky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    /// String representation for logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thumb => "thumb",
            Self::Index => "index",
            Self::Middle => "middle",
            Self::Ring => "ring",
            Self::Pinky => "pinky",
        }
    }
}

/// Extension state of all five fingers for one classified hand.
///
/// Built fresh per classification call and never mutated afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FingerState {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerState {
    /// Number of extended fingers (0-5).
    pub fn extended_count(&self) -> usize {
        self.flags().iter().filter(|&&extended| extended).count()
    }

    /// Per-finger flags in thumb-to-pinky order.
    pub fn flags(&self) -> [bool; 5] {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
    }

    /// Iterate fingers with their extension flags.
    pub fn iter(&self) -> impl Iterator<Item = (Finger, bool)> {
        [
            Finger::Thumb,
            Finger::Index,
            Finger::Middle,
            Finger::Ring,
            Finger::Pinky,
        ]
        .into_iter()
        .zip(self.flags())
    }
}

// ── Finger-state derivation ────────────────────────────────

/// (tip, PIP) landmark pairs for the four fingers judged by the
/// vertical rule. The thumb is absent: it is judged radially.
const TIP_PIP_PAIRS: [(HandLandmark, HandLandmark); 4] = [
    (HandLandmark::IndexTip, HandLandmark::IndexPip),
    (HandLandmark::MiddleTip, HandLandmark::MiddlePip),
    (HandLandmark::RingTip, HandLandmark::RingPip),
    (HandLandmark::PinkyTip, HandLandmark::PinkyPip),
];

/// Derive the per-finger extension state for one hand.
///
/// The thumb counts as extended when its tip lies farther from the
/// wrist than its CMC joint — a radial displacement test that holds for
/// both splayed and folded-across-palm thumb positions. Each other
/// finger counts as extended when its tip sits above its PIP joint in
/// the image (smaller y). The vertical rule assumes a roughly upright
/// hand facing the camera; a sideways or upside-down hand defeats it.
///
/// Both comparisons are strict with no tolerance band, so near-equal
/// values can flip a flag between adjacent frames under sensor noise.
pub fn finger_states(hand: &HandLandmarks) -> FingerState {
    let wrist = hand.point(HandLandmark::Wrist);
    let thumb_tip = hand.point(HandLandmark::ThumbTip);
    let thumb_cmc = hand.point(HandLandmark::ThumbCmc);

    let [index, middle, ring, pinky] =
        TIP_PIP_PAIRS.map(|(tip, pip)| hand.point(tip).y < hand.point(pip).y);

    FingerState {
        thumb: distance(thumb_tip, wrist) > distance(thumb_cmc, wrist),
        index,
        middle,
        ring,
        pinky,
    }
}

// ── Gesture labels ─────────────────────────────────────────

/// The closed set of gesture labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureLabel {
    /// Four or five fingers extended.
    Open,
    /// At most one finger extended.
    Fist,
    /// Anything in between.
    Other,
}

impl GestureLabel {
    /// String representation for captions and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Fist => "fist",
            Self::Other => "other",
        }
    }

    /// Map an extended-finger count (0-5) to its label.
    ///
    /// Fist tolerates one extended finger — usually the thumb, the most
    /// ambiguous digit, but the rule counts fingers without checking
    /// which one is up.
    pub fn from_extended_count(count: usize) -> Self {
        if count >= 4 {
            Self::Open
        } else if count <= 1 {
            Self::Fist
        } else {
            Self::Other
        }
    }
}

/// Classify one hand's landmarks into a gesture label.
///
/// Deterministic and stateless: identical landmarks always produce the
/// identical finger state and label.
pub fn classify(hand: &HandLandmarks) -> GestureLabel {
    let state = finger_states(hand);
    let count = state.extended_count();
    let label = GestureLabel::from_extended_count(count);
    debug!("classified {} ({} fingers extended)", label.as_str(), count);
    label
}

// ── Test helpers ───────────────────────────────────────────

/// An upright right hand with every finger flexed: all tips below their
/// PIP joints, thumb tip pulled in closer to the wrist than its CMC.
#[cfg(test)]
fn flexed_hand_points() -> Vec<crate::landmarks::LandmarkPoint> {
    use crate::landmarks::{LandmarkPoint, LANDMARK_COUNT};

    let mut points = vec![LandmarkPoint::default(); LANDMARK_COUNT];
    let mut set = |lm: HandLandmark, x: f32, y: f32| {
        points[lm.index()] = LandmarkPoint { x, y, z: 0.0 };
    };

    set(HandLandmark::Wrist, 0.5, 0.9);

    // Thumb chain, tip curled back toward the wrist
    set(HandLandmark::ThumbCmc, 0.42, 0.82);
    set(HandLandmark::ThumbMcp, 0.40, 0.78);
    set(HandLandmark::ThumbIp, 0.43, 0.80);
    set(HandLandmark::ThumbTip, 0.47, 0.85);

    // Four fingers: MCP at y=0.60, PIP at y=0.50, DIP and tip curled below
    let columns = [
        (HandLandmark::IndexMcp, 0.40),
        (HandLandmark::MiddleMcp, 0.48),
        (HandLandmark::RingMcp, 0.56),
        (HandLandmark::PinkyMcp, 0.64),
    ];
    for (mcp, x) in columns {
        let base = mcp.index();
        points[base] = LandmarkPoint { x, y: 0.60, z: 0.0 };
        points[base + 1] = LandmarkPoint { x, y: 0.50, z: 0.0 }; // PIP
        points[base + 2] = LandmarkPoint { x, y: 0.58, z: 0.0 }; // DIP
        points[base + 3] = LandmarkPoint { x, y: 0.65, z: 0.0 }; // tip
    }

    points
}

#[cfg(test)]
fn set_point(points: &mut [crate::landmarks::LandmarkPoint], lm: HandLandmark, x: f32, y: f32) {
    points[lm.index()] = crate::landmarks::LandmarkPoint { x, y, z: 0.0 };
}

/// Move a finger's tip above its PIP joint.
#[cfg(test)]
fn extend_finger(points: &mut [crate::landmarks::LandmarkPoint], tip: HandLandmark) {
    let pip = points[tip.index() - 2];
    points[tip.index()].x = pip.x;
    points[tip.index()].y = pip.y - 0.15;
}

/// Move the thumb tip radially out past its CMC joint.
#[cfg(test)]
fn extend_thumb(points: &mut [crate::landmarks::LandmarkPoint]) {
    set_point(points, HandLandmark::ThumbTip, 0.25, 0.65);
}

// ── Tests ──────────────────────────────────────────────────
