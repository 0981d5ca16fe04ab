//! Estimator bridge — frame records from the external pose estimator.
//!
//! The hand-pose model runs in a separate process and emits one JSON
//! record per video frame. This module parses those records, validates
//! each hand's landmark set, and dispatches the classifier over every
//! detected hand independently. Detector parameters are carried as
//! explicit call-time values, never as ambient state.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::gesture::{finger_states, FingerState, GestureLabel};
use crate::landmarks::{parse_hand, Hand, HandLandmarks, InvalidLandmarks, LandmarkPoint};

// ── Detector parameters ────────────────────────────────────

/// Call-time parameters for the external hand detector.
///
/// These mirror the estimator's own knobs. The confidence floors are
/// enforced by the estimator process itself; the bridge applies only
/// `max_hands`, dropping surplus detections.
#[derive(Debug, Clone)]
pub struct DetectorParams {
    /// Maximum number of hands to classify per frame.
    pub max_hands: usize,
    /// Minimum confidence (0.0-1.0) for an initial detection.
    pub min_detection_confidence: f32,
    /// Minimum confidence (0.0-1.0) to keep tracking across frames.
    pub min_tracking_confidence: f32,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            max_hands: 1,
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
        }
    }
}

// ── Frame records (estimator → core) ───────────────────────

/// One detected hand within a frame, as serialized by the estimator.
#[derive(Debug, Clone, Deserialize)]
pub struct HandRecord {
    /// Raw landmark triples in the fixed positional order.
    pub landmarks: Vec<LandmarkPoint>,
    /// Detection confidence (0.0-1.0).
    pub confidence: f32,
    /// Handedness as reported by the estimator ("Left" or "Right").
    pub handedness: String,
}

impl HandRecord {
    /// Validate the raw landmark triples into a `HandLandmarks`.
    pub fn to_landmarks(&self) -> Result<HandLandmarks, InvalidLandmarks> {
        HandLandmarks::from_points(&self.landmarks)
    }
}

/// All hands detected in one video frame.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrameRecord {
    pub hands: Vec<HandRecord>,
}

// ── Hand reports (core → renderer) ─────────────────────────

/// Classification result for one hand, for the renderer/overlay side.
#[derive(Debug, Clone, Serialize)]
pub struct HandReport {
    /// Handedness, when the estimator reported a recognizable side.
    pub hand: Option<Hand>,
    /// Detection confidence as reported by the estimator.
    pub confidence: f32,
    /// Per-finger extension flags.
    pub fingers: FingerState,
    /// The gesture label.
    pub gesture: GestureLabel,
}

/// Classify every hand in a frame record independently.
///
/// Hands beyond `params.max_hands` are dropped. A hand whose landmark
/// set fails validation is skipped with a warning so the caller never
/// sees a fabricated label for it; the remaining hands still classify.
pub fn classify_frame(frame: &FrameRecord, params: &DetectorParams) -> Vec<HandReport> {
    let mut reports = Vec::new();
    for record in frame.hands.iter().take(params.max_hands) {
        let hand = match record.to_landmarks() {
            Ok(hand) => hand,
            Err(err) => {
                warn!("skipping {} hand: {}", record.handedness, err);
                continue;
            }
        };
        let fingers = finger_states(&hand);
        reports.push(HandReport {
            hand: parse_hand(&record.handedness),
            confidence: record.confidence,
            fingers,
            gesture: GestureLabel::from_extended_count(fingers.extended_count()),
        });
    }
    reports
}

// ── Test helpers ───────────────────────────────────────────

/// A hand record with every finger extended: tips above their PIP
/// joints, thumb tip farther from the wrist than its CMC.
#[cfg(test)]
fn open_hand_record() -> HandRecord {
    use crate::landmarks::{HandLandmark, LANDMARK_COUNT};

    let mut landmarks = vec![LandmarkPoint::default(); LANDMARK_COUNT];
    let mut set = |lm: HandLandmark, x: f32, y: f32| {
        landmarks[lm.index()] = LandmarkPoint { x, y, z: 0.0 };
    };

    set(HandLandmark::Wrist, 0.5, 0.9);
    set(HandLandmark::ThumbCmc, 0.42, 0.82);
    set(HandLandmark::ThumbMcp, 0.38, 0.76);
    set(HandLandmark::ThumbIp, 0.33, 0.71);
    set(HandLandmark::ThumbTip, 0.28, 0.66);

    let columns = [
        (HandLandmark::IndexMcp, 0.40),
        (HandLandmark::MiddleMcp, 0.48),
        (HandLandmark::RingMcp, 0.56),
        (HandLandmark::PinkyMcp, 0.64),
    ];
    for (mcp, x) in columns {
        let base = mcp.index();
        landmarks[base] = LandmarkPoint { x, y: 0.60, z: 0.0 };
        landmarks[base + 1] = LandmarkPoint { x, y: 0.50, z: 0.0 }; // PIP
        landmarks[base + 2] = LandmarkPoint { x, y: 0.42, z: 0.0 }; // DIP
        landmarks[base + 3] = LandmarkPoint { x, y: 0.35, z: 0.0 }; // tip
    }

    HandRecord {
        landmarks,
        confidence: 0.92,
        handedness: "Right".to_string(),
    }
}

/// A hand record with a missing landmark (20 points).
#[cfg(test)]
fn truncated_hand_record() -> HandRecord {
    let mut record = open_hand_record();
    record.landmarks.pop();
    record
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = DetectorParams::default();
        assert_eq!(params.max_hands, 1);
        assert!((params.min_detection_confidence - 0.5).abs() < f32::EPSILON);
        assert!((params.min_tracking_confidence - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_classify_frame_open_hand() {
        let frame = FrameRecord {
            hands: vec![open_hand_record()],
        };
        let reports = classify_frame(&frame, &DetectorParams::default());
        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert_eq!(report.gesture, GestureLabel::Open);
        assert_eq!(report.hand, Some(Hand::Right));
        assert_eq!(report.fingers.extended_count(), 5);
        assert!((report.confidence - 0.92).abs() < 0.001);
    }

    #[test]
    fn test_classify_frame_empty() {
        let reports = classify_frame(&FrameRecord::default(), &DetectorParams::default());
        assert!(reports.is_empty());
    }

    #[test]
    fn test_classify_frame_skips_invalid_hand() {
        let frame = FrameRecord {
            hands: vec![truncated_hand_record(), open_hand_record()],
        };
        let params = DetectorParams {
            max_hands: 2,
            ..DetectorParams::default()
        };
        let reports = classify_frame(&frame, &params);
        assert_eq!(reports.len(), 1, "invalid hand must be skipped, not guessed");
        assert_eq!(reports[0].gesture, GestureLabel::Open);
    }

    #[test]
    fn test_max_hands_truncation() {
        let frame = FrameRecord {
            hands: vec![open_hand_record(), open_hand_record()],
        };
        let reports = classify_frame(&frame, &DetectorParams::default());
        assert_eq!(reports.len(), 1);
    }

    #[test]
    fn test_hands_classify_independently() {
        use crate::landmarks::HandLandmark;

        let mut left = open_hand_record();
        left.handedness = "Left".to_string();
        // Curl the left hand's four fingers: tips below their PIPs
        for tip in [
            HandLandmark::IndexTip,
            HandLandmark::MiddleTip,
            HandLandmark::RingTip,
            HandLandmark::PinkyTip,
        ] {
            left.landmarks[tip.index()].y = 0.65;
        }
        // Curl the thumb too
        left.landmarks[HandLandmark::ThumbTip.index()] = LandmarkPoint {
            x: 0.47,
            y: 0.85,
            z: 0.0,
        };

        let frame = FrameRecord {
            hands: vec![left, open_hand_record()],
        };
        let params = DetectorParams {
            max_hands: 2,
            ..DetectorParams::default()
        };
        let reports = classify_frame(&frame, &params);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].gesture, GestureLabel::Fist);
        assert_eq!(reports[0].hand, Some(Hand::Left));
        assert_eq!(reports[1].gesture, GestureLabel::Open);
        assert_eq!(reports[1].hand, Some(Hand::Right));
    }

    #[test]
    fn test_frame_record_from_json() {
        let raw = r#"{"hands":[{"landmarks":[
            {"x":0.5,"y":0.9,"z":0.0},{"x":0.42,"y":0.82,"z":0.0},
            {"x":0.38,"y":0.76,"z":0.0},{"x":0.33,"y":0.71,"z":0.0},
            {"x":0.28,"y":0.66,"z":0.0},{"x":0.40,"y":0.60,"z":0.0},
            {"x":0.40,"y":0.50,"z":0.0},{"x":0.40,"y":0.42,"z":0.0},
            {"x":0.40,"y":0.35,"z":0.0},{"x":0.48,"y":0.60,"z":0.0},
            {"x":0.48,"y":0.50,"z":0.0},{"x":0.48,"y":0.42,"z":0.0},
            {"x":0.48,"y":0.35,"z":0.0},{"x":0.56,"y":0.60,"z":0.0},
            {"x":0.56,"y":0.50,"z":0.0},{"x":0.56,"y":0.42,"z":0.0},
            {"x":0.56,"y":0.35,"z":0.0},{"x":0.64,"y":0.60,"z":0.0},
            {"x":0.64,"y":0.50,"z":0.0},{"x":0.64,"y":0.42,"z":0.0},
            {"x":0.64,"y":0.35,"z":0.0}
        ],"confidence":0.88,"handedness":"Left"}]}"#;
        let frame: FrameRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(frame.hands.len(), 1);
        assert_eq!(frame.hands[0].landmarks.len(), 21);

        let reports = classify_frame(&frame, &DetectorParams::default());
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].gesture, GestureLabel::Open);
        assert_eq!(reports[0].hand, Some(Hand::Left));
    }

    #[test]
    fn test_hand_report_serializes() {
        let frame = FrameRecord {
            hands: vec![open_hand_record()],
        };
        let reports = classify_frame(&frame, &DetectorParams::default());
        let value = serde_json::to_value(&reports[0]).unwrap();
        assert_eq!(value["gesture"], "open");
        assert_eq!(value["hand"], "right");
        assert_eq!(value["fingers"]["thumb"], true);
        assert_eq!(value["fingers"]["pinky"], true);
    }

    #[test]
    fn test_unknown_handedness_reports_none() {
        let mut record = open_hand_record();
        record.handedness = "Unknown".to_string();
        let frame = FrameRecord {
            hands: vec![record],
        };
        let reports = classify_frame(&frame, &DetectorParams::default());
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].hand, None);
    }
}
