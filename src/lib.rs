//! handsign — hand gesture classification from 21-point hand landmarks.
//!
//! Consumes the per-frame landmark stream of an external hand-pose
//! estimator and classifies each detected hand as an open palm, a fist,
//! or other. Classification is stateless: every call judges a single
//! frame's landmarks with no history and no smoothing.

pub mod estimator;
pub mod geometry;
pub mod gesture;
pub mod landmarks;

pub use estimator::{classify_frame, DetectorParams, FrameRecord, HandRecord, HandReport};
pub use gesture::{classify, finger_states, Finger, FingerState, GestureLabel};
pub use landmarks::{
    Hand, HandLandmark, HandLandmarks, InvalidLandmarks, LandmarkPoint, HAND_CONNECTIONS,
    LANDMARK_COUNT,
};
