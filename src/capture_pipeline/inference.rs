//! Inference boundary
//!
//! The classifier itself is an external collaborator. This module fixes what
//! crosses the boundary: the intensity tensor going in, signed scores coming out,
//! and how those scores map onto category labels.

mod engine;
pub mod labels;

pub use engine::{Classification, InferenceEngine, ReplayEngine, classify};
pub use labels::{CATEGORY_COUNT, CATEGORY_LABELS, label_for};
