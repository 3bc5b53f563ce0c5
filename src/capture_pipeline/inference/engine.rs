use tracing::debug;

use crate::capture_pipeline::common::error::InferenceError;
use crate::capture_pipeline::convert::{IntensityTensor, TENSOR_LEN};
use crate::capture_pipeline::inference::labels::label_for;

/// Classifier with a fixed input slot.
pub trait InferenceEngine {
    /// Length of the input slot in bytes.
    fn input_len(&self) -> usize {
        TENSOR_LEN
    }

    /// Runs the model on `input` and returns one quantized score per category.
    fn invoke(&mut self, input: &IntensityTensor) -> Result<Vec<i8>, InferenceError>;
}

/// Top category of one inference run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub index: usize,
    pub label: &'static str,
    pub score: i8,
}

/// Arg-max over `scores`; the lowest index wins a tie.
pub fn classify(scores: &[i8]) -> Result<Classification, InferenceError> {
    let (index, &score) = scores
        .iter()
        .enumerate()
        .rev()
        .max_by_key(|&(_, score)| *score)
        .ok_or(InferenceError::EmptyOutput)?;

    Ok(Classification {
        index,
        label: label_for(index),
        score,
    })
}

/// Engine that answers every request with the same scores.
///
/// Stands in for the model on hosts that cannot run it.
#[derive(Debug, Clone)]
pub struct ReplayEngine {
    scores: Vec<i8>,
    invocations: usize,
}

impl ReplayEngine {
    pub fn new(scores: Vec<i8>) -> Self {
        Self {
            scores,
            invocations: 0,
        }
    }

    pub fn invocations(&self) -> usize {
        self.invocations
    }
}

impl InferenceEngine for ReplayEngine {
    fn invoke(&mut self, _input: &IntensityTensor) -> Result<Vec<i8>, InferenceError> {
        self.invocations += 1;
        debug!(invocation = self.invocations, "Replaying scores");
        Ok(self.scores.clone())
    }
}
