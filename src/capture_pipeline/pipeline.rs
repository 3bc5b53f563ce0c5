//! Pipeline orchestration module
//!
//! Ties the capture session, the converter and the inference engine together.

mod inference_pipeline;
mod timing;


pub use inference_pipeline::InferencePipeline;
pub use timing::{PipelineTimings, StepTiming};
