//! Common utilities module
//!
//! This module contains the error types shared across the capture pipeline.

pub mod error;

pub use error::{CaptureError, ConvertError, InferenceError, InitError, PipelineError, Result};
