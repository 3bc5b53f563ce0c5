pub mod capture_pipeline;
pub mod logger;
