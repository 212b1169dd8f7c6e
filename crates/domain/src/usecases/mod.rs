//! Application use cases / business logic

pub mod analyze;

pub use analyze::{AnalyzeConfig, AnalyzeError, AnalyzeUseCase};
