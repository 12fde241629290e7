//! Adapters for the external analysis service.

mod http;
mod recording;

pub use http::{AnalysisClientConfig, HttpAnalysisService};
pub use recording::RecordingAnalysisService;
