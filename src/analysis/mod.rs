//! Flavor-text analysis: the remote analyst and the fallback orchestrator.

pub mod orchestrator;
pub mod remote;

pub use orchestrator::{status_text, AnalysisResult, Analyzer};
pub use remote::{build_prompt, RemoteAnalyst, RemoteError};
