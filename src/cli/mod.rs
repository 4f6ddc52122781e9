pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{AnalyzeArgs, CliArgs, Commands, HealthArgs, IntelArgs, ScanArgs};
pub use output::{AnalysisReport, OutputFormat, OutputFormatter};
