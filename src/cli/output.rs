//! Terminal rendering for stack, analysis, intel and health results.
//!
//! JSON output uses the same field names as the data model (`isOffline`,
//! `type` on log entries) so it can be fed to other tools unchanged.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;

use crate::analysis::AnalysisResult;
use crate::config::OverseerConfig;
use crate::locale::Locale;
use crate::stack::StackItem;
use crate::store::{LogEntry, LogKind, StackSummary};

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Human,
}

/// One analyzed component as shown to the user
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub item: StackItem,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// Result of a credential and configuration check
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub link: &'static str,
    pub backend: Option<String>,
    pub message: String,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_stack(
        &self,
        items: &[StackItem],
        summary: &StackSummary,
        logs: &[LogEntry],
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let output = json!({
                    "stack": items,
                    "summary": summary,
                    "logs": logs,
                });
                serde_json::to_string_pretty(&output).context("Failed to serialize stack to JSON")
            }
            OutputFormat::Human => Ok(self.format_stack_human(items, summary, logs)),
        }
    }

    pub fn format_analysis(&self, reports: &[AnalysisReport], logs: &[LogEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let output = json!({
                    "results": reports,
                    "logs": logs,
                });
                serde_json::to_string_pretty(&output)
                    .context("Failed to serialize analysis results to JSON")
            }
            OutputFormat::Human => Ok(self.format_analysis_human(reports, logs)),
        }
    }

    pub fn format_intel(&self, name: &str, locale: Locale, result: &AnalysisResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let output = json!({
                    "name": name,
                    "locale": locale,
                    "text": result.text,
                    "isOffline": result.is_offline,
                });
                serde_json::to_string_pretty(&output).context("Failed to serialize intel to JSON")
            }
            OutputFormat::Human => Ok(format!("[{}] {}\n{}\n", locale, name, result.text)),
        }
    }

    pub fn format_health(&self, config: &OverseerConfig, status: &HealthStatus) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let output = json!({
                    "health_status": status,
                    "configuration": config.to_display_map(),
                });
                serde_json::to_string_pretty(&output)
                    .context("Failed to serialize health status to JSON")
            }
            OutputFormat::Human => {
                let mut output = String::new();
                output.push_str("Link Status\n");
                output.push_str(RULE);
                output.push_str("\n\n");

                let symbol = if status.backend.is_some() {
                    "\u{2713}"
                } else {
                    "\u{2717}"
                };
                output.push_str(&format!("{} {}\n", symbol, status.link));
                if let Some(ref backend) = status.backend {
                    output.push_str(&format!("  Backend: {}\n", backend));
                }
                output.push_str(&format!("  Message: {}\n\n", status.message));
                output.push_str(&config.to_string());
                Ok(output)
            }
        }
    }

    fn format_stack_human(
        &self,
        items: &[StackItem],
        summary: &StackSummary,
        logs: &[LogEntry],
    ) -> String {
        let mut output = String::new();

        output.push_str("Technology Stack\n");
        output.push_str(RULE);
        output.push_str("\n\n");

        if items.is_empty() {
            output.push_str("(no components)\n");
        }
        let name_width = items.iter().map(|i| i.name.chars().count()).max().unwrap_or(0);
        for item in items {
            output.push_str(&format!(
                "{:<11} {:<width$}  {:<12} {}\n",
                format!("[{}]", item.status.wire_name()),
                item.name,
                item.version,
                item.category,
                width = name_width
            ));
        }

        output.push_str(&format!(
            "\nTotal: {}  Installed: {}  Integrity: {}%\n",
            summary.total, summary.installed, summary.integrity
        ));

        push_logs(&mut output, logs);
        output
    }

    fn format_analysis_human(&self, reports: &[AnalysisReport], logs: &[LogEntry]) -> String {
        let mut output = String::new();

        output.push_str("Component Analysis\n");
        output.push_str(RULE);
        output.push_str("\n\n");

        if reports.is_empty() {
            output.push_str("(nothing analyzed)\n");
        }
        for report in reports {
            let source = if report.result.is_offline {
                "\u{26A0} local intel"
            } else {
                "\u{2713} uplink"
            };
            output.push_str(&format!(
                "{} {} ({}) [{}]\n",
                report.item.name, report.item.version, report.item.category, source
            ));
            output.push_str(&format!("\u{2514}\u{2500} {}\n\n", report.result.text));
        }

        push_logs(&mut output, logs);
        output
    }
}

fn push_logs(output: &mut String, logs: &[LogEntry]) {
    if logs.is_empty() {
        return;
    }

    output.push_str("\nSystem Log\n");
    output.push_str(RULE);
    output.push('\n');
    for entry in logs {
        let marker = match entry.kind {
            LogKind::Error => "ERR",
            LogKind::Warning => "WRN",
            LogKind::System => "SYS",
            LogKind::Info => "INF",
        };
        output.push_str(&format!("{} {} {}\n", entry.timestamp, marker, entry.message));
    }
}
