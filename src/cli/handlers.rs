//! Subcommand handlers. Each returns the process exit code.

use anyhow::{anyhow, bail, Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use super::commands::{AnalyzeArgs, HealthArgs, IntelArgs, OutputFormatArg, ScanArgs};
use super::output::{AnalysisReport, HealthStatus, OutputFormat, OutputFormatter};
use crate::analysis::{AnalysisResult, Analyzer, RemoteAnalyst};
use crate::config::OverseerConfig;
use crate::intel;
use crate::llm::select_llm_client;
use crate::session::Session;
use crate::stack::DEMO_MANIFEST;
use crate::store::StackStore;

/// Manifest read when `scan` gets neither a file nor `--demo`
pub const DEFAULT_MANIFEST: &str = "package.json";

const STDIN_MARKER: &str = "-";

pub async fn handle_scan(args: &ScanArgs, config: &OverseerConfig) -> i32 {
    exit_code(run_scan(args, config))
}

pub async fn handle_analyze(args: &AnalyzeArgs, config: &OverseerConfig) -> i32 {
    exit_code(run_analyze(args, config).await)
}

pub async fn handle_intel(args: &IntelArgs, config: &OverseerConfig) -> i32 {
    exit_code(run_intel(args, config))
}

pub async fn handle_health(args: &HealthArgs, config: &OverseerConfig) -> i32 {
    exit_code(run_health(args, config))
}

fn exit_code(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

fn formatter(format: OutputFormatArg) -> OutputFormatter {
    OutputFormatter::new(OutputFormat::from(format))
}

/// Reads manifest text from a file, or from stdin for `-`.
pub fn read_manifest(path: &Path) -> Result<String> {
    if path == Path::new(STDIN_MARKER) {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read manifest from stdin")?;
        return Ok(raw);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))
}

fn manifest_source(file: Option<&PathBuf>, demo: bool) -> Result<Option<String>> {
    if demo {
        return Ok(Some(DEMO_MANIFEST.to_string()));
    }
    file.map(|path| read_manifest(path)).transpose()
}

fn run_scan(args: &ScanArgs, config: &OverseerConfig) -> Result<()> {
    let raw = match manifest_source(args.manifest.as_ref(), args.demo)? {
        Some(raw) => raw,
        None => read_manifest(Path::new(DEFAULT_MANIFEST))?,
    };

    let mut store = StackStore::boot(config.locale);
    let imported = store.import_manifest(&raw);

    let logs = store.logs().to_vec();
    let output = formatter(args.format).format_stack(store.items(), &store.summary(), &logs)?;
    println!("{}", output);

    let count = imported.context("Manifest import failed")?;
    info!(components = count, "Manifest imported");
    Ok(())
}

async fn run_analyze(args: &AnalyzeArgs, config: &OverseerConfig) -> Result<()> {
    let mut store = StackStore::boot(config.locale);
    if let Some(raw) = manifest_source(args.manifest.as_ref(), args.demo)? {
        store
            .import_manifest(&raw)
            .context("Manifest import failed")?;
    }

    let targets = resolve_targets(&store, &args.names)?;
    let session = Session::new(store, build_analyzer(config, args.offline));

    let mut reports = Vec::with_capacity(targets.len());
    for id in &targets {
        let Some(result) = session.analyze_item(id).await else {
            debug!(item = %id, "Analysis gate busy, skipping");
            continue;
        };
        let item = session
            .with_store(|store| store.item(id).cloned())
            .ok_or_else(|| anyhow!("Component {} disappeared during analysis", id))?;
        reports.push(AnalysisReport { item, result });
    }

    let output = formatter(args.format).format_analysis(&reports, &session.logs())?;
    println!("{}", output);
    Ok(())
}

fn resolve_targets(store: &StackStore, names: &[String]) -> Result<Vec<String>> {
    if names.is_empty() {
        return Ok(store.items().iter().map(|i| i.id.clone()).collect());
    }

    names
        .iter()
        .map(|name| match store.find_by_name(name) {
            Some(item) => Ok(item.id.clone()),
            None => bail!("Unknown component '{}'. Not present in the current stack", name),
        })
        .collect()
}

fn build_analyzer(config: &OverseerConfig, offline: bool) -> Analyzer {
    if offline {
        info!("Offline mode, remote link disabled");
        return Analyzer::offline();
    }

    match select_llm_client(config) {
        Some(selected) => {
            debug!(backend = %selected.description, "Remote link configured");
            Analyzer::new(RemoteAnalyst::new(Some(selected.client)))
        }
        None => Analyzer::offline(),
    }
}

fn run_intel(args: &IntelArgs, config: &OverseerConfig) -> Result<()> {
    let locale = config.locale;
    let result = match intel::lookup_offline(&args.name, locale) {
        Some(text) => AnalysisResult::offline(text),
        None => AnalysisResult::offline(locale.catalog().severed_link),
    };

    let output = formatter(args.format).format_intel(&args.name, locale, &result)?;
    print!("{}", output);
    Ok(())
}

fn run_health(args: &HealthArgs, config: &OverseerConfig) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    let status = match select_llm_client(config) {
        Some(selected) => HealthStatus {
            link: "Remote link configured",
            backend: Some(selected.description),
            message: "Assessments are requested from the remote service".to_string(),
        },
        None => HealthStatus {
            link: "Remote link unconfigured",
            backend: None,
            message: "No credential found; assessments come from local intel".to_string(),
        },
    };

    let output = formatter(args.format).format_health(config, &status)?;
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn manifest_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_manifest_from_file() {
        let file = manifest_file(r#"{"dependencies": {"express": "^4.18.2"}}"#);
        let raw = read_manifest(file.path()).unwrap();
        assert!(raw.contains("express"));
    }

    #[test]
    fn test_read_manifest_missing_file() {
        let err = read_manifest(Path::new("/definitely/not/here/package.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read manifest"));
    }

    #[test]
    fn test_demo_takes_precedence() {
        let raw = manifest_source(None, true).unwrap().unwrap();
        assert_eq!(raw, DEMO_MANIFEST);
        assert!(manifest_source(None, false).unwrap().is_none());
    }

    #[test]
    fn test_resolve_targets() {
        let store = StackStore::boot(Locale::EnUs);

        assert_eq!(resolve_targets(&store, &[]).unwrap().len(), 4);

        let ids = resolve_targets(&store, &["docker".to_string(), "REACT".to_string()]).unwrap();
        assert_eq!(ids, vec![store.items()[3].id.clone(), store.items()[1].id.clone()]);

        assert!(resolve_targets(&store, &["Kubernetes".to_string()]).is_err());
    }

    #[test]
    fn test_offline_flag_skips_client() {
        let analyzer = build_analyzer(&OverseerConfig::default(), true);
        assert!(!analyzer.remote().is_configured());
    }

    #[test]
    fn test_scan_rejects_empty_manifest() {
        let file = manifest_file(r#"{"name": "empty"}"#);
        let args = ScanArgs {
            manifest: Some(file.path().to_path_buf()),
            demo: false,
            format: OutputFormatArg::Json,
        };

        assert!(run_scan(&args, &OverseerConfig::default()).is_err());
    }

    #[test]
    fn test_scan_imports_file() {
        let file = manifest_file(r#"{"dependencies": {"react": "^18.3.0"}}"#);
        let args = ScanArgs {
            manifest: Some(file.path().to_path_buf()),
            demo: false,
            format: OutputFormatArg::Json,
        };

        assert_eq!(exit_code(run_scan(&args, &OverseerConfig::default())), 0);
    }

    #[test]
    fn test_intel_lookup_succeeds_for_unknown_names() {
        let args = IntelArgs {
            name: "Kubernetes".to_string(),
            format: OutputFormatArg::Json,
        };
        assert!(run_intel(&args, &OverseerConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_analyze_offline_named() {
        let args = AnalyzeArgs {
            names: vec!["React".to_string()],
            manifest: None,
            demo: false,
            offline: true,
            format: OutputFormatArg::Json,
        };

        assert_eq!(handle_analyze(&args, &OverseerConfig::default()).await, 0);
    }

    #[tokio::test]
    async fn test_analyze_unknown_name_fails() {
        let args = AnalyzeArgs {
            names: vec!["Kubernetes".to_string()],
            manifest: None,
            demo: false,
            offline: true,
            format: OutputFormatArg::Human,
        };

        assert_eq!(handle_analyze(&args, &OverseerConfig::default()).await, 1);
    }
}
