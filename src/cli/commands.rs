use crate::locale::Locale;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Netrunner-themed tracker for a project's technology stack
#[derive(Parser, Debug)]
#[command(
    name = "overseer",
    about = "Netrunner-themed tracker for a project's technology stack",
    version,
    author,
    long_about = "overseer imports a dependency manifest into a typed technology stack, \
                  classifies every component, and asks a text-generation service for a \
                  themed assessment of each one. Without a credential, or when the service \
                  fails, assessments come from a built-in local intel database."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,

    #[arg(
        long,
        global = true,
        value_parser = parse_locale,
        help = "Language for logs and assessments (en-US, zh-CN)"
    )]
    pub locale: Option<Locale>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Import a dependency manifest",
        long_about = "Parses a package.json-style manifest and replaces the stack with its \
                      dependencies and devDependencies.\n\n\
                      Examples:\n  \
                      overseer scan package.json\n  \
                      cat package.json | overseer scan -\n  \
                      overseer scan --demo --format json"
    )]
    Scan(ScanArgs),

    #[command(
        about = "Analyze stack components",
        long_about = "Requests a themed assessment for each named component (or the whole \
                      stack), one at a time, falling back to local intel when the remote \
                      service is unavailable.\n\n\
                      Examples:\n  \
                      overseer analyze\n  \
                      overseer analyze React Docker --offline\n  \
                      overseer analyze --manifest package.json --format json"
    )]
    Analyze(AnalyzeArgs),

    #[command(
        about = "Look up the local intel database",
        long_about = "Prints the offline assessment for a component name, or the \
                      severed-link message when no entry matches.\n\n\
                      Examples:\n  \
                      overseer intel typescript\n  \
                      overseer intel 'Node.js Runtime' --locale en-US"
    )]
    Intel(IntelArgs),

    #[command(
        about = "Show configuration and link status",
        long_about = "Prints the effective configuration and whether a service credential \
                      is available.\n\n\
                      Examples:\n  \
                      overseer health\n  \
                      overseer health --format json"
    )]
    Health(HealthArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ScanArgs {
    #[arg(
        value_name = "FILE",
        conflicts_with = "demo",
        help = "Manifest to import, or '-' for stdin"
    )]
    pub manifest: Option<PathBuf>,

    #[arg(long, help = "Import the built-in simulation manifest")]
    pub demo: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    #[arg(
        value_name = "NAME",
        help = "Components to analyze by name (defaults to the whole stack)"
    )]
    pub names: Vec<String>,

    #[arg(
        short = 'm',
        long,
        value_name = "FILE",
        conflicts_with = "demo",
        help = "Import this manifest first instead of using the boot stack"
    )]
    pub manifest: Option<PathBuf>,

    #[arg(long, help = "Import the built-in simulation manifest first")]
    pub demo: bool,

    #[arg(long, help = "Skip the remote service and use local intel only")]
    pub offline: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct IntelArgs {
    #[arg(value_name = "NAME", help = "Component name to look up")]
    pub name: String,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct HealthArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

fn parse_locale(s: &str) -> Result<Locale, String> {
    s.parse::<Locale>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_default_scan_args() {
        let args = CliArgs::parse_from(["overseer", "scan"]);
        match args.command {
            Commands::Scan(scan) => {
                assert!(scan.manifest.is_none());
                assert!(!scan.demo);
                assert_eq!(scan.format, OutputFormatArg::Human);
            }
            _ => panic!("Expected Scan command"),
        }
        assert!(args.locale.is_none());
    }

    #[test]
    fn test_scan_with_file_and_format() {
        let args = CliArgs::parse_from(["overseer", "scan", "package.json", "-f", "json"]);
        match args.command {
            Commands::Scan(scan) => {
                assert_eq!(scan.manifest, Some(PathBuf::from("package.json")));
                assert_eq!(scan.format, OutputFormatArg::Json);
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn test_scan_file_conflicts_with_demo() {
        let result = CliArgs::try_parse_from(["overseer", "scan", "package.json", "--demo"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_analyze_names_and_offline() {
        let args = CliArgs::parse_from(["overseer", "analyze", "React", "Docker", "--offline"]);
        match args.command {
            Commands::Analyze(analyze) => {
                assert_eq!(analyze.names, vec!["React", "Docker"]);
                assert!(analyze.offline);
                assert!(analyze.manifest.is_none());
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_global_locale_flag() {
        let args = CliArgs::parse_from(["overseer", "intel", "vue", "--locale", "en-us"]);
        assert_eq!(args.locale, Some(Locale::EnUs));
        match args.command {
            Commands::Intel(intel) => assert_eq!(intel.name, "vue"),
            _ => panic!("Expected Intel command"),
        }
    }

    #[test]
    fn test_invalid_locale_rejected() {
        assert!(CliArgs::try_parse_from(["overseer", "health", "--locale", "fr-FR"]).is_err());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(CliArgs::try_parse_from(["overseer", "health", "-v", "-q"]).is_err());
    }
}
