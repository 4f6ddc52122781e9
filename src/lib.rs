//! overseer - themed technology stack tracker
//!
//! Tracks a list of stack items (name, version, category, install status),
//! imports them in bulk from a package.json-style manifest, and attaches a
//! themed flavor description to each item. Descriptions come from a remote
//! text-generation service when one is configured and from a built-in
//! knowledge base otherwise.
//!
//! # Core Concepts
//!
//! - **Stack item**: one tracked technology, see [`StackItem`]
//! - **Manifest import**: a full replacement of the stack from a dependency
//!   manifest, see [`stack::parse_manifest`]
//! - **Offline fallback**: the local intel path used whenever the remote link
//!   is unconfigured or fails, see [`Analyzer`]
//! - **Single-flight**: at most one analysis runs at a time across the whole
//!   stack, enforced by [`StackStore::begin_analysis`]
//!
//! # Example Usage
//!
//! ```no_run
//! use overseer::{Analyzer, Locale, Session, StackStore};
//!
//! # async fn run() {
//! let session = Session::new(StackStore::boot(Locale::EnUs), Analyzer::offline());
//! session
//!     .import_manifest(r#"{"dependencies": {"react": "^18.3.0"}}"#)
//!     .unwrap();
//!
//! for (item, result) in session.analyze_all().await {
//!     println!("{}: {} (offline: {})", item.name, result.text, result.is_offline);
//! }
//! # }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod intel;
pub mod llm;
pub mod locale;
pub mod session;
pub mod stack;
pub mod store;
pub mod util;

pub use analysis::{AnalysisResult, Analyzer, RemoteAnalyst, RemoteError};
pub use config::{ConfigError, OverseerConfig};
pub use llm::{BackendError, LLMClient};
pub use locale::{Catalog, Locale};
pub use session::Session;
pub use stack::{Category, InstallStatus, ItemPatch, NewItem, ParseError, StackItem};
pub use store::{LogEntry, LogKind, StackStore, StackSummary, StoreError};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_overseer() {
        assert_eq!(NAME, "overseer");
    }
}
