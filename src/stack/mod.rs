//! Stack items and the pure functions that produce them.
//!
//! - [`classify`] guesses a [`Category`] from a package name
//! - [`manifest`] turns a dependency manifest into a full replacement stack
//! - [`presets`] prefills manual entries and provides the boot stack

#[macro_use]
pub mod label_enum;

pub mod classify;
pub mod manifest;
pub mod presets;
pub mod types;

pub use classify::classify;
pub use manifest::{looks_like_demo, normalize_version, parse_manifest, ParseError, DEMO_MANIFEST};
pub use presets::{boot_stack, draft_item, find_preset, names_match, Preset};
pub use types::{Category, InstallStatus, ItemPatch, NewItem, StackItem};
