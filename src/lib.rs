//! Tailrelay target discovery for StartOS packages.
//! Fetches each known package's manifest from its wrapper repository, reads the
//! LAN port configuration of every interface, and emits the proxy/relay
//! targets Tailrelay can expose.

pub mod config;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod gather;
pub mod manifest;
pub mod packages;

pub use config::GatherConfig;
pub use error::{Result, TargetsError};
pub use extract::{extract_targets, Target, TargetKind, TargetProtocol};
pub use fetcher::{candidate_urls, fetch_manifest, DocumentStore, HttpStore};
pub use gather::{gather, run, write_targets, GatherReport, GatherSummary};
pub use manifest::{Interface, Manifest, PortConfig, PortEntry};
pub use packages::DEFAULT_PACKAGES;
