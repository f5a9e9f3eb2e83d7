//! Gather run: fetch every configured package's manifest, extract its
//! targets, and write the combined list.
//!
//! A package that cannot be fetched is logged and skipped; a manifest without
//! an id contributes no targets. Only writing the output document can fail
//! the run.

use std::path::Path;

use crate::config::GatherConfig;
use crate::error::TargetsError;
use crate::extract::{extract_targets, Target};
use crate::fetcher::{fetch_manifest, DocumentStore};

/// Per-run counters, logged once the run finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GatherSummary {
    /// Packages processed.
    pub packages: usize,
    /// Packages whose manifest was fetched and parsed.
    pub fetched: usize,
    /// Packages skipped because no manifest was found.
    pub skipped: usize,
    /// Targets emitted.
    pub targets: usize,
}

/// Result of a gather run.
#[derive(Debug, Clone, Default)]
pub struct GatherReport {
    /// All targets, in package then interface then port order.
    pub targets: Vec<Target>,
    pub summary: GatherSummary,
}

/// Process every package in `config.packages`, in order.
pub async fn gather<S: DocumentStore>(config: &GatherConfig, store: &S) -> GatherReport {
    let mut report = GatherReport::default();

    for package in &config.packages {
        tracing::info!(package = %package, "processing package");
        report.summary.packages += 1;

        let manifest = match fetch_manifest(store, config, package).await {
            Some(manifest) if !manifest.is_empty() => manifest,
            _ => {
                tracing::warn!(package = %package, "no manifest found");
                report.summary.skipped += 1;
                continue;
            }
        };
        report.summary.fetched += 1;

        let targets = tracing::info_span!("extract", package = %package)
            .in_scope(|| extract_targets(&manifest, &config.domain_suffix));
        tracing::debug!(package = %package, count = targets.len(), "targets extracted");
        report.targets.extend(targets);
    }

    report.summary.targets = report.targets.len();
    report
}

/// Write `targets` to `path` as a pretty-printed JSON array.
pub fn write_targets(path: &Path, targets: &[Target]) -> crate::Result<()> {
    let json =
        serde_json::to_string_pretty(targets).map_err(|e| TargetsError::Serialize(e.to_string()))?;
    std::fs::write(path, json)
        .map_err(|e| TargetsError::Io(path.display().to_string(), e.to_string()))
}

/// Run [`gather`] and write the result to `config.output`.
pub async fn run<S: DocumentStore>(
    config: &GatherConfig,
    store: &S,
) -> crate::Result<GatherSummary> {
    config.validate()?;
    let report = gather(config, store).await;
    write_targets(&config.output, &report.targets)?;
    tracing::info!(
        targets = report.summary.targets,
        packages = report.summary.packages,
        skipped = report.summary.skipped,
        output = %config.output.display(),
        "Discovered {} targets. Saved to {}.",
        report.summary.targets,
        config.output.display()
    );
    Ok(report.summary)
}
