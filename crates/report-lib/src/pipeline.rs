//! The report pipeline
//!
//! Walks every non-excluded namespace in server order, resolves each
//! running pod's scaling metadata and appends one CSV row per pod. The
//! flow is strictly sequential: any cluster query failure aborts the whole
//! run immediately, while missing data is an empty field, never an error.

use crate::progress::Progress;
use crate::query::ClusterQuery;
use crate::report::{ReportRow, ReportWriter};
use crate::resolver::Resolver;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

/// Default report location, relative to the working directory
pub const DEFAULT_REPORT_PATH: &str = "pod_report.csv";

/// Options for one report run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Substrings matched against namespace names; a namespace containing
    /// any of them is skipped without being queried.
    pub exclude_namespaces: Vec<String>,
    /// Where the CSV lands; overwritten on every run
    pub output: PathBuf,
    /// Whether to draw the per-namespace progress counter
    pub progress: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            exclude_namespaces: Vec::new(),
            output: PathBuf::from(DEFAULT_REPORT_PATH),
            progress: true,
        }
    }
}

/// Counts from a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunSummary {
    /// Namespaces reported on
    pub namespaces: usize,
    /// Namespaces skipped by exclusion
    pub skipped: usize,
    /// Rows written, one per running pod
    pub pods: usize,
}

/// Generate the report: one CSV row per running pod across all
/// non-excluded namespaces.
///
/// The report file (and its header) is created before the first cluster
/// query, so even a run that fails immediately leaves a valid, empty
/// report behind.
pub async fn run<Q: ClusterQuery + ?Sized>(query: &Q, options: &RunOptions) -> Result<RunSummary> {
    let mut writer = ReportWriter::create(&options.output)?;
    let mut summary = RunSummary::default();

    let namespaces = query.list_namespaces().await?;

    for ns in &namespaces {
        let namespace = ns.metadata.name.as_str();

        if is_excluded(namespace, &options.exclude_namespaces) {
            info!(namespace, "skipping excluded namespace");
            summary.skipped += 1;
            continue;
        }

        let pods = query.list_running_pods(namespace).await?;
        debug!(namespace, pods = pods.len(), "resolving running pods");

        // One autoscaler listing covers every pod in the namespace
        let autoscalers = if pods.is_empty() {
            Vec::new()
        } else {
            query.list_autoscalers(namespace).await?
        };

        let progress = Progress::start(namespace, pods.len() as u64, options.progress);
        let mut resolver = Resolver::new(query, namespace);

        for pod in &pods {
            let scaling = resolver.resolve(pod, &autoscalers).await?;
            writer.write_row(&ReportRow::new(namespace, pod, &scaling))?;
            summary.pods += 1;
            progress.tick();
        }

        progress.finish();
        summary.namespaces += 1;
    }

    info!(
        pods = summary.pods,
        namespaces = summary.namespaces,
        skipped = summary.skipped,
        "report complete"
    );

    Ok(summary)
}

/// A namespace is excluded when its name contains any non-empty pattern
fn is_excluded(namespace: &str, patterns: &[String]) -> bool {
    patterns
        .iter()
        .any(|p| !p.is_empty() && namespace.contains(p))
}
