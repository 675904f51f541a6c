//! CSV report output
//!
//! One row per running pod, fixed 10-column schema. The file is created
//! fresh on every run and each row is flushed as soon as it is written, so
//! an interrupted run leaves a valid CSV prefix behind.

use crate::resolver::ScalingInfo;
use crate::resources::Pod;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

/// Header row, in output order
pub const COLUMNS: [&str; 10] = [
    "Namespace/Project",
    "Name of Pod",
    "Name of ReplicaSet/ReplicationController",
    "Name of Deployment/DeploymentConfig",
    "Name of StatefulSet",
    "Replicas",
    "Labels",
    "HPA Name",
    "Min Pods",
    "Max Pods",
];

/// One fully resolved output row. Every field is already rendered to the
/// text that lands in the file; unresolvable data is the empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub namespace: String,
    pub pod: String,
    pub replicaset: String,
    pub deployment: String,
    pub statefulset: String,
    pub replicas: String,
    pub labels: String,
    pub hpa: String,
    pub min_pods: String,
    pub max_pods: String,
}

impl ReportRow {
    pub fn new(namespace: &str, pod: &Pod, info: &ScalingInfo) -> Self {
        let (hpa, min_pods, max_pods) = match &info.autoscaler {
            Some(hpa) => (
                hpa.name.clone(),
                render_count(hpa.min_replicas),
                render_count(hpa.max_replicas),
            ),
            None => Default::default(),
        };

        Self {
            namespace: namespace.to_string(),
            pod: pod.metadata.name.clone(),
            replicaset: info.replicaset.clone().unwrap_or_default(),
            deployment: info
                .deployment
                .as_ref()
                .map(|d| d.name.clone())
                .unwrap_or_default(),
            statefulset: info.statefulset.clone().unwrap_or_default(),
            replicas: render_count(info.replicas),
            labels: render_labels(&pod.metadata.labels),
            hpa,
            min_pods,
            max_pods,
        }
    }

    fn fields(&self) -> [&str; 10] {
        [
            &self.namespace,
            &self.pod,
            &self.replicaset,
            &self.deployment,
            &self.statefulset,
            &self.replicas,
            &self.labels,
            &self.hpa,
            &self.min_pods,
            &self.max_pods,
        ]
    }
}

/// Labels render as sorted `key=value` pairs joined with commas; the CSV
/// writer's default quoting takes care of the embedded commas.
fn render_labels(labels: &BTreeMap<String, String>) -> String {
    labels
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn render_count(count: Option<i32>) -> String {
    count.map(|n| n.to_string()).unwrap_or_default()
}

/// Appends rows to the report file created for this run
pub struct ReportWriter {
    inner: csv::Writer<File>,
}

impl ReportWriter {
    /// Create the report file, truncating any previous run's output, and
    /// write the header row.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("failed to create report file {}", path.display()))?;
        let mut inner = csv::Writer::from_writer(file);
        inner.write_record(COLUMNS).context("failed to write report header")?;
        inner.flush().context("failed to flush report header")?;
        Ok(Self { inner })
    }

    /// Append one row, flushed immediately so every written row is complete
    /// on disk.
    pub fn write_row(&mut self, row: &ReportRow) -> Result<()> {
        self.inner
            .write_record(row.fields())
            .with_context(|| format!("failed to write row for pod {}", row.pod))?;
        self.inner.flush().context("failed to flush report row")?;
        Ok(())
    }
}
