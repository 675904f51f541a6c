//! Running-pod scaling report
//!
//! Library behind the `podrep` CLI. It queries the cluster through the
//! platform command-line client for running pods, resolves each pod's
//! owning workload (ReplicaSet/ReplicationController up to
//! Deployment/DeploymentConfig, or StatefulSet) plus any autoscaler bound
//! to that workload, and writes one CSV row per pod.

pub mod pipeline;
pub mod progress;
pub mod query;
pub mod report;
pub mod resolver;
pub mod resources;

#[cfg(test)]
pub(crate) mod testing;

pub use pipeline::{run, RunOptions, RunSummary, DEFAULT_REPORT_PATH};
pub use progress::Progress;
pub use query::{CliQuery, ClusterQuery, QueryError, DEFAULT_BIN};
