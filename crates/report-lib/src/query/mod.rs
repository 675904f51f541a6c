//! Read-only queries against the cluster control plane
//!
//! The [`ClusterQuery`] trait covers the four lookups the report needs, so
//! the pipeline can run against the real CLI-backed client or an in-memory
//! mock. Every operation maps to exactly one external call; any failure is
//! fatal to the run that issued it.

mod cli;


pub use cli::{CliQuery, DEFAULT_BIN};

use crate::resources::{Autoscaler, Namespace, Pod, Workload};
use thiserror::Error;

pub use async_trait::async_trait;

/// Error from a single cluster query
#[derive(Debug, Error)]
pub enum QueryError {
    /// The external command could not be started at all
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The external command ran but exited non-zero. "Not found" and
    /// transient failures both land here; neither is recoverable.
    #[error("`{command}` exited with code {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    /// The command succeeded but its output was not the expected document
    #[error("malformed response from `{command}`: {source}")]
    Malformed {
        command: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type QueryResult<T> = Result<T, QueryError>;

/// Read-only view of the cluster used by the report pipeline
#[async_trait]
pub trait ClusterQuery: Send + Sync {
    /// List every namespace/project object, in server order
    async fn list_namespaces(&self) -> QueryResult<Vec<Namespace>>;

    /// List the namespace's pods currently in the Running phase
    async fn list_running_pods(&self, namespace: &str) -> QueryResult<Vec<Pod>>;

    /// Fetch a single workload object by kind and name
    async fn get_owner(&self, kind: &str, name: &str, namespace: &str) -> QueryResult<Workload>;

    /// List the namespace's horizontal pod autoscalers
    async fn list_autoscalers(&self, namespace: &str) -> QueryResult<Vec<Autoscaler>>;
}
