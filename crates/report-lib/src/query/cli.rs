//! Cluster queries backed by the platform command-line client
//!
//! Shells out to `oc`/`kubectl` and decodes the `-o json` output into the
//! typed records in [`crate::resources`]. Authentication and cluster
//! selection are whatever the CLI's current logged-in context provides;
//! this client never touches credentials.

use super::{ClusterQuery, QueryError, QueryResult};
use crate::resources::{Autoscaler, Namespace, ObjectList, Pod, Workload};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Default platform CLI binary
pub const DEFAULT_BIN: &str = "oc";

/// Cluster client that invokes the platform CLI, one fresh process per
/// query. No timeout is applied; a hung CLI hangs the run.
pub struct CliQuery {
    bin: String,
}

impl CliQuery {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    /// `oc` models namespaces as projects; anything else lists namespaces.
    fn namespace_resource(&self) -> &'static str {
        let stem = Path::new(&self.bin)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        if stem == "oc" {
            "project"
        } else {
            "namespace"
        }
    }

    /// Run `<bin> get <args..> -o json` and decode stdout
    async fn get_json<T: DeserializeOwned>(&self, args: &[&str]) -> QueryResult<T> {
        let rendered = format!("{} get {} -o json", self.bin, args.join(" "));
        debug!(command = %rendered, "querying cluster");

        let output = Command::new(&self.bin)
            .arg("get")
            .args(args)
            .args(["-o", "json"])
            .output()
            .await
            .map_err(|source| QueryError::Spawn {
                command: rendered.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(QueryError::CommandFailed {
                command: rendered,
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        serde_json::from_slice(&output.stdout).map_err(|source| QueryError::Malformed {
            command: rendered,
            source,
        })
    }
}

#[async_trait]
impl ClusterQuery for CliQuery {
    async fn list_namespaces(&self) -> QueryResult<Vec<Namespace>> {
        let list: ObjectList<Namespace> = self.get_json(&[self.namespace_resource()]).await?;
        Ok(list.items)
    }

    async fn list_running_pods(&self, namespace: &str) -> QueryResult<Vec<Pod>> {
        let list: ObjectList<Pod> = self
            .get_json(&[
                "pods",
                "-n",
                namespace,
                "--field-selector=status.phase==Running",
            ])
            .await?;
        Ok(list.items)
    }

    async fn get_owner(&self, kind: &str, name: &str, namespace: &str) -> QueryResult<Workload> {
        // Same addressing the CLI accepts interactively: `get replicaset/name`
        let target = format!("{}/{}", kind.to_lowercase(), name);
        self.get_json(&[&target, "-n", namespace]).await
    }

    async fn list_autoscalers(&self, namespace: &str) -> QueryResult<Vec<Autoscaler>> {
        let list: ObjectList<Autoscaler> = self.get_json(&["hpa", "-n", namespace]).await?;
        Ok(list.items)
    }
}
