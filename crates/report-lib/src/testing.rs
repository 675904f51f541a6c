//! Shared in-memory cluster mock for unit tests
//!
//! [`MockCluster`] serves canned objects through [`ClusterQuery`] and logs
//! every call, so tests can assert both what a scenario resolves to and
//! which queries it issued to get there.

use crate::query::{async_trait, ClusterQuery, QueryError, QueryResult};
use crate::resources::{
    Autoscaler, AutoscalerSpec, Namespace, ObjectMeta, OwnerReference, Pod, ScaleTargetRef,
    Workload, WorkloadSpec,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// In-memory stand-in for the cluster CLI
#[derive(Default)]
pub struct MockCluster {
    namespaces: Vec<String>,
    pods: HashMap<String, Vec<Pod>>,
    owners: HashMap<(String, String, String), Workload>,
    autoscalers: HashMap<String, Vec<Autoscaler>>,
    failing_pod_namespaces: HashSet<String>,
    pub calls: Mutex<CallLog>,
}

/// Record of every query the mock served
#[derive(Debug, Default)]
pub struct CallLog {
    pub namespaces: usize,
    pub pods: Vec<String>,
    /// (namespace, kind, name) per owner fetch
    pub owners: Vec<(String, String, String)>,
    pub autoscalers: Vec<String>,
}

impl MockCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(mut self, name: &str) -> Self {
        self.namespaces.push(name.to_string());
        self
    }

    pub fn with_pod(mut self, namespace: &str, pod: Pod) -> Self {
        self.pods.entry(namespace.to_string()).or_default().push(pod);
        self
    }

    /// Register a fetchable workload object, optionally owned by `parent`
    pub fn with_owner(
        mut self,
        namespace: &str,
        kind: &str,
        name: &str,
        parent: Option<(&str, &str)>,
        replicas: Option<i32>,
    ) -> Self {
        let key = (namespace.to_string(), kind.to_string(), name.to_string());
        self.owners.insert(key, workload(name, parent, replicas));
        self
    }

    pub fn with_autoscaler(mut self, namespace: &str, autoscaler: Autoscaler) -> Self {
        self.autoscalers
            .entry(namespace.to_string())
            .or_default()
            .push(autoscaler);
        self
    }

    /// Make pod listings in `namespace` fail, as a broken CLI call would
    pub fn fail_pods_in(mut self, namespace: &str) -> Self {
        self.failing_pod_namespaces.insert(namespace.to_string());
        self
    }
}

fn not_found(target: &str, namespace: &str) -> QueryError {
    QueryError::CommandFailed {
        command: format!("mock get {target} -n {namespace} -o json"),
        code: 1,
        stderr: format!("Error from server (NotFound): \"{target}\" not found"),
    }
}

#[async_trait]
impl ClusterQuery for MockCluster {
    async fn list_namespaces(&self) -> QueryResult<Vec<Namespace>> {
        self.calls.lock().unwrap().namespaces += 1;
        Ok(self
            .namespaces
            .iter()
            .map(|name| Namespace {
                metadata: ObjectMeta {
                    name: name.clone(),
                    ..ObjectMeta::default()
                },
            })
            .collect())
    }

    async fn list_running_pods(&self, namespace: &str) -> QueryResult<Vec<Pod>> {
        self.calls.lock().unwrap().pods.push(namespace.to_string());
        if self.failing_pod_namespaces.contains(namespace) {
            return Err(not_found("pods", namespace));
        }
        Ok(self.pods.get(namespace).cloned().unwrap_or_default())
    }

    async fn get_owner(&self, kind: &str, name: &str, namespace: &str) -> QueryResult<Workload> {
        self.calls.lock().unwrap().owners.push((
            namespace.to_string(),
            kind.to_string(),
            name.to_string(),
        ));
        let key = (namespace.to_string(), kind.to_string(), name.to_string());
        self.owners
            .get(&key)
            .cloned()
            .ok_or_else(|| not_found(&format!("{}/{}", kind.to_lowercase(), name), namespace))
    }

    async fn list_autoscalers(&self, namespace: &str) -> QueryResult<Vec<Autoscaler>> {
        self.calls.lock().unwrap().autoscalers.push(namespace.to_string());
        Ok(self.autoscalers.get(namespace).cloned().unwrap_or_default())
    }
}

/// Pod fixture with an optional (kind, name) controller and labels
pub fn pod(name: &str, owner: Option<(&str, &str)>, labels: &[(&str, &str)]) -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: name.to_string(),
            labels: labels
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            owner_references: owner_refs(owner),
        },
    }
}

/// Workload fixture with an optional (kind, name) parent
pub fn workload(name: &str, parent: Option<(&str, &str)>, replicas: Option<i32>) -> Workload {
    Workload {
        metadata: ObjectMeta {
            name: name.to_string(),
            owner_references: owner_refs(parent),
            ..ObjectMeta::default()
        },
        spec: WorkloadSpec { replicas },
    }
}

/// Autoscaler fixture targeting (kind, name)
pub fn autoscaler(
    name: &str,
    target: (&str, &str),
    min_replicas: Option<i32>,
    max_replicas: Option<i32>,
) -> Autoscaler {
    Autoscaler {
        metadata: ObjectMeta {
            name: name.to_string(),
            ..ObjectMeta::default()
        },
        spec: AutoscalerSpec {
            scale_target_ref: Some(ScaleTargetRef {
                kind: Some(target.0.to_string()),
                name: Some(target.1.to_string()),
            }),
            min_replicas,
            max_replicas,
        },
    }
}

fn owner_refs(owner: Option<(&str, &str)>) -> Vec<OwnerReference> {
    owner
        .map(|(kind, name)| {
            vec![OwnerReference {
                kind: kind.to_string(),
                name: name.to_string(),
            }]
        })
        .unwrap_or_default()
}
