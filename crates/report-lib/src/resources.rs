//! Typed views of the cluster objects the report reads
//!
//! Each record models only the fields the pipeline consumes; everything
//! else in the API documents is ignored during decoding. Absent fields are
//! data, not errors, so they decode to `Option` or an empty collection.

use serde::Deserialize;
use std::collections::BTreeMap;

/// The `kind: List` envelope every list query returns
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectList<T> {
    #[serde(default)]
    pub items: Vec<T>,
}

/// Object metadata common to every resource kind
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub owner_references: Vec<OwnerReference>,
}

/// Back-reference naming the controller responsible for an object
#[derive(Debug, Clone, Deserialize)]
pub struct OwnerReference {
    pub kind: String,
    pub name: String,
}

/// Namespace (OpenShift: project) object
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Namespace {
    pub metadata: ObjectMeta,
}

/// Pod object, reduced to the metadata the report reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pod {
    pub metadata: ObjectMeta,
}

impl Pod {
    /// The first-listed owner reference is treated as the pod's controller.
    pub fn controller(&self) -> Option<&OwnerReference> {
        self.metadata.owner_references.first()
    }
}

/// A workload controller: ReplicaSet, ReplicationController, Deployment,
/// DeploymentConfig or StatefulSet. The same shape serves all of them.
#[derive(Debug, Clone, Deserialize)]
pub struct Workload {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: WorkloadSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkloadSpec {
    pub replicas: Option<i32>,
}

/// Horizontal pod autoscaler object
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Autoscaler {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: AutoscalerSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoscalerSpec {
    /// The workload this autoscaler scales
    pub scale_target_ref: Option<ScaleTargetRef>,
    pub min_replicas: Option<i32>,
    pub max_replicas: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScaleTargetRef {
    pub kind: Option<String>,
    pub name: Option<String>,
}
