//! Per-pod ownership resolution
//!
//! Walks a pod's owner chain at most two hops: pod to ReplicaSet or
//! ReplicationController, then up to Deployment or DeploymentConfig.
//! StatefulSet owners are recorded by name only, with no replica count and
//! no autoscaler lookup. Every pod resolves into a fresh [`ScalingInfo`];
//! nothing carries over between pods.

use crate::query::{ClusterQuery, QueryResult};
use crate::resources::{Autoscaler, Pod, Workload};
use std::collections::HashMap;

/// Owner kinds treated as an intermediate replica controller
const REPLICA_CONTROLLER_KINDS: [&str; 2] = ["ReplicaSet", "ReplicationController"];

/// Scaling metadata resolved for one pod. Unset fields render as empty
/// columns in the report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScalingInfo {
    /// Owning ReplicaSet/ReplicationController name
    pub replicaset: Option<String>,
    /// Owning Deployment/DeploymentConfig, one hop above the replicaset
    pub deployment: Option<WorkloadRef>,
    /// Owning StatefulSet name
    pub statefulset: Option<String>,
    /// Declared replica count on the deployment
    pub replicas: Option<i32>,
    /// Autoscaler bound to the deployment, if any
    pub autoscaler: Option<AutoscalerMatch>,
}

/// Kind + name of a resolved workload
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadRef {
    pub kind: String,
    pub name: String,
}

/// Autoscaler bound to a resolved workload
#[derive(Debug, Clone, PartialEq)]
pub struct AutoscalerMatch {
    pub name: String,
    pub min_replicas: Option<i32>,
    pub max_replicas: Option<i32>,
}

/// Resolves pods within one namespace, memoizing owner fetches so a
/// namespace full of pods behind the same deployment costs two lookups,
/// not two per pod.
pub struct Resolver<'a, Q: ?Sized> {
    query: &'a Q,
    namespace: &'a str,
    owners: HashMap<(String, String), Workload>,
}

impl<'a, Q: ClusterQuery + ?Sized> Resolver<'a, Q> {
    pub fn new(query: &'a Q, namespace: &'a str) -> Self {
        Self {
            query,
            namespace,
            owners: HashMap::new(),
        }
    }

    /// Resolve the scaling metadata for a single pod.
    ///
    /// `autoscalers` is the namespace's autoscaler list; the first one
    /// whose scale target matches the resolved deployment by kind AND name
    /// wins.
    pub async fn resolve(&mut self, pod: &Pod, autoscalers: &[Autoscaler]) -> QueryResult<ScalingInfo> {
        let mut info = ScalingInfo::default();

        let Some(owner) = pod.controller() else {
            return Ok(info);
        };

        if REPLICA_CONTROLLER_KINDS.contains(&owner.kind.as_str()) {
            info.replicaset = Some(owner.name.clone());

            let controller = self.owner(&owner.kind, &owner.name).await?;
            if let Some(parent) = controller.metadata.owner_references.first().cloned() {
                let workload = self.owner(&parent.kind, &parent.name).await?;
                info.replicas = workload.spec.replicas;
                info.deployment = Some(WorkloadRef {
                    kind: parent.kind,
                    name: parent.name,
                });
            }
        } else if owner.kind == "StatefulSet" {
            info.statefulset = Some(owner.name.clone());
        }

        if let Some(target) = &info.deployment {
            info.autoscaler = match_autoscaler(target, autoscalers);
        }

        Ok(info)
    }

    /// Fetch a workload object, memoized by (kind, name) for this namespace
    async fn owner(&mut self, kind: &str, name: &str) -> QueryResult<Workload> {
        let key = (kind.to_string(), name.to_string());
        if let Some(cached) = self.owners.get(&key) {
            return Ok(cached.clone());
        }

        let workload = self.query.get_owner(kind, name, self.namespace).await?;
        self.owners.insert(key, workload.clone());
        Ok(workload)
    }
}

/// First autoscaler whose scale target matches the workload exactly
fn match_autoscaler(target: &WorkloadRef, autoscalers: &[Autoscaler]) -> Option<AutoscalerMatch> {
    autoscalers.iter().find_map(|hpa| {
        let scale_ref = hpa.spec.scale_target_ref.as_ref()?;
        let hit = scale_ref.kind.as_deref() == Some(target.kind.as_str())
            && scale_ref.name.as_deref() == Some(target.name.as_str());
        hit.then(|| AutoscalerMatch {
            name: hpa.metadata.name.clone(),
            min_replicas: hpa.spec.min_replicas,
            max_replicas: hpa.spec.max_replicas,
        })
    })
}
