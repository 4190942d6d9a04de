use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::Pod;
use serde::Serialize;
use tracing::debug;

use crate::{
    accessor::ClusterAccessor,
    container::ContainersExt,
    error::{Error, Result},
    pod::PodStatusExt,
};

/// Namespace used when the caller doesn't give one
pub const DEFAULT_NAMESPACE: &str = "default";

/// Every projection of a single pod, from a single fetch
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSummary {
    pub namespace: String,
    pub name: String,
    pub phase: String,
    pub running: bool,
    pub ready: bool,
    pub status: String,
    pub condition_reason: String,
    pub pod_reason: String,
    pub start_time: String,
    pub containers_ready: bool,
    pub container_statuses: BTreeMap<String, String>,
}

/// Point-in-time pod status queries
///
/// Every call fetches the pod again; nothing is cached between calls.
pub struct PodQuery<A> {
    accessor: A,
}

impl<A: ClusterAccessor> PodQuery<A> {
    pub fn new(accessor: A) -> Self {
        PodQuery { accessor }
    }

    pub fn builder() -> PodQueryBuilder<A> {
        PodQueryBuilder { accessor: None }
    }

    /// Number of pods in a namespace
    pub async fn count_pods(&self, namespace: &str) -> Result<usize> {
        let namespace = namespace_or_default(namespace);
        let pods = self.accessor.list_pods(namespace).await?;
        debug!("{namespace}: found {} pods", pods.len());
        Ok(pods.len())
    }

    pub async fn is_running(&self, namespace: &str, pod_name: &str) -> Result<bool> {
        Ok(self.fetch(namespace, pod_name).await?.is_running())
    }

    pub async fn is_ready(&self, namespace: &str, pod_name: &str) -> Result<bool> {
        Ok(self.fetch(namespace, pod_name).await?.is_ready())
    }

    /// The raw phase string, e.g. `Running`
    pub async fn get_phase(&self, namespace: &str, pod_name: &str) -> Result<String> {
        Ok(self.fetch(namespace, pod_name).await?.raw_phase())
    }

    /// Type of the condition the pod most recently transitioned into, or an empty string
    pub async fn get_status(&self, namespace: &str, pod_name: &str) -> Result<String> {
        Ok(self.fetch(namespace, pod_name).await?.current_condition().type_)
    }

    /// `reason-message` of the current condition, or an empty string
    pub async fn get_condition_reason(&self, namespace: &str, pod_name: &str) -> Result<String> {
        Ok(self.fetch(namespace, pod_name).await?.current_condition().reason)
    }

    /// `reason-message` from the pod status itself
    pub async fn get_pod_reason(&self, namespace: &str, pod_name: &str) -> Result<String> {
        Ok(self.fetch(namespace, pod_name).await?.pod_reason())
    }

    pub async fn get_start_time(&self, namespace: &str, pod_name: &str) -> Result<String> {
        Ok(self.fetch(namespace, pod_name).await?.start_time())
    }

    pub async fn are_containers_ready(&self, namespace: &str, pod_name: &str) -> Result<bool> {
        Ok(self.fetch(namespace, pod_name).await?.containers_ready())
    }

    /// Readiness per container image. Containers sharing an image share an entry.
    pub async fn get_container_ready_statuses(
        &self,
        namespace: &str,
        pod_name: &str,
    ) -> Result<BTreeMap<String, String>> {
        Ok(self.fetch(namespace, pod_name).await?.container_ready_statuses())
    }

    pub async fn summary(&self, namespace: &str, pod_name: &str) -> Result<PodSummary> {
        let pod = self.fetch(namespace, pod_name).await?;
        let current = pod.current_condition();
        Ok(PodSummary {
            namespace: namespace_or_default(namespace).into(),
            name: pod_name.into(),
            phase: pod.raw_phase(),
            running: pod.is_running(),
            ready: pod.is_ready(),
            status: current.type_,
            condition_reason: current.reason,
            pod_reason: pod.pod_reason(),
            start_time: pod.start_time(),
            containers_ready: pod.containers_ready(),
            container_statuses: pod.container_ready_statuses(),
        })
    }

    async fn fetch(&self, namespace: &str, pod_name: &str) -> Result<Pod> {
        let namespace = namespace_or_default(namespace);
        debug!("{namespace}/{pod_name}: querying");
        self.accessor.get_pod(namespace, pod_name).await
    }
}

/// Collects an accessor that isn't available at construction time
pub struct PodQueryBuilder<A> {
    accessor: Option<A>,
}

impl<A: ClusterAccessor> PodQueryBuilder<A> {
    pub fn accessor(mut self, accessor: A) -> Self {
        self.accessor = Some(accessor);
        self
    }

    pub fn build(self) -> Result<PodQuery<A>> {
        match self.accessor {
            Some(accessor) => Ok(PodQuery::new(accessor)),
            None => Err(Error::configuration("no cluster accessor set")),
        }
    }
}

pub fn namespace_or_default(namespace: &str) -> &str {
    if namespace.is_empty() {
        DEFAULT_NAMESPACE
    } else {
        namespace
    }
}
