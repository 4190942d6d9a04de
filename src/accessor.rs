#[cfg(test)]
use mockall::automock;

use std::{collections::BTreeMap, path::Path};

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::{
    api::{Api, ListParams},
    config::{KubeConfigOptions, Kubeconfig},
    Client, Config, ResourceExt,
};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Read access to pods in a cluster
///
/// Namespaces are passed through as-is; defaulting an empty one is the caller's business.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClusterAccessor: Send + Sync {
    /// Fetches a single pod, failing with `Error::PodNotPresent` if it doesn't exist
    async fn get_pod(&self, namespace: &str, name: &str) -> Result<Pod>;
    /// Lists every pod in a namespace
    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>>;
}

/// `ClusterAccessor` backed by the api server
#[derive(Clone)]
pub struct KubeAccessor {
    client: Client,
}

impl KubeAccessor {
    pub fn new(client: Client) -> Self {
        KubeAccessor { client }
    }

    /// Uses whatever `kube` infers: in-cluster config, or `$KUBECONFIG`
    pub async fn try_default() -> Result<Self> {
        let client = Client::try_default()
            .await
            .map_err(|e| Error::configuration(format!("could not create client: {e}")))?;
        Ok(KubeAccessor::new(client))
    }

    /// Builds a client from the current context of the kubeconfig at `path`
    pub async fn from_kubeconfig(path: &Path) -> Result<Self> {
        let kubeconfig = Kubeconfig::read_from(path)
            .map_err(|e| Error::configuration(format!("could not read {}: {e}", path.display())))?;
        let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .map_err(|e| Error::configuration(format!("invalid kubeconfig {}: {e}", path.display())))?;
        let client = Client::try_from(config)
            .map_err(|e| Error::configuration(format!("could not create client: {e}")))?;
        info!("using kubeconfig at {}", path.display());
        Ok(KubeAccessor::new(client))
    }

    fn pods(&self, namespace: &str) -> Api<Pod> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl ClusterAccessor for KubeAccessor {
    async fn get_pod(&self, namespace: &str, name: &str) -> Result<Pod> {
        debug!("{namespace}/{name}: fetching pod");
        match self.pods(namespace).get(name).await {
            Ok(pod) => Ok(pod),
            Err(kube::Error::Api(e)) if e.code == 404 => Err(Error::pod_not_present(namespace, name)),
            Err(err) => {
                warn!("{namespace}/{name}: could not fetch pod: {err}");
                Err(err.into())
            }
        }
    }

    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>> {
        debug!("{namespace}: listing pods");
        match self.pods(namespace).list(&ListParams::default()).await {
            Ok(list) => Ok(list.items),
            Err(err) => {
                warn!("{namespace}: could not list pods: {err}");
                Err(err.into())
            }
        }
    }
}

/// `ClusterAccessor` over a fixed set of pods, for tests
#[derive(Clone, Debug, Default)]
pub struct InMemoryAccessor {
    pods: BTreeMap<(String, String), Pod>,
}

impl InMemoryAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a pod under its own namespace (or `default`) and name, replacing any previous one
    pub fn insert(&mut self, pod: Pod) {
        let namespace = pod.namespace().unwrap_or_else(|| "default".into());
        self.pods.insert((namespace, pod.name_any()), pod);
    }

    pub fn with_pod(mut self, pod: Pod) -> Self {
        self.insert(pod);
        self
    }
}

#[async_trait]
impl ClusterAccessor for InMemoryAccessor {
    async fn get_pod(&self, namespace: &str, name: &str) -> Result<Pod> {
        self.pods
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| Error::pod_not_present(namespace, name))
    }

    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>> {
        Ok(self
            .pods
            .iter()
            .filter(|((ns, _), _)| ns == namespace)
            .map(|(_, pod)| pod.clone())
            .collect())
    }
}
