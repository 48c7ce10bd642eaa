//! Cluster snapshots from the Kubernetes API.
//!
//! The wait loop reads cluster state through [`SnapshotProvider`] so that it
//! can be driven by a real `kube::Client` or by a test double.
//!
//! # How It Works
//!
//! 1. Lists pods and services in the requested namespace, or in all of them
//! 2. Flattens each object into a [`PodInfo`] or [`ServiceInfo`]
//! 3. Returns both lists together as one [`ClusterSnapshot`]
//!
//! Every call performs a fresh list; nothing is cached between polls.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Pod, Service};
use kube::api::ListParams;
use kube::{Api, Client};

#[cfg(test)]
use mockall::automock;

use crate::error::Result;
use crate::model::{ClusterSnapshot, NamespaceScope, PodInfo, ServiceInfo};

/// Read access to the pods and services of a cluster.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Lists pods in the given scope.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Client`] if the cluster cannot be read.
    async fn list_pods(&self, scope: &NamespaceScope) -> Result<Vec<PodInfo>>;

    /// Lists services in the given scope.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Client`] if the cluster cannot be read.
    async fn list_services(&self, scope: &NamespaceScope) -> Result<Vec<ServiceInfo>>;
}

/// Takes a fresh snapshot of pods and services in `scope`.
///
/// Both lists are requested together and belong to the same snapshot.
///
/// # Errors
///
/// Returns the first failure from either list call.
pub async fn take_snapshot<P>(provider: &P, scope: &NamespaceScope) -> Result<ClusterSnapshot>
where
    P: SnapshotProvider + ?Sized,
{
    let (pods, services) =
        futures::try_join!(provider.list_pods(scope), provider.list_services(scope))?;

    tracing::debug!(
        "snapshot of {scope:?}: {} pods, {} services",
        pods.len(),
        services.len()
    );

    Ok(ClusterSnapshot { pods, services })
}

/// [`SnapshotProvider`] backed by a Kubernetes API client.
#[derive(Clone)]
pub struct KubeSnapshotProvider {
    client: Client,
}

impl KubeSnapshotProvider {
    /// Wraps an existing client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a provider from the default in-cluster or kubeconfig settings.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Client`] if no client configuration is usable.
    pub async fn try_default() -> Result<Self> {
        let client = Client::try_default().await?;
        Ok(Self::new(client))
    }

    fn api<K>(&self, scope: &NamespaceScope) -> Api<K>
    where
        K: kube::Resource<Scope = k8s_openapi::NamespaceResourceScope>,
        <K as kube::Resource>::DynamicType: Default,
    {
        match scope {
            NamespaceScope::All => Api::all(self.client.clone()),
            NamespaceScope::Namespaced(ns) => Api::namespaced(self.client.clone(), ns),
        }
    }
}

#[async_trait]
impl SnapshotProvider for KubeSnapshotProvider {
    async fn list_pods(&self, scope: &NamespaceScope) -> Result<Vec<PodInfo>> {
        let pods: Api<Pod> = self.api(scope);
        let list = pods.list(&ListParams::default()).await?;
        Ok(list.items.iter().map(PodInfo::from).collect())
    }

    async fn list_services(&self, scope: &NamespaceScope) -> Result<Vec<ServiceInfo>> {
        let services: Api<Service> = self.api(scope);
        let list = services.list(&ListParams::default()).await?;
        Ok(list.items.iter().map(ServiceInfo::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn pod(name: &str) -> PodInfo {
        PodInfo {
            name: name.to_string(),
            namespace: "prod".to_string(),
        }
    }

    fn service(name: &str) -> ServiceInfo {
        ServiceInfo {
            name: name.to_string(),
            namespace: "prod".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn take_snapshot_combines_lists() {
        let mut provider = MockSnapshotProvider::new();
        provider
            .expect_list_pods()
            .withf(|scope| *scope == NamespaceScope::Namespaced("prod".to_string()))
            .times(1)
            .returning(|_| Ok(vec![pod("web-7f9c"), pod("api-1")]));
        provider
            .expect_list_services()
            .times(1)
            .returning(|_| Ok(vec![service("web-svc")]));

        let scope = NamespaceScope::Namespaced("prod".to_string());
        let snapshot = take_snapshot(&provider, &scope).await.unwrap();

        assert_eq!(snapshot.pods, vec![pod("web-7f9c"), pod("api-1")]);
        assert_eq!(snapshot.services, vec![service("web-svc")]);
    }

    #[tokio::test]
    async fn take_snapshot_empty_cluster() {
        let mut provider = MockSnapshotProvider::new();
        provider.expect_list_pods().returning(|_| Ok(Vec::new()));
        provider.expect_list_services().returning(|_| Ok(Vec::new()));

        let snapshot = take_snapshot(&provider, &NamespaceScope::All).await.unwrap();

        assert_eq!(snapshot, ClusterSnapshot::default());
    }

    #[tokio::test]
    async fn take_snapshot_propagates_client_errors() {
        let mut provider = MockSnapshotProvider::new();
        provider
            .expect_list_pods()
            .returning(|_| Err(Error::client(std::io::Error::other("forbidden"))));
        provider.expect_list_services().returning(|_| Ok(Vec::new()));

        let result = take_snapshot(&provider, &NamespaceScope::All).await;

        assert!(matches!(result, Err(Error::Client { .. })));
    }
}
