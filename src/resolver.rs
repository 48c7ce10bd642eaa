//! Decides which requested services are externally reachable in a snapshot.
//!
//! Matching is a loose name heuristic, not a key lookup:
//!
//! 1. A pod belongs to a requested name if the pod name contains it
//! 2. For each such pod, the first service (in list order) whose name contains
//!    the [`ServiceMatch`] key is taken
//! 3. The requested name is available if that service has external IPs or
//!    load balancer ingress
//!
//! When several services match, whichever comes first in the snapshot wins.

use std::collections::BTreeSet;

use crate::model::{ClusterSnapshot, PodInfo, ServiceInfo};

/// Computes the subset of names that are externally available.
pub trait Resolver: Send + Sync {
    /// Returns the names from `unsatisfied` that are available in `snapshot`.
    ///
    /// Implementations must never return a name that is not in `unsatisfied`.
    fn resolve(&self, unsatisfied: &[String], snapshot: &ClusterSnapshot) -> BTreeSet<String>;
}

/// Which string a service name must contain to back a matched pod.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ServiceMatch {
    /// The requested service name (`web` matches service `web-svc`).
    #[default]
    RequestedName,
    /// The full name of the matched pod (`web-7f9c` matches `web-7f9c-lb`).
    PodName,
}

/// Default resolver: substring matching from names to pods to services.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NameMatchResolver {
    service_match: ServiceMatch,
}

impl NameMatchResolver {
    /// Creates a resolver using the given service matching rule.
    #[must_use]
    pub fn new(service_match: ServiceMatch) -> Self {
        Self { service_match }
    }

    fn service_for<'a>(
        &self,
        requested: &str,
        pod: &PodInfo,
        services: &'a [ServiceInfo],
    ) -> Option<&'a ServiceInfo> {
        let key = match self.service_match {
            ServiceMatch::RequestedName => requested,
            ServiceMatch::PodName => pod.name.as_str(),
        };

        services.iter().find(|svc| svc.name.contains(key))
    }
}

impl Resolver for NameMatchResolver {
    fn resolve(&self, unsatisfied: &[String], snapshot: &ClusterSnapshot) -> BTreeSet<String> {
        let mut available = BTreeSet::new();

        for pod in &snapshot.pods {
            for name in unsatisfied {
                if available.contains(name) || !pod.name.contains(name.as_str()) {
                    continue;
                }

                match self.service_for(name, pod, &snapshot.services) {
                    Some(svc) if is_externally_available(svc) => {
                        tracing::debug!(
                            "{name}: pod {}/{} backed by available service {}/{}",
                            pod.namespace,
                            pod.name,
                            svc.namespace,
                            svc.name
                        );
                        available.insert(name.clone());
                    }

                    Some(svc) => {
                        tracing::debug!(
                            "{name}: service {}/{} has no external address yet",
                            svc.namespace,
                            svc.name
                        );
                    }

                    None => {
                        tracing::debug!("{name}: no service found for pod {}", pod.name);
                    }
                }
            }
        }

        available
    }
}

/// True if the service has external IPs or load balancer ingress.
#[must_use]
pub fn is_externally_available(service: &ServiceInfo) -> bool {
    service.is_externally_available()
}
