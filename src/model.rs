//! Point-in-time views of cluster resources.
//!
//! The core only needs a handful of fields from pods and services, so
//! Kubernetes objects are flattened into small descriptors when a snapshot is
//! taken.

use k8s_openapi::api::core::v1::{LoadBalancerIngress, Pod, Service};

/// The cluster partition that queries are restricted to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NamespaceScope {
    /// Search every namespace.
    All,
    /// Search a single namespace.
    Namespaced(String),
}

impl From<Option<&str>> for NamespaceScope {
    fn from(namespace: Option<&str>) -> Self {
        match namespace {
            Some(ns) if !ns.is_empty() => Self::Namespaced(ns.to_string()),
            _ => Self::All,
        }
    }
}

/// A running workload, used only for name correlation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PodInfo {
    /// Pod name.
    pub name: String,
    /// Pod namespace.
    pub namespace: String,
}

/// One load balancer ingress point. Values are carried, never interpreted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IngressPoint {
    /// Ingress IP address, if assigned.
    pub ip: Option<String>,
    /// Ingress hostname, if assigned.
    pub hostname: Option<String>,
}

/// A service and the status fields that decide external availability.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceInfo {
    /// Service name.
    pub name: String,
    /// Service namespace.
    pub namespace: String,
    /// `spec.externalIPs`.
    pub external_ips: Vec<String>,
    /// `status.loadBalancer.ingress`.
    pub load_balancer_ingress: Vec<IngressPoint>,
}

impl ServiceInfo {
    /// True if traffic can reach the service from outside the cluster.
    #[must_use]
    pub fn is_externally_available(&self) -> bool {
        !self.external_ips.is_empty() || !self.load_balancer_ingress.is_empty()
    }
}

/// Pods and services read together at one point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClusterSnapshot {
    /// Pods in list order.
    pub pods: Vec<PodInfo>,
    /// Services in list order.
    pub services: Vec<ServiceInfo>,
}

impl From<&Pod> for PodInfo {
    fn from(pod: &Pod) -> Self {
        Self {
            name: pod.metadata.name.clone().unwrap_or_default(),
            namespace: pod.metadata.namespace.clone().unwrap_or_default(),
        }
    }
}

impl From<&LoadBalancerIngress> for IngressPoint {
    fn from(ingress: &LoadBalancerIngress) -> Self {
        Self {
            ip: ingress.ip.clone(),
            hostname: ingress.hostname.clone(),
        }
    }
}

impl From<&Service> for ServiceInfo {
    fn from(svc: &Service) -> Self {
        let external_ips = svc
            .spec
            .as_ref()
            .and_then(|spec| spec.external_ips.clone())
            .unwrap_or_default();

        let load_balancer_ingress = svc
            .status
            .as_ref()
            .and_then(|status| status.load_balancer.as_ref())
            .and_then(|lb| lb.ingress.as_ref())
            .map(|ingress| ingress.iter().map(IngressPoint::from).collect())
            .unwrap_or_default();

        Self {
            name: svc.metadata.name.clone().unwrap_or_default(),
            namespace: svc.metadata.namespace.clone().unwrap_or_default(),
            external_ips,
            load_balancer_ingress,
        }
    }
}

#[cfg(test)]
mod tests {
    use k8s_openapi::api::core::v1::{LoadBalancerStatus, ServiceSpec, ServiceStatus};
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    use super::*;

    fn meta(name: &str, namespace: &str) -> ObjectMeta {
        ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        }
    }

    // NamespaceScope tests

    #[test]
    fn scope_from_none_is_all() {
        assert_eq!(NamespaceScope::from(None), NamespaceScope::All);
    }

    #[test]
    fn scope_from_empty_is_all() {
        assert_eq!(NamespaceScope::from(Some("")), NamespaceScope::All);
    }

    #[test]
    fn scope_from_name_is_namespaced() {
        assert_eq!(
            NamespaceScope::from(Some("prod")),
            NamespaceScope::Namespaced("prod".to_string())
        );
    }

    // Conversion tests

    #[test]
    fn pod_info_from_pod() {
        let pod = Pod {
            metadata: meta("web-7f9c", "prod"),
            ..Default::default()
        };

        let info = PodInfo::from(&pod);
        assert_eq!(info.name, "web-7f9c");
        assert_eq!(info.namespace, "prod");
    }

    #[test]
    fn pod_info_missing_metadata_is_empty() {
        let info = PodInfo::from(&Pod::default());

        assert!(info.name.is_empty());
        assert!(info.namespace.is_empty());
    }

    #[test]
    fn service_info_without_status_is_unavailable() {
        let svc = Service {
            metadata: meta("web-svc", "prod"),
            ..Default::default()
        };

        let info = ServiceInfo::from(&svc);
        assert_eq!(info.name, "web-svc");
        assert!(info.external_ips.is_empty());
        assert!(info.load_balancer_ingress.is_empty());
        assert!(!info.is_externally_available());
    }

    #[test]
    fn service_info_reads_external_ips() {
        let svc = Service {
            metadata: meta("web-svc", "prod"),
            spec: Some(ServiceSpec {
                external_ips: Some(vec!["203.0.113.7".to_string()]),
                ..Default::default()
            }),
            ..Default::default()
        };

        let info = ServiceInfo::from(&svc);
        assert_eq!(info.external_ips, vec!["203.0.113.7"]);
        assert!(info.is_externally_available());
    }

    #[test]
    fn service_info_reads_load_balancer_ingress() {
        let svc = Service {
            metadata: meta("web-svc", "prod"),
            status: Some(ServiceStatus {
                load_balancer: Some(LoadBalancerStatus {
                    ingress: Some(vec![LoadBalancerIngress {
                        hostname: Some("lb.example.com".to_string()),
                        ..Default::default()
                    }]),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        };

        let info = ServiceInfo::from(&svc);
        assert_eq!(
            info.load_balancer_ingress,
            vec![IngressPoint {
                ip: None,
                hostname: Some("lb.example.com".to_string()),
            }]
        );
        assert!(info.is_externally_available());
    }

    #[test]
    fn empty_ingress_list_is_unavailable() {
        let svc = Service {
            metadata: meta("web-svc", "prod"),
            status: Some(ServiceStatus {
                load_balancer: Some(LoadBalancerStatus {
                    ingress: Some(Vec::new()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert!(!ServiceInfo::from(&svc).is_externally_available());
    }

    #[test]
    fn ingress_entry_without_address_still_counts() {
        let info = ServiceInfo {
            load_balancer_ingress: vec![IngressPoint::default()],
            ..Default::default()
        };

        assert!(info.is_externally_available());
    }
}
