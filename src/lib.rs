#![cfg_attr(not(test), deny(missing_docs))]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Wait for Kubernetes services to become reachable from outside the cluster.
//!
//! Deployment tooling often has to hold off until a cloud load balancer or
//! external IP has been provisioned for a set of services. This crate polls
//! the cluster until every requested service has either `spec.externalIPs` or
//! `status.loadBalancer.ingress`, or gives up after a timeout.
//!
//! # Matching
//!
//! - A requested name matches any pod whose name contains it
//! - For a matched pod, the first service whose name contains the requested
//!   name decides availability (see [`ServiceMatch`] for the alternative)
//! - Once a name is satisfied it stays satisfied for the rest of the wait
//!
//! # Usage
//!
//! ```ignore
//! use std::time::Duration;
//! use external_ip_wait::{wait, WaitConfig};
//!
//! let config = WaitConfig::new(["configuration", "gateway"])
//!     .namespace("prod")
//!     .timeout(Duration::from_secs(300))
//!     .poll_interval(Duration::from_secs(5));
//!
//! wait(config).await?;
//! ```

mod config;
mod error;
mod k8s;
mod model;
mod resolver;
mod state;
mod tracker;

pub use config::{DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, WaitConfig};
pub use error::{BoxError, Error, Result};
pub use k8s::{KubeSnapshotProvider, SnapshotProvider, take_snapshot};
pub use model::{ClusterSnapshot, IngressPoint, NamespaceScope, PodInfo, ServiceInfo};
pub use resolver::{NameMatchResolver, Resolver, ServiceMatch, is_externally_available};
pub use state::CompletionState;
pub use tracker::{wait, wait_with};
