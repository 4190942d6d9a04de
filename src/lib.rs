//! Point-in-time pod status queries against a Kubernetes cluster
//!
//! Build a [`PodQuery`] around a [`ClusterAccessor`] (the api server through [`KubeAccessor`],
//! or an [`InMemoryAccessor`] in tests) and ask it about phase, readiness, the current
//! condition, start time and container readiness of a pod.

pub mod accessor;
pub mod conditions;
pub mod config;
pub mod container;
pub mod error;
pub mod pod;
pub mod query;

pub use accessor::{ClusterAccessor, InMemoryAccessor, KubeAccessor};
pub use conditions::{current_condition, CurrentCondition};
pub use container::ContainersExt;
pub use error::{Error, Result};
pub use pod::{PodPhase, PodStatusExt, ZERO_TIME};
pub use query::{PodQuery, PodQueryBuilder, PodSummary, DEFAULT_NAMESPACE};
