//! # kube-scorecard
//!
//! Grades Kubernetes pod templates against a set of container
//! best-practice checks.
//!
//! Each check looks at every container of a template (init containers
//! first, then regular containers) and produces one [`TestScore`]: a
//! discrete [`Grade`] plus comments naming the container that triggered
//! each finding.
//!
//! # Checks
//!
//! - Container resources (CPU/memory limits and requests)
//! - Container image tag (no `:latest`)
//! - Container image pull policy (`Always`)
//! - Pod probes (liveness, plus readiness when a Service targets the pod)
//! - Container security context (privileged, writable root fs, low IDs)
//!
//! # Example
//!
//! ```rust,ignore
//! use kube_scorecard::{ScoreConfig, Scorer};
//! use k8s_openapi::api::core::v1::{PodTemplateSpec, Service};
//!
//! let services: Vec<kube_scorecard::Service> = parsed_services.iter().map(Into::into).collect();
//! let scorer = Scorer::new(&services, &ScoreConfig::default());
//!
//! let template = kube_scorecard::PodTemplate::from(&pod_template_spec);
//! for score in scorer.score(&template) {
//!     println!("{}: {}", score.name, score.grade);
//! }
//! ```

pub mod checks;
pub mod config;
pub mod context;
pub mod convert;
pub mod error;
pub mod extract;
pub mod grade;
pub mod score;
pub mod scorecard;
pub mod selector;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main types and functions
pub use checks::Check;
pub use config::ScoreConfig;
pub use context::{
    Container, NamedTemplate, PodTemplate, PortRef, Probe, PullPolicy, Quantity, ScoreContext,
    SecurityContext, Service,
};
pub use error::ConfigError;
pub use score::{Scorer, score_context};
pub use scorecard::{ScoredObject, Scorecard};
pub use types::{Comment, Findings, Grade, TestScore};
