//! Pod template checks.
//!
//! Each check inspects every container of a template (init containers
//! first) and produces one [`TestScore`]. Checks do not share state and can
//! run in any order or in parallel.

pub mod imagetag;
pub mod probes;
pub mod pullpolicy;
pub mod resources;
pub mod securitycontext;

pub use imagetag::{ContainerImageTagCheck, score_container_image_tag};
pub use probes::PodProbesCheck;
pub use pullpolicy::{ContainerImagePullPolicyCheck, score_container_image_pull_policy};
pub use resources::{ContainerResourcesCheck, score_container_resources};
pub use securitycontext::{ContainerSecurityContextCheck, score_container_security_context};

use crate::config::ScoreConfig;
use crate::context::object::{PodTemplate, Service};
use crate::types::{Grade, TestScore};

/// A check that grades a pod template.
pub trait Check: Send + Sync {
    /// Stable identifier, usable in `ignoreTests`.
    fn key(&self) -> &'static str;

    /// Display name, copied into every score.
    fn name(&self) -> &'static str;

    /// What the check looks for.
    fn description(&self) -> &'static str;

    /// Every grade the check can produce, worst first.
    fn levels(&self) -> Vec<Grade>;

    /// Grade a template.
    fn score(&self, template: &PodTemplate) -> TestScore;
}

/// Keys of all built-in checks, in the order they run.
pub const BUILTIN_CHECK_KEYS: &[&str] = &[
    resources::KEY,
    imagetag::KEY,
    pullpolicy::KEY,
    probes::KEY,
    securitycontext::KEY,
];

/// Instantiate every built-in check.
///
/// The probe check keeps its own copy of `services` for its whole life.
pub fn builtin_checks(services: &[Service], config: &ScoreConfig) -> Vec<Box<dyn Check>> {
    vec![
        Box::new(ContainerResourcesCheck {
            ignore_cpu_limit: config.ignore_container_cpu_limit,
            ignore_memory_limit: config.ignore_container_memory_limit,
        }),
        Box::new(ContainerImageTagCheck),
        Box::new(ContainerImagePullPolicyCheck),
        Box::new(PodProbesCheck::new(services.to_vec())),
        Box::new(ContainerSecurityContextCheck),
    ]
}
