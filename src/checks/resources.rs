//! Container resource limits and requests.

use crate::checks::Check;
use crate::context::object::{PodTemplate, RESOURCE_CPU, RESOURCE_MEMORY};
use crate::extract;
use crate::grade::{GradeLadder, Rung};
use crate::types::{Findings, Grade, TestScore};

pub const KEY: &str = "container-resources";
pub const NAME: &str = "Container Resources";

const LIMIT_REMEDIATION: &str = "Resource limits are recommended to avoid resource DDOS.";
const REQUEST_REMEDIATION: &str = "Resource requests are recommended to make sure that the application can start and run without crashing.";

/// Facts gathered over all containers.
#[derive(Debug, Default)]
struct ResourceFacts {
    no_containers: bool,
    missing_limit: bool,
    missing_request: bool,
}

static LADDER: GradeLadder<ResourceFacts> = GradeLadder {
    rungs: &[
        Rung {
            label: "no containers defined",
            when: |f| f.no_containers,
            grade: Grade::Critical,
        },
        Rung {
            label: "a limit is missing",
            when: |f| f.missing_limit,
            grade: Grade::Critical,
        },
        Rung {
            label: "a request is missing",
            when: |f| f.missing_request,
            grade: Grade::Warning,
        },
    ],
    fallback: Grade::AllOk,
};

/// Flags containers without CPU and memory limits and requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerResourcesCheck {
    /// Do not require a CPU limit.
    pub ignore_cpu_limit: bool,
    /// Do not require a memory limit.
    pub ignore_memory_limit: bool,
}

impl Check for ContainerResourcesCheck {
    fn key(&self) -> &'static str {
        KEY
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Makes sure that all containers have resource limits and requests set"
    }

    fn levels(&self) -> Vec<Grade> {
        LADDER.levels()
    }

    fn score(&self, template: &PodTemplate) -> TestScore {
        score_container_resources(template, self)
    }
}

/// Grade the resource limits and requests of every container.
pub fn score_container_resources(
    template: &PodTemplate,
    options: &ContainerResourcesCheck,
) -> TestScore {
    let mut findings = Findings::new(NAME);
    let mut facts = ResourceFacts {
        no_containers: extract::container_count(template) == 0,
        ..ResourceFacts::default()
    };

    for container in extract::all_containers(template) {
        let resources = &container.resources;

        if !options.ignore_cpu_limit && resources.limit_is_zero(RESOURCE_CPU) {
            findings.add(
                &container.name,
                "CPU limit is not set",
                format!("{} Set resources.limits.cpu", LIMIT_REMEDIATION),
            );
            facts.missing_limit = true;
        }
        if !options.ignore_memory_limit && resources.limit_is_zero(RESOURCE_MEMORY) {
            findings.add(
                &container.name,
                "Memory limit is not set",
                format!("{} Set resources.limits.memory", LIMIT_REMEDIATION),
            );
            facts.missing_limit = true;
        }
        if resources.request_is_zero(RESOURCE_CPU) {
            findings.add(
                &container.name,
                "CPU request is not set",
                format!("{} Set resources.requests.cpu", REQUEST_REMEDIATION),
            );
            facts.missing_request = true;
        }
        if resources.request_is_zero(RESOURCE_MEMORY) {
            findings.add(
                &container.name,
                "Memory request is not set",
                format!("{} Set resources.requests.memory", REQUEST_REMEDIATION),
            );
            facts.missing_request = true;
        }
    }

    if facts.no_containers {
        findings.add_pod_level("No containers defined", "");
    }

    findings.finish(LADDER.grade(&facts))
}
