//! Readiness and liveness probe coverage.
//!
//! Whether a readiness probe is required depends on whether any service
//! sends traffic to the pod, so this check is built once over the services
//! in scope and then applied to every template.

use crate::checks::Check;
use crate::context::object::{PodTemplate, Service};
use crate::extract;
use crate::grade::{GradeLadder, Rung};
use crate::selector;
use crate::types::{Findings, Grade, TestScore};

pub const KEY: &str = "pod-probes";
pub const NAME: &str = "Pod Probes";

/// Facts gathered over all containers. Probe flags are pod-wide.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ProbeFacts {
    pub targeted: bool,
    pub has_readiness: bool,
    pub has_liveness: bool,
    pub identical: bool,
}

impl ProbeFacts {
    fn readiness_covered(&self) -> bool {
        self.has_liveness && (self.has_readiness || !self.targeted)
    }
}

static LADDER: GradeLadder<ProbeFacts> = GradeLadder {
    rungs: &[
        Rung {
            label: "distinct probes cover the pod",
            when: |f| f.readiness_covered() && !f.identical,
            grade: Grade::AllOk,
        },
        Rung {
            label: "probes cover the pod but are identical",
            when: |f| f.readiness_covered() && f.identical,
            grade: Grade::AlmostOk,
        },
        Rung {
            label: "no probes at all",
            when: |f| !f.has_readiness && !f.has_liveness,
            grade: Grade::Critical,
        },
        Rung {
            label: "targeted by a service without readiness probe",
            when: |f| f.targeted && !f.has_readiness,
            grade: Grade::Critical,
        },
        Rung {
            label: "liveness probe missing",
            when: |f| !f.has_liveness,
            grade: Grade::Warning,
        },
    ],
    fallback: Grade::Critical,
};

/// Flags missing and duplicated readiness and liveness probes.
#[derive(Debug, Clone, Default)]
pub struct PodProbesCheck {
    services: Vec<Service>,
}

impl PodProbesCheck {
    /// Build the check over the services in scope.
    pub fn new(services: Vec<Service>) -> Self {
        Self { services }
    }

    /// The services this check was built over.
    pub fn services(&self) -> &[Service] {
        &self.services
    }
}

impl Check for PodProbesCheck {
    fn key(&self) -> &'static str {
        KEY
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Makes sure that all Pods have liveness probes, and readiness probes when a Service targets them"
    }

    fn levels(&self) -> Vec<Grade> {
        LADDER.levels()
    }

    fn score(&self, template: &PodTemplate) -> TestScore {
        score_pod_probes(template, &self.services)
    }
}

fn gather(template: &PodTemplate, services: &[Service], findings: &mut Findings) -> ProbeFacts {
    let mut facts = ProbeFacts::default();

    if let Some(service) = selector::targeting_services(services, &template.labels).next() {
        log::debug!("pod template is targeted by service {}", service.identifier());
        facts.targeted = true;
    }

    for container in extract::all_containers(template) {
        if container.readiness_probe.is_some() {
            facts.has_readiness = true;
        } else if facts.targeted {
            findings.add(
                &container.name,
                "Container is missing a readinessProbe",
                "Without a readinessProbe Services will start sending traffic to this pod before it's ready",
            );
        }

        if container.liveness_probe.is_some() {
            facts.has_liveness = true;
        } else {
            findings.add(
                &container.name,
                "Container is missing a livenessProbe",
                "Without a livenessProbe kubelet can not restart the Pod if it has crashed",
            );
        }

        if let (Some(readiness), Some(liveness)) =
            (&container.readiness_probe, &container.liveness_probe)
            && readiness.is_same_check(liveness)
        {
            findings.add(
                &container.name,
                "Container has the same readiness and liveness probe",
                "It's recommended to have different probes for the two different purposes.",
            );
            facts.identical = true;
        }
    }

    facts
}

/// Grade probe coverage of a template against the services in scope.
pub fn score_pod_probes(template: &PodTemplate, services: &[Service]) -> TestScore {
    let mut findings = Findings::new(NAME);
    let facts = gather(template, services, &mut findings);
    findings.finish(LADDER.grade(&facts))
}
