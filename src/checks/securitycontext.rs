//! Container security context validation.

use crate::checks::Check;
use crate::context::object::PodTemplate;
use crate::extract;
use crate::grade::{GradeLadder, Rung};
use crate::types::{Findings, Grade, TestScore};

pub const KEY: &str = "container-security-context";
pub const NAME: &str = "Container Security Context";

/// User and group IDs below this may collide with host accounts.
pub const MIN_UNPRIVILEGED_ID: i64 = 10000;

#[derive(Debug, Default)]
struct SecurityFacts {
    privileged: bool,
    writable_root_fs: bool,
    low_user_id: bool,
    low_group_id: bool,
}

impl SecurityFacts {
    fn any(&self) -> bool {
        self.privileged || self.writable_root_fs || self.low_user_id || self.low_group_id
    }
}

static LADDER: GradeLadder<SecurityFacts> = GradeLadder {
    rungs: &[Rung {
        label: "a container has an unsafe security context",
        when: SecurityFacts::any,
        grade: Grade::Critical,
    }],
    fallback: Grade::AllOk,
};

/// Flags privileged containers, writable root filesystems and low IDs.
///
/// Containers without a security context, and unset fields, are not
/// evaluated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerSecurityContextCheck;

impl Check for ContainerSecurityContextCheck {
    fn key(&self) -> &'static str {
        KEY
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Makes sure that all pods have good securityContexts configured"
    }

    fn levels(&self) -> Vec<Grade> {
        LADDER.levels()
    }

    fn score(&self, template: &PodTemplate) -> TestScore {
        score_container_security_context(template)
    }
}

/// Grade the security context of every container.
pub fn score_container_security_context(template: &PodTemplate) -> TestScore {
    let mut findings = Findings::new(NAME);
    let mut facts = SecurityFacts::default();

    for container in extract::all_containers(template) {
        let Some(sc) = &container.security_context else {
            continue;
        };

        if sc.privileged == Some(true) {
            facts.privileged = true;
            findings.add(
                &container.name,
                "The container is privileged",
                "Set securityContext.privileged to false",
            );
        }

        if sc.read_only_root_filesystem == Some(false) {
            facts.writable_root_fs = true;
            findings.add(
                &container.name,
                "The pod has a container with a writable root filesystem",
                "Set securityContext.readOnlyRootFilesystem to true",
            );
        }

        if sc.run_as_user.is_some_and(|uid| uid < MIN_UNPRIVILEGED_ID) {
            facts.low_user_id = true;
            findings.add(
                &container.name,
                "The container is running with a low user ID",
                "A userid above 10 000 is recommended to avoid conflicts with the host. \
                 Set securityContext.runAsUser to a value > 10000",
            );
        }

        if sc.run_as_group.is_some_and(|gid| gid < MIN_UNPRIVILEGED_ID) {
            facts.low_group_id = true;
            findings.add(
                &container.name,
                "The container is running with a low group ID",
                "A groupid above 10 000 is recommended to avoid conflicts with the host. \
                 Set securityContext.runAsGroup to a value > 10000",
            );
        }
    }

    findings.finish(LADDER.grade(&facts))
}
