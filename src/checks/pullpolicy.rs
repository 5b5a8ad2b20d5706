//! Image pull policy detection.

use crate::checks::Check;
use crate::context::object::{PodTemplate, PullPolicy};
use crate::extract;
use crate::grade::{GradeLadder, Rung};
use crate::types::{Findings, Grade, TestScore};

pub const KEY: &str = "container-image-pull-policy";
pub const NAME: &str = "Container Image Pull Policy";

struct PullPolicyFacts {
    has_non_always: bool,
}

static LADDER: GradeLadder<PullPolicyFacts> = GradeLadder {
    rungs: &[Rung {
        label: "a container does not pull Always",
        when: |f| f.has_non_always,
        grade: Grade::Critical,
    }],
    fallback: Grade::AllOk,
};

/// Flags containers whose pull policy is not explicitly `Always`.
///
/// An unset policy is flagged the same way as `IfNotPresent` or `Never`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerImagePullPolicyCheck;

impl Check for ContainerImagePullPolicyCheck {
    fn key(&self) -> &'static str {
        KEY
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Makes sure that the pullPolicy is set to Always"
    }

    fn levels(&self) -> Vec<Grade> {
        LADDER.levels()
    }

    fn score(&self, template: &PodTemplate) -> TestScore {
        score_container_image_pull_policy(template)
    }
}

/// Grade the pull policy of every container.
pub fn score_container_image_pull_policy(template: &PodTemplate) -> TestScore {
    let mut findings = Findings::new(NAME);
    let mut facts = PullPolicyFacts {
        has_non_always: false,
    };

    for container in extract::all_containers(template) {
        if container.image_pull_policy != Some(PullPolicy::Always) {
            findings.add(
                &container.name,
                "ImagePullPolicy is not set to Always",
                "It's recommended to always set the ImagePullPolicy to Always, to make sure that \
                 the imagePullSecrets are always correct, and to always get the image you want.",
            );
            facts.has_non_always = true;
        }
    }

    findings.finish(LADDER.grade(&facts))
}
