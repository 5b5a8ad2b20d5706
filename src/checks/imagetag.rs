//! Latest image tag detection.

use crate::checks::Check;
use crate::context::object::PodTemplate;
use crate::extract;
use crate::grade::{GradeLadder, Rung};
use crate::types::{Findings, Grade, TestScore};

pub const KEY: &str = "container-image-tag";
pub const NAME: &str = "Container Image Tag";

struct TagFacts {
    has_latest: bool,
}

static LADDER: GradeLadder<TagFacts> = GradeLadder {
    rungs: &[Rung {
        label: "a container uses the latest tag",
        when: |f| f.has_latest,
        grade: Grade::Critical,
    }],
    fallback: Grade::AllOk,
};

/// The tag of an image reference: whatever follows the last `:`.
///
/// A reference without `:` is its own tag. A registry port is not told
/// apart from a tag, so `registry:5000/app` yields `5000/app`.
pub fn image_tag(image: &str) -> &str {
    image.rsplit_once(':').map_or(image, |(_, tag)| tag)
}

/// Flags containers whose image is pinned to `latest`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerImageTagCheck;

impl Check for ContainerImageTagCheck {
    fn key(&self) -> &'static str {
        KEY
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Makes sure that an explicit, non-latest tag is used"
    }

    fn levels(&self) -> Vec<Grade> {
        LADDER.levels()
    }

    fn score(&self, template: &PodTemplate) -> TestScore {
        score_container_image_tag(template)
    }
}

/// Grade the image tags of every container.
pub fn score_container_image_tag(template: &PodTemplate) -> TestScore {
    let mut findings = Findings::new(NAME);
    let mut facts = TagFacts { has_latest: false };

    for container in extract::all_containers(template) {
        if image_tag(&container.image) == "latest" {
            findings.add(
                &container.name,
                "Image with latest tag",
                "Using a fixed tag is recommended to avoid accidental upgrades",
            );
            facts.has_latest = true;
        }
    }

    findings.finish(LADDER.grade(&facts))
}
