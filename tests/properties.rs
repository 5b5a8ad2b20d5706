use kube_scorecard::checks::imagetag::image_tag;
use kube_scorecard::checks::{ContainerResourcesCheck, score_container_resources};
use kube_scorecard::selector::selects;
use kube_scorecard::{
    Container, Grade, PodTemplate, PortRef, Probe, PullPolicy, Quantity, ScoreConfig, Scorer,
    SecurityContext, Service,
};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn arb_port() -> impl Strategy<Value = PortRef> {
    prop_oneof![
        (1..=3i32).prop_map(|p| PortRef::Number(8080 + p)),
        prop::sample::select(vec!["http", "8081", "metrics"]).prop_map(|name| PortRef::from(name)),
    ]
}

fn arb_probe() -> impl Strategy<Value = Probe> {
    prop_oneof![
        (prop::sample::select(vec!["/healthz", "/ready"]), arb_port())
            .prop_map(|(path, port)| Probe::http_get(path, port)),
        arb_port().prop_map(|port| Probe::tcp_socket(port)),
        prop::collection::vec(prop::sample::select(vec!["cat", "/tmp/ok", "-f"]), 0..3)
            .prop_map(|command| Probe::exec(command)),
        Just(Probe::Other),
    ]
}

fn arb_quantity() -> impl Strategy<Value = Option<Quantity>> {
    prop::option::of(prop::sample::select(vec!["0", "100m", "1", "128Mi", "0Gi"]))
        .prop_map(|q| q.map(|value| Quantity::new(value)))
}

fn arb_security_context() -> impl Strategy<Value = SecurityContext> {
    (
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        prop::option::of(0..20000i64),
        prop::option::of(0..20000i64),
    )
        .prop_map(
            |(privileged, read_only_root_filesystem, run_as_user, run_as_group)| SecurityContext {
                privileged,
                read_only_root_filesystem,
                run_as_user,
                run_as_group,
            },
        )
}

fn arb_container(index: usize) -> impl Strategy<Value = Container> {
    (
        prop::sample::select(vec!["app:1.0", "app:latest", "app", "registry:5000/app"]),
        prop::option::of(prop::sample::select(vec![
            PullPolicy::Always,
            PullPolicy::IfNotPresent,
            PullPolicy::Never,
        ])),
        arb_quantity(),
        arb_quantity(),
        prop::option::of(arb_probe()),
        prop::option::of(arb_probe()),
        prop::option::of(arb_security_context()),
    )
        .prop_map(
            move |(image, pull, cpu, memory, readiness, liveness, security)| {
                let mut container = Container::new(format!("c{index}"), image);
                container.image_pull_policy = pull;
                if let Some(cpu) = cpu {
                    container.resources.limits.insert("cpu".into(), cpu.clone());
                    container.resources.requests.insert("cpu".into(), cpu);
                }
                if let Some(memory) = memory {
                    container.resources.limits.insert("memory".into(), memory);
                }
                container.readiness_probe = readiness;
                container.liveness_probe = liveness;
                container.security_context = security;
                container
            },
        )
}

fn arb_labels() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map(
        prop::sample::select(vec!["app", "tier", "release", "team"]).prop_map(String::from),
        prop::sample::select(vec!["web", "api", "stable"]).prop_map(String::from),
        0..4,
    )
}

fn arb_template() -> impl Strategy<Value = PodTemplate> {
    (
        arb_labels(),
        prop::option::of(arb_container(0)),
        prop::option::of(arb_container(1)),
        prop::option::of(arb_container(2)),
    )
        .prop_map(|(labels, init, first, second)| PodTemplate {
            labels,
            init_containers: init.into_iter().collect(),
            containers: first.into_iter().chain(second).collect(),
        })
}

proptest! {
    #[test]
    fn scoring_is_idempotent(template in arb_template(), selector in arb_labels()) {
        let service = Service { name: "svc".into(), namespace: None, selector };
        let scorer = Scorer::new(&[service], &ScoreConfig::default());

        let first = scorer.score(&template);
        let second = scorer.score(&template);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn grades_stay_within_declared_levels(template in arb_template()) {
        let scorer = Scorer::new(&[], &ScoreConfig::default());
        for (check, score) in scorer.checks().iter().zip(scorer.score(&template)) {
            prop_assert!(check.levels().contains(&score.grade));
        }
    }

    #[test]
    fn selector_subset_of_labels_matches(labels in arb_labels(), take in 1usize..4) {
        prop_assume!(!labels.is_empty());
        let selector: BTreeMap<_, _> = labels
            .iter()
            .take(take)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        prop_assert!(selects(&selector, &labels));

        let mut conflicting = selector.clone();
        if let Some(value) = conflicting.values_mut().next() {
            value.push_str("-other");
        }
        prop_assert!(!selects(&conflicting, &labels));
    }

    #[test]
    fn selector_never_mutates_inputs(selector in arb_labels(), labels in arb_labels()) {
        let (before_selector, before_labels) = (selector.clone(), labels.clone());
        let _ = selects(&selector, &labels);
        prop_assert_eq!(selector, before_selector);
        prop_assert_eq!(labels, before_labels);
    }

    #[test]
    fn probe_identity_is_symmetric(a in arb_probe(), b in arb_probe()) {
        prop_assert_eq!(a.is_same_check(&b), b.is_same_check(&a));
        if a.mechanism() != b.mechanism() {
            prop_assert!(!a.is_same_check(&b));
        }
    }

    #[test]
    fn image_without_colon_is_its_own_tag(image in "[a-z0-9./-]{0,24}") {
        prop_assert_eq!(image_tag(&image), image.as_str());
    }
}

#[test]
fn empty_template_always_fails_resources() {
    for check in [
        ContainerResourcesCheck::default(),
        ContainerResourcesCheck {
            ignore_cpu_limit: true,
            ignore_memory_limit: true,
        },
    ] {
        let score = score_container_resources(&PodTemplate::new(), &check);
        assert_eq!(score.grade, Grade::Critical);
        assert_eq!(score.comments.len(), 1);
        assert!(score.comments[0].is_pod_level());
    }
}
