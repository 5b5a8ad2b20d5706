//! Conversions from `k8s-openapi` objects into the scoring model.
//!
//! Manifests arrive already deserialized. These conversions never fail:
//! absent optional structures become `None` or empty maps.

use crate::context::object::{
    Container, PodTemplate, PortRef, Probe, PullPolicy, Quantity, ResourceRequirements,
    SecurityContext, Service,
};
use k8s_openapi::api::core::v1 as corev1;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity as K8sQuantity;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use std::collections::BTreeMap;

impl From<&corev1::PodTemplateSpec> for PodTemplate {
    fn from(spec: &corev1::PodTemplateSpec) -> Self {
        let labels = spec
            .metadata
            .as_ref()
            .and_then(|m| m.labels.clone())
            .unwrap_or_default();

        let mut template = spec.spec.as_ref().map(PodTemplate::from).unwrap_or_default();
        template.labels = labels;
        template
    }
}

impl From<&corev1::PodSpec> for PodTemplate {
    fn from(spec: &corev1::PodSpec) -> Self {
        Self {
            labels: BTreeMap::new(),
            init_containers: spec
                .init_containers
                .iter()
                .flatten()
                .map(Container::from)
                .collect(),
            containers: spec.containers.iter().map(Container::from).collect(),
        }
    }
}

impl From<&corev1::Container> for Container {
    fn from(container: &corev1::Container) -> Self {
        Self {
            name: container.name.clone(),
            image: container.image.clone().unwrap_or_default(),
            image_pull_policy: container
                .image_pull_policy
                .as_deref()
                .and_then(PullPolicy::parse),
            resources: container
                .resources
                .as_ref()
                .map(ResourceRequirements::from)
                .unwrap_or_default(),
            readiness_probe: container.readiness_probe.as_ref().map(Probe::from),
            liveness_probe: container.liveness_probe.as_ref().map(Probe::from),
            security_context: container.security_context.as_ref().map(SecurityContext::from),
        }
    }
}

fn quantities(map: Option<&BTreeMap<String, K8sQuantity>>) -> BTreeMap<String, Quantity> {
    map.into_iter()
        .flatten()
        .map(|(kind, q)| (kind.clone(), Quantity::new(q.0.clone())))
        .collect()
}

impl From<&corev1::ResourceRequirements> for ResourceRequirements {
    fn from(resources: &corev1::ResourceRequirements) -> Self {
        Self {
            limits: quantities(resources.limits.as_ref()),
            requests: quantities(resources.requests.as_ref()),
        }
    }
}

impl From<&IntOrString> for PortRef {
    fn from(port: &IntOrString) -> Self {
        match port {
            IntOrString::Int(n) => Self::Number(*n),
            IntOrString::String(name) => Self::Named(name.clone()),
        }
    }
}

impl From<&corev1::Probe> for Probe {
    fn from(probe: &corev1::Probe) -> Self {
        if let Some(http) = &probe.http_get {
            Self::HttpGet {
                path: http.path.clone().unwrap_or_default(),
                port: PortRef::from(&http.port),
            }
        } else if let Some(tcp) = &probe.tcp_socket {
            Self::TcpSocket {
                port: PortRef::from(&tcp.port),
            }
        } else if let Some(exec) = &probe.exec {
            Self::Exec {
                command: exec.command.clone().unwrap_or_default(),
            }
        } else {
            Self::Other
        }
    }
}

impl From<&corev1::SecurityContext> for SecurityContext {
    fn from(sc: &corev1::SecurityContext) -> Self {
        Self {
            privileged: sc.privileged,
            read_only_root_filesystem: sc.read_only_root_filesystem,
            run_as_user: sc.run_as_user,
            run_as_group: sc.run_as_group,
        }
    }
}

impl From<&corev1::Service> for Service {
    fn from(service: &corev1::Service) -> Self {
        Self {
            name: service.metadata.name.clone().unwrap_or_default(),
            namespace: service.metadata.namespace.clone(),
            selector: service
                .spec
                .as_ref()
                .and_then(|s| s.selector.clone())
                .unwrap_or_default(),
        }
    }
}
