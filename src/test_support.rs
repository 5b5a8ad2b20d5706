//! YAML fixtures for unit tests.

use crate::context::object::{PodTemplate, Service};
use k8s_openapi::api::core::v1 as corev1;

/// Parse a pod template spec (`metadata` + `spec`) from YAML.
pub fn template_from_yaml(yaml: &str) -> PodTemplate {
    let spec: corev1::PodTemplateSpec =
        serde_yaml::from_str(yaml).expect("fixture is a valid pod template");
    PodTemplate::from(&spec)
}

/// Parse a v1 Service from YAML.
pub fn service_from_yaml(yaml: &str) -> Service {
    let service: corev1::Service = serde_yaml::from_str(yaml).expect("fixture is a valid service");
    Service::from(&service)
}
