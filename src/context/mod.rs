//! Scoring context.
//!
//! The context holds every pod template to be graded together with the
//! services in the same scope, which the probe check consults.

pub mod object;

pub use object::{
    Container, PodTemplate, PortRef, Probe, PullPolicy, Quantity, RESOURCE_CPU, RESOURCE_MEMORY,
    ResourceRequirements, SecurityContext, Service,
};

/// A pod template together with the name of the object that owns it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedTemplate {
    /// Owning object, e.g. "Deployment/web" or "default/web".
    pub name: String,
    pub template: PodTemplate,
}

impl NamedTemplate {
    pub fn new(name: impl Into<String>, template: PodTemplate) -> Self {
        Self {
            name: name.into(),
            template,
        }
    }
}

/// All objects in one scoring scope.
#[derive(Debug, Clone, Default)]
pub struct ScoreContext {
    templates: Vec<NamedTemplate>,
    services: Vec<Service>,
}

impl ScoreContext {
    /// Create a new empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pod template to grade.
    pub fn add_template(&mut self, template: NamedTemplate) {
        self.templates.push(template);
    }

    /// Add a service to the scope.
    pub fn add_service(&mut self, service: Service) {
        self.services.push(service);
    }

    pub fn templates(&self) -> &[NamedTemplate] {
        &self.templates
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }
}
