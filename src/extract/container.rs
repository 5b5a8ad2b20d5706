//! Container extraction utilities.

use crate::context::object::{Container, PodTemplate};

/// All containers of a template: init containers first, then regular
/// containers, each in declaration order.
pub fn all_containers(template: &PodTemplate) -> impl Iterator<Item = &Container> {
    template
        .init_containers
        .iter()
        .chain(template.containers.iter())
}

/// Number of containers of either kind.
pub fn container_count(template: &PodTemplate) -> usize {
    template.init_containers.len() + template.containers.len()
}

/// Find a container of either kind by name.
pub fn find_container<'a>(template: &'a PodTemplate, name: &str) -> Option<&'a Container> {
    all_containers(template).find(|c| c.name == name)
}
