//! Service selector matching.
//!
//! A service targets a pod template when its selector is a non-empty
//! subset of the template's labels. Matching never modifies either side.

use crate::context::object::Service;
use std::collections::BTreeMap;

/// Whether `selector` selects an object carrying `labels`.
///
/// Every selector entry must be present in `labels` with the same value.
/// Labels the selector does not mention are ignored. An empty selector
/// selects nothing.
pub fn selects(selector: &BTreeMap<String, String>, labels: &BTreeMap<String, String>) -> bool {
    !selector.is_empty()
        && selector
            .iter()
            .all(|(key, value)| labels.get(key) == Some(value))
}

/// Services whose selector targets `labels`, in input order.
pub fn targeting_services<'a>(
    services: &'a [Service],
    labels: &'a BTreeMap<String, String>,
) -> impl Iterator<Item = &'a Service> + 'a {
    services
        .iter()
        .filter(move |service| selects(&service.selector, labels))
}

/// Whether at least one service targets `labels`.
pub fn is_targeted(services: &[Service], labels: &BTreeMap<String, String>) -> bool {
    targeting_services(services, labels).next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_subset_selector_matches() {
        let pod = labels(&[("app", "foo"), ("tier", "web")]);
        assert!(selects(&labels(&[("app", "foo")]), &pod));
        assert!(selects(&labels(&[("app", "foo"), ("tier", "web")]), &pod));
    }

    #[test]
    fn test_partial_overlap_does_not_match() {
        let pod = labels(&[("app", "foo"), ("tier", "web")]);
        assert!(!selects(&labels(&[("app", "foo"), ("tier", "api")]), &pod));
        assert!(!selects(&labels(&[("app", "bar")]), &pod));
        assert!(!selects(&labels(&[("release", "stable")]), &pod));
    }

    #[test]
    fn test_empty_selector_matches_nothing() {
        let pod = labels(&[("app", "foo")]);
        assert!(!selects(&BTreeMap::new(), &pod));
        assert!(!selects(&BTreeMap::new(), &BTreeMap::new()));
    }

    #[test]
    fn test_targeting_services_keeps_order() {
        let services = vec![
            Service::new("api").with_selector("app", "foo"),
            Service::new("other").with_selector("app", "bar"),
            Service::new("web").with_selector("tier", "web"),
        ];
        let pod = labels(&[("app", "foo"), ("tier", "web")]);

        let names: Vec<_> = targeting_services(&services, &pod)
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["api", "web"]);
        assert!(is_targeted(&services, &pod));
        assert!(!is_targeted(&services, &labels(&[("app", "baz")])));
        assert!(!is_targeted(&[], &pod));
    }
}
