//! Read-only model of the objects the checks inspect.
//!
//! These are simplified representations of the Kubernetes types, holding
//! only what scoring needs. See [`crate::convert`] for building them from
//! `k8s-openapi` objects.

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// Resource kind key for CPU.
pub const RESOURCE_CPU: &str = "cpu";
/// Resource kind key for memory.
pub const RESOURCE_MEMORY: &str = "memory";

/// A pod template: init containers, regular containers and labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PodTemplate {
    pub labels: BTreeMap<String, String>,
    pub init_containers: Vec<Container>,
    pub containers: Vec<Container>,
}

impl PodTemplate {
    /// Create an empty template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Add a regular container.
    pub fn with_container(mut self, container: Container) -> Self {
        self.containers.push(container);
        self
    }

    /// Add an init container.
    pub fn with_init_container(mut self, container: Container) -> Self {
        self.init_containers.push(container);
        self
    }
}

/// Simplified container spec.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    pub name: String,
    pub image: String,
    pub image_pull_policy: Option<PullPolicy>,
    pub resources: ResourceRequirements,
    pub readiness_probe: Option<Probe>,
    pub liveness_probe: Option<Probe>,
    pub security_context: Option<SecurityContext>,
}

impl Container {
    /// Create a container with a name and image.
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            ..Self::default()
        }
    }
}

/// Image pull policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PullPolicy {
    Always,
    IfNotPresent,
    Never,
}

impl PullPolicy {
    /// Parse the Kubernetes spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Always" => Some(Self::Always),
            "IfNotPresent" => Some(Self::IfNotPresent),
            "Never" => Some(Self::Never),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "Always",
            Self::IfNotPresent => "IfNotPresent",
            Self::Never => "Never",
        }
    }
}

impl fmt::Display for PullPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resource limits and requests, keyed by resource kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceRequirements {
    pub limits: BTreeMap<String, Quantity>,
    pub requests: BTreeMap<String, Quantity>,
}

impl ResourceRequirements {
    /// True when the limit for `kind` is absent or zero.
    pub fn limit_is_zero(&self, kind: &str) -> bool {
        self.limits.get(kind).is_none_or(Quantity::is_zero)
    }

    /// True when the request for `kind` is absent or zero.
    pub fn request_is_zero(&self, kind: &str) -> bool {
        self.requests.get(kind).is_none_or(Quantity::is_zero)
    }
}

/// Numeric part of a Kubernetes quantity (e.g. "100m", "1.5Gi", "2e3").
static QUANTITY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?(?:\d+(?:\.\d*)?|\.\d+))(?:[eE][+-]?\d+|Ki|Mi|Gi|Ti|Pi|Ei|[numkMGTPE])?$")
        .expect("quantity regex is valid")
});

/// A resource quantity in its Kubernetes string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity(pub String);

impl Quantity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the quantity amounts to nothing.
    ///
    /// A value that cannot be read counts as zero.
    pub fn is_zero(&self) -> bool {
        let raw = self.0.trim();
        let Some(caps) = QUANTITY_REGEX.captures(raw) else {
            log::debug!("unreadable resource quantity '{}', treating as zero", raw);
            return true;
        };
        caps.get(1)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .is_none_or(|value| value == 0.0)
    }
}

impl From<&str> for Quantity {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A port given by number or by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PortRef {
    Number(i32),
    Named(String),
}

impl PortRef {
    /// Integer value of the port.
    ///
    /// A name resolves to its decimal value when it is numeric, else 0.
    pub fn int_value(&self) -> i32 {
        match self {
            Self::Number(n) => *n,
            Self::Named(name) => name.parse().unwrap_or(0),
        }
    }
}

impl From<i32> for PortRef {
    fn from(n: i32) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for PortRef {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

/// A health check, by detection mechanism.
#[derive(Debug, Clone, PartialEq)]
pub enum Probe {
    HttpGet { path: String, port: PortRef },
    TcpSocket { port: PortRef },
    Exec { command: Vec<String> },
    /// gRPC or a probe without a handler. Present, but never compared.
    Other,
}

impl Probe {
    pub fn http_get(path: impl Into<String>, port: impl Into<PortRef>) -> Self {
        Self::HttpGet {
            path: path.into(),
            port: port.into(),
        }
    }

    pub fn tcp_socket(port: impl Into<PortRef>) -> Self {
        Self::TcpSocket { port: port.into() }
    }

    pub fn exec<S: Into<String>>(command: impl IntoIterator<Item = S>) -> Self {
        Self::Exec {
            command: command.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether two probes perform the same check.
    ///
    /// Only probes of the same mechanism can match. HTTP probes compare
    /// path and resolved port, TCP probes compare the port as written and
    /// exec probes compare the full argument list.
    pub fn is_same_check(&self, other: &Probe) -> bool {
        match (self, other) {
            (
                Self::HttpGet { path, port },
                Self::HttpGet {
                    path: other_path,
                    port: other_port,
                },
            ) => path == other_path && port.int_value() == other_port.int_value(),
            (Self::TcpSocket { port }, Self::TcpSocket { port: other_port }) => port == other_port,
            (Self::Exec { command }, Self::Exec { command: other_command }) => {
                command == other_command
            }
            _ => false,
        }
    }

    /// Name of the detection mechanism.
    pub fn mechanism(&self) -> &'static str {
        match self {
            Self::HttpGet { .. } => "httpGet",
            Self::TcpSocket { .. } => "tcpSocket",
            Self::Exec { .. } => "exec",
            Self::Other => "other",
        }
    }
}

/// Security context for containers.
///
/// Unset fields are not evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityContext {
    pub privileged: Option<bool>,
    pub read_only_root_filesystem: Option<bool>,
    pub run_as_user: Option<i64>,
    pub run_as_group: Option<i64>,
}

/// A service, reduced to what selector matching needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub namespace: Option<String>,
    pub selector: BTreeMap<String, String>,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a selector entry.
    pub fn with_selector(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.selector.insert(key.into(), value.into());
        self
    }

    /// Get a full identifier for the service (namespace/name or just name).
    pub fn identifier(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}/{}", ns, self.name),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_zero() {
        assert!(Quantity::from("0").is_zero());
        assert!(Quantity::from("0m").is_zero());
        assert!(Quantity::from("0Mi").is_zero());
        assert!(Quantity::from("0.0").is_zero());
        assert!(Quantity::from("").is_zero());
        assert!(Quantity::from("lots").is_zero());
    }

    #[test]
    fn test_quantity_non_zero() {
        assert!(!Quantity::from("100m").is_zero());
        assert!(!Quantity::from("1").is_zero());
        assert!(!Quantity::from("1.5Gi").is_zero());
        assert!(!Quantity::from("128Mi").is_zero());
        assert!(!Quantity::from("2e3").is_zero());
        assert!(!Quantity::from(".5").is_zero());
    }

    #[test]
    fn test_missing_resource_is_zero() {
        let mut resources = ResourceRequirements::default();
        assert!(resources.limit_is_zero(RESOURCE_CPU));
        resources
            .limits
            .insert(RESOURCE_CPU.to_string(), Quantity::from("250m"));
        assert!(!resources.limit_is_zero(RESOURCE_CPU));
        assert!(resources.limit_is_zero(RESOURCE_MEMORY));
        assert!(resources.request_is_zero(RESOURCE_CPU));
    }

    #[test]
    fn test_port_int_value() {
        assert_eq!(PortRef::Number(8080).int_value(), 8080);
        assert_eq!(PortRef::from("8080").int_value(), 8080);
        assert_eq!(PortRef::from("http").int_value(), 0);
    }

    #[test]
    fn test_http_probes_compare_path_and_resolved_port() {
        let a = Probe::http_get("/healthz", 8080);
        assert!(a.is_same_check(&Probe::http_get("/healthz", 8080)));
        assert!(a.is_same_check(&Probe::http_get("/healthz", "8080")));
        assert!(!a.is_same_check(&Probe::http_get("/ready", 8080)));
        assert!(!a.is_same_check(&Probe::http_get("/healthz", 9090)));
    }

    #[test]
    fn test_tcp_probes_compare_port_as_written() {
        let a = Probe::tcp_socket(5432);
        assert!(a.is_same_check(&Probe::tcp_socket(5432)));
        assert!(!a.is_same_check(&Probe::tcp_socket("5432")));
        assert!(Probe::tcp_socket("db").is_same_check(&Probe::tcp_socket("db")));
    }

    #[test]
    fn test_exec_probes_compare_full_command() {
        let a = Probe::exec(["cat", "/tmp/healthy"]);
        assert!(a.is_same_check(&Probe::exec(["cat", "/tmp/healthy"])));
        assert!(!a.is_same_check(&Probe::exec(["cat"])));
        assert!(!a.is_same_check(&Probe::exec(["cat", "/tmp/ready"])));
    }

    #[test]
    fn test_mechanisms_never_cross_match() {
        let http = Probe::http_get("", 8080);
        let tcp = Probe::tcp_socket(8080);
        assert!(!http.is_same_check(&tcp));
        assert!(!tcp.is_same_check(&http));
        assert!(!Probe::Other.is_same_check(&Probe::Other));
    }

    #[test]
    fn test_pull_policy_parse() {
        assert_eq!(PullPolicy::parse("Always"), Some(PullPolicy::Always));
        assert_eq!(PullPolicy::parse("IfNotPresent"), Some(PullPolicy::IfNotPresent));
        assert_eq!(PullPolicy::parse("Never"), Some(PullPolicy::Never));
        assert_eq!(PullPolicy::parse("always"), None);
    }
}
