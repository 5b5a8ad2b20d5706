//! Core types for the scorecard.
//!
//! - `Grade` - Discrete quality levels a check can produce
//! - `Comment` - A single finding attached to a container or the pod
//! - `Findings` - The append-only sink a check writes into
//! - `TestScore` - The graded result of one check on one pod template

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete grade levels.
///
/// Ordered from worst to best:
/// `Critical < Warning < AlmostOk < AllOk`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    /// The template fails the check outright.
    #[default]
    Critical,
    /// Something is missing but the template is usable.
    Warning,
    /// Passes, with a minor reservation.
    AlmostOk,
    /// No findings.
    AllOk,
}

impl Grade {
    /// Numeric value of the grade on a 0-10 scale.
    pub fn value(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::Warning => 5,
            Self::AlmostOk => 7,
            Self::AllOk => 10,
        }
    }

    /// Parse a grade from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "critical" => Some(Self::Critical),
            "warning" => Some(Self::Warning),
            "almostok" | "almost-ok" => Some(Self::AlmostOk),
            "allok" | "all-ok" | "ok" => Some(Self::AllOk),
            _ => None,
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::AlmostOk => "almostok",
            Self::AllOk => "allok",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A finding produced by a check.
///
/// `subject` names the container that triggered it, or is empty for
/// findings about the pod as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Container name, or empty for pod-level findings.
    pub subject: String,
    /// Short finding title.
    pub summary: String,
    /// Longer remediation advice. May be empty.
    pub remediation: String,
}

impl Comment {
    /// Create a comment about a container.
    pub fn new(
        subject: impl Into<String>,
        summary: impl Into<String>,
        remediation: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            summary: summary.into(),
            remediation: remediation.into(),
        }
    }

    /// Whether this comment is about the pod rather than a container.
    pub fn is_pod_level(&self) -> bool {
        self.subject.is_empty()
    }
}

/// The graded result of a single check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestScore {
    /// Display name of the check.
    pub name: String,
    /// The grade, set once when the check finishes.
    pub grade: Grade,
    /// Findings in discovery order.
    pub comments: Vec<Comment>,
}

impl TestScore {
    /// Comments attached to a given container.
    pub fn comments_for<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a Comment> + 'a {
        self.comments.iter().filter(move |c| c.subject == subject)
    }
}

/// Append-only sink a check writes its findings into.
///
/// The sink is consumed by [`Findings::finish`], so a score's grade can
/// only be set once.
#[derive(Debug)]
pub struct Findings {
    name: &'static str,
    comments: Vec<Comment>,
}

impl Findings {
    /// Start an empty sink for the named check.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            comments: Vec::new(),
        }
    }

    /// Record a finding about a container.
    pub fn add(
        &mut self,
        subject: impl Into<String>,
        summary: impl Into<String>,
        remediation: impl Into<String>,
    ) {
        self.comments.push(Comment::new(subject, summary, remediation));
    }

    /// Record a finding about the pod as a whole.
    pub fn add_pod_level(&mut self, summary: impl Into<String>, remediation: impl Into<String>) {
        self.add("", summary, remediation);
    }

    /// Seal the sink with its grade.
    pub fn finish(self, grade: Grade) -> TestScore {
        TestScore {
            name: self.name.to_string(),
            grade,
            comments: self.comments,
        }
    }
}
