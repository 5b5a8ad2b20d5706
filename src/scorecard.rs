//! Aggregated results of a scoring run.
//!
//! Rendering and exit codes are left to the caller; the scorecard only
//! answers questions about the grades it holds.

use crate::config::ScoreConfig;
use crate::types::{Grade, TestScore};
use serde::{Deserialize, Serialize};

/// Every check result for one pod template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredObject {
    /// Name of the object owning the template.
    pub name: String,
    /// One score per enabled check, in check order.
    pub scores: Vec<TestScore>,
}

impl ScoredObject {
    /// Lowest grade among the scores, if any check ran.
    pub fn worst_grade(&self) -> Option<Grade> {
        self.scores.iter().map(|s| s.grade).min()
    }

    /// The score of a check by display name.
    pub fn score(&self, name: &str) -> Option<&TestScore> {
        self.scores.iter().find(|s| s.name == name)
    }
}

/// Results for every template in a scope, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    pub objects: Vec<ScoredObject>,
}

impl Scorecard {
    /// Create a new empty scorecard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lowest grade across all objects.
    pub fn worst_grade(&self) -> Option<Grade> {
        self.objects.iter().filter_map(ScoredObject::worst_grade).min()
    }

    /// Number of scores graded critical.
    pub fn critical_count(&self) -> usize {
        self.all_scores()
            .filter(|s| s.grade == Grade::Critical)
            .count()
    }

    /// Number of scores graded at or below `grade`.
    pub fn count_at_or_below(&self, grade: Grade) -> usize {
        self.all_scores().filter(|s| s.grade <= grade).count()
    }

    /// Check if the results should cause a non-zero exit.
    pub fn should_fail(&self, config: &ScoreConfig) -> bool {
        if config.no_fail {
            return false;
        }

        self.worst_grade()
            .is_some_and(|worst| worst <= config.failure_threshold)
    }

    fn all_scores(&self) -> impl Iterator<Item = &TestScore> {
        self.objects.iter().flat_map(|o| o.scores.iter())
    }
}
