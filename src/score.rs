//! Scoring orchestration.
//!
//! Ties the configured checks to pod templates and collects the results
//! into a [`Scorecard`].

use crate::checks::{Check, builtin_checks};
use crate::config::ScoreConfig;
use crate::context::{NamedTemplate, ScoreContext};
use crate::context::object::{PodTemplate, Service};
use crate::scorecard::{ScoredObject, Scorecard};
use crate::types::TestScore;
use rayon::prelude::*;

/// Runs the enabled checks over pod templates.
///
/// A scorer is built once per scope; it can then grade any number of
/// templates, from any number of threads.
pub struct Scorer {
    checks: Vec<Box<dyn Check>>,
}

impl Scorer {
    /// Build a scorer over the services in scope.
    pub fn new(services: &[Service], config: &ScoreConfig) -> Self {
        let checks = builtin_checks(services, config)
            .into_iter()
            .filter(|check| {
                let ignored = config.is_test_ignored(check.key());
                if ignored {
                    log::debug!("skipping check '{}' (ignored by configuration)", check.key());
                }
                !ignored
            })
            .collect();

        Self { checks }
    }

    /// Build a scorer from an explicit list of checks.
    pub fn with_checks(checks: Vec<Box<dyn Check>>) -> Self {
        Self { checks }
    }

    /// The enabled checks, in run order.
    pub fn checks(&self) -> &[Box<dyn Check>] {
        &self.checks
    }

    /// Grade one template with every enabled check.
    pub fn score(&self, template: &PodTemplate) -> Vec<TestScore> {
        self.checks
            .iter()
            .map(|check| check.score(template))
            .collect()
    }

    /// Grade many templates in parallel. Output keeps input order.
    pub fn score_all(&self, templates: &[NamedTemplate]) -> Scorecard {
        let objects = templates
            .par_iter()
            .map(|named| ScoredObject {
                name: named.name.clone(),
                scores: self.score(&named.template),
            })
            .collect();

        Scorecard { objects }
    }
}

/// Grade every template in a context against the services in it.
pub fn score_context(ctx: &ScoreContext, config: &ScoreConfig) -> Scorecard {
    log::debug!(
        "scoring {} pod templates against {} services",
        ctx.templates().len(),
        ctx.services().len()
    );
    Scorer::new(ctx.services(), config).score_all(ctx.templates())
}
