//! Priority-ordered grading.
//!
//! A check collects boolean facts while it walks the containers, then
//! hands them to a [`GradeLadder`]. The ladder is a static, ordered list of
//! rungs; the first rung whose predicate holds decides the grade and the
//! fallback applies when none do.

use crate::types::Grade;

/// One step of a ladder.
pub struct Rung<F: 'static> {
    /// Short description, used in trace logging and tests.
    pub label: &'static str,
    /// Condition over the facts gathered by a check.
    pub when: fn(&F) -> bool,
    /// Grade produced when `when` holds.
    pub grade: Grade,
}

/// An ordered decision list from check facts to a grade.
pub struct GradeLadder<F: 'static> {
    pub rungs: &'static [Rung<F>],
    pub fallback: Grade,
}

impl<F: 'static> GradeLadder<F> {
    /// The first rung matching `facts`, if any.
    pub fn matching_rung(&self, facts: &F) -> Option<&'static Rung<F>> {
        self.rungs.iter().find(|rung| (rung.when)(facts))
    }

    /// Grade the facts.
    pub fn grade(&self, facts: &F) -> Grade {
        match self.matching_rung(facts) {
            Some(rung) => {
                log::trace!("grade {} decided by rung '{}'", rung.grade, rung.label);
                rung.grade
            }
            None => {
                log::trace!("grade {} decided by fallback", self.fallback);
                self.fallback
            }
        }
    }

    /// Every grade this ladder can produce, worst first.
    pub fn levels(&self) -> Vec<Grade> {
        let mut levels: Vec<Grade> = self.rungs.iter().map(|r| r.grade).collect();
        levels.push(self.fallback);
        levels.sort();
        levels.dedup();
        levels
    }
}
