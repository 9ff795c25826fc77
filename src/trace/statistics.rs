// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Counters are kept per tree and incremented by the tracer as calls
//! complete and templates fire.

use crate::reduction::Template;
use std::fmt;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount as EnumCountMacro, EnumIter, IntoStaticStr};

/// How a call to `accept` ended.
#[derive(Debug, EnumCountMacro, EnumIter, IntoStaticStr, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Outcome {
    Accepted,
    Rejected,
    /// At most one distinct element: accepted without a reduction.
    Trivial,
    /// A rejected reduction was undone.
    RolledBack,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    outcomes: [u64; Outcome::COUNT],
    templates: [u64; Template::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    pub(crate) fn increment_outcome(&mut self, outcome: Outcome) {
        self.outcomes[outcome as usize] += 1;
    }

    pub(crate) fn increment_template(&mut self, template: Template) {
        self.templates[template as usize] += 1;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, outcome: Outcome) -> u64 {
        self.outcomes[outcome as usize]
    }

    /// How often `template` has been applied.
    pub fn template_hits(&self, template: Template) -> u64 {
        self.templates[template as usize]
    }

    /// Calls to `accept` so far.
    pub fn calls(&self) -> u64 {
        self.get(Outcome::Accepted) + self.get(Outcome::Rejected) + self.get(Outcome::Trivial)
    }

    /// Templates with a non-zero count, in catalogue order.
    pub fn templates(&self) -> impl Iterator<Item = (Template, u64)> + '_ {
        Template::iter()
            .map(|template| (template, self.template_hits(template)))
            .filter(|&(_, hits)| hits > 0)
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcomes: Vec<String> = Outcome::iter()
            .map(|outcome| {
                let name: &'static str = outcome.into();
                format!("{name}={}", self.get(outcome))
            })
            .collect();
        write!(f, "{}", outcomes.join(" "))?;
        for (template, hits) in self.templates() {
            write!(f, "\n  {}: {hits}", template.name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut statistics = Statistics::new();
        statistics.increment_outcome(Outcome::Accepted);
        statistics.increment_outcome(Outcome::Rejected);
        statistics.increment_outcome(Outcome::RolledBack);
        statistics.increment_outcome(Outcome::Trivial);
        statistics.increment_template(Template::Leaf);
        statistics.increment_template(Template::Leaf);
        statistics.increment_template(Template::QSplit);

        assert_eq!(statistics.calls(), 3);
        assert_eq!(statistics.get(Outcome::RolledBack), 1);
        assert_eq!(statistics.template_hits(Template::Leaf), 2);
        assert_eq!(statistics.template_hits(Template::PFull), 0);
        assert_eq!(
            statistics.templates().collect::<Vec<_>>(),
            vec![(Template::Leaf, 2), (Template::QSplit, 1)]
        );
        assert_eq!(
            statistics.to_string(),
            "Accepted=1 Rejected=1 Trivial=1 RolledBack=1\n  Leaf: 2\n  QSplit: 1"
        );
    }
}
