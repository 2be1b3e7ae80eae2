//! Example-code naming convention.
//!
//! Deprecation examples name the migrated value with an agreed variable
//! name. An example that carries a `before` snippet must also carry an
//! `after` snippet, and both must mention the marker.

use serde::Serialize;
use std::fmt;
use timeline_interchange::{Deprecation, Release};

/// Conventional variable name for the migration subject.
pub const DEFAULT_EXAMPLE_MARKER: &str = "source";

/// Which example snippet of a deprecation broke the convention.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum ExampleField {
    Before,
    After,
}

impl ExampleField {
    /// Field name as it appears in timeline data and checklist lines.
    pub fn label(self) -> &'static str {
        match self {
            ExampleField::Before => "exampleBefore",
            ExampleField::After => "exampleAfter",
        }
    }
}

impl fmt::Display for ExampleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConventionViolation {
    pub release: String,
    pub deprecation_id: String,
    pub example: ExampleField,
}

/// Check the example snippets of one deprecation.
///
/// Deprecations without a `before` snippet are not checked at all; an empty
/// snippet counts as absent. A missing `after` snippet counts as a violation.
pub fn check_deprecation(deprecation: &Deprecation, marker: &str) -> Vec<ExampleField> {
    let mut violations = Vec::new();

    let Some(before) = deprecation
        .example_before
        .as_deref()
        .filter(|before| !before.is_empty())
    else {
        return violations;
    };

    if !before.contains(marker) {
        violations.push(ExampleField::Before);
    }

    let after_ok = deprecation
        .example_after
        .as_deref()
        .is_some_and(|after| after.contains(marker));
    if !after_ok {
        violations.push(ExampleField::After);
    }

    violations
}

/// Check every deprecation in the timeline, in input order.
pub fn check_examples(releases: &[Release], marker: &str) -> Vec<ConventionViolation> {
    releases
        .iter()
        .flat_map(|release| {
            release.deprecations.iter().flat_map(move |deprecation| {
                check_deprecation(deprecation, marker)
                    .into_iter()
                    .map(move |example| ConventionViolation {
                        release: release.version.clone(),
                        deprecation_id: deprecation.migration_item_id.clone(),
                        example,
                    })
            })
        })
        .collect()
}
