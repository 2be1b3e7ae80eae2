//! AnalysisReport: aggregated output of one timeline check.
//!
//! The report keeps each pass's raw result alongside the rendered checklist
//! and a flat, sorted list of findings for summary display and exit codes.

use crate::checklist::Checklist;
use crate::convention::ConventionViolation;
use crate::cross_reference::{MissingBreakingChange, UnresolvedDeprecation, WrongDeprecationLink};
use crate::index::Duplicate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Severity level for a finding.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum FindingSeverity {
    Warning,
    Error,
}

/// A single data-quality defect.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Finding {
    pub check: String,
    pub severity: FindingSeverity,
    pub release: String,
    pub item_id: String,
    pub message: String,
}

/// Aggregated result of all passes over one timeline snapshot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisReport {
    pub releases_checked: usize,
    pub deprecations_checked: usize,
    pub breaking_changes_checked: usize,
    pub duplicates: Vec<Duplicate>,
    pub missing_breaking_changes: BTreeMap<String, MissingBreakingChange>,
    /// Every deprecation with a missing counterpart, one entry each.
    pub unresolved_deprecations: Vec<UnresolvedDeprecation>,
    pub wrong_deprecation_links: BTreeMap<String, WrongDeprecationLink>,
    pub convention_violations: Vec<ConventionViolation>,
    pub checklist: Checklist,
    pub findings: Vec<Finding>,
}

impl AnalysisReport {
    /// Create a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Rebuild `findings` from the populated pass results.
    pub fn extract_findings(&mut self) {
        self.findings.clear();

        for duplicate in &self.duplicates {
            self.findings.push(Finding {
                check: "duplicate".to_string(),
                severity: FindingSeverity::Warning,
                release: duplicate.release.clone(),
                item_id: duplicate.id.clone(),
                message: format!(
                    "Duplicate {} identifier '{}'; first occurrence kept",
                    duplicate.kind, duplicate.id
                ),
            });
        }

        for unresolved in &self.unresolved_deprecations {
            self.findings.push(Finding {
                check: "missing_breaking_change".to_string(),
                severity: FindingSeverity::Error,
                release: unresolved.release.clone(),
                item_id: unresolved.deprecation_id.clone(),
                message: format!(
                    "Deprecation '{}' announces breaking change '{}' which does not exist",
                    unresolved.deprecation_id, unresolved.opponent_id
                ),
            });
        }

        for (breaking_change_id, link) in &self.wrong_deprecation_links {
            self.findings.push(Finding {
                check: "wrong_deprecation_link".to_string(),
                severity: FindingSeverity::Error,
                release: link.release.clone(),
                item_id: breaking_change_id.clone(),
                message: format!(
                    "Breaking change '{}' references deprecation '{}' which does not exist",
                    breaking_change_id, link.opponent_id
                ),
            });
        }

        for violation in &self.convention_violations {
            self.findings.push(Finding {
                check: "example_convention".to_string(),
                severity: FindingSeverity::Warning,
                release: violation.release.clone(),
                item_id: violation.deprecation_id.clone(),
                message: format!(
                    "Deprecation '{}' {} does not follow the variable naming convention",
                    violation.deprecation_id, violation.example
                ),
            });
        }

        // Sort findings for deterministic output
        self.findings.sort_by(|a, b| {
            a.check
                .cmp(&b.check)
                .then_with(|| a.release.cmp(&b.release))
                .then_with(|| a.item_id.cmp(&b.item_id))
                .then_with(|| a.message.cmp(&b.message))
        });
    }
}
