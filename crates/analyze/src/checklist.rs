//! Markdown checklist of timeline defects, grouped by release.
//!
//! The checklist is meant to be pasted into an issue tracker: every release
//! with findings becomes a checkbox, with its deprecations and breaking
//! changes listed underneath and one indented checkbox per issue.
//!
//! ```text
//! - [ ] **5.5.0**
//!   - **Deprecations:**
//!   - [ ] 5.5.0_deprecation_Observable-create-deprecated
//!     - [ ] [missing] 6.0.0_breakingChange_Observable-create-removed
//! ```
//!
//! Every line ends with two spaces so Markdown keeps the line breaks.

use crate::convention::{check_deprecation, DEFAULT_EXAMPLE_MARKER};
use crate::cross_reference::{has_breaking_change, has_deprecation};
use crate::index::TimelineIndex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use timeline_interchange::Release;

/// Output when the timeline has nothing to report.
pub const NO_ERRORS: &str = "no errors detected";

/// Options recognized by the checklist builder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChecklistOptions {
    /// Only list items that have at least one finding. When false every
    /// deprecation and breaking change is listed.
    pub only_wrong: bool,
    /// Variable name expected in example snippets.
    pub example_marker: String,
}

impl Default for ChecklistOptions {
    fn default() -> Self {
        ChecklistOptions {
            only_wrong: true,
            example_marker: DEFAULT_EXAMPLE_MARKER.to_string(),
        }
    }
}

/// Checklist lines collected for one release version.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ReleaseEntry {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breaking_changes: Option<Vec<String>>,
}

impl ReleaseEntry {
    fn new(version: &str) -> Self {
        ReleaseEntry {
            version: version.to_string(),
            ..Default::default()
        }
    }
}

/// The assembled checklist. Entries keep the order in which their release
/// version was first seen.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Checklist {
    /// Duplicate-identifier warnings, printed ahead of the releases.
    pub warnings: Vec<String>,
    pub releases: Vec<ReleaseEntry>,
}

impl Checklist {
    /// True when nothing at all would be listed.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.releases.is_empty()
    }

    /// Output lines, without trailing newlines.
    pub fn lines(&self) -> Vec<String> {
        if self.is_clean() {
            return vec![NO_ERRORS.to_string()];
        }

        let mut lines = self.warnings.clone();
        for entry in &self.releases {
            lines.push(format!("- [ ] **{}**  ", entry.version));
            if let Some(deprecations) = entry.deprecations.as_ref().filter(|l| !l.is_empty()) {
                lines.push("  - **Deprecations:**  ".to_string());
                lines.extend(deprecations.iter().cloned());
            }
            if let Some(breaking_changes) =
                entry.breaking_changes.as_ref().filter(|l| !l.is_empty())
            {
                lines.push("  - **BreakingChanges:**  ".to_string());
                lines.extend(breaking_changes.iter().cloned());
            }
        }
        lines
    }

    /// Render the checklist as text, one line per row.
    pub fn render(&self) -> String {
        self.lines().join("\n")
    }

    fn entry(&mut self, positions: &mut HashMap<String, usize>, version: &str) -> &mut ReleaseEntry {
        let releases = &mut self.releases;
        let position = *positions.entry(version.to_string()).or_insert_with(|| {
            releases.push(ReleaseEntry::new(version));
            releases.len() - 1
        });
        &mut releases[position]
    }
}

fn item_line(id: &str) -> String {
    format!("  - [ ] {}  ", id)
}

fn detail_line(detail: &str) -> String {
    format!("    - [ ] {}  ", detail)
}

/// Merge link and convention findings into a per-release checklist.
pub fn build_checklist(
    releases: &[Release],
    index: &TimelineIndex<'_>,
    options: &ChecklistOptions,
) -> Checklist {
    let mut checklist = Checklist {
        warnings: index
            .duplicates
            .iter()
            .map(|d| format!("- [ ] [duplicate] {} {} ({})  ", d.kind, d.id, d.release))
            .collect(),
        releases: Vec::new(),
    };
    let mut positions = HashMap::new();

    for release in releases {
        for deprecation in &release.deprecations {
            let mut lines = Vec::new();

            if !has_breaking_change(index, deprecation) {
                lines.push(detail_line(&format!("[missing] {}", deprecation.opponent_id)));
            }
            for example in check_deprecation(deprecation, &options.example_marker) {
                lines.push(detail_line(&format!(
                    "[{}] use {} as variable name",
                    example.label(),
                    options.example_marker
                )));
            }

            if options.only_wrong && lines.is_empty() {
                continue;
            }
            lines.insert(0, item_line(&deprecation.migration_item_id));
            checklist
                .entry(&mut positions, &release.version)
                .deprecations
                .get_or_insert_with(Vec::new)
                .extend(lines);
        }

        for breaking_change in &release.breaking_changes {
            let mut lines = Vec::new();

            if !has_deprecation(index, breaking_change) {
                lines.push(detail_line(&format!("[missing] {}", breaking_change.opponent_id)));
            }

            if options.only_wrong && lines.is_empty() {
                continue;
            }
            lines.insert(0, item_line(&breaking_change.migration_item_id));
            checklist
                .entry(&mut positions, &release.version)
                .breaking_changes
                .get_or_insert_with(Vec::new)
                .extend(lines);
        }
    }

    checklist
}
