//! Migration timeline cross-reference checker.
//!
//! The analyzer consumes a complete, date-ordered list of releases and runs
//! a short pipeline over it:
//!
//! 1. [`index`] builds lookup tables by release version, deprecation id and
//!    breaking-change id, recording duplicate keys.
//! 2. [`cross_reference`] finds deprecations whose breaking change is
//!    missing and breaking changes whose deprecation does not exist.
//! 3. [`convention`] checks example snippets for the agreed variable name.
//! 4. [`checklist`] merges all findings into a per-release Markdown checklist.
//!
//! Nothing here mutates its input and nothing is carried between runs: a
//! new snapshot means a new call to [`analyze`].

pub mod checklist;
pub mod convention;
pub mod cross_reference;
pub mod index;
pub mod report;

pub use checklist::{build_checklist, Checklist, ChecklistOptions, ReleaseEntry, NO_ERRORS};
pub use convention::{check_deprecation, check_examples, ConventionViolation, ExampleField};
pub use cross_reference::{
    missing_breaking_changes, resolve_counterpart, unresolved_deprecations,
    wrong_deprecation_links, Counterpart, MissingBreakingChange, PlaceholderBreakingChange,
    UnresolvedDeprecation, WrongDeprecationLink, PLACEHOLDER_MESSAGE,
};
pub use index::{Duplicate, DuplicateKind, TimelineIndex};
pub use report::{AnalysisReport, Finding, FindingSeverity};

use timeline_interchange::Release;

/// Run the full pipeline on one timeline snapshot.
pub fn analyze(releases: &[Release], options: &ChecklistOptions) -> AnalysisReport {
    let index = TimelineIndex::build(releases);

    let mut report = AnalysisReport::new();
    report.releases_checked = releases.len();
    report.deprecations_checked = releases.iter().map(|r| r.deprecations.len()).sum();
    report.breaking_changes_checked = releases.iter().map(|r| r.breaking_changes.len()).sum();
    report.duplicates = index.duplicates.clone();
    report.missing_breaking_changes = missing_breaking_changes(releases, &index);
    report.unresolved_deprecations = unresolved_deprecations(releases, &index);
    report.wrong_deprecation_links = wrong_deprecation_links(&index);
    report.convention_violations = check_examples(releases, &options.example_marker);
    report.checklist = build_checklist(releases, &index, options);

    report.extract_findings();

    tracing::debug!(
        releases = report.releases_checked,
        findings = report.findings.len(),
        "timeline analyzed"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_test_timeline() -> Vec<Release> {
        timeline_interchange::from_timeline(&json!([
            {
                "version": "5.5.0",
                "date": "2017-10-18",
                "deprecations": [
                    {
                        "migrationItemUID": "d-create",
                        "opponentMigrationItemUID": "b-create",
                        "subject": "Observable",
                        "subjectSymbol": "create",
                        "subjectAction": "deprecated",
                        "exampleBefore": "const x = Observable.create(fn);",
                        "exampleAfter": "const source = new Observable(fn);"
                    },
                    {
                        "migrationItemUID": "d-if",
                        "opponentMigrationItemUID": "b-if",
                        "subject": "Observable",
                        "subjectSymbol": "if",
                        "subjectAction": "deprecated"
                    }
                ]
            },
            {
                "version": "6.0.0",
                "date": "2018-04-24",
                "breakingChanges": [
                    {
                        "migrationItemUID": "b-create",
                        "opponentMigrationItemUID": "d-create",
                        "subject": "Observable",
                        "subjectSymbol": "create",
                        "subjectAction": "removed",
                        "deprecationVersion": "5.5.0",
                        "breakingChangeMsg": "removed"
                    },
                    {
                        "migrationItemUID": "b-throw",
                        "opponentMigrationItemUID": "d-throw",
                        "subject": "Observable",
                        "subjectSymbol": "throw",
                        "subjectAction": "removed",
                        "deprecationVersion": "5.5.0",
                        "breakingChangeMsg": "removed"
                    }
                ]
            }
        ]))
        .unwrap()
    }

    #[test]
    fn test_full_analyze() {
        let releases = make_test_timeline();
        let report = analyze(&releases, &ChecklistOptions::default());

        assert_eq!(report.releases_checked, 2);
        assert_eq!(report.deprecations_checked, 2);
        assert_eq!(report.breaking_changes_checked, 2);
        assert!(report.duplicates.is_empty());
        assert_eq!(
            report.missing_breaking_changes.keys().collect::<Vec<_>>(),
            vec!["b-if"]
        );
        assert_eq!(
            report.wrong_deprecation_links.keys().collect::<Vec<_>>(),
            vec!["b-throw"]
        );
        assert_eq!(report.convention_violations.len(), 1);
        assert_eq!(report.findings.len(), 3);
        assert!(!report.checklist.is_clean());
    }

    #[test]
    fn test_analyze_rendered_checklist() {
        let releases = make_test_timeline();
        let report = analyze(&releases, &ChecklistOptions::default());
        assert_eq!(
            report.checklist.render(),
            [
                "- [ ] **5.5.0**  ",
                "  - **Deprecations:**  ",
                "  - [ ] d-create  ",
                "    - [ ] [exampleBefore] use source as variable name  ",
                "  - [ ] d-if  ",
                "    - [ ] [missing] b-if  ",
                "- [ ] **6.0.0**  ",
                "  - **BreakingChanges:**  ",
                "  - [ ] b-throw  ",
                "    - [ ] [missing] d-throw  ",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_findings_match_checklist_for_shared_missing_id() {
        let releases = timeline_interchange::from_timeline(&json!([
            {
                "version": "5.0.0",
                "deprecations": [{
                    "migrationItemUID": "d-first",
                    "opponentMigrationItemUID": "b-gone",
                    "subject": "Observable",
                    "subjectSymbol": "create",
                    "subjectAction": "deprecated"
                }]
            },
            {
                "version": "5.5.0",
                "deprecations": [{
                    "migrationItemUID": "d-second",
                    "opponentMigrationItemUID": "b-gone",
                    "subject": "Observable",
                    "subjectSymbol": "create",
                    "subjectAction": "deprecated"
                }]
            }
        ]))
        .unwrap();
        let report = analyze(&releases, &ChecklistOptions::default());

        assert_eq!(report.missing_breaking_changes.len(), 1);
        let items: Vec<&str> = report
            .findings
            .iter()
            .filter(|f| f.check == "missing_breaking_change")
            .map(|f| f.item_id.as_str())
            .collect();
        assert_eq!(items, vec!["d-first", "d-second"]);
        let rendered = report.checklist.render();
        assert!(rendered.contains("  - [ ] d-first  "));
        assert!(rendered.contains("  - [ ] d-second  "));
    }

    #[test]
    fn test_analyze_idempotent() {
        let releases = make_test_timeline();
        let options = ChecklistOptions::default();
        let first = analyze(&releases, &options);
        let second = analyze(&releases, &options);
        assert_eq!(first.checklist.render(), second.checklist.render());
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_analyze_empty_timeline() {
        let report = analyze(&[], &ChecklistOptions::default());
        assert!(!report.has_findings());
        assert_eq!(report.checklist.render(), NO_ERRORS);
    }

    #[test]
    fn test_analyze_report_serializable() {
        let releases = make_test_timeline();
        let report = analyze(&releases, &ChecklistOptions::default());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.is_object());
        assert!(json.get("findings").unwrap().is_array());
        assert_eq!(
            json["missing_breaking_changes"]["b-if"]["placeholder"]["breakingChangeMsg"],
            PLACEHOLDER_MESSAGE
        );
    }
}
