//! Lookup tables over a timeline snapshot.
//!
//! Builds three maps from the release list: release version, deprecation
//! identifier and breaking-change identifier. The first occurrence of a key
//! is kept; every later occurrence is recorded as a [`Duplicate`] and
//! logged before it is discarded.

use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use timeline_interchange::{BreakingChange, Deprecation, Release};

/// Which lookup table a duplicate key was found in.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKind {
    Release,
    Deprecation,
    BreakingChange,
}

impl fmt::Display for DuplicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DuplicateKind::Release => "release",
            DuplicateKind::Deprecation => "deprecation",
            DuplicateKind::BreakingChange => "breakingChange",
        })
    }
}

/// A key seen more than once. The recorded occurrence is the discarded one.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Duplicate {
    pub kind: DuplicateKind,
    pub id: String,
    /// Version of the release holding the discarded occurrence.
    pub release: String,
}

/// A migration item together with the version of the release that owns it.
#[derive(Debug)]
pub struct Indexed<'a, T> {
    pub release: &'a str,
    pub item: &'a T,
}

impl<T> Clone for Indexed<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Indexed<'_, T> {}

/// Lookup tables for one timeline snapshot.
#[derive(Debug, Clone, Default)]
pub struct TimelineIndex<'a> {
    pub releases: BTreeMap<&'a str, &'a Release>,
    pub deprecations: BTreeMap<&'a str, Indexed<'a, Deprecation>>,
    pub breaking_changes: BTreeMap<&'a str, Indexed<'a, BreakingChange>>,
    /// Discarded occurrences, in input order.
    pub duplicates: Vec<Duplicate>,
}

impl<'a> TimelineIndex<'a> {
    /// Index a complete, date-ordered release list.
    pub fn build(releases: &'a [Release]) -> Self {
        let mut index = TimelineIndex::default();

        for release in releases {
            let version = release.version.as_str();

            if !insert_first(&mut index.releases, version, release) {
                index.record_duplicate(DuplicateKind::Release, version, version);
            }

            for deprecation in &release.deprecations {
                let id = deprecation.migration_item_id.as_str();
                let entry = Indexed {
                    release: version,
                    item: deprecation,
                };
                if !insert_first(&mut index.deprecations, id, entry) {
                    index.record_duplicate(DuplicateKind::Deprecation, id, version);
                }
            }

            for breaking_change in &release.breaking_changes {
                let id = breaking_change.migration_item_id.as_str();
                let entry = Indexed {
                    release: version,
                    item: breaking_change,
                };
                if !insert_first(&mut index.breaking_changes, id, entry) {
                    index.record_duplicate(DuplicateKind::BreakingChange, id, version);
                }
            }
        }

        tracing::debug!(
            releases = index.releases.len(),
            deprecations = index.deprecations.len(),
            breaking_changes = index.breaking_changes.len(),
            duplicates = index.duplicates.len(),
            "timeline indexed"
        );

        index
    }

    pub fn release(&self, version: &str) -> Option<&'a Release> {
        self.releases.get(version).copied()
    }

    pub fn deprecation(&self, id: &str) -> Option<&'a Deprecation> {
        self.deprecations.get(id).map(|d| d.item)
    }

    pub fn breaking_change(&self, id: &str) -> Option<&'a BreakingChange> {
        self.breaking_changes.get(id).map(|b| b.item)
    }

    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }

    fn record_duplicate(&mut self, kind: DuplicateKind, id: &str, release: &str) {
        tracing::warn!(%kind, id, release, "duplicate identifier, keeping first occurrence");
        self.duplicates.push(Duplicate {
            kind,
            id: id.to_string(),
            release: release.to_string(),
        });
    }
}

/// Insert `value` unless `key` is already present. Returns false on a duplicate.
fn insert_first<'a, V>(map: &mut BTreeMap<&'a str, V>, key: &'a str, value: V) -> bool {
    match map.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(value);
            true
        }
        Entry::Occupied(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deprecation(id: &str, opponent: &str) -> Deprecation {
        Deprecation {
            migration_item_id: id.to_string(),
            opponent_id: opponent.to_string(),
            subject: "Observable".to_string(),
            subject_symbol: "create".to_string(),
            subject_action: "deprecated".to_string(),
            breaking_change_version: None,
            breaking_change_subject_action: None,
            reason: None,
            implication: None,
            example_before: None,
            example_after: None,
        }
    }

    fn breaking_change(id: &str, opponent: &str, msg: &str) -> BreakingChange {
        BreakingChange {
            migration_item_id: id.to_string(),
            opponent_id: opponent.to_string(),
            subject: "Observable".to_string(),
            subject_symbol: "create".to_string(),
            subject_action: "removed".to_string(),
            deprecation_version: "5.0.0".to_string(),
            deprecation_subject_action: "deprecated".to_string(),
            breaking_change_msg: msg.to_string(),
        }
    }

    fn release(
        version: &str,
        deprecations: Vec<Deprecation>,
        breaking_changes: Vec<BreakingChange>,
    ) -> Release {
        Release {
            version: version.to_string(),
            date: None,
            deprecations,
            breaking_changes,
        }
    }

    #[test]
    fn test_index_all_maps() {
        let releases = vec![
            release("5.0.0", vec![deprecation("d1", "b1")], vec![]),
            release("6.0.0", vec![], vec![breaking_change("b1", "d1", "gone")]),
        ];
        let index = TimelineIndex::build(&releases);

        assert_eq!(index.releases.len(), 2);
        assert_eq!(index.release("6.0.0").unwrap().version, "6.0.0");
        assert_eq!(index.deprecation("d1").unwrap().opponent_id, "b1");
        assert_eq!(index.breaking_changes["b1"].release, "6.0.0");
        assert!(!index.has_duplicates());
    }

    #[test]
    fn test_duplicate_release_keeps_first() {
        let releases = vec![
            release("1.0.0", vec![deprecation("d1", "b1")], vec![]),
            release("1.0.0", vec![deprecation("d2", "b2")], vec![]),
        ];
        let index = TimelineIndex::build(&releases);

        assert_eq!(index.releases.len(), 1);
        let survivor = index.release("1.0.0").unwrap();
        assert_eq!(survivor.deprecations[0].migration_item_id, "d1");
        assert_eq!(
            index.duplicates,
            vec![Duplicate {
                kind: DuplicateKind::Release,
                id: "1.0.0".to_string(),
                release: "1.0.0".to_string(),
            }]
        );
        // Items of the duplicate release are still indexed.
        assert!(index.deprecation("d2").is_some());
    }

    #[test]
    fn test_duplicate_breaking_change_keeps_first() {
        let releases = vec![
            release("6.0.0", vec![], vec![breaking_change("b1", "d1", "first")]),
            release("7.0.0", vec![], vec![breaking_change("b1", "d1", "second")]),
        ];
        let index = TimelineIndex::build(&releases);

        assert_eq!(index.breaking_change("b1").unwrap().breaking_change_msg, "first");
        assert_eq!(index.duplicates.len(), 1);
        assert_eq!(index.duplicates[0].kind, DuplicateKind::BreakingChange);
        assert_eq!(index.duplicates[0].release, "7.0.0");
    }

    #[test]
    fn test_duplicate_deprecation_within_release() {
        let releases = vec![release(
            "5.0.0",
            vec![deprecation("d1", "b1"), deprecation("d1", "b9")],
            vec![],
        )];
        let index = TimelineIndex::build(&releases);

        assert_eq!(index.deprecation("d1").unwrap().opponent_id, "b1");
        assert_eq!(index.duplicates[0].kind, DuplicateKind::Deprecation);
        assert_eq!(index.duplicates[0].id, "d1");
    }

    #[test]
    fn test_empty_timeline() {
        let index = TimelineIndex::build(&[]);
        assert!(index.releases.is_empty());
        assert!(index.deprecations.is_empty());
        assert!(index.breaking_changes.is_empty());
        assert!(!index.has_duplicates());
    }

    #[test]
    fn test_duplicate_kind_display() {
        assert_eq!(DuplicateKind::Release.to_string(), "release");
        assert_eq!(DuplicateKind::BreakingChange.to_string(), "breakingChange");
    }
}
