//! Typed structs representing a migration timeline snapshot.
//!
//! A timeline is an ordered list of releases. Each release owns the
//! deprecations it announced and the breaking changes it shipped. The two
//! record kinds point at each other through opponent identifiers; nothing in
//! these types enforces that the links resolve.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two kinds of migration item carried by a release.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum ItemType {
    Deprecation,
    BreakingChange,
}

impl ItemType {
    /// Wire spelling, also used inside derived identifiers.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Deprecation => "deprecation",
            ItemType::BreakingChange => "breakingChange",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single release of the timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    /// Release version string (e.g. "6.0.0"). Expected unique per snapshot.
    pub version: String,
    /// Release date as `YYYY-MM-DD`, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub deprecations: Vec<Deprecation>,
    #[serde(default)]
    pub breaking_changes: Vec<BreakingChange>,
}

/// Announcement that an API subject will change in a later release.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Deprecation {
    #[serde(rename = "migrationItemUID")]
    pub migration_item_id: String,
    /// Identifier of the breaking change this deprecation announces.
    #[serde(rename = "opponentMigrationItemUID")]
    pub opponent_id: String,
    pub subject: String,
    pub subject_symbol: String,
    pub subject_action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breaking_change_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breaking_change_subject_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implication: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_after: Option<String>,
}

/// An API change that took effect in a release.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BreakingChange {
    #[serde(rename = "migrationItemUID")]
    pub migration_item_id: String,
    /// Identifier of the deprecation that announced this change.
    #[serde(rename = "opponentMigrationItemUID")]
    pub opponent_id: String,
    pub subject: String,
    pub subject_symbol: String,
    pub subject_action: String,
    pub deprecation_version: String,
    pub deprecation_subject_action: String,
    pub breaking_change_msg: String,
}

/// Derive the dataset-wide identifier of a migration item.
///
/// Records that do not carry an explicit `migrationItemUID` get one built
/// from the release they belong to and the subject they describe. Opponent
/// identifiers are derived the same way from the counterpart's version and
/// action, so both sides agree when the data is consistent.
pub fn migration_item_uid(
    version: &str,
    item_type: ItemType,
    subject: &str,
    subject_symbol: &str,
    subject_action: &str,
) -> String {
    format!(
        "{}_{}_{}-{}-{}",
        version, item_type, subject, subject_symbol, subject_action
    )
}

impl Release {
    /// Total number of migration items carried by this release.
    pub fn item_count(&self) -> usize {
        self.deprecations.len() + self.breaking_changes.len()
    }
}
