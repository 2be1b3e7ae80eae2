//! Deprecation / breaking-change link analysis.
//!
//! Every deprecation names the breaking change it announces, and every
//! breaking change names the deprecation that announced it. This module
//! resolves both directions against the [`TimelineIndex`] and reports the
//! links that do not resolve.

use crate::index::TimelineIndex;
use serde::Serialize;
use std::collections::BTreeMap;
use timeline_interchange::{BreakingChange, Deprecation, Release};

/// Message carried by a placeholder until someone writes the real one.
pub const PLACEHOLDER_MESSAGE: &str = "@TODO";

/// The breaking change a deprecation announces but nobody has authored yet.
///
/// Kept apart from [`BreakingChange`] so a placeholder can never be mistaken
/// for authored data.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderBreakingChange {
    /// The announcing deprecation's opponent identifier.
    #[serde(rename = "migrationItemUID")]
    pub migration_item_id: String,
    /// The announcing deprecation's own identifier.
    #[serde(rename = "opponentMigrationItemUID")]
    pub opponent_id: String,
    pub subject: String,
    pub subject_symbol: String,
    pub subject_action: String,
    pub deprecation_version: String,
    pub deprecation_subject_action: String,
    pub breaking_change_msg: String,
}

impl PlaceholderBreakingChange {
    /// Synthesize the counterpart announced by `deprecation` in release `version`.
    pub fn from_deprecation(version: &str, deprecation: &Deprecation) -> Self {
        PlaceholderBreakingChange {
            migration_item_id: deprecation.opponent_id.clone(),
            opponent_id: deprecation.migration_item_id.clone(),
            subject: deprecation.subject.clone(),
            subject_symbol: deprecation.subject_symbol.clone(),
            subject_action: deprecation
                .breaking_change_subject_action
                .clone()
                .unwrap_or_else(|| deprecation.subject_action.clone()),
            deprecation_version: version.to_string(),
            deprecation_subject_action: deprecation.subject_action.clone(),
            breaking_change_msg: PLACEHOLDER_MESSAGE.to_string(),
        }
    }
}

/// Result of resolving a deprecation's opponent link.
#[derive(Debug, Clone, PartialEq)]
pub enum Counterpart<'a> {
    Found(&'a BreakingChange),
    Missing(PlaceholderBreakingChange),
}

impl Counterpart<'_> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Counterpart::Missing(_))
    }
}

/// A deprecation whose announced breaking change does not exist.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MissingBreakingChange {
    pub release: String,
    pub deprecation_id: String,
    pub placeholder: PlaceholderBreakingChange,
}

/// One deprecation whose announced breaking change does not exist.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UnresolvedDeprecation {
    pub release: String,
    pub deprecation_id: String,
    /// The breaking-change identifier that failed to resolve.
    pub opponent_id: String,
}

/// A breaking change whose announcing deprecation does not exist.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WrongDeprecationLink {
    pub release: String,
    pub breaking_change_id: String,
    /// The deprecation identifier that failed to resolve.
    pub opponent_id: String,
    pub subject: String,
    pub subject_symbol: String,
}

/// Whether the breaking change announced by `deprecation` exists.
pub fn has_breaking_change(index: &TimelineIndex<'_>, deprecation: &Deprecation) -> bool {
    index
        .breaking_changes
        .contains_key(deprecation.opponent_id.as_str())
}

/// Whether the deprecation referenced by `breaking_change` exists.
pub fn has_deprecation(index: &TimelineIndex<'_>, breaking_change: &BreakingChange) -> bool {
    index
        .deprecations
        .contains_key(breaking_change.opponent_id.as_str())
}

/// Resolve the breaking change announced by `deprecation`, published in `release`.
pub fn resolve_counterpart<'a>(
    index: &TimelineIndex<'a>,
    release: &Release,
    deprecation: &Deprecation,
) -> Counterpart<'a> {
    match index.breaking_change(&deprecation.opponent_id) {
        Some(found) => Counterpart::Found(found),
        None => Counterpart::Missing(PlaceholderBreakingChange::from_deprecation(
            &release.version,
            deprecation,
        )),
    }
}

/// Collect a placeholder for every deprecation whose counterpart is missing.
///
/// Keyed by the missing breaking-change identifier. Releases and deprecations
/// are visited in input order; when two deprecations point at the same
/// missing identifier the later one wins.
pub fn missing_breaking_changes(
    releases: &[Release],
    index: &TimelineIndex<'_>,
) -> BTreeMap<String, MissingBreakingChange> {
    let mut missing = BTreeMap::new();

    for release in releases {
        for deprecation in &release.deprecations {
            if let Counterpart::Missing(placeholder) =
                resolve_counterpart(index, release, deprecation)
            {
                missing.insert(
                    deprecation.opponent_id.clone(),
                    MissingBreakingChange {
                        release: release.version.clone(),
                        deprecation_id: deprecation.migration_item_id.clone(),
                        placeholder,
                    },
                );
            }
        }
    }

    tracing::debug!(count = missing.len(), "missing breaking changes");
    missing
}

/// List every deprecation whose breaking change is missing, in input order.
///
/// Unlike [`missing_breaking_changes`], deprecations sharing a missing
/// identifier each get their own entry.
pub fn unresolved_deprecations(
    releases: &[Release],
    index: &TimelineIndex<'_>,
) -> Vec<UnresolvedDeprecation> {
    releases
        .iter()
        .flat_map(|release| {
            release
                .deprecations
                .iter()
                .filter(move |deprecation| !has_breaking_change(index, deprecation))
                .map(move |deprecation| UnresolvedDeprecation {
                    release: release.version.clone(),
                    deprecation_id: deprecation.migration_item_id.clone(),
                    opponent_id: deprecation.opponent_id.clone(),
                })
        })
        .collect()
}

/// Collect every indexed breaking change whose opponent deprecation does not exist.
///
/// Keyed by the breaking change's own identifier.
pub fn wrong_deprecation_links(index: &TimelineIndex<'_>) -> BTreeMap<String, WrongDeprecationLink> {
    let mut wrong = BTreeMap::new();

    for (id, entry) in &index.breaking_changes {
        let breaking_change = entry.item;
        if has_deprecation(index, breaking_change) {
            continue;
        }
        tracing::debug!(
            breaking_change = id,
            opponent = %breaking_change.opponent_id,
            "dangling deprecation link"
        );
        wrong.insert(
            id.to_string(),
            WrongDeprecationLink {
                release: entry.release.to_string(),
                breaking_change_id: id.to_string(),
                opponent_id: breaking_change.opponent_id.clone(),
                subject: breaking_change.subject.clone(),
                subject_symbol: breaking_change.subject_symbol.clone(),
            },
        );
    }

    wrong
}
