//! Deserialization from raw timeline JSON into typed records.
//!
//! The main entry point is [`from_timeline`], which takes a
//! `&serde_json::Value` and produces the list of [`Release`]s in input
//! order. [`load_timeline`] wraps it with file reading and date ordering.

use crate::order::sort_by_release_date;
use crate::types::*;
use std::path::{Path, PathBuf};

/// Errors while reading or deserializing a timeline.
#[derive(Debug, thiserror::Error)]
pub enum InterchangeError {
    /// The timeline file could not be read.
    #[error("error reading '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The timeline file is not valid JSON.
    #[error("error parsing JSON in '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The timeline is missing a required top-level field.
    #[error("timeline missing required field: '{field}'")]
    MissingField { field: String },

    /// A release or migration item is missing a required field.
    #[error("{kind} '{id}': {message}")]
    ConstructError {
        kind: String,
        id: String,
        message: String,
    },

    /// The timeline structure is invalid.
    #[error("invalid timeline: {0}")]
    InvalidTimeline(String),

    /// A release date is not a `YYYY-MM-DD` calendar date.
    #[error("release '{version}' has invalid date '{date}'")]
    InvalidDate { version: String, date: String },
}

/// Read a timeline JSON file and return its releases ordered by release date.
pub fn load_timeline(path: &Path) -> Result<Vec<Release>, InterchangeError> {
    let content = std::fs::read_to_string(path).map_err(|source| InterchangeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|source| InterchangeError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    let mut releases = from_timeline(&value)?;
    sort_by_release_date(&mut releases)?;

    tracing::debug!(
        path = %path.display(),
        releases = releases.len(),
        "loaded migration timeline"
    );

    Ok(releases)
}

/// Deserialize a raw timeline into typed releases.
///
/// Accepts either a top-level array of releases or an object carrying a
/// `releases` array. Release order is preserved exactly as given.
pub fn from_timeline(timeline: &serde_json::Value) -> Result<Vec<Release>, InterchangeError> {
    let releases = match timeline {
        serde_json::Value::Array(arr) => arr,
        serde_json::Value::Object(_) => timeline
            .get("releases")
            .and_then(|r| r.as_array())
            .ok_or_else(|| InterchangeError::MissingField {
                field: "releases".to_string(),
            })?,
        _ => {
            return Err(InterchangeError::InvalidTimeline(
                "expected an array of releases or an object with a 'releases' array".to_string(),
            ))
        }
    };

    releases
        .iter()
        .enumerate()
        .map(|(position, obj)| parse_release(obj, position))
        .collect()
}

// ── Parsing helpers ─────────────────────────────────────────────────

fn optional_str(obj: &serde_json::Value, field: &str) -> Option<String> {
    obj.get(field)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

fn required_str(
    obj: &serde_json::Value,
    field: &str,
    kind: &str,
    id: &str,
) -> Result<String, InterchangeError> {
    optional_str(obj, field).ok_or_else(|| InterchangeError::ConstructError {
        kind: kind.to_string(),
        id: id.to_string(),
        message: format!("missing '{}' field", field),
    })
}

fn parse_items<'a>(
    obj: &'a serde_json::Value,
    field: &str,
    version: &str,
) -> Result<&'a [serde_json::Value], InterchangeError> {
    match obj.get(field) {
        None | Some(serde_json::Value::Null) => Ok(&[][..]),
        Some(serde_json::Value::Array(arr)) => Ok(arr.as_slice()),
        Some(_) => Err(InterchangeError::ConstructError {
            kind: "Release".to_string(),
            id: version.to_string(),
            message: format!("'{}' must be an array", field),
        }),
    }
}

fn parse_release(obj: &serde_json::Value, position: usize) -> Result<Release, InterchangeError> {
    let version = required_str(obj, "version", "Release", &format!("#{}", position))?;
    let date = optional_str(obj, "date");

    let deprecations = parse_items(obj, "deprecations", &version)?
        .iter()
        .map(|d| parse_deprecation(d, &version))
        .collect::<Result<Vec<_>, _>>()?;

    let breaking_changes = parse_items(obj, "breakingChanges", &version)?
        .iter()
        .map(|b| parse_breaking_change(b, &version))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Release {
        version,
        date,
        deprecations,
        breaking_changes,
    })
}

fn parse_deprecation(obj: &serde_json::Value, version: &str) -> Result<Deprecation, InterchangeError> {
    let explicit_id = optional_str(obj, "migrationItemUID");
    let label = explicit_id.clone().unwrap_or_else(|| version.to_string());

    let subject = required_str(obj, "subject", "Deprecation", &label)?;
    let subject_symbol = required_str(obj, "subjectSymbol", "Deprecation", &label)?;
    let subject_action = required_str(obj, "subjectAction", "Deprecation", &label)?;
    let breaking_change_version = optional_str(obj, "breakingChangeVersion");
    let breaking_change_subject_action = optional_str(obj, "breakingChangeSubjectAction");

    let migration_item_id = explicit_id.unwrap_or_else(|| {
        migration_item_uid(
            version,
            ItemType::Deprecation,
            &subject,
            &subject_symbol,
            &subject_action,
        )
    });

    let opponent_id = match (
        optional_str(obj, "opponentMigrationItemUID"),
        &breaking_change_version,
    ) {
        (Some(id), _) => id,
        (None, Some(bc_version)) => migration_item_uid(
            bc_version,
            ItemType::BreakingChange,
            &subject,
            &subject_symbol,
            breaking_change_subject_action
                .as_deref()
                .unwrap_or(&subject_action),
        ),
        (None, None) => {
            return Err(InterchangeError::ConstructError {
                kind: "Deprecation".to_string(),
                id: migration_item_id,
                message: "missing both 'opponentMigrationItemUID' and 'breakingChangeVersion'"
                    .to_string(),
            })
        }
    };

    Ok(Deprecation {
        migration_item_id,
        opponent_id,
        subject,
        subject_symbol,
        subject_action,
        breaking_change_version,
        breaking_change_subject_action,
        reason: optional_str(obj, "reason"),
        implication: optional_str(obj, "implication"),
        example_before: optional_str(obj, "exampleBefore"),
        example_after: optional_str(obj, "exampleAfter"),
    })
}

fn parse_breaking_change(
    obj: &serde_json::Value,
    version: &str,
) -> Result<BreakingChange, InterchangeError> {
    let explicit_id = optional_str(obj, "migrationItemUID");
    let label = explicit_id.clone().unwrap_or_else(|| version.to_string());

    let subject = required_str(obj, "subject", "BreakingChange", &label)?;
    let subject_symbol = required_str(obj, "subjectSymbol", "BreakingChange", &label)?;
    let subject_action = required_str(obj, "subjectAction", "BreakingChange", &label)?;
    let deprecation_version = required_str(obj, "deprecationVersion", "BreakingChange", &label)?;
    let deprecation_subject_action =
        optional_str(obj, "deprecationSubjectAction").unwrap_or_else(|| subject_action.clone());
    let breaking_change_msg = optional_str(obj, "breakingChangeMsg").unwrap_or_default();

    let migration_item_id = explicit_id.unwrap_or_else(|| {
        migration_item_uid(
            version,
            ItemType::BreakingChange,
            &subject,
            &subject_symbol,
            &subject_action,
        )
    });

    let opponent_id = optional_str(obj, "opponentMigrationItemUID").unwrap_or_else(|| {
        migration_item_uid(
            &deprecation_version,
            ItemType::Deprecation,
            &subject,
            &subject_symbol,
            &deprecation_subject_action,
        )
    });

    Ok(BreakingChange {
        migration_item_id,
        opponent_id,
        subject,
        subject_symbol,
        subject_action,
        deprecation_version,
        deprecation_subject_action,
        breaking_change_msg,
    })
}
