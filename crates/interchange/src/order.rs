//! Release ordering by release date.
//!
//! Analysis assumes releases arrive oldest first. Sorting happens here, at
//! the loading boundary, so the analysis passes never reorder their input.

use crate::deserialize::InterchangeError;
use crate::types::Release;
use time::macros::format_description;
use time::Date;

/// Parse a `YYYY-MM-DD` release date.
pub fn parse_release_date(date: &str) -> Option<Date> {
    Date::parse(date, format_description!("[year]-[month]-[day]")).ok()
}

/// Stable ascending sort by release date.
///
/// Releases without a date keep their relative order and go after every
/// dated release. Releases sharing a date keep their input order.
pub fn sort_by_release_date(releases: &mut [Release]) -> Result<(), InterchangeError> {
    for release in releases.iter() {
        if let Some(raw) = &release.date {
            if parse_release_date(raw).is_none() {
                return Err(InterchangeError::InvalidDate {
                    version: release.version.clone(),
                    date: raw.clone(),
                });
            }
        }
    }

    releases.sort_by_cached_key(|release| {
        let date = release.date.as_deref().and_then(parse_release_date);
        (date.is_none(), date)
    });
    Ok(())
}
