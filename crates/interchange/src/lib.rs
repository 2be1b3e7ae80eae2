//! timeline-interchange: typed migration timeline records.
//!
//! Provides the [`Release`], [`Deprecation`] and [`BreakingChange`]
//! records, deserialization from raw timeline JSON, release-date ordering,
//! and the [`TimelineFeed`] used to hand complete snapshots to consumers.
//!
//! Records are plain data. Whether deprecations and breaking changes link
//! up correctly is decided by `timeline-analyze`, not here.

pub mod deserialize;
pub mod feed;
pub mod order;
pub mod types;

pub use deserialize::{from_timeline, load_timeline, InterchangeError};
pub use feed::{FileTimeline, TimelineFeed, TimelineSource};
pub use order::{parse_release_date, sort_by_release_date};
pub use types::*;
