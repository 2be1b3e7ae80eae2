//! Snapshot delivery for migration timelines.
//!
//! A timeline source produces the complete, date-ordered release list. The
//! [`TimelineFeed`] hands each non-empty snapshot to every subscribed
//! listener. There is no partial update: every publish replaces the current
//! snapshot and listeners always see the whole list.

use crate::deserialize::{load_timeline, InterchangeError};
use crate::types::Release;
use std::path::PathBuf;

/// Produces a complete timeline snapshot, ordered by release date.
pub trait TimelineSource {
    fn fetch(&self) -> Result<Vec<Release>, InterchangeError>;

    /// Human-readable description of where the snapshot comes from.
    fn describe(&self) -> String;
}

/// A timeline stored as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileTimeline {
    pub path: PathBuf,
}

impl FileTimeline {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileTimeline { path: path.into() }
    }
}

impl TimelineSource for FileTimeline {
    fn fetch(&self) -> Result<Vec<Release>, InterchangeError> {
        load_timeline(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

type Listener<'a> = Box<dyn FnMut(&[Release]) + 'a>;

/// Single-value notification channel for timeline snapshots.
#[derive(Default)]
pub struct TimelineFeed<'a> {
    current: Option<Vec<Release>>,
    listeners: Vec<Listener<'a>>,
}

impl<'a> TimelineFeed<'a> {
    pub fn new() -> Self {
        TimelineFeed {
            current: None,
            listeners: Vec::new(),
        }
    }

    /// Register a listener. If a snapshot is already available the listener
    /// is invoked with it right away.
    pub fn subscribe(&mut self, listener: impl FnMut(&[Release]) + 'a) {
        let mut listener: Listener<'a> = Box::new(listener);
        if let Some(current) = self.current.as_deref() {
            listener(current);
        }
        self.listeners.push(listener);
    }

    /// Replace the current snapshot and notify every listener.
    ///
    /// Empty snapshots are dropped: they neither replace the current value
    /// nor reach listeners. Returns whether listeners were notified.
    pub fn publish(&mut self, releases: Vec<Release>) -> bool {
        if releases.is_empty() {
            tracing::debug!("empty timeline snapshot ignored");
            return false;
        }

        tracing::debug!(
            releases = releases.len(),
            listeners = self.listeners.len(),
            "publishing timeline snapshot"
        );

        let current: &[Release] = self.current.insert(releases);
        for listener in self.listeners.iter_mut() {
            listener(current);
        }
        true
    }

    /// Fetch a fresh snapshot from `source` and publish it.
    pub fn refresh(&mut self, source: &dyn TimelineSource) -> Result<bool, InterchangeError> {
        let releases = source.fetch()?;
        tracing::debug!(source = %source.describe(), "timeline fetched");
        Ok(self.publish(releases))
    }

    /// The latest published snapshot, if any.
    pub fn current(&self) -> Option<&[Release]> {
        self.current.as_deref()
    }
}
