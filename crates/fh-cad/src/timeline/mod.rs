//! Change History
//!
//! The ordered list of operations that built a design. A marker splits the
//! history into active entries (before the marker) and rolled-back ones;
//! new entries are inserted at the marker.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::host::TimelineGroupId;

/// What a history entry created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelineEntryKind {
    /// A new component
    Component,
    /// A sketch
    Sketch,
    /// A solid feature
    Feature,
}

/// An entry in the change history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// ID of the created object
    pub object_id: Uuid,
    /// Kind of the created object
    pub kind: TimelineEntryKind,
    /// Display name
    pub name: String,
}

/// A named, contiguous span of history entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineGroup {
    /// Unique identifier
    pub id: TimelineGroupId,
    /// Display name
    pub name: String,
    /// Index of the first grouped entry
    pub start: usize,
    /// Index of the last grouped entry (inclusive)
    pub end: usize,
}

impl TimelineGroup {
    /// Number of grouped entries
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Groups always hold at least one entry
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether an entry index falls inside the group
    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }
}

/// The document change history
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    /// Ordered entries
    entries: Vec<TimelineEntry>,
    /// Number of active entries; new entries are inserted here
    marker: usize,
    /// Named groups
    groups: Vec<TimelineGroup>,
}

impl Timeline {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the history is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current marker position
    pub fn marker(&self) -> usize {
        self.marker
    }

    /// Move the marker; `None` if past the end
    pub fn set_marker(&mut self, position: usize) -> Option<()> {
        if position > self.entries.len() {
            return None;
        }
        self.marker = position;
        Some(())
    }

    /// Insert an entry at the marker and advance the marker past it
    pub fn insert(
        &mut self,
        object_id: Uuid,
        kind: TimelineEntryKind,
        name: impl Into<String>,
    ) -> usize {
        let index = self.marker;
        self.entries.insert(
            index,
            TimelineEntry {
                object_id,
                kind,
                name: name.into(),
            },
        );
        self.marker += 1;

        // Keep existing groups pointing at the same entries
        for group in &mut self.groups {
            if group.start >= index {
                group.start += 1;
            }
            if group.end >= index {
                group.end += 1;
            }
        }
        index
    }

    /// Group the inclusive range `start..=end`; `None` if the range is invalid
    pub fn add_group(
        &mut self,
        start: usize,
        end: usize,
        name: impl Into<String>,
    ) -> Option<&TimelineGroup> {
        if start > end || end >= self.entries.len() {
            return None;
        }
        self.groups.push(TimelineGroup {
            id: TimelineGroupId(Uuid::new_v4()),
            name: name.into(),
            start,
            end,
        });
        self.groups.last()
    }

    /// Get an entry by index
    pub fn get(&self, index: usize) -> Option<&TimelineEntry> {
        self.entries.get(index)
    }

    /// Index of the entry that created an object
    pub fn index_of(&self, object_id: Uuid) -> Option<usize> {
        self.entries.iter().position(|e| e.object_id == object_id)
    }

    /// All entries
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Entries before the marker
    pub fn active_entries(&self) -> &[TimelineEntry] {
        &self.entries[..self.marker]
    }

    /// All groups
    pub fn groups(&self) -> &[TimelineGroup] {
        &self.groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_at_end() {
        let mut timeline = Timeline::new();
        timeline.insert(Uuid::new_v4(), TimelineEntryKind::Sketch, "S1");
        timeline.insert(Uuid::new_v4(), TimelineEntryKind::Feature, "F1");

        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.marker(), 2);
        assert_eq!(timeline.get(1).unwrap().name, "F1");
    }

    #[test]
    fn test_insert_while_rolled_back() {
        let mut timeline = Timeline::new();
        timeline.insert(Uuid::new_v4(), TimelineEntryKind::Sketch, "S1");
        timeline.insert(Uuid::new_v4(), TimelineEntryKind::Feature, "F1");

        timeline.set_marker(1).unwrap();
        assert_eq!(timeline.active_entries().len(), 1);

        let index = timeline.insert(Uuid::new_v4(), TimelineEntryKind::Sketch, "S2");
        assert_eq!(index, 1);
        assert_eq!(timeline.marker(), 2);
        let names: Vec<&str> = timeline.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["S1", "S2", "F1"]);
    }

    #[test]
    fn test_marker_bounds() {
        let mut timeline = Timeline::new();
        assert!(timeline.set_marker(0).is_some());
        assert!(timeline.set_marker(1).is_none());
    }

    #[test]
    fn test_groups() {
        let mut timeline = Timeline::new();
        for name in ["A", "B", "C"] {
            timeline.insert(Uuid::new_v4(), TimelineEntryKind::Feature, name);
        }

        assert!(timeline.add_group(2, 1, "bad").is_none());
        assert!(timeline.add_group(0, 3, "bad").is_none());

        let group = timeline.add_group(1, 2, "pair").unwrap();
        assert_eq!(group.len(), 2);
        assert!(group.contains(1));
        assert!(!group.contains(0));

        // Inserting before the group shifts it
        timeline.set_marker(0).unwrap();
        timeline.insert(Uuid::new_v4(), TimelineEntryKind::Sketch, "Z");
        let group = &timeline.groups()[0];
        assert_eq!((group.start, group.end), (2, 3));
    }
}
