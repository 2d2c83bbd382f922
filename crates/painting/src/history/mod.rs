//! Snapshot ring for undo and redo
//!
//! A fixed number of full-painting snapshots, all allocated up front at the
//! session's starting grid size. Saving copies into an existing slot; when
//! the ring is full the oldest slot is evicted and its storage reused.
//!
//! `snapshot_index` means two things depending on the cursor. While
//! recording it counts the saved snapshots. While undoing it is the slot
//! currently shown on the painting, and `max_redo_index` bounds how far
//! redo can go.

mod snapshot;

pub use snapshot::{Snapshot, SnapshotState};

use tracing::debug;

/// Where the ring is in the undo/redo cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryCursor {
    #[default]
    Recording,
    Undoing { max_redo_index: usize },
}

#[derive(Debug)]
pub struct SnapshotRing {
    capacity: usize,
    /// Always `capacity` slots, oldest first
    snapshots: Vec<Snapshot>,
    snapshot_index: usize,
    cursor: HistoryCursor,
}

impl SnapshotRing {
    /// Create a ring of `capacity` snapshots (at least one), each sized for
    /// a `width` x `height` grid
    pub fn new(capacity: usize, width: u32, height: u32) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            snapshots: (0..capacity).map(|_| Snapshot::blank(width, height)).collect(),
            snapshot_index: 0,
            cursor: HistoryCursor::Recording,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn snapshot_index(&self) -> usize {
        self.snapshot_index
    }

    pub fn cursor(&self) -> HistoryCursor {
        self.cursor
    }

    pub fn is_undoing(&self) -> bool {
        matches!(self.cursor, HistoryCursor::Undoing { .. })
    }

    /// Slot `index`, oldest first. Slots at or past `snapshot_index` hold
    /// nothing restorable while recording.
    pub fn snapshot(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn can_undo(&self) -> bool {
        self.snapshot_index > 0
    }

    pub fn can_redo(&self) -> bool {
        match self.cursor {
            HistoryCursor::Undoing { max_redo_index } => {
                self.snapshot_index + 1 < max_redo_index
            }
            HistoryCursor::Recording => false,
        }
    }

    /// Record the live state, leaving undo mode
    pub fn save(&mut self, state: SnapshotState<'_>) {
        if self.snapshot_index == self.capacity {
            // Oldest snapshot moves to the end, where it gets overwritten
            self.snapshots.rotate_left(1);
            self.snapshot_index -= 1;
            debug!("History full, evicting oldest snapshot");
        }
        self.cursor = HistoryCursor::Recording;

        if self.snapshots[self.snapshot_index].overwrite(state) {
            debug!(
                "Resized snapshot {} to {}x{}",
                self.snapshot_index,
                state.layer.width(),
                state.layer.height()
            );
        }
        self.snapshot_index += 1;

        debug!(
            "Saved snapshot, index {}/{}",
            self.snapshot_index, self.capacity
        );
    }

    /// Step back one snapshot and return the state to restore.
    ///
    /// The first undo after recording saves the live state first so that
    /// redo can return to it.
    pub fn undo(&mut self, current: SnapshotState<'_>) -> Option<&Snapshot> {
        if !self.can_undo() {
            debug!("Undo: nothing to undo");
            return None;
        }

        if !self.is_undoing() {
            self.save(current);
            self.cursor = HistoryCursor::Undoing {
                max_redo_index: self.snapshot_index,
            };
            self.snapshot_index -= 1;
            if self.snapshot_index == 0 {
                // Single-slot ring: the live state evicted the only older one
                return None;
            }
        }

        self.snapshot_index -= 1;
        debug!("Undo to snapshot {}", self.snapshot_index);
        self.snapshots.get(self.snapshot_index)
    }

    /// Step forward one snapshot after an undo
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            debug!("Redo: nothing to redo");
            return None;
        }

        self.snapshot_index += 1;
        debug!("Redo to snapshot {}", self.snapshot_index);
        self.snapshots.get(self.snapshot_index)
    }

    /// Forget every snapshot, keeping allocated storage
    pub fn reset(&mut self) {
        self.snapshot_index = 0;
        self.cursor = HistoryCursor::Recording;
    }
}
