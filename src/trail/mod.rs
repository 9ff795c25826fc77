// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Trail-based rollback for tree rewriting.
//!
//! While a checkpoint is open, every slot the tree overwrites is first
//! recorded here together with its previous contents. Rewinding replays the
//! recorded slots in reverse, so the tree returns to exactly the state it had
//! when the checkpoint was taken. Committing forgets the recorded slots.
//!
//! The trail knows nothing about tree topology: it stores opaque slot values
//! keyed by slot index, and the [`Tree`](crate::tree::Tree) is responsible for
//! writing them back.

/// A single entry in the trail, recording the previous contents of one slot.
#[derive(Debug, Clone)]
pub(crate) struct TrailEntry<S> {
    /// Slot index that was overwritten.
    pub(crate) index: u32,
    /// The slot contents before the change (`None` for a vacant slot).
    pub(crate) old: Option<S>,
}

/// Allocation state captured when a checkpoint is opened.
///
/// Slot contents are restored from the trail entries; the allocation
/// bookkeeping is small and restored wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Checkpoint {
    /// Trail length when the checkpoint was taken.
    pub(crate) entries: usize,
    /// Number of arena slots at the checkpoint.
    pub(crate) slots: usize,
    /// Free list at the checkpoint.
    pub(crate) free: Vec<u32>,
    /// Root at the checkpoint.
    pub(crate) root: Option<u32>,
}

/// Undo log for slot writes.
///
/// # Memory Model
///
/// Entries accumulate only while at least one checkpoint is open. Outside a
/// checkpoint the tree mutates freely and nothing is recorded, so long-lived
/// trees carry no trail overhead between calls.
#[derive(Debug, Clone)]
pub struct Trail<S> {
    /// All trail entries recorded since the outermost open checkpoint
    entries: Vec<TrailEntry<S>>,
    /// Stack of open checkpoints for nested rollback
    checkpoints: Vec<Checkpoint>,
}

impl<S> Trail<S> {
    /// Create a new empty trail.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            checkpoints: Vec::new(),
        }
    }

    /// Open a checkpoint.
    ///
    /// Returns the checkpoint depth after opening it.
    pub(crate) fn checkpoint(&mut self, slots: usize, free: Vec<u32>, root: Option<u32>) -> usize {
        self.checkpoints.push(Checkpoint {
            entries: self.entries.len(),
            slots,
            free,
            root,
        });
        self.checkpoints.len()
    }

    /// Whether slot writes currently need recording.
    pub fn is_recording(&self) -> bool {
        !self.checkpoints.is_empty()
    }

    /// Record the previous contents of a slot (internal use only).
    ///
    /// Does nothing when no checkpoint is open.
    pub(crate) fn record(&mut self, index: u32, old: Option<S>) {
        if self.is_recording() {
            self.entries.push(TrailEntry { index, old });
        }
    }

    /// Close the most recent checkpoint, discarding it.
    ///
    /// Returns the checkpoint together with the entries recorded since, newest
    /// first, ready to be written back. Returns `None` when no checkpoint is
    /// open.
    pub(crate) fn rewind(&mut self) -> Option<(Checkpoint, Vec<TrailEntry<S>>)> {
        let checkpoint = self.checkpoints.pop()?;
        let mut undo: Vec<_> = self.entries.drain(checkpoint.entries..).collect();
        undo.reverse();
        Some((checkpoint, undo))
    }

    /// Close the most recent checkpoint, keeping every change made since.
    ///
    /// Entries stay on the trail while an outer checkpoint still needs them.
    /// Returns false if there was no checkpoint to commit.
    pub fn commit(&mut self) -> bool {
        if self.checkpoints.pop().is_none() {
            return false;
        }
        if self.checkpoints.is_empty() {
            self.entries.clear();
        }
        true
    }

    /// Get the current number of entries in the trail.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the trail is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the number of open checkpoints.
    pub fn checkpoint_depth(&self) -> usize {
        self.checkpoints.len()
    }
}

impl<S> Default for Trail<S> {
    fn default() -> Self {
        Self::new()
    }
}
