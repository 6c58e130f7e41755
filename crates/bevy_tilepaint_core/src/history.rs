//! Snapshot-based undo history

use crate::EditSnapshot;

/// Stack of edit snapshots.
///
/// The first entry is the baseline (state at load or clear time) and is
/// never popped, so there is always a current state to show.
#[derive(Debug, Clone)]
pub struct EditHistory {
    snapshots: Vec<EditSnapshot>,
}

impl EditHistory {
    pub fn new(baseline: EditSnapshot) -> Self {
        Self {
            snapshots: vec![baseline],
        }
    }

    /// Record a completed edit
    pub fn push(&mut self, snapshot: EditSnapshot) {
        self.snapshots.push(snapshot);
    }

    /// Drop the latest snapshot and return the one before it.
    ///
    /// At the baseline this does nothing and returns the baseline.
    pub fn undo(&mut self) -> &EditSnapshot {
        if self.snapshots.len() > 1 {
            self.snapshots.pop();
        }
        self.peek()
    }

    /// Current (latest) snapshot
    pub fn peek(&self) -> &EditSnapshot {
        // Never empty: constructed with a baseline and undo keeps it
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// Discard everything and start over from `baseline`
    pub fn reset(&mut self, baseline: EditSnapshot) {
        self.snapshots.clear();
        self.snapshots.push(baseline);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Never true: the baseline is always retained
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.snapshots.len() > 1
    }
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(EditSnapshot::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tileset::test_tileset;
    use crate::{GridIndex, PlacedTiles};

    fn collision_at(x: i32, y: i32) -> EditSnapshot {
        EditSnapshot::empty().with_collision_toggled(GridIndex::new(x, y))
    }

    #[test]
    fn test_undo_floor() {
        let baseline = collision_at(0, 0);
        let mut history = EditHistory::new(baseline.clone());

        for _ in 0..5 {
            assert_eq!(history.undo(), &baseline);
        }
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_undo_restores_previous() {
        let a = collision_at(1, 1);
        let b = a.with_collision_toggled(GridIndex::new(2, 2));

        let mut history = EditHistory::default();
        history.push(a.clone());
        history.push(b.clone());
        assert!(history.can_undo());

        assert_eq!(history.undo(), &a);
        assert_eq!(history.peek(), &a);
        assert_eq!(history.undo(), &EditSnapshot::empty());
        assert_eq!(history.undo(), &EditSnapshot::empty());
    }

    #[test]
    fn test_edits_after_undo_leave_history_intact() {
        let tileset = test_tileset(2, 2, 16);
        let tile = tileset.extract(GridIndex::new(1, 0)).unwrap();
        let a = EditSnapshot::new(
            [(GridIndex::new(0, 0), tile)].into_iter().collect::<PlacedTiles>(),
            Default::default(),
        );
        let b = a.with_erased(GridIndex::new(0, 0));

        let mut history = EditHistory::default();
        history.push(a.clone());
        history.push(b);

        let restored = history.undo().clone();
        let edited = restored.with_collision_toggled(GridIndex::new(4, 4));

        assert_eq!(restored, a);
        assert_eq!(history.peek(), &a);
        assert_ne!(&edited, history.peek());
    }

    #[test]
    fn test_reset_reseeds_floor() {
        let mut history = EditHistory::default();
        history.push(collision_at(1, 0));
        history.push(collision_at(2, 0));

        let baseline = collision_at(9, 9);
        history.reset(baseline.clone());

        assert_eq!(history.len(), 1);
        assert_eq!(history.undo(), &baseline);
    }
}
