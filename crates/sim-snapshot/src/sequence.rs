//! Ordered snapshot sequences for playback.

use crate::error::SnapshotError;
use crate::grid::Grid;

/// A non-empty, ordered list of grid snapshots, one per time step.
///
/// The order is whatever the caller supplied; playback never reorders.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotSequence {
    frames: Vec<Grid>,
}

impl SnapshotSequence {
    /// Wraps the frames, rejecting an empty list.
    pub fn new(frames: Vec<Grid>) -> Result<Self, SnapshotError> {
        if frames.is_empty() {
            return Err(SnapshotError::EmptySequence);
        }
        Ok(Self { frames })
    }

    pub fn frames(&self) -> &[Grid] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn first(&self) -> &Grid {
        &self.frames[0]
    }

    /// Largest width and height across all frames.
    pub fn bounds(&self) -> (u32, u32) {
        self.frames.iter().fold((1, 1), |(w, h), grid| {
            (w.max(grid.width()), h.max(grid.height()))
        })
    }

    pub fn into_frames(self) -> Vec<Grid> {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    #[test]
    fn test_empty_sequence_rejected() {
        assert!(matches!(
            SnapshotSequence::new(Vec::new()),
            Err(SnapshotError::EmptySequence)
        ));
    }

    #[test]
    fn test_single_frame_accepted() {
        let sequence = SnapshotSequence::new(vec![Grid::from_cells(Vec::new())]).unwrap();
        assert_eq!(sequence.len(), 1);
        assert!(!sequence.is_empty());
    }

    #[test]
    fn test_bounds_cover_every_frame() {
        let sequence = SnapshotSequence::new(vec![
            Grid::from_cells(vec![Cell::new(4, 0)]),
            Grid::from_cells(vec![Cell::new(0, 6)]),
        ])
        .unwrap();
        assert_eq!(sequence.bounds(), (5, 7));
        assert_eq!(sequence.first().width(), 5);
    }
}
