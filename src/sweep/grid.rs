//! Noise-probability grid shared by every model in a comparison.

use crate::channel::validate_probability;
use crate::error::{InvalidInput, Result};
use serde::Serialize;

/// Lower end of the default sweep.
pub const DEFAULT_GRID_START: f64 = 0.01;

/// Upper end of the default sweep.
pub const DEFAULT_GRID_END: f64 = 0.3;

/// Number of samples in the default sweep.
pub const DEFAULT_GRID_POINTS: usize = 12;

/// Index of the largest probability in `points`, first one on ties.
///
/// Returns 0 for an empty slice.
pub fn max_index(points: &[f64]) -> usize {
    let mut best = 0;
    for (i, &p) in points.iter().enumerate() {
        if p > points[best] {
            best = i;
        }
    }
    best
}

/// Ordered, non-empty sequence of noise probabilities in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepGrid {
    points: Vec<f64>,
}

impl SweepGrid {
    /// Builds a grid from explicit probabilities.
    pub fn new(points: Vec<f64>) -> Result<Self> {
        if points.is_empty() {
            return Err(InvalidInput::EmptyGrid.into());
        }
        for &p in &points {
            validate_probability(p)?;
        }
        Ok(Self { points })
    }

    /// `count` evenly spaced samples from `start` to `end` inclusive.
    ///
    /// A single sample sits at `start`.
    pub fn linspace(start: f64, end: f64, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(InvalidInput::EmptyGrid.into());
        }
        if !(start <= end) {
            return Err(InvalidInput::InvalidGridBounds { start, end }.into());
        }

        let points = if count == 1 {
            vec![start]
        } else {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { end } else { start + step * i as f64 })
                .collect()
        };

        Self::new(points)
    }

    /// Returns the probabilities in sweep order.
    #[inline]
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Returns the number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index of the largest probability (first one on ties).
    pub fn max_index(&self) -> usize {
        max_index(&self.points)
    }

    /// Largest probability in the grid.
    pub fn max_probability(&self) -> f64 {
        self.points[self.max_index()]
    }
}

impl Default for SweepGrid {
    fn default() -> Self {
        let step = (DEFAULT_GRID_END - DEFAULT_GRID_START) / (DEFAULT_GRID_POINTS - 1) as f64;
        let points = (0..DEFAULT_GRID_POINTS)
            .map(|i| {
                if i == DEFAULT_GRID_POINTS - 1 {
                    DEFAULT_GRID_END
                } else {
                    DEFAULT_GRID_START + step * i as f64
                }
            })
            .collect();
        Self { points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let grid = SweepGrid::default();
        assert_eq!(grid.len(), 12);
        assert_eq!(grid.points()[0], 0.01);
        assert_eq!(grid.points()[11], 0.3);
        assert_eq!(grid.max_probability(), 0.3);
    }

    #[test]
    fn test_default_matches_linspace() {
        let grid = SweepGrid::linspace(0.01, 0.3, 12).unwrap();
        assert_eq!(grid, SweepGrid::default());
    }

    #[test]
    fn test_linspace_even_spacing() {
        let grid = SweepGrid::linspace(0.0, 1.0, 5).unwrap();
        assert_eq!(grid.points(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_single_point() {
        let grid = SweepGrid::linspace(0.2, 0.2, 1).unwrap();
        assert_eq!(grid.points(), &[0.2]);
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert!(SweepGrid::new(Vec::new()).is_err());
        assert!(SweepGrid::linspace(0.0, 1.0, 0).is_err());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(SweepGrid::new(vec![0.1, 1.5]).is_err());
        assert!(SweepGrid::linspace(0.5, 0.1, 3).is_err());
    }

    #[test]
    fn test_max_index_unsorted() {
        let grid = SweepGrid::new(vec![0.2, 0.3, 0.1, 0.3]).unwrap();
        assert_eq!(grid.max_index(), 1);
    }

    #[test]
    fn test_max_index_slice() {
        assert_eq!(max_index(&[0.1, 0.2, 0.3]), 2);
        assert_eq!(max_index(&[0.3, 0.1, 0.3]), 0);
        assert_eq!(max_index(&[0.25]), 0);
        assert_eq!(max_index(&[]), 0);
    }
}
