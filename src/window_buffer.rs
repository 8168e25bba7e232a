//! Fixed-capacity sliding window of tracked landmark points.
//!
//! The window keeps the latest `capacity` points in temporal order and
//! evicts the oldest first once full.

use crate::{
    constants::MAX_FRAMES_TO_ANALYZE,
    landmarks::{Axis, Point3},
};
use std::collections::VecDeque;

/// Sliding window over a single tracked point
#[derive(Debug, Clone)]
pub struct WindowBuffer {
    capacity: usize,
    points: VecDeque<Point3>,
}

impl WindowBuffer {
    /// Create an empty window holding at most `capacity` points
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            points: VecDeque::with_capacity(capacity.min(MAX_FRAMES_TO_ANALYZE)),
        }
    }

    /// Append a point, evicting the oldest if the window overflows
    pub fn push(&mut self, point: Point3) {
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Drop every point at once
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Whether the window holds `capacity` points
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.points.len() == self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Points from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Point3> + '_ {
        self.points.iter()
    }

    /// Values of one coordinate from oldest to newest
    pub fn values(&self, axis: Axis) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(move |p| p.coord(axis))
    }

    /// Range (max - min) of one coordinate, `0.0` when empty
    #[must_use]
    pub fn spread(&self, axis: Axis) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        let min = self.values(axis).fold(f64::INFINITY, f64::min);
        let max = self.values(axis).fold(f64::NEG_INFINITY, f64::max);
        max - min
    }

    /// Absolute change of one coordinate between consecutive points
    pub fn speeds(&self, axis: Axis) -> impl Iterator<Item = f64> + '_ {
        self.values(axis)
            .zip(self.values(axis).skip(1))
            .map(|(prev, next)| (next - prev).abs())
    }
}
