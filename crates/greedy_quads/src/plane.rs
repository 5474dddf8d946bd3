//! Flat 2D buffer holding one slice's face mask.

use crate::core::{Facing, Rect};

/// A value stored in a slice mask.
///
/// `Default` is the empty cell. Cells merge only with equal cells.
pub trait MaskCell: Copy + Default + PartialEq {
    /// Cell value for a slice boundary with occupancy `front` at the cursor
    /// and `behind` one step back along the normal.
    fn from_transition(front: bool, behind: bool) -> Self;

    #[inline]
    fn is_filled(&self) -> bool {
        *self != Self::default()
    }
}

impl MaskCell for bool {
    #[inline]
    fn from_transition(front: bool, behind: bool) -> Self {
        front != behind
    }
}

impl MaskCell for Option<Facing> {
    #[inline]
    fn from_transition(front: bool, behind: bool) -> Self {
        match (front, behind) {
            (false, true) => Some(Facing::Positive),
            (true, false) => Some(Facing::Negative),
            _ => None,
        }
    }
}

/// Row-major 2D grid addressed by `(u, v)`.
///
/// `u` is the column (tangent axis), `v` the row (bitangent axis).
#[derive(Clone, Debug)]
pub struct PlaneBuffer<C = bool> {
    width: usize,
    height: usize,
    cells: Vec<C>,
}

impl<C: MaskCell> PlaneBuffer<C> {
    /// Create a buffer with every cell empty.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![C::default(); width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, u: usize, v: usize) -> usize {
        debug_assert!(u < self.width && v < self.height, "Plane coordinates out of bounds");
        v * self.width + u
    }

    #[inline]
    pub fn get(&self, u: usize, v: usize) -> C {
        self.cells[self.index(u, v)]
    }

    #[inline]
    pub fn set(&mut self, u: usize, v: usize, value: C) {
        let i = self.index(u, v);
        self.cells[i] = value;
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(C::default());
    }

    /// Reset only the cells inside `rect`.
    pub fn clear_rect(&mut self, rect: Rect) {
        debug_assert!(
            rect.u + rect.width <= self.width && rect.v + rect.height <= self.height,
            "Rectangle exceeds plane bounds"
        );
        for v in rect.v..rect.v + rect.height {
            let row = v * self.width;
            self.cells[row + rect.u..row + rect.u + rect.width].fill(C::default());
        }
    }

    /// Count non-empty cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_filled()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| !c.is_filled())
    }
}
