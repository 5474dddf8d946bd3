//! Occupancy sources for the mesher.
//!
//! The mesher never indexes voxel storage directly. It asks an [`Occupancy`]
//! (or a fallible [`TryOccupancy`]) whether a coordinate is solid, so sparse,
//! procedural or paged stores can feed it without materializing a grid.
//!
//! Every source must answer `false` outside `[0, dims)` on all six sides.
//! [`Bounded`] enforces that for sources that don't, and [`DenseOccupancy`]
//! is a bit-packed grid that honours it out of the box.

use std::convert::Infallible;
use std::marker::PhantomData;

use glam::IVec3;
use thiserror::Error;

use crate::core::Dims;

/// Infallible occupancy predicate.
pub trait Occupancy {
    fn is_solid(&self, p: IVec3) -> bool;

    /// Clip this source to `[0, dims)` on every axis.
    fn bounded(self, dims: Dims) -> Bounded<Self>
    where
        Self: Sized,
    {
        Bounded { inner: self, dims }
    }
}

impl<F> Occupancy for F
where
    F: Fn(IVec3) -> bool,
{
    #[inline]
    fn is_solid(&self, p: IVec3) -> bool {
        self(p)
    }
}

/// Occupancy predicate that may fail.
///
/// The mesher stops at the first error and hands it back unchanged.
pub trait TryOccupancy {
    type Error;

    fn try_is_solid(&self, p: IVec3) -> Result<bool, Self::Error>;
}

impl<O: Occupancy + ?Sized> TryOccupancy for O {
    type Error = Infallible;

    #[inline]
    fn try_is_solid(&self, p: IVec3) -> Result<bool, Infallible> {
        Ok(self.is_solid(p))
    }
}

/// Adapts a `Fn(IVec3) -> Result<bool, E>` closure into a [`TryOccupancy`].
pub struct TryFn<F, E> {
    f: F,
    _error: PhantomData<fn() -> E>,
}

impl<F, E> TryFn<F, E>
where
    F: Fn(IVec3) -> Result<bool, E>,
{
    pub fn new(f: F) -> Self {
        Self { f, _error: PhantomData }
    }
}

impl<F, E> TryOccupancy for TryFn<F, E>
where
    F: Fn(IVec3) -> Result<bool, E>,
{
    type Error = E;

    #[inline]
    fn try_is_solid(&self, p: IVec3) -> Result<bool, E> {
        (self.f)(p)
    }
}

/// Wraps a source and reports `false` outside `[0, dims)`.
#[derive(Clone, Copy, Debug)]
pub struct Bounded<O> {
    inner: O,
    dims: Dims,
}

impl<O: Occupancy> Occupancy for Bounded<O> {
    #[inline]
    fn is_solid(&self, p: IVec3) -> bool {
        in_bounds(self.dims, p) && self.inner.is_solid(p)
    }
}

#[inline]
fn in_bounds(dims: Dims, p: IVec3) -> bool {
    (0..3).all(|axis| p[axis] >= 0 && p[axis] < dims[axis])
}

/// Errors from building or editing a [`DenseOccupancy`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("dimension {axis} must be non-negative (got {value})")]
    NegativeDimension { axis: usize, value: i32 },
    #[error("grid of {dims:?} voxels is too large to allocate")]
    TooLarge { dims: Dims },
    #[error("expected {expected} voxels for the given dimensions, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("position {position} is outside the grid {dims:?}")]
    OutOfBounds { position: IVec3, dims: Dims },
}

/// Dense occupancy grid, one bit per voxel.
///
/// Voxels are stored in X-major order: `x + y * width + z * width * height`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DenseOccupancy {
    dims: Dims,
    words: Vec<u64>,
}

impl DenseOccupancy {
    /// Create an empty grid.
    pub fn new(dims: Dims) -> Result<Self, GridError> {
        let volume = checked_volume(dims)?;
        Ok(Self {
            dims,
            words: vec![0u64; volume.div_ceil(64)],
        })
    }

    /// Build from one flag per voxel in X-major order.
    ///
    /// # Example
    /// ```
    /// use greedy_quads::DenseOccupancy;
    /// use glam::IVec3;
    ///
    /// let mut voxels = vec![false; 2 * 2 * 2];
    /// voxels[1] = true; // (1, 0, 0)
    ///
    /// let grid = DenseOccupancy::from_dense(&voxels, [2, 2, 2]).unwrap();
    /// assert!(grid.contains(IVec3::new(1, 0, 0)));
    /// assert!(!grid.contains(IVec3::new(0, 0, 0)));
    /// ```
    pub fn from_dense(voxels: &[bool], dims: Dims) -> Result<Self, GridError> {
        let expected = checked_volume(dims)?;
        if voxels.len() != expected {
            return Err(GridError::LengthMismatch { expected, actual: voxels.len() });
        }

        let mut grid = Self::new(dims)?;
        for (i, &solid) in voxels.iter().enumerate() {
            if solid {
                grid.words[i >> 6] |= 1u64 << (i & 63);
            }
        }
        Ok(grid)
    }

    /// Build by sampling `f` at every voxel inside `dims`.
    pub fn from_fn(dims: Dims, mut f: impl FnMut(IVec3) -> bool) -> Result<Self, GridError> {
        let mut grid = Self::new(dims)?;
        for z in 0..dims[2] {
            for y in 0..dims[1] {
                for x in 0..dims[0] {
                    let p = IVec3::new(x, y, z);
                    if f(p) {
                        let i = grid.linear(p);
                        grid.words[i >> 6] |= 1u64 << (i & 63);
                    }
                }
            }
        }
        Ok(grid)
    }

    /// Build from a list of solid voxel positions.
    ///
    /// Positions outside the grid are ignored.
    pub fn from_points(dims: Dims, points: &[IVec3]) -> Result<Self, GridError> {
        let mut grid = Self::new(dims)?;
        for &p in points.iter().filter(|&&p| in_bounds(dims, p)) {
            let i = grid.linear(p);
            grid.words[i >> 6] |= 1u64 << (i & 63);
        }
        Ok(grid)
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Check if a voxel is solid. Out-of-range positions are empty.
    #[inline]
    pub fn contains(&self, p: IVec3) -> bool {
        if !in_bounds(self.dims, p) {
            return false;
        }
        let i = self.linear(p);
        (self.words[i >> 6] >> (i & 63)) & 1 != 0
    }

    /// Set or clear a voxel.
    pub fn set(&mut self, p: IVec3, solid: bool) -> Result<(), GridError> {
        if !in_bounds(self.dims, p) {
            return Err(GridError::OutOfBounds { position: p, dims: self.dims });
        }
        let i = self.linear(p);
        if solid {
            self.words[i >> 6] |= 1u64 << (i & 63);
        } else {
            self.words[i >> 6] &= !(1u64 << (i & 63));
        }
        Ok(())
    }

    /// Count solid voxels.
    pub fn solid_count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    #[inline]
    fn linear(&self, p: IVec3) -> usize {
        let [dx, dy, _] = self.dims.map(|d| d as usize);
        p.x as usize + dx * (p.y as usize + dy * p.z as usize)
    }
}

impl Occupancy for DenseOccupancy {
    #[inline]
    fn is_solid(&self, p: IVec3) -> bool {
        self.contains(p)
    }
}

fn checked_volume(dims: Dims) -> Result<usize, GridError> {
    let mut volume = 1usize;
    for (axis, &value) in dims.iter().enumerate() {
        if value < 0 {
            return Err(GridError::NegativeDimension { axis, value });
        }
        volume = volume
            .checked_mul(value as usize)
            .ok_or(GridError::TooLarge { dims })?;
    }
    Ok(volume)
}
