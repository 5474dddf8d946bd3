//! Core type definitions for the greedy quad extractor.

use std::ops::RangeInclusive;

use bytemuck::{Pod, Zeroable};
use glam::IVec3;

/// Volume extents along X, Y and Z.
///
/// Signed so that extents and voxel coordinates share one integer type.
/// Zero or negative extents describe an empty volume.
pub type Dims = [i32; 3];

/// Axis indices.
pub const AXIS_X: usize = 0;
pub const AXIS_Y: usize = 1;
pub const AXIS_Z: usize = 2;

/// Unit vectors for each principal axis, indexed by axis.
pub const AXIS_UNITS: [IVec3; 3] = [IVec3::X, IVec3::Y, IVec3::Z];

/// Returns true if the dimensions enclose no voxels.
#[inline]
pub fn is_degenerate(dims: Dims) -> bool {
    dims.iter().any(|&d| d <= 0)
}

/// Axis assignment for one sweep.
///
/// `norm` is the sweep direction. `tan` and `bitan` span each slice and are
/// chosen cyclically (`norm + 1`, `norm + 2`), so `tan × bitan = norm` and
/// the three indices always form a permutation of `{0, 1, 2}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AxisFrame {
    pub norm: usize,
    pub tan: usize,
    pub bitan: usize,
}

impl AxisFrame {
    /// Build the frame for the given normal axis.
    #[inline]
    pub fn new(norm: usize) -> Self {
        debug_assert!(norm < 3, "Axis index out of range");
        Self {
            norm,
            tan: (norm + 1) % 3,
            bitan: (norm + 2) % 3,
        }
    }

    /// Frames for all three sweeps, in X, Y, Z order.
    #[inline]
    pub fn all() -> [AxisFrame; 3] {
        [Self::new(AXIS_X), Self::new(AXIS_Y), Self::new(AXIS_Z)]
    }

    /// Unit vector along the normal axis.
    #[inline]
    pub fn normal(&self) -> IVec3 {
        AXIS_UNITS[self.norm]
    }

    /// Assemble a 3D point from slice-space coordinates.
    #[inline]
    pub fn point(&self, n: i32, t: i32, b: i32) -> IVec3 {
        let mut p = IVec3::ZERO;
        p[self.norm] = n;
        p[self.tan] = t;
        p[self.bitan] = b;
        p
    }

    /// Plane buffer size (tangent extent, bitangent extent) for this frame.
    #[inline]
    pub fn plane_dims(&self, dims: Dims) -> (usize, usize) {
        (dims[self.tan].max(0) as usize, dims[self.bitan].max(0) as usize)
    }

    /// Boundary planes along the normal, from the near face to the far face.
    #[inline]
    pub fn slice_range(&self, dims: Dims) -> RangeInclusive<i32> {
        0..=dims[self.norm].max(0)
    }
}

/// A merged rectangle in plane space.
///
/// `u` runs along the tangent axis, `v` along the bitangent axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub u: usize,
    pub v: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    #[inline]
    pub fn new(u: usize, v: usize, width: usize, height: usize) -> Self {
        Self { u, v, width, height }
    }

    /// Number of unit cells covered.
    #[inline]
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

/// An axis-aligned quad with integer corners.
///
/// Corners are ordered `base, base + Δtan, base + Δtan + Δbitan, base + Δbitan`,
/// which is counter-clockwise when viewed from the positive side of the
/// normal axis.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct Quad {
    pub corners: [IVec3; 4],
}

impl Quad {
    /// Build a quad from its base corner and its two edge vectors.
    #[inline]
    pub fn new(base: IVec3, du: IVec3, dv: IVec3) -> Self {
        Self {
            corners: [base, base + du, base + du + dv, base + dv],
        }
    }

    /// Map a plane-space rectangle on the given slice into 3D.
    #[inline]
    pub fn from_rect(frame: AxisFrame, slice: i32, rect: Rect) -> Self {
        let base = frame.point(slice, rect.u as i32, rect.v as i32);
        let du = AXIS_UNITS[frame.tan] * rect.width as i32;
        let dv = AXIS_UNITS[frame.bitan] * rect.height as i32;
        Self::new(base, du, dv)
    }

    #[inline]
    pub fn base(&self) -> IVec3 {
        self.corners[0]
    }

    /// Extent along the first edge (tangent direction).
    #[inline]
    pub fn width(&self) -> i32 {
        (self.corners[1] - self.corners[0]).abs().max_element()
    }

    /// Extent along the second edge (bitangent direction).
    #[inline]
    pub fn height(&self) -> i32 {
        (self.corners[3] - self.corners[0]).abs().max_element()
    }

    #[inline]
    pub fn area(&self) -> i32 {
        self.width() * self.height()
    }
}

/// Which way an exposed face points along its normal axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    /// Solid behind the plane, empty in front: the face looks toward +normal.
    Positive,
    /// Solid in front of the plane, empty behind: the face looks toward -normal.
    Negative,
}

impl Facing {
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Facing::Positive => 1,
            Facing::Negative => -1,
        }
    }
}

/// A quad tagged with the axis it was swept along and the side it faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FacedQuad {
    pub quad: Quad,
    pub axis: usize,
    pub facing: Facing,
}

impl FacedQuad {
    /// Outward unit normal.
    #[inline]
    pub fn normal(&self) -> IVec3 {
        AXIS_UNITS[self.axis] * self.facing.sign()
    }

    /// Corners wound counter-clockwise as seen from the outward side.
    #[inline]
    pub fn wound_corners(&self) -> [IVec3; 4] {
        let [a, b, c, d] = self.quad.corners;
        match self.facing {
            Facing::Positive => [a, b, c, d],
            Facing::Negative => [a, d, c, b],
        }
    }
}

/// View a quad slice as raw bytes, e.g. for a GPU upload.
#[inline]
pub fn quads_as_bytes(quads: &[Quad]) -> &[u8] {
    bytemuck::cast_slice(quads)
}
