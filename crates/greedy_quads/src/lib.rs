//! Greedy quad extraction for voxel occupancy volumes.
//!
//! Collapses the exposed unit faces of a voxel volume into a small set of
//! axis-aligned rectangles. Each principal axis is swept plane by plane; for
//! every plane a face mask is built from an occupancy oracle and then merged
//! greedily into maximal rectangles.
//!
//! Occupancy is supplied as a predicate ([`Occupancy`]), so any voxel store
//! can be meshed without first copying it into a dense grid.
//!
//! # Example
//!
//! ```
//! use greedy_quads::{greedy_mesh, Occupancy};
//! use glam::IVec3;
//!
//! // A 4x1x1 bar of solid voxels
//! let bar = (|_: IVec3| true).bounded([4, 1, 1]);
//!
//! let quads = greedy_mesh(&bar, [4, 1, 1]);
//! assert_eq!(quads.len(), 6); // Two end caps and four merged sides
//! ```

pub mod core;
pub mod oracle;
pub mod plane;
pub mod cull;
pub mod merge;
pub mod mesh;

// Re-export primary types
pub use crate::core::{
    AxisFrame,
    Dims,
    FacedQuad,
    Facing,
    Quad,
    Rect,
    // Constants
    AXIS_X, AXIS_Y, AXIS_Z, AXIS_UNITS,
    quads_as_bytes,
};
pub use crate::oracle::{Bounded, DenseOccupancy, GridError, Occupancy, TryFn, TryOccupancy};
pub use crate::plane::{MaskCell, PlaneBuffer};

// Re-export main entry points
pub use crate::cull::build_slice_mask;
pub use crate::merge::extract_rects;
pub use crate::mesh::{
    greedy_mesh,
    greedy_mesh_faced,
    greedy_mesh_with_stats,
    sweep_axis,
    try_greedy_mesh,
    try_greedy_mesh_faced,
    MeshStats,
};
#[cfg(feature = "rayon")]
pub use crate::mesh::greedy_mesh_par;
