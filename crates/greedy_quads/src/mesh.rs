//! Main meshing pipeline.
//!
//! Orchestrates the complete extraction:
//! 1. Axis sweep (X, then Y, then Z as the normal axis)
//! 2. Slice mask construction for every boundary plane along the normal
//! 3. Greedy merge of each mask into quads
//!
//! A volume of `n` voxels along the normal has `n + 1` boundary planes;
//! plane `0` sits in front of the first voxel and plane `n` behind the last.

use std::convert::Infallible;

use log::{debug, trace};

use crate::core::{is_degenerate, AxisFrame, Dims, FacedQuad, Facing, Quad};
use crate::cull::build_slice_mask;
use crate::merge::extract_rects;
use crate::oracle::{Occupancy, TryOccupancy};
use crate::plane::{MaskCell, PlaneBuffer};

/// Sweep one axis, emitting a quad for every merged rectangle.
///
/// The plane buffer lives only for the duration of the sweep. Returns the
/// number of quads emitted.
///
/// # Arguments
/// * `oracle` - Occupancy source
/// * `dims` - Volume extents
/// * `frame` - Axis assignment for this sweep
/// * `emit` - Receives each quad with the mask value it was merged from
pub fn sweep_axis<C, O>(
    oracle: &O,
    dims: Dims,
    frame: AxisFrame,
    mut emit: impl FnMut(Quad, C),
) -> Result<usize, O::Error>
where
    C: MaskCell,
    O: TryOccupancy + ?Sized,
{
    let (width, height) = frame.plane_dims(dims);
    let mut plane = PlaneBuffer::<C>::new(width, height);
    let mut emitted = 0;

    for slice in frame.slice_range(dims) {
        build_slice_mask(oracle, frame, slice, &mut plane)?;

        let before = emitted;
        extract_rects(&mut plane, |rect, cell| {
            emit(Quad::from_rect(frame, slice, rect), cell);
            emitted += 1;
        });
        trace!("axis {} slice {}: {} quads", frame.norm, slice, emitted - before);
    }

    debug!("axis {} swept: {} quads", frame.norm, emitted);
    Ok(emitted)
}

/// Extract greedy quads covering every exposed face of the volume.
///
/// The oracle must report `false` outside `[0, dims)`; wrap it with
/// [`Occupancy::bounded`] if it doesn't. Zero or negative dimensions yield
/// no quads.
///
/// # Example
/// ```
/// use greedy_quads::greedy_mesh;
/// use glam::IVec3;
///
/// let single_voxel = |p: IVec3| p == IVec3::ZERO;
/// let quads = greedy_mesh(&single_voxel, [1, 1, 1]);
///
/// assert_eq!(quads.len(), 6); // One per cube face
/// ```
pub fn greedy_mesh<O: Occupancy + ?Sized>(oracle: &O, dims: Dims) -> Vec<Quad> {
    into_ok(try_greedy_mesh(oracle, dims))
}

/// Same as [`greedy_mesh`] for a fallible oracle.
///
/// The first oracle error aborts the extraction and is returned unchanged.
pub fn try_greedy_mesh<O: TryOccupancy + ?Sized>(oracle: &O, dims: Dims) -> Result<Vec<Quad>, O::Error> {
    let mut quads = Vec::new();
    if is_degenerate(dims) {
        return Ok(quads);
    }

    for frame in AxisFrame::all() {
        sweep_axis::<bool, _>(oracle, dims, frame, |quad, _| quads.push(quad))?;
    }

    debug!("meshed {:?}: {} quads", dims, quads.len());
    Ok(quads)
}

/// Extract greedy quads tagged with their outward direction.
///
/// Faces looking in opposite directions are never merged together, so this
/// may return more quads than [`greedy_mesh`] where thin walls are exposed
/// on both sides of one plane.
pub fn greedy_mesh_faced<O: Occupancy + ?Sized>(oracle: &O, dims: Dims) -> Vec<FacedQuad> {
    into_ok(try_greedy_mesh_faced(oracle, dims))
}

/// Same as [`greedy_mesh_faced`] for a fallible oracle.
pub fn try_greedy_mesh_faced<O: TryOccupancy + ?Sized>(
    oracle: &O,
    dims: Dims,
) -> Result<Vec<FacedQuad>, O::Error> {
    let mut quads = Vec::new();
    if is_degenerate(dims) {
        return Ok(quads);
    }

    for frame in AxisFrame::all() {
        sweep_axis::<Option<Facing>, _>(oracle, dims, frame, |quad, cell| {
            if let Some(facing) = cell {
                quads.push(FacedQuad { quad, axis: frame.norm, facing });
            }
        })?;
    }

    debug!("meshed {:?}: {} faced quads", dims, quads.len());
    Ok(quads)
}

/// Statistics about a mesh result.
#[derive(Debug, Clone, Default)]
pub struct MeshStats {
    /// Total number of quads generated
    pub quad_count: usize,
    /// Quads per normal axis: [X, Y, Z]
    pub quads_per_axis: [usize; 3],
    /// Unit faces covered, i.e. the quad count without merging
    pub face_count: usize,
    /// Merge efficiency (1.0 = perfect merging, 0.0 = no merging)
    pub merge_efficiency: f32,
}

/// Mesh a volume and return statistics along with the quads.
pub fn greedy_mesh_with_stats<O: Occupancy + ?Sized>(oracle: &O, dims: Dims) -> (Vec<Quad>, MeshStats) {
    let mut quads = Vec::new();
    let mut stats = MeshStats::default();
    if is_degenerate(dims) {
        return (quads, stats);
    }

    for frame in AxisFrame::all() {
        let count = into_ok(sweep_axis::<bool, _>(oracle, dims, frame, |quad, _| {
            stats.face_count += quad.area() as usize;
            quads.push(quad);
        }));
        stats.quads_per_axis[frame.norm] = count;
    }

    stats.quad_count = quads.len();
    stats.merge_efficiency = if stats.face_count > 0 {
        1.0 - (stats.quad_count as f32 / stats.face_count as f32)
    } else {
        0.0
    };

    (quads, stats)
}

/// Same as [`greedy_mesh`], running the three axis sweeps in parallel.
///
/// Output is identical to the serial version, including order.
#[cfg(feature = "rayon")]
pub fn greedy_mesh_par<O: Occupancy + Sync + ?Sized>(oracle: &O, dims: Dims) -> Vec<Quad> {
    use rayon::prelude::*;

    if is_degenerate(dims) {
        return Vec::new();
    }

    let per_axis: Vec<Vec<Quad>> = AxisFrame::all()
        .par_iter()
        .map(|&frame| {
            let mut quads = Vec::new();
            into_ok(sweep_axis::<bool, _>(oracle, dims, frame, |quad, _| quads.push(quad)));
            quads
        })
        .collect();

    let quads = per_axis.concat();
    debug!("meshed {:?} in parallel: {} quads", dims, quads.len());
    quads
}

#[inline]
fn into_ok<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
