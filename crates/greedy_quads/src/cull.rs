//! Slice mask construction.
//!
//! A face exists on a slice plane wherever occupancy changes across it:
//! the voxel at the cursor and the voxel one step back along the normal
//! disagree. Both solid-to-empty and empty-to-solid transitions count.

use crate::core::AxisFrame;
use crate::oracle::TryOccupancy;
use crate::plane::{MaskCell, PlaneBuffer};

/// Fill `plane` with the face mask of one slice.
///
/// Every cell of the plane is overwritten, so the buffer needs no clearing
/// between slices. The plane must be sized to the frame's tangent and
/// bitangent extents.
///
/// # Arguments
/// * `oracle` - Occupancy source, queried twice per cell
/// * `frame` - Axis assignment of the current sweep
/// * `slice` - Position of the plane along the normal axis
/// * `plane` - Output mask
pub fn build_slice_mask<C, O>(
    oracle: &O,
    frame: AxisFrame,
    slice: i32,
    plane: &mut PlaneBuffer<C>,
) -> Result<(), O::Error>
where
    C: MaskCell,
    O: TryOccupancy + ?Sized,
{
    let normal = frame.normal();

    for b in 0..plane.height() {
        for t in 0..plane.width() {
            let cursor = frame.point(slice, t as i32, b as i32);
            let front = oracle.try_is_solid(cursor)?;
            let behind = oracle.try_is_solid(cursor - normal)?;
            plane.set(t, b, C::from_transition(front, behind));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Facing, AXIS_X, AXIS_Y, AXIS_Z};
    use crate::oracle::{Occupancy, TryFn};
    use glam::IVec3;

    fn single_voxel(p: IVec3) -> bool {
        p == IVec3::ZERO
    }

    #[test]
    fn single_voxel_near_and_far_planes() {
        let frame = AxisFrame::new(AXIS_X);
        let mut plane = PlaneBuffer::<bool>::new(1, 1);

        build_slice_mask(&single_voxel, frame, 0, &mut plane).unwrap();
        assert!(plane.get(0, 0), "Near face at x = 0");

        build_slice_mask(&single_voxel, frame, 1, &mut plane).unwrap();
        assert!(plane.get(0, 0), "Far face at x = 1");

        build_slice_mask(&single_voxel, frame, 2, &mut plane).unwrap();
        assert!(!plane.get(0, 0), "Nothing beyond the voxel");
    }

    #[test]
    fn interior_planes_have_no_faces() {
        let solid = (|_: IVec3| true).bounded([3, 3, 3]);
        let frame = AxisFrame::new(AXIS_Y);
        let mut plane = PlaneBuffer::<bool>::new(3, 3);

        build_slice_mask(&solid, frame, 1, &mut plane).unwrap();
        assert!(plane.is_empty());

        build_slice_mask(&solid, frame, 0, &mut plane).unwrap();
        assert_eq!(plane.filled_count(), 9);

        build_slice_mask(&solid, frame, 3, &mut plane).unwrap();
        assert_eq!(plane.filled_count(), 9);
    }

    #[test]
    fn mask_is_addressed_by_tangent_and_bitangent() {
        // Z sweep: tan = X, bitan = Y
        let oracle = |p: IVec3| p == IVec3::new(2, 1, 0);
        let frame = AxisFrame::new(AXIS_Z);
        let mut plane = PlaneBuffer::<bool>::new(4, 3);

        build_slice_mask(&oracle, frame, 0, &mut plane).unwrap();

        assert_eq!(plane.filled_count(), 1);
        assert!(plane.get(2, 1));
    }

    #[test]
    fn mask_overwrites_previous_slice() {
        let oracle = |p: IVec3| p.x == 0 && p.y == 0 && (0..2).contains(&p.z);
        let frame = AxisFrame::new(AXIS_Z);
        let mut plane = PlaneBuffer::<bool>::new(2, 2);
        plane.set(1, 1, true);

        build_slice_mask(&oracle, frame, 1, &mut plane).unwrap();
        assert!(plane.is_empty());
    }

    #[test]
    fn faced_mask_records_direction() {
        let frame = AxisFrame::new(AXIS_X);
        let mut plane = PlaneBuffer::<Option<Facing>>::new(1, 1);

        // Entering the voxel: solid in front, empty behind.
        build_slice_mask(&single_voxel, frame, 0, &mut plane).unwrap();
        assert_eq!(plane.get(0, 0), Some(Facing::Negative));

        // Leaving the voxel: solid behind, empty in front.
        build_slice_mask(&single_voxel, frame, 1, &mut plane).unwrap();
        assert_eq!(plane.get(0, 0), Some(Facing::Positive));
    }

    #[test]
    fn oracle_error_stops_the_slice() {
        let oracle = TryFn::new(|p: IVec3| {
            if p.x < 0 {
                Err(format!("sampled {}", p))
            } else {
                Ok(false)
            }
        });
        let mut plane = PlaneBuffer::<bool>::new(2, 2);

        let result = build_slice_mask(&oracle, AxisFrame::new(AXIS_X), 0, &mut plane);
        assert_eq!(result, Err("sampled [-1, 0, 0]".to_string()));
    }
}
