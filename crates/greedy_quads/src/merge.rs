//! Greedy rectangle merge over a slice mask.
//!
//! The mask is scanned row by row. Each unconsumed filled cell starts a
//! rectangle that first grows along the row as far as equal cells reach,
//! then grows down one full row at a time. A row is only taken if every
//! column of the current width matches; partial rows are never merged.
//! The merged rectangle is cleared from the mask and the scan resumes
//! just past it on the same row.

use crate::core::Rect;
use crate::plane::{MaskCell, PlaneBuffer};

/// Extract maximal rectangles from `plane`, consuming it.
///
/// Calls `emit` once per rectangle with the cell value it covers. On return
/// every cell of the plane is empty.
///
/// # Example
/// ```
/// use greedy_quads::{extract_rects, PlaneBuffer, Rect};
///
/// let mut plane = PlaneBuffer::new(3, 2);
/// for (u, v) in [(0, 0), (1, 0), (0, 1), (1, 1), (2, 1)] {
///     plane.set(u, v, true);
/// }
///
/// let mut rects = Vec::new();
/// extract_rects(&mut plane, |rect, _| rects.push(rect));
///
/// assert_eq!(rects, [Rect::new(0, 0, 2, 2), Rect::new(2, 1, 1, 1)]);
/// ```
pub fn extract_rects<C: MaskCell>(plane: &mut PlaneBuffer<C>, mut emit: impl FnMut(Rect, C)) {
    let width_limit = plane.width();
    let height_limit = plane.height();

    for v in 0..height_limit {
        let mut u = 0;
        while u < width_limit {
            let cell = plane.get(u, v);
            if !cell.is_filled() {
                u += 1;
                continue;
            }

            // Extend width along the row
            let mut width = 1;
            while u + width < width_limit && plane.get(u + width, v) == cell {
                width += 1;
            }

            // Extend height while the whole width holds
            let mut height = 1;
            'height: while v + height < height_limit {
                for check_u in u..u + width {
                    if plane.get(check_u, v + height) != cell {
                        break 'height;
                    }
                }
                height += 1;
            }

            let rect = Rect::new(u, v, width, height);
            plane.clear_rect(rect);
            emit(rect, cell);

            u += width;
        }
    }
}
