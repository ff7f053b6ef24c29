//! Slice helpers over many [`Vec3Packed`] values.
//!
//! Every element is processed independently, so large slices are split
//! across the `rayon` thread pool with no synchronization. Results are
//! identical to applying the single-vector operation element by element.

use rayon::prelude::*;
use tracing::debug;

use crate::core_types::{max, min, normalize};
use crate::Vec3Packed;

/// Slices at least this long are processed in parallel.
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Replace every vector by [`normalize`] of itself.
///
/// Zero-length entries follow the single-vector edge case and are not
/// filtered out.
pub fn normalize_in_place(vectors: &mut [Vec3Packed]) {
    if vectors.len() >= PARALLEL_THRESHOLD {
        debug!(count = vectors.len(), "normalizing batch in parallel");
        vectors.par_iter_mut().for_each(|v| *v = normalize(*v));
    } else {
        for v in &mut *vectors {
            *v = normalize(*v);
        }
    }
}

/// Dot product of every vector with `direction`.
pub fn dot_all(vectors: &[Vec3Packed], direction: Vec3Packed) -> Vec<f32> {
    if vectors.len() >= PARALLEL_THRESHOLD {
        vectors.par_iter().map(|&v| v * direction).collect()
    } else {
        vectors.iter().map(|&v| v * direction).collect()
    }
}

/// Lane-wise `(min, max)` over the slice, or `None` when it is empty.
///
/// All four lanes take part. NaN lanes follow [`min`]/[`max`] and the
/// outcome may depend on reduction order.
pub fn bounds(vectors: &[Vec3Packed]) -> Option<(Vec3Packed, Vec3Packed)> {
    let merge = |(lo_a, hi_a): (Vec3Packed, Vec3Packed), (lo_b, hi_b): (Vec3Packed, Vec3Packed)| {
        (min(lo_a, lo_b), max(hi_a, hi_b))
    };

    if vectors.len() >= PARALLEL_THRESHOLD {
        vectors.par_iter().map(|&v| (v, v)).reduce_with(merge)
    } else {
        vectors.iter().map(|&v| (v, v)).reduce(merge)
    }
}

/// View a slice of vectors as a flat slice of lanes (`x, y, z, w, x, ...`).
pub fn as_lanes(vectors: &[Vec3Packed]) -> &[f32] {
    bytemuck::cast_slice(vectors)
}

/// View a flat lane slice as vectors.
///
/// Returns `None` unless the slice is 16-byte aligned and its length is a
/// multiple of four.
pub fn try_from_lanes_mut(lanes: &mut [f32]) -> Option<&mut [Vec3Packed]> {
    bytemuck::try_cast_slice_mut(lanes).ok()
}
