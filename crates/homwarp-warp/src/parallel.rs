use rayon::prelude::*;

use homwarp_image::Image;

/// Apply a function to every row of every channel plane in parallel.
///
/// The closure receives `(channel, row, row_slice)`; each invocation owns
/// exactly one destination row, so tasks never share mutable state.
pub fn par_iter_plane_rows(dst: &mut Image, f: impl Fn(usize, usize, &mut [f64]) + Send + Sync) {
    let cols = dst.cols();
    let rows = dst.rows();
    dst.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(idx, row_slice)| {
            f(idx / rows, idx % rows, row_slice);
        });
}
