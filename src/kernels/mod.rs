//! Kernels over [`Matrix`](crate::Matrix)
//!
//! Every kernel reads its operands and returns a newly allocated matrix.
//! Kernels whose output cells are independent (transpose, convolution,
//! tiled multiply, and the elimination phase of the modular inverse) run
//! over disjoint output row blocks, which is what lets the `parallel`
//! feature hand those blocks to rayon without synchronization beyond the
//! final join.

pub mod chain;
pub mod convolution;
pub mod matmul;
pub mod modinv;
pub mod prefix_sum;
pub mod transpose;

use crate::Backend;

/// Minimum number of output cells before the parallel backend is used.
/// Below this, thread dispatch costs more than the loop itself.
pub(crate) const PARALLEL_THRESHOLD: usize = 4096;

/// Whether a kernel producing `cells` output cells should take the
/// parallel path
#[inline]
pub(crate) fn use_parallel(backend: Backend, cells: usize) -> bool {
    cfg!(feature = "parallel") && backend == Backend::Parallel && cells >= PARALLEL_THRESHOLD
}

/// Runs `body(block_index, block)` over consecutive `block_len` chunks of
/// `data`.
///
/// Blocks are disjoint, so with `parallel` set (and the feature compiled
/// in) they are processed by rayon workers; otherwise in order on the
/// calling thread. `body` must only read shared state.
pub(crate) fn for_each_row_block<T, F>(data: &mut [T], block_len: usize, parallel: bool, body: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    debug_assert!(block_len > 0);

    #[cfg(feature = "parallel")]
    {
        if parallel {
            use rayon::prelude::*;

            #[cfg(feature = "tracing")]
            tracing::debug!(blocks = data.len().div_ceil(block_len), "parallel row blocks");

            data.par_chunks_mut(block_len)
                .enumerate()
                .for_each(|(idx, block)| body(idx, block));
            return;
        }
    }

    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    for (idx, block) in data.chunks_mut(block_len).enumerate() {
        body(idx, block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_use_parallel_threshold() {
        assert!(!use_parallel(Backend::Sequential, PARALLEL_THRESHOLD * 10));
        assert!(!use_parallel(Backend::Parallel, PARALLEL_THRESHOLD - 1));
        assert_eq!(
            use_parallel(Backend::Parallel, PARALLEL_THRESHOLD),
            cfg!(feature = "parallel")
        );
    }

    #[test]
    fn test_row_blocks_cover_data() {
        for parallel in [false, true] {
            let mut data = vec![0usize; 10];
            for_each_row_block(&mut data, 3, parallel, |idx, block| {
                for cell in block.iter_mut() {
                    *cell = idx;
                }
            });
            assert_eq!(data, vec![0, 0, 0, 1, 1, 1, 2, 2, 2, 3]);
        }
    }
}
