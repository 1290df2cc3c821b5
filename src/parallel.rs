//! Fixed-size worker pool for per-pixel loops.
//!
//! The workers live in a `rayon` pool built once per `Parallel`. Work is split into
//! contiguous chunks, one per worker, with the remainder on the last chunk, and every call
//! blocks until all chunks are done.

use rayon::{ThreadPool, ThreadPoolBuilder};
use std::fmt;
use std::ops::Range;
use std::sync::Arc;
use std::thread;

/// A fixed set of worker threads, built once and reused for every loop. Cloning shares the
/// same workers.
#[derive(Clone)]
pub struct Parallel {
    num_threads: usize,
    pool: Option<Arc<ThreadPool>>,
}

impl fmt::Debug for Parallel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parallel")
            .field("num_threads", &self.num_threads)
            .finish()
    }
}

impl Parallel {
    /// `num_pool_threads <= 0` is an offset from the hardware thread count (never below one);
    /// a positive value is a size capped at the hardware thread count.
    pub fn new(num_pool_threads: i32) -> Self {
        Self::with_hardware_threads(num_pool_threads, hardware_threads())
    }

    pub fn with_hardware_threads(num_pool_threads: i32, hardware_threads: usize) -> Self {
        let hw = hardware_threads.max(1) as i64;
        let n = num_pool_threads as i64;
        let num_threads = (if n <= 0 { (hw + n).max(1) } else { n.min(hw) }) as usize;
        if num_threads == 1 {
            return Self::inline();
        }

        let built = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("goom-zoom-worker-{i}"))
            .build();
        match built {
            Ok(pool) => Self {
                num_threads,
                pool: Some(Arc::new(pool)),
            },
            Err(err) => {
                log::warn!("could not start {num_threads} worker threads ({err}), running inline");
                Self::inline()
            }
        }
    }

    fn inline() -> Self {
        Self {
            num_threads: 1,
            pool: None,
        }
    }

    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// The ranges `for_loop` hands to its workers.
    pub fn chunk_ranges(&self, num_iters: usize) -> Vec<Range<usize>> {
        assert!(num_iters > 0, "parallel loop needs at least one iteration");
        let threads = num_iters.min(self.num_threads);
        let chunk_len = num_iters / threads;
        (0..threads)
            .map(|i| {
                let start = i * chunk_len;
                let end = if i + 1 == threads { num_iters } else { start + chunk_len };
                start..end
            })
            .collect()
    }

    /// Calls `f(i)` for every `i` in `0..num_iters`. Panics on zero iterations.
    pub fn for_loop<F>(&self, num_iters: usize, f: F)
    where
        F: Fn(usize) + Sync,
    {
        let ranges = self.chunk_ranges(num_iters);
        let pool = match &self.pool {
            Some(pool) if ranges.len() > 1 => pool,
            _ => {
                (0..num_iters).for_each(f);
                return;
            }
        };
        let f = &f;
        pool.scope(|scope| {
            for range in ranges {
                scope.spawn(move |_| range.for_each(f));
            }
        });
    }

    /// Splits `buffer` into the same chunks as `for_loop` and calls `f(start, chunk)` on each.
    pub fn for_each_chunk_mut<T, F>(&self, buffer: &mut [T], f: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync,
    {
        let ranges = self.chunk_ranges(buffer.len());
        let pool = match &self.pool {
            Some(pool) if ranges.len() > 1 => pool,
            _ => {
                f(0, buffer);
                return;
            }
        };
        let f = &f;
        pool.scope(|scope| {
            let mut rest = buffer;
            for range in ranges {
                let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
                rest = tail;
                scope.spawn(move |_| f(range.start, chunk));
            }
        });
    }
}

pub fn hardware_threads() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_offset_never_drops_below_one() {
        assert_eq!(Parallel::with_hardware_threads(-2, 8).num_threads(), 6);
        assert_eq!(Parallel::with_hardware_threads(-20, 8).num_threads(), 1);
        assert_eq!(Parallel::with_hardware_threads(0, 8).num_threads(), 8);
    }

    #[test]
    fn positive_size_is_capped() {
        assert_eq!(Parallel::with_hardware_threads(3, 8).num_threads(), 3);
        assert_eq!(Parallel::with_hardware_threads(32, 8).num_threads(), 8);
    }
}
