use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls how the aggregation and render passes are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    #[default]
    Serial,

    /// Use the global Rayon thread pool, one task per image row.
    ///
    /// Accumulators are partitioned per worker and merged at the end.
    ParallelRows,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    Fixed(usize),
}

/// Run `op` according to `strategy`.
///
/// The closure receives `true` when it is allowed to use rayon parallel
/// iterators. For [`ExecutionStrategy::Fixed`] it runs inside a local pool.
pub(crate) fn run<R, F>(strategy: ExecutionStrategy, op: F) -> Result<R, ParallelError>
where
    F: FnOnce(bool) -> R + Send,
    R: Send,
{
    match strategy {
        ExecutionStrategy::Serial => Ok(op(false)),
        ExecutionStrategy::ParallelRows => Ok(op(true)),
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            Ok(pool.install(|| op(true)))
        }
    }
}
