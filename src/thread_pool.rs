//! Shared thread pool for the `parallel` feature.
//!
//! Per-vector work on profile sets runs on one lazily built rayon pool so
//! that concurrent analyses do not each spin up their own threads.

#[cfg(feature = "parallel")]
use rayon::ThreadPool;

#[cfg(feature = "parallel")]
use std::sync::OnceLock;

#[cfg(feature = "parallel")]
static THREAD_POOL: OnceLock<Option<ThreadPool>> = OnceLock::new();

/// Get or initialize the shared thread pool.
///
/// Threads get an 8 MB stack (vs rayon's default 2 MB). Returns `None` if
/// the pool could not be built, in which case callers fall back to rayon's
/// global pool.
#[cfg(feature = "parallel")]
pub fn get_thread_pool() -> Option<&'static ThreadPool> {
    THREAD_POOL
        .get_or_init(|| {
            rayon::ThreadPoolBuilder::new()
                .stack_size(8 * 1024 * 1024)
                .thread_name(|i| format!("pad-metrology-{}", i))
                .build()
                .map_err(|err| tracing::warn!("falling back to the global rayon pool: {}", err))
                .ok()
        })
        .as_ref()
}

/// Execute a parallel operation on the shared pool.
#[cfg(feature = "parallel")]
pub fn install<OP, R>(op: OP) -> R
where
    OP: FnOnce() -> R + Send,
    R: Send,
{
    match get_thread_pool() {
        Some(pool) => pool.install(op),
        None => op(),
    }
}

/// Without the `parallel` feature the operation runs on the caller's thread.
#[cfg(not(feature = "parallel"))]
pub fn install<OP, R>(op: OP) -> R
where
    OP: FnOnce() -> R,
{
    op()
}
