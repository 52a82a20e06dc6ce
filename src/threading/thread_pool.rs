// src/threading/thread_pool.rs
use rayon::ThreadPoolBuilder;

use crate::terrain::terrain_config::TerrainConfig;

// A wrapper around Rayon's ThreadPool used for per-chunk terrain compute
pub struct ThreadPool {
    pool: rayon::ThreadPool,
    num_threads: usize,
}

impl ThreadPool {
    // Create a new ThreadPool with the specified number of threads.
    // If size is 0, num_cpus::get() decides.
    pub fn new(size: usize) -> Result<ThreadPool, rayon::ThreadPoolBuildError> {
        let num_threads = if size > 0 { size } else { num_cpus::get() };

        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("terrain-worker-{}", i))
            .build()?;

        log::debug!("Created thread pool with {} threads", num_threads);

        Ok(ThreadPool { pool, num_threads })
    }

    pub fn from_config(config: &TerrainConfig) -> Result<ThreadPool, rayon::ThreadPoolBuildError> {
        Self::new(config.max_threads())
    }

    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// Maps `f` over `data` on the pool. Results come back in input order
    /// no matter which worker finished first.
    pub fn par_execute<T, F, R>(&self, data: &[T], f: F) -> Vec<R>
    where
        T: Send + Sync,
        F: Fn(&T) -> R + Send + Sync,
        R: Send,
    {
        use rayon::prelude::*;
        self.pool.install(|| data.par_iter().map(f).collect())
    }
}
