//! Batched parallel update scheduling
//!
//! The live snapshot is split into contiguous batches of a fixed size;
//! one worker task updates each batch, and the calling thread blocks on
//! the barrier until every batch has finished. Failures are collected per
//! batch and the first observed one is re-raised after the join, never
//! swallowed inside the pool.
//!
//! With the `parallel` feature disabled the same partition runs on the
//! calling thread with identical failure semantics.

use tracing::trace;

use crate::context::UpdateContext;
use crate::error::Result;
use crate::game_object::GameObject;

#[cfg(feature = "parallel")]
use crate::error::EngineError;

/// Default number of objects per worker batch.
///
/// Small fixed batches amortize submission overhead against typically
/// small per-frame object counts while bounding per-task imbalance. A
/// tunable, not a correctness requirement.
pub const DEFAULT_BATCH_SIZE: usize = 8;

/// Number of batches a live count of `live` produces at `batch_size`
pub fn batch_count(live: usize, batch_size: usize) -> usize {
    live.div_ceil(batch_size)
}

/// Worker pool owned by a scene: built once, reused every frame, torn
/// down with the scene.
pub(crate) struct WorkerPool {
    #[cfg(feature = "parallel")]
    pool: rayon::ThreadPool,
}

impl WorkerPool {
    /// Build a pool sized by the host environment
    #[cfg(feature = "parallel")]
    pub fn new() -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .thread_name(|index| format!("scene-worker-{index}"))
            .build()
            .map_err(|err| EngineError::ThreadPool(err.to_string()))?;
        Ok(Self { pool })
    }

    #[cfg(not(feature = "parallel"))]
    pub fn new() -> Result<Self> {
        Ok(Self {})
    }

    /// Run one update pass over the snapshot and block until every batch
    /// has completed.
    ///
    /// Batches cover `[0, objects.len())` exactly and disjointly; within
    /// a batch objects update in index order, across batches no order is
    /// guaranteed. Inactive objects are skipped. A failing batch stops at
    /// its first failure; sibling batches still run to completion, and
    /// the failure from the lowest-indexed failing batch is returned.
    pub fn run(
        &self,
        objects: &mut [GameObject],
        batch_size: usize,
        ctx: &UpdateContext<'_>,
    ) -> Result<()> {
        assert!(batch_size > 0, "batch size must be at least 1");
        if objects.is_empty() {
            return Ok(());
        }
        trace!(
            live = objects.len(),
            batches = batch_count(objects.len(), batch_size),
            "dispatching update batches"
        );
        self.dispatch(objects, batch_size, ctx)
    }

    #[cfg(feature = "parallel")]
    fn dispatch(
        &self,
        objects: &mut [GameObject],
        batch_size: usize,
        ctx: &UpdateContext<'_>,
    ) -> Result<()> {
        use rayon::prelude::*;

        let results: Vec<Result<()>> = self.pool.install(|| {
            objects
                .par_chunks_mut(batch_size)
                .map(|batch| update_batch(batch, ctx))
                .collect()
        });
        // Short-circuits on the first Err in batch-index order.
        results.into_iter().collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn dispatch(
        &self,
        objects: &mut [GameObject],
        batch_size: usize,
        ctx: &UpdateContext<'_>,
    ) -> Result<()> {
        let mut first_failure = None;
        for batch in objects.chunks_mut(batch_size) {
            if let Err(failure) = update_batch(batch, ctx) {
                first_failure.get_or_insert(failure);
            }
        }
        match first_failure {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }
}

fn update_batch(batch: &mut [GameObject], ctx: &UpdateContext<'_>) -> Result<()> {
    for object in batch.iter_mut().filter(|object| object.is_active()) {
        object.update(ctx)?;
    }
    Ok(())
}
