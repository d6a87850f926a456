//! Splits per-target work into contiguous chunks, one per worker.
//!
//! Each worker owns a disjoint slice of the output and only reads the shared
//! evaluator, so the hot loop needs no synchronisation. Every target is
//! evaluated on its own in a fixed order, which makes the output identical
//! for any worker count.
use log::{debug, trace};
use rayon::prelude::*;
use crate::parallel::{FieldEvaluator, FieldSample, Quantity};
use crate::particles::TargetSet;
use crate::utils::GravityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dispatcher {
    pub parallel: bool,
    /// Worker count; `None` uses every thread of the global rayon pool.
    pub threads: Option<usize>,
}

impl Dispatcher {
    pub fn new(parallel: bool, threads: Option<usize>) -> Self {
        Self { parallel, threads }
    }

    /// Number of workers the next call to [`Dispatcher::run`] will use.
    pub fn workers(&self) -> usize {
        match (self.parallel, self.threads) {
            (false, _) => 1,
            (true, Some(n)) => n,
            (true, None) => rayon::current_num_threads(),
        }
    }

    /// Length of the contiguous target range handed to each worker.
    ///
    /// # Example
    /// ```
    /// use rs_treegrav::parallel::Dispatcher;
    ///
    /// let dispatcher = Dispatcher::new(true, Some(4));
    /// assert_eq!(dispatcher.chunk_size(10), 3);
    /// assert_eq!(dispatcher.chunk_size(0), 1);
    /// ```
    pub fn chunk_size(&self, num_targets: usize) -> usize {
        num_targets.div_ceil(self.workers().max(1)).max(1)
    }

    /// Evaluates `evaluator` at every target.
    ///
    /// With `self_interacting` set, target `i` is source `i` and the self pair is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a zero worker count was requested or the worker pool
    /// could not be created. No targets are evaluated in that case.
    pub fn run<E: FieldEvaluator>(
        &self,
        evaluator: &E,
        targets: &TargetSet,
        self_interacting: bool,
        quantity: Quantity,
    ) -> Result<Vec<FieldSample>, GravityError> {
        if self.threads == Some(0) {
            return Err(GravityError::InvalidThreadCount);
        }
        let mut output = vec![FieldSample::ZERO; targets.len()];
        if targets.is_empty() {
            return Ok(output);
        }

        let chunk_size = self.chunk_size(targets.len());
        let fill = |(chunk, slots): (usize, &mut [FieldSample])| {
            let start = chunk * chunk_size;
            trace!("chunk {}: targets {}..{}", chunk, start, start + slots.len());
            for (offset, slot) in slots.iter_mut().enumerate() {
                let i = start + offset;
                let skip = if self_interacting { Some(i) } else { None };
                *slot = evaluator.evaluate(targets.position(i), targets.softening(i), skip, quantity);
            }
        };

        if !self.parallel {
            debug!("evaluating {} targets serially", targets.len());
            output.chunks_mut(chunk_size).enumerate().for_each(fill);
            return Ok(output);
        }

        debug!(
            "evaluating {} targets on {} workers, {} targets per chunk",
            targets.len(),
            self.workers(),
            chunk_size
        );
        match self.threads {
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| GravityError::ThreadPool(e.to_string()))?;
                pool.install(|| output.par_chunks_mut(chunk_size).enumerate().for_each(fill));
            }
            None => output.par_chunks_mut(chunk_size).enumerate().for_each(fill),
        }
        Ok(output)
    }
}
