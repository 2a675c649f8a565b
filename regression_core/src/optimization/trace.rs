use std::iter::FusedIterator;

use super::GradientDescent;
use crate::dataset::Dataset;
use crate::regression::{LineParameters, mse};

/// A snapshot is yielded on every iteration that is a multiple of this value.
pub const SAMPLE_EVERY: usize = 5;

/// The state of a gradient descent run right after an update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceStep {
    pub m: f64,
    pub c: f64,
    pub mse: f64,
    /// Zero based index of the update that produced this state.
    pub iteration: usize,
}

impl TraceStep {
    pub fn params(&self) -> LineParameters {
        LineParameters::new(self.m, self.c)
    }
}

/// The position of a gradient descent run, independent of where the dataset lives.
///
/// Every run starts at `(0, 0)`. A snapshot is produced after each iteration `i` with
/// `i % SAMPLE_EVERY == 0`, and always after the final iteration.
#[derive(Debug, Clone)]
pub struct DescentProgress {
    optimizer: GradientDescent,
    params: LineParameters,
    iteration: usize,
    iterations: usize,
}

impl DescentProgress {
    pub fn new(optimizer: GradientDescent, iterations: usize) -> Self {
        Self {
            optimizer,
            params: LineParameters::ZERO,
            iteration: 0,
            iterations,
        }
    }

    /// Runs updates until the next sampled iteration and returns its snapshot.
    ///
    /// The same `dataset` must be given on every call, it must not be empty.
    pub fn advance(&mut self, dataset: &Dataset) -> Option<TraceStep> {
        while self.iteration < self.iterations {
            let iteration = self.iteration;
            self.iteration += 1;

            let grad = GradientDescent::gradient(dataset, self.params);
            self.optimizer.update_params(grad, &mut self.params);

            if iteration % SAMPLE_EVERY == 0 || iteration == self.iterations - 1 {
                let LineParameters { m, c } = self.params;
                return Some(TraceStep {
                    m,
                    c,
                    mse: mse(dataset, m, c),
                    iteration,
                });
            }
        }

        None
    }

    pub fn is_finished(&self) -> bool {
        self.iteration >= self.iterations
    }

    /// How many snapshots the whole run yields.
    pub fn sampled_len(&self) -> usize {
        match self.iterations {
            0 => 0,
            n => n.div_ceil(SAMPLE_EVERY) + usize::from((n - 1) % SAMPLE_EVERY != 0),
        }
    }
}

/// A lazy, finite sequence of gradient descent snapshots.
///
/// Once exhausted it stays exhausted, restarting means building a new trace.
#[derive(Debug, Clone)]
pub struct GradientDescentTrace<'a> {
    dataset: &'a Dataset,
    progress: DescentProgress,
}

impl<'a> GradientDescentTrace<'a> {
    /// Creates a new `GradientDescentTrace`.
    ///
    /// # Arguments
    /// * `dataset` - The points to fit, must not be empty.
    /// * `optimizer` - The update rule to apply on each iteration.
    /// * `iterations` - The total amount of updates to run.
    pub fn new(dataset: &'a Dataset, optimizer: GradientDescent, iterations: usize) -> Self {
        Self {
            dataset,
            progress: DescentProgress::new(optimizer, iterations),
        }
    }
}

impl Iterator for GradientDescentTrace<'_> {
    type Item = TraceStep;

    fn next(&mut self) -> Option<Self::Item> {
        self.progress.advance(self.dataset)
    }
}

impl FusedIterator for GradientDescentTrace<'_> {}

/// Runs batch gradient descent from `(0, 0)` and lazily yields the sampled snapshots.
///
/// # Arguments
/// * `dataset` - The points to fit, must not be empty.
/// * `learning_rate` - The step size of each update.
/// * `iterations` - The total amount of updates to run.
pub fn gradient_descent_trace(
    dataset: &Dataset,
    learning_rate: f64,
    iterations: usize,
) -> GradientDescentTrace<'_> {
    GradientDescentTrace::new(dataset, GradientDescent::new(learning_rate), iterations)
}
