use regression_core::{DescentProgress, Dataset, GradientDescent, TraceStep};

use crate::config::model::DescentConfig;

/// Runs a gradient descent one snapshot per tick.
///
/// The animation keeps its own copy of the dataset, so it survives while the session keeps
/// changing. Only the updates up to the next snapshot are computed on each tick.
#[derive(Debug, Clone)]
pub struct DescentAnimation {
    dataset: Dataset,
    progress: DescentProgress,
    current: Option<TraceStep>,
    played: usize,
}

impl DescentAnimation {
    /// Creates a new `DescentAnimation` over the given dataset.
    ///
    /// # Arguments
    /// * `dataset` - The points to fit.
    /// * `config` - Learning rate and number of iterations.
    ///
    /// # Returns
    /// `None` if there is nothing to animate.
    pub fn start(dataset: &Dataset, config: DescentConfig) -> Option<Self> {
        if dataset.is_empty() || config.iterations == 0 {
            return None;
        }

        let optimizer = GradientDescent::new(config.learning_rate);
        let progress = DescentProgress::new(optimizer, config.iterations);
        log::info!(
            "gradient descent animation with {} frames, lr={}",
            progress.sampled_len(),
            config.learning_rate
        );

        Some(Self {
            dataset: dataset.clone(),
            progress,
            current: None,
            played: 0,
        })
    }

    pub fn tick(&mut self) -> Option<TraceStep> {
        let step = self.progress.advance(&self.dataset)?;
        self.current = Some(step);
        self.played += 1;
        Some(step)
    }

    pub fn is_done(&self) -> bool {
        self.progress.is_finished()
    }

    /// The last shown snapshot.
    pub fn current(&self) -> Option<&TraceStep> {
        self.current.as_ref()
    }

    pub fn played(&self) -> usize {
        self.played
    }

    pub fn frames(&self) -> usize {
        self.progress.sampled_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(iterations: usize) -> DescentConfig {
        DescentConfig {
            learning_rate: 0.01,
            iterations,
        }
    }

    #[test]
    fn plays_every_sampled_frame_once() {
        let dataset = Dataset::from_xy(&[(-2., 0.), (0., 2.), (2., 4.)]);
        let mut animation = DescentAnimation::start(&dataset, config(12)).unwrap();

        assert_eq!(animation.frames(), 4);
        assert!(animation.current().is_none());

        let iterations: Vec<_> = std::iter::from_fn(|| animation.tick())
            .map(|s| s.iteration)
            .collect();

        assert_eq!(iterations, [0, 5, 10, 11]);
        assert!(animation.is_done());
        assert_eq!(animation.played(), 4);
        assert_eq!(animation.current().map(|s| s.iteration), Some(11));
    }

    #[test]
    fn huge_runs_start_without_precomputing() {
        let dataset = Dataset::from_xy(&[(-2., 0.), (0., 2.), (2., 4.)]);
        let mut animation = DescentAnimation::start(&dataset, config(10_000_000_000)).unwrap();

        assert_eq!(animation.frames(), 2_000_000_001);
        assert_eq!(animation.tick().map(|s| s.iteration), Some(0));
        assert_eq!(animation.tick().map(|s| s.iteration), Some(5));
        assert!(!animation.is_done());
    }

    #[test]
    fn nothing_to_animate() {
        let dataset = Dataset::from_xy(&[(1., 1.)]);

        assert!(DescentAnimation::start(&dataset, config(0)).is_none());
        assert!(DescentAnimation::start(&Dataset::default(), config(10)).is_none());
    }
}
