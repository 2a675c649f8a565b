use std::ops::RangeInclusive;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::dataset::{DEFAULT_POINTS, Dataset, MAX_POINTS, MIN_POINTS};
use crate::error::{RegressionErr, Result};
use crate::geometry::clamp_to_domain;
use crate::regression::{LineParameters, mse, optimal_parameters};
use crate::surface::{SurfaceInputs, Theme};

pub const SLOPE_RANGE: RangeInclusive<f64> = -5.0..=5.0;
pub const INTERCEPT_RANGE: RangeInclusive<f64> = -10.0..=10.0;
pub const POINT_COUNT_RANGE: RangeInclusive<usize> = MIN_POINTS..=MAX_POINTS;

pub const SLOPE_STEP: f64 = 0.05;
pub const INTERCEPT_STEP: f64 = 0.1;
pub const PREDICTION_STEP: f64 = 0.1;

/// Which face of the application is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Free experimentation with the controls.
    #[default]
    Play,
    /// The guided walkthrough.
    Learn,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Play => Self::Learn,
            Self::Learn => Self::Play,
        }
    }
}

/// Starting values for a `Session`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub point_count: usize,
    /// The line the user starts from, and goes back to whenever new data is drawn.
    pub initial: LineParameters,
    pub prediction_x: f64,
    pub theme: Theme,
    /// Fixes the dataset sequence when set.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            point_count: DEFAULT_POINTS,
            initial: LineParameters::ZERO,
            prediction_x: 0.,
            theme: Theme::default(),
            seed: None,
        }
    }
}

fn clamp_range(value: f64, range: &RangeInclusive<f64>) -> f64 {
    if value.is_finite() {
        value.clamp(*range.start(), *range.end())
    } else {
        0.
    }
}

/// The single writer of all the state shared between the math engine and the plot surface.
///
/// Every mutation bumps `revision`, a shell redraws once per observed revision change.
#[derive(Debug)]
pub struct Session {
    rng: StdRng,
    dataset: Dataset,
    optimal: Result<LineParameters>,
    current: LineParameters,
    initial: LineParameters,
    prediction_x: f64,
    point_count: usize,
    theme: Theme,
    mode: Mode,
    revision: u64,
}

impl Session {
    /// Creates a new `Session` with a freshly generated dataset.
    ///
    /// # Arguments
    /// * `config` - The starting values, the point count is clamped into `POINT_COUNT_RANGE`.
    ///
    /// # Returns
    /// An error if the dataset could not be generated.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let point_count = config.point_count.clamp(MIN_POINTS, MAX_POINTS);
        let dataset = Dataset::generate_with(&mut rng, point_count)?;

        Ok(Self::assemble(rng, config, dataset))
    }

    /// Creates a new `Session` around an existing dataset.
    ///
    /// The dataset is kept until the point count changes or new data is requested.
    ///
    /// # Returns
    /// An error if the dataset size is outside `POINT_COUNT_RANGE`.
    pub fn with_dataset(config: SessionConfig, dataset: Dataset) -> Result<Self> {
        let len = dataset.len();
        if len < MIN_POINTS {
            return Err(RegressionErr::NotEnoughPoints {
                got: len,
                min: MIN_POINTS,
            });
        }
        if len > MAX_POINTS {
            return Err(RegressionErr::TooManyPoints {
                got: len,
                max: MAX_POINTS,
            });
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self::assemble(rng, config, dataset))
    }

    fn assemble(rng: StdRng, config: SessionConfig, dataset: Dataset) -> Self {
        let optimal = optimal_parameters(&dataset);
        log::info!(
            "session started with {} points, theme {}",
            dataset.len(),
            config.theme
        );

        Self {
            rng,
            point_count: dataset.len(),
            dataset,
            optimal,
            current: config.initial,
            initial: config.initial,
            prediction_x: clamp_to_domain(config.prediction_x),
            theme: config.theme,
            mode: Mode::default(),
            revision: 0,
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn current(&self) -> LineParameters {
        self.current
    }

    /// The least squares fit of the current dataset, or why it does not exist.
    pub fn optimal(&self) -> &Result<LineParameters> {
        &self.optimal
    }

    pub fn prediction_x(&self) -> f64 {
        self.prediction_x
    }

    pub fn prediction_y(&self) -> f64 {
        self.current.predict(self.prediction_x)
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The MSE of the current line.
    pub fn mse(&self) -> f64 {
        mse(&self.dataset, self.current.m, self.current.c)
    }

    /// The MSE of the best fit, `None` when the fit is degenerate.
    pub fn optimal_mse(&self) -> Option<f64> {
        self.optimal
            .as_ref()
            .ok()
            .map(|best| mse(&self.dataset, best.m, best.c))
    }

    /// Formats the current line as `y = 0.80x + 2.00`.
    pub fn equation(&self) -> String {
        let LineParameters { m, c } = self.current;
        // the sign follows what is printed, -0.001 shows as + 0.00
        let c = (c * 100.).round() / 100.;
        let sign = if c < 0. { '-' } else { '+' };
        format!("y = {m:.2}x {sign} {:.2}", c.abs())
    }

    /// Borrows everything the plot surface needs for one event or frame.
    pub fn surface_inputs(&self) -> SurfaceInputs<'_> {
        SurfaceInputs {
            dataset: &self.dataset,
            line: self.current,
            theme: self.theme,
            prediction_x: self.prediction_x,
        }
    }

    pub fn set_slope(&mut self, m: f64) {
        self.current.m = clamp_range(m, &SLOPE_RANGE);
        self.touch();
    }

    pub fn set_intercept(&mut self, c: f64) {
        self.current.c = clamp_range(c, &INTERCEPT_RANGE);
        self.touch();
    }

    /// Replaces both parameters at once, without clamping.
    ///
    /// Used to show fitted lines, which may legitimately sit outside the slider ranges.
    pub fn set_params(&mut self, params: LineParameters) {
        self.current = params;
        self.touch();
    }

    pub fn set_prediction_x(&mut self, x: f64) {
        self.prediction_x = clamp_to_domain(x);
        self.touch();
    }

    pub fn nudge_slope(&mut self, steps: i32) {
        self.set_slope(self.current.m + steps as f64 * SLOPE_STEP);
    }

    pub fn nudge_intercept(&mut self, steps: i32) {
        self.set_intercept(self.current.c + steps as f64 * INTERCEPT_STEP);
    }

    pub fn nudge_prediction_x(&mut self, steps: i32) {
        self.set_prediction_x(self.prediction_x + steps as f64 * PREDICTION_STEP);
    }

    /// Changes the amount of points, regenerating the dataset if it actually changed.
    ///
    /// # Returns
    /// An error if the new dataset could not be generated, the session is left untouched.
    pub fn set_point_count(&mut self, count: usize) -> Result<()> {
        let count = count.clamp(MIN_POINTS, MAX_POINTS);
        if count == self.point_count {
            return Ok(());
        }

        self.point_count = count;
        self.regenerate()
    }

    pub fn nudge_point_count(&mut self, steps: i32) -> Result<()> {
        let count = self.point_count.saturating_add_signed(steps as isize);
        self.set_point_count(count)
    }

    /// Draws a whole new dataset, recomputes the best fit and resets the line.
    ///
    /// # Returns
    /// An error if the new dataset could not be generated, the session is left untouched.
    pub fn regenerate(&mut self) -> Result<()> {
        let dataset = Dataset::generate_with(&mut self.rng, self.point_count)?;

        self.optimal = optimal_parameters(&dataset);
        self.dataset = dataset;
        self.current = self.initial;
        self.touch();

        match &self.optimal {
            Ok(best) => log::info!(
                "new dataset of {} points, best fit m={:.3} c={:.3}",
                self.point_count,
                best.m,
                best.c
            ),
            Err(e) => log::warn!("new dataset of {} points: {e}", self.point_count),
        }

        Ok(())
    }

    /// Moves the current line onto the best fit.
    ///
    /// # Returns
    /// `RegressionErr::DegenerateFit` if there is no best fit, nothing changes then.
    pub fn reset_to_optimal(&mut self) -> Result<()> {
        let best = self.optimal.clone()?;
        self.current = best;
        self.touch();
        Ok(())
    }

    /// Moves the current line onto the best fit and goes back to free play.
    pub fn apply_best_fit(&mut self) -> Result<()> {
        self.reset_to_optimal()?;
        self.set_mode(Mode::Play);
        Ok(())
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.touch();
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.touch();
    }
}
