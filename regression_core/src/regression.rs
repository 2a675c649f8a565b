use crate::dataset::{DataPoint, Dataset};
use crate::error::{RegressionErr, Result};

/// Relative tolerance under which the least squares denominator is considered zero.
pub const DEGENERATE_EPSILON: f64 = 1e-12;

/// The slope and intercept of a line `y = m·x + c`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LineParameters {
    pub m: f64,
    pub c: f64,
}

impl LineParameters {
    /// The flat line through the origin, the starting point for practice.
    pub const ZERO: Self = Self { m: 0., c: 0. };

    /// An alternate starting point, visibly off the data.
    pub const ALTERNATE: Self = Self { m: 0.5, c: -10. };

    pub fn new(m: f64, c: f64) -> Self {
        Self { m, c }
    }

    /// Returns the value the line predicts for `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.m * x + self.c
    }
}

/// Computes the mean squared error of the line `(m, c)` over the dataset.
///
/// # Arguments
/// * `dataset` - The points to evaluate, must not be empty.
/// * `m` - The slope of the line.
/// * `c` - The intercept of the line.
///
/// # Returns
/// `(1/n)·Σ(yᵢ − (m·xᵢ + c))²`. The value is NaN for an empty dataset, calling this
/// with no points is a programming error.
pub fn mse(dataset: &Dataset, m: f64, c: f64) -> f64 {
    debug_assert!(!dataset.is_empty(), "mse of an empty dataset");

    let sum: f64 = dataset
        .iter()
        .map(|p| point_error(p, m, c).powi(2))
        .sum();

    sum / dataset.len() as f64
}

/// Returns the signed residual of a point, positive when the point lies above the line.
pub fn point_error(point: &DataPoint, m: f64, c: f64) -> f64 {
    point.y() - (m * point.x() + c)
}

/// Solves the ordinary least squares problem for a single predictor in closed form.
///
/// ```text
/// m* = (n·Σxy − Σx·Σy) / (n·Σx² − (Σx)²)
/// c* = (Σy − m*·Σx) / n
/// ```
///
/// # Arguments
/// * `dataset` - The points to fit.
///
/// # Returns
/// The optimal parameters, or `RegressionErr::DegenerateFit` if the denominator is within
/// `DEGENERATE_EPSILON` (relative to `n·Σx²`) of zero. That covers empty and single point
/// datasets as well as datasets where every x is the same.
pub fn optimal_parameters(dataset: &Dataset) -> Result<LineParameters> {
    let n = dataset.len() as f64;

    let (sum_x, sum_y, sum_xy, sum_xx) = dataset.iter().fold(
        (0., 0., 0., 0.),
        |(sx, sy, sxy, sxx): (f64, f64, f64, f64), p| {
            (sx + p.x(), sy + p.y(), sxy + p.x() * p.y(), sxx + p.x() * p.x())
        },
    );

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator.abs() <= DEGENERATE_EPSILON * (n * sum_xx).max(1.) {
        log::warn!("degenerate fit over {} points", dataset.len());
        return Err(RegressionErr::DegenerateFit {
            n: dataset.len(),
            denominator,
        });
    }

    let m = (n * sum_xy - sum_x * sum_y) / denominator;
    let c = (sum_y - m * sum_x) / n;

    Ok(LineParameters { m, c })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear() -> Dataset {
        Dataset::from_xy(&[(-2., 0.), (-1., 1.), (0., 2.), (1., 3.), (2., 4.)])
    }

    #[test]
    fn perfect_line_is_recovered_exactly() {
        let dataset = linear();
        let best = optimal_parameters(&dataset).unwrap();

        assert_eq!(best, LineParameters::new(1., 2.));
        assert_eq!(mse(&dataset, best.m, best.c), 0.);
    }

    #[test]
    fn mse_of_the_flat_line() {
        let got = mse(&linear(), 0., 0.);
        // (0 + 1 + 4 + 9 + 16) / 5
        assert!((got - 6.0).abs() < 1e-12, "got: {got}");
    }

    #[test]
    fn point_error_is_signed() {
        let above = DataPoint::new(0, 1., 5.);
        let below = DataPoint::new(1, 1., -1.);

        assert_eq!(point_error(&above, 1., 2.), 2.);
        assert_eq!(point_error(&below, 1., 2.), -4.);
    }

    #[test]
    fn identical_x_values_are_degenerate() {
        let dataset = Dataset::from_xy(&[(3., 1.), (3., 2.), (3., 7.)]);

        match optimal_parameters(&dataset) {
            Err(RegressionErr::DegenerateFit { n, .. }) => assert_eq!(n, 3),
            other => panic!("expected a degenerate fit, got {other:?}"),
        }
    }

    #[test]
    fn too_small_datasets_are_degenerate() {
        assert!(optimal_parameters(&Dataset::default()).is_err());
        assert!(optimal_parameters(&Dataset::from_xy(&[(1., 1.)])).is_err());
    }

    #[test]
    fn two_points_define_the_line() {
        let dataset = Dataset::from_xy(&[(0., 1.), (2., 5.)]);
        let best = optimal_parameters(&dataset).unwrap();

        assert!((best.m - 2.).abs() < 1e-12);
        assert!((best.c - 1.).abs() < 1e-12);
    }

    #[test]
    fn predict() {
        let line = LineParameters::ALTERNATE;
        assert_eq!(line.predict(4.), -8.);
        assert_eq!(LineParameters::ZERO.predict(123.), 0.);
    }
}
