use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::error::{RegressionErr, Result};

/// Slope of the hidden relationship every synthetic dataset is drawn around.
pub const TRUE_SLOPE: f64 = 0.8;
/// Intercept of the hidden relationship every synthetic dataset is drawn around.
pub const TRUE_INTERCEPT: f64 = 2.0;
/// Generated x values fall in `[-X_SPREAD, X_SPREAD)`.
pub const X_SPREAD: f64 = 8.0;
/// Noise added to each y value falls in `[-NOISE_AMPLITUDE, NOISE_AMPLITUDE)`.
pub const NOISE_AMPLITUDE: f64 = 2.5;

pub const MIN_POINTS: usize = 2;
pub const MAX_POINTS: usize = 100;
pub const DEFAULT_POINTS: usize = 20;

/// A single labeled sample of the scatter plot.
///
/// Points are immutable once created, the `id` is the generation order and stays attached
/// to the point after the dataset is sorted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    id: usize,
    x: f64,
    y: f64,
}

impl DataPoint {
    /// Creates a new `DataPoint`.
    ///
    /// # Arguments
    /// * `id` - The stable identifier of the point within its dataset.
    /// * `x` - The value of the predictor.
    /// * `y` - The observed value.
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

/// An ordered collection of points, always sorted ascending by `x`.
///
/// A dataset is never mutated in place, changing the amount of points or reshuffling
/// means building a whole new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    points: Vec<DataPoint>,
}

impl Dataset {
    /// Creates a new `Dataset` from already labeled points.
    ///
    /// # Arguments
    /// * `points` - The points to own, in any order.
    ///
    /// # Returns
    /// The dataset with its points sorted by `x`, ids are kept untouched.
    pub fn from_points(mut points: Vec<DataPoint>) -> Self {
        points.sort_by(|a, b| a.x.total_cmp(&b.x));
        Self { points }
    }

    /// Creates a new `Dataset` from raw `(x, y)` pairs, labeling them in the given order.
    ///
    /// # Arguments
    /// * `pairs` - The coordinates of every point.
    pub fn from_xy(pairs: &[(f64, f64)]) -> Self {
        let points = pairs
            .iter()
            .enumerate()
            .map(|(id, &(x, y))| DataPoint::new(id, x, y))
            .collect();

        Self::from_points(points)
    }

    /// Generates a synthetic dataset using the thread local random number generator.
    ///
    /// # Arguments
    /// * `count` - The amount of points to generate.
    ///
    /// # Returns
    /// An error if `count` is smaller than `MIN_POINTS`.
    pub fn generate(count: usize) -> Result<Self> {
        Self::generate_with(&mut rand::rng(), count)
    }

    /// Generates a synthetic dataset around `y = TRUE_SLOPE·x + TRUE_INTERCEPT`.
    ///
    /// Each x is drawn uniformly from `[-X_SPREAD, X_SPREAD)` and each y gets independent
    /// uniform noise from `[-NOISE_AMPLITUDE, NOISE_AMPLITUDE)`. Ids follow the generation
    /// order and are assigned before sorting.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `count` - The amount of points to generate.
    ///
    /// # Returns
    /// An error if `count` is smaller than `MIN_POINTS`.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Result<Self> {
        if count < MIN_POINTS {
            return Err(RegressionErr::NotEnoughPoints {
                got: count,
                min: MIN_POINTS,
            });
        }

        let xs = Uniform::new(-X_SPREAD, X_SPREAD)?;
        let noise = Uniform::new(-NOISE_AMPLITUDE, NOISE_AMPLITUDE)?;

        let points = (0..count)
            .map(|id| {
                let x = xs.sample(rng);
                let y = TRUE_SLOPE * x + TRUE_INTERCEPT + noise.sample(rng);
                DataPoint::new(id, x, y)
            })
            .collect();

        log::debug!("generated a dataset of {count} points");
        Ok(Self::from_points(points))
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataPoint> {
        self.points.iter()
    }

    /// Finds a point by its id.
    pub fn get(&self, id: usize) -> Option<&DataPoint> {
        self.points.iter().find(|p| p.id == id)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a DataPoint;
    type IntoIter = std::slice::Iter<'a, DataPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn generates_exact_count_with_unique_ids() {
        let mut rng = seeded_rng();

        for count in [MIN_POINTS, 5, DEFAULT_POINTS, MAX_POINTS] {
            let dataset = Dataset::generate_with(&mut rng, count).unwrap();
            assert_eq!(dataset.len(), count);

            let mut ids: Vec<_> = dataset.iter().map(DataPoint::id).collect();
            ids.sort_unstable();
            assert_eq!(ids, (0..count).collect::<Vec<_>>());
        }
    }

    #[test]
    fn generated_points_are_sorted_by_x() {
        let mut rng = seeded_rng();
        let dataset = Dataset::generate_with(&mut rng, MAX_POINTS).unwrap();

        assert!(dataset.points().windows(2).all(|w| w[0].x() <= w[1].x()));
    }

    #[test]
    fn generated_points_stay_inside_the_noise_band() {
        let mut rng = seeded_rng();

        for _ in 0..20 {
            let dataset = Dataset::generate_with(&mut rng, MAX_POINTS).unwrap();
            for p in &dataset {
                assert!((-X_SPREAD..X_SPREAD).contains(&p.x()), "x out of range: {p:?}");
                let residual = p.y() - (TRUE_SLOPE * p.x() + TRUE_INTERCEPT);
                assert!(residual.abs() <= NOISE_AMPLITUDE, "noise too large: {p:?}");
            }
        }
    }

    #[test]
    fn generated_x_is_centered_and_noise_is_unbiased() {
        let mut rng = seeded_rng();
        let (mut sum_x, mut sum_noise, mut n) = (0., 0., 0.);

        for _ in 0..50 {
            let dataset = Dataset::generate_with(&mut rng, MAX_POINTS).unwrap();
            for p in &dataset {
                sum_x += p.x();
                sum_noise += p.y() - (TRUE_SLOPE * p.x() + TRUE_INTERCEPT);
                n += 1.;
            }
        }

        // 5000 samples, the standard error of the mean x is about 0.07
        assert!((sum_x / n).abs() < 0.5, "mean x: {}", sum_x / n);
        assert!((sum_noise / n).abs() < 0.2, "mean noise: {}", sum_noise / n);
    }

    #[test]
    fn too_few_points() {
        let mut rng = seeded_rng();

        for count in [0, 1] {
            let err = Dataset::generate_with(&mut rng, count).unwrap_err();
            assert_eq!(err, RegressionErr::NotEnoughPoints { got: count, min: MIN_POINTS });
        }
    }

    #[test]
    fn from_points_sorts_but_keeps_ids() {
        let dataset = Dataset::from_xy(&[(3., 0.), (-1., 1.), (2., 2.)]);

        let ids: Vec<_> = dataset.iter().map(DataPoint::id).collect();
        let xs: Vec<_> = dataset.iter().map(DataPoint::x).collect();

        assert_eq!(ids, [1, 2, 0]);
        assert_eq!(xs, [-1., 2., 3.]);
        assert_eq!(dataset.get(0).map(DataPoint::x), Some(3.));
        assert!(dataset.get(3).is_none());
    }
}
