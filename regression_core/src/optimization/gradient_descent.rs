use crate::dataset::Dataset;
use crate::regression::LineParameters;

/// Plain batch gradient descent over the two line parameters.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    learning_rate: f64,
}

impl GradientDescent {
    /// Creates a new `GradientDescent` optimizer.
    ///
    /// # Arguments
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    ///
    /// # Returns
    /// A new `GradientDescent` instance.
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Computes the gradient of the MSE with respect to `(m, c)`.
    ///
    /// ```text
    /// ∂MSE/∂m = (2/n)·Σ xᵢ·(ŷᵢ − yᵢ)
    /// ∂MSE/∂c = (2/n)·Σ (ŷᵢ − yᵢ)
    /// ```
    ///
    /// The dataset must not be empty.
    pub fn gradient(dataset: &Dataset, params: LineParameters) -> (f64, f64) {
        let scale = 2. / dataset.len() as f64;

        dataset.iter().fold((0., 0.), |(gm, gc), p| {
            let diff = params.predict(p.x()) - p.y();
            (gm + scale * diff * p.x(), gc + scale * diff)
        })
    }

    /// Moves the parameters one step against the gradient.
    pub fn update_params(&self, grad: (f64, f64), params: &mut LineParameters) {
        let lr = self.learning_rate;

        params.m -= lr * grad.0;
        params.c -= lr * grad.1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_vanishes_at_the_optimum() {
        let dataset = Dataset::from_xy(&[(-1., 1.), (0., 2.), (1., 3.)]);
        let (gm, gc) = GradientDescent::gradient(&dataset, LineParameters::new(1., 2.));

        assert_eq!(gm, 0.);
        assert_eq!(gc, 0.);
    }

    #[test]
    fn gradient_from_the_origin() {
        let dataset = Dataset::from_xy(&[(1., 2.), (3., 4.)]);
        let (gm, gc) = GradientDescent::gradient(&dataset, LineParameters::ZERO);

        // (2/2)·(1·(0−2) + 3·(0−4)) and (2/2)·((0−2) + (0−4))
        assert_eq!(gm, -14.);
        assert_eq!(gc, -6.);
    }

    #[test]
    fn update_moves_against_the_gradient() {
        let optimizer = GradientDescent::new(0.5);
        let mut params = LineParameters::new(1., 1.);

        optimizer.update_params((2., -4.), &mut params);

        assert_eq!(params, LineParameters::new(0., 3.));
    }
}
