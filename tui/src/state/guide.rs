/// A single page of the learn mode walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideStep {
    pub title: &'static str,
    pub summary: &'static str,
    pub body: &'static [&'static str],
}

pub const STEPS: [GuideStep; 6] = [
    GuideStep {
        title: "The goal",
        summary: "Linear regression looks for the straight line that best follows the data.",
        body: &[
            "The line is  y = m·x + c",
            "",
            "m  slope, how steep the line is",
            "c  intercept, where it crosses the y axis",
            "",
            "Best means the vertical distances between the points and the line are as small as possible.",
            "Try it: move the slope and intercept until the red error segments shrink.",
        ],
    },
    GuideStep {
        title: "Mean squared error",
        summary: "MSE measures how good a line is, lower is better.",
        body: &[
            "For every point the error is the actual y minus the predicted one.",
            "",
            "MSE = (1/n) · Σ (yᵢ - (m·xᵢ + c))²",
            "",
            "Squaring keeps every error positive so they cannot cancel out.",
            "It punishes large misses more than small ones.",
            "It keeps the function smooth, which makes it easy to minimise.",
        ],
    },
    GuideStep {
        title: "Least squares, one variable",
        summary: "Calculus gives the best m and c directly.",
        body: &[
            "Setting both partial derivatives of the MSE to zero gives:",
            "",
            "m = (n·Σxy - Σx·Σy) / (n·Σx² - (Σx)²)",
            "c = (Σy - m·Σx) / n  =  ȳ - m·x̄",
            "",
            "If every x is the same the denominator is zero and no single best line exists.",
        ],
    },
    GuideStep {
        title: "Least squares, many variables",
        summary: "With several inputs the same idea is written with matrices.",
        body: &[
            "y = β₀ + β₁·x₁ + β₂·x₂ + … + βₚ·xₚ",
            "",
            "In matrix form  y = X·β + ε",
            "X has one row per sample and a leading column of ones.",
            "",
            "The normal equation solves all coefficients at once:",
            "β = (Xᵀ·X)⁻¹ · Xᵀ·y",
        ],
    },
    GuideStep {
        title: "Gradient descent",
        summary: "An iterative way down the MSE surface, it scales to huge data.",
        body: &[
            "1. start from some m and c",
            "2. compute the gradient of the MSE",
            "3. step against it, scaled by the learning rate α",
            "4. repeat until the MSE stops falling",
            "",
            "∂MSE/∂m = (-2/n) · Σ xᵢ·(yᵢ - ŷᵢ)",
            "∂MSE/∂c = (-2/n) · Σ (yᵢ - ŷᵢ)",
            "",
            "Press g to watch it run on the current data.",
        ],
    },
    GuideStep {
        title: "Apply the best fit",
        summary: "Put the least squares line on the chart.",
        body: &[
            "Model  y = m·x + c, or y = X·β with many inputs",
            "Cost   MSE",
            "Solve  least squares in closed form, or gradient descent step by step",
            "",
            "Closed form is fast for small data, gradient descent handles large data.",
            "",
            "Press enter to apply the best fit and go back to free mode.",
        ],
    },
];

/// Position inside the walkthrough.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Guide {
    current: usize,
}

impl Guide {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn step(&self) -> &'static GuideStep {
        &STEPS[self.current]
    }

    pub fn is_last(&self) -> bool {
        self.current == STEPS.len() - 1
    }

    /// Returns whether the position changed.
    pub fn next(&mut self) -> bool {
        self.jump(self.current + 1)
    }

    /// Returns whether the position changed.
    pub fn previous(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(i) => self.jump(i),
            None => false,
        }
    }

    /// Moves to the zero-based step `index`, out of range indexes are ignored.
    pub fn jump(&mut self, index: usize) -> bool {
        if index >= STEPS.len() || index == self.current {
            return false;
        }

        self.current = index;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_forward_and_back() {
        let mut guide = Guide::new();
        assert_eq!(guide.step().title, "The goal");
        assert!(!guide.previous());

        for _ in 0..10 {
            guide.next();
        }
        assert!(guide.is_last());
        assert!(!guide.next());

        assert!(guide.previous());
        assert_eq!(guide.index(), 4);
    }

    #[test]
    fn jumps_only_inside_the_guide() {
        let mut guide = Guide::new();

        assert!(guide.jump(3));
        assert_eq!(guide.step().title, "Least squares, many variables");
        assert!(!guide.jump(3));
        assert!(!guide.jump(6));
        assert_eq!(guide.index(), 3);
    }
}
