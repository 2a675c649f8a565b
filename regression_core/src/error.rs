use std::{
    error::Error,
    fmt::{self, Display},
};

use rand_distr::uniform::Error as UniformError;

/// The result type used in the entire regression core.
pub type Result<T> = std::result::Result<T, RegressionErr>;

/// The regression core's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum RegressionErr {
    /// The least squares denominator `n·Σx² − (Σx)²` vanished, every x is (numerically) the same.
    DegenerateFit { n: usize, denominator: f64 },
    NotEnoughPoints {
        got: usize,
        min: usize,
    },
    TooManyPoints {
        got: usize,
        max: usize,
    },
    /// A sampling distribution could not be built.
    Distribution(String),
}

impl From<UniformError> for RegressionErr {
    fn from(value: UniformError) -> Self {
        Self::Distribution(value.to_string())
    }
}

impl Display for RegressionErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RegressionErr::DegenerateFit { n, denominator } => format!(
                "The best fit line is undefined for these {n} points, all x values coincide (denominator {denominator:e})"
            ),
            RegressionErr::NotEnoughPoints { got, min } => {
                format!("A dataset needs at least {min} points, got {got}")
            }
            RegressionErr::TooManyPoints { got, max } => {
                format!("A dataset holds at most {max} points, got {got}")
            }
            RegressionErr::Distribution(msg) => {
                format!("Failed to build the sampling distribution: {msg}")
            }
        };

        write!(f, "{s}")
    }
}

impl Error for RegressionErr {}
