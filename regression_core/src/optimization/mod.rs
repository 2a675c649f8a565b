mod gradient_descent;
mod trace;

pub use gradient_descent::GradientDescent;
pub use trace::{DescentProgress, GradientDescentTrace, SAMPLE_EVERY, TraceStep, gradient_descent_trace};
