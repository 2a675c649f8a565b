pub mod dataset;
pub mod error;
pub mod geometry;
pub mod optimization;
pub mod regression;
pub mod session;
pub mod surface;

pub use dataset::{DataPoint, Dataset};
pub use error::{RegressionErr, Result};
pub use geometry::{CoordinateMapper, LayoutMode, ViewportGeometry};
pub use optimization::{DescentProgress, GradientDescent, GradientDescentTrace, TraceStep, gradient_descent_trace};
pub use regression::{LineParameters, mse, optimal_parameters, point_error};
pub use session::{Mode, Session, SessionConfig};
pub use surface::{PlotSurface, PointerEvent, Scene, SurfaceInputs, SurfaceResponse, Theme};
