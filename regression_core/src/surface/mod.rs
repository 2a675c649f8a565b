mod interaction;
mod scene;
mod theme;

pub use interaction::{
    Cursor, MARKER_HIT_RADIUS_PX, MarkerState, POINT_HIT_RADIUS_PX, PlotSurface, PointerEvent,
    SurfaceResponse, Tooltip, hit_test_marker, hit_test_points,
};
pub use scene::{Anchor, Layer, Primitive, Scene, Shape, Stroke};
pub use theme::{Palette, Rgb, Theme};

use crate::dataset::Dataset;
use crate::regression::LineParameters;

/// Everything the plot surface reads from its owner on each event and each frame.
///
/// The surface only ever borrows these, changes flow back through `SurfaceResponse`.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceInputs<'a> {
    pub dataset: &'a Dataset,
    pub line: LineParameters,
    pub theme: Theme,
    pub prediction_x: f64,
}

impl SurfaceInputs<'_> {
    /// The height of the prediction marker, always derived from the current line.
    pub fn prediction_y(&self) -> f64 {
        self.line.predict(self.prediction_x)
    }
}
