use super::SurfaceInputs;
use super::scene::{self, Scene};
use crate::dataset::Dataset;
use crate::geometry::{CoordinateMapper, ScreenPoint, ViewportGeometry};
use crate::regression::point_error;

/// Pointer distance under which the prediction marker can be grabbed.
pub const MARKER_HIT_RADIUS_PX: f64 = 25.;
/// Pointer distance under which a data point counts as hovered.
pub const POINT_HIT_RADIUS_PX: f64 = 20.;

/// Interaction state of the prediction marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarkerState {
    #[default]
    Idle,
    Hovering,
    Dragging,
}

/// Raw pointer input, positions are relative to the surface's top left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    MouseMove(ScreenPoint),
    MouseDown(ScreenPoint),
    MouseUp,
    TouchStart(ScreenPoint),
    TouchMove(ScreenPoint),
    TouchEnd,
    /// The pointer left the surface.
    Leave,
}

/// What the owner of the surface has to do after an event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceResponse {
    /// A new prediction x requested by a drag, already clamped to the domain.
    pub prediction_x: Option<f64>,
    /// The platform's default handling (scrolling) should be suppressed.
    pub prevent_default: bool,
    /// Something visible changed and the surface needs exactly one redraw.
    pub redraw: bool,
}

/// Pointer affordance to show over the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Pointer,
    Grab,
    Grabbing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tooltip {
    Prediction {
        anchor: ScreenPoint,
        x: f64,
        y: f64,
    },
    DataPoint {
        anchor: ScreenPoint,
        /// One based label, `id + 1`.
        number: usize,
        x: f64,
        y: f64,
        predicted: f64,
        abs_error: f64,
    },
}

/// Returns the id of the first point, in dataset order, within `POINT_HIT_RADIUS_PX` of `at`.
///
/// Overlapping points resolve to the first match, not the closest one.
pub fn hit_test_points(mapper: &CoordinateMapper, dataset: &Dataset, at: ScreenPoint) -> Option<usize> {
    dataset
        .iter()
        .find(|p| mapper.to_screen(p.x(), p.y()).distance(at) <= POINT_HIT_RADIUS_PX)
        .map(|p| p.id())
}

/// Whether `at` is within `MARKER_HIT_RADIUS_PX` of the prediction marker.
pub fn hit_test_marker(mapper: &CoordinateMapper, inputs: &SurfaceInputs<'_>, at: ScreenPoint) -> bool {
    let marker = mapper.to_screen(inputs.prediction_x, inputs.prediction_y());
    marker.distance(at) <= MARKER_HIT_RADIUS_PX
}

/// The interactive plot: owns the viewport and the hover/drag state, nothing else.
///
/// Dataset, line and prediction x are owned by the caller and passed in on every call.
#[derive(Debug, Clone, Default)]
pub struct PlotSurface {
    geometry: Option<ViewportGeometry>,
    marker: MarkerState,
    hovered: Option<usize>,
    pointer: Option<ScreenPoint>,
}

impl PlotSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn geometry(&self) -> Option<&ViewportGeometry> {
        self.geometry.as_ref()
    }

    pub fn marker_state(&self) -> MarkerState {
        self.marker
    }

    /// Id of the hovered data point, if any.
    pub fn hovered_point(&self) -> Option<usize> {
        self.hovered
    }

    pub fn pointer(&self) -> Option<ScreenPoint> {
        self.pointer
    }

    /// Records a new measured size of the surface.
    ///
    /// # Returns
    /// Whether the geometry changed, meaning the surface must be redrawn.
    pub fn resize(&mut self, geometry: ViewportGeometry) -> bool {
        let changed = self.geometry != Some(geometry);
        if changed {
            log::debug!(
                "plot surface resized to {}x{}",
                geometry.width_px(),
                geometry.height_px()
            );
        }

        self.geometry = Some(geometry);
        changed
    }

    /// Forgets the hovered point, used when the dataset is replaced under the surface.
    pub fn clear_hover(&mut self) -> bool {
        self.hovered.take().is_some()
    }

    fn mapper(&self) -> Option<CoordinateMapper> {
        self.geometry
            .filter(ViewportGeometry::is_measured)
            .map(CoordinateMapper::new)
    }

    /// Interprets a single pointer event.
    ///
    /// # Arguments
    /// * `event` - The pointer input.
    /// * `inputs` - The current dataset, line and prediction x.
    ///
    /// # Returns
    /// The changes the owner should apply and whether to redraw.
    pub fn handle(&mut self, event: PointerEvent, inputs: &SurfaceInputs<'_>) -> SurfaceResponse {
        let before = (self.marker, self.hovered, self.pointer);
        let mut response = SurfaceResponse::default();

        match event {
            PointerEvent::MouseMove(at) => self.pointer_update(at, inputs, &mut response),
            PointerEvent::MouseDown(at) => {
                if self.marker != MarkerState::Dragging {
                    self.pointer_update(at, inputs, &mut response);
                }
                if self.marker == MarkerState::Hovering {
                    self.marker = MarkerState::Dragging;
                }
            }
            PointerEvent::TouchStart(at) => {
                self.pointer_update(at, inputs, &mut response);
                if self.marker == MarkerState::Hovering {
                    self.marker = MarkerState::Dragging;
                    response.prevent_default = true;
                }
            }
            PointerEvent::TouchMove(at) => {
                if self.marker == MarkerState::Dragging {
                    self.pointer_update(at, inputs, &mut response);
                }
            }
            PointerEvent::MouseUp | PointerEvent::TouchEnd => {
                if self.marker == MarkerState::Dragging {
                    self.marker = MarkerState::Idle;
                }
            }
            PointerEvent::Leave => {
                self.marker = MarkerState::Idle;
                self.hovered = None;
                self.pointer = None;
            }
        }

        let (marker, hovered, pointer) = before;
        let state_changed = marker != self.marker || hovered != self.hovered;
        let tooltip_moved = pointer != self.pointer && self.has_tooltip();
        response.redraw = state_changed || tooltip_moved || response.prediction_x.is_some();

        response
    }

    fn pointer_update(&mut self, at: ScreenPoint, inputs: &SurfaceInputs<'_>, response: &mut SurfaceResponse) {
        let Some(mapper) = self.mapper() else {
            return;
        };

        self.pointer = Some(at);

        if self.marker == MarkerState::Dragging {
            response.prediction_x = Some(mapper.unscale_x_clamped(at.x));
            response.prevent_default = true;
            return;
        }

        self.marker = if hit_test_marker(&mapper, inputs, at) {
            MarkerState::Hovering
        } else {
            MarkerState::Idle
        };
        self.hovered = hit_test_points(&mapper, inputs.dataset, at);
    }

    fn has_tooltip(&self) -> bool {
        self.marker != MarkerState::Idle || self.hovered.is_some()
    }

    pub fn cursor(&self) -> Cursor {
        match (self.marker, self.hovered) {
            (MarkerState::Dragging, _) => Cursor::Grabbing,
            (MarkerState::Hovering, _) => Cursor::Grab,
            (MarkerState::Idle, Some(_)) => Cursor::Pointer,
            (MarkerState::Idle, None) => Cursor::Default,
        }
    }

    /// Returns the tooltips to show next to the pointer, prediction first.
    pub fn tooltips(&self, inputs: &SurfaceInputs<'_>) -> Vec<Tooltip> {
        let Some(anchor) = self.pointer else {
            return Vec::new();
        };

        let mut tooltips = Vec::with_capacity(2);

        if self.marker != MarkerState::Idle {
            tooltips.push(Tooltip::Prediction {
                anchor,
                x: inputs.prediction_x,
                y: inputs.prediction_y(),
            });
        }

        let point = self
            .hovered
            .filter(|_| self.marker != MarkerState::Dragging)
            .and_then(|id| inputs.dataset.get(id));

        if let Some(p) = point {
            tooltips.push(Tooltip::DataPoint {
                anchor,
                number: p.id() + 1,
                x: p.x(),
                y: p.y(),
                predicted: inputs.line.predict(p.x()),
                abs_error: point_error(p, inputs.line.m, inputs.line.c).abs(),
            });
        }

        tooltips
    }

    /// Renders a full frame.
    ///
    /// # Returns
    /// `None` while the surface has no usable size yet.
    pub fn render(&self, inputs: &SurfaceInputs<'_>) -> Option<Scene> {
        let geometry = self.geometry.filter(ViewportGeometry::is_measured)?;
        Some(scene::build(geometry, inputs, self.hovered, self.marker))
    }
}
