use super::theme::{Palette, Rgb};
use super::{MarkerState, SurfaceInputs};
use crate::geometry::{CoordinateMapper, DOMAIN_MAX, DOMAIN_MIN, ScreenPoint, ViewportGeometry};
use crate::regression::LineParameters;

/// Distance between grid lines and tick labels, in logical units.
pub const GRID_STEP: i32 = 2;
/// Surfaces narrower than this use the small label set.
pub const NARROW_LABELS_PX: f64 = 500.;

pub const POINT_RADIUS: f64 = 6.;
pub const POINT_RADIUS_HOVER: f64 = 8.;
pub const POINT_RING_RADIUS: f64 = 12.;
pub const MARKER_RADIUS: f64 = 8.;
pub const MARKER_HALO_RADIUS: f64 = 15.;

/// The draw order of the scene, every primitive belongs to exactly one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    Grid,
    Axes,
    Labels,
    RegressionLine,
    ErrorSegments,
    Points,
    Prediction,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stroke {
    Solid,
    Dashed { on: f64, off: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Segment {
        from: ScreenPoint,
        to: ScreenPoint,
        color: Rgb,
        width: f64,
        stroke: Stroke,
        opacity: f64,
    },
    Disc {
        center: ScreenPoint,
        radius: f64,
        color: Rgb,
        opacity: f64,
    },
    Ring {
        center: ScreenPoint,
        radius: f64,
        color: Rgb,
        width: f64,
    },
    Label {
        at: ScreenPoint,
        text: String,
        color: Rgb,
        anchor: Anchor,
        bold: bool,
        size_px: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub layer: Layer,
    pub shape: Shape,
}

/// A full frame of the plot surface as an ordered display list.
///
/// Backends paint the primitives in order, there is no incremental redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub geometry: ViewportGeometry,
    pub primitives: Vec<Primitive>,
}

impl Scene {
    /// Returns the primitives of a single layer.
    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &Shape> {
        self.primitives
            .iter()
            .filter(move |p| p.layer == layer)
            .map(|p| &p.shape)
    }
}

struct SceneBuilder<'a> {
    mapper: CoordinateMapper,
    palette: &'a Palette,
    layer: Layer,
    primitives: Vec<Primitive>,
}

impl SceneBuilder<'_> {
    fn push(&mut self, shape: Shape) {
        self.primitives.push(Primitive {
            layer: self.layer,
            shape,
        });
    }

    fn segment(&mut self, from: ScreenPoint, to: ScreenPoint, color: Rgb, width: f64, stroke: Stroke) {
        self.push(Shape::Segment {
            from,
            to,
            color,
            width,
            stroke,
            opacity: 1.,
        });
    }

    fn label(&mut self, at: ScreenPoint, text: impl Into<String>, anchor: Anchor, bold: bool, size_px: f64) {
        self.push(Shape::Label {
            at,
            text: text.into(),
            color: self.palette.text,
            anchor,
            bold,
            size_px,
        });
    }

    fn ticks() -> impl Iterator<Item = i32> {
        (DOMAIN_MIN as i32..=DOMAIN_MAX as i32)
            .step_by(GRID_STEP as usize)
            .filter(|&v| v != 0)
    }

    fn grid(&mut self) {
        self.layer = Layer::Grid;
        let g = *self.mapper.geometry();
        let (pad, w, h) = (g.padding_px(), g.width_px(), g.height_px());
        let dashed = Stroke::Dashed { on: 5., off: 5. };
        let color = self.palette.grid;

        for x in Self::ticks() {
            let sx = self.mapper.scale_x(x as f64);
            self.segment(ScreenPoint::new(sx, pad), ScreenPoint::new(sx, h - pad), color, 1., dashed);
        }

        for y in Self::ticks() {
            let sy = self.mapper.scale_y(y as f64);
            self.segment(ScreenPoint::new(pad, sy), ScreenPoint::new(w - pad, sy), color, 1., dashed);
        }
    }

    fn axes(&mut self) {
        self.layer = Layer::Axes;
        let g = *self.mapper.geometry();
        let (pad, w, h) = (g.padding_px(), g.width_px(), g.height_px());
        let (ox, oy) = (self.mapper.scale_x(0.), self.mapper.scale_y(0.));
        let color = self.palette.axis;

        self.segment(ScreenPoint::new(pad, oy), ScreenPoint::new(w - pad, oy), color, 2., Stroke::Solid);
        self.segment(ScreenPoint::new(ox, pad), ScreenPoint::new(ox, h - pad), color, 2., Stroke::Solid);
    }

    fn labels(&mut self) {
        self.layer = Layer::Labels;
        let g = *self.mapper.geometry();
        let narrow = g.width_px() < NARROW_LABELS_PX;
        let (size, title_size) = if narrow { (11., 14.) } else { (13., 16.) };
        let (below, beside, title_gap) = if narrow { (15., 6., 20.) } else { (20., 10., 30.) };
        let (ox, oy) = (self.mapper.scale_x(0.), self.mapper.scale_y(0.));

        for x in Self::ticks() {
            let at = ScreenPoint::new(self.mapper.scale_x(x as f64), oy + below);
            self.label(at, x.to_string(), Anchor::Center, false, size);
        }

        for y in Self::ticks() {
            let at = ScreenPoint::new(ox - beside, self.mapper.scale_y(y as f64) + 4.);
            self.label(at, y.to_string(), Anchor::Right, false, size);
        }

        self.label(ScreenPoint::new(ox - beside, oy - beside), "(0,0)", Anchor::Right, true, size);

        let x_title = ScreenPoint::new(g.width_px() - g.padding_px() + title_gap, oy + 5.);
        self.label(x_title, "x", Anchor::Center, true, title_size);

        let y_title = ScreenPoint::new(ox - title_gap, g.padding_px() - 10.);
        self.label(y_title, "y", Anchor::Center, true, title_size);
    }

    fn regression_line(&mut self, line: LineParameters) {
        self.layer = Layer::RegressionLine;
        let from = self.mapper.to_screen(DOMAIN_MIN, line.predict(DOMAIN_MIN));
        let to = self.mapper.to_screen(DOMAIN_MAX, line.predict(DOMAIN_MAX));

        self.segment(from, to, self.palette.line, 3., Stroke::Solid);
    }

    fn error_segments(&mut self, inputs: &SurfaceInputs<'_>, hovered: Option<usize>) {
        self.layer = Layer::ErrorSegments;

        for p in inputs.dataset {
            let is_hovered = hovered == Some(p.id());
            let from = self.mapper.to_screen(p.x(), p.y());
            let to = self.mapper.to_screen(p.x(), inputs.line.predict(p.x()));
            let (color, width, opacity) = if is_hovered {
                (self.palette.error_line_hover, 2., 1.)
            } else {
                (self.palette.error_line, 1., 0.4)
            };

            self.push(Shape::Segment {
                from,
                to,
                color,
                width,
                stroke: Stroke::Dashed { on: 4., off: 4. },
                opacity,
            });
        }
    }

    fn points(&mut self, inputs: &SurfaceInputs<'_>, hovered: Option<usize>) {
        self.layer = Layer::Points;

        for p in inputs.dataset {
            let is_hovered = hovered == Some(p.id());
            let center = self.mapper.to_screen(p.x(), p.y());
            let (outer, inner) = if is_hovered {
                (POINT_RADIUS_HOVER, 4.)
            } else {
                (POINT_RADIUS, 3.)
            };

            self.push(Shape::Disc {
                center,
                radius: outer,
                color: self.palette.point,
                opacity: 1.,
            });
            self.push(Shape::Disc {
                center,
                radius: inner,
                color: self.palette.point_inner,
                opacity: 1.,
            });

            if is_hovered {
                self.push(Shape::Ring {
                    center,
                    radius: POINT_RING_RADIUS,
                    color: self.palette.point,
                    width: 2.,
                });
            }
        }
    }

    fn prediction(&mut self, inputs: &SurfaceInputs<'_>, marker: MarkerState) {
        self.layer = Layer::Prediction;
        let center = self
            .mapper
            .to_screen(inputs.prediction_x, inputs.line.predict(inputs.prediction_x));

        if marker != MarkerState::Idle {
            self.push(Shape::Disc {
                center,
                radius: MARKER_HALO_RADIUS,
                color: self.palette.prediction_dot,
                opacity: 0.2,
            });
        }

        self.push(Shape::Disc {
            center,
            radius: MARKER_RADIUS,
            color: self.palette.prediction_dot,
            opacity: 1.,
        });
        self.push(Shape::Ring {
            center,
            radius: MARKER_RADIUS,
            color: self.palette.prediction_outline,
            width: 2.,
        });
    }
}

/// Builds the whole frame for the given inputs and interaction state.
pub(super) fn build(
    geometry: ViewportGeometry,
    inputs: &SurfaceInputs<'_>,
    hovered: Option<usize>,
    marker: MarkerState,
) -> Scene {
    let mut builder = SceneBuilder {
        mapper: CoordinateMapper::new(geometry),
        palette: inputs.theme.palette(),
        layer: Layer::Grid,
        primitives: Vec::new(),
    };

    builder.grid();
    builder.axes();
    builder.labels();
    builder.regression_line(inputs.line);
    builder.error_segments(inputs, hovered);
    builder.points(inputs, hovered);
    builder.prediction(inputs, marker);

    Scene {
        geometry,
        primitives: builder.primitives,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::geometry::LayoutMode;
    use crate::surface::Theme;

    fn labels(width_px: f64) -> Vec<(String, bool, f64)> {
        let dataset = Dataset::from_xy(&[(-1., 0.), (1., 2.)]);
        let inputs = SurfaceInputs {
            dataset: &dataset,
            line: LineParameters::new(1., 1.),
            theme: Theme::Light,
            prediction_x: 0.,
        };
        let geometry = ViewportGeometry::new(width_px, 400., 1., LayoutMode::Wide);

        build(geometry, &inputs, None, MarkerState::Idle)
            .layer(Layer::Labels)
            .filter_map(|shape| match shape {
                Shape::Label { text, bold, size_px, .. } => Some((text.clone(), *bold, *size_px)),
                _ => None,
            })
            .collect()
    }

    fn find<'a>(labels: &'a [(String, bool, f64)], text: &str) -> &'a (String, bool, f64) {
        labels.iter().find(|(t, ..)| t == text).unwrap()
    }

    #[test]
    fn ticks_origin_and_axis_titles() {
        let labels = labels(800.);

        // ten ticks per axis, the origin and both titles
        assert_eq!(labels.len(), 23);
        assert!(!labels.iter().any(|(t, ..)| t == "0"));
        assert_eq!(labels.iter().filter(|(t, ..)| t == "-10" || t == "10").count(), 4);

        assert_eq!(find(&labels, "(0,0)"), &("(0,0)".to_string(), true, 13.));
        assert_eq!(find(&labels, "x"), &("x".to_string(), true, 16.));
        assert_eq!(find(&labels, "y"), &("y".to_string(), true, 16.));
    }

    #[test]
    fn narrow_surfaces_use_smaller_labels() {
        let narrow = labels(499.);
        let wide = labels(500.);

        assert!(narrow.iter().filter(|(_, bold, _)| !bold).all(|(.., size)| *size == 11.));
        assert!(wide.iter().filter(|(_, bold, _)| !bold).all(|(.., size)| *size == 13.));
        assert_eq!(find(&narrow, "(0,0)").2, 11.);
        assert_eq!(find(&narrow, "x").2, 14.);
        assert_eq!(find(&wide, "y").2, 16.);
    }
}
