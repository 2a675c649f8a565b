use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine, Points},
    Frame,
};
use regression_core::geometry::ScreenPoint;
use regression_core::surface::{Anchor, Scene, Shape, Stroke};
use regression_core::{LayoutMode, ViewportGeometry};

use crate::config::model::CellSize;

use super::theme::Theme;

/// Maps terminal cells of the plot area to the virtual pixels of the plot surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMapping {
    area: Rect,
    cell: CellSize,
}

impl CellMapping {
    pub fn new(area: Rect, cell: CellSize) -> Self {
        Self { area, cell }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// The surface geometry for this area.
    ///
    /// # Arguments
    /// * `window_cols` - Width of the whole terminal, which picks the layout mode.
    /// * `device_pixel_ratio` - Forwarded to the geometry.
    pub fn geometry(&self, window_cols: u16, device_pixel_ratio: f64) -> ViewportGeometry {
        let layout = LayoutMode::from_window_width(window_cols as f64 * self.cell.width_px);

        ViewportGeometry::new(
            self.area.width as f64 * self.cell.width_px,
            self.area.height as f64 * self.cell.height_px,
            device_pixel_ratio,
            layout,
        )
    }

    /// The surface position of the centre of a cell, `None` outside the plot area.
    pub fn to_surface(&self, column: u16, row: u16) -> Option<ScreenPoint> {
        let a = self.area;
        let inside = (a.x..a.x + a.width).contains(&column) && (a.y..a.y + a.height).contains(&row);

        inside.then(|| {
            ScreenPoint::new(
                ((column - a.x) as f64 + 0.5) * self.cell.width_px,
                ((row - a.y) as f64 + 0.5) * self.cell.height_px,
            )
        })
    }

    /// The cell holding a surface position, clamped to the plot area.
    pub fn to_cell(&self, at: ScreenPoint) -> (u16, u16) {
        let a = self.area;
        let col = (at.x / self.cell.width_px).floor().max(0.0) as u16;
        let row = (at.y / self.cell.height_px).floor().max(0.0) as u16;

        (
            a.x + col.min(a.width.saturating_sub(1)),
            a.y + row.min(a.height.saturating_sub(1)),
        )
    }

    fn px_per_char(&self) -> f64 {
        self.cell.width_px
    }
}

/// Splits a segment into its visible dashes.
pub fn dashes(from: ScreenPoint, to: ScreenPoint, on: f64, off: f64) -> Vec<(ScreenPoint, ScreenPoint)> {
    let length = from.distance(to);
    if length == 0.0 || !length.is_finite() || on <= 0.0 {
        return vec![(from, to)];
    }

    let (dx, dy) = ((to.x - from.x) / length, (to.y - from.y) / length);
    let at = |d: f64| ScreenPoint::new(from.x + dx * d, from.y + dy * d);

    let mut out = Vec::new();
    let mut start = 0.0;
    while start < length {
        let end = (start + on).min(length);
        out.push((at(start), at(end)));
        start = end + off.max(0.0);
    }

    out
}

/// Clips a segment to the `[0, w] × [0, h]` box (Liang-Barsky).
///
/// `None` when nothing of the segment is inside, or it has non finite ends.
pub fn clip(from: ScreenPoint, to: ScreenPoint, w: f64, h: f64) -> Option<(ScreenPoint, ScreenPoint)> {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    if ![from.x, from.y, dx, dy].iter().all(|v| v.is_finite()) {
        return None;
    }

    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [(-dx, from.x), (dx, w - from.x), (-dy, from.y), (dy, h - from.y)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }

        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    let at = |t: f64| ScreenPoint::new(from.x + dx * t, from.y + dy * t);
    Some((at(t0), at(t1)))
}

/// The on-canvas pieces of a stroked segment, dashes are only laid out inside the box.
fn pieces(from: ScreenPoint, to: ScreenPoint, stroke: Stroke, w: f64, h: f64) -> Vec<(ScreenPoint, ScreenPoint)> {
    let Some((from, to)) = clip(from, to, w, h) else {
        return Vec::new();
    };

    match stroke {
        Stroke::Solid => vec![(from, to)],
        Stroke::Dashed { on, off } => dashes(from, to, on, off),
    }
}

/// Paints a scene into `area`, the scene must have been built for the same mapping.
pub fn draw(f: &mut Frame, area: Rect, scene: &Scene, mapping: &CellMapping, theme: &Theme) {
    let (w, h) = (scene.geometry.width_px(), scene.geometry.height_px());
    let px_per_char = mapping.px_per_char();

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(super::theme::color(theme.background()))
        .x_bounds([0.0, w])
        .y_bounds([0.0, h])
        .paint(|ctx| {
            let mut layer = None;
            for p in &scene.primitives {
                if layer.is_some_and(|l| l != p.layer) {
                    ctx.layer();
                }
                layer = Some(p.layer);
                paint(ctx, &p.shape, (w, h), px_per_char, theme);
            }
        });

    f.render_widget(canvas, area);
}

fn paint(ctx: &mut Context, shape: &Shape, (w, h): (f64, f64), px_per_char: f64, theme: &Theme) {
    // canvas y grows upwards
    let flip = |p: ScreenPoint| (p.x, h - p.y);

    match shape {
        Shape::Segment {
            from,
            to,
            color,
            stroke,
            opacity,
            ..
        } => {
            let color = theme.blend(*color, *opacity);

            for (a, b) in pieces(*from, *to, *stroke, w, h) {
                let ((x1, y1), (x2, y2)) = (flip(a), flip(b));
                ctx.draw(&CanvasLine {
                    x1,
                    y1,
                    x2,
                    y2,
                    color,
                });
            }
        }
        Shape::Disc {
            center,
            radius,
            color,
            opacity,
        } => {
            let color = theme.blend(*color, *opacity);
            let (x, y) = flip(*center);
            let mut r = *radius;
            while r > 0.0 {
                ctx.draw(&Circle { x, y, radius: r, color });
                r -= 2.0;
            }
            ctx.draw(&Points {
                coords: &[(x, y)],
                color,
            });
        }
        Shape::Ring {
            center,
            radius,
            color,
            ..
        } => {
            let (x, y) = flip(*center);
            ctx.draw(&Circle {
                x,
                y,
                radius: *radius,
                color: super::theme::color(*color),
            });
        }
        Shape::Label {
            at,
            text,
            color,
            anchor,
            bold,
            ..
        } => {
            let width = text.chars().count() as f64 * px_per_char;
            let x = match anchor {
                Anchor::Left => at.x,
                Anchor::Center => at.x - width / 2.0,
                Anchor::Right => at.x - width,
            };

            let mut style = Style::default().fg(super::theme::color(*color));
            if *bold {
                style = style.add_modifier(Modifier::BOLD);
            }

            ctx.print(x.max(0.0), h - at.y, Span::styled(text.clone(), style));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> CellMapping {
        CellMapping::new(
            Rect::new(2, 1, 100, 30),
            CellSize {
                width_px: 8.,
                height_px: 16.,
            },
        )
    }

    #[test]
    fn cells_map_to_their_centres() {
        let m = mapping();

        assert_eq!(m.to_surface(2, 1), Some(ScreenPoint::new(4., 8.)));
        assert_eq!(m.to_surface(51, 16), Some(ScreenPoint::new(396., 248.)));
        assert_eq!(m.to_surface(1, 1), None);
        assert_eq!(m.to_surface(102, 5), None);
        assert_eq!(m.to_surface(10, 31), None);
    }

    #[test]
    fn surface_points_map_back_to_cells() {
        let m = mapping();

        for (col, row) in [(2, 1), (40, 20), (101, 30)] {
            let at = m.to_surface(col, row).unwrap();
            assert_eq!(m.to_cell(at), (col, row));
        }
        assert_eq!(m.to_cell(ScreenPoint::new(5000., -3.)), (101, 1));
    }

    #[test]
    fn layout_mode_comes_from_the_whole_window() {
        let m = mapping();

        // 100 cells of plot inside a 95 column window is compact, 96 columns is not
        assert_eq!(m.geometry(95, 1.).padding_px(), 30.);
        assert_eq!(m.geometry(96, 1.).padding_px(), 60.);

        let g = m.geometry(200, 2.);
        assert_eq!((g.width_px(), g.height_px()), (800., 480.));
        assert_eq!(g.backing_size(), (1600, 960));
    }

    #[test]
    fn dashes_cover_the_segment() {
        let pieces = dashes(ScreenPoint::new(0., 0.), ScreenPoint::new(0., 22.), 5., 5.);

        let starts: Vec<_> = pieces.iter().map(|(a, _)| a.y).collect();
        assert_eq!(starts, [0., 10., 20.]);
        assert_eq!(pieces.last().map(|(_, b)| b.y), Some(22.));
    }

    #[test]
    fn segments_are_clipped_to_the_canvas() {
        let (a, b) = clip(ScreenPoint::new(-100., 50.), ScreenPoint::new(300., 50.), 200., 100.).unwrap();
        assert_eq!((a, b), (ScreenPoint::new(0., 50.), ScreenPoint::new(200., 50.)));

        let inside = (ScreenPoint::new(10., 10.), ScreenPoint::new(20., 30.));
        assert_eq!(clip(inside.0, inside.1, 200., 100.), Some(inside));

        assert_eq!(clip(ScreenPoint::new(-5., 10.), ScreenPoint::new(-1., 90.), 200., 100.), None);
        assert_eq!(clip(ScreenPoint::new(10., 150.), ScreenPoint::new(190., 120.), 200., 100.), None);
        assert_eq!(clip(ScreenPoint::new(10., 10.), ScreenPoint::new(f64::INFINITY, 10.), 200., 100.), None);
    }

    #[test]
    fn steep_dashed_segments_stay_bounded() {
        // the error segment of a diverged descent, about 1e12 px long
        let from = ScreenPoint::new(120., 3.2e12);
        let to = ScreenPoint::new(120., 90.);

        let dashed_stroke = Stroke::Dashed { on: 4., off: 4. };

        let dashed = pieces(from, to, dashed_stroke, 800., 480.);
        assert!(!dashed.is_empty());
        assert!(dashed.len() <= 60, "{} dashes", dashed.len());
        assert!(dashed.iter().all(|(a, b)| a.y <= 480.01 && b.y <= 480.01));

        let off_screen = pieces(
            ScreenPoint::new(120., 1e12),
            ScreenPoint::new(120., 5e11),
            dashed_stroke,
            800.,
            480.,
        );
        assert!(off_screen.is_empty());
    }

    #[test]
    fn draws_a_diverged_line() {
        use ratatui::{backend::TestBackend, Terminal};
        use regression_core::{Dataset, LineParameters, PlotSurface, Session, SessionConfig};

        let dataset = Dataset::from_xy(&[(-3., -1.), (-1., 1.), (2., 4.), (4., 5.)]);
        let mut session = Session::with_dataset(SessionConfig::default(), dataset).unwrap();
        session.set_params(LineParameters::new(-1.7e10, 3e9));

        let area = Rect::new(0, 0, 100, 30);
        let m = CellMapping::new(
            area,
            CellSize {
                width_px: 8.,
                height_px: 16.,
            },
        );
        let mut surface = PlotSurface::new();
        surface.resize(m.geometry(area.width, 1.));
        let scene = surface.render(&session.surface_inputs()).unwrap();
        let theme = Theme::of(session.theme());

        let mut terminal = Terminal::new(TestBackend::new(area.width, area.height)).unwrap();
        terminal.draw(|f| draw(f, area, &scene, &m, &theme)).unwrap();
    }

    #[test]
    fn zero_length_segment_stays_whole() {
        let p = ScreenPoint::new(3., 3.);
        assert_eq!(dashes(p, p, 4., 4.), vec![(p, p)]);
    }
}
