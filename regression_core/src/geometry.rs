//! Bidirectional mapping between the fixed logical plot domain and screen pixels.
//!
//! The logical domain is `[-10, 10] × [-10, 10]` with the origin at its center. Screen
//! coordinates grow right and down, so the y axis is flipped on the way in and out.

/// Lower bound of the logical domain, on both axes.
pub const DOMAIN_MIN: f64 = -10.;
/// Upper bound of the logical domain, on both axes.
pub const DOMAIN_MAX: f64 = 10.;

/// Windows narrower than this use the compact layout.
pub const COMPACT_BREAKPOINT_PX: f64 = 768.;
pub const COMPACT_PADDING_PX: f64 = 30.;
pub const WIDE_PADDING_PX: f64 = 60.;

/// Clamps a logical coordinate into the domain. Non finite values collapse to the origin.
pub fn clamp_to_domain(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(DOMAIN_MIN, DOMAIN_MAX)
    } else {
        0.
    }
}

/// The responsive layout the owning shell decided on.
///
/// The shell measures whatever it considers the "window" once and threads the result in,
/// the geometry never reads global state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayoutMode {
    Compact,
    #[default]
    Wide,
}

impl LayoutMode {
    /// Picks the layout for a window of the given width.
    pub fn from_window_width(width_px: f64) -> Self {
        if width_px < COMPACT_BREAKPOINT_PX {
            Self::Compact
        } else {
            Self::Wide
        }
    }

    pub fn padding_px(self) -> f64 {
        match self {
            Self::Compact => COMPACT_PADDING_PX,
            Self::Wide => WIDE_PADDING_PX,
        }
    }
}

/// The measured size of the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportGeometry {
    width_px: f64,
    height_px: f64,
    device_pixel_ratio: f64,
    padding_px: f64,
}

impl ViewportGeometry {
    /// Creates a new `ViewportGeometry`.
    ///
    /// # Arguments
    /// * `width_px` - The rendered width of the surface in css pixels.
    /// * `height_px` - The rendered height of the surface in css pixels.
    /// * `device_pixel_ratio` - Device pixels per css pixel, non positive values fall back to 1.
    /// * `layout` - The responsive layout chosen by the shell.
    pub fn new(width_px: f64, height_px: f64, device_pixel_ratio: f64, layout: LayoutMode) -> Self {
        let device_pixel_ratio = if device_pixel_ratio > 0. {
            device_pixel_ratio
        } else {
            1.
        };

        Self {
            width_px: width_px.max(0.),
            height_px: height_px.max(0.),
            device_pixel_ratio,
            padding_px: layout.padding_px(),
        }
    }

    pub fn width_px(&self) -> f64 {
        self.width_px
    }

    pub fn height_px(&self) -> f64 {
        self.height_px
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    pub fn padding_px(&self) -> f64 {
        self.padding_px
    }

    /// Width of the area between the paddings.
    pub fn chart_width(&self) -> f64 {
        self.width_px - 2. * self.padding_px
    }

    /// Height of the area between the paddings.
    pub fn chart_height(&self) -> f64 {
        self.height_px - 2. * self.padding_px
    }

    /// Whether the surface is large enough to hold a plot at all.
    ///
    /// Anything not measured yet, or smaller than its own paddings, counts as unknown.
    pub fn is_measured(&self) -> bool {
        self.chart_width() > 0. && self.chart_height() > 0.
    }

    /// Returns the size of the backing store in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        let scale = |v: f64| (v * self.device_pixel_ratio).round() as u32;
        (scale(self.width_px), scale(self.height_px))
    }
}

/// A point in screen space, in css pixels relative to the surface's top left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: ScreenPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Maps logical coordinates to screen pixels and back for a given viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    geometry: ViewportGeometry,
}

impl CoordinateMapper {
    pub fn new(geometry: ViewportGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &ViewportGeometry {
        &self.geometry
    }

    pub fn scale_x(&self, x: f64) -> f64 {
        let g = &self.geometry;
        g.padding_px + (x - DOMAIN_MIN) / (DOMAIN_MAX - DOMAIN_MIN) * g.chart_width()
    }

    pub fn scale_y(&self, y: f64) -> f64 {
        let g = &self.geometry;
        g.height_px - g.padding_px - (y - DOMAIN_MIN) / (DOMAIN_MAX - DOMAIN_MIN) * g.chart_height()
    }

    pub fn unscale_x(&self, sx: f64) -> f64 {
        let g = &self.geometry;
        (sx - g.padding_px) / g.chart_width() * (DOMAIN_MAX - DOMAIN_MIN) + DOMAIN_MIN
    }

    pub fn unscale_y(&self, sy: f64) -> f64 {
        let g = &self.geometry;
        (g.height_px - g.padding_px - sy) / g.chart_height() * (DOMAIN_MAX - DOMAIN_MIN)
            + DOMAIN_MIN
    }

    /// Maps a pointer's screen x into the domain, clamping anything past the plot edges.
    pub fn unscale_x_clamped(&self, sx: f64) -> f64 {
        clamp_to_domain(self.unscale_x(sx))
    }

    pub fn to_screen(&self, x: f64, y: f64) -> ScreenPoint {
        ScreenPoint::new(self.scale_x(x), self.scale_y(y))
    }
}
