use regression_core::{LineParameters, SessionConfig, Theme};

/// Which line the session starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialKind {
    Zero,
    Alternate,
}

/// Settings parsed from the JSON file, not yet validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDraft {
    pub point_count: u64,
    pub theme: Theme,
    pub initial: InitialKind,
    pub prediction_x: f64,
    pub seed: Option<u64>,
    pub learning_rate: f64,
    pub iterations: u64,
    pub cell_width_px: f64,
    pub cell_height_px: f64,
    pub device_pixel_ratio: f64,
}

impl Default for ConfigDraft {
    fn default() -> Self {
        Self {
            point_count: 20,
            theme: Theme::Light,
            initial: InitialKind::Zero,
            prediction_x: 0.0,
            seed: None,
            learning_rate: 0.01,
            iterations: 300,
            cell_width_px: 8.0,
            cell_height_px: 16.0,
            device_pixel_ratio: 1.0,
        }
    }
}

/// Parameters of the gradient descent animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescentConfig {
    pub learning_rate: f64,
    pub iterations: usize,
}

/// Virtual pixel size of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    pub width_px: f64,
    pub height_px: f64,
}

/// Validated application settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub descent: DescentConfig,
    pub cell: CellSize,
    pub device_pixel_ratio: f64,
}

impl InitialKind {
    pub fn params(self) -> LineParameters {
        match self {
            Self::Zero => LineParameters::ZERO,
            Self::Alternate => LineParameters::ALTERNATE,
        }
    }
}
