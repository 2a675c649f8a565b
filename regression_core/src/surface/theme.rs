use std::{fmt, str::FromStr};

/// An opaque 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Builds a color from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Self((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    pub const WHITE: Self = Self::hex(0xffffff);
}

/// Colors used by the plot surface for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub grid: Rgb,
    pub axis: Rgb,
    pub text: Rgb,
    pub line: Rgb,
    pub point: Rgb,
    pub point_inner: Rgb,
    pub error_line: Rgb,
    pub error_line_hover: Rgb,
    pub prediction_dot: Rgb,
    pub prediction_outline: Rgb,
}

const LIGHT: Palette = Palette {
    grid: Rgb::hex(0xe5e7eb),
    axis: Rgb::hex(0x64748b),
    text: Rgb::hex(0x4b5563),
    line: Rgb::hex(0x2563eb),
    point: Rgb::hex(0x2563eb),
    point_inner: Rgb::WHITE,
    error_line: Rgb::hex(0xf87171),
    error_line_hover: Rgb::hex(0xdc2626),
    prediction_dot: Rgb::hex(0x10b981),
    prediction_outline: Rgb::WHITE,
};

const DARK: Palette = Palette {
    grid: Rgb::hex(0x404040),
    axis: Rgb::hex(0x64748b),
    text: Rgb::hex(0xd1d5db),
    line: Rgb::hex(0x2563eb),
    point: Rgb::hex(0x2563eb),
    point_inner: Rgb::WHITE,
    error_line: Rgb::hex(0xef4444),
    error_line_hover: Rgb::hex(0xdc2626),
    prediction_dot: Rgb::hex(0x10b981),
    prediction_outline: Rgb::WHITE,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Self::Light => &LIGHT,
            Self::Dark => &DARK,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}
