use ratatui::style::{Color, Modifier, Style};
use regression_core::surface::Rgb;

/// Terminal styles for one of the two plot themes.
///
/// Base aesthetic:
/// - light: white paper, slate text, blue accents
/// - dark: near-black background, pale grey text, the same blue accents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    bg: Rgb,
    fg: Rgb,
    dim: Rgb,
    muted: Rgb,
}

impl Theme {
    // Shared accents
    pub const ACCENT_BLUE: Color = Color::Rgb(0x25, 0x63, 0xeb);
    pub const ACCENT_GREEN: Color = Color::Rgb(0x10, 0xb9, 0x81);
    pub const ACCENT_RED: Color = Color::Rgb(0xdc, 0x26, 0x26);
    pub const ACCENT_AMBER: Color = Color::Rgb(0xd9, 0x77, 0x06);

    const LIGHT: Theme = Theme {
        bg: Rgb::hex(0xffffff),
        fg: Rgb::hex(0x1f2937),
        dim: Rgb::hex(0x4b5563),
        muted: Rgb::hex(0x9ca3af),
    };

    const DARK: Theme = Theme {
        bg: Rgb::hex(0x171717),
        fg: Rgb::hex(0xf3f4f6),
        dim: Rgb::hex(0xd1d5db),
        muted: Rgb::hex(0x6b7280),
    };

    pub fn of(theme: regression_core::Theme) -> Self {
        match theme {
            regression_core::Theme::Light => Self::LIGHT,
            regression_core::Theme::Dark => Self::DARK,
        }
    }

    pub fn background(&self) -> Rgb {
        self.bg
    }

    /// Default full-screen style.
    pub fn base(&self) -> Style {
        Style::default().fg(color(self.fg)).bg(color(self.bg))
    }

    /// Panel borders.
    pub fn border(&self) -> Style {
        Style::default().fg(color(self.muted)).bg(color(self.bg))
    }

    /// Borders of the focused panel.
    pub fn border_focus(&self) -> Style {
        Style::default().fg(Self::ACCENT_BLUE).bg(color(self.bg))
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(Self::ACCENT_BLUE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(color(self.fg))
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(color(self.dim))
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(color(self.muted))
    }

    /// The selected row of a list.
    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(Self::ACCENT_BLUE)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    pub fn ok(&self) -> Style {
        Style::default()
            .fg(Self::ACCENT_GREEN)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warn(&self) -> Style {
        Style::default()
            .fg(Self::ACCENT_AMBER)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(Self::ACCENT_RED)
            .add_modifier(Modifier::BOLD)
    }

    /// Keys in hint bars.
    pub fn key(&self) -> Style {
        Style::default()
            .fg(Self::ACCENT_BLUE)
            .add_modifier(Modifier::BOLD)
    }

    /// Mixes `rgb` over the background, terminals have no alpha channel.
    pub fn blend(&self, rgb: Rgb, opacity: f64) -> Color {
        let a = opacity.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (fg as f64 * a + bg as f64 * (1.0 - a)).round() as u8;
        Color::Rgb(mix(rgb.0, self.bg.0), mix(rgb.1, self.bg.1), mix(rgb.2, self.bg.2))
    }
}

pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blending_over_the_background() {
        let light = Theme::of(regression_core::Theme::Light);
        let red = Rgb::hex(0xf87171);

        assert_eq!(light.blend(red, 1.0), color(red));
        assert_eq!(light.blend(red, 0.0), Color::Rgb(255, 255, 255));
        assert_eq!(light.blend(Rgb(0, 0, 0), 0.4), Color::Rgb(153, 153, 153));
    }

    #[test]
    fn follows_the_plot_theme() {
        let light = Theme::of(regression_core::Theme::Light);
        let dark = Theme::of(regression_core::Theme::Dark);

        assert_ne!(light.background(), dark.background());
        assert_ne!(light.base(), dark.base());
    }
}
