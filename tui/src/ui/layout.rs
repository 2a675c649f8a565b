use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the side column holding the controls, guide and statistics.
const SIDE_WIDTH: u16 = 44;
const STATS_HEIGHT: u16 = 8;

/// Regions of the play screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayAreas {
    pub canvas: Rect,
    /// Controls in free mode, the guide in learn mode.
    pub panel: Option<Rect>,
    pub stats: Option<Rect>,
    pub hints: Rect,
}

/// Computes the play screen regions.
///
/// # Arguments
/// * `area` - The whole terminal.
/// * `show_panel` - Whether the controls (or guide) column is visible.
/// * `show_stats` - Whether the statistics panel is visible.
pub fn play(area: Rect, show_panel: bool, show_stats: bool) -> PlayAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let (body, hints) = (rows[0], rows[1]);

    if !show_panel && !show_stats {
        return PlayAreas {
            canvas: body,
            panel: None,
            stats: None,
            hints,
        };
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(SIDE_WIDTH)])
        .split(body);

    let (canvas, side) = (cols[0], cols[1]);

    let (panel, stats) = match (show_panel, show_stats) {
        (true, true) => {
            let side_rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(3), Constraint::Length(STATS_HEIGHT)])
                .split(side);
            (Some(side_rows[0]), Some(side_rows[1]))
        }
        (true, false) => (Some(side), None),
        _ => (None, Some(side)),
    };

    PlayAreas {
        canvas,
        panel,
        stats,
        hints,
    }
}

/// Returns a rect of the given percentage size centered in `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_panels_give_the_canvas_everything() {
        let areas = play(Rect::new(0, 0, 120, 40), false, false);

        assert_eq!(areas.canvas, Rect::new(0, 0, 120, 39));
        assert_eq!(areas.hints, Rect::new(0, 39, 120, 1));
        assert!(areas.panel.is_none() && areas.stats.is_none());
    }

    #[test]
    fn side_column() {
        let areas = play(Rect::new(0, 0, 120, 40), true, true);

        assert_eq!(areas.canvas.width, 120 - SIDE_WIDTH);
        let panel = areas.panel.unwrap();
        let stats = areas.stats.unwrap();
        assert_eq!(panel.x, 120 - SIDE_WIDTH);
        assert_eq!(stats.height, STATS_HEIGHT);
        assert_eq!(panel.height + stats.height, 39);
    }

    #[test]
    fn stats_alone_take_the_column() {
        let areas = play(Rect::new(0, 0, 120, 40), false, true);

        assert!(areas.panel.is_none());
        assert_eq!(areas.stats.unwrap().height, 39);
    }
}
