use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use regression_core::surface::{Cursor, Tooltip};
use regression_core::Session;

use crate::state::animation::DescentAnimation;
use crate::state::controls::Control;
use crate::state::guide::{Guide, STEPS};

use super::plot::CellMapping;
use super::theme::Theme;

fn panel<'a>(title: &'a str, theme: &Theme, focused: bool) -> Block<'a> {
    let border = if focused {
        theme.border_focus()
    } else {
        theme.border()
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {title} "))
        .title_style(theme.title())
        .style(theme.base())
}

/// Title of the plot frame, tells what the pointer can do.
pub fn plot_block<'a>(theme: &Theme, cursor: Cursor) -> Block<'a> {
    let affordance = match cursor {
        Cursor::Default => "",
        Cursor::Pointer => " · point ",
        Cursor::Grab => " · drag to move the prediction ",
        Cursor::Grabbing => " · dragging ",
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(Line::from(vec![
            Span::styled(" y = m·x + c ", theme.title()),
            Span::styled(affordance, theme.dim()),
        ]))
        .style(theme.base())
}

pub fn controls<'a>(session: &Session, focus: Control, theme: &Theme) -> Paragraph<'a> {
    let lines = Control::ALL
        .iter()
        .map(|&control| {
            let selected = control == focus;
            let (prefix, style) = if selected {
                ("▶ ", theme.highlight())
            } else {
                ("  ", theme.text())
            };

            Line::from(vec![
                Span::styled(prefix, theme.key()),
                Span::styled(format!("{:<14}", control.label()), style),
                Span::styled(format!("◀ {:>7} ▶", control.value(session)), style),
            ])
        })
        .collect::<Vec<_>>();

    Paragraph::new(lines).block(panel("Controls", theme, true))
}

pub fn stats<'a>(session: &Session, animation: Option<&DescentAnimation>, theme: &Theme) -> Paragraph<'a> {
    let mut lines = vec![
        Line::from(Span::styled(session.equation(), theme.title())),
        Line::from(vec![
            Span::styled("MSE      ", theme.dim()),
            Span::styled(format!("{:.4}", session.mse()), theme.text()),
        ]),
    ];

    lines.push(match session.optimal_mse() {
        Some(best) => Line::from(vec![
            Span::styled("best MSE ", theme.dim()),
            Span::styled(format!("{best:.4}"), theme.ok()),
        ]),
        None => Line::from(Span::styled(
            "degenerate data, no unique best fit",
            theme.warn(),
        )),
    });

    lines.push(Line::from(vec![
        Span::styled("ŷ(x)     ", theme.dim()),
        Span::styled(
            format!("{:.2} at x = {:.2}", session.prediction_y(), session.prediction_x()),
            theme.text(),
        ),
    ]));

    if let Some((animation, step)) = animation.and_then(|a| Some((a, a.current()?))) {
        let state = if animation.is_done() { "done" } else { "running" };
        lines.push(Line::from(Span::styled(
            format!(
                "descent {state}, iteration {} ({}/{})",
                step.iteration + 1,
                animation.played(),
                animation.frames()
            ),
            theme.key(),
        )));
    }

    Paragraph::new(lines).block(panel("Statistics", theme, false))
}

pub fn guide<'a>(guide: &Guide, theme: &Theme) -> Paragraph<'a> {
    let step = guide.step();

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Step {} of {}", guide.index() + 1, STEPS.len()),
            theme.dim(),
        )),
        Line::from(Span::styled(step.title, theme.title())),
        Line::from(Span::styled(step.summary, theme.text())),
        Line::from(""),
    ];

    lines.extend(step.body.iter().map(|l| Line::from(Span::styled(*l, theme.dim()))));

    if guide.is_last() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("[enter] apply best fit", theme.ok())));
    }

    Paragraph::new(lines)
        .block(panel("Learn", theme, true))
        .wrap(Wrap { trim: false })
}

fn tooltip_lines(tooltip: &Tooltip, theme: &Theme) -> (&'static str, Vec<Line<'static>>) {
    match *tooltip {
        Tooltip::Prediction { x, y, .. } => (
            "Prediction",
            vec![
                Line::from(Span::styled(format!("x = {x:.2}"), theme.text())),
                Line::from(Span::styled(format!("ŷ = {y:.2}"), theme.ok())),
            ],
        ),
        Tooltip::DataPoint {
            number,
            x,
            y,
            predicted,
            abs_error,
            ..
        } => (
            "Point",
            vec![
                Line::from(Span::styled(format!("#{number}  ({x:.2}, {y:.2})"), theme.text())),
                Line::from(Span::styled(format!("ŷ = {predicted:.2}"), theme.dim())),
                Line::from(Span::styled(format!("|error| = {abs_error:.2}"), theme.error())),
            ],
        ),
    }
}

fn anchor_of(tooltip: &Tooltip) -> regression_core::geometry::ScreenPoint {
    match *tooltip {
        Tooltip::Prediction { anchor, .. } | Tooltip::DataPoint { anchor, .. } => anchor,
    }
}

/// Draws the tooltips stacked next to the pointer, kept inside the plot area.
pub fn tooltips(f: &mut Frame, tooltips: &[Tooltip], mapping: &CellMapping, theme: &Theme) {
    let bounds = mapping.area();
    let mut below = 0;

    for tooltip in tooltips {
        let (title, lines) = tooltip_lines(tooltip, theme);
        let width = lines
            .iter()
            .map(Line::width)
            .max()
            .unwrap_or(0)
            .max(title.len() + 2) as u16
            + 2;
        let height = lines.len() as u16 + 2;

        if width > bounds.width || height > bounds.height {
            continue;
        }

        let (col, row) = mapping.to_cell(anchor_of(tooltip));
        let right = bounds.x + bounds.width;
        let bottom = bounds.y + bounds.height;

        let x = if col + 2 + width <= right {
            col + 2
        } else {
            col.saturating_sub(width + 1).max(bounds.x)
        };
        let y = (row + 1 + below).min(bottom - height);

        let area = Rect::new(x, y, width, height);
        below += height;

        f.render_widget(Clear, area);
        f.render_widget(
            Paragraph::new(lines).block(panel(title, theme, false)),
            area,
        );
    }
}

/// A one line bar of `[key] action` pairs.
pub fn hints<'a>(hints: &[(&'a str, &'a str)], theme: &Theme) -> Paragraph<'a> {
    let spans = hints
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(*key, theme.key()),
                Span::styled(format!(" {action}   "), theme.muted()),
            ]
        })
        .collect::<Vec<_>>();

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .style(theme.base())
}

/// Draws a message on the last row of `area`.
pub fn error_bar(f: &mut Frame, area: Rect, msg: &str, theme: &Theme) {
    if area.height == 0 {
        return;
    }

    let bar = Rect {
        x: area.x + 1,
        y: area.y + area.height - 1,
        width: area.width.saturating_sub(2),
        height: 1,
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" ✖ ", theme.error()),
            Span::styled(msg.to_string(), theme.error()),
        ]))
        .style(theme.base()),
        bar,
    );
}
