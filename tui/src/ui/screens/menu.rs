use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use regression_core::Mode;

use crate::config::AppConfig;
use crate::ui::layout::centered_rect;
use crate::ui::theme::Theme;
use crate::ui::widgets;

use super::play::PlayState;
use super::{Action, Screen};

const LOGO: &str = r#"
 ██╗     ██╗███╗   ██╗███████╗ █████╗ ██████╗
 ██║     ██║████╗  ██║██╔════╝██╔══██╗██╔══██╗
 ██║     ██║██╔██╗ ██║█████╗  ███████║██████╔╝
 ██║     ██║██║╚██╗██║██╔══╝  ██╔══██║██╔══██╗
 ███████╗██║██║ ╚████║███████╗██║  ██║██║  ██║
 ╚══════╝╚═╝╚═╝  ╚═══╝╚══════╝╚═╝  ╚═╝╚═╝  ╚═╝

linear regression, one line at a time
"#;

const MENU_ITEMS: &[&str] = &["Free mode", "Learn mode", "Quit"];

pub struct MenuState {
    pub selected: usize,
    config: AppConfig,
    error: Option<String>,
}

impl MenuState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            selected: 0,
            config,
            error: None,
        }
    }

    fn open(&mut self, mode: Mode) -> Action {
        match PlayState::new(self.config, mode) {
            Ok(play) => Action::Transition(Screen::Play(Box::new(play))),
            Err(e) => {
                log::error!("cannot start a session: {e}");
                self.error = Some(e.to_string());
                Action::None
            }
        }
    }
}

pub fn handle_key(state: &mut MenuState, key: KeyCode) -> Action {
    state.error = None;

    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            if state.selected > 0 {
                state.selected -= 1;
            }
            Action::Redraw
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.selected < MENU_ITEMS.len() - 1 {
                state.selected += 1;
            }
            Action::Redraw
        }
        KeyCode::Enter => match state.selected {
            0 => state.open(Mode::Play),
            1 => state.open(Mode::Learn),
            _ => Action::Quit,
        },
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}

pub fn draw(f: &mut Frame, state: &MenuState) {
    let theme = Theme::of(state.config.session.theme);
    let area = f.size();
    f.render_widget(Block::default().style(theme.base()), area);

    let outer = centered_rect(60, 70, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10),
            Constraint::Length(1),
            Constraint::Length(MENU_ITEMS.len() as u16 * 2 + 2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(outer);

    draw_logo(f, chunks[0], &theme);
    draw_menu(f, chunks[2], state, &theme);
    f.render_widget(
        widgets::hints(
            &[("↑↓ / j k", "navigate"), ("enter", "select"), ("q", "quit")],
            &theme,
        ),
        chunks[4],
    );

    if let Some(err) = &state.error {
        widgets::error_bar(f, area, err, &theme);
    }
}

fn draw_logo(f: &mut Frame, area: Rect, theme: &Theme) {
    let lines: Vec<Line> = LOGO
        .lines()
        .map(|l| Line::from(Span::styled(l, theme.title())))
        .collect();

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_menu(f: &mut Frame, area: Rect, state: &MenuState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(" MENU ")
        .title_alignment(Alignment::Center)
        .title_style(theme.title());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let item_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            MENU_ITEMS
                .iter()
                .map(|_| Constraint::Length(2))
                .collect::<Vec<_>>(),
        )
        .split(inner);

    for (i, (label, item_area)) in MENU_ITEMS.iter().zip(item_areas.iter()).enumerate() {
        let is_selected = i == state.selected;
        let (prefix, style) = if is_selected {
            ("▶ ", theme.title().add_modifier(Modifier::BOLD))
        } else {
            ("  ", theme.dim())
        };

        let line = Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(*label, style),
        ]);

        f.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), *item_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_stays_in_range() {
        let mut state = MenuState::new(AppConfig::default());

        handle_key(&mut state, KeyCode::Up);
        assert_eq!(state.selected, 0);

        for _ in 0..5 {
            handle_key(&mut state, KeyCode::Char('j'));
        }
        assert_eq!(state.selected, MENU_ITEMS.len() - 1);
        assert!(matches!(handle_key(&mut state, KeyCode::Enter), Action::Quit));
    }

    #[test]
    fn opens_the_requested_mode() {
        let mut state = MenuState::new(AppConfig::default());
        state.selected = 1;

        match handle_key(&mut state, KeyCode::Enter) {
            Action::Transition(Screen::Play(play)) => assert_eq!(play.mode(), Mode::Learn),
            _ => panic!("expected the play screen"),
        }
    }
}
