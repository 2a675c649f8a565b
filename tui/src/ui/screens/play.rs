use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use regression_core::{Mode, PlotSurface, PointerEvent, Session, SessionConfig};

use crate::config::AppConfig;
use crate::state::animation::DescentAnimation;
use crate::state::controls::Control;
use crate::state::guide::Guide;
use crate::ui::layout::{self, PlayAreas};
use crate::ui::plot::{self, CellMapping};
use crate::ui::theme::Theme;
use crate::ui::widgets;

use super::menu::MenuState;
use super::{Action, Screen};

const PLAY_HINTS: &[(&str, &str)] = &[
    ("tab", "focus"),
    ("←→", "adjust"),
    ("r", "best fit"),
    ("n", "new data"),
    ("g", "descent"),
    ("t", "theme"),
    ("m", "learn"),
    ("c/i", "panels"),
    ("q", "menu"),
];

const LEARN_HINTS: &[(&str, &str)] = &[
    ("[ ]", "step"),
    ("1-6", "jump"),
    ("enter", "apply on last step"),
    ("g", "descent"),
    ("t", "theme"),
    ("m", "free mode"),
    ("q", "menu"),
];

/// The chart with its side panels, in free or learn mode.
pub struct PlayState {
    config: AppConfig,
    session: Session,
    surface: PlotSurface,
    focus: Control,
    guide: Guide,
    animation: Option<DescentAnimation>,
    show_panel: bool,
    show_stats: bool,
    window: Rect,
    mapping: Option<CellMapping>,
    notice: Option<String>,
}

impl PlayState {
    /// Creates a new `PlayState` with a fresh session.
    ///
    /// # Errors
    /// Returns an error if the first dataset cannot be generated.
    pub fn new(config: AppConfig, mode: Mode) -> regression_core::Result<Self> {
        let mut session = Session::new(config.session)?;
        session.set_mode(mode);

        Ok(Self {
            config,
            session,
            surface: PlotSurface::new(),
            focus: Control::default(),
            guide: Guide::new(),
            animation: None,
            show_panel: true,
            show_stats: true,
            window: Rect::default(),
            mapping: None,
            notice: None,
        })
    }

    pub fn mode(&self) -> Mode {
        self.session.mode()
    }

    fn areas(&self) -> PlayAreas {
        layout::play(self.window, self.show_panel, self.show_stats)
    }

    /// Records the new terminal size and remeasures the plot.
    pub fn resize(&mut self, window: Rect) -> bool {
        let changed = self.window != window;
        self.window = window;
        self.relayout() || changed
    }

    fn relayout(&mut self) -> bool {
        let inner = Block::default().borders(Borders::ALL).inner(self.areas().canvas);
        let mapping = CellMapping::new(inner, self.config.cell);
        let geometry = mapping.geometry(self.window.width, self.config.device_pixel_ratio);

        let moved = self.mapping != Some(mapping);
        self.mapping = Some(mapping);
        self.surface.resize(geometry) || moved
    }

    /// Advances the descent animation by one frame.
    pub fn tick(&mut self) -> bool {
        let Some(step) = self.animation.as_mut().and_then(DescentAnimation::tick) else {
            return false;
        };

        self.session.set_params(step.params());
        true
    }

    fn report(&mut self, result: regression_core::Result<()>) {
        if let Err(e) = result {
            log::warn!("{e}");
            self.notice = Some(e.to_string());
        }
    }

    fn nudge(&mut self, steps: i32) {
        self.animation = None;
        let result = self.focus.nudge(&mut self.session, steps);
        if self.focus == Control::PointCount {
            self.surface.clear_hover();
        }
        self.report(result);
    }

    fn regenerate(&mut self) {
        self.animation = None;
        let result = self.session.regenerate();
        self.surface.clear_hover();
        self.report(result);
    }

    fn reset_to_optimal(&mut self) {
        self.animation = None;
        let result = self.session.reset_to_optimal();
        self.report(result);
    }

    fn start_descent(&mut self) {
        self.animation = DescentAnimation::start(self.session.dataset(), self.config.descent);
        if self.animation.is_none() {
            self.notice = Some("nothing to animate".into());
        }
    }

    fn handle_guide_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char(']') => self.guide.next(),
            KeyCode::Char('[') => self.guide.previous(),
            KeyCode::Char(d @ '1'..='6') => self.guide.jump(d as usize - '1' as usize),
            KeyCode::Enter if self.guide.is_last() => {
                self.animation = None;
                let result = self.session.apply_best_fit();
                self.report(result);
                true
            }
            _ => false,
        }
    }

    /// The config to go back to the menu with, keeping the chosen theme.
    fn menu_config(&self) -> AppConfig {
        AppConfig {
            session: SessionConfig {
                theme: self.session.theme(),
                ..self.config.session
            },
            ..self.config
        }
    }
}

pub fn handle_key(state: &mut PlayState, key: KeyCode) -> Action {
    let revision = state.session.revision();
    let had_notice = state.notice.take().is_some();

    let redraw = match key {
        KeyCode::Char('q') | KeyCode::Esc => {
            return Action::Transition(Screen::Menu(MenuState::new(state.menu_config())));
        }
        KeyCode::Tab => {
            state.focus = state.focus.next();
            true
        }
        KeyCode::BackTab => {
            state.focus = state.focus.previous();
            true
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.nudge(-1);
            true
        }
        KeyCode::Right | KeyCode::Char('l') => {
            state.nudge(1);
            true
        }
        KeyCode::Char('r') => {
            state.reset_to_optimal();
            true
        }
        KeyCode::Char('n') => {
            state.regenerate();
            true
        }
        KeyCode::Char('g') => {
            state.start_descent();
            true
        }
        KeyCode::Char('t') => {
            state.session.toggle_theme();
            true
        }
        KeyCode::Char('m') => {
            let mode = state.mode().toggled();
            state.session.set_mode(mode);
            true
        }
        KeyCode::Char('c') => {
            state.show_panel = !state.show_panel;
            state.relayout();
            true
        }
        KeyCode::Char('i') => {
            state.show_stats = !state.show_stats;
            state.relayout();
            true
        }
        _ if state.mode() == Mode::Learn => state.handle_guide_key(key),
        _ => false,
    };

    if redraw || had_notice || state.session.revision() != revision {
        Action::Redraw
    } else {
        Action::None
    }
}

/// Feeds a terminal mouse event to the plot surface.
pub fn handle_mouse(state: &mut PlayState, ev: MouseEvent) -> Action {
    let Some(mapping) = state.mapping else {
        return Action::None;
    };

    let at = mapping.to_surface(ev.column, ev.row);
    let event = match (ev.kind, at) {
        (MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left), Some(at)) => {
            PointerEvent::MouseMove(at)
        }
        (MouseEventKind::Down(MouseButton::Left), Some(at)) => PointerEvent::MouseDown(at),
        (MouseEventKind::Up(MouseButton::Left), _) => PointerEvent::MouseUp,
        (_, None) if state.surface.pointer().is_some() => PointerEvent::Leave,
        _ => return Action::None,
    };

    let response = state.surface.handle(event, &state.session.surface_inputs());
    if let Some(x) = response.prediction_x {
        state.session.set_prediction_x(x);
    }

    if response.redraw {
        Action::Redraw
    } else {
        Action::None
    }
}

pub fn draw(f: &mut Frame, state: &PlayState) {
    let theme = Theme::of(state.session.theme());
    let area = f.size();
    f.render_widget(Block::default().style(theme.base()), area);

    let areas = layout::play(area, state.show_panel, state.show_stats);
    let plot_block = widgets::plot_block(&theme, state.surface.cursor());
    let inner = plot_block.inner(areas.canvas);
    f.render_widget(plot_block, areas.canvas);

    let inputs = state.session.surface_inputs();
    let scene = state
        .mapping
        .filter(|m| m.area() == inner)
        .zip(state.surface.render(&inputs));

    match scene {
        Some((mapping, scene)) => {
            plot::draw(f, inner, &scene, &mapping, &theme);
            widgets::tooltips(f, &state.surface.tooltips(&inputs), &mapping, &theme);
        }
        None => f.render_widget(
            Paragraph::new("the terminal is too small for the chart")
                .style(theme.muted())
                .alignment(Alignment::Center),
            inner,
        ),
    }

    if let Some(panel) = areas.panel {
        match state.mode() {
            Mode::Play => f.render_widget(widgets::controls(&state.session, state.focus, &theme), panel),
            Mode::Learn => f.render_widget(widgets::guide(&state.guide, &theme), panel),
        }
    }

    if let Some(stats) = areas.stats {
        f.render_widget(
            widgets::stats(&state.session, state.animation.as_ref(), &theme),
            stats,
        );
    }

    match &state.notice {
        Some(notice) => widgets::error_bar(f, area, notice, &theme),
        None => {
            let hints = match state.mode() {
                Mode::Play => PLAY_HINTS,
                Mode::Learn => LEARN_HINTS,
            };
            f.render_widget(widgets::hints(hints, &theme), areas.hints);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use regression_core::surface::{Cursor, MarkerState};
    use regression_core::{CoordinateMapper, LineParameters};

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.session.seed = Some(21);
        config
    }

    fn state(mode: Mode) -> PlayState {
        let mut state = PlayState::new(config(), mode).unwrap();
        state.resize(Rect::new(0, 0, 160, 48));
        state
    }

    fn mouse(kind: MouseEventKind, (column, row): (u16, u16)) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn marker_cell(state: &PlayState) -> (u16, u16) {
        let mapping = state.mapping.unwrap();
        let geometry = *state.surface.geometry().unwrap();
        let at = CoordinateMapper::new(geometry)
            .to_screen(state.session.prediction_x(), state.session.prediction_y());
        mapping.to_cell(at)
    }

    #[test]
    fn resize_measures_the_plot() {
        let mut state = state(Mode::Play);

        let geometry = state.surface.geometry().unwrap();
        assert!(geometry.is_measured());
        assert_eq!(geometry.padding_px(), 60.);
        assert!(!state.resize(Rect::new(0, 0, 160, 48)));
        assert!(state.resize(Rect::new(0, 0, 80, 30)));
        assert_eq!(state.surface.geometry().unwrap().padding_px(), 30.);
    }

    #[test]
    fn keys_drive_the_session() {
        let mut state = state(Mode::Play);

        assert!(matches!(handle_key(&mut state, KeyCode::Right), Action::Redraw));
        assert!((state.session.current().m - 0.05).abs() < 1e-12);

        handle_key(&mut state, KeyCode::Tab);
        handle_key(&mut state, KeyCode::Char('h'));
        assert!((state.session.current().c + 0.1).abs() < 1e-12);

        handle_key(&mut state, KeyCode::Char('r'));
        assert_eq!(Ok(state.session.current()), *state.session.optimal());

        handle_key(&mut state, KeyCode::Char('t'));
        assert_eq!(state.session.theme(), regression_core::Theme::Dark);

        assert!(matches!(handle_key(&mut state, KeyCode::Char('z')), Action::None));
    }

    #[test]
    fn descent_animation_walks_towards_the_fit() {
        let mut state = state(Mode::Play);
        handle_key(&mut state, KeyCode::Char('g'));

        let mut frames = 0;
        while state.tick() {
            frames += 1;
        }

        assert_eq!(frames, 61);
        let dataset = state.session.dataset();
        assert!(state.session.mse() < regression_core::mse(dataset, 0., 0.));
    }

    #[test]
    fn learn_mode_ends_with_the_best_fit() {
        let mut state = state(Mode::Learn);
        state.session.set_params(LineParameters::ALTERNATE);

        assert!(matches!(handle_key(&mut state, KeyCode::Enter), Action::None));
        handle_key(&mut state, KeyCode::Char('6'));
        assert!(state.guide.is_last());

        handle_key(&mut state, KeyCode::Enter);
        assert_eq!(state.mode(), Mode::Play);
        assert_eq!(Ok(state.session.current()), *state.session.optimal());
    }

    #[test]
    fn dragging_the_marker_with_the_mouse() {
        let mut state = state(Mode::Play);
        let cell = marker_cell(&state);

        handle_mouse(&mut state, mouse(MouseEventKind::Moved, cell));
        assert_eq!(state.surface.cursor(), Cursor::Grab);

        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), cell));
        assert_eq!(state.surface.marker_state(), MarkerState::Dragging);

        let target = (cell.0 + 10, cell.1);
        let action = handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), target));
        assert!(matches!(action, Action::Redraw));
        assert!(state.session.prediction_x() > 0.);

        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), target));
        assert_eq!(state.surface.marker_state(), MarkerState::Idle);
    }

    #[test]
    fn leaving_the_plot_clears_the_pointer() {
        let mut state = state(Mode::Play);
        let cell = marker_cell(&state);

        handle_mouse(&mut state, mouse(MouseEventKind::Moved, cell));
        assert!(state.surface.pointer().is_some());

        handle_mouse(&mut state, mouse(MouseEventKind::Moved, (159, 47)));
        assert!(state.surface.pointer().is_none());
        assert_eq!(state.surface.cursor(), Cursor::Default);
    }
}
