pub mod menu;
pub mod play;

use crossterm::event::{KeyCode, MouseEvent};
use ratatui::{layout::Rect, Frame};

pub enum Action {
    None,
    Redraw,
    Quit,
    Transition(Screen),
}

pub enum Screen {
    Menu(menu::MenuState),
    Play(Box<play::PlayState>),
}

impl Screen {
    pub fn draw(&self, f: &mut Frame) {
        match self {
            Screen::Menu(s) => menu::draw(f, s),
            Screen::Play(s) => play::draw(f, s),
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Action {
        match self {
            Screen::Menu(s) => menu::handle_key(s, key),
            Screen::Play(s) => play::handle_key(s, key),
        }
    }

    pub fn handle_mouse(&mut self, ev: MouseEvent) -> Action {
        match self {
            Screen::Menu(_) => Action::None,
            Screen::Play(s) => play::handle_mouse(s, ev),
        }
    }

    /// Returns whether the screen has to be redrawn.
    pub fn resize(&mut self, area: Rect) -> bool {
        match self {
            Screen::Menu(_) => true,
            Screen::Play(s) => s.resize(area),
        }
    }

    /// Returns whether the screen has to be redrawn.
    pub fn tick(&mut self) -> bool {
        match self {
            Screen::Menu(_) => false,
            Screen::Play(s) => s.tick(),
        }
    }
}
