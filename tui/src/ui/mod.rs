pub mod layout;
pub mod plot;
pub mod screens;
pub mod theme;
pub mod widgets;
