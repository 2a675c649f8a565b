pub mod animation;
pub mod controls;
pub mod guide;
