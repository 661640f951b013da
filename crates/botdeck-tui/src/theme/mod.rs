//! Visual theme: palette and shared styles

pub mod palette;
pub mod styles;
