//! Terminal presentation of the theme setting.
//!
//! This module provides:
//!
//! - [`ThemeScreen`]: the landing screen, bound live to a [`UserSettings`](crate::UserSettings)
//! - [`RadioGroup`] / [`RadioButtonItem`]: the mutually exclusive choice group
//! - [`Palette`]: named `console` styles for light and dark surfaces
//! - [`ColorMode`]: the light/dark mode a theme resolves to
//!
//! Screens render through MiniJinja templates; palettes are applied with a
//! `style` filter, so the same template draws in either color mode.

mod appearance;
mod palette;
mod radio;
mod screen;

pub use appearance::{os_prefers_dark, ColorMode, DarkModeProbe};
pub use palette::{center_in, wrap_to_width, Palette, MISSING_STYLE_INDICATOR};
pub use radio::{RadioButtonItem, RadioGroup, RadioRow};
pub use screen::{
    theme_items, ScreenAction, ThemeScreen, AUTO_THEME, CHOOSE_YOUR_THEME, DARK_THEME,
    LIGHT_THEME, SAMPLE_BUTTON_LABEL,
};
