//! Named styles for each color mode, and the template filters that apply them.

use std::collections::HashMap;

use console::{measure_text_width, Style};
use minijinja::{Environment, Value};
use unicode_width::UnicodeWidthStr;

use super::appearance::ColorMode;

/// Prefix shown when a template asks for a style the palette lacks.
pub const MISSING_STYLE_INDICATOR: &str = "(!?)";

/// A collection of named styles.
///
/// # Example
///
/// ```rust
/// use themeswitch::Palette;
/// use console::Style;
///
/// let palette = Palette::new().add("title", Style::new().bold());
/// assert_eq!(palette.apply("title", "Hi", false), "Hi");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Palette {
    styles: HashMap<String, Style>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Styles for light surfaces.
    pub fn light() -> Self {
        Self::new()
            .add("title", Style::new().black().bold())
            .add("option", Style::new().black())
            .add("option_selected", Style::new().blue().bold())
            .add("button", Style::new().white().on_blue().bold())
            .add("body", Style::new().black())
            .add("notice", Style::new().red().bold())
            .add("muted", Style::new().black().dim())
    }

    /// Styles for dark surfaces.
    pub fn dark() -> Self {
        Self::new()
            .add("title", Style::new().white().bold())
            .add("option", Style::new().white())
            .add("option_selected", Style::new().cyan().bold())
            .add("button", Style::new().black().on_cyan().bold())
            .add("body", Style::new().white())
            .add("notice", Style::new().yellow().bold())
            .add("muted", Style::new().white().dim())
    }

    /// The palette drawn in `mode`.
    pub fn for_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Light => Self::light(),
            ColorMode::Dark => Self::dark(),
        }
    }

    /// Adds a named style, returning the palette for chaining.
    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Applies the named style to `text`.
    ///
    /// With `use_color` off the text is returned as-is. Unknown names are
    /// prefixed with [`MISSING_STYLE_INDICATOR`].
    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(_) if !use_color => text.to_string(),
            Some(style) => style
                .clone()
                .force_styling(true)
                .apply_to(text)
                .to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }
}

/// Pads `text` on the left so it sits in the middle of `width` columns.
///
/// ANSI escapes do not count towards the width, so styled text centers the
/// same as plain text.
pub fn center_in(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(measure_text_width(text)) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

/// Splits `text` into lines no wider than `width` columns, breaking on spaces.
///
/// A single word wider than `width` gets a line of its own.
pub fn wrap_to_width(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if !line.is_empty() && line.width() + 1 + word.width() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Registers the `style` and `center` filters on a minijinja environment.
///
/// Usage: `{{ text | style("title", use_color) }}` and `{{ text | center(width) }}`.
pub(crate) fn register_filters(env: &mut Environment<'static>, palette: Palette) {
    env.add_filter(
        "style",
        move |value: Value, name: String, use_color: bool| -> String {
            palette.apply(&name, &value.to_string(), use_color)
        },
    );

    env.add_filter("center", |value: Value, width: usize| -> String {
        center_in(&value.to_string(), width)
    });
}
