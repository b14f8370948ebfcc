//! The theme selection screen.

use std::sync::Arc;

use console::Key;
use minijinja::{Environment, Error};
use serde::Serialize;

use super::appearance::{ColorMode, DarkModeProbe};
use super::palette::{register_filters, wrap_to_width, Palette};
use super::radio::{RadioButtonItem, RadioGroup, RadioRow};
use crate::settings::{AppTheme, ThemeSubscription, UserSettings};

pub const CHOOSE_YOUR_THEME: &str = "Choose your theme";
pub const LIGHT_THEME: &str = "Light Theme";
pub const DARK_THEME: &str = "Dark Theme";
pub const AUTO_THEME: &str = "Auto Theme";
pub const SAMPLE_BUTTON_LABEL: &str = "Sample Button";
pub const KEY_HINT: &str = "↑↓ move · enter select · q quit";
pub const LOREM_IPSUM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis \
nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.";

const DEFAULT_WIDTH: usize = 64;

const LANDING_TEMPLATE: &str = r#"
{{ title | style("title", use_color) | center(width) }}

{% for row in rows %}
{{ row.label | style(row.style, use_color) | center(width) }}
{% endfor %}

{{ button | style("button", use_color) | center(width) }}

{% for line in body %}
{{ line | style("body", use_color) | center(width) }}
{% endfor %}
{% if notice %}

{{ notice | style("notice", use_color) | center(width) }}
{% endif %}

{{ hint | style("muted", use_color) | center(width) }}
"#;

/// What the driver loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    Continue,
    Quit,
}

#[derive(Serialize)]
struct LandingView<'a> {
    use_color: bool,
    width: usize,
    title: &'a str,
    rows: Vec<RadioRow>,
    button: String,
    body: Vec<String>,
    notice: Option<&'a str>,
    hint: &'a str,
}

/// The radio items for every theme, ids being the theme ordinals.
pub fn theme_items() -> Vec<RadioButtonItem> {
    AppTheme::ALL
        .iter()
        .map(|&theme| RadioButtonItem::new(theme.ordinal() as usize, theme_title(theme)))
        .collect()
}

fn theme_title(theme: AppTheme) -> &'static str {
    match theme {
        AppTheme::Day => LIGHT_THEME,
        AppTheme::Night => DARK_THEME,
        AppTheme::Auto => AUTO_THEME,
    }
}

fn theme_for_id(id: usize) -> Option<AppTheme> {
    i64::try_from(id)
        .ok()
        .and_then(|ordinal| AppTheme::from_ordinal(ordinal).ok())
}

/// The landing screen: a theme radio group bound to [`UserSettings`].
///
/// The screen holds its own subscription to the settings stream. Call
/// [`poll`](Self::poll) before rendering to pick up writes made anywhere in
/// the process; the selection and palette follow the latest value.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use themeswitch::{AppTheme, MemoryPreferences, Settings, ThemeScreen, UserSettings, THEME_KEY};
///
/// let settings = Arc::new(Settings::open(MemoryPreferences::new(), THEME_KEY).unwrap());
/// let mut screen = ThemeScreen::new(settings.clone(), || false)
///     .unwrap()
///     .with_color(false);
///
/// settings.set_theme(AppTheme::Night).unwrap();
/// screen.poll();
///
/// assert_eq!(screen.theme(), AppTheme::Night);
/// assert!(screen.render().unwrap().contains("(•) Dark Theme"));
/// ```
pub struct ThemeScreen {
    settings: Arc<dyn UserSettings>,
    subscription: ThemeSubscription,
    theme: AppTheme,
    group: RadioGroup,
    probe: DarkModeProbe,
    notice: Option<String>,
    width: usize,
    use_color: bool,
    light: Environment<'static>,
    dark: Environment<'static>,
}

impl ThemeScreen {
    /// Creates the screen and subscribes it to `settings`.
    ///
    /// `probe` answers "is the system dark?" whenever the theme is Auto.
    ///
    /// # Errors
    ///
    /// Returns an error if the screen template fails to compile.
    pub fn new(settings: Arc<dyn UserSettings>, probe: DarkModeProbe) -> Result<Self, Error> {
        let mut subscription = settings.theme_stream();
        let theme = subscription.latest().unwrap_or_else(|| settings.theme());
        let group = RadioGroup::new(theme_items(), theme.ordinal() as usize);
        Ok(Self {
            settings,
            subscription,
            theme,
            group,
            probe,
            notice: None,
            width: DEFAULT_WIDTH,
            use_color: console::colors_enabled(),
            light: build_environment(ColorMode::Light)?,
            dark: build_environment(ColorMode::Dark)?,
        })
    }

    /// Sets the number of columns the screen centers within.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Starts the screen with `notice` shown, e.g. a failure to load settings.
    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }

    /// Turns ANSI styling on or off.
    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// The theme the screen currently shows as selected.
    pub fn theme(&self) -> AppTheme {
        self.theme
    }

    /// The mode the screen is drawn in.
    pub fn color_mode(&self) -> ColorMode {
        ColorMode::resolve(self.theme, self.probe)
    }

    /// The message shown after a failed save, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn group(&self) -> &RadioGroup {
        &self.group
    }

    /// Applies every value the settings stream has published since the last
    /// poll. Returns `true` if anything arrived.
    pub fn poll(&mut self) -> bool {
        match self.subscription.latest() {
            Some(theme) => {
                self.theme = theme;
                self.group.set_selected(theme.ordinal() as usize);
                true
            }
            None => false,
        }
    }

    /// Asks the settings store to switch to `theme`.
    ///
    /// A failed save leaves the selection as it was and sets a notice; the
    /// screen keeps running.
    pub fn select(&mut self, theme: AppTheme) {
        let settings = &self.settings;
        let mut outcome = None;
        let mut on_item_select = |id: usize| {
            if let Some(theme) = theme_for_id(id) {
                outcome = Some(settings.set_theme(theme));
            }
        };
        self.group
            .click(theme.ordinal() as usize, Some(&mut on_item_select));

        match outcome {
            Some(Ok(())) => self.notice = None,
            Some(Err(err)) => {
                log::warn!("theme selection not saved: {}", err);
                self.notice = Some(format!("Could not save theme: {}", err));
            }
            None => {}
        }
        self.poll();
    }

    /// Handles one key press.
    pub fn handle_key(&mut self, key: Key) -> ScreenAction {
        match key {
            Key::ArrowUp | Key::Char('k') => self.group.focus_previous(),
            Key::ArrowDown | Key::Char('j') => self.group.focus_next(),
            Key::Enter | Key::Char(' ') => {
                if let Some(theme) = self.group.focused().and_then(theme_for_id) {
                    self.select(theme);
                }
            }
            Key::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                self.select(AppTheme::ALL[index]);
            }
            Key::Escape | Key::Char('q') => return ScreenAction::Quit,
            _ => {}
        }
        ScreenAction::Continue
    }

    /// Renders the screen in its current color mode.
    pub fn render(&self) -> Result<String, Error> {
        let env = match self.color_mode() {
            ColorMode::Light => &self.light,
            ColorMode::Dark => &self.dark,
        };
        let view = LandingView {
            use_color: self.use_color,
            width: self.width,
            title: CHOOSE_YOUR_THEME,
            rows: self.group.rows(),
            button: format!("[ {} ]", SAMPLE_BUTTON_LABEL),
            body: wrap_to_width(LOREM_IPSUM, self.width.saturating_sub(8).max(20)),
            notice: self.notice.as_deref(),
            hint: KEY_HINT,
        };
        env.get_template("landing")?.render(&view)
    }
}

impl std::fmt::Debug for ThemeScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeScreen")
            .field("theme", &self.theme)
            .field("notice", &self.notice)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

fn build_environment(mode: ColorMode) -> Result<Environment<'static>, Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    register_filters(&mut env, Palette::for_mode(mode));
    env.add_template("landing", LANDING_TEMPLATE)?;
    Ok(env)
}
