use std::sync::Arc;
use std::thread;

use anyhow::Context;
use console::Term;
use themeswitch::{
    os_prefers_dark, ScreenAction, Settings, StoreConfig, ThemeScreen, UserSettings,
};

const MAX_WIDTH: usize = 72;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = StoreConfig::default();
    let (settings, open_error) = Settings::from_config_or_default(&config);
    let settings: Arc<dyn UserSettings> = Arc::new(settings);

    // A second observer: every theme change is logged, independent of the screen.
    let changes = settings.theme_stream();
    thread::spawn(move || {
        for theme in changes {
            log::info!("theme is now {}", theme);
        }
    });

    let term = Term::stdout();
    let (_, cols) = term.size();
    let mut screen = ThemeScreen::new(Arc::clone(&settings), os_prefers_dark)
        .context("building theme screen")?
        .with_width(usize::from(cols).min(MAX_WIDTH))
        .with_color(console::colors_enabled());
    if let Some(err) = open_error {
        screen = screen.with_notice(format!("Could not load saved theme: {err}"));
    }

    term.hide_cursor()?;
    let result = run(&term, &mut screen);
    term.show_cursor()?;
    result
}

fn run(term: &Term, screen: &mut ThemeScreen) -> anyhow::Result<()> {
    loop {
        screen.poll();
        term.clear_screen()?;
        term.write_line(&screen.render()?)?;

        if screen.handle_key(term.read_key()?) == ScreenAction::Quit {
            return Ok(());
        }
    }
}
