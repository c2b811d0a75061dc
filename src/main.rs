//! pagetable - browse a tabular data file one page at a time
//!
//! Usage: `pagetable [FILE]` where FILE is a CSV, JSON or YAML table.
//! Without FILE the `source_path` from `~/.pagetable/config.json` is used.

mod action;
mod app;
mod component;
mod components;
mod config;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::tui::Tui;
use anyhow::Result;
use crossterm::event::Event;
use simplelog::WriteLogger;
use std::fs::{self, File};
use std::time::Duration;

fn main() -> Result<()> {
    let mut config = Config::load().unwrap_or_default();
    if let Some(path) = std::env::args().nth(1) {
        config.source_path = path;
    }

    init_logging(&config);
    log::info!("starting pagetable {}", env!("CARGO_PKG_VERSION"));

    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(50));
    tui.enter()?;

    let mut app = App::new(config);
    app.init()?;

    let result = run_app(&mut tui, &mut app);

    tui.exit()?;

    if let Err(err) = result {
        log::error!("fatal: {:?}", err);
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    log::info!("bye");
    Ok(())
}

/// Log to a file; the terminal belongs to the UI
fn init_logging(config: &Config) {
    let Some(path) = Config::log_path() else {
        return;
    };
    if let Some(dir) = path.parent() {
        if fs::create_dir_all(dir).is_err() {
            return;
        }
    }
    if let Ok(file) = File::create(&path) {
        let _ = WriteLogger::init(config.level_filter(), simplelog::Config::default(), file);
    }
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                log::error!("draw error: {}", e);
            }
        })?;

        let action = match tui.next_event()? {
            Some(Event::Key(key)) => app.handle_key_event(key)?,
            Some(Event::Mouse(mouse)) => app.handle_mouse_event(mouse)?,
            Some(Event::Resize(w, h)) => Some(Action::Resize(w, h)),
            Some(_) => None,
            // No event - send a tick for spinners and worker polling
            None => Some(Action::Tick),
        };

        // Action might produce a follow-up action
        let mut current_action = action;
        while let Some(a) = current_action {
            log::trace!("action {}", a);
            current_action = app.update(a)?;
        }
    }

    Ok(())
}
