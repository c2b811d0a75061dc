//! Terminal setup, teardown and event polling

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEventKind},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    thread::{self, ThreadId},
    time::Duration,
};

/// Terminal wrapper owning raw mode and the alternate screen
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// How long to wait for input before emitting a tick
    pub tick_rate: Duration,
    active: bool,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            tick_rate: Duration::from_millis(50),
            active: false,
        })
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Enter the alternate screen and enable raw mode
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        self.terminal.clear()?;
        self.active = true;
        install_panic_hook();
        log::debug!("terminal entered, tick rate {:?}", self.tick_rate);
        Ok(())
    }

    /// Leave the alternate screen; a second call is a no-op
    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        restore_terminal()?;
        log::debug!("terminal restored");
        Ok(())
    }

    /// Next input event, or None when the tick rate elapsed first
    ///
    /// Key releases and bare mouse motion are dropped here.
    pub fn next_event(&self) -> Result<Option<Event>> {
        if !event::poll(self.tick_rate)? {
            return Ok(None);
        }

        let event = event::read()?;
        let keep = match &event {
            Event::Key(key) => key.kind == KeyEventKind::Press,
            Event::Mouse(mouse) => !matches!(mouse.kind, MouseEventKind::Moved),
            _ => true,
        };
        Ok(keep.then_some(event))
    }

    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

fn restore_terminal() -> Result<()> {
    terminal::disable_raw_mode()?;
    crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        cursor::Show
    )?;
    Ok(())
}

/// Only the thread that owns the UI may tear the terminal down
fn owns_terminal(owner: ThreadId) -> bool {
    thread::current().id() == owner
}

/// Restore the terminal before a UI panic message is printed
///
/// Panics on other threads (the page worker) leave the terminal alone; the
/// main loop sees the dropped channel and reports it in the status bar.
fn install_panic_hook() {
    let owner = thread::current().id();
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if owns_terminal(owner) {
            let _ = restore_terminal();
            log::error!("panic: {}", info);
            previous(info);
        } else {
            log::error!("panic in {:?}: {}", thread::current().id(), info);
        }
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_owner_thread_owns_terminal() {
        let owner = thread::current().id();
        assert!(owns_terminal(owner));

        let from_worker = thread::spawn(move || owns_terminal(owner))
            .join()
            .unwrap();
        assert!(!from_worker);
    }
}
