use crate::state::Designer;
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(CrosstermEvent::Key(key)) => {
                        if tx_clone.send(Event::Input(key)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => (),
                    Err(e) => {
                        error!("Failed to read terminal event: {}", e);
                        break;
                    }
                },
                Ok(false) => (),
                Err(e) => {
                    error!("Failed to poll terminal events: {}", e);
                    break;
                }
            }
            if tx_clone.send(Event::Tick).is_err() {
                break;
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut Designer) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(key) => Ok(handle_key(key, state)),
            Event::Tick => {
                if state.is_loading() {
                    state.advance_spinner_index();
                }
                Ok(true)
            }
        }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}

/// Apply one key press to the designer. Returns false when exit was
/// requested.
///
pub fn handle_key(key: KeyEvent, state: &mut Designer) -> bool {
    if key.kind != KeyEventKind::Press {
        return true;
    }
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
            debug!("Processing exit terminal event '{:?}'...", key);
            return false;
        }
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
            if let Err(e) = state.request_save() {
                warn!("Unable to save form: {}", e);
            }
        }
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => {
            if let Err(e) = state.request_refresh() {
                warn!("Unable to refresh saved forms: {}", e);
            }
        }
        (KeyCode::Down, _) | (KeyCode::Tab, _) => state.next_field(),
        (KeyCode::Up, _) | (KeyCode::BackTab, _) => state.previous_field(),
        (KeyCode::Left, _) => state.cycle_option(false),
        (KeyCode::Right, _) => state.cycle_option(true),
        (KeyCode::Enter, _) => state.toggle_option(),
        (KeyCode::Backspace, _) => state.backspace(),
        (KeyCode::Char(' '), _) => state.toggle_focused(),
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            state.type_char(c)
        }
        _ => (),
    }
    true
}
