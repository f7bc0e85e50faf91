use crate::config::Config;
use crate::events::store::{Event as StoreEvent, Handler as StoreEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::form::FormDocument;
use crate::logger::LogHandle;
use crate::state::{Designer, RequestKind, StoreEventSender};
use crate::store::{FormStore, Gateway, HttpStore, MemoryStore};
use crate::ui::Theme;
use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::sync::Mutex;

type StoreEventReceiver = std::sync::mpsc::Receiver<StoreEvent>;

/// Oversees event processing, state management, and terminal output for
/// the interactive preview.
///
pub struct App {
    state: Arc<Mutex<Designer>>,
    config: Config,
}

impl App {
    /// Start the preview of the given document according to the given
    /// configuration. Returns the result of the preview session.
    ///
    pub async fn start(config: Config, document: FormDocument, log: LogHandle) -> Result<()> {
        info!("Starting preview...");
        let (tx, rx) = std::sync::mpsc::channel::<StoreEvent>();

        let theme = Theme::from_name(&config.color_scheme).unwrap_or_else(|| {
            warn!("Unknown color scheme '{}', using Default", config.color_scheme);
            Theme::default()
        });
        let mut designer = Designer::new(document, Some(tx.clone()));
        designer.set_theme(theme);
        designer.set_log(log.clone());

        let app = App {
            state: Arc::new(Mutex::new(designer)),
            config,
        };
        app.start_store(rx);

        log.set_echo(false);
        let result = app.start_ui(tx).await;
        log.set_echo(true);
        result?;

        info!("Exiting preview...");
        Ok(())
    }

    /// Start a separate thread for store requests.
    ///
    fn start_store(&self, receiver: StoreEventReceiver) {
        debug!("Creating new thread for store requests...");
        let cloned_state = Arc::clone(&self.state);
        let settings = self.config.store.clone();
        std::thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    error!("Failed to start store runtime: {}", e);
                    return;
                }
            };
            runtime.block_on(async {
                if settings.is_configured() {
                    match HttpStore::new(&settings) {
                        Ok(store) => serve(&cloned_state, Gateway::new(store), receiver).await,
                        Err(e) => error!("Failed to create store client: {}", e),
                    }
                } else {
                    warn!("No store URL configured, saving to memory for this session");
                    serve(&cloned_state, Gateway::new(MemoryStore::new()), receiver).await;
                }
            })
        });
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. Return the result following an exit
    /// request or unrecoverable error.
    ///
    async fn start_ui(&self, store_sender: StoreEventSender) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        enable_raw_mode().context("Failed to enable raw mode")?;

        let result = self.run_loop(store_sender).await;

        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen)?;
        result
    }

    async fn run_loop(&self, store_sender: StoreEventSender) -> Result<()> {
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        terminal.hide_cursor()?;

        {
            self.state.lock().await.begin_request(RequestKind::List);
        }
        store_sender.send(StoreEvent::ListAll)?;

        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            let mut state = self.state.lock().await;
            terminal.draw(|frame| crate::ui::render(frame, &mut state))?;
            if !terminal_event_handler.handle_next(&mut state)? {
                debug!("Received application exit request.");
                break;
            }
        }
        terminal.show_cursor()?;
        Ok(())
    }
}

/// Handle store events until every sender is gone.
///
async fn serve<S: FormStore>(
    state: &Arc<Mutex<Designer>>,
    gateway: Gateway<S>,
    receiver: StoreEventReceiver,
) {
    let mut handler = StoreEventHandler::new(state, &gateway);
    while let Ok(event) = receiver.recv() {
        if let Err(e) = handler.handle(event).await {
            error!("Failed to handle store event: {}", e);
        }
    }
}
