//! Terminal chat client
//!
//! A ratatui front end over [`ChatRuntime`](crate::runtime::ChatRuntime):
//! keys become state machine events, relay completions arrive over the
//! runtime's channel, and both are multiplexed on one task.

mod app;
mod config;
mod ui;
mod viewport;

pub use app::App;
pub use config::ClientConfig;
pub use viewport::Viewport;

use crate::runtime::HttpRelayClient;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind, MouseEvent,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stderr};
use std::time::Duration;
use tokio::sync::mpsc;

pub type Tui = Terminal<CrosstermBackend<Stderr>>;

const TICK_INTERVAL: Duration = Duration::from_millis(300);
const HEALTH_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// Drives the busy spinner
    Tick,
}

/// Terminal input and a periodic tick merged into one stream
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let tx_events = tx.clone();
        tokio::spawn(async move {
            let mut reader = event::EventStream::new();
            while let Some(next) = reader.next().await {
                let app_event = match next {
                    // Key releases are reported on some platforms; only presses matter
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                    Ok(Event::Mouse(mouse)) => AppEvent::Mouse(mouse),
                    Ok(Event::Resize(w, h)) => AppEvent::Resize(w, h),
                    Ok(_) => continue,
                    Err(e) => {
                        tracing::warn!(error = %e, "Terminal event stream failed");
                        break;
                    }
                };
                if tx_events.send(app_event).is_err() {
                    break;
                }
            }
        });

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            loop {
                interval.tick().await;
                if tx.send(AppEvent::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init() -> io::Result<Tui> {
    enable_raw_mode()?;
    execute!(io::stderr(), EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(io::stderr()))
}

pub fn restore() -> io::Result<()> {
    execute!(io::stderr(), DisableMouseCapture, LeaveAlternateScreen)?;
    disable_raw_mode()
}

/// Put the terminal back before the panic message is printed
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}

/// Probe the relay, then run the chat UI until the user quits
pub async fn run(config: ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let relay = HttpRelayClient::new(&config.relay_url, config.timeout)?;
    tracing::info!(endpoint = relay.endpoint(), "Starting chat client");

    let connected = match relay.health(HEALTH_TIMEOUT).await {
        Ok(health) => {
            tracing::info!(
                model = %health.model,
                provider_configured = health.provider_configured,
                "Relay is up"
            );
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "Relay health check failed");
            false
        }
    };

    let mut app = App::new(relay, config.user_name);
    app.set_connected(connected);

    install_panic_hook();
    let mut terminal = init()?;
    let result = app.run(&mut terminal).await;
    restore()?;

    result.map_err(Into::into)
}
