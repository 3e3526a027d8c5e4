//! Terminal application state and key handling

use super::viewport::Viewport;
use super::{ui, AppEvent, EventHandler, Tui};
use crate::runtime::{ChatRuntime, RelayClient};
use crate::state_machine::{Effect, Event, SUGGESTIONS};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use std::io;

const WHEEL_LINES: u16 = 3;

pub struct App<R>
where
    R: RelayClient + 'static,
{
    runtime: ChatRuntime<R>,
    viewport: Viewport,
    user_name: String,
    /// Result of the start-up health probe; `None` until it has run
    connected: Option<bool>,
    spinner_frame: usize,
    should_quit: bool,
}

impl<R> App<R>
where
    R: RelayClient + 'static,
{
    pub fn new(relay: R, user_name: impl Into<String>) -> Self {
        Self {
            runtime: ChatRuntime::new(relay),
            viewport: Viewport::default(),
            user_name: user_name.into(),
            connected: None,
            spinner_frame: 0,
            should_quit: false,
        }
    }

    pub fn runtime(&self) -> &ChatRuntime<R> {
        &self.runtime
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub(super) fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn connected(&self) -> Option<bool> {
        self.connected
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = Some(connected);
    }

    pub fn spinner_frame(&self) -> usize {
        self.spinner_frame
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main loop: redraw, then wait for either terminal input or a relay
    /// completion
    pub async fn run(&mut self, terminal: &mut Tui) -> io::Result<()> {
        let mut events = EventHandler::new();

        while !self.should_quit {
            terminal.draw(|frame| ui::render(self, frame))?;

            tokio::select! {
                Some(event) = events.next() => self.handle_event(event),
                Some(event) = self.runtime.next_completion() => self.on_completion(event),
                else => break,
            }
        }

        Ok(())
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Mouse(mouse) => self.handle_mouse(mouse),
            // The next draw picks up the new size
            AppEvent::Resize(..) => {}
            AppEvent::Tick => {
                if self.runtime.state().is_pending() {
                    self.spinner_frame = self.spinner_frame.wrapping_add(1);
                }
            }
        }
    }

    fn on_completion(&mut self, event: Event) {
        let effects = self.runtime.dispatch(event);
        self.apply(effects);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        let effects = match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('l') if ctrl => self.runtime.reset(),
            KeyCode::Enter => self.runtime.submit_input(),
            KeyCode::Backspace => {
                let mut text = self.runtime.state().input().to_string();
                text.pop();
                self.runtime.set_input(text)
            }
            KeyCode::Char(c) if !ctrl => {
                let mut text = self.runtime.state().input().to_string();
                text.push(c);
                self.runtime.set_input(text)
            }
            KeyCode::F(n) if usize::from(n) <= SUGGESTIONS.len() && n > 0 => {
                self.runtime.pick_suggestion(usize::from(n) - 1)
            }
            KeyCode::PageUp => {
                self.viewport.scroll_up(self.viewport.page());
                return;
            }
            KeyCode::PageDown => {
                self.viewport.scroll_down(self.viewport.page());
                return;
            }
            KeyCode::Up => {
                self.viewport.scroll_up(1);
                return;
            }
            KeyCode::Down => {
                self.viewport.scroll_down(1);
                return;
            }
            KeyCode::End => {
                self.viewport.scroll_to_bottom();
                return;
            }
            _ => return,
        };

        self.apply(effects);
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.viewport.scroll_up(WHEEL_LINES),
            MouseEventKind::ScrollDown => self.viewport.scroll_down(WHEEL_LINES),
            _ => {}
        }
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            if effect == Effect::ScrollToNewest {
                self.viewport.scroll_to_bottom();
            }
        }
    }
}
