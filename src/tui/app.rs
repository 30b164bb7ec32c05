//! TUI application main module
//!
//! Contains TUI application creation and running logic.

use crate::tui::event::{EventPoll, TuiEvent};
use crate::tui::state::{AppState, Screen, Selectable, TuiResult};
use crate::tui::ui::render;
use crate::wizard::{Stage, WizardController};
use ratatui::DefaultTerminal;
use tracing::info;

/// TUI application
pub struct TuiApp<'a> {
    /// Terminal
    terminal: DefaultTerminal,
    /// Event poller
    event_poll: EventPoll,
    /// Wizard controller
    controller: WizardController<'a>,
    /// Application state
    state: AppState,
}

impl<'a> TuiApp<'a> {
    /// Create new TUI application (takes over the terminal)
    pub fn new(controller: WizardController<'a>) -> Self {
        let terminal = ratatui::init();
        let state = AppState::new(&controller);

        Self {
            terminal,
            event_poll: EventPoll::default(),
            controller,
            state,
        }
    }

    /// Run application until the user quits
    pub fn run(mut self) -> std::io::Result<TuiResult> {
        let outcome = self.event_loop();
        ratatui::restore();
        outcome?;

        info!(stage = %self.state.stage(), "Interactive session ended");
        Ok(self.state.into_result())
    }

    fn event_loop(&mut self) -> std::io::Result<()> {
        render(&mut self.terminal, &mut self.state)?;

        loop {
            match self.event_poll.next() {
                TuiEvent::None => continue,
                TuiEvent::CtrlC => break,
                TuiEvent::Resize(_, _) => {}
                event => self.handle_event(event),
            }

            if self.state.should_exit {
                break;
            }
            render(&mut self.terminal, &mut self.state)?;
        }

        Ok(())
    }

    /// Handle event
    fn handle_event(&mut self, event: TuiEvent) {
        match self.state.current_screen {
            Screen::Wizard => self.handle_wizard(event),
            Screen::Exit => self.handle_exit(event),
        }
    }

    /// Handle wizard event
    fn handle_wizard(&mut self, event: TuiEvent) {
        let state = &mut self.state;
        let controller = &self.controller;

        match event {
            TuiEvent::Up => state.selection.prev(),
            TuiEvent::Down | TuiEvent::Tab => state.selection.next(),
            TuiEvent::Home => state.selection.first(),
            TuiEvent::End => state.selection.last(),
            TuiEvent::Enter | TuiEvent::Right => state.confirm(controller),
            TuiEvent::Backspace | TuiEvent::Left => state.go_back(controller),
            TuiEvent::Char('r') | TuiEvent::Char('R') => state.restart(controller),
            TuiEvent::Char('c') | TuiEvent::Char('C') if state.stage() == Stage::Details => {
                state.save_contact_link()
            }
            TuiEvent::Escape | TuiEvent::Char('q') => state.current_screen = Screen::Exit,
            _ => {}
        }
    }

    /// Handle exit confirmation
    fn handle_exit(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Char('y') | TuiEvent::Char('Y') | TuiEvent::Enter => {
                self.state.should_exit = true;
            }
            TuiEvent::Char('n') | TuiEvent::Char('N') | TuiEvent::Escape => {
                self.state.current_screen = Screen::Wizard;
            }
            _ => {}
        }
    }
}
