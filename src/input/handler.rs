use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use std::time::Duration;

/// Processed input events for the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Quit the application
    Quit,
    /// Pointer moved to a cell
    PointerMove { x: u16, y: u16 },
    /// Left button pressed on a cell
    Press { x: u16, y: u16 },
    /// Keyboard accept (Enter / y)
    Accept,
    /// Keyboard decline (n); handled like a press on the evasive button
    Decline,
    /// Fast-forward a timed step
    Skip,
    /// Terminal resize
    Resize { width: u16, height: u16 },
    /// No event
    None,
}

/// Input handler for processing terminal events
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Poll for input events with timeout
    pub fn poll(&mut self, timeout: Duration) -> Option<InputEvent> {
        if event::poll(timeout).ok()? {
            self.translate(event::read().ok()?)
        } else {
            None
        }
    }

    /// Map a raw terminal event
    pub fn translate(&self, event: Event) -> Option<InputEvent> {
        match event {
            Event::Key(key_event) => Some(self.handle_key(key_event)),
            Event::Mouse(mouse_event) => Some(self.handle_mouse(mouse_event)),
            Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
            _ => None,
        }
    }

    /// Handle keyboard input
    fn handle_key(&self, event: KeyEvent) -> InputEvent {
        match event.code {
            // Ctrl+C to quit
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                InputEvent::Quit
            }

            KeyCode::Char('q') | KeyCode::Esc => InputEvent::Quit,

            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => InputEvent::Accept,

            KeyCode::Char('n') | KeyCode::Char('N') => InputEvent::Decline,

            KeyCode::Right | KeyCode::Char(' ') => InputEvent::Skip,

            _ => InputEvent::None,
        }
    }

    /// Handle mouse input
    fn handle_mouse(&self, event: MouseEvent) -> InputEvent {
        match event.kind {
            // Dragging still moves the pointer as far as evasion is concerned
            MouseEventKind::Moved | MouseEventKind::Drag(_) => InputEvent::PointerMove {
                x: event.column,
                y: event.row,
            },
            MouseEventKind::Down(MouseButton::Left) => InputEvent::Press {
                x: event.column,
                y: event.row,
            },
            _ => InputEvent::None,
        }
    }
}
