//! Host input events and their conversion from crossterm.

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseButton as CtMouseButton, MouseEvent, MouseEventKind,
};
use log::trace;

/// Input delivered to controls by the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Pointer went down (touch began).
    Press { x: u16, y: u16, button: MouseButton },
    /// Pointer went up (touch ended).
    Release { x: u16, y: u16, button: MouseButton },
    /// Pointer moved with a button held.
    Drag { x: u16, y: u16 },
    Key { key: Key, modifiers: Modifiers },
    Resize { width: u16, height: u16 },
    /// Ctrl+C.
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Space,
    Enter,
    Escape,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl Event {
    /// A left-button press at `(x, y)`.
    pub fn press(x: u16, y: u16) -> Self {
        Event::Press {
            x,
            y,
            button: MouseButton::Left,
        }
    }

    /// A left-button release at `(x, y)`.
    pub fn release(x: u16, y: u16) -> Self {
        Event::Release {
            x,
            y,
            button: MouseButton::Left,
        }
    }

    pub fn key(key: Key) -> Self {
        Event::Key {
            key,
            modifiers: Modifiers::default(),
        }
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<CtMouseButton> for MouseButton {
    fn from(btn: CtMouseButton) -> Self {
        match btn {
            CtMouseButton::Left => MouseButton::Left,
            CtMouseButton::Right => MouseButton::Right,
            CtMouseButton::Middle => MouseButton::Middle,
        }
    }
}

fn convert_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::BackTab => Some(Key::BackTab),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        _ => None,
    }
}

fn convert_key_event(event: KeyEvent) -> Option<Event> {
    // Only presses; releases and repeats would double-fire taps.
    if event.kind != KeyEventKind::Press {
        return None;
    }

    if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
        return Some(Event::Quit);
    }

    Some(Event::Key {
        key: convert_key(event.code)?,
        modifiers: event.modifiers.into(),
    })
}

fn convert_mouse_event(event: MouseEvent) -> Option<Event> {
    let (x, y) = (event.column, event.row);
    match event.kind {
        MouseEventKind::Down(button) => Some(Event::Press {
            x,
            y,
            button: button.into(),
        }),
        MouseEventKind::Up(button) => Some(Event::Release {
            x,
            y,
            button: button.into(),
        }),
        MouseEventKind::Drag(_) => Some(Event::Drag { x, y }),
        _ => None,
    }
}

/// Convert a crossterm event, dropping the kinds controls never see.
pub fn convert_event(event: CrosstermEvent) -> Option<Event> {
    trace!("crossterm event: {:?}", event);
    match event {
        CrosstermEvent::Key(key_event) => convert_key_event(key_event),
        CrosstermEvent::Mouse(mouse_event) => convert_mouse_event(mouse_event),
        CrosstermEvent::Resize(width, height) => Some(Event::Resize { width, height }),
        _ => None,
    }
}
