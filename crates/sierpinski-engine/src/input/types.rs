use std::fmt;

/// A physical key, independent of the windowing backend.
///
/// Letter keys are reported by position as [`Key::Char`] with a lowercase
/// ASCII letter, so bindings survive keyboard layouts and shift state.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// `a` through `z`.
    Char(char),
    /// Anything else, tagged with the backend's code (0 when it has none).
    Unknown(u32),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            Key::Unknown(code) => write!(f, "key#{code}"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Input delivered by the runtime, already translated from the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// Auto-repeat from a held key.
        repeat: bool,
    },
    Focused(bool),
}
