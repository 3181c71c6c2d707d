use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{InputEvent, Key, KeyState};

/// Positions of the letter keys on the physical keyboard.
const LETTER_CODES: [(KeyCode, char); 26] = [
    (KeyCode::KeyA, 'a'), (KeyCode::KeyB, 'b'), (KeyCode::KeyC, 'c'), (KeyCode::KeyD, 'd'),
    (KeyCode::KeyE, 'e'), (KeyCode::KeyF, 'f'), (KeyCode::KeyG, 'g'), (KeyCode::KeyH, 'h'),
    (KeyCode::KeyI, 'i'), (KeyCode::KeyJ, 'j'), (KeyCode::KeyK, 'k'), (KeyCode::KeyL, 'l'),
    (KeyCode::KeyM, 'm'), (KeyCode::KeyN, 'n'), (KeyCode::KeyO, 'o'), (KeyCode::KeyP, 'p'),
    (KeyCode::KeyQ, 'q'), (KeyCode::KeyR, 'r'), (KeyCode::KeyS, 's'), (KeyCode::KeyT, 't'),
    (KeyCode::KeyU, 'u'), (KeyCode::KeyV, 'v'), (KeyCode::KeyW, 'w'), (KeyCode::KeyX, 'x'),
    (KeyCode::KeyY, 'y'), (KeyCode::KeyZ, 'z'),
];

/// Keyboard and focus events become [`InputEvent`]s; everything else is `None`.
pub(crate) fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(focused) => Some(InputEvent::Focused(*focused)),
        WindowEvent::KeyboardInput { event, .. } => Some(InputEvent::Key {
            key: map_key(event.physical_key),
            state: match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            },
            repeat: event.repeat,
        }),
        _ => None,
    }
}

fn map_key(physical: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = physical else {
        return Key::Unknown(0);
    };

    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        code => LETTER_CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|&(_, letter)| Key::Char(letter))
            .unwrap_or(Key::Unknown(code as u32)),
    }
}
