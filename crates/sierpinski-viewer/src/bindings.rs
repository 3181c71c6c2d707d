use sierpinski_engine::input::{InputFrame, InputState, Key};

/// Abstract per-frame signals, independent of the key layout.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameSignals {
    pub quit: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
}

/// Key assignment for the viewer's signals.
///
/// Zoom keys are level-triggered (applied every frame while held); quit fires
/// on press.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    pub quit: Key,
    pub zoom_in: Key,
    pub zoom_out: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: Key::Char('q'),
            zoom_in: Key::ArrowUp,
            zoom_out: Key::ArrowDown,
        }
    }
}

impl KeyBindings {
    pub fn signals(&self, state: &InputState, frame: &InputFrame) -> FrameSignals {
        FrameSignals {
            quit: frame.pressed(self.quit) || state.key_down(self.quit),
            zoom_in: state.key_down(self.zoom_in),
            zoom_out: state.key_down(self.zoom_out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sierpinski_engine::input::{InputEvent, KeyState};

    fn press(state: &mut InputState, frame: &mut InputFrame, key: Key) {
        state.apply_event(frame, InputEvent::Key { key, state: KeyState::Pressed, repeat: false });
    }

    fn release(state: &mut InputState, frame: &mut InputFrame, key: Key) {
        state.apply_event(frame, InputEvent::Key { key, state: KeyState::Released, repeat: false });
    }

    #[test]
    fn no_keys_no_signals() {
        let bindings = KeyBindings::default();
        let signals = bindings.signals(&InputState::default(), &InputFrame::default());
        assert_eq!(signals, FrameSignals::default());
    }

    #[test]
    fn held_arrow_keeps_zooming_across_frames() {
        let bindings = KeyBindings::default();
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        press(&mut state, &mut frame, Key::ArrowUp);
        assert!(bindings.signals(&state, &frame).zoom_in);

        frame.clear();
        assert!(bindings.signals(&state, &frame).zoom_in);

        release(&mut state, &mut frame, Key::ArrowUp);
        assert!(!bindings.signals(&state, &frame).zoom_in);
    }

    #[test]
    fn quick_quit_tap_is_not_lost() {
        // Pressed and released between two frames.
        let bindings = KeyBindings::default();
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        press(&mut state, &mut frame, Key::Char('q'));
        release(&mut state, &mut frame, Key::Char('q'));
        assert!(bindings.signals(&state, &frame).quit);
    }

    #[test]
    fn custom_bindings_are_respected() {
        let bindings = KeyBindings {
            quit: Key::Escape,
            zoom_in: Key::Char('w'),
            zoom_out: Key::Char('s'),
        };
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        press(&mut state, &mut frame, Key::Char('s'));
        press(&mut state, &mut frame, Key::ArrowUp);
        let s = bindings.signals(&state, &frame);
        assert!(s.zoom_out);
        assert!(!s.zoom_in);
        assert!(!s.quit);
    }
}
