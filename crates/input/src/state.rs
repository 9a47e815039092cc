use crate::keys::{HeldKeys, MoveKey};
use glam::Vec2;

/// One frame's worth of input, handed to the camera.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSample {
    pub held: HeldKeys,
    /// Cursor motion accumulated since the previous sample.
    pub cursor_delta: Vec2,
    /// Seconds elapsed since the previous frame.
    pub dt: f32,
}

/// Raw input table fed by the window layer.
#[derive(Debug, Default)]
pub struct InputState {
    held: HeldKeys,
    cursor_delta: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_key(&mut self, key: MoveKey, pressed: bool) {
        if pressed {
            self.held.press(key);
        } else {
            self.held.release(key);
        }
    }

    pub fn held(&self) -> &HeldKeys {
        &self.held
    }

    /// Accumulate raw mouse motion until the next sample is taken.
    pub fn record_motion(&mut self, dx: f32, dy: f32) {
        self.cursor_delta += Vec2::new(dx, dy);
    }

    /// Motion accumulated so far this frame, without consuming it.
    pub fn cursor_delta(&self) -> Vec2 {
        self.cursor_delta
    }

    /// Snapshot held keys and drain the cursor accumulator.
    pub fn take_sample(&mut self, dt: f32) -> InputSample {
        let cursor_delta = std::mem::take(&mut self.cursor_delta);
        tracing::trace!(?cursor_delta, dt, "input sample");
        InputSample {
            held: self.held.clone(),
            cursor_delta,
            dt,
        }
    }

    /// Forget everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held = HeldKeys::new();
        self.cursor_delta = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_empty() {
        let mut input = InputState::new();
        let sample = input.take_sample(0.016);
        assert!(sample.held.is_empty());
        assert_eq!(sample.cursor_delta, Vec2::ZERO);
        assert_eq!(sample.dt, 0.016);
    }

    #[test]
    fn motion_accumulates_between_samples() {
        let mut input = InputState::new();
        input.record_motion(3.0, -1.0);
        input.record_motion(2.0, 4.0);
        assert_eq!(input.cursor_delta(), Vec2::new(5.0, 3.0));

        let sample = input.take_sample(0.01);
        assert_eq!(sample.cursor_delta, Vec2::new(5.0, 3.0));
    }

    #[test]
    fn delta_is_consumed_once() {
        let mut input = InputState::new();
        input.record_motion(7.0, 7.0);
        let _ = input.take_sample(0.01);
        let second = input.take_sample(0.01);
        assert_eq!(second.cursor_delta, Vec2::ZERO);
    }

    #[test]
    fn held_keys_survive_sampling() {
        let mut input = InputState::new();
        input.set_key(MoveKey::Forward, true);
        let first = input.take_sample(0.01);
        let second = input.take_sample(0.01);
        assert!(first.held.contains(MoveKey::Forward));
        assert!(second.held.contains(MoveKey::Forward));

        input.set_key(MoveKey::Forward, false);
        assert!(input.take_sample(0.01).held.is_empty());
    }

    #[test]
    fn clear_resets_keys_and_motion() {
        let mut input = InputState::new();
        input.set_key(MoveKey::Left, true);
        input.record_motion(1.0, 1.0);
        input.clear();
        assert!(input.held().is_empty());
        assert_eq!(input.cursor_delta(), Vec2::ZERO);
    }
}
