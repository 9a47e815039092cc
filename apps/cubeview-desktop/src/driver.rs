//! Per-frame driver: time step, input to camera, frame plan.

use cubeview_camera::FlyCamera;
use cubeview_input::{InputSample, InputState, MoveKey};
use cubeview_render::{FramePlan, Projection};
use std::time::Instant;
use winit::keyboard::KeyCode;

/// Longest time step fed to the camera, in seconds.
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Closing,
}

/// Directional binding: WASD.
pub fn move_key(code: KeyCode) -> Option<MoveKey> {
    match code {
        KeyCode::KeyW => Some(MoveKey::Forward),
        KeyCode::KeyS => Some(MoveKey::Backward),
        KeyCode::KeyA => Some(MoveKey::Left),
        KeyCode::KeyD => Some(MoveKey::Right),
        _ => None,
    }
}

/// Owns the camera and input table and turns them into one frame plan per tick.
pub struct FrameDriver {
    state: DriverState,
    camera: FlyCamera,
    input: InputState,
    projection: Projection,
    buffer_size: (u32, u32),
    last_frame: Instant,
}

impl FrameDriver {
    pub fn new(camera: FlyCamera, buffer_width: u32, buffer_height: u32, now: Instant) -> Self {
        Self {
            state: DriverState::Running,
            camera,
            input: InputState::new(),
            projection: Projection::default(),
            buffer_size: (buffer_width, buffer_height),
            last_frame: now,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    pub fn request_close(&mut self) {
        if self.state == DriverState::Running {
            tracing::info!("close requested");
            self.state = DriverState::Closing;
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, pressed: bool) {
        if code == KeyCode::Escape && pressed {
            self.request_close();
            return;
        }
        if let Some(key) = move_key(code) {
            self.input.set_key(key, pressed);
        }
    }

    pub fn handle_mouse_motion(&mut self, dx: f64, dy: f64) {
        self.input.record_motion(dx as f32, dy as f32);
    }

    /// Drop held keys so a release missed while unfocused cannot stick.
    pub fn focus_lost(&mut self) {
        self.input.clear();
    }

    pub fn resize(&mut self, buffer_width: u32, buffer_height: u32) {
        self.buffer_size = (buffer_width, buffer_height);
    }

    /// Advance one tick: measure the time step, then apply held keys and the
    /// accumulated cursor delta to the camera. Returns `None` once closing.
    pub fn advance(&mut self, now: Instant) -> Option<InputSample> {
        if !self.is_running() {
            return None;
        }

        let dt = now
            .saturating_duration_since(self.last_frame)
            .as_secs_f32()
            .min(MAX_FRAME_DT);
        self.last_frame = now;

        let sample = self.input.take_sample(dt);
        self.camera.apply_sample(&sample);
        Some(sample)
    }

    /// Draws for the current camera state.
    pub fn frame_plan(&self) -> FramePlan {
        let (width, height) = self.buffer_size;
        FramePlan::build(
            self.camera.view_matrix(),
            self.projection.matrix(width, height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::time::Duration;

    fn driver(now: Instant) -> FrameDriver {
        FrameDriver::new(FlyCamera::default(), 800, 600, now)
    }

    #[test]
    fn wasd_maps_to_move_keys() {
        assert_eq!(move_key(KeyCode::KeyW), Some(MoveKey::Forward));
        assert_eq!(move_key(KeyCode::KeyS), Some(MoveKey::Backward));
        assert_eq!(move_key(KeyCode::KeyA), Some(MoveKey::Left));
        assert_eq!(move_key(KeyCode::KeyD), Some(MoveKey::Right));
        assert_eq!(move_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn escape_moves_to_closing() {
        let mut d = driver(Instant::now());
        assert_eq!(d.state(), DriverState::Running);
        d.handle_key(KeyCode::Escape, true);
        assert_eq!(d.state(), DriverState::Closing);
        assert!(d.advance(Instant::now()).is_none());
    }

    #[test]
    fn held_forward_moves_camera_by_elapsed_time() {
        let t0 = Instant::now();
        let mut d = driver(t0);
        let start = d.camera().position();
        let front = d.camera().front();

        d.handle_key(KeyCode::KeyW, true);
        let sample = d.advance(t0 + Duration::from_millis(50)).unwrap();
        assert!((sample.dt - 0.05).abs() < 1e-6);
        assert!(
            d.camera()
                .position()
                .abs_diff_eq(start + front * 0.25, 1e-4)
        );

        d.handle_key(KeyCode::KeyW, false);
        let before = d.camera().position();
        d.advance(t0 + Duration::from_millis(100));
        assert_eq!(d.camera().position(), before);
    }

    #[test]
    fn long_stall_is_clamped() {
        let t0 = Instant::now();
        let mut d = driver(t0);
        d.handle_key(KeyCode::KeyW, true);
        let sample = d.advance(t0 + Duration::from_secs(5)).unwrap();
        assert_eq!(sample.dt, MAX_FRAME_DT);
    }

    #[test]
    fn cursor_delta_consumed_once() {
        let t0 = Instant::now();
        let mut d = driver(t0);
        d.handle_mouse_motion(10.0, 0.0);
        d.handle_mouse_motion(5.0, 0.0);
        d.advance(t0 + Duration::from_millis(16));
        assert!((d.camera().yaw() - 91.5).abs() < 1e-4);

        d.advance(t0 + Duration::from_millis(32));
        assert!((d.camera().yaw() - 91.5).abs() < 1e-4);
    }

    #[test]
    fn focus_loss_releases_keys() {
        let t0 = Instant::now();
        let mut d = driver(t0);
        d.handle_key(KeyCode::KeyD, true);
        d.focus_lost();
        let sample = d.advance(t0 + Duration::from_millis(16)).unwrap();
        assert!(sample.held.is_empty());
    }

    #[test]
    fn frame_plan_carries_camera_view() {
        let t0 = Instant::now();
        let mut d = driver(t0);
        d.handle_mouse_motion(-40.0, 12.0);
        d.advance(t0 + Duration::from_millis(16));

        let plan = d.frame_plan();
        assert_eq!(plan.draws.len(), 4);
        let view = d.camera().view_matrix();
        assert!(plan.draws.iter().all(|draw| draw.uniforms.view == view));
        let eye = view.transform_point3(d.camera().position());
        assert!(eye.abs_diff_eq(Vec3::ZERO, 1e-4));
    }

    #[test]
    fn resize_updates_projection_aspect() {
        let mut d = driver(Instant::now());
        d.resize(1600, 400);
        let expected = Projection::default().matrix(1600, 400);
        assert_eq!(d.frame_plan().draws[0].uniforms.projection, expected);
    }
}
