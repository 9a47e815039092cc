use cubeview_input::{HeldKeys, InputSample, MoveKey};
use glam::{Mat4, Vec3};

/// Pitch bound in degrees. Sits just inside 89° so the open interval holds.
const PITCH_LIMIT: f32 = 89.0 - 1.0e-3;

/// Startup parameters for a [`FlyCamera`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub position: Vec3,
    pub world_up: Vec3,
    /// Degrees.
    pub yaw: f32,
    /// Degrees.
    pub pitch: f32,
    /// World units per second.
    pub speed: f32,
    /// Degrees per unit of cursor motion.
    pub sensitivity: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, -5.0),
            world_up: Vec3::Y,
            yaw: 90.0,
            pitch: 0.0,
            speed: 5.0,
            sensitivity: 0.1,
        }
    }
}

/// Fly camera with position, yaw, pitch and a derived orthonormal basis.
#[derive(Debug, Clone, PartialEq)]
pub struct FlyCamera {
    position: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    speed: f32,
    sensitivity: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}

impl FlyCamera {
    pub fn new(settings: CameraSettings) -> Self {
        let mut camera = Self {
            position: settings.position,
            world_up: settings.world_up.normalize(),
            yaw: settings.yaw,
            pitch: settings.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            front: Vec3::Z,
            right: Vec3::X,
            up: Vec3::Y,
            speed: settings.speed,
            sensitivity: settings.sensitivity,
        };
        camera.update_basis();
        camera
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Move along the front/right basis for every held directional key.
    pub fn apply_key_movement(&mut self, held: &HeldKeys, dt: f32) {
        let velocity = self.speed * dt;
        for key in held.iter() {
            match key {
                MoveKey::Forward => self.position += self.front * velocity,
                MoveKey::Backward => self.position -= self.front * velocity,
                MoveKey::Left => self.position -= self.right * velocity,
                MoveKey::Right => self.position += self.right * velocity,
            }
        }
    }

    /// Turn the camera by a cursor delta. Y is inverted: moving the cursor
    /// down pitches the view down.
    pub fn apply_mouse_look(&mut self, dx: f32, dy: f32) {
        // The very first motion sample of a session is often garbage or zero;
        // a null delta must never disturb the basis.
        if dx == 0.0 && dy == 0.0 {
            return;
        }

        self.yaw += dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);

        self.update_basis();
    }

    /// Apply one frame of input: movement first, then mouse look.
    pub fn apply_sample(&mut self, sample: &InputSample) {
        self.apply_key_movement(&sample.held, sample.dt);
        self.apply_mouse_look(sample.cursor_delta.x, sample.cursor_delta.y);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    fn update_basis(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            pitch.cos() * yaw.cos(),
            pitch.sin(),
            pitch.cos() * yaw.sin(),
        )
        .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}
