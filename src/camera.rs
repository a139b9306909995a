use strata_geom::{Aabb, Mat4, Vec3};
use strata_render::ViewParams;

/// World units per second.
pub const MOVE_SPEED: f32 = 25.0;
/// Degrees of rotation per unit of pointer movement.
pub const LOOK_SENSITIVITY: f32 = 0.1;
pub const PITCH_LIMIT: f32 = 89.0;
pub const FOV_Y_DEG: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 1000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraMove {
    Forward,
    Backward,
    Left,
    Right,
}

/// Free-look camera. The basis is stored and rebuilt whenever yaw or pitch
/// change, so `front`, `right` and `up` are always orthonormal.
#[derive(Clone, Debug)]
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,   // degrees
    pub pitch: f32, // degrees
    front: Vec3,
    right: Vec3,
    up: Vec3,
    world_up: Vec3,
}

impl FlyCamera {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut cam = Self {
            position,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            front: Vec3::new(0.0, 0.0, -1.0),
            right: Vec3::new(1.0, 0.0, 0.0),
            up: Vec3::UP,
            world_up: Vec3::UP,
        };
        cam.update_vectors();
        cam
    }

    /// Behind the far `+z` edge of `bounds`, raised above it, looking back
    /// along `-z` and slightly down.
    pub fn overlooking(bounds: Aabb) -> Self {
        let center = bounds.center();
        let depth = bounds.size().z;
        let position = Vec3::new(center.x, bounds.max.y + 16.0, bounds.max.z + depth * 0.25 + 8.0);
        Self::new(position, -90.0, -20.0)
    }

    #[inline]
    pub fn front(&self) -> Vec3 {
        self.front
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.right
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn process_move(&mut self, dir: CameraMove, dt: f32) {
        let velocity = MOVE_SPEED * dt;
        match dir {
            CameraMove::Forward => self.position += self.front * velocity,
            CameraMove::Backward => self.position -= self.front * velocity,
            CameraMove::Left => self.position -= self.right * velocity,
            CameraMove::Right => self.position += self.right * velocity,
        }
    }

    /// `dy > 0` pitches up.
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * LOOK_SENSITIVITY;
        self.pitch = (self.pitch + dy * LOOK_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(FOV_Y_DEG.to_radians(), aspect, Z_NEAR, Z_FAR)
    }

    pub fn view_params(&self, aspect: f32) -> ViewParams {
        ViewParams {
            eye: self.position,
            target: self.position + self.front,
            up: self.up,
            fov_y_deg: FOV_Y_DEG,
            view: self.view_matrix(),
            projection: self.projection_matrix(aspect),
        }
    }

    fn update_vectors(&mut self) {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalized();
        self.right = self.front.cross(self.world_up).normalized();
        self.up = self.right.cross(self.front).normalized();
    }
}
