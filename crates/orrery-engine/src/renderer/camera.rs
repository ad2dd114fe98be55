use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

/// Camera position + look-at target, e.g. to save and restore a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }
}

/// A ray in world space. `direction` is normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Distance along the ray to the first intersection with a sphere, if any.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_d = disc.sqrt();
        let near = -b - sqrt_d;
        let far = -b + sqrt_d;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            // Origin inside the sphere.
            Some(far)
        } else {
            None
        }
    }
}

/// GPU-side camera data read by the browser renderer: 8 floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub position: [f32; 3],
    pub fov_y: f32,
    pub target: [f32; 3],
    pub aspect: f32,
}

impl CameraUniform {
    pub const FLOATS: usize = 8;
}

/// One damped step from `live` toward `goal`. Snaps once the step is lost
/// in f32 precision or the remainder is negligible at the goal's magnitude.
fn approach(live: Vec3, goal: Vec3, factor: f32) -> Vec3 {
    let next = live + (goal - live) * factor;
    let tolerance = goal.abs().max_element().max(1.0) * 1e-6;
    if next == live || next.abs_diff_eq(goal, tolerance) {
        goal
    } else {
        next
    }
}

/// Perspective camera orbiting a target, with damped transitions.
///
/// The camera tracks a goal pose. `update` moves the live pose toward the
/// goal; non-transition moves snap both at once.
pub struct OrbitCamera {
    /// Live pose (what the renderer sees this frame).
    pub position: Vec3,
    pub target: Vec3,
    goal: CameraPose,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Allowed distance between camera and target.
    pub min_distance: f32,
    pub max_distance: f32,
    /// Fraction of the remaining distance covered per 60 Hz frame (0 = frozen, 1 = snap).
    pub damping: f32,
}

impl OrbitCamera {
    pub fn new(fov_y: f32, aspect: f32) -> Self {
        let position = Vec3::new(0.0, 0.0, -2000.0);
        Self {
            position,
            target: Vec3::ZERO,
            goal: CameraPose::new(position, Vec3::ZERO),
            fov_y,
            aspect,
            near: 0.1,
            far: 1_000_000.0,
            min_distance: 100.0,
            max_distance: 50_000.0,
            damping: 0.05,
        }
    }

    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max.max(min);
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.set_damping(damping);
        self
    }

    pub fn set_damping(&mut self, damping: f32) {
        self.damping = damping.clamp(0.0, 1.0);
    }

    /// Live pose.
    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.position, self.target)
    }

    /// Pose the camera is heading to.
    pub fn goal(&self) -> CameraPose {
        self.goal
    }

    /// Distance between the live position and target.
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Look from `position` at `target`. With `transition` the move is damped
    /// over the next updates; otherwise it snaps immediately.
    pub fn set_look_at(&mut self, position: Vec3, target: Vec3, transition: bool) {
        self.goal = CameraPose::new(self.clamp_distance(position, target), target);
        if !transition {
            self.position = self.goal.position;
            self.target = self.goal.target;
        }
    }

    pub fn set_pose(&mut self, pose: CameraPose, transition: bool) {
        self.set_look_at(pose.position, pose.target, transition);
    }

    /// Move position only, keeping the target.
    pub fn set_position(&mut self, position: Vec3) {
        self.set_look_at(position, self.goal.target, false);
    }

    /// Move target only, keeping the position.
    pub fn set_target(&mut self, target: Vec3) {
        self.set_look_at(self.goal.position, target, false);
    }

    fn clamp_distance(&self, position: Vec3, target: Vec3) -> Vec3 {
        let offset = position - target;
        let dist = offset.length();
        if dist <= f32::EPSILON {
            return position;
        }
        let clamped = dist.clamp(self.min_distance, self.max_distance);
        target + offset * (clamped / dist)
    }

    /// Unit vector from position toward target.
    pub fn forward_dir(&self) -> Vec3 {
        (self.goal.target - self.goal.position).normalize_or_zero()
    }

    /// Screen-right vector (horizontal plane when looking straight down).
    pub fn right_dir(&self) -> Vec3 {
        let right = self.forward_dir().cross(Vec3::Y);
        if right.length_squared() < 1e-8 {
            Vec3::X
        } else {
            right.normalize()
        }
    }

    /// Screen-up vector.
    pub fn up_dir(&self) -> Vec3 {
        self.right_dir().cross(self.forward_dir()).normalize_or_zero()
    }

    /// Move camera and target together along the view direction.
    pub fn forward(&mut self, distance: f32) {
        let step = self.forward_dir() * distance;
        self.translate(step);
    }

    /// Move camera and target together sideways (`x`) and vertically (`y`) in screen space.
    pub fn truck(&mut self, x: f32, y: f32) {
        let step = self.right_dir() * x + self.up_dir() * y;
        self.translate(step);
    }

    fn translate(&mut self, step: Vec3) {
        self.goal.position += step;
        self.goal.target += step;
        self.position += step;
        self.target += step;
    }

    /// Advance damping by `dt` seconds. Returns true if the live pose moved.
    pub fn update(&mut self, dt: f32) -> bool {
        let before = self.pose();
        let factor = if self.damping >= 1.0 {
            1.0
        } else {
            1.0 - (1.0 - self.damping).powf(dt * 60.0)
        };
        if factor <= 0.0 {
            return false;
        }
        self.position = approach(self.position, self.goal.position, factor);
        self.target = approach(self.target, self.goal.target, factor);
        self.pose() != before
    }

    /// Resize for a new viewport.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// World-space ray through a point in normalized device coordinates
    /// (x, y in [-1, 1], y up), from the live pose.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let forward = (self.target - self.position).normalize_or_zero();
        let right = forward.cross(Vec3::Y);
        let right = if right.length_squared() < 1e-8 { Vec3::X } else { right.normalize() };
        let up = right.cross(forward).normalize_or_zero();

        let half_h = (self.fov_y * 0.5).tan();
        let half_w = half_h * self.aspect;
        let direction = forward + right * (ndc.x * half_w) + up * (ndc.y * half_h);
        Ray {
            origin: self.position,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            position: self.position.to_array(),
            fov_y: self.fov_y,
            target: self.target.to_array(),
            aspect: self.aspect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(std::f32::consts::FRAC_PI_3, 16.0 / 9.0)
    }

    #[test]
    fn snap_look_at_moves_immediately() {
        let mut cam = camera();
        cam.set_look_at(Vec3::new(3000.0, 3000.0, 3000.0), Vec3::ZERO, false);
        assert_eq!(cam.position, Vec3::new(3000.0, 3000.0, 3000.0));
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn transition_interpolates() {
        let mut cam = camera();
        cam.set_look_at(Vec3::new(0.0, 0.0, 1000.0), Vec3::ZERO, false);
        cam.set_look_at(Vec3::new(0.0, 0.0, 2000.0), Vec3::ZERO, true);
        assert!(cam.update(1.0 / 60.0));
        assert!(cam.position.z > 1000.0 && cam.position.z < 2000.0);
        for _ in 0..2000 {
            cam.update(1.0 / 60.0);
        }
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 2000.0));
        assert!(!cam.update(1.0 / 60.0));
    }

    #[test]
    fn transition_settles_exactly_at_scene_scale() {
        let mut cam = camera().with_distance_limits(100.0, 50_000.0);
        let target = Vec3::new(40_000.0, 0.0, -25_000.0);
        cam.set_look_at(Vec3::splat(3000.0), Vec3::ZERO, false);
        cam.set_look_at(target + Vec3::new(57.6, 28.8, 96.0), target, true);
        let goal = cam.goal();

        let mut frames = 0;
        while cam.update(1.0 / 60.0) {
            frames += 1;
            assert!(frames < 2000, "camera never settled");
        }
        assert_eq!(cam.pose(), goal);
    }

    #[test]
    fn zero_damping_freezes_the_live_pose() {
        let mut cam = camera().with_damping(0.0);
        cam.set_look_at(Vec3::new(0.0, 0.0, 1000.0), Vec3::ZERO, false);
        cam.set_look_at(Vec3::new(0.0, 0.0, 2000.0), Vec3::ZERO, true);
        assert!(!cam.update(1.0 / 60.0));
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 1000.0));
    }

    #[test]
    fn distance_is_clamped() {
        let mut cam = camera();
        cam.set_look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, false);
        assert!((cam.distance() - 100.0).abs() < 1e-3);
        cam.set_look_at(Vec3::new(0.0, 0.0, 1.0e6), Vec3::ZERO, false);
        assert!((cam.distance() - 50_000.0).abs() < 1e-1);
    }

    #[test]
    fn forward_and_truck_move_target_too() {
        let mut cam = camera();
        cam.set_look_at(Vec3::new(0.0, 0.0, 1000.0), Vec3::ZERO, false);
        cam.forward(100.0);
        assert!((cam.position - Vec3::new(0.0, 0.0, 900.0)).length() < 1e-3);
        assert!((cam.target - Vec3::new(0.0, 0.0, -100.0)).length() < 1e-3);
        cam.truck(50.0, 0.0);
        assert!((cam.distance() - 1000.0).abs() < 1e-3);
        // looking down -Z, right is +X
        assert!((cam.position.x - 50.0).abs() < 1e-3);
        cam.truck(0.0, 20.0);
        assert!((cam.position.y - 20.0).abs() < 1e-3);
    }

    #[test]
    fn center_ray_points_at_target() {
        let mut cam = camera();
        cam.set_look_at(Vec3::new(0.0, 500.0, 1000.0), Vec3::ZERO, false);
        let ray = cam.ray_from_ndc(Vec2::ZERO);
        let expected = (Vec3::ZERO - cam.position).normalize();
        assert!((ray.direction - expected).length() < 1e-3);
    }

    #[test]
    fn ray_sphere_hits_and_misses() {
        let ray = Ray { origin: Vec3::new(0.0, 0.0, 10.0), direction: Vec3::NEG_Z };
        assert!((ray.intersect_sphere(Vec3::ZERO, 2.0).unwrap() - 8.0).abs() < 1e-5);
        assert!(ray.intersect_sphere(Vec3::new(5.0, 0.0, 0.0), 2.0).is_none());
        assert!(ray.intersect_sphere(Vec3::new(0.0, 0.0, 20.0), 2.0).is_none());
    }

    #[test]
    fn resize_updates_aspect() {
        let mut cam = camera();
        cam.resize(800.0, 400.0);
        assert_eq!(cam.aspect, 2.0);
        cam.resize(0.0, 400.0);
        assert_eq!(cam.aspect, 2.0);
    }
}
