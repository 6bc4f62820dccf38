//! Camera description and pointer-pick ray math.

use glam::{Mat4, Vec3};

/// Right-handed perspective camera; doubles as the pick-ray source.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// World-space ray through a normalized device coordinate (x right, y up,
    /// both in [-1, 1]).
    pub fn ray_from_ndc(&self, ndc_x: f32, ndc_y: f32) -> (Vec3, Vec3) {
        let inv = (self.projection_matrix() * self.view_matrix()).inverse();
        let near = inv.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        let dir = (far - near).normalize_or_zero();
        (near, dir)
    }
}

/// Pixel coordinates (y down) to normalized device coordinates (y up).
#[inline]
pub fn screen_to_ndc(width: f32, height: f32, px: f32, py: f32) -> [f32; 2] {
    let w = width.max(1.0);
    let h = height.max(1.0);
    [(px / w) * 2.0 - 1.0, -((py / h) * 2.0 - 1.0)]
}

/// Nearest forward intersection of a ray with a sphere, if any.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Index of the nearest frame whose pick sphere the ray enters, walking every
/// frame and keeping the smallest hit distance.
pub fn pick_frame(
    ray_origin: Vec3,
    ray_dir: Vec3,
    centers: &[Vec3],
    radius: f32,
) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, center) in centers.iter().enumerate() {
        if let Some(t) = ray_sphere(ray_origin, ray_dir, *center, radius) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((i, t)),
            }
        }
    }
    best.map(|(i, _)| i)
}
