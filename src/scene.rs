//! Scene definitions for the sphere animation
//!
//! The scene is fixed: one sphere, the floor plane `z = 0`, a camera that sways
//! along x, and a directional light that circles the vertical axis. Only the
//! frame time moves anything.

use nalgebra::{Point3, Vector3};

use crate::GRID_SIZE;

/// Center of the sphere
pub const SPHERE_CENTER: [f32; 3] = [1.0, 0.5, 0.5];

/// Radius of the sphere
pub const SPHERE_RADIUS: f32 = 0.6;

/// Camera rest position
pub const CAMERA_BASE: [f32; 3] = [-1.2, 0.5, 0.7];

/// Amplitude of the camera's sway along x
pub const CAMERA_SWAY: f32 = 1.0;

/// Frame count per radian of camera sway and light orbit
pub const FRAMES_PER_RADIAN: f32 = 10.0;

/// Angle between the light direction and the vertical, in radians
pub const LIGHT_TILT: f32 = 1.1;

/// Floor hits at or beyond this x are treated as background
pub const FLOOR_EXTENT: f32 = 2.0;

/// Intensity of unshadowed floor
pub const AMBIENT: f32 = 0.4;

/// Solution terms of a ray/sphere quadratic with two real roots
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    /// Projection of `origin - center` onto the direction
    pub along: f32,
    /// Discriminant, always positive
    pub delta: f32,
}

impl Crossing {
    /// Distance to the nearer root along the direction
    pub fn near(&self) -> f32 {
        -self.delta.sqrt() - self.along
    }

    /// Half the length of the chord cut through the sphere
    pub fn half_chord(&self) -> f32 {
        self.delta.sqrt()
    }
}

/// Sphere primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Point3<f32>,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Point3<f32>, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Solve the intersection quadratic for a unit `direction` from `origin`.
    ///
    /// Returns `None` unless the discriminant is strictly positive, so grazing
    /// rays count as misses.
    pub fn crossing(&self, origin: &Point3<f32>, direction: &Vector3<f32>) -> Option<Crossing> {
        let offset = origin - self.center;
        let along = direction.dot(&offset);
        let delta = along * along - (offset.magnitude_squared() - self.radius * self.radius);

        if delta > 0.0 {
            Some(Crossing { along, delta })
        } else {
            None
        }
    }

    /// Outward unit normal at a point on the surface
    pub fn normal_at(&self, point: &Point3<f32>) -> Vector3<f32> {
        (point - self.center) / self.radius
    }
}

/// The complete scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scene {
    pub sphere: Sphere,
    pub camera_base: Point3<f32>,
    pub camera_sway: f32,
    pub frames_per_radian: f32,
    pub light_tilt: f32,
    pub floor_extent: f32,
    pub ambient: f32,
}

impl Default for Scene {
    fn default() -> Self {
        let [cx, cy, cz] = SPHERE_CENTER;
        let [bx, by, bz] = CAMERA_BASE;

        Self {
            sphere: Sphere::new(Point3::new(cx, cy, cz), SPHERE_RADIUS),
            camera_base: Point3::new(bx, by, bz),
            camera_sway: CAMERA_SWAY,
            frames_per_radian: FRAMES_PER_RADIAN,
            light_tilt: LIGHT_TILT,
            floor_extent: FLOOR_EXTENT,
            ambient: AMBIENT,
        }
    }
}

impl Scene {
    /// Camera position at `time` (frame index as a float)
    pub fn camera(&self, time: f32) -> Point3<f32> {
        let mut camera = self.camera_base;
        camera.x += self.camera_sway * (time / self.frames_per_radian).sin();
        camera
    }

    /// Unit direction towards the light at `time`
    pub fn light(&self, time: f32) -> Vector3<f32> {
        let phase = time / self.frames_per_radian;
        let tilt = self.light_tilt.sin();
        Vector3::new(phase.cos() * tilt, phase.sin() * tilt, self.light_tilt.cos())
    }

    /// Point on the view plane `x = 0` for a grid cell.
    ///
    /// Columns run along y from 0 to 1; rows run down z from 1 to 0.
    pub fn ray_origin(&self, row: usize, col: usize) -> Point3<f32> {
        let last = (GRID_SIZE - 1) as f32;
        Point3::new(0.0, col as f32 / last, 1.0 - row as f32 / last)
    }
}
