//! Per-cell shading
//!
//! Casts a ray from the camera through a grid cell on the view plane, tests it
//! against the sphere and then the floor, and quantizes the resulting
//! intensity into a glyph.

use crate::scene::Scene;
use crate::GLYPHS;

/// What a cell's ray hit, with its intensity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    /// Sphere surface, squared half-Lambert term
    Sphere { intensity: f32 },
    /// Floor with nothing between it and the light
    Floor { intensity: f32 },
    /// Floor partly occluded by the sphere
    Shadow { intensity: f32 },
    /// Ray missed the sphere and the visible floor
    Background,
}

impl Sample {
    pub fn intensity(&self) -> f32 {
        match *self {
            Sample::Sphere { intensity }
            | Sample::Floor { intensity }
            | Sample::Shadow { intensity } => intensity,
            Sample::Background => 0.0,
        }
    }

    pub fn glyph(&self) -> char {
        glyph_for(self.intensity())
    }
}

/// Map an intensity in `[0, 1]` onto the glyph ramp.
///
/// Out-of-range values are clamped to the ends of the ramp; NaN maps to the
/// darkest glyph.
pub fn glyph_for(intensity: f32) -> char {
    let last = GLYPHS.len() - 1;
    // `as` saturates: negatives and NaN become 0
    let index = ((intensity * GLYPHS.len() as f32) as usize).min(last);
    GLYPHS[index]
}

/// Shades grid cells for a scene
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Shader {
    scene: Scene,
}

impl Shader {
    pub fn new(scene: Scene) -> Self {
        Self { scene }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Trace the ray for `(row, col)` at `time`
    pub fn sample(&self, row: usize, col: usize, time: f32) -> Sample {
        let scene = &self.scene;
        let sphere = &scene.sphere;

        let camera = scene.camera(time);
        let origin = scene.ray_origin(row, col);
        let direction = (origin - camera).normalize();
        let light = scene.light(time);

        if let Some(crossing) = sphere.crossing(&origin, &direction) {
            let point = origin + direction * crossing.near();
            let normal = sphere.normal_at(&point);
            let lambert = (normal.dot(&light) + 1.0) / 2.0;
            return Sample::Sphere {
                intensity: lambert * lambert,
            };
        }

        // Floor is the plane z = 0. A ray parallel to it gives an infinite or
        // NaN distance, both of which fail the checks below.
        let distance = -origin.z / direction.z;
        let point = origin + direction * distance;

        if !(point.x < scene.floor_extent && distance > 0.0) {
            return Sample::Background;
        }

        match sphere.crossing(&point, &light) {
            Some(occluder) => {
                let cover = 1.0 - occluder.half_chord() / (2.0 * sphere.radius);
                Sample::Shadow {
                    intensity: scene.ambient * cover * cover,
                }
            }
            None => Sample::Floor {
                intensity: scene.ambient,
            },
        }
    }

    /// Glyph for `(row, col)` at animation frame `frame`
    pub fn shade(&self, row: usize, col: usize, frame: u64) -> char {
        self.sample(row, col, frame as f32).glyph()
    }
}

/// Glyph for `(row, col)` at animation frame `frame` in the default scene
pub fn shade(row: usize, col: usize, frame: u64) -> char {
    Shader::default().shade(row, col, frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GRID_SIZE;

    #[test]
    fn test_glyph_for_ramp() {
        assert_eq!(glyph_for(0.0), ' ');
        assert_eq!(glyph_for(0.4), ';');
        assert_eq!(glyph_for(0.99), '@');
    }

    #[test]
    fn test_glyph_for_clamps_out_of_range() {
        assert_eq!(glyph_for(1.0), '@');
        assert_eq!(glyph_for(7.5), '@');
        assert_eq!(glyph_for(-0.3), ' ');
        assert_eq!(glyph_for(f32::NAN), ' ');
        assert_eq!(glyph_for(f32::INFINITY), '@');
    }

    #[test]
    fn test_shade_returns_table_glyphs() {
        for frame in (0..126).step_by(9) {
            for row in 0..GRID_SIZE {
                for col in 0..GRID_SIZE {
                    let glyph = shade(row, col, frame);
                    assert!(GLYPHS.contains(&glyph), "unexpected {glyph:?} at ({row}, {col}, {frame})");
                }
            }
        }
    }

    #[test]
    fn test_shade_is_deterministic() {
        let shader = Shader::default();
        for (row, col, frame) in [(3usize, 19usize, 0u64), (20, 20, 17), (36, 20, 0), (22, 0, 1234)] {
            assert_eq!(shader.sample(row, col, frame as f32), shader.sample(row, col, frame as f32));
            assert_eq!(shade(row, col, frame), shade(row, col, frame));
        }
    }

    #[test]
    fn test_shade_grid_corners() {
        assert_eq!(shade(0, 0, 0), ' ');
        assert_eq!(shade(GRID_SIZE - 1, GRID_SIZE - 1, 0), ' ');
        assert_eq!(Shader::default().sample(GRID_SIZE - 1, GRID_SIZE - 1, 0.0), Sample::Background);
    }

    #[test]
    fn test_sphere_occupies_grid_center() {
        let shader = Shader::default();
        assert!(matches!(shader.sample(20, 20, 0.0), Sample::Sphere { .. }));
        assert!(matches!(shader.sample(15, 20, 31.0), Sample::Sphere { .. }));
    }

    #[test]
    fn test_sphere_brightens_as_light_swings_round() {
        let shader = Shader::default();
        // At frame 0 the light is behind the sphere as seen from the camera
        let dark = shader.sample(20, 20, 0.0).intensity();
        assert!(dark < 0.05, "got {dark}");
        assert_eq!(shader.shade(20, 20, 0), ' ');

        // Half an orbit later it faces the camera
        let lit = shader.sample(15, 20, 31.0).intensity();
        assert!(lit > 0.9, "got {lit}");
        assert_eq!(shader.shade(15, 20, 31), '@');
    }

    #[test]
    fn test_floor_in_light_is_ambient() {
        let shader = Shader::default();
        let sample = shader.sample(22, 0, 0.0);
        assert_eq!(sample, Sample::Floor { intensity: 0.4 });
        assert_eq!(sample.glyph(), ';');
    }

    #[test]
    fn test_floor_behind_sphere_is_shadowed() {
        let shader = Shader::default();
        match shader.sample(36, 20, 0.0) {
            Sample::Shadow { intensity } => {
                assert!(intensity < 0.4);
                assert!((intensity - 0.101).abs() < 0.01, "got {intensity}");
            }
            other => panic!("expected shadow, got {other:?}"),
        }
        assert_eq!(shader.shade(36, 20, 0), '.');
    }

    #[test]
    fn test_background_above_horizon() {
        let shader = Shader::default();
        // Top rows look upward: the floor hit lies behind the ray
        for col in [0, 10, 39] {
            let sample = shader.sample(0, col, 0.0);
            assert_eq!(sample, Sample::Background);
            assert_eq!(sample.glyph(), ' ');
        }
    }

    #[test]
    fn test_background_on_view_plane_floor() {
        // The last row starts on the floor itself, so the hit distance is zero
        let shader = Shader::default();
        for col in 0..GRID_SIZE {
            assert_eq!(shader.sample(GRID_SIZE - 1, col, 0.0), Sample::Background);
        }
    }

    #[test]
    fn test_orbit_period() {
        let shader = Shader::default();
        let period = std::f32::consts::TAU * crate::scene::FRAMES_PER_RADIAN;

        for (row, col, time) in [(20, 20, 0.0), (36, 20, 0.0), (22, 0, 0.0), (15, 20, 31.0)] {
            let first = shader.sample(row, col, time);
            let later = shader.sample(row, col, time + period);
            assert_eq!(std::mem::discriminant(&first), std::mem::discriminant(&later));
            assert!(
                (first.intensity() - later.intensity()).abs() < 1e-3,
                "({row}, {col}, {time}): {first:?} vs {later:?}"
            );
        }
    }
}
