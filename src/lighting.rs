//! Scene lights and the shadow-map camera
//!
//! Light structs are laid out for direct upload into a uniform buffer, so
//! every `Vec3` is padded out to 16 bytes.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::{GpuMatrix, to_gpu_matrix};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct DirectionalLight {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub direction: [f32; 3],
    pub _padding: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            ambient: [0.1, 0.1, 0.1, 1.0],
            diffuse: [1.0, 1.0, 1.0, 1.0],
            direction: [1.0, -1.0, 0.0],
            _padding: 0.0,
        }
    }
}

impl DirectionalLight {
    pub fn direction(&self) -> Vec3 {
        Vec3::from_array(self.direction)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PointLight {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub position: [f32; 3],
    pub _padding: f32,
}

impl Default for PointLight {
    /// Red glow hovering over center ice
    fn default() -> Self {
        Self {
            ambient: [0.1, 0.0, 0.0, 1.0],
            diffuse: [1.0, 0.0, 0.0, 1.0],
            position: [0.0, 1.0, 0.0],
            _padding: 0.0,
        }
    }
}

/// Orthographic light camera used to render the shadow map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowCaster {
    pub eye: Vec3,
    pub target: Vec3,
    pub half_extent: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ShadowCaster {
    fn default() -> Self {
        Self::new(Vec3::new(-10.0, 10.0, 0.0), Vec3::ZERO)
    }
}

impl ShadowCaster {
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        Self {
            eye,
            target,
            half_extent: 5.0,
            near: 0.1,
            far: 100.0,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_lh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        let e = self.half_extent;
        Mat4::orthographic_lh(-e, e, -e, e, self.near, self.far)
    }

    /// Combined light-space transform (projection * view)
    pub fn light_space(&self) -> GpuMatrix {
        to_gpu_matrix(self.projection_matrix() * self.view_matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_layouts_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<DirectionalLight>(), 48);
        assert_eq!(std::mem::size_of::<PointLight>(), 48);
        let light = DirectionalLight::default();
        let bytes: &[u8] = bytemuck::bytes_of(&light);
        assert_eq!(bytes.len(), 48);
    }

    #[test]
    fn test_default_lights() {
        let sun = DirectionalLight::default();
        assert_eq!(sun.direction(), Vec3::new(1.0, -1.0, 0.0));
        let lamp = PointLight::default();
        assert_eq!(lamp.diffuse, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_shadow_caster_sees_origin() {
        let caster = ShadowCaster::default();
        let clip = caster.projection_matrix() * caster.view_matrix();
        let p = clip.project_point3(Vec3::ZERO);
        assert!(p.x.abs() < 1e-5 && p.y.abs() < 1e-5);
        assert!((0.0..=1.0).contains(&p.z));
    }

    #[test]
    fn test_light_space_matches_product() {
        let caster = ShadowCaster::default();
        let expected = (caster.projection_matrix() * caster.view_matrix()).to_cols_array_2d();
        assert_eq!(caster.light_space(), expected);
    }
}
