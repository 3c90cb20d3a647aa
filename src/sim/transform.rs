//! Position/rotation/scale transform and the world matrix derived from it
//!
//! `set_*` calls rebuild the world matrix immediately. `move_absolute` and
//! `move_relative` only touch the position; callers batch those and call
//! `update_world_matrix` once before the matrix is read for drawing.

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::{GpuMatrix, to_gpu_matrix};

/// Opaque mesh handle owned by the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MeshHandle(pub u32);

/// Opaque material handle owned by the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MaterialHandle(pub u32);

/// Rotation quaternion for Euler angles (pitch about x, yaw about y, roll about z).
///
/// Roll is applied first, then pitch, then yaw.
#[inline]
pub fn rotation_from_euler(rotation: Vec3) -> Quat {
    Quat::from_euler(EulerRot::YXZ, rotation.y, rotation.x, rotation.z)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transform {
    position: Vec3,
    /// Euler angles in radians
    rotation: Vec3,
    scale: Vec3,
    world: Mat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    /// Identity transform at the origin with unit scale
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            world: Mat4::IDENTITY,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Last computed world matrix (may be stale after `move_*`)
    pub fn world_matrix(&self) -> Mat4 {
        self.world
    }

    pub fn gpu_world_matrix(&self) -> GpuMatrix {
        to_gpu_matrix(self.world)
    }

    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.position = Vec3::new(x, y, z);
        self.update_world_matrix();
    }

    pub fn set_rotation(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Vec3::new(x, y, z);
        self.update_world_matrix();
    }

    pub fn set_scale(&mut self, x: f32, y: f32, z: f32) {
        self.scale = Vec3::new(x, y, z);
        self.update_world_matrix();
    }

    /// Override the world matrix directly. Overwritten by the next rebuild.
    pub fn set_world_matrix(&mut self, world: Mat4) {
        self.world = world;
    }

    /// Add a world-space delta to the position. Does not rebuild the matrix.
    pub fn move_absolute(&mut self, dx: f32, dy: f32, dz: f32) {
        self.position += Vec3::new(dx, dy, dz);
    }

    /// Add a local-space delta, rotated by the current orientation.
    /// Does not rebuild the matrix.
    pub fn move_relative(&mut self, dx: f32, dy: f32, dz: f32) {
        let offset = rotation_from_euler(self.rotation) * Vec3::new(dx, dy, dz);
        self.position += offset;
    }

    /// Move along the local +z axis
    pub fn move_forward(&mut self, distance: f32) {
        self.move_relative(0.0, 0.0, distance);
    }

    /// Rebuild the world matrix: scale, then rotate, then translate
    pub fn update_world_matrix(&mut self) {
        self.world = Mat4::from_scale_rotation_translation(
            self.scale,
            rotation_from_euler(self.rotation),
            self.position,
        );
    }
}

/// Anything the renderer can draw with a mesh, a material and a world matrix
pub trait Drawable {
    fn transform(&self) -> &Transform;
    fn mesh(&self) -> MeshHandle;
    fn material(&self) -> MaterialHandle;

    fn world_matrix(&self) -> Mat4 {
        self.transform().world_matrix()
    }
}

/// A plain drawable object (the table, props)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub transform: Transform,
    pub mesh: MeshHandle,
    pub material: MaterialHandle,
}

impl Entity {
    pub fn new(mesh: MeshHandle, material: MaterialHandle) -> Self {
        Self {
            transform: Transform::new(),
            mesh,
            material,
        }
    }
}

impl Drawable for Entity {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    fn material(&self) -> MaterialHandle {
        self.material
    }
}
