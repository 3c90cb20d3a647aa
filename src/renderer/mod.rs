//! Render-data contract
//!
//! The simulation never talks to a graphics API. Once per frame it packs
//! everything a renderer needs into a `FrameSnapshot` and hands it to a
//! `RenderSink`.

pub mod vertex;

pub use vertex::{ParticleVertex, colors};

use crate::GpuMatrix;
use crate::lighting::{DirectionalLight, PointLight};
use crate::particles::ParticleBatch;
use crate::sim::transform::{Drawable, MaterialHandle, MeshHandle};

/// One mesh draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub mesh: MeshHandle,
    pub material: MaterialHandle,
    pub world: GpuMatrix,
}

impl DrawItem {
    pub fn from_drawable(drawable: &dyn Drawable) -> Self {
        Self {
            mesh: drawable.mesh(),
            material: drawable.material(),
            world: drawable.transform().gpu_world_matrix(),
        }
    }
}

/// Per-frame camera constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraData {
    pub view: GpuMatrix,
    pub projection: GpuMatrix,
    pub position: [f32; 3],
}

/// Light-space matrices for the shadow pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowData {
    pub view: GpuMatrix,
    pub projection: GpuMatrix,
}

/// Everything needed to draw one frame.
///
/// Particle batches borrow the emitters' vertex storage, so a snapshot must
/// be consumed before the next tick.
#[derive(Debug)]
pub struct FrameSnapshot<'a> {
    pub draws: Vec<DrawItem>,
    pub camera: CameraData,
    pub directional_light: DirectionalLight,
    pub point_light: PointLight,
    pub shadow: ShadowData,
    pub particles: Vec<ParticleBatch<'a>>,
}

impl FrameSnapshot<'_> {
    /// Live particle quads across all emitters
    pub fn particle_quads(&self) -> usize {
        self.particles.iter().map(ParticleBatch::quad_count).sum()
    }

    /// Mesh draws plus indexed particle draws
    pub fn draw_call_count(&self) -> usize {
        self.draws.len() + self.particles.iter().map(|b| b.draws.len()).sum::<usize>()
    }
}

/// The rendering collaborator
pub trait RenderSink {
    fn submit(&mut self, frame: &FrameSnapshot<'_>);
}
