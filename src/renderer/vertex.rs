//! Vertex types handed to the renderer

use bytemuck::{Pod, Zeroable};

/// One corner of a particle quad.
///
/// All four corners of a quad share position, color and size; the vertex
/// shader expands them into a camera-facing square using the UV corner.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 4],
    pub size: f32,
}

impl ParticleVertex {
    /// UV corners in quad order
    pub const CORNERS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    /// Vertex count per particle
    pub const PER_QUAD: usize = 4;

    pub fn stride() -> usize {
        std::mem::size_of::<ParticleVertex>()
    }
}

/// Indices per particle quad (two triangles)
pub const INDICES_PER_QUAD: usize = 6;

/// Index buffer for `quads` particle quads laid out back to back
pub fn quad_indices(quads: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity(quads * INDICES_PER_QUAD);
    for quad in 0..quads as u32 {
        let i = quad * ParticleVertex::PER_QUAD as u32;
        indices.extend_from_slice(&[i, i + 1, i + 2, i, i + 2, i + 3]);
    }
    indices
}

/// Colors for game elements
pub mod colors {
    pub const PLAYER_ONE_START: [f32; 4] = [0.2, 0.6, 1.0, 1.0];
    pub const PLAYER_ONE_END: [f32; 4] = [0.1, 0.1, 0.6, 0.0];
    pub const PLAYER_TWO_START: [f32; 4] = [1.0, 0.4, 0.2, 1.0];
    pub const PLAYER_TWO_END: [f32; 4] = [0.6, 0.1, 0.1, 0.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(ParticleVertex::stride(), 40);
        assert_eq!(std::mem::offset_of!(ParticleVertex, position), 0);
        assert_eq!(std::mem::offset_of!(ParticleVertex, uv), 12);
        assert_eq!(std::mem::offset_of!(ParticleVertex, color), 20);
        assert_eq!(std::mem::offset_of!(ParticleVertex, size), 36);
    }

    #[test]
    fn test_quad_indices() {
        let indices = quad_indices(2);
        assert_eq!(indices, vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn test_vertices_cast_to_bytes() {
        let verts = [ParticleVertex::default(); 4];
        let bytes: &[u8] = bytemuck::cast_slice(&verts);
        assert_eq!(bytes.len(), 4 * ParticleVertex::stride());
    }
}
