//! CPU-side mesh buffers and generators for scene proxy meshes.

use glam::Vec3;

/// Position-channel mesh data: 3 floats per vertex plus a triangle index
/// buffer. The position buffer length is always a multiple of 3; vertex
/// index `i` lives at buffer offset `3 * i`.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    /// 3 floats per vertex: x, y, z
    pub positions: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Position of vertex `index`
    pub fn position(&self, index: usize) -> Vec3 {
        let base = index * 3;
        Vec3::new(
            self.positions[base],
            self.positions[base + 1],
            self.positions[base + 2],
        )
    }

    pub fn set_position(&mut self, index: usize, p: Vec3) {
        let base = index * 3;
        self.positions[base] = p.x;
        self.positions[base + 1] = p.y;
        self.positions[base + 2] = p.z;
    }

    pub fn push_position(&mut self, p: Vec3) {
        self.positions.extend_from_slice(&[p.x, p.y, p.z]);
    }
}

// ── Proxy mesh generation ────────────────────────────────────

/// Flat rectangular ground plane at y=0, centered on the origin
pub fn ground_plane(width: f32, depth: f32) -> MeshData {
    let hw = width * 0.5;
    let hd = depth * 0.5;

    let mut mesh = MeshData::default();
    mesh.push_position(Vec3::new(-hw, 0.0, -hd));
    mesh.push_position(Vec3::new(hw, 0.0, -hd));
    mesh.push_position(Vec3::new(hw, 0.0, hd));
    mesh.push_position(Vec3::new(-hw, 0.0, hd));
    mesh.indices.extend_from_slice(&[0, 1, 2, 0, 2, 3]);
    mesh
}

/// UV sphere, used for boundary markers and vertex drag handles
pub fn sphere(radius: f32, rings: u32, sectors: u32) -> MeshData {
    let mut mesh = MeshData::default();

    for r in 0..=rings {
        let phi = std::f32::consts::PI * r as f32 / rings as f32;
        let sp = phi.sin();
        let cp = phi.cos();

        for s in 0..=sectors {
            let theta = std::f32::consts::TAU * s as f32 / sectors as f32;
            mesh.push_position(Vec3::new(
                radius * sp * theta.cos(),
                radius * cp,
                radius * sp * theta.sin(),
            ));
        }
    }

    for r in 0..rings {
        for s in 0..sectors {
            let i0 = r * (sectors + 1) + s;
            let i1 = i0 + 1;
            let i2 = i0 + sectors + 1;
            let i3 = i2 + 1;
            mesh.indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
        }
    }

    mesh
}
