//! Vertex-edit session: groups the solid's duplicated buffer vertices by
//! position and exposes one drag handle per group.
//!
//! Extrusion duplicates each geometric corner across the faces that meet
//! there, so editing a corner means moving every buffer copy together.
//! Grouping quantizes positions to an epsilon grid instead of comparing
//! floats exactly, so copies that drifted within tolerance still land in
//! the same group.

use std::collections::HashMap;

use glam::Vec3;
use shared::{Material, NodeId, Transform};
use tracing::{info, warn};

use crate::mesh;
use crate::picking;
use crate::scene::Scene;

/// Default quantization step for grouping vertex positions
pub const DEDUP_EPSILON: f32 = 1e-4;

/// Radius of the per-group drag handle sphere
pub const HANDLE_RADIUS: f32 = 0.15;

const HANDLE_COLOR: [f32; 3] = [0.2, 0.5, 0.95];

/// One set of buffer vertices sharing a quantized position
pub struct VertexGroup {
    /// Vertex indices into the solid's position buffer
    pub indices: Vec<usize>,
    /// Local-space representative position (first occurrence)
    pub position: Vec3,
    /// Drag handle node bound to this group
    pub handle: NodeId,
}

/// Group vertex indices of a position buffer by quantized position.
/// Groups come out in first-occurrence order and partition the buffer:
/// every vertex index lands in exactly one group.
pub fn group_positions(positions: &[f32], epsilon: f32) -> Vec<Vec<usize>> {
    let mut by_key: HashMap<(i64, i64, i64), usize> = HashMap::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();

    let quantize = |v: f32| (v / epsilon).round() as i64;

    for i in 0..positions.len() / 3 {
        let key = (
            quantize(positions[i * 3]),
            quantize(positions[i * 3 + 1]),
            quantize(positions[i * 3 + 2]),
        );
        match by_key.get(&key) {
            Some(&g) => groups[g].push(i),
            None => {
                by_key.insert(key, groups.len());
                groups.push(vec![i]);
            }
        }
    }

    groups
}

/// Live editing session on one solid
pub struct VertexEditSession {
    solid: NodeId,
    groups: Vec<VertexGroup>,
    /// Group whose handle is currently being dragged
    active_handle: Option<usize>,
}

impl VertexEditSession {
    /// Read the solid's buffer, group its vertices, and spawn one handle
    /// sphere per group at the group's world position.
    pub fn begin(scene: &mut Scene, solid: &NodeId, epsilon: f32) -> Result<Self, String> {
        let positions = scene
            .positions(solid)
            .ok_or_else(|| format!("begin editing: unknown node {solid}"))?
            .to_vec();
        let transform = scene
            .world_transform(solid)
            .cloned()
            .ok_or_else(|| format!("begin editing: unknown node {solid}"))?;

        let mut groups = Vec::new();
        for indices in group_positions(&positions, epsilon) {
            let first = indices[0];
            let local = Vec3::new(
                positions[first * 3],
                positions[first * 3 + 1],
                positions[first * 3 + 2],
            );
            let world = picking::transform_point(local, &transform);
            let handle = scene.add_node(
                "vertex_handle",
                mesh::sphere(HANDLE_RADIUS, 8, 8),
                Transform::at(world.x as f64, world.y as f64, world.z as f64),
                Material::standard(HANDLE_COLOR),
                true,
            );
            groups.push(VertexGroup {
                indices,
                position: local,
                handle,
            });
        }

        info!(
            solid = %solid,
            vertices = positions.len() / 3,
            groups = groups.len(),
            "vertex editing started"
        );
        Ok(Self {
            solid: solid.clone(),
            groups,
            active_handle: None,
        })
    }

    pub fn solid(&self) -> &NodeId {
        &self.solid
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn group(&self, index: usize) -> Option<&VertexGroup> {
        self.groups.get(index)
    }

    /// Group index owning the given handle node
    pub fn handle_group(&self, handle: &NodeId) -> Option<usize> {
        self.groups.iter().position(|g| &g.handle == handle)
    }

    /// Mark a handle's group as the active drag target
    pub fn start_drag(&mut self, group: usize) {
        self.active_handle = Some(group);
    }

    pub fn stop_drag(&mut self) {
        self.active_handle = None;
    }

    pub fn active_group(&self) -> Option<usize> {
        self.active_handle
    }

    /// Move every vertex of a group by a world-space delta, writing the
    /// whole buffer back in one call, and carry the handle along.
    ///
    /// The delta is added in local space without passing through the
    /// solid's inverse transform, so it is only correct for translated
    /// (unscaled, unrotated) solids.
    pub fn apply_delta(
        &mut self,
        scene: &mut Scene,
        group: usize,
        delta: Vec3,
    ) -> Result<(), String> {
        let g = self
            .groups
            .get_mut(group)
            .ok_or_else(|| format!("apply_delta: no vertex group {group}"))?;

        let mut positions = scene
            .positions(&self.solid)
            .ok_or_else(|| format!("apply_delta: solid {} is gone", self.solid))?
            .to_vec();

        for &i in &g.indices {
            positions[i * 3] += delta.x;
            positions[i * 3 + 1] += delta.y;
            positions[i * 3 + 2] += delta.z;
        }
        scene.update_positions(&self.solid, positions)?;

        g.position += delta;
        scene.translate_node(&g.handle, delta)?;
        Ok(())
    }

    /// Dispose every handle node (session end or mode toggle-off)
    pub fn dispose_handles(&mut self, scene: &mut Scene) {
        self.active_handle = None;
        for g in self.groups.drain(..) {
            if !scene.dispose_node(&g.handle) {
                warn!(handle = %g.handle, "vertex handle was already gone");
            }
        }
    }
}
