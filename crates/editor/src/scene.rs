//! Minimal retained scene: the surface of the rendering runtime the editor
//! consumes — node store, picking, position-channel buffer access, world
//! transforms, and the generic drag-behavior primitive. Rendering itself
//! (camera, lights, draw calls) belongs to the host.

use std::collections::{HashMap, HashSet};

use glam::Vec3;
use shared::{Material, NodeId, NodeSnapshot, SceneSnapshot, Transform};

use crate::mesh::MeshData;
use crate::picking::{self, Aabb, Ray};

/// A mesh placed in the scene
pub struct SceneNode {
    pub id: NodeId,
    pub name: String,
    pub mesh: MeshData,
    pub transform: Transform,
    pub material: Material,
    pub pickable: bool,
}

/// Outcome of casting a pointer ray into the scene
#[derive(Clone, Debug, Default)]
pub struct PickResult {
    /// World-space hit point (None on a miss)
    pub point: Option<Vec3>,
    /// Hit node (None on a miss)
    pub node: Option<NodeId>,
}

impl PickResult {
    pub fn hit(&self) -> bool {
        self.node.is_some()
    }

    /// True if the pick landed on the given node
    pub fn hit_node(&self, id: &NodeId) -> bool {
        self.node.as_deref() == Some(id.as_str())
    }
}

/// Retained node store with picking and drag-behavior bookkeeping
#[derive(Default)]
pub struct Scene {
    nodes: HashMap<NodeId, SceneNode>,
    /// Creation order, for deterministic snapshots
    order: Vec<NodeId>,
    /// Nodes with the generic drag behavior attached
    dragged: HashSet<NodeId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Node store ────────────────────────────────────────────

    /// Add a mesh node and return its generated id
    pub fn add_node(
        &mut self,
        name: &str,
        mesh: MeshData,
        transform: Transform,
        material: Material,
        pickable: bool,
    ) -> NodeId {
        let id = uuid::Uuid::new_v4().to_string();
        self.nodes.insert(
            id.clone(),
            SceneNode {
                id: id.clone(),
                name: name.to_string(),
                mesh,
                transform,
                material,
                pickable,
            },
        );
        self.order.push(id.clone());
        id
    }

    /// Dispose a node. Detaches any drag behavior first so no dangling
    /// handler survives the mesh.
    pub fn dispose_node(&mut self, id: &NodeId) -> bool {
        self.dragged.remove(id);
        self.order.retain(|n| n != id);
        self.nodes.remove(id).is_some()
    }

    pub fn node(&self, id: &NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes in creation order
    pub fn nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    // ── Transforms ────────────────────────────────────────────

    /// World transform query for a node
    pub fn world_transform(&self, id: &NodeId) -> Option<&Transform> {
        self.nodes.get(id).map(|n| &n.transform)
    }

    /// Translate a node by a world-space delta
    pub fn translate_node(&mut self, id: &NodeId, delta: Vec3) -> Result<(), String> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| format!("translate_node: unknown node {id}"))?;
        node.transform.position[0] += delta.x as f64;
        node.transform.position[1] += delta.y as f64;
        node.transform.position[2] += delta.z as f64;
        Ok(())
    }

    // ── Vertex buffer access (position channel) ───────────────

    /// Read the local-space position buffer of a node
    pub fn positions(&self, id: &NodeId) -> Option<&[f32]> {
        self.nodes.get(id).map(|n| n.mesh.positions.as_slice())
    }

    /// Replace the entire position buffer of a node in one call.
    /// The topology is unchanged, so the new buffer must match the old
    /// vertex count.
    pub fn update_positions(&mut self, id: &NodeId, positions: Vec<f32>) -> Result<(), String> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| format!("update_positions: unknown node {id}"))?;
        if positions.len() != node.mesh.positions.len() {
            return Err(format!(
                "update_positions: buffer length {} does not match existing {}",
                positions.len(),
                node.mesh.positions.len()
            ));
        }
        node.mesh.positions = positions;
        Ok(())
    }

    // ── Picking ───────────────────────────────────────────────

    /// Cast a ray against all pickable nodes; nearest triangle hit wins.
    /// AABBs cull before per-triangle tests.
    pub fn pick(&self, ray: &Ray) -> PickResult {
        let mut best: Option<(NodeId, f32)> = None;

        for node in self.nodes.values() {
            if !node.pickable || node.mesh.indices.is_empty() {
                continue;
            }

            let aabb = Aabb::from_mesh_world(&node.mesh, &node.transform);
            if picking::ray_aabb(ray, &aabb).is_none() {
                continue;
            }

            if let Some(hit) = picking::pick_triangle(ray, &node.mesh, &node.transform) {
                if best.as_ref().is_none_or(|(_, d)| hit.distance < *d) {
                    best = Some((node.id.clone(), hit.distance));
                }
            }
        }

        match best {
            Some((id, dist)) => PickResult {
                point: Some(ray.at(dist)),
                node: Some(id),
            },
            None => PickResult::default(),
        }
    }

    // ── Drag behavior primitive ───────────────────────────────

    /// Attach the generic drag behavior to a node
    pub fn attach_drag(&mut self, id: &NodeId) {
        if self.nodes.contains_key(id) {
            self.dragged.insert(id.clone());
        }
    }

    /// Detach the drag behavior from a node
    pub fn detach_drag(&mut self, id: &NodeId) {
        self.dragged.remove(id);
    }

    pub fn has_drag(&self, id: &NodeId) -> bool {
        self.dragged.contains(id)
    }

    /// Detach every drag behavior (used before teardown, so no observer
    /// outlives its mesh)
    pub fn detach_all_drags(&mut self) {
        self.dragged.clear();
    }

    // ── Inspection ────────────────────────────────────────────

    /// Snapshot of the scene for inspection/JSON export
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            nodes: self
                .nodes()
                .map(|n| NodeSnapshot {
                    id: n.id.clone(),
                    name: n.name.clone(),
                    vertex_count: n.mesh.vertex_count(),
                    triangle_count: n.mesh.triangle_count(),
                    transform: n.transform.clone(),
                    pickable: n.pickable,
                })
                .collect(),
        }
    }
}
