use serde::{Deserialize, Serialize};

/// Unique identifier of a node in the scene
pub type NodeId = String;

/// Interaction mode of the editor. Exactly one mode is active at a time;
/// every pointer-routing rule matches on this value, so the modes are
/// mutually exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Idle,
    Drawing,
    Extruding,
    Moving,
    VertexEditing,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Drawing => "Draw",
            Self::Extruding => "Extrude",
            Self::Moving => "Move",
            Self::VertexEditing => "Edit Vertex",
        }
    }
}

/// Pointer button reported by the host with each pointer-down event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Object transform (translation + per-axis scale; rotation is stored but
/// drag deltas are not inverse-transformed through it — see editor docs)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
}

impl Transform {
    pub fn new() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }

    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: [x, y, z],
            ..Self::new()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/// Render material description for a scene node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub diffuse_color: [f32; 3],
    pub back_face_culling: bool,
    pub two_sided_lighting: bool,
}

impl Material {
    /// Standard single-sided material
    pub fn standard(color: [f32; 3]) -> Self {
        Self {
            diffuse_color: color,
            back_face_culling: true,
            two_sided_lighting: false,
        }
    }

    /// Double-sided material: extrusion can produce faces visible from
    /// either side depending on boundary winding
    pub fn double_sided(color: [f32; 3]) -> Self {
        Self {
            diffuse_color: color,
            back_face_culling: false,
            two_sided_lighting: true,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::standard([0.6, 0.6, 0.65])
    }
}

/// Lightweight description of a scene node for inspection/export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub name: String,
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub transform: Transform,
    pub pickable: bool,
}

/// Snapshot of the whole scene (node list in creation order)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SceneSnapshot {
    pub nodes: Vec<NodeSnapshot>,
}
