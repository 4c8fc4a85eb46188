// Library crate: headless interaction core for sketching a polygon on the
// ground plane, extruding it into a solid, moving the solid, and editing it
// by dragging deduplicated vertices. Rendering (camera, GL, GUI buttons)
// stays with the host; the scene module models the runtime surface the core
// consumes (picking, mesh nodes, transforms, drag behaviors).

pub mod editor;
pub mod extrude;
pub mod fixtures;
pub mod harness;
pub mod mesh;
pub mod picking;
pub mod scene;
pub mod state;
pub mod triangulate;
pub mod validation;
