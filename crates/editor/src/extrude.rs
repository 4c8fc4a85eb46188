//! Builds meshes from a closed boundary loop: the flat sketch polygon and
//! the extruded prism solid.

use glam::Vec3;
use tracing::info;

use crate::mesh::MeshData;
use crate::triangulate;

/// Extrusion height of the solid
pub const EXTRUDE_DEPTH: f32 = 2.0;

/// The sketch polygon sits slightly above the ground plane so picking
/// prefers it over the plane underneath
pub const POLYGON_LIFT: f32 = 0.01;

/// Project boundary points onto the capture plane (x, z)
fn project_boundary(boundary: &[Vec3]) -> Vec<[f64; 2]> {
    boundary
        .iter()
        .map(|p| [p.x as f64, p.z as f64])
        .collect()
}

/// Flat polygon mesh from a closed boundary loop, lifted to
/// `POLYGON_LIFT` above the capture plane. One vertex per boundary point,
/// in capture order.
pub fn polygon_mesh(boundary: &[Vec3]) -> Result<MeshData, String> {
    let indices = triangulate::triangulate(&project_boundary(boundary))?;

    let mut mesh = MeshData::default();
    for p in boundary {
        mesh.push_position(Vec3::new(p.x, POLYGON_LIFT, p.z));
    }
    mesh.indices = indices;
    Ok(mesh)
}

/// Extrude a closed boundary loop into a prism solid of height `depth`.
///
/// The bottom cap sits on the capture plane (y = 0) and the top cap at
/// y = depth. Every face carries its own copy of its corner vertices, so
/// a boundary of n points yields 2n cap vertices plus 4n wall vertices.
/// Copies of the same corner are bit-identical, which downstream vertex
/// grouping relies on.
pub fn extrude_solid(boundary: &[Vec3], depth: f32) -> Result<MeshData, String> {
    let n = boundary.len();
    let cap = triangulate::triangulate(&project_boundary(boundary))?;

    // Shared corner coordinates, computed once so every copy is exact
    let bottom: Vec<Vec3> = boundary.iter().map(|p| Vec3::new(p.x, 0.0, p.z)).collect();
    let top: Vec<Vec3> = bottom.iter().map(|p| Vec3::new(p.x, depth, p.z)).collect();

    let mut mesh = MeshData::default();

    // Bottom cap, wound to face downward
    for p in &bottom {
        mesh.push_position(*p);
    }
    for tri in cap.chunks(3) {
        mesh.indices.extend_from_slice(&[tri[0], tri[2], tri[1]]);
    }

    // Top cap, facing upward
    let top_base = mesh.vertex_count() as u32;
    for p in &top {
        mesh.push_position(*p);
    }
    for tri in cap.chunks(3) {
        mesh.indices.extend_from_slice(&[
            top_base + tri[0],
            top_base + tri[1],
            top_base + tri[2],
        ]);
    }

    // One wall quad per boundary edge, wrapping last back to first
    for i in 0..n {
        let j = (i + 1) % n;
        let base = mesh.vertex_count() as u32;
        mesh.push_position(bottom[i]);
        mesh.push_position(bottom[j]);
        mesh.push_position(top[j]);
        mesh.push_position(top[i]);
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    info!(
        boundary_points = n,
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        depth,
        "extruded solid"
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_polygon_mesh_square() {
        let mesh = polygon_mesh(&fixtures::square_boundary()).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        for i in 0..mesh.vertex_count() {
            assert_eq!(mesh.position(i).y, POLYGON_LIFT);
        }
    }

    #[test]
    fn test_polygon_mesh_preserves_capture_order() {
        let boundary = fixtures::square_boundary();
        let mesh = polygon_mesh(&boundary).unwrap();
        for (i, p) in boundary.iter().enumerate() {
            let v = mesh.position(i);
            assert_eq!((v.x, v.z), (p.x, p.z));
        }
    }

    #[test]
    fn test_extrude_square_vertex_count() {
        let mesh = extrude_solid(&fixtures::square_boundary(), EXTRUDE_DEPTH).unwrap();
        // 2 caps of 4 plus 4 walls of 4
        assert_eq!(mesh.vertex_count(), 24);
        // 2 + 2 cap triangles plus 2 per wall
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn test_extrude_spans_depth() {
        let mesh = extrude_solid(&fixtures::square_boundary(), EXTRUDE_DEPTH).unwrap();
        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;
        for i in 0..mesh.vertex_count() {
            let y = mesh.position(i).y;
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        assert_eq!(min_y, 0.0);
        assert_eq!(max_y, EXTRUDE_DEPTH);
    }

    #[test]
    fn test_extrude_corner_copies_bit_identical() {
        let boundary = fixtures::square_boundary();
        let mesh = extrude_solid(&boundary, EXTRUDE_DEPTH).unwrap();

        // Each bottom corner appears once in the cap and twice in walls
        for corner in &boundary {
            let target = Vec3::new(corner.x, 0.0, corner.z);
            let copies = (0..mesh.vertex_count())
                .filter(|&i| {
                    let p = mesh.position(i);
                    p.x.to_bits() == target.x.to_bits()
                        && p.y.to_bits() == target.y.to_bits()
                        && p.z.to_bits() == target.z.to_bits()
                })
                .count();
            assert_eq!(copies, 3, "corner {corner:?} has {copies} exact copies");
        }
    }

    #[test]
    fn test_extrude_concave_boundary() {
        let boundary = fixtures::l_shape_boundary();
        let n = boundary.len();
        let mesh = extrude_solid(&boundary, EXTRUDE_DEPTH).unwrap();
        assert_eq!(mesh.vertex_count(), 2 * n + 4 * n);
        // caps: 2 * (n - 2) triangles, walls: 2 per edge
        assert_eq!(mesh.triangle_count(), 2 * (n - 2) + 2 * n);
    }

    #[test]
    fn test_extrude_rejects_degenerate_boundary() {
        let line = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ];
        assert!(extrude_solid(&line, EXTRUDE_DEPTH).is_err());
        assert!(extrude_solid(&[], EXTRUDE_DEPTH).is_err());
    }
}
