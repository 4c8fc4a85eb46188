//! Structural checks on mesh buffers and vertex groupings, used by tests
//! to catch corrupt geometry early.

use glam::Vec3;

use crate::mesh::MeshData;
use crate::picking::Aabb;

pub struct MeshValidator;

impl MeshValidator {
    /// Check buffer strides and index ranges
    pub fn validate(mesh: &MeshData) -> Result<(), String> {
        if mesh.positions.len() % 3 != 0 {
            return Err(format!(
                "position buffer length {} is not a multiple of 3",
                mesh.positions.len()
            ));
        }
        if mesh.indices.len() % 3 != 0 {
            return Err(format!(
                "index buffer length {} is not a multiple of 3",
                mesh.indices.len()
            ));
        }

        let vertex_count = mesh.vertex_count() as u32;
        for (i, &idx) in mesh.indices.iter().enumerate() {
            if idx >= vertex_count {
                return Err(format!(
                    "index {idx} at position {i} exceeds vertex count {vertex_count}"
                ));
            }
        }

        for (i, v) in mesh.positions.iter().enumerate() {
            if !v.is_finite() {
                return Err(format!("non-finite coordinate at buffer offset {i}"));
            }
        }

        Ok(())
    }

    /// Check that the groups partition the vertex index range exactly:
    /// every index in one group, no index in two.
    pub fn validate_partition(groups: &[Vec<usize>], vertex_count: usize) -> Result<(), String> {
        let mut seen = vec![false; vertex_count];
        for (g, group) in groups.iter().enumerate() {
            for &i in group {
                if i >= vertex_count {
                    return Err(format!("group {g} references vertex {i} out of range"));
                }
                if seen[i] {
                    return Err(format!("vertex {i} appears in more than one group"));
                }
                seen[i] = true;
            }
        }
        if let Some(missing) = seen.iter().position(|s| !s) {
            return Err(format!("vertex {missing} is in no group"));
        }
        Ok(())
    }

    /// Extent of the mesh AABB, for coarse dimension assertions
    pub fn dimensions(mesh: &MeshData) -> Vec3 {
        let aabb = Aabb::from_mesh(mesh);
        aabb.max - aabb.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh;

    #[test]
    fn test_valid_mesh_passes() {
        assert!(MeshValidator::validate(&mesh::ground_plane(4.0, 4.0)).is_ok());
        assert!(MeshValidator::validate(&mesh::sphere(1.0, 6, 8)).is_ok());
    }

    #[test]
    fn test_out_of_range_index_fails() {
        let mut bad = mesh::ground_plane(4.0, 4.0);
        bad.indices[0] = 99;
        assert!(MeshValidator::validate(&bad).is_err());
    }

    #[test]
    fn test_ragged_position_buffer_fails() {
        let mut bad = mesh::ground_plane(4.0, 4.0);
        bad.positions.pop();
        assert!(MeshValidator::validate(&bad).is_err());
    }

    #[test]
    fn test_non_finite_coordinate_fails() {
        let mut bad = mesh::ground_plane(4.0, 4.0);
        bad.positions[1] = f32::NAN;
        assert!(MeshValidator::validate(&bad).is_err());
    }

    #[test]
    fn test_partition_check() {
        assert!(MeshValidator::validate_partition(&[vec![0, 2], vec![1, 3]], 4).is_ok());
        // Overlap
        assert!(MeshValidator::validate_partition(&[vec![0, 1], vec![1, 2]], 3).is_err());
        // Omission
        assert!(MeshValidator::validate_partition(&[vec![0, 1]], 3).is_err());
        // Out of range
        assert!(MeshValidator::validate_partition(&[vec![0, 5]], 3).is_err());
    }

    #[test]
    fn test_dimensions() {
        let d = MeshValidator::dimensions(&mesh::ground_plane(4.0, 6.0));
        assert_eq!(d, Vec3::new(4.0, 0.0, 6.0));
    }
}
