//! Ray casting and point transforms used by scene picking.

use glam::Vec3;
use shared::Transform;

use crate::mesh::MeshData;

/// A ray in world space
#[derive(Clone, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Compute AABB from a position buffer (3 floats per vertex)
    pub fn from_mesh(mesh: &MeshData) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);

        for i in 0..mesh.vertex_count() {
            let p = mesh.position(i);
            min = min.min(p);
            max = max.max(p);
        }

        Self { min, max }
    }

    /// AABB of the mesh after applying `transform` (translation + scale)
    pub fn from_mesh_world(mesh: &MeshData, transform: &Transform) -> Self {
        let local = Self::from_mesh(mesh);
        let a = transform_point(local.min, transform);
        let b = transform_point(local.max, transform);
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Apply a node transform to a local-space point (scale then translate).
/// Rotation is intentionally not applied: the editor never rotates its
/// nodes, and drag deltas are added in local space on the same assumption.
pub fn transform_point(p: Vec3, t: &Transform) -> Vec3 {
    Vec3::new(
        p.x * t.scale[0] as f32 + t.position[0] as f32,
        p.y * t.scale[1] as f32 + t.position[1] as f32,
        p.z * t.scale[2] as f32 + t.position[2] as f32,
    )
}

/// Ray-AABB intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let inv = Vec3::new(
        1.0 / ray.direction.x,
        1.0 / ray.direction.y,
        1.0 / ray.direction.z,
    );

    let t1 = (aabb.min.x - ray.origin.x) * inv.x;
    let t2 = (aabb.max.x - ray.origin.x) * inv.x;
    let t3 = (aabb.min.y - ray.origin.y) * inv.y;
    let t4 = (aabb.max.y - ray.origin.y) * inv.y;
    let t5 = (aabb.min.z - ray.origin.z) * inv.z;
    let t6 = (aabb.max.z - ray.origin.z) * inv.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Möller-Trumbore ray-triangle intersection.
/// Returns the distance along the ray if hit, or None.
pub fn ray_triangle_intersect(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    // Intersection is behind ray origin
    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

/// Result of picking a triangle in a mesh
#[derive(Clone, Debug)]
pub struct TriangleHit {
    /// Index of the triangle (into mesh.indices / 3)
    pub triangle_index: usize,
    /// Distance from ray origin to hit point
    pub distance: f32,
}

/// Find the nearest triangle of `mesh` (placed with `transform`) hit by the
/// ray, testing in world space.
pub fn pick_triangle(ray: &Ray, mesh: &MeshData, transform: &Transform) -> Option<TriangleHit> {
    let mut best: Option<TriangleHit> = None;

    for tri_idx in 0..mesh.triangle_count() {
        let i0 = mesh.indices[tri_idx * 3] as usize;
        let i1 = mesh.indices[tri_idx * 3 + 1] as usize;
        let i2 = mesh.indices[tri_idx * 3 + 2] as usize;

        let v0 = transform_point(mesh.position(i0), transform);
        let v1 = transform_point(mesh.position(i1), transform);
        let v2 = transform_point(mesh.position(i2), transform);

        if let Some(dist) = ray_triangle_intersect(ray, v0, v1, v2) {
            if best.as_ref().is_none_or(|b| dist < b.distance) {
                best = Some(TriangleHit {
                    triangle_index: tri_idx,
                    distance: dist,
                });
            }
        }
    }

    best
}
