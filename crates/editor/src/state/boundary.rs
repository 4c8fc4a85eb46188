//! Boundary capture while drawing: ordered click points plus one marker
//! sphere per point, closed into an immutable polygon loop.

use glam::Vec3;
use shared::{Material, NodeId, Transform};
use tracing::info;

use crate::mesh;
use crate::scene::Scene;

/// Radius of the marker sphere dropped at each captured point
pub const MARKER_RADIUS: f32 = 0.1;

const MARKER_COLOR: [f32; 3] = [0.9, 0.2, 0.2];

/// A closed boundary loop in capture order. Immutable once built.
#[derive(Clone, Debug)]
pub struct BoundaryPolygon {
    points: Vec<Vec3>,
}

impl BoundaryPolygon {
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Open capture session: the points clicked so far and their markers
#[derive(Default)]
pub struct BoundarySession {
    points: Vec<Vec3>,
    markers: Vec<NodeId>,
}

impl BoundarySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Capture a point and drop a marker sphere at it. Points are kept
    /// as clicked: no dedup, no ordering constraint, no limit.
    pub fn append(&mut self, scene: &mut Scene, point: Vec3) {
        let marker = scene.add_node(
            "marker",
            mesh::sphere(MARKER_RADIUS, 8, 8),
            Transform::at(point.x as f64, point.y as f64, point.z as f64),
            Material::standard(MARKER_COLOR),
            false,
        );
        self.points.push(point);
        self.markers.push(marker);
    }

    /// Close the loop into a polygon. Needs at least 3 points; on success
    /// the markers are disposed and the session is left empty.
    pub fn close(&mut self, scene: &mut Scene) -> Result<BoundaryPolygon, String> {
        if self.points.len() < 3 {
            return Err(format!(
                "boundary needs at least 3 points to close, have {}",
                self.points.len()
            ));
        }

        let polygon = BoundaryPolygon {
            points: std::mem::take(&mut self.points),
        };
        self.dispose_markers(scene);
        info!(points = polygon.len(), "boundary closed");
        Ok(polygon)
    }

    /// Drop all captured points and markers (cancellation path)
    pub fn clear(&mut self, scene: &mut Scene) {
        self.points.clear();
        self.dispose_markers(scene);
    }

    fn dispose_markers(&mut self, scene: &mut Scene) {
        // Snapshot first, then dispose
        for id in std::mem::take(&mut self.markers) {
            scene.dispose_node(&id);
        }
    }
}
