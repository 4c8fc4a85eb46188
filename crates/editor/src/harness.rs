//! Headless test harness for driving the editor without a host: builds
//! pick rays, simulates clicks and drags, and exposes counters over the
//! scene.

use glam::Vec3;

use crate::editor::{Editor, PointerEvent, RouteOutcome};
use crate::picking::{Aabb, Ray};
use crate::scene::Scene;

/// Headless driver wrapping an [`Editor`] with scripted input helpers
pub struct TestHarness {
    pub editor: Editor,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    pub fn new() -> Self {
        Self {
            editor: Editor::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        self.editor.scene()
    }

    // ── Ray construction ──────────────────────────────────────

    /// Straight-down ray above the ground point (x, z)
    pub fn ray_above(&self, x: f32, z: f32) -> Ray {
        Ray::new(Vec3::new(x, 10.0, z), Vec3::NEG_Y)
    }

    /// Ray aimed at a vertex handle from outside the solid, so the solid
    /// itself cannot occlude the handle
    pub fn ray_at_handle(&self, group: usize) -> Option<Ray> {
        let session = self.editor.edit_session()?;
        let handle = &session.group(group)?.handle;
        let handle_pos = self.editor.scene().world_transform(handle)?.position;
        let handle_center = Vec3::new(
            handle_pos[0] as f32,
            handle_pos[1] as f32,
            handle_pos[2] as f32,
        );

        let solid = self.editor.solid_id()?;
        let solid_node = self.editor.scene().node(solid)?;
        let solid_center = Aabb::from_mesh_world(&solid_node.mesh, &solid_node.transform).center();

        let away = (handle_center - solid_center).normalize_or_zero();
        let origin = handle_center + away * 5.0;
        Some(Ray::new(origin, handle_center - origin))
    }

    // ── Input drivers ─────────────────────────────────────────

    /// Primary click straight down at (x, z)
    pub fn click(&mut self, x: f32, z: f32) -> RouteOutcome {
        self.click_ray(self.ray_above(x, z))
    }

    pub fn click_ray(&mut self, ray: Ray) -> RouteOutcome {
        self.editor
            .pointer_down(&PointerEvent::primary(ray))
            .expect("pointer routing failed")
    }

    /// Secondary click (position is irrelevant to the close rule)
    pub fn right_click(&mut self) -> RouteOutcome {
        self.editor
            .pointer_down(&PointerEvent::secondary(self.ray_above(0.0, 0.0)))
            .expect("pointer routing failed")
    }

    /// One drag frame followed by gesture end
    pub fn drag_once(&mut self, delta: Vec3) {
        self.editor.drag_update(delta).expect("drag failed");
        self.editor.drag_stopped();
    }

    // ── Scenario drivers ──────────────────────────────────────

    /// Draw and close the 2x2 square centered on the origin
    pub fn draw_square(&mut self) -> RouteOutcome {
        self.editor.toggle_drawing();
        self.click(-1.0, -1.0);
        self.click(1.0, -1.0);
        self.click(1.0, 1.0);
        self.click(-1.0, 1.0);
        self.right_click()
    }

    /// Extrude the pending polygon by clicking its interior
    pub fn extrude(&mut self) -> RouteOutcome {
        self.editor.toggle_extruding();
        self.click(0.0, 0.0)
    }

    /// Enter vertex editing by clicking the solid from above
    pub fn begin_vertex_edit(&mut self) -> RouteOutcome {
        self.editor.toggle_vertex_editing();
        self.click(0.0, 0.0)
    }

    /// Start a drag on the given vertex group's handle
    pub fn grab_handle(&mut self, group: usize) -> RouteOutcome {
        match self.ray_at_handle(group) {
            Some(ray) => self.click_ray(ray),
            None => RouteOutcome::Ignored,
        }
    }

    // ── Counters and accessors ────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.editor.scene().node_count()
    }

    pub fn marker_count(&self) -> usize {
        self.count_named("marker")
    }

    pub fn handle_count(&self) -> usize {
        self.count_named("vertex_handle")
    }

    fn count_named(&self, name: &str) -> usize {
        self.editor.scene().nodes().filter(|n| n.name == name).count()
    }

    /// The solid's position buffer, cloned for before/after comparisons
    pub fn solid_positions(&self) -> Option<Vec<f32>> {
        let solid = self.editor.solid_id()?;
        self.editor.scene().positions(solid).map(|p| p.to_vec())
    }

    /// Scene snapshot serialized to JSON
    pub fn snapshot_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(&self.editor.scene().snapshot())
            .map_err(|e| format!("snapshot serialization failed: {e}"))
    }
}
