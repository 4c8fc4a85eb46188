//! Mode controller: owns the scene and the per-mode sessions, and routes
//! pointer events and drag deltas to whichever operation the current mode
//! selects. Routing rules match on the single mode value, so at most one
//! rule can fire per event.

use glam::Vec3;
use shared::{Material, Mode, NodeId, PointerButton, Transform};
use tracing::{debug, warn};

use crate::extrude;
use crate::mesh;
use crate::picking::Ray;
use crate::scene::Scene;
use crate::state::boundary::{BoundaryPolygon, BoundarySession};
use crate::state::vertex_edit::{VertexEditSession, DEDUP_EPSILON};

/// Side length of the square ground plane
pub const GROUND_SIZE: f32 = 10.0;

const POLYGON_COLOR: [f32; 3] = [0.85, 0.6, 0.2];
const SOLID_COLOR: [f32; 3] = [0.25, 0.45, 0.85];

/// A pointer-down event as reported by the host. The host resolves screen
/// coordinates into a world-space ray through its camera; the ray is the
/// interface boundary.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub button: PointerButton,
    pub ray: Ray,
}

impl PointerEvent {
    pub fn primary(ray: Ray) -> Self {
        Self {
            button: PointerButton::Primary,
            ray,
        }
    }

    pub fn secondary(ray: Ray) -> Self {
        Self {
            button: PointerButton::Secondary,
            ray,
        }
    }
}

/// What a routed pointer event did. Every event resolves to exactly one
/// variant; events no rule claims come back as `Ignored` rather than
/// vanishing silently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteOutcome {
    /// No routing rule matched (wrong mode, wrong button, or pick miss)
    Ignored,
    /// A boundary point was captured and a marker dropped
    PointCaptured,
    /// The boundary closed into a polygon node
    BoundaryClosed { vertex_count: usize },
    /// Close was requested with fewer than 3 points
    BoundaryRejected { point_count: usize },
    /// The polygon was extruded into a solid
    SolidBuilt,
    /// Move mode attached the drag behavior to the solid
    DragAttached,
    /// Move mode detached the drag behavior from the solid
    DragDetached,
    /// A vertex-edit session started on the solid
    EditingBegan { group_count: usize },
    /// A vertex handle became the active drag target
    HandleDragStarted,
}

/// The interaction core. Owns the scene, the authoritative mode, and the
/// per-mode sessions; dropping it releases everything it created.
pub struct Editor {
    scene: Scene,
    mode: Mode,
    ground: NodeId,
    boundary: BoundarySession,
    /// Closed polygon awaiting extrusion, with its scene node
    polygon: Option<(NodeId, BoundaryPolygon)>,
    solid: Option<NodeId>,
    edit: Option<VertexEditSession>,
    dedup_epsilon: f32,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        let mut scene = Scene::new();
        let ground = scene.add_node(
            "ground",
            mesh::ground_plane(GROUND_SIZE, GROUND_SIZE),
            Transform::new(),
            Material::default(),
            true,
        );
        Self {
            scene,
            mode: Mode::Idle,
            ground,
            boundary: BoundarySession::new(),
            polygon: None,
            solid: None,
            edit: None,
            dedup_epsilon: DEDUP_EPSILON,
        }
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn ground_id(&self) -> &NodeId {
        &self.ground
    }

    pub fn polygon_id(&self) -> Option<&NodeId> {
        self.polygon.as_ref().map(|(id, _)| id)
    }

    pub fn solid_id(&self) -> Option<&NodeId> {
        self.solid.as_ref()
    }

    pub fn boundary_point_count(&self) -> usize {
        self.boundary.point_count()
    }

    pub fn edit_session(&self) -> Option<&VertexEditSession> {
        self.edit.as_ref()
    }

    // ── Mode switching ────────────────────────────────────────

    /// Switch mode, tearing down whatever the outgoing mode left live:
    /// markers for Drawing, the drag attachment for Moving, the handle
    /// spheres for VertexEditing.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }

        match self.mode {
            Mode::Drawing => self.boundary.clear(&mut self.scene),
            Mode::Moving => {
                if let Some(solid) = &self.solid {
                    self.scene.detach_drag(solid);
                }
            }
            Mode::VertexEditing => {
                if let Some(mut session) = self.edit.take() {
                    session.dispose_handles(&mut self.scene);
                }
            }
            Mode::Idle | Mode::Extruding => {}
        }

        debug!(from = ?self.mode, to = ?mode, "mode change");
        self.mode = mode;
    }

    /// Toggle helpers for host-side mode buttons. Pressing the active
    /// mode's button returns to Idle.
    pub fn toggle_drawing(&mut self) {
        self.toggle(Mode::Drawing);
    }

    pub fn toggle_extruding(&mut self) {
        self.toggle(Mode::Extruding);
    }

    pub fn toggle_moving(&mut self) {
        self.toggle(Mode::Moving);
    }

    pub fn toggle_vertex_editing(&mut self) {
        self.toggle(Mode::VertexEditing);
    }

    fn toggle(&mut self, mode: Mode) {
        if self.mode == mode {
            self.set_mode(Mode::Idle);
        } else {
            self.set_mode(mode);
        }
    }

    // ── Pointer routing ───────────────────────────────────────

    /// Route a pointer-down event according to the current mode
    pub fn pointer_down(&mut self, event: &PointerEvent) -> Result<RouteOutcome, String> {
        let outcome = match (self.mode, event.button) {
            (Mode::Drawing, PointerButton::Primary) => self.capture_point(&event.ray),
            (Mode::Drawing, PointerButton::Secondary) => self.close_boundary()?,
            (Mode::Extruding, PointerButton::Primary) => self.build_solid(&event.ray)?,
            (Mode::Moving, PointerButton::Primary) => self.route_move_click(&event.ray),
            (Mode::VertexEditing, PointerButton::Primary) => self.route_edit_click(&event.ray)?,
            _ => RouteOutcome::Ignored,
        };

        if outcome == RouteOutcome::Ignored {
            debug!(mode = ?self.mode, button = ?event.button, "pointer event ignored");
        }
        Ok(outcome)
    }

    fn capture_point(&mut self, ray: &Ray) -> RouteOutcome {
        let pick = self.scene.pick(ray);
        if !pick.hit_node(&self.ground) {
            return RouteOutcome::Ignored;
        }
        // hit_node implies a hit point
        if let Some(point) = pick.point {
            self.boundary.append(&mut self.scene, point);
            return RouteOutcome::PointCaptured;
        }
        RouteOutcome::Ignored
    }

    fn close_boundary(&mut self) -> Result<RouteOutcome, String> {
        let point_count = self.boundary.point_count();
        if point_count < 3 {
            warn!(point_count, "boundary close rejected");
            return Ok(RouteOutcome::BoundaryRejected { point_count });
        }

        let polygon = self.boundary.close(&mut self.scene)?;
        let mesh = extrude::polygon_mesh(polygon.points())?;

        // A fresh boundary supersedes any earlier polygon
        if let Some((old, _)) = self.polygon.take() {
            self.scene.dispose_node(&old);
        }

        let vertex_count = polygon.len();
        let node = self.scene.add_node(
            "polygon",
            mesh,
            Transform::new(),
            Material::double_sided(POLYGON_COLOR),
            true,
        );
        self.polygon = Some((node, polygon));
        self.set_mode(Mode::Idle);
        Ok(RouteOutcome::BoundaryClosed { vertex_count })
    }

    fn build_solid(&mut self, ray: &Ray) -> Result<RouteOutcome, String> {
        let pick = self.scene.pick(ray);
        let hit_polygon = matches!(
            (&self.polygon, &pick.node),
            (Some((id, _)), Some(hit)) if id == hit
        );
        if !hit_polygon {
            return Ok(RouteOutcome::Ignored);
        }

        let (polygon_node, polygon) = self
            .polygon
            .take()
            .ok_or_else(|| "no polygon to extrude".to_string())?;
        let mesh = extrude::extrude_solid(polygon.points(), extrude::EXTRUDE_DEPTH)?;

        self.scene.dispose_node(&polygon_node);
        if let Some(old) = self.solid.take() {
            self.scene.dispose_node(&old);
        }

        let solid = self.scene.add_node(
            "solid",
            mesh,
            Transform::new(),
            Material::double_sided(SOLID_COLOR),
            true,
        );
        self.solid = Some(solid);
        self.set_mode(Mode::Idle);
        Ok(RouteOutcome::SolidBuilt)
    }

    fn route_move_click(&mut self, ray: &Ray) -> RouteOutcome {
        let Some(solid) = self.solid.clone() else {
            return RouteOutcome::Ignored;
        };

        let pick = self.scene.pick(ray);
        if pick.hit_node(&solid) {
            self.scene.attach_drag(&solid);
            RouteOutcome::DragAttached
        } else {
            self.scene.detach_drag(&solid);
            RouteOutcome::DragDetached
        }
    }

    fn route_edit_click(&mut self, ray: &Ray) -> Result<RouteOutcome, String> {
        let pick = self.scene.pick(ray);
        let Some(hit) = pick.node.clone() else {
            return Ok(RouteOutcome::Ignored);
        };

        // A handle hit starts a drag on its group
        if let Some(session) = &mut self.edit {
            if let Some(group) = session.handle_group(&hit) {
                session.start_drag(group);
                return Ok(RouteOutcome::HandleDragStarted);
            }
        }

        if self.solid.as_ref() == Some(&hit) {
            // Re-clicking the solid during a live session would duplicate
            // the handles
            if self.edit.is_some() {
                return Ok(RouteOutcome::Ignored);
            }
            let session = VertexEditSession::begin(&mut self.scene, &hit, self.dedup_epsilon)?;
            let group_count = session.group_count();
            self.edit = Some(session);
            return Ok(RouteOutcome::EditingBegan { group_count });
        }

        Ok(RouteOutcome::Ignored)
    }

    // ── Drag routing ──────────────────────────────────────────

    /// Apply one frame's world-space drag delta to the active target:
    /// the dragged vertex group if a handle drag is live, otherwise the
    /// solid when Move mode has the drag behavior attached.
    pub fn drag_update(&mut self, delta: Vec3) -> Result<(), String> {
        if let Some(session) = &mut self.edit {
            if let Some(group) = session.active_group() {
                return session.apply_delta(&mut self.scene, group, delta);
            }
        }

        if self.mode == Mode::Moving {
            if let Some(solid) = &self.solid {
                if self.scene.has_drag(solid) {
                    return self.scene.translate_node(solid, delta);
                }
            }
        }

        debug!("drag delta with no active target");
        Ok(())
    }

    /// End the current drag gesture
    pub fn drag_stopped(&mut self) {
        if let Some(session) = &mut self.edit {
            session.stop_drag();
        }
    }

    // ── Teardown ──────────────────────────────────────────────

    /// Dispose every node the editor created and return to Idle
    pub fn teardown(&mut self) {
        self.set_mode(Mode::Idle);
        self.boundary.clear(&mut self.scene);
        if let Some(mut session) = self.edit.take() {
            session.dispose_handles(&mut self.scene);
        }
        if let Some((node, _)) = self.polygon.take() {
            self.scene.dispose_node(&node);
        }
        if let Some(solid) = self.solid.take() {
            self.scene.detach_drag(&solid);
            self.scene.dispose_node(&solid);
        }
        self.scene.detach_all_drags();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_new_editor_has_ground_only() {
        let editor = Editor::new();
        assert_eq!(editor.mode(), Mode::Idle);
        assert_eq!(editor.scene().node_count(), 1);
    }

    #[test]
    fn test_toggle_same_mode_returns_to_idle() {
        let mut editor = Editor::new();
        editor.toggle_drawing();
        assert_eq!(editor.mode(), Mode::Drawing);
        editor.toggle_drawing();
        assert_eq!(editor.mode(), Mode::Idle);
    }

    #[test]
    fn test_toggle_switches_between_modes() {
        let mut editor = Editor::new();
        editor.toggle_drawing();
        editor.toggle_moving();
        assert_eq!(editor.mode(), Mode::Moving);
    }

    #[test]
    fn test_idle_click_is_ignored() {
        let mut editor = Editor::new();
        let event = PointerEvent::primary(fixtures::ray_above(0.0, 0.0));
        assert_eq!(editor.pointer_down(&event).unwrap(), RouteOutcome::Ignored);
    }

    #[test]
    fn test_drawing_click_captures_point() {
        let mut editor = Editor::new();
        editor.set_mode(Mode::Drawing);
        let event = PointerEvent::primary(fixtures::ray_above(1.0, 1.0));
        assert_eq!(
            editor.pointer_down(&event).unwrap(),
            RouteOutcome::PointCaptured
        );
        assert_eq!(editor.boundary_point_count(), 1);
    }

    #[test]
    fn test_drawing_click_off_plane_ignored() {
        let mut editor = Editor::new();
        editor.set_mode(Mode::Drawing);
        let event = PointerEvent::primary(fixtures::ray_above(100.0, 0.0));
        assert_eq!(editor.pointer_down(&event).unwrap(), RouteOutcome::Ignored);
        assert_eq!(editor.boundary_point_count(), 0);
    }

    #[test]
    fn test_close_with_too_few_points_rejected() {
        let mut editor = Editor::new();
        editor.set_mode(Mode::Drawing);
        for i in 0..2 {
            let event = PointerEvent::primary(fixtures::ray_above(i as f32, 0.0));
            editor.pointer_down(&event).unwrap();
        }
        let event = PointerEvent::secondary(fixtures::ray_above(0.0, 0.0));
        assert_eq!(
            editor.pointer_down(&event).unwrap(),
            RouteOutcome::BoundaryRejected { point_count: 2 }
        );
        // Session survives the rejection
        assert_eq!(editor.boundary_point_count(), 2);
        assert_eq!(editor.mode(), Mode::Drawing);
    }

    #[test]
    fn test_leaving_drawing_clears_markers() {
        let mut editor = Editor::new();
        editor.set_mode(Mode::Drawing);
        let event = PointerEvent::primary(fixtures::ray_above(1.0, 1.0));
        editor.pointer_down(&event).unwrap();
        editor.set_mode(Mode::Idle);
        assert_eq!(editor.boundary_point_count(), 0);
        assert_eq!(editor.scene().node_count(), 1);
    }

    #[test]
    fn test_secondary_button_ignored_outside_drawing() {
        let mut editor = Editor::new();
        editor.set_mode(Mode::Moving);
        let event = PointerEvent::secondary(fixtures::ray_above(0.0, 0.0));
        assert_eq!(editor.pointer_down(&event).unwrap(), RouteOutcome::Ignored);
    }

    #[test]
    fn test_move_click_without_solid_ignored() {
        let mut editor = Editor::new();
        editor.set_mode(Mode::Moving);
        let event = PointerEvent::primary(fixtures::ray_above(0.0, 0.0));
        assert_eq!(editor.pointer_down(&event).unwrap(), RouteOutcome::Ignored);
    }
}
