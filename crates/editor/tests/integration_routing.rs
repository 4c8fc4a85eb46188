//! Routing matrix: events that must be ignored, and mode exclusivity of
//! the side effects.

use glam::Vec3;
use polyform_editor::editor::RouteOutcome;
use polyform_editor::harness::TestHarness;
use shared::Mode;

#[test]
fn test_extrude_click_without_polygon_ignored() {
    let mut h = TestHarness::new();
    h.editor.toggle_extruding();
    assert_eq!(h.click(0.0, 0.0), RouteOutcome::Ignored);
    assert!(h.editor.solid_id().is_none());
}

#[test]
fn test_extrude_click_missing_polygon_ignored() {
    let mut h = TestHarness::new();
    h.draw_square();
    h.editor.toggle_extruding();
    // Click outside the polygon: hits the ground, not the polygon
    assert_eq!(h.click(4.0, 4.0), RouteOutcome::Ignored);
    assert!(h.editor.polygon_id().is_some());
    assert!(h.editor.solid_id().is_none());
}

#[test]
fn test_close_with_no_points_rejected() {
    let mut h = TestHarness::new();
    h.editor.toggle_drawing();
    assert_eq!(
        h.right_click(),
        RouteOutcome::BoundaryRejected { point_count: 0 }
    );
    assert_eq!(h.editor.mode(), Mode::Drawing);
}

#[test]
fn test_drawing_ignores_clicks_on_solid() {
    let mut h = TestHarness::new();
    h.draw_square();
    h.extrude();

    // A click over the solid picks the solid, not the ground plane,
    // so no boundary point is captured
    h.editor.toggle_drawing();
    assert_eq!(h.click(0.0, 0.0), RouteOutcome::Ignored);
    assert_eq!(h.editor.boundary_point_count(), 0);
}

#[test]
fn test_solid_click_outside_editing_mode_does_nothing() {
    let mut h = TestHarness::new();
    h.draw_square();
    h.extrude();

    // Idle: clicking the solid neither attaches a drag nor starts editing
    assert_eq!(h.click(0.0, 0.0), RouteOutcome::Ignored);
    assert!(h.editor.edit_session().is_none());
    let solid = h.editor.solid_id().unwrap();
    assert!(!h.editor.scene().has_drag(solid));
}

#[test]
fn test_drag_attach_exclusive_to_moving() {
    let mut h = TestHarness::new();
    h.draw_square();
    h.extrude();
    let solid = h.editor.solid_id().unwrap().clone();

    h.editor.toggle_vertex_editing();
    h.click(0.0, 0.0);
    assert!(
        !h.editor.scene().has_drag(&solid),
        "editing mode must not attach the move drag"
    );
}

#[test]
fn test_drag_delta_without_target_is_inert() {
    let mut h = TestHarness::new();
    h.draw_square();
    h.extrude();
    let solid = h.editor.solid_id().unwrap().clone();
    let before = h.solid_positions().unwrap();

    // No drag attached, no editing session
    h.drag_once(Vec3::new(1.0, 1.0, 1.0));

    let t = h.editor.scene().world_transform(&solid).unwrap();
    assert_eq!(t.position, [0.0, 0.0, 0.0]);
    assert_eq!(h.solid_positions().unwrap(), before);
}

#[test]
fn test_leaving_moving_detaches_drag() {
    let mut h = TestHarness::new();
    h.draw_square();
    h.extrude();
    let solid = h.editor.solid_id().unwrap().clone();

    h.editor.toggle_moving();
    h.click(0.0, 0.0);
    assert!(h.editor.scene().has_drag(&solid));

    h.editor.toggle_moving();
    assert!(!h.editor.scene().has_drag(&solid));

    // Deltas after the mode ends leave the solid where it was
    h.drag_once(Vec3::new(2.0, 0.0, 0.0));
    let t = h.editor.scene().world_transform(&solid).unwrap();
    assert_eq!(t.position, [0.0, 0.0, 0.0]);
}

#[test]
fn test_middle_button_always_ignored() {
    let mut h = TestHarness::new();
    h.editor.toggle_drawing();
    let event = polyform_editor::editor::PointerEvent {
        button: shared::PointerButton::Middle,
        ray: h.ray_above(0.0, 0.0),
    };
    assert_eq!(
        h.editor.pointer_down(&event).unwrap(),
        RouteOutcome::Ignored
    );
    assert_eq!(h.editor.boundary_point_count(), 0);
}

#[test]
fn test_mode_change_midway_tears_down_sketch() {
    let mut h = TestHarness::new();
    h.editor.toggle_drawing();
    h.click(-1.0, -1.0);
    h.click(1.0, -1.0);
    h.click(1.0, 1.0);

    h.editor.toggle_moving();
    assert_eq!(h.marker_count(), 0);
    assert_eq!(h.editor.boundary_point_count(), 0);

    // Back in Drawing the session starts from scratch
    h.editor.toggle_drawing();
    assert_eq!(
        h.right_click(),
        RouteOutcome::BoundaryRejected { point_count: 0 }
    );
}

#[test]
fn test_handle_grab_requires_editing_mode() {
    let mut h = TestHarness::new();
    h.draw_square();
    h.extrude();
    h.begin_vertex_edit();

    let ray = h.ray_at_handle(0).unwrap();
    h.editor.set_mode(Mode::Idle);
    // Leaving editing disposed the handles, so the ray hits nothing useful
    assert_eq!(h.click_ray(ray), RouteOutcome::Ignored);
}
