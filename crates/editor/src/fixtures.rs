//! Shared factories for tests: boundary loops on the capture plane and
//! pick rays.

use glam::Vec3;

use crate::picking::Ray;

/// 2x2 square centered on the origin, counter-clockwise seen from above
pub fn square_boundary() -> Vec<Vec3> {
    vec![
        Vec3::new(-1.0, 0.0, -1.0),
        Vec3::new(1.0, 0.0, -1.0),
        Vec3::new(1.0, 0.0, 1.0),
        Vec3::new(-1.0, 0.0, 1.0),
    ]
}

/// Axis-aligned rectangle centered on the origin
pub fn rectangle_boundary(width: f32, depth: f32) -> Vec<Vec3> {
    let hw = width * 0.5;
    let hd = depth * 0.5;
    vec![
        Vec3::new(-hw, 0.0, -hd),
        Vec3::new(hw, 0.0, -hd),
        Vec3::new(hw, 0.0, hd),
        Vec3::new(-hw, 0.0, hd),
    ]
}

/// Concave L-shaped loop of 6 points
pub fn l_shape_boundary() -> Vec<Vec3> {
    vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 1.0),
        Vec3::new(1.0, 0.0, 1.0),
        Vec3::new(1.0, 0.0, 2.0),
        Vec3::new(0.0, 0.0, 2.0),
    ]
}

/// Straight-down ray from well above the ground point (x, z)
pub fn ray_above(x: f32, z: f32) -> Ray {
    Ray::new(Vec3::new(x, 10.0, z), Vec3::NEG_Y)
}

/// Ray from `origin` aimed at `target`
pub fn ray_toward(origin: Vec3, target: Vec3) -> Ray {
    Ray::new(origin, target - origin)
}
