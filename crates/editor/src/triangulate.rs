//! Ear-clipping triangulation of simple polygons.
//!
//! Handles simple, non-self-intersecting polygons in either winding.
//! Self-intersecting input is undefined behavior (validation is a
//! non-goal); fully degenerate input is rejected with an error.

/// Signed area of a 2D polygon (positive for counter-clockwise winding)
pub fn signed_area(points: &[[f64; 2]]) -> f64 {
    let n = points.len();
    let mut sum = 0.0;
    for i in 0..n {
        let [x0, y0] = points[i];
        let [x1, y1] = points[(i + 1) % n];
        sum += x0 * y1 - x1 * y0;
    }
    sum * 0.5
}

/// Absolute area of a 2D polygon
pub fn polygon_area(points: &[[f64; 2]]) -> f64 {
    signed_area(points).abs()
}

fn cross2(o: [f64; 2], a: [f64; 2], b: [f64; 2]) -> f64 {
    (a[0] - o[0]) * (b[1] - o[1]) - (a[1] - o[1]) * (b[0] - o[0])
}

/// Strict interior test (boundary points count as outside, so coincident
/// corners of adjacent ears do not block clipping)
fn point_in_triangle(p: [f64; 2], a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> bool {
    let d1 = cross2(a, b, p);
    let d2 = cross2(b, c, p);
    let d3 = cross2(c, a, p);
    (d1 > 0.0 && d2 > 0.0 && d3 > 0.0) || (d1 < 0.0 && d2 < 0.0 && d3 < 0.0)
}

/// Triangulate a simple polygon by ear clipping.
///
/// Returns triangle indices into `points` (3 per triangle, exactly
/// `n - 2` triangles for a simple polygon of `n` vertices).
pub fn triangulate(points: &[[f64; 2]]) -> Result<Vec<u32>, String> {
    let n = points.len();
    if n < 3 {
        return Err(format!("need at least 3 points to triangulate, got {n}"));
    }
    let area = signed_area(points);
    if area.abs() < 1e-12 {
        return Err("polygon is degenerate (zero area)".to_string());
    }
    if n == 3 {
        return Ok(vec![0, 1, 2]);
    }
    // Normalize the ear test to the polygon's winding
    let orient = area.signum();

    let mut remaining: Vec<usize> = (0..n).collect();
    let mut indices: Vec<u32> = Vec::with_capacity((n - 2) * 3);

    while remaining.len() > 3 {
        let m = remaining.len();
        let mut clipped = false;

        for k in 0..m {
            let ip = remaining[(k + m - 1) % m];
            let ic = remaining[k];
            let inx = remaining[(k + 1) % m];

            let a = points[ip];
            let b = points[ic];
            let c = points[inx];

            // Reflex corner — cannot be an ear
            if cross2(a, b, c) * orient < 0.0 {
                continue;
            }

            // Any other remaining vertex strictly inside blocks the ear
            let blocked = remaining.iter().any(|&j| {
                j != ip && j != ic && j != inx && point_in_triangle(points[j], a, b, c)
            });
            if blocked {
                continue;
            }

            indices.extend_from_slice(&[ip as u32, ic as u32, inx as u32]);
            remaining.remove(k);
            clipped = true;
            break;
        }

        if !clipped {
            return Err(
                "no ear found; polygon may be self-intersecting or degenerate".to_string(),
            );
        }
    }

    indices.extend_from_slice(&[
        remaining[0] as u32,
        remaining[1] as u32,
        remaining[2] as u32,
    ]);
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<[f64; 2]> {
        vec![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]
    }

    fn l_shape() -> Vec<[f64; 2]> {
        vec![
            [0.0, 0.0],
            [2.0, 0.0],
            [2.0, 1.0],
            [1.0, 1.0],
            [1.0, 2.0],
            [0.0, 2.0],
        ]
    }

    /// Sum of the areas of the output triangles
    fn triangulated_area(points: &[[f64; 2]], indices: &[u32]) -> f64 {
        indices
            .chunks(3)
            .map(|t| {
                let a = points[t[0] as usize];
                let b = points[t[1] as usize];
                let c = points[t[2] as usize];
                cross2(a, b, c).abs() * 0.5
            })
            .sum()
    }

    #[test]
    fn test_triangle_fast_path() {
        let indices = triangulate(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]).unwrap();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_square_two_triangles() {
        let pts = square();
        let indices = triangulate(&pts).unwrap();
        assert_eq!(indices.len(), 6);
        assert!((triangulated_area(&pts, &indices) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_clockwise_square() {
        let mut pts = square();
        pts.reverse();
        let indices = triangulate(&pts).unwrap();
        assert_eq!(indices.len(), 6);
        assert!((triangulated_area(&pts, &indices) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_concave_l_shape() {
        let pts = l_shape();
        let indices = triangulate(&pts).unwrap();
        // n - 2 triangles
        assert_eq!(indices.len() / 3, pts.len() - 2);
        // Covers the polygon area exactly once
        assert!((triangulated_area(&pts, &indices) - polygon_area(&pts)).abs() < 1e-9);
    }

    #[test]
    fn test_concave_arrow() {
        let pts = vec![
            [0.0, 0.0],
            [4.0, 0.0],
            [2.0, 1.0], // reflex vertex
            [4.0, 3.0],
            [0.0, 3.0],
        ];
        let indices = triangulate(&pts).unwrap();
        assert_eq!(indices.len() / 3, 3);
        assert!((triangulated_area(&pts, &indices) - polygon_area(&pts)).abs() < 1e-9);
    }

    #[test]
    fn test_too_few_points() {
        assert!(triangulate(&[[0.0, 0.0], [1.0, 0.0]]).is_err());
        assert!(triangulate(&[]).is_err());
    }

    #[test]
    fn test_degenerate_collinear() {
        let result = triangulate(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 0.0]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_signed_area_winding() {
        assert!(signed_area(&square()) > 0.0);
        let mut cw = square();
        cw.reverse();
        assert!(signed_area(&cw) < 0.0);
    }
}
