use crystal::prelude::*;
use log::warn;

use crate::scene::mesh::{Face, Mesh};

/// Returned for triangles whose edges are collinear.
pub const FALLBACK_NORMAL: Vec3<f32> = Vec3::new(0.0, 0.0, 1.0);

/// Unit normal of `face` following its winding (right-hand rule).
///
/// Returns `None` only if a corner does not resolve within `mesh`.
/// Degenerate triangles yield [`FALLBACK_NORMAL`].
pub fn face_normal(mesh: &Mesh, face: &Face) -> Option<Vec3<f32>> {
    let [p0, p1, p2] = mesh.positions(face)?;
    Some(triangle_normal(&p0, &p1, &p2))
}

pub fn triangle_normal(p0: &Vec3<f32>, p1: &Vec3<f32>, p2: &Vec3<f32>) -> Vec3<f32> {
    // edges and their cross product are brought to a largest component of 1
    // so the squared norm neither overflows nor underflows
    let normal = rescaled(*p1 - *p0)
        .zip(rescaled(*p2 - *p0))
        .and_then(|(edge1, edge2)| rescaled(edge1.cross_product(&edge2)))
        .and_then(|normal| Unit::try_new_normalize(normal, 0.0));

    match normal {
        Some(normal) => normal.into_inner(),
        None => {
            warn!(
                "Degenerate triangle {:?} {:?} {:?}, using fallback normal",
                p0.to_array(),
                p1.to_array(),
                p2.to_array()
            );
            FALLBACK_NORMAL
        }
    }
}

// `None` for zero or non-finite vectors
fn rescaled(v: Vec3<f32>) -> Option<Vec3<f32>> {
    let max = v.x().abs().max(v.y().abs()).max(v.z().abs());
    if max > 0.0 && max.is_finite() {
        Some(v / max)
    } else {
        None
    }
}

/// Arithmetic mean of the three corner positions.
pub fn face_center(mesh: &Mesh, face: &Face) -> Option<Vec3<f32>> {
    let [p0, p1, p2] = mesh.positions(face)?;
    Some(triangle_center(&p0, &p1, &p2))
}

pub fn triangle_center(p0: &Vec3<f32>, p1: &Vec3<f32>, p2: &Vec3<f32>) -> Vec3<f32> {
    (*p0 + *p1 + *p2) / 3.0
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn mesh(vertices: Vec<Vec3<f32>>) -> Mesh {
        Mesh::new(vertices, Vec::new(), vec![Face::from_vertices([0, 1, 2])]).unwrap()
    }

    fn assert_vec_eq(is: Vec3<f32>, should: Vec3<f32>) {
        for (a, b) in is.to_array().iter().zip(should.to_array().iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_face_normal_is_unit_length() {
        let triangles = [
            [Vec3::new(0.3, -1.0, 2.0), Vec3::new(4.0, 0.5, -1.0), Vec3::new(-2.0, 3.0, 0.0)],
            [Vec3::new(10.0, 10.0, 10.0), Vec3::new(10.1, 10.0, 10.0), Vec3::new(10.0, 10.0, 10.2)],
            [Vec3::new(-5.0, 0.0, 0.0), Vec3::new(0.0, 7.0, 0.0), Vec3::new(0.0, 0.0, -9.0)],
        ];

        for triangle in triangles {
            let m = mesh(triangle.to_vec());
            let normal = face_normal(&m, &m.faces()[0]).unwrap();

            assert_abs_diff_eq!(normal.norm(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_face_normal_translation_invariant() {
        let triangle = [Vec3::new(0.3, -1.0, 2.0), Vec3::new(4.0, 0.5, -1.0), Vec3::new(-2.0, 3.0, 0.0)];
        let offset = Vec3::new(12.5, -3.0, 7.25);

        let a = triangle_normal(&triangle[0], &triangle[1], &triangle[2]);
        let b = triangle_normal(
            &(triangle[0] + offset),
            &(triangle[1] + offset),
            &(triangle[2] + offset),
        );

        assert_vec_eq(a, b);
    }

    #[test]
    fn test_face_normal_flips_with_winding() {
        let m = mesh(vec![Vec3::new(0.3, -1.0, 2.0), Vec3::new(4.0, 0.5, -1.0), Vec3::new(-2.0, 3.0, 0.0)]);
        let face = m.faces()[0];

        let forward = face_normal(&m, &face).unwrap();
        let backward = face_normal(&m, &face.reversed()).unwrap();

        assert_vec_eq(forward, -backward);
    }

    #[test]
    fn test_face_normal_winding_sign() {
        let ccw = triangle_normal(&Vec3::zero(), &Vec3::unit_x(), &Vec3::unit_y());
        let cw = triangle_normal(&Vec3::zero(), &Vec3::unit_y(), &Vec3::unit_x());

        assert_eq!(ccw, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(cw, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_face_normal_at_extreme_scales() {
        for side in [3e-11f32, 1e-19, 1e19, 1e20, 1e30] {
            let normal = triangle_normal(
                &Vec3::zero(),
                &Vec3::new(side, 0.0, 0.0),
                &Vec3::new(0.0, side, 0.0),
            );

            assert_abs_diff_eq!(normal.norm(), 1.0, epsilon = 1e-5);
            assert_vec_eq(normal, Vec3::new(0.0, 0.0, 1.0));
        }
    }

    #[test]
    fn test_tiny_skewed_triangle_is_unit_length() {
        let normal = triangle_normal(
            &Vec3::new(1e-12, 2e-12, -1e-12),
            &Vec3::new(4e-12, -1e-12, 3e-12),
            &Vec3::new(-2e-12, 5e-12, 1e-12),
        );

        assert_abs_diff_eq!(normal.norm(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_degenerate_uses_fallback() {
        let collinear = triangle_normal(
            &Vec3::new(0.0, 0.0, 0.0),
            &Vec3::new(1.0, 1.0, 1.0),
            &Vec3::new(2.0, 2.0, 2.0),
        );
        let point = triangle_normal(&Vec3::unit_x(), &Vec3::unit_x(), &Vec3::unit_x());

        assert_eq!(collinear, FALLBACK_NORMAL);
        assert_eq!(point, FALLBACK_NORMAL);
    }

    #[test]
    fn test_face_center() {
        let m = mesh(vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0), Vec3::new(0.0, 6.0, 3.0)]);

        assert_vec_eq(face_center(&m, &m.faces()[0]).unwrap(), Vec3::new(1.0, 2.0, 1.0));
    }

    #[test]
    fn test_unresolved_face() {
        let m = mesh(vec![Vec3::zero(), Vec3::unit_x(), Vec3::unit_y()]);
        let face = Face::from_vertices([0, 1, 5]);

        assert!(face_normal(&m, &face).is_none());
        assert!(face_center(&m, &face).is_none());
    }
}
