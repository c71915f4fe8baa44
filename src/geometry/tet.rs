// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A tetrahedral mesh element.

use super::foundamental::*;

/// A tetrahedron, as four vertices.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Tet {
    pub vertices: [Point3f; 4],
}

impl Tet {
    #[inline]
    pub fn new(vertices: [Point3f; 4]) -> Tet {
        Tet { vertices }
    }

    /// Volume of the tet, `|det([v1-v0, v2-v0, v3-v0])| / 6`.
    #[inline]
    pub fn volume(&self) -> Float {
        let p = &self.vertices;
        tet_volume(p[0], p[1], p[2], p[3])
    }

    /// Samples a point uniformly within the tet from three uniforms
    /// `u1, u2, u3` in `[0, 1)`, using the folding transform of Shao
    /// & Badler so that the result is barycentric-uniform.
    pub fn sample_uniform(&self, u1: Float, u2: Float, u3: Float) -> Point3f {
        let (b0, b1, b2, b3) = barycentric_uniform(u1, u2, u3);
        let p = &self.vertices;
        Point3f::from_vec(
            p[0].to_vec() * b0 + p[1].to_vec() * b1 + p[2].to_vec() * b2 + p[3].to_vec() * b3,
        )
    }

    /// Tests whether `point` lies within the (closed) tet, by comparing
    /// the sign of the tet's own signed volume against the signed
    /// volumes of the three tets obtained by replacing one vertex with
    /// `point` in turn: `point` is inside iff all four determinants
    /// share a sign (boundary points give a zero and are accepted).
    pub fn contains_point(&self, point: Point3f) -> bool {
        let p = &self.vertices;
        let d0 = signed_volume6(p[0], p[1], p[2], p[3]);
        let d1 = signed_volume6(point, p[1], p[2], p[3]);
        let d2 = signed_volume6(p[0], point, p[2], p[3]);
        let d3 = signed_volume6(p[0], p[1], point, p[3]);
        let d4 = signed_volume6(p[0], p[1], p[2], point);
        let dets = [d0, d1, d2, d3, d4];
        dets.iter().all(|&d| d >= 0.0) || dets.iter().all(|&d| d <= 0.0)
    }
}

/// Six times the signed volume of the tet `(a, b, c, d)`: the
/// determinant of the edge vectors from `a`.
#[inline]
fn signed_volume6(a: Point3f, b: Point3f, c: Point3f, d: Point3f) -> Float {
    let e1 = b - a;
    let e2 = c - a;
    let e3 = d - a;
    e1.dot(e2.cross(e3))
}

/// Unsigned volume of the tet spanned by four points.
#[inline]
pub fn tet_volume(a: Point3f, b: Point3f, c: Point3f, d: Point3f) -> Float {
    signed_volume6(a, b, c, d).abs() / 6.0
}

/// Folds three independent uniforms into a uniform sample over the unit
/// simplex, returned as barycentric weights `(1-u1-u2-u3, u1, u2, u3)`
/// after folding, per Shao & Badler (1996).
fn barycentric_uniform(mut u1: Float, mut u2: Float, mut u3: Float) -> (Float, Float, Float, Float) {
    if u1 + u2 > 1.0 {
        u1 = 1.0 - u1;
        u2 = 1.0 - u2;
    }
    if u2 + u3 > 1.0 {
        let t = u3;
        u3 = 1.0 - u1 - u2;
        u2 = 1.0 - t;
    } else if u1 + u2 + u3 > 1.0 {
        let t = u3;
        u3 = u1 + u2 + u3 - 1.0;
        u1 = 1.0 - u2 - t;
    }
    (1.0 - u1 - u2 - u3, u1, u2, u3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_tet() -> Tet {
        Tet::new([
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
            Point3f::new(0.0, 0.0, 1.0),
        ])
    }

    #[test]
    fn unit_tet_volume_is_one_sixth() {
        assert!((unit_tet().volume() - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn centroid_is_contained() {
        let tet = unit_tet();
        let centroid = Point3f::new(0.25, 0.25, 0.25);
        assert!(tet.contains_point(centroid));
    }

    #[test]
    fn far_point_is_not_contained() {
        let tet = unit_tet();
        assert!(!tet.contains_point(Point3f::new(2.0, 2.0, 2.0)));
    }

    #[test]
    fn sample_uniform_stays_inside() {
        let tet = unit_tet();
        for &(u1, u2, u3) in &[(0.1, 0.2, 0.3), (0.9, 0.9, 0.9), (0.5, 0.5, 0.5), (0.0, 0.0, 0.0)] {
            let p = tet.sample_uniform(u1, u2, u3);
            assert!(tet.contains_point(p));
        }
    }

    #[test]
    fn barycentric_weights_sum_to_one() {
        for &(u1, u2, u3) in &[(0.1, 0.2, 0.3), (0.9, 0.9, 0.9), (0.5, 0.5, 0.5)] {
            let (b0, b1, b2, b3) = barycentric_uniform(u1, u2, u3);
            assert!((b0 + b1 + b2 + b3 - 1.0).abs() < 1e-12);
            assert!(b0 >= -1e-12 && b1 >= -1e-12 && b2 >= -1e-12 && b3 >= -1e-12);
        }
    }
}
