// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A (possibly non-axis-aligned) hexahedral mesh element.

use super::foundamental::*;

/// A right hexahedron, as eight vertices in the conventional
/// bottom-then-top, counter-clockwise-from-origin-corner order:
/// `0..4` form the bottom face, `4..8` the top face, with `i+4`
/// directly above `i`.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Hex {
    pub vertices: [Point3f; 8],
}

impl Hex {
    /// Constructs a hex from its eight vertices.
    #[inline]
    pub fn new(vertices: [Point3f; 8]) -> Hex {
        Hex { vertices }
    }

    /// Constructs an axis-aligned hex spanning `[lo, hi]` in every axis.
    pub fn aligned(lo: Point3f, hi: Point3f) -> Hex {
        Hex::new([
            Point3f::new(lo.x, lo.y, lo.z),
            Point3f::new(hi.x, lo.y, lo.z),
            Point3f::new(hi.x, hi.y, lo.z),
            Point3f::new(lo.x, hi.y, lo.z),
            Point3f::new(lo.x, lo.y, hi.z),
            Point3f::new(hi.x, lo.y, hi.z),
            Point3f::new(hi.x, hi.y, hi.z),
            Point3f::new(lo.x, hi.y, hi.z),
        ])
    }

    /// Samples a point uniformly within the hex from three uniforms
    /// `u, v, w` in `[0, 1)`, via trilinear interpolation of the eight
    /// vertices. For an axis-aligned hex this reduces exactly to
    /// `v0 + u*dx + v*dy + w*dz`.
    pub fn sample_uniform(&self, u: Float, v: Float, w: Float) -> Point3f {
        let p = &self.vertices;
        let iu = 1.0 - u;
        let iv = 1.0 - v;
        let iw = 1.0 - w;
        let weighted = |i: usize, weight: Float| p[i].to_vec() * weight;
        let sum = weighted(0, iu * iv * iw)
            + weighted(1, u * iv * iw)
            + weighted(2, u * v * iw)
            + weighted(3, iu * v * iw)
            + weighted(4, iu * iv * w)
            + weighted(5, u * iv * w)
            + weighted(6, u * v * w)
            + weighted(7, iu * v * w);
        Point3f::from_vec(sum)
    }

    /// `true` if the hex is a right box aligned with the coordinate axes,
    /// within a small relative tolerance.
    pub fn is_axis_aligned(&self) -> bool {
        let p = &self.vertices;
        let eps = super::float::epsilon() * 64.0;
        let close = |a: Float, b: Float| (a - b).abs() <= eps * (1.0 + a.abs().max(b.abs()));
        close(p[0].y, p[1].y) && close(p[0].z, p[1].z)
            && close(p[1].x, p[2].x) && close(p[1].z, p[2].z)
            && close(p[2].y, p[3].y) && close(p[3].x, p[0].x)
            && close(p[0].x, p[4].x) && close(p[0].y, p[4].y)
            && close(p[4].z, p[5].z) && close(p[4].z, p[6].z) && close(p[4].z, p[7].z)
    }

    /// Volume of the hex. Uses the closed-form product of side lengths
    /// for the axis-aligned case, and a centroid-fan decomposition into
    /// twelve sub-tetrahedra otherwise.
    pub fn volume(&self) -> Float {
        if self.is_axis_aligned() {
            let p = &self.vertices;
            (p[1].x - p[0].x).abs() * (p[3].y - p[0].y).abs() * (p[4].z - p[0].z).abs()
        } else {
            self.volume_by_decomposition()
        }
    }

    fn volume_by_decomposition(&self) -> Float {
        const FACES: [[usize; 4]; 6] = [
            [0, 1, 2, 3],
            [4, 5, 6, 7],
            [0, 1, 5, 4],
            [1, 2, 6, 5],
            [2, 3, 7, 6],
            [3, 0, 4, 7],
        ];
        let p = &self.vertices;
        let centroid = {
            let mut acc = Vector3f::new(0.0, 0.0, 0.0);
            for v in p.iter() {
                acc += v.to_vec();
            }
            Point3f::from_vec(acc / 8.0)
        };
        let mut volume = 0.0 as Float;
        for face in FACES.iter() {
            volume += super::tet::tet_volume(centroid, p[face[0]], p[face[1]], p[face[2]]);
            volume += super::tet::tet_volume(centroid, p[face[0]], p[face[2]], p[face[3]]);
        }
        volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cube_volume_is_one() {
        let hex = Hex::aligned(Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 1.0, 1.0));
        assert!((hex.volume() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn aligned_sample_matches_axis_formula() {
        let hex = Hex::aligned(Point3f::new(0.0, 0.0, 0.0), Point3f::new(2.0, 3.0, 4.0));
        let p = hex.sample_uniform(0.25, 0.5, 0.75);
        assert!((p.x - 0.5).abs() < 1e-12);
        assert!((p.y - 1.5).abs() < 1e-12);
        assert!((p.z - 3.0).abs() < 1e-12);
    }

    #[test]
    fn detects_axis_aligned() {
        let hex = Hex::aligned(Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 1.0, 1.0));
        assert!(hex.is_axis_aligned());
    }

    #[test]
    fn general_hex_volume_matches_aligned_box() {
        // A sheared copy of the unit cube where only the top face is offset
        // in x; the centroid-fan decomposition must still reproduce the
        // right-box volume when the shear is zero.
        let hex = Hex::aligned(Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 1.0, 1.0));
        assert!((hex.volume_by_decomposition() - 1.0).abs() < 1e-9);
    }
}
