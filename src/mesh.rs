// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Read-only access to a mesh's elements, volumes, and per-element tags.
//!
//! The sampler never reads a mesh file itself; a host framework
//! implements [`MeshView`] over whatever mesh library and file format it
//! already uses. [`VecMesh`] is a plain in-memory implementation used by
//! the test suite and as a reference adapter.

use crate::geometry::{Hex, Point3f, Tet};

/// Whether a mesh element is a hexahedron or a tetrahedron.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ElementKind {
    Hex,
    Tet,
}

/// The geometry of a single mesh element.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum ElementGeometry {
    Hex(Hex),
    Tet(Tet),
}

impl ElementGeometry {
    #[inline]
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementGeometry::Hex(_) => ElementKind::Hex,
            ElementGeometry::Tet(_) => ElementKind::Tet,
        }
    }

    pub fn volume(&self) -> crate::geometry::Float {
        match self {
            ElementGeometry::Hex(h) => h.volume(),
            ElementGeometry::Tet(t) => t.volume(),
        }
    }

    /// Samples a point uniformly within the element from three
    /// uniforms in `[0, 1)`.
    pub fn sample_uniform(&self, u: crate::geometry::Float, v: crate::geometry::Float, w: crate::geometry::Float) -> Point3f {
        match self {
            ElementGeometry::Hex(h) => h.sample_uniform(u, v, w),
            ElementGeometry::Tet(t) => t.sample_uniform(u, v, w),
        }
    }
}

/// One sub-voxel partition entry for a mesh element: a physical cell ID,
/// the fraction of the element's volume it occupies, and an
/// informational relative error carried through from the source mesh.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct CellFrac {
    pub cell_id: i64,
    pub vol_frac: crate::geometry::Float,
    pub rel_error: crate::geometry::Float,
}

/// Read-only access to a mesh's elements and their tags.
///
/// Implementations must keep element ordering stable for the lifetime
/// of the sampler built on them: the same index must always refer to
/// the same element, and tag arrays must not change underneath a live
/// [`crate::sampler::Sampler`].
pub trait MeshView {
    /// Number of elements in the mesh.
    fn num_elements(&self) -> usize;

    /// The geometry (vertices and kind) of element `i`.
    fn geometry(&self, i: usize) -> ElementGeometry;

    /// Volume of element `i`. Implementations may cache this; the
    /// default recomputes it from `geometry`.
    fn volume(&self, i: usize) -> crate::geometry::Float {
        self.geometry(i).volume()
    }

    /// The source-density tag for element `i`: `[N_g]` entries with no
    /// sub-voxels, or `[S_max * N_g]` entries laid out sub-voxel-major
    /// when sub-voxels are present.
    fn src(&self, i: usize) -> &[crate::geometry::Float];

    /// The bias-density tag for element `i`, if one was supplied:
    /// either `[N_g]` (group-resolved) or `[1]` (spatial-only, applied
    /// to every group).
    fn bias(&self, i: usize) -> Option<&[crate::geometry::Float]> {
        let _ = i;
        None
    }

    /// Sub-voxel partition entries for element `i`, in index order.
    /// Empty when the element has no sub-voxel tags (the caller treats
    /// this the same as a single implicit `vol_frac = 1.0` entry with
    /// no emitted cell ID).
    fn cell_fracs(&self, i: usize) -> &[CellFrac] {
        let _ = i;
        &[]
    }
}

/// A plain in-memory [`MeshView`], for tests and as a minimal reference
/// adapter when no mesh library is otherwise in play.
#[derive(Clone, Debug, Default)]
pub struct VecMesh {
    geometries: Vec<ElementGeometry>,
    src: Vec<Vec<crate::geometry::Float>>,
    bias: Vec<Option<Vec<crate::geometry::Float>>>,
    cell_fracs: Vec<Vec<CellFrac>>,
}

impl VecMesh {
    pub fn new() -> VecMesh {
        VecMesh::default()
    }

    /// Appends an element with no bias tag and no sub-voxels.
    pub fn push_element(&mut self, geometry: ElementGeometry, src: Vec<crate::geometry::Float>) -> usize {
        self.push_element_full(geometry, src, None, Vec::new())
    }

    /// Appends an element with a full complement of tags.
    pub fn push_element_full(
        &mut self,
        geometry: ElementGeometry,
        src: Vec<crate::geometry::Float>,
        bias: Option<Vec<crate::geometry::Float>>,
        cell_fracs: Vec<CellFrac>,
    ) -> usize {
        let idx = self.geometries.len();
        self.geometries.push(geometry);
        self.src.push(src);
        self.bias.push(bias);
        self.cell_fracs.push(cell_fracs);
        idx
    }
}

impl MeshView for VecMesh {
    fn num_elements(&self) -> usize {
        self.geometries.len()
    }

    fn geometry(&self, i: usize) -> ElementGeometry {
        self.geometries[i]
    }

    fn src(&self, i: usize) -> &[crate::geometry::Float] {
        &self.src[i]
    }

    fn bias(&self, i: usize) -> Option<&[crate::geometry::Float]> {
        self.bias[i].as_deref()
    }

    fn cell_fracs(&self, i: usize) -> &[CellFrac] {
        &self.cell_fracs[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point3f;

    #[test]
    fn vec_mesh_round_trips_tags() {
        let mut mesh = VecMesh::new();
        let hex = Hex::aligned(Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 1.0, 1.0));
        mesh.push_element(ElementGeometry::Hex(hex), vec![1.0]);
        assert_eq!(mesh.num_elements(), 1);
        assert_eq!(mesh.src(0), &[1.0]);
        assert!(mesh.bias(0).is_none());
        assert!(mesh.cell_fracs(0).is_empty());
        assert!((mesh.volume(0) - 1.0).abs() < 1e-12);
    }
}
