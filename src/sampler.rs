// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The public sampler: folds a mesh into joint-bin PDFs at
//! construction, then births particles in O(1) per call.

use std::convert::TryFrom;

use crate::error::{Result, SamplerError};
use crate::geometry::Float;
use crate::mesh::MeshView;
use crate::pdf::{Mode, PDFBuilder, PdfTables};

/// Which tag names to look for on the mesh. Only the names relevant
/// to the selected [`Mode`] are required; the rest are ignored.
///
/// Deserializable so a host can load it straight out of a run's
/// configuration file alongside `e_bounds` and `mode`.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct TagNames {
    pub src_tag_name: Option<String>,
    pub bias_tag_name: Option<String>,
    pub cell_number_tag_name: Option<String>,
    pub cell_fracs_tag_name: Option<String>,
}

impl TagNames {
    /// A `TagNames` with only `src_tag_name` set, the minimum any mode
    /// requires.
    pub fn with_src(src_tag_name: impl Into<String>) -> TagNames {
        TagNames {
            src_tag_name: Some(src_tag_name.into()),
            ..TagNames::default()
        }
    }

    fn validate(&self, mode: Mode) -> Result<()> {
        if self.src_tag_name.is_none() {
            return Err(SamplerError::MissingTag("src_tag_name"));
        }
        if mode.requires_bias() && self.bias_tag_name.is_none() {
            return Err(SamplerError::MissingTag("bias_tag_name"));
        }
        if mode.uses_sub_voxels() {
            if self.cell_number_tag_name.is_none() {
                return Err(SamplerError::MissingTag("cell_number_tag_name"));
            }
            if self.cell_fracs_tag_name.is_none() {
                return Err(SamplerError::MissingTag("cell_fracs_tag_name"));
            }
        }
        Ok(())
    }
}

/// One sampled particle: position, energy, statistical weight, and
/// (in sub-voxel modes) the emitting cell's ID.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Particle {
    pub x: Float,
    pub y: Float,
    pub z: Float,
    pub e: Float,
    pub w: Float,
    pub c: Option<i64>,
}

/// Builds once from a mesh, samples many times. Immutable and
/// reentrant: `particle_birth` takes `&self` and never allocates.
pub struct Sampler {
    tables: PdfTables,
    geometries: Vec<crate::mesh::ElementGeometry>,
    e_bounds: Vec<Float>,
}

impl Sampler {
    /// Builds a sampler from `mesh` under `mode`, validating
    /// `tag_names` against the mode's requirements and folding the
    /// mesh's tags into joint-bin PDF tables.
    ///
    /// `tag_names` is not consulted again after construction: the
    /// mesh is assumed to already expose tag values (not names)
    /// through [`MeshView`]; the check here exists so a
    /// misconfiguration is reported with the same error surface a
    /// tag-dictionary-driven host would see, before the (possibly
    /// expensive) PDF fold runs.
    pub fn new(mesh: &dyn MeshView, tag_names: &TagNames, e_bounds: &[Float], mode: u32) -> Result<Sampler> {
        let mode = Mode::try_from(mode)?;
        tag_names.validate(mode)?;

        log::debug!(
            "building sampler: mode={:?}, src_tag={:?}, bias_tag={:?}",
            mode,
            tag_names.src_tag_name,
            tag_names.bias_tag_name,
        );

        let tables = PDFBuilder::build(mesh, mode, e_bounds)?;

        let geometries: Vec<_> = (0..mesh.num_elements()).map(|i| mesh.geometry(i)).collect();

        Ok(Sampler {
            tables,
            geometries,
            e_bounds: e_bounds.to_vec(),
        })
    }

    /// Number of joint bins the sampler draws from.
    #[inline]
    pub fn num_bins(&self) -> usize {
        self.tables.bins.len()
    }

    /// Births a particle from six independent uniforms `r` in
    /// `[0, 1)`, in order `(bin r1, bin r2, energy, pos u, pos v, pos w)`.
    /// Out-of-range entries are clamped defensively; this never fails.
    pub fn particle_birth(&self, r: [Float; 6]) -> Particle {
        let r = clamp_variates(r);

        let bin_id = self.tables.alias_bias.sample(r[0], r[1]);
        let bin = self.tables.bins[bin_id];

        let g = bin.group;
        let e_lo = self.e_bounds[g];
        let e_hi = self.e_bounds[g + 1];
        let e = e_lo + r[2] * (e_hi - e_lo);

        let geometry = self.geometries[bin.element];
        let p = geometry.sample_uniform(r[3], r[4], r[5]);

        let w = self.tables.weight[bin_id];

        Particle {
            x: p.x,
            y: p.y,
            z: p.z,
            e,
            w,
            c: bin.cell_id,
        }
    }
}

#[inline]
fn clamp_variates(r: [Float; 6]) -> [Float; 6] {
    let mut out = r;
    for v in out.iter_mut() {
        *v = crate::geometry::float::clamp(*v, 0.0, 1.0 - 1e-12);
    }
    out
}
