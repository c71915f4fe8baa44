// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Folds a [`MeshView`] into the flat joint-bin PDF tables the sampler
//! draws from, under one of the four supported modes.

use crate::alias::AliasTable;
use crate::error::{Result, SamplerError};
use crate::geometry::Float;
use crate::mesh::MeshView;

/// The four supported sampling modes, numbered 0 through 4.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Sample directly from the true source PDF; all weights are 1.
    Analog = 0,
    /// Sample phase-space volume uniformly among bins with positive
    /// source; weights compensate.
    Uniform = 1,
    /// Sample according to a user-specified bias tag; weights
    /// compensate.
    UserBias = 2,
    /// [`Mode::Analog`], additionally consuming sub-voxel partitions
    /// and emitting a cell ID per birth.
    AnalogSubVoxel = 3,
    /// [`Mode::Uniform`], additionally consuming sub-voxel partitions
    /// and emitting a cell ID per birth.
    UniformSubVoxel = 4,
}

impl Mode {
    #[inline]
    pub fn uses_sub_voxels(self) -> bool {
        matches!(self, Mode::AnalogSubVoxel | Mode::UniformSubVoxel)
    }

    #[inline]
    pub fn requires_bias(self) -> bool {
        matches!(self, Mode::UserBias)
    }

    #[inline]
    pub fn emits_cell(self) -> bool {
        self.uses_sub_voxels()
    }

    #[inline]
    pub fn is_analog(self) -> bool {
        matches!(self, Mode::Analog | Mode::AnalogSubVoxel)
    }
}

impl std::convert::TryFrom<u32> for Mode {
    type Error = SamplerError;

    fn try_from(value: u32) -> Result<Mode> {
        match value {
            0 => Ok(Mode::Analog),
            1 => Ok(Mode::Uniform),
            2 => Ok(Mode::UserBias),
            3 => Ok(Mode::AnalogSubVoxel),
            4 => Ok(Mode::UniformSubVoxel),
            other => Err(SamplerError::InvalidMode(other)),
        }
    }
}

/// One joint bin `(element, sub-voxel, group)`, reduced to what
/// [`crate::sampler::Sampler`] needs at birth time: which element to
/// sample a position in, which energy group, and which cell ID (if
/// any) to report.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bin {
    pub element: usize,
    pub group: usize,
    pub cell_id: Option<i64>,
}

/// The precomputed tables a [`crate::sampler::Sampler`] samples from.
pub struct PdfTables {
    pub bins: Vec<Bin>,
    pub p_true: Vec<Float>,
    pub p_bias: Vec<Float>,
    pub weight: Vec<Float>,
    /// Sampled by `particle_birth` on every call.
    pub alias_bias: AliasTable,
    /// Never consulted during sampling; kept so a caller can inspect
    /// the analog distribution (e.g. to report unbiased tallies)
    /// without rebuilding it from `p_true`.
    pub alias_true: AliasTable,
}

/// Folds mesh, sub-voxel, and energy data into the joint-bin PDF
/// tables for `mode`.
pub struct PDFBuilder;

impl PDFBuilder {
    pub fn build(mesh: &dyn MeshView, mode: Mode, e_bounds: &[Float]) -> Result<PdfTables> {
        validate_e_bounds(e_bounds)?;
        let n_g = e_bounds.len() - 1;

        let mut bins: Vec<Bin> = Vec::new();
        let mut p_true_raw: Vec<Float> = Vec::new();
        let mut p_bias_raw: Vec<Float> = Vec::new();

        for i in 0..mesh.num_elements() {
            let volume = mesh.volume(i);
            let entries = sub_voxel_entries(mesh, i, mode)?;
            if entries.len() > 1 {
                let frac_sum: Float = entries.iter().map(|e| e.1).sum();
                if frac_sum > 1.0 + 1e-9 {
                    return Err(SamplerError::SubVoxelFracOverflow {
                        element: i,
                        sum: frac_sum,
                    });
                }
                if frac_sum < 1.0 - 1e-9 {
                    log::warn!(
                        "element {} sub-voxel volume fractions sum to {:.6}, discarding {:.6} of its phase-space volume",
                        i, frac_sum, 1.0 - frac_sum
                    );
                }
            }

            let src = mesh.src(i);
            let expected_src_len = entries.len() * n_g;
            if src.len() != expected_src_len {
                return Err(SamplerError::TagShapeMismatch {
                    element: i,
                    tag: "src",
                    expected: expected_src_len,
                    actual: src.len(),
                });
            }

            let bias_tag = if mode.requires_bias() {
                let tag = mesh
                    .bias(i)
                    .ok_or(SamplerError::MissingTag("bias_tag_name"))?;
                if tag.len() != n_g && tag.len() != 1 {
                    return Err(SamplerError::TagShapeMismatch {
                        element: i,
                        tag: "bias",
                        expected: n_g,
                        actual: tag.len(),
                    });
                }
                Some(tag)
            } else {
                None
            };

            for (s, &(cell_id, vol_frac)) in entries.iter().enumerate() {
                let spatial_vol = vol_frac * volume;

                // true_raw(g) first, since every mode but the literal
                // group-resolved user bias needs the sub-voxel's total
                // true mass to build its energy-axis conditional.
                let mut true_raw = vec![0.0 as Float; n_g];
                let mut total_true_sv = 0.0 as Float;
                for g in 0..n_g {
                    let src_idx = if entries.len() > 1 { s * n_g + g } else { g };
                    let delta_e = e_bounds[g + 1] - e_bounds[g];
                    let raw = src[src_idx] * spatial_vol * delta_e;
                    true_raw[g] = raw;
                    total_true_sv += raw;
                }

                // Whether this sub-voxel's energy axis is biased
                // directly (a group-resolved bias tag gives its own
                // per-group shape) or inherits the true conditional
                // distribution (every other case: analog trivially,
                // uniform and scalar user bias because they carry no
                // per-group information of their own).
                let group_resolved_bias = matches!(mode, Mode::UserBias)
                    && bias_tag.expect("bias tag resolved above").len() == n_g;

                for g in 0..n_g {
                    let delta_e = e_bounds[g + 1] - e_bounds[g];

                    let bias_raw = match mode {
                        Mode::Analog | Mode::AnalogSubVoxel => true_raw[g],
                        Mode::Uniform | Mode::UniformSubVoxel => {
                            if total_true_sv > 0.0 {
                                spatial_vol * true_raw[g] / total_true_sv
                            } else {
                                0.0
                            }
                        }
                        Mode::UserBias if group_resolved_bias => {
                            let tag = bias_tag.expect("bias tag resolved above");
                            let bias_density = tag[g];
                            if true_raw[g] > 0.0 && bias_density <= 0.0 {
                                return Err(SamplerError::NonPositiveBias {
                                    element: i,
                                    group: g,
                                    bias: bias_density,
                                });
                            }
                            bias_density.max(0.0) * spatial_vol * delta_e
                        }
                        Mode::UserBias => {
                            let tag = bias_tag.expect("bias tag resolved above");
                            let bias_density = tag[0];
                            if total_true_sv > 0.0 && bias_density <= 0.0 {
                                return Err(SamplerError::NonPositiveBias {
                                    element: i,
                                    group: 0,
                                    bias: bias_density,
                                });
                            }
                            if total_true_sv > 0.0 {
                                bias_density.max(0.0) * spatial_vol * true_raw[g] / total_true_sv
                            } else {
                                0.0
                            }
                        }
                    };

                    bins.push(Bin {
                        element: i,
                        group: g,
                        cell_id: if mode.emits_cell() { cell_id } else { None },
                    });
                    p_true_raw.push(true_raw[g]);
                    p_bias_raw.push(bias_raw);
                }
            }
        }

        let total_true: Float = p_true_raw.iter().sum();
        if total_true <= 0.0 {
            return Err(SamplerError::DegenerateSource);
        }
        let total_bias: Float = p_bias_raw.iter().sum();

        let p_true: Vec<Float> = p_true_raw.iter().map(|&v| v / total_true).collect();
        let p_bias: Vec<Float> = if total_bias > 0.0 {
            p_bias_raw.iter().map(|&v| v / total_bias).collect()
        } else {
            p_bias_raw
        };

        let weight: Vec<Float> = p_true
            .iter()
            .zip(p_bias.iter())
            .map(|(&t, &b)| if b > 0.0 { t / b } else { 0.0 })
            .collect();

        log::debug!(
            "built {} joint bins across {} elements for mode {:?}",
            bins.len(),
            mesh.num_elements(),
            mode
        );

        let alias_bias = AliasTable::new(&p_bias)?;
        let alias_true = AliasTable::new(&p_true)?;

        Ok(PdfTables {
            bins,
            p_true,
            p_bias,
            weight,
            alias_bias,
            alias_true,
        })
    }
}

fn validate_e_bounds(e_bounds: &[Float]) -> Result<()> {
    if e_bounds.len() < 2 {
        return Err(SamplerError::TooFewEnergyBounds);
    }
    for (index, pair) in e_bounds.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(SamplerError::NonMonotonicEnergyBounds {
                index: index + 1,
                value: pair[1],
            });
        }
    }
    Ok(())
}

/// Per-element `(cell_id, vol_frac)` list, gated by whether `mode`
/// consumes sub-voxel partitions at all: non-sub-voxel modes never
/// call [`MeshView::cell_fracs`], treating every element as one
/// implicit, un-cell-numbered voxel.
fn sub_voxel_entries(
    mesh: &dyn MeshView,
    i: usize,
    mode: Mode,
) -> Result<Vec<(Option<i64>, Float)>> {
    if !mode.uses_sub_voxels() {
        return Ok(vec![(None, 1.0)]);
    }
    let fracs = mesh.cell_fracs(i);
    if fracs.is_empty() {
        Ok(vec![(None, 1.0)])
    } else {
        Ok(fracs.iter().map(|cf| (Some(cf.cell_id), cf.vol_frac)).collect())
    }
}
