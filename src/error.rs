// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors surfaced at sampler construction. `particle_birth` cannot fail
//! once a `Sampler` exists; every failure mode lives here.

use thiserror::Error;

use crate::alias::AliasTableError;

/// Why `Sampler::new` (or `PDFBuilder::build`) refused to produce a
/// sampler.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SamplerError {
    #[error("required tag name `{0}` was not supplied for the selected mode")]
    MissingTag(&'static str),

    #[error("e_bounds must be strictly increasing, but entry {index} ({value}) is not greater than the previous entry")]
    NonMonotonicEnergyBounds { index: usize, value: f64 },

    #[error("e_bounds must have at least two entries (one energy group)")]
    TooFewEnergyBounds,

    #[error(
        "element {element}'s `{tag}` tag has {actual} entries, expected {expected}"
    )]
    TagShapeMismatch {
        element: usize,
        tag: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("total source is zero across every element; there is nothing to sample")]
    DegenerateSource,

    #[error(
        "element {element} group {group} has positive source but non-positive bias ({bias})"
    )]
    NonPositiveBias {
        element: usize,
        group: usize,
        bias: f64,
    },

    #[error("mode selector {0} is out of range; expected 0..=4")]
    InvalidMode(u32),

    #[error("sub-voxel volume fractions for element {element} sum to {sum}, which exceeds 1")]
    SubVoxelFracOverflow { element: usize, sum: f64 },

    #[error("internal invariant violation while building the alias table: {0}")]
    AliasTable(#[from] AliasTableError),
}

pub type Result<T> = std::result::Result<T, SamplerError>;
