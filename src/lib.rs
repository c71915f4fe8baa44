// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A mesh-based source sampler for Monte Carlo radiation transport.
//!
//! Given a tagged mesh (source density, optional bias, optional
//! sub-voxel partitions), [`pdf::PDFBuilder`] folds it into flat
//! joint-bin PDF tables once at construction, and [`sampler::Sampler`]
//! draws particle births from them in O(1) per call via
//! [`alias::AliasTable`].
//!
//! Mesh I/O is a host-framework responsibility: implement
//! [`mesh::MeshView`] over whatever mesh library is already in use.

extern crate cgmath;
extern crate num_traits;

pub mod alias;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod pdf;
pub mod sampler;

pub use error::{Result, SamplerError};
pub use mesh::MeshView;
pub use pdf::{Mode, PDFBuilder};
pub use sampler::{Particle, Sampler, TagNames};
