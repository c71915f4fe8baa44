// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Foundamental types shared by the geometry primitives and the sampler.

use cgmath;

/// The scalar type used throughout the sampler.
pub type Float = f64;
pub type Point3f = cgmath::Point3<Float>;
pub type Vector3f = cgmath::Vector3<Float>;
pub use cgmath::{BaseFloat, BaseNum, Point3, Vector3};
pub use cgmath::prelude::*;
