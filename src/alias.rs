// Copyright 2017 Dasein Phaos aka. Luxko
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! O(1) discrete sampling from a fixed PDF, via Walker's alias method.

use crate::geometry::Float;
use thiserror::Error;

/// Reasons an [`AliasTable`] failed to build from a candidate PDF.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum AliasTableError {
    #[error("cannot build an alias table from an empty PDF")]
    Empty,
    #[error("PDF entry {index} is negative ({value})")]
    Negative { index: usize, value: Float },
    #[error("PDF sums to zero; there is nothing to sample")]
    AllZero,
}

/// A discrete distribution over `0..n`, pre-processed for O(1) sampling
/// via Walker's alias method.
#[derive(Debug, Clone)]
pub struct AliasTable {
    /// `prob[i]` is the probability of accepting bin `i` directly when
    /// `i` is drawn as the initial bucket.
    prob: Vec<Float>,
    /// `alias[i]` is the bin substituted for `i` on rejection.
    alias: Vec<usize>,
}

impl AliasTable {
    /// Builds an alias table from `pdf`. `pdf` need not already sum to
    /// one; it is normalized internally. Fails if `pdf` is empty,
    /// contains a negative entry, or sums to zero.
    pub fn new(pdf: &[Float]) -> Result<AliasTable, AliasTableError> {
        let n = pdf.len();
        if n == 0 {
            return Err(AliasTableError::Empty);
        }
        let mut total = 0.0 as Float;
        for (index, &value) in pdf.iter().enumerate() {
            if value < 0.0 {
                return Err(AliasTableError::Negative { index, value });
            }
            total += value;
        }
        if total == 0.0 {
            return Err(AliasTableError::AllZero);
        }

        // scale each probability to its share of n equal-sized slots.
        let mut q: Vec<Float> = pdf.iter().map(|&p| p / total * n as Float).collect();
        let mut prob = vec![0.0 as Float; n];
        let mut alias = vec![0usize; n];

        let mut small: Vec<usize> = Vec::with_capacity(n);
        let mut large: Vec<usize> = Vec::with_capacity(n);
        for i in 0..n {
            if q[i] < 1.0 {
                small.push(i);
            } else {
                large.push(i);
            }
        }

        while !small.is_empty() && !large.is_empty() {
            let s = small.pop().unwrap();
            let l = *large.last().unwrap();
            prob[s] = q[s];
            alias[s] = l;
            q[l] = q[l] - (1.0 - q[s]);
            if q[l] < 1.0 {
                large.pop();
                small.push(l);
            }
        }

        // leftover entries (rounding residue) are always accepted outright.
        while let Some(l) = large.pop() {
            prob[l] = 1.0;
            alias[l] = l;
        }
        while let Some(s) = small.pop() {
            prob[s] = 1.0;
            alias[s] = s;
        }

        Ok(AliasTable { prob, alias })
    }

    /// Number of bins in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.prob.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prob.is_empty()
    }

    /// Draws a bin index given two independent uniforms `r1, r2` in
    /// `[0, 1)`. Distribution of the result equals the input PDF, up to
    /// floating-point error.
    #[inline]
    pub fn sample(&self, r1: Float, r2: Float) -> usize {
        let n = self.prob.len();
        let k = ((r1 * n as Float) as usize).min(n - 1);
        if r2 < self.prob[k] {
            k
        } else {
            self.alias[k]
        }
    }
}
