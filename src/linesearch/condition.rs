// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # References:
//!
//! \[0\] Jorge Nocedal and Stephen J. Wright (2006). Numerical Optimization.
//! Springer. ISBN 0-387-30303-0.

use crate::core::{LineSearchError, LineSearchFloat};
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Needs to be implemented by everything that wants to act as a standalone step-acceptance
/// test, independent of [`SearchState`](crate::linesearch::SearchState)'s own convergence check.
///
/// All quantities are directional: `init_grad`/`cur_grad` are `f′(0)`/`f′(alpha)` along the
/// search direction, already projected to a scalar by the caller.
pub trait LineSearchCondition<F> {
    /// Evaluate the condition
    fn eval(&self, cur_cost: F, cur_grad: F, init_cost: F, init_grad: F, alpha: F) -> bool;

    /// Indicates whether this condition requires the gradient at the new point
    fn requires_cur_grad(&self) -> bool;
}

/// Armijo sufficient-decrease condition
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct ArmijoCondition<F> {
    c: F,
}

impl<F: LineSearchFloat> ArmijoCondition<F> {
    /// Constructor. `c` must be in `(0, 1)`.
    pub fn new(c: F) -> Result<Self, LineSearchError> {
        if c <= float!(F, 0.0) || c >= float!(F, 1.0) {
            return Err(linesearch_error!(
                InvalidParameter,
                "ArmijoCondition: Parameter c must be in (0, 1)"
            ));
        }
        Ok(ArmijoCondition { c })
    }
}

impl<F> LineSearchCondition<F> for ArmijoCondition<F>
where
    F: LineSearchFloat,
{
    fn eval(&self, cur_cost: F, _cur_grad: F, init_cost: F, init_grad: F, alpha: F) -> bool {
        cur_cost <= init_cost + self.c * alpha * init_grad
    }

    fn requires_cur_grad(&self) -> bool {
        false
    }
}

/// Wolfe condition: sufficient decrease plus the (non-strong) curvature condition
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct WolfeCondition<F> {
    c1: F,
    c2: F,
}

impl<F: LineSearchFloat> WolfeCondition<F> {
    /// Constructor. Requires `0 < c1 < c2 < 1`.
    pub fn new(c1: F, c2: F) -> Result<Self, LineSearchError> {
        if c1 <= float!(F, 0.0) || c1 >= float!(F, 1.0) {
            return Err(linesearch_error!(
                InvalidParameter,
                "WolfeCondition: Parameter c1 must be in (0, 1)"
            ));
        }
        if c2 <= c1 || c2 >= float!(F, 1.0) {
            return Err(linesearch_error!(
                InvalidParameter,
                "WolfeCondition: Parameter c2 must be in (c1, 1)"
            ));
        }
        Ok(WolfeCondition { c1, c2 })
    }
}

impl<F> LineSearchCondition<F> for WolfeCondition<F>
where
    F: LineSearchFloat,
{
    fn eval(&self, cur_cost: F, cur_grad: F, init_cost: F, init_grad: F, alpha: F) -> bool {
        (cur_cost <= init_cost + self.c1 * alpha * init_grad) && cur_grad >= self.c2 * init_grad
    }

    fn requires_cur_grad(&self) -> bool {
        true
    }
}

/// Strong Wolfe conditions: sufficient decrease plus the curvature condition on `|f′|`
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct StrongWolfeCondition<F> {
    c1: F,
    c2: F,
}

impl<F: LineSearchFloat> StrongWolfeCondition<F> {
    /// Constructor. Requires `0 < c1 < c2 < 1`.
    pub fn new(c1: F, c2: F) -> Result<Self, LineSearchError> {
        if c1 <= float!(F, 0.0) || c1 >= float!(F, 1.0) {
            return Err(linesearch_error!(
                InvalidParameter,
                "StrongWolfeCondition: Parameter c1 must be in (0, 1)"
            ));
        }
        if c2 <= c1 || c2 >= float!(F, 1.0) {
            return Err(linesearch_error!(
                InvalidParameter,
                "StrongWolfeCondition: Parameter c2 must be in (c1, 1)"
            ));
        }
        Ok(StrongWolfeCondition { c1, c2 })
    }
}

impl<F> LineSearchCondition<F> for StrongWolfeCondition<F>
where
    F: LineSearchFloat,
{
    fn eval(&self, cur_cost: F, cur_grad: F, init_cost: F, init_grad: F, alpha: F) -> bool {
        (cur_cost <= init_cost + self.c1 * alpha * init_grad)
            && cur_grad.abs() <= self.c2 * init_grad.abs()
    }

    fn requires_cur_grad(&self) -> bool {
        true
    }
}
