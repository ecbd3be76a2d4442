// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

// Deactivating this lint here because it would make the Boolean expressions more difficult to
// read.
#![allow(clippy::nonminimal_bool)]

use crate::core::{LineSearchError, LineSearchFloat};
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// One endpoint of the interval of uncertainty: a step length together with the function value
/// and directional derivative observed there.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Endpoint<F> {
    /// Step length
    pub x: F,
    /// Function value at `x`
    pub fx: F,
    /// Directional derivative at `x`
    pub gx: F,
}

impl<F> Endpoint<F> {
    /// Create a new `Endpoint`
    pub fn new(x: F, fx: F, gx: F) -> Self {
        Endpoint { x, fx, gx }
    }
}

impl<F> Default for Endpoint<F>
where
    F: LineSearchFloat,
{
    fn default() -> Self {
        Endpoint {
            x: float!(0.0),
            fx: float!(0.0),
            gx: float!(0.0),
        }
    }
}

/// The result of a single [`dcstep`] call: the updated interval endpoints, the new trial step,
/// whether the minimum is now bracketed, and the `info` code identifying which of the four cases
/// fired (or `0` if the preconditions were violated and the inputs were returned unchanged).
#[derive(Clone, Copy, Debug)]
pub struct DcstepOutcome<F> {
    /// Updated `stx`
    pub stx: Endpoint<F>,
    /// Updated `sty`
    pub sty: Endpoint<F>,
    /// Updated trial step
    pub stp: Endpoint<F>,
    /// Whether the minimum is now bracketed
    pub bracketed: bool,
    /// The case that fired: `1`-`4`, or `0` if the preconditions were violated
    pub info: usize,
}

/// Safeguarded update of the interval of uncertainty `[stx, sty]` and computation of a new trial
/// step, given the endpoint with the lower function value `stx`, the other endpoint `sty`, and
/// the most recent trial `stp`.
///
/// This is the cubic/quadratic safeguarded interpolation step at the heart of the Moré-Thuente
/// line search (`dcstep` in the reference MINPACK-style implementations). It performs no
/// function evaluations itself: `stp.fx`/`stp.gx` must already hold the caller's evaluation at
/// `stp.x`.
///
/// Returns `Err(LineSearchError::ConditionViolated)` if `f32`/`f64` arithmetic produced a `NaN`
/// or `Inf` while forming the cubic interpolant; this should not happen for a well-posed
/// interval and indicates the driver handed `dcstep` an inconsistent state.
pub fn dcstep<F: LineSearchFloat>(
    stx: Endpoint<F>,
    sty: Endpoint<F>,
    stp: Endpoint<F>,
    bracketed: bool,
    stpmin: F,
    stpmax: F,
) -> Result<DcstepOutcome<F>, LineSearchError> {
    let mut info: usize = 0;
    let bound: bool;
    let mut stpf: F;
    let stpc: F;
    let stpq: F;
    let mut bracketed = bracketed;

    // check inputs
    if (bracketed && (stp.x <= stx.x.min(sty.x) || stp.x >= stx.x.max(sty.x)))
        || stx.gx * (stp.x - stx.x) >= float!(0.0)
        || stpmax < stpmin
    {
        return Ok(DcstepOutcome {
            stx,
            sty,
            stp,
            bracketed,
            info,
        });
    }

    // determine if the derivatives have opposite sign
    let sgnd = stp.gx * (stx.gx / stx.gx.abs());

    if stp.fx > stx.fx {
        // First case. A higher function value. The minimum is bracketed. If the cubic step is
        // closer to stx.x than the quadratic step, the cubic step is taken, else the average of
        // the cubic and the quadratic steps is taken.
        info = 1;
        bound = true;
        let theta = float!(3.0) * (stx.fx - stp.fx) / (stp.x - stx.x) + stx.gx + stp.gx;
        let s = max_abs_free(&[theta, stx.gx, stp.gx])?;
        let mut gamma = s * ((theta / s).powi(2) - (stx.gx / s) * (stp.gx / s)).sqrt();
        if stp.x < stx.x {
            gamma = -gamma;
        }
        let p = (gamma - stx.gx) + theta;
        let q = ((gamma - stx.gx) + gamma) + stp.gx;
        let r = p / q;
        stpc = stx.x + r * (stp.x - stx.x);
        stpq = stx.x
            + ((stx.gx / ((stx.fx - stp.fx) / (stp.x - stx.x) + stx.gx)) / float!(2.0))
                * (stp.x - stx.x);
        if (stpc - stx.x).abs() < (stpq - stx.x).abs() {
            stpf = stpc;
        } else {
            stpf = stpc + (stpq - stpc) / float!(2.0);
        }
        bracketed = true;
    } else if sgnd < float!(0.0) {
        // Second case. A lower function value and derivatives of opposite sign. The minimum is
        // bracketed. If the cubic step is closer to stx.x than the quadratic (secant) step, the
        // cubic step is taken, else the quadratic step is taken.
        info = 2;
        bound = false;
        let theta = float!(3.0) * (stx.fx - stp.fx) / (stp.x - stx.x) + stx.gx + stp.gx;
        let s = max_abs_free(&[theta, stx.gx, stp.gx])?;
        let mut gamma = s * ((theta / s).powi(2) - (stx.gx / s) * (stp.gx / s)).sqrt();
        if stp.x > stx.x {
            gamma = -gamma;
        }
        let p = (gamma - stp.gx) + theta;
        let q = ((gamma - stp.gx) + gamma) + stx.gx;
        let r = p / q;
        stpc = stp.x + r * (stx.x - stp.x);
        stpq = stp.x + (stp.gx / (stp.gx - stx.gx)) * (stx.x - stp.x);
        if (stpc - stp.x).abs() > (stpq - stp.x).abs() {
            stpf = stpc;
        } else {
            stpf = stpq;
        }
        bracketed = true;
    } else if stp.gx.abs() < stx.gx.abs() {
        // Third case. A lower function value, derivatives of the same sign, and the magnitude of
        // the derivative decreases. The cubic step is only used if the cubic tends to infinity in
        // the direction of the step or if the minimum of the cubic is beyond stp.x. Otherwise the
        // cubic step is defined to be either stpmin or stpmax. The quadratic (secant) step is
        // also computed and if the minimum is bracketed then the step closest to stx.x is taken,
        // else the step farthest away is taken.
        info = 3;
        bound = true;
        let theta = float!(3.0) * (stx.fx - stp.fx) / (stp.x - stx.x) + stx.gx + stp.gx;
        let s = max_abs_free(&[theta, stx.gx, stp.gx])?;
        // the case gamma == 0 only arises if the cubic does not tend to infinity in the direction
        // of the step.
        let mut gamma =
            s * float!(0.0)
                .max((theta / s).powi(2) - (stx.gx / s) * (stp.gx / s))
                .sqrt();
        if stp.x > stx.x {
            gamma = -gamma;
        }
        let p = (gamma - stp.gx) + theta;
        let q = (gamma + (stx.gx - stp.gx)) + gamma;
        let r = p / q;
        if r < float!(0.0) && gamma != float!(0.0) {
            stpc = stp.x + r * (stx.x - stp.x);
        } else if stp.x > stx.x {
            stpc = stpmax;
        } else {
            stpc = stpmin;
        }
        stpq = stp.x + (stp.gx / (stp.gx - stx.gx)) * (stx.x - stp.x);
        if bracketed {
            if (stp.x - stpc).abs() < (stp.x - stpq).abs() {
                stpf = stpc;
            } else {
                stpf = stpq;
            }
        } else if (stp.x - stpc).abs() > (stp.x - stpq).abs() {
            stpf = stpc;
        } else {
            stpf = stpq;
        }
    } else {
        // Fourth case. A lower function value, derivatives of the same sign, and the magnitude of
        // the derivative does not decrease. If the minimum is not bracketed, the step is either
        // stpmin or stpmax, else the cubic step is taken.
        info = 4;
        bound = false;
        if bracketed {
            let theta = float!(3.0) * (stp.fx - sty.fx) / (sty.x - stp.x) + sty.gx + stp.gx;
            let s = max_abs_free(&[theta, sty.gx, stp.gx])?;
            let mut gamma = s * ((theta / s).powi(2) - (sty.gx / s) * (stp.gx / s)).sqrt();
            if stp.x > sty.x {
                gamma = -gamma;
            }
            let p = (gamma - stp.gx) + theta;
            let q = ((gamma - stp.gx) + gamma) + sty.gx;
            let r = p / q;
            stpc = stp.x + r * (sty.x - stp.x);
            stpf = stpc;
        } else if stp.x > stx.x {
            stpf = stpmax;
        } else {
            stpf = stpmin;
        }
    }

    // Update the interval of uncertainty. This update does not depend on the new step or the
    // case analysis above.
    let mut stx_o = stx;
    let mut sty_o = sty;
    let mut stp_o = stp;
    if stp_o.fx > stx_o.fx {
        sty_o = Endpoint::new(stp_o.x, stp_o.fx, stp_o.gx);
    } else {
        if sgnd < float!(0.0) {
            sty_o = Endpoint::new(stx_o.x, stx_o.fx, stx_o.gx);
        }
        stx_o = Endpoint::new(stp_o.x, stp_o.fx, stp_o.gx);
    }

    // compute the new step and safeguard it
    stpf = stpmax.min(stpf);
    stpf = stpmin.max(stpf);

    stp_o.x = stpf;
    if bracketed && bound {
        if sty_o.x > stx_o.x {
            stp_o.x = stp_o.x.min(stx_o.x + float!(0.66) * (sty_o.x - stx_o.x));
        } else {
            stp_o.x = stp_o.x.max(stx_o.x + float!(0.66) * (sty_o.x - stx_o.x));
        }
    }

    Ok(DcstepOutcome {
        stx: stx_o,
        sty: sty_o,
        stp: stp_o,
        bracketed,
        info,
    })
}

/// Returns the entry of largest absolute value, failing if any entry is non-finite.
fn max_abs_free<F: LineSearchFloat>(values: &[F]) -> Result<F, LineSearchError> {
    if values.iter().any(|v| v.is_nan() || v.is_infinite()) {
        return Err(linesearch_error!(
            ConditionViolated,
            "dcstep: NaN or Inf encountered while forming the cubic interpolant"
        ));
    }
    Ok(*values
        .iter()
        .max_by(|a, b| a.partial_cmp(b).unwrap())
        .unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    test_trait_impl!(endpoint, Endpoint<f64>);

    #[test]
    fn rejects_inconsistent_interval() {
        // stp.x outside [min(stx.x, sty.x), max(stx.x, sty.x)] while bracketed
        let stx = Endpoint::new(0.0, 1.0, -1.0);
        let sty = Endpoint::new(1.0, 0.5, 0.5);
        let stp = Endpoint::new(2.0, 0.9, 0.1);
        let out = dcstep(stx, sty, stp, true, 0.0, 10.0).unwrap();
        assert_eq!(out.info, 0);
        assert_eq!(out.stp.x, 2.0);
    }

    #[test]
    fn case_one_higher_function_value_brackets() {
        let stx = Endpoint::new(0.0, 1.0, -1.0);
        let sty = Endpoint::new(0.0, 1.0, -1.0);
        let stp = Endpoint::new(1.0, 2.0, 1.0);
        let out = dcstep(stx, sty, stp, false, 0.0, 10.0).unwrap();
        assert_eq!(out.info, 1);
        assert!(out.bracketed);
        assert!(out.stp.x > 0.0 && out.stp.x < 1.0);
    }

    #[test]
    fn case_two_opposite_sign_derivative_brackets() {
        let stx = Endpoint::new(0.0, 1.0, -1.0);
        let sty = Endpoint::new(0.0, 1.0, -1.0);
        let stp = Endpoint::new(1.0, 0.5, 1.0);
        let out = dcstep(stx, sty, stp, false, 0.0, 10.0).unwrap();
        assert_eq!(out.info, 2);
        assert!(out.bracketed);
    }

    #[test]
    fn case_three_decreasing_derivative_magnitude() {
        let stx = Endpoint::new(0.0, 1.0, -1.0);
        let sty = Endpoint::new(0.0, 1.0, -1.0);
        let stp = Endpoint::new(1.0, 0.5, -0.5);
        let out = dcstep(stx, sty, stp, false, 0.0, 10.0).unwrap();
        assert_eq!(out.info, 3);
    }

    #[test]
    fn case_four_non_decreasing_derivative_magnitude() {
        let stx = Endpoint::new(0.0, 1.0, -1.0);
        let sty = Endpoint::new(0.0, 1.0, -1.0);
        let stp = Endpoint::new(1.0, 0.5, -2.0);
        let out = dcstep(stx, sty, stp, false, 0.0, 10.0).unwrap();
        assert_eq!(out.info, 4);
    }

    #[test]
    fn step_always_stays_within_bounds() {
        let stx = Endpoint::new(0.0, 1.0, -1.0);
        let sty = Endpoint::new(0.0, 1.0, -1.0);
        let stp = Endpoint::new(1.0, 2.0, 1.0);
        let out = dcstep(stx, sty, stp, false, 0.2, 0.8).unwrap();
        assert!(out.stp.x >= 0.2 && out.stp.x <= 0.8);
    }
}
