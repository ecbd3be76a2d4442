// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::core::{LineSearchError, LineSearchFloat};
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Configuration shared by [`SearchState`](crate::linesearch::SearchState) and the
/// [`strong_wolfe_search`](crate::linesearch::strong_wolfe_search) /
/// [`armijo_search`](crate::linesearch::armijo_search) frontends.
///
/// With [`with_c`](LineSearchConfig::with_c) the scaling factors for the sufficient decrease
/// condition and the curvature condition can be supplied. By default they are set to
/// `ftol = 1e-4` and `gtol = 0.9`.
///
/// Bounds on the range where step lengths are searched for can be set with
/// [`with_bounds`](LineSearchConfig::with_bounds), which requires both values to be
/// non-negative and `stpmin < stpmax`.
///
/// The search terminates once the relative width of the uncertainty interval drops below
/// `xtol` (default `1e-16`), settable via
/// [`with_width_tolerance`](LineSearchConfig::with_width_tolerance).
///
/// The evaluation budget enforced by the frontends (not by [`SearchState`](crate::linesearch::SearchState)
/// itself, see its documentation) defaults to `20` and can be changed with
/// [`with_max_evaluations`](LineSearchConfig::with_max_evaluations).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct LineSearchConfig<F> {
    pub(crate) ftol: F,
    pub(crate) gtol: F,
    pub(crate) xtol: F,
    pub(crate) stpmin: F,
    pub(crate) stpmax: F,
    pub(crate) maxfev: u32,
}

impl<F> Default for LineSearchConfig<F>
where
    F: LineSearchFloat,
{
    fn default() -> Self {
        LineSearchConfig {
            ftol: float!(F, 1e-4),
            gtol: float!(F, 0.9),
            xtol: float!(F, 1e-16),
            stpmin: float!(F, 1e-20),
            stpmax: float!(F, 1e20),
            maxfev: 20,
        }
    }
}

impl<F> LineSearchConfig<F>
where
    F: LineSearchFloat,
{
    /// Construct a new `LineSearchConfig` with the recommended defaults
    /// (`ftol = 1e-4`, `gtol = 0.9`, `xtol = 1e-16`, `stpmin = 1e-20`, `stpmax = 1e20`,
    /// `maxfev = 20`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the constants `ftol` and `gtol` for the sufficient decrease and curvature
    /// conditions, respectively. `0 < ftol < gtol < 1` must hold.
    ///
    /// For Newton-type directions a tighter curvature tolerance such as `gtol = 0.1` is
    /// recommended over the default `0.9`.
    pub fn with_c(mut self, ftol: F, gtol: F) -> Result<Self, LineSearchError> {
        if ftol <= float!(F, 0.0) || ftol >= gtol {
            return Err(linesearch_error!(
                InvalidParameter,
                "LineSearchConfig: ftol must be in (0, gtol)."
            ));
        }
        if gtol <= ftol || gtol >= float!(F, 1.0) {
            return Err(linesearch_error!(
                InvalidParameter,
                "LineSearchConfig: gtol must be in (ftol, 1)."
            ));
        }
        self.ftol = ftol;
        self.gtol = gtol;
        Ok(self)
    }

    /// Set the lower and upper bound of the step, `stpmin` and `stpmax`.
    ///
    /// `stpmin` must be non-negative and smaller than `stpmax`.
    pub fn with_bounds(mut self, stpmin: F, stpmax: F) -> Result<Self, LineSearchError> {
        if stpmin < float!(F, 0.0) {
            return Err(linesearch_error!(
                InvalidParameter,
                "LineSearchConfig: stpmin must be >= 0.0."
            ));
        }
        if stpmax <= stpmin {
            return Err(linesearch_error!(
                InvalidParameter,
                "LineSearchConfig: stpmin must be smaller than stpmax."
            ));
        }
        self.stpmin = stpmin;
        self.stpmax = stpmax;
        Ok(self)
    }

    /// Set the relative tolerance on the width of the uncertainty interval.
    ///
    /// The search terminates when the relative width drops below this tolerance. Must be
    /// non-negative.
    pub fn with_width_tolerance(mut self, xtol: F) -> Result<Self, LineSearchError> {
        if xtol < float!(F, 0.0) {
            return Err(linesearch_error!(
                InvalidParameter,
                "LineSearchConfig: xtol must be >= 0.0."
            ));
        }
        self.xtol = xtol;
        Ok(self)
    }

    /// Set the maximum number of function evaluations a frontend (`strong_wolfe_search` or
    /// `armijo_search`) will perform before giving up with `TerminationStatus::WarnMaxFev`.
    ///
    /// Must be greater than zero.
    pub fn with_max_evaluations(mut self, maxfev: u32) -> Result<Self, LineSearchError> {
        if maxfev == 0 {
            return Err(linesearch_error!(
                InvalidParameter,
                "LineSearchConfig: maxfev must be greater than 0."
            ));
        }
        self.maxfev = maxfev;
        Ok(self)
    }

    /// The Armijo (sufficient decrease) constant.
    pub fn ftol(&self) -> F {
        self.ftol
    }

    /// The curvature constant.
    pub fn gtol(&self) -> F {
        self.gtol
    }

    /// The minimum relative interval width.
    pub fn xtol(&self) -> F {
        self.xtol
    }

    /// The hard lower bound on the step.
    pub fn stpmin(&self) -> F {
        self.stpmin
    }

    /// The hard upper bound on the step.
    pub fn stpmax(&self) -> F {
        self.stpmax
    }

    /// The maximum number of evaluations a frontend will perform per search.
    pub fn maxfev(&self) -> u32 {
        self.maxfev
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    test_trait_impl!(config, LineSearchConfig<f64>);

    #[test]
    fn default_is_valid() {
        let cfg = LineSearchConfig::<f64>::default();
        assert!(cfg.ftol > 0.0 && cfg.ftol < cfg.gtol);
        assert!(cfg.gtol < 1.0);
        assert!(cfg.stpmin < cfg.stpmax);
        assert!(cfg.maxfev > 0);
    }

    #[test]
    fn with_c_rejects_bad_ordering() {
        let cfg = LineSearchConfig::<f64>::default();
        assert!(cfg.clone().with_c(0.9, 0.1).is_err());
        assert!(cfg.clone().with_c(-1.0, 0.9).is_err());
        assert!(cfg.with_c(1e-4, 1.0).is_err());
    }

    #[test]
    fn with_bounds_rejects_bad_ordering() {
        let cfg = LineSearchConfig::<f64>::default();
        assert!(cfg.clone().with_bounds(-1.0, 1.0).is_err());
        assert!(cfg.with_bounds(1.0, 1.0).is_err());
    }

    #[test]
    fn with_max_evaluations_rejects_zero() {
        let cfg = LineSearchConfig::<f64>::default();
        assert!(cfg.with_max_evaluations(0).is_err());
    }
}
