// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::core::{LineSearchConfig, LineSearchError, LineSearchFloat};
use crate::linesearch::step::{dcstep, Endpoint};
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Which modified function the driver is currently interpolating on.
///
/// Stage 1 interpolates on the shifted function `ψ(α) = f(α) − f(0) − ftol·α·f′(0)` so that the
/// cubic/quadratic model always "sees" a non-positive value at `stx`. Stage 2 switches to `f`
/// itself once a point with `ψ(α) ≤ 0` and `f′(α) ≥ 0` has been observed. `stage` only ever moves
/// `One → Two`, never back.
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub enum Stage {
    /// Interpolating on the modified function ψ
    #[default]
    One,
    /// Interpolating on f directly
    Two,
}

/// Outcome of a single `step` (or the reason the search is already over).
///
/// `NeedEval` is the only non-terminal status: the caller must evaluate at the returned step and
/// call `step` again. Every other variant ends the search; the step returned alongside it is the
/// best one found.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub enum TerminationStatus {
    /// Evaluate the returned step and call `step` again
    NeedEval,
    /// Both the sufficient decrease and curvature conditions hold
    Converged,
    /// The bracketed interval has collapsed to a point under round-off
    WarnRounding,
    /// The interval width fell below `xtol · stmax`
    WarnXtol,
    /// `stpmax` was reached without meeting both Wolfe conditions
    WarnStpMax,
    /// `stpmin` was reached without meeting both Wolfe conditions
    WarnStpMin,
    /// The evaluation budget was exhausted (only ever produced by a frontend, never by `step`)
    WarnMaxFev,
}

impl TerminationStatus {
    /// Whether this status ends the search (everything except `NeedEval`).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TerminationStatus::NeedEval)
    }
}

/// Reverse-communication state for one Moré-Thuente line search.
///
/// `SearchState` maintains the interval of uncertainty `(stx, sty)`, the current stage, and the
/// dynamic step bounds across calls to [`step`](SearchState::step). It performs no function
/// evaluation itself: the caller evaluates at the step `start`/`step` returns and feeds the
/// result back in on the next call.
///
/// `maxfev` is *not* enforced here (see [`LineSearchConfig`]); only the
/// [`strong_wolfe_search`](crate::linesearch::strong_wolfe_search) frontend counts evaluations
/// and gives up with `TerminationStatus::WarnMaxFev`. Correspondingly, `evaluations` exists only
/// so that frontend can attribute a count to this particular search; `start`/`step` never read or
/// write it.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct SearchState<F> {
    stage: Stage,
    bracketed: bool,
    stx: Endpoint<F>,
    sty: Endpoint<F>,
    finit: F,
    dginit: F,
    dgtest: F,
    stmin: F,
    stmax: F,
    width: F,
    width1: F,
    pub(crate) evaluations: u32,
}

impl<F> SearchState<F>
where
    F: LineSearchFloat,
{
    /// Start a new search at `alpha0` given the objective value `f0` and directional derivative
    /// `g0` at `α = 0`.
    ///
    /// Returns `Err` if `alpha0` is outside `[cfg.stpmin, cfg.stpmax]`, if `g0 >= 0` (not a
    /// descent direction), if any of `cfg`'s tolerances are negative or out of order, or if `f0`
    /// / `g0` is non-finite. On success, the caller should evaluate at `alpha0` unchanged and
    /// pass the result to [`step`](SearchState::step).
    pub fn start(
        f0: F,
        g0: F,
        alpha0: F,
        cfg: &LineSearchConfig<F>,
    ) -> Result<Self, LineSearchError> {
        if !f0.is_finite() || !g0.is_finite() {
            return Err(linesearch_error!(
                NonFiniteEvaluation,
                "SearchState::start: f0/g0 must be finite"
            ));
        }
        if cfg.ftol < float!(F, 0.0) || cfg.gtol < float!(F, 0.0) || cfg.xtol < float!(F, 0.0) {
            return Err(linesearch_error!(
                InvalidParameter,
                "SearchState::start: ftol, gtol and xtol must be non-negative"
            ));
        }
        if cfg.stpmin < float!(F, 0.0) || cfg.stpmax < cfg.stpmin {
            return Err(linesearch_error!(
                InvalidParameter,
                "SearchState::start: require 0 <= stpmin <= stpmax"
            ));
        }
        if alpha0 < cfg.stpmin || alpha0 > cfg.stpmax {
            return Err(LineSearchError::StepOutOfBounds {
                alpha: alpha0.to_f64().unwrap_or(f64::NAN),
                stpmin: cfg.stpmin.to_f64().unwrap_or(f64::NAN),
                stpmax: cfg.stpmax.to_f64().unwrap_or(f64::NAN),
            });
        }
        if g0 >= float!(F, 0.0) {
            return Err(LineSearchError::NonDescentDirection {
                dginit: g0.to_f64().unwrap_or(f64::NAN),
            });
        }

        let zero = float!(F, 0.0);
        Ok(SearchState {
            stage: Stage::One,
            bracketed: false,
            stx: Endpoint::new(zero, f0, g0),
            sty: Endpoint::new(zero, f0, g0),
            finit: f0,
            dginit: g0,
            dgtest: cfg.ftol * g0,
            stmin: zero,
            stmax: alpha0 + float!(F, 4.0) * alpha0,
            width: cfg.stpmax - cfg.stpmin,
            width1: float!(F, 2.0) * (cfg.stpmax - cfg.stpmin),
            evaluations: 0,
        })
    }

    /// Advance the search by one evaluation.
    ///
    /// `alpha` must be the step most recently returned by `start` or `step`; `f`/`g` are the
    /// objective value and directional derivative evaluated there. Returns the next trial step
    /// and a [`TerminationStatus`]: on `NeedEval` evaluate again at the returned step, otherwise
    /// the search is over and the returned step is the best one found.
    #[allow(clippy::float_cmp)]
    pub fn step(
        &mut self,
        alpha: F,
        f: F,
        g: F,
        cfg: &LineSearchConfig<F>,
    ) -> Result<(F, TerminationStatus), LineSearchError> {
        if !f.is_finite() || !g.is_finite() {
            return Err(linesearch_error!(
                NonFiniteEvaluation,
                "SearchState::step: f/g must be finite"
            ));
        }

        let ftest = self.finit + alpha * self.dgtest;

        // 1. Stage transition (monotone: One -> Two only).
        if self.stage == Stage::One && f <= ftest && g >= float!(F, 0.0) {
            self.stage = Stage::Two;
            #[cfg(feature = "tracing-logger")]
            tracing::debug!(alpha = ?alpha, "line search switching from stage 1 to stage 2");
        }

        // 2. Warnings, in priority order.
        let mut status = None;
        if self.bracketed && (alpha <= self.stmin || alpha >= self.stmax) {
            status = Some(TerminationStatus::WarnRounding);
        } else if self.bracketed && (self.stmax - self.stmin <= cfg.xtol * self.stmax) {
            status = Some(TerminationStatus::WarnXtol);
        } else if alpha == cfg.stpmax && f <= ftest && g <= self.dgtest {
            status = Some(TerminationStatus::WarnStpMax);
        } else if alpha == cfg.stpmin && (f > ftest || g >= self.dgtest) {
            status = Some(TerminationStatus::WarnStpMin);
        }

        // 3. Convergence overrides any warning.
        if f <= ftest && g.abs() <= cfg.gtol * (-self.dginit) {
            status = Some(TerminationStatus::Converged);
        }

        // 4. Terminal: report immediately, state unchanged.
        if let Some(status) = status {
            #[cfg(feature = "tracing-logger")]
            tracing::trace!(?status, alpha = ?alpha, "line search terminated");
            return Ok((alpha, status));
        }

        // 5. Modified-function trick, then the safeguarded interpolation step.
        let outcome = if self.stage == Stage::One && f <= self.stx.fx && f > ftest {
            let gtest = self.dgtest;
            let shifted_stx = Endpoint::new(self.stx.x, self.stx.fx - self.stx.x * gtest, self.stx.gx - gtest);
            let shifted_sty = Endpoint::new(self.sty.x, self.sty.fx - self.sty.x * gtest, self.sty.gx - gtest);
            let shifted_stp = Endpoint::new(alpha, f - alpha * gtest, g - gtest);
            let mut out = dcstep(
                shifted_stx,
                shifted_sty,
                shifted_stp,
                self.bracketed,
                self.stmin,
                self.stmax,
            )?;
            out.stx.fx += out.stx.x * gtest;
            out.sty.fx += out.sty.x * gtest;
            out.stx.gx += gtest;
            out.sty.gx += gtest;
            out
        } else {
            let stp = Endpoint::new(alpha, f, g);
            dcstep(self.stx, self.sty, stp, self.bracketed, self.stmin, self.stmax)?
        };

        if outcome.info == 0 {
            return Err(linesearch_error!(
                ConditionViolated,
                "SearchState::step: dcstep preconditions were violated"
            ));
        }

        #[cfg(feature = "tracing-logger")]
        if !self.bracketed && outcome.bracketed {
            tracing::debug!(
                stx = ?outcome.stx.x,
                sty = ?outcome.sty.x,
                "line search bracketed the minimizer"
            );
        }
        self.stx = outcome.stx;
        self.sty = outcome.sty;
        self.bracketed = outcome.bracketed;
        let mut new_alpha = outcome.stp.x;

        // 6. Bisection guard.
        if self.bracketed && (self.sty.x - self.stx.x).abs() >= float!(F, 0.66) * self.width1 {
            new_alpha = self.stx.x + float!(F, 0.5) * (self.sty.x - self.stx.x);
        }
        self.width1 = self.width;
        self.width = (self.sty.x - self.stx.x).abs();

        // 7. Dynamic bounds for the next call.
        if self.bracketed {
            self.stmin = self.stx.x.min(self.sty.x);
            self.stmax = self.stx.x.max(self.sty.x);
        } else {
            self.stmin = new_alpha + float!(F, 1.1) * (new_alpha - self.stx.x);
            self.stmax = new_alpha + float!(F, 4.0) * (new_alpha - self.stx.x);
        }

        // 8. Clamp and, for a doomed trial, fall back to the best step found so far.
        new_alpha = new_alpha.max(cfg.stpmin).min(cfg.stpmax);
        if (self.bracketed && (new_alpha <= self.stmin || new_alpha >= self.stmax))
            || (self.bracketed && self.stmax - self.stmin <= cfg.xtol * self.stmax)
        {
            new_alpha = self.stx.x;
        }

        // 9. Ask the caller to evaluate the new trial.
        Ok((new_alpha, TerminationStatus::NeedEval))
    }

    /// The current stage (`One` interpolates on ψ, `Two` on f directly).
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Whether the minimum is currently bracketed.
    pub fn bracketed(&self) -> bool {
        self.bracketed
    }

    /// The best endpoint found so far.
    pub fn best(&self) -> Endpoint<F> {
        self.stx
    }

    /// Number of evaluations attributed to this search by a frontend. `start`/`step` never
    /// update this; see the type-level documentation.
    pub fn evaluations(&self) -> u32 {
        self.evaluations
    }

    /// Record one evaluation against this search. Called by frontends driving the
    /// reverse-communication loop; `start`/`step` never call this themselves.
    pub fn record_evaluation(&mut self) {
        self.evaluations += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LineSearchConfig;
    use approx::assert_relative_eq;

    fn quadratic(alpha: f64) -> (f64, f64) {
        // f(x) = 1/2 x^2 along d = -1 from x0 = 1: phi(a) = 1/2 (1-a)^2, phi'(a) = -(1-a)
        (0.5 * (1.0 - alpha).powi(2), -(1.0 - alpha))
    }

    #[test]
    fn ideal_newton_step_converges_in_one_evaluation() {
        let cfg = LineSearchConfig::<f64>::default();
        let (f0, g0) = quadratic(0.0);
        let mut state = SearchState::start(f0, g0, 1.0, &cfg).unwrap();
        let (f1, g1) = quadratic(1.0);
        let (alpha, status) = state.step(1.0, f1, g1, &cfg).unwrap();
        assert_eq!(status, TerminationStatus::Converged);
        assert_relative_eq!(alpha, 1.0);
    }

    #[test]
    fn start_rejects_non_descent_direction() {
        let cfg = LineSearchConfig::<f64>::default();
        let err = SearchState::start(1.0, 1.0, 1.0, &cfg).unwrap_err();
        assert!(matches!(err, LineSearchError::NonDescentDirection { .. }));
    }

    #[test]
    fn start_rejects_step_out_of_bounds() {
        let cfg = LineSearchConfig::<f64>::default().with_bounds(1e-3, 1.0).unwrap();
        let err = SearchState::start(1.0, -1.0, 5.0, &cfg).unwrap_err();
        assert!(matches!(err, LineSearchError::StepOutOfBounds { .. }));
    }

    #[test]
    fn stage_transitions_once_past_the_minimizer() {
        let cfg = LineSearchConfig::<f64>::default();
        let (f0, g0) = quadratic(0.0);
        let mut state = SearchState::start(f0, g0, 1.2, &cfg).unwrap();
        assert_eq!(state.stage(), Stage::One);
        let (f1, g1) = quadratic(1.2);
        let _ = state.step(1.2, f1, g1, &cfg).unwrap();
        assert_eq!(state.stage(), Stage::Two);
    }
}
