// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::core::{LineSearchConfig, LineSearchError, LineSearchFloat};
use crate::linesearch::driver::{SearchState, TerminationStatus};
use crate::linesearch::evaluator::Evaluator;
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Result of a completed [`strong_wolfe_search`] or [`armijo_search`].
#[derive(Clone, Copy, Debug)]
pub struct SearchResult<F> {
    /// The accepted (or best-found, on a warning) step
    pub alpha: F,
    /// Objective value at `alpha`
    pub f: F,
    /// Directional derivative at `alpha`
    pub g: F,
    /// Why the search stopped
    pub status: TerminationStatus,
    /// Number of evaluator calls performed
    pub nfev: u32,
}

/// Drive a [`SearchState`] to completion against an [`Evaluator`], enforcing `cfg.maxfev`.
///
/// Constructs the state via [`SearchState::start`], then calls `evaluate` every time `step`
/// returns `NeedEval`, until a terminal status is reached or the evaluation budget runs out (in
/// which case the search ends with `TerminationStatus::WarnMaxFev`; the raw driver itself never
/// produces that status, only this frontend does).
pub fn strong_wolfe_search<F, E>(
    f0: F,
    g0: F,
    mut evaluate: E,
    alpha0: F,
    cfg: &LineSearchConfig<F>,
) -> Result<SearchResult<F>, LineSearchError>
where
    F: LineSearchFloat,
    E: Evaluator<F>,
{
    let mut state = SearchState::start(f0, g0, alpha0, cfg)?;
    let mut alpha = alpha0;
    let (mut f, mut g) = evaluate.evaluate(alpha)?;
    let mut nfev: u32 = 1;
    state.record_evaluation();

    loop {
        let (next_alpha, status) = state.step(alpha, f, g, cfg)?;
        match status {
            TerminationStatus::NeedEval => {
                if nfev >= cfg.maxfev {
                    return Ok(SearchResult {
                        alpha,
                        f,
                        g,
                        status: TerminationStatus::WarnMaxFev,
                        nfev,
                    });
                }
                alpha = next_alpha;
                let (new_f, new_g) = evaluate.evaluate(alpha)?;
                f = new_f;
                g = new_g;
                nfev += 1;
                state.record_evaluation();
            }
            terminal => {
                return Ok(SearchResult {
                    alpha: next_alpha,
                    f,
                    g,
                    status: terminal,
                    nfev,
                });
            }
        }
    }
}

/// Configuration for the [`armijo_search`] backtracking frontend.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct BacktrackingConfig<F> {
    rho: F,
}

impl<F> Default for BacktrackingConfig<F>
where
    F: LineSearchFloat,
{
    fn default() -> Self {
        BacktrackingConfig {
            rho: float!(F, 0.5),
        }
    }
}

impl<F> BacktrackingConfig<F>
where
    F: LineSearchFloat,
{
    /// Construct a new `BacktrackingConfig` with the default contraction factor `rho = 0.5`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the contraction factor. Must be in `(0, 1)`.
    pub fn with_rho(mut self, rho: F) -> Result<Self, LineSearchError> {
        if rho <= float!(F, 0.0) || rho >= float!(F, 1.0) {
            return Err(linesearch_error!(
                InvalidParameter,
                "BacktrackingConfig: rho must be in (0, 1)"
            ));
        }
        self.rho = rho;
        Ok(self)
    }
}

/// Simple backtracking (Armijo) line search, independent of [`SearchState`]/`dcstep`.
///
/// Starting from `alpha0`, while `f(alpha) > f(0) + cfg.ftol * alpha * f'(0)`, shrinks
/// `alpha <- rho * alpha`, floored at `cfg.stpmin`. Emits `TerminationStatus::Converged` on the
/// first accepted step, `TerminationStatus::WarnStpMin` if the floor is reached first, and
/// `TerminationStatus::WarnMaxFev` if `cfg.maxfev` evaluations are exhausted first.
pub fn armijo_search<F, E>(
    f0: F,
    g0: F,
    mut evaluate: E,
    alpha0: F,
    cfg: &LineSearchConfig<F>,
    backtracking: &BacktrackingConfig<F>,
) -> Result<SearchResult<F>, LineSearchError>
where
    F: LineSearchFloat,
    E: Evaluator<F>,
{
    if g0 >= float!(F, 0.0) {
        return Err(LineSearchError::NonDescentDirection {
            dginit: g0.to_f64().unwrap_or(f64::NAN),
        });
    }
    if alpha0 < cfg.stpmin || alpha0 > cfg.stpmax {
        return Err(LineSearchError::StepOutOfBounds {
            alpha: alpha0.to_f64().unwrap_or(f64::NAN),
            stpmin: cfg.stpmin.to_f64().unwrap_or(f64::NAN),
            stpmax: cfg.stpmax.to_f64().unwrap_or(f64::NAN),
        });
    }

    let mut alpha = alpha0;
    let mut nfev: u32 = 0;

    loop {
        let (f, g) = evaluate.evaluate(alpha)?;
        nfev += 1;
        if f <= f0 + cfg.ftol * alpha * g0 {
            return Ok(SearchResult {
                alpha,
                f,
                g,
                status: TerminationStatus::Converged,
                nfev,
            });
        }
        if alpha <= cfg.stpmin {
            return Ok(SearchResult {
                alpha,
                f,
                g,
                status: TerminationStatus::WarnStpMin,
                nfev,
            });
        }
        if nfev >= cfg.maxfev {
            return Ok(SearchResult {
                alpha,
                f,
                g,
                status: TerminationStatus::WarnMaxFev,
                nfev,
            });
        }
        alpha = (backtracking.rho * alpha).max(cfg.stpmin);
    }
}
