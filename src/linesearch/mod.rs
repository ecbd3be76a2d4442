// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Safeguarded line search
//!
//! A Moré-Thuente line search satisfying the strong Wolfe conditions, exposed three ways:
//!
//! - raw reverse communication via [`SearchState`] for callers that want to drive the evaluation
//!   loop themselves (e.g. interleaved with an outer solver's own state),
//! - [`strong_wolfe_search`], a convenience loop around `SearchState` that owns the evaluation
//!   loop and the evaluation budget,
//! - [`armijo_search`], a simple backtracking search sharing no state with the above beyond the
//!   [`LineSearchCondition`] trait.

/// Step-acceptance conditions (Armijo, Wolfe, strong Wolfe)
mod condition;
/// Reverse-communication driver (`SearchState`, `Stage`, `TerminationStatus`)
mod driver;
/// Caller-supplied evaluation contract
mod evaluator;
/// `strong_wolfe_search` / `armijo_search` convenience frontends
mod frontend;
/// Safeguarded cubic/quadratic interpolation step (`dcstep`)
mod step;

pub use condition::{ArmijoCondition, LineSearchCondition, StrongWolfeCondition, WolfeCondition};
pub use driver::{SearchState, Stage, TerminationStatus};
pub use evaluator::Evaluator;
#[cfg(feature = "vector")]
pub use evaluator::DirectionalEvaluator;
pub use frontend::{armijo_search, strong_wolfe_search, BacktrackingConfig, SearchResult};
pub use step::{dcstep, DcstepOutcome, Endpoint};
