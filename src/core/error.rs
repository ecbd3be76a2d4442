// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Errors

use thiserror::Error;

/// Line search error type
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LineSearchError {
    /// Indicates an invalid configuration parameter
    #[error("Invalid parameter: {text:?}")]
    InvalidParameter {
        /// Text
        text: String,
    },

    /// Indicates that the supplied direction is not a descent direction, i.e. `f'(0) >= 0`
    #[error("Search direction is not a descent direction: f'(0) = {dginit} >= 0")]
    NonDescentDirection {
        /// The offending initial directional derivative
        dginit: f64,
    },

    /// Indicates that a step lies outside of `[stpmin, stpmax]`
    #[error("Initial step {alpha} is outside of [{stpmin}, {stpmax}]")]
    StepOutOfBounds {
        /// The rejected step
        alpha: f64,
        /// Lower bound
        stpmin: f64,
        /// Upper bound
        stpmax: f64,
    },

    /// Indicates that a non-finite value was encountered during the search
    #[error("Non-finite value encountered: {text:?}")]
    NonFiniteEvaluation {
        /// Text
        text: String,
    },

    /// Indicates that a condition is violated
    #[error("Condition violated: {text:?}")]
    ConditionViolated {
        /// Text
        text: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    send_sync_test!(error, LineSearchError);
}
