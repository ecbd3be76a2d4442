// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::core::LineSearchError;

/// The capability a line search frontend needs from its caller: evaluate the objective and its
/// directional derivative at a trial step.
///
/// `g` is `f′(alpha)`, the derivative of the objective restricted to the search ray, not a full
/// gradient. Callers with a vector problem typically project their gradient onto the search
/// direction before returning it (see [`DirectionalEvaluator`] behind the `vector` feature for a
/// ready-made adapter).
///
/// Implementations are not required to check `alpha`/`f`/`g` for finiteness themselves;
/// [`SearchState::step`](crate::linesearch::SearchState::step) rejects a non-finite `f`/`g` the
/// moment it receives one, before anything else touches it.
pub trait Evaluator<F> {
    /// Evaluate the objective and its directional derivative at `alpha`.
    fn evaluate(&mut self, alpha: F) -> Result<(F, F), LineSearchError>;
}

impl<F, T> Evaluator<F> for T
where
    T: FnMut(F) -> Result<(F, F), LineSearchError>,
{
    fn evaluate(&mut self, alpha: F) -> Result<(F, F), LineSearchError> {
        self(alpha)
    }
}

#[cfg(feature = "vector")]
mod directional {
    use super::Evaluator;
    use crate::core::{LineSearchError, LineSearchFloat};
    use argmin_math::{ArgminDot, ArgminScaledAdd};

    /// Adapts a vector cost-and-gradient problem into an [`Evaluator`] along a fixed direction.
    ///
    /// Computes `x0 + alpha * direction`, evaluates `cost`/`gradient` there, and projects the
    /// gradient onto `direction` with [`ArgminDot`] to obtain the directional derivative
    /// `Evaluator` expects. Grounded in the vector-problem handling of the teacher's
    /// `MoreThuenteLineSearch`/`BacktrackingLineSearch` solvers, which perform the same
    /// `scaled_add` + `dot` pair internally.
    pub struct DirectionalEvaluator<'a, P, G, F> {
        x0: &'a P,
        direction: &'a P,
        cost_fn: Box<dyn FnMut(&P) -> Result<F, LineSearchError> + 'a>,
        grad_fn: Box<dyn FnMut(&P) -> Result<G, LineSearchError> + 'a>,
    }

    impl<'a, P, G, F> DirectionalEvaluator<'a, P, G, F> {
        /// Construct an adapter evaluating `cost_fn`/`grad_fn` at `x0 + alpha * direction`.
        pub fn new(
            x0: &'a P,
            direction: &'a P,
            cost_fn: impl FnMut(&P) -> Result<F, LineSearchError> + 'a,
            grad_fn: impl FnMut(&P) -> Result<G, LineSearchError> + 'a,
        ) -> Self {
            DirectionalEvaluator {
                x0,
                direction,
                cost_fn: Box::new(cost_fn),
                grad_fn: Box::new(grad_fn),
            }
        }
    }

    impl<'a, P, G, F> Evaluator<F> for DirectionalEvaluator<'a, P, G, F>
    where
        P: ArgminScaledAdd<P, F, P>,
        G: ArgminDot<P, F>,
        F: LineSearchFloat,
    {
        fn evaluate(&mut self, alpha: F) -> Result<(F, F), LineSearchError> {
            let x = self.x0.scaled_add(&alpha, self.direction);
            let f = (self.cost_fn)(&x)?;
            let grad = (self.grad_fn)(&x)?;
            let g = grad.dot(self.direction);
            Ok((f, g))
        }
    }
}

#[cfg(feature = "vector")]
pub use directional::DirectionalEvaluator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_satisfy_evaluator() {
        let mut calls = 0;
        let mut eval = |alpha: f64| -> Result<(f64, f64), LineSearchError> {
            calls += 1;
            Ok((0.5 * alpha * alpha, alpha))
        };
        let (f, g) = eval.evaluate(2.0).unwrap();
        assert_eq!((f, g), (2.0, 2.0));
        assert_eq!(calls, 1);
    }
}
