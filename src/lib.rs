// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! `wolfe-linesearch` is a safeguarded one-dimensional line search satisfying the strong Wolfe
//! conditions (sufficient decrease plus a curvature condition), implementing the classical
//! Moré-Thuente algorithm.
//!
//! The crate is a pure numeric kernel: it evaluates nothing itself. Instead it exposes a
//! reverse-communication [`SearchState`](crate::linesearch::SearchState) that the caller drives,
//! plus two convenience frontends ([`strong_wolfe_search`](crate::linesearch::strong_wolfe_search)
//! and [`armijo_search`](crate::linesearch::armijo_search)) that own the evaluation loop for the
//! common case of a caller-supplied closure.
//!
//! This kernel is the building block outer solvers (L-BFGS, trust-region-free Newton variants,
//! general NLP globalization) rely on for convergence; it does not itself implement any of those
//! outer solvers.
//!
//! # Example
//!
//! ```
//! use wolfe_linesearch::core::LineSearchConfig;
//! use wolfe_linesearch::linesearch::strong_wolfe_search;
//!
//! let cfg = LineSearchConfig::default();
//! let phi = |a: f64| 0.5 * (1.0 - a).powi(2);
//! let dphi = |a: f64| -(1.0 - a);
//!
//! let result = strong_wolfe_search(phi(0.0), dphi(0.0), |a: f64| Ok((phi(a), dphi(a))), 1.0, &cfg)
//!     .expect("search should not error");
//! assert!((result.alpha - 1.0).abs() < 1e-8);
//! ```
//!
//! # License
//!
//! Licensed under either of
//!
//!   * Apache License, Version 2.0,
//!     ([LICENSE-APACHE](https://github.com/argmin-rs/argmin/blob/main/LICENSE-APACHE) or
//!     <http://www.apache.org/licenses/LICENSE-2.0>)
//!   * MIT License ([LICENSE-MIT](https://github.com/argmin-rs/argmin/blob/main/LICENSE-MIT) or
//!     <http://opensource.org/licenses/MIT>)
//!
//! at your option.
//!
//! ## Contribution
//!
//! Unless you explicitly state otherwise, any contribution intentionally submitted for inclusion
//! in the work by you, as defined in the Apache-2.0 license, shall be dual licensed as above,
//! without any additional terms or conditions.

#![warn(missing_docs)]
#![allow(unused_attributes)]
// Explicitly disallow EQ comparison of floats. (This clippy lint is denied by default; however,
// this is just to make sure that it will always stay this way.) `SearchState::step` locally
// allows it where the reference algorithm relies on exact bound equality.
#![deny(clippy::float_cmp)]

#[macro_use]
pub mod core;

/// Safeguarded line search (`dcstep`, `SearchState`, conditions, frontends)
pub mod linesearch;
