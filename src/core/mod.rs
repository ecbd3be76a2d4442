// Copyright 2018-2022 argmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Core types shared by the line search kernel: the error type, the configuration struct, and
//! the float trait alias the generic code is built on.

/// Macros
#[macro_use]
pub mod macros;
/// Search configuration (`ftol`, `gtol`, `xtol`, step bounds, evaluation budget)
mod config;
/// Error handling
mod error;
/// Trait alias for float types
mod float;

pub use config::LineSearchConfig;
pub use error::LineSearchError;
pub use float::LineSearchFloat;
