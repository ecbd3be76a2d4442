// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use num_traits::{Float, FloatConst, FromPrimitive, ToPrimitive};
use std::fmt::{Debug, Display};

/// An alias for float types (`f32`, `f64`) which combines the numeric traits the line search
/// kernel needs from `num_traits` together with `std::fmt`. It is automatically implemented for
/// all types which fulfill the trait bounds, mirroring the teacher crate's `ArgminFloat`.
#[cfg(not(feature = "serde1"))]
pub trait LineSearchFloat:
    'static + Float + FloatConst + FromPrimitive + ToPrimitive + Debug + Display
{
}

#[cfg(not(feature = "serde1"))]
impl<I> LineSearchFloat for I where
    I: 'static + Float + FloatConst + FromPrimitive + ToPrimitive + Debug + Display
{
}

/// An alias for float types (`f32`, `f64`) which combines the numeric traits the line search
/// kernel needs from `num_traits`, `std::fmt`, and (since `serde1` is enabled) `serde`.
#[cfg(feature = "serde1")]
pub trait LineSearchFloat:
    'static
    + Float
    + FloatConst
    + FromPrimitive
    + ToPrimitive
    + Debug
    + Display
    + serde::Serialize
    + serde::de::DeserializeOwned
{
}

#[cfg(feature = "serde1")]
impl<I> LineSearchFloat for I where
    I: 'static
        + Float
        + FloatConst
        + FromPrimitive
        + ToPrimitive
        + Debug
        + Display
        + serde::Serialize
        + serde::de::DeserializeOwned
{
}
