// Copyright 2021 CoD Technologies Corp.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Fixed-point decimal arithmetic on `i64` unscaled values with a scale between 0 and 18.
//!
//! A decimal value `v` of scale `s` is represented by the unscaled integer `v * 10^s`. All
//! operations work on unscaled values without heap allocations, and division by the scale
//! factor is done with a precomputed reciprocal multiplication.
//!
//! Every inexact result is rounded according to a [`RoundingMode`], and every result out of
//! the `i64` range is reported according to an [`OverflowMode`]. Both together make up a
//! [`TruncationPolicy`].
//!
//! ## Optional features
//!
//! ### `serde`
//!
//! When this optional dependency is enabled, `Decimal` and `MutableDecimal` implement the
//! `serde::Serialize` and `serde::Deserialize` traits.
//!
//! ## Usage
//!
//! To compute with typed decimals, use [`Decimal`]:
//!
//! ```
//! use fixed_decimal::Decimal;
//!
//! let n1: Decimal<2> = "1.50".parse().unwrap();
//! let n2: Decimal<2> = "2.50".parse().unwrap();
//! let result = n1 + n2;
//! assert_eq!(result.to_string(), "4.00");
//! assert_eq!(result.unscaled(), 400);
//! ```
//!
//! To compute on raw unscaled values, use an [`Arithmetic`]:
//!
//! ```
//! use fixed_decimal::{Arithmetic, ArithmeticError, RoundingMode};
//!
//! let arith = Arithmetic::with_scale(2, RoundingMode::HalfUp.checked()).unwrap();
//! assert_eq!(arith.divide(100, 300), Ok(33));
//! assert_eq!(arith.multiply(i64::MAX, 200), Err(ArithmeticError::Overflow));
//!
//! let exact = arith.with_policy(RoundingMode::Unnecessary.checked());
//! assert_eq!(exact.divide(100, 300), Err(ArithmeticError::Inexact));
//!
//! let unchecked = arith.with_policy(RoundingMode::HalfUp.unchecked());
//! assert_eq!(unchecked.multiply(i64::MAX, 200), Ok(i64::MAX.wrapping_mul(2)));
//! ```
//!
//! Shifts round toward negative infinity by default, like arithmetic shifts of integers.
//!
//! ```
//! use fixed_decimal::Decimal;
//!
//! let n = Decimal::<2>::from_unscaled(-1);
//! assert_eq!(n.shift_right(1).unwrap().unscaled(), -1);
//! assert_eq!(Decimal::<2>::from_unscaled(400).sqrt().unwrap().unscaled(), 200);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod arith;
mod convert;
mod decimal;
mod error;
mod fmt;
mod mutable;
mod ops;
mod parse;
mod policy;
mod power;
mod rounding;
mod scale;

#[cfg(feature = "serde")]
mod serde;

pub use crate::arith::Arithmetic;
pub use crate::decimal::Decimal;
pub use crate::error::{ArithmeticError, DecimalParseError};
pub use crate::fmt::DisplayUnscaled;
pub use crate::mutable::MutableDecimal;
pub use crate::policy::{OverflowMode, TruncationPolicy};
pub use crate::rounding::{RoundingMode, TruncatedPart};
pub use crate::scale::{ScaleMetrics, MAX_SCALE, SCALE_METRICS};
