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

//! Arithmetic on unscaled values.

use crate::error::ArithmeticError;
use crate::policy::{OverflowMode, TruncationPolicy};
use crate::rounding::{RoundingMode, TruncatedPart};
use crate::scale::{ScaleMetrics, MAX_SCALE, SCALE_METRICS};
use std::cmp::Ordering;
use std::convert::TryFrom;

/// `10^38` is the largest power of ten fitting into an `i128`.
const MAX_I128_POW10: u32 = 38;

#[inline]
const fn pow10_i128(n: u32) -> i128 {
    10_i128.pow(n)
}

/// Returns `10^n mod 2^64` as a two's complement `i64`.
#[inline]
pub(crate) fn wrapping_pow10(n: u32) -> i64 {
    10_i64.wrapping_pow(n)
}

/// The arithmetic of one scale under one truncation policy.
///
/// All operands and results are unscaled `i64` values: the number `v` stands for
/// `v / 10^scale`. Every operation either produces the exact result, or the exact result
/// rounded by the rounding mode of the policy, and reports results not fitting into 64 bits
/// according to the overflow mode of the policy.
///
/// An `Arithmetic` is a small `Copy` value, so create one wherever needed:
///
/// ```
/// use fixed_decimal::{ArithmeticError, RoundingMode, ScaleMetrics};
///
/// let metrics = ScaleMetrics::get(2).unwrap();
/// let arith = metrics.arithmetic(RoundingMode::HalfUp.checked());
/// assert_eq!(arith.add(150, 250), Ok(400));
/// assert_eq!(arith.divide(100, 3), Ok(3333));
///
/// let exact = metrics.arithmetic(RoundingMode::Unnecessary.checked());
/// assert_eq!(exact.divide(100, 3), Err(ArithmeticError::Inexact));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Arithmetic {
    metrics: &'static ScaleMetrics,
    policy: TruncationPolicy,
}

impl Arithmetic {
    #[inline]
    pub const fn new(metrics: &'static ScaleMetrics, policy: TruncationPolicy) -> Arithmetic {
        Arithmetic { metrics, policy }
    }

    /// Returns the arithmetic of `scale` bound to `policy`.
    #[inline]
    pub fn with_scale(scale: i32, policy: TruncationPolicy) -> Result<Arithmetic, ArithmeticError> {
        Ok(ScaleMetrics::get(scale)?.arithmetic(policy))
    }

    #[inline]
    pub const fn metrics(&self) -> &'static ScaleMetrics {
        self.metrics
    }

    #[inline]
    pub const fn scale(&self) -> u8 {
        self.metrics.scale()
    }

    #[inline]
    pub const fn policy(&self) -> TruncationPolicy {
        self.policy
    }

    #[inline]
    pub const fn rounding_mode(&self) -> RoundingMode {
        self.policy.rounding_mode()
    }

    #[inline]
    pub const fn overflow_mode(&self) -> OverflowMode {
        self.policy.overflow_mode()
    }

    /// Returns the same scale bound to another policy.
    #[inline]
    pub const fn with_policy(&self, policy: TruncationPolicy) -> Arithmetic {
        Arithmetic::new(self.metrics, policy)
    }

    /// Returns the unscaled value of `1`.
    #[inline]
    pub const fn one(&self) -> i64 {
        self.metrics.scale_factor()
    }

    /// Reports an overflowed result, `wrapped` being its low 64 bits.
    #[inline]
    pub(crate) fn overflowed(&self, wrapped: i64) -> Result<i64, ArithmeticError> {
        match self.overflow_mode() {
            OverflowMode::Checked => Err(ArithmeticError::Overflow),
            OverflowMode::Unchecked => Ok(wrapped),
        }
    }

    /// Narrows an exact 128-bit result.
    #[inline]
    pub(crate) fn narrow(&self, value: i128) -> Result<i64, ArithmeticError> {
        match i64::try_from(value) {
            Ok(v) => Ok(v),
            Err(_) => self.overflowed(value as i64),
        }
    }

    #[inline]
    fn increment(&self, negative: bool, truncated: i64, part: TruncatedPart) -> Result<i32, ArithmeticError> {
        let sign = if negative { -1 } else { 1 };
        self.rounding_mode().calculate_rounding_increment(sign, truncated, part)
    }

    /// Rounds a magnitude truncated toward zero and applies the sign.
    ///
    /// `truncated` holds the low 128 bits of the truncated magnitude, `wide` is set if the
    /// magnitude itself needs more than 128 bits.
    pub(crate) fn round_magnitude(
        &self,
        truncated: u128,
        wide: bool,
        part: TruncatedPart,
        negative: bool,
    ) -> Result<i64, ArithmeticError> {
        let inc = self.increment(negative, truncated as i64, part)?;
        let (magnitude, carry) = truncated.overflowing_add(u128::from(inc != 0));
        let value = if negative {
            (magnitude as i64).wrapping_neg()
        } else {
            magnitude as i64
        };
        let limit = if negative { 1_u128 << 63 } else { i64::MAX as u128 };
        if wide || carry || magnitude > limit {
            self.overflowed(value)
        } else {
            Ok(value)
        }
    }

    /// Divides and rounds the quotient by the exact remainder.
    pub(crate) fn div_round(&self, dividend: i128, divisor: i128) -> Result<i128, ArithmeticError> {
        debug_assert_ne!(divisor, 0);

        let quotient = dividend / divisor;
        let remainder = dividend % divisor;
        if remainder == 0 {
            return Ok(quotient);
        }

        let part = TruncatedPart::of(remainder.unsigned_abs(), divisor.unsigned_abs());
        let inc = self.increment((dividend < 0) != (divisor < 0), quotient as i64, part)?;
        Ok(quotient + i128::from(inc))
    }

    /// Divides by the scale factor of `metrics` and rounds, without a division instruction.
    pub(crate) fn div_round_by(&self, metrics: &ScaleMetrics, value: i64) -> Result<i64, ArithmeticError> {
        let quotient = metrics.divide_by_scale_factor(value);
        let remainder = value.wrapping_sub(metrics.multiply_by_scale_factor(quotient));
        if remainder == 0 {
            return Ok(quotient);
        }

        let part = TruncatedPart::of(
            u128::from(remainder.unsigned_abs()),
            metrics.scale_factor() as u128,
        );
        let inc = self.increment(value < 0, quotient, part)?;
        Ok(quotient + i64::from(inc))
    }

    /// Divides by `10^n` for any `n` and rounds.
    pub(crate) fn div_round_pow10(&self, dividend: i128, n: u32) -> Result<i128, ArithmeticError> {
        if n <= MAX_I128_POW10 {
            return self.div_round(dividend, pow10_i128(n));
        }
        if dividend == 0 {
            return Ok(0);
        }

        // `|dividend| < 2^127` is less than half of `10^39`.
        let inc = self.increment(dividend < 0, 0, TruncatedPart::LessThanHalfButNotZero)?;
        Ok(i128::from(inc))
    }

    /// Computes `a * 10^n`.
    pub(crate) fn scale_up(&self, a: i64, n: u32) -> Result<i64, ArithmeticError> {
        if a == 0 || n == 0 {
            return Ok(a);
        }
        if n <= 19 {
            // |a| * 10^19 < 2^127
            return self.narrow(i128::from(a) * pow10_i128(n));
        }
        self.overflowed(a.wrapping_mul(wrapping_pow10(n)))
    }

    /// Computes `a / 10^n` and rounds.
    pub(crate) fn scale_down(&self, a: i64, n: u32) -> Result<i64, ArithmeticError> {
        if n == 0 {
            return Ok(a);
        }
        if n <= u32::from(MAX_SCALE) {
            return self.div_round_by(&SCALE_METRICS[n as usize], a);
        }
        self.narrow(self.div_round_pow10(i128::from(a), n)?)
    }

    /// Computes `a + b`.
    #[inline]
    pub fn add(&self, a: i64, b: i64) -> Result<i64, ArithmeticError> {
        let sum = a.wrapping_add(b);
        // Overflow iff both operands have the same sign and the sum has the other.
        if (a ^ sum) & (b ^ sum) < 0 {
            self.overflowed(sum)
        } else {
            Ok(sum)
        }
    }

    /// Computes `a - b`.
    #[inline]
    pub fn subtract(&self, a: i64, b: i64) -> Result<i64, ArithmeticError> {
        let diff = a.wrapping_sub(b);
        if (a ^ b) & (a ^ diff) < 0 {
            self.overflowed(diff)
        } else {
            Ok(diff)
        }
    }

    /// Computes `a * b`, rounding the digits beyond the scale.
    #[inline]
    pub fn multiply(&self, a: i64, b: i64) -> Result<i64, ArithmeticError> {
        self.rescale_product(i128::from(a) * i128::from(b))
    }

    /// Computes `a * a`.
    #[inline]
    pub fn square(&self, a: i64) -> Result<i64, ArithmeticError> {
        let a = i128::from(a);
        self.rescale_product(a * a)
    }

    fn rescale_product(&self, product: i128) -> Result<i64, ArithmeticError> {
        if let Ok(product) = i64::try_from(product) {
            return self.div_round_by(self.metrics, product);
        }
        if self.scale() == 0 {
            return self.narrow(product);
        }
        let rounded = self.div_round(product, i128::from(self.one()))?;
        self.narrow(rounded)
    }

    /// Computes `a * n` for an integer `n`, which is always exact.
    #[inline]
    pub fn multiply_by_long(&self, a: i64, n: i64) -> Result<i64, ArithmeticError> {
        self.narrow(i128::from(a) * i128::from(n))
    }

    /// Computes `a / b`.
    #[inline]
    pub fn divide(&self, a: i64, b: i64) -> Result<i64, ArithmeticError> {
        if b == 0 {
            return Err(ArithmeticError::DivisionByZero);
        }
        let dividend = i128::from(a) * i128::from(self.one());
        let quotient = self.div_round(dividend, i128::from(b))?;
        self.narrow(quotient)
    }

    /// Computes `a / n` for an integer `n`.
    #[inline]
    pub fn divide_by_long(&self, a: i64, n: i64) -> Result<i64, ArithmeticError> {
        if n == 0 {
            return Err(ArithmeticError::DivisionByZero);
        }
        let quotient = self.div_round(i128::from(a), i128::from(n))?;
        self.narrow(quotient)
    }

    /// Computes `a + b / 10^b_scale`, rounding once if `b_scale` exceeds the scale.
    #[inline]
    pub fn add_unscaled(&self, a: i64, b: i64, b_scale: i32) -> Result<i64, ArithmeticError> {
        self.add_scaled(a, i128::from(b), b_scale)
    }

    /// Computes `a - b / 10^b_scale`, rounding once if `b_scale` exceeds the scale.
    #[inline]
    pub fn subtract_unscaled(&self, a: i64, b: i64, b_scale: i32) -> Result<i64, ArithmeticError> {
        self.add_scaled(a, -i128::from(b), b_scale)
    }

    fn add_scaled(&self, a: i64, b: i128, b_scale: i32) -> Result<i64, ArithmeticError> {
        let b_scale = ScaleMetrics::get(b_scale)?.scale();
        let scale = self.scale();
        if b_scale <= scale {
            let factor = pow10_i128(u32::from(scale - b_scale));
            return self.narrow(i128::from(a) + b * factor);
        }

        let divisor = pow10_i128(u32::from(b_scale - scale));
        let sum = self.div_round(i128::from(a) * divisor + b, divisor)?;
        self.narrow(sum)
    }

    /// Computes `a * (b / 10^b_scale)`.
    #[inline]
    pub fn multiply_by_unscaled(&self, a: i64, b: i64, b_scale: i32) -> Result<i64, ArithmeticError> {
        let b_metrics = ScaleMetrics::get(b_scale)?;
        let product = self.div_round(i128::from(a) * i128::from(b), i128::from(b_metrics.scale_factor()))?;
        self.narrow(product)
    }

    /// Computes `a / (b / 10^b_scale)`.
    #[inline]
    pub fn divide_by_unscaled(&self, a: i64, b: i64, b_scale: i32) -> Result<i64, ArithmeticError> {
        let b_metrics = ScaleMetrics::get(b_scale)?;
        if b == 0 {
            return Err(ArithmeticError::DivisionByZero);
        }
        let dividend = i128::from(a) * i128::from(b_metrics.scale_factor());
        let quotient = self.div_round(dividend, i128::from(b))?;
        self.narrow(quotient)
    }

    /// Computes `1 / a`.
    #[inline]
    pub fn invert(&self, a: i64) -> Result<i64, ArithmeticError> {
        self.divide(self.one(), a)
    }

    /// Computes the integral part of `a / b` as a value of this scale.
    ///
    /// The quotient is truncated toward zero, the rounding mode is not used.
    #[inline]
    pub fn divide_to_integral_value(&self, a: i64, b: i64) -> Result<i64, ArithmeticError> {
        if b == 0 {
            return Err(ArithmeticError::DivisionByZero);
        }
        let quotient = i128::from(a) / i128::from(b);
        self.narrow(quotient * i128::from(self.one()))
    }

    /// Computes the integral part of `a / b` and the remainder `a - b * trunc(a / b)`.
    ///
    /// The remainder is always exact and has the sign of `a`.
    #[inline]
    pub fn divide_and_remainder(&self, a: i64, b: i64) -> Result<(i64, i64), ArithmeticError> {
        if b == 0 {
            return Err(ArithmeticError::DivisionByZero);
        }
        let quotient = i128::from(a) / i128::from(b);
        let integral = self.narrow(quotient * i128::from(self.one()))?;
        Ok((integral, a.wrapping_rem(b)))
    }

    /// Computes `a - b * trunc(a / b)`, which is always exact.
    #[inline]
    pub fn remainder(&self, a: i64, b: i64) -> Result<i64, ArithmeticError> {
        if b == 0 {
            return Err(ArithmeticError::DivisionByZero);
        }
        Ok(a.wrapping_rem(b))
    }

    /// Computes `(a + b) / 2`.
    #[inline]
    pub fn avg(&self, a: i64, b: i64) -> Result<i64, ArithmeticError> {
        let quotient = self.div_round(i128::from(a) + i128::from(b), 2)?;
        self.narrow(quotient)
    }

    /// Computes `-a`, which only overflows for `i64::MIN`.
    #[inline]
    pub fn negate(&self, a: i64) -> Result<i64, ArithmeticError> {
        if a == i64::MIN {
            self.overflowed(a)
        } else {
            Ok(-a)
        }
    }

    #[inline]
    pub fn abs(&self, a: i64) -> Result<i64, ArithmeticError> {
        if a < 0 {
            self.negate(a)
        } else {
            Ok(a)
        }
    }

    #[inline]
    pub fn compare(&self, a: i64, b: i64) -> Ordering {
        a.cmp(&b)
    }

    #[inline]
    pub fn signum(&self, a: i64) -> i32 {
        a.signum() as i32
    }

    /// Rounds `a` to `precision` fractional digits, keeping the scale.
    ///
    /// Nothing happens if `precision` is not less than the scale, and `precision` may be
    /// negative to round to tens, hundreds and so on.
    pub fn round(&self, a: i64, precision: i32) -> Result<i64, ArithmeticError> {
        let scale = i32::from(self.scale());
        if precision >= scale {
            return Ok(a);
        }

        let delta = match scale.checked_sub(precision) {
            Some(delta) => ScaleMetrics::get(delta)?,
            None => return Err(ArithmeticError::InvalidScale),
        };
        let truncated = self.div_round_by(delta, a)?;
        self.narrow(i128::from(truncated) * i128::from(delta.scale_factor()))
    }

    /// Computes `a * 10^n`, `n` may be negative.
    #[inline]
    pub fn multiply_by_power_of_10(&self, a: i64, n: i32) -> Result<i64, ArithmeticError> {
        if n < 0 {
            self.scale_down(a, n.unsigned_abs())
        } else {
            self.scale_up(a, n as u32)
        }
    }

    /// Computes `a / 10^n`, `n` may be negative.
    #[inline]
    pub fn divide_by_power_of_10(&self, a: i64, n: i32) -> Result<i64, ArithmeticError> {
        if n < 0 {
            self.scale_up(a, n.unsigned_abs())
        } else {
            self.scale_down(a, n as u32)
        }
    }
}
