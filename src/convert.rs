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

//! Conversion between unscaled values and other number types.

use crate::arith::Arithmetic;
use crate::decimal::Decimal;
use crate::error::ArithmeticError;
use crate::fmt::{write_unscaled, Buf};
use crate::policy::OverflowMode;
use crate::rounding::{RoundingMode, TruncatedPart};
use std::convert::TryFrom;

/// `10^38` is the largest power of ten fitting into a `u128`.
const MAX_U128_POW10: u32 = 38;

/// Mantissa and binary exponent of a finite `f64`, `value = mantissa * 2^exponent`.
#[inline]
fn decompose_f64(value: f64) -> (bool, u64, i32) {
    let raw = value.to_bits();
    let negative = (raw >> 63) == 1;
    let biased_exponent = ((raw >> 52) & 0x7FF) as i32;
    let mantissa = raw & 0x000F_FFFF_FFFF_FFFF;

    let mut exponent = biased_exponent - 1023;
    let mut bits = mantissa;
    if biased_exponent == 0 {
        // Denormalized number
        exponent += 1;
    } else {
        // Hidden bit
        bits |= 0x0010_0000_0000_0000;
    }

    // The mantissa is an integer, so shift the binary point by 52 bits.
    (negative, bits, exponent - 52)
}

impl Arithmetic {
    /// Converts the integer `value` to an unscaled value.
    #[inline]
    pub fn from_long(&self, value: i64) -> Result<i64, ArithmeticError> {
        match self.metrics().multiply_by_scale_factor_exact(value) {
            Some(v) => Ok(v),
            None => self.overflowed(self.metrics().multiply_by_scale_factor(value)),
        }
    }

    /// Converts `a` to an integer, rounding the fractional digits.
    #[inline]
    pub fn to_long(&self, a: i64) -> Result<i64, ArithmeticError> {
        self.div_round_by(self.metrics(), a)
    }

    /// Converts `value / 10^scale` to an unscaled value of this arithmetic.
    ///
    /// `scale` is not limited to the supported scales, so for example `(5, -3)` stands for `5000`.
    pub fn from_unscaled(&self, value: i64, scale: i32) -> Result<i64, ArithmeticError> {
        let diff = i64::from(self.scale()) - i64::from(scale);
        if diff >= 0 {
            self.scale_up(value, diff as u32)
        } else {
            self.scale_down(value, diff.unsigned_abs() as u32)
        }
    }

    /// Converts `a` to an unscaled value of `scale`, i.e. the inverse of [`Arithmetic::from_unscaled`].
    pub fn to_unscaled(&self, a: i64, scale: i32) -> Result<i64, ArithmeticError> {
        let diff = i64::from(scale) - i64::from(self.scale());
        if diff >= 0 {
            self.scale_up(a, diff as u32)
        } else {
            self.scale_down(a, diff.unsigned_abs() as u32)
        }
    }

    /// Converts a binary floating-point number, rounding its exact value.
    ///
    /// `NaN` and infinities fail with [`ArithmeticError::InvalidOperand`].
    pub fn from_f64(&self, value: f64) -> Result<i64, ArithmeticError> {
        if !value.is_finite() {
            return Err(ArithmeticError::InvalidOperand);
        }
        if value == 0.0 {
            return Ok(0);
        }

        let (negative, bits, exponent) = decompose_f64(value);
        // bits < 2^53 and 10^scale < 2^60
        let scaled = u128::from(bits) * self.one() as u128;

        if exponent >= 0 {
            let shift = exponent as u32;
            // scaled < 2^113, so shifting by 14 bits keeps it below 2^127.
            let (magnitude, wide) = if shift <= 14 {
                (scaled << shift, false)
            } else if shift < 128 {
                (scaled << shift, true)
            } else {
                (0, true)
            };
            return self.round_magnitude(magnitude, wide, TruncatedPart::Zero, negative);
        }

        let shift = exponent.unsigned_abs();
        let (truncated, part) = if shift >= 128 {
            // scaled < 2^113 is less than half of 2^128.
            (0, TruncatedPart::LessThanHalfButNotZero)
        } else {
            let divisor = 1_u128 << shift;
            (scaled >> shift, TruncatedPart::of(scaled & (divisor - 1), divisor))
        };
        self.round_magnitude(truncated, false, part, negative)
    }

    /// Converts a binary floating-point number, rounding its exact value.
    #[inline]
    pub fn from_f32(&self, value: f32) -> Result<i64, ArithmeticError> {
        self.from_f64(f64::from(value))
    }

    /// Converts `a` to the nearest `f64`.
    pub fn to_f64(&self, a: i64) -> f64 {
        const EXACT_LIMIT: u64 = 1 << 53;

        // Both operands are exact, so IEEE division rounds correctly.
        if a.unsigned_abs() <= EXACT_LIMIT && (self.one() as u64) <= EXACT_LIMIT {
            return a as f64 / self.one() as f64;
        }

        let mut buf = Buf::new();
        match write_unscaled(a, self.scale(), &mut buf) {
            Ok(()) => fast_float::parse(buf.as_slice()).unwrap_or_else(|_| a as f64 / self.one() as f64),
            Err(_) => a as f64 / self.one() as f64,
        }
    }

    /// Converts `a` to the nearest `f32`.
    pub fn to_f32(&self, a: i64) -> f32 {
        const EXACT_LIMIT: u64 = 1 << 24;

        if a.unsigned_abs() <= EXACT_LIMIT && (self.one() as u64) <= EXACT_LIMIT {
            return a as f32 / self.one() as f32;
        }

        let mut buf = Buf::new();
        match write_unscaled(a, self.scale(), &mut buf) {
            Ok(()) => fast_float::parse(buf.as_slice()).unwrap_or_else(|_| self.to_f64(a) as f32),
            Err(_) => self.to_f64(a) as f32,
        }
    }

    /// Converts `a` to an arbitrary-precision decimal, which is always exact.
    #[inline]
    pub fn to_big_decimal(&self, a: i64) -> decimal_rs::Decimal {
        let (int_val, scale, negative) = (u128::from(a.unsigned_abs()), i16::from(self.scale()), a < 0);
        // Every i64 has at most 19 digits and every scale is at most 18.
        match decimal_rs::Decimal::from_parts(int_val, scale, negative) {
            Ok(d) => d,
            Err(_) => unreachable!("{} digits at scale {} always fit", int_val, scale),
        }
    }

    /// Converts an arbitrary-precision decimal, rounding the digits beyond the scale.
    pub fn from_big_decimal(&self, value: &decimal_rs::Decimal) -> Result<i64, ArithmeticError> {
        let (int_val, scale, negative) = value.into_parts();
        let diff = i32::from(self.scale()) - i32::from(scale);

        if diff >= 0 {
            let diff = diff as u32;
            if diff <= MAX_U128_POW10 {
                if let Some(magnitude) = int_val.checked_mul(10_u128.pow(diff)) {
                    return self.round_magnitude(magnitude, false, TruncatedPart::Zero, negative);
                }
            }
            let wrapped = int_val.wrapping_mul(10_u128.wrapping_pow(diff));
            return self.round_magnitude(wrapped, int_val != 0, TruncatedPart::Zero, negative);
        }

        let n = diff.unsigned_abs();
        let (truncated, part) = if n <= MAX_U128_POW10 {
            let divisor = 10_u128.pow(n);
            (int_val / divisor, TruncatedPart::of(int_val % divisor, divisor))
        } else if int_val == 0 {
            (0, TruncatedPart::Zero)
        } else {
            // A decimal has at most 38 digits, which is less than half of 10^39.
            (0, TruncatedPart::LessThanHalfButNotZero)
        };
        self.round_magnitude(truncated, false, part, negative)
    }
}

impl<const S: u8> From<Decimal<S>> for f64 {
    #[inline]
    fn from(value: Decimal<S>) -> Self {
        value.to_f64()
    }
}

impl<const S: u8> From<Decimal<S>> for f32 {
    #[inline]
    fn from(value: Decimal<S>) -> Self {
        value.to_f32()
    }
}

impl<const S: u8> From<Decimal<S>> for decimal_rs::Decimal {
    #[inline]
    fn from(value: Decimal<S>) -> Self {
        value.to_big_decimal()
    }
}

impl<const S: u8> TryFrom<f64> for Decimal<S> {
    type Error = ArithmeticError;

    /// Converts with `HalfUp` rounding, failing on overflow.
    #[inline]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Decimal::from_f64_with(value, RoundingMode::HalfUp.checked())
    }
}

impl<const S: u8> TryFrom<f32> for Decimal<S> {
    type Error = ArithmeticError;

    #[inline]
    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Decimal::from_f32_with(value, RoundingMode::HalfUp.checked())
    }
}

impl<const S: u8> TryFrom<&decimal_rs::Decimal> for Decimal<S> {
    type Error = ArithmeticError;

    #[inline]
    fn try_from(value: &decimal_rs::Decimal) -> Result<Self, Self::Error> {
        Decimal::from_big_decimal(value, RoundingMode::HalfUp.checked())
    }
}

impl<const S: u8> TryFrom<Decimal<S>> for i64 {
    type Error = ArithmeticError;

    /// Fails with [`ArithmeticError::Inexact`] unless the value is integral.
    #[inline]
    fn try_from(value: Decimal<S>) -> Result<Self, Self::Error> {
        value.to_long_with(RoundingMode::Unnecessary.checked())
    }
}

macro_rules! impl_try_from_int {
    ($($ty: ty),* $(,)?) => {
        $(
            impl<const S: u8> TryFrom<$ty> for Decimal<S> {
                type Error = ArithmeticError;

                #[inline]
                fn try_from(value: $ty) -> Result<Self, Self::Error> {
                    Decimal::from_long_with(i64::from(value), OverflowMode::Checked)
                }
            }
        )*
    };
}

impl_try_from_int!(i8, u8, i16, u16, i32, u32, i64);

macro_rules! impl_try_into_int {
    ($($ty: ty),* $(,)?) => {
        $(
            impl<const S: u8> TryFrom<Decimal<S>> for $ty {
                type Error = ArithmeticError;

                /// Fails with [`ArithmeticError::Inexact`] unless the value is integral,
                /// and with [`ArithmeticError::Overflow`] if it is out of range.
                #[inline]
                fn try_from(value: Decimal<S>) -> Result<Self, Self::Error> {
                    let n = i64::try_from(value)?;
                    <$ty>::try_from(n).map_err(|_| ArithmeticError::Overflow)
                }
            }
        )*
    };
}

impl_try_into_int!(i8, i16, i32);
