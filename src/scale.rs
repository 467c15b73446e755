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

//! Per-scale constants and division-free scaling.

use crate::arith::Arithmetic;
use crate::error::ArithmeticError;
use crate::policy::TruncationPolicy;

/// Maximum supported scale, `10^18` is the largest power of ten fitting into an `i64`.
pub const MAX_SCALE: u8 = 18;

const SCALE_COUNT: usize = MAX_SCALE as usize + 1;

/// Metrics of all supported scales, indexed by scale.
pub static SCALE_METRICS: [ScaleMetrics; SCALE_COUNT] = build_scale_metrics();

const fn build_scale_metrics() -> [ScaleMetrics; SCALE_COUNT] {
    let mut table = [ScaleMetrics::new(0); SCALE_COUNT];
    let mut scale = 1;
    while scale < SCALE_COUNT {
        table[scale] = ScaleMetrics::new(scale as u8);
        scale += 1;
    }
    table
}

/// Returns `10^scale`.
#[inline]
pub(crate) const fn pow10(scale: u8) -> i64 {
    10_i64.pow(scale as u32)
}

/// Constants and fast scaling operations for one scale.
///
/// Division by the scale factor never uses a division instruction:
/// `n / 10^s == (n / 2^s) / 5^s`, and the division by `5^s` is a multiplication
/// by a precomputed reciprocal followed by a shift.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScaleMetrics {
    scale: u8,
    scale_factor: i64,
    max_integer_value: i64,
    min_integer_value: i64,
    reciprocal: u128,
    reciprocal_shift: u32,
}

impl ScaleMetrics {
    const fn new(scale: u8) -> ScaleMetrics {
        let scale_factor = pow10(scale);

        // After shifting out `scale` bits the dividend has at most `64 - scale` bits,
        // so `floor(2^(bits + l) / 5^s) + 1` is an exact reciprocal with `l = ceil(log2(5^s))`.
        let (reciprocal, reciprocal_shift) = if scale == 0 {
            (1, 0)
        } else {
            let divisor = 5_u128.pow(scale as u32);
            let bits = 64 - scale as u32;
            let l = 128 - (divisor - 1).leading_zeros();
            ((1_u128 << (bits + l)) / divisor + 1, bits + l)
        };

        ScaleMetrics {
            scale,
            scale_factor,
            max_integer_value: i64::MAX / scale_factor,
            min_integer_value: i64::MIN / scale_factor,
            reciprocal,
            reciprocal_shift,
        }
    }

    /// Returns the metrics of `scale`, failing if it lies outside of `[0, 18]`.
    #[inline]
    pub fn get(scale: i32) -> Result<&'static ScaleMetrics, ArithmeticError> {
        if (0..=MAX_SCALE as i32).contains(&scale) {
            Ok(&SCALE_METRICS[scale as usize])
        } else {
            Err(ArithmeticError::InvalidScale)
        }
    }

    #[inline]
    pub(crate) fn of(scale: u8) -> &'static ScaleMetrics {
        &SCALE_METRICS[scale as usize]
    }

    /// Returns the scale, i.e. the count of fractional digits.
    #[inline]
    pub const fn scale(&self) -> u8 {
        self.scale
    }

    /// Returns `10^scale`.
    #[inline]
    pub const fn scale_factor(&self) -> i64 {
        self.scale_factor
    }

    /// Returns the largest value that can be multiplied by the scale factor without overflow.
    #[inline]
    pub const fn max_integer_value(&self) -> i64 {
        self.max_integer_value
    }

    /// Returns the smallest value that can be multiplied by the scale factor without overflow.
    #[inline]
    pub const fn min_integer_value(&self) -> i64 {
        self.min_integer_value
    }

    /// Checks if `value * 10^scale` fits into an `i64`.
    #[inline]
    pub const fn is_valid_integer_value(&self, value: i64) -> bool {
        self.min_integer_value <= value && value <= self.max_integer_value
    }

    /// Computes `value * 10^scale`, wrapping around on overflow.
    #[inline]
    pub const fn multiply_by_scale_factor(&self, value: i64) -> i64 {
        value.wrapping_mul(self.scale_factor)
    }

    /// Computes `value * 10^scale`, returning `None` on overflow.
    #[inline]
    pub fn multiply_by_scale_factor_exact(&self, value: i64) -> Option<i64> {
        if self.is_valid_integer_value(value) {
            Some(value * self.scale_factor)
        } else {
            None
        }
    }

    /// Computes `value / 10^scale` truncated toward zero.
    #[inline]
    pub fn divide_by_scale_factor(&self, value: i64) -> i64 {
        let quotient = self.divide_unsigned_by_scale_factor(value.unsigned_abs()) as i64;
        if value < 0 {
            quotient.wrapping_neg()
        } else {
            quotient
        }
    }

    /// Computes `value / 10^scale` truncated toward zero.
    #[inline]
    pub fn divide_unsigned_by_scale_factor(&self, value: u64) -> u64 {
        let shifted = u128::from(value >> self.scale);
        ((shifted * self.reciprocal) >> self.reciprocal_shift) as u64
    }

    /// Computes the remainder of [`ScaleMetrics::divide_by_scale_factor`], it has the sign of `value`.
    #[inline]
    pub fn modulo_by_scale_factor(&self, value: i64) -> i64 {
        value.wrapping_sub(self.multiply_by_scale_factor(self.divide_by_scale_factor(value)))
    }

    /// Returns the arithmetic of this scale bound to `policy`.
    #[inline]
    pub fn arithmetic(&'static self, policy: TruncationPolicy) -> Arithmetic {
        Arithmetic::new(self, policy)
    }

    /// Returns the arithmetic of this scale bound to [`TruncationPolicy::DEFAULT`].
    #[inline]
    pub fn default_arithmetic(&'static self) -> Arithmetic {
        Arithmetic::new(self, TruncationPolicy::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic pseudo-random values covering the full `u64` range.
    fn sample_values() -> Vec<u64> {
        let mut values = vec![0, 1, 2, 9, 10, 11, 99, 100, 101, u64::MAX, u64::MAX - 1, i64::MAX as u64];
        for s in 0..=MAX_SCALE {
            let factor = pow10(s) as u64;
            values.push(factor - 1);
            values.push(factor);
            values.push(factor + 1);
            values.push(factor.wrapping_mul(7) - 1);
        }
        let mut x = 0x9E37_79B9_7F4A_7C15_u64;
        for _ in 0..2000 {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            values.push(x);
            values.push(x >> (x % 64));
        }
        values
    }

    #[test]
    fn test_scale_factor() {
        let mut expected = 1_i64;
        for (scale, metrics) in SCALE_METRICS.iter().enumerate() {
            assert_eq!(metrics.scale() as usize, scale);
            assert_eq!(metrics.scale_factor(), expected);
            expected = expected.saturating_mul(10);
        }
    }

    #[test]
    fn test_get() {
        assert_eq!(ScaleMetrics::get(0).unwrap().scale_factor(), 1);
        assert_eq!(ScaleMetrics::get(18).unwrap().scale_factor(), 1_000_000_000_000_000_000);
        assert_eq!(ScaleMetrics::get(19), Err(ArithmeticError::InvalidScale));
        assert_eq!(ScaleMetrics::get(-1), Err(ArithmeticError::InvalidScale));
        assert_eq!(ScaleMetrics::get(i32::MIN), Err(ArithmeticError::InvalidScale));
    }

    #[test]
    fn test_divide_unsigned() {
        let values = sample_values();
        for metrics in SCALE_METRICS.iter() {
            let factor = metrics.scale_factor() as u64;
            for &v in values.iter() {
                assert_eq!(
                    metrics.divide_unsigned_by_scale_factor(v),
                    v / factor,
                    "{} / 10^{}",
                    v,
                    metrics.scale()
                );
            }
        }
    }

    #[test]
    fn test_divide_signed() {
        let values = sample_values();
        for metrics in SCALE_METRICS.iter() {
            let factor = metrics.scale_factor();
            for &v in values.iter() {
                let v = v as i64;
                assert_eq!(metrics.divide_by_scale_factor(v), v.wrapping_div(factor));
                assert_eq!(metrics.modulo_by_scale_factor(v), v.wrapping_rem(factor));
            }
            assert_eq!(metrics.divide_by_scale_factor(i64::MIN), i64::MIN.wrapping_div(factor));
        }
    }

    #[test]
    fn test_integer_bounds() {
        for metrics in SCALE_METRICS.iter() {
            let max = metrics.max_integer_value();
            let min = metrics.min_integer_value();
            assert!(max.checked_mul(metrics.scale_factor()).is_some());
            assert!(min.checked_mul(metrics.scale_factor()).is_some());
            assert!(metrics.is_valid_integer_value(max));
            assert!(metrics.is_valid_integer_value(min));
            if metrics.scale() > 0 {
                assert!((max + 1).checked_mul(metrics.scale_factor()).is_none());
                assert!((min - 1).checked_mul(metrics.scale_factor()).is_none());
                assert_eq!(metrics.multiply_by_scale_factor_exact(max + 1), None);
                assert_eq!(metrics.multiply_by_scale_factor_exact(min - 1), None);
            }
            assert_eq!(
                metrics.multiply_by_scale_factor_exact(-3),
                Some(-3 * metrics.scale_factor())
            );
        }
    }

    #[test]
    fn test_multiply_wraps() {
        let metrics = ScaleMetrics::get(2).unwrap();
        assert_eq!(metrics.multiply_by_scale_factor(123), 12300);
        assert_eq!(metrics.multiply_by_scale_factor(i64::MAX), i64::MAX.wrapping_mul(100));
    }
}
