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

//! Powers, square roots and binary shifts.

use crate::arith::Arithmetic;
use crate::error::ArithmeticError;
use crate::policy::OverflowMode;
use crate::rounding::{RoundingMode, TruncatedPart};
use ethnum::U256;

/// `10^77` is the largest power of ten fitting into a `U256`.
const MAX_U256_POW10: u64 = 77;

/// Shifting by more than this many bits always leaves a truncated part below one half.
const MAX_SHIFT: u32 = 65;

fn checked_pow_u256(base: U256, mut exp: u32) -> Option<U256> {
    let mut base = base;
    let mut acc = U256::ONE;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = acc.checked_mul(base)?;
        }
        exp >>= 1;
        if exp > 0 {
            base = base.checked_mul(base)?;
        }
    }
    Some(acc)
}

#[inline]
fn pow10_u256(n: u64) -> U256 {
    debug_assert!(n <= MAX_U256_POW10);
    let mut acc = U256::ONE;
    for _ in 0..n {
        acc *= U256::from(10_u64);
    }
    acc
}

#[inline]
fn truncated_part_u256(remainder: U256, divisor: U256) -> TruncatedPart {
    if remainder == U256::ZERO {
        return TruncatedPart::Zero;
    }
    let rest = divisor - remainder;
    if remainder < rest {
        TruncatedPart::LessThanHalfButNotZero
    } else if remainder == rest {
        TruncatedPart::EqualToHalf
    } else {
        TruncatedPart::GreaterThanHalf
    }
}

/// A truncated quotient of up to 256 bits.
struct WideQuotient {
    low: u128,
    wide: bool,
    part: TruncatedPart,
}

impl WideQuotient {
    #[inline]
    fn new(quotient: U256, part: TruncatedPart) -> WideQuotient {
        let (high, low) = quotient.into_words();
        WideQuotient {
            low,
            wide: high != 0,
            part,
        }
    }
}

/// Divides `dividend` by `10^n`.
fn div_by_pow10(dividend: U256, n: u64) -> WideQuotient {
    if n > MAX_U256_POW10 {
        // `dividend < 2^256` is less than half of `10^78`.
        let part = if dividend == U256::ZERO {
            TruncatedPart::Zero
        } else {
            TruncatedPart::LessThanHalfButNotZero
        };
        return WideQuotient::new(U256::ZERO, part);
    }

    let divisor = pow10_u256(n);
    WideQuotient::new(dividend / divisor, truncated_part_u256(dividend % divisor, divisor))
}

/// Divides `10^n` by `divisor` with long division, one decimal digit per step beyond `10^77`.
///
/// Returns `None` if a step would not fit into 256 bits.
fn div_pow10_by(n: u64, divisor: U256) -> Option<WideQuotient> {
    debug_assert!(divisor != U256::ZERO);

    if divisor == U256::ONE {
        // 2^128 divides 10^128, so the low bits vanish.
        let low = if n >= 128 { 0 } else { 10_u128.wrapping_pow(n as u32) };
        return Some(WideQuotient {
            low,
            wide: n > 38,
            part: TruncatedPart::Zero,
        });
    }

    let head = n.min(MAX_U256_POW10);
    let numerator = pow10_u256(head);
    let quotient = WideQuotient::new(numerator / divisor, TruncatedPart::Zero);
    let mut low = quotient.low;
    let mut wide = quotient.wide;
    let mut remainder = numerator % divisor;

    // A divisor of at least 2 that fits into 256 bits bounds the exponent, and with it the steps.
    let ten = U256::from(10_u64);
    for _ in head..n {
        let shifted = remainder.checked_mul(ten)?;
        let digit = (shifted / divisor).as_u128();
        remainder = shifted % divisor;

        let (next, c1) = low.overflowing_mul(10);
        let (next, c2) = next.overflowing_add(digit);
        wide |= c1 || c2;
        low = next;
    }

    Some(WideQuotient {
        low,
        wide,
        part: truncated_part_u256(remainder, divisor),
    })
}

/// Returns the integer square root of `n` and the remainder `n - root^2`.
fn isqrt(n: u128) -> (u128, u128) {
    if n == 0 {
        return (0, 0);
    }

    let mut remainder = n;
    let mut root = 0_u128;
    // Highest power of four not greater than `n`.
    let mut bit = 1_u128 << ((127 - n.leading_zeros()) & !1);
    while bit != 0 {
        if remainder >= root + bit {
            remainder -= root + bit;
            root = (root >> 1) + bit;
        } else {
            root >>= 1;
        }
        bit >>= 2;
    }
    (root, remainder)
}

impl Arithmetic {
    #[inline]
    fn round_wide(&self, quotient: WideQuotient, negative: bool) -> Result<i64, ArithmeticError> {
        self.round_magnitude(quotient.low, quotient.wide, quotient.part, negative)
    }

    /// Computes `a^n` for an integer exponent `n`, which may be negative.
    ///
    /// The result is rounded once from the exact power whenever `|a|^|n|` fits into 256 bits.
    /// Otherwise the power is built by repeated squaring, rounding every intermediate product,
    /// so the last digit may be off by more than one unit.
    pub fn pow(&self, a: i64, n: i32) -> Result<i64, ArithmeticError> {
        if n == 0 {
            return Ok(self.one());
        }
        if n < 0 && a == 0 {
            return Err(ArithmeticError::DivisionByZero);
        }

        let exponent = n.unsigned_abs();
        let negative = a < 0 && exponent & 1 == 1;
        let scale = u64::from(self.scale());

        if let Some(power) = checked_pow_u256(U256::from(a.unsigned_abs()), exponent) {
            let exact = if n > 0 {
                // a^k / 10^(s * k) expressed with scale s
                Some(div_by_pow10(power, scale * (u64::from(exponent) - 1)))
            } else {
                div_pow10_by(scale * (u64::from(exponent) + 1), power)
            };
            if let Some(quotient) = exact {
                return self.round_wide(quotient, negative);
            }
        }

        self.pow_by_squaring(a, n)
    }

    fn pow_by_squaring(&self, a: i64, n: i32) -> Result<i64, ArithmeticError> {
        let exponent = n.unsigned_abs();
        if n > 0 {
            return self.power_by_squaring(a, exponent);
        }

        // Invert the positive power while it stays in range, otherwise power the inverse.
        let checked = self.with_policy(self.policy().with_overflow_mode(OverflowMode::Checked));
        match checked.power_by_squaring(a, exponent) {
            Ok(power) if power != 0 => self.invert(power),
            Ok(_) | Err(ArithmeticError::Overflow) => {
                let inverse = self.invert(a)?;
                self.power_by_squaring(inverse, exponent)
            }
            Err(e) => Err(e),
        }
    }

    fn power_by_squaring(&self, a: i64, mut exponent: u32) -> Result<i64, ArithmeticError> {
        let mut base = a;
        let mut result = self.one();
        loop {
            if exponent & 1 == 1 {
                result = self.multiply(result, base)?;
            }
            exponent >>= 1;
            if exponent == 0 {
                return Ok(result);
            }
            base = self.square(base)?;
        }
    }

    /// Computes the square root of `a`, failing with [`ArithmeticError::InvalidOperand`] if `a` is negative.
    pub fn sqrt(&self, a: i64) -> Result<i64, ArithmeticError> {
        if a < 0 {
            return Err(ArithmeticError::InvalidOperand);
        }

        let radicand = a as u128 * self.one() as u128;
        let (root, remainder) = isqrt(radicand);
        if remainder == 0 {
            return Ok(root as i64);
        }

        // (root + 1/2)^2 = root^2 + root + 1/4, so the exact root is never a tie.
        let part = if remainder > root {
            TruncatedPart::GreaterThanHalf
        } else {
            TruncatedPart::LessThanHalfButNotZero
        };
        self.round_magnitude(root, false, part, false)
    }

    /// Computes `a * 2^n`, a negative `n` shifts to the right.
    #[inline]
    pub fn shift_left(&self, a: i64, n: i32) -> Result<i64, ArithmeticError> {
        if n < 0 {
            self.shift_right_by(a, n.unsigned_abs())
        } else {
            self.shift_left_by(a, n as u32)
        }
    }

    /// Computes `a / 2^n` and rounds, a negative `n` shifts to the left.
    #[inline]
    pub fn shift_right(&self, a: i64, n: i32) -> Result<i64, ArithmeticError> {
        if n < 0 {
            self.shift_left_by(a, n.unsigned_abs())
        } else {
            self.shift_right_by(a, n as u32)
        }
    }

    fn shift_left_by(&self, a: i64, n: u32) -> Result<i64, ArithmeticError> {
        if a == 0 || n == 0 {
            return Ok(a);
        }
        if n >= 64 {
            return self.overflowed(0);
        }
        self.narrow(i128::from(a) << n)
    }

    fn shift_right_by(&self, a: i64, n: u32) -> Result<i64, ArithmeticError> {
        if a == 0 || n == 0 {
            return Ok(a);
        }
        if self.rounding_mode() == RoundingMode::Floor {
            return Ok(a >> n.min(63));
        }
        let quotient = self.div_round(i128::from(a), 1_i128 << n.min(MAX_SHIFT))?;
        self.narrow(quotient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::TruncationPolicy;

    fn arith(scale: i32, policy: TruncationPolicy) -> Arithmetic {
        Arithmetic::with_scale(scale, policy).unwrap()
    }

    fn assert_pow(scale: i32, mode: RoundingMode, a: i64, n: i32, expected: Result<i64, ArithmeticError>) {
        let arith = arith(scale, mode.checked());
        assert_eq!(arith.pow(a, n), expected, "{}^{} at scale {} with {:?}", a, n, scale, mode);
    }

    fn assert_sqrt(scale: i32, mode: RoundingMode, a: i64, expected: i64) {
        let arith = arith(scale, mode.checked());
        assert_eq!(arith.sqrt(a), Ok(expected), "sqrt({}) at scale {} with {:?}", a, scale, mode);
    }

    #[test]
    fn test_isqrt() {
        for n in 0..2000_u128 {
            let (root, remainder) = isqrt(n);
            assert_eq!(root * root + remainder, n);
            assert!((root + 1) * (root + 1) > n);
        }
        let (root, remainder) = isqrt(u128::MAX);
        assert_eq!(root, u64::MAX as u128);
        assert_eq!(remainder, u128::MAX - root * root);
    }

    #[test]
    fn test_sqrt() {
        use RoundingMode::*;
        assert_sqrt(2, HalfUp, 400, 200);
        assert_sqrt(2, HalfUp, 200, 141);
        assert_sqrt(2, Up, 200, 142);
        assert_sqrt(2, HalfUp, 300, 173);
        assert_sqrt(2, HalfUp, 0, 0);
        assert_sqrt(0, HalfUp, 2, 1);
        assert_sqrt(0, HalfUp, 3, 2);
        assert_sqrt(0, HalfEven, 3, 2);
        assert_sqrt(0, Down, 3, 1);
        assert_sqrt(18, HalfUp, 2_000_000_000_000_000_000, 1_414_213_562_373_095_049);
        assert_sqrt(0, HalfUp, i64::MAX, 3_037_000_500);
        assert_eq!(
            arith(2, HalfUp.checked()).sqrt(-1),
            Err(ArithmeticError::InvalidOperand)
        );
        assert_eq!(
            arith(2, Unnecessary.checked()).sqrt(200),
            Err(ArithmeticError::Inexact)
        );
        assert_eq!(arith(2, Unnecessary.checked()).sqrt(225), Ok(150));
    }

    #[test]
    fn test_pow() {
        use RoundingMode::*;
        assert_pow(2, HalfUp, 150, 2, Ok(225));
        assert_pow(2, HalfUp, 150, 3, Ok(338));
        assert_pow(2, Down, 150, 3, Ok(337));
        assert_pow(2, HalfUp, -150, 3, Ok(-338));
        assert_pow(2, HalfUp, -150, 2, Ok(225));
        assert_pow(2, HalfUp, 12345, 0, Ok(100));
        assert_pow(2, HalfUp, 0, 0, Ok(100));
        assert_pow(2, HalfUp, 0, 5, Ok(0));
        assert_pow(2, HalfUp, 200, -1, Ok(50));
        assert_pow(2, HalfUp, 300, -1, Ok(33));
        assert_pow(2, HalfUp, 200, -2, Ok(25));
        assert_pow(2, HalfUp, -200, -3, Ok(-13));
        assert_pow(2, HalfEven, -200, -3, Ok(-12));
        assert_pow(2, HalfUp, 0, -1, Err(ArithmeticError::DivisionByZero));
        assert_pow(0, HalfUp, 2, 62, Ok(1 << 62));
        assert_pow(0, HalfUp, 2, 63, Err(ArithmeticError::Overflow));
        assert_pow(0, HalfUp, -2, 63, Ok(i64::MIN));
        assert_pow(0, HalfUp, 2, -1, Ok(1));
        assert_pow(0, HalfDown, 2, -1, Ok(0));
        assert_pow(2, Unnecessary, 150, 3, Err(ArithmeticError::Inexact));
        assert_pow(2, Unnecessary, 150, 2, Ok(225));
    }

    #[test]
    fn test_pow_large_exponents() {
        use RoundingMode::*;
        assert_pow(2, HalfUp, 100, i32::MAX, Ok(100));
        assert_pow(2, HalfUp, 100, i32::MIN, Ok(100));
        assert_pow(2, HalfUp, -100, i32::MAX, Ok(-100));
        assert_pow(2, HalfUp, 50, 1000, Ok(0));
        assert_pow(2, Up, 50, 1000, Ok(1));
        assert_pow(18, HalfUp, 999_999_999_999_999_999, 1_000_000, Ok(999_999_999_999_000_000));
        assert_pow(2, HalfUp, 200, 100, Err(ArithmeticError::Overflow));
        assert_pow(2, HalfUp, 50, -100, Err(ArithmeticError::Overflow));
        assert_pow(2, HalfUp, 1, -1, Ok(10_000));
        assert_pow(2, HalfUp, 1, -2, Ok(1_000_000));
        assert_pow(2, HalfUp, 1, -100, Err(ArithmeticError::Overflow));
        let unchecked = arith(2, HalfUp.unchecked());
        assert_eq!(unchecked.pow(1, -100), Ok(0));
    }

    #[test]
    fn test_pow_negative_long_division() {
        // 10^90 / a^4 needs more digits than a single 256-bit division provides.
        let arith = arith(18, RoundingMode::HalfUp.checked());
        assert_eq!(arith.pow(3_000_000_000_000_000_000, -4), Ok(12_345_679_012_345_679));
        assert_eq!(arith.pow(2_000_000_000_000_000_000, -4), Ok(62_500_000_000_000_000));
        assert_eq!(arith.pow(-7_000_000_000_000_000_000, -4), Ok(416_493_127_863_390));
        assert_eq!(arith.pow(3_000_000_000_000_000_000, 2), Ok(9_000_000_000_000_000_000));
        assert_eq!(arith.pow(3_000_000_000_000_000_000, 4), Err(ArithmeticError::Overflow));
    }

    #[test]
    fn test_pow_fallback() {
        let arith = arith(18, RoundingMode::HalfUp.checked());
        // 3^40 is out of range, so the inverse is powered instead.
        assert_eq!(arith.pow(3_000_000_000_000_000_000, -40), Ok(0));
        let exact = 16_935_087_808_430_i64;
        let result = arith.pow(3_000_000_000_000_000_000, -10).unwrap();
        assert!((result - exact).abs() < 1000, "{}", result);
        assert_eq!(arith.pow(1_000_000_000_000_000_000, -1_000_000), Ok(1_000_000_000_000_000_000));
    }

    #[test]
    fn test_shift() {
        let floor = arith(2, TruncationPolicy::SHIFT_DEFAULT);
        assert_eq!(floor.shift_right(100, 1), Ok(50));
        assert_eq!(floor.shift_right(-100, 1), Ok(-50));
        assert_eq!(floor.shift_right(-101, 1), Ok(-51));
        assert_eq!(floor.shift_right(101, 1), Ok(50));
        assert_eq!(floor.shift_right(-1, 100), Ok(-1));
        assert_eq!(floor.shift_right(1, 100), Ok(0));
        assert_eq!(floor.shift_right(1, -3), Ok(8));
        assert_eq!(floor.shift_left(3, 2), Ok(12));
        assert_eq!(floor.shift_left(-3, 2), Ok(-12));
        assert_eq!(floor.shift_left(1, 63), Ok(i64::MIN));
        assert_eq!(floor.shift_left(1, 64), Ok(0));
        assert_eq!(floor.shift_left(-101, -1), Ok(-51));
        assert_eq!(floor.shift_left(1, i32::MIN), Ok(0));
        assert_eq!(floor.shift_right(1, i32::MIN), Ok(0));

        let checked = arith(2, OverflowMode::Checked.policy_for(RoundingMode::HalfUp));
        assert_eq!(checked.shift_left(1, 63), Err(ArithmeticError::Overflow));
        assert_eq!(checked.shift_left(-1, 63), Ok(i64::MIN));
        assert_eq!(checked.shift_left(1, 64), Err(ArithmeticError::Overflow));
        assert_eq!(checked.shift_right(101, 1), Ok(51));
        assert_eq!(checked.shift_right(-101, 1), Ok(-51));
        assert_eq!(checked.shift_right(i64::MIN, 63), Ok(-1));
        assert_eq!(checked.shift_right(i64::MIN, 64), Ok(-1));
        assert_eq!(checked.shift_right(i64::MIN, 65), Ok(0));
        assert_eq!(checked.shift_right(i64::MAX, 1000), Ok(0));

        let up = arith(2, RoundingMode::Up.checked());
        assert_eq!(up.shift_right(1, 1000), Ok(1));
        assert_eq!(up.shift_right(-1, 1000), Ok(-1));
        let exact = arith(2, RoundingMode::Unnecessary.checked());
        assert_eq!(exact.shift_right(3, 1), Err(ArithmeticError::Inexact));
        assert_eq!(exact.shift_right(4, 1), Ok(2));
    }
}
