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

//! Fixed-point decimal with a compile-time scale.

use crate::arith::Arithmetic;
use crate::error::ArithmeticError;
use crate::fmt::DisplayUnscaled;
use crate::mutable::MutableDecimal;
use crate::policy::{OverflowMode, TruncationPolicy};
use crate::rounding::RoundingMode;
use crate::scale::{pow10, ScaleMetrics, MAX_SCALE};
use std::cmp::Ordering;
use std::fmt;

macro_rules! impl_binary_op {
    ($(#[$attr:meta])* $name: ident, $with: ident, $scaled: ident => $op: ident, $unscaled_op: ident) => {
        $(#[$attr])*
        #[inline]
        pub fn $name(self, other: Self) -> Result<Self, ArithmeticError> {
            self.$with(other, TruncationPolicy::DEFAULT)
        }

        #[doc = concat!("Same as [`Decimal::", stringify!($name), "`] with an explicit truncation policy.")]
        #[inline]
        pub fn $with(self, other: Self, policy: TruncationPolicy) -> Result<Self, ArithmeticError> {
            Self::arithmetic_with(policy)
                .$op(self.unscaled, other.unscaled)
                .map(Self::from_unscaled)
        }

        #[doc = concat!("Same as [`Decimal::", stringify!($with), "`] with an operand of another scale, rounded at most once.")]
        #[inline]
        pub fn $scaled<const T: u8>(self, other: Decimal<T>, policy: TruncationPolicy) -> Result<Self, ArithmeticError> {
            Self::arithmetic_with(policy)
                .$unscaled_op(self.unscaled, other.unscaled(), i32::from(T))
                .map(Self::from_unscaled)
        }
    };
}

macro_rules! impl_unary_op {
    ($(#[$attr:meta])* $name: ident, $with: ident => $op: ident) => {
        $(#[$attr])*
        #[inline]
        pub fn $name(self) -> Result<Self, ArithmeticError> {
            self.$with(TruncationPolicy::DEFAULT)
        }

        #[doc = concat!("Same as [`Decimal::", stringify!($name), "`] with an explicit truncation policy.")]
        #[inline]
        pub fn $with(self, policy: TruncationPolicy) -> Result<Self, ArithmeticError> {
            Self::arithmetic_with(policy).$op(self.unscaled).map(Self::from_unscaled)
        }
    };
}

macro_rules! impl_int_op {
    ($(#[$attr:meta])* $name: ident, $with: ident, $default: expr => $op: ident) => {
        $(#[$attr])*
        #[inline]
        pub fn $name(self, n: i32) -> Result<Self, ArithmeticError> {
            self.$with(n, $default)
        }

        #[doc = concat!("Same as [`Decimal::", stringify!($name), "`] with an explicit truncation policy.")]
        #[inline]
        pub fn $with(self, n: i32, policy: TruncationPolicy) -> Result<Self, ArithmeticError> {
            Self::arithmetic_with(policy).$op(self.unscaled, n).map(Self::from_unscaled)
        }
    };
}

/// A decimal number with `S` fractional digits stored as an `i64` unscaled value.
///
/// The value of a `Decimal<S>` is `unscaled / 10^S`, so a `Decimal<2>` covers
/// `[-92233720368547758.08, 92233720368547758.07]` in steps of `0.01`. `S` must not exceed 18,
/// which is checked at compile time.
///
/// Methods without a policy argument use [`TruncationPolicy::DEFAULT`], i.e. `HalfUp` rounding
/// with unchecked overflow. The `*_with` variants take an explicit policy.
///
/// ```
/// use fixed_decimal::{Decimal, RoundingMode};
///
/// let price: Decimal<2> = "19.99".parse().unwrap();
/// let qty = Decimal::<2>::from_long(3).unwrap();
/// assert_eq!((price * qty).to_string(), "59.97");
///
/// let third = Decimal::<2>::ONE.div_with(qty, RoundingMode::Down.checked()).unwrap();
/// assert_eq!(third.to_string(), "0.33");
/// ```
///
/// A scale above 18 does not compile, whichever item is used first:
///
/// ```compile_fail
/// let _ = fixed_decimal::Decimal::<19>::ZERO.to_string();
/// ```
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal<const S: u8> {
    unscaled: i64,
}

impl<const S: u8> Decimal<S> {
    const SCALE_CHECK: () = assert!(S <= MAX_SCALE, "the scale of a decimal must not exceed 18");

    /// Zero value, i.e. `0`.
    pub const ZERO: Decimal<S> = Decimal::from_unscaled(0);

    /// i.e. `1`.
    pub const ONE: Decimal<S> = Decimal::from_unscaled(pow10(S));

    /// i.e. `-1`.
    pub const MINUS_ONE: Decimal<S> = Decimal::from_unscaled(-pow10(S));

    /// The smallest positive value, i.e. `10^-S`.
    pub const ULP: Decimal<S> = Decimal::from_unscaled(1);

    /// The largest value.
    pub const MAX: Decimal<S> = Decimal::from_unscaled(i64::MAX);

    /// The smallest value.
    pub const MIN: Decimal<S> = Decimal::from_unscaled(i64::MIN);

    /// Creates a decimal with the value `unscaled / 10^S`.
    #[inline]
    pub const fn from_unscaled(unscaled: i64) -> Decimal<S> {
        #[allow(clippy::let_unit_value)]
        let () = Self::SCALE_CHECK;
        Decimal { unscaled }
    }

    #[inline]
    pub const fn unscaled(self) -> i64 {
        self.unscaled
    }

    #[inline]
    pub const fn scale(self) -> u8 {
        S
    }

    /// Returns the metrics of scale `S`.
    #[inline]
    pub fn metrics() -> &'static ScaleMetrics {
        #[allow(clippy::let_unit_value)]
        let () = Self::SCALE_CHECK;
        ScaleMetrics::of(S)
    }

    /// Returns the arithmetic of scale `S` with the default truncation policy.
    #[inline]
    pub fn arithmetic() -> Arithmetic {
        Self::metrics().default_arithmetic()
    }

    /// Returns the arithmetic of scale `S` with `policy`.
    #[inline]
    pub fn arithmetic_with(policy: TruncationPolicy) -> Arithmetic {
        Self::metrics().arithmetic(policy)
    }

    /// Converts an integer, overflow is handled by the default policy.
    #[inline]
    pub fn from_long(value: i64) -> Result<Self, ArithmeticError> {
        Self::from_long_with(value, OverflowMode::default())
    }

    /// Converts an integer.
    #[inline]
    pub fn from_long_with(value: i64, overflow_mode: OverflowMode) -> Result<Self, ArithmeticError> {
        Self::arithmetic_with(overflow_mode.policy_for(RoundingMode::default()))
            .from_long(value)
            .map(Self::from_unscaled)
    }

    /// Converts `unscaled / 10^scale`, `scale` may be any value including negative ones.
    #[inline]
    pub fn from_scaled(unscaled: i64, scale: i32, policy: TruncationPolicy) -> Result<Self, ArithmeticError> {
        Self::arithmetic_with(policy)
            .from_unscaled(unscaled, scale)
            .map(Self::from_unscaled)
    }

    /// Converts a binary floating-point number with the default policy.
    #[inline]
    pub fn from_f64(value: f64) -> Result<Self, ArithmeticError> {
        Self::from_f64_with(value, TruncationPolicy::DEFAULT)
    }

    /// Converts a binary floating-point number, rounding its exact binary value.
    #[inline]
    pub fn from_f64_with(value: f64, policy: TruncationPolicy) -> Result<Self, ArithmeticError> {
        Self::arithmetic_with(policy).from_f64(value).map(Self::from_unscaled)
    }

    #[inline]
    pub fn from_f32_with(value: f32, policy: TruncationPolicy) -> Result<Self, ArithmeticError> {
        Self::arithmetic_with(policy).from_f32(value).map(Self::from_unscaled)
    }

    /// Converts an arbitrary-precision decimal.
    #[inline]
    pub fn from_big_decimal(value: &decimal_rs::Decimal, policy: TruncationPolicy) -> Result<Self, ArithmeticError> {
        Self::arithmetic_with(policy)
            .from_big_decimal(value)
            .map(Self::from_unscaled)
    }

    /// Converts this decimal to another scale.
    #[inline]
    pub fn rescale<const T: u8>(self, policy: TruncationPolicy) -> Result<Decimal<T>, ArithmeticError> {
        Decimal::<T>::from_scaled(self.unscaled, i32::from(S), policy)
    }

    impl_binary_op!(
        /// Computes `self + other`.
        try_add, add_with, add_scaled => add, add_unscaled
    );
    impl_binary_op!(
        /// Computes `self - other`.
        try_sub, sub_with, sub_scaled => subtract, subtract_unscaled
    );
    impl_binary_op!(
        /// Computes `self * other`.
        try_mul, mul_with, mul_scaled => multiply, multiply_by_unscaled
    );
    impl_binary_op!(
        /// Computes `self / other`.
        try_div, div_with, div_scaled => divide, divide_by_unscaled
    );

    /// Computes the average of `self` and `other`.
    #[inline]
    pub fn avg(self, other: Self) -> Result<Self, ArithmeticError> {
        self.avg_with(other, TruncationPolicy::DEFAULT)
    }

    #[inline]
    pub fn avg_with(self, other: Self, policy: TruncationPolicy) -> Result<Self, ArithmeticError> {
        Self::arithmetic_with(policy)
            .avg(self.unscaled, other.unscaled)
            .map(Self::from_unscaled)
    }

    /// Computes `self + other * other`.
    #[inline]
    pub fn add_squared(self, other: Self) -> Result<Self, ArithmeticError> {
        self.add_squared_with(other, TruncationPolicy::DEFAULT)
    }

    /// Same as [`Decimal::add_squared`] with an explicit truncation policy, the square is rounded once.
    #[inline]
    pub fn add_squared_with(self, other: Self, policy: TruncationPolicy) -> Result<Self, ArithmeticError> {
        let arith = Self::arithmetic_with(policy);
        let square = arith.square(other.unscaled)?;
        arith.add(self.unscaled, square).map(Self::from_unscaled)
    }

    /// Computes `self - other * other`.
    #[inline]
    pub fn sub_squared(self, other: Self) -> Result<Self, ArithmeticError> {
        self.sub_squared_with(other, TruncationPolicy::DEFAULT)
    }

    #[inline]
    pub fn sub_squared_with(self, other: Self, policy: TruncationPolicy) -> Result<Self, ArithmeticError> {
        let arith = Self::arithmetic_with(policy);
        let square = arith.square(other.unscaled)?;
        arith.subtract(self.unscaled, square).map(Self::from_unscaled)
    }

    /// Computes `self + n` for an integer `n`.
    #[inline]
    pub fn add_long(self, n: i64, overflow_mode: OverflowMode) -> Result<Self, ArithmeticError> {
        self.add_scaled(Decimal::<0>::from_unscaled(n), overflow_mode.policy_for(RoundingMode::default()))
    }

    /// Computes `self - n` for an integer `n`.
    #[inline]
    pub fn sub_long(self, n: i64, overflow_mode: OverflowMode) -> Result<Self, ArithmeticError> {
        self.sub_scaled(Decimal::<0>::from_unscaled(n), overflow_mode.policy_for(RoundingMode::default()))
    }

    /// Computes `self * n` for an integer `n`, which is always exact.
    #[inline]
    pub fn mul_long(self, n: i64, overflow_mode: OverflowMode) -> Result<Self, ArithmeticError> {
        Self::arithmetic_with(overflow_mode.policy_for(RoundingMode::default()))
            .multiply_by_long(self.unscaled, n)
            .map(Self::from_unscaled)
    }

    /// Computes `self / n` for an integer `n`.
    #[inline]
    pub fn div_long(self, n: i64, policy: TruncationPolicy) -> Result<Self, ArithmeticError> {
        Self::arithmetic_with(policy)
            .divide_by_long(self.unscaled, n)
            .map(Self::from_unscaled)
    }

    /// Computes `self / other`, failing with [`ArithmeticError::Inexact`] unless the quotient is exact.
    #[inline]
    pub fn div_exact(self, other: Self) -> Result<Self, ArithmeticError> {
        self.div_with(other, RoundingMode::Unnecessary.checked())
    }

    /// Computes `self / other` truncated toward zero.
    #[inline]
    pub fn div_truncate(self, other: Self) -> Result<Self, ArithmeticError> {
        self.div_with(other, RoundingMode::Down.unchecked())
    }

    /// Computes the integral part of `self / other`.
    #[inline]
    pub fn div_to_integral_value(self, other: Self, overflow_mode: OverflowMode) -> Result<Self, ArithmeticError> {
        Self::arithmetic_with(overflow_mode.policy_for(RoundingMode::Down))
            .divide_to_integral_value(self.unscaled, other.unscaled)
            .map(Self::from_unscaled)
    }

    /// Computes the integral part of `self / other` together with the remainder.
    #[inline]
    pub fn div_rem(self, other: Self, overflow_mode: OverflowMode) -> Result<(Self, Self), ArithmeticError> {
        let (q, r) = Self::arithmetic_with(overflow_mode.policy_for(RoundingMode::Down))
            .divide_and_remainder(self.unscaled, other.unscaled)?;
        Ok((Self::from_unscaled(q), Self::from_unscaled(r)))
    }

    /// Computes `self - other * trunc(self / other)`, which is always exact.
    #[inline]
    pub fn remainder(self, other: Self) -> Result<Self, ArithmeticError> {
        Self::arithmetic()
            .remainder(self.unscaled, other.unscaled)
            .map(Self::from_unscaled)
    }

    /// Same as [`Decimal::remainder`], failing with [`ArithmeticError::IncompatibleScale`]
    /// if `other` has another scale.
    #[inline]
    pub fn remainder_of<const T: u8>(self, other: Decimal<T>) -> Result<Self, ArithmeticError> {
        if T != S {
            return Err(ArithmeticError::IncompatibleScale);
        }
        self.remainder(Self::from_unscaled(other.unscaled()))
    }

    /// Computes `-self`, which only overflows for [`Decimal::MIN`].
    #[inline]
    pub fn negate(self, overflow_mode: OverflowMode) -> Result<Self, ArithmeticError> {
        Self::arithmetic_with(overflow_mode.policy_for(RoundingMode::default()))
            .negate(self.unscaled)
            .map(Self::from_unscaled)
    }

    /// Computes `|self|`, which only overflows for [`Decimal::MIN`].
    #[inline]
    pub fn abs(self, overflow_mode: OverflowMode) -> Result<Self, ArithmeticError> {
        Self::arithmetic_with(overflow_mode.policy_for(RoundingMode::default()))
            .abs(self.unscaled)
            .map(Self::from_unscaled)
    }

    impl_unary_op!(
        /// Computes `1 / self`.
        invert, invert_with => invert
    );
    impl_unary_op!(
        /// Computes `self * self`.
        square, square_with => square
    );
    impl_unary_op!(
        /// Computes the square root, failing with [`ArithmeticError::InvalidOperand`] if negative.
        sqrt, sqrt_with => sqrt
    );

    impl_int_op!(
        /// Computes `self^n`, `n` may be negative.
        pow, pow_with, TruncationPolicy::DEFAULT => pow
    );
    impl_int_op!(
        /// Rounds to `n` fractional digits, keeping the scale.
        round, round_with, TruncationPolicy::DEFAULT => round
    );
    impl_int_op!(
        /// Computes `self * 2^n`, rounding toward negative infinity like an arithmetic shift.
        shift_left, shift_left_with, TruncationPolicy::SHIFT_DEFAULT => shift_left
    );
    impl_int_op!(
        /// Computes `self / 2^n`, rounding toward negative infinity like an arithmetic shift.
        shift_right, shift_right_with, TruncationPolicy::SHIFT_DEFAULT => shift_right
    );
    impl_int_op!(
        /// Computes `self * 10^n`.
        multiply_by_power_of_ten, multiply_by_power_of_ten_with, TruncationPolicy::DEFAULT => multiply_by_power_of_10
    );
    impl_int_op!(
        /// Computes `self / 10^n`.
        divide_by_power_of_ten, divide_by_power_of_ten_with, TruncationPolicy::DEFAULT => divide_by_power_of_10
    );

    /// Returns the integral part, truncated toward zero.
    #[inline]
    pub fn integral_part(self) -> Self {
        Self::from_unscaled(self.unscaled - self.fractional_part().unscaled)
    }

    /// Returns the fractional part, it has the sign of `self`.
    #[inline]
    pub fn fractional_part(self) -> Self {
        Self::from_unscaled(Self::metrics().modulo_by_scale_factor(self.unscaled))
    }

    /// Returns `-1`, `0` or `1`.
    #[inline]
    pub const fn signum(self) -> i32 {
        self.unscaled.signum() as i32
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.unscaled == 0
    }

    #[inline]
    pub fn is_one(self) -> bool {
        self == Self::ONE
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.unscaled > 0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.unscaled < 0
    }

    #[inline]
    pub const fn is_non_negative(self) -> bool {
        self.unscaled >= 0
    }

    #[inline]
    pub const fn is_non_positive(self) -> bool {
        self.unscaled <= 0
    }

    #[inline]
    pub fn is_minus_one(self) -> bool {
        self == Self::MINUS_ONE
    }

    /// Checks if this is the smallest positive value.
    #[inline]
    pub const fn is_ulp(self) -> bool {
        self.unscaled == 1
    }

    /// Checks if `-1 < self < 1`.
    #[inline]
    pub fn is_integral_part_zero(self) -> bool {
        Self::MINUS_ONE < self && self < Self::ONE
    }

    /// Checks if `0 <= self < 1`.
    #[inline]
    pub fn is_between_zero_and_one(self) -> bool {
        Self::ZERO <= self && self < Self::ONE
    }

    /// Checks if `-1 < self <= 0`.
    #[inline]
    pub fn is_between_zero_and_minus_one(self) -> bool {
        Self::MINUS_ONE < self && self <= Self::ZERO
    }

    /// Checks if the fractional part is zero.
    #[inline]
    pub fn is_integral(self) -> bool {
        Self::metrics().modulo_by_scale_factor(self.unscaled) == 0
    }

    /// Compares the numeric values of decimals of possibly different scales.
    pub fn compare_numerically<const T: u8>(self, other: Decimal<T>) -> Ordering {
        match S.cmp(&T) {
            Ordering::Equal => self.unscaled.cmp(&other.unscaled()),
            // self * 10^(T - S) vs other
            Ordering::Less => compare_rescaled(self.unscaled, other.unscaled(), T - S),
            Ordering::Greater => compare_rescaled(other.unscaled(), self.unscaled, S - T).reverse(),
        }
    }

    /// Converts to an integer with the default policy.
    #[inline]
    pub fn to_long(self) -> Result<i64, ArithmeticError> {
        self.to_long_with(TruncationPolicy::DEFAULT)
    }

    #[inline]
    pub fn to_long_with(self, policy: TruncationPolicy) -> Result<i64, ArithmeticError> {
        Self::arithmetic_with(policy).to_long(self.unscaled)
    }

    /// Converts to the nearest `f64`.
    #[inline]
    pub fn to_f64(self) -> f64 {
        Self::arithmetic().to_f64(self.unscaled)
    }

    /// Converts to the nearest `f32`.
    #[inline]
    pub fn to_f32(self) -> f32 {
        Self::arithmetic().to_f32(self.unscaled)
    }

    /// Converts to an arbitrary-precision decimal, which is always exact.
    #[inline]
    pub fn to_big_decimal(self) -> decimal_rs::Decimal {
        Self::arithmetic().to_big_decimal(self.unscaled)
    }

    /// Returns a mutable copy of this decimal.
    #[inline]
    pub fn to_mutable(self) -> MutableDecimal<S> {
        MutableDecimal::new(self)
    }
}

/// Compares `a * 10^n` with `b` using the division-free metrics of `n`.
#[inline]
fn compare_rescaled(a: i64, b: i64, n: u8) -> Ordering {
    let metrics = ScaleMetrics::of(n);
    let truncated = metrics.divide_by_scale_factor(b);
    match a.cmp(&truncated) {
        // b == truncated * 10^n + remainder
        Ordering::Equal => 0.cmp(&metrics.modulo_by_scale_factor(b)),
        ordering => ordering,
    }
}

impl<const S: u8> fmt::Display for Decimal<S> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        #[allow(clippy::let_unit_value)]
        let () = Self::SCALE_CHECK;
        fmt::Display::fmt(&DisplayUnscaled::new(self.unscaled, S), f)
    }
}

impl<const S: u8> fmt::Debug for Decimal<S> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        #[allow(clippy::let_unit_value)]
        let () = Self::SCALE_CHECK;
        f.debug_tuple("Decimal")
            .field(&format_args!("{}", DisplayUnscaled::new(self.unscaled, S)))
            .finish()
    }
}

impl<const S: u8> From<MutableDecimal<S>> for Decimal<S> {
    #[inline]
    fn from(value: MutableDecimal<S>) -> Self {
        value.to_immutable()
    }
}

impl<const S: u8> From<&MutableDecimal<S>> for Decimal<S> {
    #[inline]
    fn from(value: &MutableDecimal<S>) -> Self {
        value.to_immutable()
    }
}
