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

//! Mutable decimal updated in place.

use crate::decimal::Decimal;
use crate::error::ArithmeticError;
use crate::policy::{OverflowMode, TruncationPolicy};
use std::fmt;

macro_rules! impl_assign_op {
    ($(#[$attr:meta])* $name: ident, $with: ident => $op: ident) => {
        $(#[$attr])*
        #[inline]
        pub fn $name(&mut self, other: Decimal<S>) -> Result<&mut Self, ArithmeticError> {
            self.$with(other, TruncationPolicy::DEFAULT)
        }

        #[inline]
        pub fn $with(&mut self, other: Decimal<S>, policy: TruncationPolicy) -> Result<&mut Self, ArithmeticError> {
            self.value = self.value.$op(other, policy)?;
            Ok(self)
        }
    };
}

macro_rules! impl_unary_assign_op {
    ($(#[$attr:meta])* $name: ident, $with: ident => $op: ident) => {
        $(#[$attr])*
        #[inline]
        pub fn $name(&mut self) -> Result<&mut Self, ArithmeticError> {
            self.$with(TruncationPolicy::DEFAULT)
        }

        #[inline]
        pub fn $with(&mut self, policy: TruncationPolicy) -> Result<&mut Self, ArithmeticError> {
            self.value = self.value.$op(policy)?;
            Ok(self)
        }
    };
}

macro_rules! impl_int_assign_op {
    ($(#[$attr:meta])* $name: ident, $with: ident) => {
        $(#[$attr])*
        #[inline]
        pub fn $name(&mut self, n: i32) -> Result<&mut Self, ArithmeticError> {
            self.value = self.value.$name(n)?;
            Ok(self)
        }

        #[inline]
        pub fn $with(&mut self, n: i32, policy: TruncationPolicy) -> Result<&mut Self, ArithmeticError> {
            self.value = self.value.$with(n, policy)?;
            Ok(self)
        }
    };
}

/// A decimal of scale `S` whose operations update it in place.
///
/// Every operation returns `&mut Self` so that calls can be chained. A failed operation
/// leaves the value unchanged.
///
/// ```
/// use fixed_decimal::{Decimal, MutableDecimal};
///
/// let mut total = MutableDecimal::<2>::zero();
/// for price in ["1.25", "2.50", "0.05"] {
///     total.add(price.parse().unwrap()).unwrap();
/// }
/// total.multiply(Decimal::from_unscaled(200)).unwrap();
/// assert_eq!(total.to_string(), "7.60");
/// ```
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MutableDecimal<const S: u8> {
    value: Decimal<S>,
}

impl<const S: u8> MutableDecimal<S> {
    #[inline]
    pub const fn new(value: Decimal<S>) -> MutableDecimal<S> {
        MutableDecimal { value }
    }

    #[inline]
    pub const fn zero() -> MutableDecimal<S> {
        MutableDecimal::new(Decimal::ZERO)
    }

    #[inline]
    pub const fn unscaled(&self) -> i64 {
        self.value.unscaled()
    }

    /// Returns the current value.
    #[inline]
    pub const fn to_immutable(&self) -> Decimal<S> {
        self.value
    }

    #[inline]
    pub fn set(&mut self, value: Decimal<S>) -> &mut Self {
        self.value = value;
        self
    }

    #[inline]
    pub fn set_unscaled(&mut self, unscaled: i64) -> &mut Self {
        self.set(Decimal::from_unscaled(unscaled))
    }

    impl_assign_op!(
        /// Replaces the value with `self + other`.
        add, add_with => add_with
    );
    impl_assign_op!(
        /// Replaces the value with `self - other`.
        subtract, subtract_with => sub_with
    );
    impl_assign_op!(
        /// Replaces the value with `self * other`.
        multiply, multiply_with => mul_with
    );
    impl_assign_op!(
        /// Replaces the value with `self / other`.
        divide, divide_with => div_with
    );
    impl_assign_op!(
        /// Replaces the value with the average of `self` and `other`.
        avg, avg_with => avg_with
    );

    impl_unary_assign_op!(
        /// Replaces the value with `1 / self`.
        invert, invert_with => invert_with
    );
    impl_unary_assign_op!(
        /// Replaces the value with `self * self`.
        square, square_with => square_with
    );
    impl_unary_assign_op!(
        /// Replaces the value with its square root.
        sqrt, sqrt_with => sqrt_with
    );

    impl_assign_op!(
        /// Replaces the value with `self + other * other`.
        add_squared, add_squared_with => add_squared_with
    );
    impl_assign_op!(
        /// Replaces the value with `self - other * other`.
        subtract_squared, subtract_squared_with => sub_squared_with
    );

    /// Replaces the value with `self * n`, which is always exact.
    #[inline]
    pub fn multiply_by_long(&mut self, n: i64, overflow_mode: OverflowMode) -> Result<&mut Self, ArithmeticError> {
        self.value = self.value.mul_long(n, overflow_mode)?;
        Ok(self)
    }

    /// Replaces the value with `self / n`.
    #[inline]
    pub fn divide_by_long(&mut self, n: i64, policy: TruncationPolicy) -> Result<&mut Self, ArithmeticError> {
        self.value = self.value.div_long(n, policy)?;
        Ok(self)
    }

    #[inline]
    pub fn negate(&mut self, overflow_mode: OverflowMode) -> Result<&mut Self, ArithmeticError> {
        self.value = self.value.negate(overflow_mode)?;
        Ok(self)
    }

    #[inline]
    pub fn abs(&mut self, overflow_mode: OverflowMode) -> Result<&mut Self, ArithmeticError> {
        self.value = self.value.abs(overflow_mode)?;
        Ok(self)
    }

    impl_int_assign_op!(
        /// Replaces the value with `self^n`.
        pow, pow_with
    );
    impl_int_assign_op!(
        /// Rounds to `n` fractional digits.
        round, round_with
    );
    impl_int_assign_op!(
        /// Replaces the value with `self * 2^n`, rounding toward negative infinity by default.
        shift_left, shift_left_with
    );
    impl_int_assign_op!(
        /// Replaces the value with `self / 2^n`, rounding toward negative infinity by default.
        shift_right, shift_right_with
    );
}

impl<const S: u8> From<Decimal<S>> for MutableDecimal<S> {
    #[inline]
    fn from(value: Decimal<S>) -> Self {
        MutableDecimal::new(value)
    }
}

impl<const S: u8> fmt::Display for MutableDecimal<S> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl<const S: u8> fmt::Debug for MutableDecimal<S> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("MutableDecimal")
            .field(&format_args!("{}", self.value))
            .finish()
    }
}
