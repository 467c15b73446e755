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

//! Ops implementation.
//!
//! Operators round `HalfUp` and panic on overflow or division by zero.

use crate::decimal::Decimal;
use crate::error::ArithmeticError;
use crate::mutable::MutableDecimal;
use crate::policy::{OverflowMode, TruncationPolicy};
use crate::rounding::RoundingMode;
use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};

const OPS_POLICY: TruncationPolicy = TruncationPolicy::new(RoundingMode::HalfUp, OverflowMode::Checked);

#[inline(always)]
fn unwrap_or_panic<T>(result: Result<T, ArithmeticError>, msg: &'static str) -> T {
    match result {
        Ok(v) => v,
        Err(_) => panic!("{}", msg),
    }
}

impl<const S: u8> Neg for Decimal<S> {
    type Output = Decimal<S>;

    #[inline]
    fn neg(self) -> Self::Output {
        unwrap_or_panic(self.negate(OverflowMode::Checked), "Negation overflowed")
    }
}

impl<const S: u8> Neg for &'_ Decimal<S> {
    type Output = Decimal<S>;

    #[inline]
    fn neg(self) -> Self::Output {
        -*self
    }
}

macro_rules! impl_arith {
    ($op: ident { $method: ident } => $with: ident, $msg: literal) => {
        impl<const S: u8> $op<Decimal<S>> for Decimal<S> {
            type Output = Decimal<S>;

            #[inline(always)]
            fn $method(self, other: Decimal<S>) -> Self::Output {
                unwrap_or_panic(self.$with(other, OPS_POLICY), $msg)
            }
        }

        impl<const S: u8> $op<&'_ Decimal<S>> for Decimal<S> {
            type Output = Decimal<S>;

            #[inline(always)]
            fn $method(self, other: &'_ Decimal<S>) -> Self::Output {
                self.$method(*other)
            }
        }

        impl<const S: u8> $op<Decimal<S>> for &'_ Decimal<S> {
            type Output = Decimal<S>;

            #[inline(always)]
            fn $method(self, other: Decimal<S>) -> Self::Output {
                (*self).$method(other)
            }
        }

        impl<const S: u8> $op<&'_ Decimal<S>> for &'_ Decimal<S> {
            type Output = Decimal<S>;

            #[inline(always)]
            fn $method(self, other: &'_ Decimal<S>) -> Self::Output {
                (*self).$method(*other)
            }
        }
    };
}

impl_arith!(Add { add } => add_with, "Addition overflowed");
impl_arith!(Sub { sub } => sub_with, "Subtraction overflowed");
impl_arith!(Mul { mul } => mul_with, "Multiplication overflowed");
impl_arith!(Div { div } => div_with, "Division by zero or overflowed");

impl<const S: u8> Rem<Decimal<S>> for Decimal<S> {
    type Output = Decimal<S>;

    #[inline(always)]
    fn rem(self, other: Decimal<S>) -> Self::Output {
        unwrap_or_panic(self.remainder(other), "Division by zero")
    }
}

impl<const S: u8> Rem<&'_ Decimal<S>> for Decimal<S> {
    type Output = Decimal<S>;

    #[inline(always)]
    fn rem(self, other: &'_ Decimal<S>) -> Self::Output {
        self.rem(*other)
    }
}

impl<const S: u8> Rem<Decimal<S>> for &'_ Decimal<S> {
    type Output = Decimal<S>;

    #[inline(always)]
    fn rem(self, other: Decimal<S>) -> Self::Output {
        (*self).rem(other)
    }
}

impl<const S: u8> Rem<&'_ Decimal<S>> for &'_ Decimal<S> {
    type Output = Decimal<S>;

    #[inline(always)]
    fn rem(self, other: &'_ Decimal<S>) -> Self::Output {
        (*self).rem(*other)
    }
}

macro_rules! impl_arith_with_long {
    ($op: ident { $method: ident } => $long: ident ($arg: expr), $msg: literal) => {
        impl<const S: u8> $op<i64> for Decimal<S> {
            type Output = Decimal<S>;

            #[inline(always)]
            fn $method(self, other: i64) -> Self::Output {
                unwrap_or_panic(self.$long(other, $arg), $msg)
            }
        }

        impl<const S: u8> $op<i64> for &'_ Decimal<S> {
            type Output = Decimal<S>;

            #[inline(always)]
            fn $method(self, other: i64) -> Self::Output {
                (*self).$method(other)
            }
        }
    };
}

impl_arith_with_long!(Add { add } => add_long(OverflowMode::Checked), "Addition overflowed");
impl_arith_with_long!(Sub { sub } => sub_long(OverflowMode::Checked), "Subtraction overflowed");
impl_arith_with_long!(Mul { mul } => mul_long(OverflowMode::Checked), "Multiplication overflowed");
impl_arith_with_long!(Div { div } => div_long(OPS_POLICY), "Division by zero or overflowed");

macro_rules! impl_arith_assign {
    ($op: ident { $method: ident } => $bin: ident { $bin_method: ident }) => {
        impl<const S: u8> $op<Decimal<S>> for Decimal<S> {
            #[inline(always)]
            fn $method(&mut self, other: Decimal<S>) {
                *self = $bin::$bin_method(*self, other);
            }
        }

        impl<const S: u8> $op<&'_ Decimal<S>> for Decimal<S> {
            #[inline(always)]
            fn $method(&mut self, other: &'_ Decimal<S>) {
                *self = $bin::$bin_method(*self, *other);
            }
        }

        impl<const S: u8> $op<i64> for Decimal<S> {
            #[inline(always)]
            fn $method(&mut self, other: i64) {
                *self = $bin::$bin_method(*self, other);
            }
        }

        impl<const S: u8> $op<Decimal<S>> for MutableDecimal<S> {
            #[inline(always)]
            fn $method(&mut self, other: Decimal<S>) {
                let result = $bin::$bin_method(self.to_immutable(), other);
                self.set(result);
            }
        }

        impl<const S: u8> $op<&'_ Decimal<S>> for MutableDecimal<S> {
            #[inline(always)]
            fn $method(&mut self, other: &'_ Decimal<S>) {
                let result = $bin::$bin_method(self.to_immutable(), *other);
                self.set(result);
            }
        }
    };
}

impl_arith_assign!(AddAssign { add_assign } => Add { add });
impl_arith_assign!(SubAssign { sub_assign } => Sub { sub });
impl_arith_assign!(MulAssign { mul_assign } => Mul { mul });
impl_arith_assign!(DivAssign { div_assign } => Div { div });

impl<const S: u8> RemAssign<Decimal<S>> for Decimal<S> {
    #[inline(always)]
    fn rem_assign(&mut self, other: Decimal<S>) {
        *self = Rem::rem(*self, other);
    }
}

impl<const S: u8> RemAssign<&'_ Decimal<S>> for Decimal<S> {
    #[inline(always)]
    fn rem_assign(&mut self, other: &'_ Decimal<S>) {
        *self = Rem::rem(*self, *other);
    }
}

impl<const S: u8> Sum for Decimal<S> {
    #[inline(always)]
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Decimal::ZERO, Add::add)
    }
}

impl<'a, const S: u8> Sum<&'a Decimal<S>> for Decimal<S> {
    #[inline(always)]
    fn sum<I: Iterator<Item = &'a Decimal<S>>>(iter: I) -> Self {
        iter.fold(Decimal::ZERO, Add::add)
    }
}

impl<const S: u8> Product for Decimal<S> {
    #[inline(always)]
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Decimal::ONE, Mul::mul)
    }
}

impl<'a, const S: u8> Product<&'a Decimal<S>> for Decimal<S> {
    #[inline(always)]
    fn product<I: Iterator<Item = &'a Decimal<S>>>(iter: I) -> Self {
        iter.fold(Decimal::ONE, Mul::mul)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type D2 = Decimal<2>;

    fn d2(s: &str) -> D2 {
        s.parse().unwrap()
    }

    #[test]
    fn test_neg() {
        fn assert_neg(val: &str, expected: &str) {
            let val = d2(val);
            let expected = d2(expected);
            assert_eq!(-val, expected);
            assert_eq!(-&val, expected);
        }

        assert_neg("0", "0");
        assert_neg("1.5", "-1.5");
        assert_neg("-0.01", "0.01");
        assert_neg("92233720368547758.07", "-92233720368547758.07");
    }

    #[test]
    #[should_panic(expected = "Negation overflowed")]
    fn test_neg_min() {
        let _ = -D2::MIN;
    }

    #[test]
    fn test_arith() {
        fn assert_arith(a: &str, b: &str, sum: &str, diff: &str, product: &str, quotient: &str, rem: &str) {
            let (a, b) = (d2(a), d2(b));
            assert_eq!(a + b, d2(sum));
            assert_eq!(&a + b, d2(sum));
            assert_eq!(a + &b, d2(sum));
            assert_eq!(&a + &b, d2(sum));
            assert_eq!(a - b, d2(diff));
            assert_eq!(&a - &b, d2(diff));
            assert_eq!(a * b, d2(product));
            assert_eq!(&a * &b, d2(product));
            assert_eq!(a / b, d2(quotient));
            assert_eq!(&a / &b, d2(quotient));
            assert_eq!(a % b, d2(rem));
            assert_eq!(&a % &b, d2(rem));

            let mut c = a;
            c += b;
            c -= &b;
            assert_eq!(c, a);
            c *= b;
            assert_eq!(c, d2(product));
            c = a;
            c /= b;
            assert_eq!(c, d2(quotient));
            c = a;
            c %= b;
            assert_eq!(c, d2(rem));
        }

        assert_arith("1.5", "2.5", "4", "-1", "3.75", "0.6", "1.5");
        assert_arith("7.5", "2", "9.5", "5.5", "15", "3.75", "1.5");
        assert_arith("-7.5", "2", "-5.5", "-9.5", "-15", "-3.75", "-1.5");
        assert_arith("2", "3", "5", "-1", "6", "0.67", "2");
        assert_arith("0.05", "0.05", "0.1", "0", "0", "1", "0");
    }

    #[test]
    fn test_arith_with_long() {
        let a = d2("1.5");
        assert_eq!(a + 2, d2("3.5"));
        assert_eq!(&a - 2, d2("-0.5"));
        assert_eq!(a * 3, d2("4.5"));
        assert_eq!(a / 4, d2("0.38"));

        let mut b = a;
        b += 1;
        b *= 2;
        b -= 1;
        b /= 2;
        assert_eq!(b, d2("2"));
    }

    #[test]
    fn test_mutable_assign() {
        let mut m = MutableDecimal::new(d2("1.5"));
        m += d2("2.5");
        m *= &d2("2");
        m -= d2("1");
        m /= d2("3");
        assert_eq!(m.to_immutable(), d2("2.33"));
    }

    #[test]
    fn test_sum_product() {
        let values = [d2("1.5"), d2("2"), d2("-0.25")];
        assert_eq!(values.iter().sum::<D2>(), d2("3.25"));
        assert_eq!(values.iter().copied().sum::<D2>(), d2("3.25"));
        assert_eq!(values.iter().product::<D2>(), d2("-0.75"));
        assert_eq!(values.iter().copied().product::<D2>(), d2("-0.75"));
        assert_eq!(std::iter::empty::<D2>().sum::<D2>(), D2::ZERO);
        assert_eq!(std::iter::empty::<D2>().product::<D2>(), D2::ONE);
    }

    #[test]
    #[should_panic(expected = "Addition overflowed")]
    fn test_add_overflow() {
        let _ = D2::MAX + D2::ULP;
    }

    #[test]
    #[should_panic(expected = "Multiplication overflowed")]
    fn test_mul_overflow() {
        let _ = D2::MAX * d2("2");
    }

    #[test]
    #[should_panic(expected = "Division by zero or overflowed")]
    fn test_div_by_zero() {
        let _ = D2::ONE / D2::ZERO;
    }

    #[test]
    #[should_panic(expected = "Division by zero")]
    fn test_rem_by_zero() {
        let _ = D2::ONE % D2::ZERO;
    }
}
