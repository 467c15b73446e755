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

//! Rounding modes.

use crate::error::ArithmeticError;
use crate::policy::{OverflowMode, TruncationPolicy};

/// Specifies how the discarded digits of a result are rounded.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Rounds away from zero.
    Up,
    /// Rounds toward zero.
    Down,
    /// Rounds toward positive infinity.
    Ceiling,
    /// Rounds toward negative infinity.
    Floor,
    /// Rounds toward the nearest neighbor, ties away from zero.
    HalfUp,
    /// Rounds toward the nearest neighbor, ties toward zero.
    HalfDown,
    /// Rounds toward the nearest neighbor, ties toward the even neighbor.
    HalfEven,
    /// Rounds toward the nearest neighbor, ties toward positive infinity.
    HalfCeiling,
    /// Rounds toward the nearest neighbor, ties toward negative infinity.
    HalfFloor,
    /// Asserts that the result is exact, fails with [`ArithmeticError::Inexact`] otherwise.
    Unnecessary,
}

impl RoundingMode {
    /// All rounding modes in declaration order.
    pub const VALUES: [RoundingMode; 10] = [
        RoundingMode::Up,
        RoundingMode::Down,
        RoundingMode::Ceiling,
        RoundingMode::Floor,
        RoundingMode::HalfUp,
        RoundingMode::HalfDown,
        RoundingMode::HalfEven,
        RoundingMode::HalfCeiling,
        RoundingMode::HalfFloor,
        RoundingMode::Unnecessary,
    ];

    /// Returns the checked truncation policy of this rounding mode.
    #[inline]
    pub const fn checked(self) -> TruncationPolicy {
        TruncationPolicy::new(self, OverflowMode::Checked)
    }

    /// Returns the unchecked truncation policy of this rounding mode.
    #[inline]
    pub const fn unchecked(self) -> TruncationPolicy {
        TruncationPolicy::new(self, OverflowMode::Unchecked)
    }

    /// Returns the mode `m` satisfying `round(-x, self) == -round(x, m)`.
    #[inline]
    pub const fn mirror(self) -> RoundingMode {
        match self {
            RoundingMode::Ceiling => RoundingMode::Floor,
            RoundingMode::Floor => RoundingMode::Ceiling,
            RoundingMode::HalfCeiling => RoundingMode::HalfFloor,
            RoundingMode::HalfFloor => RoundingMode::HalfCeiling,
            mode => mode,
        }
    }

    /// Returns the value to add to a result truncated toward zero.
    ///
    /// `sign` is the sign of the exact result, `truncated_value` the result truncated
    /// toward zero (only its parity is relevant) and `truncated_part` the classification of
    /// the discarded digits. The increment is `0` or `sign`.
    #[inline]
    pub fn calculate_rounding_increment(
        self,
        sign: i32,
        truncated_value: i64,
        truncated_part: TruncatedPart,
    ) -> Result<i32, ArithmeticError> {
        if truncated_part == TruncatedPart::Zero {
            return Ok(0);
        }

        let increment = match self {
            RoundingMode::Up => sign,
            RoundingMode::Down => 0,
            RoundingMode::Ceiling => {
                if sign > 0 {
                    1
                } else {
                    0
                }
            }
            RoundingMode::Floor => {
                if sign < 0 {
                    -1
                } else {
                    0
                }
            }
            RoundingMode::HalfUp => {
                if truncated_part >= TruncatedPart::EqualToHalf {
                    sign
                } else {
                    0
                }
            }
            RoundingMode::HalfDown => {
                if truncated_part == TruncatedPart::GreaterThanHalf {
                    sign
                } else {
                    0
                }
            }
            RoundingMode::HalfEven => match truncated_part {
                TruncatedPart::GreaterThanHalf => sign,
                TruncatedPart::EqualToHalf if truncated_value & 1 != 0 => sign,
                _ => 0,
            },
            RoundingMode::HalfCeiling => match truncated_part {
                TruncatedPart::GreaterThanHalf => sign,
                TruncatedPart::EqualToHalf if sign > 0 => 1,
                _ => 0,
            },
            RoundingMode::HalfFloor => match truncated_part {
                TruncatedPart::GreaterThanHalf => sign,
                TruncatedPart::EqualToHalf if sign < 0 => -1,
                _ => 0,
            },
            RoundingMode::Unnecessary => return Err(ArithmeticError::Inexact),
        };

        Ok(increment)
    }
}

impl Default for RoundingMode {
    #[inline]
    fn default() -> Self {
        RoundingMode::HalfUp
    }
}

/// Classification of the digits discarded by a truncation, relative to half a unit
/// of the last kept digit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TruncatedPart {
    Zero,
    LessThanHalfButNotZero,
    EqualToHalf,
    GreaterThanHalf,
}

impl TruncatedPart {
    /// Classifies `remainder / divisor`, where `remainder < divisor`.
    #[inline]
    pub fn of(remainder: u128, divisor: u128) -> TruncatedPart {
        debug_assert!(remainder < divisor);

        if remainder == 0 {
            return TruncatedPart::Zero;
        }

        // Compares `remainder` against `divisor / 2` without losing the odd bit.
        let rest = divisor - remainder;
        if remainder < rest {
            TruncatedPart::LessThanHalfButNotZero
        } else if remainder == rest {
            TruncatedPart::EqualToHalf
        } else {
            TruncatedPart::GreaterThanHalf
        }
    }

    /// Classifies discarded decimal digits from the first one and whether all the following are zero.
    #[inline]
    pub fn from_digits(first_digit: u8, rest_is_zero: bool) -> TruncatedPart {
        match first_digit {
            0 if rest_is_zero => TruncatedPart::Zero,
            5 if rest_is_zero => TruncatedPart::EqualToHalf,
            0..=4 => TruncatedPart::LessThanHalfButNotZero,
            _ => TruncatedPart::GreaterThanHalf,
        }
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        matches!(self, TruncatedPart::Zero)
    }
}
