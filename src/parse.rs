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

//! Decimal parsing utilities.

use crate::arith::Arithmetic;
use crate::decimal::Decimal;
use crate::error::DecimalParseError;
use crate::mutable::MutableDecimal;
use crate::rounding::{RoundingMode, TruncatedPart};
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Sign {
    Positive,
    Negative,
}

/// Digit runs of a plain decimal literal.
#[derive(Debug)]
struct Literal<'a> {
    sign: Sign,
    integral: &'a [u8],
    fractional: &'a [u8],
}

#[inline]
fn split_sign(s: &[u8]) -> (Sign, &[u8]) {
    match s.split_first() {
        Some((&b'-', rest)) => (Sign::Negative, rest),
        Some((&b'+', rest)) => (Sign::Positive, rest),
        _ => (Sign::Positive, s),
    }
}

/// Splits at the first byte that is not an ASCII digit.
#[inline]
fn split_digits(s: &[u8]) -> (&[u8], &[u8]) {
    let end = s.iter().position(|b| !b.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

#[inline]
fn trim_start(s: &[u8]) -> &[u8] {
    let start = s.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(s.len());
    &s[start..]
}

/// Scans `[+-]digits[.digits]`, at least one digit required, and returns the unscanned rest.
fn scan_literal(s: &[u8]) -> Result<(Literal<'_>, &[u8]), DecimalParseError> {
    let (sign, s) = split_sign(s);
    let (integral, s) = split_digits(s);

    let (fractional, rest) = match s.split_first() {
        Some((&b'.', after_point)) => split_digits(after_point),
        _ => (&b""[..], s),
    };

    if integral.is_empty() && fractional.is_empty() {
        return Err(DecimalParseError::Invalid);
    }

    Ok((
        Literal {
            sign,
            integral,
            fractional,
        },
        rest,
    ))
}

/// Appends decimal digits to a magnitude, keeping its low 128 bits and tracking whether it got wider.
#[inline]
fn push_digits(magnitude: &mut u128, wide: &mut bool, digits: impl Iterator<Item = u8>) {
    for digit in digits {
        let (next, c1) = magnitude.overflowing_mul(10);
        let (next, c2) = next.overflowing_add(u128::from(digit - b'0'));
        *wide |= c1 || c2;
        *magnitude = next;
    }
}

/// Converts a literal at the start of `s` into an unscaled value of `arith`, returning the bytes after it.
#[inline]
fn parse_str<'a>(arith: &Arithmetic, s: &'a [u8]) -> Result<(i64, &'a [u8]), DecimalParseError> {
    let (
        Literal {
            sign,
            integral,
            fractional,
        },
        rest,
    ) = scan_literal(s)?;

    let scale = arith.scale() as usize;
    let (kept, dropped) = if fractional.len() > scale {
        fractional.split_at(scale)
    } else {
        (fractional, &b""[..])
    };

    let mut magnitude = 0_u128;
    let mut wide = false;
    push_digits(&mut magnitude, &mut wide, integral.iter().chain(kept).copied());
    push_digits(&mut magnitude, &mut wide, (kept.len()..scale).map(|_| b'0'));

    let part = match dropped.split_first() {
        Some((&first, rest)) => TruncatedPart::from_digits(first - b'0', rest.iter().all(|&d| d == b'0')),
        None => TruncatedPart::Zero,
    };

    let value = arith.round_magnitude(magnitude, wide, part, sign == Sign::Negative)?;
    Ok((value, rest))
}

/// Same as [`parse_str`] but tolerates surrounding whitespace only.
#[inline]
fn from_str(arith: &Arithmetic, s: &str) -> Result<i64, DecimalParseError> {
    let s = trim_start(s.as_bytes());
    if s.is_empty() {
        return Err(DecimalParseError::Empty);
    }

    let (value, rest) = parse_str(arith, s)?;
    if trim_start(rest).is_empty() {
        Ok(value)
    } else {
        Err(DecimalParseError::Invalid)
    }
}

impl Arithmetic {
    /// Parses a plain decimal string like `-12.345` into an unscaled value.
    ///
    /// Digits beyond the scale are rounded with the rounding mode, values out of range
    /// are reported by the overflow mode. Exponents, `NaN` and infinities are rejected.
    #[inline]
    pub fn parse(&self, s: &str) -> Result<i64, DecimalParseError> {
        from_str(self, s)
    }
}

impl<const S: u8> FromStr for Decimal<S> {
    type Err = DecimalParseError;

    /// Parses with `HalfUp` rounding, failing on overflow.
    ///
    /// Use [`Arithmetic::parse`] for other truncation policies.
    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let arith = Self::arithmetic_with(RoundingMode::HalfUp.checked());
        Ok(Decimal::from_unscaled(from_str(&arith, s)?))
    }
}

impl<const S: u8> FromStr for MutableDecimal<S> {
    type Err = DecimalParseError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(MutableDecimal::new(s.parse()?))
    }
}
