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

//! Decimal formatting.

use crate::arith::Arithmetic;
use stack_buf::StackVec;
use std::fmt;
use std::fmt::Write;

pub(crate) type Buf = StackVec<u8, 256>;

/// Precision requests beyond this are clamped, so that the output always fits into a `Buf`.
const MAX_DISPLAY_PRECISION: usize = 200;

const ZERO_BUF: [u8; 64] = [b'0'; 64];

trait WriteExt: fmt::Write {
    #[inline(always)]
    fn write_byte(&mut self, byte: u8) -> fmt::Result {
        self.write_bytes(&[byte])
    }

    #[inline(always)]
    fn write_bytes(&mut self, bytes: &[u8]) -> fmt::Result {
        let s = unsafe { std::str::from_utf8_unchecked(bytes) };
        self.write_str(s)
    }

    #[inline]
    fn write_zeros(&mut self, mut count: usize) -> fmt::Result {
        while count > 0 {
            let n = count.min(ZERO_BUF.len());
            self.write_bytes(&ZERO_BUF[..n])?;
            count -= n;
        }
        Ok(())
    }
}

impl<W: fmt::Write> WriteExt for W {}

/// Writes `magnitude / 10^scale` in plain notation with exactly `scale` fractional digits.
///
/// With a `precision`, the fractional digits are rounded half up or padded with zeros
/// to that count.
pub(crate) fn write_magnitude<W: fmt::Write>(
    magnitude: u64,
    scale: u8,
    precision: Option<usize>,
    mut w: W,
) -> fmt::Result {
    let mut magnitude = u128::from(magnitude);
    let mut scale = scale as usize;
    let mut padding = 0;

    if let Some(precision) = precision {
        if precision < scale {
            let divisor = 10_u128.pow((scale - precision) as u32);
            let remainder = magnitude % divisor;
            magnitude /= divisor;
            if remainder * 2 >= divisor {
                magnitude += 1;
            }
            scale = precision;
        } else {
            padding = precision - scale;
        }
    }

    let mut buf = StackVec::<u8, 40>::new();
    write!(&mut buf, "{}", magnitude)?;
    let digits = buf.as_slice();
    let len = digits.len();

    if scale == 0 {
        w.write_bytes(digits)?;
        if padding > 0 {
            w.write_byte(b'.')?;
        }
    } else if len <= scale {
        w.write_bytes(b"0.")?;
        w.write_bytes(&ZERO_BUF[..scale - len])?;
        w.write_bytes(digits)?;
    } else {
        let (int_digits, frac_digits) = digits.split_at(len - scale);
        w.write_bytes(int_digits)?;
        w.write_byte(b'.')?;
        w.write_bytes(frac_digits)?;
    }

    w.write_zeros(padding)
}

/// Writes `unscaled / 10^scale` in plain notation, with a leading `-` if negative.
#[inline]
pub(crate) fn write_unscaled<W: fmt::Write>(unscaled: i64, scale: u8, mut w: W) -> fmt::Result {
    if unscaled < 0 {
        w.write_byte(b'-')?;
    }
    write_magnitude(unscaled.unsigned_abs(), scale, None, w)
}

/// Displays an unscaled value of a given scale.
///
/// Honors the width, fill, alignment, sign and precision flags of the formatter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DisplayUnscaled {
    unscaled: i64,
    scale: u8,
}

impl DisplayUnscaled {
    #[inline]
    pub const fn new(unscaled: i64, scale: u8) -> DisplayUnscaled {
        DisplayUnscaled { unscaled, scale }
    }
}

impl fmt::Display for DisplayUnscaled {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut buf = Buf::new();
        let precision = f.precision().map(|p| p.min(MAX_DISPLAY_PRECISION));
        write_magnitude(self.unscaled.unsigned_abs(), self.scale, precision, &mut buf)?;
        let str = unsafe { std::str::from_utf8_unchecked(buf.as_slice()) };
        f.pad_integral(self.unscaled >= 0, "", str)
    }
}

impl Arithmetic {
    /// Returns a value displaying `a` with the scale of this arithmetic.
    #[inline]
    pub const fn display(&self, a: i64) -> DisplayUnscaled {
        DisplayUnscaled::new(a, self.scale())
    }

    /// Formats `a` with exactly `scale` fractional digits, e.g. `-1.50` for `-150` at scale 2.
    #[inline]
    pub fn to_string(&self, a: i64) -> String {
        self.display(a).to_string()
    }

    /// Writes `a` the way [`Arithmetic::to_string`] formats it.
    #[inline]
    pub fn write<W: fmt::Write>(&self, a: i64, w: W) -> fmt::Result {
        write_unscaled(a, self.scale(), w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::TruncationPolicy;

    fn assert_fmt(unscaled: i64, scale: u8, expected: &str) {
        let arith = Arithmetic::with_scale(scale as i32, TruncationPolicy::DEFAULT).unwrap();
        assert_eq!(arith.to_string(unscaled), expected);

        let mut buf = Buf::new();
        arith.write(unscaled, &mut buf).unwrap();
        let str = unsafe { std::str::from_utf8_unchecked(buf.as_slice()) };
        assert_eq!(str, expected);
    }

    #[test]
    fn test_fmt() {
        assert_fmt(0, 0, "0");
        assert_fmt(0, 2, "0.00");
        assert_fmt(150, 2, "1.50");
        assert_fmt(-150, 2, "-1.50");
        assert_fmt(5, 2, "0.05");
        assert_fmt(-5, 3, "-0.005");
        assert_fmt(123, 0, "123");
        assert_fmt(i64::MAX, 0, "9223372036854775807");
        assert_fmt(i64::MIN, 0, "-9223372036854775808");
        assert_fmt(i64::MAX, 18, "9.223372036854775807");
        assert_fmt(i64::MIN, 18, "-9.223372036854775808");
        assert_fmt(1, 18, "0.000000000000000001");
    }

    #[test]
    fn test_display_flags() {
        let d = DisplayUnscaled::new(-150, 2);
        assert_eq!(format!("{}", d), "-1.50");
        assert_eq!(format!("{:>8}", d), "   -1.50");
        assert_eq!(format!("{:<8}|", d), "-1.50   |");
        assert_eq!(format!("{:08}", d), "-0001.50");
        assert_eq!(format!("{:+}", DisplayUnscaled::new(150, 2)), "+1.50");
        assert_eq!(format!("{:.4}", d), "-1.5000");
        assert_eq!(format!("{:.1}", d), "-1.5");
        assert_eq!(format!("{:.1}", DisplayUnscaled::new(155, 2)), "1.6");
        assert_eq!(format!("{:.0}", DisplayUnscaled::new(150, 2)), "2");
        assert_eq!(format!("{:.2}", DisplayUnscaled::new(7, 0)), "7.00");
        assert_eq!(format!("{:.0}", DisplayUnscaled::new(7, 0)), "7");
        assert_eq!(format!("{:.1}", DisplayUnscaled::new(i64::MAX, 18)), "9.2");
        assert_eq!(format!("{:.300}", DisplayUnscaled::new(1, 0)).len(), 2 + 200);
    }
}
