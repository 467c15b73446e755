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

//! Decimal error definitions.

use thiserror::Error;

/// An error which can be returned by an arithmetic operation on unscaled values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ArithmeticError {
    /// The result does not fit into 64 bits. Only raised by checked policies.
    #[error("numeric overflow")]
    Overflow,
    /// The divisor is zero.
    #[error("division by zero")]
    DivisionByZero,
    /// Rounding is necessary but the rounding mode is `Unnecessary`.
    #[error("rounding necessary")]
    Inexact,
    /// The operands have different scales and no rescaling was requested.
    #[error("incompatible scale")]
    IncompatibleScale,
    /// The scale lies outside of `[0, 18]`.
    #[error("scale out of range")]
    InvalidScale,
    /// The operand lies outside of the domain of the operation.
    #[error("invalid operand")]
    InvalidOperand,
}

/// An error which can be returned when parsing a decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecimalParseError {
    /// Empty string.
    #[error("cannot parse number from empty string")]
    Empty,
    /// Invalid decimal.
    #[error("invalid number")]
    Invalid,
    /// The parsed number cannot be represented under the active policy.
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

impl From<DecimalParseError> for ArithmeticError {
    #[inline]
    fn from(e: DecimalParseError) -> Self {
        match e {
            DecimalParseError::Empty | DecimalParseError::Invalid => ArithmeticError::InvalidOperand,
            DecimalParseError::Arithmetic(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ArithmeticError::Overflow.to_string(), "numeric overflow");
        assert_eq!(ArithmeticError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(ArithmeticError::Inexact.to_string(), "rounding necessary");
        assert_eq!(DecimalParseError::Empty.to_string(), "cannot parse number from empty string");
        assert_eq!(
            DecimalParseError::from(ArithmeticError::Overflow).to_string(),
            "numeric overflow"
        );
    }

    #[test]
    fn test_from_parse_error() {
        assert_eq!(
            ArithmeticError::from(DecimalParseError::Invalid),
            ArithmeticError::InvalidOperand
        );
        assert_eq!(
            ArithmeticError::from(DecimalParseError::Arithmetic(ArithmeticError::Inexact)),
            ArithmeticError::Inexact
        );
    }
}
