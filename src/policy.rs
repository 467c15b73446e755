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

//! Overflow modes and truncation policies.

use crate::rounding::RoundingMode;

/// Specifies what happens when a result does not fit into 64 bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OverflowMode {
    /// Keeps the low 64 bits of the exact result, like two's complement wrapping.
    Unchecked,
    /// Fails with [`ArithmeticError::Overflow`](crate::ArithmeticError::Overflow).
    Checked,
}

impl OverflowMode {
    /// Both overflow modes in declaration order.
    pub const VALUES: [OverflowMode; 2] = [OverflowMode::Unchecked, OverflowMode::Checked];

    #[inline]
    pub const fn is_checked(self) -> bool {
        matches!(self, OverflowMode::Checked)
    }

    /// Combines this overflow mode with `rounding_mode`.
    #[inline]
    pub const fn policy_for(self, rounding_mode: RoundingMode) -> TruncationPolicy {
        TruncationPolicy::new(rounding_mode, self)
    }
}

impl Default for OverflowMode {
    #[inline]
    fn default() -> Self {
        OverflowMode::Unchecked
    }
}

/// A rounding mode paired with an overflow mode, it decides the fate of every
/// result that is not exactly representable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TruncationPolicy {
    rounding_mode: RoundingMode,
    overflow_mode: OverflowMode,
}

impl TruncationPolicy {
    /// `HalfUp` rounding with unchecked overflow.
    pub const DEFAULT: TruncationPolicy = TruncationPolicy::new(RoundingMode::HalfUp, OverflowMode::Unchecked);

    /// Policy of the shift operations: `Floor` rounding with unchecked overflow, consistent
    /// with an arithmetic shift of the unscaled value.
    pub const SHIFT_DEFAULT: TruncationPolicy =
        TruncationPolicy::new(RoundingMode::Floor, OverflowMode::Unchecked);

    /// All 20 policies, ordered by [`TruncationPolicy::index`].
    pub const VALUES: [TruncationPolicy; 20] = {
        let mut values = [TruncationPolicy::DEFAULT; 20];
        let mut i = 0;
        while i < 20 {
            values[i] = TruncationPolicy::new(RoundingMode::VALUES[i / 2], OverflowMode::VALUES[i % 2]);
            i += 1;
        }
        values
    };

    #[inline]
    pub const fn new(rounding_mode: RoundingMode, overflow_mode: OverflowMode) -> TruncationPolicy {
        TruncationPolicy {
            rounding_mode,
            overflow_mode,
        }
    }

    #[inline]
    pub const fn rounding_mode(self) -> RoundingMode {
        self.rounding_mode
    }

    #[inline]
    pub const fn overflow_mode(self) -> OverflowMode {
        self.overflow_mode
    }

    #[inline]
    pub const fn is_checked(self) -> bool {
        self.overflow_mode.is_checked()
    }

    /// Returns this policy with the rounding mode replaced.
    #[inline]
    pub const fn with_rounding_mode(self, rounding_mode: RoundingMode) -> TruncationPolicy {
        TruncationPolicy::new(rounding_mode, self.overflow_mode)
    }

    /// Returns this policy with the overflow mode replaced.
    #[inline]
    pub const fn with_overflow_mode(self, overflow_mode: OverflowMode) -> TruncationPolicy {
        TruncationPolicy::new(self.rounding_mode, overflow_mode)
    }

    /// Returns the position of this policy in [`TruncationPolicy::VALUES`].
    #[inline]
    pub const fn index(self) -> usize {
        self.rounding_mode as usize * 2 + self.overflow_mode as usize
    }
}

impl Default for TruncationPolicy {
    #[inline]
    fn default() -> Self {
        TruncationPolicy::DEFAULT
    }
}

impl From<RoundingMode> for TruncationPolicy {
    /// Pairs `rounding_mode` with unchecked overflow.
    #[inline]
    fn from(rounding_mode: RoundingMode) -> Self {
        rounding_mode.unchecked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values() {
        assert_eq!(TruncationPolicy::VALUES.len(), 20);
        for (i, policy) in TruncationPolicy::VALUES.iter().enumerate() {
            assert_eq!(policy.index(), i);
            for other in TruncationPolicy::VALUES[i + 1..].iter() {
                assert_ne!(policy, other);
            }
        }
    }

    #[test]
    fn test_default() {
        let policy = TruncationPolicy::default();
        assert_eq!(policy.rounding_mode(), RoundingMode::HalfUp);
        assert_eq!(policy.overflow_mode(), OverflowMode::Unchecked);
        assert!(!policy.is_checked());
        assert_eq!(TruncationPolicy::SHIFT_DEFAULT.rounding_mode(), RoundingMode::Floor);
    }

    #[test]
    fn test_builders() {
        let policy = RoundingMode::Down.checked();
        assert_eq!(policy, OverflowMode::Checked.policy_for(RoundingMode::Down));
        assert!(policy.is_checked());
        assert_eq!(policy.with_overflow_mode(OverflowMode::Unchecked), RoundingMode::Down.unchecked());
        assert_eq!(policy.with_rounding_mode(RoundingMode::Up), RoundingMode::Up.checked());
        assert_eq!(TruncationPolicy::from(RoundingMode::HalfEven), RoundingMode::HalfEven.unchecked());
    }
}
