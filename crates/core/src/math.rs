// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Fixed-point integer division with an explicit rounding direction.
//!
//! All pricing arithmetic runs on `u64` amounts widened to `u128` intermediates, so a
//! product of two amounts never overflows. Every helper returns `None` instead of
//! panicking when a result cannot be represented or a divisor is zero.

/// Computes `amount * numerator / denominator` rounded toward zero.
///
/// Returns `None` if the product overflows or `denominator` is zero.
#[must_use]
pub fn floor_div(amount: u128, numerator: u128, denominator: u128) -> Option<u128> {
    amount.checked_mul(numerator)?.checked_div(denominator)
}

/// Computes `amount * numerator / denominator` rounded away from zero.
///
/// Returns `None` if an intermediate overflows or `denominator` is zero.
#[must_use]
pub fn ceil_div(amount: u128, numerator: u128, denominator: u128) -> Option<u128> {
    amount
        .checked_mul(numerator)?
        .checked_add(denominator.checked_sub(1)?)?
        .checked_div(denominator)
}

/// Ceiling division which also reports the smallest divisor producing the rounded quotient.
pub trait CheckedCeilDiv: Sized {
    /// Divides `self` by `rhs` rounding the quotient up, returning `(quotient, divisor)`.
    ///
    /// When the floored quotient is zero the result is `(1, 0)` if `2 * self >= rhs`,
    /// otherwise `(0, 0)`. When there is a remainder the quotient is incremented and the
    /// divisor shrunk to the minimal value which still yields that quotient, so that
    /// `quotient * divisor` never exceeds `self` by more than one divisor step.
    ///
    /// Returns `None` if `rhs` is zero or an intermediate overflows.
    fn checked_ceil_div(&self, rhs: Self) -> Option<(Self, Self)>;
}

impl CheckedCeilDiv for u128 {
    fn checked_ceil_div(&self, mut rhs: Self) -> Option<(Self, Self)> {
        let mut quotient = self.checked_div(rhs)?;

        if quotient == 0 {
            return if self.checked_mul(2)? >= rhs {
                Some((1, 0))
            } else {
                Some((0, 0))
            };
        }

        if self.checked_rem(rhs)? > 0 {
            quotient = quotient.checked_add(1)?;
            rhs = self.checked_div(quotient)?;
            if self.checked_rem(quotient)? > 0 {
                rhs = rhs.checked_add(1)?;
            }
        }

        Some((quotient, rhs))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1000, 25_000, 1_000_000, Some(25))]
    #[case(999, 1, 1000, Some(0))]
    #[case(0, 30_000, 1_000_000, Some(0))]
    #[case(10, 3, 0, None)]
    #[case(u128::MAX, 2, 1, None)]
    fn test_floor_div(
        #[case] amount: u128,
        #[case] numerator: u128,
        #[case] denominator: u128,
        #[case] expected: Option<u128>,
    ) {
        assert_eq!(floor_div(amount, numerator, denominator), expected);
    }

    #[rstest]
    #[case(1000, 25_000, 1_000_000, Some(25))]
    #[case(999, 1, 1000, Some(1))]
    #[case(0, 30_000, 1_000_000, Some(0))]
    #[case(1, 1, 1, Some(1))]
    #[case(10, 3, 0, None)]
    fn test_ceil_div(
        #[case] amount: u128,
        #[case] numerator: u128,
        #[case] denominator: u128,
        #[case] expected: Option<u128>,
    ) {
        assert_eq!(ceil_div(amount, numerator, denominator), expected);
    }

    #[rstest]
    #[case(2_500_000, 3750, Some((667, 3749)))]
    #[case(10, 5, Some((2, 5)))]
    #[case(10, 3, Some((4, 3)))]
    #[case(3, 5, Some((1, 0)))]
    #[case(2, 5, Some((0, 0)))]
    #[case(0, 5, Some((0, 0)))]
    #[case(5, 0, None)]
    fn test_checked_ceil_div(
        #[case] lhs: u128,
        #[case] rhs: u128,
        #[case] expected: Option<(u128, u128)>,
    ) {
        assert_eq!(lhs.checked_ceil_div(rhs), expected);
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Property-based testing
    ////////////////////////////////////////////////////////////////////////////////

    use proptest::prelude::*;

    proptest! {
        #[rstest]
        fn prop_ceil_div_bounds_floor_div(
            amount in 0u128..=u128::from(u64::MAX),
            numerator in 0u128..=1_000_000u128,
            denominator in 1u128..=1_000_000u128,
        ) {
            let floor = floor_div(amount, numerator, denominator).unwrap();
            let ceil = ceil_div(amount, numerator, denominator).unwrap();
            prop_assert!(ceil >= floor);
            prop_assert!(ceil - floor <= 1);
        }

        #[rstest]
        fn prop_checked_ceil_div_rounds_up(
            lhs in 1u128..=u128::from(u64::MAX),
            rhs in 1u128..=u128::from(u64::MAX),
        ) {
            let (quotient, _) = lhs.checked_ceil_div(rhs).unwrap();
            if lhs >= rhs {
                prop_assert!(quotient * rhs >= lhs);
                prop_assert!((quotient - 1) * rhs < lhs);
            }
        }
    }
}
