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

//! Protocol fee arithmetic over fixed-point rates.
//!
//! A [`FeeRate`] is an integer numerator over [`FEE_RATE_DENOMINATOR`]. Fees taken from an
//! amount always round down, so `protocol_fee(amount, rate) <= amount` for every valid rate,
//! while the inverse (grossing a net amount up) always rounds up.

use std::fmt::Display;

use launchpad_core::{
    correctness::{FAILED, check_in_range_inclusive_u64},
    math::{ceil_div, floor_div},
};
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// The fixed denominator all fee rates are expressed over (1 unit = 0.0001%).
pub const FEE_RATE_DENOMINATOR: u64 = 1_000_000;

/// The maximum fee rate a pool configuration may carry (3%).
pub const MAX_FEE_RATE: u64 = 30_000;

/// A fee rate in parts per [`FEE_RATE_DENOMINATOR`], valid in `[0, FEE_RATE_DENOMINATOR]`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u64", into = "u64")]
pub struct FeeRate(u64);

impl FeeRate {
    /// A rate which charges nothing.
    pub const ZERO: Self = Self(0);

    /// A rate which charges the entire amount.
    pub const MAX: Self = Self(FEE_RATE_DENOMINATOR);

    /// Creates a new [`FeeRate`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidFeeRate`] if `value` exceeds [`FEE_RATE_DENOMINATOR`].
    pub const fn new_checked(value: u64) -> CurveResult<Self> {
        if value > FEE_RATE_DENOMINATOR {
            return Err(CurveError::InvalidFeeRate(value));
        }
        Ok(Self(value))
    }

    /// Creates a new [`FeeRate`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `value` exceeds [`FEE_RATE_DENOMINATOR`].
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self::new_checked(value).expect(FAILED)
    }

    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Validates the rate is within the configurable `[0, MAX_FEE_RATE]` range.
    ///
    /// # Errors
    ///
    /// Returns an error if the rate exceeds [`MAX_FEE_RATE`].
    pub fn check_configurable(&self, param: &str) -> anyhow::Result<()> {
        check_in_range_inclusive_u64(self.0, 0, MAX_FEE_RATE, param)
    }
}

impl TryFrom<u64> for FeeRate {
    type Error = CurveError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new_checked(value)
    }
}

impl From<FeeRate> for u64 {
    fn from(value: FeeRate) -> Self {
        value.0
    }
}

impl Display for FeeRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{FEE_RATE_DENOMINATOR}", self.0)
    }
}

/// Returns the protocol fee charged on `amount`, rounded down.
///
/// # Errors
///
/// Returns [`CurveError::ArithmeticOverflow`] if `amount * rate` overflows.
pub fn protocol_fee(amount: u128, rate: FeeRate) -> CurveResult<u128> {
    floor_div(
        amount,
        u128::from(rate.as_u64()),
        u128::from(FEE_RATE_DENOMINATOR),
    )
    .ok_or(CurveError::ArithmeticOverflow)
}

/// Returns the smallest gross amount which still leaves `post_fee_amount` after the protocol fee.
///
/// A zero rate returns `post_fee_amount` unchanged, otherwise the gross amount is
/// `ceil(post_fee_amount * DENOM / (DENOM - rate))`.
///
/// # Errors
///
/// Returns [`CurveError::DivisionByZero`] if `rate` is [`FeeRate::MAX`], or
/// [`CurveError::ArithmeticOverflow`] if an intermediate overflows.
pub fn calculate_pre_fee_amount(post_fee_amount: u128, rate: FeeRate) -> CurveResult<u128> {
    if rate.is_zero() {
        return Ok(post_fee_amount);
    }

    let denominator = FEE_RATE_DENOMINATOR
        .checked_sub(rate.as_u64())
        .ok_or(CurveError::ArithmeticUnderflow)?;
    if denominator == 0 {
        return Err(CurveError::DivisionByZero);
    }

    ceil_div(
        post_fee_amount,
        u128::from(FEE_RATE_DENOMINATOR),
        u128::from(denominator),
    )
    .ok_or(CurveError::ArithmeticOverflow)
}
