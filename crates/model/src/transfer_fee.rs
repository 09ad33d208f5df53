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

//! Ledger-level transfer fees charged by a mint on every token movement.
//!
//! A mint may carry a [`TransferFeeSchedule`] of two epoch-scheduled [`TransferFee`]
//! tuples. The newer tuple governs once the current epoch reaches its effective epoch,
//! otherwise the older one still applies. Assets without a schedule transfer for free.

use std::cmp::min;

use launchpad_core::math::ceil_div;
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// The maximum transfer fee rate in basis points (100%).
pub const MAX_FEE_BASIS_POINTS: u16 = 10_000;

const ONE_IN_BASIS_POINTS: u128 = MAX_FEE_BASIS_POINTS as u128;

/// A single transfer fee tuple, effective from `epoch` onwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransferFee {
    /// First epoch where the fee takes effect.
    pub epoch: u64,
    /// Maximum fee charged on a single transfer, regardless of amount.
    pub maximum_fee: u64,
    /// Fee rate in basis points of the transferred amount.
    pub transfer_fee_basis_points: u16,
}

impl TransferFee {
    /// Creates a new [`TransferFee`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidTransferFeeBasisPoints`] if the rate exceeds
    /// [`MAX_FEE_BASIS_POINTS`].
    pub const fn new_checked(
        epoch: u64,
        maximum_fee: u64,
        transfer_fee_basis_points: u16,
    ) -> CurveResult<Self> {
        if transfer_fee_basis_points > MAX_FEE_BASIS_POINTS {
            return Err(CurveError::InvalidTransferFeeBasisPoints(
                transfer_fee_basis_points,
            ));
        }
        Ok(Self {
            epoch,
            maximum_fee,
            transfer_fee_basis_points,
        })
    }

    /// Returns the fee charged when transferring `pre_fee_amount`.
    ///
    /// The fee is `ceil(amount * bps / 10000)` capped at `maximum_fee`. Returns `None`
    /// if an intermediate overflows.
    #[must_use]
    pub fn calculate_fee(&self, pre_fee_amount: u64) -> Option<u64> {
        let basis_points = u128::from(self.transfer_fee_basis_points);
        if basis_points == 0 || pre_fee_amount == 0 {
            return Some(0);
        }

        let raw_fee = ceil_div(u128::from(pre_fee_amount), basis_points, ONE_IN_BASIS_POINTS)?;
        let fee = u64::try_from(raw_fee).ok()?;
        Some(min(fee, self.maximum_fee))
    }

    /// Returns the gross amount which must be sent so that `post_fee_amount` arrives.
    ///
    /// Returns `None` if an intermediate overflows.
    #[must_use]
    pub fn calculate_pre_fee_amount(&self, post_fee_amount: u64) -> Option<u64> {
        let maximum_fee = self.maximum_fee;
        match (self.transfer_fee_basis_points, post_fee_amount) {
            (0, _) => Some(post_fee_amount),
            (_, 0) => Some(0),
            (MAX_FEE_BASIS_POINTS, _) => post_fee_amount.checked_add(maximum_fee),
            (basis_points, _) => {
                let denominator = ONE_IN_BASIS_POINTS.checked_sub(u128::from(basis_points))?;
                let raw_pre_fee_amount =
                    ceil_div(u128::from(post_fee_amount), ONE_IN_BASIS_POINTS, denominator)?;

                if raw_pre_fee_amount.checked_sub(u128::from(post_fee_amount))?
                    >= u128::from(maximum_fee)
                {
                    post_fee_amount.checked_add(maximum_fee)
                } else {
                    u64::try_from(raw_pre_fee_amount).ok()
                }
            }
        }
    }

    /// Returns the fee implied when grossing `post_fee_amount` up to its pre-fee amount.
    #[must_use]
    pub fn calculate_inverse_fee(&self, post_fee_amount: u64) -> Option<u64> {
        let pre_fee_amount = self.calculate_pre_fee_amount(post_fee_amount)?;
        self.calculate_fee(pre_fee_amount)
    }
}

/// An epoch-scheduled pair of transfer fees for a single mint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransferFeeSchedule {
    pub older: TransferFee,
    pub newer: TransferFee,
}

impl TransferFeeSchedule {
    /// Creates a new [`TransferFeeSchedule`] instance.
    #[must_use]
    pub const fn new(older: TransferFee, newer: TransferFee) -> Self {
        Self { older, newer }
    }

    /// Creates a schedule where the same fee applies in every epoch.
    #[must_use]
    pub const fn flat(fee: TransferFee) -> Self {
        Self {
            older: fee,
            newer: fee,
        }
    }

    /// Returns the fee tuple governing transfers at `epoch`.
    #[must_use]
    pub const fn epoch_fee(&self, epoch: u64) -> &TransferFee {
        if epoch >= self.newer.epoch {
            &self.newer
        } else {
            &self.older
        }
    }

    /// Returns the fee charged at `epoch` when transferring `pre_fee_amount`.
    #[must_use]
    pub fn calculate_epoch_fee(&self, epoch: u64, pre_fee_amount: u64) -> Option<u64> {
        self.epoch_fee(epoch).calculate_fee(pre_fee_amount)
    }

    /// Returns the fee implied at `epoch` when `post_fee_amount` must arrive net.
    ///
    /// At the full basis point rate every transfer is charged the flat maximum fee.
    #[must_use]
    pub fn calculate_inverse_epoch_fee(&self, epoch: u64, post_fee_amount: u64) -> Option<u64> {
        let fee = self.epoch_fee(epoch);
        if fee.transfer_fee_basis_points == MAX_FEE_BASIS_POINTS {
            Some(fee.maximum_fee)
        } else {
            fee.calculate_inverse_fee(post_fee_amount)
        }
    }
}

/// Returns the transfer fee charged when moving `amount` of an asset.
///
/// # Errors
///
/// Returns [`CurveError::ArithmeticOverflow`] if the fee calculation overflows.
pub fn get_transfer_fee(
    schedule: Option<&TransferFeeSchedule>,
    epoch: u64,
    amount: u64,
) -> CurveResult<u64> {
    match schedule {
        Some(schedule) => schedule
            .calculate_epoch_fee(epoch, amount)
            .ok_or(CurveError::ArithmeticOverflow),
        None => Ok(0),
    }
}

/// Returns the transfer fee to add on top of `post_fee_amount` so it arrives net.
///
/// # Errors
///
/// Returns [`CurveError::ArithmeticOverflow`] if the fee calculation overflows.
pub fn get_transfer_inverse_fee(
    schedule: Option<&TransferFeeSchedule>,
    epoch: u64,
    post_fee_amount: u64,
) -> CurveResult<u64> {
    match schedule {
        Some(schedule) => schedule
            .calculate_inverse_epoch_fee(epoch, post_fee_amount)
            .ok_or(CurveError::ArithmeticOverflow),
        None => Ok(0),
    }
}
