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

//! Launch tax and the plan for graduating a pool's liquidity.

use serde::{Deserialize, Serialize};

use crate::{
    error::{CurveError, CurveResult},
    fees::{FeeRate, protocol_fee},
    pool::{PoolSnapshot, PoolStatus, TokenSide},
    transfer_fee::{TransferFeeSchedule, get_transfer_fee},
};

/// The split of one side's balance at launch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchTax {
    /// The amount moved to the destination venue.
    pub taxed_amount: u64,
    /// The launch fee retained by the pool.
    pub launch_fee: u64,
    /// The transfer fee charged on the launch fee.
    pub transfer_fee: u64,
}

/// Splits `amount` into the launched amount, launch fee and transfer fee.
///
/// Accrued swap fees are excluded first, the launch fee is taken from the remainder at
/// `launch_fee_rate` (rounded down), and the ledger transfer fee on the launch fee is
/// deducted from what is launched.
///
/// # Errors
///
/// Returns [`CurveError::ArithmeticUnderflow`] if the fees exceed `amount`.
pub fn taxed_amount_before_launch(
    amount: u64,
    swap_fees: u64,
    launch_fee_rate: FeeRate,
    transfer_fee_schedule: Option<&TransferFeeSchedule>,
    epoch: u64,
) -> CurveResult<LaunchTax> {
    let clean = amount
        .checked_sub(swap_fees)
        .ok_or(CurveError::ArithmeticUnderflow)?;
    let launch_fee = u64::try_from(protocol_fee(u128::from(clean), launch_fee_rate)?)
        .map_err(|_| CurveError::ArithmeticOverflow)?;
    let transfer_fee = get_transfer_fee(transfer_fee_schedule, epoch, launch_fee)?;

    let taxed_amount = clean
        .checked_sub(launch_fee)
        .and_then(|v| v.checked_sub(transfer_fee))
        .ok_or(CurveError::ArithmeticUnderflow)?;

    Ok(LaunchTax {
        taxed_amount,
        launch_fee,
        transfer_fee,
    })
}

/// The amounts moved out of each side when a pool launches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchPlan {
    pub token_0: LaunchTax,
    pub token_1: LaunchTax,
}

impl LaunchPlan {
    /// Computes the launch plan for a pool which has crossed its reserve bound.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::PoolLaunched`] if the pool already launched,
    /// [`CurveError::PoolNotReadyToLaunch`] if the bound is not reached, or an
    /// arithmetic error.
    pub fn from_snapshot(snapshot: &PoolSnapshot) -> CurveResult<Self> {
        if snapshot.state.status == PoolStatus::Launched {
            return Err(CurveError::PoolLaunched);
        }
        if !snapshot.is_ready_to_launch()? {
            return Err(CurveError::PoolNotReadyToLaunch);
        }

        let tax = |side: TokenSide| {
            taxed_amount_before_launch(
                snapshot.vault_balance(side),
                snapshot.state.swap_fees(side),
                snapshot.state.config.launch_fee_rate,
                snapshot.transfer_fee_schedule(side),
                snapshot.epoch,
            )
        };

        Ok(Self {
            token_0: tax(TokenSide::Zero)?,
            token_1: tax(TokenSide::One)?,
        })
    }

    #[must_use]
    pub const fn side(&self, side: TokenSide) -> &LaunchTax {
        match side {
            TokenSide::Zero => &self.token_0,
            TokenSide::One => &self.token_1,
        }
    }
}

impl PoolSnapshot {
    /// Returns the snapshot once `plan` has executed.
    ///
    /// The taxed amount leaves each vault, which keeps its accrued swap fees, the launch
    /// fee and any transfer fee withheld on it. The launch fees are recorded and the pool is
    /// marked launched.
    ///
    /// # Errors
    ///
    /// Returns an error if a balance over- or underflows.
    pub fn apply_launch(&self, plan: &LaunchPlan) -> CurveResult<Self> {
        let mut next = self.clone();
        for side in [TokenSide::Zero, TokenSide::One] {
            let tax = plan.side(side);
            let launch_fees = next.state.launch_fees_mut(side);
            *launch_fees = launch_fees
                .checked_add(tax.launch_fee)
                .ok_or(CurveError::ArithmeticOverflow)?;

            let vault = next.vault_balance_mut(side);
            *vault = vault
                .checked_sub(tax.taxed_amount)
                .ok_or(CurveError::ArithmeticUnderflow)?;
        }
        next.state.status = PoolStatus::Launched;

        log::info!(
            "Pool {} launched: amount_0={}, amount_1={}",
            self.state.pool_id,
            plan.token_0.taxed_amount,
            plan.token_1.taxed_amount,
        );
        Ok(next)
    }
}
