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

//! The read side of the external ledger a launch pool lives on.
//!
//! Pricing never talks to the ledger directly. Callers read a fresh [`PoolSnapshot`]
//! through a [`LedgerReader`] for every preview, so available balances always reflect the
//! latest vault balances and accrued fees.

use anyhow::Context;

use crate::{
    identifiers::{MintId, PoolId},
    pool::{PoolSnapshot, PoolState, TokenSide},
    transfer_fee::TransferFeeSchedule,
};

/// Read access to pool state, token balances and mint transfer fees.
pub trait LedgerReader {
    /// Returns the recorded state of the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be read.
    fn pool_state(&self, pool_id: &PoolId) -> anyhow::Result<PoolState>;

    /// Returns the raw balance of the pool's vault on `side`.
    ///
    /// # Errors
    ///
    /// Returns an error if the vault cannot be read.
    fn vault_balance(&self, pool_id: &PoolId, side: TokenSide) -> anyhow::Result<u64>;

    /// Returns the transfer fee schedule configured on `mint`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the mint cannot be read.
    fn transfer_fee_schedule(&self, mint: &MintId) -> anyhow::Result<Option<TransferFeeSchedule>>;

    /// Returns the current ledger epoch.
    ///
    /// # Errors
    ///
    /// Returns an error if the clock cannot be read.
    fn current_epoch(&self) -> anyhow::Result<u64>;

    /// Returns the current ledger timestamp in seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the clock cannot be read.
    fn current_timestamp(&self) -> anyhow::Result<u64>;
}

impl PoolSnapshot {
    /// Reads a fresh snapshot of `pool_id` from `ledger`.
    ///
    /// # Errors
    ///
    /// Returns an error if any ledger read fails.
    pub fn from_ledger<L: LedgerReader + ?Sized>(
        ledger: &L,
        pool_id: &PoolId,
    ) -> anyhow::Result<Self> {
        let state = ledger
            .pool_state(pool_id)
            .with_context(|| format!("Failed to read pool state for {pool_id}"))?;
        let vault_0 = ledger
            .vault_balance(pool_id, TokenSide::Zero)
            .with_context(|| format!("Failed to read token 0 vault for {pool_id}"))?;
        let vault_1 = ledger
            .vault_balance(pool_id, TokenSide::One)
            .with_context(|| format!("Failed to read token 1 vault for {pool_id}"))?;
        let transfer_fee = |side: TokenSide| {
            let mint = state.mint(side);
            ledger
                .transfer_fee_schedule(&mint)
                .with_context(|| format!("Failed to read transfer fee for {mint}"))
        };
        let transfer_fee_0 = transfer_fee(TokenSide::Zero)?;
        let transfer_fee_1 = transfer_fee(TokenSide::One)?;
        let epoch = ledger.current_epoch()?;
        let timestamp = ledger.current_timestamp()?;

        log::debug!(
            "Read snapshot for {pool_id}: vault_0={vault_0}, vault_1={vault_1}, epoch={epoch}"
        );

        Ok(Self {
            state,
            vault_0,
            vault_1,
            transfer_fee_0,
            transfer_fee_1,
            epoch,
            timestamp,
        })
    }
}
