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

//! Fixture functions and a stub ledger for testing.

use std::collections::HashMap;

use rstest::fixture;

use crate::{
    fees::FeeRate,
    identifiers::{MintId, PoolId},
    ledger::LedgerReader,
    pool::{PoolConfig, PoolSnapshot, PoolState, ReserveBoundComparison, TokenSide},
    transfer_fee::TransferFeeSchedule,
};

/// A small pool configuration: no swap fee, 1% launch fee, bound of 2500 on token 0.
#[fixture]
pub fn pool_config() -> PoolConfig {
    PoolConfig {
        swap_fee_rate: FeeRate::ZERO,
        launch_fee_rate: FeeRate::new(10_000),
        initial_reserve: 2000,
        vault_reserve_bound: 2500,
        reserve_bound_comparison: ReserveBoundComparison::GreaterOrEqual,
        reserve_side: TokenSide::Zero,
    }
}

#[fixture]
pub fn pool_state(pool_config: PoolConfig) -> PoolState {
    PoolState::new(
        PoolId::new("POOL-001"),
        MintId::new("MINT-RESERVE"),
        MintId::new("MINT-LAUNCH"),
        pool_config,
    )
}

/// A trading pool holding 2000 of token 0 and 5000 of token 1.
#[fixture]
pub fn pool_snapshot(pool_state: PoolState) -> PoolSnapshot {
    PoolSnapshot::new(pool_state, 2000, 5000)
}

/// An in-memory [`LedgerReader`].
#[derive(Debug, Default)]
pub struct StubLedger {
    pools: HashMap<PoolId, (PoolState, u64, u64)>,
    transfer_fees: HashMap<MintId, TransferFeeSchedule>,
    pub epoch: u64,
    pub timestamp: u64,
}

impl StubLedger {
    pub fn add_pool(&mut self, state: PoolState, vault_0: u64, vault_1: u64) {
        self.pools.insert(state.pool_id, (state, vault_0, vault_1));
    }

    pub fn set_transfer_fee(&mut self, mint: MintId, schedule: TransferFeeSchedule) {
        self.transfer_fees.insert(mint, schedule);
    }

    fn pool(&self, pool_id: &PoolId) -> anyhow::Result<&(PoolState, u64, u64)> {
        self.pools
            .get(pool_id)
            .ok_or_else(|| anyhow::anyhow!("Pool {pool_id} not found"))
    }
}

impl LedgerReader for StubLedger {
    fn pool_state(&self, pool_id: &PoolId) -> anyhow::Result<PoolState> {
        Ok(self.pool(pool_id)?.0.clone())
    }

    fn vault_balance(&self, pool_id: &PoolId, side: TokenSide) -> anyhow::Result<u64> {
        let (_, vault_0, vault_1) = self.pool(pool_id)?;
        Ok(match side {
            TokenSide::Zero => *vault_0,
            TokenSide::One => *vault_1,
        })
    }

    fn transfer_fee_schedule(&self, mint: &MintId) -> anyhow::Result<Option<TransferFeeSchedule>> {
        Ok(self.transfer_fees.get(mint).copied())
    }

    fn current_epoch(&self) -> anyhow::Result<u64> {
        Ok(self.epoch)
    }

    fn current_timestamp(&self) -> anyhow::Result<u64> {
        Ok(self.timestamp)
    }
}
