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

//! Launch pool configuration, state and point-in-time snapshots.
//!
//! A [`PoolSnapshot`] pairs the pool's recorded state with freshly read vault balances,
//! transfer fee schedules and the current epoch. Available balances are always derived
//! from the snapshot's vault balances minus the protocol fees accrued on that side,
//! never cached between calls.

use launchpad_core::correctness::{check_positive_u64, check_predicate_true};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{
    curve::CurveCalculator,
    error::{CurveError, CurveResult},
    fees::FeeRate,
    identifiers::{MintId, PoolId},
    transfer_fee::TransferFeeSchedule,
};

/// The Q32.32 fixed-point scale used for price quotes (`2^32`).
pub const Q32: u128 = (u32::MAX as u128) + 1;

/// One of the two assets in a pool.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenSide {
    #[default]
    Zero,
    One,
}

impl TokenSide {
    #[must_use]
    pub const fn other(&self) -> Self {
        match self {
            Self::Zero => Self::One,
            Self::One => Self::Zero,
        }
    }
}

/// How the anchor side's available balance is compared against the reserve bound.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReserveBoundComparison {
    /// Ready once the anchor balance grows to at least the bound.
    #[default]
    GreaterOrEqual,
    /// Ready once the anchor balance shrinks to at most the bound.
    LessOrEqual,
}

impl ReserveBoundComparison {
    /// Returns whether `available` has crossed `bound`.
    #[must_use]
    pub const fn is_reached(&self, available: u64, bound: u64) -> bool {
        match self {
            Self::GreaterOrEqual => available >= bound,
            Self::LessOrEqual => available <= bound,
        }
    }

    /// Returns how many tokens must still move before `available` crosses `bound`.
    #[must_use]
    pub const fn remaining(&self, available: u64, bound: u64) -> u64 {
        match self {
            Self::GreaterOrEqual => bound.saturating_sub(available),
            Self::LessOrEqual => available.saturating_sub(bound),
        }
    }
}

/// The lifecycle status of a launch pool.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PoolStatus {
    /// Swaps are accepted.
    #[default]
    Trading,
    /// The reserve bound was crossed; swaps are rejected until launch.
    ReadyToLaunch,
    /// Liquidity has graduated; only fee collection remains.
    Launched,
}

/// A vault's raw balance together with the protocol fee already accrued on that side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSide {
    pub vault_balance: u64,
    pub accrued_protocol_fee: u64,
}

impl PoolSide {
    /// Creates a new [`PoolSide`] instance.
    #[must_use]
    pub const fn new(vault_balance: u64, accrued_protocol_fee: u64) -> Self {
        Self {
            vault_balance,
            accrued_protocol_fee,
        }
    }

    /// Returns the balance available to the curve: `vault_balance - accrued_protocol_fee`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::ArithmeticUnderflow`] if more fees are accrued than the vault holds.
    pub const fn available(&self) -> CurveResult<u64> {
        match self.vault_balance.checked_sub(self.accrued_protocol_fee) {
            Some(available) => Ok(available),
            None => Err(CurveError::ArithmeticUnderflow),
        }
    }
}

/// Configuration shared by pools created under the same launch program.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// The protocol fee rate charged on the source side of every swap.
    pub swap_fee_rate: FeeRate,
    /// The fee rate charged on each side's balance when the pool launches.
    pub launch_fee_rate: FeeRate,
    /// The amount deposited on the anchor side when a pool is created.
    pub initial_reserve: u64,
    /// The anchor side balance at which the pool becomes ready to launch.
    pub vault_reserve_bound: u64,
    /// How the anchor side is compared against `vault_reserve_bound`.
    pub reserve_bound_comparison: ReserveBoundComparison,
    /// The side whose available balance is compared against the bound.
    pub reserve_side: TokenSide,
}

impl Default for PoolConfig {
    /// Creates a new default [`PoolConfig`] instance.
    fn default() -> Self {
        Self {
            swap_fee_rate: FeeRate::new(10_000),
            launch_fee_rate: FeeRate::new(10_000),
            initial_reserve: 2_000_000_000,
            vault_reserve_bound: 205_000_000_000_000_000,
            reserve_bound_comparison: ReserveBoundComparison::GreaterOrEqual,
            reserve_side: TokenSide::Zero,
        }
    }
}

impl PoolConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A fee rate exceeds [`crate::fees::MAX_FEE_RATE`].
    /// - The reserve bound or initial reserve is zero.
    /// - The initial reserve already satisfies the reserve bound.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.swap_fee_rate.check_configurable("swap_fee_rate")?;
        self.launch_fee_rate.check_configurable("launch_fee_rate")?;
        check_positive_u64(self.initial_reserve, "initial_reserve")?;
        check_positive_u64(self.vault_reserve_bound, "vault_reserve_bound")?;
        check_predicate_true(
            !self.is_reached_reserve_bound(self.initial_reserve),
            "initial_reserve already satisfies vault_reserve_bound",
        )?;
        Ok(())
    }

    /// Returns the `(token_0, token_1)` amounts deposited when creating a pool, where the
    /// reserve side receives `initial_reserve` and the other side `init_amount`.
    #[must_use]
    pub const fn initial_deposit(&self, init_amount: u64) -> (u64, u64) {
        match self.reserve_side {
            TokenSide::Zero => (self.initial_reserve, init_amount),
            TokenSide::One => (init_amount, self.initial_reserve),
        }
    }

    /// Returns whether `available` on the reserve side satisfies the launch condition.
    #[must_use]
    pub const fn is_reached_reserve_bound(&self, available: u64) -> bool {
        self.reserve_bound_comparison
            .is_reached(available, self.vault_reserve_bound)
    }
}

/// The recorded state of a launch pool, as held on the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    pub pool_id: PoolId,
    pub mint_0: MintId,
    pub mint_1: MintId,
    pub config: PoolConfig,
    pub status: PoolStatus,
    /// The earliest timestamp (seconds) at which swaps are accepted.
    #[serde(default)]
    pub open_time: u64,
    #[serde(default)]
    pub swap_fees_token_0: u64,
    #[serde(default)]
    pub swap_fees_token_1: u64,
    #[serde(default)]
    pub launch_fees_token_0: u64,
    #[serde(default)]
    pub launch_fees_token_1: u64,
}

impl PoolState {
    /// Creates a new trading [`PoolState`] instance with no accrued fees.
    #[must_use]
    pub fn new(pool_id: PoolId, mint_0: MintId, mint_1: MintId, config: PoolConfig) -> Self {
        Self {
            pool_id,
            mint_0,
            mint_1,
            config,
            status: PoolStatus::Trading,
            open_time: 0,
            swap_fees_token_0: 0,
            swap_fees_token_1: 0,
            launch_fees_token_0: 0,
            launch_fees_token_1: 0,
        }
    }

    #[must_use]
    pub const fn swap_fees(&self, side: TokenSide) -> u64 {
        match side {
            TokenSide::Zero => self.swap_fees_token_0,
            TokenSide::One => self.swap_fees_token_1,
        }
    }

    #[must_use]
    pub const fn launch_fees(&self, side: TokenSide) -> u64 {
        match side {
            TokenSide::Zero => self.launch_fees_token_0,
            TokenSide::One => self.launch_fees_token_1,
        }
    }

    pub(crate) const fn swap_fees_mut(&mut self, side: TokenSide) -> &mut u64 {
        match side {
            TokenSide::Zero => &mut self.swap_fees_token_0,
            TokenSide::One => &mut self.swap_fees_token_1,
        }
    }

    pub(crate) const fn launch_fees_mut(&mut self, side: TokenSide) -> &mut u64 {
        match side {
            TokenSide::Zero => &mut self.launch_fees_token_0,
            TokenSide::One => &mut self.launch_fees_token_1,
        }
    }

    /// Returns the mint traded on `side`.
    #[must_use]
    pub const fn mint(&self, side: TokenSide) -> MintId {
        match side {
            TokenSide::Zero => self.mint_0,
            TokenSide::One => self.mint_1,
        }
    }
}

/// Fees withdrawn from a pool by a collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedFees {
    pub amount_0: u64,
    pub amount_1: u64,
}

/// A point-in-time view of a pool and the ledger values needed to price against it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub state: PoolState,
    pub vault_0: u64,
    pub vault_1: u64,
    #[serde(default)]
    pub transfer_fee_0: Option<TransferFeeSchedule>,
    #[serde(default)]
    pub transfer_fee_1: Option<TransferFeeSchedule>,
    /// The ledger epoch used to select transfer fees.
    #[serde(default)]
    pub epoch: u64,
    /// The ledger timestamp (seconds) the snapshot was read at.
    #[serde(default)]
    pub timestamp: u64,
}

impl PoolSnapshot {
    /// Creates a new [`PoolSnapshot`] instance with no transfer fees at epoch zero.
    #[must_use]
    pub const fn new(state: PoolState, vault_0: u64, vault_1: u64) -> Self {
        Self {
            state,
            vault_0,
            vault_1,
            transfer_fee_0: None,
            transfer_fee_1: None,
            epoch: 0,
            timestamp: 0,
        }
    }

    /// Creates the snapshot of a freshly created pool funded with `init_amount` on the
    /// non-reserve side.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::EmptySupply`] if either side would be empty.
    pub fn initial(state: PoolState, init_amount: u64) -> CurveResult<Self> {
        let (vault_0, vault_1) = state.config.initial_deposit(init_amount);
        CurveCalculator::validate_supply(vault_0, vault_1)?;
        let timestamp = state.open_time;
        Ok(Self {
            timestamp,
            ..Self::new(state, vault_0, vault_1)
        })
    }

    #[must_use]
    pub fn with_transfer_fees(
        mut self,
        transfer_fee_0: Option<TransferFeeSchedule>,
        transfer_fee_1: Option<TransferFeeSchedule>,
    ) -> Self {
        self.transfer_fee_0 = transfer_fee_0;
        self.transfer_fee_1 = transfer_fee_1;
        self
    }

    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub const fn vault_balance(&self, side: TokenSide) -> u64 {
        match side {
            TokenSide::Zero => self.vault_0,
            TokenSide::One => self.vault_1,
        }
    }

    pub(crate) const fn vault_balance_mut(&mut self, side: TokenSide) -> &mut u64 {
        match side {
            TokenSide::Zero => &mut self.vault_0,
            TokenSide::One => &mut self.vault_1,
        }
    }

    /// Returns the vault balance and accrued protocol fee for `side`.
    #[must_use]
    pub const fn side(&self, side: TokenSide) -> PoolSide {
        PoolSide::new(self.vault_balance(side), self.state.swap_fees(side))
    }

    /// Returns the available balance on `side`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::ArithmeticUnderflow`] if accrued fees exceed the vault balance.
    pub const fn available(&self, side: TokenSide) -> CurveResult<u64> {
        self.side(side).available()
    }

    /// Returns the transfer fee schedule of the mint traded on `side`, if any.
    #[must_use]
    pub const fn transfer_fee_schedule(&self, side: TokenSide) -> Option<&TransferFeeSchedule> {
        match side {
            TokenSide::Zero => self.transfer_fee_0.as_ref(),
            TokenSide::One => self.transfer_fee_1.as_ref(),
        }
    }

    /// Returns whether the reserve side's available balance has crossed the reserve bound.
    ///
    /// # Errors
    ///
    /// Returns an error if the available balance cannot be computed.
    pub fn is_ready_to_launch(&self) -> CurveResult<bool> {
        let config = &self.state.config;
        let available = self.available(config.reserve_side)?;
        Ok(config.is_reached_reserve_bound(available))
    }

    /// Returns how many tokens must still move on the reserve side before launch.
    ///
    /// # Errors
    ///
    /// Returns an error if the available balance cannot be computed.
    pub fn remaining_tokens(&self) -> CurveResult<u64> {
        let config = &self.state.config;
        let available = self.available(config.reserve_side)?;
        Ok(config
            .reserve_bound_comparison
            .remaining(available, config.vault_reserve_bound))
    }

    /// Returns the Q32.32 prices `(token_0 in token_1, token_1 in token_0)` from the
    /// available balances.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DivisionByZero`] if either available balance is zero.
    pub fn token_price_x32(&self) -> CurveResult<(u128, u128)> {
        token_price_x32(self.available(TokenSide::Zero)?, self.available(TokenSide::One)?)
    }

    /// Checks the pool accepts swaps at the snapshot's timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool is ready to launch, launched, or not yet open.
    pub const fn check_tradable(&self) -> CurveResult<()> {
        match self.state.status {
            PoolStatus::ReadyToLaunch => Err(CurveError::PoolReadyToLaunch),
            PoolStatus::Launched => Err(CurveError::PoolLaunched),
            PoolStatus::Trading if self.timestamp < self.state.open_time => {
                Err(CurveError::PoolNotOpen {
                    open_time: self.state.open_time,
                    timestamp: self.timestamp,
                })
            }
            PoolStatus::Trading => Ok(()),
        }
    }

    /// Returns the fees which may be withdrawn on each side: accrued swap fees, plus the
    /// launch fees once the pool has launched.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::ArithmeticOverflow`] if the sum overflows.
    pub fn collectable_fees(&self) -> CurveResult<CollectedFees> {
        Ok(CollectedFees {
            amount_0: self.collectable_fee(TokenSide::Zero)?,
            amount_1: self.collectable_fee(TokenSide::One)?,
        })
    }

    fn collectable_fee(&self, side: TokenSide) -> CurveResult<u64> {
        let swap_fees = self.state.swap_fees(side);
        if self.state.status == PoolStatus::Launched {
            swap_fees
                .checked_add(self.state.launch_fees(side))
                .ok_or(CurveError::ArithmeticOverflow)
        } else {
            Ok(swap_fees)
        }
    }

    /// Withdraws up to the requested amounts of collectable fees.
    ///
    /// Swap fees are drawn down before launch fees. Returns the amounts collected and the
    /// snapshot after the withdrawal.
    ///
    /// # Errors
    ///
    /// Returns an error if the vault cannot cover the collected amount.
    pub fn collect_fees(
        &self,
        amount_0_requested: u64,
        amount_1_requested: u64,
    ) -> CurveResult<(CollectedFees, Self)> {
        let mut next = self.clone();
        let amount_0 = next.collect_side(TokenSide::Zero, amount_0_requested)?;
        let amount_1 = next.collect_side(TokenSide::One, amount_1_requested)?;
        log::debug!(
            "Collected fees from {}: amount_0={amount_0}, amount_1={amount_1}",
            self.state.pool_id
        );
        Ok((CollectedFees { amount_0, amount_1 }, next))
    }

    fn collect_side(&mut self, side: TokenSide, requested: u64) -> CurveResult<u64> {
        let amount = requested.min(self.collectable_fee(side)?);

        let from_swap_fees = amount.min(self.state.swap_fees(side));
        let from_launch_fees = amount - from_swap_fees;

        let swap_fees = self.state.swap_fees_mut(side);
        *swap_fees -= from_swap_fees;
        let launch_fees = self.state.launch_fees_mut(side);
        *launch_fees = launch_fees
            .checked_sub(from_launch_fees)
            .ok_or(CurveError::ArithmeticUnderflow)?;
        let vault = self.vault_balance_mut(side);
        *vault = vault
            .checked_sub(amount)
            .ok_or(CurveError::ArithmeticUnderflow)?;

        Ok(amount)
    }
}

/// Returns the Q32.32 prices `(amount_1 / amount_0, amount_0 / amount_1)`.
///
/// # Errors
///
/// Returns [`CurveError::DivisionByZero`] if either amount is zero.
pub fn token_price_x32(amount_0: u64, amount_1: u64) -> CurveResult<(u128, u128)> {
    if amount_0 == 0 || amount_1 == 0 {
        return Err(CurveError::DivisionByZero);
    }
    let (amount_0, amount_1) = (u128::from(amount_0), u128::from(amount_1));
    Ok((amount_1 * Q32 / amount_0, amount_0 * Q32 / amount_1))
}
