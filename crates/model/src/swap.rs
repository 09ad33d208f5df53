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

//! Swap previews combining the curve with ledger transfer fees and the launch condition.
//!
//! The [`SwapCalculator`] is a read-then-compute step: it prices a swap against a
//! [`PoolSnapshot`] and reports what would happen, but never mutates the snapshot.
//! [`PoolSnapshot::apply_swap`] projects the post-swap snapshot for callers which want
//! to chain previews.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{
    curve::{CurveCalculator, SwapResult, TradeDirection},
    error::{CurveError, CurveResult},
    identifiers::PoolId,
    pool::{PoolSnapshot, PoolStatus},
    transfer_fee::{get_transfer_fee, get_transfer_inverse_fee},
};

/// Which side of the swap the caller fixes.
#[derive(
    Copy,
    Clone,
    Debug,
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
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SwapMode {
    /// The caller fixes the amount sent, bounded below by a minimum amount out.
    ExactInput,
    /// The caller fixes the net amount received, bounded above by a maximum amount in.
    ExactOutput,
}

/// A token movement and the ledger transfer fee charged on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferAmount {
    /// The gross amount leaving the sender.
    pub amount: u64,
    /// The transfer fee withheld by the mint.
    pub transfer_fee: u64,
}

impl TransferAmount {
    /// Returns the amount arriving at the receiver.
    #[must_use]
    pub const fn net(&self) -> u64 {
        self.amount.saturating_sub(self.transfer_fee)
    }
}

/// A fully-formed swap preview.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    pub pool_id: PoolId,
    pub direction: TradeDirection,
    pub mode: SwapMode,
    /// Sent by the caller into the input vault.
    pub input: TransferAmount,
    /// Released from the output vault to the caller.
    pub output: TransferAmount,
    /// The curve pricing on available balances.
    pub result: SwapResult,
    pub protocol_fee: u64,
    /// Q32.32 price of token 0 in token 1 before the swap.
    pub token_0_price_x32: u128,
    /// Q32.32 price of token 1 in token 0 before the swap.
    pub token_1_price_x32: u128,
    pub constant_before: u128,
    pub constant_after: u128,
    /// Whether the reserve side crosses the launch bound once the swap settles.
    pub is_ready_to_launch: bool,
    /// Tokens still to move on the reserve side after the swap before launch.
    pub remaining_tokens: u64,
}

impl SwapQuote {
    /// Returns the net amount the caller receives.
    #[must_use]
    pub const fn amount_received(&self) -> u64 {
        self.output.net()
    }
}

/// Prices swaps against a pool snapshot.
#[derive(Clone, Copy, Debug)]
pub struct SwapCalculator<'a> {
    snapshot: &'a PoolSnapshot,
}

impl<'a> SwapCalculator<'a> {
    /// Creates a new [`SwapCalculator`] instance.
    #[must_use]
    pub const fn new(snapshot: &'a PoolSnapshot) -> Self {
        Self { snapshot }
    }

    /// Previews a swap of exactly `amount_in` (before the inbound transfer fee).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The pool is not tradable.
    /// - Nothing reaches the vault after the inbound transfer fee.
    /// - The net amount received is zero ([`CurveError::ReceivedZero`]).
    /// - The net amount received is below `minimum_amount_out` ([`CurveError::ExceededSlippage`]).
    /// - Any curve or arithmetic error occurs.
    pub fn swap_base_input(
        &self,
        direction: TradeDirection,
        amount_in: u64,
        minimum_amount_out: u64,
    ) -> CurveResult<SwapQuote> {
        let snapshot = self.snapshot;
        snapshot.check_tradable()?;

        let input_side = direction.input_side();
        let output_side = direction.output_side();

        let input_transfer_fee = get_transfer_fee(
            snapshot.transfer_fee_schedule(input_side),
            snapshot.epoch,
            amount_in,
        )?;
        let actual_amount_in = amount_in
            .checked_sub(input_transfer_fee)
            .ok_or(CurveError::ArithmeticUnderflow)?;
        if actual_amount_in == 0 {
            return Err(CurveError::ZeroTradingTokens);
        }

        let total_input_amount = snapshot.available(input_side)?;
        let total_output_amount = snapshot.available(output_side)?;

        let result = CurveCalculator::swap_base_input(
            u128::from(actual_amount_in),
            u128::from(total_input_amount),
            u128::from(total_output_amount),
            snapshot.state.config.swap_fee_rate,
        )?;

        if result.source_amount_swapped != u128::from(actual_amount_in) {
            return Err(CurveError::InvariantViolated);
        }

        let amount_out = to_u64(result.destination_amount_swapped)?;
        let output_transfer_fee = get_transfer_fee(
            snapshot.transfer_fee_schedule(output_side),
            snapshot.epoch,
            amount_out,
        )?;
        let amount_received = amount_out
            .checked_sub(output_transfer_fee)
            .ok_or(CurveError::ArithmeticUnderflow)?;
        if amount_received == 0 {
            return Err(CurveError::ReceivedZero);
        }
        if amount_received < minimum_amount_out {
            log::warn!(
                "Swap rejected for slippage: minimum_amount_out={minimum_amount_out}, \
                 amount_received={amount_received}"
            );
            return Err(CurveError::ExceededSlippage {
                limit: minimum_amount_out,
                actual: amount_received,
            });
        }

        self.build_quote(
            direction,
            SwapMode::ExactInput,
            TransferAmount {
                amount: amount_in,
                transfer_fee: input_transfer_fee,
            },
            TransferAmount {
                amount: amount_out,
                transfer_fee: output_transfer_fee,
            },
            result,
            (total_input_amount, total_output_amount),
        )
    }

    /// Previews a swap delivering exactly `amount_out_less_fee` net of the outbound
    /// transfer fee.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The pool is not tradable.
    /// - The required input rounds to zero.
    /// - The gross amount the caller must send exceeds `max_amount_in`
    ///   ([`CurveError::ExceededSlippage`]).
    /// - Any curve or arithmetic error occurs.
    pub fn swap_base_output(
        &self,
        direction: TradeDirection,
        max_amount_in: u64,
        amount_out_less_fee: u64,
    ) -> CurveResult<SwapQuote> {
        let snapshot = self.snapshot;
        snapshot.check_tradable()?;

        let input_side = direction.input_side();
        let output_side = direction.output_side();

        let output_transfer_fee = get_transfer_inverse_fee(
            snapshot.transfer_fee_schedule(output_side),
            snapshot.epoch,
            amount_out_less_fee,
        )?;
        let actual_amount_out = amount_out_less_fee
            .checked_add(output_transfer_fee)
            .ok_or(CurveError::ArithmeticOverflow)?;

        let total_input_amount = snapshot.available(input_side)?;
        let total_output_amount = snapshot.available(output_side)?;

        let result = CurveCalculator::swap_base_output(
            u128::from(actual_amount_out),
            u128::from(total_input_amount),
            u128::from(total_output_amount),
            snapshot.state.config.swap_fee_rate,
        )?;

        let source_amount_swapped = to_u64(result.source_amount_swapped)?;
        if source_amount_swapped == 0 {
            return Err(CurveError::ZeroTradingTokens);
        }
        let input_transfer_fee = get_transfer_inverse_fee(
            snapshot.transfer_fee_schedule(input_side),
            snapshot.epoch,
            source_amount_swapped,
        )?;
        let input_transfer_amount = source_amount_swapped
            .checked_add(input_transfer_fee)
            .ok_or(CurveError::ArithmeticOverflow)?;
        if input_transfer_amount > max_amount_in {
            log::warn!(
                "Swap rejected for slippage: max_amount_in={max_amount_in}, \
                 input_transfer_amount={input_transfer_amount}"
            );
            return Err(CurveError::ExceededSlippage {
                limit: max_amount_in,
                actual: input_transfer_amount,
            });
        }

        if result.destination_amount_swapped != u128::from(actual_amount_out) {
            return Err(CurveError::InvariantViolated);
        }

        self.build_quote(
            direction,
            SwapMode::ExactOutput,
            TransferAmount {
                amount: input_transfer_amount,
                transfer_fee: input_transfer_fee,
            },
            TransferAmount {
                amount: actual_amount_out,
                transfer_fee: output_transfer_fee,
            },
            result,
            (total_input_amount, total_output_amount),
        )
    }

    fn build_quote(
        &self,
        direction: TradeDirection,
        mode: SwapMode,
        input: TransferAmount,
        output: TransferAmount,
        result: SwapResult,
        (total_input_amount, total_output_amount): (u64, u64),
    ) -> CurveResult<SwapQuote> {
        let snapshot = self.snapshot;

        let constant_before = u128::from(total_input_amount) * u128::from(total_output_amount);
        let constant_after = result.constant_product_after()?;
        if constant_after < constant_before {
            log::warn!(
                "Swap invariant violated: constant_before={constant_before}, \
                 constant_after={constant_after}"
            );
            return Err(CurveError::InvariantViolated);
        }

        let (token_0_price_x32, token_1_price_x32) = snapshot.token_price_x32()?;
        let protocol_fee = to_u64(result.protocol_fee)?;

        let settled = snapshot.after_swap(
            direction,
            to_u64(result.source_amount_swapped)?,
            to_u64(result.destination_amount_swapped)?,
            protocol_fee,
        )?;
        let is_ready_to_launch = settled.is_ready_to_launch()?;
        let remaining_tokens = settled.remaining_tokens()?;

        log::debug!(
            "Quoted {mode} {direction} on {}: source_amount_swapped={}, \
             destination_amount_swapped={}, protocol_fee={protocol_fee}, \
             remaining_tokens={remaining_tokens}",
            snapshot.state.pool_id,
            result.source_amount_swapped,
            result.destination_amount_swapped,
        );

        Ok(SwapQuote {
            pool_id: snapshot.state.pool_id,
            direction,
            mode,
            input,
            output,
            result,
            protocol_fee,
            token_0_price_x32,
            token_1_price_x32,
            constant_before,
            constant_after,
            is_ready_to_launch,
            remaining_tokens,
        })
    }
}

impl PoolSnapshot {
    /// Returns the snapshot once `quote` has settled.
    ///
    /// The input vault receives the curve's source amount, the output vault releases the
    /// destination amount, and the protocol fee accrues on the input side. The pool
    /// becomes ready to launch if the quote crossed the reserve bound.
    ///
    /// # Errors
    ///
    /// Returns an error if a balance over- or underflows.
    pub fn apply_swap(&self, quote: &SwapQuote) -> CurveResult<Self> {
        let mut next = self.after_swap(
            quote.direction,
            to_u64(quote.result.source_amount_swapped)?,
            to_u64(quote.result.destination_amount_swapped)?,
            quote.protocol_fee,
        )?;
        if quote.is_ready_to_launch {
            log::info!("Pool {} is ready to launch", self.state.pool_id);
            next.state.status = PoolStatus::ReadyToLaunch;
        }
        Ok(next)
    }

    fn after_swap(
        &self,
        direction: TradeDirection,
        source_amount: u64,
        destination_amount: u64,
        protocol_fee: u64,
    ) -> CurveResult<Self> {
        let mut next = self.clone();
        let input_side = direction.input_side();
        let output_side = direction.output_side();

        let input_vault = next.vault_balance_mut(input_side);
        *input_vault = input_vault
            .checked_add(source_amount)
            .ok_or(CurveError::ArithmeticOverflow)?;

        let output_vault = next.vault_balance_mut(output_side);
        *output_vault = output_vault
            .checked_sub(destination_amount)
            .ok_or(CurveError::ArithmeticUnderflow)?;

        let swap_fees = next.state.swap_fees_mut(input_side);
        *swap_fees = swap_fees
            .checked_add(protocol_fee)
            .ok_or(CurveError::ArithmeticOverflow)?;

        Ok(next)
    }
}

fn to_u64(value: u128) -> CurveResult<u64> {
    u64::try_from(value).map_err(|_| CurveError::ArithmeticOverflow)
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::{
        fees::FeeRate,
        pool::{PoolState, TokenSide},
        stubs::{StubLedger, pool_snapshot, pool_state},
        transfer_fee::{TransferFee, TransferFeeSchedule},
    };

    fn flat_schedule(basis_points: u16, maximum_fee: u64) -> TransferFeeSchedule {
        TransferFeeSchedule::flat(TransferFee::new_checked(0, maximum_fee, basis_points).unwrap())
    }

    #[rstest]
    fn test_swap_base_input_without_fees(pool_snapshot: PoolSnapshot) {
        let quote = SwapCalculator::new(&pool_snapshot)
            .swap_base_input(TradeDirection::ZeroForOne, 1000, 0)
            .unwrap();

        assert_eq!(quote.input, TransferAmount { amount: 1000, transfer_fee: 0 });
        assert_eq!(quote.output, TransferAmount { amount: 1666, transfer_fee: 0 });
        assert_eq!(quote.amount_received(), 1666);
        assert_eq!(quote.protocol_fee, 0);
        assert_eq!(quote.constant_before, 10_000_000);
        assert_eq!(quote.constant_after, 3000 * 3334);
        assert_eq!(quote.mode, SwapMode::ExactInput);
    }

    #[rstest]
    fn test_swap_base_input_with_transfer_fees(pool_snapshot: PoolSnapshot) {
        let snapshot = pool_snapshot.with_transfer_fees(
            Some(flat_schedule(100, 1_000)),
            Some(flat_schedule(200, 1_000)),
        );

        let quote = SwapCalculator::new(&snapshot)
            .swap_base_input(TradeDirection::ZeroForOne, 1010, 0)
            .unwrap();

        // 1010 in, 11 withheld, 999 reaches the vault
        assert_eq!(quote.input.transfer_fee, 11);
        assert_eq!(quote.result.source_amount_swapped, 999);
        // 999 * 5000 / 2999 = 1665, 2% of which (34) is withheld on the way out
        assert_eq!(quote.output.amount, 1665);
        assert_eq!(quote.output.transfer_fee, 34);
        assert_eq!(quote.amount_received(), 1631);
    }

    #[rstest]
    fn test_swap_base_input_across_transfer_fee_epochs(pool_state: PoolState) {
        let pool_id = pool_state.pool_id;
        let schedule = TransferFeeSchedule::new(
            TransferFee::new_checked(0, u64::MAX, 100).unwrap(),
            TransferFee::new_checked(10, u64::MAX, 500).unwrap(),
        );
        let mut ledger = StubLedger::default();
        ledger.set_transfer_fee(pool_state.mint(TokenSide::Zero), schedule);
        ledger.add_pool(pool_state, 2000, 5000);

        ledger.epoch = 9;
        let snapshot = PoolSnapshot::from_ledger(&ledger, &pool_id).unwrap();
        let before = SwapCalculator::new(&snapshot)
            .swap_base_input(TradeDirection::ZeroForOne, 1000, 0)
            .unwrap();

        ledger.epoch = 10;
        let snapshot = PoolSnapshot::from_ledger(&ledger, &pool_id).unwrap();
        let after = SwapCalculator::new(&snapshot)
            .swap_base_input(TradeDirection::ZeroForOne, 1000, 0)
            .unwrap();

        assert_eq!(before.input.transfer_fee, 10);
        assert_eq!(before.result.source_amount_swapped, 990);
        assert_eq!(before.amount_received(), 1655);
        assert_eq!(after.input.transfer_fee, 50);
        assert_eq!(after.result.source_amount_swapped, 950);
        assert_eq!(after.amount_received(), 1610);
    }

    #[rstest]
    fn test_swap_base_input_slippage(pool_snapshot: PoolSnapshot) {
        let result = SwapCalculator::new(&pool_snapshot).swap_base_input(
            TradeDirection::ZeroForOne,
            1000,
            1667,
        );
        assert_eq!(
            result,
            Err(CurveError::ExceededSlippage {
                limit: 1667,
                actual: 1666
            })
        );
    }

    #[rstest]
    fn test_swap_base_input_received_zero(pool_snapshot: PoolSnapshot) {
        // One unit of token 0 buys two units of token 1, the full-rate fee keeps both
        let snapshot = pool_snapshot.with_transfer_fees(None, Some(flat_schedule(10_000, 100)));
        let result =
            SwapCalculator::new(&snapshot).swap_base_input(TradeDirection::ZeroForOne, 1, 0);
        assert_eq!(result, Err(CurveError::ReceivedZero));
    }

    #[rstest]
    fn test_swap_base_input_zero_after_transfer_fee(pool_snapshot: PoolSnapshot) {
        let snapshot = pool_snapshot.with_transfer_fees(Some(flat_schedule(10_000, 100)), None);
        let result =
            SwapCalculator::new(&snapshot).swap_base_input(TradeDirection::ZeroForOne, 50, 0);
        assert_eq!(result, Err(CurveError::ZeroTradingTokens));
    }

    #[rstest]
    fn test_swap_base_output_without_fees(pool_snapshot: PoolSnapshot) {
        let quote = SwapCalculator::new(&pool_snapshot)
            .swap_base_output(TradeDirection::ZeroForOne, u64::MAX, 1250)
            .unwrap();

        assert_eq!(quote.input.amount, 667);
        assert_eq!(quote.output.amount, 1250);
        assert_eq!(quote.amount_received(), 1250);
        assert_eq!(quote.mode, SwapMode::ExactOutput);
    }

    #[rstest]
    fn test_swap_base_output_with_transfer_fees(pool_snapshot: PoolSnapshot) {
        let snapshot = pool_snapshot.with_transfer_fees(
            Some(flat_schedule(100, 1_000)),
            Some(flat_schedule(100, 1_000)),
        );

        let quote = SwapCalculator::new(&snapshot)
            .swap_base_output(TradeDirection::ZeroForOne, u64::MAX, 1237)
            .unwrap();

        // 1237 net grossed up to 1250 released from the vault
        assert_eq!(quote.output.amount, 1250);
        assert_eq!(quote.output.transfer_fee, 13);
        // 667 needed in the vault, grossed up to 674 sent
        assert_eq!(quote.result.source_amount_swapped, 667);
        assert_eq!(quote.input.transfer_fee, 7);
        assert_eq!(quote.input.amount, 674);
    }

    #[rstest]
    fn test_swap_base_output_slippage(pool_snapshot: PoolSnapshot) {
        let result = SwapCalculator::new(&pool_snapshot).swap_base_output(
            TradeDirection::ZeroForOne,
            666,
            1250,
        );
        assert_eq!(
            result,
            Err(CurveError::ExceededSlippage {
                limit: 666,
                actual: 667
            })
        );
    }

    #[rstest]
    fn test_swap_base_output_rounding_to_zero_input(pool_snapshot: PoolSnapshot) {
        let result = SwapCalculator::new(&pool_snapshot).swap_base_output(
            TradeDirection::ZeroForOne,
            u64::MAX,
            1,
        );
        assert_eq!(result, Err(CurveError::ZeroTradingTokens));
    }

    #[rstest]
    fn test_swap_rejected_once_ready_to_launch(mut pool_state: PoolState) {
        pool_state.status = PoolStatus::ReadyToLaunch;
        let snapshot = PoolSnapshot::new(pool_state, 2000, 5000);
        let calculator = SwapCalculator::new(&snapshot);

        assert_eq!(
            calculator.swap_base_input(TradeDirection::ZeroForOne, 10, 0),
            Err(CurveError::PoolReadyToLaunch)
        );
        assert_eq!(
            calculator.swap_base_output(TradeDirection::ZeroForOne, 100, 10),
            Err(CurveError::PoolReadyToLaunch)
        );
    }

    #[rstest]
    fn test_available_balances_exclude_accrued_fees(mut pool_state: PoolState) {
        pool_state.swap_fees_token_0 = 500;
        let snapshot = PoolSnapshot::new(pool_state, 2500, 5000);

        let quote = SwapCalculator::new(&snapshot)
            .swap_base_input(TradeDirection::ZeroForOne, 1000, 0)
            .unwrap();

        assert_eq!(quote.output.amount, 1666);
        assert_eq!(quote.constant_before, 2000 * 5000);
    }

    #[rstest]
    fn test_apply_swap_accrues_protocol_fee(mut pool_state: PoolState) {
        pool_state.config.swap_fee_rate = FeeRate::new(25_000);
        let snapshot = PoolSnapshot::new(pool_state, 2000, 5000);

        let quote = SwapCalculator::new(&snapshot)
            .swap_base_input(TradeDirection::ZeroForOne, 1000, 0)
            .unwrap();
        let next = snapshot.apply_swap(&quote).unwrap();

        assert_eq!(quote.protocol_fee, 25);
        assert_eq!(quote.output.amount, 1638);
        assert_eq!(next.vault_0, 3000);
        assert_eq!(next.vault_1, 3362);
        assert_eq!(next.state.swap_fees_token_0, 25);
        assert_eq!(next.available(TokenSide::Zero), Ok(2975));
        // 2975 crosses the 2500 bound
        assert!(quote.is_ready_to_launch);
        assert_eq!(quote.remaining_tokens, 0);
        assert_eq!(next.state.status, PoolStatus::ReadyToLaunch);
    }

    #[rstest]
    fn test_token_prices_are_pre_swap(pool_snapshot: PoolSnapshot) {
        let quote = SwapCalculator::new(&pool_snapshot)
            .swap_base_input(TradeDirection::OneForZero, 100, 0)
            .unwrap();
        assert_eq!(
            (quote.token_0_price_x32, quote.token_1_price_x32),
            pool_snapshot.token_price_x32().unwrap()
        );
        assert_eq!(quote.direction, TradeDirection::OneForZero);
    }
}
