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

use launchpad_model::{
    curve::{CurveCalculator, TradeDirection},
    fees::{FeeRate, MAX_FEE_RATE},
    identifiers::{MintId, PoolId},
    pool::{PoolConfig, PoolSnapshot, PoolState, ReserveBoundComparison, TokenSide},
    swap::SwapCalculator,
};
use proptest::prelude::*;
use rstest::rstest;

fn snapshot(vault_0: u64, vault_1: u64, swap_fee_rate: u64) -> PoolSnapshot {
    let config = PoolConfig {
        swap_fee_rate: FeeRate::new(swap_fee_rate),
        vault_reserve_bound: u64::MAX,
        reserve_bound_comparison: ReserveBoundComparison::GreaterOrEqual,
        reserve_side: TokenSide::Zero,
        ..PoolConfig::default()
    };
    let state = PoolState::new(
        PoolId::new("POOL-PROP"),
        MintId::new("MINT-0"),
        MintId::new("MINT-1"),
        config,
    );
    PoolSnapshot::new(state, vault_0, vault_1)
}

proptest! {
    #[rstest]
    fn prop_exact_input_never_shrinks_constant_product(
        source_amount in 1u128..=1_000_000_000_000,
        swap_source_amount in 1u128..=1_000_000_000_000,
        swap_destination_amount in 1u128..=1_000_000_000_000,
        rate in 0u64..=MAX_FEE_RATE,
    ) {
        let result = CurveCalculator::swap_base_input(
            source_amount,
            swap_source_amount,
            swap_destination_amount,
            FeeRate::new(rate),
        ).unwrap();

        prop_assert!(result.destination_amount_swapped < swap_destination_amount);
        prop_assert!(result.protocol_fee <= result.source_amount_swapped);
        prop_assert!(
            result.constant_product_after().unwrap() >= swap_source_amount * swap_destination_amount
        );
    }

    #[rstest]
    fn prop_quote_tracks_remaining_tokens(
        vault_0 in 1_000u64..=1_000_000_000,
        vault_1 in 1_000u64..=1_000_000_000,
        amount_in in 1_000u64..=1_000_000_000,
        rate in 0u64..=MAX_FEE_RATE,
    ) {
        let snapshot = snapshot(vault_0, vault_1, rate);
        let quote = SwapCalculator::new(&snapshot)
            .swap_base_input(TradeDirection::ZeroForOne, amount_in, 0);
        prop_assume!(quote.is_ok());
        let quote = quote.unwrap();

        let settled = snapshot.apply_swap(&quote).unwrap();
        prop_assert_eq!(settled.vault_0, vault_0 + amount_in);
        prop_assert_eq!(settled.vault_1, vault_1 - quote.output.amount);
        prop_assert_eq!(settled.remaining_tokens().unwrap(), quote.remaining_tokens);
        prop_assert!(!quote.is_ready_to_launch);
        prop_assert!(quote.constant_after >= quote.constant_before);
    }
}
