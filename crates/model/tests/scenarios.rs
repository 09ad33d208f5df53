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

//! End-to-end pricing scenarios over a 2000 / 5000 pool.

use launchpad_model::{
    curve::{CurveCalculator, TradeDirection},
    error::CurveError,
    fees::{FeeRate, protocol_fee},
    identifiers::{MintId, PoolId},
    pool::{PoolConfig, PoolSnapshot, PoolState, PoolStatus, ReserveBoundComparison, TokenSide},
    swap::SwapCalculator,
};
use rstest::{fixture, rstest};

#[fixture]
fn launch_pool() -> PoolSnapshot {
    let config = PoolConfig {
        swap_fee_rate: FeeRate::ZERO,
        launch_fee_rate: FeeRate::new(10_000),
        initial_reserve: 2000,
        vault_reserve_bound: 2500,
        reserve_bound_comparison: ReserveBoundComparison::GreaterOrEqual,
        reserve_side: TokenSide::Zero,
    };
    let state = PoolState::new(
        PoolId::new("POOL-SCENARIO"),
        MintId::new("MINT-0"),
        MintId::new("MINT-1"),
        config,
    );
    PoolSnapshot::initial(state, 5000).unwrap()
}

#[rstest]
fn test_exact_input_without_protocol_fee() {
    let result = CurveCalculator::swap_base_input(1000, 2000, 5000, FeeRate::ZERO).unwrap();

    assert_eq!(result.protocol_fee, 0);
    assert_eq!(result.destination_amount_swapped, 1666);
}

#[rstest]
fn test_exact_input_with_protocol_fee() {
    let rate = FeeRate::new(25_000);
    let result = CurveCalculator::swap_base_input(1000, 2000, 5000, rate).unwrap();

    assert_eq!(result.protocol_fee, 25);
    assert_eq!(result.source_amount_swapped - result.protocol_fee, 975);
    assert_eq!(result.destination_amount_swapped, 1638);
    assert_eq!(protocol_fee(1000, rate).unwrap(), 25);
}

#[rstest]
fn test_exact_output_without_protocol_fee() {
    let result = CurveCalculator::swap_base_output(1250, 2000, 5000, FeeRate::ZERO).unwrap();

    assert_eq!(result.source_amount_swapped, 667);
    assert_eq!(result.destination_amount_swapped, 1250);
}

#[rstest]
fn test_readiness_flips_on_crossing_swap_and_stays(launch_pool: PoolSnapshot) {
    let mut snapshot = launch_pool;
    assert!(!snapshot.is_ready_to_launch().unwrap());

    let mut readiness = Vec::new();
    for _ in 0..3 {
        let quote = SwapCalculator::new(&snapshot)
            .swap_base_input(TradeDirection::ZeroForOne, 200, 0)
            .unwrap();
        snapshot = snapshot.apply_swap(&quote).unwrap();
        readiness.push(quote.is_ready_to_launch);
    }

    // 2200, 2400, 2600 against a bound of 2500
    assert_eq!(readiness, vec![false, false, true]);
    assert_eq!(snapshot.state.status, PoolStatus::ReadyToLaunch);
    assert!(snapshot.is_ready_to_launch().unwrap());
    assert_eq!(snapshot.remaining_tokens().unwrap(), 0);

    let rejected =
        SwapCalculator::new(&snapshot).swap_base_input(TradeDirection::ZeroForOne, 200, 0);
    assert_eq!(rejected, Err(CurveError::PoolReadyToLaunch));
    assert!(snapshot.is_ready_to_launch().unwrap());
}

#[rstest]
fn test_remaining_tokens_decrease_towards_bound(launch_pool: PoolSnapshot) {
    let quote = SwapCalculator::new(&launch_pool)
        .swap_base_input(TradeDirection::ZeroForOne, 200, 0)
        .unwrap();
    assert_eq!(quote.remaining_tokens, 300);

    let quote = SwapCalculator::new(&launch_pool)
        .swap_base_input(TradeDirection::OneForZero, 1000, 0)
        .unwrap();
    assert_eq!(quote.remaining_tokens, 500 + quote.output.amount);
}

#[rstest]
fn test_less_or_equal_bound(launch_pool: PoolSnapshot) {
    let mut snapshot = launch_pool;
    snapshot.state.config.reserve_bound_comparison = ReserveBoundComparison::LessOrEqual;
    snapshot.state.config.vault_reserve_bound = 1500;

    let quote = SwapCalculator::new(&snapshot)
        .swap_base_input(TradeDirection::OneForZero, 2500, 0)
        .unwrap();

    // 2500 * 2000 / 7500 = 666 leaves 1334 on the reserve side
    assert_eq!(quote.output.amount, 666);
    assert!(quote.is_ready_to_launch);
}
