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

//! Errors raised while pricing swaps and launching pools.

/// A result type for curve, fee and swap calculations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Typed outcome of a failed pricing or launch calculation.
///
/// Every variant is synchronous and terminal: nothing is retried internally and no
/// partially-computed result is ever returned alongside one.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveError {
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Empty supply: both pool sides require a positive available balance")]
    EmptySupply,
    #[error("Arithmetic underflow")]
    ArithmeticUnderflow,
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
    #[error("Exceeded slippage: limit={limit}, actual={actual}")]
    ExceededSlippage { limit: u64, actual: u64 },
    #[error("Received zero: output is entirely consumed by the transfer fee")]
    ReceivedZero,
    #[error("Zero trading tokens: input is entirely consumed by fees")]
    ZeroTradingTokens,
    #[error("Invalid fee rate {0}, must not exceed 1000000")]
    InvalidFeeRate(u64),
    #[error("Invalid transfer fee basis points {0}, must not exceed 10000")]
    InvalidTransferFeeBasisPoints(u16),
    #[error("Pool is not open for trading until {open_time}, was {timestamp}")]
    PoolNotOpen { open_time: u64, timestamp: u64 },
    #[error("Pool is ready to launch")]
    PoolReadyToLaunch,
    #[error("Pool is already launched")]
    PoolLaunched,
    #[error("Pool has not reached its reserve bound")]
    PoolNotReadyToLaunch,
    #[error("Swap invariant violated")]
    InvariantViolated,
}
