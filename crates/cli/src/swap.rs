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

use launchpad_common::config::load_config;
use launchpad_model::{
    curve::TradeDirection,
    launch::LaunchPlan,
    pool::PoolSnapshot,
    swap::{SwapCalculator, SwapMode, SwapQuote},
};

use crate::opt::{SwapCommand, SwapOpt};

pub fn run_swap_command(opt: SwapOpt) -> anyhow::Result<()> {
    match opt.command {
        SwapCommand::Quote {
            snapshot,
            direction,
            mode,
            amount,
            limit,
        } => {
            let snapshot: PoolSnapshot = load_config(&snapshot)?;
            let quote = quote(&snapshot, direction, mode, amount, limit)?;
            println!("{}", serde_json::to_string_pretty(&quote)?);
        }
        SwapCommand::Launch { snapshot } => {
            let snapshot: PoolSnapshot = load_config(&snapshot)?;
            let plan = LaunchPlan::from_snapshot(&snapshot)?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
    }
    Ok(())
}

/// Previews a swap of `amount` against `snapshot`.
///
/// Without a `limit`, exact-input swaps accept any positive output and exact-output swaps
/// accept any input.
///
/// # Errors
///
/// Returns an error if the pool configuration is invalid or the swap is rejected.
pub fn quote(
    snapshot: &PoolSnapshot,
    direction: TradeDirection,
    mode: SwapMode,
    amount: u64,
    limit: Option<u64>,
) -> anyhow::Result<SwapQuote> {
    snapshot.state.config.validate()?;
    let calculator = SwapCalculator::new(snapshot);
    let quote = match mode {
        SwapMode::ExactInput => calculator.swap_base_input(direction, amount, limit.unwrap_or(0))?,
        SwapMode::ExactOutput => {
            calculator.swap_base_output(direction, limit.unwrap_or(u64::MAX), amount)?
        }
    };
    Ok(quote)
}
