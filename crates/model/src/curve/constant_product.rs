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

use launchpad_core::math::CheckedCeilDiv;

use crate::error::{CurveError, CurveResult};

/// The fee-free constant-product curve.
///
/// Both functions take the available (fee-excluded) pool balances and keep
/// `source * destination` from decreasing: output amounts round down and input
/// amounts round up.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstantProductCurve;

impl ConstantProductCurve {
    /// Returns the destination amount released for `source_amount` paid in.
    ///
    /// `destination_out = source_amount * swap_destination / (swap_source + source_amount)`,
    /// rounded down.
    ///
    /// # Errors
    ///
    /// Returns an error if an intermediate overflows or the denominator is zero.
    pub fn swap_base_input_without_fees(
        source_amount: u128,
        swap_source_amount: u128,
        swap_destination_amount: u128,
    ) -> CurveResult<u128> {
        let numerator = source_amount
            .checked_mul(swap_destination_amount)
            .ok_or(CurveError::ArithmeticOverflow)?;
        let denominator = swap_source_amount
            .checked_add(source_amount)
            .ok_or(CurveError::ArithmeticOverflow)?;
        numerator
            .checked_div(denominator)
            .ok_or(CurveError::DivisionByZero)
    }

    /// Returns the source amount which must be paid in to release `destination_amount`.
    ///
    /// The curve input is `ceil(x * dy / (y - dy))` for `x = swap_source`,
    /// `y = swap_destination` and `dy = destination_amount`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DivisionByZero`] if `destination_amount` would drain the
    /// destination side, or an overflow error.
    pub fn swap_base_output_without_fees(
        destination_amount: u128,
        swap_source_amount: u128,
        swap_destination_amount: u128,
    ) -> CurveResult<u128> {
        let numerator = swap_source_amount
            .checked_mul(destination_amount)
            .ok_or(CurveError::ArithmeticOverflow)?;
        if swap_destination_amount <= destination_amount {
            return Err(CurveError::DivisionByZero);
        }
        let denominator = swap_destination_amount - destination_amount;
        let (source_amount, _) = numerator
            .checked_ceil_div(denominator)
            .ok_or(CurveError::DivisionByZero)?;
        Ok(source_amount)
    }
}
