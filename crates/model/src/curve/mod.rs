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

//! Constant-product (`x * y = k`) pricing over a two-asset pool.

pub mod calculator;
pub mod constant_product;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

pub use crate::curve::{
    calculator::{CurveCalculator, SwapResult},
    constant_product::ConstantProductCurve,
};
use crate::pool::TokenSide;

/// The direction of a swap through the pool.
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
pub enum TradeDirection {
    /// Input token 0, output token 1.
    ZeroForOne,
    /// Input token 1, output token 0.
    OneForZero,
}

impl TradeDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::ZeroForOne => Self::OneForZero,
            Self::OneForZero => Self::ZeroForOne,
        }
    }

    /// Returns the side the caller pays into.
    #[must_use]
    pub const fn input_side(&self) -> TokenSide {
        match self {
            Self::ZeroForOne => TokenSide::Zero,
            Self::OneForZero => TokenSide::One,
        }
    }

    /// Returns the side the pool pays out of.
    #[must_use]
    pub const fn output_side(&self) -> TokenSide {
        self.input_side().other()
    }
}
