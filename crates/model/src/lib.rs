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

//! Domain model for bonding-curve launch pools.
//!
//! The `launchpad-model` crate prices swaps on a constant-product curve, grossing and
//! degrossing amounts for the protocol fee and for per-mint ledger transfer fees, and
//! decides when a pool has accumulated enough reserve to launch. It includes:
//!
//! - Fixed-point protocol fee rates and their inverse.
//! - Epoch-scheduled, capped transfer fees.
//! - The constant-product curve and its exact-input / exact-output calculator.
//! - Pool configuration, state and point-in-time snapshots.
//! - The swap calculator producing fully-formed swap quotes.
//! - Launch tax and fee collection.
//!
//! All arithmetic runs on `u64` amounts with `u128` intermediates, never floating point.
//!
//! # Feature flags
//!
//! - `stubs`: Enables type stubs and an in-memory ledger for use in testing scenarios.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod curve;
pub mod error;
pub mod fees;
pub mod identifiers;
pub mod launch;
pub mod ledger;
pub mod pool;
pub mod swap;
pub mod transfer_fee;

#[cfg(any(test, feature = "stubs"))]
pub mod stubs;
