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

//! Sharded Merkle commitments for authorizing token claims.
//!
//! The `launchpad-cryptography` crate commits a fixed distribution list to one Merkle root
//! per shard and derives the proofs recipients submit alongside a claim:
//!
//! - Claim leaf encoding and keccak-256 hashing.
//! - Sorted-pair Merkle trees, proofs and proof verification.
//! - Partitioning of a distribution into fixed-capacity shards.
//! - Per-shard claim bitmaps enforcing one claim per leaf.
//!
//! Built trees are immutable and may be shared across threads without synchronization.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod claim;
pub mod error;
pub mod merkle;
