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

//! Errors raised while building Merkle trees and authorizing claims.

/// A result type for Merkle and claim operations.
pub type MerkleResult<T> = Result<T, MerkleError>;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MerkleError {
    #[error("No leaf with custom index {0}")]
    LeafNotFound(u16),
    #[error("Duplicate custom index {0} within shard")]
    DuplicateIndex(u16),
    #[error("Shard capacity exceeded: {len} leaves, maximum {max}")]
    CapacityExceeded { len: usize, max: usize },
    #[error("Shard limit reached: maximum {0} shards")]
    ShardLimit(usize),
    #[error("Cannot build a Merkle tree without leaves")]
    EmptyTree,
    #[error("Leaf belongs to a different shard")]
    ShardMismatch,
    #[error("Tokens already claimed for custom index {0}")]
    AlreadyClaimed(u16),
    #[error("Invalid proof")]
    InvalidProof,
    #[error("Claim window not active at {now}: starts={starts}, ends={ends}")]
    ClaimNotActive { now: u64, starts: u64, ends: u64 },
    #[error("Claim of {amount} exceeds remaining {remaining}")]
    InsufficientFunds { amount: u64, remaining: u64 },
}
