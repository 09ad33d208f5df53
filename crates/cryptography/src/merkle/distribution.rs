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

use alloy_primitives::B256;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    error::{MerkleError, MerkleResult},
    merkle::{ClaimLeaf, ClaimTree, LeafProof, MAX_SHARD_LEAVES},
};

/// The maximum number of shards a distribution may be split into.
pub const MAX_SHARDS: usize = u16::MAX as usize;

/// An amount allocated to a recipient, before it is assigned a shard and custom index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub recipient: B256,
    pub amount: u64,
}

/// A distribution list committed as a sequence of shards.
///
/// Shard indexes increase monotonically from zero in the order the shards were built.
#[derive(Clone, Debug, Default)]
pub struct Distribution {
    shards: Vec<ClaimTree>,
}

impl Distribution {
    /// Splits `allocations` into consecutive shards of at most [`MAX_SHARD_LEAVES`] leaves.
    ///
    /// `shard_id_for` supplies the identifier of each shard index. A leaf's custom index
    /// is its position within the shard.
    ///
    /// # Errors
    ///
    /// Returns [`MerkleError::EmptyTree`] if `allocations` is empty, or
    /// [`MerkleError::ShardLimit`] if more than [`MAX_SHARDS`] shards are needed.
    pub fn partition<F>(allocations: &[Allocation], mut shard_id_for: F) -> MerkleResult<Self>
    where
        F: FnMut(u16) -> B256,
    {
        if allocations.is_empty() {
            return Err(MerkleError::EmptyTree);
        }

        let mut shards = Vec::new();
        for (shard_index, chunk) in allocations.chunks(MAX_SHARD_LEAVES).enumerate() {
            if shard_index >= MAX_SHARDS {
                return Err(MerkleError::ShardLimit(MAX_SHARDS));
            }
            let shard = shard_id_for(shard_index as u16);
            let leaves = chunk.iter().enumerate().map(|(custom_index, allocation)| {
                ClaimLeaf::new(
                    shard,
                    allocation.recipient,
                    custom_index as u16,
                    allocation.amount,
                )
            });
            shards.push(ClaimTree::new(shard, leaves)?);
        }

        log::debug!(
            "Partitioned {} allocations into {} shards",
            allocations.len(),
            shards.len()
        );
        Ok(Self { shards })
    }

    /// Groups pre-built `leaves` by shard, in order of each shard's first appearance.
    ///
    /// # Errors
    ///
    /// Returns an error if `leaves` is empty, more than [`MAX_SHARDS`] shards appear, or
    /// any shard fails to build.
    pub fn from_leaves(leaves: impl IntoIterator<Item = ClaimLeaf>) -> MerkleResult<Self> {
        let mut grouped: IndexMap<B256, Vec<ClaimLeaf>> = IndexMap::new();
        for leaf in leaves {
            grouped.entry(leaf.shard).or_default().push(leaf);
        }
        if grouped.is_empty() {
            return Err(MerkleError::EmptyTree);
        }
        if grouped.len() > MAX_SHARDS {
            return Err(MerkleError::ShardLimit(MAX_SHARDS));
        }

        let shards = grouped
            .into_iter()
            .map(|(shard, leaves)| ClaimTree::new(shard, leaves))
            .collect::<MerkleResult<Vec<_>>>()?;
        Ok(Self { shards })
    }

    #[must_use]
    pub fn shards(&self) -> &[ClaimTree] {
        &self.shards
    }

    #[must_use]
    pub fn shard(&self, index: u16) -> Option<&ClaimTree> {
        self.shards.get(usize::from(index))
    }

    /// Returns the index and tree of the shard identified by `shard`.
    #[must_use]
    pub fn find_shard(&self, shard: &B256) -> Option<(u16, &ClaimTree)> {
        self.shards
            .iter()
            .enumerate()
            .find(|(_, tree)| tree.shard() == *shard)
            .map(|(index, tree)| (index as u16, tree))
    }

    /// Returns the `(shard index, root)` of every shard.
    #[must_use]
    pub fn roots(&self) -> Vec<(u16, B256)> {
        self.shards
            .iter()
            .enumerate()
            .map(|(index, tree)| (index as u16, tree.root()))
            .collect()
    }

    /// Returns the proof for `custom_index` within the shard identified by `shard`.
    ///
    /// # Errors
    ///
    /// Returns [`MerkleError::ShardMismatch`] if no shard has that identifier, or
    /// [`MerkleError::LeafNotFound`] if the shard has no such leaf.
    pub fn leaf_proof(&self, shard: &B256, custom_index: u16) -> MerkleResult<LeafProof> {
        let (_, tree) = self.find_shard(shard).ok_or(MerkleError::ShardMismatch)?;
        tree.leaf_proof(custom_index)
    }

    #[must_use]
    pub fn total_amount(&self) -> u128 {
        self.shards.iter().map(ClaimTree::total_amount).sum()
    }
}
