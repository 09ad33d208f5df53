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

//! Merkle commitments over claim distributions.
//!
//! A [`ClaimTree`] commits the leaves of one shard to a single root. A [`Distribution`]
//! splits a full allocation list into shards of at most [`MAX_SHARD_LEAVES`] leaves,
//! each with an independently published root.

pub mod distribution;
pub mod leaf;
pub mod tree;

use alloy_primitives::B256;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use crate::merkle::{
    distribution::{Allocation, Distribution},
    leaf::ClaimLeaf,
    tree::{MerkleTree, hash_pair, verify_proof},
};
use crate::error::{MerkleError, MerkleResult};

/// The maximum number of leaves held by a single shard.
pub const MAX_SHARD_LEAVES: usize = 65_535;

/// A proof that a leaf is committed to a shard root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafProof {
    /// Position of the leaf hash among the shard's sorted leaves.
    pub position: usize,
    pub custom_index: u16,
    pub leaf: B256,
    /// Sibling hashes ordered from the leaf level up to the root.
    pub proof: Vec<B256>,
}

impl LeafProof {
    /// Returns whether the proof verifies against `root`.
    #[must_use]
    pub fn verify(&self, root: B256) -> bool {
        verify_proof(&self.proof, self.leaf, root)
    }
}

/// The Merkle tree of a single distribution shard, indexed by custom index.
#[derive(Clone, Debug)]
pub struct ClaimTree {
    shard: B256,
    leaves: IndexMap<u16, ClaimLeaf>,
    tree: MerkleTree,
}

impl ClaimTree {
    /// Builds the tree of `shard` from `leaves`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A leaf belongs to a different shard.
    /// - Two leaves share a custom index.
    /// - There are more than [`MAX_SHARD_LEAVES`] leaves.
    /// - There are no leaves.
    pub fn new(shard: B256, leaves: impl IntoIterator<Item = ClaimLeaf>) -> MerkleResult<Self> {
        let mut indexed = IndexMap::new();
        for leaf in leaves {
            if leaf.shard != shard {
                return Err(MerkleError::ShardMismatch);
            }
            if indexed.insert(leaf.custom_index, leaf).is_some() {
                return Err(MerkleError::DuplicateIndex(leaf.custom_index));
            }
            if indexed.len() > MAX_SHARD_LEAVES {
                return Err(MerkleError::CapacityExceeded {
                    len: indexed.len(),
                    max: MAX_SHARD_LEAVES,
                });
            }
        }

        let tree = MerkleTree::new(indexed.values().map(ClaimLeaf::hash).collect())?;
        log::debug!(
            "Built claim tree for shard {shard}: leaves={}, root={}",
            indexed.len(),
            tree.root()
        );

        Ok(Self {
            shard,
            leaves: indexed,
            tree,
        })
    }

    #[must_use]
    pub const fn shard(&self) -> B256 {
        self.shard
    }

    #[must_use]
    pub const fn root(&self) -> B256 {
        self.tree.root()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    #[must_use]
    pub fn leaf(&self, custom_index: u16) -> Option<&ClaimLeaf> {
        self.leaves.get(&custom_index)
    }

    /// Returns the leaves in the order they were supplied.
    pub fn leaves(&self) -> impl Iterator<Item = &ClaimLeaf> {
        self.leaves.values()
    }

    /// Returns the sum of all leaf amounts.
    #[must_use]
    pub fn total_amount(&self) -> u128 {
        self.leaves.values().map(|leaf| u128::from(leaf.amount)).sum()
    }

    /// Returns the proof for the leaf at `custom_index`.
    ///
    /// # Errors
    ///
    /// Returns [`MerkleError::LeafNotFound`] if no leaf has `custom_index`.
    pub fn leaf_proof(&self, custom_index: u16) -> MerkleResult<LeafProof> {
        let leaf = self
            .leaf(custom_index)
            .ok_or(MerkleError::LeafNotFound(custom_index))?
            .hash();
        let position = self
            .tree
            .position(&leaf)
            .ok_or(MerkleError::LeafNotFound(custom_index))?;
        let proof = self
            .tree
            .proof(position)
            .ok_or(MerkleError::LeafNotFound(custom_index))?;

        Ok(LeafProof {
            position,
            custom_index,
            leaf,
            proof,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    const SHARD: B256 = B256::repeat_byte(0x51);

    fn leaf(custom_index: u16, amount: u64) -> ClaimLeaf {
        ClaimLeaf::new(SHARD, B256::with_last_byte(custom_index as u8), custom_index, amount)
    }

    #[fixture]
    fn claim_tree() -> ClaimTree {
        ClaimTree::new(SHARD, (0..4).map(|i| leaf(i, 100 * u64::from(i + 1)))).unwrap()
    }

    #[rstest]
    fn test_claim_tree_accessors(claim_tree: ClaimTree) {
        assert_eq!(claim_tree.shard(), SHARD);
        assert_eq!(claim_tree.len(), 4);
        assert!(!claim_tree.is_empty());
        assert_eq!(claim_tree.total_amount(), 1000);
        assert_eq!(claim_tree.leaf(2), Some(&leaf(2, 300)));
        assert_eq!(
            claim_tree.leaves().map(|l| l.custom_index).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
    }

    #[rstest]
    fn test_leaf_proof_verifies(claim_tree: ClaimTree) {
        for custom_index in 0..4 {
            let proof = claim_tree.leaf_proof(custom_index).unwrap();
            assert_eq!(proof.custom_index, custom_index);
            assert_eq!(proof.leaf, leaf(custom_index, 100 * u64::from(custom_index + 1)).hash());
            assert_eq!(proof.proof.len(), 2);
            assert!(proof.verify(claim_tree.root()));
        }
    }

    #[rstest]
    fn test_leaf_proof_not_found(claim_tree: ClaimTree) {
        assert_eq!(claim_tree.leaf_proof(9), Err(MerkleError::LeafNotFound(9)));
    }

    #[rstest]
    fn test_duplicate_index_rejected() {
        let result = ClaimTree::new(SHARD, vec![leaf(1, 10), leaf(1, 20)]);
        assert_eq!(result.unwrap_err(), MerkleError::DuplicateIndex(1));
    }

    #[rstest]
    fn test_shard_mismatch_rejected() {
        let foreign = ClaimLeaf::new(B256::ZERO, B256::ZERO, 0, 1);
        let result = ClaimTree::new(SHARD, vec![leaf(0, 1), foreign]);
        assert_eq!(result.unwrap_err(), MerkleError::ShardMismatch);
    }

    #[rstest]
    fn test_empty_shard_rejected() {
        let result = ClaimTree::new(SHARD, Vec::new());
        assert_eq!(result.unwrap_err(), MerkleError::EmptyTree);
    }

    #[rstest]
    fn test_capacity_exceeded() {
        let leaves = (0..=u16::MAX).map(|i| ClaimLeaf::new(SHARD, B256::ZERO, i, 1));
        let result = ClaimTree::new(SHARD, leaves);
        assert_eq!(
            result.unwrap_err(),
            MerkleError::CapacityExceeded {
                len: 65_536,
                max: MAX_SHARD_LEAVES,
            }
        );
    }

    #[rstest]
    fn test_leaf_proof_serializes(claim_tree: ClaimTree) {
        let proof = claim_tree.leaf_proof(0).unwrap();
        let json = serde_json::to_string(&proof).unwrap();
        assert!(json.contains("\"custom_index\":0"));
        assert_eq!(serde_json::from_str::<LeafProof>(&json).unwrap(), proof);
    }
}
