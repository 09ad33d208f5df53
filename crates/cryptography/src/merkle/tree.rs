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

//! Sorted-pair Merkle tree over 32-byte hashes.
//!
//! Leaves are sorted before building and each sibling pair is hashed in ascending byte
//! order, so neither the root nor verification depend on the order leaves were supplied
//! in. A node without a sibling is promoted to the next level unchanged.

use alloy_primitives::{B256, keccak256};

use crate::error::{MerkleError, MerkleResult};

/// Hashes two nodes in ascending byte order.
#[must_use]
pub fn hash_pair(a: &B256, b: &B256) -> B256 {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    let mut bytes = [0u8; 64];
    bytes[..32].copy_from_slice(first.as_slice());
    bytes[32..].copy_from_slice(second.as_slice());
    keccak256(bytes)
}

/// Returns whether folding `leaf` with `path` under [`hash_pair`] yields `root`.
#[must_use]
pub fn verify_proof(path: &[B256], leaf: B256, root: B256) -> bool {
    path.iter()
        .fold(leaf, |computed, sibling| hash_pair(&computed, sibling))
        == root
}

/// An immutable Merkle tree holding every level from the sorted leaves up to the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree {
    layers: Vec<Vec<B256>>,
    root: B256,
}

impl MerkleTree {
    /// Builds a tree over `leaves` in any order.
    ///
    /// # Errors
    ///
    /// Returns [`MerkleError::EmptyTree`] if `leaves` is empty.
    pub fn new(mut leaves: Vec<B256>) -> MerkleResult<Self> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyTree);
        }
        leaves.sort_unstable();

        let mut layers = vec![leaves];
        while let Some(level) = layers.last().filter(|level| level.len() > 1) {
            let next: Vec<B256> = level
                .chunks(2)
                .map(|pair| match pair.get(1) {
                    Some(right) => hash_pair(&pair[0], right),
                    None => pair[0],
                })
                .collect();
            layers.push(next);
        }

        let root = layers[layers.len() - 1][0];
        Ok(Self { layers, root })
    }

    #[must_use]
    pub const fn root(&self) -> B256 {
        self.root
    }

    /// Returns the sorted leaf hashes.
    #[must_use]
    pub fn leaves(&self) -> &[B256] {
        &self.layers[0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.leaves().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaves().is_empty()
    }

    /// Returns the number of levels above the leaves.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// Returns the position of `leaf` among the sorted leaves.
    #[must_use]
    pub fn position(&self, leaf: &B256) -> Option<usize> {
        self.leaves().binary_search(leaf).ok()
    }

    /// Returns the sibling path from the leaf at `position` up to the root.
    #[must_use]
    pub fn proof(&self, position: usize) -> Option<Vec<B256>> {
        if position >= self.len() {
            return None;
        }

        let mut index = position;
        let mut path = Vec::with_capacity(self.depth());
        for level in &self.layers[..self.depth()] {
            if let Some(sibling) = level.get(index ^ 1) {
                path.push(*sibling);
            }
            index /= 2;
        }
        Some(path)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn node(byte: u8) -> B256 {
        B256::repeat_byte(byte)
    }

    #[rstest]
    fn test_empty_tree_fails() {
        assert_eq!(MerkleTree::new(vec![]), Err(MerkleError::EmptyTree));
    }

    #[rstest]
    fn test_single_leaf_is_root() {
        let tree = MerkleTree::new(vec![node(7)]).unwrap();

        assert_eq!(tree.root(), node(7));
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.proof(0), Some(vec![]));
        assert!(verify_proof(&[], node(7), tree.root()));
    }

    #[rstest]
    fn test_hash_pair_is_order_independent() {
        assert_eq!(hash_pair(&node(1), &node(2)), hash_pair(&node(2), &node(1)));
    }

    #[rstest]
    fn test_odd_node_is_promoted() {
        let tree = MerkleTree::new(vec![node(3), node(1), node(2)]).unwrap();
        let expected = hash_pair(&hash_pair(&node(1), &node(2)), &node(3));

        assert_eq!(tree.root(), expected);
        assert_eq!(tree.leaves(), &[node(1), node(2), node(3)]);
        assert_eq!(tree.proof(2), Some(vec![hash_pair(&node(1), &node(2))]));
        assert_eq!(tree.proof(0), Some(vec![node(2), node(3)]));
    }

    #[rstest]
    fn test_proof_out_of_range() {
        let tree = MerkleTree::new(vec![node(1), node(2)]).unwrap();
        assert_eq!(tree.proof(2), None);
        assert_eq!(tree.position(&node(9)), None);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(5)]
    #[case(8)]
    #[case(13)]
    fn test_every_proof_verifies(#[case] count: u8) {
        let leaves: Vec<B256> = (1..=count).map(|i| keccak256([i])).collect();
        let tree = MerkleTree::new(leaves.clone()).unwrap();

        for leaf in leaves {
            let position = tree.position(&leaf).unwrap();
            let path = tree.proof(position).unwrap();
            assert!(verify_proof(&path, leaf, tree.root()));
        }
    }

    fn leaf_strategy() -> impl Strategy<Value = Vec<B256>> {
        prop::collection::vec(any::<[u8; 32]>().prop_map(B256::from), 1..40)
    }

    proptest! {
        #[rstest]
        fn prop_root_is_permutation_invariant(leaves in leaf_strategy(), shift in 0usize..40) {
            let mut rotated = leaves.clone();
            let len = rotated.len();
            rotated.rotate_left(shift % len);
            rotated.reverse();

            prop_assert_eq!(
                MerkleTree::new(leaves).unwrap().root(),
                MerkleTree::new(rotated).unwrap().root()
            );
        }

        #[rstest]
        fn prop_flipped_bit_fails_verification(
            leaves in leaf_strategy(),
            pick in any::<prop::sample::Index>(),
            bit in 0usize..256,
        ) {
            let tree = MerkleTree::new(leaves.clone()).unwrap();
            let leaf = *pick.get(&leaves);
            let position = tree.position(&leaf).unwrap();
            let path = tree.proof(position).unwrap();
            prop_assert!(verify_proof(&path, leaf, tree.root()));

            let mut tampered_leaf = leaf;
            tampered_leaf.0[bit / 8] ^= 1 << (bit % 8);
            prop_assert!(!verify_proof(&path, tampered_leaf, tree.root()));

            if !path.is_empty() {
                let mut tampered_path = path.clone();
                let element = bit % tampered_path.len();
                tampered_path[element].0[bit / 8] ^= 1 << (bit % 8);
                prop_assert!(!verify_proof(&tampered_path, leaf, tree.root()));
            }
        }
    }
}
