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

//! Building a six-leaf shard and authorizing claims against its published root.

use alloy_primitives::B256;
use launchpad_cryptography::{
    claim::{ClaimShard, ClaimWindow},
    error::MerkleError,
    merkle::{ClaimLeaf, ClaimTree, Distribution, verify_proof},
};
use rstest::{fixture, rstest};

const SHARD: B256 = B256::repeat_byte(0xE0);

#[fixture]
fn leaves() -> Vec<ClaimLeaf> {
    (0u16..6)
        .map(|i| {
            ClaimLeaf::new(
                SHARD,
                B256::left_padding_from(&[0xC0, i as u8]),
                i,
                1_000 * u64::from(i + 1),
            )
        })
        .collect()
}

#[rstest]
fn test_root_is_independent_of_leaf_order(leaves: Vec<ClaimLeaf>) {
    let mut shuffled = leaves.clone();
    shuffled.swap(0, 4);
    shuffled.swap(1, 5);
    shuffled.reverse();

    let original = ClaimTree::new(SHARD, leaves).unwrap();
    let permuted = ClaimTree::new(SHARD, shuffled).unwrap();

    assert_eq!(original.root(), permuted.root());

    let proof = original.leaf_proof(3).unwrap();
    assert!(proof.verify(original.root()));
    assert!(proof.verify(permuted.root()));
    assert_eq!(permuted.leaf_proof(3).unwrap(), proof);
}

#[rstest]
fn test_tampered_proof_fails(leaves: Vec<ClaimLeaf>) {
    let tree = ClaimTree::new(SHARD, leaves).unwrap();
    let proof = tree.leaf_proof(3).unwrap();

    for element in 0..proof.proof.len() {
        let mut path = proof.proof.clone();
        path[element].0[0] ^= 0x01;
        assert!(!verify_proof(&path, proof.leaf, tree.root()));
    }

    let mut leaf = proof.leaf;
    leaf.0[31] ^= 0x80;
    assert!(!verify_proof(&proof.proof, leaf, tree.root()));
}

#[rstest]
fn test_claim_every_leaf_once(leaves: Vec<ClaimLeaf>) {
    let distribution = Distribution::from_leaves(leaves.clone()).unwrap();
    let (index, tree) = distribution.find_shard(&SHARD).unwrap();
    let mut shard = ClaimShard::from_tree(index, tree);
    let mut window = ClaimWindow::new(1_700_000_000, 21_000);
    let now = window.claim_starts + 60;

    for leaf in &leaves {
        let proof = tree.leaf_proof(leaf.custom_index).unwrap();
        shard
            .claim(
                &mut window,
                now,
                leaf.recipient,
                leaf.custom_index,
                leaf.amount,
                &proof.proof,
            )
            .unwrap();
    }

    assert_eq!(shard.bitmap().count(), 6);
    assert_eq!(distribution.total_amount(), 21_000);
    assert_eq!(window.total_claimed, 21_000);
    assert_eq!(window.remaining_amount(), 0);

    let replay = tree.leaf_proof(5).unwrap();
    let mut refilled = ClaimWindow::new(window.claim_starts, 6_000);
    assert_eq!(
        shard.claim(
            &mut refilled,
            now,
            leaves[5].recipient,
            5,
            leaves[5].amount,
            &replay.proof
        ),
        Err(MerkleError::AlreadyClaimed(5))
    );
}
