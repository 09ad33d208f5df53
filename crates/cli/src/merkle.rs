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

use std::path::Path;

use alloy_primitives::{B256, keccak256};
use launchpad_common::config::load_config;
use launchpad_core::correctness::check_slice_not_empty;
use launchpad_cryptography::merkle::{Allocation, ClaimLeaf, Distribution, LeafProof, verify_proof};
use serde::{Deserialize, Serialize};

use crate::opt::{MerkleCommand, MerkleOpt};

/// A file listing claim leaves under `leaves`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeafFile {
    pub leaves: Vec<ClaimLeaf>,
}

/// A file listing allocations under `allocations`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationFile {
    pub allocations: Vec<Allocation>,
}

pub fn run_merkle_command(opt: MerkleOpt) -> anyhow::Result<()> {
    match opt.command {
        MerkleCommand::Partition {
            allocations,
            distribution,
        } => {
            let file: AllocationFile = load_config(&allocations)?;
            check_slice_not_empty(&file.allocations, "allocations")?;
            let leaves = partition(&file.allocations, distribution)?;
            println!("{}", serde_json::to_string_pretty(&leaves)?);
        }
        MerkleCommand::Build { leaves } => {
            for (index, shard, root, len) in build(&leaves)? {
                println!("shard={index} id={shard} root={root} leaves={len}");
            }
        }
        MerkleCommand::Proof {
            leaves,
            shard,
            index,
        } => {
            let proof = proof(&leaves, &shard, index)?;
            println!("{}", serde_json::to_string_pretty(&proof)?);
        }
        MerkleCommand::Verify { root, leaf, proof } => {
            let verified = verify_proof(&proof, leaf, root);
            println!("{verified}");
            if !verified {
                anyhow::bail!("Proof does not verify against root {root}");
            }
        }
    }
    Ok(())
}

/// Derives the identifier of shard `index` as `keccak256(distribution || index (BE))`.
#[must_use]
pub fn shard_id(distribution: &B256, index: u16) -> B256 {
    let mut bytes = [0u8; 34];
    bytes[..32].copy_from_slice(distribution.as_slice());
    bytes[32..].copy_from_slice(&index.to_be_bytes());
    keccak256(bytes)
}

/// Partitions `allocations` into shards of `distribution` and returns every leaf.
///
/// # Errors
///
/// Returns an error if the allocations cannot be partitioned.
pub fn partition(allocations: &[Allocation], distribution: B256) -> anyhow::Result<LeafFile> {
    let distribution =
        Distribution::partition(allocations, |index| shard_id(&distribution, index))?;
    let leaves = distribution
        .shards()
        .iter()
        .flat_map(|tree| tree.leaves().copied())
        .collect();
    Ok(LeafFile { leaves })
}

/// Builds every shard of the leaf file at `path`, returning `(index, shard, root, leaves)`.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or a shard fails to build.
pub fn build(path: &Path) -> anyhow::Result<Vec<(u16, B256, B256, usize)>> {
    let distribution = load_distribution(path)?;
    Ok(distribution
        .shards()
        .iter()
        .zip(0u16..)
        .map(|(tree, index)| (index, tree.shard(), tree.root(), tree.len()))
        .collect())
}

/// Returns the proof of leaf `index` in `shard` from the leaf file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded, or the shard or leaf is unknown.
pub fn proof(path: &Path, shard: &B256, index: u16) -> anyhow::Result<LeafProof> {
    let distribution = load_distribution(path)?;
    Ok(distribution.leaf_proof(shard, index)?)
}

fn load_distribution(path: &Path) -> anyhow::Result<Distribution> {
    let file: LeafFile = load_config(path)?;
    check_slice_not_empty(&file.leaves, "leaves")?;
    Ok(Distribution::from_leaves(file.leaves)?)
}
