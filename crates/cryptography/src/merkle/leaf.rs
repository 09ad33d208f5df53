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

use alloy_primitives::{B256, keccak256};
use serde::{Deserialize, Serialize};

/// Length of an encoded [`ClaimLeaf`] in bytes.
pub const LEAF_LEN: usize = 32 + 32 + 2 + 8;

/// A single entry of a distribution shard: `amount` claimable by `recipient`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClaimLeaf {
    /// Identifier of the shard the leaf belongs to.
    pub shard: B256,
    /// Identifier of the claiming recipient.
    pub recipient: B256,
    /// Index unique within the shard, used as the claim marker.
    pub custom_index: u16,
    pub amount: u64,
}

impl ClaimLeaf {
    /// Creates a new [`ClaimLeaf`] instance.
    #[must_use]
    pub const fn new(shard: B256, recipient: B256, custom_index: u16, amount: u64) -> Self {
        Self {
            shard,
            recipient,
            custom_index,
            amount,
        }
    }

    /// Encodes the leaf as `shard || recipient || custom_index (LE) || amount (LE)`.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; LEAF_LEN] {
        let mut bytes = [0u8; LEAF_LEN];
        bytes[..32].copy_from_slice(self.shard.as_slice());
        bytes[32..64].copy_from_slice(self.recipient.as_slice());
        bytes[64..66].copy_from_slice(&self.custom_index.to_le_bytes());
        bytes[66..].copy_from_slice(&self.amount.to_le_bytes());
        bytes
    }

    /// Returns the keccak-256 hash of the encoded leaf.
    #[must_use]
    pub fn hash(&self) -> B256 {
        keccak256(self.to_bytes())
    }
}
