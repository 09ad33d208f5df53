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

//! Authorizing-side claim bookkeeping.
//!
//! A [`ClaimShard`] holds the published root of one shard and a bitmap marking which
//! custom indexes have been claimed. A [`ClaimWindow`] bounds when claims are accepted
//! and how much may be paid out in total.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use crate::{
    error::{MerkleError, MerkleResult},
    merkle::{ClaimLeaf, ClaimTree, verify_proof},
};

/// Number of 32-bit words needed to hold one bit per `u16` index.
pub const BITMAP_WORDS: usize = 2048;

/// Default length of a claim window in seconds (seven days).
pub const CLAIM_PERIOD_SECS: u64 = 7 * 24 * 60 * 60;

/// One bit per custom index, set once the index has been claimed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShardClaimBitmap {
    words: [u32; BITMAP_WORDS],
}

impl Default for ShardClaimBitmap {
    fn default() -> Self {
        Self {
            words: [0; BITMAP_WORDS],
        }
    }
}

impl ShardClaimBitmap {
    const fn word_index(index: u16) -> usize {
        (index >> 5) as usize
    }

    const fn bit_mask(index: u16) -> u32 {
        1 << (index & 31)
    }

    #[must_use]
    pub const fn check(&self, index: u16) -> bool {
        self.words[Self::word_index(index)] & Self::bit_mask(index) != 0
    }

    pub const fn enable(&mut self, index: u16) {
        self.words[Self::word_index(index)] |= Self::bit_mask(index);
    }

    pub const fn disable(&mut self, index: u16) {
        self.words[Self::word_index(index)] &= !Self::bit_mask(index);
    }

    /// Returns the number of claimed indexes.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.words.iter().map(|word| word.count_ones()).sum()
    }
}

/// The authorizing side of a single distribution shard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimShard {
    /// Index of the shard within its distribution.
    pub index: u16,
    /// Identifier of the shard, hashed into every leaf.
    pub shard: B256,
    pub merkle_root: B256,
    bitmap: ShardClaimBitmap,
}

impl ClaimShard {
    /// Creates a new [`ClaimShard`] instance with nothing claimed.
    #[must_use]
    pub fn new(index: u16, shard: B256, merkle_root: B256) -> Self {
        Self {
            index,
            shard,
            merkle_root,
            bitmap: ShardClaimBitmap::default(),
        }
    }

    /// Creates a new [`ClaimShard`] publishing the root of `tree`.
    #[must_use]
    pub fn from_tree(index: u16, tree: &ClaimTree) -> Self {
        Self::new(index, tree.shard(), tree.root())
    }

    #[must_use]
    pub const fn bitmap(&self) -> &ShardClaimBitmap {
        &self.bitmap
    }

    #[must_use]
    pub const fn is_claimed(&self, custom_index: u16) -> bool {
        self.bitmap.check(custom_index)
    }

    /// Authorizes a claim of `amount` by `recipient` at `custom_index` at time `now`.
    ///
    /// The window must be open and hold enough funds, and the leaf recomputed with this
    /// shard's identifier must verify against the published root. Only then is the index
    /// marked claimed and the amount recorded against `window`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `now` is outside the window ([`MerkleError::ClaimNotActive`]).
    /// - `amount` exceeds what is left to pay out ([`MerkleError::InsufficientFunds`]).
    /// - The index was claimed before ([`MerkleError::AlreadyClaimed`]).
    /// - `proof` does not commit the leaf to the root ([`MerkleError::InvalidProof`]).
    pub fn claim(
        &mut self,
        window: &mut ClaimWindow,
        now: u64,
        recipient: B256,
        custom_index: u16,
        amount: u64,
        proof: &[B256],
    ) -> MerkleResult<ClaimLeaf> {
        window.check_claim(now, amount)?;

        if self.bitmap.check(custom_index) {
            log::warn!(
                "Rejected claim on shard {}: index {custom_index} already claimed",
                self.index
            );
            return Err(MerkleError::AlreadyClaimed(custom_index));
        }

        let leaf = ClaimLeaf::new(self.shard, recipient, custom_index, amount);
        if !verify_proof(proof, leaf.hash(), self.merkle_root) {
            log::warn!(
                "Rejected claim on shard {}: invalid proof for index {custom_index}",
                self.index
            );
            return Err(MerkleError::InvalidProof);
        }

        window.record_claim(now, amount)?;
        self.bitmap.enable(custom_index);
        log::debug!("Claimed index {custom_index} on shard {}: amount={amount}", self.index);
        Ok(leaf)
    }
}

/// The period during which claims are accepted, and the amount left to pay out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimWindow {
    pub claim_starts: u64,
    pub claim_ends: u64,
    pub total_amount: u64,
    pub total_claimed: u64,
}

impl ClaimWindow {
    /// Creates a new [`ClaimWindow`] lasting [`CLAIM_PERIOD_SECS`] from `claim_starts`.
    #[must_use]
    pub const fn new(claim_starts: u64, total_amount: u64) -> Self {
        Self {
            claim_starts,
            claim_ends: claim_starts.saturating_add(CLAIM_PERIOD_SECS),
            total_amount,
            total_claimed: 0,
        }
    }

    #[must_use]
    pub const fn is_started(&self, now: u64) -> bool {
        now > self.claim_starts
    }

    #[must_use]
    pub const fn is_finished(&self, now: u64) -> bool {
        now > self.claim_ends
    }

    #[must_use]
    pub const fn is_active(&self, now: u64) -> bool {
        self.is_started(now) && !self.is_finished(now)
    }

    #[must_use]
    pub const fn remaining_amount(&self) -> u64 {
        self.total_amount.saturating_sub(self.total_claimed)
    }

    /// Checks a payout of `amount` at `now` would be accepted.
    ///
    /// # Errors
    ///
    /// Returns [`MerkleError::ClaimNotActive`] outside the window, or
    /// [`MerkleError::InsufficientFunds`] if `amount` exceeds the remaining amount.
    pub const fn check_claim(&self, now: u64, amount: u64) -> MerkleResult<()> {
        if !self.is_active(now) {
            return Err(MerkleError::ClaimNotActive {
                now,
                starts: self.claim_starts,
                ends: self.claim_ends,
            });
        }
        let remaining = self.remaining_amount();
        if amount > remaining {
            return Err(MerkleError::InsufficientFunds { amount, remaining });
        }
        Ok(())
    }

    /// Records a payout of `amount` at `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if [`Self::check_claim`] rejects the payout.
    pub fn record_claim(&mut self, now: u64, amount: u64) -> MerkleResult<()> {
        self.check_claim(now, amount)?;
        self.total_claimed += amount;
        Ok(())
    }
}
