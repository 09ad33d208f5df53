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

use std::path::PathBuf;

use alloy_primitives::B256;
use clap::Parser;
use launchpad_model::{curve::TradeDirection, swap::SwapMode};

/// Main CLI structure for parsing command-line arguments and options.
///
/// This is the entry point for the launchpad command-line interface, previewing swaps
/// against pool snapshots and building Merkle claim commitments.
#[derive(Debug, Parser)]
#[clap(version, about, author)]
pub struct LaunchpadCli {
    /// Logger spec, e.g. `stdout=Debug;launchpad_model=Trace` (falls back to `LAUNCHPAD_LOG`).
    #[arg(long, global = true)]
    pub log: Option<String>,
    #[clap(subcommand)]
    pub command: Commands,
}

/// Available top-level commands for the launchpad CLI.
#[derive(Parser, Debug)]
pub enum Commands {
    Swap(SwapOpt),
    Merkle(MerkleOpt),
}

/// Swap preview options and subcommands.
#[derive(Parser, Debug)]
#[command(about = "Launch pool swap previews", long_about = None)]
pub struct SwapOpt {
    #[clap(subcommand)]
    pub command: SwapCommand,
}

/// Available swap commands.
#[derive(Parser, Debug, Clone)]
pub enum SwapCommand {
    /// Previews a swap against a pool snapshot and prints the quote as JSON.
    Quote {
        /// Path to a JSON or TOML pool snapshot.
        #[arg(long)]
        snapshot: PathBuf,
        /// Swap direction: `zero-for-one` or `one-for-zero`.
        #[arg(long)]
        direction: TradeDirection,
        /// Swap mode: `exact-input` or `exact-output`.
        #[arg(long, default_value = "exact-input")]
        mode: SwapMode,
        /// Amount sent (exact input) or net amount received (exact output).
        #[arg(long)]
        amount: u64,
        /// Minimum amount out (exact input) or maximum amount in (exact output).
        #[arg(long)]
        limit: Option<u64>,
    },
    /// Computes the launch plan of a pool which has reached its reserve bound.
    Launch {
        /// Path to a JSON or TOML pool snapshot.
        #[arg(long)]
        snapshot: PathBuf,
    },
}

/// Merkle claim options and subcommands.
#[derive(Parser, Debug)]
#[command(about = "Merkle claim commitments", long_about = None)]
pub struct MerkleOpt {
    #[clap(subcommand)]
    pub command: MerkleCommand,
}

/// Available Merkle commands.
#[derive(Parser, Debug, Clone)]
pub enum MerkleCommand {
    /// Splits an allocation list into shards and prints the resulting leaves as JSON.
    Partition {
        /// Path to a JSON or TOML file of `allocations`.
        #[arg(long)]
        allocations: PathBuf,
        /// Distribution identifier each shard identifier is derived from.
        #[arg(long)]
        distribution: B256,
    },
    /// Builds every shard of a leaf file and prints its index and root.
    Build {
        /// Path to a JSON or TOML file of `leaves`.
        #[arg(long)]
        leaves: PathBuf,
    },
    /// Prints the proof of one leaf as JSON.
    Proof {
        /// Path to a JSON or TOML file of `leaves`.
        #[arg(long)]
        leaves: PathBuf,
        /// Shard identifier the leaf belongs to.
        #[arg(long)]
        shard: B256,
        /// Custom index of the leaf within the shard.
        #[arg(long)]
        index: u16,
    },
    /// Verifies a proof against a root, failing if it does not verify.
    Verify {
        #[arg(long)]
        root: B256,
        #[arg(long)]
        leaf: B256,
        /// Sibling hashes from the leaf level up.
        #[arg(long, num_args = 0..)]
        proof: Vec<B256>,
    },
}
