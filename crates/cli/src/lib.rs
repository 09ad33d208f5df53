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

//! Command-line interface for previewing launch pool swaps and building Merkle claim
//! commitments.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]

pub mod merkle;
pub mod opt;
pub mod swap;

use crate::{
    merkle::run_merkle_command,
    opt::{Commands, LaunchpadCli},
    swap::run_swap_command,
};

pub fn run(opt: LaunchpadCli) -> anyhow::Result<()> {
    match opt.command {
        Commands::Swap(swap_opt) => run_swap_command(swap_opt)?,
        Commands::Merkle(merkle_opt) => run_merkle_command(merkle_opt)?,
    }
    Ok(())
}
