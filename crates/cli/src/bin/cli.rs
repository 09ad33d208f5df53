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

use std::process;

use clap::Parser;
use launchpad_cli::opt::LaunchpadCli;
use launchpad_common::logging::{LAUNCHPAD_LOG, LoggerConfig, init_logging, init_tracing};
use launchpad_core::env::get_or_env_var;

fn main() {
    dotenvy::dotenv().ok();
    let opt = LaunchpadCli::parse();

    let config = match get_or_env_var(opt.log.clone(), LAUNCHPAD_LOG) {
        Ok(spec) => LoggerConfig::from_spec(&spec),
        Err(_) => Ok(LoggerConfig::default()),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid logger spec: {e}");
            process::exit(2);
        }
    };
    match init_tracing() {
        Ok(true) => {}
        Ok(false) => {
            if let Err(e) = init_logging(&config) {
                eprintln!("{e}");
            }
        }
        Err(e) => eprintln!("{e}"),
    }

    if let Err(e) = launchpad_cli::run(opt) {
        log::error!("Error executing launchpad CLI: {e:#}");
        process::exit(1);
    }
}
