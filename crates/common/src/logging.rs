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

use std::{collections::HashMap, env, str::FromStr};

use log::LevelFilter;
use simple_logger::SimpleLogger;
use tracing_subscriber::EnvFilter;
use ustr::Ustr;

/// Environment variable holding the logger spec string.
pub const LAUNCHPAD_LOG: &str = "LAUNCHPAD_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Maximum log level to write to stdout.
    pub stdout_level: LevelFilter,
    /// Per-component log levels, keyed by module path.
    component_level: HashMap<Ustr, LevelFilter>,
    /// If logger is using ANSI color codes.
    pub is_colored: bool,
    /// If the configuration should be printed to stdout at initialization.
    pub print_config: bool,
}

impl Default for LoggerConfig {
    /// Creates a new default [`LoggerConfig`] instance.
    fn default() -> Self {
        Self {
            stdout_level: LevelFilter::Info,
            component_level: HashMap::new(),
            is_colored: false,
            print_config: false,
        }
    }
}

impl LoggerConfig {
    /// Creates a new [`LoggerConfig`] instance.
    #[must_use]
    pub const fn new(
        stdout_level: LevelFilter,
        component_level: HashMap<Ustr, LevelFilter>,
        is_colored: bool,
        print_config: bool,
    ) -> Self {
        Self {
            stdout_level,
            component_level,
            is_colored,
            print_config,
        }
    }

    /// Parses a spec string such as `"stdout=Debug;launchpad_model=Trace;is_colored"`.
    ///
    /// # Errors
    ///
    /// Returns an error if a pair is malformed or names an unknown level.
    pub fn from_spec(spec: &str) -> anyhow::Result<Self> {
        let mut config = Self::default();
        for kv in spec.split(';') {
            let kv = kv.trim();
            if kv.is_empty() {
                continue;
            }
            let kv_lower = kv.to_lowercase();
            if kv_lower == "is_colored" {
                config.is_colored = true;
            } else if kv_lower == "print_config" {
                config.print_config = true;
            } else {
                let Some((k, v)) = kv.split_once('=') else {
                    anyhow::bail!("Invalid spec pair: {kv}");
                };
                let (k, v) = (k.trim(), v.trim());
                let lvl = parse_level_filter(v)?;
                if k.eq_ignore_ascii_case("stdout") {
                    config.stdout_level = lvl;
                } else {
                    config.component_level.insert(Ustr::from(k), lvl);
                }
            }
        }
        Ok(config)
    }

    #[must_use]
    pub const fn component_level(&self) -> &HashMap<Ustr, LevelFilter> {
        &self.component_level
    }
}

/// Parses a level name, accepting `Warning` for `Warn`.
///
/// # Errors
///
/// Returns an error if `s` is not a valid [`LevelFilter`].
pub fn parse_level_filter(s: &str) -> anyhow::Result<LevelFilter> {
    let s = if s.eq_ignore_ascii_case("warning") { "warn" } else { s };
    LevelFilter::from_str(s).map_err(|_| anyhow::anyhow!("Invalid log level: {s}"))
}

/// Initialize logging.
///
/// Installs a `simple_logger` backend for the `log` facade, writing up to the configured
/// stdout level with per-component overrides.
///
/// Should only be called once during an applications run, ideally at the
/// beginning of the run.
///
/// # Errors
///
/// Returns an error if a logger is already installed.
pub fn init_logging(config: &LoggerConfig) -> anyhow::Result<()> {
    if config.print_config {
        println!("LoggerConfig({config:?})");
    }

    let mut logger = SimpleLogger::new()
        .with_level(config.stdout_level)
        .with_colors(config.is_colored);
    for (component, level) in &config.component_level {
        logger = logger.with_module_level(component.as_str(), *level);
    }

    logger
        .init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}

/// Initialize tracing.
///
/// Tracing can be configured to filter modules and write up to a specific level by
/// passing a configuration using the `RUST_LOG` environment variable. Records from the
/// `log` facade are forwarded to the subscriber, so [`init_logging`] must not be called
/// once this returns `true`.
///
/// # Errors
///
/// Returns an error if tracing subscriber fails to initialize.
pub fn init_tracing() -> anyhow::Result<bool> {
    // Skip tracing initialization if `RUST_LOG` is not set
    let Ok(v) = env::var("RUST_LOG") else {
        return Ok(false);
    };
    init_tracing_with_filter(&v)?;
    log::info!("Initialized tracing logs with RUST_LOG={v}");
    Ok(true)
}

/// Installs a `tracing-subscriber` formatter filtered by `filter` as the global
/// subscriber, bridging `log` records into it.
///
/// # Errors
///
/// Returns an error if a subscriber or logger is already installed.
pub fn init_tracing_with_filter(filter: &str) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))
}
