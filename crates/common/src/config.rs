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

//! Configuration file loading.

use std::{fs, path::Path};

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Loads a configuration of type `T` from a JSON or TOML file, chosen by extension.
///
/// Missing fields fall back to the type's serde defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has an unsupported extension, or does not
/// deserialize into `T`.
pub fn load_config<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let config = match extension.as_deref() {
        Some("json") => serde_json::from_str(&contents)
            .with_context(|| format!("Invalid JSON config {}", path.display()))?,
        Some("toml") => toml::from_str(&contents)
            .with_context(|| format!("Invalid TOML config {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported config file extension for {}, expected .json or .toml",
            path.display()
        ),
    };

    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}
