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

//! Functions for correctness checks similar to the *design by contract* philosophy.
//!
//! An [`anyhow::Result`] is returned with a descriptive message when the
//! condition check fails.

use anyhow::{Result, bail};

/// A message prefix that can be used with calls to `expect` or other assertion-related functions.
pub const FAILED: &str = "Condition failed";

/// Checks the `predicate` is true.
///
/// # Errors
///
/// Returns an error if the validation check fails.
#[inline(always)]
pub fn check_predicate_true(predicate: bool, fail_msg: &str) -> Result<()> {
    if !predicate {
        bail!("{fail_msg}")
    }
    Ok(())
}

/// Checks the string `s` is not empty, not all whitespace and contains only ASCII characters.
///
/// # Errors
///
/// Returns an error if the validation check fails.
#[inline(always)]
pub fn check_valid_string(s: &str, param: &str) -> Result<()> {
    if s.is_empty() {
        bail!("invalid string for '{param}', was empty")
    }
    if s.chars().all(char::is_whitespace) {
        bail!("invalid string for '{param}', was all whitespace")
    }
    if !s.is_ascii() {
        bail!("invalid string for '{param}' contained a non-ASCII char, was '{s}'")
    }
    Ok(())
}

/// Checks the `u64` value is in range [`l`, `r`] (inclusive).
///
/// # Errors
///
/// Returns an error if the validation check fails.
#[inline(always)]
pub fn check_in_range_inclusive_u64(value: u64, l: u64, r: u64, param: &str) -> Result<()> {
    if value < l || value > r {
        bail!("invalid u64 for '{param}' not in range [{l}, {r}], was {value}")
    }
    Ok(())
}

/// Checks the `u64` value is positive (> 0).
///
/// # Errors
///
/// Returns an error if the validation check fails.
#[inline(always)]
pub fn check_positive_u64(value: u64, param: &str) -> Result<()> {
    if value == 0 {
        bail!("invalid u64 for '{param}' not positive, was {value}")
    }
    Ok(())
}

/// Checks the slice is not empty.
///
/// # Errors
///
/// Returns an error if the validation check fails.
#[inline(always)]
pub fn check_slice_not_empty<T>(slice: &[T], param: &str) -> Result<()> {
    if slice.is_empty() {
        bail!("the '{param}' slice `&[{}]` was empty", std::any::type_name::<T>())
    }
    Ok(())
}
