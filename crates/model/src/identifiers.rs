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

//! Identifiers for pools and the mints they trade.

use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

use launchpad_core::correctness::{FAILED, check_valid_string};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ustr::Ustr;

macro_rules! ustr_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
        pub struct $name(Ustr);

        impl $name {
            #[doc = concat!(
                "Creates a new [`",
                stringify!($name),
                "`] instance with correctness checking."
            )]
            ///
            /// # Errors
            ///
            /// Returns an error if `value` is not a valid string.
            pub fn new_checked<T: AsRef<str>>(value: T) -> anyhow::Result<Self> {
                let value = value.as_ref();
                check_valid_string(value, stringify!(value))?;
                Ok(Self(Ustr::from(value)))
            }

            #[doc = concat!("Creates a new [`", stringify!($name), "`] instance.")]
            ///
            /// # Panics
            ///
            /// Panics if `value` is not a valid string.
            #[must_use]
            pub fn new<T: AsRef<str>>(value: T) -> Self {
                Self::new_checked(value).expect(FAILED)
            }

            /// Returns the inner identifier value.
            #[must_use]
            pub const fn inner(&self) -> Ustr {
                self.0
            }

            /// Returns the inner value as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{:?}", self.0.as_str())
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new_checked(s)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                self.0.serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = Ustr::deserialize(deserializer)?;
                Self::new_checked(value).map_err(serde::de::Error::custom)
            }
        }
    };
}

ustr_identifier!(
    /// Identifies a launch pool on the ledger.
    PoolId
);

ustr_identifier!(
    /// Identifies a token mint on the ledger.
    MintId
);
