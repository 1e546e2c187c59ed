use std::fmt::{Display, Error as FmtError, Formatter};
use std::str::FromStr;

use serde_derive::{Deserialize, Serialize};

use crate::error::Error;

const VALID_SPECIAL_CHARS: &str = "._+-#[]<>";

/// Checks an ICS-24 identifier: length within `[min, max]` and only
/// alphanumerics or one of `._+-#[]<>`.
fn validate_identifier(id: &str, min: usize, max: usize) -> Result<(), Error> {
    if id.contains('/') {
        return Err(Error::invalid_identifier(
            id.to_string(),
            "contains a path separator".to_string(),
        ));
    }

    let length = id.len();
    if length < min || length > max {
        return Err(Error::invalid_identifier(
            id.to_string(),
            format!("length {length} is not within [{min}, {max}]"),
        ));
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || VALID_SPECIAL_CHARS.contains(c))
    {
        return Err(Error::invalid_identifier(
            id.to_string(),
            "contains invalid characters".to_string(),
        ));
    }

    Ok(())
}

/// Identifier of a chain. Chain identifiers are opaque and only need to be
/// non-empty to be usable as a configuration key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(String);

impl ChainId {
    pub fn from_string(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ChainId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ChainId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl FromStr for ChainId {
    type Err = Error;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        if id.is_empty() {
            return Err(Error::invalid_identifier(
                id.to_string(),
                "chain identifier cannot be empty".to_string(),
            ));
        }

        Ok(Self::from_string(id))
    }
}

macro_rules! ics24_identifier {
    ($(#[$attr:meta])* $name:ident, $min:expr, $max:expr) => {
        $(#[$attr])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Get this identifier as a borrowed `&str`
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                validate_identifier(s, $min, $max).map(|_| Self(s.to_string()))
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                validate_identifier(&value, $min, $max)?;
                Ok(Self(value))
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

ics24_identifier!(
    /// Identifier of a light client hosted on a chain, e.g. `07-tendermint-0`.
    ClientId,
    9,
    64
);

ics24_identifier!(
    /// Identifier of a connection end, e.g. `connection-0`.
    ConnectionId,
    10,
    64
);

ics24_identifier!(
    /// Identifier of a channel end, e.g. `channel-0`.
    ChannelId,
    8,
    64
);

ics24_identifier!(PortId, 2, 128);

impl ClientId {
    /// Builds the identifier a chain assigns to its `counter`-th client of
    /// type `client_type`.
    pub fn new(client_type: &str, counter: u64) -> Result<Self, Error> {
        format!("{client_type}-{counter}").parse()
    }
}

impl ConnectionId {
    pub fn new(counter: u64) -> Self {
        Self(format!("connection-{counter}"))
    }
}

impl ChannelId {
    pub fn new(counter: u64) -> Self {
        Self(format!("channel-{counter}"))
    }
}

impl PortId {
    pub fn transfer() -> Self {
        Self("transfer".to_string())
    }
}
