use std::cmp::Ordering;
use std::fmt::{Display, Error as FmtError, Formatter};
use std::str::FromStr;

use serde_derive::{Deserialize, Serialize};

use crate::error::Error;

/// A block height made of a revision number and a height within that
/// revision. Heights compare lexicographically on `(revision_number,
/// revision_height)`; `revision_height` is never zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Height {
    /// Previously known as "epoch"
    revision_number: u64,

    /// The height of a block
    revision_height: u64,
}

impl Height {
    pub fn new(revision_number: u64, revision_height: u64) -> Result<Self, Error> {
        if revision_height == 0 {
            return Err(Error::zero_height());
        }

        Ok(Self {
            revision_number,
            revision_height,
        })
    }

    pub fn revision_number(&self) -> u64 {
        self.revision_number
    }

    pub fn revision_height(&self) -> u64 {
        self.revision_height
    }
}

impl PartialOrd for Height {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Height {
    fn cmp(&self, other: &Self) -> Ordering {
        self.revision_number
            .cmp(&other.revision_number)
            .then(self.revision_height.cmp(&other.revision_height))
    }
}

impl Display for Height {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}-{}", self.revision_number, self.revision_height)
    }
}

impl FromStr for Height {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (number, height) = value
            .split_once('-')
            .ok_or_else(|| Error::invalid_height(value.to_string()))?;

        let revision_number = number
            .parse::<u64>()
            .map_err(|_| Error::invalid_height(value.to_string()))?;
        let revision_height = height
            .parse::<u64>()
            .map_err(|_| Error::invalid_height(value.to_string()))?;

        Height::new(revision_number, revision_height)
    }
}
