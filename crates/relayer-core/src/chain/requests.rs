use core::fmt::{Display, Error as FmtError, Formatter};

use ibc_relay_types::Height;

/// Pins a query to the chain state at a given height, so that several
/// queries of one relay step observe a consistent view.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QueryContext {
    height: Height,
}

impl QueryContext {
    pub fn new(height: Height) -> Self {
        Self { height }
    }

    pub fn height(&self) -> Height {
        self.height
    }
}

impl Display for QueryContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "QueryContext(height: {})", self.height)
    }
}
