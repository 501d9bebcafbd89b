#[cfg(test)]
mod tests;

use std::fmt;
use std::fmt::{Display, Formatter};

/// Monotonically increasing counter attached to each cache entry.
/// A fetch completing with an older generation than the entry is discarded.
pub type Generation = u64;

/// The closed key space of the query cache.
///
/// Every cached read in the application is one of these; there is no
/// open-ended key registry.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum QueryKey {
    Balance,
    UnsuccessfulTransactions
}

impl QueryKey {
    /// Stable identifier, used in log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKey::Balance => "balance",
            QueryKey::UnsuccessfulTransactions => "unsuccessful-transactions"
        }
    }
}

impl Display for QueryKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
