//! Frontier entry identities.
//!
//! The same physical node can be on the frontier several times with different
//! (travel time, SOC) states. Each state gets its own [`FrontierId`]: the node
//! name plus a sequence number minted by the search that created it.

use std::fmt;
use std::sync::Arc;

/// Identity of one search state at a physical node.
///
/// Equality and hashing use the full `(name, sequence)` pair. Compare
/// [`FrontierId::name`] to match physical nodes only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrontierId {
    name: Arc<str>,
    sequence: u64,
}

impl FrontierId {
    /// Physical node identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl fmt::Display for FrontierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.sequence)
    }
}

/// Strictly increasing source of [`FrontierId`]s, owned by a single search.
#[derive(Debug, Default)]
pub struct FrontierIdMinter {
    next: u64,
}

impl FrontierIdMinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh identity for `name`. Sequence numbers are never reused.
    pub fn mint(&mut self, name: &str) -> FrontierId {
        let sequence = self.next;
        self.next += 1;
        FrontierId {
            name: Arc::from(name),
            sequence,
        }
    }

    /// Number of identities minted so far.
    pub fn minted(&self) -> u64 {
        self.next
    }
}
