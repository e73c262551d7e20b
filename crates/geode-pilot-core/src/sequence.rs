//! Request tickets
//!
//! Every load that may be overtaken is tagged with a [`Ticket`] when it is
//! issued. Only the latest issued ticket is current; a reply carrying any
//! other ticket is stale and gets dropped on arrival.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonically increasing request tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out tickets; shareable with background tasks
#[derive(Debug, Default)]
pub struct Sequencer {
    latest: AtomicU64,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// True only for the most recently issued ticket
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    pub fn latest(&self) -> Option<Ticket> {
        match self.latest.load(Ordering::SeqCst) {
            0 => None,
            n => Some(Ticket(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_is_current() {
        let seq = Sequencer::new();
        assert_eq!(seq.latest(), None);

        let first = seq.issue();
        assert!(seq.is_current(first));

        let second = seq.issue();
        assert!(second > first);
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
        assert_eq!(seq.latest(), Some(second));
        assert_eq!(second.to_string(), "#2");
    }
}
