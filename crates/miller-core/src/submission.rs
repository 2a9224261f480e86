//! Submission sequencing.
//!
//! Replies can come back in any order. Only the reply to the most recently
//! issued submission may touch the scene.

use serde::{Deserialize, Serialize};

/// Monotonically increasing submission number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubmissionId(u64);

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues submission ids and tells whether a reply is still current.
#[derive(Debug, Default)]
pub struct SubmissionSequencer {
    latest: u64,
}

impl SubmissionSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next id. Every earlier id becomes stale.
    pub fn next(&mut self) -> SubmissionId {
        self.latest += 1;
        SubmissionId(self.latest)
    }

    /// Most recently issued id, if any.
    pub fn latest(&self) -> Option<SubmissionId> {
        (self.latest > 0).then_some(SubmissionId(self.latest))
    }

    pub fn is_current(&self, id: SubmissionId) -> bool {
        self.latest() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increase() {
        let mut seq = SubmissionSequencer::new();
        assert_eq!(seq.latest(), None);
        let a = seq.next();
        let b = seq.next();
        assert!(b > a);
        assert_eq!(seq.latest(), Some(b));
    }

    #[test]
    fn test_only_latest_is_current() {
        let mut seq = SubmissionSequencer::new();
        let a = seq.next();
        assert!(seq.is_current(a));
        let b = seq.next();
        assert!(!seq.is_current(a));
        assert!(seq.is_current(b));
    }
}
