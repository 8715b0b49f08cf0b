use serde::{Deserialize, Serialize};

/// Monotonic ID generator for officials and in-flight records.
///
/// Serialized into save snapshots so restored worlds never re-issue an ID
/// that an in-flight record already holds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Ensure future IDs are issued strictly after `id`.
    pub fn advance_past(&mut self, id: u64) {
        if self.next <= id {
            self.next = id + 1;
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
    }

    #[test]
    fn advance_past_skips_taken_ids() {
        let mut ids = IdGenerator::new();
        ids.advance_past(10);
        assert_eq!(ids.next_id(), 11);
        // Advancing backwards is a no-op
        ids.advance_past(3);
        assert_eq!(ids.next_id(), 12);
    }
}
