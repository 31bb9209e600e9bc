//! Delayed actions keyed by tick count
//!
//! Entries may belong to an entity; destroying the entity cancels them.

use super::entity::EntityId;

#[derive(Debug, Clone)]
struct Entry<A> {
    due: u64,
    seq: u64,
    owner: Option<EntityId>,
    action: A,
}

/// Tick-keyed callback list, checked once per tick
#[derive(Debug, Clone)]
pub struct Scheduler<A> {
    entries: Vec<Entry<A>>,
    next_seq: u64,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` once the clock reaches `due`
    pub fn schedule_at(&mut self, due: u64, owner: Option<EntityId>, action: A) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry {
            due,
            seq,
            owner,
            action,
        });
    }

    /// Remove and return every action due at or before `now`, in
    /// (due tick, insertion) order
    pub fn drain_due(&mut self, now: u64) -> Vec<A> {
        let mut due: Vec<Entry<A>> = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].due <= now {
                due.push(self.entries.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|e| (e.due, e.seq));
        due.into_iter().map(|e| e.action).collect()
    }

    /// Drop every pending action owned by `owner`
    pub fn cancel_owned_by(&mut self, owner: EntityId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.owner != Some(owner));
        before - self.entries.len()
    }

    /// Due ticks of pending actions owned by `owner`
    pub fn pending_for(&self, owner: EntityId) -> Vec<u64> {
        let mut ticks: Vec<u64> = self
            .entries
            .iter()
            .filter(|e| e.owner == Some(owner))
            .map(|e| e.due)
            .collect();
        ticks.sort_unstable();
        ticks
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_due_in_order() {
        let mut s = Scheduler::new();
        s.schedule_at(5, None, "b");
        s.schedule_at(3, None, "a");
        s.schedule_at(5, None, "c");
        s.schedule_at(9, None, "later");

        assert!(s.drain_due(2).is_empty());
        assert_eq!(s.drain_due(5), vec!["a", "b", "c"]);
        assert_eq!(s.len(), 1);
        assert_eq!(s.drain_due(100), vec!["later"]);
        assert!(s.is_empty());
    }

    #[test]
    fn test_cancel_owned_by() {
        let mut s = Scheduler::new();
        s.schedule_at(1, Some(EntityId(7)), 1);
        s.schedule_at(2, Some(EntityId(8)), 2);
        s.schedule_at(3, None, 3);

        assert_eq!(s.cancel_owned_by(EntityId(7)), 1);
        assert!(s.pending_for(EntityId(7)).is_empty());
        assert_eq!(s.pending_for(EntityId(8)), vec![2]);
        assert_eq!(s.drain_due(10), vec![2, 3]);
    }
}
