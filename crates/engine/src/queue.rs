//! FIFO queues with time-weighted length accounting.

use multirun_types::{QueueSnapshot, SimTime, Transact};
use std::collections::VecDeque;

/// A FIFO queue of waiting transactions.
///
/// Every length change folds `length × elapsed` into the running integral,
/// so the time-weighted average length is `length_time_sum / now`.
#[derive(Debug, Clone)]
pub struct Queue {
    name: String,
    /// Waiting transactions and the instant each one joined.
    items: VecDeque<(Transact, SimTime)>,
    wait_time_sum: SimTime,
    served: u64,
    length_time_sum: u64,
    /// Instant the integral was last brought up to date.
    last_change: SimTime,
    max_length: usize,
}

impl Queue {
    /// Create an empty queue.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: VecDeque::new(),
            wait_time_sum: 0,
            served: 0,
            length_time_sum: 0,
            last_change: 0,
            max_length: 0,
        }
    }

    /// Queue name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current number of waiting transactions.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Longest the queue has been.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Append a transaction.
    pub fn enqueue(&mut self, transact: Transact, now: SimTime) {
        self.accrue(now);
        self.items.push_back((transact, now));
        self.max_length = self.max_length.max(self.items.len());
    }

    /// Remove the oldest transaction, recording how long it waited.
    pub fn dequeue(&mut self, now: SimTime) -> Option<Transact> {
        self.accrue(now);
        let (transact, joined) = self.items.pop_front()?;
        self.wait_time_sum += now.saturating_sub(joined);
        self.served += 1;
        Some(transact)
    }

    /// Counters as of `now`, including the length held since the last change.
    pub fn snapshot(&self, now: SimTime) -> QueueSnapshot {
        QueueSnapshot {
            wait_time_sum: self.wait_time_sum,
            served: self.served,
            length_time_sum: self.length_time_sum + self.pending_area(now),
            length: self.items.len(),
        }
    }

    fn pending_area(&self, now: SimTime) -> u64 {
        self.items.len() as u64 * now.saturating_sub(self.last_change)
    }

    fn accrue(&mut self, now: SimTime) {
        self.length_time_sum += self.pending_area(now);
        self.last_change = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = Queue::new("line");
        queue.enqueue(1, 0);
        queue.enqueue(2, 0);
        assert_eq!(queue.dequeue(1), Some(1));
        assert_eq!(queue.dequeue(1), Some(2));
        assert_eq!(queue.dequeue(1), None);
    }

    #[test]
    fn test_length_integral() {
        let mut queue = Queue::new("line");
        queue.enqueue(1, 0); // length 1 over [0, 10)
        queue.enqueue(2, 10); // length 2 over [10, 20)
        queue.dequeue(20); // length 1 over [20, 30]

        let snapshot = queue.snapshot(30);
        assert_eq!(snapshot.length_time_sum, 10 + 20 + 10);
        assert_eq!(snapshot.length, 1);
        assert_eq!(queue.max_length(), 2);
    }

    #[test]
    fn test_wait_time() {
        let mut queue = Queue::new("line");
        queue.enqueue(1, 5);
        queue.enqueue(2, 6);
        queue.dequeue(10);
        queue.dequeue(16);

        let snapshot = queue.snapshot(16);
        assert_eq!(snapshot.wait_time_sum, 5 + 10);
        assert_eq!(snapshot.served, 2);
    }
}
