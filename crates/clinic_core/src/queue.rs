//! FIFO station queues with time-weighted length statistics.

use std::collections::VecDeque;

use bevy_ecs::prelude::Entity;

use crate::stats::TimeWeightedStat;

/// A patient waiting at a station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueuedPatient {
    pub patient: Entity,
    /// When the patient became eligible for this stage: creation time for the
    /// first stage, otherwise completion of the previous stage.
    pub eligible_since: f64,
    /// Acuity is carried with the ticket so service times can be sampled before
    /// deferred spawns are applied to the world.
    pub is_trauma: bool,
}

#[derive(Debug, Clone, Default)]
pub struct StationQueue {
    waiting: VecDeque<QueuedPatient>,
    length: TimeWeightedStat,
}

impl StationQueue {
    pub fn enqueue(&mut self, entry: QueuedPatient, now: f64) {
        self.waiting.push_back(entry);
        self.length.record(self.waiting.len() as f64, now);
    }

    pub fn dequeue(&mut self, now: f64) -> Option<QueuedPatient> {
        let entry = self.waiting.pop_front()?;
        self.length.record(self.waiting.len() as f64, now);
        Some(entry)
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    pub fn front(&self) -> Option<&QueuedPatient> {
        self.waiting.front()
    }

    pub fn mean_length(&self, now: f64) -> f64 {
        self.length.mean(now)
    }

    pub fn max_length(&self) -> f64 {
        self.length.max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(raw: u32, eligible_since: f64) -> QueuedPatient {
        QueuedPatient {
            patient: Entity::from_raw(raw),
            eligible_since,
            is_trauma: false,
        }
    }

    #[test]
    fn dequeues_in_arrival_order() {
        let mut queue = StationQueue::default();
        queue.enqueue(ticket(1, 0.0), 0.0);
        queue.enqueue(ticket(2, 1.0), 1.0);
        queue.enqueue(ticket(3, 2.0), 2.0);

        let order: Vec<u32> = std::iter::from_fn(|| queue.dequeue(3.0))
            .map(|entry| entry.patient.index())
            .collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert!(queue.dequeue(3.0).is_none());
    }

    #[test]
    fn length_statistics_are_time_weighted() {
        let mut queue = StationQueue::default();
        queue.enqueue(ticket(1, 0.0), 0.0);
        queue.enqueue(ticket(2, 0.0), 0.0);
        queue.dequeue(4.0).expect("head");
        queue.dequeue(6.0).expect("head");
        // length 2 on [0,4), 1 on [4,6), 0 on [6,10)
        assert!((queue.mean_length(10.0) - 1.0).abs() < 1e-12);
        assert_eq!(queue.max_length(), 2.0);
    }

    #[test]
    fn burst_at_one_instant_adds_no_area_but_sets_max() {
        let mut queue = StationQueue::default();
        for raw in 0..5 {
            queue.enqueue(ticket(raw, 1.0), 1.0);
        }
        for _ in 0..5 {
            queue.dequeue(1.0);
        }
        assert_eq!(queue.mean_length(2.0), 0.0);
        assert_eq!(queue.max_length(), 5.0);
    }
}
