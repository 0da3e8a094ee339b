//! Fixed-capacity server pools with time-weighted busy statistics.

use crate::error::SimError;
use crate::station::Station;
use crate::stats::TimeWeightedStat;

/// Capacity-limited staff pool at one station. Invariant: `busy <= capacity`.
#[derive(Debug, Clone)]
pub struct ServerPool {
    station: Station,
    capacity: u32,
    busy: u32,
    busy_stat: TimeWeightedStat,
}

impl ServerPool {
    pub fn new(station: Station, capacity: u32) -> Self {
        Self {
            station,
            capacity,
            busy: 0,
            busy_stat: TimeWeightedStat::default(),
        }
    }

    /// Reconfigure the pool. Only valid while resetting a replication, so the
    /// busy count and statistics start over as well.
    pub fn set_capacity(&mut self, capacity: u32) {
        *self = Self::new(self.station, capacity);
    }

    pub fn station(&self) -> Station {
        self.station
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn busy(&self) -> u32 {
        self.busy
    }

    /// Take one unit if any is free. Never blocks; a refused seize has no effect.
    pub fn try_seize(&mut self, now: f64) -> bool {
        if self.busy >= self.capacity {
            return false;
        }
        self.busy += 1;
        self.busy_stat.record(self.busy as f64, now);
        true
    }

    /// Return one unit. Releasing an idle pool is an invariant violation.
    pub fn release(&mut self, now: f64) -> Result<(), SimError> {
        if self.busy == 0 {
            return Err(SimError::ReleaseIdleServer {
                station: self.station,
            });
        }
        self.busy -= 1;
        self.busy_stat.record(self.busy as f64, now);
        Ok(())
    }

    /// Time-average number of busy units up to `now`.
    pub fn mean_busy(&self, now: f64) -> f64 {
        self.busy_stat.mean(now)
    }

    /// Busy fraction of capacity in [0, 1]; 0 for an unstaffed station.
    pub fn utilization(&self, now: f64) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.mean_busy(now) / self.capacity as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seize_respects_capacity() {
        let mut pool = ServerPool::new(Station::Registration, 2);
        assert!(pool.try_seize(0.0));
        assert!(pool.try_seize(0.0));
        assert!(!pool.try_seize(1.0));
        assert_eq!(pool.busy(), 2);
    }

    #[test]
    fn zero_capacity_never_seizes() {
        let mut pool = ServerPool::new(Station::Trauma, 0);
        assert!(!pool.try_seize(0.0));
        assert_eq!(pool.utilization(10.0), 0.0);
    }

    #[test]
    fn releasing_idle_pool_is_an_error() {
        let mut pool = ServerPool::new(Station::Treatment, 1);
        assert_eq!(
            pool.release(0.0),
            Err(SimError::ReleaseIdleServer {
                station: Station::Treatment
            })
        );
        assert_eq!(pool.busy(), 0);
    }

    #[test]
    fn utilization_is_time_weighted_fraction_of_capacity() {
        let mut pool = ServerPool::new(Station::Examination, 2);
        assert!(pool.try_seize(0.0));
        assert!(pool.try_seize(5.0));
        pool.release(10.0).expect("busy unit");
        pool.release(10.0).expect("busy unit");
        // busy: 1 on [0,5), 2 on [5,10), 0 on [10,20) -> mean 15/20
        assert!((pool.mean_busy(20.0) - 0.75).abs() < 1e-12);
        assert!((pool.utilization(20.0) - 0.375).abs() < 1e-12);
    }

    #[test]
    fn set_capacity_resets_state() {
        let mut pool = ServerPool::new(Station::SignInTriage, 1);
        assert!(pool.try_seize(0.0));
        pool.set_capacity(3);
        assert_eq!(pool.capacity(), 3);
        assert_eq!(pool.busy(), 0);
    }
}
