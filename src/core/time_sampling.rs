//! Time sampling definitions.
//!
//! A property's samples are bound to one time sampling from the archive's
//! registry. Only acyclic sampling limits how many samples may be written.

use crate::util::Chrono;

/// Type of time sampling.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum TimeSamplingType {
    /// Single static sample at time 0.
    #[default]
    Identity,

    /// `start_time + index * time_per_cycle`
    Uniform {
        time_per_cycle: Chrono,
        start_time: Chrono,
    },

    /// Repeating pattern of sample times.
    Cyclic {
        time_per_cycle: Chrono,
        times: Vec<Chrono>,
    },

    /// Explicit time for each sample.
    Acyclic {
        times: Vec<Chrono>,
    },
}

impl TimeSamplingType {
    #[inline]
    pub fn is_uniform(&self) -> bool {
        matches!(self, Self::Identity | Self::Uniform { .. })
    }

    #[inline]
    pub fn is_cyclic(&self) -> bool {
        matches!(self, Self::Cyclic { .. })
    }

    #[inline]
    pub fn is_acyclic(&self) -> bool {
        matches!(self, Self::Acyclic { .. })
    }
}

/// Time sampling definition stored in the archive registry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeSampling {
    pub sampling_type: TimeSamplingType,
}

impl TimeSampling {
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn uniform(time_per_cycle: Chrono, start_time: Chrono) -> Self {
        Self {
            sampling_type: TimeSamplingType::Uniform { time_per_cycle, start_time },
        }
    }

    pub fn cyclic(time_per_cycle: Chrono, times: Vec<Chrono>) -> Self {
        Self {
            sampling_type: TimeSamplingType::Cyclic { time_per_cycle, times },
        }
    }

    pub fn acyclic(times: Vec<Chrono>) -> Self {
        Self {
            sampling_type: TimeSamplingType::Acyclic { times },
        }
    }

    /// Number of stored times (one for identity and uniform sampling).
    pub fn num_stored_times(&self) -> usize {
        match &self.sampling_type {
            TimeSamplingType::Identity | TimeSamplingType::Uniform { .. } => 1,
            TimeSamplingType::Cyclic { times, .. } | TimeSamplingType::Acyclic { times } => {
                times.len()
            }
        }
    }

    /// Whether a property already holding `num_samples` samples may take one more.
    #[inline]
    pub fn allows_sample(&self, num_samples: u32) -> bool {
        !self.sampling_type.is_acyclic() || self.num_stored_times() > num_samples as usize
    }

    /// Two samplings are equivalent when they produce the same sample times.
    ///
    /// Identity equals a uniform sampling of one second starting at zero.
    pub fn is_equivalent(&self, other: &TimeSampling) -> bool {
        fn normalized(ts: &TimeSampling) -> TimeSamplingType {
            match ts.sampling_type {
                TimeSamplingType::Identity => TimeSamplingType::Uniform {
                    time_per_cycle: 1.0,
                    start_time: 0.0,
                },
                ref other => other.clone(),
            }
        }
        normalized(self) == normalized(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_times() {
        assert_eq!(TimeSampling::identity().num_stored_times(), 1);
        assert_eq!(TimeSampling::uniform(1.0 / 24.0, 0.0).num_stored_times(), 1);
        assert_eq!(TimeSampling::cyclic(1.0, vec![0.0, 0.25]).num_stored_times(), 2);
        assert_eq!(TimeSampling::acyclic(vec![0.0, 0.5, 3.0]).num_stored_times(), 3);
    }

    #[test]
    fn test_acyclic_bound() {
        let ts = TimeSampling::acyclic(vec![0.0, 0.5]);
        assert!(ts.allows_sample(0));
        assert!(ts.allows_sample(1));
        assert!(!ts.allows_sample(2));

        // Only acyclic sampling is bounded.
        assert!(TimeSampling::cyclic(1.0, vec![0.0]).allows_sample(100));
        assert!(TimeSampling::uniform(1.0, 0.0).allows_sample(100));
    }

    #[test]
    fn test_equivalence() {
        assert!(TimeSampling::identity().is_equivalent(&TimeSampling::uniform(1.0, 0.0)));
        assert!(!TimeSampling::uniform(0.5, 0.0).is_equivalent(&TimeSampling::uniform(1.0, 0.0)));
        assert!(TimeSampling::acyclic(vec![1.0]).is_equivalent(&TimeSampling::acyclic(vec![1.0])));
    }
}
