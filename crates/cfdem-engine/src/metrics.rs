//! Run metrics for the coupling loop.

/// Counters and cumulative phase timings for one run.
///
/// All durations are in microseconds and accumulate across iterations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Iterations whose physics completed.
    pub iterations_completed: u64,
    /// Frames handed to the consumer.
    pub frames_published: u64,
    /// Published frames the consumer acknowledged.
    pub frames_acknowledged: u64,
    /// Frames not delivered because of the update frequency.
    pub frames_skipped: u64,
    /// Time in the fluid engine's `advance()`.
    pub fluid_us: u64,
    /// Time locating particles, evaluating drag and pushing forces.
    pub drag_us: u64,
    /// Time in the particle engine's `advance()`.
    pub particle_us: u64,
    /// Time copying engine state into frames.
    pub snapshot_us: u64,
    /// Time handing frames over, including acknowledgement waits.
    pub publish_us: u64,
    /// Wall-clock time of the most recent iteration.
    pub last_iteration_us: u64,
}

impl RunMetrics {
    /// Total time spent in the two external engines.
    pub fn engine_us(&self) -> u64 {
        self.fluid_us + self.particle_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = RunMetrics::default();
        assert_eq!(m.iterations_completed, 0);
        assert_eq!(m.frames_published, 0);
        assert_eq!(m.frames_acknowledged, 0);
        assert_eq!(m.frames_skipped, 0);
        assert_eq!(m.engine_us(), 0);
        assert_eq!(m.publish_us, 0);
    }

    #[test]
    fn engine_time_sums_both_engines() {
        let m = RunMetrics {
            fluid_us: 40,
            particle_us: 2,
            ..RunMetrics::default()
        };
        assert_eq!(m.engine_us(), 42);
    }
}
