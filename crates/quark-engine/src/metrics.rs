//! Per-step performance and bookkeeping counters.

/// Timing and bookkeeping collected during a single step.
///
/// All durations are wall-clock microseconds. Observers see the metrics of
/// the step they are called for with `observer_us` and `total_us` still
/// zero; the value returned by [`Simulation::step`](crate::Simulation::step)
/// is complete.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step, in microseconds.
    pub total_us: u64,
    /// Time spent resetting and recomputing forces, in microseconds.
    pub force_us: u64,
    /// Time spent repairing cell membership, in microseconds.
    pub repair_us: u64,
    /// Time spent in observers, in microseconds.
    pub observer_us: u64,
    /// Unordered particle pairs handed to the interactors.
    pub pair_evaluations: u64,
    /// Particles moved to a different cell by the repair pass.
    pub migrations: u64,
    /// Particles absorbed by the border during this step.
    pub absorbed: u64,
    /// Particles dropped because their position became NaN or infinite.
    pub lost: u64,
}

impl StepMetrics {
    /// Particles that left the grid during this step, for any reason.
    pub fn excluded(&self) -> u64 {
        self.absorbed + self.lost
    }
}
