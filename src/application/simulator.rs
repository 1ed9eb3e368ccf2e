// Tick seam between the scheduler and the simulators
use async_trait::async_trait;

#[async_trait]
pub trait SimulatorTick: Send + Sync {
    /// Apply one simulation step. The scheduler never overlaps ticks of the
    /// same job, so a step sees the previous one fully applied.
    async fn tick(&self);
}
