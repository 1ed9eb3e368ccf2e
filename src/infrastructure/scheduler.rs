// Tick scheduler - independent tokio intervals driving simulator jobs
use crate::application::simulator::SimulatorTick;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// Drives each job on its own interval. Jobs never block each other, and
/// ticks of the same job never overlap: the loop awaits the step before
/// asking the interval for the next one.
pub struct Scheduler {
    shutdown: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl Scheduler {
    pub fn start(jobs: Vec<(Duration, Arc<dyn SimulatorTick>)>) -> Self {
        let (shutdown, _) = watch::channel(false);
        let handles = jobs
            .into_iter()
            .map(|(period, job)| {
                let mut rx = shutdown.subscribe();
                tokio::spawn(async move {
                    let mut interval = time::interval(period);
                    // Missed ticks are skipped, never replayed.
                    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                    // The first interval tick resolves immediately; consume
                    // it so the first step lands after one full period.
                    interval.tick().await;
                    loop {
                        tokio::select! {
                            _ = interval.tick() => job.tick().await,
                            _ = rx.changed() => break,
                        }
                    }
                })
            })
            .collect();
        Self { shutdown, handles }
    }

    /// Stop every job. An in-flight step runs to completion; once this
    /// returns, no further mutation can occur.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        for handle in self.handles {
            let _ = handle.await;
        }
    }
}
