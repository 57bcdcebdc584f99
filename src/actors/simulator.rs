use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, instrument};
use crate::clients::SeatClient;

/// Where simulation ticks come from. `None` ends the simulation.
pub trait TickSource: Send + 'static {
    fn next_tick(&mut self) -> impl Future<Output = Option<()>> + Send;
}

/// Wall-clock ticks at a fixed period; the first tick lands one period after start.
pub struct IntervalTicks {
    interval: Interval,
}

impl IntervalTicks {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }
}

impl TickSource for IntervalTicks {
    async fn next_tick(&mut self) -> Option<()> {
        self.interval.tick().await;
        Some(())
    }
}

/// Ticks delivered by hand, for stepping the simulation deterministically.
pub struct ManualTicks {
    receiver: mpsc::UnboundedReceiver<()>,
}

impl ManualTicks {
    /// Returns the source and the sender that triggers ticks. Dropping the sender ends the source.
    pub fn new() -> (Self, mpsc::UnboundedSender<()>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { receiver }, sender)
    }
}

impl TickSource for ManualTicks {
    async fn next_tick(&mut self) -> Option<()> {
        self.receiver.recv().await
    }
}

/// Animates the seat grid by asking the registry for a random flip on every tick.
///
/// Demo-only activity. It can flip a seat a visitor has selected but not yet
/// committed; completion occupies the seat regardless.
pub struct OccupancySimulator<S: TickSource> {
    seat_client: SeatClient,
    ticks: S,
}

impl<S: TickSource> OccupancySimulator<S> {
    pub fn new(seat_client: SeatClient, ticks: S) -> Self {
        Self { seat_client, ticks }
    }

    /// Runs until the tick source ends or the registry goes away. Returns the number of applied ticks.
    #[instrument(name = "occupancy_simulator", skip(self))]
    pub async fn run(mut self) -> usize {
        info!("OccupancySimulator starting");
        let mut applied = 0;
        while self.ticks.next_tick().await.is_some() {
            match self.seat_client.simulate_tick().await {
                Ok(outcome) => {
                    applied += 1;
                    debug!(released = ?outcome.released, occupied = ?outcome.occupied, "Tick applied");
                }
                Err(e) => {
                    info!(error = %e, "Seat registry gone, stopping simulation");
                    break;
                }
            }
        }
        info!(ticks = applied, "OccupancySimulator stopped");
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::{SeatRegistry, SeatRegistryService};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spawn_registry() -> SeatClient {
        let registry = SeatRegistry::initialize(&["A区", "B区", "C区"], 12);
        let (service, client) = SeatRegistryService::new(8, registry, StdRng::seed_from_u64(11));
        tokio::spawn(service.run());
        client
    }

    #[tokio::test]
    async fn test_manual_ticks_are_applied() {
        let client = spawn_registry();
        let (ticks, trigger) = ManualTicks::new();
        let simulator = tokio::spawn(OccupancySimulator::new(client.clone(), ticks).run());

        for _ in 0..3 {
            trigger.send(()).unwrap();
        }
        drop(trigger);

        assert_eq!(simulator.await.unwrap(), 3);
        let occupied = client.list_seats().await.unwrap().iter().filter(|s| s.is_occupied).count();
        assert!(occupied <= 3);
    }

    #[tokio::test]
    async fn test_stops_when_registry_shuts_down() {
        let client = spawn_registry();
        client.shutdown().await.unwrap();

        let (ticks, trigger) = ManualTicks::new();
        let simulator = tokio::spawn(OccupancySimulator::new(client, ticks).run());
        trigger.send(()).unwrap();

        assert_eq!(simulator.await.unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_ticks_follow_period() {
        let period = Duration::from_secs(5);
        let mut ticks = IntervalTicks::new(period);
        let start = Instant::now();

        ticks.next_tick().await.unwrap();
        assert_eq!(start.elapsed(), period);
        ticks.next_tick().await.unwrap();
        assert_eq!(start.elapsed(), period * 2);
    }
}
